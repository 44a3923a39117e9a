//! Job sorter — decides which landing pages a job appears on and whether it
//! belongs in the homepage feed.
//!
//! Placement uses the canonical `city`/`state` slugs stored on the job. The
//! free-text `practice_location` is only re-parsed by the explicit repair
//! operation in `jobs::repair`, never on this read path.

use serde::Serialize;
use tracing::debug;

use crate::locations::gazetteer::resolve_state;
use crate::locations::slugify;
use crate::models::job::Job;
use crate::sorting::catalog::{LocationPage, PageCatalog};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSortingResult {
    pub job_id: i32,
    /// Matching `/locations/...` URLs in catalog order.
    pub location_pages: Vec<String>,
    /// Matching `/jobs/occupation/...` URLs in the job's category order.
    pub category_pages: Vec<String>,
    pub should_appear_on_homepage: bool,
    /// Most specific matching location page.
    pub primary_location_page: Option<String>,
    pub primary_category_page: Option<String>,
}

/// A job's slug-form coordinates in the page catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placement {
    state: Option<String>,
    city: Option<String>,
    categories: Vec<String>,
}

impl Placement {
    fn of(job: &Job) -> Self {
        let state = resolve_state(&job.state).map(|s| s.slug());
        let city = Some(slugify(&job.city)).filter(|c| !c.is_empty());

        let mut categories: Vec<String> = Vec::with_capacity(job.job_categories.len());
        for slug in job.job_categories.iter().map(|c| slugify(c)) {
            if !slug.is_empty() && !categories.contains(&slug) {
                categories.push(slug);
            }
        }

        Self {
            state,
            city,
            categories,
        }
    }

    fn matches(&self, state: &str, city: Option<&str>, category: Option<&str>) -> bool {
        self.state.as_deref() == Some(state)
            && city.map_or(true, |c| self.city.as_deref() == Some(c))
            && category.map_or(true, |c| self.categories.iter().any(|own| own == c))
    }

    fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|own| own == category)
    }
}

/// Every landing page `job` belongs on, plus homepage eligibility.
pub fn sort_job(catalog: &PageCatalog, job: &Job) -> JobSortingResult {
    let placement = Placement::of(job);

    let mut hits: Vec<(usize, &LocationPage)> = Vec::new();
    if let Some(state) = placement.state.as_deref() {
        let cities = std::iter::once(None).chain(placement.city.as_deref().map(Some));
        for city in cities {
            hits.extend(catalog.lookup(state, city, None));
            for category in &placement.categories {
                hits.extend(catalog.lookup(state, city, Some(category.as_str())));
            }
        }
    }
    hits.sort_by_key(|(position, _)| *position);

    // Highest specificity wins; among equals the earliest catalog entry.
    let primary_location_page = hits
        .iter()
        .max_by(|a, b| a.1.kind.cmp(&b.1.kind).then(b.0.cmp(&a.0)))
        .map(|(_, page)| page.url.clone());

    let category_pages: Vec<String> = placement
        .categories
        .iter()
        .filter_map(|c| catalog.category_page(c))
        .map(|page| page.url.clone())
        .collect();

    let location_pages: Vec<String> = hits.iter().map(|(_, page)| page.url.clone()).collect();
    let should_appear_on_homepage =
        job.is_featured || (location_pages.is_empty() && category_pages.is_empty());

    debug!(
        job_id = job.id,
        location_pages = location_pages.len(),
        category_pages = category_pages.len(),
        homepage = should_appear_on_homepage,
        "sorted job"
    );

    JobSortingResult {
        job_id: job.id,
        primary_category_page: category_pages.first().cloned(),
        location_pages,
        category_pages,
        should_appear_on_homepage,
        primary_location_page,
    }
}

/// Jobs belonging on one location page. `state` accepts an abbreviation or
/// full name in any case; `city` and `category` are slugified before
/// comparison. An unknown state yields no jobs.
pub fn jobs_for_location_page<'a>(
    jobs: &'a [Job],
    state: &str,
    city: Option<&str>,
    category: Option<&str>,
) -> Vec<&'a Job> {
    let Some(state) = resolve_state(state) else {
        return Vec::new();
    };
    let state = state.slug();
    let city = city.map(slugify);
    let category = category.map(slugify);

    jobs.iter()
        .filter(|job| {
            Placement::of(job).matches(&state, city.as_deref(), category.as_deref())
        })
        .collect()
}

/// Jobs for `/jobs/occupation/{category}`, regardless of location.
pub fn jobs_for_category<'a>(jobs: &'a [Job], category: &str) -> Vec<&'a Job> {
    let category = slugify(category);
    jobs.iter()
        .filter(|job| Placement::of(job).has_category(&category))
        .collect()
}

/// Homepage feed: featured jobs plus jobs no landing page absorbs, in input
/// order.
pub fn jobs_for_homepage<'a>(catalog: &PageCatalog, jobs: &'a [Job]) -> Vec<&'a Job> {
    jobs.iter()
        .filter(|job| sort_job(catalog, job).should_appear_on_homepage)
        .collect()
}
