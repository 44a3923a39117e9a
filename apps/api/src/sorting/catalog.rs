//! Landing-page catalog — every `/locations/...` and `/jobs/occupation/...`
//! page the site serves, enumerated once from the gazetteer and indexed by
//! `(state, city, category)` key and by URL.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::locations::gazetteer::{cities_in, StateInfo, JOB_CATEGORIES, STATES};
use crate::locations::slugify;

/// Page shape, ordered by specificity: a later variant is more specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    State,
    StateCategory,
    City,
    CityCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationPage {
    pub kind: PageKind,
    pub state: String,
    pub city: Option<String>,
    pub category: Option<String>,
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPage {
    pub category: String,
    pub url: String,
    pub title: String,
}

type PageKey = (String, Option<String>, Option<String>);

#[derive(Debug)]
pub struct PageCatalog {
    pages: Vec<LocationPage>,
    by_key: HashMap<PageKey, usize>,
    by_url: HashMap<String, usize>,
    category_pages: Vec<CategoryPage>,
}

impl PageCatalog {
    /// Enumerates the full catalog: per state the state page and its
    /// state+category pages, then each city page followed by its
    /// city+category pages.
    pub fn build() -> Self {
        let mut pages = Vec::new();

        for state in STATES {
            pages.push(page(state, None, None));
            for category in JOB_CATEGORIES {
                pages.push(page(state, None, Some((category.slug, category.name))));
            }
            for city in cities_in(state.abbr) {
                pages.push(page(state, Some(*city), None));
                for category in JOB_CATEGORIES {
                    pages.push(page(state, Some(*city), Some((category.slug, category.name))));
                }
            }
        }

        let by_key = pages
            .iter()
            .enumerate()
            .map(|(i, p)| ((p.state.clone(), p.city.clone(), p.category.clone()), i))
            .collect();
        let by_url = pages
            .iter()
            .enumerate()
            .map(|(i, p)| (p.url.clone(), i))
            .collect();

        let category_pages: Vec<CategoryPage> = JOB_CATEGORIES
            .iter()
            .map(|c| CategoryPage {
                category: c.slug.to_string(),
                url: format!("/jobs/occupation/{}", c.slug),
                title: format!("{} Jobs in Australia", c.name),
            })
            .collect();

        info!(
            "Page catalog built: {} location pages, {} category pages",
            pages.len(),
            category_pages.len()
        );

        Self {
            pages,
            by_key,
            by_url,
            category_pages,
        }
    }

    pub fn pages(&self) -> &[LocationPage] {
        &self.pages
    }

    pub fn category_pages(&self) -> &[CategoryPage] {
        &self.category_pages
    }

    /// Catalog position and page for slug-form `(state, city, category)`.
    pub fn lookup(
        &self,
        state: &str,
        city: Option<&str>,
        category: Option<&str>,
    ) -> Option<(usize, &LocationPage)> {
        let key = (
            state.to_string(),
            city.map(str::to_string),
            category.map(str::to_string),
        );
        self.by_key.get(&key).map(|&i| (i, &self.pages[i]))
    }

    pub fn find_by_url(&self, url: &str) -> Option<&LocationPage> {
        self.by_url.get(url).map(|&i| &self.pages[i])
    }

    pub fn category_page(&self, slug: &str) -> Option<&CategoryPage> {
        self.category_pages.iter().find(|p| p.category == slug)
    }
}

fn page(state: &StateInfo, city: Option<&str>, category: Option<(&str, &str)>) -> LocationPage {
    let state_slug = state.slug();
    let city_slug = city.map(slugify);

    let mut url = format!("/locations/{state_slug}");
    if let Some(city_slug) = &city_slug {
        url.push('/');
        url.push_str(city_slug);
    }
    if let Some((category_slug, _)) = category {
        url.push('/');
        url.push_str(category_slug);
    }

    let place = match city {
        Some(city) => format!("{city}, {}", state.abbr),
        None => state.name.to_string(),
    };
    let (kind, title) = match (city, category) {
        (None, None) => (PageKind::State, format!("Allied Health Jobs in {place}")),
        (None, Some((_, name))) => (PageKind::StateCategory, format!("{name} Jobs in {place}")),
        (Some(_), None) => (PageKind::City, format!("Allied Health Jobs in {place}")),
        (Some(_), Some((_, name))) => (PageKind::CityCategory, format!("{name} Jobs in {place}")),
    };

    LocationPage {
        kind,
        state: state_slug,
        city: city_slug,
        category: category.map(|(slug, _)| slug.to_string()),
        url,
        title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_is_full_cross_product() {
        let catalog = PageCatalog::build();
        let cities: usize = STATES.iter().map(|s| cities_in(s.abbr).len()).sum();
        let per_place = 1 + JOB_CATEGORIES.len();
        assert_eq!(catalog.pages().len(), (STATES.len() + cities) * per_place);
        assert_eq!(catalog.category_pages().len(), JOB_CATEGORIES.len());
    }

    #[test]
    fn test_urls_are_unique() {
        let catalog = PageCatalog::build();
        assert_eq!(catalog.by_url.len(), catalog.pages().len());
    }

    #[test]
    fn test_lookup_by_key() {
        let catalog = PageCatalog::build();
        let (_, page) = catalog
            .lookup("nsw", Some("wagga-wagga"), Some("physiotherapy"))
            .unwrap();
        assert_eq!(page.url, "/locations/nsw/wagga-wagga/physiotherapy");
        assert_eq!(page.kind, PageKind::CityCategory);
        assert_eq!(page.title, "Physiotherapy Jobs in Wagga Wagga, NSW");

        assert!(catalog.lookup("nsw", Some("perth"), None).is_none());
    }

    #[test]
    fn test_state_category_page() {
        let catalog = PageCatalog::build();
        let page = catalog.find_by_url("/locations/vic/psychology").unwrap();
        assert_eq!(page.kind, PageKind::StateCategory);
        assert_eq!(page.city, None);
        assert_eq!(page.category.as_deref(), Some("psychology"));
    }

    #[test]
    fn test_specificity_order() {
        assert!(PageKind::CityCategory > PageKind::City);
        assert!(PageKind::City > PageKind::StateCategory);
        assert!(PageKind::StateCategory > PageKind::State);
    }

    #[test]
    fn test_category_page_url() {
        let catalog = PageCatalog::build();
        let page = catalog.category_page("social-work").unwrap();
        assert_eq!(page.url, "/jobs/occupation/social-work");
        assert!(catalog.category_page("nursing").is_none());
    }
}
