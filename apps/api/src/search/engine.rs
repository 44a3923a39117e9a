//! Search engine — weighted substring scoring of jobs against a free-text
//! query.
//!
//! Algorithm, per job and per field:
//! - field contains every query term → `2 × weight`
//! - field contains at least one term → `1 × weight`
//! - otherwise nothing
//!
//! Jobs scoring zero are dropped; the rest are stably sorted by descending
//! score, so equal scores keep their input order.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::locations::gazetteer::resolve_state;
use crate::locations::slugify;
use crate::models::job::Job;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Score given to every job when filters are applied without a query.
pub const FILTER_ONLY_SCORE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    JobTitle,
    CompanyName,
    LocationDisplay,
    JobDetails,
    JobCategories,
    JobType,
    ExperienceLevel,
    WorkSetting,
    SalaryRange,
}

impl SearchField {
    pub const ALL: [SearchField; 9] = [
        SearchField::JobTitle,
        SearchField::CompanyName,
        SearchField::LocationDisplay,
        SearchField::JobDetails,
        SearchField::JobCategories,
        SearchField::JobType,
        SearchField::ExperienceLevel,
        SearchField::WorkSetting,
        SearchField::SalaryRange,
    ];

    /// Searchable text of this field; list fields are space-joined.
    fn text(self, job: &Job) -> Cow<'_, str> {
        match self {
            SearchField::JobTitle => Cow::Borrowed(&job.job_title),
            SearchField::CompanyName => Cow::Borrowed(&job.company_name),
            SearchField::LocationDisplay => Cow::Borrowed(&job.location_display),
            SearchField::JobDetails => Cow::Borrowed(&job.job_details),
            SearchField::JobCategories => Cow::Owned(job.job_categories.join(" ")),
            SearchField::JobType => Cow::Borrowed(&job.job_type),
            SearchField::ExperienceLevel => Cow::Borrowed(&job.experience_level),
            SearchField::WorkSetting => Cow::Borrowed(&job.work_setting),
            SearchField::SalaryRange => Cow::Borrowed(&job.salary_range),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWeights {
    pub job_title: u32,
    pub company_name: u32,
    pub location_display: u32,
    pub job_details: u32,
    pub job_categories: u32,
    pub job_type: u32,
    pub experience_level: u32,
    pub work_setting: u32,
    pub salary_range: u32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            job_title: 10,
            company_name: 8,
            location_display: 6,
            job_details: 5,
            job_categories: 4,
            job_type: 3,
            experience_level: 3,
            work_setting: 2,
            salary_range: 1,
        }
    }
}

impl FieldWeights {
    pub fn weight(&self, field: SearchField) -> u32 {
        match field {
            SearchField::JobTitle => self.job_title,
            SearchField::CompanyName => self.company_name,
            SearchField::LocationDisplay => self.location_display,
            SearchField::JobDetails => self.job_details,
            SearchField::JobCategories => self.job_categories,
            SearchField::JobType => self.job_type,
            SearchField::ExperienceLevel => self.experience_level,
            SearchField::WorkSetting => self.work_setting,
            SearchField::SalaryRange => self.salary_range,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub field_weights: FieldWeights,
    /// Treat the whole query as one term instead of splitting on whitespace.
    pub exact_match: bool,
    pub case_sensitive: bool,
}

/// Hard pre-filters applied before scoring. Blank values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilters {
    pub city: Option<String>,
    pub state: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    pub occupation: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        [
            &self.city,
            &self.state,
            &self.job_type,
            &self.experience_level,
            &self.occupation,
        ]
        .iter()
        .all(|f| active(f).is_none())
    }

    fn accepts(&self, job: &Job) -> bool {
        if let Some(city) = active(&self.city) {
            if slugify(city) != slugify(&job.city) {
                return false;
            }
        }
        if let Some(state) = active(&self.state) {
            let same_state = match (resolve_state(state), resolve_state(&job.state)) {
                (Some(wanted), Some(own)) => wanted == own,
                _ => false,
            };
            if !same_state {
                return false;
            }
        }
        if let Some(job_type) = active(&self.job_type) {
            if !contains_ignore_case(&job.job_type, job_type) {
                return false;
            }
        }
        if let Some(level) = active(&self.experience_level) {
            if !contains_ignore_case(&job.experience_level, level) {
                return false;
            }
        }
        if let Some(occupation) = active(&self.occupation) {
            let wanted = slugify(occupation);
            if !job.job_categories.iter().any(|c| slugify(c) == wanted) {
                return false;
            }
        }
        true
    }
}

fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().map(str::trim).filter(|f| !f.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub job: Job,
    pub relevance_score: u32,
    pub matched_fields: Vec<SearchField>,
}

/// Ranks `jobs` against `query`. A blank query returns every job with score
/// 0 in input order.
pub fn search_jobs(jobs: &[Job], query: &str, options: &SearchOptions) -> Vec<SearchResult> {
    let query = query.trim();
    if query.is_empty() {
        return jobs
            .iter()
            .map(|job| SearchResult {
                job: job.clone(),
                relevance_score: 0,
                matched_fields: vec![],
            })
            .collect();
    }

    let folded = fold_case(query, options.case_sensitive);
    let terms: Vec<&str> = if options.exact_match {
        vec![&*folded]
    } else {
        folded.split_whitespace().collect()
    };

    let mut results: Vec<SearchResult> = jobs
        .iter()
        .filter_map(|job| score_job(job, &terms, options))
        .collect();

    // `sort_by` is stable: equal scores keep input order.
    results.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

    debug!(
        query,
        candidates = jobs.len(),
        results = results.len(),
        "search complete"
    );
    results
}

/// Applies `filters`, then ranks the survivors. A blank query returns the
/// filtered jobs in input order, each with score [`FILTER_ONLY_SCORE`].
pub fn search_jobs_with_filters(
    jobs: &[Job],
    query: &str,
    filters: &SearchFilters,
    options: &SearchOptions,
) -> Vec<SearchResult> {
    let filtered: Vec<Job> = jobs
        .iter()
        .filter(|job| filters.accepts(job))
        .cloned()
        .collect();

    if query.trim().is_empty() {
        return filtered
            .into_iter()
            .map(|job| SearchResult {
                job,
                relevance_score: FILTER_ONLY_SCORE,
                matched_fields: vec![],
            })
            .collect();
    }

    search_jobs(&filtered, query, options)
}

/// Distinct titles, companies, locations and categories containing
/// `partial`, in job order. A blank `partial` matches every non-empty value.
pub fn get_search_suggestions(jobs: &[Job], partial: &str, max: usize) -> Vec<String> {
    let needle = partial.to_lowercase();
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    let candidates = jobs.iter().flat_map(|job| {
        [&job.job_title, &job.company_name, &job.location_display]
            .into_iter()
            .chain(job.job_categories.iter())
    });
    for candidate in candidates {
        if suggestions.len() >= max {
            break;
        }
        if candidate.is_empty() {
            continue;
        }
        if candidate.to_lowercase().contains(&needle) && seen.insert(candidate.as_str()) {
            suggestions.push(candidate.clone());
        }
    }

    suggestions
}

fn fold_case(text: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.to_lowercase())
    }
}

fn score_job(job: &Job, terms: &[&str], options: &SearchOptions) -> Option<SearchResult> {
    let mut relevance_score = 0;
    let mut matched_fields = Vec::new();

    for field in SearchField::ALL {
        let raw = field.text(job);
        let text = fold_case(&raw, options.case_sensitive);
        let hits = terms.iter().filter(|t| text.contains(**t)).count();
        if hits == 0 {
            continue;
        }

        let weight = options.field_weights.weight(field);
        relevance_score += if hits == terms.len() { 2 * weight } else { weight };
        matched_fields.push(field);
    }

    (relevance_score > 0).then(|| SearchResult {
        job: job.clone(),
        relevance_score,
        matched_fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_job(id: i32, title: &str) -> Job {
        Job {
            id,
            job_title: title.to_string(),
            ..Job::default()
        }
    }

    fn sample_jobs() -> Vec<Job> {
        vec![
            Job {
                id: 1,
                job_title: "Senior Physiotherapist".to_string(),
                company_name: "Sydney Physio Clinic".to_string(),
                practice_location: "Sydney NSW".to_string(),
                location_display: "Sydney, NSW".to_string(),
                city: "sydney".to_string(),
                state: "nsw".to_string(),
                job_categories: vec!["physiotherapy".to_string()],
                job_details: "Busy musculoskeletal practice servicing Blacktown and Parramatta."
                    .to_string(),
                job_type: "Full-time".to_string(),
                experience_level: "Senior".to_string(),
                ..Job::default()
            },
            Job {
                id: 2,
                job_title: "Occupational Therapist".to_string(),
                company_name: "Bayside Allied Health".to_string(),
                location_display: "Melbourne, VIC".to_string(),
                city: "melbourne".to_string(),
                state: "vic".to_string(),
                job_categories: vec!["occupational-therapy".to_string()],
                job_type: "Part-time".to_string(),
                experience_level: "Graduate".to_string(),
                ..Job::default()
            },
            Job {
                id: 3,
                job_title: "Graduate Physiotherapist".to_string(),
                company_name: "Harbour Rehab".to_string(),
                location_display: "Sydney, NSW".to_string(),
                city: "sydney".to_string(),
                state: "nsw".to_string(),
                job_categories: vec!["physiotherapy".to_string()],
                job_type: "Full-time".to_string(),
                experience_level: "Graduate".to_string(),
                ..Job::default()
            },
        ]
    }

    #[test]
    fn test_empty_query_returns_everything_unscored() {
        let jobs = sample_jobs();
        let results = search_jobs(&jobs, "   ", &SearchOptions::default());
        let ids: Vec<i32> = results.iter().map(|r| r.job.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(results.iter().all(|r| r.relevance_score == 0));
        assert!(results.iter().all(|r| r.matched_fields.is_empty()));
    }

    #[test]
    fn test_all_terms_bonus_beats_partial_match() {
        let jobs = vec![
            make_job(1, "Senior Dietitian"),
            make_job(2, "Senior Physiotherapist"),
        ];
        let results = search_jobs(&jobs, "senior physio", &SearchOptions::default());
        assert_eq!(results[0].job.id, 2);
        assert_eq!(results[0].relevance_score, 20);
        assert_eq!(results[1].relevance_score, 10);
    }

    #[test]
    fn test_non_matching_jobs_are_excluded() {
        let jobs = vec![make_job(1, "Podiatrist"), make_job(2, "Audiologist")];
        let results = search_jobs(&jobs, "podiatrist", &SearchOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].job.id, 1);
    }

    #[test]
    fn test_categories_and_details_both_contribute() {
        let jobs = sample_jobs();
        let results = search_jobs(&jobs, "physiotherapy blacktown", &SearchOptions::default());
        let first = results.iter().find(|r| r.job.id == 1).unwrap();
        assert!(first.relevance_score > 0);
        assert!(first.matched_fields.contains(&SearchField::JobCategories));
        assert!(first.matched_fields.contains(&SearchField::JobDetails));
        // categories: any-term (4), details: any-term (5)
        assert_eq!(first.relevance_score, 9);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let jobs = vec![
            make_job(1, "Psychologist"),
            make_job(2, "Podiatrist"),
            make_job(3, "Psychologist"),
        ];
        let results = search_jobs(&jobs, "psychologist", &SearchOptions::default());
        let ids: Vec<i32> = results.iter().map(|r| r.job.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_case_sensitive_option() {
        let jobs = vec![make_job(1, "Speech Pathologist")];
        let options = SearchOptions {
            case_sensitive: true,
            ..SearchOptions::default()
        };
        assert!(search_jobs(&jobs, "speech", &options).is_empty());
        assert_eq!(search_jobs(&jobs, "Speech", &options).len(), 1);
        assert_eq!(search_jobs(&jobs, "speech", &SearchOptions::default()).len(), 1);
    }

    #[test]
    fn test_exact_match_uses_whole_query() {
        let jobs = vec![make_job(1, "Senior Physiotherapist"), make_job(2, "Physio Senior")];
        let options = SearchOptions {
            exact_match: true,
            ..SearchOptions::default()
        };
        let results = search_jobs(&jobs, "senior physio", &options);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].job.id, 1);
    }

    #[test]
    fn test_custom_field_weights() {
        let jobs = vec![Job {
            id: 1,
            salary_range: "$90k - $110k".to_string(),
            ..Job::default()
        }];
        let options = SearchOptions {
            field_weights: FieldWeights {
                salary_range: 7,
                ..FieldWeights::default()
            },
            ..SearchOptions::default()
        };
        let results = search_jobs(&jobs, "$90k", &options);
        assert_eq!(results[0].relevance_score, 14);
        assert_eq!(results[0].matched_fields, vec![SearchField::SalaryRange]);
    }

    #[test]
    fn test_filters_without_query_score_one() {
        let jobs = sample_jobs();
        let filters = SearchFilters {
            city: Some("sydney".to_string()),
            ..SearchFilters::default()
        };
        let results = search_jobs_with_filters(&jobs, "", &filters, &SearchOptions::default());
        let ids: Vec<i32> = results.iter().map(|r| r.job.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(results.iter().all(|r| r.relevance_score == FILTER_ONLY_SCORE));
        assert!(results.iter().all(|r| r.matched_fields.is_empty()));
    }

    #[test]
    fn test_filters_then_query() {
        let jobs = sample_jobs();
        let filters = SearchFilters {
            state: Some("New South Wales".to_string()),
            experience_level: Some("graduate".to_string()),
            ..SearchFilters::default()
        };
        let results =
            search_jobs_with_filters(&jobs, "physiotherapist", &filters, &SearchOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].job.id, 3);
    }

    #[test]
    fn test_job_type_and_occupation_filters() {
        let jobs = sample_jobs();
        let filters = SearchFilters {
            job_type: Some("full".to_string()),
            occupation: Some("Physiotherapy".to_string()),
            ..SearchFilters::default()
        };
        assert_eq!(
            search_jobs_with_filters(&jobs, "", &filters, &SearchOptions::default()).len(),
            2
        );

        let filters = SearchFilters {
            occupation: Some("occupational therapy".to_string()),
            ..SearchFilters::default()
        };
        let results = search_jobs_with_filters(&jobs, "", &filters, &SearchOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].job.id, 2);
    }

    #[test]
    fn test_blank_filters_are_ignored() {
        let filters = SearchFilters {
            city: Some("  ".to_string()),
            ..SearchFilters::default()
        };
        assert!(filters.is_empty());
        assert!(!SearchFilters {
            state: Some("vic".to_string()),
            ..SearchFilters::default()
        }
        .is_empty());
    }

    #[test]
    fn test_suggestions_are_distinct_and_ordered() {
        let jobs = sample_jobs();
        let suggestions = get_search_suggestions(&jobs, "PHYSIO", 10);
        assert_eq!(
            suggestions,
            vec![
                "Senior Physiotherapist",
                "Sydney Physio Clinic",
                "physiotherapy",
                "Graduate Physiotherapist",
            ]
        );
    }

    #[test]
    fn test_suggestions_respect_limit() {
        let jobs = sample_jobs();
        assert_eq!(get_search_suggestions(&jobs, "sydney", 1), vec!["Sydney Physio Clinic"]);
        assert!(get_search_suggestions(&jobs, "xyz", 10).is_empty());
    }

    #[test]
    fn test_blank_partial_lists_first_values_in_job_order() {
        let jobs = vec![Job {
            id: 1,
            job_title: "Podiatrist".to_string(),
            company_name: "Foot Co".to_string(),
            ..Job::default()
        }];
        assert_eq!(get_search_suggestions(&jobs, "", 10), vec!["Podiatrist", "Foot Co"]);
        assert_eq!(get_search_suggestions(&jobs, "", 1), vec!["Podiatrist"]);

        let jobs = sample_jobs();
        assert_eq!(
            get_search_suggestions(&jobs, "", 2),
            vec![jobs[0].job_title.clone(), jobs[0].company_name.clone()]
        );
    }
}
