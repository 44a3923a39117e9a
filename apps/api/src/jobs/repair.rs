//! Location repair: re-derives a job's canonical location slugs from its
//! free-text `practice_location`.
//!
//! Listings are normalised once when posted. Repair is the explicit way to
//! bring stored slugs back in line after the gazetteer or the parser
//! changes; nothing on the read path re-parses.

use serde::Serialize;

use crate::locations::matcher::{location_slugs, parse_location, LocationMatch};
use crate::models::job::Job;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRepair {
    pub job_id: i32,
    pub parsed: LocationMatch,
    pub previous_city: String,
    pub previous_state: String,
    pub city: String,
    pub state: String,
    /// Whether the stored slugs differ from the freshly parsed ones.
    pub changed: bool,
}

pub fn repair_location(job: &Job) -> LocationRepair {
    let parsed = parse_location(&job.practice_location);
    let (city, state) = location_slugs(&parsed).unwrap_or_default();
    let changed = city != job.city || state != job.state;

    LocationRepair {
        job_id: job.id,
        parsed,
        previous_city: job.city.clone(),
        previous_state: job.state.clone(),
        city,
        state,
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_job(practice_location: &str, city: &str, state: &str) -> Job {
        Job {
            id: 42,
            practice_location: practice_location.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            ..Job::default()
        }
    }

    #[test]
    fn test_consistent_job_is_unchanged() {
        let repair = repair_location(&make_job("123 George Street, Sydney NSW 2000", "sydney", "nsw"));
        assert!(!repair.changed);
        assert_eq!(repair.city, "sydney");
        assert_eq!(repair.state, "nsw");
    }

    #[test]
    fn test_stale_slugs_are_reported() {
        let repair = repair_location(&make_job("Wagga Wagga, NSW", "wagga", "new-south-wales"));
        assert!(repair.changed);
        assert_eq!(repair.previous_city, "wagga");
        assert_eq!(repair.city, "wagga-wagga");
        assert_eq!(repair.state, "nsw");
    }

    #[test]
    fn test_unparseable_location_clears_slugs() {
        let repair = repair_location(&make_job("Remote / Telehealth", "sydney", "nsw"));
        assert!(repair.changed);
        assert!(!repair.parsed.is_matched);
        assert_eq!(repair.city, "");
        assert_eq!(repair.state, "");
    }

    #[test]
    fn test_empty_location_with_empty_slugs_is_unchanged() {
        let repair = repair_location(&make_job("", "", ""));
        assert!(!repair.changed);
    }
}
