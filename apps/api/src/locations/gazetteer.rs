//! Static gazetteer: Australian states, their cities, postcode ranges and the
//! allied-health job categories that landing pages are generated for.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::locations::slugify;

/// A state or territory as it appears in URLs and addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateInfo {
    pub name: &'static str,
    pub abbr: &'static str,
}

impl StateInfo {
    /// URL slug, e.g. `nsw`.
    pub fn slug(&self) -> String {
        self.abbr.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobCategory {
    pub slug: &'static str,
    pub name: &'static str,
}

pub const STATES: &[StateInfo] = &[
    StateInfo { name: "New South Wales", abbr: "NSW" },
    StateInfo { name: "Victoria", abbr: "VIC" },
    StateInfo { name: "Queensland", abbr: "QLD" },
    StateInfo { name: "Western Australia", abbr: "WA" },
    StateInfo { name: "South Australia", abbr: "SA" },
    StateInfo { name: "Tasmania", abbr: "TAS" },
    StateInfo { name: "Australian Capital Territory", abbr: "ACT" },
    StateInfo { name: "Northern Territory", abbr: "NT" },
];

/// Cities keyed by state abbreviation.
pub const CITIES: &[(&str, &[&str])] = &[
    (
        "NSW",
        &["Sydney", "Newcastle", "Wollongong", "Central Coast", "Wagga Wagga", "Parramatta"],
    ),
    (
        "VIC",
        &["Melbourne", "Geelong", "Ballarat", "Bendigo", "Shepparton", "Mildura"],
    ),
    (
        "QLD",
        &["Brisbane", "Gold Coast", "Sunshine Coast", "Townsville", "Cairns", "Toowoomba"],
    ),
    (
        "WA",
        &["Perth", "Fremantle", "Bunbury", "Geraldton", "Kalgoorlie", "Broome"],
    ),
    ("SA", &["Adelaide", "Mount Gambier", "Whyalla", "Murray Bridge"]),
    ("TAS", &["Hobart", "Launceston", "Devonport", "Burnie"]),
    ("ACT", &["Canberra"]),
    ("NT", &["Darwin", "Alice Springs", "Katherine"]),
];

pub const JOB_CATEGORIES: &[JobCategory] = &[
    JobCategory { slug: "physiotherapy", name: "Physiotherapy" },
    JobCategory { slug: "occupational-therapy", name: "Occupational Therapy" },
    JobCategory { slug: "speech-pathology", name: "Speech Pathology" },
    JobCategory { slug: "psychology", name: "Psychology" },
    JobCategory { slug: "podiatry", name: "Podiatry" },
    JobCategory { slug: "dietetics", name: "Dietetics" },
    JobCategory { slug: "exercise-physiology", name: "Exercise Physiology" },
    JobCategory { slug: "social-work", name: "Social Work" },
    JobCategory { slug: "audiology", name: "Audiology" },
    JobCategory { slug: "optometry", name: "Optometry" },
    JobCategory { slug: "chiropractic", name: "Chiropractic" },
    JobCategory { slug: "osteopathy", name: "Osteopathy" },
];

/// Inclusive postcode ranges per state abbreviation.
/// ACT ranges sit inside the NSW 2xxx block, so they are listed first.
const POSTCODE_RANGES: &[(u16, u16, &str)] = &[
    (2600, 2618, "ACT"),
    (2900, 2920, "ACT"),
    (2000, 2999, "NSW"),
    (3000, 3999, "VIC"),
    (4000, 4999, "QLD"),
    (5000, 5799, "SA"),
    (6000, 6797, "WA"),
    (7000, 7799, "TAS"),
    (800, 899, "NT"),
];

/// One gazetteer row: a city within a state, or the state itself when
/// `city` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationData {
    pub city: String,
    pub state: String,
    pub state_abbr: String,
    pub full_name: String,
}

impl LocationData {
    pub fn is_state_only(&self) -> bool {
        self.city.is_empty()
    }
}

/// Process-wide gazetteer. Each state contributes its state-only row followed
/// by one row per city.
pub static GAZETTEER: Lazy<Vec<LocationData>> = Lazy::new(|| {
    let mut entries = Vec::new();
    for state in STATES {
        entries.push(LocationData {
            city: String::new(),
            state: state.name.to_string(),
            state_abbr: state.abbr.to_string(),
            full_name: state.name.to_string(),
        });
        for city in cities_in(state.abbr) {
            entries.push(LocationData {
                city: city.to_string(),
                state: state.name.to_string(),
                state_abbr: state.abbr.to_string(),
                full_name: format!("{city}, {}", state.abbr),
            });
        }
    }
    entries
});

pub fn cities_in(abbr: &str) -> &'static [&'static str] {
    CITIES
        .iter()
        .find(|(a, _)| a.eq_ignore_ascii_case(abbr))
        .map(|(_, cities)| *cities)
        .unwrap_or(&[])
}

pub fn state_by_abbr(abbr: &str) -> Option<&'static StateInfo> {
    STATES.iter().find(|s| s.abbr.eq_ignore_ascii_case(abbr))
}

/// Resolves a state from any of its accepted spellings: abbreviation, full
/// name, or either one in slug form (`nsw`, `new-south-wales`).
pub fn resolve_state(value: &str) -> Option<&'static StateInfo> {
    let key = slugify(value);
    if key.is_empty() {
        return None;
    }
    STATES
        .iter()
        .find(|s| s.slug() == key || slugify(s.name) == key)
}

/// States whose gazetteer lists a city with this slug.
pub fn states_for_city(city_slug: &str) -> Vec<&'static StateInfo> {
    STATES
        .iter()
        .filter(|s| cities_in(s.abbr).iter().any(|c| slugify(c) == city_slug))
        .collect()
}

pub fn state_for_postcode(postcode: u16) -> Option<&'static StateInfo> {
    POSTCODE_RANGES
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&postcode))
        .and_then(|(_, _, abbr)| state_by_abbr(abbr))
}
