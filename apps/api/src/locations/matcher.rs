//! Location matcher — turns free-text Australian locations into canonical
//! `{city, state, state_abbr}` triples backed by the gazetteer.
//!
//! Parsing order, first success wins:
//! 1. exact match of the normalised input against gazetteer names
//! 2. structured token parse (state mentions, postcodes, known cities,
//!    all validated together)
//! 3. failure: `is_matched = false` with the raw input echoed as `city`
//!
//! Every function here is pure and total: no input makes it fail.

use serde::Serialize;
use tracing::debug;

use crate::locations::gazetteer::{
    cities_in, state_for_postcode, states_for_city, LocationData, StateInfo, GAZETTEER, STATES,
};
use crate::locations::tokens::{
    city_mentions, last_postcode, locality_words_before, state_mentions, tokenize, Token,
};
use crate::locations::{normalize, slugify};

/// Minimum length of a partial city name accepted by containment matching.
const MIN_PARTIAL_CITY_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationMatch {
    pub city: String,
    pub state: String,
    pub state_abbr: String,
    pub is_matched: bool,
    /// City slug, e.g. `wagga-wagga`. Empty for state-only matches.
    pub normalized_city: String,
    /// State URL slug, e.g. `nsw`.
    pub normalized_state: String,
}

impl LocationMatch {
    fn matched(city: &str, state: &StateInfo) -> Self {
        Self {
            city: city.to_string(),
            state: state.name.to_string(),
            state_abbr: state.abbr.to_string(),
            is_matched: true,
            normalized_city: slugify(city),
            normalized_state: state.slug(),
        }
    }

    fn state_only(state: &StateInfo) -> Self {
        Self::matched("", state)
    }

    fn unmatched(input: &str) -> Self {
        Self {
            city: input.to_string(),
            state: String::new(),
            state_abbr: String::new(),
            is_matched: false,
            normalized_city: String::new(),
            normalized_state: String::new(),
        }
    }
}

/// Parses a free-text location. See the module docs for the matching order.
pub fn parse_location(input: &str) -> LocationMatch {
    if let Some(found) = exact_match(input) {
        return found;
    }
    if let Some(found) = structured_match(input) {
        return found;
    }

    debug!(input, "location did not match the gazetteer");
    LocationMatch::unmatched(input)
}

/// Canonical `(city_slug, state_slug)` to store for a parsed location.
/// `None` when the location is unknown.
pub fn location_slugs(found: &LocationMatch) -> Option<(String, String)> {
    found
        .is_matched
        .then(|| (found.normalized_city.clone(), found.normalized_state.clone()))
}

/// Gazetteer entries containing the input in any of their names, in
/// gazetteer order. Inputs shorter than two characters yield nothing.
pub fn get_location_suggestions(input: &str, max: usize) -> Vec<LocationData> {
    if input.chars().count() < 2 {
        return Vec::new();
    }
    let needle = normalize(input);

    GAZETTEER
        .iter()
        .filter(|entry| {
            let city = (!entry.is_state_only()).then_some(&entry.city);
            city.into_iter()
                .chain([&entry.state, &entry.state_abbr, &entry.full_name])
                .any(|field| normalize(field).contains(&needle))
        })
        .take(max)
        .cloned()
        .collect()
}

fn exact_match(input: &str) -> Option<LocationMatch> {
    let key = normalize(input);
    if key.is_empty() {
        return None;
    }

    for state in STATES {
        if key == normalize(state.name) || key == state.abbr.to_lowercase() {
            return Some(LocationMatch::state_only(state));
        }
        for city in cities_in(state.abbr) {
            let full_name = format!("{city}, {}", state.abbr);
            let long_name = format!("{city}, {}", state.name);
            if key == normalize(&full_name) || key == normalize(&long_name) {
                return Some(LocationMatch::matched(city, state));
            }
        }
    }

    None
}

fn structured_match(input: &str) -> Option<LocationMatch> {
    let tokens = tokenize(input);
    if tokens.is_empty() {
        return None;
    }

    // Addresses end with the state, so the last mention is the real one;
    // earlier mentions are usually street names ("Victoria Rd").
    let state_mention = state_mentions(&tokens).pop();
    let postcode = last_postcode(&tokens);
    let postcode_state = postcode.and_then(|p| state_for_postcode(p.value));
    let declared_state = state_mention.map(|m| m.value).or(postcode_state);

    if let Some(state) = declared_state {
        if let Some(city) = city_mentions(&tokens, Some(state)).pop() {
            return Some(LocationMatch::matched(city.value.1, state));
        }
    }

    if let Some(city) = city_mentions(&tokens, None).pop() {
        let (state, name) = city.value;
        let overrides_state = match state_mention {
            Some(mention) if mention.value != state => city.start > mention.start,
            _ => true,
        };
        if overrides_state && states_for_city(&slugify(name)).len() == 1 {
            return Some(LocationMatch::matched(name, state));
        }
    }

    // Without a written state the postcode marks where the locality ends.
    let anchor = match (state_mention, postcode) {
        (Some(mention), _) => Some((mention.start, mention.value)),
        (None, Some(postcode)) => postcode_state.map(|state| (postcode.start, state)),
        (None, None) => None,
    };
    if let Some((start, state)) = anchor {
        if let Some(city) = partial_city(&tokens, start, state) {
            return Some(LocationMatch::matched(city, state));
        }
    }

    declared_state.map(LocationMatch::state_only)
}

/// Containment match for abbreviated or decorated city names before the
/// state or postcode ("Wagga NSW" → Wagga Wagga). Tries the longest trailing run of
/// words first, in both containment directions.
fn partial_city(tokens: &[Token], anchor: usize, state: &StateInfo) -> Option<&'static str> {
    let words = locality_words_before(tokens, anchor);

    for skip in 0..words.len() {
        let candidate = words[skip..].join(" ");
        if candidate.len() < MIN_PARTIAL_CITY_LEN {
            continue;
        }
        let found = cities_in(state.abbr).iter().copied().find(|city| {
            let city = city.to_lowercase();
            city.contains(&candidate) || candidate.contains(&city)
        });
        if let Some(city) = found {
            return Some(city);
        }
    }

    None
}
