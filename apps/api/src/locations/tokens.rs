//! Token classifier for free-text addresses.
//!
//! An address is tokenised once into words, postcodes and other numbers,
//! each tagged with the comma-separated segment it came from. State and city
//! mentions are then located as token sequences, so "SA" inside "Samford" is
//! never a state and "Wagga Wagga" is one city mention spanning two tokens.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::locations::gazetteer::{cities_in, StateInfo, STATES};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9']+|,").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Postcode(u16),
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercased, apostrophes removed.
    pub text: String,
    pub kind: TokenKind,
    pub segment: usize,
}

/// A state or city found in the token stream, spanning `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mention<T> {
    pub value: T,
    pub start: usize,
    pub end: usize,
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut segment = 0;

    for m in TOKEN_RE.find_iter(input) {
        let raw = m.as_str();
        if raw == "," {
            segment += 1;
            continue;
        }
        let text: String = raw.chars().filter(|c| *c != '\'').collect::<String>().to_lowercase();
        if text.is_empty() {
            continue;
        }
        let kind = if text.chars().all(|c| c.is_ascii_digit()) {
            match (text.len(), text.parse::<u16>()) {
                (4, Ok(code)) => TokenKind::Postcode(code),
                _ => TokenKind::Number,
            }
        } else {
            TokenKind::Word
        };
        tokens.push(Token { text, kind, segment });
    }

    tokens
}

/// Length of the match when `words` appear in `tokens` starting at `at`.
fn sequence_at(tokens: &[Token], at: usize, words: &[String]) -> Option<usize> {
    if words.is_empty() || at + words.len() > tokens.len() {
        return None;
    }
    let matched = words
        .iter()
        .zip(&tokens[at..])
        .all(|(w, t)| t.kind == TokenKind::Word && t.text == *w);
    matched.then_some(words.len())
}

fn words_of(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Every state mention in order. Full names take precedence over the
/// abbreviation at the same position; abbreviations only match whole tokens.
pub fn state_mentions(tokens: &[Token]) -> Vec<Mention<&'static StateInfo>> {
    let mut mentions = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let mut best: Option<(usize, &'static StateInfo)> = None;
        for state in STATES {
            let len = sequence_at(tokens, i, &words_of(state.name))
                .or_else(|| sequence_at(tokens, i, &[state.abbr.to_lowercase()]));
            if let Some(len) = len {
                if best.map_or(true, |(best_len, _)| len > best_len) {
                    best = Some((len, state));
                }
            }
        }

        match best {
            Some((len, state)) => {
                mentions.push(Mention {
                    value: state,
                    start: i,
                    end: i + len,
                });
                i += len;
            }
            None => i += 1,
        }
    }

    mentions
}

/// Every gazetteer city mention in order, as `(state, city)`. When `within`
/// is set only that state's cities are considered.
pub fn city_mentions(
    tokens: &[Token],
    within: Option<&'static StateInfo>,
) -> Vec<Mention<(&'static StateInfo, &'static str)>> {
    let candidates: Vec<(&'static StateInfo, &'static str, Vec<String>)> = STATES
        .iter()
        .filter(|s| within.map_or(true, |w| w == *s))
        .flat_map(|s| cities_in(s.abbr).iter().map(move |c| (s, *c, words_of(c))))
        .collect();

    let mut mentions = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let best = candidates
            .iter()
            .filter_map(|(state, city, words)| {
                sequence_at(tokens, i, words).map(|len| (len, *state, *city))
            })
            .max_by_key(|(len, _, _)| *len);

        match best {
            Some((len, state, city)) => {
                mentions.push(Mention {
                    value: (state, city),
                    start: i,
                    end: i + len,
                });
                i += len;
            }
            None => i += 1,
        }
    }

    mentions
}

/// The last postcode in the input, if any.
pub fn last_postcode(tokens: &[Token]) -> Option<Mention<u16>> {
    tokens.iter().enumerate().rev().find_map(|(i, t)| match t.kind {
        TokenKind::Postcode(code) => Some(Mention {
            value: code,
            start: i,
            end: i + 1,
        }),
        _ => None,
    })
}

/// Words that most plausibly name the locality preceding a state mention:
/// the words before it in its own segment, or the previous segment's words
/// when the state opens its segment. Numbers are dropped.
pub fn locality_words_before(tokens: &[Token], state_start: usize) -> Vec<&str> {
    let Some(state_token) = tokens.get(state_start) else {
        return Vec::new();
    };

    let same_segment: Vec<&str> = tokens[..state_start]
        .iter()
        .filter(|t| t.segment == state_token.segment && t.kind == TokenKind::Word)
        .map(|t| t.text.as_str())
        .collect();
    if !same_segment.is_empty() || state_token.segment == 0 {
        return same_segment;
    }

    let previous = state_token.segment - 1;
    tokens[..state_start]
        .iter()
        .filter(|t| t.segment == previous && t.kind == TokenKind::Word)
        .map(|t| t.text.as_str())
        .collect()
}
