// Location normalisation: gazetteer, free-text parser, suggestions.

pub mod gazetteer;
pub mod handlers;
pub mod matcher;
mod tokens;

/// Comparison key for free text: lowercase, trimmed, whitespace runs become
/// a single hyphen. Punctuation is kept, so `"Sydney, NSW"` → `"sydney,-nsw"`.
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// URL slug: lowercase ASCII alphanumerics separated by single hyphens.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if c != '\'' {
            pending_hyphen = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Wagga   Wagga "), "wagga-wagga");
        assert_eq!(normalize("Sydney, NSW"), "sydney,-nsw");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Occupational Therapy"), "occupational-therapy");
        assert_eq!(slugify("occupational_therapy"), "occupational-therapy");
        assert_eq!(slugify(" Wagga-Wagga "), "wagga-wagga");
        assert_eq!(slugify("O'Connor"), "oconnor");
        assert_eq!(slugify("--"), "");
    }
}
