//! Slug derivation and validation.
//!
//! The slug is derived from the product title by a fixed pipeline:
//! trim, replace each space with a hyphen, remove apostrophes, lowercase.
//! The steps run in that order and consecutive spaces are NOT collapsed,
//! so `"a  b"` yields `"a--b"`.

/// Derive a slug from a title.
pub fn slugify(title: &str) -> String {
    title
        .trim()
        .replace(' ', "-")
        .replace('\'', "")
        .to_lowercase()
}

/// Check a slug for submission: non-empty, no internal whitespace.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.trim().is_empty() && !slug.trim().contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_pipeline_order() {
        // Spaces become hyphens before apostrophes are removed, so the
        // double space survives as a double hyphen.
        assert_eq!(slugify("Men's  T Shirt"), "mens--t-shirt");
    }

    #[test]
    fn test_slugify_trims_before_replacing() {
        assert_eq!(slugify("  Hoodie  "), "hoodie");
        // Internal runs are preserved, only the outer whitespace is trimmed.
        assert_eq!(slugify(" Kids   Hat "), "kids---hat");
    }

    #[test]
    fn test_slugify_lowercases_last() {
        assert_eq!(slugify("XL Shirt"), "xl-shirt");
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("mens-t-shirt"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("   "));
        assert!(!is_valid_slug("mens shirt"));
    }
}
