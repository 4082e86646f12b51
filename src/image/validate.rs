//! Public id format check.

use regex::Regex;
use std::sync::LazyLock;

static PUBLIC_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-/.]+$").expect("valid regex"));

/// Check that `id` only uses letters, digits, `_`, `-`, `/` and `.`.
///
/// The URL builder never calls this; callers opt in.
pub fn is_valid_public_id(id: &str) -> bool {
    PUBLIC_ID.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert!(is_valid_public_id("shoes/red"));
        assert!(is_valid_public_id("hero_banner-2024.v2"));
        assert!(is_valid_public_id("a"));
    }

    #[test]
    fn test_invalid_ids() {
        assert!(!is_valid_public_id(""));
        assert!(!is_valid_public_id("with space"));
        assert!(!is_valid_public_id("query?x=1"));
        assert!(!is_valid_public_id("émoji"));
        assert!(!is_valid_public_id("a,b"));
    }
}
