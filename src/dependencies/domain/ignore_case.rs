//! Ordinal, ASCII case-insensitive comparison helpers shared by the key types.

use std::cmp::Ordering;
use std::hash::Hasher;

pub(crate) fn cmp(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|b| b.to_ascii_lowercase())
        .cmp(b.bytes().map(|b| b.to_ascii_lowercase()))
}

pub(crate) fn hash<H: Hasher>(value: &str, state: &mut H) {
    for b in value.bytes() {
        state.write_u8(b.to_ascii_lowercase());
    }
    state.write_u8(0xff);
}

pub(crate) fn starts_with(value: &str, prefix: &str) -> bool {
    value.len() >= prefix.len() && value.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_ignores_ascii_case() {
        assert_eq!(cmp("NuGet", "nuget"), Ordering::Equal);
        assert_eq!(cmp("a", "B"), Ordering::Less);
        assert_eq!(cmp("abc", "AB"), Ordering::Greater);
    }

    #[test]
    fn test_starts_with() {
        assert!(starts_with("MetadataExtractor (Extractor1)", "metadataextractor"));
        assert!(!starts_with("Meta", "MetadataExtractor"));
    }
}
