//! Forced-variant lookup in the query string.

use crate::variant::Variant;

/// The variant forced by `param`, if its first occurrence is exactly A or B.
pub fn forced_variant(query: Option<&str>, param: &str) -> Option<Variant> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == param)
        .and_then(|(_, value)| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_variant() {
        assert_eq!(forced_variant(Some("variant=A"), "variant"), Some(Variant::A));
        assert_eq!(
            forced_variant(Some("utm_source=x&variant=B"), "variant"),
            Some(Variant::B)
        );
        assert_eq!(forced_variant(Some("variant=b"), "variant"), None);
        assert_eq!(forced_variant(Some("variant="), "variant"), None);
        assert_eq!(forced_variant(Some("other=A"), "variant"), None);
        assert_eq!(forced_variant(None, "variant"), None);
    }

    #[test]
    fn test_first_occurrence_decides() {
        assert_eq!(
            forced_variant(Some("variant=B&variant=A"), "variant"),
            Some(Variant::B)
        );
        assert_eq!(forced_variant(Some("variant=X&variant=A"), "variant"), None);
    }

    #[test]
    fn test_percent_encoded() {
        assert_eq!(forced_variant(Some("vari%61nt=%42"), "variant"), Some(Variant::B));
    }

    #[test]
    fn test_custom_param() {
        assert_eq!(forced_variant(Some("ab=A"), "ab"), Some(Variant::A));
        assert_eq!(forced_variant(Some("variant=A"), "ab"), None);
    }
}
