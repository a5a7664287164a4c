//! Typed attribute value parsing.
//!
//! Lexical parsing is strict: a value outside the XSD lexical space is a
//! fatal [`Error::MalformedAttribute`], never silently defaulted. Write-back
//! always uses the canonical `true`/`false` form regardless of which lexical
//! variant the source document carried.

use crate::common::{Error, Result};

/// Parse an `xsd:boolean` attribute value.
///
/// The XSD lexical space is `true`, `false`, `1`, `0`.
///
/// # Examples
///
/// ```
/// # use atomext::common::xml::parse_bool;
/// assert_eq!(parse_bool("readOnly", "true").unwrap(), true);
/// assert_eq!(parse_bool("readOnly", "0").unwrap(), false);
/// assert!(parse_bool("readOnly", "yes").is_err());
/// ```
#[inline]
pub fn parse_bool(attribute: &str, value: &str) -> Result<bool> {
    match value.as_bytes() {
        b"true" | b"1" => Ok(true),
        b"false" | b"0" => Ok(false),
        _ => Err(Error::MalformedAttribute {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Canonical `xsd:boolean` representation for write-back.
#[inline]
pub fn format_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_lexical_space() {
        assert_eq!(parse_bool("a", "true").unwrap(), true);
        assert_eq!(parse_bool("a", "1").unwrap(), true);
        assert_eq!(parse_bool("a", "false").unwrap(), false);
        assert_eq!(parse_bool("a", "0").unwrap(), false);
    }

    #[test]
    fn test_parse_bool_rejects_other_forms() {
        for bad in ["TRUE", "True", "yes", "no", "", " true", "01"] {
            let err = parse_bool("readOnly", bad).unwrap_err();
            match err {
                Error::MalformedAttribute { attribute, value } => {
                    assert_eq!(attribute, "readOnly");
                    assert_eq!(value, bad);
                },
                other => panic!("expected MalformedAttribute, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_format_bool_canonical() {
        assert_eq!(format_bool(true), "true");
        assert_eq!(format_bool(false), "false");
    }
}
