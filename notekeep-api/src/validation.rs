//! Validation Helpers
//!
//! Parsing of identifiers, ranks and query parameters shared by route
//! handlers. Each helper returns a 400 `ApiError` naming the bad input.

use notekeep_core::{NoteId, Priority, Rank};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Trait for validating numeric ranges.
pub trait ValidateRange {
    /// Validate that the value is positive (> 0).
    fn validate_positive(&self, field_name: &str) -> ApiResult<()>;
}

macro_rules! impl_validate_range {
    ($($t:ty),*) => {
        $(
            impl ValidateRange for $t {
                fn validate_positive(&self, field_name: &str) -> ApiResult<()> {
                    if *self <= 0 as $t {
                        return Err(ApiError::invalid_range(field_name, 1, <$t>::MAX));
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_validate_range!(i64, usize);

/// Parse a note identifier (canonical or simple UUID text).
pub fn parse_note_id(raw: &str) -> ApiResult<NoteId> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::invalid_id(raw))
}

/// Parse a rank: a JSON number with no fractional part.
pub fn parse_rank(value: Option<&JsonValue>) -> ApiResult<Rank> {
    let Some(number) = value.filter(|v| v.is_number()) else {
        return Err(ApiError::validation_failed("Order must be a number"));
    };
    if let Some(rank) = number.as_i64() {
        return Ok(rank);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f as i64)
        }
        _ => Err(ApiError::validation_failed("Order must be an integer")),
    }
}

/// Parse the optional `priority` filter.
pub fn parse_priority(raw: Option<&str>) -> ApiResult<Option<Priority>> {
    raw.filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Priority>().map_err(|e| {
                ApiError::validation_failed(e.to_string())
                    .with_details(serde_json::json!({ "field": "priority" }))
            })
        })
        .transpose()
}

/// Resolved `limit`/`skip` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: usize,
    pub skip: usize,
}

impl Pagination {
    /// Parse raw query values. A missing limit takes the configured default
    /// and a limit above the maximum is clamped.
    pub fn parse(limit: Option<&str>, skip: Option<&str>, config: &ApiConfig) -> ApiResult<Self> {
        let limit = match limit.map(str::trim).filter(|s| !s.is_empty()) {
            None => config.default_page_limit,
            Some(raw) => {
                let n = raw
                    .parse::<i64>()
                    .map_err(|_| ApiError::invalid_input(format!("Invalid limit '{}'", raw)))?;
                n.validate_positive("limit")?;
                usize::try_from(n).unwrap_or(usize::MAX).min(config.max_page_limit)
            }
        };

        let skip = match skip.map(str::trim).filter(|s| !s.is_empty()) {
            None => 0,
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| ApiError::invalid_input(format!("Invalid skip '{}'", raw)))?,
        };

        Ok(Self { limit, skip })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_validate_positive() {
        assert!(5i64.validate_positive("test").is_ok());
        assert!(0i64.validate_positive("test").is_err());
        assert!((-1i64).validate_positive("test").is_err());
        assert!(1usize.validate_positive("test").is_ok());
        assert!(0usize.validate_positive("test").is_err());
    }

    #[test]
    fn test_parse_note_id() {
        assert!(parse_note_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        let err = parse_note_id("not-an-id").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(err.message, "Invalid ID format");
    }

    #[test]
    fn test_parse_rank() {
        assert_eq!(parse_rank(Some(&json!(7))).ok(), Some(7));
        assert_eq!(parse_rank(Some(&json!(-2))).ok(), Some(-2));
        assert_eq!(parse_rank(Some(&json!(4.0))).ok(), Some(4));
        assert!(parse_rank(Some(&json!(1.5))).is_err());
        assert!(parse_rank(Some(&json!("3"))).is_err());
        assert!(parse_rank(Some(&json!(null))).is_err());
        assert!(parse_rank(None).is_err());
    }

    #[test]
    fn test_parse_priority() {
        assert_eq!(parse_priority(Some("high")).ok(), Some(Some(Priority::High)));
        assert_eq!(parse_priority(None).ok(), Some(None));
        assert_eq!(parse_priority(Some("")).ok(), Some(None));
        assert!(parse_priority(Some("urgent")).is_err());
    }

    #[test]
    fn test_pagination_defaults_and_clamp() -> ApiResult<()> {
        let config = ApiConfig::default();
        assert_eq!(
            Pagination::parse(None, None, &config)?,
            Pagination { limit: 50, skip: 0 }
        );
        assert_eq!(
            Pagination::parse(Some("10000"), Some("20"), &config)?,
            Pagination { limit: 500, skip: 20 }
        );
        Ok(())
    }

    #[test]
    fn test_pagination_rejects_bad_values() {
        let config = ApiConfig::default();
        assert!(Pagination::parse(Some("0"), None, &config).is_err());
        assert!(Pagination::parse(Some("-5"), None, &config).is_err());
        assert!(Pagination::parse(Some("abc"), None, &config).is_err());
        assert!(Pagination::parse(None, Some("-1"), &config).is_err());
    }
}
