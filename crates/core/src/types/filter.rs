//! List filter parsed from `GET /products` query parameters.
//!
//! Parsing never fails: anything that is not a usable value degrades to
//! "not provided".

use std::str::FromStr;

use rust_decimal::Decimal;

/// Constraints applied when listing products.
///
/// `max_price` and `name_pattern` combine with AND. `limit` caps the number of
/// records returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Only products priced at or below this value.
    pub max_price: Option<Decimal>,
    /// Case-insensitive regular expression matched against `name`.
    pub name_pattern: Option<String>,
    /// Maximum number of records; `None` is unlimited.
    pub limit: Option<u32>,
}

impl ProductFilter {
    /// Build a filter from raw query parameter values.
    ///
    /// - `max_price`: non-numeric, empty, or zero means no ceiling.
    /// - `includes`: empty means no name constraint.
    /// - `limit`: non-numeric, zero, or negative means unlimited.
    ///
    /// ```
    /// use catalog_core::ProductFilter;
    ///
    /// let filter = ProductFilter::from_params(Some("100"), Some("shirt"), Some("abc"));
    /// assert!(filter.max_price.is_some());
    /// assert_eq!(filter.name_pattern.as_deref(), Some("shirt"));
    /// assert_eq!(filter.limit, None);
    /// ```
    #[must_use]
    pub fn from_params(
        max_price: Option<&str>,
        includes: Option<&str>,
        limit: Option<&str>,
    ) -> Self {
        Self {
            max_price: max_price.and_then(parse_price).filter(|p| !p.is_zero()),
            name_pattern: includes.filter(|s| !s.is_empty()).map(str::to_owned),
            limit: limit.and_then(parse_limit),
        }
    }

    /// Whether the price ceiling, if any, admits `price`.
    #[must_use]
    pub fn admits_price(&self, price: Decimal) -> bool {
        self.max_price.is_none_or(|max| price <= max)
    }
}

fn parse_price(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn parse_limit(raw: &str) -> Option<u32> {
    let n = raw.trim().parse::<i64>().ok()?;
    if n <= 0 {
        return None;
    }
    Some(u32::try_from(n).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_absent_is_default() {
        let filter = ProductFilter::from_params(None, None, None);
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn test_max_price_parses_decimal() {
        let filter = ProductFilter::from_params(Some("9.99"), None, None);
        assert_eq!(filter.max_price, Some(Decimal::new(999, 2)));
    }

    #[test]
    fn test_max_price_accepts_scientific_notation() {
        let filter = ProductFilter::from_params(Some("1e2"), None, None);
        assert_eq!(filter.max_price, Some(Decimal::new(100, 0)));
    }

    #[test]
    fn test_max_price_invalid_is_unset() {
        for raw in ["abc", "", "  ", "ten"] {
            let filter = ProductFilter::from_params(Some(raw), None, None);
            assert_eq!(filter.max_price, None, "input {raw:?}");
        }
    }

    #[test]
    fn test_max_price_zero_is_unset() {
        let filter = ProductFilter::from_params(Some("0"), None, None);
        assert_eq!(filter.max_price, None);
    }

    #[test]
    fn test_negative_max_price_is_kept() {
        let filter = ProductFilter::from_params(Some("-1"), None, None);
        assert_eq!(filter.max_price, Some(Decimal::NEGATIVE_ONE));
        assert!(!filter.admits_price(Decimal::ZERO));
    }

    #[test]
    fn test_admits_price_is_inclusive() {
        let filter = ProductFilter::from_params(Some("100"), None, None);
        assert!(filter.admits_price(Decimal::new(100, 0)));
        assert!(filter.admits_price(Decimal::new(9999, 2)));
        assert!(!filter.admits_price(Decimal::new(10001, 2)));
    }

    #[test]
    fn test_empty_includes_is_unset() {
        let filter = ProductFilter::from_params(None, Some(""), None);
        assert_eq!(filter.name_pattern, None);
    }

    #[test]
    fn test_includes_is_kept_verbatim() {
        let filter = ProductFilter::from_params(None, Some("^T-Shirt"), None);
        assert_eq!(filter.name_pattern.as_deref(), Some("^T-Shirt"));
    }

    #[test]
    fn test_limit_values() {
        let cases = [
            (Some("3"), Some(3)),
            (Some(" 7 "), Some(7)),
            (Some("0"), None),
            (Some("-2"), None),
            (Some("abc"), None),
            (Some("2.5"), None),
            (Some("99999999999"), Some(u32::MAX)),
            (None, None),
        ];
        for (raw, expected) in cases {
            let filter = ProductFilter::from_params(None, None, raw);
            assert_eq!(filter.limit, expected, "input {raw:?}");
        }
    }
}
