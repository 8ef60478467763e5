//! Rule-based field extractors for receipts.
//!
//! Every field is described by an ordered list of [`FieldRule`]s. Rules are
//! tried in order and the first one whose pattern matches *and* whose value
//! normalizes wins. Misses along the way are reported to the caller instead
//! of being swallowed.

pub mod amounts;
pub mod dates;
pub mod items;
pub mod patterns;

pub use amounts::{normalize_amount, parse_amount};
pub use dates::{parse_loose_date, parse_slash_date};
pub use items::{collapse_whitespace, is_non_item, ItemLayout};
pub use patterns::*;

use regex::Regex;
use tracing::debug;

use super::ParseMiss;

/// Normalizer applied to the first capture group of a matched rule.
pub type Normalizer<T> = fn(field: &'static str, raw: &str) -> Result<T, ParseMiss>;

/// One `(pattern, normalizer)` entry of an ordered rule list.
pub struct FieldRule<T: 'static> {
    /// Human-readable rule name, used in logs.
    pub name: &'static str,
    /// Pattern whose first capture group holds the raw value.
    pub pattern: &'static Regex,
    /// Turns the raw capture into the field value.
    pub normalize: Normalizer<T>,
}

impl<T> FieldRule<T> {
    /// Apply this rule to `text`.
    ///
    /// `None` when the pattern does not match; `Some(Err(_))` when it matched
    /// but the value could not be normalized.
    pub fn apply(&self, field: &'static str, text: &str) -> Option<Result<T, ParseMiss>> {
        let caps = self.pattern.captures(text)?;
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        Some((self.normalize)(field, raw))
    }
}

/// Evaluate `rules` in order and return the first normalized value.
///
/// Normalization failures are pushed to `misses` and the next rule is
/// tried. When nothing matches a [`ParseMiss::NoMatch`] is recorded.
pub fn first_match<T>(
    field: &'static str,
    rules: &[FieldRule<T>],
    text: &str,
    misses: &mut Vec<ParseMiss>,
) -> Option<T> {
    let mut matched_any = false;

    for rule in rules {
        match rule.apply(field, text) {
            Some(Ok(value)) => {
                debug!(field, rule = rule.name, "field matched");
                return Some(value);
            }
            Some(Err(miss)) => {
                debug!(field, rule = rule.name, %miss, "matched value rejected");
                matched_any = true;
                misses.push(miss);
            }
            None => {}
        }
    }

    if !matched_any {
        debug!(field, "no rule matched");
        misses.push(ParseMiss::NoMatch { field });
    }

    None
}

/// Normalizer that keeps the capture as-is.
pub fn keep_raw(_field: &'static str, raw: &str) -> Result<String, ParseMiss> {
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    lazy_static! {
        static ref FIRST: Regex = Regex::new(r"A=([\d.]+)").unwrap();
        static ref SECOND: Regex = Regex::new(r"B=([\d.]+)").unwrap();
    }

    fn rules() -> Vec<FieldRule<Decimal>> {
        vec![
            FieldRule { name: "a", pattern: &FIRST, normalize: normalize_amount },
            FieldRule { name: "b", pattern: &SECOND, normalize: normalize_amount },
        ]
    }

    #[test]
    fn test_first_rule_wins() {
        let mut misses = Vec::new();
        let value = first_match("total", &rules(), "B=2.00 A=1.00", &mut misses);

        assert_eq!(value, Some(Decimal::from_str("1.00").unwrap()));
        assert!(misses.is_empty());
    }

    #[test]
    fn test_rejected_value_falls_through() {
        let mut misses = Vec::new();
        let value = first_match("total", &rules(), "A=1.2.3 B=2.00", &mut misses);

        assert_eq!(value, Some(Decimal::from_str("2.00").unwrap()));
        assert_eq!(
            misses,
            vec![ParseMiss::InvalidNumber { field: "total", value: "1.2.3".to_string() }]
        );
    }

    #[test]
    fn test_no_match_is_recorded() {
        let mut misses = Vec::new();
        let value = first_match("total", &rules(), "nothing here", &mut misses);

        assert_eq!(value, None);
        assert_eq!(misses, vec![ParseMiss::NoMatch { field: "total" }]);
    }
}
