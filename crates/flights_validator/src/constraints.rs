//! Check evaluation shared by both engines.
//!
//! The helpers take plain iterators so each engine can feed them from its own
//! storage: dataset values for the fallback, typed arrays for the declarative
//! engine.

use flights_core::{FailureCase, out_of_bounds};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

/// Returns the values that fall outside `[min, max]`, by row.
pub fn range_failures<I>(values: I, min: Option<f64>, max: Option<f64>) -> Vec<FailureCase>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    values
        .into_iter()
        .filter(|(_, value)| out_of_bounds(*value, min, max))
        .map(|(row, value)| FailureCase::new(row, value.to_string()))
        .collect()
}

/// Returns the distinct values that are not in the allowed set.
pub fn category_difference<I, S>(values: I, allowed: &[String]) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let allowed: HashSet<&str> = allowed.iter().map(String::as_str).collect();
    values
        .into_iter()
        .filter(|value| !allowed.contains(value.as_ref()))
        .map(|value| value.as_ref().to_string())
        .collect()
}

/// Returns the values that do not match the pattern, by row.
///
/// The pattern must match somewhere in the value; anchor it to require a
/// full match.
pub fn pattern_failures<'a, I>(values: I, pattern: &Regex) -> Vec<FailureCase>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    values
        .into_iter()
        .filter(|(_, value)| !pattern.is_match(value))
        .map(|(row, value)| FailureCase::new(row, value))
        .collect()
}
