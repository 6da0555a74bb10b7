//! Pure row transforms: case-insensitive filtering, stable coerced sorting and
//! cumulative ("load more") pagination.
//!
//! None of these functions mutate their input. `filter` and `sort` hand back
//! `Cow::Borrowed` of the caller's slice when they have nothing to do, so
//! callers can detect "unchanged" cheaply with [`std::ptr::eq`] on the slices.

use std::{borrow::Cow, cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::row::{FieldValue, FilterField, ListRow};

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Orients an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort direction '{0}', expected 'asc' or 'desc'")]
pub struct ParseSortDirectionError(pub String);

impl FromStr for SortDirection {
    type Err = ParseSortDirectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(ParseSortDirectionError(value.to_string())),
        }
    }
}

/// Coerced sort value.
///
/// Numbers use IEEE total ordering, text compares on its lowercased form, and
/// any number orders before any text. The last rule only matters when rows
/// disagree on which coercion branch their field lands in.
#[derive(Debug, Clone)]
pub enum ComparableValue {
    Number(f64),
    Text(String),
}

impl Ord for ComparableValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ComparableValue::Number(a), ComparableValue::Number(b)) => a.total_cmp(b),
            (ComparableValue::Text(a), ComparableValue::Text(b)) => a.cmp(b),
            (ComparableValue::Number(_), ComparableValue::Text(_)) => Ordering::Less,
            (ComparableValue::Text(_), ComparableValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for ComparableValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ComparableValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ComparableValue {}

impl From<FieldValue> for ComparableValue {
    fn from(value: FieldValue) -> Self {
        comparable_value(value)
    }
}

/// Coerces a raw field in fixed order: null to empty text, dates to their
/// epoch-millisecond instant, numbers as-is, then the string form as a
/// date-time, as a number, and finally as lowercased text.
pub fn comparable_value(value: FieldValue) -> ComparableValue {
    match value {
        FieldValue::Null => ComparableValue::Text(String::new()),
        FieldValue::Date(instant) => ComparableValue::Number(instant.timestamp_millis() as f64),
        FieldValue::Number(number) => ComparableValue::Number(number),
        other => {
            let text = other.to_text();
            if let Some(instant) = parse_instant(&text) {
                ComparableValue::Number(instant.timestamp_millis() as f64)
            } else if let Some(number) = parse_number(&text) {
                ComparableValue::Number(number)
            } else {
                ComparableValue::Text(text.to_lowercase())
            }
        }
    }
}

/// Date-time forms recognized in string fields. Zone-less forms are UTC.
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(instant) = DateTime::parse_from_rfc2822(text) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Keeps rows whose name, location or status contains the trimmed query,
/// ignoring case. A blank query returns the input slice itself.
pub fn filter<'a, R>(rows: &'a [R], filter_text: &str) -> Cow<'a, [R]>
where
    R: ListRow + Clone,
{
    let query = filter_text.trim().to_lowercase();
    if query.is_empty() {
        return Cow::Borrowed(rows);
    }

    Cow::Owned(
        rows.iter()
            .filter(|row| matches_query(*row, &query))
            .cloned()
            .collect(),
    )
}

/// `query` must already be trimmed and lowercased.
pub fn matches_query<R: ListRow + ?Sized>(row: &R, query: &str) -> bool {
    FilterField::ALL.into_iter().any(|field| {
        row.filter_field(field)
            .is_some_and(|value| value.to_lowercase().contains(query))
    })
}

/// Stable sort on the coerced value of `sort_key`. Ties keep their original
/// relative order in both directions. No key (or an empty one) returns the
/// input slice itself.
pub fn sort<'a, R>(rows: &'a [R], sort_key: Option<&str>, sort_dir: SortDirection) -> Cow<'a, [R]>
where
    R: ListRow + Clone,
{
    let Some(key) = sort_key.filter(|key| !key.is_empty()) else {
        return Cow::Borrowed(rows);
    };

    let mut keyed: Vec<(ComparableValue, usize)> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| (comparable_value(row.field(key)), index))
        .collect();

    keyed.sort_by(|(a, a_index), (b, b_index)| {
        sort_dir.apply(a.cmp(b)).then_with(|| a_index.cmp(b_index))
    });

    Cow::Owned(
        keyed
            .into_iter()
            .map(|(_, index)| rows[index].clone())
            .collect(),
    )
}

/// Cumulative pagination: the first `page * page_size` rows. Both inputs are
/// clamped to at least one; a page past the end yields every row.
pub fn paginate<R>(rows: &[R], page: usize, page_size: usize) -> &[R] {
    let end = page
        .max(1)
        .saturating_mul(page_size.max(1))
        .min(rows.len());
    &rows[..end]
}

#[cfg(test)]
#[path = "tests/transform_tests.rs"]
mod tests;
