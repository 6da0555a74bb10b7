//! Row contract consumed by the list transforms.

use std::{borrow::Cow, collections::BTreeMap, fmt};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Text fields searched by [`crate::filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Name,
    Location,
    Status,
}

impl FilterField {
    pub const ALL: [FilterField; 3] = [FilterField::Name, FilterField::Location, FilterField::Status];

    pub fn key(self) -> &'static str {
        match self {
            FilterField::Name => "name",
            FilterField::Location => "location",
            FilterField::Status => "status",
        }
    }
}

/// A raw field value as read from a row, before sort coercion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Date(DateTime<Utc>),
    Number(f64),
    Bool(bool),
    Text(String),
}

impl FieldValue {
    /// String form used by filtering and by the text branch of sort coercion.
    /// `Null` stringifies to the empty string.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Null => Cow::Borrowed(""),
            FieldValue::Text(text) => Cow::Borrowed(text),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Date(instant) => {
                f.write_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Bool(flag) => write!(f, "{flag}"),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// A record that can be filtered, sorted and paginated.
///
/// `filter_field` returns `None` for a missing field; the filter treats that
/// as an empty string. `field` returns [`FieldValue::Null`] for unknown keys,
/// which makes every row tie and leaves the order untouched.
pub trait ListRow {
    fn filter_field(&self, field: FilterField) -> Option<Cow<'_, str>>;

    fn field(&self, key: &str) -> FieldValue;
}

impl<T: ListRow + ?Sized> ListRow for &T {
    fn filter_field(&self, field: FilterField) -> Option<Cow<'_, str>> {
        (**self).filter_field(field)
    }

    fn field(&self, key: &str) -> FieldValue {
        (**self).field(key)
    }
}

/// Schemaless row keyed by field name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }
}

impl ListRow for Record {
    fn filter_field(&self, field: FilterField) -> Option<Cow<'_, str>> {
        self.get(field.key()).map(FieldValue::to_text)
    }

    fn field(&self, key: &str) -> FieldValue {
        self.get(key).cloned().unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}
