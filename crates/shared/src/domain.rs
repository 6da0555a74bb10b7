use std::{borrow::Cow, fmt, str::FromStr};

use list_core::{FieldValue, FilterField, ListRow};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, ErrorCode};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(AssetId);
id_newtype!(KpiId);

impl AssetId {
    /// `asset-001` style id for the 1-based position `number`.
    pub fn sequential(number: usize) -> Self {
        Self(format!("asset-{number:03}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetStatus {
    Ok,
    Warn,
    Error,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 3] = [AssetStatus::Ok, AssetStatus::Warn, AssetStatus::Error];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Ok => "OK",
            AssetStatus::Warn => "WARN",
            AssetStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "OK" => Ok(AssetStatus::Ok),
            "WARN" | "WARNING" => Ok(AssetStatus::Warn),
            "ERROR" => Ok(AssetStatus::Error),
            _ => Err(DashboardError::new(
                ErrorCode::Validation,
                format!(
                    "unknown asset status '{value}', expected one of {}",
                    AssetStatus::ALL.map(AssetStatus::as_str).join(", ")
                ),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRow {
    pub id: AssetId,
    pub name: String,
    pub status: AssetStatus,
    pub location: String,
    /// ISO-8601 instant, kept as text the way the inventory feed sends it.
    pub updated_at: String,
    pub score: f64,
}

impl ListRow for AssetRow {
    fn filter_field(&self, field: FilterField) -> Option<Cow<'_, str>> {
        Some(match field {
            FilterField::Name => Cow::Borrowed(self.name.as_str()),
            FilterField::Location => Cow::Borrowed(self.location.as_str()),
            FilterField::Status => Cow::Borrowed(self.status.as_str()),
        })
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::Text(self.id.0.clone()),
            "name" => FieldValue::Text(self.name.clone()),
            "status" => FieldValue::Text(self.status.as_str().to_string()),
            "location" => FieldValue::Text(self.location.clone()),
            "updatedAt" | "updated_at" => FieldValue::Text(self.updated_at.clone()),
            "score" => FieldValue::Number(self.score),
            _ => FieldValue::Null,
        }
    }
}

/// Columns the asset list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetSortKey {
    Name,
    Status,
    UpdatedAt,
    Score,
}

impl AssetSortKey {
    pub const ALL: [AssetSortKey; 4] = [
        AssetSortKey::Name,
        AssetSortKey::Status,
        AssetSortKey::UpdatedAt,
        AssetSortKey::Score,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetSortKey::Name => "name",
            AssetSortKey::Status => "status",
            AssetSortKey::UpdatedAt => "updatedAt",
            AssetSortKey::Score => "score",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetSortKey::Name => "Name",
            AssetSortKey::Status => "Status",
            AssetSortKey::UpdatedAt => "Updated",
            AssetSortKey::Score => "Score",
        }
    }
}

impl AsRef<str> for AssetSortKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AssetSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetSortKey {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(AssetSortKey::Name),
            "status" => Ok(AssetSortKey::Status),
            "updatedat" | "updated_at" | "updated" => Ok(AssetSortKey::UpdatedAt),
            "score" => Ok(AssetSortKey::Score),
            _ => Err(DashboardError::new(
                ErrorCode::Validation,
                format!(
                    "unknown sort key '{value}', expected one of {}",
                    AssetSortKey::ALL.map(AssetSortKey::as_str).join(", ")
                ),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Ro,
    De,
}

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ro => "Romanian",
            Language::De => "German",
        }
    }
}

impl FromStr for Language {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ro" => Ok(Language::Ro),
            "de" => Ok(Language::De),
            _ => Err(DashboardError::new(
                ErrorCode::Validation,
                format!("unsupported language '{value}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFormState {
    pub site_name: String,
    pub language: Language,
    /// Seconds.
    pub refresh_interval: f64,
    pub enable_alerts: bool,
    /// Percent, 0..=100.
    pub threshold: f64,
}

impl Default for ConfigFormState {
    fn default() -> Self {
        Self {
            site_name: "Enterprise Ops HQ".into(),
            language: Language::En,
            refresh_interval: 30.0,
            enable_alerts: true,
            threshold: 82.0,
        }
    }
}
