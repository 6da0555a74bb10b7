//! Editable forms for assets and site configuration, with the validation the
//! screens run before committing a change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{AssetId, AssetRow, AssetStatus, ConfigFormState, Language},
    error::{DashboardError, ErrorCode},
};

pub const MIN_SITE_NAME_CHARS: usize = 3;
pub const REFRESH_INTERVAL_RANGE: std::ops::RangeInclusive<f64> = 5.0..=300.0;
pub const THRESHOLD_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("asset name must not be empty")]
    EmptyName,
    #[error("score '{0}' is not a number")]
    InvalidScore(String),
    #[error("asset {0} not found")]
    UnknownAsset(AssetId),
}

impl From<EditError> for DashboardError {
    fn from(value: EditError) -> Self {
        let code = match value {
            EditError::UnknownAsset(_) => ErrorCode::NotFound,
            _ => ErrorCode::Validation,
        };
        DashboardError::new(code, value.to_string())
    }
}

/// In-place edit of one asset row; `score` is the raw text from the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEdit {
    pub name: String,
    pub status: AssetStatus,
    pub score: String,
}

impl From<&AssetRow> for AssetEdit {
    fn from(asset: &AssetRow) -> Self {
        Self {
            name: asset.name.clone(),
            status: asset.status,
            score: asset.score.to_string(),
        }
    }
}

impl AssetEdit {
    /// Returns a new collection with asset `id` updated. The input is left
    /// untouched, so list state built over it stays valid until the caller
    /// swaps collections.
    pub fn apply(&self, rows: &[AssetRow], id: &AssetId) -> Result<Vec<AssetRow>, EditError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EditError::EmptyName);
        }
        let score = parse_number(&self.score).ok_or_else(|| EditError::InvalidScore(self.score.clone()))?;
        if !rows.iter().any(|row| &row.id == id) {
            return Err(EditError::UnknownAsset(id.clone()));
        }

        Ok(rows
            .iter()
            .map(|row| {
                if &row.id == id {
                    AssetRow {
                        name: name.to_string(),
                        status: self.status,
                        score,
                        ..row.clone()
                    }
                } else {
                    row.clone()
                }
            })
            .collect())
    }
}

/// Per-field messages; a field is `None` when it passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{}", self.messages().join("; "))]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.site_name.is_none() && self.refresh_interval.is_none() && self.threshold.is_none()
    }

    pub fn messages(&self) -> Vec<&str> {
        [&self.site_name, &self.refresh_interval, &self.threshold]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

impl From<FormErrors> for DashboardError {
    fn from(value: FormErrors) -> Self {
        DashboardError::new(ErrorCode::Validation, value.to_string())
    }
}

/// Text-backed configuration form as the user edits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigForm {
    pub site_name: String,
    pub language: Language,
    pub refresh_interval: String,
    pub enable_alerts: bool,
    pub threshold: String,
}

impl From<&ConfigFormState> for ConfigForm {
    fn from(config: &ConfigFormState) -> Self {
        Self {
            site_name: config.site_name.clone(),
            language: config.language,
            refresh_interval: config.refresh_interval.to_string(),
            enable_alerts: config.enable_alerts,
            threshold: config.threshold.to_string(),
        }
    }
}

impl ConfigForm {
    pub fn validate(&self) -> Result<ConfigFormState, FormErrors> {
        let mut errors = FormErrors::default();

        let site_name = self.site_name.trim();
        if site_name.chars().count() < MIN_SITE_NAME_CHARS {
            errors.site_name = Some(format!(
                "Site name must be at least {MIN_SITE_NAME_CHARS} characters."
            ));
        }

        let refresh_interval = parse_number(&self.refresh_interval);
        match refresh_interval {
            None => errors.refresh_interval = Some("Enter a numeric refresh interval.".into()),
            Some(value) if !REFRESH_INTERVAL_RANGE.contains(&value) => {
                errors.refresh_interval =
                    Some("Refresh interval must be between 5 and 300 seconds.".into())
            }
            Some(_) => {}
        }

        let threshold = parse_number(&self.threshold);
        match threshold {
            None => errors.threshold = Some("Enter a numeric threshold.".into()),
            Some(value) if !THRESHOLD_RANGE.contains(&value) => {
                errors.threshold = Some("Threshold must be between 0 and 100.".into())
            }
            Some(_) => {}
        }

        match (errors.is_empty(), refresh_interval, threshold) {
            (true, Some(refresh_interval), Some(threshold)) => Ok(ConfigFormState {
                site_name: site_name.to_string(),
                language: self.language,
                refresh_interval,
                enable_alerts: self.enable_alerts,
                threshold,
            }),
            _ => Err(errors),
        }
    }

    pub fn has_changes(&self, initial: &ConfigForm) -> bool {
        self != initial
    }

    /// Validates and, on success, rewrites the form in its normalized shape.
    pub fn save(&mut self) -> Result<ConfigFormState, FormErrors> {
        let config = self.validate()?;
        *self = ConfigForm::from(&config);
        Ok(config)
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
