use std::{fs, io, path::Path};

use anyhow::{anyhow, Context};
use list_core::{ListStateOptions, SortDirection};
use serde::Deserialize;
use shared::domain::AssetSortKey;

use client_core::mock::MAX_MOCK_ASSETS;

const ENV_PREFIX: &str = "APP__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub asset_count: usize,
    pub page_size: usize,
    pub sort_key: Option<AssetSortKey>,
    pub sort_dir: SortDirection,
    pub simulate_error: bool,
    pub mock_latency: bool,
    pub log_filter: String,
    /// `APP__*` variables that named no setting; reported once logging is up.
    pub unknown_env: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_count: MAX_MOCK_ASSETS,
            page_size: 20,
            sort_key: Some(AssetSortKey::UpdatedAt),
            sort_dir: SortDirection::Desc,
            simulate_error: false,
            mock_latency: true,
            log_filter: "info".into(),
            unknown_env: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    asset_count: Option<usize>,
    page_size: Option<usize>,
    sort_key: Option<String>,
    sort_dir: Option<String>,
    simulate_error: Option<bool>,
    mock_latency: Option<bool>,
    log_filter: Option<String>,
}

impl Settings {
    pub fn list_options(&self) -> ListStateOptions<AssetSortKey> {
        ListStateOptions {
            initial_sort_key: self.sort_key,
            initial_sort_dir: self.sort_dir,
            initial_page_size: self.page_size,
        }
    }

    /// Returns `false` when `key` names no setting.
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<bool> {
        match key {
            "asset_count" => self.asset_count = value.trim().parse()?,
            "page_size" => self.page_size = value.trim().parse()?,
            "sort_key" => self.sort_key = parse_sort_key(value)?,
            "sort_dir" => self.sort_dir = value.parse()?,
            "simulate_error" => self.simulate_error = parse_flag(value)?,
            "mock_latency" => self.mock_latency = parse_flag(value)?,
            "log_filter" => self.log_filter = value.to_string(),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file.asset_count {
            self.asset_count = v;
        }
        if let Some(v) = file.page_size {
            self.page_size = v;
        }
        if let Some(v) = file.sort_key {
            self.sort_key = parse_sort_key(&v)?;
        }
        if let Some(v) = file.sort_dir {
            self.sort_dir = v.parse()?;
        }
        if let Some(v) = file.simulate_error {
            self.simulate_error = v;
        }
        if let Some(v) = file.mock_latency {
            self.mock_latency = v;
        }
        if let Some(v) = file.log_filter {
            self.log_filter = v;
        }
        Ok(())
    }

    /// Applies `APP__<SETTING>` variables. Other variables are ignored, and
    /// `APP__*` names that match no setting are recorded in `unknown_env`.
    pub fn apply_env<I>(&mut self, vars: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(key) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let key = key.to_ascii_lowercase();
            let known = self
                .set(&key, &value)
                .with_context(|| format!("invalid value '{value}' for {name}"))?;
            if !known {
                self.unknown_env.push(name);
            }
        }
        Ok(())
    }
}

/// Defaults, then `path` if it exists, then `APP__*` environment variables.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => settings
            .apply_file(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    }

    settings.apply_env(std::env::vars())?;
    Ok(settings)
}

/// `none` (or an empty value) disables default sorting.
fn parse_sort_key(value: &str) -> anyhow::Result<Option<AssetSortKey>> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    Ok(Some(value.parse()?))
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("expected a boolean, got '{other}'")),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
