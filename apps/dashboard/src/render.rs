//! Plain-text views for the terminal.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use list_core::{ListPage, ListState, SortDirection};
use shared::{
    domain::{AssetRow, AssetSortKey, ConfigFormState},
    error::ErrorReport,
    forms::FormErrors,
    kpi::{KpiMetric, Trend},
};

/// Rows shown under "Recent Updates".
pub const RECENT_UPDATES_LIMIT: usize = 10;

/// `Jan 15, 8:06 AM`; unparseable timestamps are shown verbatim.
pub fn format_updated_at(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(instant) => instant
            .with_timezone(&Utc)
            .format("%b %-d, %-I:%M %p")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}

pub fn kpi_board(metrics: &[KpiMetric]) -> String {
    let mut out = String::from("Operations Overview\n");
    if metrics.is_empty() {
        out.push_str("  No KPIs yet\n  Metrics will appear as soon as data is available.\n");
        return out;
    }
    for metric in metrics {
        let arrow = match metric.trend() {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Flat => "•",
        };
        let delta = metric.formatted_delta().unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<18} {:>10}  {arrow} {delta}",
            metric.label,
            metric.formatted_value()
        );
    }
    out
}

/// The first [`RECENT_UPDATES_LIMIT`] assets in feed order, or the section's
/// error state when the asset query failed.
pub fn recent_updates(assets: Result<&[AssetRow], &ErrorReport>) -> String {
    let mut out = String::from("Recent Updates\n");
    let assets = match assets {
        Ok(assets) => assets,
        Err(report) => {
            out.push_str(&error_state("  Recent updates unavailable", report));
            return out;
        }
    };
    if assets.is_empty() {
        out.push_str("  No recent updates.\n");
        return out;
    }
    for row in assets.iter().take(RECENT_UPDATES_LIMIT) {
        let _ = writeln!(
            out,
            "  {:<20} {} • {:<16} {:<6} Score {}",
            row.name,
            row.location,
            format_updated_at(&row.updated_at),
            row.status,
            row.score
        );
    }
    out
}

fn sort_summary(state: &ListState<AssetSortKey>) -> String {
    match state.sort_key() {
        Some(key) => {
            let arrow = match state.sort_dir() {
                SortDirection::Asc => "↑",
                SortDirection::Desc => "↓",
            };
            format!("{} {arrow}", key.label())
        }
        None => "unsorted".to_string(),
    }
}

pub fn asset_page(page: &ListPage<AssetRow>, state: &ListState<AssetSortKey>) -> String {
    let mut out = String::new();
    let filter = state.filter_text().trim();
    let _ = writeln!(
        out,
        "Assets  sort: {}  filter: {}",
        sort_summary(state),
        if filter.is_empty() { "-" } else { filter }
    );

    if page.is_empty() {
        out.push_str("  No assets match the current filter.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "  {:<10} {:<20} {:<6} {:<10} {:<16} {:>5}",
        "ID", "NAME", "STATUS", "LOCATION", "UPDATED", "SCORE"
    );
    for row in &page.rows {
        let _ = writeln!(
            out,
            "  {:<10} {:<20} {:<6} {:<10} {:<16} {:>5}",
            row.id,
            row.name,
            row.status,
            row.location,
            format_updated_at(&row.updated_at),
            row.score
        );
    }
    let _ = writeln!(
        out,
        "  showing {} of {}{}",
        page.len(),
        page.total,
        if page.can_load_more() { " (more available)" } else { "" }
    );
    out
}

pub fn config_summary(config: &ConfigFormState) -> String {
    let mut out = String::from("Configuration\n");
    let _ = writeln!(out, "  site name         {}", config.site_name);
    let _ = writeln!(out, "  language          {}", config.language.label());
    let _ = writeln!(out, "  refresh interval  {}s", config.refresh_interval);
    let _ = writeln!(
        out,
        "  alerts            {}",
        if config.enable_alerts { "on" } else { "off" }
    );
    let _ = writeln!(out, "  threshold         {}%", config.threshold);
    out
}

pub fn form_errors(errors: &FormErrors) -> String {
    let mut out = String::from("Configuration not saved:\n");
    for message in errors.messages() {
        let _ = writeln!(out, "  - {message}");
    }
    out
}

pub fn error_state(title: &str, report: &ErrorReport) -> String {
    let mut out = format!("{title}\n  {}\n", report.message);
    if report.retryable {
        out.push_str("  Retry with --retries <n> or disable --simulate-error.\n");
    }
    out
}
