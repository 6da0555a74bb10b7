//! Deterministic in-memory fixtures served by [`crate::MockDataSource`].

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use shared::{
    domain::{AssetId, AssetRow, AssetStatus, ConfigFormState},
    kpi::{KpiMetric, KpiValue},
};

pub const MAX_MOCK_ASSETS: usize = 200;

const LOCATIONS: [&str; 6] = ["Bucharest", "Berlin", "Munich", "Frankfurt", "Cluj", "Timisoara"];
const ASSET_KINDS: [&str; 6] = [
    "Gateway",
    "Edge Node",
    "Core Service",
    "Telemetry Hub",
    "Cache Cluster",
    "AI Worker",
];
/// 2026-01-15T08:00:00Z
const INVENTORY_BASE_EPOCH_SECS: i64 = 1_768_464_000;
const UPDATE_SPACING_MINUTES: i64 = 6;

fn status_for_index(index: usize) -> AssetStatus {
    match index % 12 {
        0 => AssetStatus::Error,
        1..=3 => AssetStatus::Warn,
        _ => AssetStatus::Ok,
    }
}

/// `count` assets (at most [`MAX_MOCK_ASSETS`]) cycling through kinds, sites
/// and statuses, updated six minutes apart.
pub fn mock_assets(count: usize) -> Vec<AssetRow> {
    let total = count.min(MAX_MOCK_ASSETS);
    let base = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(INVENTORY_BASE_EPOCH_SECS);

    (0..total)
        .map(|index| {
            let updated_at = base + Duration::minutes(UPDATE_SPACING_MINUTES * index as i64);
            AssetRow {
                id: AssetId::sequential(index + 1),
                name: format!("{} {}", ASSET_KINDS[index % ASSET_KINDS.len()], index + 1),
                status: status_for_index(index),
                location: LOCATIONS[index % LOCATIONS.len()].to_string(),
                updated_at: updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                score: (98 - (index % 29) as i64) as f64,
            }
        })
        .collect()
}

pub fn mock_kpis() -> Vec<KpiMetric> {
    vec![
        KpiMetric::new("kpi-uptime", "Uptime", KpiValue::Number(99.97))
            .with_delta(0.05)
            .with_unit("%"),
        KpiMetric::new("kpi-incidents", "Open Incidents", KpiValue::Number(14.0)).with_delta(-3.0),
        KpiMetric::new("kpi-latency", "Avg Latency", KpiValue::Number(182.0))
            .with_delta(-12.0)
            .with_unit("ms"),
        KpiMetric::new("kpi-util", "Capacity Used", KpiValue::Number(76.0))
            .with_delta(4.0)
            .with_unit("%"),
        KpiMetric::new("kpi-automation", "Automation Jobs", KpiValue::Number(48.0)).with_delta(6.0),
        KpiMetric::new("kpi-sla", "SLA Risk", KpiValue::Text("Low".into())).with_delta(0.0),
    ]
}

pub fn default_config() -> ConfigFormState {
    ConfigFormState::default()
}
