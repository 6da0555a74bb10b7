//! Where dashboard data comes from.

use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use shared::{
    domain::{AssetRow, ConfigFormState},
    error::{DashboardError, ErrorCode},
    kpi::KpiMetric,
};
use thiserror::Error;
use tokio::sync::watch;

use crate::mock::{default_config, mock_assets, mock_kpis, MAX_MOCK_ASSETS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Assets,
    Kpis,
    Config,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QueryKey::Assets => "assets",
            QueryKey::Kpis => "KPI",
            QueryKey::Config => "config",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Simulated {0} query failure")]
    Simulated(QueryKey),
}

impl From<QueryError> for DashboardError {
    fn from(value: QueryError) -> Self {
        DashboardError::new(ErrorCode::Unavailable, value.to_string())
    }
}

#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_assets(&self) -> Result<Vec<AssetRow>, QueryError>;
    async fn fetch_kpis(&self) -> Result<Vec<KpiMetric>, QueryError>;
    async fn fetch_config(&self) -> Result<ConfigFormState, QueryError>;
}

/// Process-wide "make every query fail" toggle. Clones share one flag.
#[derive(Debug, Clone)]
pub struct ErrorSwitch {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for ErrorSwitch {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ErrorSwitch {
    pub fn new(enabled: bool) -> Self {
        let (tx, _rx) = watch::channel(enabled);
        Self { tx: Arc::new(tx) }
    }

    pub fn is_enabled(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn set(&self, enabled: bool) {
        let previous = self.tx.send_replace(enabled);
        if previous != enabled {
            tracing::info!(enabled, "simulated query errors toggled");
        }
    }

    /// Receivers observe every change made through [`ErrorSwitch::set`].
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub assets: Duration,
    pub kpis: Duration,
    pub config: Duration,
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            assets: Duration::from_millis(500),
            kpis: Duration::from_millis(400),
            config: Duration::from_millis(300),
        }
    }
}

impl MockLatency {
    pub fn none() -> Self {
        Self {
            assets: Duration::ZERO,
            kpis: Duration::ZERO,
            config: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockDataSource {
    asset_count: usize,
    latency: MockLatency,
    errors: ErrorSwitch,
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new(MAX_MOCK_ASSETS, MockLatency::default(), ErrorSwitch::default())
    }
}

impl MockDataSource {
    pub fn new(asset_count: usize, latency: MockLatency, errors: ErrorSwitch) -> Self {
        Self {
            asset_count,
            latency,
            errors,
        }
    }

    pub fn errors(&self) -> &ErrorSwitch {
        &self.errors
    }

    async fn respond<T>(&self, key: QueryKey, delay: Duration, data: impl FnOnce() -> T) -> Result<T, QueryError> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.errors.is_enabled() {
            return Err(QueryError::Simulated(key));
        }
        Ok(data())
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch_assets(&self) -> Result<Vec<AssetRow>, QueryError> {
        self.respond(QueryKey::Assets, self.latency.assets, || mock_assets(self.asset_count))
            .await
    }

    async fn fetch_kpis(&self) -> Result<Vec<KpiMetric>, QueryError> {
        self.respond(QueryKey::Kpis, self.latency.kpis, mock_kpis).await
    }

    async fn fetch_config(&self) -> Result<ConfigFormState, QueryError> {
        self.respond(QueryKey::Config, self.latency.config, default_config)
            .await
    }
}
