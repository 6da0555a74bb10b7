use std::sync::Arc;

use futures::FutureExt;
use shared::{
    domain::{AssetRow, ConfigFormState},
    kpi::KpiMetric,
};

pub mod mock;
pub mod query;
pub mod source;

pub use query::{Query, QuerySnapshot};
pub use source::{DataSource, ErrorSwitch, MockDataSource, MockLatency, QueryError, QueryKey};

/// The three queries backing the dashboard, KPI and configuration screens.
pub struct DashboardClient {
    pub assets: Query<Vec<AssetRow>>,
    pub kpis: Query<Vec<KpiMetric>>,
    pub config: Query<ConfigFormState>,
}

impl DashboardClient {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let assets_source = Arc::clone(&source);
        let kpis_source = Arc::clone(&source);
        let config_source = source;

        Self {
            assets: Query::new(QueryKey::Assets, move || {
                let source = Arc::clone(&assets_source);
                async move { source.fetch_assets().await }.boxed()
            }),
            kpis: Query::new(QueryKey::Kpis, move || {
                let source = Arc::clone(&kpis_source);
                async move { source.fetch_kpis().await }.boxed()
            }),
            config: Query::new(QueryKey::Config, move || {
                let source = Arc::clone(&config_source);
                async move { source.fetch_config().await }.boxed()
            }),
        }
    }

    /// Fetches every query concurrently, as screens do on mount.
    pub async fn refresh_all(&self) {
        futures::join!(
            self.assets.refetch(),
            self.kpis.refetch(),
            self.config.refetch()
        );
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
