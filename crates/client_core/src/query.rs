//! Fetch wrapper exposing the `{data, is_loading, is_error, refetch}` view the
//! screens render from.

use futures::future::BoxFuture;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::source::{QueryError, QueryKey};

type Fetcher<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, QueryError>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<QueryError>,
}

impl<T> QuerySnapshot<T> {
    /// Before the first fetch has finished.
    pub fn pending() -> Self {
        Self {
            data: None,
            is_loading: true,
            is_error: false,
            error: None,
        }
    }
}

pub struct Query<T> {
    key: QueryKey,
    fetcher: Fetcher<T>,
    state: RwLock<QuerySnapshot<T>>,
}

impl<T: Clone + Send + Sync> Query<T> {
    pub fn new<F>(key: QueryKey, fetcher: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<T, QueryError>> + Send + Sync + 'static,
    {
        Self {
            key,
            fetcher: Box::new(fetcher),
            state: RwLock::new(QuerySnapshot::pending()),
        }
    }

    pub fn key(&self) -> QueryKey {
        self.key
    }

    pub async fn snapshot(&self) -> QuerySnapshot<T> {
        self.state.read().await.clone()
    }

    /// Runs the fetcher and records the outcome. Data from an earlier success
    /// is kept when this attempt fails.
    pub async fn refetch(&self) -> QuerySnapshot<T> {
        self.state.write().await.is_loading = true;

        let result = (self.fetcher)().await;

        let mut state = self.state.write().await;
        state.is_loading = false;
        match result {
            Ok(data) => {
                info!(query = %self.key, "query succeeded");
                state.data = Some(data);
                state.is_error = false;
                state.error = None;
            }
            Err(err) => {
                warn!(query = %self.key, error = %err, "query failed");
                state.is_error = true;
                state.error = Some(err);
            }
        }
        state.clone()
    }
}
