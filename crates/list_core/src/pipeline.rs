//! filter -> sort -> paginate, as a screen renders it.

use serde::Serialize;

use crate::{
    controller::ListState,
    row::ListRow,
    transform::{filter, paginate, sort},
};

/// The visible slice plus the number of rows that survived filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPage<R> {
    pub rows: Vec<R>,
    pub total: usize,
}

impl<R> ListPage<R> {
    pub fn can_load_more(&self) -> bool {
        self.rows.len() < self.total
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn process_rows<R, K>(rows: &[R], state: &ListState<K>) -> ListPage<R>
where
    R: ListRow + Clone,
    K: AsRef<str>,
{
    let filtered = filter(rows, state.filter_text());
    let sorted = sort(&filtered, state.sort_key().map(|key| key.as_ref()), state.sort_dir());
    let visible = paginate(&sorted, state.page(), state.page_size());

    ListPage {
        rows: visible.to_vec(),
        total: sorted.len(),
    }
}
