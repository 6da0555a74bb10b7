//! List interaction state: filter text, sort key/direction and cumulative
//! pagination, with every change except "load more" rewinding to page one.

use serde::{Deserialize, Serialize};

use crate::{
    pipeline::{process_rows, ListPage},
    row::ListRow,
    transform::SortDirection,
};

pub mod actions;

pub use actions::ListAction;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListStateOptions<K = String> {
    pub initial_sort_key: Option<K>,
    pub initial_sort_dir: SortDirection,
    pub initial_page_size: usize,
}

impl<K> Default for ListStateOptions<K> {
    fn default() -> Self {
        Self {
            initial_sort_key: None,
            initial_sort_dir: SortDirection::Asc,
            initial_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl<K> ListStateOptions<K> {
    pub fn with_sort(mut self, key: K, dir: SortDirection) -> Self {
        self.initial_sort_key = Some(key);
        self.initial_sort_dir = dir;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.initial_page_size = page_size;
        self
    }
}

/// Snapshot of the controller's fields. `page` and `page_size` are never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListState<K = String> {
    page: usize,
    page_size: usize,
    sort_key: Option<K>,
    sort_dir: SortDirection,
    filter_text: String,
}

impl<K: Clone> ListState<K> {
    pub fn new(options: &ListStateOptions<K>) -> Self {
        Self {
            page: 1,
            page_size: options.initial_page_size.max(1),
            sort_key: options.initial_sort_key.clone(),
            sort_dir: options.initial_sort_dir,
            filter_text: String::new(),
        }
    }

    fn apply(&mut self, action: ListAction<K>, initial: &ListStateOptions<K>) {
        let resets_page = action.resets_page();
        match action {
            ListAction::SetFilterText(text) => self.filter_text = text,
            ListAction::SetSortKey(key) => self.sort_key = key,
            ListAction::SetSortDir(dir) => self.sort_dir = dir,
            ListAction::ToggleSortDir => self.sort_dir = self.sort_dir.toggled(),
            ListAction::SetPageSize(size) => self.page_size = size.max(1),
            ListAction::LoadMore => self.page = self.page.saturating_add(1),
            ListAction::Reset => *self = Self::new(initial),
        }
        if resets_page {
            self.page = 1;
        }
    }
}

impl<K> ListState<K> {
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort_key(&self) -> Option<&K> {
        self.sort_key.as_ref()
    }

    pub fn sort_dir(&self) -> SortDirection {
        self.sort_dir
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Upper bound on the rows meant to be visible.
    pub fn total_visible(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }

    pub fn process<R>(&self, rows: &[R]) -> ListPage<R>
    where
        R: ListRow + Clone,
        K: AsRef<str>,
    {
        process_rows(rows, self)
    }
}

/// Owns one list's [`ListState`] for the lifetime of a screen. Single owner,
/// sequential updates; no operation can fail.
#[derive(Debug, Clone)]
pub struct ListController<K = String> {
    initial: ListStateOptions<K>,
    state: ListState<K>,
}

impl<K: Clone> Default for ListController<K> {
    fn default() -> Self {
        Self::new(ListStateOptions::default())
    }
}

impl<K: Clone> ListController<K> {
    pub fn new(options: ListStateOptions<K>) -> Self {
        let state = ListState::new(&options);
        Self {
            initial: options,
            state,
        }
    }

    pub fn dispatch(&mut self, action: ListAction<K>) {
        let name = action.name();
        self.state.apply(action, &self.initial);
        tracing::debug!(
            action = name,
            page = self.state.page,
            page_size = self.state.page_size,
            sort_dir = %self.state.sort_dir,
            "list state transition"
        );
    }

    pub fn state(&self) -> &ListState<K> {
        &self.state
    }

    pub fn options(&self) -> &ListStateOptions<K> {
        &self.initial
    }

    pub fn page(&self) -> usize {
        self.state.page()
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size()
    }

    pub fn sort_key(&self) -> Option<&K> {
        self.state.sort_key()
    }

    pub fn sort_dir(&self) -> SortDirection {
        self.state.sort_dir()
    }

    pub fn filter_text(&self) -> &str {
        self.state.filter_text()
    }

    pub fn total_visible(&self) -> usize {
        self.state.total_visible()
    }

    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.dispatch(ListAction::SetFilterText(text.into()));
    }

    pub fn set_sort_key(&mut self, key: Option<K>) {
        self.dispatch(ListAction::SetSortKey(key));
    }

    pub fn set_sort_dir(&mut self, dir: SortDirection) {
        self.dispatch(ListAction::SetSortDir(dir));
    }

    pub fn toggle_sort_dir(&mut self) {
        self.dispatch(ListAction::ToggleSortDir);
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.dispatch(ListAction::SetPageSize(size));
    }

    pub fn load_more(&mut self) {
        self.dispatch(ListAction::LoadMore);
    }

    pub fn reset(&mut self) {
        self.dispatch(ListAction::Reset);
    }

    /// Header-chip behaviour: picking the active key flips the direction,
    /// picking another key switches to it.
    pub fn select_sort_key(&mut self, key: K)
    where
        K: PartialEq,
    {
        if self.state.sort_key.as_ref() == Some(&key) {
            self.toggle_sort_dir();
        } else {
            self.set_sort_key(Some(key));
        }
    }

    pub fn process<R>(&self, rows: &[R]) -> ListPage<R>
    where
        R: ListRow + Clone,
        K: AsRef<str>,
    {
        self.state.process(rows)
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
