//! Transitions accepted by the list controller.

use crate::transform::SortDirection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction<K> {
    /// Stored verbatim; trimming happens in [`crate::filter`].
    SetFilterText(String),
    /// Leaves the direction alone.
    SetSortKey(Option<K>),
    SetSortDir(SortDirection),
    ToggleSortDir,
    /// Clamped to at least one.
    SetPageSize(usize),
    /// Advances to the next cumulative page.
    LoadMore,
    /// Back to the options the controller was built with.
    Reset,
}

impl<K> ListAction<K> {
    /// Every transition except `LoadMore` puts pagination back on page one.
    pub fn resets_page(&self) -> bool {
        !matches!(self, ListAction::LoadMore)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ListAction::SetFilterText(_) => "set_filter_text",
            ListAction::SetSortKey(_) => "set_sort_key",
            ListAction::SetSortDir(_) => "set_sort_dir",
            ListAction::ToggleSortDir => "toggle_sort_dir",
            ListAction::SetPageSize(_) => "set_page_size",
            ListAction::LoadMore => "load_more",
            ListAction::Reset => "reset",
        }
    }
}
