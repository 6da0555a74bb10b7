//! Client-side list processing for dashboard screens: filtering, stable
//! coerced sorting, cumulative pagination and the controller that ties the
//! three together.

pub mod controller;
pub mod pipeline;
pub mod row;
pub mod transform;

pub use controller::{ListAction, ListController, ListState, ListStateOptions, DEFAULT_PAGE_SIZE};
pub use pipeline::{process_rows, ListPage};
pub use row::{FieldValue, FilterField, ListRow, Record};
pub use transform::{
    comparable_value, filter, matches_query, paginate, parse_instant, sort, ComparableValue,
    ParseSortDirectionError, SortDirection,
};
