pub mod layout;
pub mod render;
pub mod state;

pub use layout::{layout, page_window, PageWindow, PagerItem, DISPLAY_BUDGET};
pub use render::{PageLinkRenderer, Pager, PAGE_KEY, SORT_BY_KEY, SORT_DESCENDING_KEY};
pub use state::{PagingState, SortDirection, SortState};
