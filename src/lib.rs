//! Server-rendered pagination controls for actix-web and maud applications.
//!
//! [`pager::PageLinkRenderer`] lays out previous/next links, a window of page
//! numbers with ellipsis shortcuts and a current-page marker. Link targets
//! come from an injected [`routing::UrlResolver`], and optional AJAX
//! behaviour from an [`ajax::AttributeProvider`].

pub mod ajax;
pub mod config;
pub mod handlers;
pub mod pager;
pub mod routing;

pub use ajax::{AjaxOptions, AttributeProvider, HtmxOptions};
pub use pager::{PageLinkRenderer, Pager, PagerItem, PagingState, SortDirection, SortState};
pub use routing::{Route, RouteError, RouteTable, RouteValues, RoutingContext, UrlResolver};
