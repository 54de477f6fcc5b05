use std::ops::RangeInclusive;

use super::PagingState;

/// Maximum number of page numbers shown in the window.
pub const DISPLAY_BUDGET: i64 = 10;

// Distance from either end of the range at which the window stops centering.
const EDGE_MARGIN: i64 = 4;

/// One element of the pager, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerItem {
    /// Link target, or `None` when disabled.
    Previous(Option<i64>),
    Page(i64),
    Current(i64),
    Ellipsis,
    /// Link target, or `None` when disabled.
    Next(Option<i64>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: i64,
    pub end: i64,
}

impl PageWindow {
    pub fn pages(&self) -> RangeInclusive<i64> {
        self.start..=self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Computes the contiguous range of page numbers shown around `current_page`.
pub fn page_window(page_count: i64, current_page: i64) -> PageWindow {
    if page_count <= DISPLAY_BUDGET {
        return PageWindow {
            start: 1,
            end: page_count,
        };
    }

    let middle = (DISPLAY_BUDGET + 1) / 2 - 1;
    let mut below = current_page.saturating_sub(middle);
    let mut above = current_page.saturating_add(middle);

    if below < EDGE_MARGIN {
        below = 1;
        above = DISPLAY_BUDGET;
    } else if above > page_count - EDGE_MARGIN {
        above = page_count;
        below = page_count - DISPLAY_BUDGET;
    }

    PageWindow {
        start: below.max(1),
        end: above,
    }
}

/// Whether `page` is rendered as the current-page marker.
///
/// A non-positive `current_page` also marks page zero, which the window
/// never yields.
fn is_current(page: i64, current_page: i64) -> bool {
    page == current_page || (current_page <= 0 && page == 0)
}

/// Lays out the full pager: previous, shortcuts, window, shortcuts, next.
pub fn layout(state: &PagingState) -> Vec<PagerItem> {
    let page_count = state.page_count();
    let window = page_window(page_count, state.current_page);
    let mut items = Vec::with_capacity(DISPLAY_BUDGET as usize + 8);

    items.push(PagerItem::Previous(state.prev_page()));

    if window.start > 3 {
        items.push(PagerItem::Page(1));
        items.push(PagerItem::Page(2));
        items.push(PagerItem::Ellipsis);
    }

    for page in window.pages() {
        if is_current(page, state.current_page) {
            items.push(PagerItem::Current(page));
        } else {
            items.push(PagerItem::Page(page));
        }
    }

    if window.end < page_count - 3 {
        items.push(PagerItem::Ellipsis);
        items.push(PagerItem::Page(page_count - 1));
        items.push(PagerItem::Page(page_count));
    }

    items.push(PagerItem::Next(state.next_page()));

    log::trace!(
        "Pager layout for page {} of {}: window {}..={}",
        state.current_page,
        page_count,
        window.start,
        window.end
    );

    items
}
