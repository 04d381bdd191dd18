use serde::Serialize;

/// Pages shown on either side of the current page.
pub const WINDOW_RADIUS: usize = 2;
/// Pages pinned at each end of the control strip.
pub const EDGE_PAGES: usize = 1;

/// Page-number strip; `None` marks an ellipsis.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let current_page = current_page.clamp(1, last_page);
    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Navigation controls derived from the current position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageControls {
    pub page: usize,
    pub total_pages: usize,
    pub pages: Vec<Option<usize>>,
    /// Target of the "Previous" control; `None` when disabled.
    pub previous: Option<usize>,
    /// Target of the "Next" control; `None` when disabled.
    pub next: Option<usize>,
}

impl PageControls {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        let page = current_page.clamp(1, total_pages.max(1));
        let pages = get_pages(
            total_pages,
            page,
            EDGE_PAGES,
            WINDOW_RADIUS,
            WINDOW_RADIUS,
            EDGE_PAGES,
        );

        Self {
            page,
            total_pages,
            pages,
            previous: (page > 1).then(|| page - 1),
            next: (page < total_pages).then(|| page + 1),
        }
    }

    /// A single page of results gets no controls at all.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }
}

#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub previous: Option<usize>,
    pub next: Option<usize>,
    pub visible: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let controls = PageControls::new(current_page, total_pages);
        let visible = controls.is_visible();

        Self {
            items,
            pages: controls.pages,
            page: controls.page,
            total,
            total_pages,
            previous: controls.previous,
            next: controls.next,
            visible,
        }
    }
}
