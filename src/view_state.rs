/// Page-aligned fetch request produced by the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub index: usize,
    pub offset: usize,
    pub limit: usize,
}

/// Scroll state of the stock list, mapped to row pages.
#[derive(Clone, Debug)]
pub struct ListViewport {
    pub row_height_px: f64,
    pub viewport_height_px: f64,
    pub scroll_top_px: f64,
    pub page_size: usize,
}

impl ListViewport {
    pub fn new(row_height_px: f64, viewport_height_px: f64, page_size: usize) -> Self {
        Self { row_height_px, viewport_height_px, scroll_top_px: 0.0, page_size: page_size.max(1) }
    }

    /// Scroll, clamped so the last row stays at the bottom edge.
    pub fn scroll_to(&mut self, scroll_top_px: f64, total_rows: usize) {
        let content = total_rows as f64 * self.row_height_px;
        let max_scroll = (content - self.viewport_height_px).max(0.0);
        self.scroll_top_px = scroll_top_px.clamp(0.0, max_scroll);
    }

    pub fn reset(&mut self) {
        self.scroll_top_px = 0.0;
    }

    /// `(first_row, row_count)` currently on screen.
    pub fn visible_range(&self, total_rows: usize) -> (usize, usize) {
        if total_rows == 0 || self.row_height_px <= 0.0 {
            return (0, 0);
        }
        let start = (self.scroll_top_px / self.row_height_px).floor().max(0.0) as usize;
        let start = start.min(total_rows - 1);
        let visible = (self.viewport_height_px / self.row_height_px).ceil() as usize + 1;
        (start, visible.min(total_rows - start))
    }

    pub fn page_of(&self, row: usize) -> usize {
        row / self.page_size
    }

    /// Pages overlapping the visible rows; the last page may be short.
    pub fn pages_to_fetch(&self, total_rows: usize) -> Vec<PageRequest> {
        let (start, count) = self.visible_range(total_rows);
        if count == 0 {
            return Vec::new();
        }
        let first = self.page_of(start);
        let last = self.page_of(start + count - 1);
        (first..=last)
            .map(|index| {
                let offset = index * self.page_size;
                PageRequest { index, offset, limit: self.page_size.min(total_rows - offset) }
            })
            .collect()
    }

    pub fn content_height_px(&self, total_rows: usize) -> f64 {
        total_rows as f64 * self.row_height_px
    }
}
