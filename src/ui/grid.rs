//! Card-grid geometry and scrolling.
//!
//! [`Grid`] tracks the terminal dimensions, the number of visible items,
//! and the scroll offset in card rows. It answers all layout questions the
//! model and renderer need: column count, which rows are on screen, the
//! rectangle of a card, and the card under a mouse position.

use ratatui::layout::Rect;

/// Minimum horizontal space one card occupies, including its gutter.
pub const MIN_CARD_SLOT_WIDTH: u16 = 32;
/// Vertical space one card occupies, including its gutter.
pub const CARD_SLOT_HEIGHT: u16 = 10;

/// Scrollable card-grid layout over the visible set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    offset_rows: usize,
    total_items: usize,
}

impl Grid {
    pub const fn new(width: u16, height: u16, total_items: usize) -> Self {
        Self {
            width,
            height,
            offset_rows: 0,
            total_items,
        }
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of card columns that fit the current width.
    pub const fn columns(&self) -> usize {
        let cols = (self.width / MIN_CARD_SLOT_WIDTH) as usize;
        if cols == 0 { 1 } else { cols }
    }

    /// Width of one card slot after distributing the width evenly.
    pub fn slot_width(&self) -> u16 {
        let cols = self.columns() as u16;
        (self.width / cols.max(1)).max(1)
    }

    /// Number of card rows fully or partially on screen.
    pub const fn visible_rows(&self) -> usize {
        let rows = (self.height / CARD_SLOT_HEIGHT) as usize;
        if rows == 0 { 1 } else { rows }
    }

    /// Total card rows needed for the current item count.
    pub const fn total_rows(&self) -> usize {
        self.total_items.div_ceil(self.columns())
    }

    pub const fn offset_rows(&self) -> usize {
        self.offset_rows
    }

    const fn max_offset(&self) -> usize {
        self.total_rows().saturating_sub(self.visible_rows())
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset_rows > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset_rows < self.max_offset()
    }

    pub const fn scroll_up(&mut self, rows: usize) {
        self.offset_rows = self.offset_rows.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.offset_rows = (self.offset_rows + rows).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.visible_rows());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.visible_rows());
    }

    /// Row a given item index lands in.
    pub const fn row_of(&self, index: usize) -> usize {
        index / self.columns()
    }

    /// Scroll the minimum amount needed to bring an item's row on screen.
    pub fn ensure_visible(&mut self, index: usize) {
        let row = self.row_of(index);
        if row < self.offset_rows {
            self.offset_rows = row;
        } else if row >= self.offset_rows + self.visible_rows() {
            self.offset_rows = (row + 1).saturating_sub(self.visible_rows());
        }
        self.offset_rows = self.offset_rows.min(self.max_offset());
    }

    /// Update the item count (after re-deriving the visible set).
    pub fn set_total_items(&mut self, total: usize) {
        self.total_items = total;
        self.offset_rows = self.offset_rows.min(self.max_offset());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset_rows = self.offset_rows.min(self.max_offset());
    }

    /// On-screen rectangle of the card at `index`, or `None` when its row
    /// is scrolled out of `area`.
    pub fn cell_rect(&self, area: Rect, index: usize) -> Option<Rect> {
        if index >= self.total_items {
            return None;
        }
        let row = self.row_of(index);
        if row < self.offset_rows || row >= self.offset_rows + self.visible_rows() {
            return None;
        }
        let col = index % self.columns();
        let slot_w = self.slot_width();
        let x = area.x + col as u16 * slot_w;
        let y = area.y + (row - self.offset_rows) as u16 * CARD_SLOT_HEIGHT;
        let width = slot_w.saturating_sub(2).max(1);
        let height = CARD_SLOT_HEIGHT.saturating_sub(1);
        if y + height > area.y + area.height {
            // Partially visible bottom row: clip to the area.
            let clipped = (area.y + area.height).saturating_sub(y);
            if clipped == 0 {
                return None;
            }
            return Some(Rect::new(x, y, width, clipped));
        }
        Some(Rect::new(x, y, width, height))
    }

    /// Item index under a terminal position, if any card covers it.
    pub fn index_at(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let grid_col = ((column - area.x) / self.slot_width()) as usize;
        if grid_col >= self.columns() {
            return None;
        }
        let grid_row = self.offset_rows + ((row - area.y) / CARD_SLOT_HEIGHT) as usize;
        let index = grid_row * self.columns() + grid_col;
        if index >= self.total_items {
            return None;
        }
        // Confirm the hit is inside the card, not the gutter.
        let rect = self.cell_rect(area, index)?;
        (column >= rect.x && column < rect.x + rect.width).then_some(index)
    }

    /// Columns a card's thumbnail is scaled to (card interior).
    pub fn thumb_cols(&self) -> u16 {
        self.slot_width().saturating_sub(4).max(1)
    }
}
