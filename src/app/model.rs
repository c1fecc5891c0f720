use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::catalog::{Catalog, Item, ItemId};
use crate::gallery::{self, FilterState};
use crate::thumbs::{ThumbLoad, ThumbnailStore};
use crate::ui::grid::Grid;
use crate::viewer::{Reconciled, ViewerState};

use super::scroll_lock::ScrollLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state. The viewer, the
/// scroll lock, and the cached visible set move together: every transition
/// that can change one goes through the controller methods below, so the
/// invariants hold at all times (the open item is always a member of the
/// visible set at the recorded index; the lock is held iff the viewer is
/// open).
pub struct Model {
    /// The immutable item catalog
    pub catalog: Catalog,
    /// Current filter and search criteria
    pub filter: FilterState,
    /// Cached visible-set derivation, in catalog order
    visible: Vec<ItemId>,
    /// Filter-bar options ("all" + catalog categories)
    pub category_options: Vec<String>,
    /// Viewer state machine
    pub viewer: ViewerState,
    /// Grid scroll suspension while the viewer is open
    scroll_lock: ScrollLock,
    /// Grid cursor: index into the visible set
    pub cursor: usize,
    /// Grid geometry and scroll offset
    pub grid: Grid,
    /// Items whose thumbnails failed to decode; never cleared this session
    pub image_failures: HashSet<ItemId>,
    /// Whether the search bar is shown and the term applies
    pub search_active: bool,
    /// Whether keystrokes currently edit the search term
    pub search_focused: bool,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Thumbnail protocol cache
    pub thumbs: ThumbnailStore,
    /// Share command configured by the user, if any
    pub share_cmd: Option<String>,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("filter", &self.filter)
            .field("visible", &self.visible.len())
            .field("viewer", &self.viewer)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model with default filter state and a closed viewer.
    pub fn new(catalog: Catalog, terminal_size: (u16, u16), thumbs: ThumbnailStore) -> Self {
        let category_options = catalog.category_options();
        let filter = FilterState::default();
        let visible = gallery::visible_set(&catalog, &filter);
        let grid = Grid::new(
            terminal_size.0,
            terminal_size.1.saturating_sub(1),
            visible.len(),
        );
        let mut thumbs = thumbs;
        thumbs.set_target_cols(grid.thumb_cols());

        Self {
            catalog,
            filter,
            visible,
            category_options,
            viewer: ViewerState::closed(),
            scroll_lock: ScrollLock::new(),
            cursor: 0,
            grid,
            image_failures: HashSet::new(),
            search_active: false,
            search_focused: false,
            help_visible: false,
            should_quit: false,
            thumbs,
            share_cmd: None,
            toast: None,
        }
    }

    /// The current visible set, in catalog order.
    pub fn visible(&self) -> &[ItemId] {
        &self.visible
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Items of the visible set, resolved against the catalog.
    pub fn visible_items(&self) -> Vec<&Item> {
        self.visible
            .iter()
            .filter_map(|id| self.catalog.get(*id))
            .collect()
    }

    /// The item under the grid cursor.
    pub fn selected_item(&self) -> Option<&Item> {
        self.visible
            .get(self.cursor)
            .and_then(|id| self.catalog.get(*id))
    }

    /// The item open in the viewer.
    pub fn open_item(&self) -> Option<&Item> {
        self.viewer.open_id().and_then(|id| self.catalog.get(id))
    }

    pub const fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_held()
    }

    /// Completed scroll-lock (acquire, release) counts, for pairing checks.
    pub const fn scroll_lock_cycles(&self) -> (u64, u64) {
        self.scroll_lock.cycles()
    }

    /// Open `id` in the viewer if it is currently visible, acquiring the
    /// scroll lock. A non-visible id is a silent no-op.
    pub fn open_viewer(&mut self, id: ItemId) {
        if self.viewer.open(&self.visible, id) {
            self.scroll_lock.acquire();
            if let Some(index) = self.viewer.index() {
                self.cursor = index;
                self.grid.ensure_visible(index);
            }
        }
    }

    /// Close the viewer and release the scroll lock. Idempotent.
    pub fn close_viewer(&mut self) {
        self.viewer.close();
        self.scroll_lock.release();
    }

    /// Move the viewer to the adjacent visible item, wrapping at both ends.
    /// The grid cursor follows the open item.
    pub fn navigate_viewer(&mut self, direction: crate::viewer::Direction) {
        if self.viewer.navigate(direction, &self.visible)
            && let Some(index) = self.viewer.index()
        {
            self.cursor = index;
            self.grid.ensure_visible(index);
        }
    }

    /// Re-derive the visible set after a filter or search change, then
    /// reconcile everything anchored to it: the viewer (closed, with the
    /// lock released, if its item dropped out), the cursor, and the grid.
    pub fn refresh_visible_set(&mut self) {
        self.visible = gallery::visible_set(&self.catalog, &self.filter);
        self.grid.set_total_items(self.visible.len());

        match self.viewer.reconcile(&self.visible) {
            Reconciled::Closed => {
                self.scroll_lock.release();
                tracing::debug!("viewer closed by filter change");
            }
            Reconciled::Moved | Reconciled::Unchanged => {}
        }
        if let Some(index) = self.viewer.index() {
            self.cursor = index;
        }
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
        if !self.visible.is_empty() {
            self.grid.ensure_visible(self.cursor);
        }
    }

    /// Move the cursor by a signed item offset, clamped to the set.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let max = self.visible.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
        self.grid.ensure_visible(self.cursor);
    }

    /// Scroll the grid by whole rows, unless the scroll lock is held.
    pub fn scroll_grid(&mut self, delta: isize) {
        if self.scroll_lock.is_held() {
            return;
        }
        if delta < 0 {
            self.grid.scroll_up(delta.unsigned_abs());
        } else {
            self.grid.scroll_down(delta.unsigned_abs());
        }
    }

    /// Page the grid, unless the scroll lock is held.
    pub fn page_grid(&mut self, down: bool) {
        if self.scroll_lock.is_held() {
            return;
        }
        if down {
            self.grid.page_down();
        } else {
            self.grid.page_up();
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.grid.resize(width, height.saturating_sub(1));
        self.thumbs.set_target_cols(self.grid.thumb_cols());
        self.clamp_cursor();
    }

    /// Record a thumbnail load failure; the item renders as a placeholder
    /// for the rest of the session.
    pub fn mark_thumb_failed(&mut self, id: ItemId) {
        self.image_failures.insert(id);
    }

    pub fn thumb_failed(&self, id: ItemId) -> bool {
        self.image_failures.contains(&id)
    }

    /// Load thumbnails for the cards on screen plus the open item.
    ///
    /// Runs before each render. Flagged items are never re-attempted.
    pub fn load_visible_thumbs(&mut self) {
        if !self.thumbs.enabled() {
            return;
        }
        let start = (self.grid.offset_rows() * self.grid.columns()).min(self.visible.len());
        let end = (start + self.grid.visible_rows() * self.grid.columns()).min(self.visible.len());
        let mut wanted: Vec<ItemId> = self.visible[start..end].to_vec();
        if let Some(id) = self.viewer.open_id() {
            wanted.push(id);
        }

        for id in wanted {
            if self.image_failures.contains(&id) || self.thumbs.contains(id) {
                continue;
            }
            let Some(item) = self.catalog.get(id) else {
                continue;
            };
            let url = item.thumbnail_url.clone();
            if self.thumbs.ensure(id, &url) == ThumbLoad::Failed {
                self.image_failures.insert(id);
            }
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        let catalog = Catalog::empty();
        let thumbs = ThumbnailStore::new(catalog.base_dir(), None);
        Self::new(catalog, (80, 24), thumbs)
    }
}
