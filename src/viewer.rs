//! Viewer state machine.
//!
//! The viewer is either closed or presenting one item out of the current
//! visible set. While open it tracks the item's position in that set, a
//! paused/playing flag, and a fullscreen flag. All transitions are pure;
//! the scroll-lock pairing lives in the model, which owns both.

use crate::catalog::ItemId;

/// Playback substate while viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Paused,
    Playing,
}

/// Navigation direction within the visible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// The open-viewer record. Invariant: `index` is the position of `item_id`
/// in the visible set the model last derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewing {
    pub item_id: ItemId,
    pub index: usize,
    pub playback: Playback,
    pub fullscreen: bool,
}

/// Outcome of reconciling the viewer against a freshly derived visible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// Closed, or the open item kept its position.
    Unchanged,
    /// The open item is still visible but its index moved.
    Moved,
    /// The open item dropped out of the visible set; the viewer closed.
    Closed,
}

/// Closed, or viewing one member of the visible set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerState {
    open: Option<Viewing>,
}

impl ViewerState {
    pub const fn closed() -> Self {
        Self { open: None }
    }

    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.open
            .is_some_and(|v| v.playback == Playback::Playing)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.open.is_some_and(|v| v.fullscreen)
    }

    pub fn open_id(&self) -> Option<ItemId> {
        self.open.map(|v| v.item_id)
    }

    pub fn index(&self) -> Option<usize> {
        self.open.map(|v| v.index)
    }

    /// 1-based position and total for the viewer header, e.g. `3 / 12`.
    pub fn counters(&self, total: usize) -> Option<(usize, usize)> {
        self.open.map(|v| (v.index + 1, total))
    }

    /// Open `id` if it is a member of `visible`. Playback starts paused.
    ///
    /// Returns whether the viewer opened; a non-member id is a silent no-op.
    pub fn open(&mut self, visible: &[ItemId], id: ItemId) -> bool {
        let Some(index) = visible.iter().position(|&v| v == id) else {
            return false;
        };
        self.open = Some(Viewing {
            item_id: id,
            index,
            playback: Playback::Paused,
            fullscreen: false,
        });
        true
    }

    /// Close the viewer, clearing playback and fullscreen.
    ///
    /// Returns whether it was open; closing a closed viewer is a no-op.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    /// Move to the adjacent item, wrapping at both ends of the visible set.
    ///
    /// No-op when closed or when the set has one member or fewer. Resets
    /// playback to paused; fullscreen is preserved.
    pub fn navigate(&mut self, direction: Direction, visible: &[ItemId]) -> bool {
        let n = visible.len();
        let Some(viewing) = self.open.as_mut() else {
            return false;
        };
        if n <= 1 {
            return false;
        }
        let index = match direction {
            Direction::Next => (viewing.index + 1) % n,
            Direction::Prev => (viewing.index + n - 1) % n,
        };
        viewing.item_id = visible[index];
        viewing.index = index;
        viewing.playback = Playback::Paused;
        true
    }

    /// Start playback. Valid only from paused; a no-op when already playing.
    pub fn play(&mut self) -> bool {
        match self.open.as_mut() {
            Some(viewing) if viewing.playback == Playback::Paused => {
                viewing.playback = Playback::Playing;
                true
            }
            _ => false,
        }
    }

    /// Flip the fullscreen flag. Valid in any open substate.
    pub fn toggle_fullscreen(&mut self) -> bool {
        match self.open.as_mut() {
            Some(viewing) => {
                viewing.fullscreen = !viewing.fullscreen;
                true
            }
            None => false,
        }
    }

    /// Re-anchor the open item against a freshly derived visible set.
    ///
    /// An open viewer may never reference an item absent from the current
    /// set: if the item dropped out, the viewer closes. If it is still
    /// present its index is updated to the new position.
    pub fn reconcile(&mut self, visible: &[ItemId]) -> Reconciled {
        let Some(viewing) = self.open.as_mut() else {
            return Reconciled::Unchanged;
        };
        match visible.iter().position(|&v| v == viewing.item_id) {
            Some(index) if index == viewing.index => Reconciled::Unchanged,
            Some(index) => {
                viewing.index = index;
                Reconciled::Moved
            }
            None => {
                self.open = None;
                Reconciled::Closed
            }
        }
    }
}
