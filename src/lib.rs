// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference
    clippy::module_name_repetitions
)]

//! # Showreel
//!
//! A terminal portfolio gallery for video work.
//!
//! Showreel loads a JSON catalog of projects and presents it as:
//! - A filterable, searchable card grid with inline thumbnails
//!   (Kitty, Sixel, iTerm2, half-block fallback)
//! - An immersive single-item viewer with wrap-around navigation,
//!   playback hand-off to an embedded-player URL, fullscreen, and share
//!
//! ## Architecture
//!
//! Showreel uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! The visible set is a pure derivation of the catalog and the filter
//! state; the viewer may only ever reference a member of that set, and the
//! grid scroll lock is held exactly while the viewer is open.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`catalog`]: Catalog loading and item records
//! - [`gallery`]: Visible-set derivation from filter/search criteria
//! - [`viewer`]: Viewer state machine
//! - [`embed`]: Embedded-player URL construction
//! - [`thumbs`]: Thumbnail loading and protocol cache
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod catalog;
pub mod config;
pub mod embed;
pub mod gallery;
pub mod thumbs;
pub mod ui;
pub mod viewer;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::catalog::{Catalog, Item, ItemId};
    pub use crate::gallery::FilterState;
    pub use crate::viewer::{Direction, ViewerState};
}
