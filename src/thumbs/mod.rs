//! Thumbnail loading and terminal-graphics protocol cache.
//!
//! Local thumbnail paths are resolved against the catalog directory, decoded
//! once, scaled to the current card width, and cached as terminal graphics
//! protocols. Remote URLs are never fetched; those cards render as text.
//! A decode failure is reported to the caller exactly once per item; the
//! failure set on the model prevents retries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::DynamicImage;
use ratatui::layout::Rect;
use ratatui_image::Resize;
use ratatui_image::picker::{Picker, ProtocolType};
use ratatui_image::protocol::StatefulProtocol;
#[cfg(unix)]
use ratatui_image::picker::cap_parser::QueryStdioOptions;

use crate::catalog::ItemId;

const PICKER_QUERY_TIMEOUT_MS: u64 = 250;

/// Create a picker for terminal thumbnail rendering.
///
/// The picker detects terminal capabilities and chooses the best protocol.
/// Must run before the terminal enters raw mode (it queries stdio).
pub fn create_picker() -> Option<Picker> {
    // On Windows, skip the stdio capability query; it can leave orphaned
    // reader threads on the console input buffer. Fall back to half-blocks.
    #[cfg(not(unix))]
    {
        return Some(Picker::halfblocks());
    }

    #[cfg(unix)]
    {
        let mut options = QueryStdioOptions::default();
        options.timeout = Duration::from_millis(PICKER_QUERY_TIMEOUT_MS);
        let picker = Picker::from_query_stdio_with_options(options).ok()?;
        tracing::debug!(protocol = ?picker.protocol_type(), "thumbnail picker ready");
        Some(picker)
    }
}

/// Whether a thumbnail URL points outside the local filesystem.
pub fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Outcome of a thumbnail load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbLoad {
    /// A protocol is cached and ready to render.
    Ready,
    /// No picker, a remote URL, or an empty URL; nothing to render.
    Unavailable,
    /// The file could not be read or decoded; flag the item.
    Failed,
}

/// Cache of per-item thumbnail protocols, keyed by item id and scaled to
/// the current card width.
pub struct ThumbnailStore {
    base_dir: PathBuf,
    picker: Option<Picker>,
    protocols: HashMap<ItemId, (StatefulProtocol, u16, u16)>,
    target_cols: u16,
}

impl ThumbnailStore {
    pub fn new(base_dir: PathBuf, picker: Option<Picker>) -> Self {
        Self {
            base_dir,
            picker,
            protocols: HashMap::new(),
            target_cols: 0,
        }
    }

    pub const fn enabled(&self) -> bool {
        self.picker.is_some()
    }

    /// Update the card width thumbnails are scaled for. A width change
    /// invalidates the cache so protocols are rebuilt at the new size.
    pub fn set_target_cols(&mut self, cols: u16) {
        if cols != self.target_cols {
            self.target_cols = cols;
            self.protocols.clear();
        }
    }

    /// Resolve a thumbnail URL to a local path, or `None` for remote and
    /// empty URLs.
    pub fn resolve_local(&self, url: &str) -> Option<PathBuf> {
        if url.is_empty() || is_remote(url) {
            return None;
        }
        let path = Path::new(url);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(self.base_dir.join(path))
        }
    }

    /// Make sure a protocol exists for `id`, loading and scaling on demand.
    pub fn ensure(&mut self, id: ItemId, url: &str) -> ThumbLoad {
        if self.protocols.contains_key(&id) {
            return ThumbLoad::Ready;
        }
        let Some(picker) = &self.picker else {
            return ThumbLoad::Unavailable;
        };
        let Some(path) = self.resolve_local(url) else {
            return ThumbLoad::Unavailable;
        };
        if self.target_cols == 0 {
            return ThumbLoad::Unavailable;
        }
        let Ok(original) = image::open(&path) else {
            tracing::debug!(item = %id, path = %path.display(), "thumbnail decode failed");
            return ThumbLoad::Failed;
        };

        let scaled = scale_to_width(&original, picker, self.target_cols);
        let protocol = picker.new_resize_protocol(scaled);
        let (width_cols, height_rows) = protocol_render_size(&protocol, self.target_cols);
        self.protocols.insert(id, (protocol, width_cols, height_rows));
        ThumbLoad::Ready
    }

    pub fn protocol_mut(&mut self, id: ItemId) -> Option<&mut (StatefulProtocol, u16, u16)> {
        self.protocols.get_mut(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.protocols.contains_key(&id)
    }
}

impl std::fmt::Debug for ThumbnailStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailStore")
            .field("base_dir", &self.base_dir)
            .field("enabled", &self.enabled())
            .field("cached", &self.protocols.len())
            .field("target_cols", &self.target_cols)
            .finish()
    }
}

fn scale_to_width(original: &DynamicImage, picker: &Picker, target_cols: u16) -> DynamicImage {
    let font_size = picker.font_size();
    let target_width_px = u32::from(target_cols) * u32::from(font_size.0);
    let scale = f64::from(target_width_px) / f64::from(original.width().max(1));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Scaled height is positive and well within u32 range.
    let scaled_height_px = (f64::from(original.height()) * scale) as u32;
    let filter = if matches!(picker.protocol_type(), ProtocolType::Halfblocks) {
        // Nearest-neighbor causes strong color aliasing artifacts in
        // half-cell mode.
        image::imageops::FilterType::CatmullRom
    } else {
        image::imageops::FilterType::Nearest
    };
    original.resize(target_width_px, scaled_height_px.max(1), filter)
}

fn protocol_render_size(protocol: &StatefulProtocol, target_cols: u16) -> (u16, u16) {
    use ratatui_image::protocol::StatefulProtocolType;
    let resize = if matches!(
        protocol.protocol_type(),
        StatefulProtocolType::Halfblocks(_)
    ) {
        Resize::Scale(Some(image::imageops::FilterType::CatmullRom))
    } else {
        Resize::Scale(None)
    };
    let area = Rect::new(0, 0, target_cols, u16::MAX);
    let rect = protocol.size_for(resize, area);
    (rect.width.max(1), rect.height.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote_detects_schemes() {
        assert!(is_remote("https://img.example.com/a.jpg"));
        assert!(is_remote("http://img.example.com/a.jpg"));
        assert!(!is_remote("thumbs/a.jpg"));
        assert!(!is_remote("/abs/a.jpg"));
    }

    #[test]
    fn test_resolve_local_joins_relative_paths() {
        let store = ThumbnailStore::new(PathBuf::from("/catalog"), None);
        assert_eq!(
            store.resolve_local("thumbs/a.jpg"),
            Some(PathBuf::from("/catalog/thumbs/a.jpg"))
        );
        assert_eq!(
            store.resolve_local("/abs/a.jpg"),
            Some(PathBuf::from("/abs/a.jpg"))
        );
        assert_eq!(store.resolve_local("https://x/a.jpg"), None);
        assert_eq!(store.resolve_local(""), None);
    }

    #[test]
    fn test_ensure_without_picker_is_unavailable() {
        let mut store = ThumbnailStore::new(PathBuf::from("."), None);
        store.set_target_cols(20);
        assert_eq!(store.ensure(ItemId(1), "thumbs/a.jpg"), ThumbLoad::Unavailable);
        assert!(!store.contains(ItemId(1)));
    }

    #[test]
    fn test_width_change_invalidates_cache() {
        let mut store = ThumbnailStore::new(PathBuf::from("."), None);
        store.set_target_cols(20);
        store.set_target_cols(20);
        assert_eq!(store.target_cols, 20);
        store.set_target_cols(32);
        assert!(store.protocols.is_empty());
    }
}
