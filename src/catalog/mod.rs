//! Catalog loading and item records.
//!
//! The catalog is a JSON document supplied once at startup and treated as
//! immutable for the session:
//!
//! ```json
//! {
//!   "site": "https://example.film",
//!   "categories": ["documentary", "wedding", "travel", "film"],
//!   "items": [
//!     {
//!       "id": 1,
//!       "title": "Cinematic Journey",
//!       "category": "film",
//!       "description": "A breathtaking visual narrative.",
//!       "thumbnailUrl": "thumbs/journey.jpg",
//!       "videoUrl": "https://www.youtube.com/embed/XXXX",
//!       "client": "Independent Film",
//!       "director": "Alex Rodriguez",
//!       "year": "2024",
//!       "location": "Los Angeles, CA",
//!       "camera": "RED Komodo 6K",
//!       "lenses": "Zeiss Supreme Primes",
//!       "format": "6K RAW",
//!       "aspectRatio": "2.39:1"
//!     }
//!   ]
//! }
//! ```
//!
//! Thumbnail URLs may be local paths (resolved against the catalog file's
//! directory) or remote URLs, which are never fetched.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// The synthetic category label meaning "no category filter".
///
/// Never present in a catalog's own category list; load fails if it is.
pub const ALL_CATEGORY: &str = "all";

/// Stable identifier for a catalog item. Unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One portfolio entry. Read-only to the interaction core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub thumbnail_url: String,
    pub video_url: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub camera: String,
    #[serde(default)]
    pub lenses: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub aspect_ratio: String,
}

/// Errors raised while loading or validating a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate item id {id}")]
    DuplicateId { id: ItemId },
    #[error("\"{ALL_CATEGORY}\" is reserved and cannot appear in the category list")]
    ReservedCategory,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    site: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    items: Vec<Item>,
}

/// The immutable item collection behind the gallery.
#[derive(Debug, Clone)]
pub struct Catalog {
    site: Option<String>,
    categories: Vec<String>,
    items: Vec<Item>,
    source: PathBuf,
}

impl Catalog {
    /// An empty catalog, used as the placeholder state.
    pub fn empty() -> Self {
        Self {
            site: None,
            categories: Vec::new(),
            items: Vec::new(),
            source: PathBuf::from("."),
        }
    }

    /// Load and validate a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if two items
    /// share an id, or if the category list contains the reserved
    /// [`ALL_CATEGORY`] label.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, path.to_path_buf())
    }

    /// Parse and validate a catalog from a JSON string.
    ///
    /// `source` records where the catalog came from; it is used to resolve
    /// relative thumbnail paths and as the share link of last resort.
    ///
    /// # Errors
    ///
    /// Same validation failures as [`Catalog::load`], minus the read error.
    pub fn from_json(json: &str, source: PathBuf) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|err| CatalogError::Parse {
                path: source.clone(),
                source: err,
            })?;
        let catalog = Self {
            site: file.site,
            categories: file.categories,
            items: file.items,
            source,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId { id: item.id });
            }
        }
        if self
            .categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(ALL_CATEGORY))
        {
            return Err(CatalogError::ReservedCategory);
        }
        Ok(())
    }

    /// All items, in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Filter-bar options: [`ALL_CATEGORY`] followed by the catalog's own
    /// category labels, lowercased for display and matching.
    pub fn category_options(&self) -> Vec<String> {
        let mut options = Vec::with_capacity(self.categories.len() + 1);
        options.push(ALL_CATEGORY.to_string());
        options.extend(self.categories.iter().map(|c| c.to_lowercase()));
        options
    }

    /// Directory for resolving relative thumbnail paths.
    pub fn base_dir(&self) -> PathBuf {
        self.source
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    /// The link shared for this portfolio: the catalog's `site` field, or
    /// the catalog file location when no site is set.
    pub fn share_link(&self) -> String {
        self.site
            .clone()
            .unwrap_or_else(|| self.source.display().to_string())
    }
}
