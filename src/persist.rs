//! Favorites persistence
//!
//! Favorites live in `favorites.json` inside the data directory as a JSON
//! array of characters. The file is read once at startup and overwritten in
//! full after every toggle.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::favorites::FavoritesSet;

pub const FAVORITES_FILE: &str = "favorites.json";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("could not determine a data directory")]
    NoDataDir,
    #[error("favorites file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize favorites: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed favorites store
#[derive(Clone, Debug)]
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    /// Store `favorites.json` under `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(FAVORITES_FILE),
        }
    }

    /// Store under the platform's local data directory (`<data>/starwars`)
    pub fn default_location() -> Result<Self, PersistError> {
        let base = dirs_next::data_local_dir().ok_or(PersistError::NoDataDir)?;
        Ok(Self::in_dir(base.join("starwars")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read saved favorites. A missing or unreadable file yields an empty set.
    pub fn load(&self) -> FavoritesSet {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no favorites file yet");
                return FavoritesSet::default();
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "failed to read favorites: {err}");
                return FavoritesSet::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(favorites) => {
                let favorites = FavoritesSet::new(favorites);
                tracing::info!(count = favorites.len(), "loaded favorites");
                favorites
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "favorites file corrupted, ignoring: {err}");
                FavoritesSet::default()
            }
        }
    }

    /// Overwrite the favorites file with `favorites`.
    ///
    /// Writes to a sibling temp file and renames it over the target so a
    /// reader never sees a partial file.
    pub fn save(&self, favorites: &FavoritesSet) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PersistError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(favorites)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| PersistError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| PersistError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(count = favorites.len(), "saved favorites");
        Ok(())
    }
}
