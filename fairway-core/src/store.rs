//! Tour storage seam
//!
//! The engine never reads or writes storage itself. Front ends inject a
//! `TourStore` and pass the loaded snapshot into the scoring functions.
//! Writers must be serialized per tour; `MemoryStore` does this with a lock,
//! `JsonFileStore` leaves it to the single process that owns the directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{anyhow, Context, Result};

use crate::tour::Tour;

/// Repository of tours keyed by tour id
pub trait TourStore {
    fn load(&self, tour_id: &str) -> Result<Tour>;
    fn save(&self, tour: &Tour) -> Result<()>;
    fn list(&self) -> Result<Vec<String>>;
}

/// One `<id>.json` file per tour inside a directory
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at a tour file's directory, plus that file's tour id
    pub fn for_file(path: &Path) -> Result<(Self, String)> {
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow!("Not a tour file: {}", path.display()))?
            .to_string();
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Ok((Self::new(root), id))
    }

    pub fn path_for(&self, tour_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", tour_id))
    }
}

impl TourStore for JsonFileStore {
    fn load(&self, tour_id: &str) -> Result<Tour> {
        let path = self.path_for(tour_id);
        Tour::load(&path).with_context(|| format!("Failed to load tour: {}", path.display()))
    }

    fn save(&self, tour: &Tour) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create store directory: {}", self.root.display()))?;
        let path = self.path_for(&tour.id);
        tour.save(&path)
            .with_context(|| format!("Failed to save tour: {}", path.display()))?;
        tracing::debug!("Saved tour {} to {}", tour.id, path.display());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// In-process store, mainly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    tours: RwLock<BTreeMap<String, Tour>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TourStore for MemoryStore {
    fn load(&self, tour_id: &str) -> Result<Tour> {
        let tours = self.tours.read().map_err(|_| anyhow!("Tour store lock poisoned"))?;
        tours
            .get(tour_id)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown tour: {}", tour_id))
    }

    fn save(&self, tour: &Tour) -> Result<()> {
        let mut tours = self.tours.write().map_err(|_| anyhow!("Tour store lock poisoned"))?;
        tours.insert(tour.id.clone(), tour.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let tours = self.tours.read().map_err(|_| anyhow!("Tour store lock poisoned"))?;
        Ok(tours.keys().cloned().collect())
    }
}
