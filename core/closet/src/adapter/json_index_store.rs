//! インデックスストアの JSON ファイル実装
//!
//! フル詳細ストアと同じ `{"items": [...]}` 形式。全読み・全書き。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::FileSystem;

use crate::domain::{CatalogError, IndexEntry};
use crate::ports::outbound::IndexStore;

/// 永続ドキュメント
#[derive(Debug, Default, Serialize, Deserialize)]
struct IndexDocument {
    #[serde(default)]
    items: Vec<IndexEntry>,
}

/// JSON ファイルを背にしたインデックスストア
pub struct JsonIndexStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonIndexStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> Result<Vec<IndexEntry>, CatalogError> {
        if !self.fs.exists(&self.path) {
            return Ok(Vec::new());
        }
        let s = self.fs.read_to_string(&self.path)?;
        let doc: IndexDocument = serde_json::from_str(&s).map_err(|e| {
            CatalogError::Store(Error::Json(format!(
                "parse {}: {}",
                self.path.display(),
                e
            )))
        })?;
        Ok(doc.items)
    }

    fn save(&self, items: Vec<IndexEntry>) -> Result<(), CatalogError> {
        let doc = IndexDocument { items };
        let s = serde_json::to_string_pretty(&doc)
            .map_err(|e| CatalogError::Store(Error::Json(e.to_string())))?;
        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        self.fs.write(&self.path, &s)?;
        Ok(())
    }
}

impl IndexStore for JsonIndexStore {
    fn get(&self, id: &str) -> Result<Option<IndexEntry>, CatalogError> {
        Ok(self.load()?.into_iter().find(|e| e.id == id))
    }

    fn all(&self) -> Result<Vec<IndexEntry>, CatalogError> {
        self.load()
    }

    fn upsert(&self, entry: IndexEntry) -> Result<(), CatalogError> {
        let mut entries = self.load()?;
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => *slot = entry,
            None => entries.push(entry),
        }
        self.save(entries)
    }

    fn remove(&self, id: &str) -> Result<bool, CatalogError> {
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() != before;
        if removed {
            self.save(entries)?;
        }
        Ok(removed)
    }
}
