//! フル詳細ストアの JSON ファイル実装
//!
//! `{"items": [...]}` 形式のドキュメントを変更のたびに全読み・全書きする。
//! データ量はメモリに収まる前提（部分書き込みの耐久性保証はない）。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::FileSystem;

use crate::domain::{set_path, CatalogError, FieldPath, Item};
use crate::ports::outbound::{ItemStore, MarkWornOutcome, PathUpdate, WornItem};

/// 永続ドキュメント
#[derive(Debug, Default, Serialize, Deserialize)]
struct ItemsDocument {
    #[serde(default)]
    items: Vec<Item>,
}

/// JSON ファイルを背にしたフル詳細ストア
///
/// 置き場所はコンストラクタで注入する（固定パスは持たない）。
pub struct JsonItemStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonItemStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl AsRef<Path>) -> Self {
        Self {
            fs,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// ファイルが無ければ空コレクションとして扱う
    fn load(&self) -> Result<Vec<Item>, CatalogError> {
        if !self.fs.exists(&self.path) {
            return Ok(Vec::new());
        }
        let s = self.fs.read_to_string(&self.path)?;
        let doc: ItemsDocument = serde_json::from_str(&s).map_err(|e| {
            CatalogError::Store(Error::Json(format!(
                "parse {}: {}",
                self.path.display(),
                e
            )))
        })?;
        Ok(doc.items)
    }

    fn save(&self, items: Vec<Item>) -> Result<(), CatalogError> {
        let doc = ItemsDocument { items };
        let s = serde_json::to_string_pretty(&doc)
            .map_err(|e| CatalogError::Store(Error::Json(e.to_string())))?;
        if let Some(parent) = self.path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        self.fs.write(&self.path, &s)?;
        Ok(())
    }
}

impl ItemStore for JsonItemStore {
    fn get(&self, id: &str) -> Result<Item, CatalogError> {
        self.load()?
            .into_iter()
            .find(|i| i.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    fn get_many(&self, ids: &[String]) -> Result<(Vec<Item>, Vec<String>), CatalogError> {
        let items = self.load()?;
        let mut found = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();
        for id in ids {
            match items.iter().find(|i| i.id == *id) {
                Some(item) => found.push(item.clone()),
                None => missing.push(id.clone()),
            }
        }
        Ok((found, missing))
    }

    fn all(&self) -> Result<Vec<Item>, CatalogError> {
        self.load()
    }

    fn insert(&self, item: Item) -> Result<(), CatalogError> {
        let mut items = self.load()?;
        if items.iter().any(|i| i.id == item.id) {
            return Err(CatalogError::DuplicateId(item.id));
        }
        items.push(item);
        self.save(items)
    }

    fn remove(&self, id: &str) -> Result<Item, CatalogError> {
        let mut items = self.load()?;
        let idx = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        let removed = items.remove(idx);
        self.save(items)?;
        Ok(removed)
    }

    fn update_path(
        &self,
        id: &str,
        path: &FieldPath,
        value: Value,
        now: &str,
    ) -> Result<PathUpdate, CatalogError> {
        let mut items = self.load()?;
        let idx = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        let doc = serde_json::to_value(&items[idx])
            .map_err(|e| CatalogError::Store(Error::Json(e.to_string())))?;
        let Value::Object(mut map) = doc else {
            return Err(CatalogError::Store(Error::Json(format!(
                "item {} did not serialize to an object",
                id
            ))));
        };

        let old = set_path(&mut map, path, value.clone())?;
        stamp_last_updated(&mut map, now)?;

        let updated: Item = serde_json::from_value(Value::Object(map)).map_err(|e| {
            CatalogError::InvalidField(format!(
                "value does not fit the item schema at '{}': {}",
                path, e
            ))
        })?;
        items[idx] = updated.clone();
        self.save(items)?;

        Ok(PathUpdate {
            old,
            new: value,
            item: updated,
        })
    }

    fn mark_worn(
        &self,
        ids: &[String],
        worn_at: &str,
        now: &str,
    ) -> Result<MarkWornOutcome, CatalogError> {
        let mut items = self.load()?;
        let mut outcome = MarkWornOutcome::default();
        for id in ids {
            let Some(item) = items.iter_mut().find(|i| i.id == *id) else {
                outcome.missing.push(id.clone());
                continue;
            };
            let count = item.tracking.wear_count.unwrap_or(0) + 1;
            item.tracking.wear_count = Some(count);
            item.tracking.last_worn = Some(worn_at.to_string());
            item.tracking.last_updated = Some(now.to_string());
            outcome.updated.push(WornItem {
                id: id.clone(),
                name: item.name.clone(),
                wear_count: count,
            });
        }
        if !outcome.updated.is_empty() {
            self.save(items)?;
        }
        Ok(outcome)
    }
}

/// tracking.lastUpdated を打刻する（tracking が無ければ作る）
fn stamp_last_updated(map: &mut Map<String, Value>, now: &str) -> Result<(), CatalogError> {
    let tracking = map
        .entry("tracking")
        .or_insert_with(|| Value::Object(Map::new()));
    let tracking = tracking.as_object_mut().ok_or_else(|| {
        CatalogError::InvalidField("'tracking' is not an object".to_string())
    })?;
    tracking.insert("lastUpdated".to_string(), Value::String(now.to_string()));
    Ok(())
}
