//! クエリユースケース（インデックス評価と hydration）

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{CatalogError, IndexEntry, Item, QueryFilter};
use crate::ports::outbound::{IndexStore, ItemStore};

/// インデックスに対する検索と、必要に応じたフル詳細の取得
pub struct QueryUseCase {
    index: Arc<dyn IndexStore>,
    items: Arc<dyn ItemStore>,
}

impl QueryUseCase {
    pub fn new(index: Arc<dyn IndexStore>, items: Arc<dyn ItemStore>) -> Self {
        Self { index, items }
    }

    /// フィルタ評価。ids は集合所属で先に絞り、残りの述語を AND で適用する。
    pub fn run(&self, filter: &QueryFilter) -> Result<Vec<IndexEntry>, CatalogError> {
        let entries = self.index.all()?;
        let id_set: Option<HashSet<&str>> = filter
            .ids
            .as_ref()
            .map(|ids| ids.iter().map(String::as_str).collect());
        Ok(entries
            .into_iter()
            .filter(|e| {
                id_set
                    .as_ref()
                    .map_or(true, |set| set.contains(e.id.as_str()))
            })
            .filter(|e| filter.matches(e))
            .collect())
    }

    /// マッチしたエントリのフル詳細をマッチ順で取得する（読み取り専用の join）。
    ///
    /// インデックスにあってフル詳細に無い ID は呼び出し側の誤りではなく
    /// ストア破損なので、NotFound ではなく IntegrityViolation にする。
    pub fn hydrate(&self, entries: &[IndexEntry]) -> Result<Vec<Item>, CatalogError> {
        let ids: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();
        let (found, missing) = self.items.get_many(&ids)?;
        if !missing.is_empty() {
            return Err(CatalogError::IntegrityViolation(format!(
                "index entries without item records: {}",
                missing.join(", ")
            )));
        }
        Ok(found)
    }
}
