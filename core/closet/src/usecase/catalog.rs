//! 変更系ユースケース（insert / update / remove / mark-worn / check）
//!
//! レコード更新とインデックス再投影は 1 つの論理操作としてここで直列に
//! 行う。シングルスレッド前提のため、途中状態が他の呼び出し側から観測
//! されることはない。

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use common::ports::outbound::{iso8601_from_ms, Clock};

use crate::domain::{project, CatalogError, FieldPath, IndexEntry, Item};
use crate::ports::outbound::{IndexStore, ItemStore, MarkWornOutcome};

/// update の結果（エコー・ログ用）
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub id: String,
    pub field: String,
    pub old: Option<Value>,
    pub new: Value,
    /// 更新パスがインデックス対象で再投影が走ったか
    pub index_refreshed: bool,
}

/// remove の結果
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveOutcome {
    pub item: Item,
    /// インデックス側にもエントリが存在して削除されたか。
    /// false は不整合の兆候で、呼び出し側が警告として表面化する。
    pub index_removed: bool,
}

/// check の結果（両方向の欠落と投影ずれ）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckReport {
    /// インデックスエントリを持たないアイテム ID
    pub unindexed_items: Vec<String>,
    /// 対応するアイテムを持たないインデックス ID
    pub orphan_entries: Vec<String>,
    /// project(item) と一致しないインデックス ID
    pub stale_entries: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.unindexed_items.is_empty()
            && self.orphan_entries.is_empty()
            && self.stale_entries.is_empty()
    }
}

/// 変更系ユースケース
pub struct CatalogUseCase {
    items: Arc<dyn ItemStore>,
    index: Arc<dyn IndexStore>,
    clock: Arc<dyn Clock>,
}

impl CatalogUseCase {
    pub fn new(
        items: Arc<dyn ItemStore>,
        index: Arc<dyn IndexStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            items,
            index,
            clock,
        }
    }

    /// 追加。フル詳細と新規インデックスエントリを同一論理操作で書く。
    pub fn insert(&self, item: Item) -> Result<(), CatalogError> {
        let entry = project(&item);
        self.items.insert(item)?;
        self.index.upsert(entry)?;
        Ok(())
    }

    /// ドットパス指定のフィールド更新。値は型付きで受け取る
    /// （文字列入力の型推測は CLI 境界で済ませてから呼ぶ）。
    pub fn update_field(
        &self,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<UpdateOutcome, CatalogError> {
        let path = FieldPath::parse(field)?;
        let now = iso8601_from_ms(self.clock.now_ms());
        let update = self.items.update_path(id, &path, value, &now)?;

        // インデックス対象外のパス（notes, tracking.* など）では
        // インデックスファイルに触れない
        let index_refreshed = path.affects_index();
        if index_refreshed {
            self.index.upsert(project(&update.item))?;
        }

        Ok(UpdateOutcome {
            id: id.to_string(),
            field: path.to_string(),
            old: update.old,
            new: update.new,
            index_refreshed,
        })
    }

    /// 削除。フル詳細とインデックスの両方から外す。
    pub fn remove(&self, id: &str) -> Result<RemoveOutcome, CatalogError> {
        let item = self.items.remove(id)?;
        let index_removed = self.index.remove(id)?;
        Ok(RemoveOutcome {
            item,
            index_removed,
        })
    }

    /// 着用記録。インデックス対象フィールドには触れないため、
    /// インデックスの再投影は行わない。
    pub fn mark_worn(
        &self,
        ids: &[String],
        date: Option<&str>,
    ) -> Result<MarkWornOutcome, CatalogError> {
        let now = iso8601_from_ms(self.clock.now_ms());
        let worn_at = match date {
            Some(d) => {
                chrono::DateTime::parse_from_rfc3339(d)
                    .map_err(|e| CatalogError::InvalidDate(d.to_string(), e.to_string()))?;
                d.to_string()
            }
            None => now.clone(),
        };
        self.items.mark_worn(ids, &worn_at, &now)
    }

    /// 両ストアを突き合わせ、片側にしか無い ID と投影ずれを報告する。
    pub fn check(&self) -> Result<CheckReport, CatalogError> {
        let items = self.items.all()?;
        let entries = self.index.all()?;
        let item_ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
        let entry_by_id: HashMap<&str, &IndexEntry> =
            entries.iter().map(|e| (e.id.as_str(), e)).collect();

        let mut report = CheckReport::default();
        for item in &items {
            match entry_by_id.get(item.id.as_str()) {
                None => report.unindexed_items.push(item.id.clone()),
                Some(entry) => {
                    if **entry != project(item) {
                        report.stale_entries.push(item.id.clone());
                    }
                }
            }
        }
        for entry in &entries {
            if !item_ids.contains(entry.id.as_str()) {
                report.orphan_entries.push(entry.id.clone());
            }
        }
        Ok(report)
    }
}
