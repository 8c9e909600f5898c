//! インデックスエントリ（非正規化サマリ）と投影
//!
//! wardrobe_index.json の 1 レコード。全フィールドがアイテムからの
//! 投影コピーで、インデックス側に独自の真実は持たない。

use serde::{Deserialize, Serialize};

use super::item::Item;

/// インデックスエントリ。query はフル詳細を読まずにこれだけで評価する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub primary_color: String,
    #[serde(default)]
    pub formality: i64,
    #[serde(default)]
    pub seasons: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// アイテムからインデックスエントリを導出する（純粋関数）。
///
/// 欠損した入れ子コンテナはデフォルト（空文字・0・空リスト）として扱う。
pub fn project(item: &Item) -> IndexEntry {
    IndexEntry {
        id: item.id.clone(),
        name: item.name.clone(),
        item_type: item.item_type.clone(),
        category: item.category.clone(),
        primary_color: item.metadata.colors.primary.clone().unwrap_or_default(),
        formality: item.metadata.formality.unwrap_or(0),
        seasons: item.context.seasons.clone(),
        tags: item.tags.clone(),
    }
}
