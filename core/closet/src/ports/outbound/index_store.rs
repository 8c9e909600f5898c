//! インデックスストア Outbound ポート
//!
//! クエリ用の非正規化サマリコレクションを所有する。

use crate::domain::{CatalogError, IndexEntry};

/// インデックスストア抽象（Outbound ポート）
///
/// 実装は `adapter::JsonIndexStore`。
pub trait IndexStore: Send + Sync {
    /// ID 完全一致の取得
    fn get(&self, id: &str) -> Result<Option<IndexEntry>, CatalogError>;

    /// 全件。順序はファイル順で、読み直しても安定している。
    fn all(&self) -> Result<Vec<IndexEntry>, CatalogError>;

    /// 挿入または置換。置換時は位置を保つ。
    fn upsert(&self, entry: IndexEntry) -> Result<(), CatalogError>;

    /// 削除。エントリが存在したかを返す（欠けていても失敗にはしない）。
    fn remove(&self, id: &str) -> Result<bool, CatalogError>;
}
