//! フル詳細ストア Outbound ポート
//!
//! アイテムの正本コレクションを所有する。変更系の操作はすべてここを通り、
//! 成功のたびにコレクション全体が永続化される。

use serde_json::Value;

use crate::domain::{CatalogError, FieldPath, Item};

/// updatePath の結果。監査・エコー用の新旧値と、再投影用の更新後レコード。
#[derive(Debug, Clone, PartialEq)]
pub struct PathUpdate {
    /// 更新前の値（未設定だった場合は None）
    pub old: Option<Value>,
    /// 設定後の値
    pub new: Value,
    /// lastUpdated 打刻込みの更新後アイテム
    pub item: Item,
}

/// mark-worn 1 件分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WornItem {
    pub id: String,
    pub name: String,
    pub wear_count: i64,
}

/// mark-worn の結果。見つからなかった ID は警告として収集され、
/// 残りの有効な ID の処理は継続される。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkWornOutcome {
    pub updated: Vec<WornItem>,
    pub missing: Vec<String>,
}

/// フル詳細ストア抽象（Outbound ポート）
///
/// 実装は `adapter::JsonItemStore`。現在時刻は引数で受け取り、
/// ストア自身は時計を持たない。
pub trait ItemStore: Send + Sync {
    /// ID 完全一致の取得
    fn get(&self, id: &str) -> Result<Item, CatalogError>;

    /// 複数 ID の取得。戻り値は（要求順の発見分, 見つからなかった ID）。
    fn get_many(&self, ids: &[String]) -> Result<(Vec<Item>, Vec<String>), CatalogError>;

    /// 全件（ファイル順）
    fn all(&self) -> Result<Vec<Item>, CatalogError>;

    /// 追加。ID が既に存在すれば DuplicateId。
    fn insert(&self, item: Item) -> Result<(), CatalogError>;

    /// 削除して削除済みレコードを返す。存在しなければ NotFound。
    fn remove(&self, id: &str) -> Result<Item, CatalogError>;

    /// パス指定の部分更新。葉へ値を設定し、同一操作内で
    /// tracking.lastUpdated を `now` に打刻する。
    fn update_path(
        &self,
        id: &str,
        path: &FieldPath,
        value: Value,
        now: &str,
    ) -> Result<PathUpdate, CatalogError>;

    /// 着用記録の複合更新。wearCount を +1（欠損は 0 扱い）、
    /// lastWorn を `worn_at` に、lastUpdated を `now` に設定する。
    /// ロードと保存は ID 数によらず各 1 回。
    fn mark_worn(
        &self,
        ids: &[String],
        worn_at: &str,
        now: &str,
    ) -> Result<MarkWornOutcome, CatalogError>;
}
