//! ID 指定のフル詳細取得ユースケース

use std::sync::Arc;

use crate::domain::{CatalogError, Item};
use crate::ports::outbound::ItemStore;

/// show コマンドのユースケース
pub struct DetailsUseCase {
    items: Arc<dyn ItemStore>,
}

impl DetailsUseCase {
    pub fn new(items: Arc<dyn ItemStore>) -> Self {
        Self { items }
    }

    /// 指定 ID のアイテムを取得する（複数可）。
    /// 見つからない ID は警告用に収集し、残りの処理は継続する。
    pub fn get(&self, ids: &[String]) -> Result<(Vec<Item>, Vec<String>), CatalogError> {
        self.items.get_many(ids)
    }
}
