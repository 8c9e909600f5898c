//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, StdClock, StdFileSystem};
use common::ports::outbound::{Clock, FileSystem, Log};

use crate::adapter::{DataPaths, JsonIndexStore, JsonItemStore};
use crate::ports::outbound::{IndexStore, ItemStore};
use crate::usecase::{CatalogUseCase, DetailsUseCase, QueryUseCase};

/// 配線で組み立てたユースケース群（main の Command ディスパッチで利用）
pub struct App {
    pub catalog_use_case: CatalogUseCase,
    pub query_use_case: QueryUseCase,
    pub details_use_case: DetailsUseCase,
    /// 構造化ログ（データディレクトリ内の JSONL）。エラー時のコンソール表示とは別。
    pub logger: Arc<dyn Log>,
    pub clock: Arc<dyn Clock>,
}

/// 配線: データディレクトリ配下のストアと標準アダプタで App を組み立てる
pub fn wire_closet(paths: &DataPaths) -> App {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let clock: Arc<dyn Clock> = Arc::new(StdClock);
    let logger: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(&fs), paths.log_file()));
    let items: Arc<dyn ItemStore> =
        Arc::new(JsonItemStore::new(Arc::clone(&fs), paths.items_file()));
    let index: Arc<dyn IndexStore> =
        Arc::new(JsonIndexStore::new(Arc::clone(&fs), paths.index_file()));

    App {
        catalog_use_case: CatalogUseCase::new(
            Arc::clone(&items),
            Arc::clone(&index),
            Arc::clone(&clock),
        ),
        query_use_case: QueryUseCase::new(Arc::clone(&index), Arc::clone(&items)),
        details_use_case: DetailsUseCase::new(items),
        logger,
        clock,
    }
}
