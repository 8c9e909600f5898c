//! アダプター（JSON ファイル永続化とデータディレクトリ解決）

pub mod data_paths;
pub mod json_index_store;
pub mod json_item_store;

pub use data_paths::DataPaths;
pub use json_index_store::JsonIndexStore;
pub use json_item_store::JsonItemStore;
