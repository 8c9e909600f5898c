//! アダプター（外界の I/O の標準実装とテスト用実装）
//!
//! usecase は ports の trait 経由でのみファイル・時刻・ログに触れる。
//! 実装は標準実装（Std*）やテスト用の MemFileSystem を注入する。

pub mod file_json_log;
pub mod mem_fs;
pub mod std_clock;
pub mod std_fs;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use mem_fs::MemFileSystem;
pub use std_clock::StdClock;
pub use std_fs::StdFileSystem;
