//! Inbound ポート: CLI からユースケースを起動するための trait

use crate::cli::RunConfig;
use common::error::Error;

/// 解析済み設定を受け取りコマンドを実行する（実装は main の Runner）
pub trait UseCaseRunner {
    /// 実行してプロセス終了コードを返す
    fn run(&self, config: RunConfig) -> Result<i32, Error>;
}
