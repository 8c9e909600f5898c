//! 時刻 Outbound ポート
//!
//! usecase はこの trait 経由でのみ現在時刻を取得する。テストでは
//! 単調増加するモック Clock を注入する。

/// 時刻抽象（Outbound ポート）
pub trait Clock: Send + Sync {
    /// UNIX エポックからのミリ秒
    fn now_ms(&self) -> u64;
}

/// ミリ秒を固定幅 ISO 8601 (UTC) 文字列へ変換する。
///
/// 形式: `%Y-%m-%dT%H:%M:%S%.3fZ`。固定幅のため辞書順＝時系列順が成り立つ。
pub fn iso8601_from_ms(ms: u64) -> String {
    chrono::DateTime::<chrono::Utc>::from_timestamp_millis(ms as i64)
        .unwrap_or(chrono::DateTime::UNIX_EPOCH)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}
