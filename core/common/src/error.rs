//! エラーハンドリング
//!
//! 全レイヤー共通のエラー型。メッセージと終了コードを対で扱う。

/// アプリ共通エラー
///
/// 終了コードは sysexits に準拠（64=usage, 65=data, 70=software, 74=io）。
/// NotFound / Conflict は CLI 契約上 1 を返す。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// I/O 失敗（読み書き・ディレクトリ作成など）
    #[error("{0}")]
    Io(String),

    /// 永続 JSON の破損・パース失敗
    #[error("{0}")]
    Json(String),

    /// 引数不正（usage エラー）
    #[error("{0}")]
    InvalidArgument(String),

    /// 対象 ID が存在しない
    #[error("{0}")]
    NotFound(String),

    /// 既存 ID との衝突
    #[error("{0}")]
    Conflict(String),

    /// ストア間の不整合（破損検知。呼び出し側の誤りとは区別する）
    #[error("{0}")]
    Integrity(String),
}

impl Error {
    /// I/Oエラーをエラー型に変換
    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    /// 引数不正エラー
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// ID 不在エラー
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// ID 衝突エラー
    pub fn conflict(msg: impl Into<String>) -> Self {
        Error::Conflict(msg.into())
    }

    /// 不整合エラー
    pub fn integrity(msg: impl Into<String>) -> Self {
        Error::Integrity(msg.into())
    }

    /// プロセス終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(_) => 74,
            Error::Json(_) => 65,
            Error::InvalidArgument(_) => 64,
            Error::NotFound(_) | Error::Conflict(_) => 1,
            Error::Integrity(_) => 70,
        }
    }

    /// usage 表示を伴うエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = Error::invalid_argument("test");
        assert_eq!(err.to_string(), "test");
        assert_eq!(err.exit_code(), 64);
        assert!(err.is_usage());

        let err = Error::io_msg("test");
        assert_eq!(err.exit_code(), 74);
        assert!(!err.is_usage());
    }

    #[test]
    fn test_not_found_exit_code_is_one() {
        assert_eq!(Error::not_found("item x").exit_code(), 1);
        assert_eq!(Error::conflict("item x").exit_code(), 1);
    }

    #[test]
    fn test_integrity_distinct_from_not_found() {
        let integrity = Error::integrity("index orphan");
        let not_found = Error::not_found("index orphan");
        assert_ne!(integrity, not_found);
        assert_eq!(integrity.exit_code(), 70);
    }
}
