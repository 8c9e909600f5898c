//! カタログ操作のドメインエラー

use common::error::Error;

/// ストア・クエリ操作のエラー（ドメイン層）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// 指定 ID のレコードが存在しない（呼び出し側の誤り）
    #[error("item not found: {0}")]
    NotFound(String),

    /// 挿入時の ID 衝突
    #[error("duplicate item id: {0}")]
    DuplicateId(String),

    /// フォーマル度レンジ文字列の不正
    #[error("invalid formality range '{0}' (expected N or LO-HI)")]
    InvalidRange(String),

    /// フィールドパス・更新値の不正（スキーマに収まらない等）
    #[error("invalid field update: {0}")]
    InvalidField(String),

    /// 日付文字列の不正
    #[error("invalid date '{0}': {1}")]
    InvalidDate(String, String),

    /// ストア間の不整合（NotFound とは区別して伝播する）
    #[error("store integrity violation: {0}")]
    IntegrityViolation(String),

    /// 永続層の失敗（I/O・JSON）
    #[error(transparent)]
    Store(#[from] Error),
}

impl From<CatalogError> for Error {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(_) => Error::not_found(e.to_string()),
            CatalogError::DuplicateId(_) => Error::conflict(e.to_string()),
            CatalogError::InvalidRange(_)
            | CatalogError::InvalidField(_)
            | CatalogError::InvalidDate(_, _) => Error::invalid_argument(e.to_string()),
            CatalogError::IntegrityViolation(_) => Error::integrity(e.to_string()),
            CatalogError::Store(inner) => inner,
        }
    }
}
