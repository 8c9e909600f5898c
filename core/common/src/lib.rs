//! closet 共通ライブラリ
//!
//! `closet` コマンドと周辺ツールで共有される機能を提供します。

/// エラーハンドリング
pub mod error;

/// Outbound ポート（FS・時刻・ログ）
pub mod ports;

/// 標準アダプタとテスト用アダプタ
pub mod adapter;
