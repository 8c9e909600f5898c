//! 結合寄りのテスト
//!
//! メモリ FS と単調クロックを注入してストアとユースケースを通しで検証する。

mod store_tests;
