//! データディレクトリの解決
//!
//! ストアの置き場所はここで一度だけ解決し、各アダプタには
//! コンストラクタ引数として渡す。

use std::path::{Path, PathBuf};

const ITEMS_FILENAME: &str = "wardrobe_items.json";
const INDEX_FILENAME: &str = "wardrobe_index.json";
const LOG_FILENAME: &str = "closet.log.jsonl";
const DATA_ENV: &str = "CLOSET_DATA";
const DEFAULT_DIR: &str = "data/wardrobe";

/// データディレクトリと各ファイルのパス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    dir: PathBuf,
}

impl DataPaths {
    /// 解決順: `--data-dir` フラグ > `CLOSET_DATA` 環境変数 > `./data/wardrobe`
    pub fn resolve(flag: Option<&str>) -> Self {
        let dir = flag
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var(DATA_ENV)
                    .ok()
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn items_file(&self) -> PathBuf {
        self.dir.join(ITEMS_FILENAME)
    }

    pub fn index_file(&self) -> PathBuf {
        self.dir.join(INDEX_FILENAME)
    }

    pub fn log_file(&self) -> PathBuf {
        self.dir.join(LOG_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        let paths = DataPaths::resolve(Some("/tmp/wardrobe"));
        assert_eq!(paths.dir(), Path::new("/tmp/wardrobe"));
        assert_eq!(
            paths.items_file(),
            Path::new("/tmp/wardrobe/wardrobe_items.json")
        );
        assert_eq!(
            paths.index_file(),
            Path::new("/tmp/wardrobe/wardrobe_index.json")
        );
    }

    #[test]
    fn test_default_dir() {
        // 環境変数に依存しないよう、フラグなしの場合の既定値のみ確認する
        if std::env::var(DATA_ENV).is_err() {
            let paths = DataPaths::resolve(None);
            assert_eq!(paths.dir(), Path::new("data/wardrobe"));
        }
    }
}
