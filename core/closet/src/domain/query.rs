//! クエリ条件（省略可能な述語の AND 結合）

use super::error::CatalogError;
use super::index::IndexEntry;

/// フォーマル度の閉区間。`"6"` は `[6,6]`、`"5-7"` は `[5,7]`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormalityRange {
    pub min: i64,
    pub max: i64,
}

impl FormalityRange {
    /// レンジ文字列を解析する。数値でない・上限 < 下限 は InvalidRange。
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        let bound = |s: &str| {
            s.trim()
                .parse::<i64>()
                .map_err(|_| CatalogError::InvalidRange(raw.to_string()))
        };
        if let Some((lo, hi)) = raw.split_once('-') {
            let min = bound(lo)?;
            let max = bound(hi)?;
            if max < min {
                return Err(CatalogError::InvalidRange(raw.to_string()));
            }
            Ok(Self { min, max })
        } else {
            let v = bound(raw)?;
            Ok(Self { min: v, max: v })
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// クエリ述語の組。None の述語は制約を課さない。
///
/// `ids` は候補集合の絞り込みとして先に適用される（QueryUseCase 参照）。
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    /// type の完全一致（大文字小文字無視）
    pub item_type: Option<String>,
    /// category の完全一致（大文字小文字無視）
    pub category: Option<String>,
    /// primaryColor の部分一致（大文字小文字無視）
    pub color: Option<String>,
    /// formality の閉区間
    pub formality: Option<FormalityRange>,
    /// seasons の所属判定（大文字小文字無視）
    pub season: Option<String>,
    /// tags の所属判定（大文字小文字無視）
    pub tag: Option<String>,
    /// 候補 ID の明示集合
    pub ids: Option<Vec<String>>,
}

impl QueryFilter {
    /// ids 以外の述語を AND で評価する。副作用なし。
    pub fn matches(&self, entry: &IndexEntry) -> bool {
        if let Some(t) = &self.item_type {
            if !entry.item_type.eq_ignore_ascii_case(t) {
                return false;
            }
        }
        if let Some(c) = &self.category {
            if !entry.category.eq_ignore_ascii_case(c) {
                return false;
            }
        }
        if let Some(c) = &self.color {
            if !entry
                .primary_color
                .to_lowercase()
                .contains(&c.to_lowercase())
            {
                return false;
            }
        }
        if let Some(range) = &self.formality {
            if !range.contains(entry.formality) {
                return false;
            }
        }
        if let Some(season) = &self.season {
            if !entry.seasons.iter().any(|s| s.eq_ignore_ascii_case(season)) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !entry.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }
        true
    }
}
