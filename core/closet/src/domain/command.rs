//! closet コマンドの enum（Command Pattern）
//!
//! 引数解析の結果を enum に落とし、match でディスパッチする。

/// query の出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryFormat {
    #[default]
    Json,
    Summary,
    Ids,
}

impl QueryFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "json" => Some(QueryFormat::Json),
            "summary" => Some(QueryFormat::Summary),
            "ids" => Some(QueryFormat::Ids),
            _ => None,
        }
    }
}

/// show の出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailFormat {
    #[default]
    Json,
    Summary,
    Compact,
}

impl DetailFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "json" => Some(DetailFormat::Json),
            "summary" => Some(DetailFormat::Summary),
            "compact" => Some(DetailFormat::Compact),
            _ => None,
        }
    }
}

/// query コマンドの生パラメータ（formality は文字列のまま保持し、
/// フィルタ実行の直前に解析してフェイルファストさせる）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    pub item_type: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub formality: Option<String>,
    pub season: Option<String>,
    pub tag: Option<String>,
    pub ids: Vec<String>,
    /// フィルタなしで全件返す
    pub all: bool,
    /// マッチした ID のフル詳細を取得する（hydration）
    pub detailed: bool,
    pub format: QueryFormat,
}

/// closet のサブコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// ヘルプ表示
    Help,

    /// インデックスに対するフィルタ検索
    Query(QueryRequest),

    /// ID 指定のフル詳細取得
    Show {
        ids: Vec<String>,
        format: DetailFormat,
    },

    /// ドットパス指定のフィールド更新
    Update {
        id: String,
        field: String,
        value: String,
    },

    /// アイテム削除（両ストアから）
    Remove { id: String },

    /// 着用記録（wearCount++ / lastWorn 設定）
    MarkWorn {
        ids: Vec<String>,
        date: Option<String>,
    },

    /// 両ストアの整合性検査
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_format_parse() {
        assert_eq!(QueryFormat::parse("json"), Some(QueryFormat::Json));
        assert_eq!(QueryFormat::parse("summary"), Some(QueryFormat::Summary));
        assert_eq!(QueryFormat::parse("ids"), Some(QueryFormat::Ids));
        assert_eq!(QueryFormat::parse("compact"), None);
    }

    #[test]
    fn test_detail_format_parse() {
        assert_eq!(DetailFormat::parse("compact"), Some(DetailFormat::Compact));
        assert_eq!(DetailFormat::parse("ids"), None);
    }

    #[test]
    fn test_query_request_default_is_unfiltered_json() {
        let req = QueryRequest::default();
        assert_eq!(req.format, QueryFormat::Json);
        assert!(!req.all);
        assert!(!req.detailed);
        assert!(req.ids.is_empty());
    }
}
