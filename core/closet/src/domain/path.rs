//! ドット記法フィールドパスと値の型推測
//!
//! パース済みパスが部分更新の唯一の入口。文字列パスの解釈は CLI 境界の
//! ここに閉じ、ストア側はパース済みの `FieldPath` だけを受け取る。

use serde_json::{Map, Value};
use std::fmt;

use super::error::CatalogError;

/// インデックスに投影されるトップレベルキー
const INDEXED_TOP_LEVEL: [&str; 6] = ["name", "type", "category", "formality", "seasons", "tags"];

/// ドット区切りフィールドパス（例: `metadata.colors.primary`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// 文字列をパスに解析する。空文字・空セグメントは不正。
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        if raw.is_empty() {
            return Err(CatalogError::InvalidField("empty field path".to_string()));
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(CatalogError::InvalidField(format!(
                "empty segment in field path '{}'",
                raw
            )));
        }
        if segments[0] == "id" {
            return Err(CatalogError::InvalidField(
                "'id' is immutable and cannot be updated".to_string(),
            ));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// このパスへの更新がインデックスの再投影を要するか。
    ///
    /// 対象: トップレベルの name / type / category / formality / seasons / tags、
    /// および metadata.formality と metadata.colors.primary（とその配下）。
    pub fn affects_index(&self) -> bool {
        let first = self.segments[0].as_str();
        if INDEXED_TOP_LEVEL.contains(&first) {
            return true;
        }
        if first == "metadata" {
            match self.segments.get(1).map(String::as_str) {
                Some("formality") => return true,
                Some("colors") => {
                    return self.segments.get(2).map(String::as_str) == Some("primary")
                }
                _ => {}
            }
        }
        false
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// パスの葉へ値を設定し、旧値を返す。
///
/// 途中のセグメントが欠損していれば空オブジェクトを作って降りる
/// （未設定の入れ子構造を後から導入できる）。既存の非オブジェクト値を
/// 経由するパスはエラー。
pub fn set_path(
    root: &mut Map<String, Value>,
    path: &FieldPath,
    value: Value,
) -> Result<Option<Value>, CatalogError> {
    let (leaf, parents) = path
        .segments()
        .split_last()
        .expect("FieldPath::parse rejects empty paths");
    let mut current = root;
    for seg in parents {
        let slot = current
            .entry(seg.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        current = slot.as_object_mut().ok_or_else(|| {
            CatalogError::InvalidField(format!("'{}' in path '{}' is not an object", seg, path))
        })?;
    }
    Ok(current.insert(leaf.clone(), value))
}

/// CLI からの文字列入力の型推測: 整数 → 浮動小数 → 真偽値 → 文字列。
///
/// 型付きの値を渡すプログラム呼び出しには適用しない。
pub fn coerce_value(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::from(f);
    }
    match raw.to_ascii_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_single_and_nested() {
        assert_eq!(FieldPath::parse("notes").unwrap().segments(), ["notes"]);
        assert_eq!(
            FieldPath::parse("metadata.colors.primary").unwrap().segments(),
            ["metadata", "colors", "primary"]
        );
    }

    #[test]
    fn test_parse_rejects_empty_and_id() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("metadata..primary").is_err());
        assert!(FieldPath::parse(".notes").is_err());
        assert!(matches!(
            FieldPath::parse("id"),
            Err(CatalogError::InvalidField(_))
        ));
    }

    #[test]
    fn test_affects_index_top_level() {
        for field in ["name", "type", "category", "formality", "seasons", "tags"] {
            assert!(FieldPath::parse(field).unwrap().affects_index(), "{}", field);
        }
        assert!(!FieldPath::parse("notes").unwrap().affects_index());
        assert!(!FieldPath::parse("imagePath").unwrap().affects_index());
    }

    #[test]
    fn test_affects_index_nested_metadata() {
        assert!(FieldPath::parse("metadata.formality").unwrap().affects_index());
        assert!(FieldPath::parse("metadata.colors.primary")
            .unwrap()
            .affects_index());
        assert!(!FieldPath::parse("metadata.material").unwrap().affects_index());
        assert!(!FieldPath::parse("metadata.colors.accent")
            .unwrap()
            .affects_index());
        assert!(!FieldPath::parse("metadata.colors").unwrap().affects_index());
    }

    #[test]
    fn test_tracking_paths_do_not_affect_index() {
        assert!(!FieldPath::parse("tracking.wearCount").unwrap().affects_index());
        assert!(!FieldPath::parse("tracking.lastWorn").unwrap().affects_index());
    }

    #[test]
    fn test_set_path_existing_leaf_returns_old() {
        let mut root = json!({"name": "Old"}).as_object().unwrap().clone();
        let path = FieldPath::parse("name").unwrap();
        let old = set_path(&mut root, &path, json!("New")).unwrap();
        assert_eq!(old, Some(json!("Old")));
        assert_eq!(root["name"], "New");
    }

    #[test]
    fn test_set_path_creates_intermediate_objects() {
        let mut root = Map::new();
        let path = FieldPath::parse("metadata.colors.primary").unwrap();
        let old = set_path(&mut root, &path, json!("navy")).unwrap();
        assert_eq!(old, None);
        assert_eq!(root["metadata"]["colors"]["primary"], "navy");
    }

    #[test]
    fn test_set_path_through_scalar_fails() {
        let mut root = json!({"notes": "plain"}).as_object().unwrap().clone();
        let path = FieldPath::parse("notes.inner").unwrap();
        assert!(matches!(
            set_path(&mut root, &path, json!(1)),
            Err(CatalogError::InvalidField(_))
        ));
    }

    #[test]
    fn test_coerce_value_order() {
        assert_eq!(coerce_value("7"), json!(7));
        assert_eq!(coerce_value("7.5"), json!(7.5));
        assert_eq!(coerce_value("TRUE"), json!(true));
        assert_eq!(coerce_value("False"), json!(false));
        assert_eq!(coerce_value("navy"), json!("navy"));
        assert_eq!(coerce_value("-3"), json!(-3));
    }
}
