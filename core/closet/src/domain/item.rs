//! ワードローブアイテムのドメイン型
//!
//! 永続 JSON（wardrobe_items.json）の 1 レコードと同一形式で読み書きする。
//! 未知のフィールドは各階層の flatten マップに保持し、読み書きの往復で
//! 落とさない（元データには brand などスキーマ外のキーが混在する）。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// アイテム本体（フル詳細レコード）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Context::is_empty")]
    pub context: Context,
    #[serde(default, skip_serializing_if = "Tracking::is_empty")]
    pub tracking: Tracking,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// metadata ブロック（色・素材・フォーマル度など）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Colors::is_empty")]
    pub colors: Colors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<String>,
    /// 0〜10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formality: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.material.is_none()
            && self.fit.is_none()
            && self.formality.is_none()
            && self.patterns.is_empty()
            && self.style.is_empty()
            && self.extra.is_empty()
    }
}

/// 色（primary は単一、secondary / accent は複数）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Colors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accent: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Colors {
    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
            && self.secondary.is_empty()
            && self.accent.is_empty()
            && self.extra.is_empty()
    }
}

/// context ブロック（季節・場面）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Context {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub occasions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Context {
    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty() && self.occasions.is_empty() && self.extra.is_empty()
    }
}

/// tracking ブロック（着用回数・最終着用・最終更新）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracking {
    /// 欠損は 0 として扱う
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wear_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_worn: Option<String>,
    /// 変更のたびに打刻される ISO 8601 文字列
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tracking {
    pub fn is_empty(&self) -> bool {
        self.wear_count.is_none()
            && self.last_worn.is_none()
            && self.last_updated.is_none()
            && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_item() {
        let item: Item = serde_json::from_str(r#"{"id": "i1"}"#).unwrap();
        assert_eq!(item.id, "i1");
        assert_eq!(item.name, "");
        assert!(item.metadata.is_empty());
        assert!(item.tracking.wear_count.is_none());
    }

    #[test]
    fn test_camel_case_field_names() {
        let item: Item = serde_json::from_str(
            r#"{
                "id": "i1",
                "type": "tops",
                "imagePath": "images/i1.jpg",
                "tracking": {"wearCount": 3, "lastWorn": "2026-01-01T00:00:00.000Z"}
            }"#,
        )
        .unwrap();
        assert_eq!(item.item_type, "tops");
        assert_eq!(item.image_path.as_deref(), Some("images/i1.jpg"));
        assert_eq!(item.tracking.wear_count, Some(3));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "tops");
        assert_eq!(json["imagePath"], "images/i1.jpg");
        assert_eq!(json["tracking"]["wearCount"], 3);
    }

    #[test]
    fn test_unknown_fields_survive_roundtrip() {
        let raw = r#"{"id": "i1", "brand": "Acme", "metadata": {"weight": "light"}}"#;
        let item: Item = serde_json::from_str(raw).unwrap();
        assert_eq!(item.extra["brand"], "Acme");
        assert_eq!(item.metadata.extra["weight"], "light");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["brand"], "Acme");
        assert_eq!(json["metadata"]["weight"], "light");
    }

    #[test]
    fn test_empty_containers_not_serialized() {
        let item = Item {
            id: "i1".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&item).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("metadata"));
        assert!(!obj.contains_key("tracking"));
        assert!(!obj.contains_key("tags"));
    }
}
