//! JSON ストアアダプタのテスト

use std::path::Path;
use std::sync::Arc;

use common::adapter::{MemFileSystem, StdFileSystem};
use common::error::Error;
use common::ports::outbound::FileSystem;
use serde_json::json;

use super::fixtures::{blue_shirt, harness, ITEMS_PATH};
use crate::adapter::JsonItemStore;
use crate::domain::{project, CatalogError, FieldPath, IndexEntry};
use crate::ports::outbound::{IndexStore, ItemStore};

#[test]
fn test_missing_file_is_empty_store() {
    let h = harness();
    assert!(h.items.all().unwrap().is_empty());
    assert!(h.index.all().unwrap().is_empty());
}

#[test]
fn test_insert_then_get() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    let item = h.items.get("i1").unwrap();
    assert_eq!(item.name, "Blue Shirt");
    assert_eq!(item.metadata.formality, Some(5));
}

#[test]
fn test_insert_duplicate_id_fails() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    assert!(matches!(
        h.items.insert(blue_shirt("i1")),
        Err(CatalogError::DuplicateId(id)) if id == "i1"
    ));
}

#[test]
fn test_get_missing_is_not_found() {
    let h = harness();
    assert!(matches!(
        h.items.get("i9"),
        Err(CatalogError::NotFound(id)) if id == "i9"
    ));
}

#[test]
fn test_remove_returns_removed_item() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    let removed = h.items.remove("i1").unwrap();
    assert_eq!(removed.id, "i1");
    assert!(matches!(h.items.get("i1"), Err(CatalogError::NotFound(_))));
    assert!(matches!(h.items.remove("i1"), Err(CatalogError::NotFound(_))));
}

#[test]
fn test_get_many_preserves_order_and_collects_missing() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    h.items.insert(blue_shirt("i2")).unwrap();
    let (found, missing) = h
        .items
        .get_many(&["i2".to_string(), "i9".to_string(), "i1".to_string()])
        .unwrap();
    assert_eq!(
        found.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
        ["i2", "i1"]
    );
    assert_eq!(missing, vec!["i9".to_string()]);
}

#[test]
fn test_update_path_sets_leaf_and_returns_old_and_new() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    let path = FieldPath::parse("metadata.formality").unwrap();
    let update = h
        .items
        .update_path("i1", &path, json!(8), "2026-01-01T00:00:00.000Z")
        .unwrap();
    assert_eq!(update.old, Some(json!(5)));
    assert_eq!(update.new, json!(8));
    assert_eq!(update.item.metadata.formality, Some(8));
}

#[test]
fn test_update_path_creates_intermediate_containers() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    // colors.accent は未設定。途中の構造ごと導入できる。
    let path = FieldPath::parse("metadata.colors.accent").unwrap();
    let update = h
        .items
        .update_path("i1", &path, json!(["red"]), "2026-01-01T00:00:00.000Z")
        .unwrap();
    assert_eq!(update.old, None);
    assert_eq!(update.item.metadata.colors.accent, vec!["red".to_string()]);
}

#[test]
fn test_update_path_stamps_last_updated() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    let path = FieldPath::parse("notes").unwrap();
    let update = h
        .items
        .update_path("i1", &path, json!("fits well"), "2026-01-01T00:00:00.000Z")
        .unwrap();
    assert_eq!(
        update.item.tracking.last_updated.as_deref(),
        Some("2026-01-01T00:00:00.000Z")
    );
}

#[test]
fn test_update_path_inside_tracking_still_stamps() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    let path = FieldPath::parse("tracking.wearCount").unwrap();
    let update = h
        .items
        .update_path("i1", &path, json!(5), "2026-01-01T00:00:00.000Z")
        .unwrap();
    assert_eq!(update.item.tracking.wear_count, Some(5));
    assert_eq!(
        update.item.tracking.last_updated.as_deref(),
        Some("2026-01-01T00:00:00.000Z")
    );
}

#[test]
fn test_update_path_rejects_value_breaking_schema() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    // formality は整数。文字列を入れようとするとスキーマ不一致で書き込み前に失敗する。
    let path = FieldPath::parse("metadata.formality").unwrap();
    let err = h
        .items
        .update_path("i1", &path, json!("very formal"), "2026-01-01T00:00:00.000Z")
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidField(_)));
    // 元のレコードは無傷
    assert_eq!(h.items.get("i1").unwrap().metadata.formality, Some(5));
}

#[test]
fn test_update_path_missing_id_aborts_without_write() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    let before = h.fs.read_to_string(Path::new(ITEMS_PATH)).unwrap();
    let path = FieldPath::parse("notes").unwrap();
    assert!(matches!(
        h.items
            .update_path("i9", &path, json!("x"), "2026-01-01T00:00:00.000Z"),
        Err(CatalogError::NotFound(_))
    ));
    assert_eq!(h.fs.read_to_string(Path::new(ITEMS_PATH)).unwrap(), before);
}

#[test]
fn test_mark_worn_increments_from_absent_count() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    let outcome = h
        .items
        .mark_worn(
            &["i1".to_string()],
            "2026-01-15T09:00:00Z",
            "2026-01-15T09:00:00.000Z",
        )
        .unwrap();
    assert_eq!(outcome.updated.len(), 1);
    assert_eq!(outcome.updated[0].wear_count, 1);
    let item = h.items.get("i1").unwrap();
    assert_eq!(item.tracking.wear_count, Some(1));
    assert_eq!(item.tracking.last_worn.as_deref(), Some("2026-01-15T09:00:00Z"));
}

#[test]
fn test_mark_worn_collects_missing_and_continues() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    h.items.insert(blue_shirt("i2")).unwrap();
    let outcome = h
        .items
        .mark_worn(
            &["i1".to_string(), "i9".to_string(), "i2".to_string()],
            "2026-01-15T09:00:00Z",
            "2026-01-15T09:00:00.000Z",
        )
        .unwrap();
    assert_eq!(outcome.updated.len(), 2);
    assert_eq!(outcome.missing, vec!["i9".to_string()]);
    assert_eq!(h.items.get("i2").unwrap().tracking.wear_count, Some(1));
}

#[test]
fn test_persisted_document_shape() {
    let h = harness();
    h.items.insert(blue_shirt("i1")).unwrap();
    let contents = h.fs.read_to_string(Path::new(ITEMS_PATH)).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(doc["items"].is_array());
    assert_eq!(doc["items"][0]["id"], "i1");
    // 整形出力（インデントあり）
    assert!(contents.contains("\n  \"items\""));
}

#[test]
fn test_corrupted_document_is_json_error() {
    let fs = Arc::new(MemFileSystem::new());
    fs.write(Path::new(ITEMS_PATH), "{not json").unwrap();
    let store = JsonItemStore::new(Arc::clone(&fs) as Arc<dyn FileSystem>, ITEMS_PATH);
    assert!(matches!(
        store.all(),
        Err(CatalogError::Store(Error::Json(_)))
    ));
}

#[test]
fn test_index_upsert_replaces_in_place() {
    let h = harness();
    let first = project(&blue_shirt("i1"));
    let second = project(&blue_shirt("i2"));
    h.index.upsert(first).unwrap();
    h.index.upsert(second).unwrap();

    let mut updated = project(&blue_shirt("i1"));
    updated.formality = 9;
    h.index.upsert(updated).unwrap();

    let all = h.index.all().unwrap();
    assert_eq!(
        all.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
        ["i1", "i2"]
    );
    assert_eq!(all[0].formality, 9);
}

#[test]
fn test_index_remove_reports_presence() {
    let h = harness();
    h.index.upsert(project(&blue_shirt("i1"))).unwrap();
    assert!(h.index.remove("i1").unwrap());
    assert!(!h.index.remove("i1").unwrap());
    assert_eq!(h.index.get("i1").unwrap(), None::<IndexEntry>);
}

#[test]
fn test_store_on_real_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wardrobe_items.json");
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let store = JsonItemStore::new(Arc::clone(&fs), &path);
    store.insert(blue_shirt("i1")).unwrap();

    // 別インスタンスで読み直しても同じレコードが見える
    let reopened = JsonItemStore::new(fs, &path);
    assert_eq!(reopened.get("i1").unwrap().name, "Blue Shirt");
}
