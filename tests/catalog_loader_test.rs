use serde_json::json;
use std::{fs, path::Path};
use tempfile::TempDir;
use tripify::{
    catalog::{load_dataset, load_festivals, Catalog, InMemoryCatalog, FESTIVAL_FOLDER},
    types::PlaceKind,
    PlannerError,
};

fn write_json(root: &Path, folder: &str, file: &str, items: serde_json::Value) {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), items.to_string()).unwrap();
}

fn dataset() -> TempDir {
    let root = TempDir::new().unwrap();
    write_json(
        root.path(),
        "관광지",
        "자연관광지.json",
        json!([
            {"id": 126081, "title": "해운대해수욕장", "address": "부산광역시 해운대구 우동",
             "latitude": "35.1587", "longitude": 129.1604, "image": "", "phone": ""},
            {"id": "126082", "title": "태종대", "address": "부산광역시 영도구 전망로 24"}
        ]),
    );
    write_json(
        root.path(),
        "음식점",
        "한식.json",
        json!([{"id": "200", "title": "돼지국밥집", "address": "부산광역시 서구"}]),
    );
    write_json(
        root.path(),
        FESTIVAL_FOLDER,
        "문화관광축제.json",
        json!([
            {"id": "300", "title": "부산불꽃축제", "address": "부산광역시 수영구",
             "eventstartdate": "20251115", "eventenddate": "20251115"},
            {"id": "301", "title": "미정 행사", "address": "부산광역시 중구"}
        ]),
    );
    fs::write(root.path().join("음식점").join("broken.json"), "[{").unwrap();
    root
}

#[tokio::test]
async fn dataset_folders_map_to_place_kinds() {
    let root = dataset();
    let mut catalog = InMemoryCatalog::new();
    let summary = load_dataset(&mut catalog, root.path(), false).unwrap();

    // 2 tourist + 1 restaurant + 2 festival places + 2 festival records
    assert_eq!(summary.created, 7);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.failed_files, 1);

    let spots = catalog
        .find_places("부산", PlaceKind::Tourist, 15)
        .await
        .unwrap();
    assert_eq!(spots.len(), 2);
    assert_eq!(spots[0].content_id, "126081");
    assert_eq!(spots[0].category, "자연관광지");
    assert_eq!(spots[0].region, "부산광역시");
    assert_eq!(spots[0].latitude, Some(35.1587));

    let festivals = catalog.find_festivals("부산", 11, 5).await.unwrap();
    assert_eq!(festivals.len(), 1);
    assert_eq!(festivals[0].title, "부산불꽃축제");
    assert!(catalog.find_festivals("부산", 10, 5).await.unwrap().is_empty());
}

#[test]
fn reloading_skips_known_ids_unless_cleared() {
    let root = dataset();
    let mut catalog = InMemoryCatalog::new();
    load_dataset(&mut catalog, root.path(), false).unwrap();

    let again = load_dataset(&mut catalog, root.path(), false).unwrap();
    assert_eq!(again.created, 0);
    assert_eq!(again.skipped, 7);

    let cleared = load_dataset(&mut catalog, root.path(), true).unwrap();
    assert_eq!(cleared.created, 7);
    assert_eq!(catalog.place_count(), 5);
    assert_eq!(catalog.festival_count(), 2);
}

#[test]
fn missing_festival_folder_is_not_an_error() {
    let root = TempDir::new().unwrap();
    let mut catalog = InMemoryCatalog::new();

    let summary = load_festivals(&mut catalog, root.path()).unwrap();
    assert_eq!(summary.created, 0);
}

#[test]
fn missing_dataset_root_is_a_catalog_error() {
    let root = TempDir::new().unwrap();
    let mut catalog = InMemoryCatalog::new();

    let err = load_dataset(&mut catalog, &root.path().join("nope"), false).unwrap_err();
    assert!(matches!(err, PlannerError::Catalog(_)));
}
