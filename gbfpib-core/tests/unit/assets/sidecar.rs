use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "gbfpib_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[derive(Debug, PartialEq, serde::Deserialize)]
struct Note {
    text: String,
}

#[tokio::test]
async fn store_then_load_from_disk() {
    let tmp = temp_dir("sidecar_roundtrip");
    let store = SideStore::<Note>::new("note", &tmp);
    let raw = serde_json::json!({"text": "hello", "extra": 1});
    store.store("42", &raw).await.unwrap();
    assert!(tmp.join("42.json").exists());

    let fresh = SideStore::<Note>::new("note", &tmp);
    assert!(fresh.get("42").is_none());
    let loaded = fresh.load("42").await.unwrap();
    assert_eq!(loaded.text, "hello");
    assert_eq!(fresh.len(), 1);

    // written raw, unknown fields kept
    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(tmp.join("42.json")).unwrap()).unwrap();
    assert_eq!(on_disk, raw);

    std::fs::remove_dir_all(&tmp).ok();
}

#[tokio::test]
async fn missing_and_malformed_records_are_none() {
    let tmp = temp_dir("sidecar_malformed");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("bad.json"), b"{not json").unwrap();

    let store = SideStore::<Note>::new("note", &tmp);
    assert!(store.load("absent").await.is_none());
    assert!(store.load("bad").await.is_none());
    assert!(store.is_empty());

    std::fs::remove_dir_all(&tmp).ok();
}

#[tokio::test]
async fn store_rejects_unparseable_record() {
    let tmp = temp_dir("sidecar_reject");
    let store = SideStore::<Note>::new("note", &tmp);
    assert!(store.store("1", &serde_json::json!({"nope": 1})).await.is_err());
    assert!(!tmp.join("1.json").exists());
    std::fs::remove_dir_all(&tmp).ok();
}

#[tokio::test]
async fn trim_clears_past_limit() {
    let tmp = temp_dir("sidecar_trim");
    let store = SideStore::<Note>::new("note", &tmp);
    for id in ["a", "b", "c"] {
        store
            .store(id, &serde_json::json!({"text": id}))
            .await
            .unwrap();
    }
    store.trim(3);
    assert_eq!(store.len(), 3);
    store.trim(2);
    assert!(store.is_empty());
    // still on disk
    assert!(store.load("b").await.is_some());
    std::fs::remove_dir_all(&tmp).ok();
}
