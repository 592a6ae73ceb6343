use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "showcase_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn entry(source: &str, path: &str) -> IndexEntry {
    IndexEntry {
        source: source.to_owned(),
        path: PathBuf::from(path),
        content_hash: "00".to_owned(),
        fetched_at_unix: 1,
    }
}

#[test]
fn save_then_load_preserves_order_and_duplicates() {
    let tmp = temp_dir("index_roundtrip");
    let path = tmp.join("nested").join("index.json");

    let mut index = IconIndex::default();
    index.push(entry("https://a/linux.svg", "icons/linux.png"));
    index.push(entry("https://a/rust.svg", "icons/rust.png"));
    index.push(entry("https://a/linux.svg", "icons/linux.png"));
    index.save(&path).unwrap();

    let loaded = IconIndex::load(&path).unwrap().unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(
        loaded.paths(),
        vec![
            PathBuf::from("icons/linux.png"),
            PathBuf::from("icons/rust.png"),
            PathBuf::from("icons/linux.png"),
        ]
    );

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_file_is_none() {
    let tmp = temp_dir("index_missing");
    assert!(IconIndex::load(&tmp.join("index.json")).unwrap().is_none());
}

#[test]
fn corrupt_or_foreign_version_is_an_error() {
    let tmp = temp_dir("index_corrupt");
    std::fs::create_dir_all(&tmp).unwrap();

    let path = tmp.join("index.json");
    std::fs::write(&path, "./icons/a.png\n./icons/b.png").unwrap();
    assert!(matches!(
        IconIndex::load(&path),
        Err(ShowcaseError::Serde(_))
    ));

    std::fs::write(&path, r#"{"version": 99, "entries": []}"#).unwrap();
    assert!(matches!(
        IconIndex::load(&path),
        Err(ShowcaseError::Validation(_))
    ));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn default_index_is_empty_current_version() {
    let index = IconIndex::default();
    assert!(index.is_empty());
    assert_eq!(index.version, IconIndex::VERSION);
}
