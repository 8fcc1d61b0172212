use soundboard::catalog::Catalog;
use soundboard_test_utils::init_tracing;

#[test]
fn missing_file_yields_an_empty_catalog() {
    init_tracing();

    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = Catalog::load(&dir.path().join("data.json")).expect("load");
    assert!(catalog.is_empty());
}

#[test]
fn malformed_file_is_an_error() {
    init_tracing();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.json");
    std::fs::write(&path, "this is not json").expect("write fixture");

    assert!(Catalog::load(&path).is_err());
}

#[test]
fn assignments_survive_a_save_and_load() {
    init_tracing();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.json");

    let mut catalog = Catalog::default();
    catalog.assign('a', "horn.mp3");
    catalog.assign('b', "https://example.com/drum.mp3");
    catalog.save(&path).expect("save");

    let reloaded = Catalog::load(&path).expect("load");
    assert_eq!(reloaded.get('a'), Some("horn.mp3"));
    assert_eq!(reloaded.get('b'), Some("https://example.com/drum.mp3"));
    assert_eq!(reloaded.len(), 2);
}

#[test]
fn keys_can_be_reassigned_and_removed() {
    init_tracing();

    let mut catalog = Catalog::default();
    catalog.assign('a', "old.mp3");
    catalog.assign('a', "new.mp3");
    assert_eq!(catalog.get('a'), Some("new.mp3"));
    assert_eq!(catalog.len(), 1);

    assert_eq!(catalog.remove('a'), Some("new.mp3".to_string()));
    assert_eq!(catalog.remove('a'), None);
    assert!(catalog.is_empty());
}

#[test]
fn entries_come_back_in_key_order() {
    init_tracing();

    let mut catalog = Catalog::default();
    catalog.assign('c', "3.mp3");
    catalog.assign('a', "1.mp3");
    catalog.assign('b', "2.mp3");

    let keys: Vec<&str> = catalog.entries().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}
