use std::fs;

use soundboard::search::{fuzzy_match, search_local, search_remote};
use soundboard_test_utils::init_tracing;

#[test]
fn fuzzy_match_accepts_ordered_subsequences() {
    assert!(fuzzy_match("horn", "sounds/airhorn.mp3"));
    assert!(fuzzy_match("hrn", "horn.mp3"));
    assert!(fuzzy_match("", "anything"));
    assert!(!fuzzy_match("nrh", "horn.mp3"), "order matters");
    assert!(!fuzzy_match("hornx", "horn.mp3"));
}

#[test]
fn local_search_walks_for_matching_mp3_files() {
    init_tracing();

    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("clips");
    fs::create_dir(&nested).expect("mkdir");
    fs::write(dir.path().join("airhorn.mp3"), b"").expect("write");
    fs::write(nested.join("foghorn.mp3"), b"").expect("write");
    fs::write(nested.join("horn.txt"), b"").expect("write");
    fs::write(dir.path().join("drum.mp3"), b"").expect("write");

    let mut hits = search_local(dir.path(), "horn");
    hits.sort();
    let names: Vec<String> = hits
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    assert_eq!(names, vec!["airhorn.mp3", "foghorn.mp3"]);
}

#[test]
fn empty_query_matches_nothing() {
    init_tracing();

    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("clip.mp3"), b"").expect("write");

    assert!(search_local(dir.path(), "").is_empty());
}

#[tokio::test]
async fn short_remote_queries_skip_the_network() {
    init_tracing();

    // Two characters is below the API minimum; this must return empty
    // without attempting a request.
    let client = reqwest::Client::new();
    let hits = search_remote(&client, "ab").await.expect("short query");
    assert!(hits.is_empty());
}
