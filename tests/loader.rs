mod common;

use covset::error::CovsetError;
use covset::loader;
use covset::store::ModelStore;

#[test]
fn loads_models_from_a_coverage_directory() {
    let (_dir, coverage_dir) = common::setup_coverage_dir(common::SAMPLE);

    let models = loader::load_models(&coverage_dir).unwrap();
    assert_eq!(models.len(), 4);
    assert!(models.contains_key("/app/models/user.rb"));
}

#[test]
fn prefers_coverage_json_over_resultset_json() {
    let (_dir, coverage_dir) = common::setup_coverage_dir(common::SAMPLE);

    // Drop a second resultset under the preferred name; it should win.
    std::fs::write(
        coverage_dir.join("coverage.json"),
        br#"{"Only": {"coverage": {"/solo.rb": {"lines": [1]}}, "timestamp": 9}}"#,
    )
    .unwrap();

    let found = loader::find_resultset(&coverage_dir).unwrap();
    assert!(found.ends_with("coverage.json"));

    let models = loader::load_models(&coverage_dir).unwrap();
    assert_eq!(models.len(), 1);
    assert!(models.contains_key("/solo.rb"));
}

#[test]
fn missing_resultset_is_reported_with_the_directory() {
    let dir = tempfile::tempdir().unwrap();

    let err = loader::read_resultset(dir.path()).unwrap_err();
    match err {
        CovsetError::ResultsetNotFound(path) => assert_eq!(path, dir.path()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_json_is_a_parse_error() {
    let (_dir, coverage_dir) = common::setup_coverage_dir(b"{not valid json");

    let err = loader::read_resultset(&coverage_dir).unwrap_err();
    assert!(matches!(err, CovsetError::Json(_)));
}

#[test]
fn refresh_replaces_the_store_on_success() {
    let (_dir, coverage_dir) = common::setup_coverage_dir(common::SAMPLE);
    let store = ModelStore::new();

    let set = loader::refresh(&store, &coverage_dir).unwrap();
    assert_eq!(set.version, 1);
    assert_eq!(set.len(), 4);
    assert_eq!(store.get().version, 1);
}

#[test]
fn refresh_leaves_the_store_untouched_on_failure() {
    let (_dir, coverage_dir) = common::setup_coverage_dir(common::SAMPLE);
    let store = ModelStore::new();
    loader::refresh(&store, &coverage_dir).unwrap();

    // Corrupt the resultset; the loaded generation must survive.
    std::fs::write(coverage_dir.join(".resultset.json"), b"garbage").unwrap();
    assert!(loader::refresh(&store, &coverage_dir).is_err());

    let current = store.get();
    assert_eq!(current.version, 1);
    assert_eq!(current.len(), 4);
}

#[test]
fn malformed_branch_keys_fail_the_whole_load() {
    let (_dir, coverage_dir) = common::setup_coverage_dir(
        br#"{
            "Suite": {
                "coverage": {
                    "/f.rb": {
                        "lines": [1],
                        "branches": {"[:broken]": {"[:then, 1, 1, 0, 1, 5]": 1}}
                    }
                },
                "timestamp": 1
            }
        }"#,
    );

    let err = loader::load_models(&coverage_dir).unwrap_err();
    assert!(matches!(err, CovsetError::MalformedKey(_)));
}
