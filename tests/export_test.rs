//! JSON出力の統合テスト

use course_scorer::export::{export_results, json};
use course_scorer_common::{MatchRecord, PatternId};
use tempfile::tempdir;

fn create_test_record(index: usize) -> MatchRecord {
    MatchRecord {
        id: format!("LBIR{}", 1000 + index),
        field: "content".to_string(),
        pattern: if index % 2 == 0 {
            PatternId::Int(index as i64)
        } else {
            PatternId::Text(format!("SDG{}", index))
        },
        sub_pattern: r"circular\s+economy".to_string(),
        start: index * 10,
        end: index * 10 + 16,
        extract: "the circular economy".to_string(),
    }
}

#[test]
fn test_export_creates_output_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("data").join("scorer-output").join("uclouvain_2023.json");

    let records: Vec<MatchRecord> = (1..=3).map(create_test_record).collect();
    let summary = export_results(&records, &output).expect("出力に失敗");

    assert!(output.exists(), "JSONファイルが作成されていない");
    assert_eq!(summary.records, 3);
    assert_eq!(summary.path, output);
    // 一時ファイルは残らない
    assert!(!output.with_extension("json.partial").exists());
}

#[test]
fn test_export_record_schema() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out.json");

    let records: Vec<MatchRecord> = (1..=2).map(create_test_record).collect();
    export_results(&records, &output).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let first = value[0].as_object().unwrap();

    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["end", "extract", "field", "id", "pattern", "start", "sub_pattern"]);
    assert_eq!(value[0]["pattern"], serde_json::json!("SDG1"));
    assert_eq!(value[1]["pattern"], serde_json::json!(2));
}

#[test]
fn test_export_empty_results() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("empty.json");

    let summary = export_results(&[], &output).unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "[]");
    assert_eq!(summary.digest, json::digest(b"[]"));
}

#[test]
fn test_export_overwrites_previous_run() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out.json");

    export_results(&[create_test_record(1)], &output).unwrap();
    let summary = export_results(&[], &output).unwrap();

    assert_eq!(summary.records, 0);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "[]");
}
