use std::fs;
use std::path::PathBuf;

use humidor_report::{Command, FilterArgs, SnapshotArgs, AutofillArgs, execute};
use humidor_inventory::Dimension;

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("fixture should be written");
    path
}

const SNAPSHOT: &str = r#"[
    {"name": "Padron 1964", "country": "Nicaragua", "wrapper": "Maduro", "strength": "Full", "quantity": 3, "price": 18.5, "brand": "Padron"},
    {"name": "Montecristo No. 2", "country": "cuba", "wrapper": "Colorado", "strength": "Medium", "quantity": "3", "price": 25, "brand": "Montecristo"},
    {"name": "Mystery stick", "wrapper": "", "strength": "Spicy", "quantity": -5, "price": "n/a"},
    {"name": "Toscano", "country": "Italy", "wrapper": "Kentucky", "quantity": 2}
]"#;

#[test]
fn browse_reports_views_and_totals() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let snapshot = write(&dir, "inventory.json", SNAPSHOT);

    let report = execute(&Command::Browse(SnapshotArgs { snapshot })).unwrap();

    assert_eq!(report["summary"]["totalUnits"], 8);
    assert_eq!(report["summary"]["totalValue"], 130.5);
    assert_eq!(report["summary"]["itemCount"], 4);
    assert_eq!(report["topCountry"], "Nicaragua");

    let countries: Vec<(&str, u64)> = report["country"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| (b["label"].as_str().unwrap(), b["quantity"].as_u64().unwrap()))
        .collect();
    assert_eq!(
        countries,
        vec![("Cuba", 3), ("Nicaragua", 3), ("Other Countries", 2)]
    );

    let strengths = report["strength"].as_array().unwrap();
    assert_eq!(strengths.len(), 2);
    assert_eq!(strengths[0]["label"], "Medium");

    let wrappers: Vec<&str> = report["wrapper"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["label"].as_str().unwrap())
        .collect();
    assert_eq!(wrappers, vec!["Colorado", "Kentucky", "Maduro"]);
}

#[test]
fn filter_lists_other_countries() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let snapshot = write(&dir, "inventory.json", SNAPSHOT);

    let report = execute(&Command::Filter(FilterArgs {
        snapshot,
        dimension: Dimension::Country,
        value: "Other".to_string(),
    }))
    .unwrap();

    assert_eq!(report["count"], 2);
    assert_eq!(report["dimension"], "country");
}

#[test]
fn autofill_merges_captured_response() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let draft = write(&dir, "draft.json", r#"{"name": "Foo", "brand": ""}"#);
    let candidate = write(
        &dir,
        "candidate.json",
        r#"{"brand": "Padrón", "name": "Bar", "price": 12}"#,
    );

    let report = execute(&Command::Autofill(AutofillArgs {
        draft,
        candidate,
        name: None,
    }))
    .unwrap();

    assert_eq!(report["status"], "filled");
    assert_eq!(report["changedFields"], serde_json::json!(["brand"]));
    assert_eq!(report["draft"], serde_json::json!({"name": "Foo", "brand": "Padrón"}));
    assert_eq!(report["message"], "Auto-filled: brand");
}

#[test]
fn autofill_with_missing_response_is_not_found() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let draft = write(&dir, "draft.json", r#"{"name": "Foo"}"#);

    let report = execute(&Command::Autofill(AutofillArgs {
        draft,
        candidate: dir.path().join("missing.json"),
        name: None,
    }))
    .unwrap();

    assert_eq!(report["status"], "not_found");
}

#[test]
fn missing_snapshot_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let err = execute(&Command::Browse(SnapshotArgs {
        snapshot: dir.path().join("nope.json"),
    }))
    .unwrap_err();
    assert!(err.to_string().contains("failed to read snapshot"));
}

#[test]
fn browse_survives_bad_historical_records() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let snapshot = write(
        &dir,
        "inventory.json",
        r#"[
            {"id": "x7Hk2aBcD9", "name": "Opus X", "country": 42, "quantity": 2},
            "not a record",
            {"id": "legacy-17", "name": "Padron 1964", "country": "Nicaragua", "quantity": 3}
        ]"#,
    );

    let report = execute(&Command::Browse(SnapshotArgs { snapshot })).unwrap();

    assert_eq!(report["summary"]["itemCount"], 2);
    assert_eq!(report["summary"]["totalUnits"], 5);
    assert_eq!(report["topCountry"], "Nicaragua");
}

#[test]
fn autofill_keeps_draft_fields_of_other_shapes() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let draft = write(
        &dir,
        "draft.json",
        r#"{"name": "Foo", "brand": "", "favorite": true, "meta": {"source": "scan"}}"#,
    );
    let candidate = write(&dir, "candidate.json", r#"{"brand": "Padrón"}"#);

    let report = execute(&Command::Autofill(AutofillArgs {
        draft,
        candidate,
        name: None,
    }))
    .unwrap();

    assert_eq!(report["status"], "filled");
    assert_eq!(report["draft"]["favorite"], true);
    assert_eq!(report["draft"]["meta"]["source"], "scan");
    assert_eq!(report["draft"]["brand"], "Padrón");
}
