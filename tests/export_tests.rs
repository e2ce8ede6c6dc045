use predicates::str::contains;
use std::fs;

mod common;
use common::{bkl, init_db, init_db_with_data, setup_test_db, temp_out};

#[test]
fn test_export_csv_has_decoded_columns() {
    let db_path = setup_test_db("export_csv");
    init_db_with_data(&db_path);
    let out = temp_out("export_csv", "csv");

    bkl()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2025-04",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert!(headers.iter().any(|h| h == "booking_date"));
    assert!(headers.iter().any(|h| h == "filled_by"));

    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 4);

    let boat = headers.iter().position(|h| h == "boat").unwrap();
    assert!(rows.iter().any(|r| &r[boat] == "G23"));
}

#[test]
fn test_export_json_applies_filters() {
    let db_path = setup_test_db("export_json");
    init_db_with_data(&db_path);
    let out = temp_out("export_json", "json");

    bkl()
        .args([
            "--db",
            &db_path,
            "export",
            "--format",
            "json",
            "--file",
            &out,
            "--date",
            "04/05",
        ])
        .assert()
        .success();

    let rows: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["member"], "John");
    assert_eq!(rows[0]["filled_by"], "Amy");
    assert_eq!(rows[0]["coach"], "Bob");
}

#[test]
fn test_export_nothing_to_write() {
    let db_path = setup_test_db("export_empty");
    init_db(&db_path);
    let out = temp_out("export_empty", "csv");

    bkl()
        .args(["--db", &db_path, "export", "--file", &out])
        .assert()
        .success();

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_force_overwrites() {
    let db_path = setup_test_db("export_force");
    init_db_with_data(&db_path);
    let out = temp_out("export_force", "csv");
    fs::write(&out, "stale").unwrap();

    bkl()
        .args(["--db", &db_path, "export", "--file", &out, "--force", "--op", "update"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("id,"));
    assert!(content.contains("時長→90分鐘"));
}
