#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn bkl() -> Command {
    let mut cmd = cargo_bin_cmd!("bookinglog");
    // keep RUST_LOG from the outer test run out of --debug assertions
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_bookinglog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_bookinglog_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    bkl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn record(db_path: &str, at: &str, action: &str, domain: &str, details: &str) {
    bkl()
        .args([
            "--db",
            db_path,
            "record",
            details,
            "--action",
            action,
            "--domain",
            domain,
            "--actor",
            "desk@example.com",
            "--at",
            at,
        ])
        .assert()
        .success();
}

/// Initialize DB and add a small dataset on 2025-04-02 and 2025-04-03
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    record(
        db_path,
        "2025-04-02 10:00",
        "create",
        "bookings",
        "新增預約：04/05 09:00 G21 John | Bob教練 [WS] (填表人: Amy)",
    );
    record(
        db_path,
        "2025-04-03 09:15",
        "create",
        "bookings",
        "新增預約：04/03 08:30 G23 Ming | Papa教練 [WB+WS] [課堂人：L]",
    );
    record(
        db_path,
        "2025-04-03 11:40",
        "update",
        "bookings",
        "批次修改 8 筆：時長→90分鐘 [Ming (04/03 08:30), John (04/03 09:00) 等8筆]",
    );
    record(
        db_path,
        "2025-04-03 12:00",
        "create",
        "coach_assignment",
        "排班：Papa教練 04/03 全天",
    );
}
