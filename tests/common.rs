#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;
use wfhtracker::db::WorkLogStore;

pub fn wfh() -> Command {
    let mut cmd = cargo_bin_cmd!("wfhtracker");
    cmd.env_remove("SQLITE_DB_PATH")
        .env_remove("OFFICE_WIFI_SSID")
        .env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_wfhtracker.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Path of a config file for the test; `content` is written when given.
pub fn setup_test_config(name: &str, content: Option<&str>) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_wfhtracker.conf", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    if let Some(c) = content {
        fs::write(&p, c).expect("write config");
    }
    p
}

/// Store with schema in a fresh temp dir; keep the TempDir alive.
pub fn temp_store() -> (tempfile::TempDir, WorkLogStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = WorkLogStore::new(dir.path().join("work_log.sqlite"));
    store.init_schema().expect("init schema");
    (dir, store)
}
