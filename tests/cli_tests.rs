use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{setup_test_config, setup_test_db, wfh};

fn init(db_path: &str, conf: &str) {
    wfh()
        .args(["--db", db_path, "--config", conf, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");
    let conf = setup_test_config("init", None);

    init(&db_path, &conf);

    assert!(std::path::Path::new(&db_path).exists());
    // test mode never writes the config file
    assert!(!std::path::Path::new(&conf).exists());
}

#[test]
fn test_set_and_summary_month() {
    let db_path = setup_test_db("set_summary");
    let conf = setup_test_config("set_summary", None);
    init(&db_path, &conf);

    for (date, action) in [
        ("2024-03-01", "wfh"),
        ("2024-03-05", "office"),
        ("2024-03-10", "home"),
    ] {
        wfh()
            .args(["--db", &db_path, "--config", &conf, "set", action, "--date", date])
            .assert()
            .success()
            .stdout(contains(date));
    }

    wfh()
        .args(["--db", &db_path, "--config", &conf, "summary", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(contains("WFH days: 2"))
        .stdout(contains("Mar: 1, 10"));

    wfh()
        .args([
            "--db", &db_path, "--config", &conf, "summary", "--month", "2024-03", "--json",
        ])
        .assert()
        .success()
        .stdout(contains("\"month\": \"2024-03\""))
        .stdout(contains("\"wfh_count\": 2"));
}

#[test]
fn test_set_overwrites_same_day() {
    let db_path = setup_test_db("overwrite");
    let conf = setup_test_config("overwrite", None);
    init(&db_path, &conf);

    wfh()
        .args(["--db", &db_path, "--config", &conf, "set", "wfh", "--date", "2024-05-02"])
        .assert()
        .success();
    wfh()
        .args(["--db", &db_path, "--config", &conf, "set", "o", "--date", "2024-05-02"])
        .assert()
        .success()
        .stdout(contains("2024-05-02: Office"));

    wfh()
        .args([
            "--db", &db_path, "--config", &conf, "summary", "--month", "2024-05", "--all",
        ])
        .assert()
        .success()
        .stdout(contains("WFH days: 0"))
        .stdout(contains("2024-05-02 Thu  Office"));
}

#[test]
fn test_set_rejects_bad_input() {
    let db_path = setup_test_db("bad_input");
    let conf = setup_test_config("bad_input", None);
    init(&db_path, &conf);

    wfh()
        .args(["--db", &db_path, "--config", &conf, "set", "beach"])
        .assert()
        .failure()
        .stderr(contains("Invalid action code"));

    wfh()
        .args(["--db", &db_path, "--config", &conf, "set", "wfh", "--date", "2024-02-30"])
        .assert()
        .failure()
        .stderr(contains("Malformed date"));
}

#[test]
fn test_status_on_fresh_store() {
    let db_path = setup_test_db("status_fresh");
    let conf = setup_test_config("status_fresh", None);
    init(&db_path, &conf);

    wfh()
        .args(["--db", &db_path, "--config", &conf, "status"])
        .assert()
        .success()
        .stdout(contains("not set"))
        .stdout(contains("WFH days"));
}

#[test]
fn test_status_shows_today() {
    let db_path = setup_test_db("status_today");
    let conf = setup_test_config("status_today", None);
    init(&db_path, &conf);

    wfh()
        .args(["--db", &db_path, "--config", &conf, "set", "wfh"])
        .assert()
        .success();

    wfh()
        .args(["--db", &db_path, "--config", &conf, "status"])
        .assert()
        .success()
        .stdout(contains("WFH").and(contains("not set").not()));
}

#[test]
fn test_check_without_office_ssid_is_skipped() {
    let db_path = setup_test_db("check_no_ssid");
    let conf = setup_test_config("check_no_ssid", None);
    init(&db_path, &conf);

    wfh()
        .args(["--db", &db_path, "--config", &conf, "check"])
        .assert()
        .success()
        .stdout(contains("Office check skipped"));
}

#[cfg(unix)]
#[test]
fn test_check_detects_office_network() {
    let db_path = setup_test_db("check_detect");
    let conf = setup_test_config(
        "check_detect",
        Some("office_ssid: CorpNet\nscan_command: \"printf 'corpnet\\\\nguest\\\\n'\"\n"),
    );
    init(&db_path, &conf);

    wfh()
        .args(["--db", &db_path, "--config", &conf, "set", "wfh"])
        .assert()
        .success();

    wfh()
        .args(["--db", &db_path, "--config", &conf, "check"])
        .assert()
        .success()
        .stdout(contains("marked as Office"));

    wfh()
        .args(["--db", &db_path, "--config", &conf, "check"])
        .assert()
        .success()
        .stdout(contains("already marked as Office"));
}

#[cfg(unix)]
#[test]
fn test_check_env_ssid_override() {
    let db_path = setup_test_db("check_env");
    let conf = setup_test_config("check_env", Some("scan_command: \"echo Guest\"\n"));
    init(&db_path, &conf);

    wfh()
        .env("OFFICE_WIFI_SSID", "corpnet")
        .args(["--db", &db_path, "--config", &conf, "check"])
        .assert()
        .success()
        .stdout(contains("office network not found"));
}

#[test]
fn test_watch_reads_commands_from_stdin() {
    let db_path = setup_test_db("watch_stdin");
    let conf = setup_test_config("watch_stdin", None);
    init(&db_path, &conf);

    wfh()
        .args(["--db", &db_path, "--config", &conf, "watch", "--interval", "60"])
        .write_stdin("office\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(contains("Office"))
        .stdout(contains("Stopped watching"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_ops");
    let conf = setup_test_config("log_ops", None);
    init(&db_path, &conf);

    wfh()
        .args(["--db", &db_path, "--config", &conf, "set", "wfh", "--date", "2024-03-01"])
        .assert()
        .success();

    wfh()
        .args(["--db", &db_path, "--config", &conf, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("Manually marked as WFH"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info");
    let conf = setup_test_config("db_info", None);
    init(&db_path, &conf);

    wfh()
        .args(["--db", &db_path, "--config", &conf, "set", "wfh", "--date", "2024-03-01"])
        .assert()
        .success();

    wfh()
        .args(["--db", &db_path, "--config", &conf, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Recorded days"))
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_relative_db_lives_next_to_config() {
    let conf_dir = tempfile::tempdir().unwrap();
    let work_dir = tempfile::tempdir().unwrap();
    let conf = conf_dir.path().join("wfhtracker.conf");
    let conf = conf.to_str().unwrap();

    for args in [
        vec!["--db", "rel.sqlite", "--config", conf, "--test", "init"],
        vec!["--db", "rel.sqlite", "--config", conf, "set", "wfh", "--date", "2024-03-01"],
    ] {
        wfh().current_dir(work_dir.path()).args(args).assert().success();
    }

    wfh()
        .current_dir(work_dir.path())
        .args(["--db", "rel.sqlite", "--config", conf, "summary", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(contains("WFH days: 1"));

    assert!(conf_dir.path().join("rel.sqlite").exists());
    assert!(!work_dir.path().join("rel.sqlite").exists());
}

#[test]
fn test_watch_rejects_out_of_range_interval() {
    let db_path = setup_test_db("watch_interval");
    let conf = setup_test_config("watch_interval", None);
    init(&db_path, &conf);

    for interval in ["0", "18446744073709551615"] {
        wfh()
            .args(["--db", &db_path, "--config", &conf, "watch", "--interval", interval])
            .write_stdin("quit\n")
            .assert()
            .failure()
            .stderr(contains("Configuration error"));
    }
}
