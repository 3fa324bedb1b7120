use assert_cmd::Command;
use predicates::prelude::*;

fn jotter(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("jotter").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("JOTTER_API_URL")
        .env_remove("JOTTER_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    jotter(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("replace"));
}

#[test]
fn config_reflects_flag_override() {
    let home = tempfile::tempdir().unwrap();
    jotter(home.path())
        .args(["config", "--api-url", "http://notes.test:8080"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_url = http://notes.test:8080"))
        .stdout(predicate::str::contains("timeout_secs = 30"));
}

#[test]
fn env_url_is_used_without_flag() {
    let home = tempfile::tempdir().unwrap();
    jotter(home.path())
        .env("JOTTER_API_URL", "http://from-env:1")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("api_url = http://from-env:1"));
}

#[test]
fn unreachable_store_exits_with_error() {
    let home = tempfile::tempdir().unwrap();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    jotter(home.path())
        .args(["list", "--api-url", &format!("http://127.0.0.1:{}", port)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: GET /notes failed"));
}

#[test]
fn log_level_comes_from_environment() {
    let home = tempfile::tempdir().unwrap();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}", port);

    jotter(home.path())
        .args(["list", "--api-url", &url])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reload failed"));

    jotter(home.path())
        .env("JOTTER_LOG", "off")
        .args(["list", "--api-url", &url])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reload failed").not())
        .stderr(predicate::str::contains("Error: GET /notes failed"));
}
