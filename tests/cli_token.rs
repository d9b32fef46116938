use assert_cmd::Command;
use chrono::{Duration, SecondsFormat, Utc};
use mockito::Server;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn base_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("myapp").expect("myapp binary");
    cmd.env("HOME", home)
        .env("USERNAME", "alice")
        .env("NO_COLOR", "1")
        .env_remove("MYAPP_TOKEN_FILE")
        .env_remove("RANDOMUSER_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn write_token(path: &Path, token: &str, expires_in: Duration) -> String {
    let body = json!({
        "myapp_token": token,
        "expire_date": (Utc::now() + expires_in).to_rfc3339_opts(SecondsFormat::Secs, true),
        "RESOURCE_NAME": "APP-DYNAMIC-myapp-RESOOURE",
        "CLIENT_ID": "alice",
        "myapp_URL": "https://myapp-prod.com",
    })
    .to_string();
    fs::write(path, &body).expect("write config");
    body
}

fn user_payload() -> serde_json::Value {
    json!({
        "results": [{
            "gender": "female",
            "name": {"title": "Ms", "first": "Ada", "last": "Lovelace"},
            "email": "ada@example.com",
            "location": {
                "street": {"number": 12, "name": "Main St"},
                "city": "London",
                "state": "Greater London",
                "country": "United Kingdom",
                "postcode": "N1 9GU"
            },
            "picture": {
                "large": "https://example.com/l.jpg",
                "medium": "https://example.com/m.jpg",
                "thumbnail": "https://example.com/t.jpg"
            }
        }]
    })
}

#[test]
fn token_command_reuses_valid_token() {
    let home = tempdir().expect("tempdir");
    let path = home.path().join(".config.json");
    let original = write_token(&path, "cached-token", Duration::hours(2));

    base_cmd(home.path())
        .arg("token")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Token and expiration date already exist in config file.",
        ))
        .stdout(predicate::str::contains("Token: cached-token"));

    assert_eq!(fs::read_to_string(&path).expect("read config"), original);
}

#[test]
fn token_file_flag_overrides_home() {
    let home = tempdir().expect("tempdir");
    let other = tempdir().expect("tempdir");
    let path = other.path().join("tokens.json");
    write_token(&path, "from-flag", Duration::hours(3));

    base_cmd(home.path())
        .args(["token", "--token-file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Token: from-flag"));

    assert!(!home.path().join(".config.json").exists());
}

#[test]
fn token_file_env_var_is_honoured() {
    let home = tempdir().expect("tempdir");
    let path = home.path().join("env-tokens.json");
    write_token(&path, "from-env", Duration::hours(3));

    base_cmd(home.path())
        .env("MYAPP_TOKEN_FILE", &path)
        .arg("token")
        .assert()
        .success()
        .stdout(predicate::str::contains("Token: from-env"));
}

#[test]
fn expired_token_without_username_fails_and_keeps_file() {
    let home = tempdir().expect("tempdir");
    let path = home.path().join(".config.json");
    let original = write_token(&path, "stale", Duration::minutes(5));

    base_cmd(home.path())
        .env_remove("USERNAME")
        .arg("token")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "USERNAME environment variable not found",
        ));

    assert_eq!(fs::read_to_string(&path).expect("read config"), original);
}

#[test]
fn first_run_creates_config_file_before_failing() {
    let home = tempdir().expect("tempdir");
    let path = home.path().join(".config.json");

    base_cmd(home.path())
        .env_remove("USERNAME")
        .arg("token")
        .assert()
        .failure();

    assert!(path.exists());
    assert_eq!(fs::read_to_string(&path).expect("read config"), "");
}

#[test]
fn randomusername_prints_fetched_user() {
    let home = tempdir().expect("tempdir");
    write_token(&home.path().join(".config.json"), "t", Duration::hours(2));
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_payload().to_string())
        .create();

    base_cmd(home.path())
        .env("RANDOMUSER_API_URL", server.url())
        .arg("randomusername")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Ms Ada Lovelace"))
        .stdout(predicate::str::contains("Gender: female"))
        .stdout(predicate::str::contains("Email: ada@example.com"));

    mock.assert();
}

#[test]
fn randomuserlocation_and_picture_print_details() {
    let home = tempdir().expect("tempdir");
    write_token(&home.path().join(".config.json"), "t", Duration::hours(2));
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/api/")
        .with_status(200)
        .with_body(user_payload().to_string())
        .expect(2)
        .create();

    base_cmd(home.path())
        .env("RANDOMUSER_API_URL", server.url())
        .arg("randomuserlocation")
        .assert()
        .success()
        .stdout(predicate::str::contains("Street: 12 Main St"))
        .stdout(predicate::str::contains("Postcode: N1 9GU"));

    base_cmd(home.path())
        .env("RANDOMUSER_API_URL", server.url())
        .arg("randomuserpicture")
        .assert()
        .success()
        .stdout(predicate::str::contains("Thumbnail: https://example.com/t.jpg"));
}

#[test]
fn empty_results_are_reported() {
    let home = tempdir().expect("tempdir");
    write_token(&home.path().join(".config.json"), "t", Duration::hours(2));
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/api/")
        .with_status(200)
        .with_body(json!({"results": []}).to_string())
        .create();

    base_cmd(home.path())
        .env("RANDOMUSER_API_URL", server.url())
        .arg("randomuseremail")
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found"));
}

#[test]
fn api_error_status_fails_the_command() {
    let home = tempdir().expect("tempdir");
    write_token(&home.path().join(".config.json"), "t", Duration::hours(2));
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/api/")
        .with_status(503)
        .with_body("maintenance")
        .create();

    base_cmd(home.path())
        .env("RANDOMUSER_API_URL", server.url())
        .arg("randomuseremail")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Random user request failed"));
}
