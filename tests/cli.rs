//! Binary-level tests for `gist-sync`.
//!
//! Every command runs with a cleared environment inside a temporary working
//! directory, against a local mockito server.

use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn gist_sync_cmd(cwd: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gist-sync");
    cmd.env_clear().current_dir(cwd);
    cmd
}

fn write_example(root: &Path, name: &str, content: &str) {
    let dir = root.join("docs_site/static/examples").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("main.dart"), content).unwrap();
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    gist_sync_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--root")
                .and(predicate::str::contains("--api-url"))
                .and(predicate::str::contains("relative paths resolve")),
        );
}

#[test]
fn test_missing_token_exits_nonzero_without_requests() {
    let dir = TempDir::new().unwrap();
    write_example(dir.path(), "counter", "void main() {}\n");

    let mut server = mockito::Server::new();
    let mock = server.mock("PATCH", Matcher::Any).expect(0).create();

    gist_sync_cmd(dir.path())
        .env("COUNTER_GIST_ID", "c1")
        .env("GIST_API_URL", server.url())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("GIST_TOKEN environment variable is missing."));

    mock.assert();
}

#[test]
fn test_full_run_updates_configured_examples() {
    let dir = TempDir::new().unwrap();
    write_example(dir.path(), "counter", "counter();\n");
    write_example(dir.path(), "hydrated", "hydrated();\n");
    write_example(dir.path(), "undoredo", "undoredo();\n");

    let mut server = mockito::Server::new();
    let counter = server
        .mock("PATCH", "/gists/c1")
        .match_header("authorization", "token t0ken")
        .match_header("content-type", "application/json")
        .match_body(Matcher::JsonString(
            r#"{"files":{"main.dart":{"content":"counter();\n"}}}"#.to_string(),
        ))
        .with_status(200)
        .expect(1)
        .create();
    let undoredo = server
        .mock("PATCH", "/gists/u1")
        .with_status(200)
        .expect(1)
        .create();
    let hydrated = server.mock("PATCH", "/gists/h1").expect(0).create();

    let url = server.url();
    gist_sync_cmd(dir.path())
        .env("GIST_TOKEN", "t0ken")
        .env("COUNTER_GIST_ID", "c1")
        .env("UNDOREDO_GIST_ID", "u1")
        .args(["--api-url", url.as_str(), "--root", "."])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("Successfully updated Gist for counter (c1).")
                .and(predicate::str::contains("Skipping hydrated: No GIST_ID provided."))
                .and(predicate::str::contains("Successfully updated Gist for undoredo (u1).")),
        );

    counter.assert();
    undoredo.assert();
    hydrated.assert();
}

#[test]
fn test_rejected_update_still_exits_zero() {
    let dir = TempDir::new().unwrap();
    write_example(dir.path(), "counter", "a");
    write_example(dir.path(), "hydrated", "b");

    let mut server = mockito::Server::new();
    let rejected = server
        .mock("PATCH", "/gists/c1")
        .with_status(500)
        .with_body("upstream exploded")
        .expect(1)
        .create();
    let accepted = server
        .mock("PATCH", "/gists/h1")
        .with_status(200)
        .expect(1)
        .create();

    gist_sync_cmd(dir.path())
        .env("GIST_TOKEN", "t0ken")
        .env("COUNTER_GIST_ID", "c1")
        .env("HYDRATED_GIST_ID", "h1")
        .env("GIST_API_URL", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("upstream exploded"))
        .stderr(
            predicate::str::contains("Failed to update Gist for counter. Status: 500")
                .and(predicate::str::contains("Successfully updated Gist for hydrated (h1).")),
        );

    rejected.assert();
    accepted.assert();
}

#[test]
fn test_missing_file_is_logged_and_skipped() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("repo");
    std::fs::create_dir_all(&root).unwrap();

    let mut server = mockito::Server::new();
    let mock = server.mock("PATCH", Matcher::Any).expect(0).create();

    gist_sync_cmd(dir.path())
        .env("GIST_TOKEN", "t0ken")
        .env("COUNTER_GIST_ID", "c1")
        .env("GIST_API_URL", server.url())
        .env("GIST_SYNC_ROOT", &root)
        .assert()
        .success()
        .stderr(
            predicate::str::contains("File not found:")
                .and(predicate::str::contains("counter/main.dart")),
        );

    mock.assert();
}

#[test]
fn test_dotenv_file_supplies_configuration() {
    let dir = TempDir::new().unwrap();
    write_example(dir.path(), "undoredo", "x");

    let mut server = mockito::Server::new();
    let mock = server
        .mock("PATCH", "/gists/from-dotenv")
        .match_header("authorization", "token dotenv-token")
        .with_status(200)
        .expect(1)
        .create();

    std::fs::write(
        dir.path().join(".env"),
        format!(
            "GIST_TOKEN=dotenv-token\nUNDOREDO_GIST_ID=from-dotenv\nGIST_API_URL={}\n",
            server.url()
        ),
    )
    .unwrap();

    gist_sync_cmd(dir.path()).assert().success();

    mock.assert();
}
