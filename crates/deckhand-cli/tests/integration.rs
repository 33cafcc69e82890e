#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn deckhand(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("deckhand").unwrap();
    cmd.current_dir(dir.path())
        .env("DECKHAND_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).unwrap();
}

/// Point the build command at `program` so no Slidev install is needed.
fn use_build_command(dir: &TempDir, program: &str) {
    write(
        dir,
        "deckhand.yaml",
        &format!("site:\n  title: Test Site\nbuild:\n  command: [\"{program}\"]\n  fallback: null\n"),
    );
}

fn sample_decks(dir: &TempDir) {
    write(dir, "02-slides-b.md", "# Second Deck\n");
    write(dir, "01-slides-a.md", "---\ntitle: \"First Deck\"\n---\n");
    write(dir, "slides-my-topic.md", "no title\n");
    write(dir, "README.md", "# Not a deck\n");
}

// ---------------------------------------------------------------------------
// deckhand list
// ---------------------------------------------------------------------------

#[test]
fn list_shows_decks_in_order() {
    let dir = TempDir::new().unwrap();
    sample_decks(&dir);

    let out = deckhand(&dir).arg("list").assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();

    let a = stdout.find("01-slides-a.md").unwrap();
    let b = stdout.find("02-slides-b.md").unwrap();
    let c = stdout.find("slides-my-topic.md").unwrap();
    assert!(a < b && b < c, "unexpected order:\n{stdout}");
    assert!(stdout.contains("First Deck"));
    assert!(stdout.contains("Second Deck"));
    assert!(stdout.contains("My Topic"));
    assert!(!stdout.contains("README.md"));
}

#[test]
fn list_json_output_has_expected_fields() {
    let dir = TempDir::new().unwrap();
    sample_decks(&dir);

    let out = deckhand(&dir).args(["list", "--json"]).assert().success();
    let value: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["file"], "01-slides-a.md");
    assert_eq!(entries[0]["slug"], "a");
    assert_eq!(entries[0]["order"], 1);
    assert_eq!(entries[2]["slug"], "my-topic");
    assert_eq!(entries[2]["order"], 999);
}

#[test]
fn list_empty_directory_succeeds() {
    let dir = TempDir::new().unwrap();
    write(&dir, "notes.md", "# Notes\n");

    deckhand(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No slide files found"));
}

#[test]
fn list_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    Command::cargo_bin("deckhand")
        .unwrap()
        .args(["list", "--root"])
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to scan"));
}

// ---------------------------------------------------------------------------
// deckhand build
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn build_writes_navigation_and_routing() {
    let dir = TempDir::new().unwrap();
    sample_decks(&dir);
    use_build_command(&dir, "true");

    deckhand(&dir)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built 3 of 3 decks"));

    let html = std::fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
    assert!(html.contains("<h1>Test Site</h1>"));
    assert!(html.contains("First Deck"));
    assert!(html.contains("./my-topic/"));

    let vercel: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("dist/vercel.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(vercel["rewrites"].as_array().unwrap().len(), 3);
}

#[cfg(unix)]
#[test]
fn build_with_main_deck_uses_alternate_nav_page() {
    let dir = TempDir::new().unwrap();
    write(&dir, "slides.md", "# Main\n");
    write(&dir, "slides-extra.md", "");
    use_build_command(&dir, "true");

    deckhand(&dir).arg("build").assert().success();

    assert!(dir.path().join("dist/decks.html").exists());
    assert!(!dir.path().join("dist/index.html").exists());
}

#[cfg(unix)]
#[test]
fn build_out_and_no_vercel_flags() {
    let dir = TempDir::new().unwrap();
    write(&dir, "slides-a.md", "");
    use_build_command(&dir, "true");

    deckhand(&dir)
        .args(["build", "--out", "public", "--no-vercel"])
        .assert()
        .success();

    assert!(dir.path().join("public/index.html").exists());
    assert!(!dir.path().join("public/vercel.json").exists());
    assert!(!dir.path().join("dist").exists());
}

#[cfg(unix)]
#[test]
fn build_json_reports_failures() {
    let dir = TempDir::new().unwrap();
    write(&dir, "slides-a.md", "");
    use_build_command(&dir, "false");

    let out = deckhand(&dir)
        .args(["build", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("all 1 deck builds failed"));
    let report: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(report["built"].as_array().unwrap().len(), 0);
    assert_eq!(report["failed"][0]["entry"]["slug"], "a");
}

#[test]
fn build_without_decks_is_not_an_error() {
    let dir = TempDir::new().unwrap();

    deckhand(&dir)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("No slide files found"));
    assert!(!dir.path().join("dist").exists());
}

#[test]
fn build_json_without_decks_matches_report_shape() {
    let dir = TempDir::new().unwrap();

    let out = deckhand(&dir).args(["build", "--json"]).assert().success();
    let report: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    for key in ["out_dir", "built", "failed", "nav_page", "routing_config"] {
        assert!(report.get(key).is_some(), "missing {key}: {report}");
    }
    assert!(report["nav_page"].is_null());
    assert_eq!(report["built"].as_array().unwrap().len(), 0);
}

#[cfg(unix)]
#[test]
fn build_refuses_out_dir_above_sources() {
    let dir = TempDir::new().unwrap();
    write(&dir, "slides-a.md", "# A\n");
    std::fs::create_dir(dir.path().join("dist")).unwrap();
    use_build_command(&dir, "true");

    for out in ["dist/..", "../site"] {
        deckhand(&dir)
            .args(["build", "--out", out])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid configuration"));
    }
    assert!(dir.path().join("slides-a.md").exists());
    assert!(dir.path().join("deckhand.yaml").exists());
}

#[test]
fn build_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    write(&dir, "slides.md", "");
    write(&dir, "deckhand.yaml", "build:\n  command: []\n");

    deckhand(&dir)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

// ---------------------------------------------------------------------------
// deckhand dev
// ---------------------------------------------------------------------------

#[test]
fn dev_without_decks_fails_and_lists_files() {
    let dir = TempDir::new().unwrap();
    write(&dir, "notes.md", "");

    deckhand(&dir)
        .arg("dev")
        .assert()
        .failure()
        .stderr(predicate::str::contains("notes.md"))
        .stderr(predicate::str::contains("no slide files found"));
}

#[test]
fn dev_rejects_port_overflow() {
    let dir = TempDir::new().unwrap();
    write(&dir, "slides-a.md", "");
    write(&dir, "slides-b.md", "");

    deckhand(&dir)
        .args(["dev", "--port", "65535"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds 65535"));
}

// ---------------------------------------------------------------------------
// deckhand config
// ---------------------------------------------------------------------------

#[test]
fn config_validate_defaults() {
    let dir = TempDir::new().unwrap();
    deckhand(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_init_then_show() {
    let dir = TempDir::new().unwrap();
    deckhand(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join("deckhand.yaml").exists());

    deckhand(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    deckhand(&dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();

    let out = deckhand(&dir)
        .args(["config", "show", "--json"])
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(value["dev"]["base_port"], 3030);
    assert_eq!(value["site"]["out_dir"], "dist");
}

#[test]
fn config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    write(&dir, "deckhand.yaml", "dev:\n  base_port: 0\n");
    deckhand(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error] dev.base_port"));
}
