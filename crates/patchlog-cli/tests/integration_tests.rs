//! End-to-end tests driving the `patchlog` binary against a temporary installation.

use std::path::PathBuf;
use std::process::{Command, Output};

use patchlog_core::StateDb;
use patchlog_core::paths::db_path_in;
use patchlog_schema::{ElementProvider, Identity, PatchElement, PatchMetadata, PatchType};
use tempfile::TempDir;

/// Test context that sets up a temporary patchlog home
struct TestContext {
    _temp_dir: TempDir,
    home: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let home = temp_dir.path().join(".patchlog");
        std::fs::create_dir_all(&home).expect("failed to create patchlog home");
        Self {
            _temp_dir: temp_dir,
            home,
        }
    }

    /// Context with `eap` patched by p1 (two elements) and then p2 (with a link).
    fn with_history() -> Self {
        let ctx = Self::new();
        let eap = Identity::new("eap", "6.2.0");
        let db = StateDb::open_at(&db_path_in(&ctx.home)).expect("failed to open state db");
        db.register_identity(&eap).unwrap();

        let p1 = PatchMetadata::new("first fix", eap.clone())
            .with_element(PatchElement::new(
                "layerX",
                ElementProvider::add_on("AddOnA"),
                "add-on part",
            ))
            .with_element(PatchElement::new(
                "layerY",
                ElementProvider::layer("LayerB"),
                "layer part",
            ));
        db.record_patch("eap", "p1", PatchType::OneOff, &p1).unwrap();

        let p2 = PatchMetadata::new("second fix", eap).with_link("https://example.com/p2");
        db.record_patch("eap", "p2", PatchType::OneOff, &p2).unwrap();
        ctx
    }

    fn patchlog(&self, args: &[&str]) -> Output {
        let bin_path = env!("CARGO_BIN_EXE_patchlog");
        Command::new(bin_path)
            .env("PATCHLOG_HOME", &self.home)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .expect("failed to run patchlog")
    }

    fn json(&self, args: &[&str]) -> (Option<i32>, serde_json::Value) {
        let output = self.patchlog(args);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let value = serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("invalid JSON ({e}): {stdout}"));
        (output.status.code(), value)
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.patchlog(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    assert!(ctx.patchlog(&["--version"]).status.success());
}

#[test]
fn test_info_finds_older_patch() {
    let ctx = TestContext::with_history();
    let (code, json) = ctx.json(&["info", "p1", "--json"]);

    assert_eq!(code, Some(0));
    assert_eq!(json["outcome"], "success");
    let result = &json["result"];
    assert_eq!(result["patch-id"], "p1");
    assert_eq!(result["type"], "one-off");
    assert_eq!(result["description"], "first fix");
    assert_eq!(result["identity-name"], "eap");
    assert_eq!(result["identity-version"], "6.2.0");
    assert!(result.get("link").is_none());
    assert!(result.get("elements").is_none());
}

#[test]
fn test_info_verbose_lists_elements() {
    let ctx = TestContext::with_history();
    let (code, json) = ctx.json(&["info", "p1", "--verbose", "--json"]);

    assert_eq!(code, Some(0));
    let elements = json["result"]["elements"].as_array().unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0]["patch-id"], "layerX");
    assert_eq!(elements[0]["type"], "add-on");
    assert_eq!(elements[0]["name"], "AddOnA");
    assert_eq!(elements[1]["type"], "layer");
    assert_eq!(elements[1]["name"], "LayerB");
    assert_eq!(elements[1]["description"], "layer part");
}

#[test]
fn test_info_reports_link() {
    let ctx = TestContext::with_history();
    let (_, json) = ctx.json(&["info", "p2", "--json"]);
    assert_eq!(json["result"]["link"], "https://example.com/p2");
}

#[test]
fn test_info_unknown_patch_is_recoverable() {
    let ctx = TestContext::with_history();
    let (code, json) = ctx.json(&["info", "p9", "--json"]);

    assert_eq!(code, Some(2));
    assert_eq!(json["outcome"], "failed");
    assert_eq!(json["failure-description"], "Patch 'p9' not found in history");
    assert!(json.get("result").is_none());
}

#[test]
fn test_info_unknown_patch_text_output() {
    let ctx = TestContext::with_history();
    let output = ctx.patchlog(&["info", "p9"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Patch 'p9' not found in history"));
}

#[test]
fn test_info_without_state_fails() {
    let ctx = TestContext::new();
    let output = ctx.patchlog(&["info", "p1", "--identity", "eap"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load patch info for identity 'eap'"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_info_without_patch_id_reads_installation() {
    let ctx = TestContext::with_history();
    let (code, json) = ctx.json(&["info", "--json"]);

    assert_eq!(code, Some(0));
    assert_eq!(json["identity-name"], "eap");
    assert_eq!(json["cumulative-patch-id"], "base");
    assert_eq!(json["patches"], serde_json::json!(["p2", "p1"]));
    assert_eq!(json["history"][0]["patch-id"], "p2");
}

#[test]
fn test_history_most_recent_first() {
    let ctx = TestContext::with_history();
    let (code, json) = ctx.json(&["history", "--json"]);

    assert_eq!(code, Some(0));
    let ids: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["patch-id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["p2", "p1"]);
}

#[test]
fn test_list_shows_identity() {
    let ctx = TestContext::with_history();
    let output = ctx.patchlog(&["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("eap"));
    assert!(stdout.contains("6.2.0"));
}

#[test]
fn test_list_does_not_create_state() {
    let ctx = TestContext::new();
    assert!(ctx.patchlog(&["list"]).status.success());
    assert!(!db_path_in(&ctx.home).exists());
}
