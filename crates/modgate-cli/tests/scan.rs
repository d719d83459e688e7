//! End-to-end scans of the probe directories under `tests/fixtures`.

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[allow(deprecated)]
fn modgate_cmd() -> Command {
    Command::cargo_bin("modgate").unwrap()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("modgate-cli should have parent")
        .parent()
        .expect("crates should have parent")
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Scan `fixture` with `extra` global flags, writing the report under `out`.
fn scan(fixture_name: &str, out: &Path, extra: &[&str]) -> (i32, Value) {
    let report = out.join("report.json");
    let output = modgate_cmd()
        .arg("--probe-dir")
        .arg(fixture(fixture_name))
        .args(extra)
        .arg("scan")
        .arg("--report-out")
        .arg(&report)
        .output()
        .expect("run modgate");
    let text = std::fs::read_to_string(&report).expect("report written");
    let json: Value = serde_json::from_str(&text).expect("report is json");
    (output.status.code().expect("exit code"), json)
}

fn module<'a>(report: &'a Value, name: &str) -> &'a Value {
    report["modules"]
        .as_array()
        .expect("modules array")
        .iter()
        .find(|m| m["name"] == name || m["path"].as_str().is_some_and(|p| p.contains(name)))
        .unwrap_or_else(|| panic!("module {name} missing from report"))
}

#[test]
fn clean_probe_passes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (code, report) = scan("clean", tmp.path(), &[]);
    assert_eq!(code, 0);
    assert_eq!(report["schema"], "modgate.report.v1");
    assert_eq!(report["verdict"], "pass");
    assert_eq!(report["data"]["modules_scanned"], 2);
    assert_eq!(report["data"]["admitted"], 2);
    assert_eq!(report["modules"][0]["path"], "core.module.toml");
    assert_eq!(report["modules"][1]["path"], "plugins/widgets.module.toml");
}

#[test]
fn missing_dependency_collapses_to_one_complaint() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (code, report) = scan("missing_dependency", tmp.path(), &[]);
    assert_eq!(code, 0);
    assert_eq!(report["verdict"], "warn");

    let m = module(&report, "acme.reports");
    assert_eq!(m["status"], "rejected");
    let complaints = m["complaints"].as_array().expect("complaints");
    assert_eq!(complaints.len(), 1);
    assert_eq!(
        complaints[0]["message"],
        "could not load dependency 'acme.charts': could not find module 'acme.charts' in the probe directory"
    );
    assert_eq!(complaints[0]["criterion_id"], "plugin.exports_plugin");
}

#[test]
fn fail_on_rejection_turns_rejection_into_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (code, report) = scan("missing_dependency", tmp.path(), &["--fail-on", "rejection"]);
    assert_eq!(code, 2);
    assert_eq!(report["verdict"], "fail");
}

#[test]
fn broken_dependency_is_unreadable_and_rejects_dependent() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (code, report) = scan("broken_dependency", tmp.path(), &[]);
    assert_eq!(code, 2);
    assert_eq!(report["data"]["unreadable"], 1);

    let vendor = module(&report, "vendor.json.module.toml");
    assert_eq!(vendor["status"], "unreadable");
    assert!(vendor.get("name").is_none());

    let app = module(&report, "acme.app");
    assert_eq!(app["status"], "rejected");
    let message = app["complaints"][0]["message"].as_str().expect("message");
    assert!(
        message.starts_with("could not load dependency 'vendor.json': module 'vendor.json' at vendor.json.module.toml could not be loaded:"),
        "{message}"
    );
}

#[test]
fn invalid_type_definition_faults_module() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (code, report) = scan("invalid_type", tmp.path(), &["--fail-on", "fault"]);
    assert_eq!(code, 2);
    let m = module(&report, "acme.odd");
    assert_eq!(m["status"], "faulted");
    assert!(
        m["fault"]
            .as_str()
            .is_some_and(|f| f.contains("unknown kind 'delegate'"))
    );
}

#[test]
fn config_in_probe_dir_replaces_preset_criteria() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let (code, report) = scan("custom_criteria", tmp.path(), &[]);
    assert_eq!(code, 2);
    assert_eq!(module(&report, "acme.exported")["status"], "admitted");

    let internal = module(&report, "acme.internal");
    assert_eq!(internal["status"], "rejected");
    assert_eq!(internal["complaints"][0]["criterion_id"], "module.not_internal");
    assert_eq!(
        internal["complaints"][0]["message"],
        "module name 'acme.internal' is denied by pattern '*.internal'"
    );
}

#[test]
fn any_profile_override_admits_modules_without_plugins() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let probe = tmp.path().join("probe");
    std::fs::create_dir_all(&probe).expect("mkdir");
    std::fs::write(
        probe.join("util.module.toml"),
        "[module]\nname = \"util\"\n[[types]]\nname = \"Helper\"\n",
    )
    .expect("write");

    let report_path = tmp.path().join("report.json");
    modgate_cmd()
        .arg("--probe-dir")
        .arg(&probe)
        .args(["--profile", "any", "scan", "--report-out"])
        .arg(&report_path)
        .assert()
        .success();

    let json: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read")).expect("json");
    assert_eq!(json["data"]["profile"], "any");
    assert_eq!(json["verdict"], "pass");
}

#[test]
fn missing_probe_dir_is_runtime_error_with_report() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let report_path = tmp.path().join("report.json");
    modgate_cmd()
        .arg("--probe-dir")
        .arg(tmp.path().join("does-not-exist"))
        .args(["scan", "--report-out"])
        .arg(&report_path)
        .assert()
        .code(1)
        .stderr(contains("modgate error"))
        .stderr(contains("probe directory does not exist"));

    let json: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read")).expect("json");
    assert_eq!(json["verdict"], "fail");
    assert_eq!(json["modules"][0]["complaints"][0]["criterion_id"], "tool.runtime");
}

#[test]
fn markdown_and_annotations_render_from_report() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let report_path = tmp.path().join("report.json");
    let md_path = tmp.path().join("comment.md");

    modgate_cmd()
        .arg("--probe-dir")
        .arg(fixture("missing_dependency"))
        .args(["scan", "--write-markdown", "--report-out"])
        .arg(&report_path)
        .arg("--markdown-out")
        .arg(&md_path)
        .assert()
        .code(0);

    let md = std::fs::read_to_string(&md_path).expect("markdown written");
    assert!(md.contains("# Modgate report"));
    assert!(md.contains("[REJECTED] `acme.reports`"));

    modgate_cmd()
        .args(["md", "--report"])
        .arg(&report_path)
        .assert()
        .success()
        .stdout(contains("Verdict: **WARN**"));

    modgate_cmd()
        .args(["annotations", "--report"])
        .arg(&report_path)
        .assert()
        .success()
        .stdout(contains(
            "::warning file=reports.module.toml::[plugin.exports_plugin:rejected] acme.reports:",
        ));
}
