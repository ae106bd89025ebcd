//! End-to-end tests of the `recut` binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

mod test_utils {
    use super::*;

    /// `recut` with an isolated config file and quiet logging
    pub fn recut(dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("recut").unwrap();
        cmd.env_remove("RECUT_LOG_LEVEL")
            .env_remove("RECUT_CRF")
            .env_remove("RECUT_OUTPUT_TYPE")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(dir.join("recut.toml"))
            .arg("--log-level")
            .arg("warn");
        cmd
    }

    pub fn media_args() -> [&'static str; 8] {
        ["--fps", "30", "--duration", "02:00", "--width", "1920", "--height", "1080"]
    }

    pub fn inspect_json(dir: &Path, path: &Path) -> serde_json::Value {
        let output = recut(dir)
            .arg("inspect")
            .arg(path)
            .args(media_args())
            .arg("--json")
            .output()
            .unwrap();
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

#[test]
fn test_inspect_raw_media() {
    let dir = TempDir::new().unwrap();
    let report = test_utils::inspect_json(dir.path(), &dir.path().join("clip.mp4"));

    assert_eq!(report["outputDurationSeconds"], 120.0);
    assert_eq!(report["totalOutputFrames"], 3600);
    assert_eq!(report["projectFile"], serde_json::Value::Null);
    assert_eq!(report["cropFrames"][0]["cropRectangle"]["width"], 960);
}

#[test]
fn test_inspect_human_readable() {
    let dir = TempDir::new().unwrap();
    test_utils::recut(dir.path())
        .arg("inspect")
        .arg(dir.path().join("clip.mp4"))
        .args(test_utils::media_args())
        .assert()
        .success()
        .stdout(predicate::str::contains("Output duration: 02:00.000 (3600 frames)"))
        .stdout(predicate::str::contains("frame 0: 960x540 @ (960, 540)"));
}

#[test]
fn test_edit_trims_and_saves_project() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("edit.json");

    test_utils::recut(dir.path())
        .arg("edit")
        .arg(dir.path().join("clip.mp4"))
        .args(test_utils::media_args())
        .arg("--save")
        .arg(&project)
        .args(["seek=10", "marker", "seek=20", "marker", "seek=15", "trim"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved project"));

    assert!(project.is_file());
    let report = test_utils::inspect_json(dir.path(), &project);
    assert_eq!(report["outputDurationSeconds"], 110.0);
    assert_eq!(report["disjunctSegments"], serde_json::json!([[0.0, 10.0], [10.0, 110.0]]));
    assert_eq!(report["trimmingMarkers"].as_array().unwrap().len(), 3);

    let frames: Vec<i64> = report["cropFrames"]
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k["frameNumber"].as_i64().unwrap())
        .collect();
    assert_eq!(frames, vec![0, 299, 300]);
}

#[test]
fn test_edit_rejects_unknown_operation() {
    let dir = TempDir::new().unwrap();
    test_utils::recut(dir.path())
        .arg("edit")
        .arg(dir.path().join("clip.mp4"))
        .args(test_utils::media_args())
        .arg("explode")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown operation"));
}

#[test]
fn test_edit_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    test_utils::recut(dir.path())
        .arg("edit")
        .arg(dir.path().join("clip.mp4"))
        .args(test_utils::media_args())
        .args(["--dry-run", "seek=10", "marker"])
        .assert()
        .success();
    assert!(!dir.path().join("clip.json").exists());
}

#[test]
fn test_export_writes_manifest_and_remembers_settings() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.mkv");

    test_utils::recut(dir.path())
        .arg("export")
        .arg(dir.path().join("clip.mp4"))
        .args(test_utils::media_args())
        .arg("--output")
        .arg(&output)
        .args(["--type", "vp8", "--crf", "20", "--scale", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3600 frames (480x270, vp8)"));

    let manifest_path = dir.path().join("out.recut.json");
    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(manifest_path).unwrap()).unwrap();
    assert_eq!(manifest["output"]["outputType"], "vp8");
    assert_eq!(manifest["output"]["crf"], 20);
    assert!(manifest["output"]["fileName"]
        .as_str()
        .unwrap()
        .ends_with("out.webm"));

    let config = std::fs::read_to_string(dir.path().join("recut.toml")).unwrap();
    assert!(config.contains("default_crf = 20"));
    assert!(config.contains("default_output_type = \"vp8\""));
}

#[test]
fn test_export_rejects_bad_crf() {
    let dir = TempDir::new().unwrap();
    test_utils::recut(dir.path())
        .arg("export")
        .arg(dir.path().join("clip.mp4"))
        .args(test_utils::media_args())
        .args(["--output", "out.mp4", "--crf", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CRF value cannot exceed 63"));
}
