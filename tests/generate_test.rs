//! End-to-end pipeline tests against a fake flattening tool

use std::collections::BTreeSet;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use handgen::application::{ApplicationError, GenerateService};
use handgen::config::Settings;
use handgen::domain::Finger;
use handgen::infrastructure::traits::RealCommandRunner;
use handgen::util::testing;
use sha2::{Digest, Sha256};
use tempfile::TempDir;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const HAND_XACRO: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<robot xmlns:xacro="http://ros.org/wiki/xacro" name="hand_robot">
  <link name="world"/>
  <link name="palm"/>
  <xacro:finger_module xacro:prefix="thumb_module_1" parent="palm"/>
  <xacro:finger_module xacro:prefix="index_module_1" parent="palm"/>
  <xacro:finger_module xacro:prefix="middle_module_1" parent="palm"/>
  <xacro:finger_module xacro:prefix="ring_module_1" parent="palm"/>
  <xacro:finger_module xacro:prefix="little_module_1" parent="palm"/>
</robot>
"#;

fn file_hash(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fs::read(path).expect("read"));
    hex::encode(hasher.finalize())
}

/// A fake `zacro` that records the input path it was handed, copies the
/// input to the `-o` target and prints a line to stdout.
fn write_fake_tool(dir: &TempDir, record: &Path) -> PathBuf {
    let script = format!(
        r#"#!/bin/sh
input="$1"
printf '%s\n' "$input" > '{record}'
out=''
while [ "$#" -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
  esac
  shift
done
cp "$input" "$out"
echo "flattened"
"#,
        record = record.display()
    );
    install_tool(dir, &script)
}

/// A fake tool that records its input, complains on stderr and exits 3.
fn write_failing_tool(dir: &TempDir, record: &Path) -> PathBuf {
    let script = format!(
        r#"#!/bin/sh
printf '%s\n' "$1" > '{record}'
echo "flatten failed" >&2
exit 3
"#,
        record = record.display()
    );
    install_tool(dir, &script)
}

fn install_tool(dir: &TempDir, script: &str) -> PathBuf {
    let path = dir.path().join("zacro");
    fs::write(&path, script).expect("write tool");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}

fn service(tool: &Path) -> GenerateService {
    let settings = Settings {
        flatten_tool: tool.to_string_lossy().into_owned(),
        remove_root_link: "world".into(),
    };
    GenerateService::new(Arc::new(RealCommandRunner), Arc::new(settings))
}

fn write_input(dir: &TempDir) -> PathBuf {
    let input = dir.path().join("hand_robot.xacro");
    fs::write(&input, HAND_XACRO).unwrap();
    input
}

fn recorded_path(record: &Path) -> PathBuf {
    PathBuf::from(fs::read_to_string(record).expect("record").trim())
}

#[test]
fn given_excluded_fingers_when_generated_then_output_written_and_staging_cleaned() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp);
    let output = temp.path().join("hand_robot.urdf");
    let record = temp.path().join("record.txt");
    let tool = write_fake_tool(&temp, &record);
    let before = file_hash(&input);
    let exclude = BTreeSet::from([Finger::Ring, Finger::Little]);

    // Act
    let report = service(&tool)
        .generate(&input, &output, &exclude)
        .expect("generate");

    // Assert
    assert_eq!(report.removed, 2);
    assert!(report.staged);
    assert!(report.tool_stdout.contains("flattened"));

    // The tool saw the staged copy, not the input, and the copy is gone.
    let staged = recorded_path(&record);
    assert_ne!(staged, input);
    assert!(!staged.exists());

    let out = fs::read_to_string(&output).expect("output");
    assert!(!out.contains("ring_module"));
    assert!(!out.contains("little_module"));
    assert!(out.contains("thumb_module_1"));

    assert_eq!(file_hash(&input), before);
}

#[test]
fn given_no_exclusions_when_generated_then_input_passes_through() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp);
    let output = temp.path().join("hand_robot.urdf");
    let record = temp.path().join("record.txt");
    let tool = write_fake_tool(&temp, &record);

    let report = service(&tool)
        .generate(&input, &output, &BTreeSet::new())
        .expect("generate");

    assert_eq!(report.removed, 0);
    assert!(!report.staged);
    assert_eq!(recorded_path(&record), input);
    assert!(output.exists());
}

#[test]
fn given_label_absent_from_document_when_generated_then_treated_as_no_edit() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("partial.xacro");
    fs::write(
        &input,
        r#"<robot xmlns:xacro="http://ros.org/wiki/xacro">
  <xacro:finger_module xacro:prefix="thumb_module_1"/>
</robot>"#,
    )
    .unwrap();
    let output = temp.path().join("partial.urdf");
    let record = temp.path().join("record.txt");
    let tool = write_fake_tool(&temp, &record);

    let report = service(&tool)
        .generate(&input, &output, &BTreeSet::from([Finger::Little]))
        .expect("generate");

    assert_eq!(report.removed, 0);
    assert!(!report.staged);
    assert_eq!(recorded_path(&record), input);
}

#[test]
fn given_failing_tool_when_generated_then_error_surfaced_and_staging_cleaned() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp);
    let output = temp.path().join("hand_robot.urdf");
    let record = temp.path().join("record.txt");
    let tool = write_failing_tool(&temp, &record);
    let before = file_hash(&input);

    // Act
    let err = service(&tool)
        .generate(&input, &output, &BTreeSet::from([Finger::Ring]))
        .expect_err("must fail");

    // Assert
    match err {
        ApplicationError::ToolExecutionFailed {
            exit_code, stderr, ..
        } => {
            assert_eq!(exit_code, Some(3));
            assert!(stderr.contains("flatten failed"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // The staged copy is removed even though the tool failed.
    let staged = recorded_path(&record);
    assert_ne!(staged, input);
    assert!(!staged.exists());
    assert_eq!(file_hash(&input), before);
}

#[test]
fn given_missing_tool_when_generated_then_tool_not_found() {
    let temp = TempDir::new().unwrap();
    let input = write_input(&temp);
    let output = temp.path().join("hand_robot.urdf");
    let tool = temp.path().join("no_such_tool");

    let err = service(&tool)
        .generate(&input, &output, &BTreeSet::new())
        .expect_err("must fail");

    match err {
        ApplicationError::ToolNotFound { tool: name } => {
            assert!(name.contains("no_such_tool"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_unreadable_input_when_generated_then_tool_never_invoked() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("does_not_exist.xacro");
    let output = temp.path().join("hand_robot.urdf");
    let record = temp.path().join("record.txt");
    let tool = write_fake_tool(&temp, &record);

    let err = service(&tool)
        .generate(&missing, &output, &BTreeSet::new())
        .expect_err("must fail");

    assert!(matches!(err, ApplicationError::DocumentLoad { .. }));
    assert!(!record.exists());
    assert!(!output.exists());
}
