//! Command-line behavior of the `diagram-poster` binary

use std::fs;

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;

fn bin() -> Command {
    Command::cargo_bin("diagram-poster").unwrap()
}

fn write_inputs(dir: &std::path::Path) {
    let names = [
        "conceptual_erd.png",
        "use_case.png",
        "sequence_diagram.png",
        "customer_journey.png",
    ];
    for name in names {
        RgbImage::from_pixel(30, 20, Rgb([90, 90, 90])).save(dir.join(name)).unwrap();
    }
}

#[test]
fn compose_without_arguments_uses_default_file_names() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    bin()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Created system_design_poster.png"));

    let poster = image::open(dir.path().join("system_design_poster.png")).unwrap();
    assert_eq!((poster.width(), poster.height()), (30 + 30 + 120, 80 + 80 + 120));
}

#[test]
fn compose_reports_missing_file_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    fs::remove_file(dir.path().join("sequence_diagram.png")).unwrap();

    bin()
        .current_dir(dir.path())
        .arg("compose")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sequence_diagram.png"));

    assert!(!dir.path().join("system_design_poster.png").exists());
}

#[test]
fn compose_flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    fs::write(
        dir.path().join("poster.json"),
        r#"{"poster": {"padding": 5, "title_height": 10, "output": "from_config.png"}}"#,
    )
    .unwrap();

    bin()
        .current_dir(dir.path())
        .args(["--config", "poster.json", "compose", "--padding", "0"])
        .assert()
        .success();

    let poster = image::open(dir.path().join("from_config.png")).unwrap();
    assert_eq!((poster.width(), poster.height()), (60, 60));
}

#[cfg(feature = "remote")]
#[test]
fn fetch_with_too_few_blocks_reports_extraction_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("design_diagrams.md"), "```mermaid\ngraph TD\n  a\n```\n").unwrap();

    bin()
        .current_dir(dir.path())
        .arg("fetch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("diagram block #2"));

    assert!(!dir.path().join("use_case.png").exists());
}

#[cfg(feature = "remote")]
#[test]
fn fetch_with_missing_document_names_it() {
    let dir = tempfile::tempdir().unwrap();

    bin()
        .current_dir(dir.path())
        .args(["fetch", "--document", "nowhere.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere.md"));
}
