use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "ORDER NUMBER: 12345\nINVOICE DATE: 25/12/23\n123456 Sample Item 2.0 10.00 20.00 0.00 20.00\nAmount 20.00";

const UNKNOWN: &str = "Thank you for shopping\nVisit again";

fn billscan(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("billscan").unwrap();
    cmd.env("XDG_CONFIG_HOME", home).env("HOME", home);
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn parse_sample_receipt_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "order.txt", SAMPLE);

    billscan(dir.path())
        .arg("parse")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""bill_number": "12345""#))
        .stdout(predicate::str::contains(r#""bill_date": "2023-12-25""#))
        .stdout(predicate::str::contains(r#""name": "Sample Item""#))
        .stdout(predicate::str::contains(r#""total_amount": "20.00""#));
}

#[test]
fn parse_as_csv() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "order.txt", SAMPLE);

    billscan(dir.path())
        .args(["parse", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("bill_number,bill_date,shop_name"))
        .stdout(predicate::str::contains(
            "12345,2023-12-25,D-Mart (Avenue E-Commerce),20.00,Sample Item,2.0,20.00",
        ));
}

#[test]
fn parse_with_explicit_mime() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "upload.bin", SAMPLE);

    billscan(dir.path())
        .args(["parse", "--mime", "text/plain"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("12345"));
}

#[test]
fn parse_writes_bill_draft() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "order.txt", SAMPLE);
    let output = dir.path().join("draft.json");

    billscan(dir.path())
        .args(["parse", "--draft", "--floor", "3", "--output"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let draft: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(draft["bill_no"], "12345");
    assert_eq!(draft["floor"], "3");
    assert_eq!(draft["source"], "text_import");
    assert_eq!(draft["original_filename"], "order.txt");
    assert_eq!(draft["items"][0]["status"], "completed");
    assert_eq!(draft["items"][0]["category"], "other");
}

#[test]
fn parse_reports_misses() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "note.txt", UNKNOWN);

    billscan(dir.path())
        .args(["parse", "--show-misses"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown Store"))
        .stderr(predicate::str::contains("no match for total_amount"));
}

#[test]
fn parse_rejects_empty_text() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "blank.txt", "   \n");

    billscan(dir.path())
        .arg("parse")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No text could be extracted"));
}

#[test]
fn parse_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "receipt.xyz", SAMPLE);

    billscan(dir.path())
        .arg("parse")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn detect_prints_parser_variant() {
    let dir = TempDir::new().unwrap();
    let dmart = write(&dir, "dmart.txt", SAMPLE);
    let other = write(&dir, "other.txt", UNKNOWN);

    billscan(dir.path())
        .arg("detect")
        .arg(&dmart)
        .assert()
        .success()
        .stdout("dmart\n");

    billscan(dir.path())
        .arg("detect")
        .arg(&other)
        .assert()
        .success()
        .stdout("generic\n");
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), SAMPLE).unwrap();
    fs::write(inputs.join("b.txt"), UNKNOWN).unwrap();
    fs::write(inputs.join("c.txt"), "").unwrap();

    billscan(dir.path())
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .arg("--output-dir")
        .arg(&outputs)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"));

    assert!(outputs.join("a.json").exists());
    assert!(outputs.join("b.json").exists());
    assert!(!outputs.join("c.json").exists());

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,success,dmart,12345,2023-12-25"));
    assert!(summary.contains("b.txt,success,generic"));
    assert!(summary.contains("c.txt,error"));
}

#[test]
fn batch_stops_on_first_error() {
    let dir = TempDir::new().unwrap();
    write(&dir, "empty.txt", "");

    billscan(dir.path())
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn batch_keeps_outputs_written_before_failure() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), SAMPLE).unwrap();
    fs::write(inputs.join("b.txt"), "").unwrap();

    billscan(dir.path())
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .arg("--output-dir")
        .arg(&outputs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));

    let written = fs::read_to_string(outputs.join("a.json")).unwrap();
    assert!(written.contains(r#""bill_number": "12345""#));
    assert!(!outputs.join("b.json").exists());
}

#[test]
fn config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("billscan.json");

    billscan(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    billscan(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "import.bill_no_prefix", "RL"])
        .assert()
        .success();

    billscan(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "import.bill_no_prefix"])
        .assert()
        .success()
        .stdout("\"RL\"\n");

    billscan(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "import.no_such_key", "1"])
        .assert()
        .failure();
}

#[test]
fn draft_uses_configured_prefix_when_number_missing() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("billscan.json");
    fs::write(&config, r#"{ "import": { "bill_no_prefix": "RL" } }"#).unwrap();
    let input = write(&dir, "note.txt", "Grand Total: 150.00");

    billscan(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["parse", "--draft"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""bill_no": "RL-"#))
        .stdout(predicate::str::contains(r#""shop_name": "Unknown Store""#))
        .stdout(predicate::str::contains(r#""total_amount": "150.00""#));
}
