//! Integration tests for the docai binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use tempfile::TempDir;

const PROCESS_PATH: &str = "/v1/projects/acme/locations/us/processors/p1:process";

/// `docai --root <root>` with every docai-related variable cleared.
fn docai(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docai").unwrap();
    for var in [
        "GOOGLE_APPLICATION_CREDENTIALS",
        "DOCAI_PROCESSOR_ID",
        "DOCAI_LOCATION",
        "DOCAI_ENDPOINT",
        "DOCAI_ACCESS_TOKEN",
        "CLICOLOR_FORCE",
    ] {
        cmd.env_remove(var);
    }
    cmd.arg("--root").arg(root);
    cmd
}

fn write_credentials(root: &Path, body: &str) -> PathBuf {
    let path = root.join("docai.json");
    fs::write(&path, body).unwrap();
    path
}

/// Fully configured command pointed at a mock server.
fn configured(root: &Path, server: &Server) -> Command {
    let creds = write_credentials(root, r#"{"project_id": "acme", "type": "service_account"}"#);
    let mut cmd = docai(root);
    cmd.env("GOOGLE_APPLICATION_CREDENTIALS", creds)
        .env("DOCAI_PROCESSOR_ID", "p1")
        .env("DOCAI_ENDPOINT", server.url())
        .env("DOCAI_ACCESS_TOKEN", "test-token");
    cmd
}

fn invoice_response() -> String {
    serde_json::json!({
        "document": {
            "text": "INVOICE INV-1\nWidget 3\nTotal 42.00",
            "entities": [
                {"type": "invoice_id", "mentionText": "INV-1"},
                {"type": "line_item", "mentionText": "Widget",
                 "properties": [{"type": "line_item/qty", "mentionText": "3"}]},
                {"type": "total_amount", "mentionText": "42.00"}
            ]
        }
    })
    .to_string()
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_missing_credentials_env() {
    let dir = TempDir::new().unwrap();

    docai(dir.path())
        .args(["process", "invoice.pdf"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[OCR] GOOGLE_APPLICATION_CREDENTIALS = None"))
        .stdout(predicate::str::contains(
            "[OCR] [FATAL] GOOGLE_APPLICATION_CREDENTIALS not set.",
        ));
}

#[test]
fn test_credential_file_not_found() {
    let dir = TempDir::new().unwrap();

    docai(dir.path())
        .env("GOOGLE_APPLICATION_CREDENTIALS", dir.path().join("missing.json"))
        .args(["batch"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[DOCAI] [FATAL] Google OCR credentials not found."));
}

#[test]
fn test_missing_project_id() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();
    let creds = write_credentials(dir.path(), r#"{"client_email": "svc@acme.iam"}"#);
    let input = dir.path().join("invoice.pdf");
    fs::write(&input, b"%PDF-1.7").unwrap();

    docai(dir.path())
        .env("GOOGLE_APPLICATION_CREDENTIALS", creds)
        .env("DOCAI_PROCESSOR_ID", "p1")
        .env("DOCAI_ENDPOINT", server.url())
        .env("DOCAI_ACCESS_TOKEN", "test-token")
        .arg("process")
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("project_id not found in credentials file"))
        .stdout(predicate::str::contains("Processor ID").not());

    mock.assert();
}

#[test]
fn test_missing_processor_id() {
    let dir = TempDir::new().unwrap();
    let creds = write_credentials(dir.path(), r#"{"project_id": "acme"}"#);

    docai(dir.path())
        .env("GOOGLE_APPLICATION_CREDENTIALS", creds)
        .args(["process", "invoice.pdf"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[OCR] [OK] Project ID: acme"))
        .stdout(predicate::str::contains("[FATAL] Processor ID not found."))
        .stdout(predicate::str::contains("docai_processor_id.txt"));
}

#[test]
fn test_processor_id_from_file_and_default_location() {
    let dir = TempDir::new().unwrap();
    let creds = write_credentials(dir.path(), r#"{"project_id": "acme"}"#);
    fs::write(dir.path().join("docai_processor_id.txt"), "  file-proc \n").unwrap();

    docai(dir.path())
        .env("GOOGLE_APPLICATION_CREDENTIALS", creds)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DOCAI] [OK] Processor ID (from file): file-proc"))
        .stdout(predicate::str::contains("[DOCAI] [OK] Location: us"))
        .stdout(predicate::str::contains(
            "\"processor_name\": \"projects/acme/locations/us/processors/file-proc\"",
        ));
}

#[test]
fn test_process_file_not_found() {
    let dir = TempDir::new().unwrap();
    let server = Server::new();

    configured(dir.path(), &server)
        .arg("process")
        .arg(dir.path().join("absent.pdf"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[OCR] [FATAL] File not found:"));
}

#[test]
fn test_process_unsupported_type() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "plain text").unwrap();

    configured(dir.path(), &server)
        .arg("process")
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[OCR] MIME type: application/octet-stream"))
        .stdout(predicate::str::contains("[OCR] [FATAL] Unsupported file type"));

    mock.assert();
}

#[test]
fn test_process_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", PROCESS_PATH)
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "rawDocument": {"mimeType": "application/pdf"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(invoice_response())
        .create();

    let input = dir.path().join("inv-001.pdf");
    fs::write(&input, b"%PDF-1.7 fake").unwrap();

    let output = configured(dir.path(), &server)
        .arg("process")
        .arg(&input)
        .output()
        .unwrap();
    mock.assert();

    let stdout = stdout_of(&output);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains("[OCR] File size: 13 bytes"), "stdout: {stdout}");

    let transaction_id = stdout
        .lines()
        .find_map(|line| line.strip_prefix("TRANSACTION_ID:"))
        .expect("transaction id line")
        .to_string();
    assert_eq!(transaction_id.len(), 36);

    let written: Vec<_> = fs::read_dir(dir.path().join("output"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(written.len(), 1);
    let name = written[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("inv-001_structured_"), "{name}");
    assert!(name.ends_with(".json"), "{name}");
    assert_eq!(name.len(), "inv-001_structured_YYYYMMDD.json".len());

    let result: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
    assert_eq!(
        result,
        serde_json::json!({
            "header": {"invoice_id": {"value": "INV-1", "properties": {}}},
            "line_items": [{"value": "Widget", "properties": {"qty": "3"}}],
            "footer": {"total_amount": {"value": "42.00", "properties": {}}},
            "transaction_id": transaction_id,
        })
    );
}

#[test]
fn test_process_prompts_for_path() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", PROCESS_PATH)
        .with_status(200)
        .with_body(invoice_response())
        .create();

    let input = dir.path().join("scan.png");
    fs::write(&input, b"\x89PNG").unwrap();
    let out = dir.path().join("custom.json");

    configured(dir.path(), &server)
        .args(["process", "--output"])
        .arg(&out)
        .write_stdin(format!("  \"{}\"\n", input.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter the file path (image or PDF)"))
        .stdout(predicate::str::contains("[OCR] MIME type: image/png"))
        .stdout(predicate::str::contains("TRANSACTION_ID:"));

    mock.assert();
    assert!(out.exists());
}

#[test]
fn test_process_remote_error() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("POST", PROCESS_PATH)
        .with_status(400)
        .with_body("Unsupported input file format.")
        .create();

    let input = dir.path().join("inv.pdf");
    fs::write(&input, b"%PDF").unwrap();

    configured(dir.path(), &server)
        .arg("process")
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "[OCR] [FATAL] Document AI processing failed: HTTP 400: Unsupported input file format.",
        ))
        .stdout(predicate::str::contains("TRANSACTION_ID:").not());

    assert!(!dir.path().join("output").exists());
}

#[test]
fn test_batch_processes_supported_files() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", PROCESS_PATH)
        .with_status(200)
        .with_body(invoice_response())
        .expect(2)
        .create();

    let input_dir = dir.path().join("input");
    fs::create_dir(&input_dir).unwrap();
    fs::write(input_dir.join("a.pdf"), b"%PDF").unwrap();
    fs::write(input_dir.join("b.JPG"), b"\xff\xd8").unwrap();
    fs::write(input_dir.join("readme.txt"), b"skip me").unwrap();

    configured(dir.path(), &server)
        .arg("batch")
        .assert()
        .success()
        .stdout(predicate::str::contains("[DOCAI] Using processor: projects/acme/locations/us/processors/p1"))
        .stdout(predicate::str::contains("a.pdf -> a_processed.json"))
        .stdout(predicate::str::contains("b.JPG -> b_processed.json"))
        .stdout(predicate::str::contains("[DOCAI] [DONE] Document AI processing complete"));

    mock.assert();

    let processed: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("output/a_processed.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(processed["entities"][0]["mentionText"], "INV-1");
    assert!(dir.path().join("output/b_processed.json").exists());
    assert!(!dir.path().join("output/readme_processed.json").exists());
}

#[test]
fn test_batch_aborts_on_first_failure() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", PROCESS_PATH)
        .with_status(500)
        .with_body("internal error")
        .expect(1)
        .create();

    let input_dir = dir.path().join("input");
    fs::create_dir(&input_dir).unwrap();
    fs::write(input_dir.join("a.pdf"), b"%PDF").unwrap();
    fs::write(input_dir.join("b.pdf"), b"%PDF").unwrap();

    configured(dir.path(), &server)
        .arg("batch")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[DOCAI] [ERROR] Failed to process a.pdf"))
        .stdout(predicate::str::contains("[DOCAI] [FATAL] Batch aborted at a.pdf"));

    mock.assert();
    assert!(!dir.path().join("output/b_processed.json").exists());
}

#[test]
fn test_batch_continue_on_error_writes_summary() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", PROCESS_PATH)
        .with_status(500)
        .with_body("internal error")
        .expect(2)
        .create();

    let input_dir = dir.path().join("input");
    fs::create_dir(&input_dir).unwrap();
    fs::write(input_dir.join("a.pdf"), b"%PDF").unwrap();
    fs::write(input_dir.join("b.pdf"), b"%PDF").unwrap();

    configured(dir.path(), &server)
        .args(["batch", "--continue-on-error", "--summary"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[FATAL] 2 of 2 files failed"));

    mock.assert();

    let summary = fs::read_to_string(dir.path().join("output/summary.csv")).unwrap();
    let mut lines = summary.lines();
    assert_eq!(lines.next(), Some("filename,status,output,elapsed_ms,error"));
    assert!(lines.next().unwrap().starts_with("a.pdf,error,,"));
    assert!(lines.next().unwrap().starts_with("b.pdf,error,,"));
}

#[test]
fn test_batch_missing_input_dir() {
    let dir = TempDir::new().unwrap();
    let server = Server::new();

    configured(dir.path(), &server)
        .arg("batch")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[DOCAI] [WARN] Input directory not found"));
}

#[test]
fn test_batch_no_supported_files() {
    let dir = TempDir::new().unwrap();
    let server = Server::new();
    fs::create_dir(dir.path().join("input")).unwrap();
    fs::write(dir.path().join("input/notes.docx"), b"x").unwrap();

    configured(dir.path(), &server)
        .arg("batch")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[DOCAI] [WARN] No supported files in"));
}

#[test]
fn test_config_set_processor_and_path() {
    let dir = TempDir::new().unwrap();

    docai(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));

    docai(dir.path())
        .args(["config", "set-processor", "  abc123  "])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("docai_processor_id.txt")).unwrap(),
        "abc123\n"
    );

    docai(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists"));
}
