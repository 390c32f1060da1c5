use std::fs;

use assert_cmd::Command;
use docfixture_test_support::docx_json;
use predicates::prelude::*;
use tempfile::TempDir;

fn docfixture(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("docfixture").expect("binary");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn bare_invocation_creates_both_word_documents() {
    let temp = TempDir::new().expect("tempdir");

    let output = docfixture(&temp)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).expect("stdout utf8");
    let rich_at = stdout.find("✓ Created: test-document.docx").expect("rich line");
    let simple_at = stdout.find("✓ Created: simple-test.docx").expect("simple line");
    assert!(rich_at < simple_at);
    assert!(stdout.contains("All test documents created successfully!"));
    assert!(stdout.contains("Note: DOC format requires Microsoft Word or LibreOffice"));

    let simple = fs::read(temp.path().join("simple-test.docx")).expect("read simple");
    assert!(docx_json(&simple).contains("Simple Test Document"));
    assert!(temp.path().join("test-document.docx").exists());
}

#[test]
fn only_pdf_skips_docx_note() {
    let temp = TempDir::new().expect("tempdir");

    docfixture(&temp)
        .args(["generate", "--only", "pdf", "--output-dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Created: out/test-cv.pdf"))
        .stdout(predicate::str::contains("Note: DOC format").not());

    let pdf = fs::read(temp.path().join("out/test-cv.pdf")).expect("read pdf");
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(!temp.path().join("out/simple-test.docx").exists());
}

#[test]
fn no_clobber_reports_skipped_files() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join("test-document.docx"), b"keep me").expect("seed");

    docfixture(&temp)
        .args(["generate", "--no-clobber"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "- Skipped: test-document.docx (already exists)",
        ))
        .stdout(predicate::str::contains("✓ Created: simple-test.docx"));

    assert_eq!(
        fs::read(temp.path().join("test-document.docx")).expect("read"),
        b"keep me"
    );
}

#[test]
fn no_clobber_with_every_target_present_reports_nothing_created() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join("test-document.docx"), b"keep me").expect("seed");
    fs::write(temp.path().join("simple-test.docx"), b"keep me too").expect("seed");

    docfixture(&temp)
        .args(["generate", "--no-clobber"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "- Skipped: simple-test.docx (already exists)",
        ))
        .stdout(predicate::str::contains(
            "No test documents created; all targets already exist.",
        ))
        .stdout(predicate::str::contains("created successfully").not())
        .stdout(predicate::str::contains("Note: DOC format").not());
}

#[test]
fn repeated_only_generates_fixture_once() {
    let temp = TempDir::new().expect("tempdir");

    let output = docfixture(&temp)
        .args(["generate", "--only", "simple", "--only", "simple"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).expect("stdout utf8");
    assert_eq!(stdout.matches("✓ Created: simple-test.docx").count(), 1);
    assert!(!temp.path().join("test-document.docx").exists());
}

#[test]
fn config_file_controls_names_and_selection() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(
        temp.path().join(".docfixture.toml"),
        "[generate]\nfixtures = [\"simple\", \"pdf\"]\n\n[files]\npdf = \"resume.pdf\"\n",
    )
    .expect("write config");

    docfixture(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Created: simple-test.docx"))
        .stdout(predicate::str::contains("✓ Created: resume.pdf"))
        .stdout(predicate::str::contains("test-document.docx").not());
}

#[test]
fn list_json_marks_enabled_fixtures() {
    let temp = TempDir::new().expect("tempdir");

    let output = docfixture(&temp)
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    let fixtures = value["fixtures"].as_array().expect("fixtures array");
    assert_eq!(fixtures.len(), 3);
    assert_eq!(fixtures[0]["name"], "rich");
    assert_eq!(fixtures[0]["enabled"], true);
    assert_eq!(fixtures[2]["file"], "test-cv.pdf");
    assert_eq!(fixtures[2]["enabled"], false);
}

#[test]
fn list_plain_shows_descriptions() {
    let temp = TempDir::new().expect("tempdir");

    docfixture(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("* rich"))
        .stdout(predicate::str::contains("  pdf"))
        .stdout(predicate::str::contains("Minimal DOCX with a title and three paragraphs"));
}

#[test]
fn invalid_config_fails_with_message() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(
        temp.path().join(".docfixture.toml"),
        "[generate]\nfixtures = [\"slides\"]\n",
    )
    .expect("write config");

    docfixture(&temp)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error creating documents"))
        .stderr(predicate::str::contains("unknown fixture 'slides'"));
}

#[test]
fn write_failure_exits_non_zero() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join("blocker"), b"file").expect("seed");

    docfixture(&temp)
        .args(["generate", "--output-dir", "blocker/sub"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error creating documents: failed to write"));
}
