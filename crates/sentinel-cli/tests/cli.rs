use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("sentinel").unwrap();
    cmd.env_remove("SENTINEL_CONFIG").env_remove("SENTINEL_DICTIONARY");
    cmd
}

#[test]
fn scan_frame_blocks_leetspeak() {
    cmd()
        .args(["--output", "json", "scan-frame", "--tokens", r#"["1GN0RE", "PREV1OUS"]"#])
        .assert()
        .success()
        .stdout(contains(r#""decision": "block""#))
        .stdout(contains(r#""matched_phrase": "ignore previous""#));
}

#[test]
fn scan_frame_passes_benign_text() {
    cmd()
        .args(["scan-frame", "--tokens", r#"["Hello", "World"]"#])
        .assert()
        .success()
        .stdout(contains("PASS"))
        .stdout(contains("No threat phrases detected."));
}

#[test]
fn scan_frame_explains_unreadable_frame() {
    cmd()
        .args(["--output", "json", "scan-frame", "--tokens", r#"["...", "\u200b"]"#])
        .assert()
        .success()
        .stdout(contains(r#""decision": "pass""#))
        .stdout(contains("No readable text detected in image."));
}

#[test]
fn scan_frame_accepts_token_objects() {
    cmd()
        .args([
            "--output",
            "yaml",
            "scan-frame",
            "--tokens",
            r#"[{"text": "funds", "bbox": {"x": 120, "y": 10, "width": 50, "height": 20}},
                {"text": "TRANSFER", "bbox": {"x": 5, "y": 12, "width": 90, "height": 20}}]"#,
        ])
        .assert()
        .success()
        .stdout(contains("decision: block"))
        .stdout(contains("transfer funds"));
}

#[test]
fn scan_frame_rejects_malformed_tokens() {
    cmd()
        .args(["scan-frame", "--tokens", "not json"])
        .assert()
        .failure()
        .stderr(contains("--tokens"));
}

#[test]
fn cross_modal_orthogonal_is_mismatch() {
    cmd()
        .args([
            "--output",
            "json",
            "cross-modal",
            "--frame",
            "[1.0, 0.0]",
            "--transcript",
            "[0.0, 1.0]",
        ])
        .assert()
        .success()
        .stdout(contains(r#""decision": "mismatch""#));
}

#[test]
fn cross_modal_dimension_mismatch_fails() {
    cmd()
        .args([
            "cross-modal",
            "--frame",
            "[0.1, 0.2, 0.3]",
            "--transcript",
            "[0.1, 0.2]",
        ])
        .assert()
        .failure()
        .stderr(contains("dimension mismatch"));
}

#[test]
fn cross_modal_reads_embeddings_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let frame = dir.path().join("frame.json");
    let transcript = dir.path().join("transcript.json");
    std::fs::write(&frame, "[0.6, 0.8]").unwrap();
    std::fs::write(&transcript, "[0.6, 0.8]").unwrap();

    cmd()
        .args(["cross-modal", "--frame"])
        .arg(format!("@{}", frame.display()))
        .arg("--transcript")
        .arg(format!("@{}", transcript.display()))
        .assert()
        .success()
        .stdout(contains("MATCH").and(contains("MISMATCH").not()));
}

#[test]
fn normalize_prints_canonical_text() {
    cmd()
        .args(["normalize", "T R A N S F E R", "FUND$"])
        .assert()
        .success()
        .stdout(contains("transfer funds"));
}

#[test]
fn builtin_dictionary_lists_phrases() {
    cmd()
        .args(["--output", "json", "dictionary"])
        .assert()
        .success()
        .stdout(contains(r#""count": 7"#))
        .stdout(contains("disable guardrails"));
}

#[test]
fn custom_dictionary_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("threats.json");
    std::fs::write(&path, r#"{"Wire The Money": 1.0, "act now": 0.5}"#).unwrap();

    cmd()
        .arg("--dictionary")
        .arg(&path)
        .args(["--output", "json", "scan-frame", "--tokens", r#"["WIRE", "THE", "M0NEY"]"#])
        .assert()
        .success()
        .stdout(contains(r#""matched_phrase": "wire the money""#));
}

#[test]
fn empty_dictionary_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.tsv");
    std::fs::write(&path, "# nothing here\n").unwrap();

    cmd()
        .arg("--dictionary")
        .arg(&path)
        .arg("dictionary")
        .assert()
        .failure()
        .stderr(contains("configuration error"));
}

#[test]
fn config_file_sets_similarity_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sentinel.yaml");
    std::fs::write(&path, "similarity:\n  threshold: 0.9\n").unwrap();

    // cos = 0.8: a match at the default threshold, a mismatch at 0.9
    cmd()
        .arg("--config")
        .arg(&path)
        .args([
            "--output",
            "json",
            "cross-modal",
            "--frame",
            "[1.0, 0.0]",
            "--transcript",
            "[0.8, 0.6]",
        ])
        .assert()
        .success()
        .stdout(contains(r#""decision": "mismatch""#));
}

#[test]
fn verbose_logs_dictionary_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("threats.tsv");
    std::fs::write(&path, "act now\t0.5\n").unwrap();

    cmd()
        .env_remove("RUST_LOG")
        .arg("--verbose")
        .arg("--dictionary")
        .arg(&path)
        .arg("dictionary")
        .assert()
        .success()
        .stderr(contains("dictionary path overridden on the command line"))
        .stderr(contains("engines ready"));
}

#[test]
fn quiet_by_default() {
    cmd()
        .env_remove("RUST_LOG")
        .arg("dictionary")
        .assert()
        .success()
        .stderr(contains("engines ready").not());
}
