use assert_cmd::Command;

fn triage() -> Command {
    let mut cmd = Command::cargo_bin("symptom-triage").expect("binary exists");
    cmd.env("RUST_LOG", "warn")
        .env_remove("SYMPTOM_DICTIONARY")
        .env_remove("MODEL_COLUMNS")
        .env_remove("MODEL_PATH")
        .env_remove("TRIAGE_MATCH_POLICY")
        .arg("--assets-dir")
        .arg(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"));
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("command runs");
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).expect("utf-8 stdout")
}

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("symptom-triage").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn respiratory_complaint_predicts_category_j() {
    let stdout = stdout_of(triage().args(["predict", "--text", "Pasien mengeluh BATUK dan pilek"]));
    assert!(stdout.contains("  - Batuk\n  - Pilek\n"), "{stdout}");
    assert!(stdout.contains("Diagnosa J"), "{stdout}");
    assert!(!stdout.contains("Diagnosa K"), "{stdout}");
}

#[test]
fn json_report_for_digestive_complaint() {
    let stdout = stdout_of(triage().args([
        "predict",
        "--format",
        "json",
        "--text",
        "mual, muntah dan nyeri perut sejak pagi",
    ]));
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("json report");
    assert_eq!(report["modality"], "text");
    assert_eq!(report["outcome"]["status"], "diagnoses");
    let findings = report["outcome"]["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["category"], "DIAGNOSA_K");
    let probability = findings[0]["probability"].as_f64().unwrap();
    assert!(probability > 0.5 && probability <= 1.0);
}

#[test]
fn blank_complaint_warns_without_predicting() {
    let output = triage()
        .args(["predict", "--text", "   "])
        .output()
        .expect("command runs");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("complaint text first"), "{stderr}");
}

#[test]
fn symptom_outside_model_columns_is_ignored() {
    let stdout = stdout_of(triage().args(["predict", "--text", "nyeri ulu hati"]));
    assert!(stdout.contains("not model features, ignored: Nyeri Ulu Hati"), "{stdout}");
    assert!(stdout.contains("no specific diagnosis"), "{stdout}");
}

#[test]
fn checkbox_path_suggests_close_column() {
    let output = triage()
        .args(["check", "--symptom", "PUSING,nyeri_dadaa"])
        .output()
        .expect("command runs");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("did you mean NYERI_DADA?"), "{stderr}");
}

#[test]
fn checkbox_path_predicts_circulatory() {
    let stdout = stdout_of(triage().args(["check", "--symptom", "nyeri dada,JANTUNG_BERDEBAR"]));
    assert!(stdout.contains("Diagnosa I"), "{stdout}");
    assert!(stdout.contains("Diagnosis related to the circulatory system."), "{stdout}");
}

#[test]
fn missing_assets_halt_startup() {
    let output = Command::cargo_bin("symptom-triage")
        .expect("binary exists")
        .env("RUST_LOG", "off")
        .args(["--assets-dir", "/nonexistent/triage-assets", "predict", "--text", "pusing"])
        .output()
        .expect("command runs");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "{stderr}");
}
