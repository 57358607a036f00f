use assert_cmd::Command;
use predicates::prelude::*;

const STUDENT_JSON: &str =
    r#"{"id":"UCC-0042","name":"Alejandro Parra","program":"Ing. Software","gpa":4.2}"#;

#[test]
fn demo_prints_label_body_and_stamp_in_order() {
    let mut cmd = Command::cargo_bin("registrar-cli").unwrap();
    cmd.arg("demo").arg("--date").arg("2025-03-15");

    cmd.assert().success().stdout(predicate::str::is_match(
        "(?s)^=== TRANSCRIPT ===\n\
         CERTIFICADO DE NOTAS\n.*\
         GPA: 4.20\n\
         Fecha: 2025-03-15\n\
         Sello: TRN-0042-74\n$",
    )
    .unwrap());
}

#[test]
fn issue_emits_manifest_json() {
    let mut cmd = Command::cargo_bin("registrar-cli").unwrap();
    cmd.arg("issue")
        .arg("--request-type")
        .arg("TRANSCRIPT")
        .arg("--payload")
        .arg(STUDENT_JSON)
        .arg("--date")
        .arg("2025-03-15");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""success": true"#))
        .stdout(predicate::str::contains("TRN-0042-74"))
        .stdout(predicate::str::contains("GPA: 4.20"));
}

#[test]
fn validate_failure_exits_two() {
    let mut cmd = Command::cargo_bin("registrar-cli").unwrap();
    cmd.arg("validate")
        .arg("--request-type")
        .arg("TRANSCRIPT")
        .arg("--payload")
        .arg(r#"{"id":"UCC-0042","name":"Alejandro Parra","program":"Ing. Software","gpa":0.5}"#);

    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains(r#""valid": false"#))
        .stdout(predicate::str::contains("gpa_floor"));
}

#[test]
fn malformed_student_payload_rejected() {
    let mut cmd = Command::cargo_bin("registrar-cli").unwrap();
    cmd.arg("issue")
        .arg("--request-type")
        .arg("ENROLLMENT")
        .arg("--payload")
        .arg(r#"{"id":"UCC-0042","name":"   ","program":"Ing. Software","gpa":4.2}"#);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Invalid payload"));
}

#[test]
fn unknown_request_type_rejected() {
    let mut cmd = Command::cargo_bin("registrar-cli").unwrap();
    cmd.arg("issue")
        .arg("--request-type")
        .arg("DIPLOMA")
        .arg("--payload")
        .arg(STUDENT_JSON);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown request type"));
}

#[test]
fn families_lists_both_builtins() {
    let mut cmd = Command::cargo_bin("registrar-cli").unwrap();
    cmd.arg("families");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ENROLLMENT"))
        .stdout(predicate::str::contains("TRANSCRIPT"))
        .stdout(predicate::str::contains("CONSTANCIA DE MATRÍCULA"))
        .stdout(predicate::str::contains("CERTIFICADO DE NOTAS"));
}
