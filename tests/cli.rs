use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

const HEADER: &str = "age,sex,cp,trestbps,chol,fbs,restecg,thalach,exang,oldpeak,slope,ca,thal,target";

fn run(input: &Path, output: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cleveland-clean"))
        .arg("--input")
        .arg(input)
        .arg("--output")
        .arg(output)
        .args(extra)
        .output()
        .expect("binary runs")
}

fn parse_row(line: &str) -> Vec<f64> {
    line.split(',').map(|v| v.parse().unwrap()).collect()
}

#[test]
fn cleans_raw_file_end_to_end() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("processed.cleveland.data");
    let output = dir.path().join("data").join("cleveland.csv");
    fs::write(
        &input,
        "63,1,1,145,233,1,2,150,0,2.3,3,0,6,0\n\
         63,1,1,145,233,1,2,150,0,2.3,3,?,6,0\n\
         67,1,4,160,286,0,2,108,1,1.5,2,3,3,2\n",
    )
    .unwrap();

    let result = run(&input, &output, &["--verify"]);
    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], HEADER);
    assert_eq!(
        parse_row(lines[1]),
        vec![63.0, 1.0, 1.0, 145.0, 233.0, 1.0, 2.0, 150.0, 0.0, 2.3, 3.0, 0.0, 6.0, 0.0]
    );
    assert_eq!(parse_row(lines[2])[0], 67.0);
}

#[test]
fn malformed_row_fails_with_diagnostic() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("processed.cleveland.data");
    let output = dir.path().join("cleveland.csv");
    fs::write(&input, "63,1,1,145,233,1,2,150,0,2.3,3,0,6,0\n63,1,1\n").unwrap();

    let result = run(&input, &output, &[]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("expected 14 columns"));
    assert!(!output.exists());
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();

    let result = run(&dir.path().join("absent.data"), &dir.path().join("out.csv"), &[]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("cannot open input"));
}
