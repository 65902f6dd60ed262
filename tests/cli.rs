use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn gsoc(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gsoc-export"));
    cmd.current_dir(dir).arg("--out-dir").arg(dir);
    cmd
}

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn csv_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".csv"))
        .collect();
    names.sort();
    names
}

/// Answer a single HTTP request with `status` and `body`
fn serve_once(status: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    base
}

// ============== organizations ==============

#[test]
fn organizations_writes_year_listing() {
    let temp = tempdir().unwrap();

    gsoc(temp.path())
        .arg("organizations")
        .arg("--year")
        .arg("2024")
        .arg("--input")
        .arg(fixture("organizations_2024.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("CSV file created:"));

    let content = fs::read_to_string(temp.path().join("gsoc_organizations_2024.csv")).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("year,name,category,description,"));
    assert!(lines[2].starts_with("2024,Rust Foundation,Programming languages,,,4,"));
}

#[test]
fn organizations_prompts_for_missing_year() {
    let temp = tempdir().unwrap();

    gsoc(temp.path())
        .arg("organizations")
        .arg("--input")
        .arg(fixture("organizations_2024.json"))
        .write_stdin("2016\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Enter GSOC year"));

    assert_eq!(csv_files(temp.path()), vec!["gsoc_organizations_2016.csv"]);
}

#[test]
fn organizations_rejects_non_integer_year() {
    let temp = tempdir().unwrap();

    gsoc(temp.path())
        .arg("organizations")
        .arg("--year")
        .arg("twenty")
        .arg("--input")
        .arg(fixture("organizations_2024.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid year"));

    assert!(csv_files(temp.path()).is_empty());
}

#[test]
fn organizations_rejects_bad_prompted_year() {
    let temp = tempdir().unwrap();

    gsoc(temp.path())
        .arg("organizations")
        .arg("--input")
        .arg(fixture("organizations_2024.json"))
        .write_stdin("next one\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid year"));

    assert!(csv_files(temp.path()).is_empty());
}

#[test]
fn organizations_fetches_year_endpoint() {
    let temp = tempdir().unwrap();
    let body = fs::read_to_string(fixture("organizations_2024.json")).unwrap();
    let base = serve_once("200 OK", body);

    gsoc(temp.path())
        .arg("--api-base")
        .arg(&base)
        .arg("--no-proxy")
        .arg("organizations")
        .arg("--year")
        .arg("2024")
        .assert()
        .success();

    let content = fs::read_to_string(temp.path().join("gsoc_organizations_2024.csv")).unwrap();
    assert_eq!(content.lines().count(), 3);
}

// ============== students ==============

#[test]
fn students_filters_to_stdout() {
    let temp = tempdir().unwrap();

    let assert = gsoc(temp.path())
        .arg("--stdout")
        .arg("students")
        .arg("--year")
        .arg("2024")
        .arg("--technology")
        .arg("RUST")
        .arg("--input")
        .arg(fixture("organizations.json"))
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("year,organization_name,"));
    assert!(lines[1].contains("Jane Smith"));
    assert!(lines[2].contains("Li Wei"));
    assert!(csv_files(temp.path()).is_empty());
}

#[test]
fn students_jsonl_output() {
    let temp = tempdir().unwrap();

    let assert = gsoc(temp.path())
        .arg("--format")
        .arg("jsonl")
        .arg("--stdout")
        .arg("students")
        .arg("--input")
        .arg(fixture("organizations.json"))
        .assert()
        .success();

    let items = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["organization_topics"], "Programming Languages, Web");
    assert_eq!(items[4]["organization_name"], "OpenStreetMap");
    assert_eq!(items[4]["organization_topics"], "");
}

#[test]
fn students_file_name_from_filters() {
    let temp = tempdir().unwrap();

    gsoc(temp.path())
        .arg("students")
        .arg("--organization")
        .arg("python software")
        .arg("--input")
        .arg(fixture("organizations.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Filtered CSV created:"));

    assert_eq!(
        csv_files(temp.path()),
        vec!["gsoc_students_python_software.csv"]
    );
    let content =
        fs::read_to_string(temp.path().join("gsoc_students_python_software.csv")).unwrap();
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn students_interactive_prompts() {
    let temp = tempdir().unwrap();

    gsoc(temp.path())
        .arg("students")
        .arg("--interactive")
        .arg("--input")
        .arg(fixture("organizations.json"))
        .write_stdin("2023\n\n\n\n\n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Filter by topic (optional): "));

    let content = fs::read_to_string(temp.path().join("gsoc_students_2023.csv")).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("Jane Doe"));
    assert!(lines[2].contains("Ana Silva"));
}

#[test]
fn students_missing_topics_never_match() {
    let temp = tempdir().unwrap();

    let assert = gsoc(temp.path())
        .arg("--stdout")
        .arg("students")
        .arg("--category")
        .arg("data")
        .arg("--topic")
        .arg("maps")
        .arg("--input")
        .arg(fixture("organizations.json"))
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout.lines().count(), 1);
}

#[test]
fn students_quiet_suppresses_status() {
    let temp = tempdir().unwrap();

    gsoc(temp.path())
        .arg("-q")
        .arg("students")
        .arg("--input")
        .arg(fixture("organizations.json"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(csv_files(temp.path()), vec!["gsoc_students.csv"]);
}

#[test]
fn students_explicit_output_path() {
    let temp = tempdir().unwrap();
    let output = temp.path().join("exports/all.json");

    gsoc(temp.path())
        .arg("--format")
        .arg("json")
        .arg("students")
        .arg("--input")
        .arg(fixture("organizations.json"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Filtered JSON created:"));

    let value: Value = serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
    assert_eq!(value.as_array().map(|a| a.len()), Some(5));
}

#[test]
fn students_fetches_all_endpoint() {
    let temp = tempdir().unwrap();
    let body = fs::read_to_string(fixture("organizations.json")).unwrap();
    let base = serve_once("200 OK", body);

    gsoc(temp.path())
        .arg("--api-base")
        .arg(&base)
        .arg("--no-proxy")
        .arg("students")
        .arg("--student")
        .arg("jane")
        .assert()
        .success();

    let content = fs::read_to_string(temp.path().join("gsoc_students_jane.csv")).unwrap();
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn students_http_error_writes_nothing() {
    let temp = tempdir().unwrap();
    let base = serve_once("500 Internal Server Error", "{}".to_string());

    gsoc(temp.path())
        .arg("--api-base")
        .arg(&base)
        .arg("--no-proxy")
        .arg("students")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch data"))
        .stderr(predicate::str::contains("HTTP 500"))
        .stderr(predicate::str::contains("--api-base"));

    assert!(csv_files(temp.path()).is_empty());
}

#[test]
fn students_tolerates_loose_values() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("loose.json");
    fs::write(
        &input,
        r#"[{"name":"Loose Org","num_projects":"12","years":{
            "2020":null,
            "2021":{"projects":[{"student_name":"Kim","title":"K"}]}}}]"#,
    )
    .unwrap();

    let assert = gsoc(temp.path())
        .arg("--stdout")
        .arg("students")
        .arg("--input")
        .arg(&input)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("2021,Loose Org,,Kim,K,"));
}

#[test]
fn organizations_keeps_string_project_count() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("loose.json");
    fs::write(&input, r#"{"organizations":[{"name":"Loose Org","num_projects":"12"}]}"#).unwrap();

    let assert = gsoc(temp.path())
        .arg("--stdout")
        .arg("organizations")
        .arg("--year")
        .arg("2024")
        .arg("--input")
        .arg(&input)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.lines().nth(1).unwrap().starts_with("2024,Loose Org,,,,12,"));
}

#[test]
fn students_bad_value_names_position() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("bad.json");
    fs::write(&input, "[\n{\"name\": \"A\"},\n{\"name\": 5}\n]").unwrap();

    gsoc(temp.path())
        .arg("students")
        .arg("--input")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));

    assert!(csv_files(temp.path()).is_empty());
}

#[test]
fn students_missing_input_file() {
    let temp = tempdir().unwrap();

    gsoc(temp.path())
        .arg("students")
        .arg("--input")
        .arg(temp.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));

    assert!(csv_files(temp.path()).is_empty());
}
