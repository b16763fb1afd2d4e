use super::args::CliArgs;
use super::config::ResolvedOptions;
use super::driver::{assemble_file, discover_inputs, generate, run};
use clap::Parser;
use mockgen_common::diagnostic_codes;
use std::path::{Path, PathBuf};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test dir");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

const COUNTER: &str = r#"{"interfaces": [{
  "name": "Counter",
  "members": [{"kind": "variable", "name": "count", "type": "Int", "readWrite": true, "offset": 10}]
}]}"#;

const EVENTS_A: &str = r#"{"interfaces": [{
  "name": "Alpha",
  "members": [{"kind": "typeAlias", "name": "Handler", "type": "() -> Void", "offset": 1}]
}]}"#;

const EVENTS_B: &str = r#"{"interfaces": [{
  "name": "Beta",
  "members": [{"kind": "typeAlias", "name": "Handler", "type": "(Int) -> Void", "offset": 1}]
}]}"#;

#[test]
fn discovers_json_files_recursively_and_sorted() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "b.json", COUNTER);
    write_file(temp.path(), "nested/a.json", COUNTER);
    write_file(temp.path(), "notes.txt", "ignored");

    let files = discover_inputs(&[temp.path().to_path_buf()], &[]).expect("discovery");
    let names: Vec<_> = files
        .iter()
        .map(|p| p.strip_prefix(temp.path()).expect("under root").to_path_buf())
        .collect();
    assert_eq!(
        names,
        vec![PathBuf::from("b.json"), PathBuf::from("nested/a.json")]
    );
}

#[test]
fn exclude_patterns_skip_files() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "keep.json", COUNTER);
    write_file(temp.path(), "Legacy/old.json", COUNTER);

    let files = discover_inputs(&[temp.path().to_path_buf()], &["Legacy/**".to_string()])
        .expect("discovery");
    assert_eq!(files, vec![temp.path().join("keep.json")]);
}

#[test]
fn empty_input_set_is_an_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    assert!(discover_inputs(&[temp.path().to_path_buf()], &[]).is_err());
    assert!(discover_inputs(&[temp.path().join("missing")], &[]).is_err());
}

#[test]
fn generates_file_with_header_and_imports() {
    let temp = tempfile::tempdir().expect("temp dir");
    let file = write_file(temp.path(), "counter.json", COUNTER);
    let options = ResolvedOptions {
        header: Some("// Generated by mockgen".to_string()),
        custom_imports: vec![
            "Foundation".to_string(),
            "Combine".to_string(),
            "Foundation".to_string(),
        ],
        testable_imports: vec!["App".to_string()],
        ..ResolvedOptions::default()
    };

    let result = generate(&[file], &options).expect("generation");
    assert!(result.text.starts_with(
        "// Generated by mockgen\n\nimport Combine\nimport Foundation\n@testable import App\n\nfinal class CounterMock: Counter, MockAssertable {\n"
    ));
    assert!(result.text.ends_with("    case countSetter(value: Int)\n}\n"));
    assert!(result.diagnostics.is_empty());
}

#[test]
fn mocks_are_ordered_by_interface_name() {
    let temp = tempfile::tempdir().expect("temp dir");
    let b = write_file(temp.path(), "b.json", EVENTS_B);
    let a = write_file(temp.path(), "a.json", EVENTS_A);

    let result = generate(&[b, a], &ResolvedOptions::default()).expect("generation");
    let names: Vec<&str> = result.mocks.iter().map(|m| m.interface_name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
    let alpha = result.text.find("class AlphaMock").expect("alpha");
    let beta = result.text.find("class BetaMock").expect("beta");
    assert!(alpha < beta);
}

#[test]
fn reports_alias_conflicts_across_files() {
    let temp = tempfile::tempdir().expect("temp dir");
    let a = write_file(temp.path(), "a.json", EVENTS_A);
    let b = write_file(temp.path(), "b.json", EVENTS_B);

    let result = generate(&[a, b], &ResolvedOptions::default()).expect("generation");
    let types: Vec<&str> = result
        .whitelist
        .get("Handler")
        .expect("Handler should conflict")
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(types.len(), 2);
    assert!(types.contains(&"() -> Void"));
    assert!(types.contains(&"(Int) -> Void"));

    let conflicts: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.code == diagnostic_codes::AMBIGUOUS_TYPE_ALIAS)
        .collect();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].member, "Handler");
    assert!(conflicts[0].message_text.contains("() -> Void, (Int) -> Void"));
}

#[test]
fn output_is_stable_across_worker_counts() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "a.json", EVENTS_A);
    write_file(temp.path(), "b.json", EVENTS_B);
    write_file(temp.path(), "c.json", COUNTER);

    let run_with = |jobs: &str| {
        let args = CliArgs::try_parse_from(["mockgen", ".", "-j", jobs]).expect("args");
        run(&args, temp.path()).expect("run").text
    };
    let single = run_with("1");
    assert_eq!(run_with("4"), single);
    assert_eq!(run_with("4"), single);
}

#[test]
fn invalid_model_aborts_with_path() {
    let temp = tempfile::tempdir().expect("temp dir");
    let file = write_file(temp.path(), "broken.json", "{\"interfaces\": [");
    let err = generate(&[file], &ResolvedOptions::default()).expect_err("should fail");
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
fn run_writes_output_and_reads_config() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "models/counter.json", COUNTER);
    write_file(
        temp.path(),
        "mockgen.json",
        r#"{"testableImports": ["App"], "allowSetCallCount": "true"}"#,
    );

    let args = CliArgs::try_parse_from(["mockgen", "models", "-o", "out/Mocks.swift"])
        .expect("args");
    let result = run(&args, temp.path()).expect("run");

    let written = std::fs::read_to_string(temp.path().join("out/Mocks.swift")).expect("output");
    assert_eq!(written, result.text);
    assert!(written.starts_with("@testable import App\n\n"));
    assert_eq!(result.input_files, vec![temp.path().join("models/counter.json")]);
}

#[test]
fn assemble_without_mocks_is_header_only() {
    let options = ResolvedOptions {
        header: Some("// Empty\n".to_string()),
        ..ResolvedOptions::default()
    };
    assert_eq!(assemble_file(&options, &[]), "// Empty\n\n");
}
