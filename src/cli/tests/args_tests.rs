use super::args::CliArgs;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn parses_inputs_and_output() {
    let args = CliArgs::try_parse_from(["mockgen", "models", "extra.json", "-o", "Mocks.swift"])
        .expect("args should parse");
    assert_eq!(
        args.inputs,
        vec![PathBuf::from("models"), PathBuf::from("extra.json")]
    );
    assert_eq!(args.output, Some(PathBuf::from("Mocks.swift")));
    assert!(!args.use_template_func);
    assert_eq!(args.jobs, None);
}

#[test]
fn splits_comma_delimited_lists() {
    let args = CliArgs::try_parse_from([
        "mockgen",
        "models",
        "--custom-imports",
        "Combine,Foundation",
        "--testable-imports",
        "App",
        "--exclude",
        "**/Generated/**,*.skip.json",
    ])
    .expect("args should parse");
    assert_eq!(args.custom_imports, vec!["Combine", "Foundation"]);
    assert_eq!(args.testable_imports, vec!["App"]);
    assert_eq!(args.exclude, vec!["**/Generated/**", "*.skip.json"]);
}

#[test]
fn accepts_camel_case_aliases() {
    let args = CliArgs::try_parse_from([
        "mockgen",
        "models",
        "--useTemplateFunc",
        "--allowSetCallCount",
        "--enableFuncArgsHistory",
        "--disableCombineDefaultValues",
        "--customImports",
        "Combine",
    ])
    .expect("args should parse");
    assert!(args.use_template_func);
    assert!(args.allow_set_call_count);
    assert!(args.enable_func_args_history);
    assert!(args.disable_combine_default_values);
    assert_eq!(args.custom_imports, vec!["Combine"]);
}

#[test]
fn parses_execution_flags() {
    let args = CliArgs::try_parse_from(["mockgen", "models", "-j", "4", "--no-color", "-v"])
        .expect("args should parse");
    assert_eq!(args.jobs, Some(4));
    assert!(args.no_color);
    assert!(args.verbose);
    assert!(!args.pretty);
}

#[test]
fn rejects_non_numeric_jobs() {
    assert!(CliArgs::try_parse_from(["mockgen", "models", "--jobs", "many"]).is_err());
}
