use super::args::CliArgs;
use super::config::{
    CONFIG_FILE_NAME, MockgenConfig, find_config, load_config, parse_config, resolve_options,
};
use clap::Parser;
use std::path::{Path, PathBuf};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["mockgen", "models"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("args should parse")
}

#[test]
fn parses_camel_case_config() {
    let config = parse_config(
        r#"{
          "header": "// Generated",
          "customImports": ["Combine"],
          "testableImports": ["App"],
          "exclude": ["**/Legacy/**"],
          "useTemplateFunc": true,
          "allowSetCallCount": false
        }"#,
    )
    .expect("config should parse");

    assert_eq!(config.header.as_deref(), Some("// Generated"));
    assert_eq!(config.custom_imports, Some(vec!["Combine".to_string()]));
    assert_eq!(config.testable_imports, Some(vec!["App".to_string()]));
    assert_eq!(config.exclude, Some(vec!["**/Legacy/**".to_string()]));
    assert_eq!(config.use_template_func, Some(true));
    assert_eq!(config.allow_set_call_count, Some(false));
    assert_eq!(config.enable_func_args_history, None);
}

#[test]
fn accepts_string_booleans() {
    let config = parse_config(
        r#"{"enableFuncArgsHistory": "yes", "disableCombineDefaultValues": "off"}"#,
    )
    .expect("config should parse");
    assert_eq!(config.enable_func_args_history, Some(true));
    assert_eq!(config.disable_combine_default_values, Some(false));
}

#[test]
fn rejects_invalid_boolean_strings() {
    let err = parse_config(r#"{"useTemplateFunc": "sometimes"}"#).expect_err("should fail");
    assert!(format!("{err:#}").contains("invalid boolean value"));
}

#[test]
fn empty_config_is_default() {
    assert_eq!(
        parse_config("{}").expect("config should parse"),
        MockgenConfig::default()
    );
}

#[test]
fn load_config_reports_path_on_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = write_file(temp.path(), CONFIG_FILE_NAME, "{ not json");
    let err = load_config(&path).expect_err("should fail");
    assert!(format!("{err:#}").contains(CONFIG_FILE_NAME));
}

#[test]
fn finds_config_in_working_directory() {
    let temp = tempfile::tempdir().expect("temp dir");
    assert_eq!(find_config(&args(&[]), temp.path()), None);

    let path = write_file(temp.path(), CONFIG_FILE_NAME, "{}");
    assert_eq!(find_config(&args(&[]), temp.path()), Some(path));
}

#[test]
fn explicit_config_path_is_resolved_against_cwd() {
    let temp = tempfile::tempdir().expect("temp dir");
    let found = find_config(&args(&["--config", "conf/mock.json"]), temp.path());
    assert_eq!(found, Some(temp.path().join("conf/mock.json")));
}

#[test]
fn cli_flags_win_over_config() {
    let config = parse_config(
        r#"{
          "header": "// From file",
          "customImports": ["Combine"],
          "allowSetCallCount": true,
          "useTemplateFunc": false
        }"#,
    )
    .expect("config should parse");

    let resolved = resolve_options(
        &args(&[
            "--use-template-func",
            "--header",
            "// From CLI",
            "--custom-imports",
            "Foundation",
        ]),
        Some(&config),
    );
    assert!(resolved.render.use_template_func);
    assert!(resolved.render.allow_set_call_count);
    assert!(!resolved.render.enable_func_args_history);
    assert_eq!(resolved.header.as_deref(), Some("// From CLI"));
    assert_eq!(resolved.custom_imports, vec!["Foundation"]);
}

#[test]
fn missing_config_uses_defaults() {
    let resolved = resolve_options(&args(&[]), None);
    assert_eq!(resolved, Default::default());
}
