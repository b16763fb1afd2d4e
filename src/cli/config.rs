use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use mockgen_emitter::RenderOptions;

use super::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "mockgen.json";

/// Custom deserializer for boolean options that accepts both bool and string values.
/// This handles configs written as `"useTemplateFunc": "true"`.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => {
            let normalized = s.trim().to_lowercase();
            match normalized.as_str() {
                "true" | "1" | "yes" | "on" => Ok(Some(true)),
                "false" | "0" | "no" | "off" => Ok(Some(false)),
                _ => Err(Error::custom(format!(
                    "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                    s
                ))),
            }
        }
    }
}

/// Contents of `mockgen.json`. Every field is optional.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MockgenConfig {
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub custom_imports: Option<Vec<String>>,
    #[serde(default)]
    pub testable_imports: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub use_template_func: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub allow_set_call_count: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub enable_func_args_history: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub disable_combine_default_values: Option<bool>,
}

pub fn parse_config(source: &str) -> Result<MockgenConfig> {
    serde_json::from_str(source).context("failed to parse mockgen config")
}

pub fn load_config(path: &Path) -> Result<MockgenConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("invalid config: {}", path.display()))
}

/// The explicit `--config` path, else `mockgen.json` in `cwd` if it exists.
pub fn find_config(args: &CliArgs, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(if path.is_absolute() {
            path.clone()
        } else {
            cwd.join(path)
        });
    }
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Settings for one run after merging CLI flags over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub render: RenderOptions,
    pub header: Option<String>,
    pub custom_imports: Vec<String>,
    pub testable_imports: Vec<String>,
    pub exclude: Vec<String>,
}

/// Flags given on the command line win; the config fills in the rest.
pub fn resolve_options(args: &CliArgs, config: Option<&MockgenConfig>) -> ResolvedOptions {
    let config = config.cloned().unwrap_or_default();
    let flag = |cli: bool, file: Option<bool>| cli || file.unwrap_or(false);
    let list = |cli: &[String], file: Option<Vec<String>>| {
        if cli.is_empty() {
            file.unwrap_or_default()
        } else {
            cli.to_vec()
        }
    };

    ResolvedOptions {
        render: RenderOptions {
            use_template_func: flag(args.use_template_func, config.use_template_func),
            allow_set_call_count: flag(args.allow_set_call_count, config.allow_set_call_count),
            enable_func_args_history: flag(
                args.enable_func_args_history,
                config.enable_func_args_history,
            ),
            disable_combine_default_values: flag(
                args.disable_combine_default_values,
                config.disable_combine_default_values,
            ),
        },
        header: args.header.clone().or(config.header),
        custom_imports: list(&args.custom_imports, config.custom_imports),
        testable_imports: list(&args.testable_imports, config.testable_imports),
        exclude: list(&args.exclude, config.exclude),
    }
}
