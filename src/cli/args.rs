use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the mockgen binary.
#[derive(Parser, Debug)]
#[command(
    name = "mockgen",
    version,
    about = "Generate Swift test doubles from interface models"
)]
pub struct CliArgs {
    // ==================== Inputs and Output ====================
    /// Interface model files (`.json`) or directories containing them.
    pub inputs: Vec<PathBuf>,

    /// Write the generated file here instead of stdout.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Glob patterns of input files to skip.
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Path to mockgen.json. Defaults to ./mockgen.json when present.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // ==================== Generated File ====================
    /// Text placed at the top of the generated file.
    #[arg(long)]
    pub header: Option<String>,

    /// Modules imported by the generated file.
    #[arg(long = "custom-imports", alias = "customImports", value_delimiter = ',')]
    pub custom_imports: Vec<String>,

    /// Modules imported with `@testable import`.
    #[arg(
        long = "testable-imports",
        alias = "testableImports",
        value_delimiter = ','
    )]
    pub testable_imports: Vec<String>,

    // ==================== Rendering ====================
    /// Route method bodies through the `mockFunc` runtime helper.
    #[arg(long = "use-template-func", alias = "useTemplateFunc")]
    pub use_template_func: bool,

    /// Let tests reset call counters.
    #[arg(long = "allow-set-call-count", alias = "allowSetCallCount")]
    pub allow_set_call_count: bool,

    /// Record the arguments of every call.
    #[arg(long = "enable-args-history", alias = "enableFuncArgsHistory")]
    pub enable_func_args_history: bool,

    /// Leave wrapper-backed storage of publishers uninitialized.
    #[arg(
        long = "disable-combine-default-values",
        alias = "disableCombineDefaultValues"
    )]
    pub disable_combine_default_values: bool,

    // ==================== Execution and Reporting ====================
    /// Number of worker threads. Defaults to the number of CPUs.
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Colorize diagnostics even when stderr is not a terminal.
    #[arg(long)]
    pub pretty: bool,

    /// Never colorize diagnostics.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Also report informational diagnostics.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
