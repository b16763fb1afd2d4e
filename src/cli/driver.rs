use anyhow::{Context, Result, anyhow, bail};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info_span, warn};
use walkdir::WalkDir;

use mockgen_common::{Diagnostic, diagnostic_codes};
use mockgen_emitter::{
    AliasRegistry, RenderOptions, RenderedMock, TypeAliasWhitelist, render_interface,
};
use mockgen_model::MockInput;

use super::args::CliArgs;
use super::config::{ResolvedOptions, find_config, load_config, resolve_options};

pub const INPUT_EXTENSION: &str = "json";

/// Output of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// The complete generated source file.
    pub text: String,
    /// Rendered mocks in interface-name order.
    pub mocks: Vec<RenderedMock>,
    /// Aliases declared with more than one type anywhere in the inputs.
    pub whitelist: TypeAliasWhitelist,
    pub diagnostics: Vec<Diagnostic>,
    pub input_files: Vec<PathBuf>,
}

/// Parse CLI state, generate, and write the result where requested.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<GenerationResult> {
    let config = match find_config(args, cwd) {
        Some(path) => Some(load_config(&path)?),
        None => None,
    };
    let options = resolve_options(args, config.as_ref());

    let roots: Vec<PathBuf> = args
        .inputs
        .iter()
        .map(|p| if p.is_absolute() { p.clone() } else { cwd.join(p) })
        .collect();
    let files = discover_inputs(&roots, &options.exclude)?;

    let result = match args.jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs.max(1))
                .build()
                .context("failed to build worker pool")?;
            pool.install(|| generate(&files, &options))?
        }
        None => generate(&files, &options)?,
    };

    if let Some(output) = &args.output {
        let path = if output.is_absolute() {
            output.clone()
        } else {
            cwd.join(output)
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        std::fs::write(&path, &result.text)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(result)
}

/// Expand input paths into the sorted list of model files to read.
pub fn discover_inputs(roots: &[PathBuf], exclude: &[String]) -> Result<Vec<PathBuf>> {
    if roots.is_empty() {
        bail!("no input paths given");
    }
    let excluded = build_exclude_set(exclude)?;

    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            bail!("input path does not exist: {}", root.display());
        }
        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(INPUT_EXTENSION) {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path);
            if excluded.is_match(relative) || excluded.is_match(path) {
                debug!(path = %path.display(), "excluded input");
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    if files.is_empty() {
        bail!("no interface model files found");
    }
    Ok(files)
}

fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(false)
            .build()
            .with_context(|| format!("invalid exclude pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("failed to compile exclude patterns")
}

/// Render every interface of every file and assemble one source file.
///
/// Files are rendered on the current rayon pool. Alias declarations from all
/// files are merged into one registry behind a lock.
pub fn generate(files: &[PathBuf], options: &ResolvedOptions) -> Result<GenerationResult> {
    let registry = Mutex::new(AliasRegistry::new());

    let per_file: Vec<Vec<RenderedMock>> = files
        .par_iter()
        .map(|path| render_file(path, &options.render, &registry))
        .collect::<Result<_>>()?;

    let registry = registry
        .into_inner()
        .map_err(|_| anyhow!("alias registry lock poisoned"))?;

    let mut mocks: Vec<RenderedMock> = per_file.into_iter().flatten().collect();
    mocks.sort_by(|a, b| {
        a.interface_name
            .cmp(&b.interface_name)
            .then_with(|| a.mock_name.cmp(&b.mock_name))
    });

    let whitelist = registry.conflicts();
    let mut diagnostics: Vec<Diagnostic> = mocks
        .iter()
        .flat_map(|m| m.diagnostics.iter().cloned())
        .collect();
    diagnostics.extend(cross_file_conflicts(&whitelist, &mocks));

    let text = assemble_file(options, &mocks);
    Ok(GenerationResult {
        text,
        mocks,
        whitelist,
        diagnostics,
        input_files: files.to_vec(),
    })
}

fn render_file(
    path: &Path,
    options: &RenderOptions,
    registry: &Mutex<AliasRegistry>,
) -> Result<Vec<RenderedMock>> {
    let span = info_span!("file", path = %path.display());
    let _guard = span.enter();

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let input = MockInput::from_json(&source)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let mut local = AliasRegistry::new();
    for interface in &input.interfaces {
        local.record_members(&interface.members);
    }
    registry
        .lock()
        .map_err(|_| anyhow!("alias registry lock poisoned"))?
        .merge(&local);

    input
        .interfaces
        .iter()
        .map(|interface| {
            render_interface(interface, options).with_context(|| {
                format!("failed to render {} in {}", interface.name, path.display())
            })
        })
        .collect()
}

/// Conflicts that only show up once declarations from several interfaces are combined.
fn cross_file_conflicts(whitelist: &TypeAliasWhitelist, mocks: &[RenderedMock]) -> Vec<Diagnostic> {
    let reported: FxHashSet<&str> = mocks
        .iter()
        .flat_map(|m| m.whitelist.iter().map(|(name, _)| name))
        .collect();

    let mut found: Vec<(&str, Vec<&str>)> = whitelist
        .iter()
        .filter(|(name, _)| !reported.contains(name))
        .map(|(name, types)| {
            let mut types: Vec<&str> = types.iter().map(String::as_str).collect();
            types.sort_unstable();
            (name, types)
        })
        .collect();
    found.sort_by(|a, b| a.0.cmp(b.0));

    found
        .into_iter()
        .map(|(name, types)| {
            let listed = types.join(", ");
            warn!(alias = name, types = %listed, "type alias declared with conflicting types across inputs");
            Diagnostic::from_code("", name, diagnostic_codes::AMBIGUOUS_TYPE_ALIAS, &[name, &listed])
        })
        .collect()
}

/// Header, imports, then every mock separated by a blank line.
pub fn assemble_file(options: &ResolvedOptions, mocks: &[RenderedMock]) -> String {
    let mut out = String::new();
    if let Some(header) = options.header.as_deref().filter(|h| !h.is_empty()) {
        out.push_str(header.trim_end());
        out.push_str("\n\n");
    }

    let testable: FxHashSet<&str> = options
        .testable_imports
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .collect();
    let mut modules: Vec<&str> = options
        .custom_imports
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty() && !testable.contains(m))
        .collect();
    modules.sort_unstable();
    modules.dedup();
    let mut testable: Vec<&str> = testable.into_iter().collect();
    testable.sort_unstable();

    let mut import_lines: Vec<String> = modules.iter().map(|m| format!("import {m}")).collect();
    import_lines.extend(testable.iter().map(|m| format!("@testable import {m}")));
    if !import_lines.is_empty() {
        out.push_str(&import_lines.join("\n"));
        out.push_str("\n\n");
    }

    let bodies: Vec<&str> = mocks.iter().map(|m| m.text.as_str()).collect();
    out.push_str(&bodies.join("\n\n"));
    if !bodies.is_empty() {
        out.push('\n');
    }
    out
}
