mod cli;
mod config;
mod logging;

use anyhow::Context;
use cli::{Args, Command, GlobalArgs, TreeArgs};
use config::ConfigFile;
use cps_dependencies::adapters::outbound::console::StderrProgressReporter;
use cps_dependencies::adapters::outbound::filesystem::{resolve_assets_path, FileSystemReader};
use cps_dependencies::application::dto::{
    AssetsQuery, AssetsQueryRequest, DependencyTreeRequest, OutputFormat,
};
use cps_dependencies::application::factories::{FormatterFactory, PresenterFactory};
use cps_dependencies::application::use_cases::{BuildDependencyTreeUseCase, QueryAssetsFileUseCase};
use cps_dependencies::shared::error::DependencyError;
use cps_dependencies::shared::Result;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

/// Command finished and found what it looked for
const EXIT_OK: i32 = 0;
/// Command finished but the result is negative (unresolved dependencies
/// with `--fail-on-unresolved`, package not extracted)
const EXIT_NOT_FOUND: i32 = 1;
/// Bad arguments or configuration; clap uses the same code
const EXIT_USAGE: i32 = 2;
/// The assets file or the output could not be read, parsed or written
const EXIT_IO: i32 = 3;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    let color = use_color(&args.global, std::io::stderr().is_terminal());
    logging::init(args.global.verbose, color);

    match run(args).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(exit_code_for(&e));
        }
    }
}

/// Settings after merging the config file under the command line.
struct Settings {
    assets_path: PathBuf,
    format: OutputFormat,
    target: Option<String>,
    output: Option<PathBuf>,
    quiet: bool,
}

async fn run(args: Args) -> Result<i32> {
    let assets_path = resolve_assets_path(&args.global.assets);
    let config = load_config(&args.global, &assets_path)?;

    let format = match (args.global.format, config.format.as_deref()) {
        (Some(format), _) => format,
        (None, Some(configured)) => configured
            .parse()
            .map_err(|message: String| DependencyError::Validation { message })?,
        (None, None) => OutputFormat::default(),
    };
    let settings = Settings {
        assets_path,
        format,
        target: args.global.target.clone().or_else(|| config.target.clone()),
        output: args.global.output.clone(),
        quiet: args.global.quiet,
    };
    // Files always get plain text.
    let text_color =
        settings.output.is_none() && use_color(&args.global, std::io::stdout().is_terminal());
    let progress_reporter = StderrProgressReporter::new()
        .with_color(use_color(&args.global, std::io::stderr().is_terminal()))
        .quiet(args.global.quiet);

    let query = match args.command {
        Command::Tree(tree) => {
            return run_tree(tree, &config, settings, text_color, progress_reporter).await
        }
        Command::Targets => AssetsQuery::Targets,
        Command::Dependents { name } => AssetsQuery::Dependents { name },
        Command::Dependencies { name, version } => AssetsQuery::Dependencies { name, version },
        Command::Diagnostics => AssetsQuery::Diagnostics,
        Command::PackagePath { name, version } => AssetsQuery::PackagePath { name, version },
    };
    run_query(query, settings, text_color, progress_reporter)
}

async fn run_tree(
    tree: TreeArgs,
    config: &ConfigFile,
    settings: Settings,
    color: bool,
    progress_reporter: StderrProgressReporter,
) -> Result<i32> {
    let item_specs = if tree.item_specs.is_empty() {
        config.project_item_specs.clone()
    } else {
        Some(tree.item_specs)
    };
    let mut disabled_filters = config.disabled_filters().to_vec();
    disabled_filters.extend(tree.disabled_filters);
    let follow = tree.follow_project_references || config.follow_project_references.unwrap_or(false);
    let fail_on_unresolved = tree.fail_on_unresolved || config.fail_on_unresolved.unwrap_or(false);
    let show_hidden = tree.show_hidden || config.show_hidden.unwrap_or(false);

    let request = DependencyTreeRequest::new(settings.assets_path)
        .with_target(settings.target)
        .with_project_item_specs(item_specs)
        .with_disabled_filters(disabled_filters)
        .with_follow_project_references(follow)
        .with_show_hidden(show_hidden);

    let use_case = BuildDependencyTreeUseCase::new(FileSystemReader::new(), progress_reporter);
    let response = use_case.execute(request).await?;

    announce_rendering(settings.format, settings.quiet);
    let formatter = FormatterFactory::create(settings.format, color);
    let output = formatter.format_tree(&response.view)?;
    PresenterFactory::create(settings.output.into()).present(&output)?;

    if fail_on_unresolved && response.has_unresolved {
        tracing::debug!("unresolved dependencies found, failing as requested");
        return Ok(EXIT_NOT_FOUND);
    }
    Ok(EXIT_OK)
}

fn run_query(
    query: AssetsQuery,
    settings: Settings,
    color: bool,
    progress_reporter: StderrProgressReporter,
) -> Result<i32> {
    let request = AssetsQueryRequest::new(settings.assets_path, settings.target, query);
    let use_case = QueryAssetsFileUseCase::new(FileSystemReader::new(), progress_reporter);
    let response = use_case.execute(request)?;

    announce_rendering(settings.format, settings.quiet);
    let formatter = FormatterFactory::create(settings.format, color);
    let output = response.render(formatter.as_ref())?;
    PresenterFactory::create(settings.output.into()).present(&output)?;

    Ok(if response.is_found() { EXIT_OK } else { EXIT_NOT_FOUND })
}

fn announce_rendering(format: OutputFormat, quiet: bool) {
    if !quiet {
        eprintln!("{}", FormatterFactory::progress_message(format));
    }
}

/// `--config` if given, else `cps-deps.config.yml` in the project directory.
fn load_config(global: &GlobalArgs, assets_path: &Path) -> Result<ConfigFile> {
    if let Some(path) = &global.config {
        return config::load_config_from_path(path)
            .with_context(|| format!("Config file given with --config: {}", path.display()));
    }
    Ok(config::discover_config(&project_dir(assets_path))?.unwrap_or_default())
}

/// Directory holding the project file: the parent of `obj` when the assets
/// file sits in one.
fn project_dir(assets_path: &Path) -> PathBuf {
    let parent = assets_path.parent().unwrap_or_else(|| Path::new("."));
    let dir = match parent.file_name() {
        Some(name) if name == "obj" => parent.parent().unwrap_or(parent),
        _ => parent,
    };
    if dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        dir.to_path_buf()
    }
}

fn use_color(global: &GlobalArgs, is_terminal: bool) -> bool {
    is_terminal && !global.no_color && std::env::var_os("NO_COLOR").is_none()
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<DependencyError>() {
        Some(
            DependencyError::AssetsFileNotFound { .. }
            | DependencyError::AssetsFileParseError { .. }
            | DependencyError::FileReadError { .. }
            | DependencyError::FileWriteError { .. }
            | DependencyError::SecurityError { .. },
        ) => EXIT_IO,
        _ => EXIT_USAGE,
    }
}
