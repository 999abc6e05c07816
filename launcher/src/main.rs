//! Scenario workflow launcher.
//!
//! Loads a workflow file, validates it against the workflow schema, and
//! prints the launcher package path, the log directory, and every scenario
//! with its resolved path. Exit codes are listed in `launcher::exit_codes`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use launcher::error::WorkflowError;
use launcher::exit_codes;
use launcher::io::config::{CONFIG_FILE_NAME, LauncherConfig, load_config};
use launcher::io::data::FsDataManager;
use launcher::io::resolver::PackageResolver;
use launcher::io::schema::JsonSchemaValidator;
use launcher::logging;
use launcher::workflow::WorkflowLoader;

#[derive(Parser)]
#[command(name = "launcher", version, about = "Scenario workflow launcher")]
struct Cli {
    /// Launcher config file (default: `./launcher.toml`, optional).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Launcher package path; overrides `launcher_root` from the config.
    #[arg(long, global = true)]
    launcher_root: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a workflow and print its resolved scenarios.
    Load {
        /// Absolute path or `$(find-pkg-share <pkg>)/...` reference.
        workflow: String,
        /// Log directory, absolute or package-relative.
        log_directory: String,
    },
    /// Check a workflow file against the schema without loading scenarios.
    Validate { workflow: String },
    /// Print the active workflow schema.
    Schema,
}

type Loader = WorkflowLoader<PackageResolver, JsonSchemaValidator, FsDataManager>;

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_code(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("read current directory")?;
    let cfg = load_launcher_config(&cli, &cwd)?;
    match cli.command {
        Command::Load {
            workflow,
            log_directory,
        } => cmd_load(&build_loader(&cfg, &cwd)?, &workflow, &log_directory),
        Command::Validate { workflow } => cmd_validate(&build_loader(&cfg, &cwd)?, &workflow),
        Command::Schema => cmd_schema(&cfg, &cwd),
    }
}

fn load_launcher_config(cli: &Cli, cwd: &Path) -> Result<LauncherConfig> {
    let path = cli
        .config
        .as_ref()
        .map(|path| cwd.join(path))
        .unwrap_or_else(|| cwd.join(CONFIG_FILE_NAME));
    if cli.config.is_some() && !path.exists() {
        anyhow::bail!("config file {} not found", path.display());
    }
    let mut cfg = load_config(&path)?;
    if let Some(root) = &cli.launcher_root {
        cfg.launcher_root = Some(root.clone());
    }
    cfg.validate()?;
    debug!(config = %path.display(), ?cfg, "launcher config loaded");
    Ok(cfg)
}

fn build_loader(cfg: &LauncherConfig, cwd: &Path) -> Result<Loader> {
    Ok(WorkflowLoader::new(
        cfg.resolver(cwd),
        cfg.schema_validator(cwd)?,
        FsDataManager,
        cfg.launcher_root(cwd),
    ))
}

fn cmd_load(loader: &Loader, workflow: &str, log_directory: &str) -> Result<()> {
    let loaded = loader.load(workflow, log_directory)?;
    println!(
        "launcher: package={}",
        loaded.launcher_package_path.display()
    );
    println!("launcher: log={}", loaded.log_path.display());
    for (index, scenario) in loaded.scenarios.iter().enumerate() {
        println!(
            "scenario: index={} path={} expect={}",
            index,
            scenario.path.display(),
            scenario.expect().as_str()
        );
    }
    Ok(())
}

fn cmd_validate(loader: &Loader, workflow: &str) -> Result<()> {
    let path = loader.validate_workflow(workflow)?;
    println!("validate: ok path={}", path.display());
    Ok(())
}

fn cmd_schema(cfg: &LauncherConfig, cwd: &Path) -> Result<()> {
    let validator = cfg.schema_validator(cwd)?;
    let rendered = serde_json::to_string_pretty(validator.schema()).context("render schema")?;
    println!("{rendered}");
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<WorkflowError>() {
        Some(err) if err.is_invalid_workflow() => exit_codes::INVALID_WORKFLOW,
        _ => exit_codes::ERROR,
    }
}
