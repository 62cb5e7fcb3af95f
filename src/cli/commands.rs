//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::BranchService;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::infrastructure::ServiceContainer;
use crate::tree_traits::TreeNodeConvert;
use crate::util::path::normalize_branch_path;

/// Load settings, apply command line overrides and run the command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        let mut cmd = Cli::command();
        cmd.print_help()
            .map_err(|source| CliError::Io { context: "print help".into(), source })?;
        return Ok(());
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = load_settings(cli)?;
    debug!("settings: {:?}", settings);

    match command {
        Commands::Config { template } => show_config(&settings, *template),
        Commands::Roots => roots(&service(settings)?),
        Commands::Tree => tree(&service(settings)?),
        Commands::Find {
            path,
            exact,
            contains,
        } => {
            let exact_match = match (*exact, *contains) {
                (true, _) => true,
                (_, true) => false,
                _ => settings.exact_match,
            };
            find(&service(settings)?, path, exact_match)
        }
        Commands::Descendants { path, root } => {
            descendants(&service(settings)?, path, root.as_deref())
        }
        Commands::Orphans => orphans(&service(settings)?),
        Commands::Completion { .. } => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let cwd = std::env::current_dir().map_err(|source| CliError::Io {
        context: "determine working directory".into(),
        source,
    })?;
    let mut settings = Settings::load(Some(&cwd))?;
    if let Some(file) = &cli.file {
        settings.branches_file = Some(file.clone());
    }
    if let Some(policy) = cli.orphans {
        settings.orphan_policy = policy;
    }
    Ok(settings)
}

fn service(settings: Settings) -> CliResult<BranchService> {
    Ok(ServiceContainer::new(settings).branch_service()?)
}

fn show_config(settings: &Settings, template: bool) -> CliResult<()> {
    if template {
        output::info(&Settings::template());
    } else {
        output::info(&settings.to_toml()?);
    }
    Ok(())
}

#[instrument(skip(service))]
fn roots(service: &BranchService) -> CliResult<()> {
    let roots = service.roots()?;
    if roots.is_empty() {
        output::warning("no root branches");
    }
    for root in &roots {
        output::info(root);
    }
    Ok(())
}

#[instrument(skip(service))]
fn tree(service: &BranchService) -> CliResult<()> {
    let roots = service.roots()?;
    if roots.is_empty() {
        output::warning("no root branches");
    }
    for root in &roots {
        output::info(&root.to_tree_string());
    }
    Ok(())
}

/// Normalized branch path argument; blank input is a usage error.
fn branch_path_arg(path: &str) -> CliResult<String> {
    let path = normalize_branch_path(path);
    if path.is_empty() {
        return Err(CliError::InvalidArgs("branch path must not be empty".into()));
    }
    Ok(path)
}

#[instrument(skip(service))]
fn find(service: &BranchService, path: &str, exact_match: bool) -> CliResult<()> {
    let path = branch_path_arg(path)?;
    match service.find_root(&path, exact_match)? {
        Some(root) => {
            output::info(&root);
            Ok(())
        }
        None => Err(CliError::NotFound(format!("no root branch has a branch at {path}"))),
    }
}

#[instrument(skip(service))]
fn descendants(service: &BranchService, path: &str, root: Option<&str>) -> CliResult<()> {
    let path = branch_path_arg(path)?;
    let root = root.map(branch_path_arg).transpose()?;
    let found = service.descendants(&path, root.as_deref())?;
    if found.is_empty() {
        output::warning(&format!("no branches below {path}"));
    }
    for node in &found {
        output::info(node.path());
    }
    Ok(())
}

#[instrument(skip(service))]
fn orphans(service: &BranchService) -> CliResult<()> {
    let orphans = service.orphans()?;
    if orphans.is_empty() {
        output::success("no orphaned branches");
        return Ok(());
    }
    output::header(&format!("{} orphaned branches", orphans.len()));
    for path in &orphans {
        output::detail(path);
    }
    Ok(())
}
