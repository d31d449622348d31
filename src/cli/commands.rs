//! Command dispatch: turns parsed arguments into service calls and terminal output

use std::io;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::{BuildOutcome, BuildReport, RenderOptions};
use crate::cli::args::{Cli, Commands, ConfigCommands, DirArgs, TreeArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings, TreeConfig};
use crate::domain::{CharSet, IgnoreSet};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::util::path::{absolutize, relative_display};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };

    let cwd = std::env::current_dir().map_err(|e| InfraError::io("current dir", e))?;
    let settings = Settings::load(Some(&cwd))?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Tree(args) => cmd_tree(&container, args),
        Commands::Dir(args) => cmd_dir(&container, args),
        Commands::Config { command } => cmd_config(&container, command, &cwd),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Combine configured defaults with command line flags. Flags win; `--ignore` adds.
fn render_options(config: &TreeConfig, args: &TreeArgs) -> CliResult<RenderOptions> {
    let patterns = config.ignore.iter().chain(args.ignore.iter());
    let ignore = IgnoreSet::new(patterns).map_err(crate::application::ApplicationError::from)?;
    Ok(RenderOptions {
        max_depth: args.level.unwrap_or(config.max_depth),
        include_files: args.files || config.include_files,
        ignore,
        charset: CharSet::from_ascii_flag(args.ascii || config.ascii),
    })
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, args: &TreeArgs) -> CliResult<()> {
    let options = render_options(&container.settings.tree, args)?;
    debug!("cmd_tree: options={:?}", options);

    let lines = container.renderer.render(&args.path, &options)?;
    for line in &lines {
        output::info(line);
    }

    let target = args
        .output
        .as_ref()
        .or(container.settings.tree.output.as_ref());
    if let Some(target) = target {
        let mut content = lines.join("\n");
        content.push('\n');
        container
            .fs
            .write(target, &content)
            .map_err(|e| InfraError::io(format!("write tree to {}", target.display()), e))?;
        output::success(&format!("Tree saved to {}", target.display()));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_dir(container: &ServiceContainer, args: &DirArgs) -> CliResult<()> {
    let root = absolutize(&args.root)
        .map_err(|e| InfraError::io(format!("resolve {}", args.root.display()), e))?;

    let layout = container.builder.load_layout(&args.layout)?;
    debug!(
        "cmd_dir: layout root={:?}, {} records",
        layout.root,
        layout.records.len()
    );
    if layout.is_empty() {
        output::warning(&format!("no entries in {}", args.layout.display()));
        return Ok(());
    }

    let report = container.builder.build(layout.records(), &root, args.dry_run)?;
    print_report(&report, &root, args.dry_run);
    Ok(())
}

fn print_report(report: &BuildReport, root: &Path, dry_run: bool) {
    for action in &report.actions {
        let label = action.label();
        match action.outcome {
            BuildOutcome::Planned => output::planned(&label, &action.path.display()),
            BuildOutcome::Created => output::action(&label, &relative_display(&action.path, root)),
            BuildOutcome::AlreadyExists | BuildOutcome::Skipped => {
                output::skipped(&label, &relative_display(&action.path, root))
            }
        }
    }

    if dry_run {
        output::header(&format!(
            "Dry run: {} entries would be created",
            report.count(BuildOutcome::Planned)
        ));
    } else {
        output::success(&format!(
            "{} created, {} already present under {}",
            report.count(BuildOutcome::Created),
            report.count(BuildOutcome::AlreadyExists),
            root.display()
        ));
    }
}

#[instrument(skip(container))]
fn cmd_config(container: &ServiceContainer, command: &ConfigCommands, cwd: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unavailable>".into());
            output::action("global", &global);
            output::action("local", &local_config_path(cwd).display());
            Ok(())
        }
    }
}
