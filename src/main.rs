use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use version_bump::cli::{run_bump_workflow, BumpWorkflowArgs, WorkflowOutcome};
use version_bump::config::{self, Config};
use version_bump::git::Git2Repository;
use version_bump::manifest::Manifest;
use version_bump::ui;

#[derive(clap::Parser)]
#[command(
    name = "version-bump",
    version,
    about = "Bump the software.major.minor version in a JSON file, then commit and push it"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "JSON file holding the version")]
    file: Option<PathBuf>,

    #[arg(short, long, help = "Branch whose pushes trigger a bump")]
    branch: Option<String>,

    #[arg(short, long, help = "Remote to push the bump commit to")]
    remote: Option<String>,

    #[arg(long, help = "Bump even off the trigger branch or on a bump commit")]
    force: bool,

    #[arg(long, help = "Preview the new version without making changes")]
    dry_run: bool,

    #[arg(long, help = "Commit the bump but do not push it")]
    no_push: bool,

    #[arg(long, help = "Print the current version and exit")]
    print: bool,

    #[arg(
        long,
        help = "Print key=value step outputs for the bump without making changes"
    )]
    decide_only: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, ...)")]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

/// Loads the config file and applies command-line overrides.
fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = config::load_config(args.config.as_deref())?;
    if let Some(file) = &args.file {
        config.manifest.path = file.clone();
    }
    if let Some(branch) = &args.branch {
        config.git.branch = branch.clone();
    }
    if let Some(remote) = &args.remote {
        config.git.remote = remote.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = resolve_config(args)?;
    tracing::debug!(?config, "resolved configuration");

    if args.print {
        let manifest = Manifest::load(&config.manifest.path, config.manifest.field.clone())?;
        println!("{}", manifest.version()?);
        return Ok(());
    }

    let repo = Git2Repository::open(".")?.with_config(&config.git);

    let workflow_args = BumpWorkflowArgs {
        manifest_path: config.manifest.path.clone(),
        force: args.force,
        dry_run: args.dry_run || args.decide_only,
        no_push: args.no_push,
    };

    let result = match run_bump_workflow(&repo, &config, &workflow_args)? {
        WorkflowOutcome::Skipped(warning) => {
            ui::display_boundary_warning(&warning);
            return Ok(());
        }
        WorkflowOutcome::Bumped(result) => result,
    };

    if args.decide_only {
        print!("{}", ui::render_step_outputs(&result));
        return Ok(());
    }

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_bump_analysis(&result.event, result.decision);
    ui::display_proposed_version(&result.previous, &result.version);

    if args.dry_run {
        ui::display_status("Dry run, no changes made:");
        ui::display_success(&format!(
            "  Would write {} to {}",
            result.version,
            config.manifest.path.display()
        ));
        ui::display_success(&format!(
            "  Would commit \"{}\" and push {} to {}",
            config.git.commit_message_for(&result.version),
            result.branch,
            config.git.remote
        ));
        return Ok(());
    }

    match &result.commit {
        None => {
            ui::display_status("Nothing to commit, version file already up to date");
        }
        Some(hash) if result.pushed => {
            ui::display_success(&format!(
                "Committed {} and pushed {} to {}",
                &hash[..hash.len().min(7)],
                result.branch,
                config.git.remote
            ));
        }
        Some(hash) => {
            ui::display_success(&format!(
                "Committed {} on {}",
                &hash[..hash.len().min(7)],
                result.branch
            ));
            ui::display_manual_push_instruction(&result.branch, &config.git.remote);
        }
    }

    println!(
        "\n{} Version is now {}\n",
        console::style("✓").green(),
        result.version
    );

    Ok(())
}
