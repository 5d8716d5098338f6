use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use build_publish::cli::{VariantWorkflowArgs, Workflow};
use build_publish::config::load_config;
use build_publish::domain::BuildVariant;
use build_publish::ui;

#[derive(clap::Parser)]
#[command(
    name = "build-publish",
    version,
    about = "Resolve build tags, versions and changelogs for build variants"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = ".", help = "Directory inside the git repository")]
    repo: PathBuf,

    #[arg(short, long, help = "Directory for variant output files")]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve build tags and write the tag snapshot
    Snapshot {
        #[arg(short, long)]
        variant: String,
    },
    /// Write the version code file from the tag snapshot
    VersionCode {
        #[arg(short, long)]
        variant: String,
    },
    /// Write the version name file from the tag snapshot
    VersionName {
        #[arg(short, long)]
        variant: String,
    },
    /// Write the output artifact file name
    OutputName {
        #[arg(short, long)]
        variant: String,
        #[arg(short, long, help = "Original artifact file name, e.g. app-release.apk")]
        file: String,
    },
    /// Write the changelog since the previous build tag
    Changelog {
        #[arg(short, long)]
        variant: String,
    },
    /// Print the current build tag
    LastTag {
        #[arg(short, long)]
        variant: String,
    },
    /// Print the tag that should follow the current build tag
    NextTag {
        #[arg(short, long)]
        variant: String,
    },
    /// Run every step for a variant
    All {
        #[arg(short, long)]
        variant: String,
        #[arg(short, long, help = "Original artifact file name, e.g. app-release.apk")]
        file: String,
    },
    /// Show variants with configuration overrides and exit
    List,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if let Command::List = args.command {
        let config = load_config(args.config.as_deref())?;
        let variants: Vec<String> = config.variants.keys().cloned().collect();
        if variants.is_empty() {
            ui::display_status("No variant overrides configured; global settings apply");
        } else {
            ui::display_available_variants(&variants);
        }
        return Ok(());
    }

    let workflow = Workflow::open(&VariantWorkflowArgs {
        config_path: args.config,
        repo_path: args.repo,
        output_dir: args.output_dir,
    })?;

    match args.command {
        Command::Snapshot { variant } => {
            let snapshot = workflow.write_snapshot(&variant)?;
            ui::display_snapshot(&BuildVariant::parse(&variant), &snapshot);
            ui::display_success(&format!(
                "Wrote {}",
                workflow.paths().snapshot(&variant).display()
            ));
        }
        Command::VersionCode { variant } => {
            let code = workflow.write_version_code(&variant)?;
            ui::display_success(&format!(
                "Version code for '{}': {}",
                variant,
                code.map(|c| c.to_string())
                    .unwrap_or_else(|| "(none)".to_string())
            ));
        }
        Command::VersionName { variant } => {
            let name = workflow.write_version_name(&variant)?;
            ui::display_success(&format!(
                "Version name for '{}': {}",
                variant,
                name.unwrap_or_else(|| "(none)".to_string())
            ));
        }
        Command::OutputName { variant, file } => {
            let name = workflow.write_output_file_name(&variant, &file)?;
            ui::display_success(&format!("Output file name for '{}': {}", variant, name));
        }
        Command::Changelog { variant } => {
            let changelog = workflow.write_changelog(&variant)?;
            ui::display_status(&format!("Changelog for '{}':", variant));
            println!("{}", changelog);
        }
        Command::LastTag { variant } => {
            println!("{}", workflow.last_tag(&variant)?.name);
        }
        Command::NextTag { variant } => {
            println!("{}", workflow.next_tag(&variant)?);
        }
        Command::All { variant, file } => {
            let result = workflow.run_all(&variant, &file)?;
            ui::display_success(&format!(
                "Variant '{}' resolved to tag {} ({})",
                result.variant, result.tag, result.output_file_name
            ));
        }
        Command::List => {}
    }

    Ok(())
}
