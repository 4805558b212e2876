//! Promote Artifacts CLI
//!
//! Entry point for the `promote` command-line tool.

use clap::{Parser, Subcommand};
use promote_artifacts::config::{DEFAULT_BUILD_DIRECTORY, DEFAULT_PROJECT_FILE};
use promote_artifacts::promotable::properties_file;
use promote_artifacts::{
    logging, make_promotable, read_promotable, BuildProject, ConfigOverrides, PromotableArtifacts,
    PromoteConfig,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;

#[derive(Parser)]
#[command(name = "promote")]
#[command(about = "Record build artifacts for a later promotion step", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write promotable-artifacts.properties for a project
    MakePromotable {
        /// Path to the project manifest (default: promote-project.toml)
        #[arg(long, short = 'p')]
        project: Option<PathBuf>,

        /// Path to config file (default: .promote.toml if present)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Header comment for the properties file
        #[arg(long)]
        comment: Option<String>,

        /// Store absolute artifact paths instead of paths relative to the build directory
        #[arg(long)]
        absolute_paths: bool,
    },

    /// Show the artifacts recorded in a build directory
    Show {
        /// Build directory containing promotable-artifacts.properties (default: target)
        #[arg(long, short = 'd', conflicts_with = "project")]
        build_dir: Option<PathBuf>,

        /// Take the build directory from a project manifest
        #[arg(long, short = 'p')]
        project: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::MakePromotable {
            project,
            config,
            comment,
            absolute_paths,
        } => {
            let overrides = ConfigOverrides {
                comment,
                absolute_paths,
            };
            run_make_promotable(project, config, &overrides);
        }
        Commands::Show {
            build_dir,
            project,
            json,
        } => {
            run_show(build_dir, project, json);
        }
    }
}

fn run_make_promotable(
    project_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    overrides: &ConfigOverrides,
) {
    let config = match PromoteConfig::load(config_path.as_deref()) {
        Ok(c) => c.with_overrides(overrides),
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };
    debug!("Effective config: {:?}", config);

    let project = load_project(project_path);

    match make_promotable(&project, &config) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_show(build_dir: Option<PathBuf>, project_path: Option<PathBuf>, json: bool) {
    let build_dir = match (build_dir, project_path) {
        (Some(dir), _) => dir,
        (None, Some(path)) => load_project(Some(path)).build_directory,
        (None, None) => PathBuf::from(DEFAULT_BUILD_DIRECTORY),
    };

    let artifacts = match read_promotable(&build_dir) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&artifacts) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_human(&build_dir, &artifacts);
    }
}

fn load_project(project_path: Option<PathBuf>) -> BuildProject {
    let path = project_path.unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_FILE));
    match BuildProject::from_manifest(&path) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("Error loading project {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn print_human(build_dir: &Path, artifacts: &PromotableArtifacts) {
    println!("Promotable artifacts: {}", properties_file(build_dir).display());
    if artifacts.is_empty() {
        println!("  (none)");
        return;
    }

    let rows = artifacts
        .primary
        .iter()
        .map(|a| ("artifact".to_string(), a))
        .chain(
            artifacts
                .attached
                .iter()
                .enumerate()
                .map(|(i, a)| (format!("attached.{}", i), a)),
        );

    for (label, artifact) in rows {
        println!();
        println!("  {:<12} {}", label, artifact.id());
        println!("  {:<12} {}", "type", artifact.effective_type());
        if let Some(scope) = &artifact.scope {
            println!("  {:<12} {}", "scope", scope);
        }
        match artifact.file() {
            Some(file) => println!("  {:<12} {}", "file", file.display()),
            None => println!("  {:<12} (none)", "file"),
        }
    }
}
