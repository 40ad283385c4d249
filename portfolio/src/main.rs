//! Portfolio site CLI.
//!
//! Scaffolds `.portfolio/` (config + content), checks content, and renders
//! the static site. The live server lives in the `portfolio-ui` crate.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use portfolio::core::invariants::check_content;
use portfolio::exit_codes;
use portfolio::io::build::build_site;
use portfolio::io::content_store::load_content;
use portfolio::io::init::{InitOptions, SitePaths, init_site};

#[derive(Parser)]
#[command(name = "portfolio", version, about = "Single-page portfolio site builder")]
struct Cli {
    /// Project directory (contains .portfolio/)
    #[arg(long, global = true, default_value = ".")]
    project_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.portfolio/config.toml` and `.portfolio/content.toml`.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Report malformed content (bad links, duplicate ids, empty titles).
    Check,
    /// Render the static site.
    Build {
        /// Output directory (defaults to ./dist).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    portfolio::logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let paths = SitePaths::new(&cli.project_dir);
    match cli.command {
        Command::Init { force } => cmd_init(&cli.project_dir, force),
        Command::Check => cmd_check(&paths),
        Command::Build { out } => {
            let out_dir = out.unwrap_or_else(|| paths.default_out_dir.clone());
            cmd_build(&paths, &out_dir)
        }
    }
}

fn cmd_init(root: &Path, force: bool) -> Result<i32> {
    let paths = init_site(root, &InitOptions { force })?;
    println!("init: config={}", paths.config_path.display());
    println!("init: content={}", paths.content_path.display());
    Ok(exit_codes::OK)
}

fn cmd_check(paths: &SitePaths) -> Result<i32> {
    let content = load_content(&paths.content_path)?;
    let problems = check_content(&content);
    debug!(problems = problems.len(), "content checked");
    if problems.is_empty() {
        println!("check: ok");
        return Ok(exit_codes::OK);
    }
    for problem in &problems {
        println!("check: {}", problem);
    }
    Ok(exit_codes::CONTENT_PROBLEMS)
}

fn cmd_build(paths: &SitePaths, out_dir: &Path) -> Result<i32> {
    let output = build_site(paths, out_dir)?;
    for file in &output.files {
        println!("build: {}", file.display());
    }
    if !output.warnings.is_empty() {
        eprintln!(
            "warning: {} content problem(s), run `portfolio check`",
            output.warnings.len()
        );
    }
    Ok(exit_codes::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["portfolio", "init", "--force"]);
        assert!(matches!(cli.command, Command::Init { force: true }));
    }

    #[test]
    fn parse_build_with_out_and_project_dir() {
        let cli = Cli::parse_from(["portfolio", "build", "--out", "site", "--project-dir", "me"]);
        assert_eq!(cli.project_dir, PathBuf::from("me"));
        assert!(matches!(
            cli.command,
            Command::Build { out: Some(ref out) } if out == Path::new("site")
        ));
    }
}
