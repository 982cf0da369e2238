//! # Pagesmith CLI
//!
//! Command-line interface for Pagesmith.
//!
//! ## Commands
//!
//! - `catalog` - List the component palette, or one component's fields
//! - `new` - Create an empty project file
//! - `info` - Display information about a project file
//! - `validate` - Validate a project file or a directory of them
//! - `shell` - Edit a project file interactively
//! - `pull` / `push` / `export` - Work against the hosted API
//! - `config` - Show or write the effective configuration
//!

pub mod commands;
pub mod shell;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pagesmith_builder::BuilderConfig;
use pagesmith_core::{Framework, ProjectId, Validatable};
use std::io::Write;
use std::path::PathBuf;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Visual website builder engine
#[derive(Debug, Parser)]
#[command(name = "pagesmith", version, about)]
pub struct Cli {
    /// Configuration file
    #[arg(long, short, global = true, env = "PAGESMITH_CONFIG", default_value = "pagesmith.toml")]
    pub config: PathBuf,

    /// API base URL, overrides the configuration file
    #[arg(long, global = true, env = "PAGESMITH_API_URL")]
    pub api_url: Option<String>,

    /// API bearer token
    #[arg(long, global = true, env = "PAGESMITH_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List component types
    Catalog {
        /// Only this category (e.g. `hero`, `social-proof`)
        #[arg(long)]
        category: Option<String>,
        /// Show the editable fields of one component type
        #[arg(long)]
        kind: Option<String>,
    },
    /// Create an empty project file
    New {
        name: String,
        /// Directory for the project file
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Show a project file summary
    Info { file: PathBuf },
    /// Validate a project file, or every project file under a directory
    Validate {
        path: PathBuf,
        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },
    /// Edit a project file interactively
    Shell { file: PathBuf },
    /// Download a project into the projects directory
    Pull { id: ProjectId },
    /// Upload a project file's content
    Push { file: PathBuf },
    /// Export a project file through the API
    Export {
        file: PathBuf,
        /// `tailwind` or `bootstrap`, defaults to the configured framework
        #[arg(long)]
        framework: Option<Framework>,
        /// Where to write the archive
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Print the effective configuration
    Config {
        /// Write it to the configuration file
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    /// Configuration file merged with flag and env overrides
    pub fn load_config(&self) -> Result<BuilderConfig> {
        let mut config = BuilderConfig::load_or_default(&self.config)
            .with_context(|| format!("Failed to load {}", self.config.display()))?;
        if let Some(url) = &self.api_url {
            config = config.with_api_base_url(url.clone());
        }
        if let Some(token) = &self.api_token {
            config = config.with_api_token(token.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

/// Parse arguments and run the selected command
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    execute(cli)
}

/// Run a parsed command line
///
/// Only commands that touch the editor or the API read the configuration
/// file, so a broken config never blocks the offline commands.
pub fn execute(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Catalog { category, kind } => {
            commands::catalog(&mut out, category.as_deref(), kind.as_deref())
        }
        Command::New { name, dir } => commands::new_project(&mut out, name, dir).map(|_| ()),
        Command::Info { file } => commands::info(&mut out, file),
        Command::Validate { path, strict } => {
            let failed = commands::validate(&mut out, path, *strict)?;
            if failed > 0 {
                anyhow::bail!("{} project file(s) failed validation", failed);
            }
            Ok(())
        }
        Command::Shell { file } => {
            let config = cli.load_config()?;
            let mut session = shell::Session::open(file, &config)?;
            let stdin = std::io::stdin();
            shell::run_shell(&mut session, stdin.lock(), &mut out)
        }
        Command::Pull { id } => {
            let config = cli.load_config()?;
            block_on(commands::pull(&mut out, &config, *id)).map(|_| ())
        }
        Command::Push { file } => {
            let config = cli.load_config()?;
            block_on(commands::push(&mut out, &config, file))
        }
        Command::Export {
            file,
            framework,
            out: dir,
        } => {
            let config = cli.load_config()?;
            block_on(commands::export(&mut out, &config, file, *framework, dir)).map(|_| ())
        }
        Command::Config { init } => {
            let config = cli.load_config()?;
            write!(out, "{}", config.to_toml_string()?)?;
            if *init {
                config.save(&cli.config)?;
                writeln!(out, "# written to {}", cli.config.display())?;
            }
            Ok(())
        }
    }
}

fn block_on<T>(future: impl std::future::Future<Output = Result<T>>) -> Result<T> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(future)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_export_flags() {
        let cli = Cli::try_parse_from([
            "pagesmith",
            "export",
            "site.pgs",
            "--framework",
            "bootstrap",
            "--out",
            "dist",
        ])
        .unwrap();
        match cli.command {
            Command::Export {
                file,
                framework,
                out,
            } => {
                assert_eq!(file, PathBuf::from("site.pgs"));
                assert_eq!(framework, Some(Framework::Bootstrap));
                assert_eq!(out, PathBuf::from("dist"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_framework() {
        assert!(Cli::try_parse_from(["pagesmith", "export", "a.pgs", "--framework", "bulma"]).is_err());
    }

    #[test]
    fn flag_overrides_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pagesmith.toml");
        BuilderConfig::default().with_export_cost(50).save(&path).unwrap();

        let cli = Cli::try_parse_from([
            "pagesmith",
            "--config",
            path.to_str().unwrap(),
            "--api-url",
            "https://builder.example.com",
            "catalog",
        ])
        .unwrap();
        let config = cli.load_config().unwrap();
        assert_eq!(config.api_base_url, "https://builder.example.com");
        assert_eq!(config.export_cost, 50);
    }

    fn offline_cli(dir: &std::path::Path, args: &[&str]) -> Cli {
        let config = dir.join("missing.toml");
        let mut argv = vec![
            "pagesmith",
            "--config",
            config.to_str().unwrap(),
            "--api-url",
            "http://127.0.0.1:9",
        ];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn pull_against_unreachable_api_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = offline_cli(dir.path(), &["pull", "7d1f3c2e-8a4b-4e0f-9c61-2b5d8e9a0f13"]);
        assert!(execute(cli).is_err());
    }

    #[test]
    fn push_against_unreachable_api_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = commands::new_project(&mut Vec::new(), "Landing", dir.path()).unwrap();
        let cli = offline_cli(dir.path(), &["push", file.to_str().unwrap()]);
        assert!(execute(cli).is_err());
    }

    #[test]
    fn export_against_unreachable_api_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = commands::new_project(&mut Vec::new(), "Landing", dir.path()).unwrap();
        let dist = dir.path().join("dist");
        let cli = offline_cli(
            dir.path(),
            &["export", file.to_str().unwrap(), "--out", dist.to_str().unwrap()],
        );
        assert!(execute(cli).is_err());
        assert!(!dist.exists());
    }

    #[test]
    fn offline_commands_ignore_broken_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pagesmith.toml");
        std::fs::write(&path, "export_cost = [not toml").unwrap();

        let catalog = Cli::try_parse_from(["pagesmith", "--config", path.to_str().unwrap(), "catalog"]).unwrap();
        assert!(execute(catalog).is_ok());

        let config = Cli::try_parse_from(["pagesmith", "--config", path.to_str().unwrap(), "config"]).unwrap();
        assert!(execute(config).is_err());
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "pagesmith_cli");
    }
}
