//! Configuration management for the validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML configuration (project or user level)
//! - Merging both into one immutable [`Config`]
//!
//! Precedence: command line > configuration file > built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::compiler::{DEFAULT_COMPILER, DEFAULT_TIMEOUT};
use crate::rules::java::{default_placeholder_packages, DEFAULT_JAVA_VERSION};
use crate::rules::markdown::default_non_descriptive_links;

/// Project configuration file name, searched from the working directory up
pub const PROJECT_CONFIG_FILE: &str = ".plugin-validate.toml";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "plugin-validate")]
#[command(about = "Validate plugin manifests, recipes and documentation")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file to use instead of the discovered one
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Log level for diagnostics on stderr
    #[arg(
        long,
        global = true,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    /// Only print failing documents and the summary
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate a marketplace manifest
    Manifest {
        #[arg(default_value = ".claude-plugin/marketplace.json")]
        path: PathBuf,

        /// Directory plugin sources resolve against
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },

    /// Validate a Java or YAML recipe file
    Recipe {
        path: PathBuf,

        /// Target Java version
        #[arg(long)]
        java_version: Option<u32>,

        /// Skip the compilation check
        #[arg(long)]
        no_compile: bool,

        /// Seconds to wait for the compiler
        #[arg(long)]
        compile_timeout: Option<u64>,
    },

    /// Check Java sources for features newer than the target version
    Compat {
        /// A .java file or a directory searched recursively
        path: PathBuf,

        /// Target Java version
        #[arg(long)]
        java_version: Option<u32>,
    },

    /// Lint Markdown documentation
    Markdown {
        /// A .md file or a directory searched recursively
        path: PathBuf,
    },
}

/// What the user asked to validate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Manifest,
    Recipe,
    Compat,
    Markdown,
}

/// On-disk configuration file layout
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub java_version: Option<u32>,
    pub compile: Option<bool>,
    pub compile_timeout_secs: Option<u64>,
    pub javac: Option<String>,
    pub markdown: MarkdownFile,
    pub recipe: RecipeFile,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownFile {
    pub title_case_max_level: Option<usize>,
    pub non_descriptive_link_texts: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RecipeFile {
    pub placeholder_packages: Option<Vec<String>>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Markdown rule settings
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownSettings {
    pub title_case_max_level: usize,
    pub non_descriptive_link_texts: Vec<String>,
}

impl Default for MarkdownSettings {
    fn default() -> Self {
        Self {
            title_case_max_level: 3,
            non_descriptive_link_texts: default_non_descriptive_links(),
        }
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mode: Mode,
    /// File or directory to validate
    pub path: PathBuf,
    /// Manifest base directory override
    pub base_dir: Option<PathBuf>,
    pub java_version: u32,
    pub compile: bool,
    pub compile_timeout: Duration,
    pub javac: String,
    pub markdown: MarkdownSettings,
    pub placeholder_packages: Vec<String>,
    pub log_level: String,
    pub quiet: bool,
    /// Configuration file that was applied, if any
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from explicit arguments, discovering a config
    /// file from the current directory
    pub fn from_args(args: Args) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::from_args_in(args, &cwd)
    }

    /// Create configuration with config discovery rooted at `cwd`
    pub fn from_args_in(args: Args, cwd: &Path) -> Result<Self> {
        let config_path = match &args.config {
            Some(path) if !path.is_file() => {
                bail!("Config file does not exist: {}", path.display())
            }
            Some(path) => Some(path.clone()),
            None => find_config_file(cwd),
        };

        let file = match &config_path {
            Some(path) => {
                log::info!("Using configuration from {}", path.display());
                ConfigFile::load(path)?
            }
            None => ConfigFile::default(),
        };

        Ok(Self::merge(args, file, config_path))
    }

    pub(crate) fn merge(args: Args, file: ConfigFile, config_path: Option<PathBuf>) -> Self {
        let mut config = Config {
            mode: Mode::Manifest,
            path: PathBuf::new(),
            base_dir: None,
            java_version: file.java_version.unwrap_or(DEFAULT_JAVA_VERSION),
            compile: file.compile.unwrap_or(true),
            compile_timeout: file
                .compile_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            javac: file.javac.unwrap_or_else(|| DEFAULT_COMPILER.to_string()),
            markdown: MarkdownSettings {
                title_case_max_level: file
                    .markdown
                    .title_case_max_level
                    .unwrap_or(MarkdownSettings::default().title_case_max_level),
                non_descriptive_link_texts: file
                    .markdown
                    .non_descriptive_link_texts
                    .map(|texts| texts.iter().map(|t| t.to_lowercase()).collect())
                    .unwrap_or_else(default_non_descriptive_links),
            },
            placeholder_packages: file
                .recipe
                .placeholder_packages
                .unwrap_or_else(default_placeholder_packages),
            log_level: args.log_level,
            quiet: args.quiet,
            config_path,
        };

        match args.command {
            Command::Manifest { path, base_dir } => {
                config.mode = Mode::Manifest;
                config.path = path;
                config.base_dir = base_dir;
            }
            Command::Recipe {
                path,
                java_version,
                no_compile,
                compile_timeout,
            } => {
                config.mode = Mode::Recipe;
                config.path = path;
                if let Some(version) = java_version {
                    config.java_version = version;
                }
                if no_compile {
                    config.compile = false;
                }
                if let Some(secs) = compile_timeout {
                    config.compile_timeout = Duration::from_secs(secs);
                }
            }
            Command::Compat { path, java_version } => {
                config.mode = Mode::Compat;
                config.path = path;
                if let Some(version) = java_version {
                    config.java_version = version;
                }
            }
            Command::Markdown { path } => {
                config.mode = Mode::Markdown;
                config.path = path;
            }
        }

        config
    }
}

/// Look for a project config from `start` upwards, then the user config
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let project = start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.is_file());

    project.or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("plugin-validate").join("config.toml"))
            .filter(|candidate| candidate.is_file())
    })
}
