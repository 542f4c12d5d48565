//! pda2cfg CLI - convert pushdown automata into context-free grammars.
//!
//! Every command works on its own conversion session: load the automaton document,
//! then generate rules or a diagram from it.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pda_cfg_core::{Session, StateOrder};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod config;

use commands::config as config_cmd;
use config::Config;

/// pda2cfg - Convert a pushdown automaton into a context-free grammar.
#[derive(Parser, Debug)]
#[command(
    name = "pda2cfg",
    author,
    version,
    about = "pda2cfg: Convert pushdown automata into context-free grammars",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an automaton document into grammar rules.
    Convert {
        /// Automaton XML document.
        file: PathBuf,

        /// Output format: text or json (defaults to the configured format).
        #[arg(short, long)]
        format: Option<String>,

        /// State order for push-two rules: declaration or sorted.
        #[arg(long)]
        order: Option<String>,

        /// Write the rules to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the structure of an automaton document.
    Inspect {
        /// Automaton XML document.
        file: PathBuf,
    },

    /// Emit Graphviz DOT source for an automaton diagram.
    Graph {
        /// Automaton XML document.
        file: PathBuf,

        /// Write the DOT source to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config_file.as_deref())?;

    match cli.command {
        Commands::Convert {
            file,
            format,
            order,
            output,
        } => {
            let format = match format {
                Some(format) => format.parse()?,
                None => config.default_format,
            };
            let order = order
                .map(|o| o.parse::<StateOrder>().map_err(anyhow::Error::msg))
                .transpose()?;

            let mut session = Session::new(config.generator_config(order));
            commands::convert::execute(&mut session, &file, format, output)?;
        }

        Commands::Inspect { file } => {
            let mut session = Session::new(config.generator_config(None));
            commands::inspect::execute(&mut session, &file)?;
        }

        Commands::Graph { file, output } => {
            let mut session = Session::new(config.generator_config(None));
            commands::graph::execute(&mut session, &file, output)?;
        }

        Commands::Config(config_cmd_inner) => match config_cmd_inner {
            ConfigCommands::Show => {
                config_cmd::show(&config)?;
            }
            ConfigCommands::Set { key, value } => {
                config_cmd::set(&mut config, &key, &value)?;
            }
            ConfigCommands::Get { key } => {
                config_cmd::get(&config, &key)?;
            }
            ConfigCommands::Reset => {
                config_cmd::reset(&mut config)?;
            }
            ConfigCommands::Path => {
                if let Some(path) = config.path() {
                    println!("{}", path.display());
                } else {
                    println!("(no config file path available)");
                }
            }
        },
    }

    Ok(())
}
