//! CLI for the Downbox downloads bridge.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use downbox_core::config;
use downbox_core::save::SaveHandler;
use std::path::PathBuf;

use commands::{run_list, run_resolve, run_save, run_serve, run_verify};

/// Top-level CLI for the Downbox downloads bridge.
#[derive(Debug, Parser)]
#[command(name = "downbox")]
#[command(about = "Downbox: saves payloads into the user's Downloads area", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Save a local file (or stdin) into the Downloads area.
    Save {
        /// Input file to read, or `-` for stdin.
        input: PathBuf,

        /// Name for the stored file (defaults to the input file name).
        #[arg(long, value_name = "FILENAME")]
        name: Option<String>,
    },

    /// Run the JSON method-call loop on stdin/stdout.
    Serve,

    /// List media registry entries.
    List,

    /// Print the filesystem path for an identifier.
    Resolve {
        /// Content URI or plain path returned by a save.
        identifier: String,
    },

    /// Check a saved entry against its recorded checksum.
    Verify {
        /// Content URI returned by a registry-backed save.
        identifier: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Completions need no config, handler, or registry.
        if let CliCommand::Completions { shell } = cli.command {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "downbox", &mut std::io::stdout());
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let handler = SaveHandler::from_config(&cfg).await?;

        match cli.command {
            CliCommand::Save { input, name } => {
                run_save(&handler, &input, name.as_deref()).await?
            }
            CliCommand::Serve => run_serve(&handler).await?,
            CliCommand::List => run_list(&handler).await?,
            CliCommand::Resolve { identifier } => run_resolve(&handler, &identifier).await?,
            CliCommand::Verify { identifier } => run_verify(&handler, &identifier).await?,
            CliCommand::Completions { .. } => {} // handled above
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
