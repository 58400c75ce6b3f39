//! CLI for the roomuri meeting-URI toolkit.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use roomuri_core::config;
use std::path::PathBuf;

use commands::{run_decode, run_params, run_parse, run_stringify, BagSource};

/// Top-level CLI for roomuri.
#[derive(Debug, Parser)]
#[command(name = "roomuri")]
#[command(about = "roomuri: parse and normalize meeting-room URIs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Parse a meeting URI and print its components as JSON.
    Parse {
        /// URI, app link or bare room name.
        uri: String,
    },

    /// Build a canonical URI from a JSON property bag.
    Stringify {
        /// Property bag as inline JSON (e.g. '{"room":"standup"}').
        #[arg(required_unless_present = "file")]
        json: Option<String>,

        /// Read the property bag from a JSON file instead.
        #[arg(long, value_name = "PATH", conflicts_with = "json")]
        file: Option<PathBuf>,

        /// Do not fill missing fields from the config file.
        #[arg(long)]
        no_config: bool,
    },

    /// Print the parameters carried in a URI's fragment (or query) as JSON.
    Params {
        uri: String,

        /// Read the query string instead of the fragment.
        #[arg(long)]
        search: bool,

        /// Keep values as raw strings instead of decoding them as JSON.
        #[arg(long)]
        raw: bool,
    },

    /// Print a URI without its http(s):// prefix, percent-decoded.
    Decode { uri: String },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        cli.command.run()
    }

    pub fn run(self) -> Result<()> {
        let output = match self {
            CliCommand::Parse { uri } => Some(run_parse(&uri)?),
            CliCommand::Stringify {
                json,
                file,
                no_config,
            } => {
                let cfg = if no_config {
                    None
                } else {
                    let cfg = config::load_or_init()?;
                    tracing::debug!("loaded config: {:?}", cfg);
                    Some(cfg)
                };
                let source = match (json, file) {
                    (_, Some(path)) => BagSource::File(path),
                    (Some(json), None) => BagSource::Inline(json),
                    (None, None) => anyhow::bail!("a JSON property bag or --file is required"),
                };
                run_stringify(&source, cfg.as_ref())?
            }
            CliCommand::Params { uri, search, raw } => Some(run_params(&uri, search, raw)?),
            CliCommand::Decode { uri } => Some(run_decode(&uri)),
        };

        if let Some(output) = output {
            println!("{output}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
