//! Command-line interface definition for FolioQA
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for serving the API and inspecting available models.

use clap::{Parser, Subcommand};

/// FolioQA - Portfolio Q&A chat service
///
/// Serves an HTTP API that answers portfolio questions through the Gemini
/// generative-language API, with bounded in-memory conversation history
/// and multi-mode responses.
#[derive(Parser, Debug, Clone)]
#[command(name = "folioqa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for FolioQA
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Override the bind address from config
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port from config
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Inspect generation models
    Models {
        /// Model subcommand
        #[command(subcommand)]
        command: ModelCommand,
    },
}

/// Model inspection subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ModelCommand {
    /// List models available from the configured provider
    List,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_serve_with_overrides() {
        let cli = Cli::try_parse_from(["folioqa", "serve", "--host", "0.0.0.0", "-p", "9000"])
            .unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_cli_parses_models_list() {
        let cli = Cli::try_parse_from(["folioqa", "models", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Models {
                command: ModelCommand::List
            }
        ));
    }

    #[test]
    fn test_cli_default_config_path() {
        let cli = Cli::try_parse_from(["folioqa", "serve"]).unwrap();
        assert_eq!(cli.config, "config/config.yaml");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["folioqa"]).is_err());
    }
}
