//! CLI definitions: argument parsing, subcommands, and help text.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

const AFTER_HELP: &str = "\
EXAMPLES:
  grammar-check                              Serve the API on 127.0.0.1:3000
  grammar-check serve --addr 0.0.0.0:8080    Serve on another address
  grammar-check check \"She go to school.\"    Check a text from the terminal
  grammar-check check - -i German < brief.txt
  grammar-check parse completion.txt         Normalize a saved model completion
  grammar-check config                       Show gateway and Turnstile settings
  grammar-check completions bash             Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Grammar correction service backed by an LLM gateway",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API (default)
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_ADDR)]
        addr: SocketAddr,
    },
    /// Check a text through the model gateway and print the corrections
    Check {
        /// Text to check ('-' reads from stdin)
        text: String,
        /// Language of the text
        #[arg(short = 'i', long, default_value = "English")]
        input_language: String,
        /// Language of the explanations
        #[arg(short = 'e', long, default_value = "English")]
        explanation_language: String,
        /// Print the normalized result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize a raw model completion and print the result as JSON
    Parse {
        /// File holding the completion ('-' or omitted reads from stdin)
        file: Option<PathBuf>,
        /// Text used when the completion has no correctedText
        #[arg(long, default_value = "")]
        fallback: String,
    },
    /// Show gateway and human-verification settings
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}
