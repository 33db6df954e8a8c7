//! # grammar-check
//!
//! Grammar correction service: forwards text to an LLM gateway and turns the model's
//! free-form completion into a validated list of corrections.
//!
//! ## Modes
//! - `serve` (default): HTTP API with grammar check, health, and language routes
//! - `check`: one check from the terminal
//! - `parse`: normalize a saved completion
//! - `config`: show settings

mod cli;
mod core;
mod run;
mod server;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use crate::cli::{Args, Commands, DEFAULT_ADDR};
use crate::core::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    let config = Config::from_env();

    match args.command {
        None => run::run_serve(DEFAULT_ADDR.parse()?, &config).await,
        Some(Commands::Serve { addr }) => run::run_serve(addr, &config).await,
        Some(Commands::Check {
            text,
            input_language,
            explanation_language,
            json,
        }) => {
            if let Err(e) =
                run::run_check(&text, &input_language, &explanation_language, json, &config).await
            {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Parse { file, fallback }) => run::run_parse(file.as_deref(), &fallback),
        Some(Commands::Config) => {
            run::run_config(&config);
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Args::command();
            cli::generate(shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
            Ok(())
        }
    }
}
