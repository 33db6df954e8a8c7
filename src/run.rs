//! Application run modes: logger init, HTTP service, one-off check and parse, config.

use std::error::Error;
use std::io::{self, Read};
use std::net::SocketAddr;
use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::cli::Args;
use crate::core::app;
use crate::core::check::{self, CheckError};
use crate::core::config::Config;
use crate::core::correction::{self, NormalizedResult};
use crate::core::gateway::{GrammarPrompt, OpenRouterGateway};
use crate::core::turnstile::TurnstileVerifier;
use crate::server::{self, AppState};

const WRAP_WIDTH: usize = 80;

/// Initialize env_logger at the level chosen by -v/-q (RUST_LOG still wins).
pub fn init_logger(args: &Args) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level()),
    )
    .try_init();
}

/// Serve the HTTP API until Ctrl-C.
pub async fn run_serve(addr: SocketAddr, config: &Config) -> Result<(), Box<dyn Error>> {
    if config.gateway.api_key.is_none() {
        log::warn!("OPENROUTER_API_KEY is not set; grammar checks will fail");
    }
    if !config.turnstile.enabled {
        log::warn!("Turnstile verification is disabled");
    }

    let state = AppState {
        gateway: OpenRouterGateway::new(&config.gateway),
        verifier: TurnstileVerifier::new(config.turnstile.clone()),
    };
    log::info!(
        "{} v{} using model {}",
        app::NAME,
        app::VERSION,
        state.gateway.model()
    );

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            return;
        }
        log::info!("Shutting down");
        on_signal.cancel();
    });

    server::serve(addr, state, shutdown).await?;
    Ok(())
}

/// Run one grammar check from the terminal (no human verification).
pub async fn run_check(
    text: &str,
    input_language: &str,
    explanation_language: &str,
    json: bool,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    config.require_api_key()?;

    let text = if text == "-" {
        io::read_to_string(io::stdin())?
    } else {
        text.to_string()
    };
    let text = text.trim();
    if text.is_empty() {
        eprintln!("Error: empty text");
        std::process::exit(1);
    }

    let gateway = OpenRouterGateway::new(&config.gateway);
    let prompt = GrammarPrompt {
        text,
        input_language,
        explanation_language,
    };
    let normalized = match check::check(&gateway, &prompt).await {
        Ok(n) => n,
        Err(CheckError::Normalize { source, raw }) => {
            eprintln!("Error: {}", source);
            log::debug!("Raw completion:\n{}", raw);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&normalized.result)?);
    } else {
        print!("{}", render(&normalized.result));
        if let Some(translated) = normalized.translated_text {
            println!("\nTranslation:\n{}", textwrap::fill(&translated, WRAP_WIDTH));
        }
    }
    Ok(())
}

/// Normalize a raw completion read from a file or stdin and print it as JSON.
pub fn run_parse(file: Option<&Path>, fallback: &str) -> Result<(), Box<dyn Error>> {
    let raw = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    match correction::normalize(&raw, fallback) {
        Ok(normalized) => {
            println!("{}", serde_json::to_string_pretty(&normalized.result)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print gateway and Turnstile settings. Never prints secrets.
pub fn run_config(config: &Config) {
    let set = |v: &Option<String>| if v.is_some() { "set ✓" } else { "not set" };
    println!("Gateway:      {}", config.gateway.base_url);
    println!("Model:        {}", config.gateway.model_id);
    println!("API key:      {}", set(&config.gateway.api_key));
    println!(
        "Turnstile:    {}",
        if config.turnstile.enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("Secret key:   {}", set(&config.turnstile.secret_key));
}

/// Human-readable rendering of a result: corrected text, then one block per correction.
fn render(result: &NormalizedResult) -> String {
    let mut out = String::new();
    out.push_str(&textwrap::fill(&result.corrected_text, WRAP_WIDTH));
    out.push('\n');

    let corrections = result.correction_errors();
    if corrections.is_empty() {
        out.push_str("\nNo errors found.\n");
    }
    for (i, c) in corrections.iter().enumerate() {
        let label = if c.error_type.is_empty() {
            String::new()
        } else {
            format!("[{}] ", c.error_type)
        };
        out.push_str(&format!(
            "\n{}. {}{} → {}\n",
            i + 1,
            label,
            c.original,
            c.corrected
        ));
        if !c.explanation.is_empty() {
            let opts = textwrap::Options::new(WRAP_WIDTH)
                .initial_indent("   ")
                .subsequent_indent("   ");
            out.push_str(&textwrap::fill(&c.explanation, opts));
            out.push('\n');
        }
    }
    out.push_str(&format!("\nConfidence: {:.0}%\n", result.confidence * 100.0));
    out
}
