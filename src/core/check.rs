//! One grammar check: gateway call, content extraction, normalization.

use crate::core::correction::{NormalizeError, Normalized, normalize};
use crate::core::gateway::{CompletionGateway, GatewayError, GrammarPrompt, extract_content};

/// Failure of a single grammar check. Each variant maps to a distinct client-facing error.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// The gateway answered without `choices[0].message.content`.
    #[error("Invalid response from OpenRouter API")]
    NoContent,
    /// The completion could not be normalized; `raw` is the full completion text.
    #[error("{source}")]
    Normalize { source: NormalizeError, raw: String },
}

/// Run a check: ask the gateway, then normalize its completion with the submitted text
/// as fallback for a missing `correctedText`.
pub async fn check<G: CompletionGateway>(
    gateway: &G,
    prompt: &GrammarPrompt<'_>,
) -> Result<Normalized, CheckError> {
    let response = gateway.check_grammar(prompt).await?;
    let content = extract_content(&response).ok_or(CheckError::NoContent)?;
    log::debug!("Completion is {} bytes", content.len());
    normalize(&content, prompt.text).map_err(|source| CheckError::Normalize {
        source,
        raw: content,
    })
}
