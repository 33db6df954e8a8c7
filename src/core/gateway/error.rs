//! Gateway error types.

/// Errors from the model gateway call.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No API key was configured; the gateway cannot be called.
    #[error("OpenRouter API key is not configured")]
    MissingApiKey,
    #[error("{0}")]
    ApiAuth(String),
    #[error("API error: {0}")]
    ApiMessage(String),
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Map async-openai or transport errors into GatewayError.
pub fn map_api_error<E>(e: E) -> GatewayError
where
    E: std::fmt::Display + Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
{
    let s = e.to_string();
    if is_auth_failure(&s) {
        return GatewayError::ApiAuth(format!(
            "API error (401): {}. Check OPENROUTER_API_KEY in .env.",
            s
        ));
    }
    if s.contains("\"error\"")
        && let Some((_, rest)) = s.split_once("\"message\":\"")
        && let Some((msg, _)) = rest.split_once('"')
    {
        return GatewayError::ApiMessage(msg.to_string());
    }
    GatewayError::Other(e.into())
}

/// 401 as a status, not as any digit run that happens to contain it.
fn is_auth_failure(s: &str) -> bool {
    s.contains("cookie auth")
        || s.contains("401 Unauthorized")
        || s.split(|c: char| !c.is_ascii_alphanumeric())
            .next()
            .is_some_and(|first| first == "401")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_api_error_401() {
        let e = std::io::Error::other("401 No cookie auth credentials found");
        match map_api_error(e) {
            GatewayError::ApiAuth(msg) => assert!(msg.contains("OPENROUTER_API_KEY")),
            other => panic!("expected ApiAuth, got {:?}", other),
        }
    }

    #[test]
    fn map_api_error_401_status_line() {
        let e = std::io::Error::other("HTTP status client error (401 Unauthorized)");
        assert!(matches!(map_api_error(e), GatewayError::ApiAuth(_)));
    }

    #[test]
    fn map_api_error_401_inside_other_text_is_not_auth() {
        let e = std::io::Error::other("unexpected character at byte 14012");
        assert!(matches!(map_api_error(e), GatewayError::Other(_)));
        let e = std::io::Error::other("model acme/llm-401b is unavailable");
        assert!(matches!(map_api_error(e), GatewayError::Other(_)));
    }

    #[test]
    fn map_api_error_json_message() {
        let e = std::io::Error::other(r#"{"error":{"message":"Rate limit exceeded"}}"#);
        match map_api_error(e) {
            GatewayError::ApiMessage(msg) => assert_eq!(msg, "Rate limit exceeded"),
            other => panic!("expected ApiMessage, got {:?}", other),
        }
    }

    #[test]
    fn map_api_error_generic() {
        let e = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        assert!(matches!(map_api_error(e), GatewayError::Other(_)));
    }

    #[test]
    fn missing_key_message() {
        assert_eq!(
            GatewayError::MissingApiKey.to_string(),
            "OpenRouter API key is not configured"
        );
    }
}
