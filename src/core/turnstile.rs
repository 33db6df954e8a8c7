//! Human verification through Cloudflare Turnstile.

use serde::Deserialize;

use crate::core::config::TurnstileConfig;

/// Decides whether a request token comes from a human.
pub trait HumanVerifier: Send + Sync {
    fn verify(&self, token: &str) -> impl Future<Output = bool> + Send;
}

#[derive(Debug, Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Turnstile siteverify client. Any failure to reach or decode siteverify is a rejection.
pub struct TurnstileVerifier {
    config: TurnstileConfig,
    http: reqwest::Client,
}

impl TurnstileVerifier {
    pub fn new(config: TurnstileConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn siteverify(&self, secret: &str, token: &str) -> Result<bool, reqwest::Error> {
        let response = self
            .http
            .post(&self.config.verify_url)
            .form(&[("secret", secret), ("response", token)])
            .send()
            .await?;

        if !response.status().is_success() {
            log::error!(
                "Turnstile verification request failed with status: {}",
                response.status()
            );
            return Ok(false);
        }

        let body: SiteverifyResponse = response.json().await?;
        if !body.success {
            log::warn!("Turnstile rejected token: {:?}", body.error_codes);
        }
        Ok(body.success)
    }
}

impl HumanVerifier for TurnstileVerifier {
    async fn verify(&self, token: &str) -> bool {
        if !self.config.enabled {
            return true;
        }
        let Some(secret) = self.config.secret_key.as_deref() else {
            log::error!("TURNSTILE_SECRET_KEY is not set");
            return false;
        };
        self.siteverify(secret, token).await.unwrap_or_else(|e| {
            log::error!("An error occurred during Turnstile verification: {}", e);
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Form, Json, Router};
    use serde_json::json;

    use super::*;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/siteverify", addr)
    }

    /// Accepts only `valid-token` signed with `test-secret-key`.
    async fn spawn_siteverify() -> String {
        let app = Router::new().route(
            "/siteverify",
            post(|Form(form): Form<HashMap<String, String>>| async move {
                let ok = form.get("secret").map(String::as_str) == Some("test-secret-key")
                    && form.get("response").map(String::as_str) == Some("valid-token");
                if ok {
                    Json(json!({"success": true}))
                } else {
                    Json(json!({"success": false, "error-codes": ["invalid-input-response"]}))
                }
            }),
        );
        spawn(app).await
    }

    fn verifier(url: &str, secret: Option<&str>) -> TurnstileVerifier {
        TurnstileVerifier::new(TurnstileConfig {
            enabled: true,
            secret_key: secret.map(String::from),
            verify_url: url.to_string(),
        })
    }

    #[tokio::test]
    async fn disabled_always_passes() {
        let v = TurnstileVerifier::new(TurnstileConfig {
            enabled: false,
            secret_key: None,
            verify_url: "http://127.0.0.1:9/siteverify".to_string(),
        });
        assert!(v.verify("anything").await);
    }

    #[tokio::test]
    async fn missing_secret_rejects() {
        let v = verifier("http://127.0.0.1:9/siteverify", None);
        assert!(!v.verify("valid-token").await);
    }

    #[tokio::test]
    async fn valid_token_passes() {
        let url = spawn_siteverify().await;
        assert!(verifier(&url, Some("test-secret-key")).verify("valid-token").await);
    }

    #[tokio::test]
    async fn invalid_token_rejects() {
        let url = spawn_siteverify().await;
        assert!(!verifier(&url, Some("test-secret-key")).verify("invalid-token").await);
    }

    #[tokio::test]
    async fn non_success_status_rejects() {
        let app = Router::new().route(
            "/siteverify",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let url = spawn(app).await;
        assert!(!verifier(&url, Some("test-secret-key")).verify("valid-token").await);
    }

    #[tokio::test]
    async fn unreachable_endpoint_rejects() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = format!("http://{}/siteverify", addr);
        assert!(!verifier(&url, Some("test-secret-key")).verify("valid-token").await);
    }
}
