//! Response normalization: recover a JSON object from a raw model completion and
//! normalize it into a [`NormalizedResult`].

mod error;
pub mod recovery;
mod validate;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[allow(unused_imports)]
pub use error::{NormalizeError, ParseFailure, ShapeFailure};
#[allow(unused_imports)]
pub use recovery::parse;
#[allow(unused_imports)]
pub use validate::{DEFAULT_CONFIDENCE, validate};

/// One grammar issue flagged by the model. Lenient: missing or mistyped fields
/// take defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionError {
    pub original: String,
    pub corrected: String,
    pub error_type: String,
    pub explanation: String,
    /// Offset hint from the model; neither accurate nor unique.
    pub position: i64,
}

impl CorrectionError {
    /// Read an entry field by field. `None` only when the entry is not an object.
    pub fn from_entry(entry: &Value) -> Option<Self> {
        let obj = entry.as_object()?;
        let text = |key: &str| match obj.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        };
        let position = match obj.get("position") {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or_default(),
            Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        };
        Some(Self {
            original: text("original"),
            corrected: text("corrected"),
            error_type: text("errorType"),
            explanation: text("explanation"),
            position,
        })
    }
}

/// Validated correction result. Entries in `errors` keep the order the model sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    pub corrected_text: String,
    pub errors: Vec<Value>,
    pub confidence: f64,
}

impl NormalizedResult {
    /// Typed view of every entry that is an object.
    pub fn correction_errors(&self) -> Vec<CorrectionError> {
        self.errors
            .iter()
            .filter_map(CorrectionError::from_entry)
            .collect()
    }
}

/// Output of [`normalize`]: the validated result plus optional request-scoped extras
/// the model may have included.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub result: NormalizedResult,
    pub translated_text: Option<String>,
}

/// Parse a raw completion and validate it, with `fallback_text` standing in for a
/// missing `correctedText`.
pub fn normalize(raw: &str, fallback_text: &str) -> Result<Normalized, NormalizeError> {
    let candidate = recovery::parse(raw)?;
    let translated_text = candidate
        .get("translatedText")
        .and_then(Value::as_str)
        .map(String::from);
    let result = validate::validate(candidate, fallback_text)?;
    Ok(Normalized {
        result,
        translated_text,
    })
}
