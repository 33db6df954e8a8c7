//! Response validator: guarantee the three result fields with the right types.

use serde_json::Value;

use super::NormalizedResult;
use super::error::ShapeFailure;

/// Confidence used when the model omits it or sends a non-number.
/// Indistinguishable from a model that really reports 0.5.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Normalize a parsed candidate. Fails only when the candidate is not a JSON object.
///
/// Each field falls back on its own: `correctedText` to `fallback_text` unless it is a
/// non-empty string, `errors` to an empty list unless it is an array, `confidence` to
/// [`DEFAULT_CONFIDENCE`] unless it is a number. Error entries are passed through as-is.
pub fn validate(candidate: Value, fallback_text: &str) -> Result<NormalizedResult, ShapeFailure> {
    let mut obj = match candidate {
        Value::Object(obj) => obj,
        other => {
            return Err(ShapeFailure {
                kind: json_kind(&other),
            });
        }
    };

    let corrected_text = match obj.remove("correctedText") {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => fallback_text.to_string(),
    };
    let errors = match obj.remove("errors") {
        Some(Value::Array(entries)) => entries,
        _ => Vec::new(),
    };
    let confidence = obj
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_CONFIDENCE);

    Ok(NormalizedResult {
        corrected_text,
        errors,
        confidence,
    })
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_is_shape_failure() {
        let err = validate(Value::Null, "x").unwrap_err();
        assert_eq!(err.kind, "null");
    }

    #[test]
    fn primitives_and_arrays_are_shape_failures() {
        assert_eq!(validate(json!(3), "x").unwrap_err().kind, "number");
        assert_eq!(validate(json!("s"), "x").unwrap_err().kind, "string");
        assert_eq!(validate(json!(true), "x").unwrap_err().kind, "boolean");
        assert_eq!(validate(json!([{}]), "x").unwrap_err().kind, "array");
    }

    #[test]
    fn empty_object_gets_all_defaults() {
        let out = validate(json!({}), "x").unwrap();
        assert_eq!(
            out,
            NormalizedResult {
                corrected_text: "x".to_string(),
                errors: vec![],
                confidence: 0.5,
            }
        );
    }

    #[test]
    fn empty_corrected_text_falls_back() {
        let out = validate(json!({"correctedText": ""}), "input").unwrap();
        assert_eq!(out.corrected_text, "input");
    }

    #[test]
    fn non_string_corrected_text_falls_back() {
        let out = validate(json!({"correctedText": 42}), "input").unwrap();
        assert_eq!(out.corrected_text, "input");
    }

    #[test]
    fn errors_of_wrong_type_become_empty() {
        let out = validate(json!({"errors": "none"}), "x").unwrap();
        assert!(out.errors.is_empty());
        let out = validate(json!({"errors": null}), "x").unwrap();
        assert!(out.errors.is_empty());
    }

    #[test]
    fn malformed_entries_pass_through_in_order() {
        let out = validate(
            json!({"errors": [{"original": "a"}, 7, {"position": "nope"}]}),
            "x",
        )
        .unwrap();
        assert_eq!(
            out.errors,
            vec![json!({"original": "a"}), json!(7), json!({"position": "nope"})]
        );
    }

    #[test]
    fn non_numeric_confidence_defaults() {
        let out = validate(json!({"confidence": "high"}), "x").unwrap();
        assert_eq!(out.confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn confidence_is_not_clamped() {
        let out = validate(json!({"confidence": 1.7}), "x").unwrap();
        assert_eq!(out.confidence, 1.7);
        let out = validate(json!({"confidence": 0}), "x").unwrap();
        assert_eq!(out.confidence, 0.0);
    }

    #[test]
    fn validate_is_idempotent() {
        let candidates = [
            json!({}),
            json!({"correctedText": "Fixed.", "errors": [{"original": "a"}], "confidence": 0.9}),
            json!({"correctedText": 1, "errors": {}, "confidence": null}),
        ];
        for candidate in candidates {
            let once = validate(candidate, "fallback").unwrap();
            let again = validate(serde_json::to_value(&once).unwrap(), "fallback").unwrap();
            assert_eq!(once, again);
        }
    }
}
