//! Correction prompt sent to the model.

/// Inputs of a grammar check.
#[derive(Debug, Clone, Copy)]
pub struct GrammarPrompt<'a> {
    pub text: &'a str,
    pub input_language: &'a str,
    pub explanation_language: &'a str,
}

impl GrammarPrompt<'_> {
    /// Render the prompt asking for a JSON-only correction object.
    pub fn render(&self) -> String {
        let GrammarPrompt {
            text,
            input_language,
            explanation_language,
        } = *self;
        format!(
            r#"You are a grammar correction expert. Analyze the following {input_language} text for grammar errors and provide corrections.

Text to analyze: "{text}"

Please respond with a JSON object in this exact format:
{{
  "correctedText": "corrected version of the text",
  "errors": [
    {{
      "original": "original text with error",
      "corrected": "corrected version of that text",
      "errorType": "type of grammar error",
      "explanation": "explanation of the error in {explanation_language}",
      "position": position_in_text
    }}
  ],
  "confidence": 0.95
}}

Important instructions:
1. Identify all grammar errors in the text
2. Provide corrected versions
3. Explain each error in {explanation_language}
4. Return ONLY valid JSON
5. If no errors are found, return an empty errors array
6. Ensure the correctedText is a fully corrected version of the input"#
        )
    }
}
