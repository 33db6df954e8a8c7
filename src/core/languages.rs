//! Languages offered for input and explanations.
//!
//! Loaded from `config/languages.json` (embedded at compile time, validated by build.rs).

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// A selectable language. `code` is the value sent back in check requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

fn load_languages() -> Vec<Language> {
    let json = include_str!("../../config/languages.json");
    serde_json::from_str(json).expect("languages.json must be valid")
}

static LANGUAGES: OnceLock<Vec<Language>> = OnceLock::new();

/// All supported languages, loading from config on first access.
pub fn languages() -> &'static [Language] {
    LANGUAGES.get_or_init(load_languages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn languages_load_in_file_order() {
        let langs = languages();
        assert_eq!(langs.len(), 10);
        assert_eq!(langs[0].code, "English");
        assert!(langs.iter().any(|l| l.code == "German"));
    }
}
