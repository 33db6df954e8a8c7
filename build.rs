//! Build script: validates languages.json at compile time.

use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let config_path: PathBuf = [&manifest_dir, "config", "languages.json"]
        .iter()
        .collect();
    println!("cargo:rerun-if-changed={}", config_path.display());
    let json = std::fs::read_to_string(&config_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. languages.json must exist and be valid.",
            config_path.display(),
            e
        )
    });
    #[derive(serde::Deserialize)]
    struct LanguageEntry {
        code: String,
        name: String,
    }
    let entries: Vec<LanguageEntry> = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "languages.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });
    if entries.is_empty() {
        panic!("languages.json must list at least one language");
    }
    for e in &entries {
        if e.code.trim().is_empty() || e.name.trim().is_empty() {
            panic!("languages.json entries need a non-empty code and name");
        }
    }
}
