//! Application identity from Cargo.toml.
//!
//! Single source of truth for the app name, version, and service tag used across the codebase.

/// Application name (from Cargo.toml `package.name`).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Application version (from Cargo.toml `package.version`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service tag reported by the health endpoint.
pub const SERVICE: &str = "grammar-correction-tool";
