pub mod app;
pub mod check;
pub mod config;
pub mod correction;
pub mod gateway;
pub mod languages;
pub mod turnstile;
pub mod util;
