//! Configuration loading and application.
mod apply;
mod loader;
mod settings;
pub mod types;


pub use apply::apply_config;
pub use loader::load_config;
pub use settings::{FALLBACK_URL_ENV, RunSettings};

#[cfg(test)]
pub(crate) use loader::load_config_file;
