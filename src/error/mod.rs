mod app;
mod config;
mod export;
mod http;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use export::ExportError;
pub use http::HttpError;
pub use validation::ValidationError;
