use std::time::Duration;

use url::Url;

use crate::args::{LoadTestArgs, WorkloadRange};
use crate::error::{AppError, AppResult, ConfigError};

/// Secondary environment variable consulted for the target URL.
pub const FALLBACK_URL_ENV: &str = "N8N_WEBHOOK_URL";

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub target: Url,
    pub requests: usize,
    pub request_timeout: Option<Duration>,
    pub workload: Option<WorkloadRange>,
    pub show_table: bool,
    pub export_csv: Option<String>,
    pub export_json: Option<String>,
}

impl RunSettings {
    /// Validates merged arguments into run settings.
    ///
    /// `fallback_url` is used only when no URL came from the CLI, the
    /// `WEBHOOK_URL` variable, or the config file.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or not http(s), or the
    /// workload range is inverted.
    pub fn resolve(args: &LoadTestArgs, fallback_url: Option<String>) -> AppResult<Self> {
        let raw_url = args
            .url
            .clone()
            .or(fallback_url)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::config(ConfigError::MissingUrl))?;
        let target = parse_target(&raw_url)?;

        Ok(Self {
            target,
            requests: args.requested(),
            request_timeout: args.request_timeout,
            workload: args.workload_range()?,
            show_table: !args.no_table,
            export_csv: args.export_csv.clone(),
            export_json: args.export_json.clone(),
        })
    }
}

fn parse_target(raw: &str) -> AppResult<Url> {
    let target = Url::parse(raw).map_err(|err| {
        AppError::config(ConfigError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    match target.scheme() {
        "http" | "https" => Ok(target),
        other => Err(AppError::config(ConfigError::UnsupportedScheme {
            scheme: other.to_owned(),
        })),
    }
}
