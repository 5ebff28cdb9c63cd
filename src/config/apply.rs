use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::LoadTestArgs;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values given on the command line or through the environment keep
/// precedence over the config file; the file only replaces defaults.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut LoadTestArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        let duration = timeout
            .to_duration()
            .map_err(|err| AppError::config(ConfigError::InvalidTimeout { source: err }))?;
        args.request_timeout = Some(duration);
    }

    if !is_explicit(matches, "no_workload")
        && let Some(no_workload) = config.no_workload
    {
        args.no_workload = no_workload;
    }

    if !is_explicit(matches, "workload_min")
        && let Some(min) = config.workload_min
    {
        args.workload_min = min;
    }

    if !is_explicit(matches, "workload_max")
        && let Some(max) = config.workload_max
    {
        args.workload_max = max;
    }

    if !args.no_workload
        && args.workload_min > args.workload_max
        && (config.workload_min.is_some() || config.workload_max.is_some())
    {
        return Err(AppError::config(ConfigError::WorkloadRangeInverted {
            min: args.workload_min,
            max: args.workload_max,
        }));
    }

    if !is_explicit(matches, "no_table")
        && let Some(no_table) = config.no_table
    {
        args.no_table = no_table;
    }

    if !is_explicit(matches, "export_csv")
        && let Some(path) = config.export_csv.clone()
    {
        args.export_csv = Some(path);
    }

    if !is_explicit(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        args.export_json = Some(path);
    }

    if !is_explicit(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}
