pub(crate) const DEFAULT_USER_AGENT: &str = concat!("hookburst/", env!("CARGO_PKG_VERSION"));

/// Config files checked in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["hookburst.toml", "hookburst.json"];

pub(crate) const DEFAULT_WORKLOAD_MIN_SECS: u64 = 1;
pub(crate) const DEFAULT_WORKLOAD_MAX_SECS: u64 = 5;
