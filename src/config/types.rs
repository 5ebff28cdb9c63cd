use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_arg;
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "webhook_url")]
    pub url: Option<String>,
    pub timeout: Option<DurationValue>,
    pub workload_min: Option<u64>,
    pub workload_max: Option<u64>,
    pub no_workload: Option<bool>,
    pub no_table: Option<bool>,
    pub export_csv: Option<String>,
    pub export_json: Option<String>,
    pub verbose: Option<bool>,
}

/// A duration given either as whole seconds or as text such as `"750ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
