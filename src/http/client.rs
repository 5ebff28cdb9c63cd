use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;

use super::dispatch::DispatchConfig;

/// Builds the shared client. No request timeout is applied unless the
/// config sets one.
pub(super) fn build_client(config: &DispatchConfig) -> Result<Client, HttpError> {
    let mut builder = Client::builder().user_agent(DEFAULT_USER_AGENT);

    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })
}
