//! Webhook request execution and the fan-out/fan-in dispatcher.
mod client;
mod dispatch;
mod execution;
mod payload;

#[cfg(test)]
mod test_support;

pub use dispatch::{BatchOutcome, DispatchConfig, Dispatcher};
pub use payload::{WebhookPayload, WebhookResponse};
