//! Core library for the `hookburst` CLI.
//!
//! `hookburst` fires a burst of concurrent POST requests at a webhook,
//! records one result per request, and reports latency, throughput, and
//! processing overhead. The crate exposes the building blocks the binary
//! uses: argument and config types, the dispatcher, the aggregator, and the
//! report and export writers.
pub mod args;
pub mod config;
pub mod error;
pub mod export;
pub mod http;
pub mod metrics;
pub mod report;
