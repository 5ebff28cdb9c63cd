//! Result types, latency histogram, and batch aggregation.
mod aggregate;
mod histogram;
mod types;


pub use aggregate::aggregate;
pub use histogram::LatencyHistogram;
pub use types::{AggregateStats, OverheadStats, RequestResult, RequestTask};
