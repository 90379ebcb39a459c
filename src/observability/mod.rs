//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! ledger / contractkit produce:
//!     → tracing events (structured fields, never key material)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr)
//!     → optional Prometheus scrape endpoint
//! ```

pub mod logging;
pub mod metrics;
