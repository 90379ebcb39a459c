//! Metrics collection and exposition.
//!
//! # Metrics
//! - `celo_rpc_requests_total` (counter): RPC calls by method and outcome
//! - `celo_transactions_submitted_total` (counter): broadcasts by kind
//! - `celo_confirmation_outcomes_total` (counter): terminal waiter states
//! - `celo_confirmation_wait_seconds` (histogram): time spent waiting
//!
//! Recording is a no-op until a recorder is installed, so library users
//! that never call [`init_metrics`] pay nothing.

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::ledger::types::ConfirmationState;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one RPC call.
pub fn record_rpc(method: &'static str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("celo_rpc_requests_total", "method" => method, "outcome" => outcome).increment(1);
}

/// Record a transaction handed to the node.
pub fn record_submission(kind: &'static str) {
    counter!("celo_transactions_submitted_total", "kind" => kind).increment(1);
}

/// Record how a confirmation wait ended.
pub fn record_confirmation(state: ConfirmationState, waited: Duration) {
    counter!("celo_confirmation_outcomes_total", "outcome" => state.as_str()).increment(1);
    histogram!("celo_confirmation_wait_seconds").record(waited.as_secs_f64());
}
