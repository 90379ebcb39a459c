//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Ctrl-C / caller decision
//!     → Cancellation::cancel()
//!     → every CancelToken resolves
//!     → ConfirmationWaiter stops polling with Error::Cancelled
//! ```

pub mod cancel;

pub use cancel::{CancelToken, Cancellation};
