//! Execution environment for stateless encrypted communication components.
//!
//! This crate provides the side of the system the component itself never
//! sees:
//! - Caller authentication, via the per-invocation `CallContext`
//! - All-or-nothing invocations with gas metering
//! - The append-only event log and its topic filters
//!
//! ## Architecture
//!
//! ```text
//! sec-host
//!   ├─ Host        (deploy, transact, static_call, snapshot)
//!   ├─ GasMeter    (resource limits → environment-level aborts)
//!   ├─ EventLog    (gap-free, append-only, filterable by indexed topics)
//!   └─ HostConfig  (block gas limit, gas schedule)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
pub mod gas;
mod host;
pub mod log_store;

pub use config::{GasSchedule, HostConfig};
pub use error::HostError;
pub use gas::GasMeter;
pub use host::{Host, HostSnapshot, Receipt};
pub use log_store::{EventLog, LogEntry, LogFilter, MessageFilter};
