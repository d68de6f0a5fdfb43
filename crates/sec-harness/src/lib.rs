//! Deterministic test harness for stateless encrypted communication.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation for model-based
//! testing. Operations are applied to both the model and a real host running
//! the reference component, and their observable states are compared.
//!
//! # Determinism
//!
//! [`SimEnv`] derives identities and payloads from a seed, so a failing
//! scenario replays exactly from its seed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod sim_env;

pub use model::{
    ClientId, MalformedKind, ModelMessage, ModelWorld, ObservableState, Operation, OperationError,
    OperationResult, Query, Recipient, SmallMessage, WideMessage,
};
pub use sim_env::SimEnv;
