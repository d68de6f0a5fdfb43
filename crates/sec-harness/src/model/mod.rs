//! Reference model for model-based testing.
//!
//! The model captures the observable behaviour of a conforming component
//! without any ABI encoding, gas accounting or host machinery. It serves as
//! the oracle against which the host plus reference component is verified.
//!
//! # Design Principles
//!
//! - Simplicity: the model should be obviously correct
//! - Behaviour, not encoding: captures WHAT is observable, not HOW
//! - Deterministic: same inputs produce same outputs

pub mod operation;
mod world;

pub use operation::{
    ClientId, MalformedKind, Operation, OperationError, OperationResult, Query, Recipient,
    SmallMessage, WideMessage,
};
pub use world::{ModelMessage, ModelWorld, ObservableState};
