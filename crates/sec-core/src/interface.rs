//! The stateless encrypted communication interface.

use sec_proto::{Address, Bytes, MessageSent, MessageType};

use crate::{env::CallContext, introspection::Introspection};

/// Capability set every conforming component exposes.
///
/// Methods take `&self`: a conforming component holds no mutable state, and
/// its only observable effect is the [`MessageSent`] record returned by
/// [`Erc7970::send_message`], which the host appends to the log.
pub trait Erc7970: Introspection {
    /// Stable, non-empty name of the implementation.
    fn name(&self) -> &str;

    /// Produce the record for one send.
    ///
    /// Implementations must not validate `to`, `message_type` or `data`, and
    /// must take `from` from `ctx`.
    fn send_message(
        &self,
        ctx: &CallContext,
        to: Address,
        message_type: MessageType,
        data: Bytes,
    ) -> MessageSent;
}
