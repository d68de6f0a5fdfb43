//! Reference SEC component.
//!
//! Fully stateless: the struct has no fields, every method takes `&self`, and
//! the only effect of a send is the single log it returns.

use sec_proto::{
    Address, Bytes, Call, IERC7970_ID, InterfaceId, MessageSent, MessageType, abi,
};

use crate::{
    contract::{Contract, Execution, Revert},
    env::CallContext,
    interface::Erc7970,
    introspection::{self, Introspection},
};

/// Name reported by [`ReferenceSec`].
pub const REFERENCE_NAME: &str = "ReferenceSEC";

/// The reference implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceSec;

impl ReferenceSec {
    /// Create the component.
    pub const fn new() -> Self {
        Self
    }

    /// Identifier of the interface this component implements.
    pub fn get_interface_id(&self) -> InterfaceId {
        *IERC7970_ID
    }

    /// Always true; a cheaper form of `supports_interface(get_interface_id())`.
    pub const fn is_ierc7970(&self) -> bool {
        true
    }

    fn run(&self, ctx: &CallContext, call: Call) -> Execution {
        match call {
            Call::Name => Execution {
                return_data: abi::encode_string(self.name()).freeze().into(),
                logs: Vec::new(),
            },
            Call::SendMessage { to, message_type, data } => {
                let record = self.send_message(ctx, to, message_type, data);
                Execution { return_data: Bytes::new(), logs: vec![record.encode_log(ctx.address())] }
            },
            Call::SupportsInterface(id) => Execution {
                return_data: abi::encode_bool(self.supports_interface(id)).freeze().into(),
                logs: Vec::new(),
            },
            Call::GetInterfaceId => Execution {
                return_data: abi::encode_bytes4(self.get_interface_id()).freeze().into(),
                logs: Vec::new(),
            },
            Call::IsIerc7970 => Execution {
                return_data: abi::encode_bool(self.is_ierc7970()).freeze().into(),
                logs: Vec::new(),
            },
        }
    }
}

impl Introspection for ReferenceSec {
    fn supports_interface(&self, id: InterfaceId) -> bool {
        id == self.get_interface_id() || introspection::supports(id)
    }
}

impl Erc7970 for ReferenceSec {
    fn name(&self) -> &str {
        REFERENCE_NAME
    }

    fn send_message(
        &self,
        ctx: &CallContext,
        to: Address,
        message_type: MessageType,
        data: Bytes,
    ) -> MessageSent {
        tracing::debug!(
            from = %ctx.caller(),
            %to,
            %message_type,
            data_len = data.len(),
            "message sent"
        );
        MessageSent { from: ctx.caller(), to, message_type, data }
    }
}

impl Contract for ReferenceSec {
    fn execute(&self, ctx: &CallContext, calldata: &[u8]) -> Result<Execution, Revert> {
        if calldata.len() < 4 {
            return Err(Revert::MissingSelector { len: calldata.len() });
        }
        let call = Call::decode(calldata).inspect_err(|e| {
            tracing::trace!(caller = %ctx.caller(), error = %e, "rejecting calldata");
        })?;
        tracing::trace!(caller = %ctx.caller(), selector = ?call.selector(), "dispatch");

        Ok(self.run(ctx, call))
    }
}
