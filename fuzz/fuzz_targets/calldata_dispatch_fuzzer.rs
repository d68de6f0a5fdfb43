//! Fuzz target for calldata dispatch through the host
//!
//! Prevent forged senders and partial effects from hostile calldata
//!
//! # Strategy
//!
//! - Raw calldata: arbitrary bytes, with an optional real selector prefix so
//!   the argument decoders get exercised
//! - Gas limits: anything from zero to the block limit
//! - Read-only and state-changing invocations of the same input
//!
//! # Invariants
//!
//! - NEVER panic on any calldata
//! - A failed invocation appends nothing
//! - A successful invocation appends at most one log, and its `from` is the
//!   caller
//! - A read-only invocation never appends
//! - Component state is identical before and after

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sec_core::ReferenceSec;
use sec_host::{Host, HostConfig};
use sec_proto::{Address, Call, signatures};

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Prefix {
    None,
    Name,
    SendMessage,
    SupportsInterface,
    GetInterfaceId,
    IsIerc7970,
}

impl Prefix {
    fn selector(self) -> Option<[u8; 4]> {
        let signature = match self {
            Self::None => return None,
            Self::Name => signatures::NAME,
            Self::SendMessage => signatures::SEND_MESSAGE,
            Self::SupportsInterface => signatures::SUPPORTS_INTERFACE,
            Self::GetInterfaceId => signatures::GET_INTERFACE_ID,
            Self::IsIerc7970 => signatures::IS_IERC7970,
        };
        Some(sec_proto::selector(signature))
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    caller: [u8; 20],
    prefix: Prefix,
    body: Vec<u8>,
    gas_limit: u32,
    read_only: bool,
}

fuzz_target!(|input: FuzzInput| {
    let mut host = Host::new(HostConfig::default());
    let component = host.deploy(Address::ZERO, ReferenceSec::new());
    let before = host.snapshot();

    let caller = Address::from(input.caller);
    let mut calldata = input.prefix.selector().map(Vec::from).unwrap_or_default();
    calldata.extend_from_slice(&input.body);

    if input.read_only {
        let _ = host.static_call(caller, component, &calldata);
        assert!(host.log().is_empty(), "read-only invocation appended");
    } else {
        match host.transact(caller, component, &calldata, u64::from(input.gas_limit)) {
            Ok(receipt) => {
                assert!(receipt.logs.len() <= 1, "more than one log per invocation");
                if let Some(entry) = receipt.logs.first() {
                    let record = entry.message().expect("emitted log decodes");
                    assert_eq!(record.from, caller, "sender not bound to caller");
                    assert!(matches!(Call::decode(&calldata), Ok(Call::SendMessage { .. })));
                }
            },
            Err(_) => assert!(host.log().is_empty(), "failed invocation appended"),
        }
    }

    assert!(before.same_state(&host.snapshot()), "component state changed");
});
