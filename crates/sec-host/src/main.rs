//! SEC host binary.
//!
//! # Usage
//!
//! ```bash
//! # Interface identifiers and selectors
//! sec-host info
//!
//! # Send one message through the reference component
//! sec-host send --from 0x00000000000000000000000000000000000000a1 \
//!     --to 0x00000000000000000000000000000000000000b2 --message-type 2 --data 0xdeadbeef
//!
//! # Decode a MessageSent log captured elsewhere
//! sec-host decode --topic 0x3e2a... --topic 0x... --topic 0x... --topic 0x... --data 0x...
//!
//! # Connection request followed by connection response
//! sec-host handshake --alice 0x...a1 --bob 0x...b2
//! ```

use clap::{Parser, Subcommand};
use sec_core::{Erc7970, ReferenceSec};
use sec_host::{Host, HostConfig, MessageFilter, Receipt};
use sec_proto::{
    Address, B256, Bytes, Call, IERC165_ID, IERC7970, IERC7970_ID, InterfaceId,
    MESSAGE_SENT_SIGNATURE, MESSAGE_SENT_TOPIC, MessageSent, U256, message_type, signatures,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Stateless encrypted communication host
#[derive(Parser, Debug)]
#[command(name = "sec-host")]
#[command(about = "Run stateless encrypted communication components on an in-memory host")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Upper bound on any invocation's gas limit
    #[arg(long, default_value_t = 30_000_000)]
    block_gas_limit: u64,

    /// Label mixed into deployment addresses
    #[arg(long, default_value = "sec-local")]
    chain_label: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the component name, selectors and interface identifiers
    Info,

    /// Deploy the reference component and send one message
    Send {
        /// Caller identity
        #[arg(long)]
        from: Address,
        /// Destination identity (not validated)
        #[arg(long)]
        to: Address,
        /// Message type (decimal or 0x-prefixed)
        #[arg(long, default_value = "0")]
        message_type: U256,
        /// Payload as hex
        #[arg(long, default_value = "0x")]
        data: Bytes,
        /// Gas available to the invocation
        #[arg(long, default_value_t = 1_000_000)]
        gas_limit: u64,
    },

    /// Decode raw log topics and data into a MessageSent record
    Decode {
        /// Topics in order; repeat the flag once per topic
        #[arg(long = "topic")]
        topics: Vec<B256>,
        /// ABI-encoded log data as hex
        #[arg(long)]
        data: Bytes,
    },

    /// Run a connection request from alice and the response from bob
    Handshake {
        /// Initiator
        #[arg(long)]
        alice: Address,
        /// Responder
        #[arg(long)]
        bob: Address,
        /// Gas available to each invocation
        #[arg(long, default_value_t = 1_000_000)]
        gas_limit: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = HostConfig {
        block_gas_limit: args.block_gas_limit,
        chain_label: args.chain_label,
        ..HostConfig::default()
    };

    match args.command {
        Command::Info => info(),
        Command::Send { from, to, message_type, data, gas_limit } => {
            let mut host = Host::new(config);
            let sec = host.deploy(Address::ZERO, ReferenceSec::new());
            let call = Call::SendMessage { to, message_type, data };
            let receipt = host.transact_call(from, sec, &call, gas_limit)?;
            report(&receipt)?;
        },
        Command::Decode { topics, data } => {
            let record = MessageSent::decode_parts(&topics, &data)?;
            tracing::info!(kind = %record.kind(), "{}", serde_json::to_string(&record)?);
        },
        Command::Handshake { alice, bob, gas_limit } => handshake(config, alice, bob, gas_limit)?,
    }

    Ok(())
}

fn info() {
    let sec = ReferenceSec::new();
    tracing::info!("name: {}", sec.name());
    tracing::info!("{} id: {}", IERC7970.name, *IERC7970_ID);
    tracing::info!("IERC165 id: {}", IERC165_ID);
    tracing::info!("event {MESSAGE_SENT_SIGNATURE}: {}", *MESSAGE_SENT_TOPIC);

    let calls = [
        (signatures::NAME, Call::Name),
        (signatures::GET_INTERFACE_ID, Call::GetInterfaceId),
        (signatures::IS_IERC7970, Call::IsIerc7970),
        (signatures::SUPPORTS_INTERFACE, Call::SupportsInterface(IERC165_ID)),
        (
            signatures::SEND_MESSAGE,
            Call::SendMessage { to: Address::ZERO, message_type: U256::ZERO, data: Bytes::new() },
        ),
    ];
    for (signature, call) in calls {
        tracing::info!("selector {signature}: {}", InterfaceId::new(call.selector()));
    }
}

fn report(receipt: &Receipt) -> Result<(), serde_json::Error> {
    tracing::info!(
        tx_index = receipt.tx_index,
        gas_used = receipt.gas_used,
        "{}",
        serde_json::to_string(receipt)?
    );
    for entry in &receipt.logs {
        if let Some(record) = entry.message() {
            tracing::info!(log_index = entry.log_index, kind = %record.kind(), "{record:?}");
        }
    }
    Ok(())
}

fn handshake(
    config: HostConfig,
    alice: Address,
    bob: Address,
    gas_limit: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut host = Host::new(config);
    let sec = host.deploy(Address::ZERO, ReferenceSec::new());

    let request = Call::SendMessage {
        to: bob,
        message_type: message_type::CONNECTION_REQUEST,
        data: Bytes::new(),
    };
    report(&host.transact_call(alice, sec, &request, gas_limit)?)?;

    // Bob learns of the request by filtering on his own address.
    let inbox = host.messages(&MessageFilter::addressed_to(bob));
    let Some((_, incoming)) = inbox.last() else {
        return Err("connection request not observed".into());
    };

    let response = Call::SendMessage {
        to: incoming.from,
        message_type: message_type::CONNECTION_RESPONSE,
        data: Bytes::new(),
    };
    report(&host.transact_call(bob, sec, &response, gas_limit)?)?;

    tracing::info!(logs = host.log().len(), "handshake complete");
    Ok(())
}
