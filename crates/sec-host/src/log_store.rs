//! Append-only event log.
//!
//! # Invariants
//!
//! - Sequential indices: the n-th appended log has `log_index == n`, no gaps
//! - Append only: entries are never modified or removed
//! - Emission order: logs of one invocation keep the order the component
//!   emitted them in, and invocations are appended in processing order

use sec_proto::{Address, B256, Log, MESSAGE_SENT_TOPIC, MessageSent, MessageType, abi};
use serde::Serialize;

/// A log plus its position in the host's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Global, gap-free position.
    pub log_index: u64,
    /// Invocation that emitted the log.
    pub tx_index: u64,
    /// The log itself.
    pub log: Log,
}

impl LogEntry {
    /// Decode as a `MessageSent` record, if it is one.
    pub fn message(&self) -> Option<MessageSent> {
        MessageSent::decode_log(&self.log).ok()
    }
}

/// Positional topic filter, in the style of the platform's log query.
///
/// `None` matches anything at that position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Emitting address.
    pub address: Option<Address>,
    /// Required topic per position.
    pub topics: [Option<B256>; 4],
    /// Skip entries below this index.
    pub from_index: u64,
}

impl LogFilter {
    /// Whether `entry` passes the filter.
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if entry.log_index < self.from_index {
            return false;
        }
        if self.address.is_some_and(|a| a != entry.log.address) {
            return false;
        }
        let topics = entry.log.data.topics();
        self.topics
            .iter()
            .enumerate()
            .all(|(i, wanted)| wanted.is_none_or(|t| topics.get(i) == Some(&t)))
    }
}

/// Filter on the indexed fields of `MessageSent`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    /// Emitting component.
    pub emitter: Option<Address>,
    /// Sender.
    pub from: Option<Address>,
    /// Recipient.
    pub to: Option<Address>,
    /// Classifier.
    pub message_type: Option<MessageType>,
}

impl MessageFilter {
    /// Every message addressed to `to`.
    pub fn addressed_to(to: Address) -> Self {
        Self { to: Some(to), ..Self::default() }
    }

    /// Every message sent by `from`.
    pub fn sent_by(from: Address) -> Self {
        Self { from: Some(from), ..Self::default() }
    }

    /// Equivalent topic filter.
    pub fn to_log_filter(&self) -> LogFilter {
        LogFilter {
            address: self.emitter,
            topics: [
                Some(*MESSAGE_SENT_TOPIC),
                self.from.map(abi::address_word),
                self.to.map(abi::address_word),
                self.message_type.map(abi::uint_word),
            ],
            from_index: 0,
        }
    }
}

/// In-memory append-only log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the newest entry.
    pub fn latest_log_index(&self) -> Option<u64> {
        self.entries.last().map(|e| e.log_index)
    }

    /// All entries in order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Append the logs of one invocation; returns the new entries.
    pub fn append(&mut self, tx_index: u64, logs: Vec<Log>) -> &[LogEntry] {
        let start = self.entries.len();
        for log in logs {
            let log_index = self.entries.len() as u64;
            tracing::trace!(log_index, tx_index, emitter = %log.address, "log appended");
            self.entries.push(LogEntry { log_index, tx_index, log });
        }
        &self.entries[start..]
    }

    /// Entries passing `filter`, in order.
    pub fn query<'a>(&'a self, filter: &'a LogFilter) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries.iter().filter(move |e| filter.matches(e))
    }

    /// Decoded messages passing `filter`, with their log indices.
    pub fn messages(&self, filter: &MessageFilter) -> Vec<(u64, MessageSent)> {
        let filter = filter.to_log_filter();
        self.query(&filter).filter_map(|e| e.message().map(|m| (e.log_index, m))).collect()
    }
}

#[cfg(test)]
mod tests {
    use sec_proto::{Bytes, U256};

    use super::*;

    const EMITTER: Address = Address::new([0xee; 20]);

    fn message(from: u8, to: u8, message_type: u64) -> Log {
        MessageSent {
            from: Address::new([from; 20]),
            to: Address::new([to; 20]),
            message_type: U256::from(message_type),
            data: Bytes::from(vec![from, to]),
        }
        .encode_log(EMITTER)
    }

    // Oracle: indices are 0..len with no gaps
    fn verify_sequential(log: &EventLog) {
        for (i, entry) in log.entries().iter().enumerate() {
            assert_eq!(entry.log_index, i as u64, "gap at position {i}");
        }
    }

    #[test]
    fn append_assigns_sequential_indices() {
        let mut log = EventLog::new();
        assert_eq!(log.latest_log_index(), None);

        let appended = log.append(0, vec![message(1, 2, 0), message(2, 1, 1)]);
        assert_eq!(appended.len(), 2);
        assert_eq!(log.append(1, vec![message(1, 2, 2)])[0].log_index, 2);

        assert_eq!(log.latest_log_index(), Some(2));
        verify_sequential(&log);
    }

    #[test]
    fn append_nothing_is_noop() {
        let mut log = EventLog::new();
        assert!(log.append(0, Vec::new()).is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn filter_by_each_indexed_field() {
        let mut log = EventLog::new();
        log.append(0, vec![message(1, 2, 0)]);
        log.append(1, vec![message(2, 1, 1)]);
        log.append(2, vec![message(1, 3, 2)]);

        let from_one = log.messages(&MessageFilter::sent_by(Address::new([1; 20])));
        assert_eq!(from_one.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 2]);

        let to_one = log.messages(&MessageFilter::addressed_to(Address::new([1; 20])));
        assert_eq!(to_one.len(), 1);
        assert_eq!(to_one[0].1.from, Address::new([2; 20]));

        let responses = log.messages(&MessageFilter {
            message_type: Some(U256::from(1)),
            ..MessageFilter::default()
        });
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].0, 1);
    }

    #[test]
    fn filter_by_emitter_and_start() {
        let mut log = EventLog::new();
        log.append(0, vec![message(1, 2, 0), message(1, 2, 0)]);

        let elsewhere = LogFilter { address: Some(Address::ZERO), ..LogFilter::default() };
        assert_eq!(log.query(&elsewhere).count(), 0);

        let later = LogFilter { from_index: 1, ..LogFilter::default() };
        assert_eq!(log.query(&later).count(), 1);
    }
}
