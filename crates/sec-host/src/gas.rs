//! Gas metering.
//!
//! Exhausting gas is an environment-level abort: the invocation fails as a
//! whole and none of its logs are appended.

use sec_proto::Log;

use crate::{config::GasSchedule, error::HostError};

/// Gas needed before the component runs at all.
pub fn intrinsic_cost(schedule: &GasSchedule, calldata: &[u8]) -> u64 {
    calldata.iter().fold(schedule.intrinsic, |acc, b| {
        let byte_cost =
            if *b == 0 { schedule.calldata_zero_byte } else { schedule.calldata_nonzero_byte };
        acc.saturating_add(byte_cost)
    })
}

/// Gas needed to append one log.
pub fn log_cost(schedule: &GasSchedule, log: &Log) -> u64 {
    let topics = log.data.topics().len() as u64;
    let data = log.data.data.len() as u64;
    schedule
        .log_base
        .saturating_add(schedule.log_topic.saturating_mul(topics))
        .saturating_add(schedule.log_data_byte.saturating_mul(data))
}

/// Tracks gas spent by one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasMeter {
    limit: u64,
    used: u64,
}

impl GasMeter {
    /// Meter with `limit` gas available.
    pub const fn new(limit: u64) -> Self {
        Self { limit, used: 0 }
    }

    /// Gas spent so far.
    pub const fn used(&self) -> u64 {
        self.used
    }

    /// Gas still available.
    pub const fn remaining(&self) -> u64 {
        self.limit - self.used
    }

    /// Spend `amount`, or fail without spending anything.
    pub fn charge(&mut self, amount: u64) -> Result<(), HostError> {
        let required = self.used.saturating_add(amount);
        if required > self.limit {
            return Err(HostError::OutOfGas { limit: self.limit, required });
        }
        self.used = required;
        Ok(())
    }
}
