//! Seeded source of identities and payloads.
//!
//! Everything random in a test scenario comes from one ChaCha stream, so a
//! failure replays exactly from its seed.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sec_proto::{Address, Bytes, MessageType, U256};

/// Deterministic environment for test scenarios.
#[derive(Debug, Clone)]
pub struct SimEnv {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SimEnv {
    /// Environment whose every draw derives from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Seed this environment was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A fresh non-zero identity.
    pub fn address(&mut self) -> Address {
        loop {
            let mut bytes = [0u8; 20];
            self.rng.fill_bytes(&mut bytes);
            let address = Address::from(bytes);
            if address != Address::ZERO {
                return address;
            }
        }
    }

    /// `n` distinct identities.
    pub fn identities(&mut self, n: usize) -> Vec<Address> {
        let mut identities = Vec::with_capacity(n);
        while identities.len() < n {
            let address = self.address();
            if !identities.contains(&address) {
                identities.push(address);
            }
        }
        identities
    }

    /// Opaque payload of up to `max_len` bytes.
    pub fn payload(&mut self, max_len: usize) -> Bytes {
        let len = self.rng.gen_range(0..=max_len);
        let mut bytes = vec![0u8; len];
        self.rng.fill_bytes(&mut bytes);
        Bytes::from(bytes)
    }

    /// Message type spanning the full `uint256` range.
    pub fn message_type(&mut self) -> MessageType {
        let limbs: [u64; 4] = self.rng.r#gen();
        U256::from_limbs(limbs)
    }
}
