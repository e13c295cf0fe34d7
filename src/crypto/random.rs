// Random number generation

use rand::rngs::OsRng;
use rand::RngCore;

use crate::crypto::hash::{HashFunction, SHA256};
use crate::error::XmssError;

/// Secure random number generator trait
pub trait SecureRandom {
    /// Generate random bytes. Fails with `EntropyFailure` when the
    /// underlying source cannot produce the requested amount.
    fn random_bytes(&mut self, size: usize) -> Result<Vec<u8>, XmssError>;
}

/// OS-based secure random number generator
pub struct OsSecureRandom {
    rng: OsRng,
}

impl OsSecureRandom {
    pub fn new() -> Self {
        OsSecureRandom { rng: OsRng }
    }
}

impl Default for OsSecureRandom {
    fn default() -> Self {
        OsSecureRandom::new()
    }
}

impl SecureRandom for OsSecureRandom {
    fn random_bytes(&mut self, size: usize) -> Result<Vec<u8>, XmssError> {
        let mut bytes = vec![0u8; size];
        self.rng
            .try_fill_bytes(&mut bytes)
            .map_err(|_| XmssError::EntropyFailure)?;
        Ok(bytes)
    }
}

/// Deterministic RNG for testing
pub struct DeterministicRng {
    seed: Vec<u8>,
    counter: u64,
}

impl DeterministicRng {
    pub fn new(seed: &[u8]) -> Self {
        DeterministicRng {
            seed: seed.to_vec(),
            counter: 0,
        }
    }
}

impl SecureRandom for DeterministicRng {
    fn random_bytes(&mut self, size: usize) -> Result<Vec<u8>, XmssError> {
        // Hash-counter stream, reproducible across runs
        let hasher = SHA256::new();

        let mut result = Vec::with_capacity(size);
        while result.len() < size {
            let mut input = self.seed.clone();
            input.extend_from_slice(&self.counter.to_be_bytes());
            self.counter += 1;

            result.extend_from_slice(&hasher.hash(&input));
        }
        result.truncate(size);
        Ok(result)
    }
}
