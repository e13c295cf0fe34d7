// Hash function abstractions and the keyed constructions built on them.

use sha2::{Digest, Sha256};
use sha3::Sha3_256;

use crate::address::Address;

/// Trait for hash functions
pub trait HashFunction {
    /// Hash input data
    fn hash(&self, data: &[u8]) -> Vec<u8>;

    /// Get output size in bytes
    fn output_size(&self) -> usize;
}

/// SHA-256 hash function
pub struct SHA256;

impl SHA256 {
    pub fn new() -> Self {
        SHA256
    }
}

impl HashFunction for SHA256 {
    fn hash(&self, data: &[u8]) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().to_vec()
    }

    fn output_size(&self) -> usize {
        32
    }
}

/// SHA3-256 hash function
pub struct SHA3_256;

impl SHA3_256 {
    pub fn new() -> Self {
        SHA3_256
    }
}

impl HashFunction for SHA3_256 {
    fn hash(&self, data: &[u8]) -> Vec<u8> {
        let mut hasher = Sha3_256::new();
        hasher.update(data);
        hasher.finalize().to_vec()
    }

    fn output_size(&self) -> usize {
        32
    }
}

// Domain constants for the four keyed constructions. Each hash input
// starts with the constant encoded big-endian into an n-byte pad, so no
// two constructions ever see the same input.
const PAD_F: u8 = 0;
const PAD_H: u8 = 1;
const PAD_MSG: u8 = 2;
const PAD_PRF: u8 = 3;

fn padded_input(domain: u8, pad_len: usize, parts: &[&[u8]]) -> Vec<u8> {
    let body: usize = parts.iter().map(|p| p.len()).sum();
    let mut data = vec![0u8; pad_len];
    data.reserve(body);
    data[pad_len - 1] = domain;
    for part in parts {
        data.extend_from_slice(part);
    }
    data
}

fn hash_truncated(hasher: &dyn HashFunction, data: &[u8], out_len: usize) -> Vec<u8> {
    let mut out = hasher.hash(data);
    debug_assert!(out.len() >= out_len);
    out.truncate(out_len);
    out
}

/// PRF: `Hash(pad ‖ key ‖ input)`, truncated to `out_len` bytes. The pad
/// is always `n` bytes wide, independent of the output length. Keyed by
/// SK_PRF for the per-message randomizer and by PUB_SEED (over an address)
/// for hash-key derivation.
pub fn prf(
    hasher: &dyn HashFunction,
    key: &[u8],
    input: &[u8],
    n: usize,
    out_len: usize,
) -> Vec<u8> {
    let data = padded_input(PAD_PRF, n, &[key, input]);
    hash_truncated(hasher, &data, out_len)
}

/// PRG: expands a secret seed under a 16-byte address into `n` bytes of
/// chain secret material. The PRF construction keyed by the seed.
pub fn prg(hasher: &dyn HashFunction, seed: &[u8], addr: Address, n: usize) -> Vec<u8> {
    prf(hasher, seed, addr.as_bytes(), n, n)
}

/// F: single-block keyed hash used for every chain step. The key is
/// derived from PUB_SEED and the address with the key bit set; the key
/// bit keeps this derivation disjoint from the chain-secret PRG, which
/// runs with the bit cleared.
pub fn hash_f(
    hasher: &dyn HashFunction,
    pub_seed: &[u8],
    mut addr: Address,
    input: &[u8],
    n: usize,
) -> Vec<u8> {
    addr.set_key_bit(true);
    let key = prf(hasher, pub_seed, addr.as_bytes(), n, n);
    let data = padded_input(PAD_F, n, &[&key, input]);
    hash_truncated(hasher, &data, n)
}

/// H: two-block keyed hash combining sibling nodes in the L-tree and the
/// Merkle tree. L-tree and node addresses have no key-bit slot (byte 12
/// carries position data there), so the address is used as-is; the type
/// bits already separate the two modes.
pub fn hash_h(
    hasher: &dyn HashFunction,
    pub_seed: &[u8],
    addr: Address,
    left: &[u8],
    right: &[u8],
    n: usize,
) -> Vec<u8> {
    let key = prf(hasher, pub_seed, addr.as_bytes(), n, n);
    let data = padded_input(PAD_H, n, &[&key, left, right]);
    hash_truncated(hasher, &data, n)
}

/// Message digest: `Hash(pad ‖ R ‖ msg)` truncated to `m` bytes, with the
/// pad kept at `n` bytes like every other construction.
pub fn hash_message(
    hasher: &dyn HashFunction,
    randomness: &[u8],
    msg: &[u8],
    n: usize,
    m: usize,
) -> Vec<u8> {
    let data = padded_input(PAD_MSG, n, &[randomness, msg]);
    hash_truncated(hasher, &data, m)
}
