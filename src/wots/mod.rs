// Winternitz One-Time Signature (WOTS+) engine

use zeroize::Zeroize;

use crate::address::Address;
use crate::crypto::hash::{self, HashFunction};
use crate::error::XmssError;

/// WOTS+ parameters derived from (n, m, w)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WotsParams {
    n: usize,
    w: u32,
    log_w: usize,
    len1: usize,
    len2: usize,
    len: usize,
    keysize: usize,
}

impl WotsParams {
    pub fn new(n: usize, m: usize, w: u32) -> Self {
        assert!(n > 0 && n <= 32, "n must be in 1..=32");
        assert!(m > 0 && m <= 32, "m must be in 1..=32");
        assert!(
            w == 4 || w == 16 || w == 256,
            "Winternitz parameter must be 4, 16 or 256"
        );

        let log_w = w.trailing_zeros() as usize;
        let len1 = (8 * m + log_w - 1) / log_w;
        let len2 = base_w_digit_count(len1 * (w as usize - 1), w);
        let len = len1 + len2;

        WotsParams {
            n,
            w,
            log_w,
            len1,
            len2,
            len,
            keysize: len * n,
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn w(&self) -> u32 {
        self.w
    }

    pub fn len1(&self) -> usize {
        self.len1
    }

    pub fn len2(&self) -> usize {
        self.len2
    }

    /// Number of hash chains, i.e. number of n-byte blocks in a signature.
    pub fn chain_count(&self) -> usize {
        self.len
    }

    /// Signature / public key size in bytes: len chains of n bytes.
    pub fn keysize(&self) -> usize {
        self.keysize
    }
}

/// Number of base-w digits needed to represent `x`.
fn base_w_digit_count(mut x: usize, w: u32) -> usize {
    let mut digits = 1;
    while x >= w as usize {
        x /= w as usize;
        digits += 1;
    }
    digits
}

/// Splits `input` into `out_len` base-w digits, high bits first.
fn base_w(params: &WotsParams, input: &[u8], out_len: usize) -> Vec<u32> {
    debug_assert!(input.len() * 8 >= out_len * params.log_w);

    let mut output = Vec::with_capacity(out_len);
    let mut in_idx = 0;
    let mut total: u32 = 0;
    let mut bits = 0;

    for _ in 0..out_len {
        if bits == 0 {
            total = input[in_idx] as u32;
            in_idx += 1;
            bits = 8;
        }
        bits -= params.log_w;
        output.push((total >> bits) & (params.w - 1));
    }
    output
}

/// Checksum digits over the message digits: C = Σ (w−1−d_i), left-aligned
/// to a byte boundary before digit extraction.
fn checksum_digits(params: &WotsParams, msg_digits: &[u32]) -> Vec<u32> {
    let mut csum: u32 = msg_digits.iter().map(|&d| params.w - 1 - d).sum();
    csum <<= (8 - (params.len2 * params.log_w) % 8) % 8;

    let len2_bytes = (params.len2 * params.log_w + 7) / 8;
    let bytes = csum.to_be_bytes();
    base_w(params, &bytes[4 - len2_bytes..], params.len2)
}

/// Base-w digits of a message digest followed by the checksum digits; one
/// digit per chain.
pub(crate) fn message_digits(params: &WotsParams, digest: &[u8]) -> Vec<u32> {
    let mut digits = base_w(params, digest, params.len1);
    let csum = checksum_digits(params, &digits);
    digits.extend(csum);
    digits
}

/// A digest shorter than len1 base-w digits cannot be signed or checked.
fn check_digest_len(params: &WotsParams, digest: &[u8]) -> Result<(), XmssError> {
    let expected = (params.len1 * params.log_w + 7) / 8;
    if digest.len() < expected {
        return Err(XmssError::ShortBuffer {
            expected,
            actual: digest.len(),
        });
    }
    Ok(())
}

/// Per-chain secret start values: PRG(seed, addr) with the chain field
/// advancing and hash field pinned to zero.
fn expand_seed(
    params: &WotsParams,
    hasher: &dyn HashFunction,
    seed: &[u8],
    mut addr: Address,
) -> Vec<Vec<u8>> {
    addr.set_key_bit(false);
    addr.set_hash_address(0);

    let mut secrets = Vec::with_capacity(params.len);
    for chain in 0..params.len {
        addr.set_chain_address(chain as u32);
        secrets.push(hash::prg(hasher, seed, addr, params.n));
    }
    secrets
}

/// Iterates F over `input` for `steps` positions starting at chain
/// position `start`; the hash address tracks the position.
fn gen_chain(
    params: &WotsParams,
    hasher: &dyn HashFunction,
    pub_seed: &[u8],
    input: &[u8],
    start: u32,
    steps: u32,
    mut addr: Address,
) -> Vec<u8> {
    let mut out = input.to_vec();
    for position in start..start + steps {
        addr.set_hash_address(position);
        out = hash::hash_f(hasher, pub_seed, addr, &out, params.n);
    }
    out
}

/// WOTS+ signature: one n-byte block per chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WotsSignature {
    chains: Vec<Vec<u8>>,
}

impl WotsSignature {
    pub fn from_chains(chains: Vec<Vec<u8>>) -> Self {
        WotsSignature { chains }
    }

    pub fn chains(&self) -> &[Vec<u8>] {
        &self.chains
    }
}

/// Generates the WOTS+ public key for `seed`: every chain iterated the
/// full w−1 steps.
pub fn pkgen(
    params: &WotsParams,
    hasher: &dyn HashFunction,
    seed: &[u8],
    pub_seed: &[u8],
    mut addr: Address,
) -> Vec<Vec<u8>> {
    let mut secrets = expand_seed(params, hasher, seed, addr);

    let mut pk = Vec::with_capacity(params.len);
    for (chain, secret) in secrets.iter().enumerate() {
        addr.set_chain_address(chain as u32);
        pk.push(gen_chain(
            params,
            hasher,
            pub_seed,
            secret,
            0,
            params.w - 1,
            addr,
        ));
    }

    for secret in &mut secrets {
        secret.zeroize();
    }
    pk
}

/// Signs an m-byte digest: chain i iterated digit_i steps from its secret.
pub fn sign(
    params: &WotsParams,
    hasher: &dyn HashFunction,
    digest: &[u8],
    seed: &[u8],
    pub_seed: &[u8],
    mut addr: Address,
) -> Result<WotsSignature, XmssError> {
    check_digest_len(params, digest)?;
    let digits = message_digits(params, digest);
    let mut secrets = expand_seed(params, hasher, seed, addr);

    let mut chains = Vec::with_capacity(params.len);
    for (chain, secret) in secrets.iter().enumerate() {
        addr.set_chain_address(chain as u32);
        chains.push(gen_chain(
            params,
            hasher,
            pub_seed,
            secret,
            0,
            digits[chain],
            addr,
        ));
    }

    for secret in &mut secrets {
        secret.zeroize();
    }
    Ok(WotsSignature::from_chains(chains))
}

/// Recovers the candidate public key from a signature: chain i iterated
/// the remaining w−1−digit_i steps starting at position digit_i.
pub fn pk_from_sig(
    params: &WotsParams,
    hasher: &dyn HashFunction,
    signature: &WotsSignature,
    digest: &[u8],
    pub_seed: &[u8],
    mut addr: Address,
) -> Result<Vec<Vec<u8>>, XmssError> {
    if signature.chains().len() != params.len {
        return Err(XmssError::MalformedSignature {
            expected: params.len,
            actual: signature.chains().len(),
        });
    }
    check_digest_len(params, digest)?;
    let digits = message_digits(params, digest);

    let mut pk = Vec::with_capacity(params.len);
    for (chain, sig_block) in signature.chains().iter().enumerate() {
        addr.set_chain_address(chain as u32);
        pk.push(gen_chain(
            params,
            hasher,
            pub_seed,
            sig_block,
            digits[chain],
            params.w - 1 - digits[chain],
            addr,
        ));
    }
    Ok(pk)
}
