//! Parameter sets and the OID registry.
//!
//! A parameter set is a plain value carried explicitly into every
//! operation; there is no process-wide parameter state. The registry maps
//! the textual names (`XMSS-SHA2_10_256` and friends) to 32-bit OIDs and
//! back to concrete parameters.

use crate::crypto::hash::{HashFunction, SHA256, SHA3_256};
use crate::error::XmssError;
use crate::wots::WotsParams;

/// Length of the OID prefix in key files.
pub const XMSS_OID_LEN: usize = 4;

/// Hash primitive selected by a parameter set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFunctionId {
    Sha256,
    Sha3_256,
}

impl HashFunctionId {
    pub fn hasher(&self) -> &'static dyn HashFunction {
        static SHA256_IMPL: SHA256 = SHA256;
        static SHA3_256_IMPL: SHA3_256 = SHA3_256;

        match self {
            HashFunctionId::Sha256 => &SHA256_IMPL,
            HashFunctionId::Sha3_256 => &SHA3_256_IMPL,
        }
    }
}

/// XMSS parameter set. WOTS+ parameters are embedded by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmssParams {
    n: usize,
    m: usize,
    h: u32,
    hash: HashFunctionId,
    wots: WotsParams,
}

impl XmssParams {
    pub fn new(n: usize, m: usize, h: u32, w: u32, hash: HashFunctionId) -> Self {
        assert!(h >= 1 && h <= 30, "tree height must be in 1..=30");

        XmssParams {
            n,
            m,
            h,
            hash,
            wots: WotsParams::new(n, m, w),
        }
    }

    /// Hash output size in bytes.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Message digest size in bytes.
    pub fn m(&self) -> usize {
        self.m
    }

    /// Tree height; the key authorizes 2^h signatures.
    pub fn h(&self) -> u32 {
        self.h
    }

    pub fn hash_id(&self) -> HashFunctionId {
        self.hash
    }

    pub fn hasher(&self) -> &'static dyn HashFunction {
        self.hash.hasher()
    }

    pub fn wots(&self) -> &WotsParams {
        &self.wots
    }

    pub fn max_signatures(&self) -> u64 {
        1u64 << self.h
    }

    /// idx (4) ‖ SK_SEED (n) ‖ SK_PRF (m) ‖ PUB_SEED (n)
    pub fn secret_key_bytes(&self) -> usize {
        4 + 2 * self.n + self.m
    }

    /// root (n) ‖ PUB_SEED (n)
    pub fn public_key_bytes(&self) -> usize {
        2 * self.n
    }

    /// Signature size without the trailing message:
    /// idx (4) ‖ R (m) ‖ wots_sig (len·n) ‖ auth_path (h·n)
    pub fn signature_bytes(&self) -> usize {
        4 + self.m + self.wots.keysize() + self.h as usize * self.n
    }
}

struct ParameterSet {
    oid: u32,
    name: &'static str,
    n: usize,
    m: usize,
    h: u32,
    w: u32,
    hash: HashFunctionId,
}

const PARAMETER_SETS: &[ParameterSet] = &[
    ParameterSet {
        oid: 0x0000_0001,
        name: "XMSS-SHA2_10_256",
        n: 32,
        m: 32,
        h: 10,
        w: 16,
        hash: HashFunctionId::Sha256,
    },
    ParameterSet {
        oid: 0x0000_0002,
        name: "XMSS-SHA2_16_256",
        n: 32,
        m: 32,
        h: 16,
        w: 16,
        hash: HashFunctionId::Sha256,
    },
    ParameterSet {
        oid: 0x0000_0003,
        name: "XMSS-SHA2_20_256",
        n: 32,
        m: 32,
        h: 20,
        w: 16,
        hash: HashFunctionId::Sha256,
    },
    ParameterSet {
        oid: 0x0000_0101,
        name: "XMSS-SHA3_10_256",
        n: 32,
        m: 32,
        h: 10,
        w: 16,
        hash: HashFunctionId::Sha3_256,
    },
    ParameterSet {
        oid: 0x0000_0102,
        name: "XMSS-SHA3_16_256",
        n: 32,
        m: 32,
        h: 16,
        w: 16,
        hash: HashFunctionId::Sha3_256,
    },
    ParameterSet {
        oid: 0x0000_0103,
        name: "XMSS-SHA3_20_256",
        n: 32,
        m: 32,
        h: 20,
        w: 16,
        hash: HashFunctionId::Sha3_256,
    },
];

/// Looks up the OID for a textual parameter set name.
pub fn str_to_oid(name: &str) -> Result<u32, XmssError> {
    PARAMETER_SETS
        .iter()
        .find(|set| set.name == name)
        .map(|set| set.oid)
        .ok_or_else(|| XmssError::UnknownParameterSet(name.to_string()))
}

/// Builds the parameter set registered under `oid`.
pub fn oid_to_params(oid: u32) -> Result<XmssParams, XmssError> {
    PARAMETER_SETS
        .iter()
        .find(|set| set.oid == oid)
        .map(|set| XmssParams::new(set.n, set.m, set.h, set.w, set.hash))
        .ok_or(XmssError::UnknownOid(oid))
}

/// Convenience: name → parameters in one step.
pub fn params_from_name(name: &str) -> Result<XmssParams, XmssError> {
    oid_to_params(str_to_oid(name)?)
}

/// Registered textual names, for usage messages.
pub fn registered_names() -> Vec<&'static str> {
    PARAMETER_SETS.iter().map(|set| set.name).collect()
}
