use thiserror::Error;

/// Errors surfaced by key generation, signing, verification and the
/// parameter registry.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum XmssError {
    #[error("unknown parameter set oid {0:#010x}")]
    UnknownOid(u32),

    #[error("unknown parameter set name {0:?}")]
    UnknownParameterSet(String),

    #[error("one-time key index exhausted; this key can no longer sign")]
    IndexExhausted,

    #[error("signature verification failed")]
    VerifyFailed,

    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    ShortBuffer { expected: usize, actual: usize },

    #[error("malformed signature: expected {expected} chain blocks, got {actual}")]
    MalformedSignature { expected: usize, actual: usize },

    #[error("entropy source failed to produce the requested bytes")]
    EntropyFailure,
}
