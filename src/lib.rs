//! Stateful XMSS hash-based signatures (single-tree variant).
//!
//! A key pair authorizes 2^h signatures; every signature consumes one
//! WOTS+ one-time key and reusing an index breaks security. Signing
//! therefore mutates the secret key, and callers are responsible for
//! persisting the updated key before releasing a signature. Concurrent
//! signs against the same secret key must be serialized by the caller.

pub mod address;
pub mod crypto;
pub mod error;
pub mod params;
pub mod wots;
pub mod xmss;
