//! Key types and the XMSS protocol: keypair, sign, verify.
//!
//! The secret key walks a one-way index: Fresh (idx = 0), InUse
//! (0 < idx < 2^h), Exhausted (idx = 2^h). The only transition is idx + 1
//! on a successful sign, and the index is advanced before any signature
//! material is assembled. Callers that persist keys must write the
//! updated secret key before releasing a signature.

use zeroize::Zeroize;

use crate::address::Address;
use crate::crypto::hash;
use crate::crypto::random::{OsSecureRandom, SecureRandom};
use crate::error::XmssError;
use crate::params::{self, XmssParams, XMSS_OID_LEN};
use crate::wots;
use crate::xmss::ltree::l_tree;
use crate::xmss::signature::XmssSignature;
use crate::xmss::tree::{derive_ots_seed, treehash, MerkleTree};

/// XMSS public key: `root (n) ‖ PUB_SEED (n)`, immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmssPublicKey {
    params: XmssParams,
    root: Vec<u8>,
    public_seed: Vec<u8>,
}

impl XmssPublicKey {
    pub fn new(params: XmssParams, root: Vec<u8>, public_seed: Vec<u8>) -> Self {
        assert_eq!(root.len(), params.n(), "root must be n bytes");
        assert_eq!(public_seed.len(), params.n(), "public seed must be n bytes");

        XmssPublicKey {
            params,
            root,
            public_seed,
        }
    }

    pub fn params(&self) -> &XmssParams {
        &self.params
    }

    pub fn root(&self) -> &[u8] {
        &self.root
    }

    pub fn public_seed(&self) -> &[u8] {
        &self.public_seed
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.params.public_key_bytes());
        bytes.extend_from_slice(&self.root);
        bytes.extend_from_slice(&self.public_seed);
        bytes
    }

    pub fn from_bytes(params: &XmssParams, bytes: &[u8]) -> Result<Self, XmssError> {
        let expected = params.public_key_bytes();
        if bytes.len() < expected {
            return Err(XmssError::ShortBuffer {
                expected,
                actual: bytes.len(),
            });
        }

        let n = params.n();
        Ok(XmssPublicKey {
            params: params.clone(),
            root: bytes[..n].to_vec(),
            public_seed: bytes[n..2 * n].to_vec(),
        })
    }

    /// Key file layout: `oid (4, BE) ‖ root ‖ PUB_SEED`.
    pub fn to_file_bytes(&self, oid: u32) -> Vec<u8> {
        let mut bytes = oid.to_be_bytes().to_vec();
        bytes.extend_from_slice(&self.to_bytes());
        bytes
    }

    /// Parses a key file, resolving the parameter set from the OID prefix.
    pub fn from_file_bytes(bytes: &[u8]) -> Result<(u32, Self), XmssError> {
        if bytes.len() < XMSS_OID_LEN {
            return Err(XmssError::ShortBuffer {
                expected: XMSS_OID_LEN,
                actual: bytes.len(),
            });
        }
        let oid = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let params = params::oid_to_params(oid)?;
        let pk = Self::from_bytes(&params, &bytes[XMSS_OID_LEN..])?;
        Ok((oid, pk))
    }

    /// Verifies a signature+message and returns the message. On failure
    /// no message is released.
    pub fn verify(&self, signature: &XmssSignature) -> Result<Vec<u8>, XmssError> {
        let params = &self.params;
        let hasher = params.hasher();

        // Malformed shapes cannot authenticate anything.
        if signature.auth_path().nodes().len() != params.h() as usize {
            return Err(XmssError::VerifyFailed);
        }

        let idx = signature.idx();
        let digest = hash::hash_message(
            hasher,
            signature.randomness(),
            signature.message(),
            params.n(),
            params.m(),
        );

        let base_addr = Address::new();
        let mut ots_addr = base_addr.to_ots();
        ots_addr.set_ots_address(idx);
        let wots_pk = wots::pk_from_sig(
            params.wots(),
            hasher,
            signature.wots_signature(),
            &digest,
            &self.public_seed,
            ots_addr,
        )
        .map_err(|_| XmssError::VerifyFailed)?;

        let mut ltree_addr = base_addr.to_ltree();
        ltree_addr.set_ltree_address(idx);
        let leaf = l_tree(hasher, wots_pk, &self.public_seed, ltree_addr, params.n());

        let root = signature
            .auth_path()
            .compute_root(params, &leaf, idx, &self.public_seed, base_addr);

        if root == self.root {
            Ok(signature.message().to_vec())
        } else {
            Err(XmssError::VerifyFailed)
        }
    }

    /// Parses and verifies a raw signature+message buffer.
    pub fn verify_bytes(&self, sig_msg: &[u8]) -> Result<Vec<u8>, XmssError> {
        let signature = XmssSignature::from_bytes(&self.params, sig_msg)?;
        self.verify(&signature)
    }
}

/// XMSS secret key: `idx (4, BE) ‖ SK_SEED (n) ‖ SK_PRF (m) ‖ PUB_SEED (n)`.
#[derive(Clone)]
pub struct XmssSecretKey {
    params: XmssParams,
    idx: u32,
    sk_seed: Vec<u8>,
    sk_prf: Vec<u8>,
    public_seed: Vec<u8>,
}

impl XmssSecretKey {
    pub fn params(&self) -> &XmssParams {
        &self.params
    }

    /// Index of the next one-time key to be consumed.
    pub fn idx(&self) -> u32 {
        self.idx
    }

    pub fn remaining_signatures(&self) -> u64 {
        self.params.max_signatures() - self.idx as u64
    }

    pub fn is_exhausted(&self) -> bool {
        self.idx as u64 >= self.params.max_signatures()
    }

    pub fn public_seed(&self) -> &[u8] {
        &self.public_seed
    }

    /// Signs a message and advances the index. An exhausted key fails
    /// with `IndexExhausted` and is left unchanged.
    pub fn sign(&mut self, message: &[u8]) -> Result<XmssSignature, XmssError> {
        if self.is_exhausted() {
            return Err(XmssError::IndexExhausted);
        }
        let idx = self.idx;
        // State before output: the index is burned before any signature
        // material exists.
        self.idx = idx + 1;

        let params = &self.params;
        let hasher = params.hasher();

        let randomness = hash::prf(hasher, &self.sk_prf, message, params.n(), params.m());
        let digest = hash::hash_message(hasher, &randomness, message, params.n(), params.m());

        let base_addr = Address::new();
        let mut ots_addr = base_addr.to_ots();
        ots_addr.set_ots_address(idx);

        let mut ots_seed = derive_ots_seed(hasher, &self.sk_seed, ots_addr, params.n());
        let wots_signature = wots::sign(
            params.wots(),
            hasher,
            &digest,
            &ots_seed,
            &self.public_seed,
            ots_addr,
        );
        ots_seed.zeroize();
        let wots_signature = wots_signature?;

        let tree = MerkleTree::build(params, &self.sk_seed, &self.public_seed, base_addr);
        let auth_path = tree.authentication_path(idx as usize);

        Ok(XmssSignature::new(
            idx,
            randomness,
            wots_signature,
            auth_path,
            message.to_vec(),
        ))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.params.secret_key_bytes());
        bytes.extend_from_slice(&self.idx.to_be_bytes());
        bytes.extend_from_slice(&self.sk_seed);
        bytes.extend_from_slice(&self.sk_prf);
        bytes.extend_from_slice(&self.public_seed);
        bytes
    }

    pub fn from_bytes(params: &XmssParams, bytes: &[u8]) -> Result<Self, XmssError> {
        let expected = params.secret_key_bytes();
        if bytes.len() < expected {
            return Err(XmssError::ShortBuffer {
                expected,
                actual: bytes.len(),
            });
        }

        let n = params.n();
        let m = params.m();
        let idx = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);

        Ok(XmssSecretKey {
            params: params.clone(),
            idx,
            sk_seed: bytes[4..4 + n].to_vec(),
            sk_prf: bytes[4 + n..4 + n + m].to_vec(),
            public_seed: bytes[4 + n + m..4 + 2 * n + m].to_vec(),
        })
    }

    /// Key file layout: `oid (4, BE) ‖ idx ‖ SK_SEED ‖ SK_PRF ‖ PUB_SEED`.
    pub fn to_file_bytes(&self, oid: u32) -> Vec<u8> {
        let mut bytes = oid.to_be_bytes().to_vec();
        bytes.extend_from_slice(&self.to_bytes());
        bytes
    }

    pub fn from_file_bytes(bytes: &[u8]) -> Result<(u32, Self), XmssError> {
        if bytes.len() < XMSS_OID_LEN {
            return Err(XmssError::ShortBuffer {
                expected: XMSS_OID_LEN,
                actual: bytes.len(),
            });
        }
        let oid = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let params = params::oid_to_params(oid)?;
        let sk = Self::from_bytes(&params, &bytes[XMSS_OID_LEN..])?;
        Ok((oid, sk))
    }
}

impl Drop for XmssSecretKey {
    fn drop(&mut self) {
        self.sk_seed.zeroize();
        self.sk_prf.zeroize();
    }
}

// Seeds stay out of debug output.
impl std::fmt::Debug for XmssSecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmssSecretKey")
            .field("params", &self.params)
            .field("idx", &self.idx)
            .finish_non_exhaustive()
    }
}

/// A freshly generated (public, secret) key pair.
#[derive(Debug)]
pub struct XmssKeypair {
    public_key: XmssPublicKey,
    secret_key: XmssSecretKey,
}

impl XmssKeypair {
    /// Generates a key pair from the OS entropy source.
    pub fn generate(params: &XmssParams) -> Result<Self, XmssError> {
        let mut rng = OsSecureRandom::new();
        Self::generate_with_rng(params, &mut rng)
    }

    pub fn generate_with_rng(
        params: &XmssParams,
        rng: &mut dyn SecureRandom,
    ) -> Result<Self, XmssError> {
        let entropy = rng.random_bytes(2 * params.n() + params.m())?;
        Self::from_entropy(params, &entropy)
    }

    /// Deterministic key generation from `2n + m` entropy bytes laid out
    /// as `SK_SEED ‖ SK_PRF ‖ PUB_SEED`.
    pub fn from_entropy(params: &XmssParams, entropy: &[u8]) -> Result<Self, XmssError> {
        let n = params.n();
        let m = params.m();
        if entropy.len() < 2 * n + m {
            return Err(XmssError::EntropyFailure);
        }

        let sk_seed = entropy[..n].to_vec();
        let sk_prf = entropy[n..n + m].to_vec();
        let public_seed = entropy[n + m..2 * n + m].to_vec();

        let root = treehash(params, &sk_seed, &public_seed, 0, Address::new());

        let public_key = XmssPublicKey::new(params.clone(), root, public_seed.clone());
        let secret_key = XmssSecretKey {
            params: params.clone(),
            idx: 0,
            sk_seed,
            sk_prf,
            public_seed,
        };

        Ok(XmssKeypair {
            public_key,
            secret_key,
        })
    }

    pub fn public_key(&self) -> &XmssPublicKey {
        &self.public_key
    }

    pub fn secret_key(&self) -> &XmssSecretKey {
        &self.secret_key
    }

    pub fn secret_key_mut(&mut self) -> &mut XmssSecretKey {
        &mut self.secret_key
    }

    pub fn sign(&mut self, message: &[u8]) -> Result<XmssSignature, XmssError> {
        self.secret_key.sign(message)
    }

    pub fn into_parts(self) -> (XmssPublicKey, XmssSecretKey) {
        (self.public_key, self.secret_key)
    }
}
