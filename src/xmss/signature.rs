//! Signature wire format:
//! `idx (4, BE) ‖ R (m) ‖ wots_sig (len·n) ‖ auth_path (h·n) ‖ msg`.

use crate::error::XmssError;
use crate::params::XmssParams;
use crate::wots::WotsSignature;
use crate::xmss::tree::AuthPath;

#[derive(Debug, Clone)]
pub struct XmssSignature {
    idx: u32,
    randomness: Vec<u8>,
    wots_signature: WotsSignature,
    auth_path: AuthPath,
    message: Vec<u8>,
}

impl XmssSignature {
    pub fn new(
        idx: u32,
        randomness: Vec<u8>,
        wots_signature: WotsSignature,
        auth_path: AuthPath,
        message: Vec<u8>,
    ) -> Self {
        XmssSignature {
            idx,
            randomness,
            wots_signature,
            auth_path,
            message,
        }
    }

    /// Index of the one-time key this signature consumed.
    pub fn idx(&self) -> u32 {
        self.idx
    }

    pub fn randomness(&self) -> &[u8] {
        &self.randomness
    }

    pub fn wots_signature(&self) -> &WotsSignature {
        &self.wots_signature
    }

    pub fn auth_path(&self) -> &AuthPath {
        &self.auth_path
    }

    /// The signed message, carried after the authentication path.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        bytes.extend_from_slice(&self.idx.to_be_bytes());
        bytes.extend_from_slice(&self.randomness);
        for chain in self.wots_signature.chains() {
            bytes.extend_from_slice(chain);
        }
        for node in self.auth_path.nodes() {
            bytes.extend_from_slice(node);
        }
        bytes.extend_from_slice(&self.message);

        bytes
    }

    /// Parses a signature+message buffer. Anything shorter than the fixed
    /// signature prefix is rejected; the remainder is the message, which
    /// may be empty.
    pub fn from_bytes(params: &XmssParams, bytes: &[u8]) -> Result<Self, XmssError> {
        let min_len = params.signature_bytes();
        if bytes.len() < min_len {
            return Err(XmssError::ShortBuffer {
                expected: min_len,
                actual: bytes.len(),
            });
        }

        let n = params.n();
        let mut offset = 0;

        let idx = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        offset += 4;

        let randomness = bytes[offset..offset + params.m()].to_vec();
        offset += params.m();

        let mut chains = Vec::with_capacity(params.wots().chain_count());
        for _ in 0..params.wots().chain_count() {
            chains.push(bytes[offset..offset + n].to_vec());
            offset += n;
        }
        let wots_signature = WotsSignature::from_chains(chains);

        let mut auth_nodes = Vec::with_capacity(params.h() as usize);
        for _ in 0..params.h() {
            auth_nodes.push(bytes[offset..offset + n].to_vec());
            offset += n;
        }
        let auth_path = AuthPath::new(auth_nodes);

        let message = bytes[offset..].to_vec();

        Ok(XmssSignature {
            idx,
            randomness,
            wots_signature,
            auth_path,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::HashFunctionId;
    use crate::xmss::XmssKeypair;

    fn test_params() -> XmssParams {
        XmssParams::new(32, 32, 2, 16, HashFunctionId::Sha256)
    }

    #[test]
    fn test_signature_roundtrips_through_bytes() {
        let params = test_params();
        let mut keypair = XmssKeypair::from_entropy(&params, &[42u8; 96]).unwrap();
        let signature = keypair.sign(b"roundtrip").unwrap();

        let bytes = signature.to_bytes();
        assert_eq!(bytes.len(), params.signature_bytes() + b"roundtrip".len());

        let parsed = XmssSignature::from_bytes(&params, &bytes).unwrap();
        assert_eq!(parsed.idx(), signature.idx());
        assert_eq!(parsed.randomness(), signature.randomness());
        assert_eq!(parsed.message(), b"roundtrip");
        assert_eq!(parsed.to_bytes(), bytes);
    }

    #[test]
    fn test_truncated_signature_is_rejected() {
        let params = test_params();
        let mut keypair = XmssKeypair::from_entropy(&params, &[42u8; 96]).unwrap();
        let bytes = keypair.sign(b"").unwrap().to_bytes();

        let err = XmssSignature::from_bytes(&params, &bytes[..bytes.len() - 1]).unwrap_err();
        assert_eq!(
            err,
            XmssError::ShortBuffer {
                expected: params.signature_bytes(),
                actual: params.signature_bytes() - 1,
            }
        );
    }

    #[test]
    fn test_empty_message_is_allowed() {
        let params = test_params();
        let mut keypair = XmssKeypair::from_entropy(&params, &[42u8; 96]).unwrap();
        let bytes = keypair.sign(b"").unwrap().to_bytes();

        let parsed = XmssSignature::from_bytes(&params, &bytes).unwrap();
        assert!(parsed.message().is_empty());
    }
}
