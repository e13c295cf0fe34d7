use std::sync::OnceLock;

use xmss_signatures::error::XmssError;
use xmss_signatures::params::{self, HashFunctionId, XmssParams};
use xmss_signatures::xmss::{XmssKeypair, XmssPublicKey, XmssSecretKey};

/// Shared XMSS-SHA2_10_256 fixture: deterministic keygen from all-zero
/// entropy, fresh secret key bytes, and a signature over "abc" at idx 0.
/// Building the h=10 tree is expensive, so it happens once.
struct Sha2Fixture {
    params: XmssParams,
    public_key: XmssPublicKey,
    fresh_sk_bytes: Vec<u8>,
    sig_abc: Vec<u8>,
}

fn sha2_10_256_fixture() -> &'static Sha2Fixture {
    static FIXTURE: OnceLock<Sha2Fixture> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        let params = params::params_from_name("XMSS-SHA2_10_256").unwrap();
        let mut keypair = XmssKeypair::from_entropy(&params, &[0u8; 96]).unwrap();
        let fresh_sk_bytes = keypair.secret_key().to_bytes();
        let sig_abc = keypair.sign(b"abc").unwrap().to_bytes();

        Sha2Fixture {
            params,
            public_key: keypair.public_key().clone(),
            fresh_sk_bytes,
            sig_abc,
        }
    })
}

fn small_params(h: u32) -> XmssParams {
    XmssParams::new(32, 32, h, 16, HashFunctionId::Sha256)
}

#[test]
fn test_sha2_10_256_signature_over_abc() {
    let fixture = sha2_10_256_fixture();

    // 4 + 32 + 67*32 + 10*32 + 3
    assert_eq!(fixture.sig_abc.len(), 2503);

    let message = fixture.public_key.verify_bytes(&fixture.sig_abc).unwrap();
    assert_eq!(message, b"abc");
}

#[test]
fn test_keygen_is_deterministic_for_fixed_entropy() {
    let fixture = sha2_10_256_fixture();
    let again = XmssKeypair::from_entropy(&fixture.params, &[0u8; 96]).unwrap();

    assert_eq!(again.public_key(), &fixture.public_key);
    assert_eq!(again.secret_key().to_bytes(), fixture.fresh_sk_bytes);
}

#[test]
fn test_corruption_anywhere_in_the_signature_fails() {
    let fixture = sha2_10_256_fixture();
    let wots_start = 4 + 32;
    let auth_start = wots_start + 67 * 32;
    let msg_start = auth_start + 10 * 32;

    // One probe per signature region: idx, R, wots_sig, auth_path, msg.
    let positions = [
        3,
        4,
        35,
        wots_start,
        wots_start + 1000,
        auth_start - 1,
        auth_start,
        msg_start - 1,
        msg_start,
        msg_start + 2,
    ];

    for &position in &positions {
        let mut corrupt = fixture.sig_abc.clone();
        corrupt[position] ^= 0x01;
        let result = fixture.public_key.verify_bytes(&corrupt);
        assert_eq!(
            result,
            Err(XmssError::VerifyFailed),
            "corruption at byte {position} was not detected"
        );
    }
}

#[test]
fn test_truncated_signature_reports_short_buffer() {
    let fixture = sha2_10_256_fixture();
    let fixed_len = fixture.params.signature_bytes();
    assert_eq!(fixed_len, 2500);

    let result = fixture
        .public_key
        .verify_bytes(&fixture.sig_abc[..fixed_len - 1]);
    assert_eq!(
        result,
        Err(XmssError::ShortBuffer {
            expected: 2500,
            actual: 2499,
        })
    );
}

#[test]
fn test_exhausted_index_refuses_and_leaves_key_unchanged() {
    let params = sha2_10_256_fixture().params.clone();

    // 1024 = 2^10, one past the last valid index.
    let mut sk_bytes = vec![0u8; params.secret_key_bytes()];
    sk_bytes[..4].copy_from_slice(&1024u32.to_be_bytes());
    let mut secret_key = XmssSecretKey::from_bytes(&params, &sk_bytes).unwrap();

    assert!(secret_key.is_exhausted());
    assert_eq!(
        secret_key.sign(b"too late").unwrap_err(),
        XmssError::IndexExhausted
    );
    assert_eq!(secret_key.to_bytes(), sk_bytes);
}

#[test]
fn test_five_sequential_signatures() {
    let params = small_params(4);
    let mut keypair = XmssKeypair::from_entropy(&params, &[7u8; 96]).unwrap();

    let mut signatures = Vec::new();
    for i in 0..5u32 {
        let message = format!("message {}", i);
        let signature = keypair.sign(message.as_bytes()).unwrap();
        assert_eq!(signature.idx(), i);
        signatures.push((message, signature));
    }

    assert_eq!(keypair.secret_key().idx(), 5);
    for (message, signature) in &signatures {
        let verified = keypair.public_key().verify(signature).unwrap();
        assert_eq!(verified, message.as_bytes());
    }
}

#[test]
fn test_signing_the_last_leaf_then_exhaustion() {
    let params = small_params(2);
    let mut keypair = XmssKeypair::from_entropy(&params, &[9u8; 96]).unwrap();

    for _ in 0..3 {
        keypair.sign(b"burn").unwrap();
    }
    // idx = 2^h - 1: the last valid one-time key.
    let last = keypair.sign(b"final leaf").unwrap();
    assert_eq!(last.idx(), 3);
    assert_eq!(keypair.public_key().verify(&last).unwrap(), b"final leaf");

    assert_eq!(keypair.secret_key().idx(), 4);
    assert_eq!(
        keypair.sign(b"exhausted").unwrap_err(),
        XmssError::IndexExhausted
    );
}

#[test]
fn test_signature_does_not_verify_under_another_key() {
    let params = small_params(2);
    let mut keypair_a = XmssKeypair::from_entropy(&params, &[1u8; 96]).unwrap();
    let keypair_b = XmssKeypair::from_entropy(&params, &[2u8; 96]).unwrap();

    let signature = keypair_a.sign(b"addressed to a").unwrap();
    assert!(keypair_a.public_key().verify(&signature).is_ok());
    assert_eq!(
        keypair_b.public_key().verify(&signature),
        Err(XmssError::VerifyFailed)
    );
}

#[test]
fn test_generate_with_rng_is_reproducible() {
    use xmss_signatures::crypto::random::DeterministicRng;

    let params = small_params(2);
    let mut rng_a = DeterministicRng::new(b"keygen seed");
    let mut rng_b = DeterministicRng::new(b"keygen seed");

    let keypair_a = XmssKeypair::generate_with_rng(&params, &mut rng_a).unwrap();
    let keypair_b = XmssKeypair::generate_with_rng(&params, &mut rng_b).unwrap();

    assert_eq!(keypair_a.public_key(), keypair_b.public_key());
    assert_eq!(
        keypair_a.secret_key().to_bytes(),
        keypair_b.secret_key().to_bytes()
    );
}

#[test]
fn test_sha3_parameter_set_round_trip() {
    let params = XmssParams::new(32, 32, 2, 16, HashFunctionId::Sha3_256);
    let mut keypair = XmssKeypair::from_entropy(&params, &[5u8; 96]).unwrap();

    let signature = keypair.sign(b"sha3 message").unwrap();
    assert_eq!(
        keypair.public_key().verify(&signature).unwrap(),
        b"sha3 message"
    );

    // The same entropy under SHA-256 parameters yields a different root.
    let sha2 = XmssKeypair::from_entropy(&small_params(2), &[5u8; 96]).unwrap();
    assert_ne!(sha2.public_key().root(), keypair.public_key().root());
}

#[test]
fn test_secret_key_file_survives_sign_and_restore() {
    let params = small_params(2);
    let mut keypair = XmssKeypair::from_entropy(&params, &[6u8; 96]).unwrap();
    let public_key = keypair.public_key().clone();

    let first = keypair.sign(b"first").unwrap();

    // Simulate the persist/reload cycle a caller performs between signs.
    let stored = keypair.secret_key().to_file_bytes(0x0000_0001);
    let (oid, mut restored) = XmssSecretKey::from_file_bytes(&stored).unwrap();
    assert_eq!(oid, 0x0000_0001);
    assert_eq!(restored.idx(), 1);

    let second = restored.sign(b"second").unwrap();
    assert_eq!(second.idx(), 1);
    assert_ne!(first.to_bytes(), second.to_bytes());
    assert_eq!(public_key.verify(&second).unwrap(), b"second");
}
