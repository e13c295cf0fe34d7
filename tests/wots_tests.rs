use proptest::prelude::*;

use xmss_signatures::address::Address;
use xmss_signatures::crypto::hash::SHA256;
use xmss_signatures::params::{HashFunctionId, XmssParams};
use xmss_signatures::wots::{self, WotsParams};
use xmss_signatures::xmss::XmssKeypair;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// pk_from_sig(sign(d)) == pkgen for every digest, seed and leaf.
    #[test]
    fn prop_pk_from_sig_recovers_pkgen(
        digest in prop::array::uniform32(any::<u8>()),
        seed in prop::array::uniform32(any::<u8>()),
        pub_seed in prop::array::uniform32(any::<u8>()),
        leaf in 0u32..1024,
    ) {
        let params = WotsParams::new(32, 32, 16);
        let hasher = SHA256::new();
        let mut addr = Address::new().to_ots();
        addr.set_ots_address(leaf);

        let pk = wots::pkgen(&params, &hasher, &seed, &pub_seed, addr);
        let sig = wots::sign(&params, &hasher, &digest, &seed, &pub_seed, addr).unwrap();
        let candidate =
            wots::pk_from_sig(&params, &hasher, &sig, &digest, &pub_seed, addr).unwrap();

        prop_assert_eq!(candidate, pk);
    }

    /// The same holds for the short-chain w=4 parameterization.
    #[test]
    fn prop_pk_from_sig_recovers_pkgen_w4(
        digest in prop::array::uniform32(any::<u8>()),
        seed in prop::array::uniform32(any::<u8>()),
    ) {
        let params = WotsParams::new(32, 32, 4);
        let hasher = SHA256::new();
        let addr = Address::new().to_ots();
        let pub_seed = [0u8; 32];

        let pk = wots::pkgen(&params, &hasher, &seed, &pub_seed, addr);
        let sig = wots::sign(&params, &hasher, &digest, &seed, &pub_seed, addr).unwrap();
        let candidate =
            wots::pk_from_sig(&params, &hasher, &sig, &digest, &pub_seed, addr).unwrap();

        prop_assert_eq!(candidate, pk);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Full scheme round-trip at h=2 for arbitrary entropy and messages.
    #[test]
    fn prop_sign_verify_roundtrip(
        entropy in prop::collection::vec(any::<u8>(), 96),
        message in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        let params = XmssParams::new(32, 32, 2, 16, HashFunctionId::Sha256);
        let mut keypair = XmssKeypair::from_entropy(&params, &entropy).unwrap();

        let signature = keypair.sign(&message).unwrap();
        prop_assert_eq!(keypair.secret_key().idx(), 1);
        prop_assert_eq!(keypair.public_key().verify(&signature).unwrap(), message);
    }
}
