//! L-tree: compresses the len chain ends of a WOTS+ public key into a
//! single n-byte leaf through an unbalanced binary hash tree.

use crate::address::Address;
use crate::crypto::hash::{self, HashFunction};

/// Folds `wots_pk` pairwise under H until one node remains. An odd node
/// at any level is promoted unchanged. The address tracks (level, pair
/// index) for every H call.
pub fn l_tree(
    hasher: &dyn HashFunction,
    mut wots_pk: Vec<Vec<u8>>,
    pub_seed: &[u8],
    mut addr: Address,
    n: usize,
) -> Vec<u8> {
    let mut l = wots_pk.len();
    let mut height = 0u32;
    addr.set_ltree_tree_height(height);

    while l > 1 {
        let bound = l >> 1;
        for i in 0..bound {
            addr.set_ltree_tree_index(i as u32);
            let node = hash::hash_h(
                hasher,
                pub_seed,
                addr,
                &wots_pk[2 * i],
                &wots_pk[2 * i + 1],
                n,
            );
            wots_pk[i] = node;
        }
        if l & 1 == 1 {
            wots_pk[bound] = wots_pk[l - 1].clone();
            l = bound + 1;
        } else {
            l = bound;
        }
        height += 1;
        addr.set_ltree_tree_height(height);
    }

    wots_pk.swap_remove(0)
}
