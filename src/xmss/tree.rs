//! Merkle tree construction over the 2^h WOTS+ leaves.
//!
//! Two builders share the same leaf function. `treehash` reduces the
//! leaves to the root with an O(h) stack and is used during key
//! generation, where only the root is needed. `MerkleTree::build`
//! materializes every node so that signing can read authentication paths;
//! the O(2^h) memory is the price of the simple layout.

use zeroize::Zeroize;

use crate::address::Address;
use crate::crypto::hash::{self, HashFunction};
use crate::params::XmssParams;
use crate::wots;
use crate::xmss::ltree::l_tree;

/// Derives the one-time seed for the leaf addressed by `ots_addr`. The
/// chain, hash and key fields must not influence the seed, so they are
/// cleared first.
pub(crate) fn derive_ots_seed(
    hasher: &dyn HashFunction,
    sk_seed: &[u8],
    mut ots_addr: Address,
    n: usize,
) -> Vec<u8> {
    ots_addr.zeroise_ots_fields();
    hash::prg(hasher, sk_seed, ots_addr, n)
}

/// Computes one leaf: WOTS+ public key generation followed by the L-tree.
fn gen_leaf(
    params: &XmssParams,
    sk_seed: &[u8],
    pub_seed: &[u8],
    ltree_addr: Address,
    ots_addr: Address,
) -> Vec<u8> {
    let hasher = params.hasher();
    let mut ots_seed = derive_ots_seed(hasher, sk_seed, ots_addr, params.n());
    let pk = wots::pkgen(params.wots(), hasher, &ots_seed, pub_seed, ots_addr);
    ots_seed.zeroize();

    l_tree(hasher, pk, pub_seed, ltree_addr, params.n())
}

/// Merkle's TreeHash: the root over 2^h leaves starting at `start`,
/// computed with a stack of at most h+1 nodes.
pub fn treehash(
    params: &XmssParams,
    sk_seed: &[u8],
    pub_seed: &[u8],
    start: u32,
    base_addr: Address,
) -> Vec<u8> {
    let hasher = params.hasher();
    let n = params.n();
    let mut ots_addr = base_addr.to_ots();
    let mut ltree_addr = base_addr.to_ltree();
    let mut node_addr = base_addr.to_node();

    let leaves = 1u64 << params.h();
    let mut stack: Vec<(Vec<u8>, u32)> = Vec::with_capacity(params.h() as usize + 1);

    for idx in start as u64..start as u64 + leaves {
        let idx = idx as u32;
        ltree_addr.set_ltree_address(idx);
        ots_addr.set_ots_address(idx);

        let mut node = gen_leaf(params, sk_seed, pub_seed, ltree_addr, ots_addr);
        let mut level = 0u32;
        // Merge with the stack as long as the top entry is a sibling.
        while stack.last().map_or(false, |(_, top)| *top == level) {
            let (left, _) = stack.pop().expect("stack top was just observed");
            node_addr.set_node_tree_height(level);
            node_addr.set_node_tree_index(idx >> (level + 1));
            node = hash::hash_h(hasher, pub_seed, node_addr, &left, &node, n);
            level += 1;
        }
        stack.push((node, level));
    }

    let (root, _) = stack.pop().expect("2^h leaves reduce to one root");
    root
}

/// Fully materialized Merkle tree: level 0 holds the leaves, level h the
/// root.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    nodes: Vec<Vec<Vec<u8>>>,
    height: usize,
}

impl MerkleTree {
    pub fn build(
        params: &XmssParams,
        sk_seed: &[u8],
        pub_seed: &[u8],
        base_addr: Address,
    ) -> Self {
        let hasher = params.hasher();
        let n = params.n();
        let height = params.h() as usize;
        let num_leaves = 1usize << height;

        let mut ots_addr = base_addr.to_ots();
        let mut ltree_addr = base_addr.to_ltree();
        let mut node_addr = base_addr.to_node();

        let mut leaves = Vec::with_capacity(num_leaves);
        for i in 0..num_leaves {
            ltree_addr.set_ltree_address(i as u32);
            ots_addr.set_ots_address(i as u32);
            leaves.push(gen_leaf(params, sk_seed, pub_seed, ltree_addr, ots_addr));
        }

        let mut nodes: Vec<Vec<Vec<u8>>> = Vec::with_capacity(height + 1);
        nodes.push(leaves);
        for level in 0..height {
            node_addr.set_node_tree_height(level as u32);
            let prev = &nodes[level];
            let mut next = Vec::with_capacity(prev.len() / 2);
            for j in 0..prev.len() / 2 {
                node_addr.set_node_tree_index(j as u32);
                next.push(hash::hash_h(
                    hasher,
                    pub_seed,
                    node_addr,
                    &prev[2 * j],
                    &prev[2 * j + 1],
                    n,
                ));
            }
            nodes.push(next);
        }

        MerkleTree { nodes, height }
    }

    pub fn root(&self) -> &[u8] {
        &self.nodes[self.height][0]
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The h sibling nodes along the path from `leaf_index` to the root,
    /// level 0 first.
    pub fn authentication_path(&self, leaf_index: usize) -> AuthPath {
        let mut auth_nodes = Vec::with_capacity(self.height);
        let mut index = leaf_index;

        for level in 0..self.height {
            auth_nodes.push(self.nodes[level][index ^ 1].clone());
            index >>= 1;
        }

        AuthPath::new(auth_nodes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPath {
    nodes: Vec<Vec<u8>>,
}

impl AuthPath {
    pub fn new(nodes: Vec<Vec<u8>>) -> Self {
        AuthPath { nodes }
    }

    pub fn nodes(&self) -> &[Vec<u8>] {
        &self.nodes
    }

    /// Verify-side fold: recomputes the root candidate from a leaf. Bit i
    /// of the leaf index decides whether the running node is the left or
    /// right operand at level i.
    pub fn compute_root(
        &self,
        params: &XmssParams,
        leaf: &[u8],
        leaf_index: u32,
        pub_seed: &[u8],
        base_addr: Address,
    ) -> Vec<u8> {
        let hasher = params.hasher();
        let n = params.n();
        let mut node_addr = base_addr.to_node();
        let mut node = leaf.to_vec();

        for (level, auth_node) in self.nodes.iter().enumerate() {
            node_addr.set_node_tree_height(level as u32);
            node_addr.set_node_tree_index(leaf_index >> (level + 1));

            node = if (leaf_index >> level) & 1 == 0 {
                hash::hash_h(hasher, pub_seed, node_addr, &node, auth_node, n)
            } else {
                hash::hash_h(hasher, pub_seed, node_addr, auth_node, &node, n)
            };
        }

        node
    }
}
