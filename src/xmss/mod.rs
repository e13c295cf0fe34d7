pub mod core;
pub mod ltree;
pub mod signature;
pub mod tree;

pub use self::core::{XmssKeypair, XmssPublicKey, XmssSecretKey};
pub use self::ltree::l_tree;
pub use self::signature::XmssSignature;
pub use self::tree::{treehash, AuthPath, MerkleTree};
