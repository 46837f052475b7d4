pub mod keccak;
pub mod pedersen;

pub use keccak::{get_selector_from_name, starknet_keccak};
pub use pedersen::{hash2, hash_sequence, HashChain, HashFunction, PedersenHash};
