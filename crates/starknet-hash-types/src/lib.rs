//! Value types shared by the Starknet hash derivation pipeline.
//!
//! Everything here is an immutable value: field elements, the identifiers derived from them
//! and the compiled contract classes they are derived from.

pub mod abi;
pub mod chain_id;
pub mod compiled_artifact;
pub mod error;
pub mod felt;
pub mod hash;

pub use chain_id::ChainId;
pub use compiled_artifact::CompiledArtifact;
pub use error::{ArtifactError, RangeError};
pub use felt::FieldElement;
pub use hash::{ClassHash, ContractAddress, TransactionHash};
