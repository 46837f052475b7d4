//! Cairo 0 class hashes.
//!
//! Outline of the hashing:
//!
//! 1. the ABI and the program are serialized the way Python's `json.dumps(..., sort_keys=True)`
//!    does and a truncated keccak is taken of the output, see [`compute_hinted_class_hash`];
//! 2. a [hash chain][`HashChain`] is built for each entry point type, the builtins and the
//!    bytecode;
//! 3. those are chained together, in that fixed order, into the class hash.
//!
//! [Official documentation](https://docs.starknet.io/documentation/architecture_and_concepts/Contracts/class-hash/),
//! [cairo-lang implementation](https://github.com/starkware-libs/cairo-lang/blob/64a7f6aed9757d3d8d6c28bd972df73272b0cb0a/src/starkware/starknet/core/os/contract_hash.py).

mod hinted;

use std::path::PathBuf;

pub use hinted::compute_hinted_class_hash;
use starknet_hash_types::compiled_artifact::EntryPoint;
use starknet_hash_types::{ClassHash, CompiledArtifact, FieldElement};

use crate::compiler::{CompilationSource, ContractCompiler};
use crate::crypto::{hash_sequence, HashChain, PedersenHash};
use crate::error::ContractHashError;

pub const API_VERSION: FieldElement = FieldElement::ZERO;

fn entry_points_hash(entry_points: &[EntryPoint]) -> FieldElement {
    entry_points
        .iter()
        // (selector, offset, selector, offset, ...)
        .flat_map(|entry_point| [entry_point.selector, entry_point.offset])
        .fold(HashChain::<PedersenHash>::default(), HashChain::chain_update)
        .finalize()
}

/// Computes the class hash of a compiled Cairo 0 class.
pub fn compute_class_hash(artifact: &CompiledArtifact) -> Result<ClassHash, ContractHashError> {
    let hinted_class_hash = compute_hinted_class_hash(artifact)?;
    let entry_points = artifact.entry_points_by_type();

    // The order of the entry point chains is part of the protocol.
    let class_hash = HashChain::<PedersenHash>::default()
        .chain_update(API_VERSION)
        .chain_update(entry_points_hash(&entry_points.external))
        .chain_update(entry_points_hash(&entry_points.l1_handler))
        .chain_update(entry_points_hash(&entry_points.constructor))
        .chain_update(hash_sequence(artifact.builtins()))
        .chain_update(hinted_class_hash)
        .chain_update(hash_sequence(artifact.bytecode()))
        .finalize();

    log::debug!("Computed class hash {class_hash:#x} (hinted class hash {hinted_class_hash:#x})");
    Ok(ClassHash(class_hash))
}

/// Compiles `source` and computes the class hash of the result.
///
/// Compilation errors are returned as they are; nothing is retried.
pub fn compute_class_hash_from_source<C: ContractCompiler>(
    compiler: &C,
    source: &CompilationSource,
    search_paths: &[PathBuf],
) -> Result<ClassHash, ContractHashError> {
    let artifact = compiler.compile(source, search_paths)?;
    compute_class_hash(&artifact)
}
