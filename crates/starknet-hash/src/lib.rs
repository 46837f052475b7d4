//! Derivation of Starknet class hashes, deployment addresses and transaction hashes.
//!
//! The pipeline runs in three pure stages:
//!
//! 1. a compiled class (or source, compiled through a [`ContractCompiler`]) is hashed into a
//!    [`ClassHash`], see [`class_hash`];
//! 2. the class hash, salt and constructor arguments give the [`ContractAddress`], see
//!    [`address`];
//! 3. an [`InvocationRequest`] against that address gives the [`TransactionHash`], see
//!    [`transaction_hash`].
//!
//! [`ContractHasher`] ties the stages together behind the entry points most callers need.

pub mod address;
pub mod calldata;
pub mod class_hash;
pub mod compiler;
pub mod config;
pub mod crypto;
pub mod error;
pub mod transaction_hash;

use std::path::PathBuf;

pub use starknet_hash_types::{
    ChainId, ClassHash, CompiledArtifact, ContractAddress, FieldElement, RangeError, TransactionHash,
};

pub use crate::compiler::{CompilationSource, ContractCompiler, StarknetCompileCli};
pub use crate::error::{CompilationError, ContractHashError};
pub use crate::transaction_hash::{InvocationRequest, TransactionVersion};

/// A contract given either as a compiled class or as source to compile.
///
/// When both are present the compiled class is used and the source is ignored.
#[derive(Debug, Clone, Default)]
pub struct ContractDefinition {
    pub compiled_contract: Option<CompiledArtifact>,
    pub compilation_source: Option<CompilationSource>,
    /// Import roots handed to the compiler, in order.
    pub search_paths: Vec<PathBuf>,
}

impl ContractDefinition {
    pub fn from_compiled(compiled_contract: CompiledArtifact) -> Self {
        Self { compiled_contract: Some(compiled_contract), ..Default::default() }
    }

    pub fn from_source(source: impl Into<CompilationSource>) -> Self {
        Self { compilation_source: Some(source.into()), ..Default::default() }
    }

    #[must_use]
    pub fn with_search_paths(mut self, search_paths: Vec<PathBuf>) -> Self {
        self.search_paths = search_paths;
        self
    }
}

/// Deployment parameters. A known `class_hash` skips hashing the contract definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParams {
    pub class_hash: Option<ClassHash>,
    pub salt: FieldElement,
    pub constructor_args: Vec<FieldElement>,
    /// Zero for deployments through the deploy transaction.
    pub deployer_address: FieldElement,
}

impl AddressParams {
    pub fn new(salt: FieldElement, constructor_args: Vec<FieldElement>) -> Self {
        Self { salt, constructor_args, ..Default::default() }
    }
}

/// Entry points of the pipeline, with the compiler passed in as explicit context.
#[derive(Debug, Clone, Default)]
pub struct ContractHasher<C: ContractCompiler> {
    compiler: C,
}

impl<C: ContractCompiler> ContractHasher<C> {
    pub fn new(compiler: C) -> Self {
        Self { compiler }
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Computes the class hash of a contract definition.
    ///
    /// Fails with [`ContractHashError::MissingInput`] before anything is compiled when the
    /// definition carries neither a compiled class nor source.
    pub fn compute_contract_hash(&self, definition: &ContractDefinition) -> Result<ClassHash, ContractHashError> {
        match (&definition.compiled_contract, &definition.compilation_source) {
            (Some(compiled_contract), _) => class_hash::compute_class_hash(compiled_contract),
            (None, Some(source)) => {
                class_hash::compute_class_hash_from_source(&self.compiler, source, &definition.search_paths)
            }
            (None, None) => Err(ContractHashError::MissingInput),
        }
    }

    /// Computes the deployment address, hashing the definition only if no class hash is given.
    pub fn compute_address(
        &self,
        definition: &ContractDefinition,
        params: &AddressParams,
    ) -> Result<ContractAddress, ContractHashError> {
        let class_hash = match params.class_hash {
            Some(class_hash) => class_hash,
            None => self.compute_contract_hash(definition)?,
        };
        Ok(address::compute_address(&class_hash, &params.deployer_address, &params.salt, &params.constructor_args))
    }

    pub fn compute_transaction_hash(
        &self,
        invocation: &InvocationRequest,
        chain_id: &ChainId,
        version: TransactionVersion,
    ) -> Result<TransactionHash, ContractHashError> {
        Ok(transaction_hash::compute_transaction_hash(invocation, chain_id, version)?)
    }
}

impl ContractHasher<StarknetCompileCli> {
    /// A hasher that compiles with `starknet-compile`, configured from the environment.
    pub fn from_env() -> Self {
        Self::new(StarknetCompileCli::from_env())
    }
}
