use starknet_hash_types::{ChainId, ContractAddress, FieldElement, RangeError, TransactionHash};

use crate::crypto::{get_selector_from_name, hash_sequence};

/// `b"invoke"`
pub const INVOKE_PREFIX: FieldElement = FieldElement::from_hex_unchecked("0x696e766f6b65");

/// Invoke transaction hash layouts.
///
/// The default is the pre-versioning layout, which is what function calls prepared by the
/// Cairo 0 tooling are hashed with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum TransactionVersion {
    /// Pre-versioning invoke, before max fee and version were hashed.
    #[default]
    Legacy,
    V0,
    /// Account invoke. The selector slot is zero since calls go through `__execute__`.
    V1,
}

/// A call to be hashed. Built per call and consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub contract_address: ContractAddress,
    pub entry_point_selector: FieldElement,
    pub calldata: Vec<FieldElement>,
    pub max_fee: Option<FieldElement>,
    pub nonce: Option<FieldElement>,
    /// Carried along for the caller, never part of the hash.
    pub signature: Vec<FieldElement>,
}

impl InvocationRequest {
    pub fn new(
        contract_address: ContractAddress,
        entry_point_selector: FieldElement,
        calldata: Vec<FieldElement>,
    ) -> Self {
        Self { contract_address, entry_point_selector, calldata, max_fee: None, nonce: None, signature: Vec::new() }
    }

    pub fn from_function_name(
        contract_address: ContractAddress,
        function_name: &str,
        calldata: Vec<FieldElement>,
    ) -> Self {
        Self::new(contract_address, get_selector_from_name(function_name), calldata)
    }

    #[must_use]
    pub fn with_max_fee(mut self, max_fee: FieldElement) -> Self {
        self.max_fee = Some(max_fee);
        self
    }

    #[must_use]
    pub fn with_nonce(mut self, nonce: FieldElement) -> Self {
        self.nonce = Some(nonce);
        self
    }

    #[must_use]
    pub fn with_signature(mut self, signature: Vec<FieldElement>) -> Self {
        self.signature = signature;
        self
    }
}

/// Hashes an invoke transaction for `chain_id`.
///
/// Fails only if a custom chain id does not fit in a short string.
pub fn compute_transaction_hash(
    invocation: &InvocationRequest,
    chain_id: &ChainId,
    version: TransactionVersion,
) -> Result<TransactionHash, RangeError> {
    let chain_id = chain_id.to_felt()?;
    let calldata_hash = hash_sequence(&invocation.calldata);
    let max_fee = invocation.max_fee.unwrap_or_default();
    let nonce = invocation.nonce.unwrap_or_default();
    let contract_address = *invocation.contract_address;

    let hash = match version {
        TransactionVersion::Legacy => hash_sequence(&[
            INVOKE_PREFIX,
            contract_address,
            invocation.entry_point_selector,
            calldata_hash,
            chain_id,
        ]),
        TransactionVersion::V0 => hash_sequence(&[
            INVOKE_PREFIX,
            FieldElement::ZERO,
            contract_address,
            invocation.entry_point_selector,
            calldata_hash,
            max_fee,
            chain_id,
        ]),
        TransactionVersion::V1 => hash_sequence(&[
            INVOKE_PREFIX,
            FieldElement::ONE,
            contract_address,
            FieldElement::ZERO,
            calldata_hash,
            max_fee,
            chain_id,
            nonce,
        ]),
    };

    log::debug!("Computed {version:?} invoke transaction hash {hash:#x}");
    Ok(TransactionHash(hash))
}
