use lazy_static::lazy_static;
use num_bigint::BigUint;
use starknet_hash_types::{ClassHash, ContractAddress, FieldElement};

use crate::crypto::hash_sequence;

/// `b"STARKNET_CONTRACT_ADDRESS"`
pub const CONTRACT_ADDRESS_PREFIX: FieldElement =
    FieldElement::from_hex_unchecked("0x535441524b4e45545f434f4e54524143545f41444452455353");

lazy_static! {
    /// `2**251 - 256`; addresses are taken modulo this bound.
    pub static ref L2_ADDRESS_UPPER_BOUND: BigUint = (BigUint::from(1u8) << 251u32) - BigUint::from(256u32);
}

/// Derives the address a class is deployed at.
///
/// A `deployer_address` of zero is a deployment through the legacy deploy transaction. The
/// empty `constructor_calldata` slice stands for a constructor without arguments.
pub fn compute_address(
    class_hash: &ClassHash,
    deployer_address: &FieldElement,
    salt: &FieldElement,
    constructor_calldata: &[FieldElement],
) -> ContractAddress {
    let raw_address = hash_sequence(&[
        CONTRACT_ADDRESS_PREFIX,
        *deployer_address,
        *salt,
        **class_hash,
        hash_sequence(constructor_calldata),
    ]);
    let address = FieldElement::from_biguint(&(raw_address.to_biguint() % &*L2_ADDRESS_UPPER_BOUND));

    log::debug!("Computed address {address:#x} for class {class_hash} with salt {salt:#x}");
    ContractAddress(address)
}
