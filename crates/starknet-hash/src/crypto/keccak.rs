use sha3::{Digest, Keccak256};
use starknet_hash_types::FieldElement;

const DEFAULT_ENTRY_POINT_NAME: &str = "__default__";
const DEFAULT_L1_ENTRY_POINT_NAME: &str = "__l1_default__";

/// Masks a keccak digest down to 250 bits so it always fits in a field element.
///
/// See <https://github.com/starkware-libs/cairo-lang/blob/64a7f6aed9757d3d8d6c28bd972df73272b0cb0a/src/starkware/starknet/public/abi.py#L21-L26>
pub fn truncated_keccak(mut plain: [u8; 32]) -> FieldElement {
    // python masks with (2**250 - 1), which is 0x03 followed by 31 0xff bytes in big endian
    plain[0] &= 0x03;
    FieldElement::from_bytes_be(&plain)
}

/// Keccak256 of `data`, truncated to 250 bits.
pub fn starknet_keccak(data: &[u8]) -> FieldElement {
    truncated_keccak(Keccak256::digest(data).into())
}

/// Entry point selector for a function name.
pub fn get_selector_from_name(name: &str) -> FieldElement {
    if name == DEFAULT_ENTRY_POINT_NAME || name == DEFAULT_L1_ENTRY_POINT_NAME {
        FieldElement::ZERO
    } else {
        starknet_keccak(name.as_bytes())
    }
}

/// `std::io::Write` adapter for Keccak256, so large JSON documents can be hashed while they
/// are serialized instead of being buffered first.
#[derive(Default)]
pub(crate) struct KeccakWriter(Keccak256);

impl KeccakWriter {
    pub(crate) fn finalize(self) -> FieldElement {
        truncated_keccak(self.0.finalize().into())
    }
}

impl std::io::Write for KeccakWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
