use std::marker::PhantomData;

use starknet_crypto::pedersen_hash;
use starknet_hash_types::FieldElement;

/// A two-to-one hash over field elements.
pub trait HashFunction {
    fn hash(x: &FieldElement, y: &FieldElement) -> FieldElement;

    /// Hashes a sequence with the [`HashChain`] construction.
    fn hash_sequence(elements: &[FieldElement]) -> FieldElement
    where
        Self: Sized,
    {
        elements.iter().copied().fold(HashChain::<Self>::default(), HashChain::chain_update).finalize()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PedersenHash;

impl HashFunction for PedersenHash {
    fn hash(x: &FieldElement, y: &FieldElement) -> FieldElement {
        pedersen_hash(&(*x).into(), &(*y).into()).into()
    }
}

/// Running state of `h(h(...h(h(0, x0), x1)...), xn-1), n)`.
///
/// This is how Cairo hashes arrays: the accumulator starts at zero, absorbs every element
/// and the element count is absorbed last.
pub struct HashChain<H: HashFunction = PedersenHash> {
    hash: FieldElement,
    count: usize,
    _h: PhantomData<H>,
}

impl<H: HashFunction> Default for HashChain<H> {
    fn default() -> Self {
        Self { hash: FieldElement::ZERO, count: 0, _h: PhantomData }
    }
}

impl<H: HashFunction> HashChain<H> {
    pub fn update(&mut self, value: FieldElement) {
        self.hash = H::hash(&self.hash, &value);
        self.count += 1;
    }

    pub fn chain_update(mut self, value: FieldElement) -> Self {
        self.update(value);
        self
    }

    pub fn finalize(self) -> FieldElement {
        H::hash(&self.hash, &FieldElement::from(self.count))
    }
}

/// Pedersen hash of two field elements.
pub fn hash2(a: &FieldElement, b: &FieldElement) -> FieldElement {
    PedersenHash::hash(a, b)
}

/// Pedersen hash chain over a sequence, length folded in last.
pub fn hash_sequence(elements: &[FieldElement]) -> FieldElement {
    PedersenHash::hash_sequence(elements)
}
