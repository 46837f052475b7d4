use starknet_hash_types::FieldElement;

/// A structured call argument, before it is laid out as field elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArgument {
    Felt(FieldElement),
    /// `felt*` with its length, which Cairo 0 passes as `(len, items...)`.
    Array(Vec<FieldElement>),
    /// Tuples and structs, flattened member by member.
    Tuple(Vec<CallArgument>),
}

impl CallArgument {
    fn flatten_into(&self, out: &mut Vec<FieldElement>) {
        match self {
            Self::Felt(value) => out.push(*value),
            Self::Array(items) => {
                out.push(FieldElement::from(items.len()));
                out.extend_from_slice(items);
            }
            Self::Tuple(members) => members.iter().for_each(|member| member.flatten_into(out)),
        }
    }
}

impl From<FieldElement> for CallArgument {
    fn from(value: FieldElement) -> Self {
        Self::Felt(value)
    }
}

impl From<Vec<FieldElement>> for CallArgument {
    fn from(items: Vec<FieldElement>) -> Self {
        Self::Array(items)
    }
}

/// Lays out arguments as the flat calldata the hash functions consume.
pub fn flatten_calldata(arguments: &[CallArgument]) -> Vec<FieldElement> {
    let mut calldata = Vec::with_capacity(arguments.len());
    arguments.iter().for_each(|argument| argument.flatten_into(&mut calldata));
    calldata
}
