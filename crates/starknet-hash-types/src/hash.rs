//! Hash-derived identifiers.
//!
//! Class hashes, contract addresses and transaction hashes are all field elements, but they
//! are never interchangeable. Each gets its own transparent newtype so that the pipeline
//! stages cannot be wired together in the wrong order.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;

use crate::felt::FieldElement;

macro_rules! felt_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub FieldElement);

        impl $name {
            #[must_use]
            pub fn new(value: FieldElement) -> Self {
                Self(value)
            }
        }

        impl Deref for $name {
            type Target = FieldElement;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<FieldElement> for $name {
            fn from(value: FieldElement) -> Self {
                Self(value)
            }
        }

        impl From<$name> for FieldElement {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl From<Felt> for $name {
            fn from(value: Felt) -> Self {
                Self(value.into())
            }
        }

        impl From<$name> for Felt {
            fn from(value: $name) -> Self {
                value.0.into()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:#x}", self.0)
            }
        }
    };
}

felt_newtype!(
    /// Content hash of a compiled contract class.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use starknet_hash_types::felt::FieldElement;
    /// use starknet_hash_types::hash::ClassHash;
    ///
    /// let class_hash = ClassHash::from(FieldElement::from(1234u64));
    /// assert_eq!(class_hash.to_string(), "0x4d2");
    /// assert_eq!(*class_hash, FieldElement::from(1234u64));
    /// ```
    ClassHash
);

felt_newtype!(
    /// Deployment address of a contract instance.
    ContractAddress
);

felt_newtype!(
    /// Canonical identifier of an invoke transaction.
    TransactionHash
);
