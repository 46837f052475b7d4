//! The Starknet field element.
//!
//! Every value handled by the hash pipeline is an integer modulo the Stark prime
//! `P = 2^251 + 17 * 2^192 + 1`. [`FieldElement`] wraps the `starknet-types-core` felt and
//! adds the parsing rules used at API boundaries: decimal strings, `0x`-prefixed hexadecimal
//! strings and fixed-width big-endian byte arrays.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use std::str::FromStr;

use lazy_static::lazy_static;
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{Num, Zero};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use starknet_types_core::felt::Felt;

use crate::error::RangeError;

/// Size of the canonical big-endian encoding.
pub const FIELD_ELEMENT_BYTES: usize = 32;

/// Cairo short strings hold at most 31 ASCII characters.
const MAX_SHORT_STRING_LEN: usize = 31;

lazy_static! {
    pub static ref FIELD_PRIME: BigUint =
        (BigUint::from(1u8) << 251u32) + (BigUint::from(17u8) << 192u32) + BigUint::from(1u8);
    static ref FIELD_PRIME_SIGNED: BigInt = BigInt::from_biguint(Sign::Plus, FIELD_PRIME.clone());
}

/// An integer in `[0, P)`.
///
/// Equality, ordering and hashing are defined on the reduced value. All arithmetic wraps
/// modulo `P`.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct FieldElement(Felt);

impl FieldElement {
    pub const ZERO: Self = Self(Felt::ZERO);
    pub const ONE: Self = Self(Felt::ONE);
    pub const TWO: Self = Self(Felt::TWO);

    /// Builds a constant from a hex literal that is known to be in range.
    pub const fn from_hex_unchecked(hex: &str) -> Self {
        Self(Felt::from_hex_unchecked(hex))
    }

    /// Reduces an arbitrary-precision unsigned integer modulo `P`.
    pub fn from_biguint(value: &BigUint) -> Self {
        let reduced = value % &*FIELD_PRIME;
        let digits = reduced.to_bytes_be();
        let mut bytes = [0u8; FIELD_ELEMENT_BYTES];
        bytes[FIELD_ELEMENT_BYTES - digits.len()..].copy_from_slice(&digits);
        Self(Felt::from_bytes_be(&bytes))
    }

    /// Reduces an arbitrary-precision signed integer into `[0, P)`.
    pub fn from_bigint(value: &BigInt) -> Self {
        let reduced = value.mod_floor(&FIELD_PRIME_SIGNED);
        // mod_floor with a positive modulus is never negative.
        let (_, magnitude) = reduced.into_parts();
        Self::from_biguint(&magnitude)
    }

    /// Decodes a fixed-width big-endian encoding, reducing modulo `P`.
    pub fn from_bytes_be(bytes: &[u8; FIELD_ELEMENT_BYTES]) -> Self {
        Self::from_biguint(&BigUint::from_bytes_be(bytes))
    }

    /// Decodes a big-endian byte slice of any length, reducing modulo `P`.
    pub fn from_bytes_be_slice(bytes: &[u8]) -> Self {
        Self::from_biguint(&BigUint::from_bytes_be(bytes))
    }

    /// Encodes an ASCII string of at most 31 characters as a Cairo short string.
    pub fn from_short_string(value: &str) -> Result<Self, RangeError> {
        if !value.is_ascii() || value.len() > MAX_SHORT_STRING_LEN {
            return Err(RangeError::ShortStringTooLong(value.to_string()));
        }
        Ok(Self::from_bytes_be_slice(value.as_bytes()))
    }

    /// Parses a literal, refusing anything that is not already a canonical field element.
    ///
    /// Unlike [`FromStr`], negative literals and literals `>= P` are errors instead of
    /// being reduced.
    pub fn parse_strict(literal: &str) -> Result<Self, RangeError> {
        let value = parse_literal(literal)?;
        if value.sign() == Sign::Minus {
            return Err(RangeError::Negative(literal.to_string()));
        }
        if value >= *FIELD_PRIME_SIGNED {
            return Err(RangeError::OutOfRange(literal.to_string()));
        }
        Ok(Self::from_bigint(&value))
    }

    pub fn to_bytes_be(&self) -> [u8; FIELD_ELEMENT_BYTES] {
        self.0.to_bytes_be()
    }

    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_bytes_be())
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Returns the underlying `starknet-types-core` felt.
    pub fn into_inner(self) -> Felt {
        self.0
    }
}

/// Parses a decimal, negative decimal or `0x` hexadecimal literal into an integer.
fn parse_literal(literal: &str) -> Result<BigInt, RangeError> {
    let (negative, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let (radix, digits) = match unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };

    if digits.is_empty() {
        return Err(RangeError::invalid(literal, "no digits"));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_digit(radix)) {
        return Err(RangeError::invalid(literal, format!("unexpected character {bad:?}")));
    }

    let magnitude = BigUint::from_str_radix(digits, radix).map_err(|e| RangeError::invalid(literal, e))?;
    let sign = if negative && !magnitude.is_zero() { Sign::Minus } else { Sign::Plus };
    Ok(BigInt::from_biguint(sign, magnitude))
}

impl FromStr for FieldElement {
    type Err = RangeError;

    /// Accepts decimal, negative decimal and `0x` hex literals, reducing modulo `P`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_literal(s).map(|value| Self::from_bigint(&value))
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        write!(f, "{:x}", self.to_biguint())
    }
}

impl fmt::UpperHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        write!(f, "{:X}", self.to_biguint())
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0 + rhs.0;
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::ZERO - self
    }
}

impl From<Felt> for FieldElement {
    fn from(value: Felt) -> Self {
        Self(value)
    }
}

impl From<FieldElement> for Felt {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

impl From<u8> for FieldElement {
    fn from(value: u8) -> Self {
        Self(Felt::from(u64::from(value)))
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self(Felt::from(value))
    }
}

impl From<u128> for FieldElement {
    fn from(value: u128) -> Self {
        Self(Felt::from(value))
    }
}

impl From<usize> for FieldElement {
    fn from(value: usize) -> Self {
        Self(Felt::from(value as u64))
    }
}

impl From<bool> for FieldElement {
    fn from(value: bool) -> Self {
        if value {
            Self::ONE
        } else {
            Self::ZERO
        }
    }
}

impl From<&BigUint> for FieldElement {
    fn from(value: &BigUint) -> Self {
        Self::from_biguint(value)
    }
}

impl From<&BigInt> for FieldElement {
    fn from(value: &BigInt) -> Self {
        Self::from_bigint(value)
    }
}

impl From<FieldElement> for BigUint {
    fn from(value: FieldElement) -> Self {
        value.to_biguint()
    }
}

impl Serialize for FieldElement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self:#x}"))
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    /// Accepts decimal or hex strings and JSON integers of any size.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(literal) => literal.parse().map_err(de::Error::custom),
            serde_json::Value::Number(number) => number.to_string().parse().map_err(de::Error::custom),
            other => Err(de::Error::invalid_type(unexpected(&other), &"a field element literal")),
        }
    }
}

fn unexpected(value: &serde_json::Value) -> de::Unexpected<'_> {
    match value {
        serde_json::Value::Null => de::Unexpected::Unit,
        serde_json::Value::Bool(b) => de::Unexpected::Bool(*b),
        serde_json::Value::Array(_) => de::Unexpected::Seq,
        serde_json::Value::Object(_) => de::Unexpected::Map,
        serde_json::Value::String(s) => de::Unexpected::Str(s),
        serde_json::Value::Number(_) => de::Unexpected::Other("number"),
    }
}
