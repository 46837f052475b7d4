//! Typed view over a Cairo 0 contract ABI.
//!
//! The ABI is decoded once when an artifact is loaded. Callers work with [`AbiEntry`] and
//! [`AbiDescriptor`] instead of poking at raw JSON objects.

use std::collections::BTreeSet;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const STORAGE_VAR_FUNCTIONS: [&str; 3] = ["addr", "read", "write"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionAbiEntry {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<TypedParameter>,
    #[serde(default)]
    pub outputs: Vec<TypedParameter>,
    #[serde(rename = "stateMutability", default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructMember {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructAbiEntry {
    pub name: String,
    pub size: u64,
    pub members: Vec<StructMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAbiEntry {
    pub name: String,
    #[serde(default)]
    pub keys: Vec<TypedParameter>,
    #[serde(default)]
    pub data: Vec<TypedParameter>,
}

/// One element of a Cairo 0 ABI array, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AbiEntry {
    Function(FunctionAbiEntry),
    Constructor(FunctionAbiEntry),
    L1Handler(FunctionAbiEntry),
    Struct(StructAbiEntry),
    Event(EventAbiEntry),
}

// Internally tagged enums buffer their content, which loses big numbers when serde_json runs
// with `arbitrary_precision`. Dispatching on the tag by hand keeps integer fields intact.
impl<'de> Deserialize<'de> for AbiEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        AbiEntry::try_from(value).map_err(D::Error::custom)
    }
}

impl TryFrom<Value> for AbiEntry {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let tag = value.get("type").and_then(Value::as_str).unwrap_or_default().to_string();
        let entry = match tag.as_str() {
            "function" => Self::Function(serde_json::from_value(value)?),
            "constructor" => Self::Constructor(serde_json::from_value(value)?),
            "l1_handler" => Self::L1Handler(serde_json::from_value(value)?),
            "struct" => Self::Struct(serde_json::from_value(value)?),
            "event" => Self::Event(serde_json::from_value(value)?),
            other => return Err(serde_json::Error::custom(format!("unknown ABI entry type {other:?}"))),
        };
        Ok(entry)
    }
}

/// What a callable name in a contract is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    External,
    View,
    Constructor,
    L1Handler,
    StorageVar,
}

/// A callable member of a contract, resolved from its ABI and program identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiDescriptor {
    pub name: String,
    pub kind: FunctionKind,
    pub inputs: Vec<TypedParameter>,
    pub outputs: Vec<TypedParameter>,
}

impl AbiEntry {
    /// Returns the callable descriptor for function-like entries.
    pub fn descriptor(&self) -> Option<AbiDescriptor> {
        let (function, kind) = match self {
            Self::Function(f) if f.state_mutability.as_deref() == Some("view") => (f, FunctionKind::View),
            Self::Function(f) => (f, FunctionKind::External),
            Self::Constructor(f) => (f, FunctionKind::Constructor),
            Self::L1Handler(f) => (f, FunctionKind::L1Handler),
            Self::Struct(_) | Self::Event(_) => return None,
        };
        Some(AbiDescriptor {
            name: function.name.clone(),
            kind,
            inputs: function.inputs.clone(),
            outputs: function.outputs.clone(),
        })
    }
}

/// Decodes a raw ABI array. A missing ABI decodes to no entries.
pub fn parse_abi(raw: &Value) -> Result<Vec<AbiEntry>, serde_json::Error> {
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => entries.iter().cloned().map(AbiEntry::try_from).collect(),
        _ => Err(serde_json::Error::custom("ABI is not an array")),
    }
}

/// Finds storage variables in the program identifiers.
///
/// `@storage_var` does not survive into the compiled ABI. The compiler expands every storage
/// variable into a namespace holding generated `addr`, `read` and `write` functions, which is
/// what this looks for.
pub fn storage_variables(identifiers: &Value) -> Vec<AbiDescriptor> {
    let Some(identifiers) = identifiers.as_object() else {
        return Vec::new();
    };
    let is_function = |path: &str| {
        identifiers.get(path).and_then(|identifier| identifier.get("type")).and_then(Value::as_str)
            == Some("function")
    };

    let names: BTreeSet<&str> = identifiers
        .iter()
        .filter(|(_, identifier)| identifier.get("type").and_then(Value::as_str) == Some("namespace"))
        .filter(|(path, _)| STORAGE_VAR_FUNCTIONS.iter().all(|f| is_function(&format!("{path}.{f}"))))
        .filter_map(|(path, _)| path.rsplit('.').next())
        .collect();

    names
        .into_iter()
        .map(|name| AbiDescriptor {
            name: name.to_string(),
            kind: FunctionKind::StorageVar,
            inputs: Vec::new(),
            outputs: Vec::new(),
        })
        .collect()
}
