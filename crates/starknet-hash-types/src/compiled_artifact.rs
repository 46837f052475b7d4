//! Compiled Cairo 0 contract classes.
//!
//! [`CompiledArtifact`] is what the compiler hands back and what the class hash is computed
//! from. The program is kept as close to the compiler output as possible since parts of it
//! are hashed as JSON text; bytecode and builtins are additionally parsed into field elements
//! when the artifact is loaded, so a malformed class is rejected up front.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::abi::{parse_abi, storage_variables, AbiDescriptor, AbiEntry};
use crate::error::ArtifactError;
use crate::felt::FieldElement;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub selector: FieldElement,
    pub offset: FieldElement,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPointsByType {
    #[serde(rename = "CONSTRUCTOR", default)]
    pub constructor: Vec<EntryPoint>,
    #[serde(rename = "EXTERNAL", default)]
    pub external: Vec<EntryPoint>,
    #[serde(rename = "L1_HANDLER", default)]
    pub l1_handler: Vec<EntryPoint>,
}

/// Hint attached to a program counter. Fields are in alphabetical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintMetadata {
    pub accessible_scopes: Vec<String>,
    pub code: String,
    pub flow_tracking_data: Value,
}

/// The `program` section of a compiled class.
///
/// Fields are declared in alphabetical order, so serializing the struct yields sorted keys.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub attributes: Vec<Value>,
    pub builtins: Vec<String>,
    pub compiler_version: Option<String>,
    pub data: Vec<String>,
    #[serde(default)]
    pub debug_info: Value,
    #[serde(default)]
    pub hints: BTreeMap<u64, Vec<HintMetadata>>,
    #[serde(default)]
    pub identifiers: Value,
    pub main_scope: String,
    pub prime: String,
    #[serde(default)]
    pub reference_manager: Value,
}

/// On-disk layout of a compiled class.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCompiledArtifact {
    #[serde(default)]
    abi: Value,
    #[serde(default)]
    entry_points_by_type: EntryPointsByType,
    program: Program,
}

/// A compiled contract class, validated at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCompiledArtifact", into = "RawCompiledArtifact")]
pub struct CompiledArtifact {
    abi: Value,
    abi_entries: Vec<AbiEntry>,
    entry_points_by_type: EntryPointsByType,
    program: Program,
    bytecode: Vec<FieldElement>,
    builtins: Vec<FieldElement>,
}

impl TryFrom<RawCompiledArtifact> for CompiledArtifact {
    type Error = ArtifactError;

    fn try_from(raw: RawCompiledArtifact) -> Result<Self, Self::Error> {
        let abi_entries = parse_abi(&raw.abi)?;

        let bytecode = raw
            .program
            .data
            .iter()
            .enumerate()
            .map(|(index, word)| {
                FieldElement::parse_strict(word).map_err(|source| ArtifactError::InvalidBytecode { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let builtins = raw
            .program
            .builtins
            .iter()
            .enumerate()
            .map(|(index, name)| {
                FieldElement::from_short_string(name).map_err(|source| ArtifactError::InvalidBuiltin {
                    index,
                    name: name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::trace!(
            "Loaded compiled class: {} words of bytecode, {} ABI entries, {} hints",
            bytecode.len(),
            abi_entries.len(),
            raw.program.hints.len()
        );

        Ok(Self {
            abi: raw.abi,
            abi_entries,
            entry_points_by_type: raw.entry_points_by_type,
            program: raw.program,
            bytecode,
            builtins,
        })
    }
}

impl From<CompiledArtifact> for RawCompiledArtifact {
    fn from(artifact: CompiledArtifact) -> Self {
        Self { abi: artifact.abi, entry_points_by_type: artifact.entry_points_by_type, program: artifact.program }
    }
}

impl CompiledArtifact {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let raw: RawCompiledArtifact = serde_json::from_slice(bytes)?;
        Self::try_from(raw)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ArtifactError> {
        Self::from_bytes(json.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn to_json(&self) -> Result<String, ArtifactError> {
        Ok(serde_json::to_string(self)?)
    }

    /// The ABI exactly as the compiler emitted it.
    pub fn raw_abi(&self) -> &Value {
        &self.abi
    }

    pub fn abi(&self) -> &[AbiEntry] {
        &self.abi_entries
    }

    pub fn entry_points_by_type(&self) -> &EntryPointsByType {
        &self.entry_points_by_type
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn bytecode(&self) -> &[FieldElement] {
        &self.bytecode
    }

    /// Builtin names encoded as short strings, in declaration order.
    pub fn builtins(&self) -> &[FieldElement] {
        &self.builtins
    }

    pub fn hints(&self) -> &BTreeMap<u64, Vec<HintMetadata>> {
        &self.program.hints
    }

    /// Callable surface of the contract: ABI functions followed by storage variables.
    pub fn abi_descriptors(&self) -> Vec<AbiDescriptor> {
        self.abi_entries
            .iter()
            .filter_map(AbiEntry::descriptor)
            .chain(storage_variables(&self.program.identifiers))
            .collect()
    }
}
