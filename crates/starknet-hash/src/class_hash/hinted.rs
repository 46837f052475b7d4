//! The `hinted_class_hash` component of a Cairo 0 class hash.
//!
//! cairo-lang computes it as the truncated keccak of
//! `json.dumps({"abi": abi, "program": program}, sort_keys=True)`, after stripping the parts
//! of the program that do not affect execution. Reproducing the hash means reproducing that
//! exact byte stream, which is what this module does.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;
use serde_json::Value;
use starknet_hash_types::compiled_artifact::{HintMetadata, Program};
use starknet_hash_types::{CompiledArtifact, FieldElement};

use crate::crypto::keccak::KeccakWriter;
use crate::error::ContractHashError;

/// The hashed document. Fields in both structs are declared in alphabetical order, which is
/// what `sort_keys=True` produces; nested maps are `serde_json::Map`s, which are sorted too.
#[derive(Serialize)]
struct HintedClass<'a> {
    abi: &'a Value,
    program: HintedProgram<'a>,
}

#[derive(Serialize)]
struct HintedProgram<'a> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<Value>,
    builtins: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    compiler_version: Option<&'a str>,
    data: &'a [String],
    debug_info: Option<()>,
    // Keyed by numeric program counter, not by its string form.
    hints: &'a BTreeMap<u64, Vec<HintMetadata>>,
    identifiers: Cow<'a, Value>,
    main_scope: &'a str,
    prime: &'a str,
    reference_manager: Cow<'a, Value>,
}

impl<'a> HintedProgram<'a> {
    fn new(program: &'a Program) -> Self {
        let attributes = program.attributes.iter().cloned().map(strip_attribute).collect();

        let (identifiers, reference_manager) = if program.compiler_version.is_none() {
            // Classes declared before compiler_version existed were hashed with the old
            // named-tuple formatting, `(a : felt)` instead of `(a: felt)`.
            let mut identifiers = program.identifiers.clone();
            let mut reference_manager = program.reference_manager.clone();
            add_extra_space_to_cairo_named_tuples(&mut identifiers);
            add_extra_space_to_cairo_named_tuples(&mut reference_manager);
            (Cow::Owned(identifiers), Cow::Owned(reference_manager))
        } else {
            (Cow::Borrowed(&program.identifiers), Cow::Borrowed(&program.reference_manager))
        };

        Self {
            attributes,
            builtins: &program.builtins,
            compiler_version: program.compiler_version.as_deref(),
            data: &program.data,
            debug_info: None,
            hints: &program.hints,
            identifiers,
            main_scope: &program.main_scope,
            prime: &program.prime,
            reference_manager,
        }
    }
}

/// Cairo 0.8 added `accessible_scopes` and `flow_tracking_data` to attributes. Older classes
/// carry them as empty / null and they must not take part in the hash.
fn strip_attribute(mut attribute: Value) -> Value {
    if let Some(fields) = attribute.as_object_mut() {
        if matches!(fields.get("accessible_scopes"), Some(Value::Array(scopes)) if scopes.is_empty()) {
            fields.remove("accessible_scopes");
        }
        if let Some(Value::Null) = fields.get("flow_tracking_data") {
            fields.remove("flow_tracking_data");
        }
    }
    attribute
}

fn add_extra_space_to_cairo_named_tuples(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(add_extra_space_to_cairo_named_tuples),
        Value::Object(fields) => {
            for (key, field) in fields.iter_mut() {
                match field {
                    Value::String(s) if key == "cairo_type" || key == "value" => {
                        *s = add_extra_space_before_colon(s);
                    }
                    _ => add_extra_space_to_cairo_named_tuples(field),
                }
            }
        }
        _ => {}
    }
}

fn add_extra_space_before_colon(v: &str) -> String {
    // An already spaced ` : ` turns into `  : ` after the first replace; the second one
    // collapses it back.
    v.replace(": ", " : ").replace("  :", " :")
}

/// Computes the truncated keccak of the Python-formatted, key-sorted class JSON.
pub fn compute_hinted_class_hash(artifact: &CompiledArtifact) -> Result<FieldElement, ContractHashError> {
    let hinted = HintedClass { abi: artifact.raw_abi(), program: HintedProgram::new(artifact.program()) };

    let mut writer = KeccakWriter::default();
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, PythonDefaultFormatter);
    hinted.serialize(&mut serializer)?;

    Ok(writer.finalize())
}

/// Formats JSON the way Python's `json.dumps` does with its default arguments.
///
/// Separators are `", "` and `": "`. Anything outside printable ASCII is written as a
/// lowercase `\uXXXX` escape, using surrogate pairs above the basic multilingual plane.
pub(crate) struct PythonDefaultFormatter;

impl serde_json::ser::Formatter for PythonDefaultFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> std::io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> std::io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    // Control characters, quotes and backslashes never reach this point; serde_json escapes
    // them itself with the same spelling Python uses.
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> std::io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut buf = [0u16; 2];

        for c in fragment.chars() {
            if (' '..='~').contains(&c) {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut buf) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }

        Ok(())
    }
}
