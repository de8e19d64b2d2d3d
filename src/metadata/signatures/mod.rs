//! Signature blobs, ECMA-335 II.23.2.
//!
//! Field, method and `TypeSpec` signatures are decoded into [`TypeSignature`] trees. Types
//! defined elsewhere are referenced by `TypeDefOrRefOrSpec` tokens and resolved by the loader.

mod parser;
mod types;

pub use parser::SignatureParser;
pub use types::*;

use crate::Result;

/// Parse a method signature (`MethodDefSig`, `MethodRefSig`)
///
/// # Errors
/// Returns an error if the blob is malformed
pub fn parse_method_signature(data: &[u8]) -> Result<SignatureMethod> {
    SignatureParser::new(data).parse_method_signature()
}

/// Parse a field signature
///
/// # Errors
/// Returns an error if the blob is malformed
pub fn parse_field_signature(data: &[u8]) -> Result<SignatureField> {
    SignatureParser::new(data).parse_field_signature()
}

/// Parse a `TypeSpec` signature
///
/// # Errors
/// Returns an error if the blob is malformed
pub fn parse_type_spec_signature(data: &[u8]) -> Result<SignatureTypeSpec> {
    SignatureParser::new(data).parse_type_spec_signature()
}
