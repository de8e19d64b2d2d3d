use crate::metadata::typesystem::TypeRef;

/// The operand of a field store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStore {
    /// The type declaring the field
    pub declaring_type: TypeRef,
    /// The field name
    pub name: String,
    /// The field's declared type, `None` if its signature could not be resolved
    pub field_type: Option<TypeRef>,
    /// True if the stored value is a value type (including primitives)
    pub is_value_type: bool,
}

impl FieldStore {
    /// A store into field `name` of `declaring_type`, holding a `field_type`
    pub fn new(declaring_type: TypeRef, name: impl Into<String>, field_type: TypeRef) -> Self {
        FieldStore {
            declaring_type,
            name: name.into(),
            is_value_type: field_type.is_value_type(),
            field_type: Some(field_type),
        }
    }
}

/// A decoded instruction with its operand resolved.
///
/// Only the two operations carrying ownership evidence are kept; all other opcodes are skipped
/// when a method body is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `newobj`: an instance of the type is constructed
    Construct(TypeRef),
    /// `stfld`: a value is stored into an instance field
    StoreField(FieldStore),
}
