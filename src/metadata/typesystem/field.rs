use crate::metadata::typesystem::TypeRef;

/// A field declared by a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// The field name
    pub name: String,
    /// The declared type, `None` if its signature could not be resolved
    pub ty: Option<TypeRef>,
    /// True if the field holds a value type (including primitives)
    pub is_value_type: bool,
}

impl FieldDefinition {
    /// A field of the named type `ty`
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        FieldDefinition {
            name: name.into(),
            is_value_type: ty.is_value_type(),
            ty: Some(ty),
        }
    }

    /// A field whose declared type is unknown
    pub fn unnamed(name: impl Into<String>, is_value_type: bool) -> Self {
        FieldDefinition {
            name: name.into(),
            ty: None,
            is_value_type,
        }
    }
}
