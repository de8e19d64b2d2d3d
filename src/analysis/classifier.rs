//! Classification of module types into classes, interfaces and ignored types.

use tracing::trace;

use crate::{
    analysis::{filter::NamespaceFilter, model::TypeKind},
    metadata::{method::MethodDefinition, typesystem::TypeDefinition},
};

/// The kind under which `ty` is modeled, or `None` if it is not modeled.
///
/// Interfaces and reference-kind classes in a program namespace are modeled; enums, other
/// value types and types outside the program's namespaces are not.
///
/// Nested types (`Outer/Inner`) carry their own, empty metadata namespace rather than the
/// namespace of the enclosing type, so they are never modeled.
#[must_use]
pub fn classify(ty: &TypeDefinition, filter: &NamespaceFilter) -> Option<TypeKind> {
    let kind = if !filter.is_in_scope(&ty.namespace) {
        None
    } else if ty.is_interface() {
        Some(TypeKind::Interface)
    } else if ty.is_value_type() {
        None
    } else {
        Some(TypeKind::Class)
    };

    trace!(name = %ty.fullname(), ?kind, "classified type");
    kind
}

/// Split the methods of a type into constructors and ordinary methods, keeping declaration
/// order
#[must_use]
pub fn partition_methods(ty: &TypeDefinition) -> (Vec<&MethodDefinition>, Vec<&MethodDefinition>) {
    ty.methods.iter().partition(|method| method.is_constructor())
}
