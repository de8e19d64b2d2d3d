//! Reduction of declared interfaces.
//!
//! Metadata lists every interface a type implements, including the ones it only inherits. The
//! model keeps the interfaces a type adds itself: an interface is dropped when the parent class
//! already implements it, or when another declared interface extends it.

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::metadata::{module::Module, typesystem::TypeRef};

/// Reduce the interfaces a type declares to those it adds itself.
///
/// Metadata lists every interface a type implements, including the ones inherited through
/// other interfaces. What remains here:
/// 1. interfaces also declared by the parent class are dropped
/// 2. interfaces that another remaining interface itself declares are dropped
///
/// Interfaces that can not be resolved in `module` imply nothing. Declaration order is kept.
#[must_use]
pub fn deduplicate(
    module: &Module,
    declared: &[TypeRef],
    parent_declared: &[TypeRef],
) -> Vec<TypeRef> {
    let inherited: HashSet<&TypeRef> = parent_declared.iter().collect();

    let remaining: IndexSet<&TypeRef> = declared
        .iter()
        .filter(|interface| !inherited.contains(interface))
        .collect();

    let redundant: HashSet<&str> = remaining
        .iter()
        .filter_map(|interface| module.resolve(interface))
        .flat_map(|definition| definition.interfaces.iter().map(TypeRef::name))
        .collect();

    remaining
        .into_iter()
        .filter(|interface| !redundant.contains(interface.name()))
        .cloned()
        .collect()
}
