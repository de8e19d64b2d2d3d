//! Relationship extraction for a single class.
//!
//! Four independent passes fill the [`RelationshipSet`] of a class `T`:
//!
//! | Pass        | Scanned                | Evidence                                    |
//! |-------------|------------------------|---------------------------------------------|
//! | using       | ordinary methods       | non-generic reference-type parameters       |
//! | aggregation | ordinary method bodies | `newobj` of a non-generic type              |
//! | composition | constructor bodies     | `stfld` of a non-generic reference type     |
//! | inheritance | -                      | the parent class, else the final interfaces |
//!
//! Constructor parameters that are not stored into a field count as using. Static methods are
//! ordinary methods. `T` itself is never a target.

use crate::{
    analysis::model::{RelationshipKind, RelationshipSet},
    metadata::{
        method::{Instruction, MethodDefinition},
        typesystem::TypeRef,
    },
};

/// The members and supertypes of a class relationships are extracted from
#[derive(Debug, Clone, Copy)]
pub struct ClassShape<'a> {
    /// The class itself
    pub this: &'a TypeRef,
    /// The parent class, if it is not `System.Object`
    pub parent: Option<&'a TypeRef>,
    /// The deduplicated declared interfaces
    pub interfaces: &'a [TypeRef],
    /// Instance constructors and the type initializer
    pub constructors: &'a [MethodDefinition],
    /// All other methods
    pub methods: &'a [MethodDefinition],
}

/// Relationships of `class`
#[must_use]
pub fn extract(class: &ClassShape) -> RelationshipSet {
    let mut set = RelationshipSet::default();

    using(class, &mut set);
    aggregation(class, &mut set);
    composition(class, &mut set);
    inheritance(class, &mut set);

    set
}

fn is_plain_reference(ty: &TypeRef) -> bool {
    !ty.is_value_type() && !ty.is_generic_instance() && !ty.is_generic_parameter()
}

fn add(class: &ClassShape, set: &mut RelationshipSet, kind: RelationshipKind, target: &TypeRef) {
    if target != class.this {
        set.insert(kind, target.clone());
    }
}

fn using(class: &ClassShape, set: &mut RelationshipSet) {
    for method in class.methods {
        for param in method.params.iter().filter(|param| is_plain_reference(param)) {
            add(class, set, RelationshipKind::Uses, param);
        }
    }
}

fn aggregation(class: &ClassShape, set: &mut RelationshipSet) {
    for method in class.methods {
        for instruction in method.instructions.iter().flatten() {
            if let Instruction::Construct(ty) = instruction {
                if !ty.is_generic_instance() {
                    add(class, set, RelationshipKind::Aggregates, ty);
                }
            }
        }
    }
}

fn composition(class: &ClassShape, set: &mut RelationshipSet) {
    for constructor in class.constructors {
        for instruction in constructor.instructions.iter().flatten() {
            let Instruction::StoreField(store) = instruction else {
                continue;
            };

            match &store.field_type {
                Some(ty) if !store.is_value_type && is_plain_reference(ty) => {
                    add(class, set, RelationshipKind::Composes, ty);
                }
                _ => {}
            }
        }

        for param in constructor.params.iter().filter(|param| is_plain_reference(param)) {
            if !set.composes().contains(param) {
                add(class, set, RelationshipKind::Uses, param);
            }
        }
    }
}

fn inheritance(class: &ClassShape, set: &mut RelationshipSet) {
    match class.parent {
        Some(parent) => add(class, set, RelationshipKind::Inherits, parent),
        None => {
            for interface in class.interfaces {
                add(class, set, RelationshipKind::Inherits, interface);
            }
        }
    }
}
