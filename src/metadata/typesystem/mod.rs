//! Types as seen by the relationship engine.
//!
//! [`TypeRef`] is the lookup key used everywhere a type is referenced: a qualified name plus the
//! identity of the module that defines it. [`TypeDefinition`] and [`FieldDefinition`] own the
//! decoded shape of a type declared in a [`crate::Module`].
//!
//! All of these can be built in memory, which is how callers that already own a metadata model
//! feed the analysis without a PE image.

mod attributes;
mod definition;
mod field;
mod typeref;

pub use attributes::TypeAttributes;
pub use definition::TypeDefinition;
pub use field::FieldDefinition;
pub use typeref::TypeRef;
