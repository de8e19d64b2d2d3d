//! Methods, their bodies and the instructions the analysis looks at.
//!
//! A [`MethodDefinition`] carries the parameter types of a method and, if the method has a body,
//! the resolved [`Instruction`]s found in it. The [`decoder`] walks a raw CIL stream;
//! [`MethodBody`] locates that stream behind a tiny or fat header.

mod body;
pub mod decoder;
mod instruction;
mod types;

pub use body::MethodBody;
pub use instruction::{FieldStore, Instruction};
pub use types::{MethodBodyFlags, MethodModifiers};

use crate::metadata::{token::Token, typesystem::TypeRef};

/// A method or constructor declared by a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDefinition {
    /// The `MethodDef` token, zero for methods built in memory
    pub token: Token,
    /// Full name of the declaring type
    pub declaring_type: String,
    /// The method name
    pub name: String,
    /// The `MethodAttributes` of this method
    pub flags: MethodModifiers,
    /// Parameter types in declaration order, one per parameter; `ref` parameters as their
    /// referenced type
    pub params: Vec<TypeRef>,
    /// The resolved instructions, `None` if the method has no body
    pub instructions: Option<Vec<Instruction>>,
}

impl MethodDefinition {
    /// A public instance method without parameters or body
    pub fn method(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        MethodDefinition {
            token: Token::new(0),
            declaring_type: declaring_type.into(),
            name: name.into(),
            flags: MethodModifiers::PUBLIC | MethodModifiers::HIDE_BY_SIG,
            params: Vec::new(),
            instructions: None,
        }
    }

    /// A public instance constructor (`.ctor`) without parameters or body
    pub fn constructor(declaring_type: impl Into<String>) -> Self {
        let mut method = Self::method(declaring_type, ".ctor");
        method.flags |= MethodModifiers::SPECIAL_NAME | MethodModifiers::RTSPECIAL_NAME;
        method
    }

    /// The type initializer (`.cctor`) without body
    pub fn type_initializer(declaring_type: impl Into<String>) -> Self {
        let mut method = Self::constructor(declaring_type);
        method.name = ".cctor".to_string();
        method.flags = MethodModifiers::PRIVATE
            | MethodModifiers::STATIC
            | MethodModifiers::SPECIAL_NAME
            | MethodModifiers::RTSPECIAL_NAME;
        method
    }

    /// Mark the method as static
    #[must_use]
    pub fn with_static(mut self) -> Self {
        self.flags |= MethodModifiers::STATIC;
        self
    }

    /// Add a parameter
    #[must_use]
    pub fn with_param(mut self, param: TypeRef) -> Self {
        self.params.push(param);
        self
    }

    /// Attach a body with the given instructions
    #[must_use]
    pub fn with_body(mut self, instructions: Vec<Instruction>) -> Self {
        self.instructions = Some(instructions);
        self
    }

    /// True for instance constructors and type initializers
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.flags
            .contains(MethodModifiers::SPECIAL_NAME | MethodModifiers::RTSPECIAL_NAME)
            && (self.name == ".ctor" || self.name == ".cctor")
    }

    /// True for static methods
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodModifiers::STATIC)
    }

    /// True if the method has a body
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.instructions.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_flags() {
        assert!(MethodDefinition::constructor("Shop.Car").is_constructor());
        assert!(MethodDefinition::type_initializer("Shop.Car").is_constructor());
        assert!(MethodDefinition::type_initializer("Shop.Car").is_static());
        assert!(!MethodDefinition::method("Shop.Car", "Drive").is_constructor());

        // the name alone does not make a constructor
        assert!(!MethodDefinition::method("Shop.Car", ".ctor").is_constructor());
    }

    #[test]
    fn body() {
        let method = MethodDefinition::method("Shop.Car", "Drive");
        assert!(!method.has_body());

        let wheel = TypeRef::new("Shop.Wheel", "Shop");
        let method = method
            .with_param(wheel.clone())
            .with_body(vec![Instruction::Construct(wheel.clone())]);
        assert!(method.has_body());
        assert_eq!(method.params, vec![wheel]);
    }
}
