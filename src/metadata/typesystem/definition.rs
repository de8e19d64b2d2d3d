use crate::metadata::{
    method::MethodDefinition,
    token::Token,
    typesystem::{FieldDefinition, TypeAttributes, TypeRef},
};

/// A type declared in a [`crate::Module`]
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    /// The `TypeDef` token, zero for types built in memory
    pub token: Token,
    /// Namespace of the type; empty for nested types and the global namespace
    pub namespace: String,
    /// Simple name
    pub name: String,
    /// Full name of the enclosing type, for nested types
    pub enclosing: Option<String>,
    /// The `TypeAttributes` of this type
    pub flags: TypeAttributes,
    /// The declared base type, `None` for interfaces and `System.Object` itself
    pub base: Option<TypeRef>,
    /// The declared interfaces, in declaration order
    pub interfaces: Vec<TypeRef>,
    /// Fields, in declaration order
    pub fields: Vec<FieldDefinition>,
    /// Methods and constructors, in declaration order
    pub methods: Vec<MethodDefinition>,
}

impl TypeDefinition {
    /// A public class without base type or members
    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDefinition {
            token: Token::new(0),
            namespace: namespace.into(),
            name: name.into(),
            enclosing: None,
            flags: TypeAttributes::PUBLIC,
            base: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// A public interface without members
    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::class(namespace, name)
            .with_flags(TypeAttributes::PUBLIC | TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT)
    }

    /// Replace the type attributes
    #[must_use]
    pub fn with_flags(mut self, flags: TypeAttributes) -> Self {
        self.flags = flags;
        self
    }

    /// Set the base type
    #[must_use]
    pub fn with_base(mut self, base: TypeRef) -> Self {
        self.base = Some(base);
        self
    }

    /// Add a declared interface
    #[must_use]
    pub fn with_interface(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a field
    #[must_use]
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a method or constructor
    #[must_use]
    pub fn with_method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }

    /// Nest this type inside the type named `enclosing`
    #[must_use]
    pub fn nested_in(mut self, enclosing: impl Into<String>) -> Self {
        self.enclosing = Some(enclosing.into());
        self.namespace.clear();
        self
    }

    /// The qualified name: `Namespace.Name`, or `Outer/Inner` for nested types
    #[must_use]
    pub fn fullname(&self) -> String {
        match &self.enclosing {
            Some(enclosing) => format!("{}/{}", enclosing, self.name),
            None if self.namespace.is_empty() => self.name.clone(),
            None => format!("{}.{}", self.namespace, self.name),
        }
    }

    /// True for interfaces
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags.contains(TypeAttributes::INTERFACE)
    }

    /// True for enums, types extending `System.Enum`
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.base
            .as_ref()
            .is_some_and(|base| base.name() == "System.Enum")
    }

    /// True for value types, types extending `System.ValueType` or `System.Enum`
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        self.is_enum()
            || self
                .base
                .as_ref()
                .is_some_and(|base| base.name() == "System.ValueType")
    }

    /// A reference to this type as defined in `module`
    #[must_use]
    pub fn type_ref(&self, module: &str) -> TypeRef {
        let reference = TypeRef::new(self.fullname(), module);
        if self.is_value_type() {
            reference.as_value_type()
        } else {
            reference
        }
    }
}
