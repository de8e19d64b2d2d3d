use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// Identity of a type as seen from metadata.
///
/// Two `TypeRef`s are equal when their qualified name and defining module match; the
/// generic-instance, generic-parameter and value-type flags describe the reference and take no
/// part in equality or hashing. A `TypeRef` never owns the definition it names, use
/// [`crate::Module::resolve`] to look it up.
///
/// Qualified names follow the usual metadata rendering: `Namespace.Name`, `Outer/Inner` for
/// nested types, ``Ns.List`1<Ns.Foo>`` for generic instances, `Ns.Foo[]` for arrays and `!0` /
/// `!!0` for generic parameters.
#[derive(Clone)]
pub struct TypeRef {
    name: String,
    module: String,
    arguments: Vec<String>,
    generic_instance: bool,
    generic_parameter: bool,
    value_type: bool,
}

impl TypeRef {
    /// Create a reference to the reference type `name` defined in `module`
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            module: module.into(),
            arguments: Vec::new(),
            generic_instance: false,
            generic_parameter: false,
            value_type: false,
        }
    }

    /// Create a reference to the generic parameter `name` (`!0`, `!!1`) of a type or method in
    /// `module`
    pub fn generic_parameter(name: impl Into<String>, module: impl Into<String>) -> Self {
        TypeRef {
            generic_parameter: true,
            ..TypeRef::new(name, module)
        }
    }

    /// Create a reference to the instantiation of the generic `definition` with `arguments`
    ///
    /// The instance keeps the module and value-type flag of its definition.
    #[must_use]
    pub fn generic_instance(definition: &TypeRef, arguments: Vec<String>) -> Self {
        TypeRef {
            name: format!("{}<{}>", definition.name, arguments.join(",")),
            module: definition.module.clone(),
            arguments,
            generic_instance: true,
            generic_parameter: false,
            value_type: definition.value_type,
        }
    }

    /// Mark this reference as naming a value type
    #[must_use]
    pub fn as_value_type(mut self) -> Self {
        self.value_type = true;
        self
    }

    /// The qualified name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the module defining the type
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Rendered type arguments, empty unless this is a generic instance
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// True for an instantiation of a generic type
    #[must_use]
    pub fn is_generic_instance(&self) -> bool {
        self.generic_instance
    }

    /// True for a type or method generic parameter, which stands for no type of its own
    #[must_use]
    pub fn is_generic_parameter(&self) -> bool {
        self.generic_parameter
    }

    /// True if the referenced type is a value type
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        self.value_type
    }

    /// Name of the generic definition, or the full name for non-generic types
    #[must_use]
    pub fn definition_name(&self) -> &str {
        match self.name.find('<') {
            Some(index) if self.generic_instance => &self.name[..index],
            _ => &self.name,
        }
    }

    /// The namespace part of the name; empty for nested types and the global namespace
    #[must_use]
    pub fn namespace(&self) -> &str {
        let name = self.definition_name();
        if name.contains('/') {
            return "";
        }

        match name.rfind('.') {
            Some(index) => &name[..index],
            None => "",
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.module == other.module
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.module.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}", self.module, self.name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
