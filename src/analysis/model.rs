//! The analysis result: parsed types, their relationship sets and the parsed assembly.
//!
//! Everything here is owned and keeps declaration order, so two runs over the same image
//! produce identical output.

use indexmap::IndexSet;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::metadata::{
    method::MethodDefinition,
    typesystem::{FieldDefinition, TypeRef},
};

/// What a modeled type is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TypeKind {
    /// A reference-kind class
    Class,
    /// An interface
    Interface,
}

/// The kind of a relationship from one class to another type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum RelationshipKind {
    /// The type is a parameter of one of the class's methods
    Uses,
    /// The class constructs instances of the type outside of its constructors
    Aggregates,
    /// The class's constructors store instances of the type into fields
    Composes,
    /// The type is the parent class, or one of the directly implemented interfaces
    Inherits,
}

/// The four relationship sets of a class, each in insertion order and free of duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipSet {
    uses: IndexSet<TypeRef>,
    aggregates: IndexSet<TypeRef>,
    composes: IndexSet<TypeRef>,
    inherits: IndexSet<TypeRef>,
}

impl RelationshipSet {
    /// Types the class uses
    #[must_use]
    pub fn uses(&self) -> &IndexSet<TypeRef> {
        &self.uses
    }

    /// Types the class aggregates
    #[must_use]
    pub fn aggregates(&self) -> &IndexSet<TypeRef> {
        &self.aggregates
    }

    /// Types the class is composed of
    #[must_use]
    pub fn composes(&self) -> &IndexSet<TypeRef> {
        &self.composes
    }

    /// The parent class, or the directly implemented interfaces
    #[must_use]
    pub fn inherits(&self) -> &IndexSet<TypeRef> {
        &self.inherits
    }

    /// The set of `kind`
    #[must_use]
    pub fn get(&self, kind: RelationshipKind) -> &IndexSet<TypeRef> {
        match kind {
            RelationshipKind::Uses => &self.uses,
            RelationshipKind::Aggregates => &self.aggregates,
            RelationshipKind::Composes => &self.composes,
            RelationshipKind::Inherits => &self.inherits,
        }
    }

    /// Qualified names of the set of `kind`, in insertion order
    #[must_use]
    pub fn names(&self, kind: RelationshipKind) -> Vec<&str> {
        self.get(kind).iter().map(TypeRef::name).collect()
    }

    /// True if no set holds a type
    #[must_use]
    pub fn is_empty(&self) -> bool {
        RelationshipKind::iter().all(|kind| self.get(kind).is_empty())
    }

    /// All `(kind, target)` pairs, grouped by kind
    pub fn iter(&self) -> impl Iterator<Item = (RelationshipKind, &TypeRef)> {
        RelationshipKind::iter()
            .flat_map(move |kind| self.get(kind).iter().map(move |target| (kind, target)))
    }

    /// Add `target` to the set of `kind`; returns false if it was already present
    pub(crate) fn insert(&mut self, kind: RelationshipKind, target: TypeRef) -> bool {
        match kind {
            RelationshipKind::Uses => self.uses.insert(target),
            RelationshipKind::Aggregates => self.aggregates.insert(target),
            RelationshipKind::Composes => self.composes.insert(target),
            RelationshipKind::Inherits => self.inherits.insert(target),
        }
    }
}

/// One modeled class or interface
#[derive(Debug, Clone)]
pub struct ParsedType {
    pub(crate) type_ref: TypeRef,
    pub(crate) kind: TypeKind,
    pub(crate) parent: Option<TypeRef>,
    pub(crate) interfaces: Vec<TypeRef>,
    pub(crate) fields: Vec<FieldDefinition>,
    pub(crate) constructors: Vec<MethodDefinition>,
    pub(crate) methods: Vec<MethodDefinition>,
    pub(crate) relationships: RelationshipSet,
}

impl ParsedType {
    /// The qualified name
    #[must_use]
    pub fn name(&self) -> &str {
        self.type_ref.name()
    }

    /// Reference to this type
    #[must_use]
    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// Class or interface
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// The parent class; `None` for interfaces and classes deriving from `System.Object`
    #[must_use]
    pub fn parent(&self) -> Option<&TypeRef> {
        self.parent.as_ref()
    }

    /// Qualified name of the parent class
    #[must_use]
    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_ref().map(TypeRef::name)
    }

    /// Declared interfaces; for classes without those already implemented by the parent or
    /// implied by another declared interface
    #[must_use]
    pub fn interfaces(&self) -> &[TypeRef] {
        &self.interfaces
    }

    /// Qualified names of [`ParsedType::interfaces`]
    #[must_use]
    pub fn interface_names(&self) -> Vec<&str> {
        self.interfaces.iter().map(TypeRef::name).collect()
    }

    /// Fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Instance constructors and the type initializer
    #[must_use]
    pub fn constructors(&self) -> &[MethodDefinition] {
        &self.constructors
    }

    /// All methods that are not constructors
    #[must_use]
    pub fn methods(&self) -> &[MethodDefinition] {
        &self.methods
    }

    /// The relationships of a class; always empty for interfaces
    #[must_use]
    pub fn relationships(&self) -> &RelationshipSet {
        &self.relationships
    }
}

/// A single edge of the class diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship<'a> {
    /// The class the relationship starts at
    pub source: &'a TypeRef,
    /// The kind of relationship
    pub kind: RelationshipKind,
    /// The referenced type
    pub target: &'a TypeRef,
}

/// The structural model of one analyzed module
#[derive(Debug, Clone)]
pub struct ParsedAssembly {
    pub(crate) file_name: String,
    pub(crate) module: String,
    pub(crate) mvid: Option<uguid::Guid>,
    pub(crate) sha1: Option<String>,
    pub(crate) classes: Vec<ParsedType>,
    pub(crate) interfaces: Vec<ParsedType>,
}

impl ParsedAssembly {
    /// Name of the analyzed file; the module name for modules built in memory
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Identity of the analyzed module
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module
    }

    /// The module version id
    #[must_use]
    pub fn mvid(&self) -> Option<uguid::Guid> {
        self.mvid
    }

    /// Hex encoded SHA-1 of the analyzed image
    #[must_use]
    pub fn sha1(&self) -> Option<&str> {
        self.sha1.as_deref()
    }

    /// Modeled classes, in declaration order
    #[must_use]
    pub fn classes(&self) -> &[ParsedType] {
        &self.classes
    }

    /// Modeled interfaces, in declaration order
    #[must_use]
    pub fn interfaces(&self) -> &[ParsedType] {
        &self.interfaces
    }

    /// Look up a class by qualified name
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ParsedType> {
        self.classes.iter().find(|ty| ty.name() == name)
    }

    /// Look up an interface by qualified name
    #[must_use]
    pub fn interface(&self, name: &str) -> Option<&ParsedType> {
        self.interfaces.iter().find(|ty| ty.name() == name)
    }

    /// Every relationship of every class, in class order
    #[must_use]
    pub fn relationships(&self) -> Vec<Relationship<'_>> {
        self.classes
            .iter()
            .flat_map(|class| {
                class
                    .relationships
                    .iter()
                    .map(move |(kind, target)| Relationship {
                        source: &class.type_ref,
                        kind,
                        target,
                    })
            })
            .collect()
    }
}
