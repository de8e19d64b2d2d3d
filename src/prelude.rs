//! # dotscope-uml Prelude
//!
//! The types needed to load modules, build them in memory and analyze them.

pub use crate::{Error, Result};

pub use crate::{AnalyzerConfig, Module};

pub use crate::analysis::{
    analyze_files, analyze_images, ParsedAssembly, ParsedType, Relationship, RelationshipKind,
    RelationshipSet, TypeKind,
};

pub use crate::metadata::{
    method::{FieldStore, Instruction, MethodDefinition},
    token::Token,
    typesystem::{FieldDefinition, TypeAttributes, TypeDefinition, TypeRef},
};
