//! Metadata reading for .NET PE files.
//!
//! This module holds the read-only ECMA-335 reader that turns a PE image into a [`Module`]:
//! the types a module declares, their base types, interfaces, fields and methods, and the object
//! constructions and field stores inside method bodies.
//!
//! # Key Components
//!
//! - [`module`] - The loaded [`Module`] and type lookup
//! - [`typesystem`] - [`TypeRef`](typesystem::TypeRef) keys and type definitions
//! - [`method`] - Methods, body headers and CIL decoding
//! - [`signatures`] - Field, method and `TypeSpec` signature parsing
//! - [`streams`] - Metadata streams (`#~`, `#Strings`, `#Blob`, `#GUID`)
//! - [`tables`] - Row layouts of the metadata tables
//! - [`token`] - Metadata table row references
//!
//! # Examples
//!
//! ```rust,no_run
//! use dotscope_uml::Module;
//!
//! let module = Module::from_file("tests/samples/Shop.dll".as_ref())?;
//! println!("Module: {}", module.name());
//! println!("Types: {}", module.types().len());
//! # Ok::<(), dotscope_uml::Error>(())
//! ```

pub mod cor20header;
pub(crate) mod loader;
pub mod method;
pub mod module;
pub mod root;
pub mod signatures;
pub mod streams;
pub mod tables;
pub mod token;
pub mod typesystem;

pub use module::Module;
