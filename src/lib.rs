// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # dotscope-uml
//!
//! Reconstructs the class diagram of a .NET program from its compiled assemblies. Built in pure
//! Rust on a small read-only ECMA-335 reader, `dotscope-uml` loads a PE image, walks the types,
//! signatures and method bodies of its module, and reports for every class of the program how
//! it relates to other types.
//!
//! ## Relationships
//!
//! - **Inheritance** - the parent class, or the interfaces a class implements directly
//! - **Composition** - types a constructor stores into a field
//! - **Aggregation** - types an ordinary method constructs
//! - **Using** - parameter types of methods, and constructor parameters that are not stored
//!
//! Interfaces that are already implemented by the parent class, or implied by another
//! implemented interface, are removed so that the diagram draws each realization once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dotscope_uml::prelude::*;
//!
//! let parsed = ParsedAssembly::from_file("Shop.dll".as_ref(), &AnalyzerConfig::default())?;
//! for class in parsed.classes() {
//!     println!("{} : {:?}", class.name(), class.parent_name());
//!     for kind in [RelationshipKind::Composes, RelationshipKind::Aggregates] {
//!         println!("  {kind}: {:?}", class.relationships().names(kind));
//!     }
//! }
//! # Ok::<(), dotscope_uml::Error>(())
//! ```
//!
//! Modules can also be built in memory, without a PE image:
//!
//! ```rust
//! use dotscope_uml::prelude::*;
//!
//! let wheel = TypeRef::new("Shop.Wheel", "Shop");
//! let car = TypeDefinition::class("Shop", "Car")
//!     .with_base(TypeRef::new("System.Object", "System.Runtime"))
//!     .with_method(MethodDefinition::method("Shop.Car", "Mount").with_param(wheel));
//!
//! let module = Module::new("Shop").with_type(car);
//! let parsed = ParsedAssembly::from_module(&module, &AnalyzerConfig::default())?;
//!
//! let car = parsed.class("Shop.Car").unwrap();
//! assert_eq!(car.relationships().names(RelationshipKind::Uses), vec!["Shop.Wheel"]);
//! # Ok::<(), dotscope_uml::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - PE / ECMA-335 reader producing a [`Module`]
//! - [`analysis`] - relationship extraction producing a [`ParsedAssembly`]
//! - [`AnalyzerConfig`] - which namespaces belong to the program
//! - [`Error`] and [`Result`] - error handling
//!
//! The library emits `tracing` events and never installs a subscriber.

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

#[cfg(test)]
pub(crate) mod test;

pub mod analysis;
pub mod config;
pub mod metadata;
pub mod prelude;

/// `dotscope-uml` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `dotscope-uml` Error type
///
/// # Examples
///
/// ```rust,no_run
/// use dotscope_uml::{Error, Module};
///
/// match Module::from_file(std::path::Path::new("Shop.dll")) {
///     Ok(module) => println!("Loaded {}", module.name()),
///     Err(Error::ModuleLoad { name, source }) => println!("{name} rejected: {source}"),
///     Err(e) => println!("Error: {e}"),
/// }
/// ```
pub use error::Error;

pub use analysis::{ParsedAssembly, ParsedType, Relationship, RelationshipKind, RelationshipSet};
pub use config::AnalyzerConfig;
pub use metadata::module::Module;

/// Low-level access to the PE image and byte streams
pub use file::{parser::Parser, File};
