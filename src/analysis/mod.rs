//! Relationship extraction over a loaded [`crate::Module`].
//!
//! The analysis turns the types of one module into a [`ParsedAssembly`]: every class and
//! interface of the program, with the relationships a class diagram draws between them.
//!
//! # Architecture
//!
//! - [`filter`] - which namespaces belong to the program
//! - [`classifier`] - class / interface / ignored, constructors versus methods
//! - [`interfaces`] - reduction of declared interfaces to those a type adds itself
//! - [`relationships`] - using, aggregation, composition and inheritance of a class
//! - [`builder`] - drives the above over a module and checks the result
//! - [`batch`] - many images in parallel
//!
//! # Usage
//!
//! ```rust,no_run
//! use dotscope_uml::{AnalyzerConfig, ParsedAssembly};
//!
//! let parsed = ParsedAssembly::from_file("Shop.dll".as_ref(), &AnalyzerConfig::default())?;
//! for edge in parsed.relationships() {
//!     println!("{} --{}--> {}", edge.source, edge.kind, edge.target);
//! }
//! # Ok::<(), dotscope_uml::Error>(())
//! ```

pub mod batch;
pub mod builder;
pub mod classifier;
pub mod filter;
pub mod interfaces;
pub mod model;
pub mod relationships;

pub use batch::{analyze_files, analyze_images};
pub use builder::AssemblyBuilder;
pub use filter::NamespaceFilter;
pub use model::{
    ParsedAssembly, ParsedType, Relationship, RelationshipKind, RelationshipSet, TypeKind,
};
