//! A loaded .NET module.
//!
//! [`Module`] is the reader's output: the identity of the image and every type it declares,
//! with base type, interfaces, fields and methods already resolved into [`TypeRef`]s. It is also
//! the input of the relationship analysis, and can be assembled in memory with
//! [`Module::new`] and [`Module::with_type`].
//!
//! # Example
//!
//! ```rust,no_run
//! use dotscope_uml::Module;
//! use std::path::Path;
//!
//! let module = Module::from_file(Path::new("tests/samples/Shop.dll"))?;
//! for ty in module.types() {
//!     println!("{} ({} methods)", ty.fullname(), ty.methods.len());
//! }
//! # Ok::<(), dotscope_uml::Error>(())
//! ```

use std::{collections::HashMap, path::Path};

use sha1::{Digest, Sha1};

use crate::{
    file::File,
    metadata::{
        loader,
        typesystem::{TypeDefinition, TypeRef},
    },
    Result,
};

/// Name used for images loaded from memory without a file name
const MEMORY_IMAGE: &str = "<memory>";

/// A module and the types it declares
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    file_name: Option<String>,
    mvid: Option<uguid::Guid>,
    sha1: Option<String>,
    types: Vec<TypeDefinition>,
    lookup: HashMap<String, usize>,
}

impl Module {
    /// An empty module with the identity `name`
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            file_name: None,
            mvid: None,
            sha1: None,
            types: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Load the module contained in the PE image at `path`
    ///
    /// # Errors
    /// Returns [`crate::Error::ModuleLoad`] if the file can not be read or is not a valid
    /// .NET image
    pub fn from_file(path: &Path) -> Result<Module> {
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());

        File::from_file(path)
            .and_then(|file| Self::load(&file, &file_name))
            .map_err(|error| error.into_module_load(&file_name))
    }

    /// Load the module contained in the PE image `data`
    ///
    /// # Errors
    /// Returns [`crate::Error::ModuleLoad`] if `data` is not a valid .NET image
    pub fn from_mem(data: Vec<u8>) -> Result<Module> {
        Self::from_mem_named(data, MEMORY_IMAGE)
    }

    /// Load the module contained in the PE image `data`, reporting it as `file_name`
    ///
    /// # Errors
    /// Returns [`crate::Error::ModuleLoad`] if `data` is not a valid .NET image
    pub fn from_mem_named(data: Vec<u8>, file_name: &str) -> Result<Module> {
        File::from_mem(data)
            .and_then(|file| Self::load(&file, file_name))
            .map_err(|error| error.into_module_load(file_name))
    }

    fn load(file: &File, file_name: &str) -> Result<Module> {
        let mut module = loader::load(file)?;
        module.file_name = Some(file_name.to_string());
        module.sha1 = Some(format!("{:x}", Sha1::digest(file.data())));
        Ok(module)
    }

    /// Set the module version id
    #[must_use]
    pub fn with_mvid(mut self, mvid: uguid::Guid) -> Self {
        self.mvid = Some(mvid);
        self
    }

    /// Set the file name
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Add a type
    #[must_use]
    pub fn with_type(mut self, ty: TypeDefinition) -> Self {
        self.add_type(ty);
        self
    }

    /// Add a type; a later type with the same full name shadows the earlier one in lookups
    pub fn add_type(&mut self, ty: TypeDefinition) {
        self.lookup.insert(ty.fullname(), self.types.len());
        self.types.push(ty);
    }

    /// Identity of the module: the assembly name, or the module name for modules without an
    /// assembly manifest
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the file the module was loaded from
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The module version id
    #[must_use]
    pub fn mvid(&self) -> Option<uguid::Guid> {
        self.mvid
    }

    /// Hex encoded SHA-1 of the image, for modules loaded from a PE image
    #[must_use]
    pub fn sha1(&self) -> Option<&str> {
        self.sha1.as_deref()
    }

    /// All types in declaration order
    #[must_use]
    pub fn types(&self) -> &[TypeDefinition] {
        &self.types
    }

    /// Look up a type of this module by its full name
    #[must_use]
    pub fn get(&self, fullname: &str) -> Option<&TypeDefinition> {
        self.lookup.get(fullname).map(|index| &self.types[*index])
    }

    /// Resolve `reference` to its definition, if it is defined in this module.
    ///
    /// Generic instances resolve to their generic definition. References into other modules
    /// resolve to `None`.
    #[must_use]
    pub fn resolve(&self, reference: &TypeRef) -> Option<&TypeDefinition> {
        if reference.module() != self.name {
            return None;
        }

        self.get(reference.definition_name())
    }
}
