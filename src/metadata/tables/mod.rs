//! Metadata tables of the `#~` stream, ECMA-335 II.22.
//!
//! The layout of every table from `Module` (0x00) to `GenericParamConstraint` (0x2C) is known
//! to [`TableInfo`], so the position of any table inside the stream can be computed. Only the
//! tables needed to rebuild types, members and their references have a row type implementing
//! [`RowReadable`]:
//!
//! - [`ModuleRaw`], [`TypeRefRaw`], [`TypeDefRaw`], [`FieldRaw`], [`MethodDefRaw`]
//! - [`InterfaceImplRaw`], [`MemberRefRaw`], [`ModuleRefRaw`], [`TypeSpecRaw`]
//! - [`AssemblyRaw`], [`AssemblyRefRaw`], [`NestedClassRaw`]
//!
//! Rows are decoded lazily: a [`MetadataTable`] is only a typed view over the raw bytes.

mod assembly;
mod assemblyref;
mod codedindex;
mod field;
mod interfaceimpl;
mod memberref;
mod methoddef;
mod module;
mod moduleref;
mod nestedclass;
mod tableinfo;
mod typedef;
mod typeref;
mod typespec;

use std::marker::PhantomData;

use strum::{EnumCount, EnumIter, FromRepr};

use crate::Result;

pub use assembly::AssemblyRaw;
pub use assemblyref::AssemblyRefRaw;
pub use codedindex::{CodedIndex, CodedIndexType};
pub use field::FieldRaw;
pub use interfaceimpl::InterfaceImplRaw;
pub use memberref::MemberRefRaw;
pub use methoddef::MethodDefRaw;
pub use module::ModuleRaw;
pub use moduleref::ModuleRefRaw;
pub use nestedclass::NestedClassRaw;
pub use tableinfo::{TableInfo, TableInfoRef, TableRowInfo};
pub use typedef::TypeDefRaw;
pub use typeref::TypeRefRaw;
pub use typespec::TypeSpecRaw;

/// Identifier of a metadata table, the value is the table number used in tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum TableId {
    Module = 0x00,
    TypeRef = 0x01,
    TypeDef = 0x02,
    FieldPtr = 0x03,
    Field = 0x04,
    MethodPtr = 0x05,
    MethodDef = 0x06,
    ParamPtr = 0x07,
    Param = 0x08,
    InterfaceImpl = 0x09,
    MemberRef = 0x0A,
    Constant = 0x0B,
    CustomAttribute = 0x0C,
    FieldMarshal = 0x0D,
    DeclSecurity = 0x0E,
    ClassLayout = 0x0F,
    FieldLayout = 0x10,
    StandAloneSig = 0x11,
    EventMap = 0x12,
    EventPtr = 0x13,
    Event = 0x14,
    PropertyMap = 0x15,
    PropertyPtr = 0x16,
    Property = 0x17,
    MethodSemantics = 0x18,
    MethodImpl = 0x19,
    ModuleRef = 0x1A,
    TypeSpec = 0x1B,
    ImplMap = 0x1C,
    FieldRVA = 0x1D,
    EncLog = 0x1E,
    EncMap = 0x1F,
    Assembly = 0x20,
    AssemblyProcessor = 0x21,
    AssemblyOS = 0x22,
    AssemblyRef = 0x23,
    AssemblyRefProcessor = 0x24,
    AssemblyRefOS = 0x25,
    File = 0x26,
    ExportedType = 0x27,
    ManifestResource = 0x28,
    NestedClass = 0x29,
    GenericParam = 0x2A,
    MethodSpec = 0x2B,
    GenericParamConstraint = 0x2C,
}

/// A row type that can be decoded from a metadata table
pub trait RowReadable: Sized {
    /// The table holding rows of this type
    const TABLE: TableId;

    /// Decode one row at `offset`, advancing `offset` past it
    ///
    /// # Arguments
    /// * `data`    - The raw bytes of the table
    /// * `offset`  - Position of the row, updated after reading
    /// * `rid`     - The 1-based row id of this row
    /// * `sizes`   - Heap and table index widths of the image
    ///
    /// # Errors
    /// Returns an error if the row extends past `data` or holds an invalid coded index
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self>;
}

/// Typed, lazily decoded view over the rows of one table
pub struct MetadataTable<'a, T> {
    data: &'a [u8],
    row_count: u32,
    row_size: u32,
    sizes: TableInfoRef,
    _phantom: PhantomData<T>,
}

impl<'a, T: RowReadable> MetadataTable<'a, T> {
    /// Create a view over `row_count` rows stored in `data`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` can not hold all rows
    pub fn new(data: &'a [u8], row_count: u32, sizes: TableInfoRef) -> Result<Self> {
        let row_size = sizes.row_size(T::TABLE);
        if u64::from(row_count) * u64::from(row_size) > data.len() as u64 {
            return Err(out_of_bounds_error!());
        }

        Ok(MetadataTable {
            data,
            row_count,
            row_size,
            sizes,
            _phantom: PhantomData,
        })
    }

    /// Number of rows in this table
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Size of a single row in bytes
    #[must_use]
    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    /// Get the row with the 1-based id `rid`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for row 0 or a row past the end of the table
    pub fn get(&self, rid: u32) -> Result<T> {
        if rid == 0 || rid > self.row_count {
            return Err(out_of_bounds_error!());
        }

        let mut offset = (rid as usize - 1) * self.row_size as usize;
        T::row_read(self.data, &mut offset, rid, &self.sizes)
    }

    /// Iterate over all rows in table order
    #[must_use]
    pub fn iter(&self) -> TableIterator<'_, 'a, T> {
        TableIterator {
            table: self,
            current_row: 0,
            current_offset: 0,
        }
    }
}

impl<'t, 'a, T: RowReadable> IntoIterator for &'t MetadataTable<'a, T> {
    type Item = Result<T>;
    type IntoIter = TableIterator<'t, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the rows of a [`MetadataTable`]; stops after the first decoding error
pub struct TableIterator<'t, 'a, T> {
    table: &'t MetadataTable<'a, T>,
    current_row: u32,
    current_offset: usize,
}

impl<T: RowReadable> Iterator for TableIterator<'_, '_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.table.row_count {
            return None;
        }

        let result = T::row_read(
            self.table.data,
            &mut self.current_offset,
            self.current_row + 1,
            &self.table.sizes,
        );

        match result {
            Ok(row) => {
                self.current_row += 1;
                Some(Ok(row))
            }
            Err(error) => {
                self.current_row = self.table.row_count;
                Some(Err(error))
            }
        }
    }
}
