use std::sync::Arc;

use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::{read_le, read_le_at},
    metadata::tables::{CodedIndexType, TableId},
    Result,
};

/// Row count of one table and the width of indexes pointing into it
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// The count of rows in this table
    pub rows: u32,
    /// Number of bits required to represent any valid row index
    pub bits: u8,
    /// If the count is > `u16::MAX`, indexes into this table are 4 bytes instead of 2
    pub is_large: bool,
}

impl TableRowInfo {
    /// Creates a new `TableRowInfo` for a table of `rows` rows
    #[must_use]
    pub fn new(rows: u32) -> Self {
        let bits = if rows == 0 {
            1
        } else {
            (32 - rows.leading_zeros()) as u8
        };

        Self {
            rows,
            bits,
            is_large: rows > u32::from(u16::MAX),
        }
    }
}

/// Row counts of all tables plus the resulting heap, table and coded index widths
#[derive(Clone, Debug)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    is_large_index_str: bool,
    is_large_index_guid: bool,
    is_large_index_blob: bool,
}

/// Shared reference to a [`TableInfo`]
pub type TableInfoRef = Arc<TableInfo>;

impl TableInfo {
    /// Parse the row counts that follow the `#~` stream header
    ///
    /// One `u32` count is stored for every bit set in `valid_bitvec`, starting at offset 24.
    /// Counts of tables past `GenericParamConstraint` are consumed but not kept.
    ///
    /// ## Arguments
    /// * `data`            - The `#~` stream, starting with its header
    /// * `valid_bitvec`    - The mask of present tables
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the counts are truncated
    pub fn new(data: &[u8], valid_bitvec: u64) -> Result<Self> {
        let mut rows = vec![TableRowInfo::default(); TableId::COUNT];
        let mut next_row_offset = 24;

        for table in 0..64_usize {
            if (valid_bitvec & (1_u64 << table)) == 0 {
                continue;
            }

            let row_count = read_le_at::<u32>(data, &mut next_row_offset)?;
            if table < TableId::COUNT {
                rows[table] = TableRowInfo::new(row_count);
            }
        }

        let heap_size_flags = read_le::<u8>(data.get(6..).unwrap_or_default())?;
        Ok(Self::with_rows(
            rows,
            heap_size_flags & 0x01 != 0,
            heap_size_flags & 0x02 != 0,
            heap_size_flags & 0x04 != 0,
        ))
    }

    #[cfg(test)]
    /// Build a `TableInfo` from `(table, rows)` pairs
    pub fn new_test(
        valid_tables: &[(TableId, u32)],
        large_str: bool,
        large_blob: bool,
        large_guid: bool,
    ) -> Self {
        let mut rows = vec![TableRowInfo::default(); TableId::COUNT];
        for (table, row_count) in valid_tables {
            rows[*table as usize] = TableRowInfo::new(*row_count);
        }

        Self::with_rows(rows, large_str, large_guid, large_blob)
    }

    fn with_rows(
        rows: Vec<TableRowInfo>,
        large_str: bool,
        large_guid: bool,
        large_blob: bool,
    ) -> Self {
        let mut info = TableInfo {
            rows,
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: large_str,
            is_large_index_guid: large_guid,
            is_large_index_blob: large_blob,
        };

        for coded_index in CodedIndexType::iter() {
            info.coded_indexes[coded_index as usize] = info.calculate_coded_index_bits(coded_index);
        }

        info
    }

    /// Split a raw coded index value into its table and row
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the tag is reserved or out of range
    pub fn decode_coded_index(
        &self,
        value: u32,
        coded_index_type: CodedIndexType,
    ) -> Result<(TableId, u32)> {
        let tag_bits = coded_index_type.tag_bits();
        let tag = (value & ((1 << tag_bits) - 1)) as usize;
        let row = value >> tag_bits;

        match coded_index_type.slots().get(tag) {
            Some(Some(table)) => Ok((*table, row)),
            _ => Err(malformed_error!(
                "Invalid tag {} for coded index {:?}",
                tag,
                coded_index_type
            )),
        }
    }

    /// Row information of `table`
    #[must_use]
    pub fn get(&self, table: TableId) -> &TableRowInfo {
        &self.rows[table as usize]
    }

    /// True if indexes into `table` are 4 bytes wide
    #[must_use]
    pub fn is_large(&self, table: TableId) -> bool {
        self.rows[table as usize].is_large
    }

    /// True if `#Strings` indexes are 4 bytes wide
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.is_large_index_str
    }

    /// True if `#GUID` indexes are 4 bytes wide
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.is_large_index_guid
    }

    /// True if `#Blob` indexes are 4 bytes wide
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.is_large_index_blob
    }

    /// Width of a `#Strings` index in bytes
    #[must_use]
    pub fn str_bytes(&self) -> u8 {
        if self.is_large_index_str {
            4
        } else {
            2
        }
    }

    /// Width of a `#GUID` index in bytes
    #[must_use]
    pub fn guid_bytes(&self) -> u8 {
        if self.is_large_index_guid {
            4
        } else {
            2
        }
    }

    /// Width of a `#Blob` index in bytes
    #[must_use]
    pub fn blob_bytes(&self) -> u8 {
        if self.is_large_index_blob {
            4
        } else {
            2
        }
    }

    /// Width of an index into `table` in bytes
    #[must_use]
    pub fn table_index_bytes(&self, table: TableId) -> u8 {
        if self.rows[table as usize].is_large {
            4
        } else {
            2
        }
    }

    /// Width of a coded index of kind `coded_index_type` in bytes
    #[must_use]
    pub fn coded_index_bytes(&self, coded_index_type: CodedIndexType) -> u8 {
        if self.coded_indexes[coded_index_type as usize] > 16 {
            4
        } else {
            2
        }
    }

    fn calculate_coded_index_bits(&self, coded_index_type: CodedIndexType) -> u8 {
        let max_bits = coded_index_type
            .slots()
            .iter()
            .flatten()
            .map(|table| self.rows[*table as usize].bits)
            .max()
            .unwrap_or(1);

        max_bits + coded_index_type.tag_bits()
    }

    /// Size in bytes of one row of `table`, ECMA-335 II.22
    #[rustfmt::skip]
    #[must_use]
    pub fn row_size(&self, table: TableId) -> u32 {
        use CodedIndexType as Ci;

        let s = self.str_bytes();
        let g = self.guid_bytes();
        let b = self.blob_bytes();
        let t = |id: TableId| self.table_index_bytes(id);
        let c = |ci: CodedIndexType| self.coded_index_bytes(ci);

        u32::from(match table {
            TableId::Module =>                  2 + s + g + g + g,
            TableId::TypeRef =>                 c(Ci::ResolutionScope) + s + s,
            TableId::TypeDef =>                 4 + s + s + c(Ci::TypeDefOrRef) + t(TableId::Field) + t(TableId::MethodDef),
            TableId::FieldPtr =>                t(TableId::Field),
            TableId::Field =>                   2 + s + b,
            TableId::MethodPtr =>               t(TableId::MethodDef),
            TableId::MethodDef =>               4 + 2 + 2 + s + b + t(TableId::Param),
            TableId::ParamPtr =>                t(TableId::Param),
            TableId::Param =>                   2 + 2 + s,
            TableId::InterfaceImpl =>           t(TableId::TypeDef) + c(Ci::TypeDefOrRef),
            TableId::MemberRef =>               c(Ci::MemberRefParent) + s + b,
            TableId::Constant =>                2 + c(Ci::HasConstant) + b,
            TableId::CustomAttribute =>         c(Ci::HasCustomAttribute) + c(Ci::CustomAttributeType) + b,
            TableId::FieldMarshal =>            c(Ci::HasFieldMarshal) + b,
            TableId::DeclSecurity =>            2 + c(Ci::HasDeclSecurity) + b,
            TableId::ClassLayout =>             2 + 4 + t(TableId::TypeDef),
            TableId::FieldLayout =>             4 + t(TableId::Field),
            TableId::StandAloneSig =>           b,
            TableId::EventMap =>                t(TableId::TypeDef) + t(TableId::Event),
            TableId::EventPtr =>                t(TableId::Event),
            TableId::Event =>                   2 + s + c(Ci::TypeDefOrRef),
            TableId::PropertyMap =>             t(TableId::TypeDef) + t(TableId::Property),
            TableId::PropertyPtr =>             t(TableId::Property),
            TableId::Property =>                2 + s + b,
            TableId::MethodSemantics =>         2 + t(TableId::MethodDef) + c(Ci::HasSemantics),
            TableId::MethodImpl =>              t(TableId::TypeDef) + c(Ci::MethodDefOrRef) + c(Ci::MethodDefOrRef),
            TableId::ModuleRef =>               s,
            TableId::TypeSpec =>                b,
            TableId::ImplMap =>                 2 + c(Ci::MemberForwarded) + s + t(TableId::ModuleRef),
            TableId::FieldRVA =>                4 + t(TableId::Field),
            TableId::EncLog =>                  4 + 4,
            TableId::EncMap =>                  4,
            TableId::Assembly =>                4 + 2 + 2 + 2 + 2 + 4 + b + s + s,
            TableId::AssemblyProcessor =>       4,
            TableId::AssemblyOS =>              4 + 4 + 4,
            TableId::AssemblyRef =>             2 + 2 + 2 + 2 + 4 + b + s + s + b,
            TableId::AssemblyRefProcessor =>    4 + t(TableId::AssemblyRef),
            TableId::AssemblyRefOS =>           4 + 4 + 4 + t(TableId::AssemblyRef),
            TableId::File =>                    4 + s + b,
            TableId::ExportedType =>            4 + 4 + s + s + c(Ci::Implementation),
            TableId::ManifestResource =>        4 + 4 + s + c(Ci::Implementation),
            TableId::NestedClass =>             t(TableId::TypeDef) + t(TableId::TypeDef),
            TableId::GenericParam =>            2 + 2 + c(Ci::TypeOrMethodDef) + s,
            TableId::MethodSpec =>              c(Ci::MethodDefOrRef) + b,
            TableId::GenericParamConstraint =>  t(TableId::GenericParam) + c(Ci::TypeDefOrRef),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_info_bits() {
        assert_eq!(TableRowInfo::new(0).bits, 1);
        assert_eq!(TableRowInfo::new(1).bits, 1);
        assert_eq!(TableRowInfo::new(0xFFFF).bits, 16);
        assert!(!TableRowInfo::new(0xFFFF).is_large);
        assert!(TableRowInfo::new(0x1_0000).is_large);
    }

    #[test]
    fn small_image_sizes() {
        let info = TableInfo::new_test(
            &[(TableId::TypeDef, 10), (TableId::MethodDef, 20)],
            false,
            false,
            false,
        );

        assert_eq!(info.row_size(TableId::Module), 10);
        assert_eq!(info.row_size(TableId::TypeRef), 6);
        assert_eq!(info.row_size(TableId::TypeDef), 14);
        assert_eq!(info.row_size(TableId::MethodDef), 14);
        assert_eq!(info.row_size(TableId::Assembly), 22);
        assert_eq!(info.row_size(TableId::AssemblyRef), 20);
        assert_eq!(info.row_size(TableId::CustomAttribute), 6);
    }

    #[test]
    fn coded_index_widening() {
        // 2 tag bits leave 14 bits for the row, 0x4000 rows no longer fit
        let info = TableInfo::new_test(&[(TableId::TypeRef, 0x3FFF)], false, false, false);
        assert_eq!(info.coded_index_bytes(CodedIndexType::TypeDefOrRef), 2);

        let info = TableInfo::new_test(&[(TableId::TypeRef, 0x4000)], false, false, false);
        assert_eq!(info.coded_index_bytes(CodedIndexType::TypeDefOrRef), 4);
        assert_eq!(info.coded_index_bytes(CodedIndexType::HasFieldMarshal), 2);
        assert_eq!(info.table_index_bytes(TableId::TypeRef), 2);
    }

    #[test]
    fn heap_flags() {
        let info = TableInfo::new_test(&[], true, true, false);
        assert_eq!(info.str_bytes(), 4);
        assert_eq!(info.blob_bytes(), 4);
        assert_eq!(info.guid_bytes(), 2);
        assert_eq!(info.row_size(TableId::Module), 2 + 4 + 2 + 2 + 2);
    }

    #[test]
    fn decode() {
        let info = TableInfo::new_test(&[], false, false, false);
        assert_eq!(
            info.decode_coded_index(0x0000_0029, CodedIndexType::TypeDefOrRef)
                .unwrap(),
            (TableId::TypeRef, 10)
        );
        assert!(info
            .decode_coded_index(0x0000_0003, CodedIndexType::TypeDefOrRef)
            .is_err());
        assert!(info
            .decode_coded_index(0x0000_0001, CodedIndexType::CustomAttributeType)
            .is_err());
        assert_eq!(
            info.decode_coded_index(0x0000_000B, CodedIndexType::CustomAttributeType)
                .unwrap(),
            (TableId::MemberRef, 1)
        );
    }

    #[test]
    fn parse_counts() {
        #[rustfmt::skip]
        let data = [
            0x00, 0x00, 0x00, 0x00,                          // reserved
            0x02, 0x00,                                      // version
            0x01,                                            // heap sizes
            0x01,                                            // reserved
            0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00,  // valid: Module, TypeDef, bit 48
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,  // sorted
            0x01, 0x00, 0x00, 0x00,
            0x03, 0x00, 0x00, 0x00,
            0x07, 0x00, 0x00, 0x00,
        ];

        let info = TableInfo::new(&data, 0x0001_0000_0000_0005).unwrap();
        assert_eq!(info.get(TableId::Module).rows, 1);
        assert_eq!(info.get(TableId::TypeDef).rows, 3);
        assert_eq!(info.get(TableId::TypeRef).rows, 0);
        assert!(info.is_large_str());
        assert!(!info.is_large_blob());

        assert!(TableInfo::new(&data[..30], 0x0001_0000_0000_0005).is_err());
    }
}
