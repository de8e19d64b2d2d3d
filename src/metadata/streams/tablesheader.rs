//! Header of the `#~` stream, ECMA-335 II.24.2.6.

use std::sync::Arc;

use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::{read_le, read_le_at},
    metadata::tables::{MetadataTable, RowReadable, TableId, TableInfo, TableInfoRef},
    Result,
};

/// The `#~` stream: table row counts, index widths and the location of each table
pub struct TablesHeader<'a> {
    /// Major version of the table schema, shall be 2
    pub major_version: u8,
    /// Minor version of the table schema, shall be 0
    pub minor_version: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts and index widths
    pub info: TableInfoRef,
    data: &'a [u8],
    offsets: Vec<usize>,
}

impl<'a> TablesHeader<'a> {
    /// Parse the `#~` stream in `data`
    ///
    /// # Errors
    /// Returns an error if the header is truncated or the tables do not fit in the stream
    pub fn from(data: &'a [u8]) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(malformed_error!("Metadata tables stream is too small"));
        }

        let valid = read_le::<u64>(&data[8..])?;
        if valid == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }

        let heap_sizes = data[6];
        let info = Arc::new(TableInfo::new(data, valid)?);

        let mut cursor = 24 + valid.count_ones() as usize * 4;
        // 'extra data' of uncompressed (#-) streams
        if heap_sizes & 0x40 != 0 {
            cursor += 4;
        }

        let mut offsets = vec![0; TableId::COUNT];
        for table in TableId::iter() {
            offsets[table as usize] = cursor;

            let size = u64::from(info.get(table).rows) * u64::from(info.row_size(table));
            cursor = cursor
                .checked_add(usize::try_from(size).map_err(|_| out_of_bounds_error!())?)
                .ok_or_else(|| out_of_bounds_error!())?;

            if cursor > data.len() {
                return Err(malformed_error!(
                    "Table {:?} extends past the end of the stream - {} > {}",
                    table,
                    cursor,
                    data.len()
                ));
            }
        }

        Ok(TablesHeader {
            major_version: data[4],
            minor_version: data[5],
            valid,
            sorted: read_le_at::<u64>(data, &mut 16)?,
            info,
            data,
            offsets,
        })
    }

    /// True if `table` is present with at least one row
    #[must_use]
    pub fn has_table(&self, table: TableId) -> bool {
        self.info.get(table).rows > 0
    }

    /// Number of rows in `table`
    #[must_use]
    pub fn table_row_count(&self, table: TableId) -> u32 {
        self.info.get(table).rows
    }

    /// Typed view over the rows of the table holding `T`, or `None` if it has no rows
    #[must_use]
    pub fn table<T: RowReadable>(&self) -> Option<MetadataTable<'a, T>> {
        let rows = self.table_row_count(T::TABLE);
        if rows == 0 {
            return None;
        }

        let offset = self.offsets[T::TABLE as usize];
        MetadataTable::new(&self.data[offset..], rows, self.info.clone()).ok()
    }
}
