use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `MemberRef` table, ECMA-335 II.22.25
///
/// References a field or method through its parent type. Members of generic instances are
/// referenced this way, with a `TypeSpec` parent.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRefRaw {
    /// The 1-based row id
    pub rid: u32,
    /// The token of this row
    pub token: Token,
    /// Owner of the member
    pub class: CodedIndex,
    /// `#Strings` index of the member name
    pub name: u32,
    /// `#Blob` index of the member signature
    pub signature: u32,
}

impl RowReadable for MemberRefRaw {
    const TABLE: TableId = TableId::MemberRef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MemberRefRaw {
            rid,
            token: Token::from_parts(TableId::MemberRef, rid),
            class: CodedIndex::read(data, offset, sizes, CodedIndexType::MemberRefParent)?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::metadata::tables::{MetadataTable, TableInfo};

    #[test]
    fn crafted_short() {
        #[rustfmt::skip]
        let data = [
            0x09, 0x00, // class, TypeRef 1
            0x30, 0x00, // name
            0x40, 0x00, // signature
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::MemberRef, 1)], false, false, false));
        let table = MetadataTable::<MemberRefRaw>::new(&data, 1, sizes).unwrap();
        let row = table.get(1).unwrap();

        assert_eq!(row.token.value(), 0x0A00_0001);
        assert_eq!(row.class, CodedIndex::new(TableId::TypeRef, 1));
        assert_eq!(row.name, 0x30);
        assert_eq!(row.signature, 0x40);
    }
}
