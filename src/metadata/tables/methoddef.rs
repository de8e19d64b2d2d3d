use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// A row of the `MethodDef` table, ECMA-335 II.22.26
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefRaw {
    /// The 1-based row id
    pub rid: u32,
    /// The token of this row
    pub token: Token,
    /// RVA of the method body, `0` if the method has none
    pub rva: u32,
    /// `MethodImplAttributes` bitmask
    pub impl_flags: u32,
    /// `MethodAttributes` bitmask
    pub flags: u32,
    /// `#Strings` index of the method name
    pub name: u32,
    /// `#Blob` index of the method signature
    pub signature: u32,
    /// First row of this method's parameters
    pub param_list: u32,
}

impl RowReadable for MethodDefRaw {
    const TABLE: TableId = TableId::MethodDef;

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodDefRaw {
            rid,
            token: Token::from_parts(TableId::MethodDef, rid),
            rva: read_le_at::<u32>(data, offset)?,
            impl_flags: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            param_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Param))?,
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
            0x50, 0x20, 0x00, 0x00, // rva
            0x00, 0x00,             // impl_flags
            0x86, 0x18,             // flags
            0x10, 0x00,             // name
            0x20, 0x00,             // signature
            0x01, 0x00,             // param_list
            0x00, 0x00, 0x00, 0x00, // rva
            0x00, 0x00,             // impl_flags
            0x06, 0x04,             // flags
            0x18, 0x00,             // name
            0x24, 0x00,             // signature
            0x02, 0x00,             // param_list
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::MethodDef, 2), (TableId::Param, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<MethodDefRaw>::new(&data, 2, sizes).unwrap();
        let rows: Vec<MethodDefRaw> = table.iter().collect::<Result<_>>().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rva, 0x2050);
        assert_eq!(rows[0].flags, 0x1886);
        assert_eq!(rows[0].name, 0x10);
        assert_eq!(rows[1].token.value(), 0x0600_0002);
        assert_eq!(rows[1].rva, 0);
        assert_eq!(rows[1].signature, 0x24);
        assert_eq!(rows[1].param_list, 2);
    }
}
