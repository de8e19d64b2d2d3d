use crate::{
    file::io::read_le,
    metadata::method::MethodBodyFlags,
    Result,
};

/// Header of a method body, ECMA-335 II.25.4
///
/// Exception handling sections after the code are not read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBody {
    /// Size of the CIL code in bytes
    pub size_code: usize,
    /// Size of the header in bytes, the code starts right after it
    pub size_header: usize,
    /// Token of the local variable signature, 0 if there are no locals
    pub local_var_sig_token: u32,
    /// Maximum number of items on the operand stack
    pub max_stack: usize,
    /// True for a fat header
    pub is_fat: bool,
    /// True if locals are zero-initialized
    pub is_init_local: bool,
}

impl MethodBody {
    /// Parse the body header at the start of `data`
    ///
    /// # Errors
    /// Returns an error if `data` is empty, the header format is unknown or the code does not
    /// fit into `data`
    pub fn from(data: &[u8]) -> Result<MethodBody> {
        if data.is_empty() {
            return Err(malformed_error!("Provided data for body parsing is empty"));
        }

        let first_byte = read_le::<u8>(data)?;
        let format = MethodBodyFlags::from_bits_truncate(u16::from(first_byte & 0b_0000_0011_u8));

        if format == MethodBodyFlags::TINY_FORMAT {
            let size_code = (first_byte >> 2) as usize;
            if size_code + 1 > data.len() {
                return Err(out_of_bounds_error!());
            }

            Ok(MethodBody {
                size_code,
                size_header: 1,
                local_var_sig_token: 0,
                max_stack: 8,
                is_fat: false,
                is_init_local: false,
            })
        } else if format == MethodBodyFlags::FAT_FORMAT {
            if data.len() < 12 {
                return Err(out_of_bounds_error!());
            }

            let first_duo = read_le::<u16>(data)?;
            let size_header = usize::from(first_duo >> 12) * 4;
            if size_header < 12 {
                return Err(malformed_error!(
                    "Fat method header is too small - {}",
                    size_header
                ));
            }

            let size_code = read_le::<u32>(&data[4..])? as usize;
            match size_header.checked_add(size_code) {
                Some(end) if end <= data.len() => {}
                _ => return Err(out_of_bounds_error!()),
            }

            let flags_header = MethodBodyFlags::from_bits_truncate(first_duo & 0x0FFF);

            Ok(MethodBody {
                size_code,
                size_header,
                local_var_sig_token: read_le::<u32>(&data[8..])?,
                max_stack: usize::from(read_le::<u16>(&data[2..])?),
                is_fat: true,
                is_init_local: flags_header.contains(MethodBodyFlags::INIT_LOCALS),
            })
        } else {
            Err(malformed_error!(
                "MethodHeader is neither FAT nor TINY - {}",
                first_byte
            ))
        }
    }

    /// Size of header and code in bytes
    #[must_use]
    pub fn size(&self) -> usize {
        self.size_header + self.size_code
    }

    /// The CIL code of this body, `data` must start at the body header
    #[must_use]
    pub fn code<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        data.get(self.size_header..self.size())
            .unwrap_or_default()
    }
}
