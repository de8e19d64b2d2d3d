//! PE file abstraction for .NET binaries.
//!
//! [`File`] owns the raw image (memory-mapped from disk, or an owned buffer) together with the
//! [`goblin`] view of its PE structure, and offers the few operations the metadata reader needs:
//! locating the CLR runtime header and translating RVAs into file offsets.
//!
//! # Example
//!
//! ```rust,no_run
//! use dotscope_uml::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("tests/samples/Sample.dll"))?;
//! let (clr_rva, clr_size) = file.clr()?;
//! let clr_offset = file.rva_to_offset(clr_rva)?;
//! let cor20 = file.data_slice(clr_offset, clr_size)?;
//! # Ok::<(), dotscope_uml::Error>(())
//! ```

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{
    Error::{Empty, GoblinErr},
    Result,
};
use goblin::pe::PE;
use memory::Memory;
use ouroboros::self_referencing;
use physical::Physical;

/// Access to the raw bytes of a loaded image, independent of where they live.
pub trait Backend: Send + Sync {
    /// Returns `len` bytes starting at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range leaves the image
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the complete image
    fn data(&self) -> &[u8];

    /// Returns the image size in bytes
    fn len(&self) -> usize;
}

/// A loaded PE image containing a CLR runtime header.
#[self_referencing]
pub struct File {
    data: Box<dyn Backend>,
    #[borrows(data)]
    #[not_covariant]
    pe: PE<'this>,
}

impl File {
    /// Memory-maps and parses the file at `file`.
    ///
    /// # Errors
    /// Returns an error if the file can not be read, is not a PE image or has no CLR header
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Parses an image that is already in memory.
    ///
    /// # Errors
    /// Returns an error if `data` is not a PE image or has no CLR header
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        let data = Box::new(data);

        File::try_new(data, |data| match PE::parse(data.data()) {
            Ok(pe) => match pe.header.optional_header {
                Some(optional_header) => {
                    if optional_header
                        .data_directories
                        .get_clr_runtime_header()
                        .is_none()
                    {
                        Err(malformed_error!(
                            "File does not have a CLR runtime header directory"
                        ))
                    } else {
                        Ok(pe)
                    }
                }
                None => Err(malformed_error!("File does not have an OptionalHeader")),
            },
            Err(error) => Err(GoblinErr(error)),
        })
    }

    /// Size of the image in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.with_data(|data| data.len())
    }

    /// True if the image has no data
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The complete image
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.with_data(|data| data.data())
    }

    /// `len` bytes of the image starting at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range leaves the image
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.with_data(|data| data.data_slice(offset, len))
    }

    /// RVA and size of the CLR runtime header (Cor20 header)
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the directory is absent
    pub fn clr(&self) -> Result<(usize, usize)> {
        self.with_pe(|pe| {
            let Some(optional_header) = pe.header.optional_header else {
                return Err(malformed_error!("File does not have an OptionalHeader"));
            };

            match optional_header.data_directories.get_clr_runtime_header() {
                Some(clr_dir) => Ok((clr_dir.virtual_address as usize, clr_dir.size as usize)),
                None => Err(malformed_error!(
                    "File does not have a CLR runtime header directory"
                )),
            }
        })
    }

    /// Translates a relative virtual address into an offset into the image
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if no section maps `rva`
    pub fn rva_to_offset(&self, rva: usize) -> Result<usize> {
        let rva_u32 =
            u32::try_from(rva).map_err(|_| malformed_error!("RVA too large to fit in u32: {}", rva))?;

        self.with_pe(|pe| {
            for section in &pe.sections {
                let Some(section_max) = section.virtual_address.checked_add(section.virtual_size)
                else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.virtual_address,
                        section.virtual_size
                    ));
                };

                if section.virtual_address <= rva_u32 && section_max > rva_u32 {
                    return Ok((rva - section.virtual_address as usize)
                        + section.pointer_to_raw_data as usize);
                }
            }

            Err(malformed_error!(
                "RVA could not be converted to offset - {}",
                rva
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::ImageBuilder;

    #[test]
    fn empty() {
        assert!(matches!(File::from_mem(Vec::new()), Err(Empty)));
    }

    #[test]
    fn not_a_pe() {
        let result = File::from_mem(vec![0xCC; 512]);
        assert!(result.is_err());
    }

    #[test]
    fn crafted_image() {
        let image = ImageBuilder::new("Crafted").build();
        let file = File::from_mem(image).unwrap();

        let (clr_rva, clr_size) = file.clr().unwrap();
        assert_eq!(clr_size, 72);

        let clr_offset = file.rva_to_offset(clr_rva).unwrap();
        let cor20 = file.data_slice(clr_offset, clr_size).unwrap();
        assert_eq!(cor20[0], 72);

        assert!(file.rva_to_offset(0x10).is_err());
    }
}
