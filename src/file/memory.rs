//! In-memory backend for [`crate::file::File`], used for images handed over as a byte buffer
//! (batch analysis of in-memory images, tests on crafted images).

use super::Backend;
use crate::Result;

/// Backend over an owned image buffer
#[derive(Debug)]
pub struct Memory(Vec<u8>);

impl Memory {
    pub fn new(image: Vec<u8>) -> Memory {
        Memory(image)
    }
}

impl Backend for Memory {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.0.get(offset..end))
            .ok_or_else(|| out_of_bounds_error!())
    }

    fn data(&self) -> &[u8] {
        &self.0
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
