use crate::Result;

/// View over the `#GUID` heap, ECMA-335 II.24.2.5.
///
/// GUIDs are 16 bytes each and referenced by 1-based index.
pub struct Guid<'a> {
    data: &'a [u8],
}

impl<'a> Guid<'a> {
    /// Create a view over `data`
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the heap can not hold a single GUID
    pub fn from(data: &'a [u8]) -> Result<Guid<'a>> {
        if data.len() < 16 {
            return Err(malformed_error!("Data for #Guid heap is too small"));
        }

        Ok(Guid { data })
    }

    /// Get the GUID with the 1-based `index`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for index 0 or an index past the heap
    pub fn get(&self, index: usize) -> Result<uguid::Guid> {
        if index < 1 || index.saturating_mul(16) > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        let offset_start = (index - 1) * 16;

        let mut buffer = [0u8; 16];
        buffer.copy_from_slice(&self.data[offset_start..offset_start + 16]);

        Ok(uguid::Guid::from_bytes(buffer))
    }
}
