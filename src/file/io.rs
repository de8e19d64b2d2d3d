//! Bounds-checked little-endian reads for PE and CLI metadata parsing.
//!
//! Every structure in a .NET image (PE headers, the Cor20 header, metadata tables, method
//! bodies) is stored little-endian. The helpers here read fixed-size primitives from a byte
//! slice, advancing a caller owned cursor, and never panic on short input.
//!
//! - [`read_le`] - read a value from the start of a buffer
//! - [`read_le_at`] - read a value at an offset and advance the offset
//! - [`read_le_at_dyn`] - read a 2 or 4 byte heap / table index, widened to `u32`

use crate::Result;

/// Primitive types that can be decoded from raw little-endian bytes.
pub trait CilIO: Sized {
    /// The byte array representation of the type
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Decode a value from little-endian bytes
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_cil_io {
    ($($ty:ty),*) => {
        $(
            impl CilIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_cil_io!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Reads a value of type `T` from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than `T`.
pub fn read_le<T: CilIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Reads a value of type `T` at `offset`, advancing `offset` past it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the read would leave `data`.
pub fn read_le_at<T: CilIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(out_of_bounds_error!());
    };

    if end > data.len() {
        return Err(out_of_bounds_error!());
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(out_of_bounds_error!());
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}

/// Reads either a 2-byte or a 4-byte index, depending on `is_large`.
///
/// Heap indexes and table indexes in the `#~` stream change width with the size of the heap
/// or table they point into.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the read would leave `data`.
pub fn read_le_at_dyn(data: &[u8], offset: &mut usize, is_large: bool) -> Result<u32> {
    let res = if is_large {
        read_le_at::<u32>(data, offset)?
    } else {
        u32::from(read_le_at::<u16>(data, offset)?)
    };

    Ok(res)
}
