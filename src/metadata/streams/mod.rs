//! Metadata streams, ECMA-335 II.24.2.
//!
//! - [`TablesHeader`] - the `#~` (or uncompressed `#-`) tables stream
//! - [`Strings`] - `#Strings`, null-terminated UTF-8 identifiers
//! - [`Blob`] - `#Blob`, length-prefixed signatures
//! - [`Guid`] - `#GUID`, the module version id
//!
//! The `#US` user string heap only matters for string literals in method bodies and is not
//! read.

mod blob;
mod guid;
mod streamheader;
mod strings;
mod tablesheader;

pub use blob::Blob;
pub use guid::Guid;
pub use streamheader::StreamHeader;
pub use strings::Strings;
pub use tablesheader::TablesHeader;
