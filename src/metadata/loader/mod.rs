//! Turns a PE image into a [`Module`].
//!
//! Loading runs in two phases. First the CLR header, the metadata root and the streams are
//! located and parsed; then a [`context::LoaderContext`] decodes the rows of the tables the
//! analysis needs and resolves every token it meets into a
//! [`crate::metadata::typesystem::TypeRef`].
//!
//! ```text
//! File → Cor20 header → Root → #~ / #Strings / #Blob / #GUID → LoaderContext → Module
//! ```

mod context;

use tracing::debug;

use crate::{
    file::File,
    metadata::{
        cor20header::{Cor20Header, COR20_HEADER_SIZE},
        module::Module,
        root::Root,
        streams::{Blob, Guid, Strings, TablesHeader},
    },
    Result,
};

use context::LoaderContext;

/// The streams of one image, borrowed from the file data
struct Streams<'a> {
    tables: TablesHeader<'a>,
    strings: Strings<'a>,
    blobs: Option<Blob<'a>>,
    guids: Option<Guid<'a>>,
}

impl<'a> Streams<'a> {
    fn read(file: &'a File) -> Result<Streams<'a>> {
        let (clr_rva, clr_size) = file.clr()?;
        if clr_size < COR20_HEADER_SIZE {
            return Err(malformed_error!("CLR header is too small - {}", clr_size));
        }

        let clr_slice = file.data_slice(file.rva_to_offset(clr_rva)?, COR20_HEADER_SIZE)?;
        let header = Cor20Header::read(clr_slice)?;

        let meta_offset = file.rva_to_offset(header.meta_data_rva as usize)?;
        let meta = file.data_slice(meta_offset, header.meta_data_size as usize)?;
        let root = Root::read(meta)?;

        let mut tables = None;
        let mut strings = None;
        let mut blobs = None;
        let mut guids = None;

        for stream in &root.stream_headers {
            let start = stream.offset as usize;
            let Some(data) = meta.get(start..start + stream.size as usize) else {
                return Err(out_of_bounds_error!());
            };

            match stream.name.as_str() {
                "#~" | "#-" => tables = Some(TablesHeader::from(data)?),
                "#Strings" => strings = Some(Strings::from(data)?),
                "#Blob" => blobs = Some(Blob::from(data)?),
                "#GUID" => guids = Some(Guid::from(data)?),
                _ => {}
            }
        }

        let Some(tables) = tables else {
            return Err(malformed_error!("Image has no metadata tables stream"));
        };
        let Some(strings) = strings else {
            return Err(malformed_error!("Image has no #Strings heap"));
        };

        Ok(Streams {
            tables,
            strings,
            blobs,
            guids,
        })
    }
}

/// Load the module of `file`, without file identity (name, hash)
///
/// # Errors
/// Returns an error if the image has no valid CLI metadata, or a table row, signature or
/// method body is malformed
pub(crate) fn load(file: &File) -> Result<Module> {
    let streams = Streams::read(file)?;
    let context = LoaderContext::new(
        file,
        &streams.tables,
        &streams.strings,
        streams.blobs.as_ref(),
        streams.guids.as_ref(),
    )?;

    let module = context.build()?;
    debug!(
        module = module.name(),
        types = module.types().len(),
        "loaded module"
    );

    Ok(module)
}
