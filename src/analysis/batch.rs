//! Parallel analysis of many images.
//!
//! Each image is loaded and analyzed independently on the [`rayon`] pool. A failure is logged
//! and returned in place; it never aborts the other images.

use std::path::Path;

use rayon::prelude::*;
use tracing::warn;

use crate::{analysis::model::ParsedAssembly, config::AnalyzerConfig, Result};

fn report(name: &str, result: Result<ParsedAssembly>) -> Result<ParsedAssembly> {
    if let Err(error) = &result {
        warn!(file = name, %error, "failed to analyze module");
    }
    result
}

/// Analyze the PE images at `paths` in parallel.
///
/// Returns one result per path, in the order of `paths`; a file that fails to load does not
/// affect the others.
#[must_use]
pub fn analyze_files<P>(paths: &[P], config: &AnalyzerConfig) -> Vec<Result<ParsedAssembly>>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            report(
                &path.display().to_string(),
                ParsedAssembly::from_file(path, config),
            )
        })
        .collect()
}

/// Analyze in-memory PE images, given as `(file name, image)` pairs, in parallel.
///
/// Returns one result per image, in input order.
#[must_use]
pub fn analyze_images(
    images: Vec<(String, Vec<u8>)>,
    config: &AnalyzerConfig,
) -> Vec<Result<ParsedAssembly>> {
    images
        .into_par_iter()
        .map(|(name, data)| report(&name, ParsedAssembly::from_mem(data, &name, config)))
        .collect()
}
