use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::errors::{LnmError, LnmResult};

pub const PDF_EXTENSION: &str = ".pdf";

/// Names of `.pdf` entries directly inside `dir`.
///
/// Any listing error aborts: an incomplete inventory would make the
/// downloader skip or repeat files silently.
pub fn local_inventory(dir: &Path) -> LnmResult<BTreeSet<String>> {
    let mut downloaded = BTreeSet::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| LnmError::Inventory {
            dir: dir.to_path_buf(),
            source,
        })?;

        let name = entry.file_name().to_string_lossy();
        if name.ends_with(PDF_EXTENSION) {
            debug!("Already present: {}", name);
            downloaded.insert(name.into_owned());
        }
    }

    info!("Found {} local PDFs in {}", downloaded.len(), dir.display());
    Ok(downloaded)
}
