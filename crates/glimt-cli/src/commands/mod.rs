pub mod chart;
pub mod cloud;
pub mod extract;
pub mod inspect;

use glimt_core::error::GlimtError;
use glimt_core::pipeline::UploadedFile;
use std::path::Path;

/// Read a file from disk into an UploadedFile (bytes + declared name).
pub fn load(path: &Path) -> Result<UploadedFile, GlimtError> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadedFile::new(name, bytes))
}
