use std::io::Write;

use camino::Utf8Path;
use log::{debug, info};
use milepost_fs::{ensure_dir, remove_file_if_exists};
use svg::Document;
use tempfile::NamedTempFile;

use crate::RenderError;

/// Write `document` to `path`, replacing any previous map.
///
/// The existing file is removed first, then the document is serialised into
/// a temporary file beside `path` and renamed into place. A failure leaves
/// no partially written map behind.
///
/// # Errors
/// Returns a [`RenderError`] naming the step that failed.
pub fn write_document(path: &Utf8Path, document: &Document) -> Result<(), RenderError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    ensure_dir(dir).map_err(|source| RenderError::CreateOutputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let removed = remove_file_if_exists(path).map_err(|source| RenderError::RemoveExisting {
        path: path.to_path_buf(),
        source,
    })?;
    if removed {
        debug!("removed previous map at {path}");
    }

    let write_error = |source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|source| RenderError::CreateTemp {
        dir: dir.to_path_buf(),
        source,
    })?;
    svg::write(file.as_file_mut(), document).map_err(write_error)?;
    file.as_file_mut().flush().map_err(write_error)?;
    file.persist(path).map_err(|err| RenderError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    info!("wrote {path}");
    Ok(())
}
