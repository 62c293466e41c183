use crate::error::{NlpError, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole text file into a string.
///
/// The handle is opened and dropped inside `fs::read`, so it is closed on
/// every path including read errors.
pub fn load_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    String::from_utf8(bytes).map_err(|_| NlpError::InvalidEncoding(path.display().to_string()))
}

/// Map an io failure on `path` to the matching typed error
pub(crate) fn io_error(path: &Path, err: std::io::Error) -> NlpError {
    let display = path.display().to_string();
    match err.kind() {
        ErrorKind::NotFound => NlpError::NotFound(display),
        ErrorKind::PermissionDenied => NlpError::PermissionDenied(display),
        _ => NlpError::Io {
            path: display,
            source: err,
        },
    }
}
