use crate::api::error::AppError;
use crate::config::AppConfig;
use crate::models::UploadedDocument;
use crate::utils::validation::{
    sanitize_filename, validate_extension, validate_file_size, verify_text_content,
};
use bytes::Bytes;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const TEMP_PREFIX: &str = "call-history-";
const TEMP_SUFFIX: &str = ".txt";
const UTF8_BOM: &str = "\u{feff}";

/// Checks an upload and turns it into a document ready for analysis
pub fn accept_upload(
    original_filename: &str,
    bytes: Bytes,
    config: &AppConfig,
) -> Result<UploadedDocument, AppError> {
    let filename =
        sanitize_filename(original_filename).map_err(|e| AppError::BadRequest(e.to_string()))?;

    validate_extension(&filename).map_err(|e| AppError::BadRequest(e.to_string()))?;

    validate_file_size(bytes.len(), config.max_file_size)
        .map_err(|e| AppError::PayloadTooLarge(e.to_string()))?;

    verify_text_content(&bytes).map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(UploadedDocument::new(filename, bytes))
}

/// A document materialized on disk for the duration of one analysis.
///
/// The file is removed when the guard is dropped, whichever way the owning
/// scope exits. Call [`TempDocument::close`] to observe removal errors.
#[derive(Debug)]
pub struct TempDocument {
    file: NamedTempFile,
}

impl TempDocument {
    /// Writes `bytes` to a new uniquely named file inside `dir`
    pub fn create(dir: &Path, bytes: &[u8]) -> Result<Self, AppError> {
        let mut file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)
            .map_err(|e| AppError::FileHandling(format!("{} ({})", e, dir.display())))?;

        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|e| AppError::FileHandling(e.to_string()))?;

        tracing::debug!(
            "Staged {} bytes at {}",
            bytes.len(),
            file.path().display()
        );

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Reads the staged file back as UTF-8 text, without a leading BOM
    pub fn read_text(&mut self) -> Result<String, AppError> {
        let handle = self.file.as_file_mut();
        handle
            .seek(SeekFrom::Start(0))
            .map_err(|e| AppError::FileHandling(e.to_string()))?;

        let mut raw = Vec::new();
        handle
            .read_to_end(&mut raw)
            .map_err(|e| AppError::FileHandling(e.to_string()))?;

        let text = String::from_utf8(raw)
            .map_err(|e| AppError::FileHandling(format!("file is not valid UTF-8: {}", e)))?;

        Ok(match text.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }

    /// Removes the file now and reports failures instead of ignoring them
    pub fn close(self) -> Result<PathBuf, AppError> {
        let path = self.file.path().to_path_buf();
        self.file
            .close()
            .map_err(|e| AppError::FileHandling(format!("failed to remove {}: {}", path.display(), e)))?;
        Ok(path)
    }
}
