//! File-picker surface for the identity document upload.
//!
//! The document is only carried around; its content is never parsed.

use std::fmt;
use std::path::{Path, PathBuf};

/// Extensions offered by the picker (`.pdf, .jpg, .jpeg, .png`).
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("No file path given")]
    EmptyPath,

    #[error("Unsupported file type '{0}' (supported formats: PDF, JPG, PNG)")]
    UnsupportedType(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A picked file: name, size and raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    name: String,
    bytes: Vec<u8>,
}

impl DocumentHandle {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Pick a document from the filesystem.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(DocumentError::EmptyPath);
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(DocumentError::UnsupportedType(extension));
        }

        let bytes = std::fs::read(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        log::debug!("Picked document {name} ({} bytes)", bytes.len());
        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `name (12.34 KB)`
    pub fn display_label(&self) -> String {
        format!("{} ({:.2} KB)", self.name, self.size() as f64 / 1024.0)
    }
}

impl fmt::Debug for DocumentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentHandle")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(&[0u8; 2048]).unwrap();

        let doc = DocumentHandle::from_path(file.path()).unwrap();
        assert_eq!(doc.size(), 2048);
        assert!(doc.name().ends_with(".pdf"));
        assert!(doc.display_label().ends_with("(2.00 KB)"));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let file = tempfile::Builder::new().suffix(".JPG").tempfile().unwrap();
        assert!(DocumentHandle::from_path(file.path()).is_ok());
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let file = tempfile::Builder::new().suffix(".exe").tempfile().unwrap();
        let err = DocumentHandle::from_path(file.path()).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedType(ext) if ext == "exe"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DocumentHandle::from_path(dir.path().join("aadhaar.png")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn test_empty_path() {
        assert!(matches!(
            DocumentHandle::from_path(""),
            Err(DocumentError::EmptyPath)
        ));
    }

    #[test]
    fn test_display_label_rounds_to_two_places() {
        let doc = DocumentHandle::new("id.png", vec![0; 1500]);
        assert_eq!(doc.display_label(), "id.png (1.46 KB)");
    }
}
