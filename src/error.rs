//! Error types for the docxforge library.

use std::io;
use thiserror::Error;

/// Result type alias for docxforge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or assembling a document package.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A numbering definition or level is malformed.
    #[error("Invalid numbering definition: {0}")]
    InvalidDefinition(String),

    /// A list paragraph names a numbering instance that does not exist.
    #[error("Unknown numbering instance: {0}")]
    UnknownInstance(u32),

    /// A list paragraph names a level outside its definition.
    #[error("Invalid level {level} for numbering instance {num_id}")]
    InvalidLevel {
        /// Numbering instance ID
        num_id: u32,
        /// Requested level
        level: u8,
    },

    /// A cross-reference inside the package does not hold.
    #[error("Package integrity error: {0}")]
    Integrity(String),

    /// A part requested from a package does not exist.
    #[error("Missing part: {0}")]
    MissingPart(String),

    /// Table cell spans overlap, leave gaps, or fall outside the grid.
    #[error("Table merge conflict: {0}")]
    MergeConflict(String),

    /// Section page geometry is not usable.
    #[error("Invalid section: {0}")]
    InvalidSection(String),

    /// Error reading or writing the ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error writing or scanning XML content.
    #[error("XML error: {0}")]
    Xml(String),

    /// Error serializing the model to JSON.
    #[error("JSON error: {0}")]
    Json(String),
}

impl Error {
    /// Shorthand for an integrity error with a formatted message.
    pub(crate) fn integrity(msg: impl Into<String>) -> Self {
        Error::Integrity(msg.into())
    }

    /// Shorthand for a numbering definition error.
    pub(crate) fn definition(msg: impl Into<String>) -> Self {
        Error::InvalidDefinition(msg.into())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownInstance(7);
        assert_eq!(err.to_string(), "Unknown numbering instance: 7");

        let err = Error::InvalidLevel { num_id: 3, level: 9 };
        assert_eq!(err.to_string(), "Invalid level 9 for numbering instance 3");

        let err = Error::integrity("word/missing.xml");
        assert_eq!(err.to_string(), "Package integrity error: word/missing.xml");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
