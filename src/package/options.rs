//! Archive writing options.

use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// How entries are stored in the archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// No compression
    Stored,
    /// Deflate (the format's usual choice)
    #[default]
    Deflated,
}

/// Options for serializing a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Entry compression
    #[serde(default)]
    pub compression: Compression,

    /// Compression level; `None` uses the method's default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
}

impl WriteOptions {
    /// Create default options (deflate, default level).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression method.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the compression level.
    pub fn with_level(mut self, level: i64) -> Self {
        self.level = Some(level);
        self
    }

    /// Per-entry zip options. Entry times are fixed at the DOS epoch.
    pub(crate) fn file_options(&self) -> SimpleFileOptions {
        let method = match self.compression {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        };
        let level = match self.compression {
            Compression::Stored => None,
            Compression::Deflated => self.level,
        };
        SimpleFileOptions::default()
            .compression_method(method)
            .compression_level(level)
            .last_modified_time(zip::DateTime::default())
    }
}
