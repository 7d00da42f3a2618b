//! Package container: parts, relationships, content types, and the
//! assembler that validates and serializes them as a ZIP archive.

mod assembler;
mod content_types;
mod options;
pub mod part;
mod reader;
mod relationships;

pub use assembler::Package;
pub use content_types::ContentTypes;
pub use options::{Compression, WriteOptions};
pub use part::{Part, CONTENT_TYPES_PATH, ROOT_RELS_PATH};
pub use reader::{decode_xml_bytes, PackageReader};
pub use relationships::{Relationship, Relationships, TargetMode};
