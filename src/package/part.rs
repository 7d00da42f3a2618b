//! Package parts and the well-known names they use.

use super::relationships::Relationships;
use std::path::Path;

/// Content types of the parts a document package carries.
pub mod content_type {
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const DOCUMENT: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const STYLES: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
    pub const NUMBERING: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
    pub const FOOTNOTES: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.footnotes+xml";
}

/// Relationship type URIs.
pub mod rel_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const NUMBERING: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
    pub const FOOTNOTES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footnotes";
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
}

/// Archive entry holding the content-type manifest.
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
/// Archive entry holding the package-level relationships.
pub const ROOT_RELS_PATH: &str = "_rels/.rels";

/// A named unit of content inside the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    path: String,
    content_type: String,
    data: Vec<u8>,
    relationships: Relationships,
}

impl Part {
    /// Create a part; the path is canonicalized (no leading `/`, forward slashes).
    ///
    /// `content_type` is the type the manifest must resolve for this part.
    pub fn new(path: &str, content_type: &str, data: Vec<u8>) -> Self {
        Self {
            path: canonical_path(path),
            content_type: content_type.to_string(),
            data,
            relationships: Relationships::new(),
        }
    }

    /// Attach outgoing relationships.
    pub fn with_relationships(mut self, relationships: Relationships) -> Self {
        self.relationships = relationships;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Declared content type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn relationships_mut(&mut self) -> &mut Relationships {
        &mut self.relationships
    }

    /// Archive path of this part's relationships entry.
    pub fn rels_path(&self) -> String {
        rels_path_for(&self.path)
    }

    /// Check if this part's name matches `path`. Part names compare
    /// case-insensitively and the leading `/` is optional.
    pub fn is_named(&self, path: &str) -> bool {
        self.path
            .eq_ignore_ascii_case(path.replace('\\', "/").trim_start_matches('/'))
    }

    /// Check if the part content is XML by extension.
    pub fn is_xml(&self) -> bool {
        self.path.ends_with(".xml") || self.path.ends_with(".rels")
    }
}

/// Canonical form of a part name: forward slashes, no leading `/`.
pub fn canonical_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

/// Relationships entry path for a part (`word/document.xml` ->
/// `word/_rels/document.xml.rels`); the empty path names the package root.
pub fn rels_path_for(part_path: &str) -> String {
    if part_path.is_empty() || part_path == "/" {
        return ROOT_RELS_PATH.to_string();
    }
    let path = Path::new(part_path);
    let filename = path.file_name().unwrap_or_default().to_string_lossy();
    match path.parent().map(|p| p.to_string_lossy()) {
        Some(parent) if !parent.is_empty() => format!("{}/_rels/{}.rels", parent, filename),
        _ => format!("_rels/{}.rels", filename),
    }
}

/// Resolve a relationship target against the part that owns it.
///
/// Absolute targets (leading `/`) are package-rooted; `..` pops a segment.
pub fn resolve_path(base: &str, relative: &str) -> String {
    if let Some(stripped) = relative.strip_prefix('/') {
        return stripped.to_string();
    }

    let base_path = Path::new(base);
    let base_dir = base_path.parent().unwrap_or(Path::new(""));

    let mut result = base_dir.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            std::path::Component::ParentDir => {
                result.pop();
            }
            std::path::Component::Normal(c) => {
                result.push(c);
            }
            _ => {}
        }
    }

    result.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        assert_eq!(resolve_path("word/document.xml", "styles.xml"), "word/styles.xml");
        assert_eq!(
            resolve_path("word/document.xml", "../customXml/item1.xml"),
            "customXml/item1.xml"
        );
        assert_eq!(resolve_path("", "word/document.xml"), "word/document.xml");
        assert_eq!(
            resolve_path("word/document.xml", "/word/numbering.xml"),
            "word/numbering.xml"
        );
    }

    #[test]
    fn test_rels_path() {
        assert_eq!(rels_path_for("word/document.xml"), "word/_rels/document.xml.rels");
        assert_eq!(rels_path_for("notes.xml"), "_rels/notes.xml.rels");
        assert_eq!(rels_path_for(""), "_rels/.rels");
    }

    #[test]
    fn test_canonical_path() {
        let part = Part::new("/word\\styles.xml", content_type::STYLES, Vec::new());
        assert_eq!(part.path(), "word/styles.xml");
        assert_eq!(part.content_type(), content_type::STYLES);
        assert!(part.is_xml());
        assert!(part.is_named("/Word/Styles.XML"));
        assert!(!part.is_named("word/styles.xml.rels"));
    }
}
