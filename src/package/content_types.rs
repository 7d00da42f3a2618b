//! The `[Content_Types].xml` manifest.

use super::part::content_type;
use crate::docx::xml::XmlElement;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// Content types by extension default and by part override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypes {
    /// Default content types by extension (e.g., "xml" -> "application/xml")
    pub defaults: BTreeMap<String, String>,
    /// Override content types by part name (e.g., "/word/document.xml" -> "...")
    pub overrides: BTreeMap<String, String>,
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTypes {
    /// Create a manifest with the `rels` and `xml` defaults.
    pub fn new() -> Self {
        let mut ct = Self::empty();
        ct.add_default("rels", content_type::RELATIONSHIPS);
        ct.add_default("xml", content_type::XML);
        ct
    }

    /// Create a manifest with no entries.
    pub fn empty() -> Self {
        Self {
            defaults: BTreeMap::new(),
            overrides: BTreeMap::new(),
        }
    }

    /// Map an extension (without the dot) to a content type.
    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults.insert(
            extension.trim_start_matches('.').to_ascii_lowercase(),
            content_type.to_string(),
        );
    }

    /// Map one part to a content type.
    pub fn add_override(&mut self, part_name: &str, content_type: &str) {
        self.overrides
            .insert(normalize(part_name), content_type.to_string());
    }

    /// Get the content type for a part path: override first, then extension.
    /// Part names match without regard to ASCII case.
    pub fn content_type_for(&self, path: &str) -> Option<&str> {
        let key = normalize(path);
        if let Some(ct) = self.overrides.get(&key) {
            return Some(ct);
        }
        if let Some((_, ct)) = self
            .overrides
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&key))
        {
            return Some(ct);
        }
        let name = path.rsplit('/').next().unwrap_or(path);
        let (_, ext) = name.rsplit_once('.')?;
        self.defaults
            .get(&ext.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Part names that have an override, without the leading `/`.
    pub fn override_parts(&self) -> impl Iterator<Item = &str> {
        self.overrides.keys().map(|k| k.trim_start_matches('/'))
    }

    /// Build the `<Types>` element.
    pub fn to_element(&self) -> XmlElement {
        let mut root = XmlElement::new("Types").attr("xmlns", NS_CONTENT_TYPES);
        for (ext, ct) in &self.defaults {
            root.push(
                XmlElement::new("Default")
                    .attr("Extension", ext)
                    .attr("ContentType", ct),
            );
        }
        for (part, ct) in &self.overrides {
            root.push(
                XmlElement::new("Override")
                    .attr("PartName", part)
                    .attr("ContentType", ct),
            );
        }
        root
    }

    /// Serialize the manifest.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        self.to_element().to_part_bytes()
    }

    /// Parse `[Content_Types].xml` from its content.
    pub fn parse(content: &str) -> Result<Self> {
        let mut result = Self::empty();
        let mut reader = quick_xml::Reader::from_str(content);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e)) => {
                    let mut first = None;
                    let mut ct = None;
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).into_owned();
                        match attr.key.as_ref() {
                            b"Extension" | b"PartName" => first = Some(value),
                            b"ContentType" => ct = Some(value),
                            _ => {}
                        }
                    }
                    if let (Some(key), Some(ct)) = (first, ct) {
                        match e.local_name().as_ref() {
                            b"Default" => result.add_default(&key, &ct),
                            b"Override" => result.add_override(&key, &ct),
                            _ => {}
                        }
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(result)
    }
}

fn normalize(part_name: &str) -> String {
    if part_name.starts_with('/') {
        part_name.to_string()
    } else {
        format!("/{}", part_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_prefers_override() {
        let mut ct = ContentTypes::new();
        ct.add_override("word/document.xml", content_type::DOCUMENT);

        assert_eq!(ct.content_type_for("/word/document.xml"), Some(content_type::DOCUMENT));
        assert_eq!(ct.content_type_for("word/document.xml"), Some(content_type::DOCUMENT));
        assert_eq!(ct.content_type_for("Word/Document.XML"), Some(content_type::DOCUMENT));
        assert_eq!(ct.content_type_for("word/other.xml"), Some(content_type::XML));
        assert_eq!(ct.content_type_for("word/_rels/document.xml.rels"), Some(content_type::RELATIONSHIPS));
        assert_eq!(ct.content_type_for("media/image1.png"), None);
        assert_eq!(ct.content_type_for("README"), None);
    }

    #[test]
    fn test_output_is_sorted() {
        let mut ct = ContentTypes::new();
        ct.add_override("/word/styles.xml", content_type::STYLES);
        ct.add_override("/word/document.xml", content_type::DOCUMENT);
        let xml = String::from_utf8(ct.to_xml().unwrap()).unwrap();

        let doc = xml.find("/word/document.xml").unwrap();
        let styles = xml.find("/word/styles.xml").unwrap();
        assert!(doc < styles);
        assert!(xml.find(r#"Extension="rels""#).unwrap() < doc);
    }

    #[test]
    fn test_parse_round_trip() {
        let mut ct = ContentTypes::new();
        ct.add_override("/word/numbering.xml", content_type::NUMBERING);
        let xml = String::from_utf8(ct.to_xml().unwrap()).unwrap();
        assert_eq!(ContentTypes::parse(&xml).unwrap(), ct);
    }
}
