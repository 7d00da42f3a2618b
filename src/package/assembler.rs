//! Package assembly: integrity checks and archive serialization.

use super::content_types::ContentTypes;
use super::options::WriteOptions;
use super::part::{resolve_path, Part, CONTENT_TYPES_PATH, ROOT_RELS_PATH};
use super::relationships::Relationships;
use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::io::{Cursor, Seek, Write};
use zip::ZipWriter;

/// A set of parts with their relationships and content-type manifest.
///
/// Nothing is checked while parts are added beyond path uniqueness;
/// [`validate`](Self::validate) runs the full integrity pass and every
/// serialization goes through it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    parts: Vec<Part>,
    relationships: Relationships,
    content_types: ContentTypes,
}

impl Package {
    /// Create an empty package with the default content-type manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part. Fails if the canonical path is taken (ignoring ASCII case)
    /// or reserved.
    pub fn add_part(&mut self, part: Part) -> Result<()> {
        check_part_name(part.path())?;
        if self.part(part.path()).is_some() {
            return Err(Error::integrity(format!(
                "duplicate part path {}",
                part.path()
            )));
        }
        self.parts.push(part);
        Ok(())
    }

    /// Get a part by name. Part names compare case-insensitively.
    pub fn part(&self, path: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.is_named(path))
    }

    /// Get a part mutably.
    pub fn part_mut(&mut self, path: &str) -> Option<&mut Part> {
        self.parts.iter_mut().find(|p| p.is_named(path))
    }

    /// Parts in insertion order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Package-level relationships (`_rels/.rels`).
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn relationships_mut(&mut self) -> &mut Relationships {
        &mut self.relationships
    }

    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    pub fn content_types_mut(&mut self) -> &mut ContentTypes {
        &mut self.content_types
    }

    /// Add a manifest override for every part whose declared content type
    /// the extension defaults do not already produce.
    pub fn declare_content_types(&mut self) {
        for part in &self.parts {
            if self.content_types.content_type_for(part.path()) != Some(part.content_type()) {
                self.content_types
                    .add_override(part.path(), part.content_type());
            }
        }
    }

    /// Check package integrity.
    ///
    /// - part paths are unique and none collide with reserved entries
    /// - every internal relationship target names an existing part
    /// - every `r:` attribute inside a part resolves to one of its relationships
    /// - the manifest resolves every part to its declared content type,
    ///   every relationships entry has a content type, and no override
    ///   names a missing part
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for part in &self.parts {
            check_part_name(part.path())?;
            if !seen.insert(part.path().to_ascii_lowercase()) {
                return Err(Error::integrity(format!(
                    "duplicate part path {}",
                    part.path()
                )));
            }
        }

        self.check_targets("", &self.relationships)?;
        for part in &self.parts {
            self.check_targets(part.path(), part.relationships())?;
            if part.is_xml() {
                check_references(part)?;
            }
            match self.content_types.content_type_for(part.path()) {
                Some(ct) if ct == part.content_type() => {}
                Some(ct) => {
                    return Err(Error::integrity(format!(
                        "part {} is declared {} but the manifest gives {}",
                        part.path(),
                        part.content_type(),
                        ct
                    )))
                }
                None => {
                    return Err(Error::integrity(format!(
                        "no content type for part {}",
                        part.path()
                    )))
                }
            }
            if !part.relationships().is_empty()
                && self.content_types.content_type_for(&part.rels_path()).is_none()
            {
                return Err(Error::integrity(format!(
                    "no content type for {}",
                    part.rels_path()
                )));
            }
        }

        if self.content_types.content_type_for(ROOT_RELS_PATH).is_none() {
            return Err(Error::integrity(format!("no content type for {}", ROOT_RELS_PATH)));
        }
        for name in self.content_types.override_parts() {
            if self.part(name).is_none() {
                return Err(Error::integrity(format!(
                    "content type override for missing part {}",
                    name
                )));
            }
        }
        Ok(())
    }

    fn check_targets(&self, source: &str, rels: &Relationships) -> Result<()> {
        for rel in rels.iter().filter(|r| !r.is_external()) {
            let target = resolve_path(source, &rel.target);
            if self.part(&target).is_none() {
                let source = if source.is_empty() { "package" } else { source };
                return Err(Error::integrity(format!(
                    "relationship {} of {} targets missing part {}",
                    rel.id, source, target
                )));
            }
        }
        Ok(())
    }

    /// Archive entry names in write order.
    pub fn entry_names(&self) -> Vec<String> {
        let mut names = vec![CONTENT_TYPES_PATH.to_string(), ROOT_RELS_PATH.to_string()];
        for part in &self.parts {
            names.push(part.path().to_string());
            if !part.relationships().is_empty() {
                names.push(part.rels_path());
            }
        }
        names
    }

    /// Validate and write the archive.
    ///
    /// Entries go out as the manifest, the package relationships, then each
    /// part followed by its relationships entry.
    pub fn write_to<W: Write + Seek>(&self, writer: W, options: &WriteOptions) -> Result<W> {
        self.validate()?;

        let file_options = options.file_options();
        let mut zip = ZipWriter::new(writer);

        zip.start_file(CONTENT_TYPES_PATH, file_options)?;
        zip.write_all(&self.content_types.to_xml()?)?;

        zip.start_file(ROOT_RELS_PATH, file_options)?;
        zip.write_all(&self.relationships.to_xml()?)?;

        for part in &self.parts {
            zip.start_file(part.path(), file_options)?;
            zip.write_all(part.data())?;

            if !part.relationships().is_empty() {
                zip.start_file(part.rels_path(), file_options)?;
                zip.write_all(&part.relationships().to_xml()?)?;
            }
        }

        let writer = zip.finish()?;
        tracing::debug!(parts = self.parts.len(), "package written");
        Ok(writer)
    }

    /// Validate and serialize to bytes.
    pub fn to_bytes(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        Ok(self.write_to(Cursor::new(Vec::new()), options)?.into_inner())
    }
}

fn check_part_name(path: &str) -> Result<()> {
    if path.is_empty() || path.ends_with('/') {
        return Err(Error::integrity(format!("invalid part path {:?}", path)));
    }
    if path == CONTENT_TYPES_PATH || path.ends_with(".rels") {
        return Err(Error::integrity(format!("part path {} is reserved", path)));
    }
    Ok(())
}

/// Check that every `r:*` attribute in a part names one of its relationships.
fn check_references(part: &Part) -> Result<()> {
    let mut reader = quick_xml::Reader::from_reader(part.data());
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) | Ok(quick_xml::events::Event::Empty(e)) => {
                for attr in e.attributes().flatten() {
                    if !attr.key.as_ref().starts_with(b"r:") {
                        continue;
                    }
                    let id = String::from_utf8_lossy(&attr.value);
                    if part.relationships().get(&id).is_none() {
                        return Err(Error::integrity(format!(
                            "{} references undefined relationship {} ({})",
                            part.path(),
                            id,
                            String::from_utf8_lossy(attr.key.as_ref())
                        )));
                    }
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!(
                    "{} at position {}: {}",
                    part.path(),
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}
