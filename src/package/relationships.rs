//! Part-to-part relationships (`.rels` entries).

use crate::docx::xml::XmlElement;
use crate::error::{Error, Result};

const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Whether a relationship target lives inside the package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetMode {
    #[default]
    Internal,
    External,
}

/// A relationship entry from a .rels file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path relative to the source part, or a URL
    pub target: String,
    /// Internal or external target
    pub target_mode: TargetMode,
}

impl Relationship {
    pub fn is_external(&self) -> bool {
        self.target_mode == TargetMode::External
    }
}

/// Relationships of one source part, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationships {
    entries: Vec<Relationship>,
    next_id: u64,
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new()
    }
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a relationship with the next free `rId{n}` and return the ID.
    pub fn add(&mut self, rel_type: &str, target: &str, target_mode: TargetMode) -> String {
        let mut n = self.next_id.max(1);
        if n == u64::MAX {
            // An inserted ID pinned the counter; take the lowest free number.
            n = 1;
        }
        while self.get(&format!("rId{}", n)).is_some() {
            n += 1;
        }
        self.next_id = n.saturating_add(1);
        let id = format!("rId{}", n);

        self.entries.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            target_mode,
        });
        id
    }

    /// Insert a relationship with a caller-chosen ID.
    pub fn insert(&mut self, rel: Relationship) -> Result<()> {
        if self.get(&rel.id).is_some() {
            return Err(Error::integrity(format!(
                "duplicate relationship id {}",
                rel.id
            )));
        }
        if let Some(n) = rel.id.strip_prefix("rId").and_then(|n| n.parse::<u64>().ok()) {
            self.next_id = self.next_id.max(n.saturating_add(1));
        }
        self.entries.push(rel);
        Ok(())
    }

    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.id == id)
    }

    /// Get relationships by type.
    pub fn get_by_type(&self, rel_type: &str) -> Vec<&Relationship> {
        self.entries.iter().filter(|r| r.rel_type == rel_type).collect()
    }

    /// Find an existing relationship with the same type and target.
    pub fn find(&self, rel_type: &str, target: &str) -> Option<&Relationship> {
        self.entries
            .iter()
            .find(|r| r.rel_type == rel_type && r.target == target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the `<Relationships>` element.
    pub fn to_element(&self) -> XmlElement {
        let mut root = XmlElement::new("Relationships").attr("xmlns", NS_PACKAGE_RELS);
        for rel in &self.entries {
            let mut el = XmlElement::new("Relationship")
                .attr("Id", &rel.id)
                .attr("Type", &rel.rel_type)
                .attr("Target", &rel.target);
            if rel.is_external() {
                el.push_attr("TargetMode", "External");
            }
            root.push(el);
        }
        root
    }

    /// Serialize as a `.rels` entry.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        self.to_element().to_part_bytes()
    }

    /// Parse a `.rels` entry.
    pub fn parse(content: &str) -> Result<Self> {
        let mut rels = Relationships::new();
        if content.trim().is_empty() {
            return Ok(rels);
        }

        let mut reader = quick_xml::Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = String::new();
                    let mut rel_type = String::new();
                    let mut target = String::new();
                    let mut target_mode = TargetMode::Internal;

                    for attr in e.attributes().flatten() {
                        let value = attr
                            .unescape_value()
                            .map(|v| v.into_owned())
                            .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
                        match attr.key.as_ref() {
                            b"Id" => id = value,
                            b"Type" => rel_type = value,
                            b"Target" => target = value,
                            b"TargetMode" if value.eq_ignore_ascii_case("external") => {
                                target_mode = TargetMode::External;
                            }
                            _ => {}
                        }
                    }

                    if !id.is_empty() {
                        rels.insert(Relationship {
                            id,
                            rel_type,
                            target,
                            target_mode,
                        })?;
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }
}
