//! Abstract numbering definitions, levels, and numbering instances.

use super::format::NumberFormat;
use crate::error::{Error, Result};
use crate::model::{Alignment, Indentation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of levels in one abstract definition (`w:ilvl` 0..=8).
pub const MAX_LEVELS: usize = 9;

/// Identifier of an abstract numbering definition (`w:abstractNumId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbstractNumId(pub u32);

/// Identifier of a numbering instance (`w:numId`). Zero is reserved by the
/// format to mean "no numbering" and is never allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumId(pub u32);

impl std::fmt::Display for NumId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One indentation tier of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Level index (0-8)
    pub index: u8,

    /// Numeric format
    pub format: NumberFormat,

    /// First counter value (ignored for bullets)
    pub start: u32,

    /// Label template, e.g. "%1." or "%1.%2.%3"; the glyph itself for bullets
    pub template: String,

    /// Label justification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<Alignment>,

    /// Paragraph indentation applied to items at this level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<Indentation>,
}

impl Level {
    /// Create a numbered level starting at 1.
    pub fn numbered(index: u8, format: NumberFormat, template: impl Into<String>) -> Self {
        Self {
            index,
            format,
            start: 1,
            template: template.into(),
            justification: None,
            indent: None,
        }
    }

    /// Create a bullet level emitting `glyph` for every item.
    pub fn bullet(index: u8, glyph: impl Into<String>) -> Self {
        Self {
            index,
            format: NumberFormat::Bullet,
            start: 1,
            template: glyph.into(),
            justification: None,
            indent: None,
        }
    }

    /// Set the start value.
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Set a left indent and hanging indent in twips.
    pub fn with_indent(mut self, left: i32, hanging: i32) -> Self {
        self.indent = Some(Indentation {
            left: Some(left),
            hanging: Some(hanging),
            ..Default::default()
        });
        self
    }

    /// Set the label justification.
    pub fn with_justification(mut self, justification: Alignment) -> Self {
        self.justification = Some(justification);
        self
    }

    /// Ancestor placeholders referenced by the template, as 1-based level numbers.
    ///
    /// Fails on `%0`, which names no level.
    pub fn placeholders(&self) -> Result<Vec<u8>> {
        let mut found = Vec::new();
        let mut chars = self.template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                continue;
            }
            match chars.peek().and_then(|d| d.to_digit(10)) {
                Some(0) => {
                    return Err(Error::definition(format!(
                        "level {} template {:?} references %0",
                        self.index, self.template
                    )));
                }
                Some(k) => {
                    found.push(k as u8);
                    chars.next();
                }
                None => {}
            }
        }
        Ok(found)
    }

    fn validate(&self, expected_index: usize) -> Result<()> {
        if self.index as usize != expected_index {
            return Err(Error::definition(format!(
                "level indices must be contiguous from 0: expected {}, found {}",
                expected_index, self.index
            )));
        }

        let placeholders = self.placeholders()?;
        if self.format.is_bullet() {
            if self.template.is_empty() {
                return Err(Error::definition(format!(
                    "bullet level {} has no glyph",
                    self.index
                )));
            }
            if !placeholders.is_empty() {
                return Err(Error::definition(format!(
                    "bullet level {} template {:?} contains placeholders",
                    self.index, self.template
                )));
            }
            return Ok(());
        }

        if self.start == 0 {
            return Err(Error::definition(format!(
                "level {} start value must be positive",
                self.index
            )));
        }
        if let Some(k) = placeholders.iter().find(|&&k| k > self.index + 1) {
            return Err(Error::definition(format!(
                "level {} template {:?} references deeper level %{}",
                self.index, self.template, k
            )));
        }
        Ok(())
    }
}

/// A reusable list template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractNumbering {
    /// Definition ID
    pub id: AbstractNumId,
    /// Levels, index 0 first
    pub levels: Vec<Level>,
}

impl AbstractNumbering {
    /// Get a level by index.
    pub fn level(&self, index: u8) -> Option<&Level> {
        self.levels.get(index as usize)
    }

    /// Render the label of `level` from a counter array.
    ///
    /// Each `%k` is replaced by `counters[k - 1]` in level `k - 1`'s own
    /// format. Bullet levels return their glyph.
    pub fn render_label(&self, level: u8, counters: &[u32]) -> String {
        let Some(lvl) = self.level(level) else {
            return String::new();
        };
        if lvl.format.is_bullet() {
            return lvl.template.clone();
        }

        let mut label = String::with_capacity(lvl.template.len() + 4);
        let mut chars = lvl.template.chars().peekable();
        while let Some(c) = chars.next() {
            let depth = match (c, chars.peek().and_then(|d| d.to_digit(10))) {
                ('%', Some(k)) if k >= 1 => k as usize - 1,
                _ => {
                    label.push(c);
                    continue;
                }
            };
            chars.next();
            let value = counters.get(depth).copied().unwrap_or(0);
            let format = self
                .levels
                .get(depth)
                .map(|l| l.format)
                .unwrap_or_default();
            label.push_str(&format.format(value));
        }
        label
    }

    fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(Error::definition(format!(
                "abstract numbering {} has no levels",
                self.id.0
            )));
        }
        if self.levels.len() > MAX_LEVELS {
            return Err(Error::definition(format!(
                "abstract numbering {} has {} levels (max {})",
                self.id.0,
                self.levels.len(),
                MAX_LEVELS
            )));
        }
        for (i, level) in self.levels.iter().enumerate() {
            level.validate(i)?;
        }
        Ok(())
    }
}

/// A concrete, document-visible list bound to one abstract definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingInstance {
    /// Numbering ID referenced by paragraphs
    pub id: NumId,
    /// Bound abstract definition
    pub abstract_id: AbstractNumId,
    /// Per-level start overrides (`w:lvlOverride/w:startOverride`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub start_overrides: BTreeMap<u8, u32>,
}

impl NumberingInstance {
    /// Effective start value for a level of the bound definition.
    pub fn start_for(&self, level: &Level) -> u32 {
        self.start_overrides
            .get(&level.index)
            .copied()
            .unwrap_or(level.start)
    }
}

/// All abstract definitions and instances of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingModel {
    /// Abstract definitions in ID order
    #[serde(default)]
    pub abstracts: Vec<AbstractNumbering>,
    /// Instances in ID order
    #[serde(default)]
    pub instances: Vec<NumberingInstance>,
}

impl NumberingModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the model defines nothing.
    pub fn is_empty(&self) -> bool {
        self.abstracts.is_empty() && self.instances.is_empty()
    }

    /// Validate and register an abstract definition, returning its ID.
    pub fn add_abstract(&mut self, levels: Vec<Level>) -> Result<AbstractNumId> {
        let id = AbstractNumId(
            self.abstracts
                .iter()
                .map(|a| a.id.0 + 1)
                .max()
                .unwrap_or(0),
        );
        self.insert_abstract(AbstractNumbering { id, levels })?;
        Ok(id)
    }

    /// Validate and register an abstract definition under a caller-chosen ID.
    pub fn insert_abstract(&mut self, definition: AbstractNumbering) -> Result<()> {
        definition.validate()?;
        if self.abstract_numbering(definition.id).is_some() {
            return Err(Error::definition(format!(
                "duplicate abstract numbering id {}",
                definition.id.0
            )));
        }
        tracing::trace!(
            id = definition.id.0,
            levels = definition.levels.len(),
            "abstract numbering registered"
        );
        self.abstracts.push(definition);
        self.abstracts.sort_by_key(|a| a.id);
        Ok(())
    }

    /// Bind a new numbering instance to an abstract definition.
    pub fn add_instance(&mut self, abstract_id: AbstractNumId) -> Result<NumId> {
        self.add_instance_with_overrides(abstract_id, BTreeMap::new())
    }

    /// Bind a new numbering instance with per-level start overrides.
    pub fn add_instance_with_overrides(
        &mut self,
        abstract_id: AbstractNumId,
        start_overrides: BTreeMap<u8, u32>,
    ) -> Result<NumId> {
        let id = NumId(
            self.instances
                .iter()
                .map(|i| i.id.0 + 1)
                .max()
                .unwrap_or(1),
        );
        self.insert_instance(NumberingInstance {
            id,
            abstract_id,
            start_overrides,
        })?;
        Ok(id)
    }

    /// Register an instance under a caller-chosen ID.
    pub fn insert_instance(&mut self, instance: NumberingInstance) -> Result<()> {
        if instance.id.0 == 0 {
            return Err(Error::definition("numbering instance id 0 is reserved"));
        }
        if self.instance(instance.id).is_some() {
            return Err(Error::definition(format!(
                "duplicate numbering instance id {}",
                instance.id
            )));
        }
        let definition = self.abstract_numbering(instance.abstract_id).ok_or_else(|| {
            Error::definition(format!(
                "instance {} binds unknown abstract numbering {}",
                instance.id, instance.abstract_id.0
            ))
        })?;
        for (&level, &start) in &instance.start_overrides {
            if definition.level(level).is_none() {
                return Err(Error::definition(format!(
                    "instance {} overrides undefined level {}",
                    instance.id, level
                )));
            }
            if start == 0 {
                return Err(Error::definition(format!(
                    "instance {} start override for level {} must be positive",
                    instance.id, level
                )));
            }
        }
        self.instances.push(instance);
        self.instances.sort_by_key(|i| i.id);
        Ok(())
    }

    /// Define a list and bind one instance to it in a single step.
    pub fn add_list(&mut self, levels: Vec<Level>) -> Result<NumId> {
        let abstract_id = self.add_abstract(levels)?;
        self.add_instance(abstract_id)
    }

    /// Get an abstract definition by ID.
    pub fn abstract_numbering(&self, id: AbstractNumId) -> Option<&AbstractNumbering> {
        self.abstracts.iter().find(|a| a.id == id)
    }

    /// Get an instance by ID.
    pub fn instance(&self, id: NumId) -> Option<&NumberingInstance> {
        self.instances.iter().find(|i| i.id == id)
    }

    /// Resolve an instance to its definition.
    pub fn definition_for(&self, id: NumId) -> Result<(&NumberingInstance, &AbstractNumbering)> {
        let instance = self.instance(id).ok_or(Error::UnknownInstance(id.0))?;
        let definition = self
            .abstract_numbering(instance.abstract_id)
            .ok_or(Error::UnknownInstance(id.0))?;
        Ok((instance, definition))
    }

    /// Look up the level a list paragraph refers to.
    pub fn level(&self, id: NumId, level: u8) -> Result<&Level> {
        let (_, definition) = self.definition_for(id)?;
        definition.level(level).ok_or(Error::InvalidLevel {
            num_id: id.0,
            level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross_level() -> Vec<Level> {
        vec![
            Level::numbered(0, NumberFormat::Decimal, "%1."),
            Level::numbered(1, NumberFormat::LowerLetter, "%1.%2"),
            Level::numbered(2, NumberFormat::LowerRoman, "%1.%2.%3"),
        ]
    }

    #[test]
    fn test_add_list_allocates_ids() {
        let mut model = NumberingModel::new();
        let first = model.add_list(cross_level()).unwrap();
        let second = model.add_list(vec![Level::bullet(0, "\u{2022}")]).unwrap();

        assert_eq!(first, NumId(1));
        assert_eq!(second, NumId(2));
        assert_eq!(model.abstracts[0].id, AbstractNumId(0));
        assert_eq!(model.abstracts[1].id, AbstractNumId(1));
        assert_eq!(model.level(first, 2).unwrap().format, NumberFormat::LowerRoman);
    }

    #[test]
    fn test_rejects_zero_start() {
        let mut model = NumberingModel::new();
        let err = model
            .add_abstract(vec![Level::numbered(0, NumberFormat::Decimal, "%1.").with_start(0)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDefinition(_)));
    }

    #[test]
    fn test_bullet_start_is_ignored() {
        let mut model = NumberingModel::new();
        assert!(model
            .add_abstract(vec![Level::bullet(0, "-").with_start(0)])
            .is_ok());
    }

    #[test]
    fn test_rejects_non_contiguous_levels() {
        let mut model = NumberingModel::new();
        let err = model
            .add_abstract(vec![
                Level::numbered(0, NumberFormat::Decimal, "%1."),
                Level::numbered(2, NumberFormat::Decimal, "%3."),
            ])
            .unwrap_err();
        assert!(err.to_string().contains("contiguous"));
    }

    #[test]
    fn test_rejects_deeper_placeholder() {
        let mut model = NumberingModel::new();
        let err = model
            .add_abstract(vec![Level::numbered(0, NumberFormat::Decimal, "%1.%2")])
            .unwrap_err();
        assert!(err.to_string().contains("%2"));

        let err = model
            .add_abstract(vec![Level::numbered(0, NumberFormat::Decimal, "%0")])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDefinition(_)));
    }

    #[test]
    fn test_rejects_bullet_placeholders_and_empty_glyph() {
        let mut model = NumberingModel::new();
        assert!(model.add_abstract(vec![Level::bullet(0, "%1")]).is_err());
        assert!(model.add_abstract(vec![Level::bullet(0, "")]).is_err());
    }

    #[test]
    fn test_rejects_too_many_levels() {
        let levels = (0..10)
            .map(|i| Level::numbered(i, NumberFormat::Decimal, format!("%{}", i.min(8) + 1)))
            .collect();
        let mut model = NumberingModel::new();
        assert!(model.add_abstract(levels).is_err());
    }

    #[test]
    fn test_literal_percent_is_allowed() {
        let level = Level::numbered(0, NumberFormat::Decimal, "%1%");
        assert_eq!(level.placeholders().unwrap(), vec![1]);
    }

    #[test]
    fn test_instance_validation() {
        let mut model = NumberingModel::new();
        let abs = model.add_abstract(cross_level()).unwrap();

        assert!(model.add_instance(AbstractNumId(42)).is_err());

        let mut overrides = BTreeMap::new();
        overrides.insert(5, 3);
        assert!(model.add_instance_with_overrides(abs, overrides).is_err());

        let mut overrides = BTreeMap::new();
        overrides.insert(0, 5);
        let id = model.add_instance_with_overrides(abs, overrides).unwrap();
        let (instance, definition) = model.definition_for(id).unwrap();
        assert_eq!(instance.start_for(&definition.levels[0]), 5);
        assert_eq!(instance.start_for(&definition.levels[1]), 1);
    }

    #[test]
    fn test_level_lookup_errors() {
        let mut model = NumberingModel::new();
        let id = model.add_list(cross_level()).unwrap();

        assert!(matches!(
            model.level(NumId(9), 0),
            Err(Error::UnknownInstance(9))
        ));
        assert!(matches!(
            model.level(id, 3),
            Err(Error::InvalidLevel { num_id: 1, level: 3 })
        ));
    }

    #[test]
    fn test_render_label_uses_each_levels_format() {
        let mut model = NumberingModel::new();
        let abs = model
            .add_abstract(vec![
                Level::numbered(0, NumberFormat::UpperRoman, "%1."),
                Level::numbered(1, NumberFormat::UpperLetter, "%1-%2)"),
            ])
            .unwrap();
        let definition = model.abstract_numbering(abs).unwrap();
        assert_eq!(definition.render_label(1, &[4, 2]), "IV-B)");
        assert_eq!(definition.render_label(0, &[4, 2]), "IV.");
    }
}
