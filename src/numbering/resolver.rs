//! List label resolution.

use super::definition::{NumId, NumberingModel};
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Stateful label engine for one document-build session.
///
/// Each numbering instance gets its own counter array on its first
/// [`advance`](Self::advance), so instances bound to the same abstract
/// definition never share state.
#[derive(Debug, Clone, Default)]
pub struct NumberingResolver {
    model: NumberingModel,
    counters: BTreeMap<NumId, Vec<u32>>,
}

impl NumberingResolver {
    /// Create a resolver over a numbering model.
    pub fn new(model: NumberingModel) -> Self {
        Self {
            model,
            counters: BTreeMap::new(),
        }
    }

    /// The numbering model being resolved.
    pub fn model(&self) -> &NumberingModel {
        &self.model
    }

    /// Mutable access to the model, for defining lists mid-session.
    ///
    /// Counters of existing instances are kept.
    pub fn model_mut(&mut self) -> &mut NumberingModel {
        &mut self.model
    }

    /// Give the model back, discarding counter state.
    pub fn into_model(self) -> NumberingModel {
        self.model
    }

    /// Record one list item at `level` of `num_id` and return its label.
    ///
    /// The touched level is incremented and every deeper level is reset to
    /// its start value minus one, whether or not it was used before.
    pub fn advance(&mut self, num_id: NumId, level: u8) -> Result<String> {
        let (instance, definition) = self.model.definition_for(num_id)?;
        let depth = level as usize;
        if depth >= definition.levels.len() {
            return Err(Error::InvalidLevel {
                num_id: num_id.0,
                level,
            });
        }

        let starts: Vec<u32> = definition
            .levels
            .iter()
            .map(|l| instance.start_for(l).saturating_sub(1))
            .collect();
        let counters = self
            .counters
            .entry(num_id)
            .or_insert_with(|| starts.clone());

        counters[depth] += 1;
        for d in depth + 1..counters.len() {
            counters[d] = starts[d];
        }

        let label = definition.render_label(level, counters);
        tracing::trace!(num_id = num_id.0, level, %label, "list item resolved");
        Ok(label)
    }

    /// Current counter values of an instance, if it has been advanced.
    pub fn counters(&self, num_id: NumId) -> Option<&[u32]> {
        self.counters.get(&num_id).map(Vec::as_slice)
    }

    /// Discard all counter state.
    pub fn reset(&mut self) {
        self.counters.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::{Level, NumberFormat};
    use std::collections::BTreeMap;

    fn cross_level_model() -> (NumberingModel, NumId) {
        let mut model = NumberingModel::new();
        let id = model
            .add_list(vec![
                Level::numbered(0, NumberFormat::Decimal, "%1."),
                Level::numbered(1, NumberFormat::LowerLetter, "%1.%2"),
                Level::numbered(2, NumberFormat::LowerRoman, "%1.%2.%3"),
            ])
            .unwrap();
        (model, id)
    }

    #[test]
    fn test_first_three_items() {
        let mut model = NumberingModel::new();
        let id = model
            .add_list(vec![Level::numbered(0, NumberFormat::Decimal, "%1")])
            .unwrap();
        let mut resolver = NumberingResolver::new(model);

        assert_eq!(resolver.advance(id, 0).unwrap(), "1");
        assert_eq!(resolver.advance(id, 0).unwrap(), "2");
        assert_eq!(resolver.advance(id, 0).unwrap(), "3");
    }

    #[test]
    fn test_returning_to_parent_restarts_child() {
        let mut model = NumberingModel::new();
        let id = model
            .add_list(vec![
                Level::numbered(0, NumberFormat::Decimal, "%1"),
                Level::numbered(1, NumberFormat::Decimal, "%2"),
            ])
            .unwrap();
        let mut resolver = NumberingResolver::new(model);

        resolver.advance(id, 0).unwrap();
        assert_eq!(resolver.advance(id, 1).unwrap(), "1");
        assert_eq!(resolver.advance(id, 1).unwrap(), "2");
        resolver.advance(id, 0).unwrap();
        assert_eq!(resolver.advance(id, 1).unwrap(), "1");
    }

    #[test]
    fn test_cross_level_labels() {
        let (model, id) = cross_level_model();
        let mut resolver = NumberingResolver::new(model);

        let labels: Vec<String> = [0, 1, 1, 2, 2, 1, 0]
            .iter()
            .map(|&lvl| resolver.advance(id, lvl).unwrap())
            .collect();
        assert_eq!(
            labels,
            vec!["1.", "1.a", "1.b", "1.b.i", "1.b.ii", "1.c", "2."]
        );
    }

    #[test]
    fn test_instances_sharing_definition_are_independent() {
        let (mut model, a) = cross_level_model();
        let abstract_id = model.instance(a).unwrap().abstract_id;
        let b = model.add_instance(abstract_id).unwrap();
        let mut resolver = NumberingResolver::new(model);

        assert_eq!(resolver.advance(a, 0).unwrap(), "1.");
        assert_eq!(resolver.advance(b, 0).unwrap(), "1.");
        assert_eq!(resolver.advance(a, 0).unwrap(), "2.");
        assert_eq!(resolver.advance(b, 0).unwrap(), "2.");
        assert_eq!(resolver.advance(b, 0).unwrap(), "3.");
        assert_eq!(resolver.advance(a, 0).unwrap(), "3.");
    }

    #[test]
    fn test_skipping_a_level_uses_reset_value() {
        let (model, id) = cross_level_model();
        let mut resolver = NumberingResolver::new(model);

        resolver.advance(id, 0).unwrap();
        // Level 1 was never advanced: its counter sits at start - 1, which
        // renders empty in a letter format.
        assert_eq!(resolver.advance(id, 2).unwrap(), "1..i");
        assert_eq!(resolver.counters(id).unwrap(), &[1, 0, 1]);

        assert_eq!(resolver.advance(id, 1).unwrap(), "1.a");
        assert_eq!(resolver.advance(id, 2).unwrap(), "1.a.i");
    }

    #[test]
    fn test_any_advance_resets_deeper_levels() {
        let (model, id) = cross_level_model();
        let mut resolver = NumberingResolver::new(model);

        resolver.advance(id, 0).unwrap();
        resolver.advance(id, 1).unwrap();
        resolver.advance(id, 2).unwrap();
        resolver.advance(id, 2).unwrap();
        // Same-level advance at 1 still restarts level 2.
        assert_eq!(resolver.advance(id, 1).unwrap(), "1.b");
        assert_eq!(resolver.advance(id, 2).unwrap(), "1.b.i");
    }

    #[test]
    fn test_custom_start_and_override() {
        let mut model = NumberingModel::new();
        let abs = model
            .add_abstract(vec![
                Level::numbered(0, NumberFormat::Decimal, "%1.").with_start(5),
                Level::numbered(1, NumberFormat::UpperLetter, "%2)").with_start(3),
            ])
            .unwrap();
        let plain = model.add_instance(abs).unwrap();
        let mut overrides = BTreeMap::new();
        overrides.insert(0, 10);
        let overridden = model.add_instance_with_overrides(abs, overrides).unwrap();
        let mut resolver = NumberingResolver::new(model);

        assert_eq!(resolver.advance(plain, 0).unwrap(), "5.");
        assert_eq!(resolver.advance(plain, 1).unwrap(), "C)");
        assert_eq!(resolver.advance(plain, 1).unwrap(), "D)");
        assert_eq!(resolver.advance(overridden, 0).unwrap(), "10.");
        assert_eq!(resolver.advance(plain, 0).unwrap(), "6.");
        assert_eq!(resolver.advance(plain, 1).unwrap(), "C)");
    }

    #[test]
    fn test_bullets_ignore_counters() {
        let mut model = NumberingModel::new();
        let id = model
            .add_list(vec![
                Level::bullet(0, "\u{2022}"),
                Level::bullet(1, "\u{2013}"),
            ])
            .unwrap();
        let mut resolver = NumberingResolver::new(model);

        assert_eq!(resolver.advance(id, 0).unwrap(), "\u{2022}");
        assert_eq!(resolver.advance(id, 1).unwrap(), "\u{2013}");
        assert_eq!(resolver.advance(id, 0).unwrap(), "\u{2022}");
    }

    #[test]
    fn test_misuse_errors() {
        let (model, id) = cross_level_model();
        let mut resolver = NumberingResolver::new(model);

        assert!(matches!(
            resolver.advance(NumId(99), 0),
            Err(Error::UnknownInstance(99))
        ));
        assert!(matches!(
            resolver.advance(id, 3),
            Err(Error::InvalidLevel { num_id: 1, level: 3 })
        ));
        // Failed calls leave no counter state behind.
        assert!(resolver.counters(id).is_none());
    }

    #[test]
    fn test_reset_discards_counters() {
        let (model, id) = cross_level_model();
        let mut resolver = NumberingResolver::new(model);

        resolver.advance(id, 0).unwrap();
        resolver.advance(id, 0).unwrap();
        resolver.reset();
        assert_eq!(resolver.advance(id, 0).unwrap(), "1.");
    }
}
