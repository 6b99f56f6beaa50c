//! Model registry.
//!
//! A name-keyed map of [`ModelDescriptor`]s. The host looks models up by
//! name and walks categories for its model browser. The registry itself
//! is immutable once built; the model crate exposes a lazily initialised
//! process-wide instance.

use std::collections::BTreeMap;

use crate::error::{ModelError, ModelResult};
use crate::model::ModelDescriptor;

/// Name-keyed collection of model descriptors.
///
/// # Example
///
/// ```rust
/// use kratky_core::model::ModelDescriptor;
/// use kratky_core::registry::ModelRegistry;
///
/// fn unity(_q: f64, _params: &[f64]) -> f64 {
///     1.0
/// }
///
/// let mut registry = ModelRegistry::new();
/// registry
///     .register(ModelDescriptor::new("unity", "Unit intensity", unity))
///     .unwrap();
/// assert!(registry.get("unity").is_some());
/// ```
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: BTreeMap<&'static str, ModelDescriptor>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            models: BTreeMap::new(),
        }
    }

    /// Registers a descriptor after validating its parameter table.
    ///
    /// Rejects duplicate names: each model identifier maps to exactly one
    /// descriptor for the lifetime of the registry.
    pub fn register(&mut self, model: ModelDescriptor) -> ModelResult<()> {
        model.validate()?;
        if self.models.contains_key(model.name) {
            return Err(ModelError::DuplicateModel {
                name: model.name.into(),
            });
        }
        log::debug!("registering model '{}' ({})", model.name, model.category);
        self.models.insert(model.name, model);
        Ok(())
    }

    /// Looks a model up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.get(name)
    }

    /// Looks a model up by name, erroring when absent.
    pub fn require(&self, name: &str) -> ModelResult<&ModelDescriptor> {
        self.get(name).ok_or_else(|| ModelError::unknown_model(name))
    }

    /// Iterates all registered descriptors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.values()
    }

    /// Registered model names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.models.keys().copied().collect()
    }

    /// Distinct category tags, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&'static str> {
        let mut cats: Vec<_> = self.models.values().map(|m| m.category).collect();
        cats.sort_unstable();
        cats.dedup();
        cats
    }

    /// Descriptors in a given category, in name order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ModelDescriptor> {
        self.models.values().filter(move |m| m.category == category)
    }

    /// Number of registered models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True when no models are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParamKind, Parameter};

    fn unity(_q: f64, _params: &[f64]) -> f64 {
        1.0
    }

    fn sample(name: &'static str, category: &'static str) -> ModelDescriptor {
        ModelDescriptor::new(name, "Sample", unity)
            .with_category(category)
            .with_parameters(vec![Parameter::new(
                "level",
                "",
                1.0,
                [0.0, 2.0],
                ParamKind::Scalar,
                "",
            )])
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ModelRegistry::new();
        registry.register(sample("a", "shape:sphere")).unwrap();
        registry.register(sample("b", "shape:cylinder")).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.get("a").is_some());
        assert!(registry.get("c").is_none());
        assert!(registry.require("c").is_err());
        assert_eq!(registry.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = ModelRegistry::new();
        registry.register(sample("a", "shape:sphere")).unwrap();
        let err = registry.register(sample("a", "shape:sphere"));
        assert!(matches!(err, Err(ModelError::DuplicateModel { .. })));
    }

    #[test]
    fn test_categories() {
        let mut registry = ModelRegistry::new();
        registry.register(sample("a", "shape:sphere")).unwrap();
        registry.register(sample("b", "shape:sphere")).unwrap();
        registry.register(sample("c", "structure-factor")).unwrap();

        assert_eq!(registry.categories(), vec!["shape:sphere", "structure-factor"]);
        assert_eq!(registry.in_category("shape:sphere").count(), 2);
    }

    #[test]
    fn test_invalid_table_rejected() {
        let mut registry = ModelRegistry::new();
        let bad = ModelDescriptor::new("bad", "Bad", unity).with_parameters(vec![Parameter::new(
            "level",
            "",
            5.0,
            [0.0, 2.0],
            ParamKind::Scalar,
            "",
        )]);
        assert!(registry.register(bad).is_err());
        assert!(registry.is_empty());
    }
}
