//! Model descriptors.
//!
//! A [`ModelDescriptor`] is the explicit registration record for one
//! plugin model: identifier, display metadata, parameter table, and the
//! pure kernel entry points. Descriptors are plain values; building one
//! has no side effects and registration is a separate, explicit step.

use crate::error::{ModelError, ModelResult};
use crate::params::Parameter;

/// 1-D kernel: `Iq(q, params) -> intensity`, parameters in table order.
pub type IqFn = fn(f64, &[f64]) -> f64;

/// 2-D kernel: `Iqxy(qx, qy, params) -> intensity`.
pub type IqxyFn = fn(f64, f64, &[f64]) -> f64;

/// Derived scalar quantity over the parameter vector (`form_volume`,
/// effective radius, volume ratio). Reads the geometry parameters it
/// needs and ignores the rest.
pub type DerivedFn = fn(&[f64]) -> f64;

/// Registration record for one scattering model.
///
/// # Example
///
/// ```rust
/// use kratky_core::model::ModelDescriptor;
/// use kratky_core::params::{ParamKind, Parameter};
///
/// fn porod(q: f64, params: &[f64]) -> f64 {
///     params[0] * q.powf(-4.0)
/// }
///
/// let model = ModelDescriptor::new("porod", "Porod tail", porod)
///     .with_category("shape-independent")
///     .with_parameters(vec![Parameter::new(
///         "prefactor", "", 1.0, [0.0, f64::INFINITY], ParamKind::Scalar, "Porod prefactor",
///     )]);
/// assert!(model.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct ModelDescriptor {
    /// Unique model identifier.
    pub name: &'static str,
    /// One-line display title.
    pub title: &'static str,
    /// Longer description for the host's model browser.
    pub description: &'static str,
    /// Free-text classification tag (e.g. `"shape:sphere"`).
    pub category: &'static str,
    /// Ordered parameter table.
    pub parameters: Vec<Parameter>,
    /// 1-D kernel.
    pub iq: IqFn,
    /// Optional oriented kernel.
    pub iqxy: Option<IqxyFn>,
    /// Optional particle volume; when present the host divides `Iq` by it.
    pub form_volume: Option<DerivedFn>,
    /// Optional effective radius for structure-factor combination.
    pub effective_radius: Option<DerivedFn>,
    /// Optional volume ratio for structure-factor combination.
    pub volume_ratio: Option<DerivedFn>,
    /// Representative parameter overrides for an initial plot.
    pub demo: Vec<(&'static str, f64)>,
}

impl ModelDescriptor {
    /// Creates a descriptor with the mandatory fields; everything else is
    /// attached with the `with_*` builders.
    #[must_use]
    pub fn new(name: &'static str, title: &'static str, iq: IqFn) -> Self {
        Self {
            name,
            title,
            description: "",
            category: "",
            parameters: Vec::new(),
            iq,
            iqxy: None,
            form_volume: None,
            effective_radius: None,
            volume_ratio: None,
            demo: Vec::new(),
        }
    }

    /// Sets the long description.
    #[must_use]
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Sets the category tag.
    #[must_use]
    pub fn with_category(mut self, category: &'static str) -> Self {
        self.category = category;
        self
    }

    /// Sets the parameter table.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Attaches the oriented kernel.
    #[must_use]
    pub fn with_iqxy(mut self, iqxy: IqxyFn) -> Self {
        self.iqxy = Some(iqxy);
        self
    }

    /// Attaches the particle volume used for host normalisation.
    #[must_use]
    pub fn with_form_volume(mut self, form_volume: DerivedFn) -> Self {
        self.form_volume = Some(form_volume);
        self
    }

    /// Attaches the effective radius.
    #[must_use]
    pub fn with_effective_radius(mut self, effective_radius: DerivedFn) -> Self {
        self.effective_radius = Some(effective_radius);
        self
    }

    /// Attaches the volume ratio.
    #[must_use]
    pub fn with_volume_ratio(mut self, volume_ratio: DerivedFn) -> Self {
        self.volume_ratio = Some(volume_ratio);
        self
    }

    /// Sets the demo parameter overrides.
    #[must_use]
    pub fn with_demo(mut self, demo: Vec<(&'static str, f64)>) -> Self {
        self.demo = demo;
        self
    }

    /// Index of a parameter in the table.
    #[must_use]
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }

    /// Default parameter vector, in table order.
    #[must_use]
    pub fn defaults(&self) -> Vec<f64> {
        self.parameters.iter().map(|p| p.default).collect()
    }

    /// True when the model defines an oriented kernel.
    #[must_use]
    pub fn supports_2d(&self) -> bool {
        self.iqxy.is_some()
    }

    /// Checks the table invariants: unique names, ordered bounds, default
    /// inside bounds, and demo overrides that name real parameters.
    pub fn validate(&self) -> ModelResult<()> {
        for (i, p) in self.parameters.iter().enumerate() {
            if p.lower > p.upper {
                return Err(ModelError::invalid_table(
                    self.name,
                    format!("parameter '{}' has lower > upper", p.name),
                ));
            }
            if !p.default_in_bounds() {
                return Err(ModelError::invalid_table(
                    self.name,
                    format!("parameter '{}' default outside bounds", p.name),
                ));
            }
            if self.parameters[..i].iter().any(|q| q.name == p.name) {
                return Err(ModelError::invalid_table(
                    self.name,
                    format!("duplicate parameter '{}'", p.name),
                ));
            }
        }
        for (name, _) in &self.demo {
            if self.param_index(name).is_none() {
                return Err(ModelError::invalid_table(
                    self.name,
                    format!("demo override names unknown parameter '{name}'"),
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("parameters", &self.parameters.len())
            .field("supports_2d", &self.supports_2d())
            .finish()
    }
}
