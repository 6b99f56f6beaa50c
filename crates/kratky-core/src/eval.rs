//! Host-facing evaluation.
//!
//! [`Evaluation`] binds a parameter vector for one model and produces the
//! intensity the host reports:
//!
//! ```text
//! I(q) = scale * Iq(q, params) / V + background
//! ```
//!
//! where `V` is the model's `form_volume` when it defines one and 1
//! otherwise. This is exactly the composition the fitting host applies, so
//! regression fixtures recorded against the host reproduce through this
//! type verbatim.
//!
//! Bounds are the host's responsibility: binding a value outside the
//! declared range is allowed (the kernel is still pure and well-defined,
//! possibly returning `NaN`/`inf` where the mathematics says so), and
//! [`Evaluation::validate_bounds`] is the explicit check a host calls
//! before fitting.

use crate::error::{ModelError, ModelResult};
use crate::model::ModelDescriptor;

/// A model with a bound parameter vector, scale, and background.
#[derive(Debug, Clone)]
pub struct Evaluation<'a> {
    model: &'a ModelDescriptor,
    values: Vec<f64>,
    scale: f64,
    background: f64,
}

impl<'a> Evaluation<'a> {
    /// Binds the model's declared defaults with `scale = 1` and
    /// `background = 0`.
    #[must_use]
    pub fn new(model: &'a ModelDescriptor) -> Self {
        Self {
            model,
            values: model.defaults(),
            scale: 1.0,
            background: 0.0,
        }
    }

    /// Binds defaults, then applies `(name, value)` overrides.
    pub fn with_overrides(
        model: &'a ModelDescriptor,
        overrides: &[(&str, f64)],
    ) -> ModelResult<Self> {
        let mut eval = Self::new(model);
        for &(name, value) in overrides {
            eval.set(name, value)?;
        }
        Ok(eval)
    }

    /// Sets one parameter by name.
    pub fn set(&mut self, name: &str, value: f64) -> ModelResult<()> {
        let index = self
            .model
            .param_index(name)
            .ok_or_else(|| ModelError::unknown_parameter(self.model.name, name))?;
        self.values[index] = value;
        Ok(())
    }

    /// Sets the host scale factor.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the flat background.
    #[must_use]
    pub fn with_background(mut self, background: f64) -> Self {
        self.background = background;
        self
    }

    /// The bound parameter vector, in table order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Checks every bound value against its declared range.
    pub fn validate_bounds(&self) -> ModelResult<()> {
        for (param, &value) in self.model.parameters.iter().zip(&self.values) {
            if !param.contains(value) {
                return Err(ModelError::OutOfBounds {
                    name: param.name.into(),
                    value,
                    lower: param.lower,
                    upper: param.upper,
                });
            }
        }
        Ok(())
    }

    fn volume_norm(&self) -> f64 {
        match self.model.form_volume {
            Some(form_volume) => form_volume(&self.values),
            None => 1.0,
        }
    }

    /// Composed 1-D intensity at a single `q`.
    #[must_use]
    pub fn iq(&self, q: f64) -> f64 {
        self.scale * (self.model.iq)(q, &self.values) / self.volume_norm() + self.background
    }

    /// Composed 1-D intensity over a batch of `q` values, elementwise.
    #[must_use]
    pub fn iq_many(&self, q: &[f64]) -> Vec<f64> {
        // bind the normalisation once per batch
        let norm = self.scale / self.volume_norm();
        q.iter()
            .map(|&q| norm * (self.model.iq)(q, &self.values) + self.background)
            .collect()
    }

    /// Composed oriented intensity at a detector point.
    pub fn iqxy(&self, qx: f64, qy: f64) -> ModelResult<f64> {
        let iqxy = self.model.iqxy.ok_or(ModelError::NoOrientedKernel {
            model: self.model.name.into(),
        })?;
        Ok(self.scale * iqxy(qx, qy, &self.values) / self.volume_norm() + self.background)
    }

    /// Particle volume, when the model defines one.
    #[must_use]
    pub fn form_volume(&self) -> Option<f64> {
        self.model.form_volume.map(|f| f(&self.values))
    }

    /// Effective radius for structure-factor combination, when defined.
    #[must_use]
    pub fn effective_radius(&self) -> Option<f64> {
        self.model.effective_radius.map(|f| f(&self.values))
    }

    /// Volume ratio for structure-factor combination, when defined.
    #[must_use]
    pub fn volume_ratio(&self) -> Option<f64> {
        self.model.volume_ratio.map(|f| f(&self.values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ParamKind, Parameter};
    use approx::assert_relative_eq;

    fn decay(q: f64, params: &[f64]) -> f64 {
        (-params[0] * q).exp()
    }

    fn decay_volume(params: &[f64]) -> f64 {
        params[1]
    }

    fn model() -> ModelDescriptor {
        ModelDescriptor::new("decay", "Exponential decay", decay).with_parameters(vec![
            Parameter::new("rate", "1/Ang", 2.0, [0.0, 100.0], ParamKind::Scalar, ""),
            Parameter::new("volume", "Ang^3", 4.0, [0.0, f64::INFINITY], ParamKind::Volume, ""),
        ])
    }

    #[test]
    fn test_defaults_and_overrides() {
        let m = model();
        let eval = Evaluation::with_overrides(&m, &[("rate", 1.0)]).unwrap();
        assert_eq!(eval.values(), &[1.0, 4.0]);
        assert!(Evaluation::with_overrides(&m, &[("nope", 1.0)]).is_err());
    }

    #[test]
    fn test_composition_without_volume() {
        let m = model();
        let eval = Evaluation::new(&m).with_scale(3.0).with_background(0.5);
        assert_relative_eq!(eval.iq(1.0), 3.0 * (-2.0_f64).exp() + 0.5, max_relative = 1e-15);
    }

    #[test]
    fn test_composition_with_volume() {
        let m = model().with_form_volume(decay_volume);
        let eval = Evaluation::new(&m);
        assert_relative_eq!(eval.iq(0.0), 0.25, max_relative = 1e-15);
        assert_relative_eq!(eval.form_volume().unwrap(), 4.0, max_relative = 1e-15);
    }

    #[test]
    fn test_batch_matches_scalar() {
        let m = model();
        let eval = Evaluation::new(&m).with_background(0.1);
        let qs = [0.0, 0.5, 1.0, 2.0];
        let batch = eval.iq_many(&qs);
        assert_eq!(batch.len(), qs.len());
        for (&q, &b) in qs.iter().zip(&batch) {
            assert_relative_eq!(b, eval.iq(q), max_relative = 1e-15);
        }
    }

    #[test]
    fn test_bounds_validation() {
        let m = model();
        let mut eval = Evaluation::new(&m);
        assert!(eval.validate_bounds().is_ok());
        eval.set("rate", 1000.0).unwrap();
        assert!(matches!(
            eval.validate_bounds(),
            Err(ModelError::OutOfBounds { .. })
        ));
        // out-of-bounds values still evaluate; the kernel is pure
        assert!(eval.iq(0.01).is_finite());
    }

    #[test]
    fn test_missing_2d_kernel() {
        let m = model();
        let eval = Evaluation::new(&m);
        assert!(matches!(
            eval.iqxy(0.1, 0.1),
            Err(ModelError::NoOrientedKernel { .. })
        ));
    }
}
