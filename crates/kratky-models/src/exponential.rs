//! Flexible exponential model.
//!
//! Evaluates `I(q) = exp(-prefactor * q^exponent)`. The exponent selects
//! the shape: 1 gives a plain exponential, values below 1 the stretched
//! (Kohlrausch-Williams-Watts) form, values above 1 a compressed
//! exponential, and 2 a normal distribution. Scale here is a bare
//! multiplier, not a volume fraction.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};

/// `I(q) = exp(-prefactor * q^exponent)`.
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[prefactor, exponent] = params else {
        return f64::NAN;
    };
    (-prefactor * q.powf(exponent)).exp()
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new("exponential", "Exponential model", iq)
        .with_description(
            "Evaluates I(q) = scale . exp(-prefactor . (q^exponent)) + bkgd.\n\
             exponent = 1 gives a normal exponential, 0 < exponent < 1 a\n\
             stretched (KWW) exponential, exponent > 1 a compressed one.",
        )
        .with_category("shape-independent")
        .with_parameters(vec![
            Parameter::new(
                "prefactor",
                "",
                1.0,
                [f64::NEG_INFINITY, f64::INFINITY],
                ParamKind::Scalar,
                "Prefactor",
            ),
            Parameter::new(
                "exponent",
                "",
                1.0,
                [f64::NEG_INFINITY, f64::INFINITY],
                ParamKind::Scalar,
                "Exponent",
            ),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kratky_core::eval::Evaluation;

    #[test]
    fn test_regression() {
        let model = descriptor();
        let eval = Evaluation::with_overrides(&model, &[("prefactor", 2.0), ("exponent", 0.5)])
            .unwrap()
            .with_background(1.0e-3);
        let got = eval.iq_many(&[0.0005, 0.5]);
        assert_relative_eq!(got[0], 0.957263898517, max_relative = 1e-9);
        assert_relative_eq!(got[1], 0.244116734434, max_relative = 1e-9);
    }

    #[test]
    fn test_stretched_vs_compressed() {
        let model = descriptor();
        let stretched = Evaluation::with_overrides(&model, &[("exponent", 0.5)]).unwrap();
        let compressed = Evaluation::with_overrides(&model, &[("exponent", 2.0)]).unwrap();
        // below q = 1 the stretched form decays faster
        assert!(stretched.iq(0.25) < compressed.iq(0.25));
        assert_relative_eq!(stretched.iq(1.0), compressed.iq(1.0), max_relative = 1e-12);
    }

    #[test]
    fn test_positive_prefactor_decays() {
        let model = descriptor();
        let eval = Evaluation::new(&model);
        assert!(eval.iq(0.1) > eval.iq(0.2));
        assert!(eval.iq(1e3) >= 0.0);
    }
}
