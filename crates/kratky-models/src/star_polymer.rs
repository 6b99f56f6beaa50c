//! Benoit star polymer with Gaussian statistics.
//!
//! For a star with `arms` Gaussian-coil arms from a common point,
//!
//! ```text
//! I(q) = 2 / (f v^2) [ v - 1 + exp(-v) + (f - 1)/2 (1 - exp(-v))^2 ]
//! ```
//!
//! with `v = (q Rg)^2 f / (3f - 2)` and `Rg` the radius of gyration of
//! the whole star. One arm recovers the Debye Gaussian coil. The
//! `expm1` form avoids the cancellation at small `v`.
//!
//! Reference: H. Benoit, J. Polymer Science 11 (1953) 596-599.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};

/// Benoit star-polymer kernel.
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[rg, arms] = params else {
        return f64::NAN;
    };
    let u_sq = (rg * q) * (rg * q);
    let v = u_sq * arms / (3.0 * arms - 2.0);
    let term1 = (-v).exp_m1();
    let term2 = ((arms - 1.0) / 2.0) * term1 * term1;
    2.0 * (v + term1 + term2) / (arms * v * v)
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new("star_polymer_v2", "Star polymer model with Gaussian statistics", iq)
        .with_description(
            "Benoit 'Star polymer with Gaussian statistics' with\n\
             P(q) = 2/{fv^2} * (v - (1-exp(-v)) + {f-1}/2 * (1-exp(-v))^2)\n\
             where v = u.f/(3f-2) and u = <Rg^2>q^2 for the whole star,\n\
             and f is the number of arms.",
        )
        .with_category("shape-independent")
        .with_parameters(vec![
            Parameter::new(
                "rg",
                "Ang",
                10.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "radius of gyration of star",
            ),
            Parameter::new(
                "arms",
                "",
                3.0,
                [1.0, 6.0],
                ParamKind::Scalar,
                "Number of arms in the star",
            ),
        ])
        .with_demo(vec![("rg", 10.0), ("arms", 3.0)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kratky_core::eval::Evaluation;

    #[test]
    fn test_regression() {
        let model = descriptor();
        let eval =
            Evaluation::with_overrides(&model, &[("rg", 1.414213562), ("arms", 3.3)])
                .unwrap()
                .with_background(1.0e-3);
        assert_relative_eq!(eval.iq(0.5), 0.851646091108, max_relative = 1e-9);

        let eval = Evaluation::with_overrides(&model, &[("rg", 1.0), ("arms", 2.0)])
            .unwrap()
            .with_background(1.8);
        assert_relative_eq!(eval.iq(1.0), 2.53575888234, max_relative = 1e-9);
    }

    #[test]
    fn test_single_arm_is_debye_coil() {
        let model = descriptor();
        let eval = Evaluation::with_overrides(&model, &[("rg", 25.0), ("arms", 1.0)]).unwrap();
        let q = 0.05_f64;
        let x = (q * 25.0_f64).powi(2);
        let debye = 2.0 * ((-x).exp() + x - 1.0) / (x * x);
        assert_relative_eq!(eval.iq(q), debye, max_relative = 1e-12);
    }

    #[test]
    fn test_forward_limit_is_unity() {
        let model = descriptor();
        let eval = Evaluation::new(&model);
        // tiny v exercises the expm1 path
        assert_relative_eq!(eval.iq(1.0e-6), 1.0, max_relative = 1e-6);
    }
}
