//! Two correlated spheres at fixed separation.
//!
//! Two hard spheres of different radius and SLD held at centre-to-centre
//! distance `D`:
//!
//! ```text
//! P(q) = F1^2 + F2^2 + 2 F1 F2 sin(qD)/(qD)
//! ```
//!
//! where `F1`, `F2` are the sphere amplitudes. The marketplace copy of
//! this model lost its line continuations in transit, mangling both the
//! amplitude numerator and the cross-term factor of two; the documented
//! formula is implemented (see DESIGN.md).
//!
//! Reference: Tianfu Li et al., Chinese J. Polym. Sci. (2019),
//! doi:10.1007/s10118-019-2260-x.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::bessel::{sas_3j1x_x, sinc};

/// Two-sphere interference intensity.
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[radius1, radius2, distance, sld1, sld2, sld_solvent] = params else {
        return f64::NAN;
    };
    let volume = |r: f64| 4.0 / 3.0 * std::f64::consts::PI * r.powi(3);
    let f1 = sas_3j1x_x(q * radius1) * (sld1 - sld_solvent) * volume(radius1);
    let f2 = sas_3j1x_x(q * radius2) * (sld2 - sld_solvent) * volume(radius2);
    1.0e-4 * (f1 * f1 + f2 * f2 + 2.0 * f1 * f2 * sinc(q * distance))
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new("correlated_spheres", "User model for correlated_spheres", iq)
        .with_description(
            "Two spheres of different size and SLDs at fixed distance D\n\
             from each other.",
        )
        .with_category("shape:sphere")
        .with_parameters(vec![
            Parameter::new(
                "Radius1",
                "Ang",
                20.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "radius of particle1",
            ),
            Parameter::new(
                "Radius2",
                "Ang",
                50.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "radius of particle2",
            ),
            Parameter::new(
                "D",
                "Ang",
                80.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "center to center distance",
            ),
            Parameter::new(
                "SLD1",
                "1e-6/Ang^2",
                1.0,
                [f64::NEG_INFINITY, f64::INFINITY],
                ParamKind::Scalar,
                "scattering length density of particle1",
            ),
            Parameter::new(
                "SLD2",
                "1e-6/Ang^2",
                2.0,
                [f64::NEG_INFINITY, f64::INFINITY],
                ParamKind::Scalar,
                "scattering length density of particle2",
            ),
            Parameter::new(
                "SLDsolvent",
                "1e-6/Ang^2",
                6.38,
                [f64::NEG_INFINITY, f64::INFINITY],
                ParamKind::Scalar,
                "scattering length density of solvent",
            ),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kratky_core::eval::Evaluation;

    #[test]
    fn test_pinned_values() {
        let model = descriptor();
        let eval = Evaluation::new(&model);
        assert_relative_eq!(eval.iq(0.001), 611518217.3987074, max_relative = 1e-10);
        assert_relative_eq!(eval.iq(0.05), 126794757.88381322, max_relative = 1e-10);
        assert_relative_eq!(eval.iq(0.2), 313046.4307892533, max_relative = 1e-10);
    }

    #[test]
    fn test_forward_limit_is_coherent_sum() {
        // at q -> 0 the pair scatters as (F1 + F2)^2
        let model = descriptor();
        let eval = Evaluation::new(&model);
        let volume = |r: f64| 4.0 / 3.0 * std::f64::consts::PI * r * r * r;
        let f1 = (1.0 - 6.38) * volume(20.0);
        let f2 = (2.0 - 6.38) * volume(50.0);
        assert_relative_eq!(
            eval.iq(1.0e-6),
            1.0e-4 * (f1 + f2) * (f1 + f2),
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_uncorrelated_limit() {
        // a huge separation suppresses the cross term
        let model = descriptor();
        let eval = Evaluation::with_overrides(&model, &[("D", 1.0e9)]).unwrap();
        let volume = |r: f64| 4.0 / 3.0 * std::f64::consts::PI * r * r * r;
        let q = 0.01;
        let f1 = sas_3j1x_x(q * 20.0) * (1.0 - 6.38) * volume(20.0);
        let f2 = sas_3j1x_x(q * 50.0) * (2.0 - 6.38) * volume(50.0);
        assert_relative_eq!(
            eval.iq(q),
            1.0e-4 * (f1 * f1 + f2 * f2),
            max_relative = 1e-6
        );
    }
}
