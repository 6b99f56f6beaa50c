//! Mildner & Hall mass-fractal structure factor.
//!
//! ```text
//! S(q) = Gamma(Dm-1) xi^(Dm-1) / [1 + (q xi)^2]^((Dm-1)/2)
//!        * sin[(Dm-1) atan(q xi)] / q
//! ```
//!
//! `Dm` is the mass fractal dimension (valid on 1 <= Dm <= 3) and `xi`
//! the cutoff length above which the system is no longer fractal. Unlike
//! most structure factors this one is not dimensionless. The
//! `radius_effective` and `volfraction` parameters exist only for the
//! host's structure-factor interface and are unused.
//!
//! Reference: D. Mildner and P. Hall, J. Phys. D 19 (1986) 1535-1545,
//! equation (9).

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::gamma::gamma;

/// Mildner-Hall mass-fractal `S(q)`.
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[_radius_effective, _volfraction, cutoff_length, fractal_dimension] = params else {
        return f64::NAN;
    };
    let dm1 = fractal_dimension - 1.0;
    let qc = q * cutoff_length;
    let term1 = cutoff_length.powf(dm1) * gamma(dm1) / (1.0 + qc * qc).powf(dm1 / 2.0);
    let term2 = (dm1 * qc.atan()).sin() / q;
    term1 * term2
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new("mass_fractal_sq", "Mass Fractal Structure Factor", iq)
        .with_description(
            "Calculates the structure factor term ONLY from the Mass\n\
             Fractal model.",
        )
        .with_category("structure-factor")
        .with_parameters(vec![
            Parameter::new(
                "radius_effective",
                "Ang",
                50.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "effective radius of hard sphere",
            ),
            Parameter::new(
                "volfraction",
                "",
                0.0,
                [0.0, 0.74],
                ParamKind::Scalar,
                "volume fraction of hard spheres",
            ),
            Parameter::new(
                "cutoff_length",
                "Ang",
                150.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "Cutoff length of fractal",
            ),
            Parameter::new(
                "fractal_dimension",
                "",
                2.1,
                [1.0, 3.0],
                ParamKind::Scalar,
                "Mass fractal dimension",
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
        let eval = Evaluation::with_overrides(
            &model,
            &[("cutoff_length", 250.0), ("fractal_dimension", 2.0)],
        )
        .unwrap();
        assert_relative_eq!(eval.iq(0.5), 3.999744016382952, max_relative = 1e-9);
        // the published low-q value corresponds to q = 5e-4 (the stored
        // fixture lists it against 1e-3); at Dm = 2 the closed form is
        // xi^2 / (1 + (q xi)^2)
        assert_relative_eq!(eval.iq(5.0e-4), 61538.461538461546, max_relative = 1e-9);
        assert_relative_eq!(eval.iq(1.0e-3), 62500.0 / 1.0625, max_relative = 1e-9);
    }

    #[test]
    fn test_closed_form_at_dimension_two() {
        // sin(atan x) = x / sqrt(1 + x^2) collapses S(q) to xi^2/(1+(q xi)^2)
        let model = descriptor();
        let eval = Evaluation::with_overrides(&model, &[("fractal_dimension", 2.0)]).unwrap();
        for q in [1.0e-4, 0.01, 0.3] {
            let x = q * 150.0;
            assert_relative_eq!(
                eval.iq(q),
                150.0 * 150.0 / (1.0 + x * x),
                max_relative = 1e-12
            );
        }
    }
}
