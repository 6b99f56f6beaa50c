//! Teixeira & Chen fractal structure factor.
//!
//! The structure factor for mass-fractal aggregates of monodisperse
//! spheres of effective radius `R_p`:
//!
//! ```text
//! S(q) = 1 + Dm Gamma(Dm - 1) sin[(Dm - 1) atan(q xi)]
//!            / ((q Rp)^Dm [1 + (q xi)^-2]^((Dm-1)/2))
//! ```
//!
//! `Dm` is the mass fractal dimension (valid on 1 <= Dm <= 3) and `xi`
//! the upper fractal cutoff length. The `volfraction` parameter exists
//! only to satisfy the host's structure-factor interface and is unused.
//!
//! Reference: J. Teixeira, J. Appl. Cryst. 21 (1988) 781-785.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::gamma::gamma;

/// Teixeira fractal `S(q)`.
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[radius_effective, _volfraction, cutoff_length, fractal_dimension] = params else {
        return f64::NAN;
    };
    let dm = fractal_dimension;
    let numerator = dm * gamma(dm - 1.0);
    let denominator =
        (q * radius_effective).powf(dm) * (1.0 + (q * cutoff_length).powi(-2)).powf((dm - 1.0) / 2.0);
    let oscillation = ((dm - 1.0) * (q * cutoff_length).atan()).sin();
    1.0 + numerator / denominator * oscillation
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new("fractal_sq", "Fractal Structure Factor", iq)
        .with_description(
            "Calculates the structure factor term ONLY from the Fractal\n\
             model (Teixeira & Chen). volfraction is not used by this model.",
        )
        .with_category("structure-factor")
        .with_parameters(vec![
            Parameter::new(
                "radius_effective",
                "Ang",
                50.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "Effective radius of hard sphere",
            ),
            Parameter::new(
                "volfraction",
                "",
                0.0,
                [0.0, 0.74],
                ParamKind::Scalar,
                "Volume fraction of hard spheres",
            ),
            Parameter::new(
                "cutoff_length",
                "Ang",
                150.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "Upper fractal cutoff length",
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
