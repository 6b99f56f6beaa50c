//! Pseudo-Voigt peak on a flat background.
//!
//! A weighted linear sum of a Lorentzian and a Gaussian centred at `q0`.
//! The Lorentzian half-width is coupled to the Gaussian standard
//! deviation as `HWHM = 1.177 sigma`, so the single width parameter
//! controls both line shapes; `wf = 1` gives a pure Lorentzian and
//! `wf = 0` a pure Gaussian.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};

/// Weighted Lorentzian + Gaussian peak.
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[wf, q0, sigma] = params else {
        return f64::NAN;
    };
    let hwhm = 1.177 * sigma;
    let dq = q - q0;
    let lorentz = 1.0 / (1.0 + dq * dq / (hwhm * hwhm));
    let gauss = (-0.5 * dq * dq / (sigma * sigma)).exp();
    wf * lorentz + (1.0 - wf) * gauss
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new("peak_voigt", "A Voigt peak on a flat background", iq)
        .with_description("Evaluates a pseudo-Voigt shaped peak.")
        .with_category("shape-independent")
        .with_parameters(vec![
            Parameter::new("wf", "", 0.5, [0.0, 1.0], ParamKind::Scalar, "Weighting factor"),
            Parameter::new(
                "q0",
                "1/Ang",
                0.05,
                [f64::NEG_INFINITY, f64::INFINITY],
                ParamKind::Scalar,
                "Peak position in q",
            ),
            Parameter::new(
                "sigma",
                "1/Ang",
                0.005,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "Peak width (Std dev)",
            ),
        ])
        .with_demo(vec![("wf", 0.5), ("q0", 0.05), ("sigma", 0.005)])
}
