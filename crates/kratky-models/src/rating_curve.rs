//! Hydrological rating curve.
//!
//! Not a scattering model: fits stage-discharge data loaded in place of
//! `I(q)` vs `q`. The relationship between the stage `h` (water level) and
//! the discharge `Q` is `Q(h) = K (h - alpha)^beta`, with `alpha` the
//! stage at zero flow. Scale and background have no meaning here and
//! should be held at 1 and 0.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};

/// `Q(h) = K * (h - alpha)^beta`, with `q` standing in for the stage.
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[k, alpha, beta] = params else {
        return f64::NAN;
    };
    k * (q - alpha).powf(beta)
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new("ratingcurve", "Rating Curve", iq)
        .with_description("Computes a stage-discharge curve. READ THE DOCS!")
        .with_category("shape-independent")
        .with_parameters(vec![
            Parameter::new(
                "K",
                "",
                1.0,
                [f64::NEG_INFINITY, f64::INFINITY],
                ParamKind::Scalar,
                "constant",
            ),
            Parameter::new(
                "alpha",
                "(height)",
                0.0,
                [f64::NEG_INFINITY, f64::INFINITY],
                ParamKind::Scalar,
                "datum corr.",
            ),
            Parameter::new(
                "beta",
                "",
                2.5,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "exponent",
            ),
        ])
}
