//! DLS analysis by the method of cumulants.
//!
//! Not a scattering model: the independent variable is the correlator lag
//! time and the output is the normalised intensity autocorrelation
//! function `G2(tau)`. The stable Frisken form of the cumulant expansion
//! is used,
//!
//! ```text
//! G2(tau) = A exp(-2 G1 tau) (1 + (G2/2) tau^2 - (G3/6) tau^3)^2
//! ```
//!
//! with the mean decay rate `G1` tied to a z-average spherical radius
//! through the Stokes-Einstein relation, and `G2 = pdi * G1^2`. The
//! experimental-condition parameters (angle, temperature, viscosity,
//! refractive index, wavelength) must not be fitted.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};

/// `G2(tau)` with `q` standing in for the lag time.
pub fn iq(tau: f64, params: &[f64]) -> f64 {
    let &[angle, temperature, viscosity, ref_index, wavelength, radius, pdi, cumulant3] = params
    else {
        return f64::NAN;
    };
    // constants as the published model writes them
    let pi = 3.141592654_f64;
    let boltzmann = 1.38064852e-23;
    let t_abs = 273.16 + temperature;
    let viscosity_si = viscosity / 1000.0;
    let wavelength_m = wavelength / 1.0e9;
    let radius_m = radius / 1.0e9;
    // note: the angle enters in degrees, halved, as the original does
    let q_sq = ((4.0 * pi * ref_index / wavelength_m) * (angle / 2.0).sin()).powi(2);
    let cumulant1 = (boltzmann * t_abs * q_sq) / (6.0 * pi * viscosity_si * radius_m);
    let cumulant2 = pdi * cumulant1 * cumulant1;
    let poly = 1.0 + cumulant2 * tau * tau / 2.0 - cumulant3 * tau.powi(3) / 6.0;
    (-2.0 * cumulant1 * tau).exp() * poly * poly
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new("cumulants_dls", "DLS analysis by Cumulants", iq)
        .with_description(
            "Computes radius & polydispersity index from DLS data using the\n\
             method of Cumulants. READ THE DOCS!",
        )
        .with_category("shape-independent")
        .with_parameters(vec![
            Parameter::new(
                "angle",
                "degrees",
                110.0,
                [0.0, 360.0],
                ParamKind::Scalar,
                "scattering angle",
            ),
            Parameter::new(
                "temperature",
                "degC",
                25.0,
                [-273.16, f64::INFINITY],
                ParamKind::Scalar,
                "sample temperature",
            ),
            Parameter::new(
                "viscosity",
                "mPas/cP",
                0.894,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "solvent viscosity",
            ),
            Parameter::new(
                "ref_index",
                "",
                1.33,
                [1.0, 2.42],
                ParamKind::Scalar,
                "solvent refractive index",
            ),
            Parameter::new(
                "wavelength",
                "nm",
                642.0,
                [400.0, 800.0],
                ParamKind::Scalar,
                "laser wavelength",
            ),
            Parameter::new(
                "radius",
                "nm",
                100.0,
                [0.01, f64::INFINITY],
                ParamKind::Scalar,
                "z-ave spherical radius",
            ),
            Parameter::new(
                "pdi",
                "",
                0.1,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "dls polydispersity index",
            ),
            Parameter::new(
                "cumulant3",
                "",
                0.0,
                [f64::NEG_INFINITY, f64::INFINITY],
                ParamKind::Scalar,
                "3rd cumulant",
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
        let eval = Evaluation::new(&model)
            .with_scale(0.9)
            .with_background(1.0e-3);
        let got = eval.iq_many(&[1.0e-6, 0.01]);
        assert_relative_eq!(got[0], 0.898026606959, max_relative = 1e-9);
        assert_relative_eq!(got[1], 0.0010000000008228433, max_relative = 1e-9);
    }

    #[test]
    fn test_intercept_at_zero_lag() {
        let model = descriptor();
        let eval = Evaluation::new(&model).with_scale(0.75);
        assert_relative_eq!(eval.iq(0.0), 0.75, max_relative = 1e-12);
    }

    #[test]
    fn test_smaller_radius_decays_faster() {
        let model = descriptor();
        let small = Evaluation::with_overrides(&model, &[("radius", 10.0)]).unwrap();
        let large = Evaluation::with_overrides(&model, &[("radius", 500.0)]).unwrap();
        assert!(small.iq(1.0e-4) < large.iq(1.0e-4));
    }
}
