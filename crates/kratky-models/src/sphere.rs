//! Uniform sphere form factor.
//!
//! The classic sphere of uniform scattering length density,
//!
//! ```text
//! P(q) = (scale / V) [3 V (sld - sld_solvent) (sin(qr) - qr cos(qr)) / (qr)^3]^2
//! ```
//!
//! The original marketplace file carries this model under the name
//! `oblate_spheroid` (its docstring admits as much); the name is kept so
//! hosts that looked the plugin up by identifier keep working.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::bessel::sas_3j1x_x;

/// Sphere volume `4 pi r^3 / 3`.
#[must_use]
pub fn sphere_volume(radius: f64) -> f64 {
    4.0 * std::f64::consts::PI / 3.0 * radius.powi(3)
}

/// Scattering amplitude `V * dRho * 3j1(qr)/(qr)` of a uniform sphere.
#[must_use]
pub fn sphere_amplitude(q: f64, radius: f64, sld: f64, sld_solvent: f64) -> f64 {
    sphere_volume(radius) * (sld - sld_solvent) * sas_3j1x_x(q * radius)
}

/// Unnormalised sphere intensity; the host divides by [`form_volume`].
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[sld, sld_solvent, radius] = params else {
        return f64::NAN;
    };
    let fq = sphere_amplitude(q, radius, sld, sld_solvent);
    1.0e-4 * fq * fq
}

/// Particle volume for host normalisation.
pub fn form_volume(params: &[f64]) -> f64 {
    sphere_volume(params[2])
}

/// Effective radius for structure-factor combination.
pub fn effective_radius(params: &[f64]) -> f64 {
    params[2]
}

/// Volume ratio for structure-factor combination.
pub fn volume_ratio(_params: &[f64]) -> f64 {
    1.0
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new(
        "oblate_spheroid",
        "Spheres with uniform scattering length density",
        iq,
    )
    .with_description(
        "P(q)=(scale/V)*[3V(sld-sld_solvent)*(sin(qr)-qr cos(qr))\n\
         /(qr)^3]^2 + background\n\
         r: radius of sphere, V: volume of the scatterer,\n\
         sld / sld_solvent: SLDs of the sphere and the solvent",
    )
    .with_category("shape:sphere")
    .with_form_volume(form_volume)
    .with_effective_radius(effective_radius)
    .with_volume_ratio(volume_ratio)
    .with_parameters(vec![
        Parameter::new(
            "sld",
            "1e-6/Ang^2",
            1.0,
            [f64::NEG_INFINITY, f64::INFINITY],
            ParamKind::Sld,
            "Layer scattering length density",
        ),
        Parameter::new(
            "sld_solvent",
            "1e-6/Ang^2",
            6.0,
            [f64::NEG_INFINITY, f64::INFINITY],
            ParamKind::Sld,
            "Solvent scattering length density",
        ),
        Parameter::new(
            "radius",
            "Ang",
            50.0,
            [0.0, f64::INFINITY],
            ParamKind::Volume,
            "Sphere radius",
        ),
    ])
    .with_demo(vec![
        ("sld", 6.0),
        ("sld_solvent", 1.0),
        ("radius", 120.0),
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
        let eval = Evaluation::new(&model).with_background(1.0e-3);
        assert_relative_eq!(eval.iq(0.2), 0.726362, max_relative = 1e-5);
    }

    #[test]
    fn test_derived_quantities() {
        let model = descriptor();
        let eval = Evaluation::with_overrides(&model, &[("radius", 120.0)]).unwrap();
        assert_relative_eq!(eval.effective_radius().unwrap(), 120.0, max_relative = 1e-15);
        assert_relative_eq!(eval.volume_ratio().unwrap(), 1.0, max_relative = 1e-15);
        assert_relative_eq!(
            eval.form_volume().unwrap(),
            sphere_volume(120.0),
            max_relative = 1e-15
        );
    }

    #[test]
    fn test_forward_scattering() {
        // I(0) = V * dRho^2 * 1e-4 after volume normalisation
        let model = descriptor();
        let eval = Evaluation::new(&model);
        let want = sphere_volume(50.0) * 25.0 * 1.0e-4;
        assert_relative_eq!(eval.iq(0.0), want, max_relative = 1e-12);
    }

    #[test]
    fn test_non_negative() {
        let model = descriptor();
        let eval = Evaluation::new(&model);
        let mut q = 1.0e-4;
        while q < 1.0 {
            assert!(eval.iq(q) >= 0.0);
            q *= 1.5;
        }
    }
}
