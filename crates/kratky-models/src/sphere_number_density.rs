//! Spheres parameterised by volume number density.
//!
//! The uniform sphere reparameterised so the prefactor is the volume
//! number density of spheres rather than a volume fraction. Unlike the
//! rest of the catalogue, SLDs enter in cm^-2 and the size as a diameter
//! in nm. With data on an absolute scale the host scale should be unity.
//!
//! The original plugin converts the diameter to an Angstrom radius and
//! then feeds that radius back through the same nm-to-Ang conversion
//! when building its volume prefactor; the published regression fixtures
//! pin that behaviour down, so it is preserved here rather than repaired
//! (see DESIGN.md).
//!
//! Reference: A. Guinier and G. Fournet, Small-Angle Scattering of
//! X-Rays, Wiley (1955).

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};

fn radius_in_ang(diameter_nm: f64) -> f64 {
    (diameter_nm / 2.0) * 10.0
}

/// Volume computed the way the original prefactor does: the Angstrom
/// radius is run through the nm-to-Ang conversion a second time.
fn prefactor_volume(radius_ang: f64) -> f64 {
    let twice_converted = (radius_ang / 2.0) * 10.0;
    4.0 / 3.0 * std::f64::consts::PI * twice_converted.powi(3)
}

/// Number-density sphere intensity; the host divides by [`form_volume`].
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[sld, sld_solvent, concentration, diameter] = params else {
        return f64::NAN;
    };
    let radius = radius_in_ang(diameter);
    let qr = q * radius;
    let amplitude = 3.0 * (qr.sin() - qr * qr.cos()) / (qr * qr * qr);
    concentration
        * (sld - sld_solvent).powi(2)
        * prefactor_volume(radius).powi(2)
        * 1.0e-48
        * amplitude
        * amplitude
}

/// Particle volume (Ang^3) for host normalisation and polydispersity
/// weighting.
pub fn form_volume(params: &[f64]) -> f64 {
    4.0 / 3.0 * std::f64::consts::PI * radius_in_ang(params[3]).powi(3)
}

/// Effective radius (Ang) for structure-factor combination.
pub fn effective_radius(params: &[f64]) -> f64 {
    radius_in_ang(params[3])
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new(
        "sphere_concentration",
        "Spheres with uniform SLD but using number density",
        iq,
    )
    .with_description(
        "P(q)=scale*N*[3V*(sld-sld_solvent)*(sin(qr)-qr cos(qr))\n\
         /(qr)^3]^2 + background\n\
         N: volume number density, V: volume of the sphere,\n\
         SLDs in cm^-2, diameter in nm",
    )
    .with_category("shape:sphere")
    .with_form_volume(form_volume)
    .with_effective_radius(effective_radius)
    .with_parameters(vec![
        Parameter::new(
            "sld",
            "1/cm^2",
            1.0e10,
            [f64::NEG_INFINITY, f64::INFINITY],
            ParamKind::Scalar,
            "Sphere scattering length density",
        ),
        Parameter::new(
            "sld_solvent",
            "1/cm^2",
            6.0e10,
            [f64::NEG_INFINITY, f64::INFINITY],
            ParamKind::Scalar,
            "Solvent scattering length density",
        ),
        Parameter::new(
            "concentration",
            "1/cm^3",
            6.4e19,
            [0.0, f64::INFINITY],
            ParamKind::Scalar,
            "Volume number density of spheres",
        ),
        Parameter::new(
            "diameter",
            "nm",
            10.0,
            [0.0, f64::INFINITY],
            ParamKind::Volume,
            "Sphere diameter",
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
            &[
                ("sld", 3.16e10),
                ("sld_solvent", 6.35e10),
                ("concentration", 6.4e17),
                ("diameter", 15.0),
            ],
        )
        .unwrap()
        .with_background(0.3);
        let got = eval.iq_many(&[0.00200453398091, 0.237595891284]);
        assert_relative_eq!(got[0], 18.2015211186, max_relative = 1e-8);
        assert_relative_eq!(got[1], 0.300508833488, max_relative = 1e-8);
    }

    #[test]
    fn test_effective_radius_in_angstrom() {
        let model = descriptor();
        let eval = Evaluation::with_overrides(&model, &[("diameter", 15.0)]).unwrap();
        assert_relative_eq!(eval.effective_radius().unwrap(), 75.0, max_relative = 1e-15);
    }

    #[test]
    fn test_intensity_linear_in_concentration() {
        let model = descriptor();
        let one = Evaluation::with_overrides(&model, &[("concentration", 1.0e17)]).unwrap();
        let two = Evaluation::with_overrides(&model, &[("concentration", 2.0e17)]).unwrap();
        assert_relative_eq!(2.0 * one.iq(0.01), two.iq(0.01), max_relative = 1e-12);
    }
}
