//! Bouchoux three-population casein micelle.
//!
//! Three populations of polydisperse hard spheres: the casein micelle
//! itself (level 0), hard regions containing the nanoclusters (level 1),
//! and the CaP nanoclusters (level 2). Each population scatters with the
//! Aragon-Pecora analytic form factor for a Schulz distribution of
//! radii, and the intensities add:
//!
//! ```text
//! I(q) = c [ phi0 v0 dp0^2 P0(q) + phi1 v1 dp1^2 P1(q) + phi2 v2 dp2^2 P2(q) ]
//! ```
//!
//! SLD contrasts are converted to electron densities (rounded to three
//! decimals, as the published model does) and the volume prefactors use
//! nm radii.
//!
//! References: Bouchoux et al., Biophys. J. 99 (2010) 3754; Aragon &
//! Pecora, J. Chem. Phys. 64 (1976) 2395.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::gamma::ln_gamma;

/// Aragon-Pecora form factor of a Schulz-polydisperse sphere population.
#[must_use]
pub fn aragon(q: f64, radius: f64, sigma: f64) -> f64 {
    let diameter = 2.0 * radius;
    let z = 1.0 / (sigma * sigma) - 1.0;
    let c = z + 1.0;
    let d = z + 2.0;
    let e = z + 3.0;
    let two_x = q * diameter;
    let g_2x = c * c / (c * c + two_x * two_x);
    let f_2x = (two_x / c).atan();
    let q_x = -0.5 * (c * f_2x).cos() - (0.5 * two_x) * g_2x.sqrt() * (d * f_2x).sin()
        + 0.5 * (0.5 * two_x).powi(2) * (d / c) * g_2x * (e * f_2x).cos();
    let p1 = 9.0 * ln_gamma(c).exp() * c.powi(6) / ((0.5 * two_x).powi(6) * ln_gamma(z + 7.0).exp());
    let p2 = 0.5 + 0.5 * (d / c) * (0.5 * two_x).powi(2) + q_x * g_2x.powf(0.5 * c);
    p1 * p2
}

/// SLD (1/Ang^2) to electron density, rounded to three decimals as the
/// published conversion does.
fn electron_density(sld: f64) -> f64 {
    (sld / 0.0000281 * 1000.0).round() / 1000.0
}

fn prefactor(sld: f64, sld_reference: f64, radius: f64, cste: f64, number: f64) -> f64 {
    let volume_nm = 4.0 / 3.0 * std::f64::consts::PI * (radius / 10.0).powi(3);
    let contrast = electron_density(sld) - electron_density(sld_reference);
    cste * number * (contrast * volume_nm).powi(2)
}

/// Three-level micelle intensity.
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[radius_0, cste, sld_solvent_0, sld_0, sigma_0, na, radius_1, sld_1, sigma_1, nb, radius_2, sld_2, sigma_2, nc] =
        params
    else {
        return f64::NAN;
    };
    prefactor(sld_0, sld_solvent_0, radius_0, cste, na) * aragon(q, radius_0, sigma_0)
        + prefactor(sld_1, sld_0, radius_1, cste, nb) * aragon(q, radius_1, sigma_1)
        + prefactor(sld_2, sld_1, radius_2, cste, nc) * aragon(q, radius_2, sigma_2)
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    let inf = f64::INFINITY;
    ModelDescriptor::new(
        "bouchoux_casein_micelle",
        "Three population casein micelle model",
        iq,
    )
    .with_description(
        "Calculates the scattering of a casein micelle as the sum of\n\
         three polydisperse hard-sphere populations: the micelle, the\n\
         hard regions, and the CaP nanoclusters.",
    )
    .with_category("shape:sphere")
    .with_parameters(vec![
        Parameter::new("radius_0", "Ang", 417.1, [0.0, inf], ParamKind::Volume, "Level0 Sphere radius"),
        Parameter::new("cste", "", 0.000234414, [0.0, inf], ParamKind::Scalar, "Overall Constant"),
        Parameter::new(
            "sld_solvent_0",
            "/Ang^2",
            9.40e-6,
            [-inf, inf],
            ParamKind::Sld,
            "Level0 Solvent Scattering Length Density",
        ),
        Parameter::new(
            "sld_0",
            "/Ang^2",
            9.89e-6,
            [-inf, inf],
            ParamKind::Sld,
            "Level0 Scattering Length Density",
        ),
        Parameter::new("sigma_0", "", 0.33, [0.0, 1.0], ParamKind::Scalar, "Level0 polydispersity"),
        Parameter::new("na", "", 1.0, [-inf, inf], ParamKind::Scalar, "Relative number density of Level0"),
        Parameter::new("radius_1", "Ang", 100.8, [0.0, inf], ParamKind::Volume, "Level1 Sphere radius"),
        Parameter::new(
            "sld_1",
            "/Ang^2",
            10.71e-6,
            [-inf, inf],
            ParamKind::Sld,
            "Level1 Layer scattering length density",
        ),
        Parameter::new("sigma_1", "", 0.33, [0.0, 1.0], ParamKind::Scalar, "Level1 polydispersity"),
        Parameter::new(
            "nb",
            "",
            2.713976715351685,
            [-inf, inf],
            ParamKind::Scalar,
            "Relative number density of Level1",
        ),
        Parameter::new("radius_2", "Ang", 15.4, [0.0, inf], ParamKind::Volume, "Level2 Sphere radius"),
        Parameter::new(
            "sld_2",
            "/Ang^2",
            15.14e-6,
            [-inf, inf],
            ParamKind::Sld,
            "Level2 Layer scattering length density",
        ),
        Parameter::new("sigma_2", "", 0.20, [0.0, 1.0], ParamKind::Scalar, "Level2 polydispersity"),
        Parameter::new("nc", "", 168.3, [-inf, inf], ParamKind::Scalar, "Relative number density of Level2"),
    ])
    .with_demo(vec![
        ("radius_0", 417.3),
        ("cste", 0.000234414),
        ("sld_solvent_0", 9.40e-6),
        ("sld_0", 9.84e-6),
        ("sigma_0", 0.33),
        ("na", 1.0),
        ("radius_1", 100.8),
        ("sld_1", 10.87e-5),
        ("sigma_1", 0.33),
        ("nb", 2.713976715351685),
        ("radius_2", 15.4),
        ("sld_2", 15.15e-5),
        ("sigma_2", 0.20),
        ("nc", 168.3),
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
        let eval = Evaluation::new(&model);
        assert_relative_eq!(eval.iq(0.0013), 5290.302200205034, max_relative = 1e-5);
    }

    #[test]
    fn test_aragon_forward_limit() {
        // P(q -> 0) -> 1 for any polydispersity
        assert_relative_eq!(aragon(1.0e-5, 15.4, 0.20), 1.0, max_relative = 1e-6);
        assert_relative_eq!(aragon(0.0013, 15.4, 0.20), 0.9998796784502213, max_relative = 1e-9);
    }

    #[test]
    fn test_levels_add() {
        let model = descriptor();
        let all = Evaluation::new(&model);
        // suppressing two populations leaves the remaining level
        let level2_only =
            Evaluation::with_overrides(&model, &[("na", 0.0), ("nb", 0.0)]).unwrap();
        let rest = Evaluation::with_overrides(&model, &[("nc", 0.0)]).unwrap();
        let q = 0.01;
        assert_relative_eq!(
            all.iq(q),
            level2_only.iq(q) + rest.iq(q),
            max_relative = 1e-10
        );
    }
}
