//! Five-layer core-shell bicelle.
//!
//! A core-shell disc whose core is split into two methylene layers around
//! a central methyl layer, giving a five-layer SLD profile once the head
//! group faces are counted. Relative to the three-layer bicelle the
//! amplitude gains one term for the methyl/methylene contrast step:
//!
//! ```text
//! F += V4 (rho_methyl - rho_methylene) sinc(qc L2/2) 2J1x(qab R)
//! ```
//!
//! With a vanishing methyl layer (or equal methyl/methylene SLDs) the
//! model collapses to the three-layer bicelle.
//!
//! References: D. Singh, Johns Hopkins University thesis (2009);
//! Cheu, Yang, Nieh, Chem. Phys. Lipids 231 (2020) 104945.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::bessel::{sas_2j1x_x, sinc};
use kratky_math::orient::rotate_symmetric;
use kratky_math::quadrature::gauss_76;

/// Single-orientation five-layer amplitude.
#[allow(clippy::too_many_arguments)]
#[must_use]
pub fn amplitude(
    q: f64,
    sin_alpha: f64,
    cos_alpha: f64,
    radius: f64,
    thick_rim: f64,
    thick_face: f64,
    methylene_length: f64,
    half_methyl: f64,
    sld_methylene: f64,
    sld_methyl: f64,
    sld_face: f64,
    sld_rim: f64,
    sld_solvent: f64,
) -> f64 {
    let pi = std::f64::consts::PI;
    let half_core = methylene_length + half_methyl;
    let dr1 = sld_methylene - sld_face;
    let dr2 = sld_rim - sld_solvent;
    let dr3 = sld_face - sld_rim;
    let dr4 = sld_methyl - sld_methylene;
    let vol1 = pi * radius * radius * 2.0 * half_core;
    let vol2 = pi * (radius + thick_rim).powi(2) * 2.0 * (half_core + thick_face);
    let vol3 = pi * radius * radius * 2.0 * (half_core + thick_face);
    let vol4 = pi * radius * radius * 2.0 * half_methyl;
    let be1 = sas_2j1x_x(q * radius * sin_alpha);
    let be2 = sas_2j1x_x(q * (radius + thick_rim) * sin_alpha);
    let si1 = sinc(q * half_core * cos_alpha);
    let si2 = sinc(q * (half_core + thick_face) * cos_alpha);
    let si3 = sinc(q * half_methyl * cos_alpha);
    vol1 * dr1 * si1 * be1 + vol2 * dr2 * si2 * be2 + vol3 * dr3 * si2 * be1 + vol4 * dr4 * si3 * be1
}

/// 1-D intensity; the host divides by [`form_volume`].
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let uplim = std::f64::consts::FRAC_PI_4;
    let mut total = 0.0;
    for (z, w) in gauss_76().points() {
        let alpha = (z + 1.0) * uplim;
        let (sin_a, cos_a) = alpha.sin_cos();
        let f = amplitude(
            q, sin_a, cos_a, params[0], params[1], params[2], params[3], 0.5 * params[4],
            params[5], params[6], params[7], params[8], params[9],
        );
        total += w * f * f * sin_a;
    }
    1.0e-4 * total * uplim
}

/// Oriented intensity.
pub fn iqxy(qx: f64, qy: f64, params: &[f64]) -> f64 {
    let (qab, qc) = rotate_symmetric(qx, qy, params[10], params[11]);
    let q = qx.hypot(qy);
    let (sin_a, cos_a) = (qab / q, qc / q);
    let f = amplitude(
        q, sin_a, cos_a, params[0], params[1], params[2], params[3], 0.5 * params[4],
        params[5], params[6], params[7], params[8], params[9],
    );
    1.0e-4 * f * f
}

/// Particle volume `pi (R + tr)^2 (2 L1 + L2 + 2 tf)`.
pub fn form_volume(params: &[f64]) -> f64 {
    std::f64::consts::PI
        * (params[0] + params[1]).powi(2)
        * (2.0 * params[3] + params[4] + 2.0 * params[2])
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    let inf = f64::INFINITY;
    ModelDescriptor::new(
        "five_layer_core_shell_bicelle",
        "Circular cylinder with a three-layer core-shell scattering length density profile",
        iq,
    )
    .with_description(
        "Core-shell bicelle whose core splits into two methylene layers\n\
         around a central methyl layer; with the head-group faces this\n\
         gives a five-layer SLD profile.",
    )
    .with_category("shape:cylinder")
    .with_iqxy(iqxy)
    .with_form_volume(form_volume)
    .with_parameters(vec![
        Parameter::new("radius", "Ang", 80.0, [0.0, inf], ParamKind::Volume, "Cylinder core radius"),
        Parameter::new("thick_rim", "Ang", 10.0, [0.0, inf], ParamKind::Volume, "Rim shell thickness"),
        Parameter::new("thick_face", "Ang", 10.0, [0.0, inf], ParamKind::Volume, "Cylinder face thickness"),
        Parameter::new(
            "methylene_length",
            "Ang",
            25.0,
            [0.0, inf],
            ParamKind::Volume,
            "Methylene length of one side",
        ),
        Parameter::new("methyl_length", "Ang", 0.0, [0.0, inf], ParamKind::Volume, "Methyl core length"),
        Parameter::new(
            "sld_methylene",
            "1e-6/Ang^2",
            1.0,
            [-inf, inf],
            ParamKind::Sld,
            "Methylene scattering length density",
        ),
        Parameter::new(
            "sld_methyl",
            "1e-6/Ang^2",
            1.0,
            [-inf, inf],
            ParamKind::Sld,
            "Methyl core scattering length density",
        ),
        Parameter::new(
            "sld_face",
            "1e-6/Ang^2",
            4.0,
            [-inf, inf],
            ParamKind::Sld,
            "Cylinder face scattering length density",
        ),
        Parameter::new(
            "sld_rim",
            "1e-6/Ang^2",
            4.0,
            [-inf, inf],
            ParamKind::Sld,
            "Cylinder rim scattering length density",
        ),
        Parameter::new(
            "sld_solvent",
            "1e-6/Ang^2",
            1.0,
            [-inf, inf],
            ParamKind::Sld,
            "Solvent scattering length density",
        ),
        Parameter::new("theta", "degrees", 90.0, [-inf, inf], ParamKind::Orientation, "In plane angle"),
        Parameter::new("phi", "degrees", 0.0, [-inf, inf], ParamKind::Orientation, "Out of plane angle"),
    ])
    .with_demo(vec![
        ("radius", 20.0),
        ("thick_rim", 10.0),
        ("thick_face", 10.0),
        ("methylene_length", 100.0),
        ("methyl_length", 200.0),
        ("sld_methylene", 1.0),
        ("sld_methyl", 1.0),
        ("sld_face", 4.0),
        ("sld_rim", 4.0),
        ("sld_solvent", 1.0),
        ("theta", 90.0),
        ("phi", 0.0),
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
        assert_relative_eq!(eval.iq(0.05), 7.487354595701446, max_relative = 1e-9);
        assert_relative_eq!(eval.iq(0.2), 0.7170411122584273, max_relative = 1e-9);
    }

    #[test]
    fn test_collapses_to_three_layer_bicelle() {
        // zero methyl layer with matching SLDs reproduces the bicelle
        // with core length 2 * methylene_length
        use crate::bicelle::{bicelle_iq, bicelle_volume, BicelleSlds};
        let model = descriptor();
        let eval = Evaluation::new(&model);
        let q = 0.07;
        let three_layer = bicelle_iq(
            q,
            80.0,
            10.0,
            10.0,
            50.0,
            BicelleSlds {
                core: 1.0,
                face: 4.0,
                rim: 4.0,
                solvent: 1.0,
            },
        ) / bicelle_volume(80.0, 10.0, 10.0, 50.0);
        assert_relative_eq!(eval.iq(q), three_layer, max_relative = 1e-12);
    }

    #[test]
    fn test_methyl_layer_changes_high_q() {
        let model = descriptor();
        let without = Evaluation::new(&model);
        let with = Evaluation::with_overrides(
            &model,
            &[("methyl_length", 10.0), ("sld_methyl", -0.4)],
        )
        .unwrap();
        let q = 0.3;
        assert!((with.iq(q) - without.iq(q)).abs() > 1e-6 * without.iq(q).abs());
    }

    #[test]
    fn test_iqxy_matches_kernel_at_inplane_orientation() {
        // theta = 90, phi = 0 puts the cylinder axis along qx
        let model = descriptor();
        let eval = Evaluation::new(&model);
        let got = eval.iqxy(0.1, 0.0).unwrap();
        let f = amplitude(0.1, 0.0, 1.0, 80.0, 10.0, 10.0, 25.0, 0.0, 1.0, 1.0, 4.0, 4.0, 1.0);
        let want = 1.0e-4 * f * f / form_volume(eval.values());
        assert_relative_eq!(got, want, max_relative = 1e-12);
    }
}
