//! Core-shell sphere with a cylinder in its core.
//!
//! A monodisperse core-shell sphere holding one circular cylinder at its
//! centre. The composite amplitude sums the contrast steps
//!
//! ```text
//! f(q, a) = (rho_cyl - rho_core) V_cyl f_cyl(q, a)
//!         + (rho_core - rho_shell) V_core 3j1x(q R_core)
//!         + (rho_shell - rho_solv) V_sphere 3j1x(q R_sphere)
//! ```
//!
//! with `f_cyl(q, a) = 2J1x(q R_cyl sin a) sinc(q L cos a / 2)`, and the
//! 1-D intensity averages `f^2` over the cylinder orientation. At
//! matched cylinder/core contrast the model reduces to the plain
//! core-shell sphere.
//!
//! The regression anchors here are pinned values of this implementation;
//! the values published with the original plugin do not follow from its
//! own amplitude under any consistent normalisation and are treated as
//! known-ambiguous (see DESIGN.md).
//!
//! References: Pedersen, Adv. Colloid Interface Sci. 70 (1997) 171;
//! Fournet, Bull. Soc. Fr. Mineral. Cristallogr. 74 (1951) 39.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::bessel::{sas_2j1x_x, sas_3j1x_x, sinc};
use kratky_math::orient::rotate_symmetric;
use kratky_math::quadrature::gauss_76;

use crate::sphere::sphere_volume;

/// Cylinder amplitude at orientation `(sin a, cos a)` to `q`.
#[must_use]
pub fn cylinder_amplitude(q: f64, sin_alpha: f64, cos_alpha: f64, radius: f64, length: f64) -> f64 {
    sas_2j1x_x(q * radius * sin_alpha) * sinc(q * 0.5 * length * cos_alpha)
}

/// Composite amplitude of the filled core-shell sphere.
#[must_use]
pub fn amplitude(q: f64, sin_alpha: f64, cos_alpha: f64, params: &[f64]) -> f64 {
    let (sld_core, sld_shell, sld_cyl, sld_solvent) = (params[0], params[1], params[2], params[3]);
    let (core_radius, shell_thickness) = (params[4], params[5]);
    let (cyl_radius, cyl_length) = (params[6], params[7]);
    let sphere_radius = core_radius + shell_thickness;
    let volume_cylinder = std::f64::consts::PI * cyl_radius * cyl_radius * cyl_length;
    (sld_cyl - sld_core) * volume_cylinder * cylinder_amplitude(q, sin_alpha, cos_alpha, cyl_radius, cyl_length)
        + (sld_core - sld_shell) * sphere_volume(core_radius) * sas_3j1x_x(q * core_radius)
        + (sld_shell - sld_solvent) * sphere_volume(sphere_radius) * sas_3j1x_x(q * sphere_radius)
}

/// Orientationally averaged intensity; the host divides by
/// [`form_volume`].
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let quarter_pi = std::f64::consts::FRAC_PI_4;
    let mut total = 0.0;
    for (z, w) in gauss_76().points() {
        let alpha = z * quarter_pi + quarter_pi;
        let (sin_alpha, cos_alpha) = alpha.sin_cos();
        let f = amplitude(q, sin_alpha, cos_alpha, params);
        total += w * f * f * sin_alpha;
    }
    1.0e-4 * total * quarter_pi
}

/// Oriented intensity.
pub fn iqxy(qx: f64, qy: f64, params: &[f64]) -> f64 {
    let (qab, qc) = rotate_symmetric(qx, qy, params[8], params[9]);
    let q = qx.hypot(qy);
    let f = amplitude(q, qab / q, qc / q, params);
    1.0e-4 * f * f
}

/// Whole-sphere volume for host normalisation.
pub fn form_volume(params: &[f64]) -> f64 {
    sphere_volume(params[4] + params[5])
}

/// Effective radius: the outermost sphere radius.
pub fn effective_radius(params: &[f64]) -> f64 {
    params[4] + params[5]
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    let inf = f64::INFINITY;
    ModelDescriptor::new(
        "coreshellspherecylinder",
        "Orientationally averaged form factor for a monodisperse spherical particle with a core-shell sphere structure, filled with a circular cylinder in its center.",
        iq,
    )
    .with_description(
        "P(q) = scale/V_sph int_0^(pi/2) f^2(q,alpha) sin(alpha) dalpha\n\
         + background, with f the sum of the cylinder, core and shell\n\
         contrast terms.",
    )
    .with_category("shape:cylinder")
    .with_iqxy(iqxy)
    .with_form_volume(form_volume)
    .with_effective_radius(effective_radius)
    .with_parameters(vec![
        Parameter::new(
            "sld_core",
            "1e-6/Ang^2",
            0.0,
            [-inf, inf],
            ParamKind::Sld,
            "core scattering length density",
        ),
        Parameter::new(
            "sld_shell",
            "1e-6/Ang^2",
            4.0,
            [-inf, inf],
            ParamKind::Sld,
            "shell scattering length density",
        ),
        Parameter::new(
            "sld_cyl",
            "1e-6/Ang^2",
            4.0,
            [-inf, inf],
            ParamKind::Sld,
            "cylinder scattering length density",
        ),
        Parameter::new(
            "sld_solvent",
            "1e-6/Ang^2",
            6.34,
            [-inf, inf],
            ParamKind::Sld,
            "solvent scattering length density",
        ),
        Parameter::new("sphere_core_radius", "Ang", 500.0, [0.0, inf], ParamKind::Volume, "sphere core radius"),
        Parameter::new(
            "sphere_shell_thickness",
            "Ang",
            100.0,
            [0.0, inf],
            ParamKind::Volume,
            "sphere shell thickness",
        ),
        Parameter::new("cyl_radius", "Ang", 400.0, [0.0, inf], ParamKind::Volume, "cylinder radius"),
        Parameter::new("cyl_length", "Ang", 250.0, [0.0, inf], ParamKind::Volume, "cylinder length"),
        Parameter::new("cyl_orient_theta", "degrees", 60.0, [-inf, inf], ParamKind::Orientation, "latitude"),
        Parameter::new("cyl_orient_phi", "degrees", 60.0, [-inf, inf], ParamKind::Orientation, "longitude"),
    ])
    .with_demo(vec![
        ("sld_core", 0.0),
        ("sld_shell", 4.0),
        ("sld_cyl", 4.0),
        ("sld_solvent", 6.34),
        ("sphere_core_radius", 500.0),
        ("sphere_shell_thickness", 100.0),
        ("cyl_radius", 400.0),
        ("cyl_length", 250.0),
        ("cyl_orient_theta", 60.0),
        ("cyl_orient_phi", 60.0),
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
        assert_relative_eq!(eval.iq(0.05), 14.057200988216724, max_relative = 1e-9);
        assert_relative_eq!(eval.iq(0.2), 0.08088456440855177, max_relative = 1e-9);
    }

    #[test]
    fn test_pinned_value_2d() {
        let model = descriptor();
        let eval = Evaluation::with_overrides(
            &model,
            &[
                ("cyl_orient_theta", 80.1534480601659),
                ("cyl_orient_phi", 10.1510817110481),
            ],
        )
        .unwrap();
        let (qx, qy) = (0.2 * (2.5_f64).cos(), 0.2 * (2.5_f64).sin());
        assert_relative_eq!(
            eval.iqxy(qx, qy).unwrap(),
            0.07271701497911753,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_reduces_to_core_shell_sphere() {
        // at matched cylinder/core contrast the orientational average
        // collapses to the isotropic core-shell sphere
        let model = descriptor();
        let eval = Evaluation::with_overrides(&model, &[("sld_cyl", 0.0)]).unwrap();
        let q = 0.013;
        let f = (0.0 - 4.0) * sphere_volume(500.0) * sas_3j1x_x(q * 500.0)
            + (4.0 - 6.34) * sphere_volume(600.0) * sas_3j1x_x(q * 600.0);
        let want = 1.0e-4 * f * f / sphere_volume(600.0);
        assert_relative_eq!(eval.iq(q), want, max_relative = 1e-12);
    }

    #[test]
    fn test_forward_limit_counts_all_contrast() {
        // q -> 0: every shape function tends to 1
        let model = descriptor();
        let eval = Evaluation::new(&model);
        let v_cyl = std::f64::consts::PI * 400.0 * 400.0 * 250.0;
        let f = (4.0 - 0.0) * v_cyl + (0.0 - 4.0) * sphere_volume(500.0)
            + (4.0 - 6.34) * sphere_volume(600.0);
        let want = 1.0e-4 * f * f / sphere_volume(600.0);
        assert_relative_eq!(eval.iq(0.0), want, max_relative = 1e-12);
    }

    #[test]
    fn test_effective_radius_is_outer_radius() {
        let model = descriptor();
        let eval = Evaluation::new(&model);
        assert_relative_eq!(eval.effective_radius().unwrap(), 600.0, max_relative = 1e-15);
    }
}
