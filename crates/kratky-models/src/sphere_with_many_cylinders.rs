//! Core-double-shell sphere filled with many cylinders.
//!
//! A core-double-shell sphere whose core holds randomly placed
//! monodisperse cylinders. The cylinder amount enters through their
//! relative core volume fraction, and the random positions inside an
//! averaging sphere of radius `R_avg <= R_core` translate into an extra
//! sphere amplitude multiplying the cylinder term:
//!
//! ```text
//! f(q, a) = (rho_sh2 - rho_solv) V_sph  3j1x(q R_sph)
//!         + (rho_sh  - rho_sh2 ) V_in   3j1x(q R_in)
//!         + (rho_c   - rho_sh  ) V_core 3j1x(q R_core)
//!         + (rho_cyl - rho_c   ) 3j1x(q R_avg) phi_cyl V_core f_cyl(q, a)
//! ```
//!
//! With no cylinders the model is the isotropic core-double-shell
//! sphere; with one shell, matched cylinder/shell contrast, and
//! `R_avg = R_core` the amplitude factorises through
//! `(1 - phi_cyl f_cyl)`.
//!
//! The regression anchors are pinned values of this implementation; the
//! values published with the original plugin are verbatim copies of the
//! single-cylinder model's and are treated as known-ambiguous (see
//! DESIGN.md).

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::bessel::sas_3j1x_x;
use kratky_math::orient::rotate_symmetric;
use kratky_math::quadrature::gauss_76;

use crate::sphere::sphere_volume;
use crate::sphere_with_cylinder::cylinder_amplitude;

/// Composite amplitude of the filled core-double-shell sphere.
#[must_use]
pub fn amplitude(q: f64, sin_alpha: f64, cos_alpha: f64, params: &[f64]) -> f64 {
    let volfract_cyl = params[0];
    let (sld_core, sld_shell, sld_shell_2) = (params[1], params[2], params[3]);
    let (sld_cyl, sld_solvent) = (params[4], params[5]);
    let (core_radius, thickness, thickness_2) = (params[6], params[7], params[8]);
    let (cyl_radius, cyl_length, avgsph_radius) = (params[9], params[10], params[11]);
    let inner_radius = core_radius + thickness;
    let outer_radius = inner_radius + thickness_2;
    (sld_shell_2 - sld_solvent) * sphere_volume(outer_radius) * sas_3j1x_x(q * outer_radius)
        + (sld_shell - sld_shell_2) * sphere_volume(inner_radius) * sas_3j1x_x(q * inner_radius)
        + (sld_core - sld_shell) * sphere_volume(core_radius) * sas_3j1x_x(q * core_radius)
        + (sld_cyl - sld_core)
            * sas_3j1x_x(q * avgsph_radius)
            * volfract_cyl
            * sphere_volume(core_radius)
            * cylinder_amplitude(q, sin_alpha, cos_alpha, cyl_radius, cyl_length)
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
    let (qab, qc) = rotate_symmetric(qx, qy, params[12], params[13]);
    let q = qx.hypot(qy);
    let f = amplitude(q, qab / q, qc / q, params);
    1.0e-4 * f * f
}

/// Whole-sphere volume for host normalisation.
pub fn form_volume(params: &[f64]) -> f64 {
    sphere_volume(params[6] + params[7] + params[8])
}

/// Effective radius: the outermost sphere radius.
pub fn effective_radius(params: &[f64]) -> f64 {
    params[6] + params[7] + params[8]
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    let inf = f64::INFINITY;
    ModelDescriptor::new(
        "coredoubleshellspherefilledwithmanycylinders",
        "Orientationally averaged form factor for a monodisperse spherical particle with a core-double-shell sphere structure, filled with circular cylinders in its core.",
        iq,
    )
    .with_description(
        "Core-double-shell sphere with randomly placed monodisperse\n\
         cylinders in the core. Their amount enters via the relative\n\
         volume fraction phi_cyl ~ N V_cyl / V_core, and their random\n\
         positions via the amplitude of an averaging sphere of radius\n\
         R_avg inside the core.",
    )
    .with_category("shape:cylinder")
    .with_iqxy(iqxy)
    .with_form_volume(form_volume)
    .with_effective_radius(effective_radius)
    .with_parameters(vec![
        Parameter::new(
            "volfract_cyl",
            "",
            0.4,
            [0.0, 1.0],
            ParamKind::Scalar,
            "relative volume fraction of cylinders in core sphere",
        ),
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
            "inner shell scattering length density",
        ),
        Parameter::new(
            "sld_shell_2",
            "1e-6/Ang^2",
            4.0,
            [-inf, inf],
            ParamKind::Sld,
            "outer shell scattering length density",
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
            "sphere inner shell thickness",
        ),
        Parameter::new(
            "sphere_shell_thickness_2",
            "Ang",
            50.0,
            [0.0, inf],
            ParamKind::Volume,
            "sphere outer shell thickness",
        ),
        Parameter::new("cyl_radius", "Ang", 400.0, [0.0, inf], ParamKind::Volume, "cylinder radius"),
        Parameter::new("cyl_length", "Ang", 250.0, [0.0, inf], ParamKind::Volume, "cylinder length"),
        Parameter::new(
            "cyl_avgsph_radius",
            "Ang",
            150.0,
            [0.0, inf],
            ParamKind::Volume,
            "radius of the averaging sphere for the positioning of the cylinders in the core",
        ),
        Parameter::new("theta", "degrees", 60.0, [-360.0, 360.0], ParamKind::Orientation, "latitude"),
        Parameter::new("phi", "degrees", 60.0, [-360.0, 360.0], ParamKind::Orientation, "longitude"),
    ])
    .with_demo(vec![
        ("volfract_cyl", 0.4),
        ("sld_core", 0.0),
        ("sld_shell", 4.0),
        ("sld_shell_2", 2.0),
        ("sld_cyl", 4.0),
        ("sld_solvent", 6.34),
        ("sphere_core_radius", 500.0),
        ("sphere_shell_thickness", 100.0),
        ("sphere_shell_thickness_2", 50.0),
        ("cyl_radius", 400.0),
        ("cyl_length", 250.0),
        ("cyl_avgsph_radius", 150.0),
        ("theta", 60.0),
        ("phi", 60.0),
    ])
}
