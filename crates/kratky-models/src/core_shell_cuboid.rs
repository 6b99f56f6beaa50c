//! Orientationally averaged core-shell cuboid.
//!
//! A cube of edge `L` wrapped in a shell of uniform thickness `d`. The
//! single-orientation amplitude is a product of three slab kernels per
//! contrast step,
//!
//! ```text
//! f = (rho_c - rho_sh) prod_j 2 (L/2) sinc(Q_j L/2)
//!   + (rho_sh - rho_solv) prod_j 2 (L/2 + d) sinc(Q_j (L/2 + d))
//! ```
//!
//! and the 1-D intensity averages `f^2` over the orientation sphere with
//! a nested 76-point rule in `cos(theta)` and `phi`.
//!
//! The fixtures shipped with the original plugin cannot be reproduced
//! from its own kernel (see DESIGN.md); the regression anchors below pin
//! this implementation, cross-checked against a dense-quadrature mirror.
//!
//! References: Mittelbach & Porod, Acta Physica Austriaca 14 (1961) 185.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::bessel::sinc;
use kratky_math::orient::rotate_asymmetric;
use kratky_math::quadrature::gauss_76;

/// Amplitude for direction cosines `(qa, qb, qc)` already scaled by `q`.
fn amplitude(
    qa: f64,
    qb: f64,
    qc: f64,
    core_sld: f64,
    rim_sld: f64,
    solvent_sld: f64,
    half_core: f64,
    half_outer: f64,
) -> f64 {
    let core = 8.0 * half_core.powi(3) * sinc(half_core * qa) * sinc(half_core * qb) * sinc(half_core * qc);
    let outer =
        8.0 * half_outer.powi(3) * sinc(half_outer * qa) * sinc(half_outer * qb) * sinc(half_outer * qc);
    (core_sld - rim_sld) * core + (rim_sld - solvent_sld) * outer
}

/// Orientationally averaged intensity; the host divides by
/// [`form_volume`].
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[core_sld, rim_sld, solvent_sld, length, thick_rim, _theta, _phi, _psi] = params else {
        return f64::NAN;
    };
    let half_core = 0.5 * length;
    let half_outer = 0.5 * length + thick_rim;
    let rule = gauss_76();
    let mut outer_total = 0.0;
    for (zi, wi) in rule.points() {
        let cos_theta = 0.5 * (zi + 1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        let mut inner_total = 0.0;
        for (zj, wj) in rule.points() {
            let phi = std::f64::consts::FRAC_PI_2 * 0.5 * (zj + 1.0);
            let (sin_phi, cos_phi) = phi.sin_cos();
            let f = amplitude(
                q * sin_theta * cos_phi,
                q * sin_theta * sin_phi,
                q * cos_theta,
                core_sld,
                rim_sld,
                solvent_sld,
                half_core,
                half_outer,
            );
            inner_total += wj * f * f;
        }
        outer_total += wi * inner_total * 0.5;
    }
    1.0e-4 * outer_total * 0.5
}

/// Oriented intensity.
pub fn iqxy(qx: f64, qy: f64, params: &[f64]) -> f64 {
    let &[core_sld, rim_sld, solvent_sld, length, thick_rim, theta, phi, psi] = params else {
        return f64::NAN;
    };
    let (qa, qb, qc) = rotate_asymmetric(qx, qy, theta, phi, psi);
    let f = amplitude(
        qa,
        qb,
        qc,
        core_sld,
        rim_sld,
        solvent_sld,
        0.5 * length,
        0.5 * length + thick_rim,
    );
    1.0e-4 * f * f
}

/// Particle volume `(L + 2d)^3`.
pub fn form_volume(params: &[f64]) -> f64 {
    (params[3] + 2.0 * params[4]).powi(3)
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    let inf = f64::INFINITY;
    ModelDescriptor::new(
        "core_shell_cuboid",
        "Orientationally averaged form factor for a monodisperse core-shell cuboid",
        iq,
    )
    .with_description(
        "P(q) = scale/V_cs * <f^2> + background, with\n\
         f = (rho_c - rho_sh) prod_j 2(L/2) sinc(Q_j L/2)\n\
           + (rho_sh - rho_solv) prod_j 2(L/2+d) sinc(Q_j (L/2+d)).",
    )
    .with_category("shape:parallelepiped")
    .with_iqxy(iqxy)
    .with_form_volume(form_volume)
    .with_effective_radius(effective_radius)
    .with_parameters(vec![
        Parameter::new(
            "sld_core",
            "1e-6/Ang^2",
            1.0,
            [-inf, inf],
            ParamKind::Sld,
            "Cuboid core scattering length density",
        ),
        Parameter::new(
            "sld_shell",
            "1e-6/Ang^2",
            2.0,
            [-inf, inf],
            ParamKind::Sld,
            "Cuboid shell scattering length density",
        ),
        Parameter::new(
            "sld_solvent",
            "1e-6/Ang^2",
            6.34,
            [-inf, inf],
            ParamKind::Sld,
            "Solvent scattering length density",
        ),
        Parameter::new("length", "Ang", 700.0, [0.0, inf], ParamKind::Volume, "Length of the Cuboid core"),
        Parameter::new("thick_rim", "Ang", 150.0, [0.0, inf], ParamKind::Volume, "Thickness of the shell"),
        Parameter::new("theta", "degrees", 0.0, [-inf, inf], ParamKind::Orientation, "In plane angle"),
        Parameter::new("phi", "degrees", 0.0, [-inf, inf], ParamKind::Orientation, "Out of plane angle"),
        Parameter::new(
            "psi",
            "degrees",
            0.0,
            [-inf, inf],
            ParamKind::Orientation,
            "Rotation angle around its own c axis against q plane",
        ),
    ])
    .with_demo(vec![
        ("sld_core", 1.0),
        ("sld_shell", 2.0),
        ("sld_solvent", 6.34),
        ("length", 700.0),
        ("thick_rim", 150.0),
        ("theta", 0.0),
        ("phi", 0.0),
        ("psi", 0.0),
    ])
}

/// Effective radius: the sphere of equal volume.
pub fn effective_radius(params: &[f64]) -> f64 {
    let total_length = params[3] + 2.0 * params[4];
    total_length * (3.0 / (4.0 * std::f64::consts::PI)).powf(1.0 / 3.0)
}
