//! Core-shell ellipsoid with a volume-tied shell.
//!
//! A core-shell ellipsoid of revolution parameterised by the core axial
//! ratio and the dry-shell/core volume ratio instead of four independent
//! radii. The shell thickness is not a fit parameter: at every evaluation
//! it is recovered from the volume constraint
//!
//! ```text
//! (1 - f) [ (Re + t)^2 (Re X + t Xp) - Re^3 X ] = Rv Re^3 X
//! ```
//!
//! which is cubic in `t` and solved with the bracketing root solver. The
//! wet shell SLD mixes the dry shell SLD with solvent through the local
//! solvation fraction `f`.
//!
//! The scattering amplitude is the Chen-Kotlarchyk core-shell ellipsoid
//! form, orientationally averaged over `cos(theta)` for 1-D evaluation.
//!
//! References: Kotlarchyk & Chen, J. Chem. Phys. 79 (1983) 2461;
//! Berr, J. Phys. Chem. 91 (1987) 4760.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::bessel::sas_3j1x_x;
use kratky_math::orient::rotate_symmetric;
use kratky_math::quadrature::gauss_76;
use kratky_math::roots::{bracket_root, SolverConfig};

const FOUR_PI_3: f64 = 4.0 * std::f64::consts::PI / 3.0;

/// Geometry and contrasts resolved from the tied parameterisation.
#[derive(Debug, Clone, Copy)]
pub struct TiedGeometry {
    /// Equatorial core radius.
    pub equat_core: f64,
    /// Polar core radius `Re X`.
    pub polar_core: f64,
    /// Equatorial outer radius `Re + t`.
    pub equat_shell: f64,
    /// Polar outer radius `Re X + t Xp`.
    pub polar_shell: f64,
    /// Core-to-shell contrast.
    pub sld_core_shell: f64,
    /// Shell-to-solvent contrast.
    pub sld_shell_solvent: f64,
    /// Solved equatorial shell thickness.
    pub thick_shell: f64,
}

/// Shell thickness satisfying the dry-shell/core volume constraint.
///
/// Monotone in `t` for non-negative geometry, so a single bracket always
/// holds the root; the bracket is grown geometrically before solving.
/// Returns NaN when the solve cannot bracket or converge.
#[must_use]
pub fn solve_shell_thickness(
    radius_equat_core: f64,
    x_core: f64,
    vol_dry_shell_over_core: f64,
    x_polar_shell: f64,
    f_solvent_in_shell: f64,
) -> f64 {
    let re = radius_equat_core;
    let core = re * re * re * x_core;
    let target = vol_dry_shell_over_core * core;
    let g = |t: f64| {
        (1.0 - f_solvent_in_shell) * ((re + t) * (re + t) * (re * x_core + t * x_polar_shell) - core)
            - target
    };
    let mut upper = re * (1.0 + vol_dry_shell_over_core) + 1.0;
    for _ in 0..64 {
        if g(upper) >= 0.0 {
            break;
        }
        upper *= 2.0;
    }
    bracket_root(g, 0.0, upper, &SolverConfig::default()).unwrap_or(f64::NAN)
}

/// Resolves radii, contrasts, and shell thickness from the parameter
/// vector (table order).
#[must_use]
pub fn resolve(params: &[f64]) -> TiedGeometry {
    let (re, x_core, rv, xp) = (params[0], params[1], params[2], params[3]);
    let (sld_core, sld_dry_shell, sld_solvent, f_solv) =
        (params[4], params[5], params[6], params[7]);
    let thick_shell = solve_shell_thickness(re, x_core, rv, xp, f_solv);
    let shell_sld = f_solv * sld_solvent + (1.0 - f_solv) * sld_dry_shell;
    TiedGeometry {
        equat_core: re,
        polar_core: re * x_core,
        equat_shell: re + thick_shell,
        polar_shell: re * x_core + thick_shell * xp,
        sld_core_shell: sld_core - shell_sld,
        sld_shell_solvent: shell_sld - sld_solvent,
        thick_shell,
    }
}

/// Single-orientation core-shell ellipsoid amplitude.
#[must_use]
pub fn amplitude(qab: f64, qc: f64, geom: &TiedGeometry) -> f64 {
    let qr_core = (geom.equat_core * qab).hypot(geom.polar_core * qc);
    let volume_core = FOUR_PI_3 * geom.equat_core * geom.equat_core * geom.polar_core;
    let fq_core = sas_3j1x_x(qr_core) * volume_core * geom.sld_core_shell;
    let qr_shell = (geom.equat_shell * qab).hypot(geom.polar_shell * qc);
    let volume_shell = FOUR_PI_3 * geom.equat_shell * geom.equat_shell * geom.polar_shell;
    let fq_shell = sas_3j1x_x(qr_shell) * volume_shell * geom.sld_shell_solvent;
    fq_core + fq_shell
}

/// Orientationally averaged intensity; the host divides by
/// [`form_volume`].
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let geom = resolve(params);
    let mut total = 0.0;
    for (z, w) in gauss_76().points() {
        let cos_theta = z * 0.5 + 0.5;
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        let fq = amplitude(q * sin_theta, q * cos_theta, &geom);
        total += w * fq * fq;
    }
    1.0e-4 * total * 0.5
}

/// Oriented intensity.
pub fn iqxy(qx: f64, qy: f64, params: &[f64]) -> f64 {
    let geom = resolve(params);
    let (qab, qc) = rotate_symmetric(qx, qy, params[8], params[9]);
    let fq = amplitude(qab, qc, &geom);
    1.0e-4 * fq * fq
}

/// Outer ellipsoid volume, through the shell-thickness solve.
pub fn form_volume(params: &[f64]) -> f64 {
    let geom = resolve(params);
    FOUR_PI_3 * geom.equat_shell * geom.equat_shell * geom.polar_shell
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    let inf = f64::INFINITY;
    ModelDescriptor::new(
        "core_shell_ellipsoid_tied",
        "Form factor for an ellipsoidal particle with a constrained core shell structure.",
        iq,
    )
    .with_description(
        "Core-shell spheroid whose shell thickness follows from the dry\n\
         shell to core volume ratio and the local solvent fraction in the\n\
         wet shell, solved from a cubic volume equation at evaluation\n\
         time. The form factor is averaged over all orientations such\n\
         that P(q) = scale*<f^2>/Vol + bkg.",
    )
    .with_category("shape:ellipsoid")
    .with_iqxy(iqxy)
    .with_form_volume(form_volume)
    .with_parameters(vec![
        Parameter::new("radius_equat_core", "Ang", 20.0, [0.0, inf], ParamKind::Volume, "Equatorial radius of core"),
        Parameter::new(
            "x_core",
            "None",
            3.0,
            [0.0, inf],
            ParamKind::Volume,
            "axial ratio of core, X = r_polar/r_equatorial",
        ),
        Parameter::new(
            "vol_dry_shell_over_core",
            "None",
            0.75,
            [0.0, inf],
            ParamKind::Volume,
            "volume ratio of dry shell to core",
        ),
        Parameter::new(
            "x_polar_shell",
            "None",
            1.0,
            [0.0, inf],
            ParamKind::Volume,
            "ratio of thickness of shell at pole to that at equator",
        ),
        Parameter::new(
            "sld_core",
            "1e-6/Ang^2",
            2.0,
            [-inf, inf],
            ParamKind::Sld,
            "Core scattering length density",
        ),
        Parameter::new(
            "sld_dry_shell",
            "1e-6/Ang^2",
            1.0,
            [-inf, inf],
            ParamKind::Sld,
            "Dry shell scattering length density",
        ),
        Parameter::new(
            "sld_solvent",
            "1e-6/Ang^2",
            6.3,
            [-inf, inf],
            ParamKind::Sld,
            "Solvent scattering length density",
        ),
        Parameter::new(
            "f_solvent_in_shell",
            "None",
            0.3,
            [0.0, 0.99],
            ParamKind::Volume,
            "Local volume fraction of solvent in wet shell",
        ),
        Parameter::new("theta", "degrees", 0.0, [-360.0, 360.0], ParamKind::Orientation, "ellipsoid axis to beam angle"),
        Parameter::new("phi", "degrees", 0.0, [-360.0, 360.0], ParamKind::Orientation, "rotation about beam"),
    ])
}
