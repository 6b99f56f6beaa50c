//! Superparamagnetic core-shell sphere with Langevin-relaxed moments.
//!
//! Polarised SANS of dilute core-(multi)shell spheres whose magnetisation
//! relaxes against the horizontal field through a Boltzmann orientation
//! distribution. Each region carries a nuclear SLD, a magnetic SLD, and a
//! Langevin parameter `eta`; the magnetisation averages are
//!
//! ```text
//! <M_par>    = L(eta)          <M_par^2>  = 1 - 2 L(eta)/eta
//! <M_perp>   = 0               <M_perp^2> = L(eta)/eta
//! ```
//!
//! with the Langevin function `L(x) = coth(x) - 1/x`. A coupling
//! parameter `delta` per region selects whether its transverse moment is
//! coaligned with the core's (1) or orientationally uncorrelated (0); the
//! uncorrelated part adds incoherently. The four spin-resolved cross
//! sections are combined with the polarisation weights of the incoming
//! (`up_i`) and outgoing (`up_f`) beam; 0.5/0.5 reproduces the
//! unpolarised cross section. The weight-to-cross-section pairing follows
//! the published kernel verbatim.
//!
//! The registered configuration carries a single shell; the kernels take
//! a shell slice and evaluate any number of layers.
//!
//! References: Wiedenmann, Physica B 356 (2005) 246; Muehlbauer et al.,
//! Rev. Mod. Phys. 91 (2019) 015004.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::bessel::sas_3j1x_x;
use kratky_math::gamma::{langevin, langevin_over_x};
use kratky_math::quadrature::gauss_76;

use crate::sphere::sphere_volume;

/// One shell of the magnetic profile.
#[derive(Debug, Clone, Copy)]
pub struct MagneticShell {
    /// Nuclear scattering length density.
    pub nuc_sld: f64,
    /// Magnetic scattering length density.
    pub mag_sld: f64,
    /// Langevin parameter.
    pub eta: f64,
    /// Transverse coupling to the core moment (1 coaligned, 0 random).
    pub delta: f64,
    /// Shell thickness.
    pub thickness: f64,
}

/// Outermost radius of the profile.
#[must_use]
pub fn outer_radius(radius: f64, shells: &[MagneticShell]) -> f64 {
    shells.iter().fold(radius, |r, s| r + s.thickness)
}

/// Squared nuclear amplitude.
#[must_use]
pub fn nuclear_sq(q: f64, sld_core: f64, radius: f64, sld_solvent: f64, shells: &[MagneticShell]) -> f64 {
    let mut f = 0.0;
    let mut r = radius;
    let mut last = sld_core;
    for shell in shells {
        f += sphere_volume(r) * (shell.nuc_sld - last) * sas_3j1x_x(q * r);
        last = shell.nuc_sld;
        r += shell.thickness;
    }
    f += sphere_volume(r) * (sld_solvent - last) * sas_3j1x_x(q * r);
    1.0e-4 * f * f
}

/// Nuclear amplitude, scaled for the nuclear-magnetic cross term.
#[must_use]
pub fn nuclear(q: f64, sld_core: f64, radius: f64, sld_solvent: f64, shells: &[MagneticShell]) -> f64 {
    let mut f = 0.0;
    let mut r = radius;
    let mut last = sld_core;
    for shell in shells {
        f += sphere_volume(r) * (shell.nuc_sld - last) * sas_3j1x_x(q * r);
        last = shell.nuc_sld;
        r += shell.thickness;
    }
    f += sphere_volume(r) * (sld_solvent - last) * sas_3j1x_x(q * r);
    1.0e-2 * f
}

/// In-field magnetisation amplitude, each region weighted by `L(eta)`.
#[must_use]
pub fn longitudinal(
    q: f64,
    mag_core: f64,
    radius: f64,
    mag_solvent: f64,
    eta_core: f64,
    eta_solvent: f64,
    shells: &[MagneticShell],
) -> f64 {
    let mut f = 0.0;
    let mut r = radius;
    let mut last = mag_core * langevin(eta_core);
    for shell in shells {
        let cur = shell.mag_sld * langevin(shell.eta);
        f += sphere_volume(r) * (cur - last) * sas_3j1x_x(q * r);
        last = cur;
        r += shell.thickness;
    }
    f += sphere_volume(r) * (mag_solvent * langevin(eta_solvent) - last) * sas_3j1x_x(q * r);
    1.0e-2 * f
}

/// Squared in-field magnetisation amplitude, weighted by
/// `sqrt(1 - 2 L(eta)/eta)`.
#[must_use]
pub fn longitudinal_sq(
    q: f64,
    mag_core: f64,
    radius: f64,
    mag_solvent: f64,
    eta_core: f64,
    eta_solvent: f64,
    shells: &[MagneticShell],
) -> f64 {
    let mut f = 0.0;
    let mut r = radius;
    let mut last = mag_core * (1.0 - 2.0 * langevin_over_x(eta_core)).sqrt();
    for shell in shells {
        let cur = shell.mag_sld * (1.0 - 2.0 * langevin_over_x(shell.eta)).sqrt();
        f += sphere_volume(r) * (cur - last) * sas_3j1x_x(q * r);
        last = cur;
        r += shell.thickness;
    }
    let solvent = mag_solvent * (1.0 - 2.0 * langevin_over_x(eta_solvent)).sqrt();
    f += sphere_volume(r) * (solvent - last) * sas_3j1x_x(q * r);
    1.0e-4 * f * f
}

/// Squared transverse magnetisation amplitude.
///
/// The `delta`-coupled part adds coherently to the core's transverse
/// moment; the uncoupled remainder adds as a squared amplitude.
#[must_use]
pub fn transverse_sq(
    q: f64,
    mag_core: f64,
    radius: f64,
    mag_solvent: f64,
    eta_core: f64,
    eta_solvent: f64,
    delta_solvent: f64,
    shells: &[MagneticShell],
) -> f64 {
    let mut f = 0.0;
    let mut fsq_perp = 0.0;
    let mut r = radius;
    let mut last = mag_core * langevin_over_x(eta_core).sqrt();
    for shell in shells {
        let lw = langevin_over_x(shell.eta);
        f += sphere_volume(r) * (shell.mag_sld * (lw * shell.delta).sqrt() - last) * sas_3j1x_x(q * r);
        fsq_perp += (sphere_volume(r) * shell.mag_sld * (lw * (1.0 - shell.delta)).sqrt() * sas_3j1x_x(q * r)).powi(2);
        last = shell.mag_sld * (lw * shell.delta).sqrt();
        r += shell.thickness;
    }
    let lw = langevin_over_x(eta_solvent);
    f += sphere_volume(r) * (mag_solvent * (lw * delta_solvent).sqrt() - last) * sas_3j1x_x(q * r);
    fsq_perp += (sphere_volume(r) * mag_solvent * (lw * (1.0 - delta_solvent)).sqrt() * sas_3j1x_x(q * r)).powi(2);
    1.0e-4 * (f * f + fsq_perp)
}

/// The spin-resolved cross sections `(I--, I++, I-+)` at one detector
/// angle; `I+-` equals `I-+`. `theta` is measured from the field axis.
#[allow(clippy::too_many_arguments)]
#[must_use]
pub fn cross_sections(
    q: f64,
    nuc_core: f64,
    mag_core: f64,
    eta_core: f64,
    radius: f64,
    nuc_solvent: f64,
    mag_solvent: f64,
    eta_solvent: f64,
    delta_solvent: f64,
    shells: &[MagneticShell],
    cos_theta: f64,
    sin_theta: f64,
) -> (f64, f64, f64) {
    let n2 = nuclear_sq(q, nuc_core, radius, nuc_solvent, shells);
    let n1 = nuclear(q, nuc_core, radius, nuc_solvent, shells);
    let mz1 = longitudinal(q, mag_core, radius, mag_solvent, eta_core, eta_solvent, shells);
    let mz2 = longitudinal_sq(q, mag_core, radius, mag_solvent, eta_core, eta_solvent, shells);
    let mt2 = transverse_sq(
        q, mag_core, radius, mag_solvent, eta_core, eta_solvent, delta_solvent, shells,
    );
    let s2 = sin_theta * sin_theta;
    let c2 = cos_theta * cos_theta;
    let idd = n2 - 2.0 * n1 * mz1 * s2 + mz2 * s2 * s2 + mt2 * s2 * c2;
    let iuu = n2 + 2.0 * n1 * mz1 * s2 + mz2 * s2 * s2 + mt2 * s2 * c2;
    let idu = mt2 * (1.0 + c2 * c2) + mz2 * s2 * c2;
    (idd, iuu, idu)
}

/// Weights reconstructing a partially polarised beam from the
/// spin-resolved cross sections, ordered `[dd, du, ud, uu]`.
///
/// The norm keeps the sum of spin-resolved measurements equal to the
/// unpolarised (or half-polarised) cross section.
#[must_use]
pub fn polarisation_weights(up_i: f64, up_f: f64) -> [f64; 4] {
    let in_spin = up_i.abs().clamp(0.0, 1.0);
    let out_spin = up_f.abs().clamp(0.0, 1.0);
    let norm = if out_spin < 0.5 { 1.0 - out_spin } else { out_spin };
    [
        (1.0 - in_spin) * (1.0 - out_spin) / norm,
        (1.0 - in_spin) * out_spin / norm,
        in_spin * (1.0 - out_spin) / norm,
        in_spin * out_spin / norm,
    ]
}

fn single_shell(params: &[f64]) -> MagneticShell {
    MagneticShell {
        nuc_sld: params[8],
        mag_sld: params[9],
        eta: params[10],
        delta: params[11],
        thickness: params[12],
    }
}

fn weighted(q: f64, params: &[f64], cos_theta: f64, sin_theta: f64) -> f64 {
    let shells = [single_shell(params)];
    let (idd, iuu, idu) = cross_sections(
        q, params[0], params[1], params[2], params[3], params[4], params[5], params[6], params[7],
        &shells, cos_theta, sin_theta,
    );
    let w = polarisation_weights(params[13], params[14]);
    w[0] * iuu + w[1] * idu + w[2] * idu + w[3] * idd
}

/// Intensity averaged over the detector angle; the host divides by
/// [`form_volume`].
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let mut total = 0.0;
    for (z, w) in gauss_76().points() {
        let theta = std::f64::consts::PI * (z + 1.0);
        let (sin_theta, cos_theta) = theta.sin_cos();
        total += w * weighted(q, params, cos_theta, sin_theta);
    }
    0.5 * total
}

/// Intensity at one detector point; the field is along `qx`.
pub fn iqxy(qx: f64, qy: f64, params: &[f64]) -> f64 {
    let q = qx.hypot(qy);
    weighted(q, params, qx / q, qy / q)
}

/// Outer sphere volume for host normalisation.
pub fn form_volume(params: &[f64]) -> f64 {
    sphere_volume(outer_radius(params[3], &[single_shell(params)]))
}

/// Effective radius (outer radius) for structure-factor combination.
pub fn effective_radius(params: &[f64]) -> f64 {
    outer_radius(params[3], &[single_shell(params)])
}

/// Registration record (single-shell configuration).
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    let inf = f64::INFINITY;
    ModelDescriptor::new(
        "magnetic_langevin_core_shell_sphere",
        "Dilute magnetic core-shell particles in a matrix with the magnetisation relaxing with respect to magnetic field",
        iq,
    )
    .with_description(
        "I(q) = A_ij (F_N^2(q) + C_ij(L(H)) F_N F_M) + B_ij(L(H)) F_M^2(q)\n\
         with the Langevin term L(H) describing the orientational\n\
         distribution of magnetic moments with respect to the field.\n\
         The core and the shell each carry a thickness, a Langevin\n\
         parameter and magnetic and nuclear slds.",
    )
    .with_category("shape:sphere")
    .with_iqxy(iqxy)
    .with_form_volume(form_volume)
    .with_effective_radius(effective_radius)
    .with_parameters(vec![
        Parameter::new(
            "nuc_sld_core",
            "1e-6/Ang^2",
            1.0,
            [-inf, inf],
            ParamKind::Scalar,
            "Core scattering length density",
        ),
        Parameter::new(
            "magnetic_sld_core",
            "1e-6/Ang^2",
            1.0,
            [-inf, inf],
            ParamKind::Scalar,
            "Magnetic core scattering length density",
        ),
        Parameter::new("eta_core", "None", 3.0, [0.0, inf], ParamKind::Scalar, "Langevin parameter of core"),
        Parameter::new("radius", "Ang", 50.0, [0.0, inf], ParamKind::Volume, "Radius of the core"),
        Parameter::new(
            "nuc_sld_solvent",
            "1e-6/Ang^2",
            6.4,
            [-inf, inf],
            ParamKind::Scalar,
            "Solvent scattering length density",
        ),
        Parameter::new(
            "magnetic_sld_solvent",
            "1e-6/Ang^2",
            3.0,
            [-inf, inf],
            ParamKind::Scalar,
            "Magnetic Solvent scattering length density",
        ),
        Parameter::new("eta_solvent", "None", 3.0, [0.0, inf], ParamKind::Scalar, "Langevin parameter of solvent"),
        Parameter::new(
            "delta_solvent",
            "None",
            1.0,
            [0.0, 1.0],
            ParamKind::Scalar,
            "Disorder coupling parameter of matrix to core",
        ),
        Parameter::new(
            "nuc_sld_shell",
            "1e-6/Ang^2",
            1.7,
            [-inf, inf],
            ParamKind::Scalar,
            "Scattering length density of shell",
        ),
        Parameter::new(
            "magnetic_sld_shell",
            "1e-6/Ang^2",
            1.7,
            [-inf, inf],
            ParamKind::Scalar,
            "Magnetic scattering length density of shell",
        ),
        Parameter::new("eta_shell", "None", 3.0, [0.0, inf], ParamKind::Scalar, "Langevin parameter of shell"),
        Parameter::new(
            "delta_shell",
            "None",
            1.0,
            [0.0, 1.0],
            ParamKind::Scalar,
            "Disorder coupling parameter of shell to core",
        ),
        Parameter::new("thickness", "Ang", 40.0, [0.0, inf], ParamKind::Volume, "Thickness of shell"),
        Parameter::new("up_i", "None", 0.0, [0.0, 1.0], ParamKind::Scalar, "Polarisation incoming beam"),
        Parameter::new("up_f", "None", 0.0, [0.0, 1.0], ParamKind::Scalar, "Polarisation outgoing beam"),
    ])
}
