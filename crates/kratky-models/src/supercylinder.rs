//! Supercylinder (superellipsoid of revolution).
//!
//! The superellipsoid `(x^2 + y^2)^(t/2) + |z/eps|^t <= R^t` interpolates
//! between cylinders and ellipsoids; it has been used to model
//! lipoproteins. The cross-section radius at height `z` is
//! `r(z) = (R^t - |z/eps|^t)^(1/t)` and the orientationally averaged
//! intensity is the double integral
//!
//! ```text
//! P(q) = int_0^(pi/2) [ int_0^(R eps) r(z) J1(q r(z) sin th)
//!                        cos(q z cos th) dz / sin th ]^2 sin th dth
//! I(q) = P(q) (4 (sld - sld_solvent) pi / q)^2
//! ```
//!
//! evaluated with nested adaptive Gauss-Kronrod quadrature at a fixed
//! relative tolerance (the original exposed its tolerance through an
//! undeclared parameter; see DESIGN.md).
//!
//! Reference: Maric et al., ACS Nano 11 (2017).

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::bessel::sas_j1;
use kratky_math::quadrature::adaptive_kronrod;

const TOLERANCE: f64 = 1e-8;

/// Cross-section radius `r(z)` of the superellipsoid profile.
#[must_use]
pub fn profile_radius(z: f64, radius: f64, eps: f64, t: f64) -> f64 {
    (radius.abs().powf(t) - (z / eps).abs().powf(t)).powf(1.0 / t)
}

/// Orientationally averaged supercylinder intensity.
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[sld, sld_solvent, radius, eps, t] = params else {
        return f64::NAN;
    };
    let half_height = radius * eps;
    let outer = adaptive_kronrod(
        |theta: f64| {
            let (sin_theta, cos_theta) = theta.sin_cos();
            let inner = adaptive_kronrod(
                |z: f64| {
                    let r = profile_radius(z, radius, eps, t);
                    r * sas_j1(q * r * sin_theta) * (q * z * cos_theta).cos()
                },
                0.0,
                half_height,
                TOLERANCE,
                TOLERANCE,
            );
            let amplitude = inner / sin_theta;
            amplitude * amplitude * sin_theta
        },
        0.0,
        std::f64::consts::FRAC_PI_2,
        TOLERANCE,
        TOLERANCE,
    );
    let prefactor = 4.0 * (sld - sld_solvent) * std::f64::consts::PI / q;
    outer * prefactor * prefactor
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new(
        "supercylinder",
        "Supercylinder with uniform scattering length density",
        iq,
    )
    .with_description(
        "Superellipsoid of revolution with equatorial radius R,\n\
         eccentricity eps and shape exponent t, integrated numerically\n\
         over profile and orientation.",
    )
    .with_category("shape:cylinder")
    .with_parameters(vec![
        Parameter::new(
            "sld",
            "10-6A-2",
            4.0,
            [0.0, f64::INFINITY],
            ParamKind::Sld,
            "lipoprotein scattering length density",
        ),
        Parameter::new(
            "sld_solvent",
            "10-6A-2",
            1.0,
            [0.0, f64::INFINITY],
            ParamKind::Sld,
            "Solvent scattering length density",
        ),
        Parameter::new(
            "R",
            "Ang",
            50.0,
            [0.0, f64::INFINITY],
            ParamKind::Scalar,
            "The radius of the superellipsoid",
        ),
        Parameter::new(
            "eps",
            "",
            2.0,
            [0.0, f64::INFINITY],
            ParamKind::Scalar,
            "eccentricity of the superellipsoid",
        ),
        Parameter::new(
            "t",
            "",
            3.0,
            [0.0, f64::INFINITY],
            ParamKind::Scalar,
            "shape exponent of the superellipsoid",
        ),
    ])
}
