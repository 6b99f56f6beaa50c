//! Specular neutron reflectivity of up to four slabs on a substrate.
//!
//! Parratt recursion over the slab stack,
//!
//! ```text
//! R_n = (r_n + R_{n+1} e^{2 i k_{n+1} t_{n+1}}) / (1 + r_n R_{n+1} e^{2 i k_{n+1} t_{n+1}})
//! ```
//!
//! with the Fresnel term of each interface damped for roughness after
//! Nevot and Croce, `r_ij = (k_i - k_j)/(k_i + k_j) exp(-2 k_i k_j s^2)`.
//! The normal wavevector in medium `m` is
//! `k_m = sqrt(k_cap^2 - 4 pi sld_m)` with `k_cap` set by `q/2` in the
//! capping medium, so below the critical edge the wavevectors turn
//! imaginary and the recursion yields total reflection. The output is
//! the dimensionless reflectivity `R(q) = |R_0|^2`, not a volume-scaled
//! intensity.
//!
//! References: Parratt, Phys. Rev. 95 (1954) 359; Nevot & Croce,
//! Rev. Phys. Appl. 15 (1980) 761.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::Complex;

/// One slab of the layer stack.
#[derive(Debug, Clone, Copy)]
pub struct Slab {
    /// Scattering length density, units of 1e-6/Ang^2.
    pub sld: f64,
    /// Thickness in Ang.
    pub thickness: f64,
    /// Roughness of the slab's upper interface, in Ang.
    pub roughness: f64,
}

/// Normal wavevector in a medium of the given SLD.
fn k_medium(kcap_sq: f64, sld: f64) -> Complex {
    Complex::new(kcap_sq - 4.0 * std::f64::consts::PI * sld * 1.0e-6, 0.0).sqrt()
}

/// Fresnel reflection between two media with Nevot-Croce roughness.
fn fresnel(k1: Complex, k2: Complex, roughness: f64) -> Complex {
    (k1 - k2) / (k1 + k2) * (-2.0 * k1 * k2 * roughness * roughness).exp()
}

/// Reflectivity of a slab stack between a capping medium and a
/// substrate, by the Parratt recursion.
#[must_use]
pub fn reflectivity(
    q: f64,
    sld_cap: f64,
    slabs: &[Slab],
    sld_substrate: f64,
    roughness_substrate: f64,
) -> f64 {
    let ko = 0.5 * q;
    let kcap_sq = ko * ko + 4.0 * std::f64::consts::PI * sld_cap * 1.0e-6;

    // bottom interface first: no reflection from the substrate bulk
    let k_last = match slabs.last() {
        Some(slab) => k_medium(kcap_sq, slab.sld),
        None => k_medium(kcap_sq, sld_cap),
    };
    let mut r = fresnel(k_last, k_medium(kcap_sq, sld_substrate), roughness_substrate);

    // walk up the stack accumulating phase through each slab
    for i in (0..slabs.len()).rev() {
        let above = if i == 0 { sld_cap } else { slabs[i - 1].sld };
        let kzn = k_medium(kcap_sq, above);
        let kznp1 = k_medium(kcap_sq, slabs[i].sld);
        let rn = fresnel(kzn, kznp1, slabs[i].roughness);
        let phased = r * (Complex::new(0.0, 2.0 * slabs[i].thickness) * kznp1).exp();
        r = (rn + phased) / (Complex::new(1.0, 0.0) + rn * phased);
    }
    r.norm_sqr()
}

/// `R(q)` for the four-slab parameter table.
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let slabs = [
        Slab { sld: params[1], thickness: params[2], roughness: params[3] },
        Slab { sld: params[4], thickness: params[5], roughness: params[6] },
        Slab { sld: params[7], thickness: params[8], roughness: params[9] },
        Slab { sld: params[10], thickness: params[11], roughness: params[12] },
    ];
    reflectivity(q, params[0], &slabs, params[13], params[14])
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    let inf = f64::INFINITY;
    let mut parameters = vec![Parameter::new(
        "sld_cap",
        "1e-6/Ang^2",
        0.0,
        [0.0, inf],
        ParamKind::Scalar,
        "Capping medium SLD",
    )];
    let layers: [(&'static str, &'static str, &'static str, [f64; 3]); 4] = [
        ("sld1", "t1", "r1", [0.0, 0.0, 0.0]),
        ("sld2", "t2", "r2", [0.0, 0.0, 0.0]),
        ("sld3", "t3", "r3", [0.0, 0.0, 0.0]),
        ("sld4", "t4", "r4", [2.0, 100.0, 10.0]),
    ];
    for (sld, t, r, defaults) in layers {
        parameters.push(Parameter::new(sld, "1e-6/Ang^2", defaults[0], [0.0, inf], ParamKind::Scalar, "Layer SLD"));
        parameters.push(Parameter::new(t, "Ang", defaults[1], [0.0, inf], ParamKind::Scalar, "Layer thickness"));
        parameters.push(Parameter::new(r, "Ang", defaults[2], [0.0, inf], ParamKind::Scalar, "Layer roughness"));
    }
    parameters.push(Parameter::new(
        "sld_s",
        "1e-6/Ang^2",
        2.07,
        [0.0, inf],
        ParamKind::Scalar,
        "Substrate SLD",
    ));
    parameters.push(Parameter::new(
        "r_s",
        "Ang",
        10.0,
        [0.0, inf],
        ParamKind::Scalar,
        "Substrate roughness",
    ));
    ModelDescriptor::new("NR_4_slab", "User 4 layer model for neutron reflectivity", iq)
        .with_description(
            "Calculates specular reflectivity for up to 4 slab-like layers\n\
             on a substrate, each characterised by SLD, thickness and\n\
             roughness, following the Parratt recursion with Nevot-Croce\n\
             roughness damping.",
        )
        .with_category("reflectometry")
        .with_parameters(parameters)
}
