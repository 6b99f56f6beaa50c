//! Star polymer with excluded volume.
//!
//! Hammouda's form factor for a branched polymer whose arms need not be
//! ideal chains. A single arm scatters as
//!
//! ```text
//! P_sb(q, N) = (1/(nu U^(1/2nu))) gammainc(1/2nu, U)
//!            - (1/(nu U^(1/nu)))  gammainc(1/nu, U)
//! ```
//!
//! with `U = q^2 b^2 N^(2 nu) / 6`, `b` the Kuhn length, `N` the degree
//! of polymerization per arm, and `nu` the Flory exponent; `gammainc` is
//! the unnormalised lower incomplete gamma function. The interbranch term
//! is `P_ib = 2 P_sb(2N) - P_sb(N)` and the intensity follows the RPA
//! combination over `f` arms, scaled by the contrast.
//!
//! References: B. Hammouda, J. Res. NIST 121 (2016) 139-164.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::gamma::{gamma, lower_gamma_regularized};

/// Single-branch form factor `P_sb(q, n)`.
fn single_branch(u: f64, onu: f64, o2nu: f64) -> f64 {
    onu * u.powf(-o2nu) * gamma(o2nu) * lower_gamma_regularized(o2nu, u)
        - onu * u.powf(-onu) * gamma(onu) * lower_gamma_regularized(onu, u)
}

/// Excluded-volume star intensity.
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[nu, f, b, n, sldp, slds] = params else {
        return f64::NAN;
    };
    let onu = 1.0 / nu;
    let o2nu = 0.5 / nu;

    let u = q * q * b * b * n.powf(2.0 * nu) / 6.0;
    let psb = single_branch(u, onu, o2nu);

    let u2 = q * q * b * b * (2.0 * n).powf(2.0 * nu) / 6.0;
    let pib = 2.0 * single_branch(u2, onu, o2nu) - psb;

    let sq = (f * psb + f * (f - 1.0) * pib) / (f * f);
    (sldp - slds) * (sldp - slds) * 1.0e-4 * sq
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new("star_excl_vol", "Star polymer with excluded volume", iq)
        .with_description(
            "Star polymer form factor in which the arms need not be ideal\n\
             chains. nu = excluded volume parameter, f = number of arms,\n\
             b = Kuhn length, n = degree of polymerization per arm.",
        )
        .with_category("shape-independent")
        .with_parameters(vec![
            Parameter::new(
                "nu",
                "",
                0.5,
                [0.0, 1.0],
                ParamKind::Scalar,
                "Excluded volume parameter",
            ),
            Parameter::new("f", "", 3.0, [1.0, f64::INFINITY], ParamKind::Scalar, "Number of arms"),
            Parameter::new(
                "b",
                "Ang",
                7.0,
                [1.0, f64::INFINITY],
                ParamKind::Scalar,
                "Kuhn length",
            ),
            Parameter::new(
                "n",
                "",
                30.0,
                [1.0, f64::INFINITY],
                ParamKind::Scalar,
                "Degree of polymerization",
            ),
            Parameter::new(
                "sldp",
                "1e-6/Ang^2",
                1.4,
                [f64::NEG_INFINITY, f64::INFINITY],
                ParamKind::Sld,
                "Polymer SLD",
            ),
            Parameter::new(
                "slds",
                "1e-6/Ang^2",
                6.7,
                [f64::NEG_INFINITY, f64::INFINITY],
                ParamKind::Sld,
                "Solvent SLD",
            ),
        ])
        .with_demo(vec![
            ("sldp", 1.0),
            ("slds", 6.3),
            ("f", 3.0),
            ("n", 30.0),
            ("b", 7.0),
            ("nu", 0.5),
        ])
}
