//! Generalized Guinier-Porod model with two Guinier regions.
//!
//! Hammouda's Guinier-Porod form extended to a second, low-q Guinier
//! regime: `rg2`/`s2` describe the low-q region, `rg1`/`s1` the mid-q
//! region, and `porod_exp` the high-q power law. The crossover points
//! `Q2 <= Q1` and the matching prefactors are computed from the
//! parameters so the three pieces join continuously.
//!
//! Singular inputs (`rg1 <= 0`, `rg2 <= 0`, or `s2 > s1`) return zero
//! intensity rather than propagating a numeric fault.
//!
//! Reference: B. Hammouda, J. Appl. Cryst. 43 (2010) 716-719.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};

/// Crossover points `(Q1, Q2)` for the current parameters.
#[must_use]
pub fn crossover_points(rg2: f64, s2: f64, rg1: f64, s1: f64, porod_exp: f64) -> (f64, f64) {
    let q1 = ((porod_exp - s1) * (3.0 - s1) / 2.0).sqrt() / rg1;
    let q2 = ((s1 - s2) / (2.0 * rg2 * rg2 / (3.0 - s2) - 2.0 * rg1 * rg1 / (3.0 - s1))).sqrt();
    (q1, q2)
}

/// Three-regime Guinier-Porod intensity.
pub fn iq(q: f64, params: &[f64]) -> f64 {
    let &[rg2, s2, rg1, s1, porod_exp] = params else {
        return f64::NAN;
    };
    if rg2 <= 0.0 || rg1 <= 0.0 || s2 > s1 {
        return 0.0;
    }
    let (q1, q2) = crossover_points(rg2, s2, rg1, s1, porod_exp);
    if q <= q2 {
        let g2 = (-q2 * q2 * (rg1 * rg1 / (3.0 - s1) - rg2 * rg2 / (3.0 - s2))).exp()
            * q2.powf(s2 - s1);
        g2 * q.powf(-s2) * (-(q * rg2).powi(2) / (3.0 - s2)).exp()
    } else if q <= q1 {
        q.powf(-s1) * (-(q * rg1).powi(2) / (3.0 - s1)).exp()
    } else {
        let d = rg1.powf(-(porod_exp - s1))
            * (-(porod_exp - s1) / 2.0).exp()
            * ((porod_exp - s1) * (3.0 - s1) / 2.0).powf((porod_exp - s1) / 2.0);
        d * q.powf(-porod_exp)
    }
}

/// Oriented form: depends on `|q|` only.
pub fn iqxy(qx: f64, qy: f64, params: &[f64]) -> f64 {
    iq(qx.hypot(qy), params)
}

/// Registration record.
#[must_use]
pub fn descriptor() -> ModelDescriptor {
    ModelDescriptor::new("general_guinier_porod", "Generalized Guinier Porod", iq)
        .with_description(
            "Guinier-Porod model with TWO Guinier regions.\n\
             rg2 and s2 fit the low-q region, rg1 and s1 the mid-q region,\n\
             porod_exp the high-q region.\n\
             ref: B Hammouda, A new Guinier-Porod model,\n\
             J. Appl. Cryst. (2010) 43, 716-719.",
        )
        .with_category("shape-independent")
        .with_iqxy(iqxy)
        .with_parameters(vec![
            Parameter::new(
                "rg2",
                "Ang",
                100.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "Low-Q Radius of gyration",
            ),
            Parameter::new(
                "s2",
                "",
                0.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "Low-Q Dimension variable",
            ),
            Parameter::new(
                "rg1",
                "Ang",
                10.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "Mid-Q Radius of gyration",
            ),
            Parameter::new(
                "s1",
                "",
                1.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "Mid-Q Dimension variable",
            ),
            Parameter::new(
                "porod_exp",
                "",
                3.0,
                [0.0, f64::INFINITY],
                ParamKind::Scalar,
                "Porod exponent",
            ),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kratky_core::eval::Evaluation;

    #[test]
    fn test_regime_values() {
        let model = descriptor();
        let eval = Evaluation::new(&model);
        // one point per regime, checked against an independent evaluation
        assert_relative_eq!(eval.iq(0.005), 122.92168923151664, max_relative = 1e-10);
        assert_relative_eq!(eval.iq(0.05), 17.649938051691908, max_relative = 1e-10);
        assert_relative_eq!(eval.iq(0.25), 0.4708856846994462, max_relative = 1e-10);
    }

    #[test]
    fn test_continuity_at_crossovers() {
        let model = descriptor();
        let eval = Evaluation::new(&model);
        let (q1, q2) = crossover_points(100.0, 0.0, 10.0, 1.0, 3.0);
        assert_relative_eq!(q1, 0.1414213562373095, max_relative = 1e-12);
        assert_relative_eq!(q2, 0.012340351046845907, max_relative = 1e-12);
        for q in [q1, q2] {
            let below = eval.iq(q * 0.999_999);
            let above = eval.iq(q * 1.000_001);
            assert_relative_eq!(below, above, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_constraint_violations_return_zero() {
        let model = descriptor();
        for overrides in [
            [("s2", 2.0)].as_slice(),   // s2 > s1
            [("rg1", 0.0)].as_slice(),  // degenerate mid-q radius
            [("rg2", -1.0)].as_slice(), // negative low-q radius
        ] {
            let eval = Evaluation::with_overrides(&model, overrides).unwrap();
            for q in [1.0e-4, 0.01, 0.1, 1.0] {
                assert_eq!(eval.iq(q), 0.0);
            }
        }
    }

    #[test]
    fn test_iqxy_matches_radial() {
        let model = descriptor();
        let eval = Evaluation::new(&model);
        let q = 0.05_f64;
        let (qx, qy) = (q / 2.0_f64.sqrt(), q / 2.0_f64.sqrt());
        assert_relative_eq!(eval.iqxy(qx, qy).unwrap(), eval.iq(q), max_relative = 1e-12);
    }
}
