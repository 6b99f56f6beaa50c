//! Right circular cylinder, evaluated for very long cylinders.
//!
//! The standard cylinder form factor
//!
//! ```text
//! F(q, a) = dRho V sinc(q L cos(a) / 2) 2J1(q R sin(a)) / (q R sin(a))
//! ```
//!
//! orientationally averaged over `a` in `[0, pi/2]`. The default 76-point
//! rule turns numerically unstable once the length passes roughly 1000
//! Ang; this registration evaluates the same kernel with a 501-point
//! Gauss-Legendre rule, which stays stable out to lengths of order 4e5
//! Ang. The quadrature rule is a kernel argument, so both variants share
//! one implementation.

use kratky_core::model::ModelDescriptor;
use kratky_core::params::{ParamKind, Parameter};
use kratky_math::bessel::{sas_2j1x_x, sinc};
use kratky_math::quadrature::{gauss_501, GaussLegendre};

/// Cylinder volume `pi r^2 L`.
#[must_use]
pub fn cylinder_volume(radius: f64, length: f64) -> f64 {
    std::f64::consts::PI * radius * radius * length
}

/// Orientationally averaged cylinder intensity with a caller-chosen rule.
#[must_use]
pub fn iq_with_rule(q: f64, params: &[f64], rule: &GaussLegendre) -> f64 {
    let &[sld, sld_solvent, radius, length] = params else {
        return f64::NAN;
    };
    let contrast_volume = (sld - sld_solvent) * cylinder_volume(radius, length);
    let zm = std::f64::consts::FRAC_PI_4;
    let mut total = 0.0;
    for (z, w) in rule.points() {
        let alpha = z * zm + zm;
        let (sin_a, cos_a) = alpha.sin_cos();
        let fq = contrast_volume * sinc(q * 0.5 * length * cos_a) * sas_2j1x_x(q * radius * sin_a);
        total += w * fq * fq * sin_a;
    }
    1.0e-4 * total * zm
}

/// Long-cylinder intensity (501-point rule); the host divides by
/// [`form_volume`].
pub fn iq(q: f64, params: &[f64]) -> f64 {
    iq_with_rule(q, params, gauss_501())
}

/// Particle volume for host normalisation.
pub fn form_volume(params: &[f64]) -> f64 {
    cylinder_volume(params[2], params[3])
}

/// Registration record for the long cylinder.
#[must_use]
pub fn long_cylinder_descriptor() -> ModelDescriptor {
    ModelDescriptor::new(
        "long_cylinder",
        "Right circular cylinder with uniform SLD, for long cylinders",
        iq,
    )
    .with_description(
        "The cylinder form factor computed with a 501-point integration\n\
         scheme in place of the default 76 points, for lengths where the\n\
         default scheme becomes numerically unstable (tested out to\n\
         length = 400000 Ang).",
    )
    .with_category("shape:cylinder")
    .with_form_volume(form_volume)
    .with_parameters(vec![
        Parameter::new(
            "sld",
            "1e-6/Ang^2",
            4.0,
            [f64::NEG_INFINITY, f64::INFINITY],
            ParamKind::Sld,
            "Cylinder scattering length density",
        ),
        Parameter::new(
            "sld_solvent",
            "1e-6/Ang^2",
            1.0,
            [f64::NEG_INFINITY, f64::INFINITY],
            ParamKind::Sld,
            "Solvent scattering length density",
        ),
        Parameter::new(
            "radius",
            "Ang",
            20.0,
            [0.0, f64::INFINITY],
            ParamKind::Volume,
            "Cylinder radius",
        ),
        Parameter::new(
            "length",
            "Ang",
            400.0,
            [0.0, f64::INFINITY],
            ParamKind::Volume,
            "Cylinder length",
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kratky_core::eval::Evaluation;
    use kratky_math::quadrature::gauss_76;

    #[test]
    fn test_pinned_values() {
        let model = long_cylinder_descriptor();
        let eval = Evaluation::new(&model);
        assert_relative_eq!(eval.iq(0.01), 301.82388657227466, max_relative = 1e-10);
        assert_relative_eq!(eval.iq(0.1), 11.893537380088718, max_relative = 1e-10);
        assert_relative_eq!(eval.iq(0.3), 0.10459902269946217, max_relative = 1e-10);
    }

    #[test]
    fn test_very_long_cylinder() {
        let model = long_cylinder_descriptor();
        let eval = Evaluation::with_overrides(&model, &[("length", 40000.0)]).unwrap();
        assert_relative_eq!(eval.iq(0.05), 55.04499906860136, max_relative = 1e-10);
    }

    #[test]
    fn test_rules_agree_for_short_cylinders() {
        // for a short cylinder the 76- and 501-point rules coincide
        let params = [4.0, 1.0, 20.0, 400.0];
        let q = 0.05;
        let coarse = iq_with_rule(q, &params, gauss_76());
        let fine = iq_with_rule(q, &params, gauss_501());
        assert_relative_eq!(coarse, fine, max_relative = 1e-8);
    }

    #[test]
    fn test_forward_scattering() {
        let model = long_cylinder_descriptor();
        let eval = Evaluation::new(&model);
        // I(0) = 1e-4 * dRho^2 * V after normalisation
        let want = 1.0e-4 * 9.0 * cylinder_volume(20.0, 400.0);
        assert_relative_eq!(eval.iq(0.0), want, max_relative = 1e-12);
    }
}
