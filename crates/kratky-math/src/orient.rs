//! Detector-frame to particle-frame transforms for oriented evaluation.
//!
//! A 2-D detector point `(qx, qy)` is expressed in the frame of a particle
//! whose orientation is given by the polar angle `theta` (degrees, from the
//! beam axis), azimuth `phi`, and - for shapes without rotational symmetry -
//! the roll `psi` about the particle axis. The particle axis in the lab
//! frame is `(sin th cos ph, sin th sin ph, cos th)`; the incident beam is
//! along z, so the detector plane carries only `(qx, qy)`.
//!
//! The convention is the jitter-free rotation of the original host, pinned
//! down by the 2-D regression fixtures of the oriented models.

/// Resolves a detector point for a rotationally symmetric shape.
///
/// Returns `(q_ab, q_c)`: the components of `q` perpendicular and parallel
/// to the particle axis.
#[must_use]
pub fn rotate_symmetric(qx: f64, qy: f64, theta_deg: f64, phi_deg: f64) -> (f64, f64) {
    let sin_theta = theta_deg.to_radians().sin();
    let (sin_phi, cos_phi) = phi_deg.to_radians().sin_cos();
    let qc = sin_theta * cos_phi * qx + sin_theta * sin_phi * qy;
    let q_sq = qx * qx + qy * qy;
    let qab = (q_sq - qc * qc).max(0.0).sqrt();
    (qab, qc)
}

/// Resolves a detector point for a shape with three distinct axes.
///
/// Returns `(q_a, q_b, q_c)` in the particle frame; `q_c` is along the
/// particle axis, `q_a`/`q_b` along the remaining two axes after the roll
/// `psi`.
#[must_use]
pub fn rotate_asymmetric(
    qx: f64,
    qy: f64,
    theta_deg: f64,
    phi_deg: f64,
    psi_deg: f64,
) -> (f64, f64, f64) {
    let (sin_theta, cos_theta) = theta_deg.to_radians().sin_cos();
    let (sin_phi, cos_phi) = phi_deg.to_radians().sin_cos();
    let (sin_psi, cos_psi) = psi_deg.to_radians().sin_cos();
    let qa = (cos_phi * cos_theta * cos_psi - sin_phi * sin_psi) * qx
        + (sin_phi * cos_theta * cos_psi + cos_phi * sin_psi) * qy;
    let qb = (-cos_phi * cos_theta * sin_psi - sin_phi * cos_psi) * qx
        + (-sin_phi * cos_theta * sin_psi + cos_phi * cos_psi) * qy;
    let qc = sin_theta * cos_phi * qx + sin_theta * sin_phi * qy;
    (qa, qb, qc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_along_beam() {
        // theta = 0: particle axis along the beam, so qc vanishes
        let (qab, qc) = rotate_symmetric(0.1, 0.2, 0.0, 45.0);
        assert_relative_eq!(qc, 0.0, epsilon = 1e-15);
        assert_relative_eq!(qab, (0.05_f64).sqrt(), max_relative = 1e-14);
    }

    #[test]
    fn test_axis_in_plane() {
        // theta = 90, phi = 0: particle axis along x
        let (qab, qc) = rotate_symmetric(0.3, 0.4, 90.0, 0.0);
        assert_relative_eq!(qc, 0.3, max_relative = 1e-14);
        assert_relative_eq!(qab, 0.4, max_relative = 1e-14);
    }

    #[test]
    fn test_symmetric_reference_point() {
        // the point exercised by the oriented-disc 2-D fixture
        let q = 0.1;
        let (qx, qy) = (
            q * (std::f64::consts::PI / 6.0).cos(),
            q * (std::f64::consts::PI / 6.0).sin(),
        );
        let (qab, qc) = rotate_symmetric(qx, qy, 80.0, 10.0);
        assert_relative_eq!(qab, 3.7895139058399009e-2, max_relative = 1e-12);
        assert_relative_eq!(qc, 9.2541657839832342e-2, max_relative = 1e-12);
    }

    #[test]
    fn test_asymmetric_preserves_magnitude() {
        let (qx, qy) = (0.2 * (2.5_f64).cos(), 0.2 * (2.5_f64).sin());
        let (qa, qb, qc) = rotate_asymmetric(qx, qy, 10.0, 10.0, 0.0);
        assert_relative_eq!(qa * qa + qb * qb + qc * qc, 0.04, max_relative = 1e-13);
        assert_relative_eq!(qa, -1.3492828307632745e-1, max_relative = 1e-12);
        assert_relative_eq!(qb, 1.4569942727292734e-1, max_relative = 1e-12);
        assert_relative_eq!(qc, -2.3791496767025886e-2, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_psi_matches_symmetric_qc() {
        let (qx, qy) = (0.11, -0.07);
        let (_, qc_sym) = rotate_symmetric(qx, qy, 35.0, 120.0);
        let (_, _, qc_asym) = rotate_asymmetric(qx, qy, 35.0, 120.0, 0.0);
        assert_relative_eq!(qc_sym, qc_asym, max_relative = 1e-14);
    }
}
