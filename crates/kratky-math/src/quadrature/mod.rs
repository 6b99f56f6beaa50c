//! Numerical integration.
//!
//! Two schemes cover every integral in the model catalogue:
//!
//! - [`GaussLegendre`]: fixed-order rules on `[-1, 1]`. The orientational
//!   averages of the shape kernels all use the 76-point rule; the long
//!   cylinder uses a 501-point rule to resolve its oscillations. Rules of
//!   any order are built at runtime (Newton iteration on the Legendre
//!   polynomial) and cached.
//! - [`adaptive_kronrod`]: globally adaptive Gauss-Kronrod 15(7) panels,
//!   for the integrals with no natural fixed grid (superellipsoid profile,
//!   helix layer lines).

mod gauss;
mod kronrod;

pub use gauss::{gauss_501, gauss_76, GaussLegendre};
pub use kronrod::adaptive_kronrod;
