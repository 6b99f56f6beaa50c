//! # Kratky Math
//!
//! Numerical support routines for the Kratky scattering model library.
//!
//! This crate provides:
//!
//! - **Shape functions**: Bessel functions and the sinc-family kernels that
//!   appear in closed-form scattering amplitudes
//! - **Gamma family**: gamma, log-gamma, regularized incomplete gamma and
//!   the Langevin function
//! - **Quadrature**: Gauss-Legendre rules of arbitrary order and adaptive
//!   Gauss-Kronrod integration
//! - **Root finding**: bracketing solvers for implicit geometry parameters
//! - **Orientation**: detector-frame to particle-frame transforms for
//!   oriented (2-D) model evaluation
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: every routine is a pure function; quadrature tables
//!   are built once and cached
//! - **Numerical Stability**: small-argument series where the closed forms
//!   cancel catastrophically

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::uninlined_format_args)]

pub mod bessel;
pub mod error;
pub mod gamma;
pub mod orient;
pub mod quadrature;
pub mod roots;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bessel::{sas_2j1x_x, sas_3j1x_x, sas_j0, sas_j1, sas_jn, sinc};
    pub use crate::error::{MathError, MathResult};
    pub use crate::gamma::{gamma, langevin, langevin_over_x, ln_gamma, lower_gamma_regularized};
    pub use crate::orient::{rotate_asymmetric, rotate_symmetric};
    pub use crate::quadrature::{adaptive_kronrod, gauss_501, gauss_76, GaussLegendre};
    pub use crate::roots::{bracket_root, SolverConfig};
}

pub use error::{MathError, MathResult};

/// Complex number type used by the reflectivity recursion.
pub type Complex = nalgebra::Complex<f64>;
