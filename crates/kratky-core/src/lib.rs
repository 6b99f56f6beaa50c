//! # Kratky Core
//!
//! Model descriptors, parameter tables, the in-process model registry, and
//! the host-facing evaluation contract for the Kratky scattering model
//! library.
//!
//! This crate provides the foundational building blocks:
//!
//! - **Parameters**: the ordered parameter table every model declares,
//!   with units, defaults, bounds, and a kind tag for the host's
//!   polydispersity/averaging machinery
//! - **Descriptors**: an explicit record per model (identifier, metadata,
//!   kernel entry points) instead of module-global convention
//! - **Registry**: a name-keyed map of descriptors for host lookup
//! - **Evaluation**: parameter binding by name, bounds validation, and the
//!   composed intensity the host reports (`scale * Iq / V + background`)
//!
//! ## Design Philosophy
//!
//! - **Pure kernels**: evaluation never mutates shared state; every call
//!   with the same inputs returns the same output
//! - **Host-neutral**: scale, background, and volume normalisation are
//!   applied here exactly the way the fitting host composes them, so
//!   regression fixtures recorded against the host reproduce verbatim
//!
//! ## Example
//!
//! ```rust
//! use kratky_core::prelude::*;
//!
//! fn flat(_q: f64, params: &[f64]) -> f64 {
//!     params[0]
//! }
//!
//! let model = ModelDescriptor::new("flat", "Flat line", flat)
//!     .with_category("shape-independent")
//!     .with_parameters(vec![Parameter::new(
//!         "level", "", 2.0, [0.0, f64::INFINITY], ParamKind::Scalar, "Flat level",
//!     )]);
//!
//! let eval = Evaluation::new(&model).with_background(0.5);
//! assert_eq!(eval.iq(0.1), 2.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod eval;
pub mod model;
pub mod params;
pub mod registry;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ModelError, ModelResult};
    pub use crate::eval::Evaluation;
    pub use crate::model::ModelDescriptor;
    pub use crate::params::{ParamKind, Parameter};
    pub use crate::registry::ModelRegistry;
}

pub use error::{ModelError, ModelResult};
