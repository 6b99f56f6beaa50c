//! # Kratky Models
//!
//! The model catalogue: one module per scattering model, each exposing its
//! pure kernels and a [`ModelDescriptor`](kratky_core::model::ModelDescriptor),
//! plus the process-wide registry that collects them all.
//!
//! Models fall into a few families:
//!
//! - **Shape-independent**: [`exponential`], [`rating_curve`],
//!   [`cumulants_dls`], [`peak_voigt`], [`guinier_porod`]
//! - **Polymers**: [`star_polymer`], [`star_excluded_volume`]
//! - **Spheres**: [`sphere`], [`sphere_number_density`], [`fuzzy_sphere`],
//!   [`correlated_spheres`], [`casein_micelle`], [`langevin_sphere`],
//!   [`magnetic_chains`]
//! - **Cylinders and discs**: [`cylinder`], [`supercylinder`], [`bicelle`],
//!   [`five_layer_bicelle`], [`wood_cylinders`], [`pringle_schmidt`]
//! - **Composite spheres**: [`sphere_with_cylinder`],
//!   [`sphere_with_many_cylinders`]
//! - **Ellipsoids**: [`ellipsoid_tied`], [`morp_ellipsoid`]
//! - **Structure factors**: [`fractal_sq`], [`mass_fractal_sq`]
//! - **Reflectivity**: [`reflectivity`]
//!
//! ## Example
//!
//! ```rust
//! use kratky_core::prelude::*;
//!
//! let registry = kratky_models::registry();
//! let sphere = registry.require("oblate_spheroid").unwrap();
//! let eval = Evaluation::new(sphere).with_background(1.0e-3);
//! let intensity = eval.iq(0.2);
//! assert!(intensity > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::uninlined_format_args)]

use std::sync::OnceLock;

use kratky_core::registry::ModelRegistry;

pub mod bicelle;
pub mod casein_micelle;
pub mod correlated_spheres;
pub mod core_shell_cuboid;
pub mod cumulants_dls;
pub mod cylinder;
pub mod ellipsoid_tied;
pub mod exponential;
pub mod five_layer_bicelle;
pub mod fractal_sq;
pub mod fuzzy_sphere;
pub mod guinier_porod;
pub mod langevin_sphere;
pub mod magnetic_chains;
pub mod mass_fractal_sq;
pub mod morp_ellipsoid;
pub mod peak_voigt;
pub mod pringle_schmidt;
pub mod rating_curve;
pub mod reflectivity;
pub mod sphere;
pub mod sphere_number_density;
pub mod sphere_with_cylinder;
pub mod sphere_with_many_cylinders;
pub mod star_excluded_volume;
pub mod star_polymer;
pub mod supercylinder;
pub mod wood_cylinders;

/// Builds a registry holding the complete model catalogue.
#[must_use]
pub fn build_registry() -> ModelRegistry {
    let descriptors = vec![
        bicelle::nanodisc_descriptor(),
        bicelle::nanodisc_simple_descriptor(),
        casein_micelle::descriptor(),
        correlated_spheres::descriptor(),
        core_shell_cuboid::descriptor(),
        cumulants_dls::descriptor(),
        cylinder::long_cylinder_descriptor(),
        ellipsoid_tied::descriptor(),
        exponential::descriptor(),
        five_layer_bicelle::descriptor(),
        fractal_sq::descriptor(),
        fuzzy_sphere::descriptor(),
        guinier_porod::descriptor(),
        langevin_sphere::descriptor(),
        magnetic_chains::descriptor(),
        mass_fractal_sq::descriptor(),
        morp_ellipsoid::descriptor(),
        peak_voigt::descriptor(),
        pringle_schmidt::descriptor(),
        rating_curve::descriptor(),
        reflectivity::descriptor(),
        sphere::descriptor(),
        sphere_number_density::descriptor(),
        sphere_with_cylinder::descriptor(),
        sphere_with_many_cylinders::descriptor(),
        star_excluded_volume::descriptor(),
        star_polymer::descriptor(),
        supercylinder::descriptor(),
        wood_cylinders::descriptor(),
    ];
    let mut registry = ModelRegistry::new();
    for descriptor in descriptors {
        if let Err(err) = registry.register(descriptor) {
            // a table failing its own invariants is a programming error
            panic!("model registration failed: {err}");
        }
    }
    log::debug!("model registry built with {} models", registry.len());
    registry
}

/// The process-wide model registry, built on first access.
pub fn registry() -> &'static ModelRegistry {
    static REGISTRY: OnceLock<ModelRegistry> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}
