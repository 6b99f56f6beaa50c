//! Catalogue-wide checks: every registered model satisfies the table
//! invariants and the evaluation contract.

use kratky_core::eval::Evaluation;
use kratky_models::registry;

#[test]
fn test_catalogue_is_complete() {
    let registry = registry();
    let expected = [
        "NR_4_slab",
        "OrientedMagneticChains",
        "bouchoux_casein_micelle",
        "core_shell_cuboid",
        "core_shell_ellipsoid_tied",
        "coredoubleshellspherefilledwithmanycylinders",
        "coreshellspherecylinder",
        "correlated_spheres",
        "cumulants_dls",
        "exponential",
        "five_layer_core_shell_bicelle",
        "fractal_sq",
        "fuzzy_sphere_extended",
        "general_guinier_porod",
        "long_cylinder",
        "magnetic_langevin_core_shell_sphere",
        "mass_fractal_sq",
        "morp_ellipsoid",
        "nanodisc",
        "nanodisc_simple",
        "oblate_spheroid",
        "peak_voigt",
        "pringle_schmidt_helices",
        "ratingcurve",
        "sphere_concentration",
        "star_excl_vol",
        "star_polymer_v2",
        "supercylinder",
        "woodsas",
    ];
    for name in expected {
        assert!(
            registry.get(name).is_some(),
            "model '{name}' missing from the registry"
        );
    }
    assert_eq!(registry.len(), expected.len());
}

#[test]
fn test_tables_hold_invariants() {
    for model in registry().iter() {
        model
            .validate()
            .unwrap_or_else(|e| panic!("table of '{}' invalid: {e}", model.name));
        for param in &model.parameters {
            assert!(
                param.lower <= param.default && param.default <= param.upper,
                "'{}::{}' default outside bounds",
                model.name,
                param.name
            );
        }
    }
}

#[test]
fn test_batch_evaluation_matches_scalar() {
    let qs = [0.012, 0.21];
    for model in registry().iter() {
        let eval = Evaluation::new(model).with_background(1.0e-3);
        let batch = eval.iq_many(&qs);
        assert_eq!(batch.len(), qs.len());
        for (&q, &b) in qs.iter().zip(&batch) {
            let scalar = eval.iq(q);
            assert!(
                (b - scalar).abs() <= 1.0e-12 * scalar.abs().max(1.0),
                "'{}' batch/scalar mismatch at q = {q}: {b} vs {scalar}",
                model.name
            );
            assert!(b.is_finite(), "'{}' not finite at q = {q}", model.name);
        }
    }
}

#[test]
fn test_oriented_models_evaluate() {
    let mut oriented = 0;
    for model in registry().iter() {
        let eval = Evaluation::new(model);
        if model.supports_2d() {
            let value = eval.iqxy(0.07, 0.03).unwrap();
            assert!(value.is_finite(), "'{}' 2-D not finite", model.name);
            oriented += 1;
        } else {
            assert!(eval.iqxy(0.07, 0.03).is_err());
        }
    }
    assert!(oriented >= 10, "expected the oriented kernels, saw {oriented}");
}

#[test]
fn test_form_factor_models_non_negative() {
    // pure squared-amplitude models; structure factors and empirical
    // curves are checked in their own modules
    let names = [
        "oblate_spheroid",
        "nanodisc",
        "five_layer_core_shell_bicelle",
        "core_shell_ellipsoid_tied",
        "coreshellspherecylinder",
        "coredoubleshellspherefilledwithmanycylinders",
        "long_cylinder",
        "supercylinder",
        "NR_4_slab",
    ];
    let registry = registry();
    for name in names {
        let model = registry.require(name).unwrap();
        let eval = Evaluation::new(model);
        let mut q = 2.0e-3;
        while q < 0.6 {
            let value = eval.iq(q);
            assert!(
                value >= 0.0 && value.is_finite(),
                "'{name}' negative or non-finite at q = {q}: {value}"
            );
            q *= 2.1;
        }
    }
}

#[test]
fn test_catalogue_serialises_for_model_browser() {
    let registry = registry();
    let catalogue: Vec<serde_json::Value> = registry
        .iter()
        .map(|m| {
            serde_json::json!({
                "name": m.name,
                "title": m.title,
                "category": m.category,
                "parameters": serde_json::to_value(&m.parameters).unwrap(),
            })
        })
        .collect();
    assert_eq!(catalogue.len(), registry.len());
    let sphere = catalogue
        .iter()
        .find(|v| v["name"] == "oblate_spheroid")
        .unwrap();
    assert_eq!(sphere["parameters"][2]["name"], "radius");
    assert_eq!(sphere["parameters"][2]["kind"], "volume");
    assert_eq!(sphere["category"], "shape:sphere");
}

#[test]
fn test_categories_cover_families() {
    let categories = registry().categories();
    for expected in ["shape:sphere", "shape:cylinder", "shape:ellipsoid", "shape-independent"] {
        assert!(
            categories.contains(&expected),
            "category '{expected}' missing; have {categories:?}"
        );
    }
}
