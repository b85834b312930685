//! Integration tests combining pipe geometry, fittings and friction.

use pf_components::{
    Fitting, FittingKind, FrictionConfig, FrictionModel, Pipe, PipeMaterial, aggregate,
    aggregate_equivalent_length, colebrook_residual, friction_factor,
};
use proptest::prelude::*;

#[test]
fn water_in_100mm_pipe() {
    // Water at 20 °C, Q = 0.01 m³/s through D = 0.1 m, L = 50 m, ε = 0.1 mm
    let pipe = Pipe::new(50.0, 0.1, 1e-4);
    let v = pipe.velocity_from_flow(0.01);
    let re = pipe.reynolds(998.2, 1.002e-3, v);
    assert!((re - 126_843.0).abs() / 126_843.0 < 1e-3, "Re = {re}");

    let f = friction_factor(re, pipe.relative_roughness(), &FrictionConfig::default()).unwrap();
    assert_eq!(f.model, FrictionModel::Colebrook);
    assert!((f.f - 0.0217).abs() < 1e-3, "f = {}", f.f);
    assert!(colebrook_residual(f.f, re, pipe.relative_roughness()).abs() < 1e-8);

    let h = pipe.head_loss(f.f, v);
    let expected = f.f * 500.0 * v * v / (2.0 * 9.806_65);
    assert!((h - expected).abs() < 1e-12);
}

#[test]
fn catalog_fittings_feed_pipe_resistance() {
    let fittings = vec![
        Fitting::from_kind(FittingKind::SquareEntrance, 1),
        Fitting::from_kind(FittingKind::LongElbow90, 3),
        Fitting::equivalent_length("strainer", 50.0, 1),
    ];
    let pipe = Pipe::new(20.0, 0.05, PipeMaterial::CommercialSteel.roughness()).with_fittings(
        aggregate(&fittings),
        aggregate_equivalent_length(&fittings),
    );
    assert!((pipe.k_minor - 1.7).abs() < 1e-12);
    assert!((pipe.resistance(0.02) - (0.02 * (400.0 + 50.0) + 1.7)).abs() < 1e-12);
}

proptest! {
    #[test]
    fn more_k_never_lowers_head_loss(
        k in 0.0_f64..20.0,
        extra in 0.0_f64..10.0,
        velocity in 0.01_f64..10.0,
    ) {
        let base = vec![Fitting::k("base", k, 1)];
        let more = vec![Fitting::k("base", k, 1), Fitting::k("extra", extra, 1)];
        let pipe = Pipe::new(30.0, 0.08, 5e-5);
        let h_base = pipe.with_fittings(aggregate(&base), 0.0).head_loss(0.02, velocity);
        let h_more = pipe.with_fittings(aggregate(&more), 0.0).head_loss(0.02, velocity);
        prop_assert!(h_more >= h_base);
    }

    #[test]
    fn aggregation_ignores_order(ks in proptest::collection::vec((-1.0_f64..10.0, 1_u32..5), 0..8)) {
        let fittings: Vec<_> = ks.iter().map(|&(k, n)| Fitting::k("f", k, n)).collect();
        let mut reversed = fittings.clone();
        reversed.reverse();
        prop_assert!((aggregate(&fittings) - aggregate(&reversed)).abs() < 1e-9);
    }
}
