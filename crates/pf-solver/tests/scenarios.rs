//! End-to-end solves through the public entry points.

use pf_components::{Fitting, FittingKind, FrictionModel, colebrook_residual};
use pf_core::{QuantityKind, UnitSystem, denormalize, normalize};
use pf_fluids::FluidSpec;
use pf_solver::{
    FlowProblem, Regime, SolverConfig, SolverError, SweepRange, SweepVariable, Unknown, Warning,
    solve, solve_with_config, sweep,
};

const RHO: f64 = 998.2;
const MU: f64 = 1.002e-3;
const G: f64 = 9.806_65;

/// Water at 20 °C in 50 m of pipe with ε = 0.1 mm.
fn water_pipe(target: Unknown) -> FlowProblem {
    FlowProblem::new(target, 50.0, 1e-4, RHO, MU)
}

#[test]
fn named_fluid_matches_tabulated_water() {
    let problem = FlowProblem::new(Unknown::HeadLoss, 50.0, 1e-4, 0.0, 0.0)
        .with_fluid(&FluidSpec::named("water", 293.15))
        .unwrap()
        .with_diameter(0.1)
        .with_flow_rate(0.01);
    let result = solve(&problem).unwrap();
    let reference = solve(
        &water_pipe(Unknown::HeadLoss)
            .with_diameter(0.1)
            .with_flow_rate(0.01),
    )
    .unwrap();
    assert!((result.reynolds - reference.reynolds).abs() / reference.reynolds < 1e-6);
}

#[test]
fn water_head_loss_scenario() {
    let problem = water_pipe(Unknown::HeadLoss)
        .with_diameter(0.1)
        .with_flow_rate(0.01);
    let result = solve(&problem).unwrap();

    assert!((result.reynolds - 126_843.0).abs() / 126_843.0 < 1e-3);
    assert_eq!(result.regime, Regime::Turbulent);
    assert_eq!(result.friction_model, FrictionModel::Colebrook);
    assert!((result.friction_factor - 0.0217).abs() < 1e-3);
    assert!(colebrook_residual(result.friction_factor, result.reynolds, 1e-3).abs() < 1e-8);

    let v = result.velocity;
    let expected_h = result.friction_factor * 500.0 * v * v / (2.0 * G);
    assert!((result.head_loss - expected_h).abs() < 1e-12);
    assert!((result.pressure_drop - RHO * G * result.head_loss).abs() < 1e-9);
    assert!((result.power - 0.01 * result.pressure_drop).abs() < 1e-9);
    assert!(result.warnings.is_empty());
}

#[test]
fn laminar_friction_is_closed_form() {
    // Re = 1500 by construction
    let v = 1500.0 * MU / (RHO * 0.1);
    let result = solve(
        &water_pipe(Unknown::HeadLoss)
            .with_diameter(0.1)
            .with_velocity(v),
    )
    .unwrap();
    assert!((result.reynolds - 1500.0).abs() < 1e-9);
    assert_eq!(result.regime, Regime::Laminar);
    assert!((result.friction_factor - 64.0 / result.reynolds).abs() < 1e-15);
}

#[test]
fn head_loss_then_flow_round_trip() {
    let head = solve(
        &water_pipe(Unknown::HeadLoss)
            .with_diameter(0.1)
            .with_flow_rate(0.01),
    )
    .unwrap();

    let flow = solve(
        &water_pipe(Unknown::Flow)
            .with_diameter(0.1)
            .with_head_loss(head.head_loss),
    )
    .unwrap();
    assert!((flow.flow_rate - 0.01).abs() / 0.01 < 1e-5);
    assert!(flow.iterations > 0);
}

#[test]
fn diameter_reproduces_target_head() {
    let sized = solve(
        &water_pipe(Unknown::Diameter)
            .with_flow_rate(0.01)
            .with_head_loss(5.0),
    )
    .unwrap();
    assert!(sized.diameter > 0.0);

    let check = solve(
        &water_pipe(Unknown::HeadLoss)
            .with_diameter(sized.diameter)
            .with_flow_rate(0.01),
    )
    .unwrap();
    assert!((check.head_loss - 5.0).abs() / 5.0 < 1e-5, "H = {}", check.head_loss);
}

#[test]
fn rough_tube_transitional_round_trip() {
    // 10 mm tube with ε/D = 0.05, where the plain fixed point oscillates
    let tube = |target| FlowProblem::new(target, 5.0, 5e-4, RHO, MU).with_diameter(0.01);
    for re in [2350.0, 2600.0, 3000.0] {
        let v = re * MU / (RHO * 0.01);
        let head = solve(&tube(Unknown::HeadLoss).with_velocity(v)).unwrap();
        assert_eq!(head.regime, Regime::Transitional);

        let flow = solve(&tube(Unknown::Flow).with_head_loss(head.head_loss)).unwrap();
        assert!((flow.velocity - v).abs() / v < 1e-5, "Re {re}: V = {}", flow.velocity);
    }
}

#[test]
fn diameter_with_velocity_input_holds_velocity() {
    let sized = solve(
        &water_pipe(Unknown::Diameter)
            .with_velocity(1.5)
            .with_head_loss(2.0),
    )
    .unwrap();
    assert!((sized.velocity - 1.5).abs() < 1e-12);

    let check = solve(
        &water_pipe(Unknown::HeadLoss)
            .with_diameter(sized.diameter)
            .with_velocity(1.5),
    )
    .unwrap();
    assert!((check.head_loss - 2.0).abs() / 2.0 < 1e-5, "H = {}", check.head_loss);
}

#[test]
fn laminar_diameter_matches_hagen_poiseuille() {
    let (rho, mu, q, length, head) = (900.0, 0.5, 1e-4, 10.0, 1.0);
    let sized = solve(
        &FlowProblem::new(Unknown::Diameter, length, 0.0, rho, mu)
            .with_flow_rate(q)
            .with_head_loss(head),
    )
    .unwrap();
    assert_eq!(sized.regime, Regime::Laminar);
    // H = 128 μ L Q / (π ρ g D⁴)
    let expected = (128.0 * mu * length * q / (std::f64::consts::PI * rho * G * head)).powf(0.25);
    assert!((sized.diameter - expected).abs() / expected < 1e-5, "D = {}", sized.diameter);
}

#[test]
fn power_delegates_to_missing_branch() {
    let base = water_pipe(Unknown::Power).with_diameter(0.1);

    let from_flow = solve(&base.clone().with_flow_rate(0.01)).unwrap();
    let head_loss = solve(
        &water_pipe(Unknown::HeadLoss)
            .with_diameter(0.1)
            .with_flow_rate(0.01),
    )
    .unwrap();
    assert!((from_flow.power - head_loss.power).abs() < 1e-9);

    let from_head = solve(&base.clone().with_head_loss(head_loss.head_loss)).unwrap();
    assert!((from_head.flow_rate - 0.01).abs() / 0.01 < 1e-5);

    let both = solve(
        &base
            .with_flow_rate(0.01)
            .with_head_loss(2.0)
            .with_efficiency(0.5),
    )
    .unwrap();
    assert!((both.power - RHO * G * 0.01 * 2.0 / 0.5).abs() < 1e-9);
    assert!(
        both.warnings
            .iter()
            .any(|w| matches!(w, Warning::HeadLossMismatch { given, .. } if *given == 2.0))
    );

    let consistent = solve(
        &water_pipe(Unknown::Power)
            .with_diameter(0.1)
            .with_flow_rate(0.01)
            .with_head_loss(head_loss.head_loss),
    )
    .unwrap();
    assert!(consistent.warnings.is_empty());
}

#[test]
fn static_pressure_difference_accounts_for_elevation_and_pump() {
    let dp = 60_000.0;
    let result = solve(
        &water_pipe(Unknown::Flow)
            .with_diameter(0.1)
            .with_static_pressure_difference(dp)
            .with_elevation_change(2.0)
            .with_pump_head(1.0),
    )
    .unwrap();
    assert!((result.pressure_difference - dp).abs() < 1e-6);
    let expected_h = dp / (RHO * G) - 2.0 + 1.0;
    assert!((result.head_loss - expected_h).abs() < 1e-9);
}

#[test]
fn imperial_matches_si() {
    let si = solve(
        &water_pipe(Unknown::HeadLoss)
            .with_diameter(0.1)
            .with_flow_rate(0.01),
    )
    .unwrap();

    let imp = UnitSystem::Imperial;
    let to_imp = |v, kind| denormalize(v, kind, imp).unwrap();
    let problem = FlowProblem::new(
        Unknown::HeadLoss,
        to_imp(50.0, QuantityKind::Length),
        to_imp(1e-4, QuantityKind::Length),
        to_imp(RHO, QuantityKind::Density),
        to_imp(MU, QuantityKind::DynamicViscosity),
    )
    .in_units(imp)
    .with_diameter(to_imp(0.1, QuantityKind::Length))
    .with_flow_rate(to_imp(0.01, QuantityKind::FlowRate));
    let result = solve(&problem).unwrap();

    assert_eq!(result.unit_system, UnitSystem::Imperial);
    assert!((result.reynolds - si.reynolds).abs() / si.reynolds < 1e-9);
    let h_si = normalize(result.head_loss, QuantityKind::Length, imp).unwrap();
    assert!((h_si - si.head_loss).abs() / si.head_loss < 1e-9);
    let p_si = normalize(result.power, QuantityKind::Power, imp).unwrap();
    assert!((p_si - si.power).abs() / si.power < 1e-9);
}

#[test]
fn transitional_and_low_velocity_warnings() {
    let v = 3000.0 * MU / (RHO * 0.1);
    let result = solve(
        &water_pipe(Unknown::HeadLoss)
            .with_diameter(0.1)
            .with_velocity(v),
    )
    .unwrap();
    assert_eq!(result.regime, Regime::Transitional);
    assert_eq!(result.friction_model, FrictionModel::Transitional);
    assert!(
        result
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::TransitionalFlow { .. }))
    );

    let slow = solve(
        &water_pipe(Unknown::HeadLoss)
            .with_diameter(0.1)
            .with_velocity(0.005),
    )
    .unwrap();
    assert!(
        slow.warnings
            .iter()
            .any(|w| matches!(w, Warning::LowVelocity { .. }))
    );
}

#[test]
fn negative_fitting_is_warned_not_rejected() {
    let result = solve(
        &water_pipe(Unknown::HeadLoss)
            .with_diameter(0.1)
            .with_flow_rate(0.01)
            .with_fitting(Fitting::from_kind(FittingKind::ShortElbow90, 2))
            .with_fitting(Fitting::k("correction", -0.1, 1)),
    )
    .unwrap();
    assert_eq!(
        result.warnings,
        vec![Warning::NegativeFittingCoefficient {
            fitting: "correction".into(),
            k: -0.1
        }]
    );
}

#[test]
fn unknown_count_errors() {
    let all_given = water_pipe(Unknown::HeadLoss)
        .with_diameter(0.1)
        .with_flow_rate(0.01)
        .with_head_loss(1.0);
    assert!(matches!(solve(&all_given), Err(SolverError::InvalidInput { .. })));

    let two_missing = water_pipe(Unknown::Diameter).with_flow_rate(0.01);
    assert!(matches!(solve(&two_missing), Err(SolverError::InvalidInput { .. })));
}

#[test]
fn fluid_outside_table_is_out_of_range() {
    let err = FlowProblem::new(Unknown::HeadLoss, 50.0, 1e-4, 0.0, 0.0)
        .with_fluid(&FluidSpec::named("water", 400.0))
        .unwrap_err();
    assert!(matches!(err, SolverError::OutOfRange { .. }));
}

#[test]
fn iteration_cap_surfaces_convergence_error() {
    let config = SolverConfig {
        flow_max_iterations: 2,
        flow_rel_tol: 1e-15,
        ..SolverConfig::default()
    };
    let problem = water_pipe(Unknown::Flow)
        .with_diameter(0.1)
        .with_head_loss(1.0);
    match solve_with_config(&problem, &config) {
        Err(SolverError::Convergence {
            iterations,
            last_iterate,
            ..
        }) => {
            assert_eq!(iterations, 2);
            assert!(last_iterate > 0.0);
        }
        other => panic!("expected convergence error, got {other:?}"),
    }
}

#[test]
fn velocity_sweep_is_ordered_and_increasing() {
    let base = water_pipe(Unknown::HeadLoss).with_diameter(0.1);
    let points = sweep(&base, SweepVariable::Velocity, &SweepRange::linear(0.5, 3.0, 11)).unwrap();
    assert_eq!(points.len(), 11);
    assert_eq!(points[0].0, 0.5);
    assert_eq!(points[10].0, 3.0);
    assert!(points.windows(2).all(|w| w[1].1.head_loss > w[0].1.head_loss));
}

#[test]
fn sweep_fails_on_invalid_point() {
    // Sweeping velocity into a flow problem leaves no unknown.
    let base = water_pipe(Unknown::Flow)
        .with_diameter(0.1)
        .with_head_loss(1.0);
    let err = sweep(&base, SweepVariable::Velocity, &SweepRange::linear(0.5, 3.0, 4)).unwrap_err();
    assert!(matches!(err, SolverError::InvalidInput { .. }));
}
