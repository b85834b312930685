use std::path::Path;

use pf_core::UnitSystem;
use pf_project::{compile, load_yaml};
use pf_solver::{Regime, SweepVariable, solve_with_config, sweep_with_config};

fn problems_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../problems")
}

#[test]
fn bundled_problems_load_and_solve() {
    let names = [
        "01_water_head_loss.yaml",
        "02_imperial_flow.yaml",
        "03_pipe_sizing.yaml",
        "04_oil_pump_power.yaml",
    ];

    for name in names {
        let path = problems_dir().join(name);
        let file = load_yaml(&path).unwrap_or_else(|e| panic!("Failed to load {name}: {e}"));
        let compiled = compile(&file).unwrap_or_else(|e| panic!("Failed to compile {name}: {e}"));
        let result = solve_with_config(&compiled.problem, &compiled.solver)
            .unwrap_or_else(|e| panic!("Failed to solve {name}: {e}"));
        assert!(result.head_loss > 0.0, "{name}");
        assert!(result.flow_rate > 0.0, "{name}");
    }
}

#[test]
fn water_problem_matches_hand_calculation() {
    let file = load_yaml(&problems_dir().join("01_water_head_loss.yaml")).unwrap();
    let compiled = compile(&file).unwrap();
    assert_eq!(compiled.problem.fittings.len(), 3);

    let result = solve_with_config(&compiled.problem, &compiled.solver).unwrap();
    assert_eq!(result.regime, Regime::Turbulent);
    // K_total = 0.5 + 3 × 0.4 + 5.0
    let v = result.velocity;
    let expected = (result.friction_factor * 500.0 + 6.7) * v * v / (2.0 * 9.806_65);
    assert!((result.head_loss - expected).abs() / expected < 1e-9);

    let (variable, range) = compiled.sweep.unwrap();
    assert_eq!(variable, SweepVariable::Velocity);
    let curve = sweep_with_config(&compiled.problem, variable, &range, &compiled.solver).unwrap();
    assert_eq!(curve.len(), 12);
}

#[test]
fn imperial_problem_reports_imperial_units() {
    let file = load_yaml(&problems_dir().join("02_imperial_flow.yaml")).unwrap();
    let compiled = compile(&file).unwrap();
    assert_eq!(compiled.problem.unit_system, UnitSystem::Imperial);
    // 2 in schedule 40 is 52.5 mm
    let d_ft = compiled.problem.diameter.unwrap();
    assert!((d_ft - 0.0525 / 0.3048).abs() < 1e-12);

    let result = solve_with_config(&compiled.problem, &compiled.solver).unwrap();
    assert_eq!(result.unit_system, UnitSystem::Imperial);
    // 10 psi = 1440 lbf/ft²
    assert!((result.pressure_difference - 1440.0).abs() < 1e-3);
}

#[test]
fn sizing_problem_respects_solver_section() {
    let file = load_yaml(&problems_dir().join("03_pipe_sizing.yaml")).unwrap();
    let compiled = compile(&file).unwrap();
    assert_eq!(compiled.solver.diameter_max, 1.0);
    assert_eq!(compiled.solver.diameter_min, 1e-3);

    let result = solve_with_config(&compiled.problem, &compiled.solver).unwrap();
    assert!((result.head_loss - 5.0).abs() / 5.0 < 1e-6);
    assert!(result.diameter > 0.05 && result.diameter < 0.3);
}
