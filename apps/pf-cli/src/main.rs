mod error;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pf_components::{FittingKind, NOMINAL_PIPES, PipeMaterial};
use pf_core::{QuantityKind, UnitSystem, unit_label};
use pf_project::{CompiledProblem, compile, load_yaml, sweep_quantity};
use pf_solver::{
    FlowResult, Spacing, SweepRange, SweepVariable, solve_with_config, sweep_with_config,
};
use tracing::info;

use crate::error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "Pipeflow CLI - single pipe flow, head loss and sizing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a problem file without solving it
    Validate {
        /// Path to the problem YAML file
        problem_path: PathBuf,
    },
    /// Solve a problem file
    Solve {
        /// Path to the problem YAML file
        problem_path: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sweep one input of a problem file and print the curve as CSV
    Sweep {
        /// Path to the problem YAML file
        problem_path: PathBuf,
        /// Input to vary (velocity, flow_rate, diameter, length, roughness, head_loss)
        #[arg(long)]
        vary: Option<String>,
        /// First value, in the file's unit system
        #[arg(long)]
        from: Option<f64>,
        /// Last value, in the file's unit system
        #[arg(long)]
        to: Option<f64>,
        /// Number of points (file value, else 11)
        #[arg(long)]
        points: Option<usize>,
        /// Space the points logarithmically
        #[arg(long)]
        log: bool,
        /// Print the curve as JSON instead of CSV
        #[arg(long)]
        json: bool,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List tabulated fluids
    Fluids,
    /// List catalog fittings and their K values
    Fittings,
    /// List pipe materials and their roughness
    Materials,
    /// List schedule 40 nominal pipe sizes
    Pipes,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { problem_path } => cmd_validate(&problem_path),
        Commands::Solve { problem_path, json } => cmd_solve(&problem_path, json),
        Commands::Sweep {
            problem_path,
            vary,
            from,
            to,
            points,
            log,
            json,
            output,
        } => cmd_sweep(
            &problem_path,
            SweepArgs {
                vary,
                from,
                to,
                points,
                log,
            },
            json,
            output.as_deref(),
        ),
        Commands::Fluids => {
            cmd_fluids();
            Ok(())
        }
        Commands::Fittings => {
            cmd_fittings();
            Ok(())
        }
        Commands::Materials => {
            cmd_materials();
            Ok(())
        }
        Commands::Pipes => {
            cmd_pipes();
            Ok(())
        }
    }
}

fn load(problem_path: &Path) -> CliResult<CompiledProblem> {
    info!(path = %problem_path.display(), "loading problem");
    let file = load_yaml(problem_path)?;
    Ok(compile(&file)?)
}

fn cmd_validate(problem_path: &Path) -> CliResult<()> {
    println!("Validating problem: {}", problem_path.display());
    let compiled = load(problem_path)?;
    println!("✓ Problem is valid (unknown: {:?})", compiled.problem.target);
    Ok(())
}

fn cmd_solve(problem_path: &Path, json: bool) -> CliResult<()> {
    let compiled = load(problem_path)?;
    let result = solve_with_config(&compiled.problem, &compiled.solver)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(())
}

fn print_result(result: &FlowResult) {
    let sys = result.unit_system;
    let line = |name: &str, value: f64, kind: QuantityKind| {
        println!("  {name:<20} {value:>14.6} {}", unit_label(kind, sys));
    };

    println!("Solved for {:?} ({})", result.target, system_name(sys));
    line("Flow rate", result.flow_rate, QuantityKind::FlowRate);
    line("Velocity", result.velocity, QuantityKind::Velocity);
    line("Diameter", result.diameter, QuantityKind::Length);
    line("Head loss", result.head_loss, QuantityKind::Length);
    line("Pressure drop", result.pressure_drop, QuantityKind::Pressure);
    line("P1 - P2", result.pressure_difference, QuantityKind::Pressure);
    line("Power", result.power, QuantityKind::Power);
    println!("  {:<20} {:>14.1}", "Reynolds number", result.reynolds);
    println!("  {:<20} {:>14.6}", "Friction factor", result.friction_factor);
    println!("  {:<20} {:>14.3e}", "Relative roughness", result.relative_roughness);
    println!(
        "  {:<20} {:>14}",
        "Regime",
        format!("{} ({:?})", result.regime, result.friction_model)
    );
    if result.iterations > 0 {
        println!("  {:<20} {:>14}", "Iterations", result.iterations);
    }
    for warning in &result.warnings {
        println!("⚠ {warning}");
    }
}

fn system_name(sys: UnitSystem) -> &'static str {
    match sys {
        UnitSystem::Si => "SI",
        UnitSystem::Imperial => "Imperial",
    }
}

struct SweepArgs {
    vary: Option<String>,
    from: Option<f64>,
    to: Option<f64>,
    points: Option<usize>,
    log: bool,
}

const DEFAULT_SWEEP_POINTS: usize = 11;

fn cmd_sweep(
    problem_path: &Path,
    args: SweepArgs,
    json: bool,
    output: Option<&Path>,
) -> CliResult<()> {
    let compiled = load(problem_path)?;
    let (variable, range) = sweep_from_args(&compiled, args)?;
    info!(%variable, %range, "running sweep");

    let points = sweep_with_config(&compiled.problem, variable, &range, &compiled.solver)?;
    let text = if json {
        serde_json::to_string_pretty(&points)?
    } else {
        sweep_csv(variable, compiled.problem.unit_system, &points)
    };

    if let Some(path) = output {
        std::fs::write(path, text)?;
        println!("✓ Wrote {} points to {}", points.len(), path.display());
    } else {
        println!("{}", text.trim_end());
    }
    Ok(())
}

fn sweep_csv(variable: SweepVariable, sys: UnitSystem, points: &[(f64, FlowResult)]) -> String {
    let mut csv = format!(
        "{variable} [{}],flow_rate [{}],velocity [{}],head_loss [{}],pressure_drop [{}],reynolds,friction_factor\n",
        unit_label(sweep_quantity(variable), sys),
        unit_label(QuantityKind::FlowRate, sys),
        unit_label(QuantityKind::Velocity, sys),
        unit_label(QuantityKind::Length, sys),
        unit_label(QuantityKind::Pressure, sys),
    );
    for (x, r) in points {
        // Writing to a String cannot fail.
        let _ = writeln!(
            csv,
            "{x},{},{},{},{},{},{}",
            r.flow_rate, r.velocity, r.head_loss, r.pressure_drop, r.reynolds, r.friction_factor
        );
    }
    csv
}

/// Command line flags override the file's sweep section field by field.
fn sweep_from_args(
    compiled: &CompiledProblem,
    args: SweepArgs,
) -> CliResult<(SweepVariable, SweepRange)> {
    let from_file = compiled.sweep;

    let variable = match args.vary {
        Some(name) => name.parse::<SweepVariable>()?,
        None => from_file.map(|(v, _)| v).ok_or_else(|| {
            CliError::InvalidInput("no sweep section in file; pass --vary".into())
        })?,
    };
    let file_range = from_file
        .filter(|(v, _)| *v == variable)
        .map(|(_, range)| range);

    let start = args
        .from
        .or(file_range.map(|r| r.start))
        .ok_or_else(|| CliError::InvalidInput("missing --from".into()))?;
    let end = args
        .to
        .or(file_range.map(|r| r.end))
        .ok_or_else(|| CliError::InvalidInput("missing --to".into()))?;

    let points = args
        .points
        .or(file_range.map(|r| r.points))
        .unwrap_or(DEFAULT_SWEEP_POINTS);
    let spacing = if args.log {
        Spacing::Logarithmic
    } else {
        file_range.map(|r| r.spacing).unwrap_or_default()
    };

    Ok((
        variable,
        SweepRange {
            start,
            end,
            points,
            spacing,
        },
    ))
}

fn cmd_fluids() {
    println!("Tabulated fluids:");
    for entry in pf_fluids::catalog() {
        println!(
            "  {:<8} {:<8} {:.2} K to {:.2} K  (aliases: {})",
            entry.canonical_id,
            entry.display_name,
            entry.table.min_k(),
            entry.table.max_k(),
            entry.aliases.join(", ")
        );
    }
}

fn cmd_fittings() {
    println!("Catalog fittings:");
    for kind in FittingKind::ALL {
        println!("  {:<28} {:<34} K = {:.2}", kind.id(), kind.display_name(), kind.k());
    }
}

fn cmd_materials() {
    println!("Pipe materials:");
    for material in PipeMaterial::ALL {
        println!(
            "  {:<22} {:<30} ε = {:.3e} m",
            material.id(),
            material.display_name(),
            material.roughness()
        );
    }
}

fn cmd_pipes() {
    println!("Nominal pipe sizes:");
    for pipe in &NOMINAL_PIPES {
        println!(
            "  {:>6} in  Sch {:<3} ID = {:.1} mm",
            pipe.nominal_in,
            pipe.schedule,
            pipe.inside_diameter * 1000.0
        );
    }
}
