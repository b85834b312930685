//! Fittings (accessories) and minor-loss aggregation.

use std::fmt;
use std::str::FromStr;

use crate::error::ComponentError;

/// How a fitting's resistance is expressed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FittingLoss {
    /// Resistance coefficient `K` (head loss = K V²/2g). May be negative:
    /// some catalogs publish negative correction values.
    K(f64),
    /// Equivalent length ratio `L_eq/D`, scaled by the pipe friction factor.
    EquivalentLength(f64),
}

/// One accessory line: a loss and how many of them are installed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fitting {
    pub name: String,
    pub loss: FittingLoss,
    pub count: u32,
}

impl Fitting {
    pub fn k(name: impl Into<String>, k: f64, count: u32) -> Self {
        Self {
            name: name.into(),
            loss: FittingLoss::K(k),
            count,
        }
    }

    pub fn equivalent_length(name: impl Into<String>, le_over_d: f64, count: u32) -> Self {
        Self {
            name: name.into(),
            loss: FittingLoss::EquivalentLength(le_over_d),
            count,
        }
    }

    /// Catalog fitting with its standard K value.
    pub fn from_kind(kind: FittingKind, count: u32) -> Self {
        Self::k(kind.display_name(), kind.k(), count)
    }

    /// Contribution to `K_total`.
    pub fn k_total(&self) -> f64 {
        match self.loss {
            FittingLoss::K(k) => k * f64::from(self.count),
            FittingLoss::EquivalentLength(_) => 0.0,
        }
    }

    /// Contribution to `Σ L_eq/D`.
    pub fn le_over_d_total(&self) -> f64 {
        match self.loss {
            FittingLoss::K(_) => 0.0,
            FittingLoss::EquivalentLength(r) => r * f64::from(self.count),
        }
    }

    /// The per-unit K when it is negative.
    pub fn negative_k(&self) -> Option<f64> {
        match self.loss {
            FittingLoss::K(k) if k < 0.0 => Some(k),
            _ => None,
        }
    }
}

/// `K_total = Σ K_i · count_i`; an empty list gives 0.
pub fn aggregate(fittings: &[Fitting]) -> f64 {
    fittings.iter().map(Fitting::k_total).sum()
}

/// `Σ (L_eq/D)_i · count_i`; an empty list gives 0.
pub fn aggregate_equivalent_length(fittings: &[Fitting]) -> f64 {
    fittings.iter().map(Fitting::le_over_d_total).sum()
}

/// Standard accessories with tabulated resistance coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FittingKind {
    InletStrainer,
    FootValve,
    SquareEntrance,
    BellmouthEntrance,
    ReentrantEntrance,
    GradualExpansion,
    SuddenExpansion,
    GradualContraction,
    SuddenContraction,
    ShortElbow90,
    ShortElbow45,
    LongElbow90,
    LongElbow45,
    LongElbow22,
    TeeRun,
    TeeBranch,
    TeeBilateralOutlet,
    GateValveOpen,
    AngleValveOpen,
    GlobeValveOpen,
    AlfalfaValve,
    CheckValve,
    ButterflyValveOpen,
    Nozzle,
    FlowController,
    VenturiMeter,
    Junction,
    Bifurcation,
    SmallBranch,
}

impl FittingKind {
    pub const ALL: [FittingKind; 29] = [
        Self::InletStrainer,
        Self::FootValve,
        Self::SquareEntrance,
        Self::BellmouthEntrance,
        Self::ReentrantEntrance,
        Self::GradualExpansion,
        Self::SuddenExpansion,
        Self::GradualContraction,
        Self::SuddenContraction,
        Self::ShortElbow90,
        Self::ShortElbow45,
        Self::LongElbow90,
        Self::LongElbow45,
        Self::LongElbow22,
        Self::TeeRun,
        Self::TeeBranch,
        Self::TeeBilateralOutlet,
        Self::GateValveOpen,
        Self::AngleValveOpen,
        Self::GlobeValveOpen,
        Self::AlfalfaValve,
        Self::CheckValve,
        Self::ButterflyValveOpen,
        Self::Nozzle,
        Self::FlowController,
        Self::VenturiMeter,
        Self::Junction,
        Self::Bifurcation,
        Self::SmallBranch,
    ];

    /// Resistance coefficient K.
    pub fn k(self) -> f64 {
        match self {
            Self::InletStrainer => 0.80,
            Self::FootValve => 3.00,
            Self::SquareEntrance => 0.50,
            Self::BellmouthEntrance => 0.10,
            Self::ReentrantEntrance => 1.00,
            Self::GradualExpansion => 0.30,
            Self::SuddenExpansion => 0.20,
            Self::GradualContraction => 0.25,
            Self::SuddenContraction => 0.35,
            Self::ShortElbow90 => 0.90,
            Self::ShortElbow45 => 0.40,
            Self::LongElbow90 => 0.40,
            Self::LongElbow45 => 0.20,
            Self::LongElbow22 => 0.10,
            Self::TeeRun => 0.10,
            Self::TeeBranch => 1.50,
            Self::TeeBilateralOutlet => 1.80,
            Self::GateValveOpen => 5.00,
            Self::AngleValveOpen => 5.00,
            Self::GlobeValveOpen => 10.0,
            Self::AlfalfaValve => 2.00,
            Self::CheckValve => 2.50,
            Self::ButterflyValveOpen => 0.24,
            Self::Nozzle => 2.75,
            Self::FlowController => 2.50,
            Self::VenturiMeter => 2.50,
            Self::Junction => 0.40,
            Self::Bifurcation => 0.10,
            Self::SmallBranch => 0.03,
        }
    }

    /// Stable snake_case identifier (matches the serde name).
    pub fn id(self) -> &'static str {
        match self {
            Self::InletStrainer => "inlet_strainer",
            Self::FootValve => "foot_valve",
            Self::SquareEntrance => "square_entrance",
            Self::BellmouthEntrance => "bellmouth_entrance",
            Self::ReentrantEntrance => "reentrant_entrance",
            Self::GradualExpansion => "gradual_expansion",
            Self::SuddenExpansion => "sudden_expansion",
            Self::GradualContraction => "gradual_contraction",
            Self::SuddenContraction => "sudden_contraction",
            Self::ShortElbow90 => "short_elbow90",
            Self::ShortElbow45 => "short_elbow45",
            Self::LongElbow90 => "long_elbow90",
            Self::LongElbow45 => "long_elbow45",
            Self::LongElbow22 => "long_elbow22",
            Self::TeeRun => "tee_run",
            Self::TeeBranch => "tee_branch",
            Self::TeeBilateralOutlet => "tee_bilateral_outlet",
            Self::GateValveOpen => "gate_valve_open",
            Self::AngleValveOpen => "angle_valve_open",
            Self::GlobeValveOpen => "globe_valve_open",
            Self::AlfalfaValve => "alfalfa_valve",
            Self::CheckValve => "check_valve",
            Self::ButterflyValveOpen => "butterfly_valve_open",
            Self::Nozzle => "nozzle",
            Self::FlowController => "flow_controller",
            Self::VenturiMeter => "venturi_meter",
            Self::Junction => "junction",
            Self::Bifurcation => "bifurcation",
            Self::SmallBranch => "small_branch",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::InletStrainer => "Inlet strainer",
            Self::FootValve => "Foot valve",
            Self::SquareEntrance => "Square-edged entrance",
            Self::BellmouthEntrance => "Bellmouth entrance",
            Self::ReentrantEntrance => "Re-entrant (borda) entrance",
            Self::GradualExpansion => "Gradual expansion",
            Self::SuddenExpansion => "Sudden expansion",
            Self::GradualContraction => "Gradual contraction",
            Self::SuddenContraction => "Sudden contraction",
            Self::ShortElbow90 => "Short-radius elbow 90°",
            Self::ShortElbow45 => "Short-radius elbow 45°",
            Self::LongElbow90 => "Long-radius elbow 90°",
            Self::LongElbow45 => "Long-radius elbow 45°",
            Self::LongElbow22 => "Long-radius elbow 22.5°",
            Self::TeeRun => "Tee, flow through run",
            Self::TeeBranch => "Tee, flow through branch",
            Self::TeeBilateralOutlet => "Tee, bilateral outlet",
            Self::GateValveOpen => "Gate valve, open",
            Self::AngleValveOpen => "Angle valve, open",
            Self::GlobeValveOpen => "Globe valve, open",
            Self::AlfalfaValve => "Alfalfa valve",
            Self::CheckValve => "Check valve",
            Self::ButterflyValveOpen => "Butterfly valve, open",
            Self::Nozzle => "Nozzle",
            Self::FlowController => "Flow controller",
            Self::VenturiMeter => "Venturi meter",
            Self::Junction => "Junction",
            Self::Bifurcation => "Bifurcation",
            Self::SmallBranch => "Small branch",
        }
    }
}

impl fmt::Display for FittingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for FittingKind {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == key || kind.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ComponentError::InvalidInput {
                what: format!("unknown fitting '{s}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_zero() {
        assert_eq!(aggregate(&[]), 0.0);
        assert_eq!(aggregate_equivalent_length(&[]), 0.0);
    }

    #[test]
    fn counts_multiply() {
        let fittings = vec![
            Fitting::from_kind(FittingKind::ShortElbow90, 4),
            Fitting::from_kind(FittingKind::GateValveOpen, 1),
            Fitting::k("custom", 0.5, 2),
        ];
        assert!((aggregate(&fittings) - (4.0 * 0.9 + 5.0 + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn order_does_not_matter() {
        let a = Fitting::k("a", 0.35, 3);
        let b = Fitting::k("b", 1.5, 1);
        let c = Fitting::k("c", 0.1, 7);
        let forward = aggregate(&[a.clone(), b.clone(), c.clone()]);
        let reverse = aggregate(&[c, b, a]);
        assert!((forward - reverse).abs() < 1e-12);
    }

    #[test]
    fn equivalent_length_is_separate() {
        let fittings = vec![
            Fitting::equivalent_length("elbow", 30.0, 2),
            Fitting::k("valve", 0.2, 1),
        ];
        assert!((aggregate(&fittings) - 0.2).abs() < 1e-15);
        assert!((aggregate_equivalent_length(&fittings) - 60.0).abs() < 1e-12);
    }

    #[test]
    fn negative_k_is_accepted() {
        let fittings = vec![Fitting::k("correction", -0.1, 1), Fitting::k("elbow", 0.9, 1)];
        assert!((aggregate(&fittings) - 0.8).abs() < 1e-12);
        assert_eq!(fittings[0].negative_k(), Some(-0.1));
        assert_eq!(fittings[1].negative_k(), None);
    }

    #[test]
    fn parse_kind() {
        assert_eq!("globe_valve_open".parse::<FittingKind>().unwrap(), FittingKind::GlobeValveOpen);
        assert_eq!("Tee Branch".parse::<FittingKind>().unwrap(), FittingKind::TeeBranch);
        assert_eq!("Nozzle".parse::<FittingKind>().unwrap(), FittingKind::Nozzle);
        assert!("flux_capacitor".parse::<FittingKind>().is_err());
    }

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<_> = FittingKind::ALL.iter().map(|k| k.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), FittingKind::ALL.len());
    }
}
