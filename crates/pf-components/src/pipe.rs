//! Straight circular pipe with Darcy-Weisbach friction and minor losses.

use crate::error::{ComponentError, ComponentResult};
use pf_core::units::constants::G0_MPS2;

/// Circular pipe section (SI values).
///
/// Head loss for a mean velocity `V` and Darcy friction factor `f`:
///
/// ```text
/// H_L = [f (L/D + Σ L_eq/D) + K_total] · V² / 2g
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Pipe length [m]
    pub length: f64,
    /// Pipe inner diameter [m]
    pub diameter: f64,
    /// Surface roughness (absolute) [m]
    pub roughness: f64,
    /// Minor loss coefficient (sum of K factors for fittings, bends, etc.)
    pub k_minor: f64,
    /// Equivalent length of fittings expressed as Σ L_eq/D
    pub le_over_d: f64,
}

impl Pipe {
    /// Create a bare pipe without fittings.
    pub fn new(length: f64, diameter: f64, roughness: f64) -> Self {
        Self {
            length,
            diameter,
            roughness,
            k_minor: 0.0,
            le_over_d: 0.0,
        }
    }

    /// Attach aggregated fitting losses.
    pub fn with_fittings(mut self, k_minor: f64, le_over_d: f64) -> Self {
        self.k_minor = k_minor;
        self.le_over_d = le_over_d;
        self
    }

    /// Flow cross-section [m²].
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.diameter.powi(2) / 4.0
    }

    /// ε/D
    pub fn relative_roughness(&self) -> f64 {
        self.roughness / self.diameter
    }

    pub fn velocity_from_flow(&self, flow_rate: f64) -> f64 {
        flow_rate / self.area()
    }

    pub fn flow_from_velocity(&self, velocity: f64) -> f64 {
        velocity * self.area()
    }

    /// Re = ρVD/μ
    pub fn reynolds(&self, density: f64, viscosity: f64, velocity: f64) -> f64 {
        density * velocity * self.diameter / viscosity
    }

    /// Total resistance coefficient `f (L/D + Σ L_eq/D) + K_total`.
    pub fn resistance(&self, f: f64) -> f64 {
        f * (self.length / self.diameter + self.le_over_d) + self.k_minor
    }

    /// Head loss [m] at velocity `velocity` for friction factor `f`.
    pub fn head_loss(&self, f: f64, velocity: f64) -> f64 {
        self.resistance(f) * velocity_head(velocity)
    }

    /// Mean velocity [m/s] that dissipates `head` [m] at friction factor `f`.
    pub fn velocity_for_head(&self, f: f64, head: f64) -> ComponentResult<f64> {
        let resistance = self.resistance(f);
        if !resistance.is_finite() || resistance <= 0.0 {
            return Err(ComponentError::InvalidInput {
                what: format!("total pipe resistance must be positive (got {resistance})"),
            });
        }
        if head < 0.0 {
            return Err(ComponentError::InvalidInput {
                what: format!("head loss must not be negative (got {head})"),
            });
        }
        Ok((2.0 * G0_MPS2 * head / resistance).sqrt())
    }
}

/// V²/2g [m]
pub fn velocity_head(velocity: f64) -> f64 {
    velocity.powi(2) / (2.0 * G0_MPS2)
}

/// ΔP = ρ g H [Pa]
pub fn pressure_from_head(density: f64, head: f64) -> f64 {
    density * G0_MPS2 * head
}

/// H = ΔP / (ρ g) [m]
pub fn head_from_pressure(density: f64, pressure: f64) -> f64 {
    pressure / (density * G0_MPS2)
}

/// Power = ρ g Q H / η [W]
pub fn hydraulic_power(density: f64, flow_rate: f64, head: f64, efficiency: f64) -> f64 {
    density * G0_MPS2 * flow_rate * head / efficiency
}
