// pf-core/src/units.rs

//! uom quantity aliases used to derive conversion factors.

use uom::si::f64::{
    Acceleration as UomAcceleration, Area as UomArea,
    DiffusionCoefficient as UomDiffusionCoefficient, DynamicViscosity as UomDynamicViscosity,
    Length as UomLength, Mass as UomMass,
    MassDensity as UomMassDensity, Power as UomPower, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
    Velocity as UomVelocity, Volume as UomVolume, VolumeRate as UomVolumeRate,
};

pub type Accel = UomAcceleration;
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
/// m²/s; uom files kinematic viscosity under diffusion coefficient.
pub type KinVisc = UomDiffusionCoefficient;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Density = UomMassDensity;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type Velocity = UomVelocity;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

/// Temperature from degrees Celsius (stored as kelvin).
#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

pub mod constants {
    /// Standard gravity [m/s²], used by every head/pressure conversion.
    pub const G0_MPS2: f64 = 9.806_65;
}

/// One cubic foot built from the exact foot.
#[inline]
pub fn cubic_foot() -> Volume {
    use uom::si::length::foot;
    let ft = Length::new::<foot>(1.0);
    ft * ft * ft
}
