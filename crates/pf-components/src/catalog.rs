//! Pipe material roughness and nominal pipe size tables.

use std::fmt;
use std::str::FromStr;

use crate::error::ComponentError;

/// Pipe wall material with a tabulated absolute roughness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PipeMaterial {
    Plastic,
    Fiberglass,
    DrawnSteel,
    Copper,
    CementLinedCastIron,
    BitumenLinedCastIron,
    CentrifugalCastIron,
    #[default]
    CommercialSteel,
    AsphaltedCastIron,
    CastIron,
    WroughtIron,
    GalvanizedIron,
    Wood,
    Concrete,
}

impl PipeMaterial {
    pub const ALL: [PipeMaterial; 14] = [
        Self::Plastic,
        Self::Fiberglass,
        Self::DrawnSteel,
        Self::Copper,
        Self::CementLinedCastIron,
        Self::BitumenLinedCastIron,
        Self::CentrifugalCastIron,
        Self::CommercialSteel,
        Self::AsphaltedCastIron,
        Self::CastIron,
        Self::WroughtIron,
        Self::GalvanizedIron,
        Self::Wood,
        Self::Concrete,
    ];

    /// Absolute roughness ε [m].
    pub fn roughness(self) -> f64 {
        match self {
            Self::Plastic => 1.5e-6,
            Self::Fiberglass => 1.0e-5,
            Self::DrawnSteel => 2.4e-6,
            Self::Copper => 1.5e-6,
            Self::CementLinedCastIron => 2.4e-6,
            Self::BitumenLinedCastIron => 2.4e-6,
            Self::CentrifugalCastIron => 3.0e-6,
            Self::CommercialSteel => 6.0e-5,
            Self::AsphaltedCastIron => 1.2e-4,
            Self::CastIron => 3.6e-4,
            Self::WroughtIron => 6.0e-5,
            Self::GalvanizedIron => 1.5e-4,
            Self::Wood => 5.4e-4,
            Self::Concrete => 1.65e-3,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Plastic => "plastic",
            Self::Fiberglass => "fiberglass",
            Self::DrawnSteel => "drawn_steel",
            Self::Copper => "copper",
            Self::CementLinedCastIron => "cement_lined_cast_iron",
            Self::BitumenLinedCastIron => "bitumen_lined_cast_iron",
            Self::CentrifugalCastIron => "centrifugal_cast_iron",
            Self::CommercialSteel => "commercial_steel",
            Self::AsphaltedCastIron => "asphalted_cast_iron",
            Self::CastIron => "cast_iron",
            Self::WroughtIron => "wrought_iron",
            Self::GalvanizedIron => "galvanized_iron",
            Self::Wood => "wood",
            Self::Concrete => "concrete",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Plastic => "Plastic (PE, PVC)",
            Self::Fiberglass => "Fiberglass-reinforced polyester",
            Self::DrawnSteel => "Drawn steel tubing",
            Self::Copper => "Brass / copper",
            Self::CementLinedCastIron => "Cast iron, cement lined",
            Self::BitumenLinedCastIron => "Cast iron, bitumen lined",
            Self::CentrifugalCastIron => "Centrifugally cast iron",
            Self::CommercialSteel => "Commercial steel",
            Self::AsphaltedCastIron => "Asphalted cast iron",
            Self::CastIron => "Cast iron",
            Self::WroughtIron => "Wrought iron",
            Self::GalvanizedIron => "Galvanized iron",
            Self::Wood => "Wood stave",
            Self::Concrete => "Concrete",
        }
    }
}

impl fmt::Display for PipeMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PipeMaterial {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-', '/'], "_");
        let material = match key.as_str() {
            "pvc" | "pe" | "polyethylene" => Some(Self::Plastic),
            "brass" => Some(Self::Copper),
            "steel" => Some(Self::CommercialSteel),
            "galvanized" | "galvanized_steel" => Some(Self::GalvanizedIron),
            _ => Self::ALL.into_iter().find(|m| m.id() == key),
        };
        material.ok_or_else(|| ComponentError::InvalidInput {
            what: format!("unknown pipe material '{s}'"),
        })
    }
}

/// Nominal pipe size with its inside diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NominalPipe {
    /// Nominal size label in inches, e.g. `"1-1/2"`
    pub nominal_in: &'static str,
    pub schedule: u16,
    /// Inside diameter [m]
    pub inside_diameter: f64,
}

const fn sch40(nominal_in: &'static str, inside_diameter: f64) -> NominalPipe {
    NominalPipe {
        nominal_in,
        schedule: 40,
        inside_diameter,
    }
}

/// Schedule 40 steel pipe.
pub static NOMINAL_PIPES: [NominalPipe; 23] = [
    sch40("1/8", 0.0068),
    sch40("1/4", 0.0092),
    sch40("3/8", 0.0125),
    sch40("1/2", 0.0158),
    sch40("3/4", 0.0209),
    sch40("1", 0.0266),
    sch40("1-1/4", 0.0351),
    sch40("1-1/2", 0.0409),
    sch40("2", 0.0525),
    sch40("2-1/2", 0.0627),
    sch40("3", 0.0779),
    sch40("3-1/2", 0.0901),
    sch40("4", 0.1023),
    sch40("5", 0.128),
    sch40("6", 0.154),
    sch40("8", 0.203),
    sch40("10", 0.255),
    sch40("12", 0.303),
    sch40("14", 0.333),
    sch40("16", 0.381),
    sch40("18", 0.429),
    sch40("20", 0.478),
    sch40("24", 0.575),
];

/// Inside diameter [m] of a nominal size. Accepts `"1-1/2"`, `"1 1/2"`,
/// `"1.5"` and an optional trailing `"` or `in`.
pub fn nominal_inside_diameter(nominal: &str, schedule: u16) -> Option<f64> {
    let wanted = nominal_inches(nominal)?;
    NOMINAL_PIPES
        .iter()
        .filter(|p| p.schedule == schedule)
        .find(|p| nominal_inches(p.nominal_in).is_some_and(|n| (n - wanted).abs() < 1e-9))
        .map(|p| p.inside_diameter)
}

fn nominal_inches(text: &str) -> Option<f64> {
    let text = text
        .trim()
        .trim_end_matches("in")
        .trim_end_matches('"')
        .trim();
    let mut total = 0.0;
    for part in text.split(['-', ' ']).filter(|p| !p.is_empty()) {
        total += match part.split_once('/') {
            Some((num, den)) => num.parse::<f64>().ok()? / den.parse::<f64>().ok()?,
            None => part.parse::<f64>().ok()?,
        };
    }
    (total > 0.0).then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_material_is_commercial_steel() {
        assert_eq!(PipeMaterial::default(), PipeMaterial::CommercialSteel);
        assert_eq!(PipeMaterial::default().roughness(), 6.0e-5);
    }

    #[test]
    fn parse_material() {
        assert_eq!("PVC".parse::<PipeMaterial>().unwrap(), PipeMaterial::Plastic);
        assert_eq!(
            "cast iron".parse::<PipeMaterial>().unwrap(),
            PipeMaterial::CastIron
        );
        assert!("unobtainium".parse::<PipeMaterial>().is_err());
    }

    #[test]
    fn roughness_is_positive() {
        assert!(PipeMaterial::ALL.iter().all(|m| m.roughness() > 0.0));
    }

    #[test]
    fn nominal_lookup_forms() {
        assert_eq!(nominal_inside_diameter("4", 40), Some(0.1023));
        assert_eq!(nominal_inside_diameter("1-1/2", 40), Some(0.0409));
        assert_eq!(nominal_inside_diameter("1 1/2\"", 40), Some(0.0409));
        assert_eq!(nominal_inside_diameter("1.5 in", 40), Some(0.0409));
        assert_eq!(nominal_inside_diameter("3/4", 40), Some(0.0209));
    }

    #[test]
    fn unknown_nominal() {
        assert_eq!(nominal_inside_diameter("7", 40), None);
        assert_eq!(nominal_inside_diameter("4", 80), None);
        assert_eq!(nominal_inside_diameter("abc", 40), None);
    }

    #[test]
    fn diameters_increase_with_size() {
        assert!(
            NOMINAL_PIPES
                .windows(2)
                .all(|w| w[1].inside_diameter > w[0].inside_diameter)
        );
    }
}
