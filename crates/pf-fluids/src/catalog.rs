use crate::table::{AIR, PropertyTable, WATER};

/// Fluids with tabulated properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Fluid {
    Water,
    Air,
}

#[derive(Debug, Clone, Copy)]
pub struct FluidCatalogEntry {
    pub fluid: Fluid,
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub table: &'static PropertyTable,
}

impl FluidCatalogEntry {
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim().to_ascii_lowercase();
        self.canonical_id.eq_ignore_ascii_case(&name)
            || self.display_name.eq_ignore_ascii_case(&name)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(&name))
    }
}

static CATALOG: [FluidCatalogEntry; 2] = [
    FluidCatalogEntry {
        fluid: Fluid::Water,
        canonical_id: "water",
        display_name: "Water",
        aliases: &["h2o", "agua"],
        table: &WATER,
    },
    FluidCatalogEntry {
        fluid: Fluid::Air,
        canonical_id: "air",
        display_name: "Air",
        aliases: &["aire", "atmosphere"],
        table: &AIR,
    },
];

pub fn catalog() -> &'static [FluidCatalogEntry] {
    &CATALOG
}

/// Find a catalog entry by id, display name, or alias (case-insensitive).
pub fn lookup(name: &str) -> Option<&'static FluidCatalogEntry> {
    CATALOG.iter().find(|entry| entry.matches_name(name))
}

impl Fluid {
    pub fn entry(self) -> &'static FluidCatalogEntry {
        match self {
            Fluid::Water => &CATALOG[0],
            Fluid::Air => &CATALOG[1],
        }
    }
}
