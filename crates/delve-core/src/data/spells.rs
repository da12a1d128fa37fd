//! The spell catalog.
//!
//! The catalog is a read-only lookup service: the character engine never
//! mutates it and never owns spell behavior, only identity, discipline and
//! circle. The standard catalog covers circles 1..=7 in both disciplines.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::NUM_CIRCLES;

/// Spellcasting tradition
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Discipline {
    /// Intelligence-driven
    Arcane = 0,
    /// Piety-driven
    Divine = 1,
}

impl Discipline {
    pub const ALL: [Discipline; 2] = [Discipline::Arcane, Discipline::Divine];

    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// Identifier of a spell within the catalog
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SpellId(pub u16);

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellDef {
    pub id: SpellId,
    pub name: &'static str,
    pub discipline: Discipline,
    pub circle: u8,
}

/// (name, discipline, circle) rows the standard catalog is built from
const STANDARD_SPELLS: &[(&str, Discipline, u8)] = &[
    // Arcane, circle 1
    ("HALITO", Discipline::Arcane, 1),
    ("MOGREF", Discipline::Arcane, 1),
    ("KATINO", Discipline::Arcane, 1),
    ("DUMAPIC", Discipline::Arcane, 1),
    // Arcane, circle 2
    ("DILTO", Discipline::Arcane, 2),
    ("SOPIC", Discipline::Arcane, 2),
    // Arcane, circle 3
    ("MAHALITO", Discipline::Arcane, 3),
    ("MOLITO", Discipline::Arcane, 3),
    // Arcane, circle 4
    ("MORLIS", Discipline::Arcane, 4),
    ("DALTO", Discipline::Arcane, 4),
    ("LAHALITO", Discipline::Arcane, 4),
    // Arcane, circle 5
    ("MAMORLIS", Discipline::Arcane, 5),
    ("MAKANITO", Discipline::Arcane, 5),
    ("MADALTO", Discipline::Arcane, 5),
    // Arcane, circle 6
    ("LAKANITO", Discipline::Arcane, 6),
    ("ZILWAN", Discipline::Arcane, 6),
    ("MASOPIC", Discipline::Arcane, 6),
    ("HAMAN", Discipline::Arcane, 6),
    // Arcane, circle 7
    ("MALOR", Discipline::Arcane, 7),
    ("MAHAMAN", Discipline::Arcane, 7),
    ("TILTOWAIT", Discipline::Arcane, 7),
    // Divine, circle 1
    ("KALKI", Discipline::Divine, 1),
    ("DIOS", Discipline::Divine, 1),
    ("BADIOS", Discipline::Divine, 1),
    ("MILWA", Discipline::Divine, 1),
    ("PORFIC", Discipline::Divine, 1),
    // Divine, circle 2
    ("MATU", Discipline::Divine, 2),
    ("CALFO", Discipline::Divine, 2),
    ("MANIFO", Discipline::Divine, 2),
    ("MONTINO", Discipline::Divine, 2),
    // Divine, circle 3
    ("LOMILWA", Discipline::Divine, 3),
    ("DIALKO", Discipline::Divine, 3),
    ("LATUMAPIC", Discipline::Divine, 3),
    ("BAMATU", Discipline::Divine, 3),
    // Divine, circle 4
    ("DIAL", Discipline::Divine, 4),
    ("BADIAL", Discipline::Divine, 4),
    ("LATUMOFIS", Discipline::Divine, 4),
    ("MAPORFIC", Discipline::Divine, 4),
    // Divine, circle 5
    ("DIALMA", Discipline::Divine, 5),
    ("BADIALMA", Discipline::Divine, 5),
    ("LITOKAN", Discipline::Divine, 5),
    ("KANDI", Discipline::Divine, 5),
    ("DI", Discipline::Divine, 5),
    ("BADI", Discipline::Divine, 5),
    // Divine, circle 6
    ("LORTO", Discipline::Divine, 6),
    ("MADI", Discipline::Divine, 6),
    ("MABADI", Discipline::Divine, 6),
    ("LOKTOFEIT", Discipline::Divine, 6),
    // Divine, circle 7
    ("MALIKTO", Discipline::Divine, 7),
    ("KADORTO", Discipline::Divine, 7),
];

/// Read-only spell lookup service.
///
/// Loaded once by the surrounding application; the engine only queries it.
#[derive(Debug, Clone)]
pub struct SpellCatalog {
    spells: Vec<SpellDef>,
}

impl SpellCatalog {
    /// Build the standard catalog.
    pub fn standard() -> Self {
        let spells = STANDARD_SPELLS
            .iter()
            .enumerate()
            .map(|(i, &(name, discipline, circle))| {
                debug_assert!((1..=NUM_CIRCLES as u8).contains(&circle));
                SpellDef {
                    id: SpellId(i as u16),
                    name,
                    discipline,
                    circle,
                }
            })
            .collect();
        Self { spells }
    }

    /// Every spell in the catalog.
    pub fn all_spells(&self) -> &[SpellDef] {
        &self.spells
    }

    /// Look up a spell by id. A missing id is a caller contract violation.
    pub fn get(&self, id: SpellId) -> &SpellDef {
        self.spells
            .get(id.0 as usize)
            .unwrap_or_else(|| panic!("spell id {} missing from catalog", id.0))
    }

    /// Find a spell id by name.
    pub fn find(&self, name: &str) -> Option<SpellId> {
        self.spells.iter().find(|s| s.name == name).map(|s| s.id)
    }

    /// All spells of one discipline and circle.
    pub fn in_circle(
        &self,
        discipline: Discipline,
        circle: u8,
    ) -> impl Iterator<Item = &SpellDef> {
        self.spells
            .iter()
            .filter(move |s| s.discipline == discipline && s.circle == circle)
    }
}

impl Default for SpellCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
