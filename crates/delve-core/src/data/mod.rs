//! Static rule data consumed by the character engine.

pub mod spells;

pub use spells::{Discipline, SpellCatalog, SpellDef, SpellId};
