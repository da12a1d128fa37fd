//! Character progression: spell learning, experience, the level
//! lifecycle and temple restoration.

pub mod level;
pub mod resurrect;
pub mod spellbook;
pub mod xp;

pub use level::{LevelUpOutcome, age, change_class, legate, level_down, level_up};
pub use resurrect::RestoreOutcome;
pub use spellbook::SpellKnowledge;
pub use xp::xp_required;
