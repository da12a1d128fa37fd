//! The character: raw attributes, derived abilities, identity and
//! condition.

pub mod abilities;
pub mod alignment;
pub mod attributes;
pub mod character;
pub mod class;
pub mod race;
pub mod status;

pub use abilities::{Ability, AbilityTable};
pub use alignment::Alignment;
pub use attributes::{Attribute, AttributeSet, allocate_for_class, roll_bonus_points};
pub use character::{Character, CharacterFlags, CreationMethod, CreationStage, Location};
pub use class::{Class, eligible_classes};
pub use race::Race;
pub use status::Status;
