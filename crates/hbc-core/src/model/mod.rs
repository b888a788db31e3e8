pub mod collection;
pub mod human_being;
pub mod mood;

pub use collection::{CollectionOfHumanBeings, SharedCollection};
pub use human_being::{Car, Coordinates, HumanBeing, HumanBeingDraft, MAX_IMPACT_SPEED};
pub use mood::Mood;
