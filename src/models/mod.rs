//! Data models for parishes, members, and petitions.

pub mod member;
pub mod parish;
pub mod petition;

pub use member::{InviteOutcome, ParishMember, Role, RolePreset, UserProfile};
pub use parish::{Parish, ParishUpdate};
pub use petition::{NewPetition, Petition, PetitionSummary, WizardState};
