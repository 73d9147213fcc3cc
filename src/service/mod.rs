//! Boundary to the parish web API.

pub mod http;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{InviteOutcome, NewPetition, Parish, ParishMember, ParishUpdate, Petition, Role};

pub use http::HttpParishService;

/// Operations the UI needs from the parish backend.
///
/// Authentication, authorization and persistence live behind this trait.
#[async_trait]
pub trait ParishService: Send + Sync {
    /// Parish of the signed-in user, if any.
    async fn current_parish(&self) -> Result<Option<Parish>>;

    async fn parish_members(&self, parish_id: &str) -> Result<Vec<ParishMember>>;

    async fn update_parish(&self, parish_id: &str, update: &ParishUpdate) -> Result<()>;

    /// Add an existing account to the parish, or report that no account matched.
    async fn invite_member(&self, parish_id: &str, email: &str, roles: &[Role]) -> Result<InviteOutcome>;

    async fn remove_member(&self, parish_id: &str, user_id: &str) -> Result<()>;

    /// Replace the member's role set.
    async fn update_member_roles(&self, parish_id: &str, user_id: &str, roles: &[Role]) -> Result<()>;

    async fn create_petition(&self, petition: &NewPetition) -> Result<Petition>;

    /// Cheap reachability check used by the setup wizard.
    async fn ping(&self) -> Result<()>;
}
