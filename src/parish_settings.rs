//! Parish settings and membership state.
//!
//! Every mutation goes to the service first; local state only changes after
//! the service answers, and successful mutations are followed by a re-fetch.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::feedback::{ConfirmRequest, Decision, Notices};
use crate::models::{InviteOutcome, Parish, ParishMember, ParishUpdate, Role, RolePreset};
use crate::service::ParishService;

/// Tab shown in the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    Settings,
    Members,
    Invite,
}

/// Editable copy of the parish fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParishForm {
    pub name: String,
    pub city: String,
    pub state: String,
}

impl ParishForm {
    pub fn from_parish(parish: &Parish) -> Self {
        Self {
            name: parish.name.clone(),
            city: parish.city.clone(),
            state: parish.state.clone(),
        }
    }

    /// All three fields must be non-blank.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.city.trim().is_empty() && !self.state.trim().is_empty()
    }

    fn to_update(&self) -> ParishUpdate {
        ParishUpdate {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
        }
    }
}

/// Invite tab inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteForm {
    pub email: String,
    pub role: Role,
}

impl InviteForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Results sent back from service tasks.
#[derive(Debug)]
pub enum SettingsMessage {
    ParishLoaded(Option<Parish>),
    ParishLoadFailed(String),
    MembersLoaded(Vec<ParishMember>),
    MembersLoadFailed(String),
    Saved,
    SaveFailed(String),
    Invited(InviteOutcome),
    InviteFailed(String),
    MemberRemoved(String),
    RemoveFailed { user_id: String, error: String },
    RoleUpdated(String),
    RoleUpdateFailed { user_id: String, error: String },
}

/// State behind the parish settings panel.
pub struct ParishSettings {
    service: Arc<dyn ParishService>,
    handle: Handle,
    tx: mpsc::UnboundedSender<SettingsMessage>,
    rx: mpsc::UnboundedReceiver<SettingsMessage>,
    in_flight: usize,

    pub tab: SettingsTab,
    pub parish: Option<Parish>,
    pub form: ParishForm,
    pub members: Vec<ParishMember>,
    pub invite: InviteForm,

    pub loading: bool,
    pub loading_members: bool,
    pub saving: bool,
    pub inviting: bool,
    /// Members with a role change or removal in flight.
    pub busy_members: HashSet<String>,

    pub pending_removal: Option<ConfirmRequest<String>>,
    pub notices: Notices,
}

impl ParishSettings {
    pub fn new(service: Arc<dyn ParishService>, handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            service,
            handle,
            tx,
            rx,
            in_flight: 0,
            tab: SettingsTab::default(),
            parish: None,
            form: ParishForm::default(),
            members: Vec::new(),
            invite: InviteForm::default(),
            loading: false,
            loading_members: false,
            saving: false,
            inviting: false,
            busy_members: HashSet::new(),
            pending_removal: None,
            notices: Notices::default(),
        }
    }

    /// Number of service calls still awaiting a result.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = SettingsMessage> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.in_flight += 1;
        self.handle.spawn(async move {
            let _ = tx.send(task.await);
        });
    }

    fn parish_id(&self) -> Option<String> {
        self.parish.as_ref().map(|p| p.id.clone())
    }

    /// Fetch the current parish, then its members.
    pub fn load(&mut self) {
        self.loading = true;
        let service = self.service.clone();
        self.spawn(async move {
            match service.current_parish().await {
                Ok(parish) => SettingsMessage::ParishLoaded(parish),
                Err(e) => SettingsMessage::ParishLoadFailed(e.to_string()),
            }
        });
    }

    pub fn load_members(&mut self, parish_id: String) {
        self.loading_members = true;
        let service = self.service.clone();
        self.spawn(async move {
            match service.parish_members(&parish_id).await {
                Ok(members) => SettingsMessage::MembersLoaded(members),
                Err(e) => SettingsMessage::MembersLoadFailed(e.to_string()),
            }
        });
    }

    pub fn save(&mut self) {
        let Some(parish_id) = self.parish_id() else {
            self.notices.warning("No parish selected");
            return;
        };
        if !self.form.is_complete() {
            self.notices.warning("Please fill in all fields");
            return;
        }

        self.saving = true;
        let update = self.form.to_update();
        let service = self.service.clone();
        self.spawn(async move {
            match service.update_parish(&parish_id, &update).await {
                Ok(()) => SettingsMessage::Saved,
                Err(e) => SettingsMessage::SaveFailed(e.to_string()),
            }
        });
    }

    pub fn invite(&mut self) {
        let Some(parish_id) = self.parish_id() else {
            self.notices.warning("No parish selected");
            return;
        };
        if self.invite.email.trim().is_empty() {
            self.notices.warning("Please enter an email address");
            return;
        }

        self.inviting = true;
        let email = self.invite.email.clone();
        let roles = vec![self.invite.role.clone()];
        let service = self.service.clone();
        self.spawn(async move {
            match service.invite_member(&parish_id, &email, &roles).await {
                Ok(outcome) => SettingsMessage::Invited(outcome),
                Err(e) => SettingsMessage::InviteFailed(e.to_string()),
            }
        });
    }

    /// Ask the user to confirm removing a member.
    pub fn request_remove(&mut self, member: &ParishMember) {
        if self.parish.is_none() {
            return;
        }
        self.pending_removal = Some(ConfirmRequest {
            title: "Remove Member".to_string(),
            message: format!(
                "Are you sure you want to remove {} from the parish?",
                member.confirmation_label()
            ),
            confirm_label: "Remove".to_string(),
            payload: member.user_id.clone(),
        });
    }

    /// Act on the answer to the pending removal prompt.
    pub fn resolve_remove(&mut self, decision: Decision) {
        let Some(request) = self.pending_removal.take() else {
            return;
        };
        if decision == Decision::Cancel {
            return;
        }
        let Some(parish_id) = self.parish_id() else {
            return;
        };

        let user_id = request.payload;
        self.busy_members.insert(user_id.clone());
        let service = self.service.clone();
        self.spawn(async move {
            match service.remove_member(&parish_id, &user_id).await {
                Ok(()) => SettingsMessage::MemberRemoved(user_id),
                Err(e) => SettingsMessage::RemoveFailed {
                    user_id,
                    error: e.to_string(),
                },
            }
        });
    }

    /// Replace a member's roles with a preset. No-op if the preset is disabled.
    pub fn update_role(&mut self, member: &ParishMember, preset: RolePreset) {
        if preset.is_disabled_for(&member.roles) || self.busy_members.contains(&member.user_id) {
            return;
        }
        let Some(parish_id) = self.parish_id() else {
            return;
        };

        let user_id = member.user_id.clone();
        let roles = preset.roles();
        self.busy_members.insert(user_id.clone());
        let service = self.service.clone();
        self.spawn(async move {
            match service.update_member_roles(&parish_id, &user_id, &roles).await {
                Ok(()) => SettingsMessage::RoleUpdated(user_id),
                Err(e) => SettingsMessage::RoleUpdateFailed {
                    user_id,
                    error: e.to_string(),
                },
            }
        });
    }

    /// Apply every result that has arrived. Returns true if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
            changed = true;
        }
        changed
    }

    /// Wait for the next result and apply it.
    #[cfg(test)]
    pub async fn next_message(&mut self) {
        if let Some(msg) = self.rx.recv().await {
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: SettingsMessage) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match msg {
            SettingsMessage::ParishLoaded(Some(parish)) => {
                info!("Loaded parish {} ({})", parish.name, parish.id);
                self.form = ParishForm::from_parish(&parish);
                let parish_id = parish.id.clone();
                self.parish = Some(parish);
                self.loading = false;
                self.load_members(parish_id);
            }
            SettingsMessage::ParishLoaded(None) => {
                info!("No current parish for this account");
                self.parish = None;
                self.form = ParishForm::default();
                self.members.clear();
                self.busy_members.clear();
                self.pending_removal = None;
                self.loading = false;
            }
            SettingsMessage::ParishLoadFailed(e) => {
                error!("Error loading parish data: {}", e);
                self.notices.error("Failed to load parish data");
                self.loading = false;
            }
            SettingsMessage::MembersLoaded(members) => {
                self.members = members;
                self.loading_members = false;
            }
            SettingsMessage::MembersLoadFailed(e) => {
                error!("Error loading members: {}", e);
                self.notices.error("Failed to load parish members");
                self.loading_members = false;
            }
            SettingsMessage::Saved => {
                self.saving = false;
                self.notices.success("Parish settings saved successfully!");
                self.load();
            }
            SettingsMessage::SaveFailed(e) => {
                error!("Error saving parish settings: {}", e);
                self.notices.error("Failed to save parish settings");
                self.saving = false;
            }
            SettingsMessage::Invited(outcome) => {
                self.inviting = false;
                self.notices.success(outcome.message);
                self.invite.reset();
                if outcome.user_exists
                    && let Some(parish_id) = self.parish_id()
                {
                    self.load_members(parish_id);
                }
            }
            SettingsMessage::InviteFailed(e) => {
                error!("Error inviting member: {}", e);
                self.notices.error("Failed to invite member");
                self.inviting = false;
            }
            SettingsMessage::MemberRemoved(user_id) => {
                self.busy_members.remove(&user_id);
                self.notices.success("Member removed successfully");
                if let Some(parish_id) = self.parish_id() {
                    self.load_members(parish_id);
                }
            }
            SettingsMessage::RemoveFailed { user_id, error } => {
                error!("Error removing member {}: {}", user_id, error);
                self.busy_members.remove(&user_id);
                self.notices.error("Failed to remove member");
            }
            SettingsMessage::RoleUpdated(user_id) => {
                self.busy_members.remove(&user_id);
                self.notices.success("Member role updated successfully");
                if let Some(parish_id) = self.parish_id() {
                    self.load_members(parish_id);
                }
            }
            SettingsMessage::RoleUpdateFailed { user_id, error } => {
                error!("Error updating role for {}: {}", user_id, error);
                self.busy_members.remove(&user_id);
                self.notices.error("Failed to update member role");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::NoticeLevel;
    use crate::service::fake::{FakeParishService, sample_member, sample_parish};

    fn settings(fake: &Arc<FakeParishService>) -> ParishSettings {
        ParishSettings::new(fake.clone(), Handle::current())
    }

    async fn settle(settings: &mut ParishSettings) {
        while settings.in_flight() > 0 {
            settings.next_message().await;
        }
    }

    async fn loaded(fake: &Arc<FakeParishService>) -> ParishSettings {
        let mut s = settings(fake);
        s.load();
        settle(&mut s).await;
        s
    }

    #[tokio::test]
    async fn test_load_populates_form_and_members() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let s = loaded(&fake).await;

        assert_eq!(s.form.name, "St. Mary's Catholic Church");
        assert_eq!(s.form.city, "New York");
        assert_eq!(s.members.len(), 2);
        assert!(!s.loading);
        assert!(!s.loading_members);
    }

    #[tokio::test]
    async fn test_load_without_parish_skips_members() {
        let fake = Arc::new(FakeParishService::new(None));
        let s = loaded(&fake).await;

        assert!(s.parish.is_none());
        assert_eq!(fake.calls.lock().unwrap().parish_members, 0);
    }

    #[tokio::test]
    async fn test_members_load_failure_keeps_roster() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut s = loaded(&fake).await;
        fake.fail("parish_members");

        s.load_members("parish-1".to_string());
        assert!(s.loading_members);
        settle(&mut s).await;

        assert!(!s.loading_members);
        assert_eq!(s.members.len(), 2);
        assert_eq!(s.members[0].user_id, "u-admin");
        assert_eq!(s.notices.last().unwrap().message, "Failed to load parish members");
    }

    #[tokio::test]
    async fn test_parish_gone_clears_cached_state() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut s = loaded(&fake).await;
        let target = s.members[1].clone();
        s.request_remove(&target);

        *fake.parish.lock().unwrap() = None;
        s.load();
        settle(&mut s).await;

        assert!(s.parish.is_none());
        assert!(s.members.is_empty());
        assert_eq!(s.form, ParishForm::default());
        assert!(s.pending_removal.is_none());
    }

    #[tokio::test]
    async fn test_load_failure_notifies() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        fake.fail("current_parish");
        let s = loaded(&fake).await;

        assert!(s.parish.is_none());
        assert!(!s.loading);
        assert_eq!(s.notices.last().unwrap().message, "Failed to load parish data");
    }

    #[tokio::test]
    async fn test_save_with_blank_name_makes_no_call() {
        let mut parish = sample_parish();
        parish.name = String::new();
        parish.city = "NYC".to_string();
        parish.state = "NY".to_string();
        let fake = Arc::new(FakeParishService::new(Some(parish)));
        let mut s = loaded(&fake).await;

        s.save();

        assert_eq!(s.in_flight(), 0);
        assert!(!s.saving);
        assert!(fake.calls.lock().unwrap().updates.is_empty());
        let notice = s.notices.last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Please fill in all fields");
    }

    #[tokio::test]
    async fn test_save_with_whitespace_field_makes_no_call() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut s = loaded(&fake).await;

        s.form.state = "   ".to_string();
        s.save();
        s.form.state = "NY".to_string();
        s.form.city = String::new();
        s.save();

        assert!(fake.calls.lock().unwrap().updates.is_empty());
    }

    #[tokio::test]
    async fn test_save_without_parish_warns() {
        let fake = Arc::new(FakeParishService::new(None));
        let mut s = loaded(&fake).await;
        s.form = ParishForm {
            name: "St. Anne".to_string(),
            city: "Boston".to_string(),
            state: "MA".to_string(),
        };

        s.save();

        assert!(fake.calls.lock().unwrap().updates.is_empty());
        assert_eq!(s.notices.last().unwrap().message, "No parish selected");
    }

    #[tokio::test]
    async fn test_successful_save_reloads_once() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut s = loaded(&fake).await;
        s.form.name = "St. Mary of the Angels".to_string();

        s.save();
        assert!(s.saving);
        settle(&mut s).await;

        let calls = fake.calls.lock().unwrap();
        assert_eq!(calls.updates.len(), 1);
        assert_eq!(calls.updates[0].0, "parish-1");
        assert_eq!(calls.updates[0].1.name, "St. Mary of the Angels");
        // initial load plus exactly one reload
        assert_eq!(calls.current_parish, 2);
        assert_eq!(calls.parish_members, 2);
        drop(calls);

        assert!(!s.saving);
        assert_eq!(s.parish.as_ref().unwrap().name, "St. Mary of the Angels");
        assert!(
            s.notices
                .iter()
                .any(|n| n.message == "Parish settings saved successfully!")
        );
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_and_skips_reload() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        fake.fail("update_parish");
        let mut s = loaded(&fake).await;
        s.form.city = "Brooklyn".to_string();

        s.save();
        settle(&mut s).await;

        assert_eq!(fake.calls.lock().unwrap().current_parish, 1);
        assert_eq!(s.form.city, "Brooklyn");
        assert!(!s.saving);
        assert_eq!(s.notices.last().unwrap().message, "Failed to save parish settings");
    }

    #[tokio::test]
    async fn test_invite_blank_email_makes_no_call() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut s = loaded(&fake).await;
        s.invite.email = "  ".to_string();

        s.invite();

        assert!(fake.calls.lock().unwrap().invites.is_empty());
        assert_eq!(s.notices.last().unwrap().message, "Please enter an email address");
    }

    #[tokio::test]
    async fn test_invite_existing_user_reloads_roster_once() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut s = loaded(&fake).await;
        s.invite.email = "deacon@stmary.org".to_string();
        s.invite.role = Role::Minister;

        s.invite();
        assert!(s.inviting);
        settle(&mut s).await;

        let calls = fake.calls.lock().unwrap();
        assert_eq!(calls.invites.len(), 1);
        assert_eq!(calls.invites[0].1, "deacon@stmary.org");
        assert_eq!(calls.invites[0].2, vec![Role::Minister]);
        assert_eq!(calls.parish_members, 2);
        drop(calls);

        assert_eq!(s.invite.email, "");
        assert_eq!(s.invite.role, Role::Member);
        assert!(!s.inviting);
        assert_eq!(s.notices.last().unwrap().message, "Added");
    }

    #[tokio::test]
    async fn test_invite_unknown_user_leaves_roster() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        *fake.invite_outcome.lock().unwrap() = InviteOutcome {
            message: "Invitation recorded".to_string(),
            user_exists: false,
        };
        let mut s = loaded(&fake).await;
        s.invite.email = "newcomer@example.org".to_string();

        s.invite();
        settle(&mut s).await;

        assert_eq!(fake.calls.lock().unwrap().parish_members, 1);
        assert_eq!(s.invite.email, "");
        assert_eq!(s.notices.last().unwrap().message, "Invitation recorded");
    }

    #[tokio::test]
    async fn test_invite_failure_keeps_input() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        fake.fail("invite_member");
        let mut s = loaded(&fake).await;
        s.invite.email = "deacon@stmary.org".to_string();

        s.invite();
        settle(&mut s).await;

        assert_eq!(s.invite.email, "deacon@stmary.org");
        assert!(!s.inviting);
        assert_eq!(s.notices.last().unwrap().message, "Failed to invite member");
    }

    #[tokio::test]
    async fn test_remove_cancelled_makes_no_call() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut s = loaded(&fake).await;
        let target = s.members[1].clone();

        s.request_remove(&target);
        let prompt = s.pending_removal.as_ref().unwrap();
        assert_eq!(
            prompt.message,
            "Are you sure you want to remove reader@stmary.org from the parish?"
        );

        s.resolve_remove(Decision::Cancel);

        assert!(s.pending_removal.is_none());
        assert_eq!(s.in_flight(), 0);
        assert!(fake.calls.lock().unwrap().removals.is_empty());
    }

    #[tokio::test]
    async fn test_remove_confirmed_calls_service_and_reloads() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut s = loaded(&fake).await;
        let target = s.members[1].clone();

        s.request_remove(&target);
        s.resolve_remove(Decision::Confirm);
        assert!(s.busy_members.contains("u-lector"));
        settle(&mut s).await;

        let calls = fake.calls.lock().unwrap();
        assert_eq!(calls.removals, vec![("parish-1".to_string(), "u-lector".to_string())]);
        assert_eq!(calls.parish_members, 2);
        drop(calls);

        assert!(s.busy_members.is_empty());
        assert_eq!(s.members.len(), 1);
        assert_eq!(s.notices.last().unwrap().message, "Member removed successfully");
    }

    #[tokio::test]
    async fn test_remove_failure_keeps_roster() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        fake.fail("remove_member");
        let mut s = loaded(&fake).await;
        let target = s.members[1].clone();

        s.request_remove(&target);
        s.resolve_remove(Decision::Confirm);
        settle(&mut s).await;

        assert!(s.busy_members.is_empty());
        assert_eq!(s.members.len(), 2);
        assert_eq!(fake.calls.lock().unwrap().parish_members, 1);
        let notice = s.notices.last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Failed to remove member");
    }

    #[tokio::test]
    async fn test_resolve_without_prompt_is_noop() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut s = loaded(&fake).await;

        s.resolve_remove(Decision::Confirm);

        assert!(fake.calls.lock().unwrap().removals.is_empty());
    }

    #[tokio::test]
    async fn test_update_role_replaces_role_set() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut s = loaded(&fake).await;
        let lector = s.members[1].clone();

        s.update_role(&lector, RolePreset::MakeAdmin);
        settle(&mut s).await;

        let calls = fake.calls.lock().unwrap();
        assert_eq!(calls.role_updates.len(), 1);
        assert_eq!(calls.role_updates[0].2, vec![Role::Admin]);
        drop(calls);

        assert_eq!(s.members[1].roles, vec![Role::Admin]);
        assert_eq!(s.notices.last().unwrap().message, "Member role updated successfully");
    }

    #[tokio::test]
    async fn test_disabled_preset_makes_no_call() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        let mut s = loaded(&fake).await;
        let admin = s.members[0].clone();
        let plain = sample_member("u-plain", "plain@stmary.org", &[Role::Member]);

        s.update_role(&admin, RolePreset::MakeAdmin);
        s.update_role(&plain, RolePreset::MakeMember);

        assert_eq!(s.in_flight(), 0);
        assert!(fake.calls.lock().unwrap().role_updates.is_empty());
    }

    #[tokio::test]
    async fn test_role_update_failure_leaves_roster() {
        let fake = Arc::new(FakeParishService::new(Some(sample_parish())));
        fake.fail("update_member_roles");
        let mut s = loaded(&fake).await;
        let lector = s.members[1].clone();

        s.update_role(&lector, RolePreset::MakeMember);
        settle(&mut s).await;

        assert_eq!(s.members[1].roles, vec![Role::Member, Role::Lector]);
        assert!(s.busy_members.is_empty());
        assert_eq!(s.notices.last().unwrap().message, "Failed to update member role");
    }
}
