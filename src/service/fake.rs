//! In-memory `ParishService` for controller tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::ParishService;
use crate::error::{AppError, Result};
use crate::models::{InviteOutcome, NewPetition, Parish, ParishMember, ParishUpdate, Petition, Role, UserProfile};

/// Call log and scripted responses.
#[derive(Default)]
pub struct Calls {
    pub current_parish: usize,
    pub parish_members: usize,
    pub updates: Vec<(String, ParishUpdate)>,
    pub invites: Vec<(String, String, Vec<Role>)>,
    pub removals: Vec<(String, String)>,
    pub role_updates: Vec<(String, String, Vec<Role>)>,
    pub petitions: Vec<NewPetition>,
}

pub struct FakeParishService {
    pub parish: Mutex<Option<Parish>>,
    pub members: Mutex<Vec<ParishMember>>,
    pub invite_outcome: Mutex<InviteOutcome>,
    /// Operation names that should fail, e.g. `"update_parish"`.
    pub failing: Mutex<Vec<&'static str>>,
    pub calls: Mutex<Calls>,
}

pub fn sample_parish() -> Parish {
    Parish {
        id: "parish-1".to_string(),
        name: "St. Mary's Catholic Church".to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        created_at: Utc.with_ymd_and_hms(2023, 5, 1, 9, 0, 0).unwrap(),
    }
}

pub fn sample_member(user_id: &str, email: &str, roles: &[Role]) -> ParishMember {
    ParishMember {
        user_id: user_id.to_string(),
        roles: roles.to_vec(),
        users: Some(UserProfile {
            id: user_id.to_string(),
            email: Some(email.to_string()),
            full_name: None,
            created_at: None,
        }),
    }
}

impl FakeParishService {
    pub fn new(parish: Option<Parish>) -> Self {
        Self {
            parish: Mutex::new(parish),
            members: Mutex::new(vec![
                sample_member("u-admin", "pastor@stmary.org", &[Role::Admin]),
                sample_member("u-lector", "reader@stmary.org", &[Role::Member, Role::Lector]),
            ]),
            invite_outcome: Mutex::new(InviteOutcome {
                message: "Added".to_string(),
                user_exists: true,
            }),
            failing: Mutex::new(Vec::new()),
            calls: Mutex::new(Calls::default()),
        }
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().push(operation);
    }

    fn check(&self, operation: &'static str) -> Result<()> {
        if self.failing.lock().unwrap().contains(&operation) {
            return Err(AppError::api(500, format!("{operation} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl ParishService for FakeParishService {
    async fn current_parish(&self) -> Result<Option<Parish>> {
        self.calls.lock().unwrap().current_parish += 1;
        self.check("current_parish")?;
        Ok(self.parish.lock().unwrap().clone())
    }

    async fn parish_members(&self, _parish_id: &str) -> Result<Vec<ParishMember>> {
        self.calls.lock().unwrap().parish_members += 1;
        self.check("parish_members")?;
        Ok(self.members.lock().unwrap().clone())
    }

    async fn update_parish(&self, parish_id: &str, update: &ParishUpdate) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .updates
            .push((parish_id.to_string(), update.clone()));
        self.check("update_parish")?;
        if let Some(parish) = self.parish.lock().unwrap().as_mut() {
            parish.name = update.name.clone();
            parish.city = update.city.clone();
            parish.state = update.state.clone();
        }
        Ok(())
    }

    async fn invite_member(&self, parish_id: &str, email: &str, roles: &[Role]) -> Result<InviteOutcome> {
        self.calls
            .lock()
            .unwrap()
            .invites
            .push((parish_id.to_string(), email.to_string(), roles.to_vec()));
        self.check("invite_member")?;
        Ok(self.invite_outcome.lock().unwrap().clone())
    }

    async fn remove_member(&self, parish_id: &str, user_id: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .removals
            .push((parish_id.to_string(), user_id.to_string()));
        self.check("remove_member")?;
        self.members.lock().unwrap().retain(|m| m.user_id != user_id);
        Ok(())
    }

    async fn update_member_roles(&self, parish_id: &str, user_id: &str, roles: &[Role]) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .role_updates
            .push((parish_id.to_string(), user_id.to_string(), roles.to_vec()));
        self.check("update_member_roles")?;
        if let Some(member) = self.members.lock().unwrap().iter_mut().find(|m| m.user_id == user_id) {
            member.roles = roles.to_vec();
        }
        Ok(())
    }

    async fn create_petition(&self, petition: &NewPetition) -> Result<Petition> {
        let count = {
            let mut calls = self.calls.lock().unwrap();
            calls.petitions.push(petition.clone());
            calls.petitions.len()
        };
        self.check("create_petition")?;
        Ok(Petition {
            id: format!("petition-{count}"),
            title: petition.title.clone(),
            date: petition.date,
            language: Some(petition.language.clone()),
            content: Some(petition.content.clone()),
        })
    }

    async fn ping(&self) -> Result<()> {
        self.check("ping")
    }
}
