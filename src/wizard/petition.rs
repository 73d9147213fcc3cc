//! Petition creation wizard.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{error, info};

use super::navigation::{NavAction, WizardStep, jump_enabled};
use crate::feedback::Notices;
use crate::models::{NewPetition, Petition, PetitionSummary, WizardState};
use crate::service::ParishService;

/// Languages petitions can be generated in.
pub const LANGUAGES: [&str; 4] = ["english", "spanish", "french", "latin"];

const DETAILS_STEP: usize = 0;
const CONTEXT_STEP: usize = 1;
const CONTENT_STEP: usize = 2;
const PRINT_STEP: usize = 3;

/// Results from the create task.
#[derive(Debug)]
pub enum WizardMessage {
    Created(Petition),
    CreateFailed(String),
}

/// What the app should do after a wizard interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    None,
    /// User finished; the wizard has already been reset.
    Completed(Petition),
}

pub struct PetitionWizard {
    service: Arc<dyn ParishService>,
    handle: Handle,
    tx: mpsc::UnboundedSender<WizardMessage>,
    rx: mpsc::UnboundedReceiver<WizardMessage>,
    in_flight: usize,
    steps: Vec<WizardStep>,

    pub current_step: usize,
    pub title: String,
    pub date: NaiveDate,
    /// Edited on the context step, copied into `state.context_data` when leaving it.
    pub context_name: String,
    pub state: WizardState,
    pub petition: Option<Petition>,
    /// Inputs `petition` was created from.
    created_from: Option<(NewPetition, WizardState)>,
    pub creating: bool,
    pub notices: Notices,
}

fn petition_steps() -> Vec<WizardStep> {
    vec![
        WizardStep::new(1, "Details", "Title, date and language"),
        WizardStep::new(2, "Liturgical Context", "Which celebration the petitions are for"),
        WizardStep::new(3, "Content", "Review and edit the petition text"),
        WizardStep::new(4, "Print", "Print or view the finished petitions"),
    ]
}

impl PetitionWizard {
    pub fn new(service: Arc<dyn ParishService>, handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            service,
            handle,
            tx,
            rx,
            in_flight: 0,
            steps: petition_steps(),
            current_step: DETAILS_STEP,
            title: String::new(),
            date: Local::now().date_naive(),
            context_name: String::new(),
            state: fresh_state(),
            petition: None,
            created_from: None,
            creating: false,
            notices: Notices::default(),
        }
    }

    pub fn steps(&self) -> &[WizardStep] {
        &self.steps
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_print_step(&self) -> bool {
        self.current_step == PRINT_STEP
    }

    /// Whether the current step's inputs allow moving forward.
    pub fn can_proceed(&self) -> bool {
        match self.current_step {
            DETAILS_STEP => !self.title.trim().is_empty() && !self.state.language.is_empty(),
            CONTEXT_STEP => !self.state.context_id.trim().is_empty(),
            CONTENT_STEP => !self.state.generated_content.trim().is_empty() && !self.creating,
            _ => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.current_step > DETAILS_STEP && !self.creating
    }

    /// Whether the created petition still matches the current inputs.
    pub fn is_saved(&self) -> bool {
        match (&self.petition, &self.created_from) {
            (Some(_), Some((draft, state))) => *draft == self.draft() && *state == self.state,
            _ => false,
        }
    }

    /// Label for the forward button on the current step.
    pub fn next_label(&self) -> &'static str {
        match self.current_step {
            CONTENT_STEP if !self.is_saved() => "Create Petition",
            _ => "Next",
        }
    }

    pub fn navigate(&mut self, action: NavAction) {
        match action {
            NavAction::Next => self.next(),
            NavAction::Previous => self.previous(),
            NavAction::JumpTo(index) => self.jump_to(index),
        }
    }

    pub fn next(&mut self) {
        if !self.can_proceed() {
            return;
        }
        match self.current_step {
            CONTEXT_STEP => {
                self.state.set_context_name(self.context_name.trim());
                self.current_step += 1;
            }
            // Unchanged inputs reuse the petition created earlier in this session.
            CONTENT_STEP if self.is_saved() => self.current_step = PRINT_STEP,
            CONTENT_STEP => {
                if let Some(stale) = self.petition.take() {
                    info!("Inputs changed after creating petition {}, creating again", stale.id);
                    self.created_from = None;
                }
                self.create();
            }
            _ => self.current_step += 1,
        }
    }

    pub fn previous(&mut self) {
        if self.can_go_back() {
            self.current_step -= 1;
        }
    }

    /// Revisit a completed step. Steps ahead of the current one are refused.
    pub fn jump_to(&mut self, index: usize) {
        if self.creating || index >= self.steps.len() || !jump_enabled(index, self.current_step) {
            return;
        }
        self.current_step = index;
    }

    fn draft(&self) -> NewPetition {
        NewPetition {
            title: self.title.trim().to_string(),
            date: self.date,
            language: self.state.language.clone(),
            context_id: self.state.context_id.trim().to_string(),
            content: self.state.generated_content.clone(),
        }
    }

    fn create(&mut self) {
        let petition = self.draft();
        self.created_from = Some((petition.clone(), self.state.clone()));

        self.creating = true;
        self.in_flight += 1;
        let service = self.service.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let msg = match service.create_petition(&petition).await {
                Ok(created) => WizardMessage::Created(created),
                Err(e) => WizardMessage::CreateFailed(e.to_string()),
            };
            let _ = tx.send(msg);
        });
    }

    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
            changed = true;
        }
        changed
    }

    #[cfg(test)]
    pub async fn next_message(&mut self) {
        if let Some(msg) = self.rx.recv().await {
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: WizardMessage) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.creating = false;

        match msg {
            WizardMessage::Created(petition) => {
                info!("Created petition {} ({})", petition.title, petition.id);
                self.petition = Some(petition);
                self.current_step = PRINT_STEP;
                self.notices.success("Petition created");
            }
            WizardMessage::CreateFailed(e) => {
                error!("Error creating petition: {}", e);
                self.created_from = None;
                self.notices.error("Failed to create petition");
            }
        }
    }

    /// Summary for the print step, once a petition exists.
    pub fn summary(&self) -> Option<PetitionSummary> {
        self.petition
            .as_ref()
            .map(|petition| PetitionSummary::new(petition, &self.state))
    }

    /// Finish the wizard, discarding its state.
    pub fn complete(&mut self) -> WizardEvent {
        match self.petition.take() {
            Some(petition) => {
                self.reset();
                WizardEvent::Completed(petition)
            }
            None => WizardEvent::None,
        }
    }

    /// Start over with empty inputs.
    pub fn reset(&mut self) {
        self.current_step = DETAILS_STEP;
        self.title.clear();
        self.date = Local::now().date_naive();
        self.context_name.clear();
        self.state = fresh_state();
        self.petition = None;
        self.created_from = None;
    }
}

fn fresh_state() -> WizardState {
    WizardState {
        language: LANGUAGES[0].to_string(),
        ..Default::default()
    }
}
