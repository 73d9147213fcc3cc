//! Step indicator and forward/back rules shared by every wizard.
//!
//! Nothing here knows what a step does; the caller owns the step list and
//! decides when moving forward or back is allowed.

/// One entry in a wizard's step list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardStep {
    pub id: u32,
    pub title: String,
    pub description: String,
}

impl WizardStep {
    pub fn new(id: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Where a step sits relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// What the user asked the navigation bar to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Previous,
    JumpTo(usize),
}

/// Inputs for rendering the navigation bar.
#[derive(Debug, Clone)]
pub struct WizardNav<'a> {
    pub steps: &'a [WizardStep],
    pub current_step: usize,
    pub can_proceed: bool,
    pub can_go_back: bool,
    pub next_label: &'a str,
    pub previous_label: &'a str,
}

impl<'a> WizardNav<'a> {
    pub fn new(steps: &'a [WizardStep], current_step: usize) -> Self {
        Self {
            steps,
            current_step,
            can_proceed: false,
            can_go_back: false,
            next_label: "Next",
            previous_label: "Previous",
        }
    }

    pub fn can_proceed(mut self, enabled: bool) -> Self {
        self.can_proceed = enabled;
        self
    }

    pub fn can_go_back(mut self, enabled: bool) -> Self {
        self.can_go_back = enabled;
        self
    }

    pub fn next_label(mut self, label: &'a str) -> Self {
        self.next_label = label;
        self
    }

    pub fn previous_label(mut self, label: &'a str) -> Self {
        self.previous_label = label;
        self
    }

    /// Progress through the wizard in percent.
    pub fn progress(&self) -> f32 {
        progress_percent(self.current_step, self.steps.len())
    }

    /// "Step 2 of 4".
    pub fn step_label(&self) -> String {
        format!("Step {} of {}", self.current_step + 1, self.steps.len())
    }

    pub fn current_title(&self) -> &str {
        self.steps
            .get(self.current_step)
            .map(|s| s.title.as_str())
            .unwrap_or_default()
    }

    pub fn status(&self, index: usize) -> StepStatus {
        step_status(index, self.current_step)
    }

    pub fn jump_enabled(&self, index: usize) -> bool {
        jump_enabled(index, self.current_step)
    }
}

/// `current / (total - 1) * 100`, clamped to `[0, 100]`.
///
/// A single-step wizard is always complete; an empty one never is.
pub fn progress_percent(current: usize, total: usize) -> f32 {
    match total {
        0 => 0.0,
        1 => 100.0,
        _ => (current as f32 / (total - 1) as f32 * 100.0).clamp(0.0, 100.0),
    }
}

/// Completed steps can be revisited; later steps cannot be skipped to.
pub fn jump_enabled(index: usize, current: usize) -> bool {
    index <= current
}

pub fn step_status(index: usize, current: usize) -> StepStatus {
    use std::cmp::Ordering;

    match index.cmp(&current) {
        Ordering::Less => StepStatus::Completed,
        Ordering::Equal => StepStatus::Current,
        Ordering::Greater => StepStatus::Upcoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(n: u32) -> Vec<WizardStep> {
        (0..n)
            .map(|i| WizardStep::new(i, format!("Step {i}"), ""))
            .collect()
    }

    #[test]
    fn test_progress_linear_in_step() {
        assert_eq!(progress_percent(0, 5), 0.0);
        assert_eq!(progress_percent(1, 5), 25.0);
        assert_eq!(progress_percent(2, 5), 50.0);
        assert_eq!(progress_percent(4, 5), 100.0);
    }

    #[test]
    fn test_progress_clamped() {
        assert_eq!(progress_percent(9, 4), 100.0);
    }

    #[test]
    fn test_progress_degenerate_step_counts() {
        assert_eq!(progress_percent(0, 1), 100.0);
        assert_eq!(progress_percent(0, 0), 0.0);
    }

    #[test]
    fn test_jump_forward_disabled() {
        for current in 0..4 {
            for index in 0..4 {
                assert_eq!(jump_enabled(index, current), index <= current);
            }
        }
    }

    #[test]
    fn test_step_status() {
        assert_eq!(step_status(0, 2), StepStatus::Completed);
        assert_eq!(step_status(2, 2), StepStatus::Current);
        assert_eq!(step_status(3, 2), StepStatus::Upcoming);
    }

    #[test]
    fn test_nav_defaults_and_labels() {
        let list = steps(4);
        let nav = WizardNav::new(&list, 1);
        assert!(!nav.can_proceed);
        assert!(!nav.can_go_back);
        assert_eq!(nav.next_label, "Next");
        assert_eq!(nav.previous_label, "Previous");
        assert_eq!(nav.step_label(), "Step 2 of 4");
        assert_eq!(nav.current_title(), "Step 1");
    }

    #[test]
    fn test_nav_current_title_out_of_range() {
        let list = steps(2);
        assert_eq!(WizardNav::new(&list, 7).current_title(), "");
    }

    #[test]
    fn test_nav_builder_overrides() {
        let list = steps(3);
        let nav = WizardNav::new(&list, 2)
            .can_proceed(true)
            .can_go_back(true)
            .next_label("Create Petition")
            .previous_label("Back");
        assert!(nav.can_proceed && nav.can_go_back);
        assert_eq!(nav.next_label, "Create Petition");
        assert_eq!(nav.progress(), 100.0);
    }
}
