//! Step indicator, progress bar and forward/back buttons.

use eframe::egui::{self, Align, Layout, ProgressBar, RichText, Ui};
use egui_phosphor::regular::{CARET_LEFT, CARET_RIGHT};

use super::components::colors;
use crate::wizard::{NavAction, StepStatus, WizardNav};

/// Show the navigation bar.
///
/// Returns the action the user picked, if any.
pub fn show(ui: &mut Ui, nav: &WizardNav) -> Option<NavAction> {
    let mut action = None;
    let progress = nav.progress();

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(nav.step_label()).size(16.0).strong());
                ui.label(RichText::new(nav.current_title()).weak());
            });
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(RichText::new(format!("{}% Complete", progress.round() as u32)).weak());
            });
        });

        ui.add_space(8.0);
        ui.add(ProgressBar::new(progress / 100.0).desired_height(8.0));
        ui.add_space(8.0);

        ui.horizontal_wrapped(|ui| {
            for (index, step) in nav.steps.iter().enumerate() {
                let label = format!("{}. {}", index + 1, step.title);
                let text = match nav.status(index) {
                    StepStatus::Current => RichText::new(label).strong(),
                    StepStatus::Completed => RichText::new(label).color(colors::SUCCESS),
                    StepStatus::Upcoming => RichText::new(label).weak(),
                };
                let button = egui::Button::new(text).selected(index == nav.current_step);
                if ui
                    .add_enabled(nav.jump_enabled(index), button)
                    .on_hover_text(step.description.as_str())
                    .clicked()
                {
                    action = Some(NavAction::JumpTo(index));
                }
            }
        });

        ui.add_space(10.0);
        ui.separator();

        ui.horizontal(|ui| {
            let previous = format!("{CARET_LEFT} {}", nav.previous_label);
            if ui.add_enabled(nav.can_go_back, egui::Button::new(previous)).clicked() {
                action = Some(NavAction::Previous);
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let next = format!("{} {CARET_RIGHT}", nav.next_label);
                if ui.add_enabled(nav.can_proceed, egui::Button::new(next)).clicked() {
                    action = Some(NavAction::Next);
                }
            });
        });
    });

    action
}
