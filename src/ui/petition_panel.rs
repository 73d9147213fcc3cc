//! Petition wizard panel.

use eframe::egui::{self, RichText, Ui};

use super::app::App;
use super::components::{back_button, panel_header};
use super::{print_step, wizard_nav};
use crate::wizard::petition::LANGUAGES;
use crate::wizard::print_step::{detail_url, print_url};
use crate::wizard::{PrintAction, WizardEvent, WizardNav};

/// Show the petition wizard.
///
/// Returns `true` if the user left the panel (back button or completion).
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut leave = back_button(ui);
    panel_header(ui, "New Petition", "Create petitions for an upcoming liturgy");

    let nav = WizardNav::new(app.wizard.steps(), app.wizard.current_step)
        .can_proceed(app.wizard.can_proceed())
        .can_go_back(app.wizard.can_go_back())
        .next_label(app.wizard.next_label());
    if let Some(action) = wizard_nav::show(ui, &nav) {
        app.wizard.navigate(action);
    }

    ui.add_space(20.0);

    egui::ScrollArea::vertical().id_salt("petition_scroll").show(ui, |ui| {
        match app.wizard.current_step {
            0 => show_details_step(app, ui),
            1 => show_context_step(app, ui),
            2 => show_content_step(app, ui),
            _ => {
                if show_print_step(app, ui) {
                    leave = true;
                }
            }
        }
    });

    leave
}

fn show_details_step(app: &mut App, ui: &mut Ui) {
    let wizard = &mut app.wizard;

    egui::Grid::new("petition_details_grid")
        .num_columns(2)
        .spacing([20.0, 10.0])
        .show(ui, |ui| {
            ui.label("Title:");
            ui.add(
                egui::TextEdit::singleline(&mut wizard.title)
                    .desired_width(320.0)
                    .hint_text("Sunday Petitions"),
            );
            ui.end_row();

            ui.label("Date:");
            ui.add(egui_extras::DatePickerButton::new(&mut wizard.date).id_salt("petition_date"));
            ui.end_row();

            ui.label("Language:");
            egui::ComboBox::from_id_salt("petition_language")
                .width(200.0)
                .selected_text(wizard.state.language.as_str())
                .show_ui(ui, |ui| {
                    for language in LANGUAGES {
                        ui.selectable_value(&mut wizard.state.language, language.to_string(), language);
                    }
                });
            ui.end_row();
        });
}

fn show_context_step(app: &mut App, ui: &mut Ui) {
    let wizard = &mut app.wizard;

    ui.label("Which celebration are these petitions for?");
    ui.add_space(10.0);

    egui::Grid::new("petition_context_grid")
        .num_columns(2)
        .spacing([20.0, 10.0])
        .show(ui, |ui| {
            ui.label("Context ID:");
            ui.add(
                egui::TextEdit::singleline(&mut wizard.state.context_id)
                    .desired_width(260.0)
                    .hint_text("advent-2"),
            );
            ui.end_row();

            ui.label("Name:");
            ui.add(
                egui::TextEdit::singleline(&mut wizard.context_name)
                    .desired_width(320.0)
                    .hint_text("Second Sunday of Advent"),
            );
            ui.end_row();
        });
}

fn show_content_step(app: &mut App, ui: &mut Ui) {
    let wizard = &mut app.wizard;

    ui.label("Review the petition text before it is saved.");
    ui.add_space(10.0);
    ui.add_enabled(
        !wizard.creating,
        egui::TextEdit::multiline(&mut wizard.state.generated_content)
            .desired_rows(14)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!(
                "{} characters",
                wizard.state.generated_content.chars().count()
            ))
            .weak(),
        );
        if wizard.creating {
            ui.spinner();
            ui.label("Creating petition...");
        }
    });
}

/// Returns `true` once the wizard is completed.
fn show_print_step(app: &mut App, ui: &mut Ui) -> bool {
    let Some(summary) = app.wizard.summary() else {
        ui.label("No petition has been created yet.");
        return false;
    };
    let Some(petition_id) = app.wizard.petition.as_ref().map(|p| p.id.clone()) else {
        return false;
    };
    let base = app.config.server.base().to_string();

    match print_step::show(ui, &summary) {
        Some(PrintAction::Print) => {
            if open_in_browser(app, ui, print_url(&base, &petition_id)) {
                app.notices.info("Opened print view in your browser");
            }
            false
        }
        Some(PrintAction::View) => {
            open_in_browser(app, ui, detail_url(&base, &petition_id));
            false
        }
        Some(PrintAction::Previous) => {
            app.wizard.previous();
            false
        }
        Some(PrintAction::Complete) => match app.wizard.complete() {
            WizardEvent::Completed(petition) => {
                tracing::info!("Petition wizard completed for {}", petition.id);
                open_in_browser(app, ui, detail_url(&base, &petition.id));
                true
            }
            WizardEvent::None => false,
        },
        None => false,
    }
}

fn open_in_browser(app: &mut App, ui: &Ui, url: crate::Result<String>) -> bool {
    match url {
        Ok(url) => {
            ui.ctx().open_url(egui::OpenUrl::new_tab(url));
            true
        }
        Err(e) => {
            tracing::error!("Failed to build petition link: {}", e);
            app.notices.error("Could not open the petition page. Check the server URL in settings.");
            false
        }
    }
}
