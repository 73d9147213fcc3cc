//! Completion banner, print options and summary for a created petition.

use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_phosphor::regular::{ARROW_LEFT, CHECK, EYE, PRINTER};

use super::components::colors;
use crate::models::PetitionSummary;
use crate::wizard::PrintAction;

/// Show the print step.
///
/// Returns the button the user clicked, if any.
pub fn show(ui: &mut Ui, summary: &PetitionSummary) -> Option<PrintAction> {
    let mut action = None;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(
            RichText::new(format!("{CHECK} Petitions Complete!"))
                .size(20.0)
                .color(colors::SUCCESS),
        );
        ui.label(RichText::new("Your petitions have been successfully created and are ready for use.").weak());
        ui.add_space(8.0);
        ui.label(RichText::new(summary.title.as_str()).strong());
        ui.horizontal(|ui| {
            ui.label(format!("Date: {}", summary.date));
            ui.add_space(12.0);
            ui.label(format!("Language: {}", summary.language));
            ui.add_space(12.0);
            ui.label(format!("Context: {}", summary.context));
        });
    });

    ui.add_space(12.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new("Print & Export Options").strong());
        ui.add_space(6.0);

        if ui.button(format!("{PRINTER}  Print Petitions")).clicked() {
            action = Some(PrintAction::Print);
        }
        ui.label(RichText::new("Open print-friendly view for liturgical use").weak().small());
        ui.add_space(6.0);

        if ui.button(format!("{EYE}  View Petition Details")).clicked() {
            action = Some(PrintAction::View);
        }
        ui.label(RichText::new("See full petition with context and options").weak().small());
    });

    ui.add_space(12.0);

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new("Summary").strong());
        ui.add_space(6.0);

        egui::Grid::new("petition_summary_grid")
            .num_columns(2)
            .spacing([40.0, 6.0])
            .show(ui, |ui| {
                ui.label("Title:");
                ui.label(summary.title.as_str());
                ui.end_row();

                ui.label("Date:");
                ui.label(summary.date.as_str());
                ui.end_row();

                ui.label("Language:");
                ui.label(summary.language.as_str());
                ui.end_row();

                ui.label("Context:");
                ui.label(summary.context.as_str());
                ui.end_row();

                ui.label("Content Length:");
                ui.label(format!("{} characters", summary.content_length));
                ui.end_row();
            });
    });

    ui.add_space(16.0);

    ui.horizontal(|ui| {
        if ui.button(format!("{ARROW_LEFT} Previous")).clicked() {
            action = Some(PrintAction::Previous);
        }
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("Complete & View Petition").clicked() {
                action = Some(PrintAction::Complete);
            }
        });
    });

    action
}
