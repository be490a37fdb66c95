use crate::app::GanttApp;
use crate::model::TaskField;
use crate::ui::theme;
use egui::{Context, RichText, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut GanttApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Outline Gantt").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Gantt charts for outline-level CSV schedules,");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Render the column reference for CSV sources.
pub fn show_csv_help_dialog(app: &mut GanttApp, ctx: &Context) {
    let mut open = true;
    Window::new("CSV Columns")
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.label("Recognised headers (case and spacing are ignored):");
            ui.add_space(4.0);
            egui::Grid::new("csv_help_grid")
                .num_columns(2)
                .striped(true)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for field in TaskField::all() {
                        ui.label(RichText::new(field.label()).strong());
                        ui.label(RichText::new(field_hint(*field)).color(theme::TEXT_SECONDARY));
                        ui.end_row();
                    }
                });
            ui.add_space(6.0);
            ui.label(
                RichText::new("An ID column is required. Other columns are kept and exported unchanged.")
                    .size(11.0)
                    .color(theme::TEXT_DIM),
            );
        });
    if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_csv_help = false;
    }
}

fn field_hint(field: TaskField) -> &'static str {
    match field {
        TaskField::OutlineLevel => "1 for top level; rows nest under the row above",
        TaskField::Id => "numeric id referenced by predecessors",
        TaskField::Name => "task name",
        TaskField::Start | TaskField::Finish => "date, e.g. 2024-01-10 or 1/10/2024",
        TaskField::PercentComplete => "0 to 100",
        TaskField::Predecessors => "e.g. 3FS+2 days, 4SS",
        TaskField::ResourceNames => "used by the resource filter",
        TaskField::Notes => "shown in the bar tooltip",
    }
}
