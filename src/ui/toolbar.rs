use crate::app::GanttApp;
use crate::model::ResourceFilter;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut GanttApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Open CSV...      Ctrl+O", icons::FOLDER_OPEN)).clicked() {
                ui.close_menu();
                app.open_csv();
            }
            if ui.button(format!("{}  Export CSV...    Ctrl+S", icons::EXPORT)).clicked() {
                ui.close_menu();
                app.export_csv();
            }
            ui.separator();
            if ui.button(format!("{}  Open Settings Folder", icons::GEAR)).clicked() {
                ui.close_menu();
                app.open_settings_folder();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Zoom In          Ctrl+=").clicked() {
                app.project.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Zoom Out        Ctrl+-").clicked() {
                app.project.zoom_out();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Collapse All").clicked() {
                app.project.collapse_all();
                ui.close_menu();
            }
            if ui.button("  Expand All").clicked() {
                app.project.expand_all();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("CSV Columns").clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();
        show_resource_filter(app, ui);

        ui.separator();
        if ui
            .button(icons::MAGNIFYING_GLASS_MINUS)
            .on_hover_text("Zoom out")
            .clicked()
        {
            app.project.zoom_out();
        }
        ui.label(RichText::new(format!("{:.0}%", app.project.zoom.percent())).size(11.0));
        if ui
            .button(icons::MAGNIFYING_GLASS_PLUS)
            .on_hover_text("Zoom in")
            .clicked()
        {
            app.project.zoom_in();
        }

        ui.separator();
        if ui.button(icons::ARROWS_IN_LINE_VERTICAL).on_hover_text("Collapse all").clicked() {
            app.project.collapse_all();
        }
        if ui.button(icons::ARROWS_OUT_LINE_VERTICAL).on_hover_text("Expand all").clicked() {
            app.project.expand_all();
        }

        // Right-aligned schedule name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.project.dirty { " (modified)" } else { "" };
            ui.label(
                RichText::new(format!("{}{}", app.project.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}

fn show_resource_filter(app: &mut GanttApp, ui: &mut Ui) {
    ui.label(RichText::new("Resource").size(11.0).color(theme::TEXT_SECONDARY));
    let mut selected = app.project.resource_filter.clone();
    egui::ComboBox::from_id_salt("resource_filter")
        .selected_text(selected.label().to_string())
        .width(140.0)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, ResourceFilter::All, "All");
            for resource in app.project.resources() {
                let option = ResourceFilter::Only(resource.clone());
                ui.selectable_value(&mut selected, option, resource);
            }
        });
    if selected != app.project.resource_filter {
        tracing::debug!(filter = %selected, "resource filter changed");
        app.project.set_filter(selected);
    }
}
