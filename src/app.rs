use std::path::{Path, PathBuf};

use crate::config::SettingsStore;
use crate::model::{Project, RenderOutcome};
use crate::ui;
use crate::ui::gantt_chart::ChartAction;
use crate::ui::task_editor::{EditorAction, TaskEditorState};
use crate::ui::task_table::TaskTableAction;

const SAMPLE_SCHEDULE: &str = include_str!("../assets/sample_schedule.csv");

/// Main application state.
pub struct GanttApp {
    pub project: Project,
    pub settings: SettingsStore,
    pub file_path: Option<PathBuf>,
    pub editor: Option<TaskEditorState>,

    // Dialog state
    pub show_about: bool,
    pub show_csv_help: bool,

    // Status message
    pub status_message: String,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: SettingsStore, initial: Option<PathBuf>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        // Ctrl+Plus / Ctrl+Minus drive the timeline zoom instead of the UI scale.
        cc.egui_ctx.options_mut(|o| o.zoom_with_keyboard = false);
        ui::theme::apply_theme(&cc.egui_ctx);

        let mut app = Self {
            project: Self::sample_project(),
            settings,
            file_path: None,
            editor: None,
            show_about: false,
            show_csv_help: false,
            status_message: "Ready".to_string(),
        };
        if let Some(path) = initial {
            app.load_csv(&path);
        }
        app
    }

    /// Bundled demonstration schedule.
    fn sample_project() -> Project {
        let mut project = Project::default();
        match crate::io::parse_source(SAMPLE_SCHEDULE) {
            Ok(source) => project.load("Sample Schedule", source),
            Err(e) => tracing::warn!("bundled sample schedule did not parse: {e}"),
        }
        project
    }

    // --- File operations ---

    fn file_dialog(&self) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new().add_filter("CSV Files", &["csv", "txt"]);
        match &self.settings.settings.last_directory {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    fn remember_directory(&mut self, path: &Path) {
        if let Some(dir) = path.parent() {
            self.settings.settings.last_directory = Some(dir.to_path_buf());
            self.settings.save_or_warn();
        }
    }

    pub fn open_csv(&mut self) {
        // Guard: unsaved edits are lost on reload
        if self.project.dirty {
            let confirm = rfd::MessageDialog::new()
                .set_title("Open CSV")
                .set_description("This will replace the current schedule and discard your edits. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = self.file_dialog().pick_file() {
            self.load_csv(&path);
        }
    }

    pub fn load_csv(&mut self, path: &Path) {
        match crate::io::import_csv(path) {
            Ok(source) => {
                let name = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("Imported Schedule")
                    .to_string();
                self.project.load(name, source);
                self.file_path = Some(path.to_path_buf());
                self.editor = None;
                self.remember_directory(path);
                self.status_message = format!("Loaded {} tasks", self.project.store.len());
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "CSV import failed: {e}");
                self.status_message = format!("CSV import failed: {}", e);
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.project.store.is_empty() {
            self.status_message = "Nothing to export: schedule has no tasks".to_string();
            return;
        }

        let default_name = self
            .file_path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}.csv", self.project.name));
        if let Some(path) = self.file_dialog().set_file_name(&default_name).save_file() {
            match crate::io::export_csv(&self.project.store, &path) {
                Ok(count) => {
                    self.project.dirty = false;
                    self.file_path = Some(path.clone());
                    self.remember_directory(&path);
                    self.status_message = format!("Exported {} tasks to CSV", count);
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), "CSV export failed: {e}");
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    pub fn open_settings_folder(&mut self) {
        let dir = self.settings.dir().to_path_buf();
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|_| open::that(&dir)) {
            tracing::warn!(dir = %dir.display(), "could not open settings folder: {e}");
            self.status_message = format!("Could not open {}: {}", dir.display(), e);
        }
    }

    // --- Task operations ---

    pub fn edit_task(&mut self, index: usize) {
        if let Some(task) = self.project.store.get(index) {
            let today = chrono::Local::now().date_naive();
            self.editor = Some(TaskEditorState::open(index, task, today));
        }
    }

    /// Ask for confirmation, then remove the task and its descendants.
    /// Declining leaves everything, including an open editor, untouched.
    pub fn delete_task(&mut self, index: usize) {
        let confirm = rfd::MessageDialog::new()
            .set_title("Delete Task")
            .set_description("Are you sure you want to delete this task?")
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        if confirm != rfd::MessageDialogResult::Yes {
            return;
        }

        let removed = self.project.delete_task(index);
        // Indices shift after a delete.
        self.editor = None;
        self.status_message = match removed.len() {
            0 => "Nothing deleted".to_string(),
            1 => "Task deleted".to_string(),
            n => format!("Deleted {} tasks", n),
        };
    }

    fn apply_editor(&mut self, state: &TaskEditorState) {
        if self.project.apply_edit(state.index, &state.edit) {
            self.status_message = format!("Updated '{}'", state.edit.name);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let (open, export, zoom_in, zoom_out) = ctx.input(|i| {
            let cmd = i.modifiers.command;
            (
                cmd && i.key_pressed(egui::Key::O),
                cmd && i.key_pressed(egui::Key::S),
                cmd && (i.key_pressed(egui::Key::Equals) || i.key_pressed(egui::Key::Plus)),
                cmd && i.key_pressed(egui::Key::Minus),
            )
        });
        if open {
            self.open_csv();
        }
        if export {
            self.export_csv();
        }
        if zoom_in {
            self.project.zoom_in();
        }
        if zoom_out {
            self.project.zoom_out();
        }
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        let visible_count = self.project.visible().len();
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {} · Visible: {} · Zoom: {:.0}%",
                                self.project.store.len(),
                                visible_count,
                                self.project.zoom.percent()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Central panel: name column + chart
        let mut table_action = TaskTableAction::None;
        let mut chart_action = ChartAction::None;
        let mut width_delta = 0.0;
        let mut save_settings = false;
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_CHART)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let name_width = self.settings.settings.name_column_width;
            let viewport_width =
                (ui.available_width() - name_width - ui::theme::SEPARATOR_WIDTH).max(1.0);
            let now = chrono::Local::now().naive_local();

            let layout = match self.project.layout(viewport_width, now) {
                RenderOutcome::Chart(layout) => layout,
                RenderOutcome::Empty => {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new("No tasks with valid dates to display")
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                    return;
                }
            };
            let tasks = self.project.store.tasks();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.horizontal_top(|ui| {
                        ui.spacing_mut().item_spacing.x = 0.0;
                        table_action = ui::task_table::show_task_table(&layout, tasks, name_width, ui);

                        // Draggable column separator
                        let (sep_rect, sep_response) = ui.allocate_exact_size(
                            egui::vec2(ui::theme::SEPARATOR_WIDTH, layout.total_height),
                            egui::Sense::drag(),
                        );
                        let sep_color = if sep_response.hovered() || sep_response.dragged() {
                            ui::theme::ACCENT
                        } else {
                            ui::theme::BORDER_SUBTLE
                        };
                        ui.painter().rect_filled(sep_rect, 0.0, sep_color);
                        if sep_response.hovered() || sep_response.dragged() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeColumn);
                        }
                        if sep_response.dragged() {
                            width_delta += sep_response.drag_delta().x;
                        }
                        if sep_response.drag_stopped() {
                            save_settings = true;
                        }

                        egui::ScrollArea::horizontal()
                            .id_salt("chart_scroll")
                            .auto_shrink([false, true])
                            .show(ui, |ui| {
                                chart_action = ui::gantt_chart::show_gantt_chart(&layout, tasks, ui);
                            });
                    });
                });
        });

        if width_delta != 0.0 {
            let width = self.settings.settings.name_column_width + width_delta;
            self.settings.settings.set_name_column_width(width);
        }
        if save_settings {
            self.settings.save_or_warn();
        }

        match table_action {
            TaskTableAction::ToggleCollapse(index) => self.project.toggle_collapse(index),
            TaskTableAction::Edit(index) => self.edit_task(index),
            TaskTableAction::Delete(index) => self.delete_task(index),
            TaskTableAction::None => {}
        }
        match chart_action {
            ChartAction::Edit(index) => self.edit_task(index),
            ChartAction::Delete(index) => self.delete_task(index),
            ChartAction::None => {}
        }

        // Dialogs
        if let Some(mut state) = self.editor.take() {
            match ui::task_editor::show_task_editor(&mut state, ctx) {
                EditorAction::Apply => self.apply_editor(&state),
                EditorAction::Delete => {
                    let index = state.index;
                    self.editor = Some(state);
                    self.delete_task(index);
                }
                EditorAction::Cancel => {}
                EditorAction::None => self.editor = Some(state),
            }
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            ui::dialogs::show_csv_help_dialog(self, ctx);
        }
    }
}
