use crate::model::task::{format_date_input, parse_date};
use crate::model::{Task, TaskEdit, TaskField};
use crate::ui::theme;
use chrono::NaiveDate;
use egui::{Color32, Context, RichText, Ui, Window};

/// Actions the editor can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Apply,
    Cancel,
    Delete,
}

/// Open editor for one task. Values stay as typed until applied.
#[derive(Debug, Clone)]
pub struct TaskEditorState {
    pub index: usize,
    pub edit: TaskEdit,
    start_pick: NaiveDate,
    finish_pick: NaiveDate,
}

impl TaskEditorState {
    pub fn open(index: usize, task: &Task, today: NaiveDate) -> Self {
        let mut edit = TaskEdit::from_task(task);
        edit.start = format_date_input(&task.start);
        edit.finish = format_date_input(&task.finish);
        Self {
            index,
            start_pick: task.start_date().map(|d| d.date()).unwrap_or(today),
            finish_pick: task.finish_date().map(|d| d.date()).unwrap_or(today),
            edit,
        }
    }
}

/// Render the modal task editor window.
pub fn show_task_editor(state: &mut TaskEditorState, ctx: &Context) -> EditorAction {
    let mut action = EditorAction::None;
    let mut open = true;

    Window::new(RichText::new("Edit Task").strong().size(14.0))
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            egui::Grid::new("task_editor_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    for field in TaskField::all() {
                        ui.label(RichText::new(field.label()).color(theme::TEXT_SECONDARY));
                        match field {
                            TaskField::Start => {
                                date_input(ui, &mut state.edit.start, &mut state.start_pick, "editor_start")
                            }
                            TaskField::Finish => {
                                date_input(ui, &mut state.edit.finish, &mut state.finish_pick, "editor_finish")
                            }
                            TaskField::Notes => {
                                ui.add_sized(
                                    [220.0, 60.0],
                                    egui::TextEdit::multiline(state.edit.value_mut(*field)),
                                );
                            }
                            _ => {
                                ui.add_sized(
                                    [220.0, 22.0],
                                    egui::TextEdit::singleline(state.edit.value_mut(*field)),
                                );
                            }
                        }
                        ui.end_row();
                    }
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let apply = egui::Button::new(RichText::new("Apply").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], apply).clicked() {
                    action = EditorAction::Apply;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    action = EditorAction::Cancel;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let delete = egui::Button::new(
                        RichText::new(format!("{}  Delete", egui_phosphor::regular::TRASH))
                            .color(theme::BAR_OVERDUE),
                    );
                    if ui.add(delete).clicked() {
                        action = EditorAction::Delete;
                    }
                });
            });
            ui.add_space(2.0);
        });

    if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = EditorAction::Cancel;
    }
    action
}

/// Text field in `YYYY-MM-DD` plus a picker that writes back into it.
fn date_input(ui: &mut Ui, value: &mut String, pick: &mut NaiveDate, salt: &str) {
    if let Some(parsed) = parse_date(value) {
        *pick = parsed.date();
    }
    ui.horizontal(|ui| {
        ui.add_sized(
            [120.0, 22.0],
            egui::TextEdit::singleline(value).hint_text("YYYY-MM-DD"),
        );
        if ui
            .add(egui_extras::DatePickerButton::new(pick).id_salt(salt))
            .changed()
        {
            *value = pick.format("%Y-%m-%d").to_string();
        }
    });
}
