use crate::model::layout::{HEADER_HEIGHT, ROW_HEIGHT};
use crate::model::{ChartLayout, Task};
use crate::ui::gantt_chart::{row_context_menu, ChartAction};
use crate::ui::theme;
use egui::{Align2, Pos2, Rect, Sense, Stroke, Ui, Vec2};

/// Actions that the name column can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTableAction {
    None,
    ToggleCollapse(usize),
    Edit(usize),
    Delete(usize),
}

/// Left edge of the collapse indicator for a row at `indent`.
const INDICATOR_OFFSET: f32 = 5.0;
/// Text offset from the indent when a row has an indicator.
const TEXT_OFFSET_WITH_INDICATOR: f32 = 20.0;
const TEXT_OFFSET: f32 = 5.0;

/// Render the task-name column, aligned row for row with the chart.
pub fn show_task_table(layout: &ChartLayout, tasks: &[Task], width: f32, ui: &mut Ui) -> TaskTableAction {
    let mut action = TaskTableAction::None;
    let (response, painter) =
        ui.allocate_painter(Vec2::new(width, layout.total_height), Sense::hover());
    let origin = response.rect.min;
    let clipped = painter.with_clip_rect(response.rect);

    clipped.rect_filled(response.rect, 0.0, theme::BG_CHART);
    clipped.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    clipped.text(
        Pos2::new(origin.x + TEXT_OFFSET, origin.y + HEADER_HEIGHT / 2.0),
        Align2::LEFT_CENTER,
        "Task Name",
        theme::font_header(),
        theme::TEXT_PRIMARY,
    );
    clipped.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    for (i, row) in layout.rows.iter().enumerate() {
        let task = &tasks[row.task];
        let row_rect = Rect::from_min_size(
            Pos2::new(origin.x, origin.y + row.y),
            Vec2::new(width, ROW_HEIGHT),
        );
        let row_response = ui.interact(
            row_rect,
            ui.make_persistent_id(("task-row", row.task)),
            Sense::click(),
        );

        let fill = if row_response.hovered() {
            theme::BG_ROW_HOVER
        } else if i % 2 == 1 {
            theme::BG_ROW_ALT
        } else {
            theme::BG_CHART
        };
        clipped.rect_filled(row_rect, 0.0, fill);

        let center_y = row_rect.center().y;
        let text_x = if row.has_children {
            let icon = if row.collapsed {
                egui_phosphor::regular::CARET_RIGHT
            } else {
                egui_phosphor::regular::CARET_DOWN
            };
            clipped.text(
                Pos2::new(origin.x + row.indent() + INDICATOR_OFFSET, center_y),
                Align2::LEFT_CENTER,
                icon,
                theme::font_row(),
                theme::TEXT_SECONDARY,
            );
            row.indent() + TEXT_OFFSET_WITH_INDICATOR
        } else {
            row.indent() + TEXT_OFFSET
        };

        let text_color = if row.has_children {
            theme::TEXT_PRIMARY
        } else {
            theme::TEXT_SECONDARY
        };
        clipped.text(
            Pos2::new(origin.x + text_x, center_y),
            Align2::LEFT_CENTER,
            task.display_name(),
            theme::font_row(),
            text_color,
        );

        if row_response.clicked() {
            action = if row.has_children {
                TaskTableAction::ToggleCollapse(row.task)
            } else {
                TaskTableAction::Edit(row.task)
            };
        }
        row_response.context_menu(|ui| {
            match row_context_menu(ui, row) {
                Some(ChartAction::Edit(index)) => action = TaskTableAction::Edit(index),
                Some(ChartAction::Delete(index)) => action = TaskTableAction::Delete(index),
                Some(ChartAction::None) | None => {}
            }
        });
    }

    action
}
