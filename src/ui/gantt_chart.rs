use crate::model::dependency::{BarGeometry, Point};
use crate::model::layout::HEADER_HEIGHT;
use crate::model::task::format_number;
use crate::model::{ChartLayout, Task, TaskRow};
use crate::ui::theme;
use egui::{Align2, Color32, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui, Vec2};

/// What the user asked for by interacting with a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartAction {
    None,
    Edit(usize),
    Delete(usize),
}

/// Paint the timeline header, grid, bars and connectors for one layout.
pub fn show_gantt_chart(layout: &ChartLayout, tasks: &[Task], ui: &mut Ui) -> ChartAction {
    let mut action = ChartAction::None;
    let width = layout.viewport.chart_width.max(1.0);
    let (response, painter) =
        ui.allocate_painter(Vec2::new(width, layout.total_height), Sense::hover());
    let origin = response.rect.min;

    painter.rect_filled(response.rect, 0.0, theme::BG_CHART);

    for (i, row) in layout.rows.iter().enumerate() {
        if i % 2 == 1 {
            painter.rect_filled(
                Rect::from_min_size(
                    Pos2::new(origin.x, origin.y + row.y),
                    Vec2::new(width, crate::model::layout::ROW_HEIGHT),
                ),
                0.0,
                theme::BG_ROW_ALT,
            );
        }
    }

    draw_timeline_header(&painter, origin, layout, width);

    for row in &layout.rows {
        let (Some(bar), Some(status)) = (row.bar, row.status) else {
            continue;
        };
        let task = &tasks[row.task];
        let color = theme::bar_color(status);
        let hit_rect = if bar.width > 0.0 {
            draw_task_bar(&painter, origin, &bar, task, color)
        } else {
            draw_milestone(&painter, origin, &bar, color)
        };

        let bar_response = ui
            .interact(
                hit_rect,
                ui.make_persistent_id(("task-bar", row.task)),
                Sense::click(),
            )
            .on_hover_ui_at_pointer(|ui| bar_tooltip(ui, task));

        if bar_response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        if bar_response.clicked() {
            action = ChartAction::Edit(row.task);
        }
        bar_response.context_menu(|ui| {
            if let Some(choice) = row_context_menu(ui, row) {
                action = choice;
            }
        });
    }

    for connector in &layout.connectors {
        let points: Vec<Pos2> = connector.path.iter().map(|p| to_pos(origin, *p)).collect();
        painter.add(Shape::line(points, Stroke::new(1.0, theme::CONNECTOR)));
        if let Some(head) = connector.arrowhead() {
            painter.add(Shape::convex_polygon(
                head.iter().map(|p| to_pos(origin, *p)).collect(),
                theme::CONNECTOR,
                Stroke::NONE,
            ));
        }
    }

    action
}

/// Edit / Delete entries shared by the chart and the name column.
pub fn row_context_menu(ui: &mut Ui, row: &TaskRow) -> Option<ChartAction> {
    let mut choice = None;
    if ui
        .button(format!("{}  Edit Task...", egui_phosphor::regular::PENCIL_SIMPLE))
        .clicked()
    {
        choice = Some(ChartAction::Edit(row.task));
        ui.close_menu();
    }
    if ui
        .button(format!("{}  Delete Task", egui_phosphor::regular::TRASH))
        .clicked()
    {
        choice = Some(ChartAction::Delete(row.task));
        ui.close_menu();
    }
    choice
}

fn to_pos(origin: Pos2, point: Point) -> Pos2 {
    Pos2::new(origin.x + point.x, origin.y + point.y)
}

fn bar_rect(origin: Pos2, bar: &BarGeometry) -> Rect {
    Rect::from_min_size(
        Pos2::new(origin.x + bar.x, origin.y + bar.y),
        Vec2::new(bar.width, bar.height),
    )
}

fn draw_timeline_header(painter: &egui::Painter, origin: Pos2, layout: &ChartLayout, width: f32) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    for tick in &layout.ticks {
        let x = origin.x + tick.x;
        painter.line_segment(
            [
                Pos2::new(x, origin.y + HEADER_HEIGHT),
                Pos2::new(x, origin.y + layout.total_height),
            ],
            Stroke::new(1.0, theme::GRID_LINE),
        );
        if let Some(label) = &tick.label {
            painter.text(
                Pos2::new(x, origin.y + HEADER_HEIGHT / 2.0),
                Align2::CENTER_CENTER,
                label,
                theme::font_tick(),
                theme::TEXT_SECONDARY,
            );
        }
    }
}

fn draw_task_bar(
    painter: &egui::Painter,
    origin: Pos2,
    bar: &BarGeometry,
    task: &Task,
    color: Color32,
) -> Rect {
    let rect = bar_rect(origin, bar);
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    painter.rect_filled(rect, rounding, color);

    let progress = (task.percent_complete / 100.0).clamp(0.0, 1.0) as f32;
    if progress > 0.0 && progress < 1.0 {
        let filled = Rect::from_min_size(rect.min, Vec2::new(rect.width() * progress, rect.height()));
        painter.rect_filled(filled, rounding, theme::PROGRESS_OVERLAY);
    }

    if rect.width() > 40.0 {
        let galley = painter.layout_no_wrap(
            task.display_name().to_string(),
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
        let text_y = rect.top() + (rect.height() - galley.size().y) / 2.0;
        painter
            .with_clip_rect(rect)
            .galley(Pos2::new(rect.left() + 5.0, text_y), galley, Color32::TRANSPARENT);
    }

    rect
}

/// Zero-length bars render as a diamond centred on their date.
fn draw_milestone(painter: &egui::Painter, origin: Pos2, bar: &BarGeometry, color: Color32) -> Rect {
    let center = Pos2::new(origin.x + bar.x, origin.y + bar.center_y());
    let size = bar.height / 2.0;
    let points = vec![
        Pos2::new(center.x, center.y - size),
        Pos2::new(center.x + size, center.y),
        Pos2::new(center.x, center.y + size),
        Pos2::new(center.x - size, center.y),
    ];
    painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    Rect::from_center_size(center, Vec2::splat(size * 2.0))
}

fn bar_tooltip(ui: &mut Ui, task: &Task) {
    ui.strong(format!("Task: {}", task.display_name()));
    let resource = match task.resource() {
        "" => "No Resource",
        r => r,
    };
    ui.label(format!("Resource: {resource}"));
    if let Some((start, finish)) = task.date_range() {
        ui.label(format!(
            "Task Date: {} - {}",
            start.format("%d/%m/%Y"),
            finish.format("%d/%m/%Y")
        ));
    }
    let notes = task.notes_plain();
    if !notes.trim().is_empty() {
        ui.label(format!("Notes: {notes}"));
    }
    ui.label(format!("Progress: {}%", format_number(task.percent_complete)));
}
