use chrono::NaiveDate;
use egui::{Align2, Color32, Id, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use staff_timeline::model::{team_label, Assignment, AssignmentId, Employee, TimelineData, ZoomMode};
use staff_timeline::timeline::render::{BAR_HEIGHT, UTILIZATION_HEIGHT};
use staff_timeline::timeline::{
    Bucket, DragPayload, Edge, EmployeeLane, Interactions, PatchIntent, PointerCapture, PointerPos,
    RenderModel, RenderedBar, DAY_WIDTH, MONTH_WIDTH,
};

use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const NAME_WIDTH: f32 = theme::NAME_COLUMN_WIDTH;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// Pointer capture for egui: while active, the chart feeds the global pointer position and
/// release to the running resize instead of relying on the handle's own response.
#[derive(Debug, Default)]
pub struct PointerRoute {
    active: bool,
}

impl PointerRoute {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl PointerCapture for PointerRoute {
    fn acquire(&mut self) {
        self.active = true;
    }

    fn release(&mut self) {
        self.active = false;
    }
}

/// What happened in the chart this frame.
#[derive(Debug, Default)]
pub struct ChartOutput {
    pub intent: Option<PatchIntent>,
    pub clicked: Option<AssignmentId>,
}

/// Render the timeline: header, one lane per employee with stacked bars and a utilization strip.
pub fn show_timeline_chart(
    model: &RenderModel,
    data: &TimelineData,
    today: NaiveDate,
    interactions: &mut Interactions<PointerRoute>,
    ui: &mut Ui,
) -> ChartOutput {
    let mut output = ChartOutput::default();
    let chart_width = NAME_WIDTH + model.scale.total_width();
    let chart_height = HEADER_HEIGHT + model.total_height();

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let available = ui.available_size();
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width.max(available.x), chart_height.max(available.y)),
                Sense::hover(),
            );
            let origin = response.rect.min;
            let grid_x = origin.x + NAME_WIDTH;
            let lanes_top = origin.y + HEADER_HEIGHT;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            // Route the global pointer before bars are hit-tested so a resize that ends this
            // frame suppresses the click it would otherwise produce
            let drop_lane = route_pointer(ui, model, interactions, lanes_top, &mut output);

            draw_header(&painter, origin, model, chart_width);
            draw_day_shading(&painter, grid_x, lanes_top, model);

            let mut top = lanes_top;
            for (index, lane) in model.lanes.iter().enumerate() {
                let lane_rect =
                    Rect::from_min_size(Pos2::new(origin.x, top), Vec2::new(chart_width, lane.height()));
                let row_bg = if drop_lane == Some(index) {
                    theme::BG_DROP_TARGET
                } else if index % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_ROW_ODD
                };
                painter.rect_filled(lane_rect, 0.0, row_bg);
                painter.line_segment(
                    [lane_rect.left_bottom(), lane_rect.right_bottom()],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );

                draw_name_cell(&painter, lane, Pos2::new(origin.x, top));
                draw_utilization(ui, &painter, model, lane, grid_x, top + lane.bars_height());

                if let Some(employee) = data.employee(lane.employee_id) {
                    for bar in &lane.bars {
                        if let Some(assignment) = employee.assignments.get(bar.assignment_index) {
                            show_bar(ui, &painter, model, employee, assignment, bar, grid_x, top, interactions, &mut output);
                        }
                    }
                }
                top += lane.height();
            }

            // Name column separator
            painter.line_segment(
                [
                    Pos2::new(grid_x, origin.y),
                    Pos2::new(grid_x, origin.y + chart_height),
                ],
                Stroke::new(1.0, theme::BORDER_SUBTLE),
            );

            if today >= model.scale.window_start() && today <= model.scale.window_end() {
                draw_today_line(&painter, grid_x + model.scale.date_to_x(today), origin.y, chart_height);
            }
        });

    interactions.end_frame();
    output
}

/// Feed pointer movement and release to the running gesture. Returns the lane under a dragged bar.
fn route_pointer(
    ui: &Ui,
    model: &RenderModel,
    interactions: &mut Interactions<PointerRoute>,
    lanes_top: f32,
    output: &mut ChartOutput,
) -> Option<usize> {
    if !interactions.is_busy() {
        return None;
    }
    let (latest, released, escape) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.primary_released(),
            i.key_pressed(egui::Key::Escape),
        )
    });
    if escape {
        interactions.cancel();
        return None;
    }
    if let Some(pos) = latest {
        interactions.pointer_moved(PointerPos::new(pos.x, pos.y));
    }

    let hovered_lane = latest.and_then(|pos| model.lane_at(pos.y - lanes_top));
    if released {
        if interactions.capture().is_active() {
            output.intent = interactions.end_resize(&model.scale);
        } else {
            let target = hovered_lane.map(|index| model.lanes[index].employee_id);
            output.intent = interactions.end_drag(target);
        }
        return None;
    }

    if interactions.capture().is_active() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
    } else if interactions.drag_payload().is_some() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        return hovered_lane;
    }
    None
}

#[allow(clippy::too_many_arguments)]
fn show_bar(
    ui: &Ui,
    painter: &egui::Painter,
    model: &RenderModel,
    employee: &Employee,
    assignment: &Assignment,
    bar: &RenderedBar,
    grid_x: f32,
    lane_top: f32,
    interactions: &mut Interactions<PointerRoute>,
    output: &mut ChartOutput,
) {
    let id = bar.assignment_id;
    let preview = interactions
        .resize_preview(&model.scale)
        .filter(|p| p.assignment_id == id);
    let geometry = preview.map(|p| p.geometry).unwrap_or(bar.geometry);
    let mut rect = Rect::from_min_size(
        Pos2::new(grid_x + geometry.left, lane_top + bar.top()),
        Vec2::new(geometry.width, BAR_HEIGHT),
    );
    let dragged = matches!(
        interactions.drag_payload(),
        Some(DragPayload::BarDrag { assignment_id, .. }) if assignment_id == id
    );
    if dragged {
        if let Some(offset) = interactions.drag_offset() {
            rect = rect.translate(Vec2::new(offset.x, offset.y));
        }
    }

    let body = ui.interact(
        rect,
        ui.make_persistent_id(("assignment-bar", id)),
        Sense::click_and_drag(),
    );
    let left = ui.interact(
        handle_rect(rect, Edge::Left),
        ui.make_persistent_id(("assignment-resize-left", id)),
        Sense::drag(),
    );
    let right = ui.interact(
        handle_rect(rect, Edge::Right),
        ui.make_persistent_id(("assignment-resize-right", id)),
        Sense::drag(),
    );

    let press_origin = || {
        ui.input(|i| i.pointer.press_origin())
            .map(|p| PointerPos::new(p.x, p.y))
            .unwrap_or_default()
    };
    if left.drag_started() {
        interactions.begin_resize(assignment, bar.geometry, Edge::Left, press_origin());
    } else if right.drag_started() {
        interactions.begin_resize(assignment, bar.geometry, Edge::Right, press_origin());
    } else if body.drag_started() && interactions.press_bar(id, employee.id, press_origin()) {
        if let Some(pos) = body.interact_pointer_pos() {
            interactions.pointer_moved(PointerPos::new(pos.x, pos.y));
        }
    }
    if body.clicked() && !interactions.take_suppressed_click(id) {
        output.clicked = Some(id);
    }

    let pending = interactions.is_pending(id);
    draw_bar(painter, model, assignment, rect, dragged || pending);

    let handles_hovered = left.hovered() || right.hovered();
    if !interactions.is_busy() {
        if handles_hovered {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        } else if body.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
    }
    if handles_hovered || preview.is_some() {
        let handle_h = rect.height() * 0.55;
        let handle_y = rect.center().y - handle_h / 2.0;
        for x in [rect.left() - 1.5, rect.right() - 2.5] {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, handle_y), Vec2::new(4.0, handle_h)),
                Rounding::same(2.0),
                theme::HANDLE_COLOR,
            );
        }
    }

    if let Some(preview) = preview.filter(|p| p.days_delta != 0) {
        draw_day_delta(painter, rect, preview.days_delta);
    }

    if !interactions.is_busy() && (body.hovered() || handles_hovered) {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            Id::new(("assignment-tip", id)),
            |ui| {
                ui.strong(&assignment.project_name);
                ui.label(format!(
                    "{} → {}",
                    assignment.start.format("%d/%m/%Y"),
                    assignment.end.format("%d/%m/%Y"),
                ));
                ui.label(assignment.allocation_label());
                if assignment.is_tentative {
                    ui.label(egui::RichText::new("Tentative").italics());
                }
                if let Some(note) = assignment.note.as_deref().filter(|_| assignment.has_note()) {
                    ui.separator();
                    ui.label(note);
                }
            },
        );
    }
}

fn handle_rect(bar: Rect, edge: Edge) -> Rect {
    let x = match edge {
        Edge::Left => bar.left(),
        Edge::Right => bar.right(),
    };
    Rect::from_min_max(
        Pos2::new(x - HANDLE_WIDTH * 0.5, bar.top()),
        Pos2::new(x + HANDLE_WIDTH * 0.5, bar.bottom()),
    )
}

fn draw_bar(painter: &egui::Painter, model: &RenderModel, assignment: &Assignment, rect: Rect, faded: bool) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let mut fill = theme::project_color(assignment.project_color);
    if faded {
        fill = fill.gamma_multiply(0.6);
    }

    let text_color = if assignment.is_tentative {
        painter.rect_filled(rect, rounding, theme::BG_DARK);
        painter.rect_stroke(rect.shrink(1.0), rounding, Stroke::new(2.0, fill));
        fill
    } else {
        painter.rect_filled(rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
        painter.rect_filled(rect, rounding, fill);
        theme::text_on(assignment.project_color)
    };

    if rect.width() <= 24.0 {
        return;
    }
    let mut label = assignment.bar_label(model.scale.zoom() == ZoomMode::Weekly);
    if assignment.is_tentative {
        label.push(' ');
        label.push_str(egui_phosphor::regular::QUESTION);
    }
    if assignment.has_note() {
        label.push(' ');
        label.push_str(egui_phosphor::regular::NOTE);
    }
    let galley = painter.layout_no_wrap(label, theme::font_bar(), text_color);
    let clipped = painter.with_clip_rect(rect.shrink(2.0));
    clipped.galley(
        Pos2::new(rect.left() + 6.0, rect.center().y - galley.size().y / 2.0),
        galley,
        Color32::TRANSPARENT,
    );
}

/// `+2d` badge above a bar being resized.
fn draw_day_delta(painter: &egui::Painter, bar: Rect, days: i64) {
    let galley = painter.layout_no_wrap(format!("{days:+}d"), theme::font_small(), theme::BG_DARK);
    let size = galley.size() + Vec2::new(10.0, 4.0);
    let badge = Rect::from_center_size(
        Pos2::new(bar.center().x, bar.top() - size.y / 2.0 - 2.0),
        size,
    );
    painter.rect_filled(badge, Rounding::same(3.0), theme::TEXT_PRIMARY);
    painter.galley(badge.min + Vec2::new(5.0, 2.0), galley, Color32::TRANSPARENT);
}

fn bucket_width(zoom: ZoomMode) -> f32 {
    match zoom {
        ZoomMode::Monthly => MONTH_WIDTH,
        ZoomMode::Weekly => 7.0 * DAY_WIDTH,
    }
}

fn draw_header(painter: &egui::Painter, origin: Pos2, model: &RenderModel, width: f32) {
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
    painter.text(
        Pos2::new(origin.x + 10.0, origin.y + HEADER_HEIGHT / 2.0),
        Align2::LEFT_CENTER,
        "Employee",
        theme::font_header(),
        theme::TEXT_SECONDARY,
    );

    let grid_x = origin.x + NAME_WIDTH;
    let unit = bucket_width(model.grid.zoom());
    let bottom = origin.y + HEADER_HEIGHT + model.total_height();
    for (i, bucket) in model.grid.buckets().iter().enumerate() {
        let x = grid_x + i as f32 * unit;
        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, bottom)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        match bucket {
            Bucket::Month(_) => {
                painter.text(
                    Pos2::new(x + unit / 2.0, origin.y + HEADER_HEIGHT / 2.0),
                    Align2::CENTER_CENTER,
                    bucket.label(),
                    theme::font_header(),
                    theme::TEXT_PRIMARY,
                );
            }
            Bucket::Week(week) => {
                painter.text(
                    Pos2::new(x + 5.0, origin.y + 12.0),
                    Align2::LEFT_CENTER,
                    format!("W{} · {}", week.iso_week, week.label()),
                    theme::font_header(),
                    theme::TEXT_PRIMARY,
                );
                for (d, day) in week.days.iter().enumerate() {
                    let day_x = x + d as f32 * DAY_WIDTH;
                    let color = if day.holiday.is_some() {
                        theme::TODAY_LINE
                    } else if day.is_weekend {
                        theme::TEXT_DIM
                    } else {
                        theme::TEXT_SECONDARY
                    };
                    painter.text(
                        Pos2::new(day_x + DAY_WIDTH / 2.0, origin.y + 32.0),
                        Align2::CENTER_CENTER,
                        format!("{} {}", day.weekday_label(), day.date.format("%-d")),
                        theme::font_small(),
                        color,
                    );
                    if d > 0 {
                        painter.line_segment(
                            [
                                Pos2::new(day_x, origin.y + 24.0),
                                Pos2::new(day_x, origin.y + HEADER_HEIGHT),
                            ],
                            Stroke::new(0.5, theme::GRID_LINE),
                        );
                    }
                }
            }
        }
    }
}

/// Weekend and holiday columns behind the weekly lanes.
fn draw_day_shading(painter: &egui::Painter, grid_x: f32, lanes_top: f32, model: &RenderModel) {
    let height = model.total_height();
    for day in model.grid.days().filter(|d| !d.is_working_day()) {
        let x = grid_x + model.scale.date_to_x(day.date);
        let fill = if day.holiday.is_some() {
            theme::BG_HOLIDAY
        } else {
            theme::BG_WEEKEND
        };
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(x, lanes_top), Vec2::new(DAY_WIDTH, height)),
            0.0,
            fill,
        );
    }
}

fn draw_name_cell(painter: &egui::Painter, lane: &EmployeeLane, top_left: Pos2) {
    painter.text(
        top_left + Vec2::new(10.0, 14.0),
        Align2::LEFT_CENTER,
        &lane.name,
        theme::font_bar(),
        theme::TEXT_PRIMARY,
    );
    if let Some(team) = lane.team.as_deref() {
        painter.text(
            top_left + Vec2::new(10.0, 28.0),
            Align2::LEFT_CENTER,
            team_label(team),
            theme::font_small(),
            theme::TEXT_DIM,
        );
    }
}

fn draw_utilization(ui: &Ui, painter: &egui::Painter, model: &RenderModel, lane: &EmployeeLane, grid_x: f32, top: f32) {
    let unit = bucket_width(model.grid.zoom());
    for (i, util) in lane.utilization.iter().enumerate() {
        let cell = Rect::from_min_size(
            Pos2::new(grid_x + i as f32 * unit, top),
            Vec2::new(unit, UTILIZATION_HEIGHT),
        );
        painter.text(
            cell.center(),
            Align2::CENTER_CENTER,
            format!("{}%", util.display_percentage()),
            theme::font_small(),
            theme::severity_color(util.severity),
        );

        let response = ui.interact(
            cell,
            ui.make_persistent_id(("utilization", lane.employee_id, i)),
            Sense::hover(),
        );
        if response.hovered() {
            egui::show_tooltip_at_pointer(
                ui.ctx(),
                ui.layer_id(),
                Id::new(("utilization-tip", lane.employee_id, i)),
                |ui| {
                    ui.label(format!(
                        "{:.1} h of {:.1} h",
                        util.record.hours, util.record.available_hours
                    ));
                },
            );
        }
    }
}

fn draw_today_line(painter: &egui::Painter, x: f32, top: f32, height: f32) {
    painter.line_segment(
        [Pos2::new(x, top + HEADER_HEIGHT), Pos2::new(x, top + height)],
        Stroke::new(1.5, theme::TODAY_LINE),
    );
    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, top + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}
