//! Everything the chart draws for one `(TimelineData, TimelineViewState)` pair.

use super::grid::{CalendarGrid, GridAnnotations};
use super::position::{BarGeometry, TimelineScale};
use super::stacking::OverlapStacker;
use super::utilization::{self, BucketUtilization};
use crate::model::{Assignment, AssignmentId, Employee, EmployeeId, TimelineData, TimelineViewState};

/// Height of one stacked bar.
pub const BAR_HEIGHT: f32 = 28.0;
/// Vertical distance between stacked rows.
pub const ROW_PITCH: f32 = 32.0;
pub const LANE_PADDING: f32 = 6.0;
/// Utilization strip under each lane.
pub const UTILIZATION_HEIGHT: f32 = 18.0;
pub const MIN_LANE_HEIGHT: f32 = 38.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBar {
    pub assignment_id: AssignmentId,
    pub employee_id: EmployeeId,
    /// Index into the employee's `assignments`.
    pub assignment_index: usize,
    pub geometry: BarGeometry,
    pub row: usize,
}

impl RenderedBar {
    /// Top of the bar relative to its lane.
    pub fn top(&self) -> f32 {
        LANE_PADDING / 2.0 + self.row as f32 * ROW_PITCH
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeLane {
    pub employee_id: EmployeeId,
    pub name: String,
    pub team: Option<String>,
    pub bars: Vec<RenderedBar>,
    pub max_rows: usize,
    pub utilization: Vec<BucketUtilization>,
}

impl EmployeeLane {
    pub fn height(&self) -> f32 {
        (self.max_rows as f32 * ROW_PITCH + LANE_PADDING + UTILIZATION_HEIGHT).max(MIN_LANE_HEIGHT)
    }

    /// Bars only, without the utilization strip.
    pub fn bars_height(&self) -> f32 {
        self.height() - UTILIZATION_HEIGHT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub grid: CalendarGrid,
    pub scale: TimelineScale,
    pub lanes: Vec<EmployeeLane>,
}

impl RenderModel {
    pub fn build(data: &TimelineData, view: &TimelineViewState) -> Self {
        let grid = CalendarGrid::for_view(view, &GridAnnotations::from_data(data));
        let scale = TimelineScale::for_grid(&grid);
        let lanes = data
            .employees
            .iter()
            .map(|employee| lane(&grid, &scale, employee))
            .collect();
        Self { grid, scale, lanes }
    }

    pub fn total_height(&self) -> f32 {
        self.lanes.iter().map(EmployeeLane::height).sum()
    }

    pub fn lane(&self, employee_id: EmployeeId) -> Option<&EmployeeLane> {
        self.lanes.iter().find(|l| l.employee_id == employee_id)
    }

    /// Lane index under a y offset from the top of the first lane.
    pub fn lane_at(&self, y: f32) -> Option<usize> {
        if y < 0.0 {
            return None;
        }
        let mut top = 0.0;
        for (index, lane) in self.lanes.iter().enumerate() {
            let bottom = top + lane.height();
            if y < bottom {
                return Some(index);
            }
            top = bottom;
        }
        None
    }
}

fn lane(grid: &CalendarGrid, scale: &TimelineScale, employee: &Employee) -> EmployeeLane {
    let mut stacker = OverlapStacker::new();
    let bars = employee
        .assignments
        .iter()
        .enumerate()
        .filter_map(|(index, assignment): (usize, &Assignment)| {
            let geometry = scale.position(assignment.start, assignment.end)?;
            Some(RenderedBar {
                assignment_id: assignment.id,
                employee_id: employee.id,
                assignment_index: index,
                geometry,
                row: stacker.place(geometry),
            })
        })
        .collect();

    EmployeeLane {
        employee_id: employee.id,
        name: employee.name.clone(),
        team: employee.team.clone(),
        bars,
        max_rows: stacker.row_count(),
        utilization: utilization::for_employee(grid, employee),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::model::{AllocationKind, Holiday, ProjectColor, ZoomMode};
    use crate::timeline::utilization::Severity;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn assignment(id: u128, employee: u128, start: NaiveDate, end: NaiveDate) -> Assignment {
        Assignment {
            id: Uuid::from_u128(id),
            employee_id: Uuid::from_u128(employee),
            project_id: Uuid::from_u128(500),
            project_name: "Atlas".into(),
            project_color: ProjectColor::rgb(66, 133, 244),
            start,
            end,
            allocation_kind: AllocationKind::Percentage,
            allocation_value: 50.0,
            daily_hours: 4.0,
            note: None,
            is_tentative: false,
        }
    }

    fn employee(id: u128, assignments: Vec<Assignment>) -> Employee {
        Employee {
            id: Uuid::from_u128(id),
            name: format!("Employee {id}"),
            team: Some("Backend".into()),
            assignments,
            utilization: Default::default(),
        }
    }

    #[test]
    fn weekly_lane_stacks_overlaps_and_computes_utilization() {
        let data = TimelineData {
            employees: vec![employee(
                1,
                vec![
                    assignment(10, 1, d(2025, 3, 3), d(2025, 3, 5)),
                    assignment(11, 1, d(2025, 3, 4), d(2025, 3, 6)),
                    assignment(12, 1, d(2025, 6, 1), d(2025, 6, 30)),
                ],
            )],
            holidays: vec![Holiday {
                date: d(2025, 3, 7),
                name: "Closed".into(),
            }],
            ..TimelineData::default()
        };
        let view = TimelineViewState::new(ZoomMode::Weekly, d(2025, 3, 3));
        let model = RenderModel::build(&data, &view);

        let lane = &model.lanes[0];
        assert_eq!(lane.bars.len(), 2, "June lies outside the window");
        assert_eq!(lane.bars[0].row, 0);
        assert_eq!(lane.bars[1].row, 1);
        assert_eq!(lane.bars[1].assignment_index, 1);
        assert_eq!(lane.max_rows, 2);
        assert_eq!(lane.height(), 2.0 * ROW_PITCH + LANE_PADDING + UTILIZATION_HEIGHT);

        // 6 assignment-days × 4 h over 4 working days (Friday is a holiday)
        assert_eq!(lane.utilization[0].record.hours, 24.0);
        assert_eq!(lane.utilization[0].display_percentage(), 75);
        assert_eq!(lane.utilization[0].severity, Severity::Normal);
        assert_eq!(lane.utilization.len(), 4);
    }

    #[test]
    fn empty_lane_keeps_minimum_height() {
        let data = TimelineData {
            employees: vec![employee(1, Vec::new())],
            ..TimelineData::default()
        };
        let model = RenderModel::build(&data, &TimelineViewState::new(ZoomMode::Monthly, d(2025, 1, 1)));
        assert_eq!(model.lanes[0].max_rows, 1);
        assert_eq!(model.lanes[0].height(), 1.0 * ROW_PITCH + LANE_PADDING + UTILIZATION_HEIGHT);
        assert!(model.lanes[0].height() >= MIN_LANE_HEIGHT);
        assert_eq!(model.lanes[0].utilization.len(), 5);
    }

    #[test]
    fn lane_lookup_by_offset() {
        let data = TimelineData {
            employees: vec![employee(1, Vec::new()), employee(2, Vec::new())],
            ..TimelineData::default()
        };
        let model = RenderModel::build(&data, &TimelineViewState::new(ZoomMode::Weekly, d(2025, 1, 6)));
        let h = model.lanes[0].height();
        assert_eq!(model.lane_at(-1.0), None);
        assert_eq!(model.lane_at(0.0), Some(0));
        assert_eq!(model.lane_at(h + 1.0), Some(1));
        assert_eq!(model.lane_at(model.total_height() + 1.0), None);
        assert_eq!(model.lane(Uuid::from_u128(2)).map(|l| l.name.as_str()), Some("Employee 2"));
    }
}
