//! On-disk dataset and the timeline queries answered from it.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{
    self, count_working_days, holidays_between, month_end, month_start, working_days_in_month,
    HOURS_PER_WORKING_DAY,
};
use crate::error::SourceError;
use crate::model::{
    AllocationKind, Assignment, AssignmentId, Employee, EmployeeId, ProjectColor, ProjectId,
    TimelineData, TimelineQuery, UtilizationRecord, TEAMS,
};
use crate::timeline::AssignmentPatch;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub team: Option<String>,
}

impl EmployeeRecord {
    /// `"Last First"`, the order employees are listed in.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    fn matches_search(&self, needle: &str) -> bool {
        self.first_name.to_lowercase().contains(needle) || self.last_name.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    pub color: ProjectColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub id: AssignmentId,
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "allocation_type")]
    pub allocation_kind: AllocationKind,
    pub allocation_value: f64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub is_tentative: bool,
}

impl AssignmentRecord {
    fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }

    /// Hours per working day when the assignment runs in `year`/`month`.
    pub fn daily_hours_in_month(&self, year: i32, month: u32) -> f64 {
        daily_hours(self.allocation_kind, self.allocation_value, year, month)
    }

    /// Booked hours in one calendar month, counting only overlapping working days.
    pub fn hours_in_month(&self, year: i32, month: u32) -> f64 {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return 0.0;
        };
        let from = self.start_date.max(first);
        let to = self.end_date.min(month_end(first));
        if from > to {
            return 0.0;
        }
        let days = count_working_days(from, to);
        if days == 0 {
            return 0.0;
        }
        self.daily_hours_in_month(year, month) * days as f64
    }
}

/// Resolve an allocation to hours per working day in the given month.
pub fn daily_hours(kind: AllocationKind, value: f64, year: i32, month: u32) -> f64 {
    match kind {
        AllocationKind::Percentage => HOURS_PER_WORKING_DAY * value / 100.0,
        AllocationKind::MonthlyHours => match working_days_in_month(year, month) {
            0 => 0.0,
            days => value / days as f64,
        },
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Everything the planner stores: employees, projects and the assignments between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub assignments: Vec<AssignmentRecord>,
}

impl Dataset {
    pub fn employee(&self, id: EmployeeId) -> Option<&EmployeeRecord> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn project(&self, id: ProjectId) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Answer a timeline query: filtered employees with their in-window assignments, monthly
    /// utilization, holidays and working days for every month the window touches.
    pub fn timeline(&self, query: &TimelineQuery) -> Result<TimelineData, SourceError> {
        if let Some(unknown) = query.teams.iter().find(|t| !TEAMS.iter().any(|(tag, _)| *tag == t.as_str())) {
            return Err(SourceError::UnknownTeam(unknown.clone()));
        }
        let (start, end) = (query.window_start, query.window_end);

        let months = months_between(start, end);
        let working_days_per_month: BTreeMap<String, u32> = months
            .iter()
            .map(|&(y, m)| (calendar::month_key(y, m), working_days_in_month(y, m)))
            .collect();

        let needle = query.search.trim().to_lowercase();
        let mut records: Vec<&EmployeeRecord> = self
            .employees
            .iter()
            .filter(|e| {
                query.teams.is_empty()
                    || e.team.as_ref().is_some_and(|t| query.teams.contains(t))
            })
            .filter(|e| needle.is_empty() || e.matches_search(&needle))
            .collect();
        records.sort_by(|a, b| {
            (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
        });

        let employees = records
            .into_iter()
            .map(|record| {
                let mut owned: Vec<&AssignmentRecord> = self
                    .assignments
                    .iter()
                    .filter(|a| a.employee_id == record.id && a.overlaps(start, end))
                    .collect();
                owned.sort_by_key(|a| a.start_date);

                let utilization = months
                    .iter()
                    .map(|&(y, m)| {
                        let key = calendar::month_key(y, m);
                        let available = working_days_per_month.get(&key).copied().unwrap_or(0) as f64
                            * HOURS_PER_WORKING_DAY;
                        let hours: f64 = owned.iter().map(|a| a.hours_in_month(y, m)).sum();
                        let percentage = if available > 0.0 {
                            round_to(hours / available * 100.0, 1)
                        } else {
                            0.0
                        };
                        let month = UtilizationRecord {
                            percentage,
                            hours: round_to(hours, 1),
                            available_hours: round_to(available, 1),
                            overbooked: percentage > 100.0,
                        };
                        (key, month)
                    })
                    .collect();

                Employee {
                    id: record.id,
                    name: record.display_name(),
                    team: record.team.clone(),
                    assignments: owned.iter().map(|a| self.resolve(a, start)).collect(),
                    utilization,
                }
            })
            .collect();

        Ok(TimelineData {
            employees,
            holidays: holidays_between(start, end),
            working_days_per_month,
        })
    }

    /// Join an assignment with its project and resolve daily hours in the first month it is
    /// visible from `window_start`.
    fn resolve(&self, record: &AssignmentRecord, window_start: NaiveDate) -> Assignment {
        let project = self.project(record.project_id);
        let first_visible = record.start_date.max(window_start);
        let daily = record.daily_hours_in_month(first_visible.year(), first_visible.month());
        Assignment {
            id: record.id,
            employee_id: record.employee_id,
            project_id: record.project_id,
            project_name: project.map(|p| p.name.clone()).unwrap_or_default(),
            project_color: project.map(|p| p.color).unwrap_or_default(),
            start: record.start_date,
            end: record.end_date,
            allocation_kind: record.allocation_kind,
            allocation_value: record.allocation_value,
            daily_hours: round_to(daily, 2),
            note: record.note.clone(),
            is_tentative: record.is_tentative,
        }
    }

    /// Apply `patch` to assignment `id`. Nothing changes if the result would be invalid.
    pub fn apply_patch(&mut self, id: AssignmentId, patch: &AssignmentPatch) -> Result<(), SourceError> {
        if let Some(employee_id) = patch.employee_id {
            if self.employee(employee_id).is_none() {
                return Err(SourceError::UnknownEmployee(employee_id));
            }
        }
        let record = self
            .assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(SourceError::UnknownAssignment(id))?;

        let start = patch.start_date.unwrap_or(record.start_date);
        let end = patch.end_date.unwrap_or(record.end_date);
        if start > end {
            return Err(SourceError::InvalidRange { start, end });
        }
        record.start_date = start;
        record.end_date = end;
        if let Some(employee_id) = patch.employee_id {
            record.employee_id = employee_id;
        }
        Ok(())
    }
}

/// `(year, month)` of every month touched by `[start, end]`.
fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<(i32, u32)> {
    let mut months = Vec::new();
    let mut current = month_start(start);
    while current <= end {
        months.push((current.year(), current.month()));
        current = calendar::add_months(current, 1);
    }
    months
}
