//! Sample dataset written when no data file exists yet.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use super::dataset::{AssignmentRecord, Dataset, EmployeeRecord, ProjectRecord};
use crate::calendar::{add_months, month_end, month_start};
use crate::model::{AllocationKind, ProjectColor};

const EMPLOYEES: &[(&str, &str, &str)] = &[
    ("Jan", "Kowalski", "Frontend"),
    ("Anna", "Nowak", "Frontend"),
    ("Piotr", "Wiśniewski", "Backend"),
    ("Maria", "Wójcik", "Backend"),
    ("Tomasz", "Kamiński", "Backend"),
    ("Katarzyna", "Lewandowska", "QA"),
    ("Michał", "Zieliński", "QA"),
    ("Agnieszka", "Szymańska", "PM"),
    ("Robert", "Woźniak", "PM"),
    ("Ewa", "Dąbrowska", "UX_UI_Designer"),
    ("Paweł", "Kozłowski", "Mobile"),
    ("Joanna", "Jankowska", "Mobile"),
    ("Krzysztof", "Mazur", "DevOps"),
    ("Magdalena", "Krawczyk", "Frontend"),
    ("Łukasz", "Piotrowski", "Backend"),
];

const PROJECTS: &[(&str, ProjectColor)] = &[
    ("Alpha", ProjectColor::rgb(0x3b, 0x82, 0xf6)),
    ("Beta", ProjectColor::rgb(0xef, 0x44, 0x44)),
    ("Gamma", ProjectColor::rgb(0x10, 0xb9, 0x81)),
    ("Delta", ProjectColor::rgb(0xf5, 0x9e, 0x0b)),
    ("Epsilon", ProjectColor::rgb(0x8b, 0x5c, 0xf6)),
];

/// (employee, project, first month offset, last month offset, kind, value).
/// Offsets are whole months from the month the dataset is created in.
const ASSIGNMENTS: &[(usize, usize, i32, i32, AllocationKind, f64)] = &[
    (0, 0, -1, 4, AllocationKind::Percentage, 80.0),
    (0, 2, 1, 3, AllocationKind::Percentage, 50.0),
    (1, 0, 0, 5, AllocationKind::Percentage, 100.0),
    (2, 1, -1, 2, AllocationKind::Percentage, 75.0),
    (2, 3, 3, 6, AllocationKind::Percentage, 60.0),
    (3, 1, 0, 3, AllocationKind::Percentage, 70.0),
    (3, 4, 1, 4, AllocationKind::Percentage, 50.0),
    (4, 3, -1, 1, AllocationKind::MonthlyHours, 120.0),
    (5, 0, 0, 4, AllocationKind::Percentage, 50.0),
    (5, 1, 0, 2, AllocationKind::Percentage, 50.0),
    (6, 2, 1, 5, AllocationKind::Percentage, 80.0),
    (7, 0, -1, 4, AllocationKind::Percentage, 40.0),
    (7, 1, -1, 2, AllocationKind::Percentage, 30.0),
    (7, 2, 1, 5, AllocationKind::Percentage, 30.0),
    (8, 3, 0, 6, AllocationKind::Percentage, 60.0),
    (9, 0, -1, 1, AllocationKind::Percentage, 100.0),
    (9, 4, 2, 4, AllocationKind::Percentage, 100.0),
    (10, 4, 0, 5, AllocationKind::Percentage, 100.0),
    (11, 4, 1, 4, AllocationKind::Percentage, 80.0),
    (12, 0, -1, 4, AllocationKind::Percentage, 30.0),
];

/// Fifteen employees across every team, five projects and twenty assignments around `today`,
/// a few of them overbooked.
pub fn demo_dataset(today: NaiveDate) -> Dataset {
    let employees: Vec<EmployeeRecord> = EMPLOYEES
        .iter()
        .map(|(first, last, team)| EmployeeRecord {
            id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            team: Some(team.to_string()),
        })
        .collect();
    let projects: Vec<ProjectRecord> = PROJECTS
        .iter()
        .map(|(name, color)| ProjectRecord {
            id: Uuid::new_v4(),
            name: format!("Project {name}"),
            color: *color,
        })
        .collect();

    let base = month_start(today);
    let assignments = ASSIGNMENTS
        .iter()
        .enumerate()
        .map(|(i, &(employee, project, first, last, kind, value))| {
            // Stagger a few starts into the month so bars do not all align
            let start = add_months(base, first) + Duration::days((i % 3) as i64 * 7);
            AssignmentRecord {
                id: Uuid::new_v4(),
                employee_id: employees[employee].id,
                project_id: projects[project].id,
                start_date: start,
                end_date: month_end(add_months(base, last)),
                allocation_kind: kind,
                allocation_value: value,
                note: (i % 4 == 0).then(|| format!("Demo assignment - {}", projects[project].name)),
                is_tentative: i % 7 == 6,
            }
        })
        .collect();

    Dataset {
        employees,
        projects,
        assignments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TimelineViewState, ZoomMode};

    #[test]
    fn demo_is_consistent_and_visible() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let dataset = demo_dataset(today);
        assert_eq!(dataset.employees.len(), 15);
        assert_eq!(dataset.projects.len(), 5);
        assert_eq!(dataset.assignments.len(), 20);
        for a in &dataset.assignments {
            assert!(a.start_date <= a.end_date);
            assert!(dataset.employee(a.employee_id).is_some());
            assert!(dataset.project(a.project_id).is_some());
        }

        let data = dataset
            .timeline(&TimelineViewState::new(ZoomMode::Monthly, today).query())
            .unwrap();
        let overbooked = data
            .employees
            .iter()
            .filter(|e| e.utilization.values().any(|u| u.overbooked))
            .count();
        assert!(overbooked > 0);
    }
}
