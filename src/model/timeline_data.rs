use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::assignment::{Assignment, AssignmentId, EmployeeId};
use super::employee::Employee;

/// Utilization of one employee in one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UtilizationRecord {
    pub percentage: f64,
    pub hours: f64,
    pub available_hours: f64,
    #[serde(rename = "is_overbooked")]
    pub overbooked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

/// Payload returned by the timeline data source for one window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineData {
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Working-day count per `yyyy-MM`.
    #[serde(default)]
    pub working_days_per_month: BTreeMap<String, u32>,
}

impl TimelineData {
    pub fn holiday_map(&self) -> HashMap<NaiveDate, String> {
        self.holidays
            .iter()
            .map(|h| (h.date, h.name.clone()))
            .collect()
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn assignment(&self, id: AssignmentId) -> Option<&Assignment> {
        self.employees
            .iter()
            .flat_map(|e| e.assignments.iter())
            .find(|a| a.id == id)
    }
}
