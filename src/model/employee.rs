use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::assignment::{Assignment, EmployeeId};
use super::timeline_data::UtilizationRecord;

/// Team tags known to the planner, with their display labels.
pub const TEAMS: &[(&str, &str)] = &[
    ("PM", "PM"),
    ("BA", "BA"),
    ("QA", "QA"),
    ("Frontend", "Frontend"),
    ("Backend", "Backend"),
    ("Mobile", "Mobile"),
    ("ML", "ML"),
    ("UX_UI_Designer", "UX/UI"),
    ("DevOps", "DevOps"),
];

pub fn team_label(tag: &str) -> &str {
    TEAMS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, label)| *label)
        .unwrap_or(tag)
}

/// An employee as delivered by the timeline fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub team: Option<String>,
    /// Kept in received order; layout never sorts them.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    /// Monthly utilization keyed by `yyyy-MM`.
    #[serde(default)]
    pub utilization: BTreeMap<String, UtilizationRecord>,
}

impl Employee {
    pub fn team_label(&self) -> Option<&str> {
        self.team.as_deref().map(team_label)
    }
}
