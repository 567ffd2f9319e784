use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AssignmentId = Uuid;
pub type EmployeeId = Uuid;
pub type ProjectId = Uuid;

/// How an assignment's allocation value is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationKind {
    /// Share of an 8-hour working day.
    Percentage,
    /// Hours per calendar month, spread over its working days.
    MonthlyHours,
}

/// A project's display colour, exchanged as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ProjectColor {
    pub const FALLBACK: ProjectColor = ProjectColor { r: 0, g: 0, b: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Perceived brightness in `[0, 1]`.
    pub fn luminance(self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }

    /// Whether text drawn on this colour should be dark to stay readable.
    pub fn wants_dark_text(self) -> bool {
        self.luminance() > 0.55
    }
}

impl Default for ProjectColor {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl Serialize for ProjectColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ProjectColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_hex(&raw).unwrap_or(Self::FALLBACK))
    }
}

/// One employee's allocation to a project over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
    pub project_name: String,
    pub project_color: ProjectColor,
    #[serde(rename = "start_date")]
    pub start: NaiveDate,
    #[serde(rename = "end_date")]
    pub end: NaiveDate,
    #[serde(rename = "allocation_type")]
    pub allocation_kind: AllocationKind,
    pub allocation_value: f64,
    /// Resolved by the data source; never derived by the engine.
    pub daily_hours: f64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub is_tentative: bool,
}

impl Assignment {
    /// Whether `date` falls within `[start, end]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn has_note(&self) -> bool {
        self.note.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// `"50% (4h/d)"` or `"120h/m (6h/d)"`.
    pub fn allocation_label(&self) -> String {
        let daily = format_hours(self.daily_hours);
        match self.allocation_kind {
            AllocationKind::Percentage => {
                format!("{}% ({}h/d)", format_hours(self.allocation_value), daily)
            }
            AllocationKind::MonthlyHours => {
                format!("{}h/m ({}h/d)", format_hours(self.allocation_value), daily)
            }
        }
    }

    /// Label drawn inside the bar; weekly bars only have room for daily hours.
    pub fn bar_label(&self, compact: bool) -> String {
        if compact {
            format!("{}h/d", format_hours(self.daily_hours))
        } else {
            format!("{} · {}", self.project_name, self.allocation_label())
        }
    }
}

/// Trim trailing zeros: 4.0 → "4", 6.25 → "6.25".
fn format_hours(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Assignment {
        Assignment {
            id: Uuid::from_u128(1),
            employee_id: Uuid::from_u128(10),
            project_id: Uuid::from_u128(100),
            project_name: "Atlas".into(),
            project_color: ProjectColor::rgb(66, 133, 244),
            start: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            allocation_kind: AllocationKind::Percentage,
            allocation_value: 50.0,
            daily_hours: 4.0,
            note: Some("  ".into()),
            is_tentative: false,
        }
    }

    #[test]
    fn contains_is_inclusive() {
        let a = sample();
        assert!(a.contains(a.start));
        assert!(a.contains(a.end));
        assert!(!a.contains(a.end.succ_opt().unwrap()));
    }

    #[test]
    fn labels() {
        let mut a = sample();
        assert_eq!(a.bar_label(true), "4h/d");
        assert_eq!(a.bar_label(false), "Atlas · 50% (4h/d)");
        a.allocation_kind = AllocationKind::MonthlyHours;
        a.allocation_value = 120.0;
        a.daily_hours = 6.32;
        assert_eq!(a.allocation_label(), "120h/m (6.32h/d)");
    }

    #[test]
    fn blank_note_is_not_a_note() {
        assert!(!sample().has_note());
    }

    #[test]
    fn colour_hex_and_contrast() {
        let yellow = ProjectColor::from_hex("#FFEB3B").unwrap();
        assert!(yellow.wants_dark_text());
        assert!(!ProjectColor::from_hex("1a237e").unwrap().wants_dark_text());
        assert_eq!(ProjectColor::from_hex("#12345"), None);
        assert_eq!(yellow.to_hex(), "#ffeb3b");
    }

    #[test]
    fn deserialises_wire_format() {
        let json = r##"{
            "id": "00000000-0000-0000-0000-000000000001",
            "employee_id": "00000000-0000-0000-0000-00000000000a",
            "project_id": "00000000-0000-0000-0000-000000000064",
            "project_name": "Atlas",
            "project_color": "not-a-colour",
            "start_date": "2025-03-03",
            "end_date": "2025-03-05",
            "allocation_type": "monthly_hours",
            "allocation_value": 80,
            "daily_hours": 4
        }"##;
        let a: Assignment = serde_json::from_str(json).unwrap();
        assert_eq!(a.allocation_kind, AllocationKind::MonthlyHours);
        assert_eq!(a.project_color, ProjectColor::FALLBACK);
        assert_eq!(a.start, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert!(!a.is_tentative);
        assert_eq!(a.note, None);
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let json = r##"{
            "id": "00000000-0000-0000-0000-000000000001",
            "employee_id": "00000000-0000-0000-0000-00000000000a",
            "project_id": "00000000-0000-0000-0000-000000000064",
            "project_name": "Atlas",
            "project_color": "#000000",
            "start_date": "03/03/2025",
            "end_date": "2025-03-05",
            "allocation_type": "percentage",
            "allocation_value": 50,
            "daily_hours": 4
        }"##;
        assert!(serde_json::from_str::<Assignment>(json).is_err());
    }
}
