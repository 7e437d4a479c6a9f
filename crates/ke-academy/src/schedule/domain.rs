use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Day-of-week label used by timetable entries, Monday-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassDay {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

pub const WEEK_DAYS: [ClassDay; 7] = [
    ClassDay::Mon,
    ClassDay::Tue,
    ClassDay::Wed,
    ClassDay::Thu,
    ClassDay::Fri,
    ClassDay::Sat,
    ClassDay::Sun,
];

impl ClassDay {
    pub const fn label(self) -> &'static str {
        match self {
            ClassDay::Mon => "Mon",
            ClassDay::Tue => "Tue",
            ClassDay::Wed => "Wed",
            ClassDay::Thu => "Thu",
            ClassDay::Fri => "Fri",
            ClassDay::Sat => "Sat",
            ClassDay::Sun => "Sun",
        }
    }

    /// Convert a JS-style day index (0 = Sunday .. 6 = Saturday).
    pub const fn from_js_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(ClassDay::Sun),
            1 => Some(ClassDay::Mon),
            2 => Some(ClassDay::Tue),
            3 => Some(ClassDay::Wed),
            4 => Some(ClassDay::Thu),
            5 => Some(ClassDay::Fri),
            6 => Some(ClassDay::Sat),
            _ => None,
        }
    }

    pub const fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => ClassDay::Mon,
            Weekday::Tue => ClassDay::Tue,
            Weekday::Wed => ClassDay::Wed,
            Weekday::Thu => ClassDay::Thu,
            Weekday::Fri => ClassDay::Fri,
            Weekday::Sat => ClassDay::Sat,
            Weekday::Sun => ClassDay::Sun,
        }
    }
}

/// One campus as shown in selectors and the contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campus {
    pub id: u32,
    pub name: String,
    pub label: String,
    pub address: String,
}

/// A single recurring class slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub id: String,
    pub course_name: String,
    pub day: ClassDay,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_color: Option<String>,
}

/// The full weekly schedule for one campus. Static configuration, loaded once
/// and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusTimetable {
    pub campus_id: u32,
    pub campus_name: String,
    pub entries: Vec<TimetableEntry>,
}
