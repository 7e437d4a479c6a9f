//! The static campus and timetable catalog.
//!
//! Both tables ship embedded in the binary as CSV and are parsed once at
//! startup. There is no write path; every viewer shares the same immutable
//! data behind an `Arc`.

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::domain::{Campus, CampusTimetable, ClassDay, TimetableEntry};

const CAMPUSES_CSV: &str = include_str!("../../data/campuses.csv");
const TIMETABLE_CSV: &str = include_str!("../../data/timetable.csv");

/// Campus ids shown as quick-select tabs before "More Campuses", in order.
pub const DEFAULT_VISIBLE_CAMPUS_IDS: [u32; 3] = [3, 1, 4];

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse catalog csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("timetable references unknown campus {0}")]
    UnknownCampus(u32),
    #[error("default visible campus {0} is missing from the catalog")]
    MissingDefaultCampus(u32),
}

#[derive(Debug, Clone)]
pub struct ScheduleCatalog {
    campuses: Vec<Campus>,
    timetables: Vec<CampusTimetable>,
}

impl ScheduleCatalog {
    /// Load the catalog shipped with the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_readers(CAMPUSES_CSV.as_bytes(), TIMETABLE_CSV.as_bytes())
    }

    /// Parse a catalog from CSV readers; mostly useful for tests.
    pub fn from_readers<C, T>(campuses: C, timetable: T) -> Result<Self, CatalogError>
    where
        C: Read,
        T: Read,
    {
        let mut campus_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(campuses);
        let mut campus_list = Vec::new();
        for row in campus_reader.deserialize::<Campus>() {
            campus_list.push(row?);
        }

        let mut entry_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(timetable);
        // Group rows per campus, preserving row order within each campus.
        let mut grouped: BTreeMap<u32, Vec<TimetableEntry>> = BTreeMap::new();
        let mut campus_order = Vec::new();
        for row in entry_reader.deserialize::<TimetableRow>() {
            let row = row?;
            if !grouped.contains_key(&row.campus_id) {
                campus_order.push(row.campus_id);
            }
            grouped.entry(row.campus_id).or_default().push(row.into_entry());
        }

        let mut timetables = Vec::with_capacity(campus_order.len());
        for campus_id in campus_order {
            let campus = campus_list
                .iter()
                .find(|campus| campus.id == campus_id)
                .ok_or(CatalogError::UnknownCampus(campus_id))?;
            let entries = grouped.remove(&campus_id).unwrap_or_default();
            timetables.push(CampusTimetable {
                campus_id,
                campus_name: campus.name.clone(),
                entries,
            });
        }

        let catalog = Self {
            campuses: campus_list,
            timetables,
        };

        for id in DEFAULT_VISIBLE_CAMPUS_IDS {
            if catalog.campus(id).is_none() {
                return Err(CatalogError::MissingDefaultCampus(id));
            }
        }

        Ok(catalog)
    }

    pub fn all_campuses(&self) -> &[Campus] {
        &self.campuses
    }

    pub fn campus(&self, id: u32) -> Option<&Campus> {
        self.campuses.iter().find(|campus| campus.id == id)
    }

    pub fn timetable_for(&self, campus_id: u32) -> Option<&CampusTimetable> {
        self.timetables
            .iter()
            .find(|timetable| timetable.campus_id == campus_id)
    }

    pub fn campus_has_timetable(&self, campus_id: u32) -> bool {
        self.timetable_for(campus_id).is_some()
    }

    pub fn default_visible_ids(&self) -> [u32; 3] {
        DEFAULT_VISIBLE_CAMPUS_IDS
    }
}

#[derive(Debug, Deserialize)]
struct TimetableRow {
    campus_id: u32,
    entry_id: String,
    course_name: String,
    day: ClassDay,
    start_time: String,
    end_time: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    display_color: Option<String>,
}

impl TimetableRow {
    fn into_entry(self) -> TimetableEntry {
        TimetableEntry {
            id: self.entry_id,
            course_name: self.course_name,
            day: self.day,
            start_time: self.start_time,
            end_time: self.end_time,
            display_color: self.display_color,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
