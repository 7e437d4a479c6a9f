//! Quick-select campus tabs.
//!
//! The viewer shows three campus tabs plus a "More Campuses" picker. Picking
//! a campus from the overflow promotes it to the front of the tab row and
//! drops the last tab, so the row always holds exactly three entries.

use super::catalog::ScheduleCatalog;
use super::domain::Campus;

/// Number of quick-select tabs shown before the overflow picker.
pub const VISIBLE_TAB_SLOTS: usize = 3;

/// The ordered set of campus ids currently shown as tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampusTabs {
    visible: Vec<u32>,
}

impl CampusTabs {
    /// Start from the catalog's default tab row.
    pub fn from_catalog(catalog: &ScheduleCatalog) -> Self {
        Self {
            visible: catalog.default_visible_ids().to_vec(),
        }
    }

    pub fn visible(&self) -> &[u32] {
        &self.visible
    }

    /// Promote `campus_id` to the front of the tab row. Campuses without a
    /// published timetable are not selectable and leave the row unchanged.
    /// Returns whether the row was updated.
    pub fn promote(&mut self, campus_id: u32, catalog: &ScheduleCatalog) -> bool {
        if !catalog.campus_has_timetable(campus_id) {
            return false;
        }
        self.visible.retain(|&id| id != campus_id);
        self.visible.insert(0, campus_id);
        self.visible.truncate(VISIBLE_TAB_SLOTS);
        true
    }

    /// Campuses listed under "More Campuses": everything not currently a tab,
    /// in catalog order.
    pub fn overflow<'a>(&self, catalog: &'a ScheduleCatalog) -> Vec<&'a Campus> {
        catalog
            .all_campuses()
            .iter()
            .filter(|campus| !self.visible.contains(&campus.id))
            .collect()
    }

    /// Overflow entries whose name contains `query`, case-insensitively.
    /// A blank query matches everything.
    pub fn filtered_overflow<'a>(
        &self,
        catalog: &'a ScheduleCatalog,
        query: &str,
    ) -> Vec<&'a Campus> {
        let needle = query.trim().to_lowercase();
        self.overflow(catalog)
            .into_iter()
            .filter(|campus| needle.is_empty() || campus.name.to_lowercase().contains(&needle))
            .collect()
    }
}
