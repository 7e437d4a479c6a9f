//! Campus timetables: the static catalog, the calendar arithmetic behind the
//! week/month viewer, and the quick-select campus tabs.

pub mod catalog;
pub mod domain;
pub mod navigator;
pub mod router;
pub mod tabs;

pub use catalog::{CatalogError, ScheduleCatalog};
pub use domain::{Campus, CampusTimetable, ClassDay, TimetableEntry};
pub use navigator::{
    day_has_classes, entries_for_day, month_grid, monday_of, monday_of_month, navigate_week,
    week_dates, FixedClock, ReferenceClock, ScheduleNavigator, SystemClock, WeekDirection,
};
pub use router::{schedule_router, ScheduleState};
pub use tabs::{CampusTabs, VISIBLE_TAB_SLOTS};
