//! Calendar arithmetic for the timetable viewer.
//!
//! Every date computation runs against a single reference timezone fixed per
//! deployment, so "today" highlighting and week boundaries are identical for
//! a viewer in Sydney and a viewer in London, even when their wall-clock days
//! disagree around midnight. The clock is injected so tests can pin "now".

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::domain::{ClassDay, TimetableEntry};

/// Source of the current instant.
pub trait ReferenceClock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Wall clock used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ReferenceClock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant, for tests and demo output.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// A clock whose reference-timezone date is `date` (pinned to midday to
    /// stay clear of DST transitions).
    pub fn for_reference_date(date: NaiveDate, timezone: Tz) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_else(|| date.and_time(Default::default()));
        let instant = timezone
            .from_local_datetime(&noon)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| noon.and_utc());
        Self { instant }
    }
}

impl ReferenceClock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Week/month geometry for the viewer, bound to a clock and timezone.
#[derive(Clone)]
pub struct ScheduleNavigator {
    clock: Arc<dyn ReferenceClock>,
    timezone: Tz,
}

impl ScheduleNavigator {
    pub fn new(clock: Arc<dyn ReferenceClock>, timezone: Tz) -> Self {
        Self { clock, timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// "Now" expressed in the reference timezone.
    pub fn reference_now(&self) -> NaiveDateTime {
        self.clock
            .now_utc()
            .with_timezone(&self.timezone)
            .naive_local()
    }

    /// Today's calendar date in the reference timezone.
    pub fn reference_today(&self) -> NaiveDate {
        self.reference_now().date()
    }

    /// The Monday of the week containing the reference "now".
    pub fn monday_of_current_week(&self) -> NaiveDate {
        monday_of(self.reference_today())
    }

    /// Whether `date` is today in the reference timezone, ignoring
    /// time-of-day and the caller's local clock.
    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.reference_today()
    }
}

/// The ISO start-of-week Monday for any date. A Sunday steps back six days;
/// any other day steps back to the Monday of the same week.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The seven consecutive dates starting at `monday`.
pub fn week_dates(monday: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekDirection {
    Previous,
    Next,
}

/// Step one week back or forward.
pub fn navigate_week(monday: NaiveDate, direction: WeekDirection) -> NaiveDate {
    match direction {
        WeekDirection::Previous => monday - Duration::days(7),
        WeekDirection::Next => monday + Duration::days(7),
    }
}

/// The Monday of the week containing the 1st of `(year, month)`.
/// Month is 1-based; `None` for an invalid year/month.
pub fn monday_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).map(monday_of)
}

/// Monday-first calendar rows for a month, padded with `None` before the 1st
/// and after the last day. Month is 1-based; `None` for an invalid month.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<[Option<u32>; 7]>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let days_in_month = (next_month - first).num_days() as u32;
    let leading = first.weekday().num_days_from_monday() as usize;

    let mut weeks = Vec::with_capacity(6);
    let mut current: [Option<u32>; 7] = [None; 7];
    let mut slot = leading;

    for day in 1..=days_in_month {
        current[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(current);
            current = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(current);
    }

    Some(weeks)
}

/// Entries scheduled on the given JS-style day index (0 = Sunday).
/// An out-of-range index matches nothing.
pub fn entries_for_day(entries: &[TimetableEntry], day_index: u32) -> Vec<&TimetableEntry> {
    match ClassDay::from_js_index(day_index) {
        Some(day) => entries.iter().filter(|entry| entry.day == day).collect(),
        None => Vec::new(),
    }
}

/// Whether any entry lands on the weekday of `(year, month, day)`.
pub fn day_has_classes(year: i32, month: u32, day: u32, entries: &[TimetableEntry]) -> bool {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| {
            let weekday = ClassDay::from_weekday(date.weekday());
            entries.iter().any(|entry| entry.day == weekday)
        })
        .unwrap_or(false)
}
