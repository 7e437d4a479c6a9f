use crate::infra::parse_date;
use chrono::{Datelike, NaiveDate};
use clap::Args;
use std::sync::Arc;

use ke_academy::config::AppConfig;
use ke_academy::error::AppError;
use ke_academy::inquiry::mailer::text_body;
use ke_academy::inquiry::{validate, InquiryService, InquirySubmission, ValidationPolicy};
use ke_academy::schedule::{
    entries_for_day, month_grid, monday_of, week_dates, day_has_classes, CampusTimetable,
    FixedClock, ReferenceClock, ScheduleCatalog, ScheduleNavigator, SystemClock,
};

#[derive(Args, Debug)]
pub(crate) struct WeekArgs {
    /// Campus id to render
    #[arg(long)]
    pub(crate) campus: u32,
    /// Any date inside the requested week (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct MonthArgs {
    /// Campus id to render
    #[arg(long)]
    pub(crate) campus: u32,
    /// Year to render (defaults to the current year)
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// Month to render, 1-12 (defaults to the current month)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub(crate) month: Option<u32>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Campus id for the timetable portion (defaults to the first tab)
    #[arg(long)]
    pub(crate) campus: Option<u32>,
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

fn navigator(today: Option<NaiveDate>) -> Result<ScheduleNavigator, AppError> {
    let config = AppConfig::load()?;
    let timezone = config.schedule.reference_timezone;
    let clock: Arc<dyn ReferenceClock> = match today {
        Some(date) => Arc::new(FixedClock::for_reference_date(date, timezone)),
        None => Arc::new(SystemClock),
    };
    Ok(ScheduleNavigator::new(clock, timezone))
}

pub(crate) fn run_week_view(args: WeekArgs) -> Result<(), AppError> {
    let catalog = ScheduleCatalog::embedded()?;
    let navigator = navigator(None)?;

    let Some(timetable) = catalog.timetable_for(args.campus) else {
        println!("No timetable published for campus {}", args.campus);
        return Ok(());
    };

    let monday = monday_of(args.date.unwrap_or_else(|| navigator.reference_today()));
    render_week(timetable, monday, &navigator);
    Ok(())
}

pub(crate) fn run_month_view(args: MonthArgs) -> Result<(), AppError> {
    let catalog = ScheduleCatalog::embedded()?;
    let navigator = navigator(None)?;

    let Some(timetable) = catalog.timetable_for(args.campus) else {
        println!("No timetable published for campus {}", args.campus);
        return Ok(());
    };

    let today = navigator.reference_today();
    let year = args.year.unwrap_or_else(|| today.year());
    let month = args.month.unwrap_or_else(|| today.month());
    render_month(timetable, year, month, &navigator);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = ScheduleCatalog::embedded()?;
    let navigator = navigator(args.today)?;

    let campus_id = args
        .campus
        .unwrap_or_else(|| catalog.default_visible_ids()[0]);

    println!("KE Academy backend demo");
    match catalog.timetable_for(campus_id) {
        Some(timetable) => {
            render_week(timetable, navigator.monday_of_current_week(), &navigator);
        }
        None => println!("No timetable published for campus {campus_id}"),
    }

    println!("\nInquiry validation demo");
    let incomplete = InquirySubmission {
        full_name: "Jane Doe".to_string(),
        email: "jane@example".to_string(),
        phone: "41234".to_string(),
        country_code: Some("AU".to_string()),
        campus: Some("KE Castle Hill".to_string()),
        course: None,
        message: None,
    };
    let report = validate(&incomplete, &ValidationPolicy::authoritative());
    println!("Incomplete submission rejected with {} issue(s):", report.len());
    for (field, issue) in report.iter() {
        println!("  - {}: {}", field.payload_name(), issue.message);
    }

    let complete = InquirySubmission {
        email: "jane@example.com".to_string(),
        phone: "412345678".to_string(),
        course: Some("Mathematics".to_string()),
        message: Some("Looking for a term 2 enrolment.".to_string()),
        ..incomplete
    };
    let service = InquiryService::new(
        Arc::new(PrintMailer),
        Arc::new(SystemClock),
        navigator.timezone(),
    );
    match service.submit(complete) {
        Ok(()) => {}
        Err(err) => println!("Submission failed: {err}"),
    }

    Ok(())
}

struct PrintMailer;

impl ke_academy::inquiry::ContactMailer for PrintMailer {
    fn send(
        &self,
        email: &ke_academy::inquiry::ContactEmail,
    ) -> Result<(), ke_academy::inquiry::MailerError> {
        println!("Notification email preview:\n{}", text_body(email));
        Ok(())
    }
}

fn render_week(timetable: &CampusTimetable, monday: NaiveDate, navigator: &ScheduleNavigator) {
    println!(
        "{} - week of {}",
        timetable.campus_name,
        monday.format("%-d %B %Y")
    );
    for date in week_dates(monday) {
        let marker = if navigator.is_today(date) { " (today)" } else { "" };
        println!("{}{}", date.format("%a %-d %b"), marker);
        let entries = entries_for_day(&timetable.entries, date.weekday().num_days_from_sunday());
        if entries.is_empty() {
            println!("  no classes");
        } else {
            for entry in entries {
                println!(
                    "  {} - {}  {}",
                    entry.start_time, entry.end_time, entry.course_name
                );
            }
        }
    }
}

fn render_month(timetable: &CampusTimetable, year: i32, month: u32, navigator: &ScheduleNavigator) {
    let Some(grid) = month_grid(year, month) else {
        println!("{year}-{month} is not a valid month");
        return;
    };
    let heading = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month}"));
    println!("{} - {}", timetable.campus_name, heading);
    println!("Mon Tue Wed Thu Fri Sat Sun");

    for week in grid {
        let mut row = String::new();
        for cell in week {
            match cell {
                Some(day) => {
                    let date = NaiveDate::from_ymd_opt(year, month, day);
                    let today = date.is_some_and(|d| navigator.is_today(d));
                    let classes = day_has_classes(year, month, day, &timetable.entries);
                    let mark = match (today, classes) {
                        (true, _) => '#',
                        (false, true) => '*',
                        (false, false) => ' ',
                    };
                    row.push_str(&format!("{day:>3}{mark}"));
                }
                None => row.push_str("    "),
            }
        }
        println!("{}", row.trim_end());
    }
    println!("(* class day, # today)");
}
