use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::ScheduleCatalog;
use super::domain::TimetableEntry;
use super::navigator::{
    day_has_classes, entries_for_day, month_grid, monday_of, week_dates, ScheduleNavigator,
};

/// Shared state for the timetable endpoints.
#[derive(Clone)]
pub struct ScheduleState {
    pub catalog: Arc<ScheduleCatalog>,
    pub navigator: ScheduleNavigator,
}

/// Router builder exposing the timetable read endpoints.
pub fn schedule_router(state: ScheduleState) -> Router {
    Router::new()
        .route("/api/timetable/campuses", get(list_campuses))
        .route("/api/timetable/:campus_id/week", get(campus_week))
        .route("/api/timetable/:campus_id/month", get(campus_month))
        .with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CampusView {
    id: u32,
    name: String,
    label: String,
    address: String,
    has_timetable: bool,
    default_visible: bool,
}

async fn list_campuses(State(state): State<ScheduleState>) -> Json<Vec<CampusView>> {
    let defaults = state.catalog.default_visible_ids();
    let campuses = state
        .catalog
        .all_campuses()
        .iter()
        .map(|campus| CampusView {
            id: campus.id,
            name: campus.name.clone(),
            label: campus.label.clone(),
            address: campus.address.clone(),
            has_timetable: state.catalog.campus_has_timetable(campus.id),
            default_visible: defaults.contains(&campus.id),
        })
        .collect();
    Json(campuses)
}

#[derive(Debug, Deserialize)]
struct WeekParams {
    /// Any date inside the requested week; snapped back to its Monday.
    monday: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DayColumn {
    date: NaiveDate,
    day: &'static str,
    is_today: bool,
    entries: Vec<TimetableEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WeekView {
    campus_id: u32,
    campus_name: String,
    monday: NaiveDate,
    days: Vec<DayColumn>,
}

async fn campus_week(
    State(state): State<ScheduleState>,
    Path(campus_id): Path<u32>,
    params: Result<Query<WeekParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return bad_request(rejection.to_string()),
    };
    let Some(timetable) = state.catalog.timetable_for(campus_id) else {
        return timetable_not_found(campus_id);
    };

    let monday = monday_of(
        params
            .monday
            .unwrap_or_else(|| state.navigator.reference_today()),
    );
    let days = week_dates(monday)
        .into_iter()
        .map(|date| {
            let entries = entries_for_day(&timetable.entries, date.weekday().num_days_from_sunday())
                .into_iter()
                .cloned()
                .collect();
            DayColumn {
                date,
                day: super::domain::ClassDay::from_weekday(date.weekday()).label(),
                is_today: state.navigator.is_today(date),
                entries,
            }
        })
        .collect();

    Json(WeekView {
        campus_id,
        campus_name: timetable.campus_name.clone(),
        monday,
        days,
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
struct MonthParams {
    year: Option<i32>,
    month: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthCell {
    day: u32,
    is_today: bool,
    has_classes: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthView {
    campus_id: u32,
    campus_name: String,
    year: i32,
    month: u32,
    weeks: Vec<Vec<Option<MonthCell>>>,
}

async fn campus_month(
    State(state): State<ScheduleState>,
    Path(campus_id): Path<u32>,
    params: Result<Query<MonthParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return bad_request(rejection.to_string()),
    };
    let Some(timetable) = state.catalog.timetable_for(campus_id) else {
        return timetable_not_found(campus_id);
    };

    let today = state.navigator.reference_today();
    let year = params.year.unwrap_or_else(|| today.year());
    let month = params.month.unwrap_or_else(|| today.month());

    let Some(grid) = month_grid(year, month) else {
        return bad_request(format!("{year}-{month} is not a valid month"));
    };

    let weeks = grid
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| {
                    cell.map(|day| MonthCell {
                        day,
                        is_today: NaiveDate::from_ymd_opt(year, month, day)
                            .is_some_and(|date| state.navigator.is_today(date)),
                        has_classes: day_has_classes(year, month, day, &timetable.entries),
                    })
                })
                .collect()
        })
        .collect();

    Json(MonthView {
        campus_id,
        campus_name: timetable.campus_name.clone(),
        year,
        month,
        weeks,
    })
    .into_response()
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn timetable_not_found(campus_id: u32) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": format!("no timetable published for campus {campus_id}"),
        })),
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::navigator::FixedClock;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let tz = chrono_tz::Australia::Sydney;
        let clock = FixedClock::for_reference_date(
            NaiveDate::from_ymd_opt(2026, 2, 18).expect("valid date"),
            tz,
        );
        schedule_router(ScheduleState {
            catalog: Arc::new(ScheduleCatalog::embedded().expect("embedded catalog parses")),
            navigator: ScheduleNavigator::new(Arc::new(clock), tz),
        })
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn campus_listing_flags_timetable_availability() {
        let (status, body) = get_json(test_router(), "/api/timetable/campuses").await;
        assert_eq!(status, StatusCode::OK);
        let campuses = body.as_array().expect("array body");
        assert_eq!(campuses.len(), 22);

        let barker = campuses
            .iter()
            .find(|c| c["id"] == 3)
            .expect("Barker College listed");
        assert_eq!(barker["hasTimetable"], true);
        assert_eq!(barker["defaultVisible"], true);

        let carlingford = campuses
            .iter()
            .find(|c| c["id"] == 5)
            .expect("campus 5 listed");
        assert_eq!(carlingford["hasTimetable"], false);
        assert_eq!(carlingford["defaultVisible"], false);
    }

    #[tokio::test]
    async fn week_view_defaults_to_the_current_week() {
        let (status, body) = get_json(test_router(), "/api/timetable/1/week").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["monday"], "2026-02-16");
        assert_eq!(body["campusName"], "KE Castle Hill");

        let days = body["days"].as_array().expect("seven day columns");
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["day"], "Mon");
        assert_eq!(days[2]["date"], "2026-02-18");
        assert_eq!(days[2]["isToday"], true);
        assert_eq!(days[0]["isToday"], false);
        // Castle Hill runs two Monday classes and one Wednesday class.
        assert_eq!(days[0]["entries"].as_array().expect("entries").len(), 2);
        assert_eq!(days[2]["entries"][0]["courseName"], "Reading Comprehension");
    }

    #[tokio::test]
    async fn week_view_snaps_any_date_to_its_monday() {
        let (status, body) =
            get_json(test_router(), "/api/timetable/1/week?monday=2026-02-26").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["monday"], "2026-02-23");
        let days = body["days"].as_array().expect("day columns");
        assert!(days.iter().all(|day| day["isToday"] == false));
    }

    #[tokio::test]
    async fn week_view_rejects_campuses_without_a_timetable() {
        let (status, body) = get_json(test_router(), "/api/timetable/5/week").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "no timetable published for campus 5");
    }

    #[tokio::test]
    async fn month_view_marks_class_days_and_today() {
        let (status, body) =
            get_json(test_router(), "/api/timetable/3/month?year=2026&month=2").await;
        assert_eq!(status, StatusCode::OK);
        let weeks = body["weeks"].as_array().expect("grid rows");
        assert_eq!(weeks.len(), 5);
        // February 2026 starts on a Sunday.
        assert!(weeks[0][5].is_null());
        assert_eq!(weeks[0][6]["day"], 1);
        // Barker College has no Sunday classes; the 1st is a Sunday.
        assert_eq!(weeks[0][6]["hasClasses"], false);
        // The 18th is a Wednesday with a class, and "today" for the pinned clock.
        assert_eq!(weeks[3][2]["day"], 18);
        assert_eq!(weeks[3][2]["hasClasses"], true);
        assert_eq!(weeks[3][2]["isToday"], true);
    }

    #[tokio::test]
    async fn month_view_defaults_to_the_reference_month() {
        let (status, body) = get_json(test_router(), "/api/timetable/3/month").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["year"], 2026);
        assert_eq!(body["month"], 2);
    }

    #[tokio::test]
    async fn month_view_rejects_out_of_range_months() {
        let (status, body) =
            get_json(test_router(), "/api/timetable/3/month?year=2026&month=13").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "2026-13 is not a valid month");
    }
}
