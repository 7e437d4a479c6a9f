//! Core library for the KE Academy website backend.
//!
//! Two domains live here: `inquiry` owns the contact-form validation rules and
//! the email hand-off behind `POST /api/contact`, and `schedule` owns the
//! campus timetable catalog together with the calendar arithmetic that drives
//! the week/month viewer. Configuration, telemetry, and the application error
//! type follow the same layout as the rest of our services.

pub mod config;
pub mod error;
pub mod inquiry;
pub mod schedule;
pub mod telemetry;
