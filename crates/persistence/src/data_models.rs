// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and text-column codecs.
//!
//! Dates, times, and datetimes are stored as ISO-8601 text. Decoding a
//! stored value is fallible: a row that fails to decode surfaces as
//! `PersistenceError::DataCorruption` rather than a panic.

use crate::diesel_schema::{
    cycle_config, replacement_applications, replacements, shift_assignments, shift_exchanges,
    shifts,
};
use crate::error::PersistenceError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use fireshift_core::{ExchangeLeg, Replacement, ReplacementApplication, ShiftExchange};
use fireshift_domain::{
    ApplicationStatus, CycleConfig, ExchangeStatus, PartialWindow, ReplacementStatus,
    ShiftTemplate, ShiftType,
};
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Encodes a date for storage.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Decodes a stored date.
///
/// # Errors
///
/// Returns `PersistenceError::DataCorruption` if the text is not a valid
/// ISO-8601 date.
pub fn parse_date(text: &str) -> Result<NaiveDate, PersistenceError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| PersistenceError::DataCorruption(format!("invalid date '{text}': {e}")))
}

/// Encodes a clock time for storage.
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Decodes a stored clock time.
///
/// # Errors
///
/// Returns `PersistenceError::DataCorruption` if the text is not a valid
/// clock time.
pub fn parse_time(text: &str) -> Result<NaiveTime, PersistenceError> {
    NaiveTime::parse_from_str(text, TIME_FORMAT)
        .map_err(|e| PersistenceError::DataCorruption(format!("invalid time '{text}': {e}")))
}

/// Encodes a datetime for storage.
pub fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// Decodes a stored datetime.
///
/// # Errors
///
/// Returns `PersistenceError::DataCorruption` if the text is not a valid
/// ISO-8601 datetime.
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime, PersistenceError> {
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .map_err(|e| PersistenceError::DataCorruption(format!("invalid datetime '{text}': {e}")))
}

/// Splits an optional partial window into its two text columns.
#[must_use]
pub fn partial_to_columns(partial: Option<PartialWindow>) -> (Option<String>, Option<String>) {
    partial.map_or((None, None), |window| {
        (Some(format_time(window.start)), Some(format_time(window.end)))
    })
}

/// Rebuilds an optional partial window from its two text columns.
///
/// # Errors
///
/// Returns `PersistenceError::DataCorruption` if exactly one column is set
/// or either column fails to decode.
pub fn partial_from_columns(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<PartialWindow>, PersistenceError> {
    match (start, end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => Ok(Some(PartialWindow::new(
            parse_time(start)?,
            parse_time(end)?,
        ))),
        _ => Err(PersistenceError::DataCorruption(
            "partial window has only one of its two columns set".to_string(),
        )),
    }
}

fn parse_status<T: FromStr>(text: &str) -> Result<T, PersistenceError>
where
    T::Err: std::fmt::Display,
{
    T::from_str(text)
        .map_err(|e| PersistenceError::DataCorruption(format!("invalid stored value: {e}")))
}

/// Diesel Queryable struct for cycle config rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = cycle_config)]
pub struct CycleConfigRow {
    pub config_id: i64,
    pub start_date: String,
    pub cycle_length_days: i32,
    pub is_active: i32,
}

impl TryFrom<CycleConfigRow> for CycleConfig {
    type Error = PersistenceError;

    fn try_from(row: CycleConfigRow) -> Result<Self, Self::Error> {
        let length = u16::try_from(row.cycle_length_days).map_err(|_| {
            PersistenceError::DataCorruption(format!(
                "cycle length {} out of range",
                row.cycle_length_days
            ))
        })?;
        Self::new(parse_date(&row.start_date)?, length, row.is_active != 0)
            .map_err(|e| PersistenceError::DataCorruption(e.to_string()))
    }
}

/// Diesel Queryable struct for rotation shift rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = shifts)]
pub struct ShiftRow {
    pub shift_id: i64,
    pub team_id: i64,
    pub cycle_day: i32,
    pub shift_type: String,
}

impl ShiftRow {
    /// Converts this row into a domain template.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DataCorruption` if the stored shift type
    /// or cycle day is invalid.
    pub fn into_template(self) -> Result<ShiftTemplate, PersistenceError> {
        let cycle_day = u8::try_from(self.cycle_day).map_err(|_| {
            PersistenceError::DataCorruption(format!("cycle day {} out of range", self.cycle_day))
        })?;
        Ok(ShiftTemplate::with_id(
            self.shift_id,
            self.team_id,
            cycle_day,
            parse_status::<ShiftType>(&self.shift_type)?,
        ))
    }
}

/// Diesel Insertable struct for rotation shift rows.
#[derive(Insertable)]
#[diesel(table_name = shifts)]
pub struct NewShiftRow {
    pub team_id: i64,
    pub cycle_day: i32,
    pub shift_type: String,
}

/// Diesel Queryable struct for direct assignment rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = shift_assignments)]
pub struct AssignmentRow {
    pub assignment_id: i64,
    pub user_id: i64,
    pub team_id: i64,
    pub shift_date: String,
    pub shift_type: String,
    pub partial_start: Option<String>,
    pub partial_end: Option<String>,
}

/// Diesel Insertable struct for direct assignment rows.
#[derive(Insertable)]
#[diesel(table_name = shift_assignments)]
pub struct NewAssignmentRow {
    pub user_id: i64,
    pub team_id: i64,
    pub shift_date: String,
    pub shift_type: String,
    pub partial_start: Option<String>,
    pub partial_end: Option<String>,
}

/// Diesel Queryable struct for replacement rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = replacements)]
pub struct ReplacementRow {
    pub replacement_id: i64,
    pub absent_user_id: Option<i64>,
    pub team_id: i64,
    pub shift_date: String,
    pub shift_type: String,
    pub partial_start: Option<String>,
    pub partial_end: Option<String>,
    pub status: String,
    pub assigned_user_id: Option<i64>,
    pub reason: Option<String>,
    pub created_at: String,
    pub notification_sent: i32,
}

impl TryFrom<ReplacementRow> for Replacement {
    type Error = PersistenceError;

    fn try_from(row: ReplacementRow) -> Result<Self, Self::Error> {
        Ok(Self {
            replacement_id: row.replacement_id,
            absent_user_id: row.absent_user_id,
            team_id: row.team_id,
            shift_date: parse_date(&row.shift_date)?,
            shift_type: parse_status::<ShiftType>(&row.shift_type)?,
            partial: partial_from_columns(row.partial_start.as_deref(), row.partial_end.as_deref())?,
            status: parse_status::<ReplacementStatus>(&row.status)?,
            assigned_user_id: row.assigned_user_id,
            reason: row.reason,
            notification_sent: row.notification_sent != 0,
        })
    }
}

/// Diesel Insertable struct for replacement rows.
#[derive(Insertable)]
#[diesel(table_name = replacements)]
pub struct NewReplacementRow {
    pub absent_user_id: Option<i64>,
    pub team_id: i64,
    pub shift_date: String,
    pub shift_type: String,
    pub partial_start: Option<String>,
    pub partial_end: Option<String>,
    pub status: String,
    pub reason: Option<String>,
    pub created_at: String,
}

/// Diesel Queryable struct for application rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = replacement_applications)]
pub struct ApplicationRow {
    pub application_id: i64,
    pub replacement_id: i64,
    pub applicant_id: i64,
    pub status: String,
    pub applied_at: String,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<String>,
}

impl TryFrom<ApplicationRow> for ReplacementApplication {
    type Error = PersistenceError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            application_id: row.application_id,
            replacement_id: row.replacement_id,
            applicant_id: row.applicant_id,
            status: parse_status::<ApplicationStatus>(&row.status)?,
            applied_at: parse_datetime(&row.applied_at)?,
            reviewed_by: row.reviewed_by,
            reviewed_at: row.reviewed_at.as_deref().map(parse_datetime).transpose()?,
        })
    }
}

/// Diesel Insertable struct for application rows.
#[derive(Insertable)]
#[diesel(table_name = replacement_applications)]
pub struct NewApplicationRow {
    pub replacement_id: i64,
    pub applicant_id: i64,
    pub status: String,
    pub applied_at: String,
}

/// Diesel Queryable struct for exchange rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = shift_exchanges)]
pub struct ExchangeRow {
    pub exchange_id: i64,
    pub requester_id: i64,
    pub target_id: i64,
    pub requester_date: String,
    pub requester_shift_type: String,
    pub requester_team_id: i64,
    pub requester_partial_start: Option<String>,
    pub requester_partial_end: Option<String>,
    pub target_date: String,
    pub target_shift_type: String,
    pub target_team_id: i64,
    pub target_partial_start: Option<String>,
    pub target_partial_end: Option<String>,
    pub status: String,
    pub reason: Option<String>,
    pub created_at: String,
    pub approved_by: Option<i64>,
    pub rejected_reason: Option<String>,
}

impl TryFrom<ExchangeRow> for ShiftExchange {
    type Error = PersistenceError;

    fn try_from(row: ExchangeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            exchange_id: row.exchange_id,
            requester_id: row.requester_id,
            target_id: row.target_id,
            requester_leg: ExchangeLeg {
                shift_date: parse_date(&row.requester_date)?,
                shift_type: parse_status::<ShiftType>(&row.requester_shift_type)?,
                team_id: row.requester_team_id,
                partial: partial_from_columns(
                    row.requester_partial_start.as_deref(),
                    row.requester_partial_end.as_deref(),
                )?,
            },
            target_leg: ExchangeLeg {
                shift_date: parse_date(&row.target_date)?,
                shift_type: parse_status::<ShiftType>(&row.target_shift_type)?,
                team_id: row.target_team_id,
                partial: partial_from_columns(
                    row.target_partial_start.as_deref(),
                    row.target_partial_end.as_deref(),
                )?,
            },
            status: parse_status::<ExchangeStatus>(&row.status)?,
            reason: row.reason,
            approved_by: row.approved_by,
            rejected_reason: row.rejected_reason,
        })
    }
}

/// Diesel Insertable struct for exchange rows.
#[derive(Insertable)]
#[diesel(table_name = shift_exchanges)]
pub struct NewExchangeRow {
    pub requester_id: i64,
    pub target_id: i64,
    pub requester_date: String,
    pub requester_shift_type: String,
    pub requester_team_id: i64,
    pub requester_partial_start: Option<String>,
    pub requester_partial_end: Option<String>,
    pub target_date: String,
    pub target_shift_type: String,
    pub target_team_id: i64,
    pub target_partial_start: Option<String>,
    pub target_partial_end: Option<String>,
    pub status: String,
    pub reason: Option<String>,
    pub created_at: String,
}
