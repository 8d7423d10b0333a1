// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Obligation loading.
//!
//! Assembles a person's full obligation set over a date range from all four
//! sources: rotation instances generated from shift templates, assigned
//! replacements, direct assignments, and incoming legs of approved
//! exchanges. Rotation instances matching a leg the person gave away in an
//! approved exchange are excluded, so a swap moves hours instead of
//! duplicating them.

use crate::data_models::{AssignmentRow, ExchangeRow, ReplacementRow, ShiftRow, format_date};
use crate::diesel_schema::{replacements, shift_assignments, shift_exchanges, shifts, team_members};
use crate::error::PersistenceError;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::SqliteConnection;
use fireshift_core::{
    Replacement, ShiftExchange, requester_incoming_obligation, target_incoming_obligation,
};
use fireshift_domain::{
    CycleConfig, ExchangeStatus, ObligationSource, ReplacementStatus, ShiftObligation, ShiftType,
    cycle_day_of,
};

/// A rotation instance a user gave away through an approved exchange.
type GivenAwayLeg = (NaiveDate, ShiftType, i64);

/// Loads every obligation for `user_id` with a start date in
/// `[from, to]`.
///
/// # Errors
///
/// Returns an error if a database query fails or a stored row cannot be
/// decoded.
pub fn load_obligations(
    conn: &mut SqliteConnection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
    config: &CycleConfig,
) -> Result<Vec<ShiftObligation>, PersistenceError> {
    let mut obligations = Vec::new();

    let (incoming, given_away) = exchange_legs(conn, user_id, from, to)?;
    obligations.extend(incoming);

    obligations.extend(rotation_instances(
        conn, user_id, from, to, config, &given_away,
    )?);
    obligations.extend(assigned_replacements(conn, user_id, from, to)?);
    obligations.extend(direct_assignments(conn, user_id, from, to)?);

    obligations.sort_by_key(|obligation| obligation.date);
    Ok(obligations)
}

/// Loads the user's approved-exchange legs: obligations they took over and
/// the rotation legs they gave away.
fn exchange_legs(
    conn: &mut SqliteConnection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<(Vec<ShiftObligation>, Vec<GivenAwayLeg>), PersistenceError> {
    let rows: Vec<ExchangeRow> = shift_exchanges::table
        .filter(shift_exchanges::status.eq(ExchangeStatus::Approved.as_str()))
        .filter(
            shift_exchanges::requester_id
                .eq(user_id)
                .or(shift_exchanges::target_id.eq(user_id)),
        )
        .select(ExchangeRow::as_select())
        .load(conn)?;

    let mut incoming = Vec::new();
    let mut given_away = Vec::new();
    for row in rows {
        let exchange = ShiftExchange::try_from(row)?;
        if exchange.requester_id == user_id {
            let obligation = requester_incoming_obligation(&exchange);
            if obligation.date >= from && obligation.date <= to {
                incoming.push(obligation);
            }
            given_away.push((
                exchange.requester_leg.shift_date,
                exchange.requester_leg.shift_type,
                exchange.requester_leg.team_id,
            ));
        } else {
            let obligation = target_incoming_obligation(&exchange);
            if obligation.date >= from && obligation.date <= to {
                incoming.push(obligation);
            }
            given_away.push((
                exchange.target_leg.shift_date,
                exchange.target_leg.shift_type,
                exchange.target_leg.team_id,
            ));
        }
    }
    Ok((incoming, given_away))
}

/// Generates rotation instances from the user's teams' shift templates.
///
/// An inactive rotation generates nothing.
fn rotation_instances(
    conn: &mut SqliteConnection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
    config: &CycleConfig,
    given_away: &[GivenAwayLeg],
) -> Result<Vec<ShiftObligation>, PersistenceError> {
    if !config.is_active() {
        return Ok(Vec::new());
    }

    let rows: Vec<ShiftRow> = shifts::table
        .inner_join(team_members::table.on(team_members::team_id.eq(shifts::team_id)))
        .filter(team_members::user_id.eq(user_id))
        .select(ShiftRow::as_select())
        .load(conn)?;
    let templates = rows
        .into_iter()
        .map(ShiftRow::into_template)
        .collect::<Result<Vec<_>, _>>()?;

    let mut instances = Vec::new();
    for date in from.iter_days().take_while(|date| *date <= to) {
        let cycle_day = cycle_day_of(date, config)
            .map_err(|e| PersistenceError::DataCorruption(e.to_string()))?;
        for template in &templates {
            if template.cycle_day() != cycle_day {
                continue;
            }
            let leg = (date, template.shift_type(), template.team_id());
            if given_away.contains(&leg) {
                continue;
            }
            instances.push(ShiftObligation {
                source: ObligationSource::Regular {
                    shift_id: template.shift_id().unwrap_or_default(),
                },
                user_id,
                date,
                shift_type: template.shift_type(),
                partial: None,
            });
        }
    }
    Ok(instances)
}

/// Loads replacements currently assigned to the user.
fn assigned_replacements(
    conn: &mut SqliteConnection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<ShiftObligation>, PersistenceError> {
    let rows: Vec<ReplacementRow> = replacements::table
        .filter(replacements::assigned_user_id.eq(user_id))
        .filter(replacements::status.eq(ReplacementStatus::Assigned.as_str()))
        .filter(replacements::shift_date.ge(format_date(from)))
        .filter(replacements::shift_date.le(format_date(to)))
        .select(ReplacementRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(|row| {
            let replacement = Replacement::try_from(row)?;
            Ok(ShiftObligation {
                source: ObligationSource::ReplacementAssigned {
                    replacement_id: replacement.replacement_id,
                },
                user_id,
                date: replacement.shift_date,
                shift_type: replacement.shift_type,
                partial: replacement.partial,
            })
        })
        .collect()
}

/// Loads the user's direct assignments.
fn direct_assignments(
    conn: &mut SqliteConnection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<ShiftObligation>, PersistenceError> {
    let rows: Vec<AssignmentRow> = shift_assignments::table
        .filter(shift_assignments::user_id.eq(user_id))
        .filter(shift_assignments::shift_date.ge(format_date(from)))
        .filter(shift_assignments::shift_date.le(format_date(to)))
        .select(AssignmentRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(|row| {
            let partial = crate::data_models::partial_from_columns(
                row.partial_start.as_deref(),
                row.partial_end.as_deref(),
            )?;
            Ok(ShiftObligation {
                source: ObligationSource::DirectAssignment {
                    assignment_id: row.assignment_id,
                },
                user_id,
                date: crate::data_models::parse_date(&row.shift_date)?,
                shift_type: row
                    .shift_type
                    .parse::<ShiftType>()
                    .map_err(|e| PersistenceError::DataCorruption(e.to_string()))?,
                partial,
            })
        })
        .collect()
}
