// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

use crate::error::CoreError;
use crate::exchange::{
    RequestOutcome, decide_approve, decide_cancel, decide_reject, decide_request,
    requester_incoming_obligation, target_incoming_obligation, without_outgoing_leg,
};
use crate::state::{ExchangeLeg, ShiftExchange};
use chrono::NaiveDate;
use fireshift_domain::{
    ConsecutiveCheck, EXCHANGE_QUOTA_PER_YEAR, ExchangeStatus, ObligationSource, ShiftType,
};

fn leg(day: u32, shift_type: ShiftType) -> ExchangeLeg {
    ExchangeLeg {
        shift_date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        shift_type,
        team_id: 1,
        partial: None,
    }
}

fn exchange(status: ExchangeStatus) -> ShiftExchange {
    ShiftExchange {
        exchange_id: 3,
        requester_id: 7,
        target_id: 8,
        requester_leg: leg(10, ShiftType::Day),
        target_leg: leg(14, ShiftType::Night),
        status,
        reason: None,
        approved_by: None,
        rejected_reason: None,
    }
}

fn clear_guard() -> ConsecutiveCheck {
    ConsecutiveCheck {
        exceeds: false,
        total_hours: 14.0,
    }
}

#[test]
fn test_request_with_distinct_legs_is_created() {
    let outcome = decide_request(
        7,
        8,
        leg(10, ShiftType::Day),
        leg(14, ShiftType::Night),
        Some("family event".to_string()),
        0,
        false,
    )
    .unwrap();
    match outcome {
        RequestOutcome::Create(new) => {
            assert_eq!(new.requester_id, 7);
            assert_eq!(new.target_id, 8);
            assert_eq!(new.requester_leg, leg(10, ShiftType::Day));
        }
        RequestOutcome::QuotaExceeded { .. } => panic!("expected creation"),
    }
}

#[test]
fn test_request_with_identical_legs_is_rejected() {
    let result = decide_request(
        7,
        8,
        leg(10, ShiftType::Day),
        leg(10, ShiftType::Day),
        None,
        0,
        false,
    );
    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
}

#[test]
fn test_request_with_self_is_rejected() {
    let result = decide_request(
        7,
        7,
        leg(10, ShiftType::Day),
        leg(14, ShiftType::Night),
        None,
        0,
        false,
    );
    assert!(matches!(result, Err(CoreError::SelfExchange { user_id: 7 })));
}

#[test]
fn test_request_at_quota_is_soft_blocked() {
    let outcome = decide_request(
        7,
        8,
        leg(10, ShiftType::Day),
        leg(14, ShiftType::Night),
        None,
        EXCHANGE_QUOTA_PER_YEAR,
        false,
    )
    .unwrap();
    assert!(matches!(
        outcome,
        RequestOutcome::QuotaExceeded {
            current_count,
            quota,
        } if current_count == EXCHANGE_QUOTA_PER_YEAR && quota == EXCHANGE_QUOTA_PER_YEAR
    ));
}

#[test]
fn test_request_at_quota_with_force_is_created() {
    let outcome = decide_request(
        7,
        8,
        leg(10, ShiftType::Day),
        leg(14, ShiftType::Night),
        None,
        EXCHANGE_QUOTA_PER_YEAR + 3,
        true,
    )
    .unwrap();
    assert!(matches!(outcome, RequestOutcome::Create(_)));
}

#[test]
fn test_incoming_obligations_are_swapped() {
    let subject = exchange(ExchangeStatus::Pending);

    let requester_side = requester_incoming_obligation(&subject);
    assert_eq!(requester_side.user_id, 7);
    assert_eq!(requester_side.date, subject.target_leg.shift_date);
    assert_eq!(requester_side.shift_type, ShiftType::Night);
    assert_eq!(
        requester_side.source,
        ObligationSource::ExchangeLeg { exchange_id: 3 }
    );

    let target_side = target_incoming_obligation(&subject);
    assert_eq!(target_side.user_id, 8);
    assert_eq!(target_side.date, subject.requester_leg.shift_date);
    assert_eq!(target_side.shift_type, ShiftType::Day);
}

#[test]
fn test_outgoing_leg_is_dropped_from_guard_input() {
    use fireshift_domain::ShiftObligation;

    let subject = exchange(ExchangeStatus::Pending);
    let obligation = |day: u32, shift_type: ShiftType| ShiftObligation {
        source: ObligationSource::Regular { shift_id: 1 },
        user_id: 7,
        date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        shift_type,
        partial: None,
    };

    // The requester's own Day shift on the 10th is the leg being given away;
    // the unrelated Night shift on the 9th stays.
    let remaining = without_outgoing_leg(
        vec![
            obligation(9, ShiftType::Night),
            obligation(10, ShiftType::Day),
        ],
        &subject.requester_leg,
    );
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].date, NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());

    // A different shift type on the same date is not the outgoing leg.
    let remaining = without_outgoing_leg(
        vec![obligation(10, ShiftType::Night)],
        &subject.requester_leg,
    );
    assert_eq!(remaining.len(), 1);
}

#[test]
fn test_approve_pending_exchange_charges_requester_leg_year() {
    let plan = decide_approve(
        &exchange(ExchangeStatus::Pending),
        &clear_guard(),
        &clear_guard(),
    )
    .unwrap();
    assert_eq!(plan.exchange_id, 3);
    assert_eq!(plan.quota_year, 2025);
    assert_eq!(plan.warnings.requester_hours, None);
    assert_eq!(plan.warnings.target_hours, None);
}

#[test]
fn test_approve_carries_guard_warnings_per_party() {
    let requester_check = ConsecutiveCheck {
        exceeds: true,
        total_hours: 40.5,
    };
    let plan = decide_approve(
        &exchange(ExchangeStatus::Pending),
        &requester_check,
        &clear_guard(),
    )
    .unwrap();
    assert_eq!(plan.warnings.requester_hours, Some(40.5));
    assert_eq!(plan.warnings.target_hours, None);
}

#[test]
fn test_resolved_exchange_rejects_further_transitions() {
    for status in [
        ExchangeStatus::Approved,
        ExchangeStatus::Rejected,
        ExchangeStatus::Cancelled,
    ] {
        let subject = exchange(status);
        assert!(matches!(
            decide_approve(&subject, &clear_guard(), &clear_guard()),
            Err(CoreError::ExchangeNotPending { .. })
        ));
        assert!(matches!(
            decide_reject(&subject),
            Err(CoreError::ExchangeNotPending { .. })
        ));
        assert!(matches!(
            decide_cancel(&subject, 7, false),
            Err(CoreError::ExchangeNotPending { .. })
        ));
    }
}

#[test]
fn test_cancel_restricted_to_requester_or_admin() {
    let subject = exchange(ExchangeStatus::Pending);
    assert!(decide_cancel(&subject, 7, false).is_ok());
    assert!(decide_cancel(&subject, 99, true).is_ok());
    assert!(matches!(
        decide_cancel(&subject, 8, false),
        Err(CoreError::NotExchangeRequester { .. })
    ));
}
