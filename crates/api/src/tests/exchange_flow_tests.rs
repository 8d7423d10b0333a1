// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end exchange workflow through the API handlers.

use super::{ADMIN_ID, admin, date, firefighter, setup};
use crate::error::ApiError;
use crate::handlers::{
    approve_exchange, cancel_exchange, get_exchange, list_exchanges_for_user, reject_exchange,
    request_exchange,
};
use crate::hooks::{LogHook, LogNotifier};
use crate::request_response::{RequestExchangeRequest, RequestExchangeResponse};
use fireshift_core::ExchangeLeg;
use fireshift_domain::{EXCHANGE_QUOTA_PER_YEAR, ExchangeStatus, ShiftType};

fn leg(team_id: i64, day: u32, shift_type: ShiftType) -> ExchangeLeg {
    ExchangeLeg {
        shift_date: date(2025, 6, day),
        shift_type,
        team_id,
        partial: None,
    }
}

fn swap_request(
    requester_id: i64,
    target_id: i64,
    team_id: i64,
    requester_day: u32,
    target_day: u32,
) -> RequestExchangeRequest {
    RequestExchangeRequest {
        requester_id,
        target_id,
        requester_leg: leg(team_id, requester_day, ShiftType::Day),
        target_leg: leg(team_id, target_day, ShiftType::Night),
        reason: Some(String::from("family event")),
        force: false,
    }
}

fn created_id(response: RequestExchangeResponse) -> i64 {
    match response {
        RequestExchangeResponse::Created { exchange_id } => exchange_id,
        RequestExchangeResponse::QuotaExceeded { .. } => panic!("expected creation"),
    }
}

#[test]
fn test_request_and_approve_exchange() {
    let (mut p, team_id, alex, kim) = setup();
    let response = request_exchange(
        &mut p,
        swap_request(alex, kim, team_id, 10, 12),
        &firefighter(alex),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();
    let exchange_id = created_id(response);

    let approved = approve_exchange(&mut p, exchange_id, &admin(), &LogNotifier, &LogHook).unwrap();
    assert_eq!(approved.warnings.requester_hours, None);
    assert_eq!(approved.warnings.target_hours, None);

    let info = get_exchange(&mut p, exchange_id).unwrap();
    assert_eq!(info.status, ExchangeStatus::Approved);
    assert_eq!(info.approved_by, Some(ADMIN_ID));

    // Only the requester's yearly counter moves.
    assert_eq!(p.exchange_count(alex, 2025).unwrap(), 1);
    assert_eq!(p.exchange_count(kim, 2025).unwrap(), 0);
}

#[test]
fn test_request_for_someone_else_requires_admin() {
    let (mut p, team_id, alex, kim) = setup();
    let result = request_exchange(
        &mut p,
        swap_request(alex, kim, team_id, 10, 12),
        &firefighter(kim),
        &LogNotifier,
        &LogHook,
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_identical_legs_rejected() {
    let (mut p, team_id, alex, kim) = setup();
    let request = RequestExchangeRequest {
        requester_id: alex,
        target_id: kim,
        requester_leg: leg(team_id, 10, ShiftType::Day),
        target_leg: leg(team_id, 10, ShiftType::Day),
        reason: None,
        force: false,
    };
    let result = request_exchange(&mut p, request, &firefighter(alex), &LogNotifier, &LogHook);
    assert!(matches!(
        result,
        Err(ApiError::WorkflowRuleViolation { .. })
    ));
}

#[test]
fn test_quota_soft_cap_and_force_override() {
    let (mut p, team_id, alex, kim) = setup();

    // Burn through the yearly quota with approved exchanges.
    for round in 0..EXCHANGE_QUOTA_PER_YEAR {
        let requester_day = 1 + round;
        let response = request_exchange(
            &mut p,
            swap_request(alex, kim, team_id, requester_day, requester_day + 14),
            &firefighter(alex),
            &LogNotifier,
            &LogHook,
        )
        .unwrap();
        let exchange_id = created_id(response);
        approve_exchange(&mut p, exchange_id, &admin(), &LogNotifier, &LogHook).unwrap();
    }
    assert_eq!(
        p.exchange_count(alex, 2025).unwrap(),
        EXCHANGE_QUOTA_PER_YEAR
    );

    // The next request is held at the cap, not refused outright.
    let blocked = request_exchange(
        &mut p,
        swap_request(alex, kim, team_id, 25, 27),
        &firefighter(alex),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();
    assert_eq!(
        blocked,
        RequestExchangeResponse::QuotaExceeded {
            current_count: EXCHANGE_QUOTA_PER_YEAR,
            quota: EXCHANGE_QUOTA_PER_YEAR,
        }
    );

    let forced = RequestExchangeRequest {
        force: true,
        ..swap_request(alex, kim, team_id, 25, 27)
    };
    let response =
        request_exchange(&mut p, forced, &firefighter(alex), &LogNotifier, &LogHook).unwrap();
    let exchange_id = created_id(response);

    // Approval never re-checks the cap: the forced exchange goes through
    // and still moves the counter.
    approve_exchange(&mut p, exchange_id, &admin(), &LogNotifier, &LogHook).unwrap();
    let info = get_exchange(&mut p, exchange_id).unwrap();
    assert_eq!(info.status, ExchangeStatus::Approved);
    assert_eq!(
        p.exchange_count(alex, 2025).unwrap(),
        EXCHANGE_QUOTA_PER_YEAR + 1
    );
}

#[test]
fn test_approve_carries_advisory_warnings() {
    let (mut p, team_id, alex, kim) = setup();

    // Kim takes over Alex's Day shift on the 10th; Kim already works a 24h
    // tour ending at its start and a night shift starting at its end, so the
    // swap chains 48 consecutive hours for Kim.
    p.create_direct_assignment(kim, team_id, date(2025, 6, 9), ShiftType::Full24h, None)
        .unwrap();
    p.create_direct_assignment(kim, team_id, date(2025, 6, 10), ShiftType::Night, None)
        .unwrap();

    let response = request_exchange(
        &mut p,
        swap_request(alex, kim, team_id, 10, 20),
        &firefighter(alex),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();
    let exchange_id = created_id(response);

    let approved = approve_exchange(&mut p, exchange_id, &admin(), &LogNotifier, &LogHook).unwrap();
    assert_eq!(approved.warnings.requester_hours, None);
    let target_hours = approved.warnings.target_hours.unwrap();
    assert!((target_hours - 48.0).abs() < f64::EPSILON);

    // Advisory only: the exchange is approved regardless.
    let info = get_exchange(&mut p, exchange_id).unwrap();
    assert_eq!(info.status, ExchangeStatus::Approved);
}

#[test]
fn test_own_outgoing_leg_does_not_trigger_warning() {
    let (mut p, team_id, alex, kim) = setup();

    // Alex gives away a 24h tour on the 11th and takes over Kim's 24h tour
    // on the 10th. The tours touch at 07:00 on the 11th, but Alex will not
    // work the outgoing one once the swap lands, so no warning is due.
    p.create_direct_assignment(alex, team_id, date(2025, 6, 11), ShiftType::Full24h, None)
        .unwrap();

    let request = RequestExchangeRequest {
        requester_id: alex,
        target_id: kim,
        requester_leg: leg(team_id, 11, ShiftType::Full24h),
        target_leg: leg(team_id, 10, ShiftType::Full24h),
        reason: None,
        force: false,
    };
    let exchange_id = created_id(
        request_exchange(&mut p, request, &firefighter(alex), &LogNotifier, &LogHook).unwrap(),
    );

    let approved = approve_exchange(&mut p, exchange_id, &admin(), &LogNotifier, &LogHook).unwrap();
    assert_eq!(approved.warnings.requester_hours, None);
    assert_eq!(approved.warnings.target_hours, None);
}

#[test]
fn test_cancel_restricted_to_requester_or_admin() {
    let (mut p, team_id, alex, kim) = setup();
    let exchange_id = created_id(
        request_exchange(
            &mut p,
            swap_request(alex, kim, team_id, 10, 12),
            &firefighter(alex),
            &LogNotifier,
            &LogHook,
        )
        .unwrap(),
    );

    // The target cannot withdraw someone else's request.
    let denied = cancel_exchange(&mut p, exchange_id, &firefighter(kim), &LogNotifier, &LogHook);
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));

    cancel_exchange(&mut p, exchange_id, &firefighter(alex), &LogNotifier, &LogHook).unwrap();
    let info = get_exchange(&mut p, exchange_id).unwrap();
    assert_eq!(info.status, ExchangeStatus::Cancelled);

    // A resolved exchange cannot be withdrawn again.
    let result = cancel_exchange(&mut p, exchange_id, &firefighter(alex), &LogNotifier, &LogHook);
    assert!(matches!(
        result,
        Err(ApiError::WorkflowRuleViolation { .. })
    ));
}

#[test]
fn test_reject_requires_admin() {
    let (mut p, team_id, alex, kim) = setup();
    let exchange_id = created_id(
        request_exchange(
            &mut p,
            swap_request(alex, kim, team_id, 10, 12),
            &firefighter(alex),
            &LogNotifier,
            &LogHook,
        )
        .unwrap(),
    );

    let denied = reject_exchange(
        &mut p,
        exchange_id,
        None,
        &firefighter(kim),
        &LogNotifier,
        &LogHook,
    );
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));

    reject_exchange(
        &mut p,
        exchange_id,
        Some("coverage shortfall"),
        &admin(),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();
    let info = get_exchange(&mut p, exchange_id).unwrap();
    assert_eq!(info.status, ExchangeStatus::Rejected);
    assert_eq!(info.rejected_reason.as_deref(), Some("coverage shortfall"));
}

#[test]
fn test_list_exchanges_covers_both_roles() {
    let (mut p, team_id, alex, kim) = setup();
    created_id(
        request_exchange(
            &mut p,
            swap_request(alex, kim, team_id, 10, 12),
            &firefighter(alex),
            &LogNotifier,
            &LogHook,
        )
        .unwrap(),
    );

    let as_requester = list_exchanges_for_user(&mut p, alex, &firefighter(alex)).unwrap();
    let as_target = list_exchanges_for_user(&mut p, kim, &firefighter(kim)).unwrap();
    assert_eq!(as_requester.len(), 1);
    assert_eq!(as_target.len(), 1);

    // Reading someone else's exchange list requires admin.
    let denied = list_exchanges_for_user(&mut p, alex, &firefighter(kim));
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));
    let as_admin = list_exchanges_for_user(&mut p, alex, &admin()).unwrap();
    assert_eq!(as_admin.len(), 1);
}
