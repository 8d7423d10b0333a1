// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end replacement workflow through the API handlers.

use super::{ADMIN_ID, admin, date, firefighter, setup};
use crate::error::ApiError;
use crate::handlers::{
    apply_to_replacement, approve_replacement, cancel_replacement, complete_elapsed_replacements,
    create_replacement, get_replacement, list_replacements, reject_application,
    unassign_replacement,
};
use crate::hooks::{LogHook, LogNotifier};
use crate::request_response::{
    ApplyRequest, ApproveReplacementRequest, ApproveReplacementResponse, CreateReplacementRequest,
};
use fireshift_domain::{ApplicationStatus, ReplacementStatus, ShiftType};

fn create_request(
    absent_user_id: Option<i64>,
    team_id: i64,
    day: u32,
    shift_type: ShiftType,
) -> CreateReplacementRequest {
    CreateReplacementRequest {
        absent_user_id,
        team_id,
        shift_date: date(2025, 6, day),
        shift_type,
        partial: None,
        reason: Some(String::from("sick leave")),
    }
}

#[test]
fn test_full_replacement_lifecycle() {
    let (mut p, team_id, alex, kim) = setup();
    let notifier = LogNotifier;
    let hook = LogHook;

    // Alex reports their own absence.
    let info = create_replacement(
        &mut p,
        create_request(Some(alex), team_id, 10, ShiftType::Full24h),
        &firefighter(alex),
        &notifier,
        &hook,
    )
    .unwrap();
    assert_eq!(info.status, ReplacementStatus::Open);
    assert!(info.notification_sent);

    // Kim applies and the officer approves.
    apply_to_replacement(
        &mut p,
        &ApplyRequest {
            replacement_id: info.replacement_id,
            applicant_id: kim,
        },
        &firefighter(kim),
        &notifier,
        &hook,
    )
    .unwrap();
    let outcome = approve_replacement(
        &mut p,
        &ApproveReplacementRequest {
            replacement_id: info.replacement_id,
            applicant_id: kim,
            force: false,
        },
        &admin(),
        &notifier,
        &hook,
    )
    .unwrap();
    assert_eq!(
        outcome,
        ApproveReplacementResponse::Assigned {
            replacement_id: info.replacement_id,
            substitute_id: kim,
        }
    );

    let loaded = get_replacement(&mut p, info.replacement_id).unwrap();
    assert_eq!(loaded.replacement.status, ReplacementStatus::Assigned);
    assert_eq!(loaded.replacement.assigned_user_id, Some(kim));
    assert_eq!(loaded.applications[0].status, ApplicationStatus::Approved);
    assert_eq!(loaded.applications[0].reviewed_by, Some(ADMIN_ID));

    // Unassigning reopens the replacement and keeps Kim in the pool.
    unassign_replacement(&mut p, info.replacement_id, &admin(), &notifier, &hook).unwrap();
    let loaded = get_replacement(&mut p, info.replacement_id).unwrap();
    assert_eq!(loaded.replacement.status, ReplacementStatus::Open);
    assert_eq!(loaded.replacement.assigned_user_id, None);
    assert_eq!(loaded.applications[0].status, ApplicationStatus::Pending);
    assert_eq!(loaded.applications[0].reviewed_by, None);

    // Alex withdraws the request.
    cancel_replacement(
        &mut p,
        info.replacement_id,
        &firefighter(alex),
        &notifier,
        &hook,
    )
    .unwrap();
    let loaded = get_replacement(&mut p, info.replacement_id).unwrap();
    assert_eq!(loaded.replacement.status, ReplacementStatus::Cancelled);
    // The cancellation invalidated the remaining candidate pool.
    assert_eq!(loaded.applications[0].status, ApplicationStatus::Rejected);
}

#[test]
fn test_create_replacement_for_someone_else_requires_admin() {
    let (mut p, team_id, alex, kim) = setup();
    let result = create_replacement(
        &mut p,
        create_request(Some(alex), team_id, 10, ShiftType::Day),
        &firefighter(kim),
        &LogNotifier,
        &LogHook,
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_extra_staffing_slot_requires_admin() {
    let (mut p, team_id, alex, _) = setup();
    let result = create_replacement(
        &mut p,
        create_request(None, team_id, 10, ShiftType::Night),
        &firefighter(alex),
        &LogNotifier,
        &LogHook,
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));

    let info = create_replacement(
        &mut p,
        create_request(None, team_id, 10, ShiftType::Night),
        &admin(),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();
    assert_eq!(info.absent_user_id, None);
}

#[test]
fn test_approve_requires_admin() {
    let (mut p, team_id, alex, kim) = setup();
    let info = create_replacement(
        &mut p,
        create_request(Some(alex), team_id, 10, ShiftType::Day),
        &firefighter(alex),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();
    apply_to_replacement(
        &mut p,
        &ApplyRequest {
            replacement_id: info.replacement_id,
            applicant_id: kim,
        },
        &firefighter(kim),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();

    let result = approve_replacement(
        &mut p,
        &ApproveReplacementRequest {
            replacement_id: info.replacement_id,
            applicant_id: kim,
            force: false,
        },
        &firefighter(kim),
        &LogNotifier,
        &LogHook,
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_duplicate_application_rejected() {
    let (mut p, team_id, alex, kim) = setup();
    let info = create_replacement(
        &mut p,
        create_request(Some(alex), team_id, 10, ShiftType::Day),
        &firefighter(alex),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();
    let request = ApplyRequest {
        replacement_id: info.replacement_id,
        applicant_id: kim,
    };
    apply_to_replacement(&mut p, &request, &firefighter(kim), &LogNotifier, &LogHook).unwrap();
    let result = apply_to_replacement(&mut p, &request, &firefighter(kim), &LogNotifier, &LogHook);
    assert!(matches!(
        result,
        Err(ApiError::WorkflowRuleViolation { .. })
    ));
}

#[test]
fn test_guard_blocks_assignment_until_forced() {
    let (mut p, team_id, alex, kim) = setup();

    // Kim already works a full 24h tour the day after: assigning the 24h
    // replacement on the 10th chains into 48 consecutive hours.
    p.create_direct_assignment(kim, team_id, date(2025, 6, 11), ShiftType::Full24h, None)
        .unwrap();

    let info = create_replacement(
        &mut p,
        create_request(Some(alex), team_id, 10, ShiftType::Full24h),
        &firefighter(alex),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();
    apply_to_replacement(
        &mut p,
        &ApplyRequest {
            replacement_id: info.replacement_id,
            applicant_id: kim,
        },
        &firefighter(kim),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();

    let request = ApproveReplacementRequest {
        replacement_id: info.replacement_id,
        applicant_id: kim,
        force: false,
    };
    let outcome = approve_replacement(&mut p, &request, &admin(), &LogNotifier, &LogHook).unwrap();
    match outcome {
        ApproveReplacementResponse::ConsecutiveHoursExceeded { total_hours, .. } => {
            assert!((total_hours - 48.0).abs() < f64::EPSILON);
        }
        ApproveReplacementResponse::Assigned { .. } => panic!("guard should have blocked"),
    }

    // The replacement is untouched and the override goes through.
    let loaded = get_replacement(&mut p, info.replacement_id).unwrap();
    assert_eq!(loaded.replacement.status, ReplacementStatus::Open);

    let forced = ApproveReplacementRequest {
        force: true,
        ..request
    };
    let outcome = approve_replacement(&mut p, &forced, &admin(), &LogNotifier, &LogHook).unwrap();
    assert!(matches!(
        outcome,
        ApproveReplacementResponse::Assigned { .. }
    ));
}

#[test]
fn test_reject_application_leaves_replacement_open() {
    let (mut p, team_id, alex, kim) = setup();
    let info = create_replacement(
        &mut p,
        create_request(Some(alex), team_id, 10, ShiftType::Day),
        &firefighter(alex),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();
    let applied = apply_to_replacement(
        &mut p,
        &ApplyRequest {
            replacement_id: info.replacement_id,
            applicant_id: kim,
        },
        &firefighter(kim),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();

    reject_application(&mut p, applied.application_id, &admin(), &LogNotifier, &LogHook).unwrap();
    let loaded = get_replacement(&mut p, info.replacement_id).unwrap();
    assert_eq!(loaded.replacement.status, ReplacementStatus::Open);
    assert_eq!(loaded.applications[0].status, ApplicationStatus::Rejected);
}

#[test]
fn test_cancel_by_unrelated_firefighter_denied() {
    let (mut p, team_id, alex, kim) = setup();
    let info = create_replacement(
        &mut p,
        create_request(Some(alex), team_id, 10, ShiftType::Day),
        &firefighter(alex),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();
    let result = cancel_replacement(
        &mut p,
        info.replacement_id,
        &firefighter(kim),
        &LogNotifier,
        &LogHook,
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_complete_elapsed_is_admin_only_and_counts() {
    let (mut p, team_id, alex, _) = setup();
    create_replacement(
        &mut p,
        create_request(Some(alex), team_id, 10, ShiftType::Day),
        &firefighter(alex),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();
    create_replacement(
        &mut p,
        create_request(Some(alex), team_id, 20, ShiftType::Night),
        &firefighter(alex),
        &LogNotifier,
        &LogHook,
    )
    .unwrap();

    let denied = complete_elapsed_replacements(&mut p, date(2025, 6, 15), &firefighter(alex));
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));

    let response = complete_elapsed_replacements(&mut p, date(2025, 6, 15), &admin()).unwrap();
    assert_eq!(response.completed, 1);

    let open = list_replacements(&mut p, Some(ReplacementStatus::Open)).unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].shift_date, date(2025, 6, 20));
}
