// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

use super::{date, setup};
use crate::PersistenceError;
use fireshift_core::{AssignPlan, NewApplication, NewReplacement, UnassignPlan};
use fireshift_domain::{ApplicationStatus, ReplacementStatus, ShiftType};

fn open_replacement(team_id: i64, absent: Option<i64>) -> NewReplacement {
    NewReplacement {
        absent_user_id: absent,
        team_id,
        shift_date: date(2025, 6, 10),
        shift_type: ShiftType::Full24h,
        partial: None,
        reason: Some("sick leave".to_string()),
    }
}

#[test]
fn test_create_and_read_replacement() {
    let (mut persistence, team_id, user_a, _) = setup();
    let id = persistence
        .create_replacement(&open_replacement(team_id, Some(user_a)))
        .unwrap();

    let stored = persistence.replacement(id).unwrap();
    assert_eq!(stored.replacement_id, id);
    assert_eq!(stored.absent_user_id, Some(user_a));
    assert_eq!(stored.status, ReplacementStatus::Open);
    assert_eq!(stored.assigned_user_id, None);
    assert_eq!(stored.shift_type, ShiftType::Full24h);
}

#[test]
fn test_duplicate_application_hits_unique_constraint() {
    let (mut persistence, team_id, user_a, user_b) = setup();
    let id = persistence
        .create_replacement(&open_replacement(team_id, Some(user_a)))
        .unwrap();

    let application = NewApplication {
        replacement_id: id,
        applicant_id: user_b,
    };
    persistence.apply_to_replacement(&application).unwrap();
    let second = persistence.apply_to_replacement(&application);
    assert!(matches!(second, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_assign_is_exactly_once() {
    let (mut persistence, team_id, user_a, user_b) = setup();
    let id = persistence
        .create_replacement(&open_replacement(team_id, Some(user_a)))
        .unwrap();
    let application_id = persistence
        .apply_to_replacement(&NewApplication {
            replacement_id: id,
            applicant_id: user_b,
        })
        .unwrap();

    let plan = AssignPlan {
        replacement_id: id,
        application_id,
        applicant_id: user_b,
    };
    persistence.assign_replacement(&plan, user_a).unwrap();

    let stored = persistence.replacement(id).unwrap();
    assert_eq!(stored.status, ReplacementStatus::Assigned);
    assert_eq!(stored.assigned_user_id, Some(user_b));

    let application = persistence.application(application_id).unwrap();
    assert_eq!(application.status, ApplicationStatus::Approved);
    assert_eq!(application.reviewed_by, Some(user_a));
    assert!(application.reviewed_at.is_some());

    // A second commit of the same plan sees the status already moved on.
    let second = persistence.assign_replacement(&plan, user_a);
    assert!(matches!(second, Err(PersistenceError::StaleStatus { .. })));
}

#[test]
fn test_failed_assign_rolls_back_application_update() {
    let (mut persistence, team_id, user_a, user_b) = setup();
    let id = persistence
        .create_replacement(&open_replacement(team_id, Some(user_a)))
        .unwrap();
    let application_id = persistence
        .apply_to_replacement(&NewApplication {
            replacement_id: id,
            applicant_id: user_b,
        })
        .unwrap();
    persistence.cancel_replacement(id).unwrap();

    // Replacement is cancelled, so the guarded update matches zero rows and
    // the application (already invalidated by the cancel cascade) must not
    // flip to approved.
    let result = persistence.assign_replacement(
        &AssignPlan {
            replacement_id: id,
            application_id,
            applicant_id: user_b,
        },
        user_a,
    );
    assert!(matches!(result, Err(PersistenceError::StaleStatus { .. })));

    let application = persistence.application(application_id).unwrap();
    assert_eq!(application.status, ApplicationStatus::Rejected);
}

#[test]
fn test_unassign_preserves_candidate_pool() {
    let (mut persistence, team_id, user_a, user_b) = setup();
    let other = persistence.create_user("Sam Reyes", "firefighter").unwrap();
    let id = persistence
        .create_replacement(&open_replacement(team_id, Some(user_a)))
        .unwrap();
    let winner = persistence
        .apply_to_replacement(&NewApplication {
            replacement_id: id,
            applicant_id: user_b,
        })
        .unwrap();
    let bystander = persistence
        .apply_to_replacement(&NewApplication {
            replacement_id: id,
            applicant_id: other,
        })
        .unwrap();

    persistence
        .assign_replacement(
            &AssignPlan {
                replacement_id: id,
                application_id: winner,
                applicant_id: user_b,
            },
            user_a,
        )
        .unwrap();
    persistence
        .unassign_replacement(&UnassignPlan {
            replacement_id: id,
            application_id: winner,
        })
        .unwrap();

    let stored = persistence.replacement(id).unwrap();
    assert_eq!(stored.status, ReplacementStatus::Open);
    assert_eq!(stored.assigned_user_id, None);

    let applications = persistence.applications_for(id).unwrap();
    assert_eq!(applications.len(), 2);
    for application in &applications {
        assert_eq!(application.status, ApplicationStatus::Pending);
        assert_eq!(application.reviewed_by, None);
        assert_eq!(application.reviewed_at, None);
    }
    assert!(applications.iter().any(|a| a.application_id == bystander));
}

#[test]
fn test_cancel_releases_assigned_substitute() {
    let (mut persistence, team_id, user_a, user_b) = setup();
    let id = persistence
        .create_replacement(&open_replacement(team_id, Some(user_a)))
        .unwrap();
    let application_id = persistence
        .apply_to_replacement(&NewApplication {
            replacement_id: id,
            applicant_id: user_b,
        })
        .unwrap();
    persistence
        .assign_replacement(
            &AssignPlan {
                replacement_id: id,
                application_id,
                applicant_id: user_b,
            },
            user_a,
        )
        .unwrap();

    persistence.cancel_replacement(id).unwrap();
    let stored = persistence.replacement(id).unwrap();
    assert_eq!(stored.status, ReplacementStatus::Cancelled);
    assert_eq!(stored.assigned_user_id, None);

    // The cascade invalidated the approved application.
    assert_eq!(
        persistence.application(application_id).unwrap().status,
        ApplicationStatus::Rejected
    );

    // Terminal: cancelling again fails.
    assert!(matches!(
        persistence.cancel_replacement(id),
        Err(PersistenceError::StaleStatus { .. })
    ));
}

#[test]
fn test_reject_application_is_guarded() {
    let (mut persistence, team_id, user_a, user_b) = setup();
    let id = persistence
        .create_replacement(&open_replacement(team_id, Some(user_a)))
        .unwrap();
    let application_id = persistence
        .apply_to_replacement(&NewApplication {
            replacement_id: id,
            applicant_id: user_b,
        })
        .unwrap();

    persistence
        .reject_application(application_id, user_a)
        .unwrap();
    let application = persistence.application(application_id).unwrap();
    assert_eq!(application.status, ApplicationStatus::Rejected);
    assert_eq!(application.reviewed_by, Some(user_a));
    assert!(matches!(
        persistence.reject_application(application_id, user_a),
        Err(PersistenceError::StaleStatus { .. })
    ));
}

#[test]
fn test_mark_replacement_notified() {
    let (mut persistence, team_id, user_a, _) = setup();
    let id = persistence
        .create_replacement(&open_replacement(team_id, Some(user_a)))
        .unwrap();
    assert!(!persistence.replacement(id).unwrap().notification_sent);

    persistence.mark_replacement_notified(id).unwrap();
    assert!(persistence.replacement(id).unwrap().notification_sent);

    assert!(matches!(
        persistence.mark_replacement_notified(9999),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_complete_elapsed_replacements() {
    let (mut persistence, team_id, user_a, user_b) = setup();
    let past = persistence
        .create_replacement(&open_replacement(team_id, Some(user_a)))
        .unwrap();
    let future = persistence
        .create_replacement(&NewReplacement {
            shift_date: date(2025, 6, 20),
            ..open_replacement(team_id, Some(user_b))
        })
        .unwrap();

    let updated = persistence
        .complete_elapsed_replacements(date(2025, 6, 15))
        .unwrap();
    assert_eq!(updated, 1);
    assert_eq!(
        persistence.replacement(past).unwrap().status,
        ReplacementStatus::Completed
    );
    assert_eq!(
        persistence.replacement(future).unwrap().status,
        ReplacementStatus::Open
    );
}

#[test]
fn test_list_replacements_by_status() {
    let (mut persistence, team_id, user_a, _) = setup();
    let first = persistence
        .create_replacement(&open_replacement(team_id, Some(user_a)))
        .unwrap();
    let second = persistence
        .create_replacement(&open_replacement(team_id, None))
        .unwrap();
    persistence.cancel_replacement(first).unwrap();

    let open = persistence
        .replacements(Some(ReplacementStatus::Open))
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].replacement_id, second);

    let all = persistence.replacements(None).unwrap();
    assert_eq!(all.len(), 2);
}
