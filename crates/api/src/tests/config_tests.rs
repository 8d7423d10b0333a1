// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cycle configuration and guard probe handlers.

use super::{admin, date, firefighter, setup};
use crate::error::ApiError;
use crate::handlers::{check_guard, get_cycle_config, get_cycle_day, set_cycle_config};
use crate::request_response::{GuardCheckRequest, SetCycleConfigRequest};
use fireshift_domain::{MAX_CONSECUTIVE_HOURS, ShiftType};
use fireshift_persistence::Persistence;

#[test]
fn test_set_cycle_config_requires_admin() {
    let mut p = Persistence::new_in_memory().unwrap();
    let request = SetCycleConfigRequest {
        start_date: date(2025, 1, 6),
        cycle_length_days: 28,
        active: true,
    };
    let denied = set_cycle_config(&mut p, &request, &firefighter(1));
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));

    let info = set_cycle_config(&mut p, &request, &admin()).unwrap();
    assert_eq!(info.cycle_length_days, 28);
    assert_eq!(get_cycle_config(&mut p).unwrap(), info);
}

#[test]
fn test_zero_length_cycle_rejected() {
    let mut p = Persistence::new_in_memory().unwrap();
    let request = SetCycleConfigRequest {
        start_date: date(2025, 1, 6),
        cycle_length_days: 0,
        active: true,
    };
    let result = set_cycle_config(&mut p, &request, &admin());
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_cycle_day_is_periodic() {
    let (mut p, _, _, _) = setup();
    let epoch = get_cycle_day(&mut p, date(2025, 1, 6)).unwrap();
    assert_eq!(epoch.cycle_day, 1);
    let next_cycle = get_cycle_day(&mut p, date(2025, 2, 3)).unwrap();
    assert_eq!(next_cycle.cycle_day, 1);
}

#[test]
fn test_cycle_day_without_config_is_not_found() {
    let mut p = Persistence::new_in_memory().unwrap();
    let result = get_cycle_day(&mut p, date(2025, 1, 6));
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_guard_probe_on_empty_schedule() {
    let (mut p, _, alex, _) = setup();
    let response = check_guard(
        &mut p,
        &GuardCheckRequest {
            user_id: alex,
            shift_date: date(2025, 6, 10),
            shift_type: ShiftType::Full24h,
            partial: None,
        },
    )
    .unwrap();
    assert!(!response.exceeds);
    assert!((response.total_hours - 24.0).abs() < f64::EPSILON);
    assert!((response.limit - MAX_CONSECUTIVE_HOURS).abs() < f64::EPSILON);
}

#[test]
fn test_guard_probe_detects_chained_hours() {
    let (mut p, team_id, alex, _) = setup();
    p.create_direct_assignment(alex, team_id, date(2025, 6, 11), ShiftType::Full24h, None)
        .unwrap();

    let response = check_guard(
        &mut p,
        &GuardCheckRequest {
            user_id: alex,
            shift_date: date(2025, 6, 10),
            shift_type: ShiftType::Full24h,
            partial: None,
        },
    )
    .unwrap();
    assert!(response.exceeds);
    assert!((response.total_hours - 48.0).abs() < f64::EPSILON);
}
