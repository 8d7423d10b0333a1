// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod config_tests;
mod exchange_flow_tests;
mod replacement_flow_tests;

use crate::auth::{AuthenticatedActor, Role};
use chrono::NaiveDate;
use fireshift_domain::CycleConfig;
use fireshift_persistence::Persistence;

/// An officer user ID outside the seeded roster.
pub const ADMIN_ID: i64 = 1000;

pub const fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(ADMIN_ID, Role::Admin)
}

pub const fn firefighter(user_id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(user_id, Role::Firefighter)
}

/// A 28-day rotation starting Monday 2025-01-06.
pub fn test_config() -> CycleConfig {
    CycleConfig::new(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(), 28, true).unwrap()
}

/// Fresh in-memory database with the test cycle config, one team, and two
/// firefighters on that team. Returns `(persistence, team_id, user_a, user_b)`.
pub fn setup() -> (Persistence, i64, i64, i64) {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.set_cycle_config(&test_config()).unwrap();
    let team_id = persistence.create_team("Watch One").unwrap();
    let user_a = persistence.create_user("Alex Brand", "firefighter").unwrap();
    let user_b = persistence.create_user("Kim Sorel", "firefighter").unwrap();
    persistence.add_team_member(team_id, user_a).unwrap();
    persistence.add_team_member(team_id, user_b).unwrap();
    (persistence, team_id, user_a, user_b)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
