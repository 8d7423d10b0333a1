// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod replacement_tests;

use crate::Persistence;
use chrono::NaiveDate;
use fireshift_domain::CycleConfig;

/// A 28-day rotation starting Monday 2025-01-06.
#[allow(clippy::unwrap_used)]
pub fn test_config() -> CycleConfig {
    CycleConfig::new(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(), 28, true).unwrap()
}

/// Fresh in-memory database with the test cycle config, one team, and two
/// firefighters on that team. Returns `(persistence, team_id, user_a, user_b)`.
#[allow(clippy::unwrap_used)]
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

#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
