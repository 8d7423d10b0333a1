// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation operations.
//!
//! Workflow transitions use status-guarded updates inside a transaction:
//! the `UPDATE` carries the expected current status in its `WHERE` clause,
//! and zero affected rows means a concurrent transition won the race. The
//! whole transaction rolls back and the caller sees
//! `PersistenceError::StaleStatus`.

pub mod exchange;
pub mod replacement;
pub mod roster;
