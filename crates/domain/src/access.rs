// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visibility and deletion rules for assignments.
//!
//! Both rules are pure functions of (record, actor).
//!
//! Ownership for deletion is keyed on subject plus display name, not on an
//! account identifier. Two teachers of the same subject sharing a display
//! name can delete each other's assignments.

use crate::types::{Actor, Assignment};

/// Placeholder shown instead of a description the actor may not read.
pub const REDACTION_MARKER: &str = "[restricted]";

/// Returns whether the actor may read the assignment's description.
///
/// Coordinators may read everything; teachers may read assignments of their
/// own subject.
#[must_use]
pub fn can_view_description(record: &Assignment, actor: &Actor) -> bool {
    actor.is_coordinator() || subject_matches(record, actor)
}

/// Returns whether the actor may delete the assignment.
///
/// Coordinators may delete anything. Teachers may delete an assignment only
/// if it is of their subject AND its teacher name equals their display name,
/// compared trimmed and case-insensitively.
#[must_use]
pub fn can_delete(record: &Assignment, actor: &Actor) -> bool {
    actor.is_coordinator()
        || (subject_matches(record, actor)
            && normalize_name(&record.teacher_name) == normalize_name(actor.display_name()))
}

/// Returns the description as the actor is allowed to see it.
#[must_use]
pub fn visible_description<'a>(record: &'a Assignment, actor: &Actor) -> &'a str {
    if can_view_description(record, actor) {
        &record.description
    } else {
        REDACTION_MARKER
    }
}

fn subject_matches(record: &Assignment, actor: &Actor) -> bool {
    actor
        .subject()
        .is_some_and(|subject| subject.matches(&record.subject))
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
