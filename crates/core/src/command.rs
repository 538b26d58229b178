// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use agenda_domain::{AssignmentDraft, AssignmentId};

/// A command represents user intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new assignment to the calendar.
    SubmitAssignment {
        /// The unvalidated submission.
        draft: AssignmentDraft,
    },
    /// Remove an existing assignment.
    DeleteAssignment {
        /// The assignment to remove.
        assignment_id: AssignmentId,
    },
}

impl Command {
    /// Returns the command name used in audit records.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SubmitAssignment { .. } => "SubmitAssignment",
            Self::DeleteAssignment { .. } => "DeleteAssignment",
        }
    }
}
