// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Effect, Schedule, SchedulingRules, TransitionResult};
use agenda_audit::{Action, AuditEvent, StateSnapshot};
use agenda_domain::{Actor, Assignment, NewAssignment, QuotaDecision, can_delete, validate_draft};

/// Applies a command to the current schedule, producing the store effect and
/// an audit event.
///
/// # Arguments
///
/// * `rules` - The course catalog and quota in force
/// * `schedule` - The Active assignments (immutable)
/// * `command` - The command to apply
/// * `actor` - The authenticated actor performing this action
///
/// # Errors
///
/// Returns an error if:
/// - The submission fails field validation
/// - The (course, day) is full and the actor is not a coordinator
/// - The assignment to delete does not exist
/// - The actor may not delete the assignment
pub fn apply(
    rules: &SchedulingRules,
    schedule: &Schedule,
    command: Command,
    actor: &Actor,
) -> Result<TransitionResult, CoreError> {
    let action_name: &str = command.name();
    match command {
        Command::SubmitAssignment { draft } => {
            let candidate: NewAssignment = validate_draft(&draft, &rules.catalog)?;

            let decision: QuotaDecision = rules.quota.evaluate(
                &schedule.assignments,
                &candidate.course,
                candidate.due_date,
                actor,
            );
            let count: usize = match decision {
                QuotaDecision::Admit { count } => count,
                QuotaDecision::Reject { count, limit } => {
                    return Err(CoreError::QuotaExceeded {
                        course: candidate.course.name().to_string(),
                        due_date: candidate.due_date,
                        count,
                        limit,
                    });
                }
            };

            let action: Action = Action::new(
                String::from(action_name),
                Some(format!(
                    "{}: {} for {}",
                    candidate.subject, candidate.task_type, candidate.teacher_name
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor.into(),
                action,
                candidate.course.clone(),
                candidate.due_date,
                StateSnapshot::new(count),
                StateSnapshot::new(count + 1),
            );

            Ok(TransitionResult {
                effect: Effect::Append(candidate),
                audit_event,
            })
        }
        Command::DeleteAssignment { assignment_id } => {
            let record: &Assignment = schedule
                .find(assignment_id)
                .ok_or(CoreError::AssignmentNotFound(assignment_id.value()))?;

            if !can_delete(record, actor) {
                return Err(CoreError::Forbidden {
                    assignment_id: assignment_id.value(),
                    reason: format!(
                        "'{}' may only delete their own {} assignments",
                        actor.display_name(),
                        actor
                            .subject()
                            .map_or("(no subject)", agenda_domain::Subject::value)
                    ),
                });
            }

            let count: usize = schedule.day_count(&record.course, record.due_date);
            let action: Action = Action::new(
                String::from(action_name),
                Some(format!("assignment {assignment_id}")),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor.into(),
                action,
                record.course.clone(),
                record.due_date,
                StateSnapshot::new(count),
                StateSnapshot::new(count.saturating_sub(1)),
            );

            Ok(TransitionResult {
                effect: Effect::Remove(record.clone()),
                audit_event,
            })
        }
    }
}
