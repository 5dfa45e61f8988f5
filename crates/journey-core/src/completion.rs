//! Task completion model.
//!
//! Merges two sources per task: the user's explicit record and a completion
//! inferred from a linked external checklist category. Explicit state always
//! wins; inference only adds a `true` when no record exists.

use serde::{Deserialize, Serialize};

use crate::model::{CompletionRecord, ExternalProgress, Task};

/// Explicit completion state read from the completion store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplicitState {
    /// No record: inference may apply
    Absent,
    /// Record with a completion timestamp
    Completed,
    /// Record explicitly cleared by the user
    Cleared,
}

impl ExplicitState {
    pub fn from_record(record: Option<&CompletionRecord>) -> Self {
        match record {
            None => ExplicitState::Absent,
            Some(r) if r.completed_at.is_some() => ExplicitState::Completed,
            Some(_) => ExplicitState::Cleared,
        }
    }
}

/// Resolved completion of a task with its provenance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
    pub is_complete: bool,
    pub is_auto_completed: bool,
}

/// Resolve a task's completion.
///
/// `external` is only consulted when the task links a category.
pub fn resolve(
    task: &Task,
    record: Option<&CompletionRecord>,
    external: Option<ExternalProgress>,
) -> TaskCompletion {
    let inferred = task.linked_external_category.is_some()
        && external.is_some_and(|p| p.is_fully_complete());

    match ExplicitState::from_record(record) {
        ExplicitState::Completed => TaskCompletion {
            is_complete: true,
            is_auto_completed: false,
        },
        ExplicitState::Cleared => TaskCompletion::default(),
        ExplicitState::Absent => TaskCompletion {
            is_complete: inferred,
            is_auto_completed: inferred,
        },
    }
}

/// State a toggle should write.
///
/// Toggling an auto-completed task pins it as explicitly complete so it
/// survives the external category regressing.
pub fn toggle_target(current: TaskCompletion) -> bool {
    if current.is_auto_completed {
        true
    } else {
        !current.is_complete
    }
}

/// Whether writing `target` would change the stored explicit state.
pub fn needs_write(explicit: ExplicitState, target: bool) -> bool {
    match (explicit, target) {
        (ExplicitState::Completed, true) => false,
        (ExplicitState::Cleared, false) => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn linked() -> Task {
        Task::new("t1", "u1").linked_to("visa")
    }

    #[test]
    fn explicit_record_completes() {
        let record = CompletionRecord::completed("t1", Utc::now());
        let c = resolve(&Task::new("t1", "u1"), Some(&record), None);
        assert!(c.is_complete);
        assert!(!c.is_auto_completed);
    }

    #[test]
    fn inference_requires_full_nonempty_category() {
        let task = linked();
        assert!(resolve(&task, None, Some(ExternalProgress::new(3, 3))).is_auto_completed);
        assert!(!resolve(&task, None, Some(ExternalProgress::new(2, 3))).is_complete);
        assert!(!resolve(&task, None, Some(ExternalProgress::new(0, 0))).is_complete);
        assert!(!resolve(&task, None, None).is_complete);
    }

    #[test]
    fn unlinked_task_ignores_external_progress() {
        let task = Task::new("t1", "u1");
        let c = resolve(&task, None, Some(ExternalProgress::new(1, 1)));
        assert!(!c.is_complete);
    }

    #[test]
    fn explicit_beats_inference() {
        let task = linked();
        let record = CompletionRecord::completed("t1", Utc::now());
        let c = resolve(&task, Some(&record), Some(ExternalProgress::new(2, 2)));
        assert_eq!(
            c,
            TaskCompletion {
                is_complete: true,
                is_auto_completed: false
            }
        );

        let cleared = CompletionRecord::cleared("t1");
        let c = resolve(&task, Some(&cleared), Some(ExternalProgress::new(2, 2)));
        assert_eq!(c, TaskCompletion::default());
    }

    #[test]
    fn explicit_survives_external_regression() {
        let task = linked();
        let record = CompletionRecord::completed("t1", Utc::now());
        let c = resolve(&task, Some(&record), Some(ExternalProgress::new(1, 2)));
        assert!(c.is_complete);
    }

    #[test]
    fn toggling_auto_completed_pins_completion() {
        let auto = TaskCompletion {
            is_complete: true,
            is_auto_completed: true,
        };
        let explicit = TaskCompletion {
            is_complete: true,
            is_auto_completed: false,
        };
        assert!(toggle_target(auto));
        assert!(!toggle_target(explicit));
        assert!(toggle_target(TaskCompletion::default()));
    }

    #[test]
    fn redundant_writes_are_skipped() {
        assert!(!needs_write(ExplicitState::Completed, true));
        assert!(!needs_write(ExplicitState::Cleared, false));
        assert!(needs_write(ExplicitState::Absent, false));
        assert!(needs_write(ExplicitState::Absent, true));
        assert!(needs_write(ExplicitState::Completed, false));
    }
}
