//! Snapshot diagnostics.
//!
//! Malformed input never aborts a derivation: affected units and tasks
//! degrade (upcoming, hidden, undated) and the problems are reported here.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::JourneySnapshot;

/// A data-quality problem found in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIssue {
    MissingProgramWindow,
    EndBeforeStart,
    DuplicateOrderIndex { unit_id: String, order_index: i64 },
    OrderIndexOutOfSequence { unit_id: String, order_index: i64 },
    DuplicateUnitId { unit_id: String },
    OrphanTask { task_id: String, unit_id: String },
    DuplicateTaskId { task_id: String },
    NegativeRevealDays { unit_id: String, days: i64 },
}

impl std::fmt::Display for DataIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataIssue::MissingProgramWindow => write!(f, "program window is missing"),
            DataIssue::EndBeforeStart => write!(f, "program ends before it starts"),
            DataIssue::DuplicateOrderIndex { unit_id, order_index } => {
                write!(f, "unit '{unit_id}' reuses order index {order_index}")
            }
            DataIssue::OrderIndexOutOfSequence { unit_id, order_index } => {
                write!(f, "unit '{unit_id}' (order index {order_index}) is out of sequence")
            }
            DataIssue::DuplicateUnitId { unit_id } => {
                write!(f, "unit id '{unit_id}' is not unique")
            }
            DataIssue::OrphanTask { task_id, unit_id } => {
                write!(f, "task '{task_id}' references unknown unit '{unit_id}'")
            }
            DataIssue::DuplicateTaskId { task_id } => {
                write!(f, "task id '{task_id}' is not unique")
            }
            DataIssue::NegativeRevealDays { unit_id, days } => {
                write!(f, "unit '{unit_id}' has negative reveal window ({days} days)")
            }
        }
    }
}

/// Collect every issue in the snapshot, in a stable order.
pub fn validate(snapshot: &JourneySnapshot) -> Vec<DataIssue> {
    let mut issues = Vec::new();

    match &snapshot.window {
        None => issues.push(DataIssue::MissingProgramWindow),
        Some(window) => {
            if window.end_date.is_some_and(|end| end < window.start_date) {
                issues.push(DataIssue::EndBeforeStart);
            }
        }
    }

    let mut seen_indexes = HashSet::new();
    let mut seen_ids = HashSet::new();
    let mut previous: Option<i64> = None;
    for unit in &snapshot.units {
        if !seen_ids.insert(unit.id.as_str()) {
            issues.push(DataIssue::DuplicateUnitId {
                unit_id: unit.id.clone(),
            });
        }
        if !seen_indexes.insert(unit.order_index) {
            issues.push(DataIssue::DuplicateOrderIndex {
                unit_id: unit.id.clone(),
                order_index: unit.order_index,
            });
        } else if previous.is_some_and(|p| unit.order_index < p) {
            issues.push(DataIssue::OrderIndexOutOfSequence {
                unit_id: unit.id.clone(),
                order_index: unit.order_index,
            });
        }
        previous = Some(unit.order_index);

        if let Some(days) = unit.reveal_days_before.filter(|d| *d < 0) {
            issues.push(DataIssue::NegativeRevealDays {
                unit_id: unit.id.clone(),
                days,
            });
        }
    }

    let mut seen_tasks = HashSet::new();
    for task in &snapshot.tasks {
        if !seen_tasks.insert(task.id.as_str()) {
            issues.push(DataIssue::DuplicateTaskId {
                task_id: task.id.clone(),
            });
        }
        if !seen_ids.contains(task.unit_id.as_str()) {
            issues.push(DataIssue::OrphanTask {
                task_id: task.id.clone(),
                unit_id: task.unit_id.clone(),
            });
        }
    }

    issues
}
