//! Progress aggregation.
//!
//! One reduction (`completed / total`) applied at several granularities:
//! per unit, per filter and per linked external category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::completion::TaskCompletion;
use crate::model::Task;

/// Completed-over-total counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: u32,
    pub total: u32,
}

impl Progress {
    pub fn new(completed: u32, total: u32) -> Self {
        Self { completed, total }
    }

    /// Fraction in `[0, 1]`; an empty set is `0.0`.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.completed) / f64::from(self.total)
        }
    }

    /// Whole percent, rounded down so 99.9% never shows as 100.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((u64::from(self.completed) * 100) / u64::from(self.total)).min(100) as u8
    }

    /// Every item is complete. Never true for an empty set.
    pub fn is_all_done(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    fn push(&mut self, complete: bool) {
        self.total += 1;
        if complete {
            self.completed += 1;
        }
    }
}

/// Task subset selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    All,
    Required,
    Optional,
    Completed,
    Incomplete,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task, completion: TaskCompletion) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Required => task.is_required,
            TaskFilter::Optional => !task.is_required,
            TaskFilter::Completed => completion.is_complete,
            TaskFilter::Incomplete => !completion.is_complete,
        }
    }
}

/// Reduce any sequence of completion flags.
pub fn aggregate<I>(flags: I) -> Progress
where
    I: IntoIterator<Item = bool>,
{
    let mut progress = Progress::default();
    for flag in flags {
        progress.push(flag);
    }
    progress
}

/// Progress of the tasks matching `filter`.
pub fn by_filter<'a, I>(tasks: I, filter: TaskFilter) -> Progress
where
    I: IntoIterator<Item = (&'a Task, TaskCompletion)>,
{
    aggregate(
        tasks
            .into_iter()
            .filter(|(task, completion)| filter.matches(task, *completion))
            .map(|(_, completion)| completion.is_complete),
    )
}

/// Progress of each unit's tasks matching `filter`, keyed by unit id.
pub fn by_unit<'a, I>(tasks: I, filter: TaskFilter) -> BTreeMap<String, Progress>
where
    I: IntoIterator<Item = (&'a Task, TaskCompletion)>,
{
    let mut groups: BTreeMap<String, Progress> = BTreeMap::new();
    for (task, completion) in tasks {
        if filter.matches(task, completion) {
            groups
                .entry(task.unit_id.clone())
                .or_default()
                .push(completion.is_complete);
        }
    }
    groups
}

/// Progress grouped by linked external category; unlinked tasks are skipped.
pub fn by_category<'a, I>(tasks: I) -> BTreeMap<String, Progress>
where
    I: IntoIterator<Item = (&'a Task, TaskCompletion)>,
{
    let mut groups: BTreeMap<String, Progress> = BTreeMap::new();
    for (task, completion) in tasks {
        if let Some(category) = &task.linked_external_category {
            groups
                .entry(category.clone())
                .or_default()
                .push(completion.is_complete);
        }
    }
    groups
}
