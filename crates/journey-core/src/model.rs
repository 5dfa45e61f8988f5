//! Snapshot data model consumed by the engine.
//!
//! Every type here is read-only input. Content (window, units, tasks) comes
//! from the content store, completion records from the completion store,
//! and external progress and activity dates from their own providers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::milestone::MilestoneKind;
use crate::schedule::UnitSchedule;

/// Fixed start/end range of a cohort edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramWindow {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ProgramWindow {
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Open-ended window with no end date.
    pub fn open(start_date: NaiveDate) -> Self {
        Self::new(start_date, None)
    }
}

/// A day or stage of the curriculum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumUnit {
    pub id: String,
    pub order_index: i64,
    pub title: String,
    /// Longer body shown on the unit card
    #[serde(default)]
    pub detail: Option<String>,
    /// Days before start at which the content is revealed; `None` uses the
    /// configured default
    #[serde(default)]
    pub reveal_days_before: Option<i64>,
    #[serde(default)]
    pub schedule: UnitSchedule,
    #[serde(default)]
    pub milestone_kind: Option<MilestoneKind>,
    /// Locked (instead of upcoming) until it begins
    #[serde(default)]
    pub hard_lock: bool,
}

impl CurriculumUnit {
    pub fn new(id: impl Into<String>, order_index: i64, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            order_index,
            title: title.into(),
            detail: None,
            reveal_days_before: None,
            schedule: UnitSchedule::Unscheduled,
            milestone_kind: None,
            hard_lock: false,
        }
    }

    pub fn with_schedule(mut self, schedule: UnitSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_reveal_days_before(mut self, days: i64) -> Self {
        self.reveal_days_before = Some(days);
        self
    }

    pub fn with_milestone(mut self, kind: MilestoneKind) -> Self {
        self.milestone_kind = Some(kind);
        self
    }

    pub fn with_hard_lock(mut self) -> Self {
        self.hard_lock = true;
        self
    }
}

/// A single checkable task belonging to a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub unit_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_true")]
    pub is_required: bool,
    /// Due N days before program start
    #[serde(default)]
    pub due_days_offset: Option<i64>,
    #[serde(default)]
    pub linked_external_category: Option<String>,
    #[serde(default)]
    pub deep_link: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Task {
    pub fn new(id: impl Into<String>, unit_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            unit_id: unit_id.into(),
            title: String::new(),
            is_required: true,
            due_days_offset: None,
            linked_external_category: None,
            deep_link: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }

    pub fn due_days_before_start(mut self, days: i64) -> Self {
        self.due_days_offset = Some(days);
        self
    }

    pub fn linked_to(mut self, category: impl Into<String>) -> Self {
        self.linked_external_category = Some(category.into());
        self
    }
}

/// Per (user, task) explicit completion fact.
///
/// A record with `completed_at == None` is an explicit "cleared" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub task_id: String,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl CompletionRecord {
    pub fn completed(task_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            task_id: task_id.into(),
            completed_at: Some(at),
        }
    }

    pub fn cleared(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            completed_at: None,
        }
    }
}

/// Per (user, category) progress of an unrelated checklist feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalProgress {
    pub completed_count: u32,
    pub total_count: u32,
}

impl ExternalProgress {
    pub fn new(completed_count: u32, total_count: u32) -> Self {
        Self {
            completed_count,
            total_count,
        }
    }

    /// Every item of a non-empty checklist is done.
    pub fn is_fully_complete(&self) -> bool {
        self.total_count > 0 && self.completed_count == self.total_count
    }
}

/// Consistent read of every collaborator for one user at one moment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneySnapshot {
    #[serde(default)]
    pub window: Option<ProgramWindow>,
    #[serde(default)]
    pub units: Vec<CurriculumUnit>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub completions: Vec<CompletionRecord>,
    #[serde(default)]
    pub external_progress: std::collections::BTreeMap<String, ExternalProgress>,
    #[serde(default)]
    pub activity_dates: Vec<NaiveDate>,
}

impl JourneySnapshot {
    /// Latest record for a task; later entries supersede earlier ones.
    pub fn completion_for(&self, task_id: &str) -> Option<&CompletionRecord> {
        self.completions.iter().rev().find(|r| r.task_id == task_id)
    }

    /// External progress for a category; absence reads as `{0, 0}`.
    pub fn external_for(&self, category: &str) -> ExternalProgress {
        self.external_progress
            .get(category)
            .copied()
            .unwrap_or_default()
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }
}
