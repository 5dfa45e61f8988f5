//! View-ready state produced by the engine.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::completion::TaskCompletion;
use crate::countdown::Countdown;
use crate::milestone::{MilestoneIcon, MilestoneKind};
use crate::phase::Phase;
use crate::progress::Progress;
use crate::reveal::teaser;
use crate::status::UnitStatus;
use crate::streak::StreakSummary;
use crate::urgency::Urgency;
use crate::validate::DataIssue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub is_required: bool,
    pub deep_link: Option<String>,
    pub linked_external_category: Option<String>,
    pub completion: TaskCompletion,
    pub urgency: Urgency,
    pub urgency_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitView {
    pub id: String,
    pub order_index: i64,
    /// Unredacted content; render through [`UnitView::display_title`]
    pub title: String,
    pub detail: Option<String>,
    pub status: UnitStatus,
    pub is_revealed: bool,
    pub scheduled_date: Option<NaiveDate>,
    pub milestone_kind: Option<MilestoneKind>,
    pub icon: MilestoneIcon,
    /// Required tasks only; drives "current" and the all-done badge
    pub required_progress: Progress,
    pub progress: Progress,
    pub tasks: Vec<TaskView>,
}

impl UnitView {
    pub fn display_title<'a>(&'a self, placeholder: &'a str) -> &'a str {
        teaser(&self.title, self.is_revealed, placeholder)
    }

    pub fn display_detail<'a>(&'a self, placeholder: &'a str) -> Option<&'a str> {
        self.detail
            .as_deref()
            .map(|detail| teaser(detail, self.is_revealed, placeholder))
    }

    pub fn is_all_done(&self) -> bool {
        self.required_progress.is_all_done()
    }
}

/// The single most pressing unfinished task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextAction {
    pub task_id: String,
    pub unit_id: String,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyView {
    /// `None` when the program window is missing
    pub phase: Option<Phase>,
    pub today: NaiveDate,
    pub days_until_start: Option<i64>,
    pub countdown: Option<Countdown>,
    pub current_unit_id: Option<String>,
    pub units: Vec<UnitView>,
    pub overall: Progress,
    pub required: Progress,
    pub optional: Progress,
    pub categories: BTreeMap<String, Progress>,
    pub next_action: Option<NextAction>,
    pub streak: StreakSummary,
    pub issues: Vec<DataIssue>,
}

impl JourneyView {
    pub fn unit(&self, id: &str) -> Option<&UnitView> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&TaskView> {
        self.units
            .iter()
            .flat_map(|u| u.tasks.iter())
            .find(|t| t.id == id)
    }

    pub fn current_unit(&self) -> Option<&UnitView> {
        self.current_unit_id.as_deref().and_then(|id| self.unit(id))
    }
}
