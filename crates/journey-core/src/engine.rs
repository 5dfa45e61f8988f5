//! Journey engine: turns a snapshot and "now" into a [`JourneyView`].
//!
//! Every call recomputes from scratch; the engine keeps no state besides its
//! configuration. The only write it issues is a completion toggle, delegated
//! to a [`CompletionStore`].

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::clock::{local_date, Clock};
use crate::completion::{self, ExplicitState, TaskCompletion};
use crate::countdown::Countdown;
use crate::error::{CoreError, Result};
use crate::milestone::icon_for;
use crate::model::{JourneySnapshot, Task};
use crate::phase::{self, Phase};
use crate::progress::{self, TaskFilter};
use crate::providers::CompletionStore;
use crate::reveal;
use crate::status::{self, UnitStatus};
use crate::storage::Config;
use crate::streak;
use crate::urgency::{self, Urgency, UrgencyTier};
use crate::validate::validate;
use crate::view::{JourneyView, NextAction, TaskView, UnitView};

/// Result of a completion toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    pub task_id: String,
    /// Explicit state requested from the store
    pub target: bool,
    /// False when the stored state already matched and no write was issued
    pub written: bool,
}

/// Stateless derivation engine.
#[derive(Debug, Clone, Default)]
pub struct JourneyEngine {
    config: Config,
}

impl JourneyEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The participant's calendar date at `now`.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        local_date(now, self.config.calendar.utc_offset_minutes)
    }

    /// Phase at `now`, or `None` without a program window.
    pub fn phase(&self, snapshot: &JourneySnapshot, now: DateTime<Utc>) -> Option<Phase> {
        snapshot
            .window
            .as_ref()
            .map(|window| phase::classify(self.today(now), window))
    }

    /// Resolved completion of one task within the snapshot.
    pub fn completion_of(&self, snapshot: &JourneySnapshot, task: &Task) -> TaskCompletion {
        let external = task
            .linked_external_category
            .as_deref()
            .map(|category| snapshot.external_for(category));
        completion::resolve(task, snapshot.completion_for(&task.id), external)
    }

    /// Derive the full view at the clock's current instant.
    pub fn derive_now(&self, snapshot: &JourneySnapshot, clock: &dyn Clock) -> JourneyView {
        self.derive(snapshot, clock.now())
    }

    /// Derive the full view at `now`.
    pub fn derive(&self, snapshot: &JourneySnapshot, now: DateTime<Utc>) -> JourneyView {
        let issues = validate(snapshot);
        for issue in &issues {
            warn!("journey data issue: {issue}");
        }

        let today = self.today(now);
        let window = snapshot.window.as_ref();
        let phase = window.map(|w| phase::classify(today, w));
        let days_until_start = window.map(|w| phase::days_until_start(today, w));

        // Tasks attached to a known unit, with their resolved completion.
        let unit_ids: HashSet<&str> = snapshot.units.iter().map(|u| u.id.as_str()).collect();
        let rows: Vec<(&Task, TaskCompletion)> = snapshot
            .tasks
            .iter()
            .filter(|t| unit_ids.contains(t.unit_id.as_str()))
            .map(|t| (t, self.completion_of(snapshot, t)))
            .collect();

        let required_by_unit = progress::by_unit(rows.iter().copied(), TaskFilter::Required);
        let all_by_unit = progress::by_unit(rows.iter().copied(), TaskFilter::All);

        let resolved = status::resolve(
            &snapshot.units,
            window,
            phase,
            today,
            &required_by_unit,
            self.config.lock_policy(),
        );

        let thresholds = self.config.urgency_thresholds();
        let urgency_of = |task: &Task, completion: TaskCompletion| match window {
            Some(w) => urgency::classify(
                task.due_days_offset,
                w.start_date,
                today,
                completion.is_complete,
                thresholds,
            ),
            None => Urgency::none(),
        };

        let mut tasks_by_unit: BTreeMap<&str, Vec<TaskView>> = BTreeMap::new();
        for &(task, completion) in &rows {
            let urgency = urgency_of(task, completion);
            tasks_by_unit
                .entry(task.unit_id.as_str())
                .or_default()
                .push(TaskView {
                    id: task.id.clone(),
                    title: task.title.clone(),
                    is_required: task.is_required,
                    deep_link: task.deep_link.clone(),
                    linked_external_category: task.linked_external_category.clone(),
                    completion,
                    urgency,
                    urgency_label: urgency.label(),
                });
        }

        // A repeated unit id owns nothing; its tasks belong to the first unit.
        let mut claimed: HashSet<&str> = HashSet::new();
        let units: Vec<UnitView> = resolved
            .iter()
            .map(|r| {
                let unit = r.unit;
                let owner = claimed.insert(unit.id.as_str());
                let progress_of = |by_unit: &BTreeMap<String, progress::Progress>| {
                    by_unit
                        .get(&unit.id)
                        .filter(|_| owner)
                        .copied()
                        .unwrap_or_default()
                };
                let reveal_days = unit
                    .reveal_days_before
                    .unwrap_or(self.config.reveal.default_days_before);
                let is_revealed = r.resolvable
                    && reveal::is_revealed(phase, days_until_start.unwrap_or(0), reveal_days);
                UnitView {
                    id: unit.id.clone(),
                    order_index: unit.order_index,
                    title: unit.title.clone(),
                    detail: unit.detail.clone(),
                    status: r.status,
                    is_revealed,
                    scheduled_date: r.scheduled_date,
                    milestone_kind: unit.milestone_kind,
                    icon: icon_for(unit.milestone_kind),
                    required_progress: progress_of(&required_by_unit),
                    progress: progress_of(&all_by_unit),
                    tasks: tasks_by_unit.remove(unit.id.as_str()).unwrap_or_default(),
                }
            })
            .collect();

        let current_unit_id = units
            .iter()
            .find(|u| u.status == UnitStatus::Current)
            .map(|u| u.id.clone());

        let view = JourneyView {
            phase,
            today,
            days_until_start,
            countdown: window.and_then(|w| {
                Countdown::until_start(now, w, self.config.calendar.utc_offset_minutes)
            }),
            current_unit_id,
            next_action: next_action(&units),
            overall: progress::by_filter(rows.iter().copied(), TaskFilter::All),
            required: progress::by_filter(rows.iter().copied(), TaskFilter::Required),
            optional: progress::by_filter(rows.iter().copied(), TaskFilter::Optional),
            categories: progress::by_category(rows.iter().copied()),
            streak: streak::compute(&snapshot.activity_dates, today),
            units,
            issues,
        };

        debug!(
            phase = ?view.phase,
            today = %view.today,
            current = ?view.current_unit_id,
            units = view.units.len(),
            "derived journey view"
        );
        view
    }

    /// Toggle a task the way a tap on its checkbox would.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownTask`] if the task is not in the snapshot,
    /// or the store's error if the write fails.
    pub fn toggle_task<S>(
        &self,
        store: &mut S,
        snapshot: &JourneySnapshot,
        task_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ToggleOutcome>
    where
        S: CompletionStore + ?Sized,
    {
        let task = snapshot
            .task(task_id)
            .ok_or_else(|| CoreError::UnknownTask(task_id.to_string()))?;
        let target = completion::toggle_target(self.completion_of(snapshot, task));
        self.set_task(store, snapshot, task_id, target, now)
    }

    /// Request an explicit state for a task. Idempotent: no write is issued
    /// when the stored explicit state already equals `target`.
    pub fn set_task<S>(
        &self,
        store: &mut S,
        snapshot: &JourneySnapshot,
        task_id: &str,
        target: bool,
        now: DateTime<Utc>,
    ) -> Result<ToggleOutcome>
    where
        S: CompletionStore + ?Sized,
    {
        if snapshot.task(task_id).is_none() {
            return Err(CoreError::UnknownTask(task_id.to_string()));
        }
        let explicit = ExplicitState::from_record(snapshot.completion_for(task_id));
        let written = completion::needs_write(explicit, target);
        if written {
            store.set_completion(task_id, target, now)?;
            info!(task_id, target, "completion written");
        } else {
            debug!(task_id, target, "completion unchanged");
        }
        Ok(ToggleOutcome {
            task_id: task_id.to_string(),
            target,
            written,
        })
    }
}

/// Most urgent unfinished task: highest tier, then earliest due date, then
/// unit order, then task order.
fn next_action(units: &[UnitView]) -> Option<NextAction> {
    units
        .iter()
        .enumerate()
        .flat_map(|(unit_pos, unit)| {
            unit.tasks
                .iter()
                .enumerate()
                .map(move |(task_pos, task)| (unit_pos, task_pos, unit, task))
        })
        .filter(|(_, _, _, task)| {
            !task.completion.is_complete && task.urgency.tier != UrgencyTier::None
        })
        .min_by(|a, b| {
            b.3.urgency
                .tier
                .cmp(&a.3.urgency.tier)
                .then_with(|| cmp_due(a.3.urgency.due_date, b.3.urgency.due_date))
                .then_with(|| a.0.cmp(&b.0))
                .then_with(|| a.1.cmp(&b.1))
        })
        .map(|(_, _, unit, task)| NextAction {
            task_id: task.id.clone(),
            unit_id: unit.id.clone(),
            urgency: task.urgency,
        })
}

fn cmp_due(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
