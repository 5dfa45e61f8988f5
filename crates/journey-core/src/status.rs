//! Day/stage status resolver.
//!
//! There is no stored "current" pointer: statuses are recomputed from the
//! phase, today's date and required-task progress on every call.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{CurriculumUnit, ProgramWindow};
use crate::phase::Phase;
use crate::progress::Progress;

/// Status of a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Locked,
    Upcoming,
    Current,
    Completed,
}

/// Locking policy for units that have not begun.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockPolicy {
    /// During the program, lock every unit after the current one
    #[serde(default)]
    pub lock_future_units: bool,
}

/// A unit with its derived status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUnit<'a> {
    pub unit: &'a CurriculumUnit,
    pub status: UnitStatus,
    pub scheduled_date: Option<NaiveDate>,
    /// False when the unit's `order_index` or id collides with an earlier unit
    pub resolvable: bool,
}

/// Units in canonical order, flagging `order_index` and id collisions.
fn canonical_order(units: &[CurriculumUnit]) -> Vec<(&CurriculumUnit, bool)> {
    let mut ordered: Vec<&CurriculumUnit> = units.iter().collect();
    ordered.sort_by_key(|u| u.order_index);

    let mut previous: Option<i64> = None;
    let mut seen_ids = HashSet::new();
    ordered
        .into_iter()
        .map(|unit| {
            let fresh_id = seen_ids.insert(unit.id.as_str());
            let resolvable = fresh_id && previous != Some(unit.order_index);
            previous = Some(unit.order_index);
            (unit, resolvable)
        })
        .collect()
}

/// Resolve every unit's status.
///
/// `required` maps unit id to its required-task progress; missing entries
/// read as an empty set. `phase` is `None` when the program window is unknown.
pub fn resolve<'a>(
    units: &'a [CurriculumUnit],
    window: Option<&ProgramWindow>,
    phase: Option<Phase>,
    today: NaiveDate,
    required: &BTreeMap<String, Progress>,
    policy: LockPolicy,
) -> Vec<ResolvedUnit<'a>> {
    let ordered = canonical_order(units);
    let progress_of = |unit: &CurriculumUnit| required.get(&unit.id).copied().unwrap_or_default();
    let scheduled = |unit: &CurriculumUnit| window.and_then(|w| unit.schedule.resolve(w));

    let current_pos = match phase {
        Some(Phase::During) => {
            let candidates: Vec<usize> = ordered
                .iter()
                .enumerate()
                .filter(|(_, (_, resolvable))| *resolvable)
                .map(|(pos, _)| pos)
                .collect();
            candidates
                .iter()
                .copied()
                .find(|&pos| {
                    let unit = ordered[pos].0;
                    scheduled(unit) == Some(today) || !progress_of(unit).is_all_done()
                })
                .or_else(|| candidates.last().copied())
        }
        _ => None,
    };

    ordered
        .iter()
        .enumerate()
        .map(|(pos, &(unit, resolvable))| {
            let status = if !resolvable {
                UnitStatus::Upcoming
            } else {
                match phase {
                    None => UnitStatus::Upcoming,
                    Some(Phase::After) => UnitStatus::Completed,
                    Some(Phase::Before) => {
                        if progress_of(unit).is_all_done() {
                            UnitStatus::Completed
                        } else if unit.hard_lock {
                            UnitStatus::Locked
                        } else {
                            UnitStatus::Upcoming
                        }
                    }
                    Some(Phase::During) => match current_pos {
                        Some(current) if pos < current => UnitStatus::Completed,
                        Some(current) if pos == current => UnitStatus::Current,
                        _ if policy.lock_future_units || unit.hard_lock => UnitStatus::Locked,
                        _ => UnitStatus::Upcoming,
                    },
                }
            };
            ResolvedUnit {
                unit,
                status,
                scheduled_date: scheduled(unit),
                resolvable,
            }
        })
        .collect()
}
