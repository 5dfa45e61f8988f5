//! Collaborator interfaces consumed by the engine.
//!
//! The engine never performs I/O itself. The surrounding application reads
//! these providers into a [`JourneySnapshot`] and hands it over; completion
//! writes are issued through [`CompletionStore::set_completion`].

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Result;
use crate::model::{
    CompletionRecord, CurriculumUnit, ExternalProgress, JourneySnapshot, ProgramWindow, Task,
};

/// Read-only curriculum content.
pub trait ContentStore {
    fn program_window(&self) -> Result<Option<ProgramWindow>>;
    fn units(&self) -> Result<Vec<CurriculumUnit>>;
    fn tasks(&self) -> Result<Vec<Task>>;
}

/// The current user's explicit completion records.
pub trait CompletionStore {
    fn records(&self) -> Result<Vec<CompletionRecord>>;

    /// Record an explicit completion (`true`) or an explicit clear (`false`).
    /// Writes for the same task must apply in call order.
    fn set_completion(&mut self, task_id: &str, complete: bool, at: DateTime<Utc>) -> Result<()>;
}

/// Progress of linked checklist categories.
pub trait ExternalProgressProvider {
    /// `None` when the category is unknown; the engine reads it as `{0, 0}`.
    fn progress(&self, category: &str) -> Result<Option<ExternalProgress>>;
}

/// Distinct calendar dates on which the user was active.
pub trait ActivityLogProvider {
    fn active_dates(&self) -> Result<Vec<NaiveDate>>;
}

/// Read every collaborator into one snapshot.
///
/// External progress is fetched only for categories some task links to.
pub fn read_snapshot<C, S, E, A>(
    content: &C,
    completions: &S,
    external: &E,
    activity: &A,
) -> Result<JourneySnapshot>
where
    C: ContentStore + ?Sized,
    S: CompletionStore + ?Sized,
    E: ExternalProgressProvider + ?Sized,
    A: ActivityLogProvider + ?Sized,
{
    let tasks = content.tasks()?;
    let mut external_progress = std::collections::BTreeMap::new();
    for category in tasks.iter().filter_map(|t| t.linked_external_category.as_deref()) {
        if external_progress.contains_key(category) {
            continue;
        }
        if let Some(progress) = external.progress(category)? {
            external_progress.insert(category.to_string(), progress);
        }
    }

    Ok(JourneySnapshot {
        window: content.program_window()?,
        units: content.units()?,
        tasks,
        completions: completions.records()?,
        external_progress,
        activity_dates: activity.active_dates()?,
    })
}

/// In-memory implementation of every collaborator, backed by a snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: JourneySnapshot,
}

impl MemoryStore {
    pub fn new(data: JourneySnapshot) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &JourneySnapshot {
        &self.data
    }

    pub fn into_inner(self) -> JourneySnapshot {
        self.data
    }

    /// Replace a category's external progress.
    pub fn set_external(&mut self, category: impl Into<String>, progress: ExternalProgress) {
        self.data.external_progress.insert(category.into(), progress);
    }

    /// Log activity on a date; repeated dates are stored once.
    pub fn log_activity(&mut self, date: NaiveDate) {
        if !self.data.activity_dates.contains(&date) {
            self.data.activity_dates.push(date);
            self.data.activity_dates.sort_unstable();
        }
    }
}

impl ContentStore for MemoryStore {
    fn program_window(&self) -> Result<Option<ProgramWindow>> {
        Ok(self.data.window)
    }

    fn units(&self) -> Result<Vec<CurriculumUnit>> {
        Ok(self.data.units.clone())
    }

    fn tasks(&self) -> Result<Vec<Task>> {
        Ok(self.data.tasks.clone())
    }
}

impl CompletionStore for MemoryStore {
    fn records(&self) -> Result<Vec<CompletionRecord>> {
        Ok(self.data.completions.clone())
    }

    fn set_completion(&mut self, task_id: &str, complete: bool, at: DateTime<Utc>) -> Result<()> {
        let record = if complete {
            CompletionRecord::completed(task_id, at)
        } else {
            CompletionRecord::cleared(task_id)
        };
        self.data.completions.retain(|r| r.task_id != task_id);
        self.data.completions.push(record);
        Ok(())
    }
}

impl ExternalProgressProvider for MemoryStore {
    fn progress(&self, category: &str) -> Result<Option<ExternalProgress>> {
        Ok(self.data.external_progress.get(category).copied())
    }
}

impl ActivityLogProvider for MemoryStore {
    fn active_dates(&self) -> Result<Vec<NaiveDate>> {
        Ok(self.data.activity_dates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store() -> MemoryStore {
        MemoryStore::new(JourneySnapshot {
            window: Some(ProgramWindow::open(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())),
            units: vec![CurriculumUnit::new("u1", 0, "Day 1")],
            tasks: vec![
                Task::new("t1", "u1").linked_to("visa"),
                Task::new("t2", "u1").linked_to("visa"),
                Task::new("t3", "u1").linked_to("unknown"),
            ],
            ..Default::default()
        })
    }

    #[test]
    fn read_snapshot_fetches_linked_categories_only() {
        let mut s = store();
        s.set_external("visa", ExternalProgress::new(1, 2));
        s.set_external("unrelated", ExternalProgress::new(5, 5));
        let snapshot = read_snapshot(&s, &s, &s, &s).unwrap();
        assert_eq!(snapshot.external_progress.len(), 1);
        assert_eq!(snapshot.external_for("visa"), ExternalProgress::new(1, 2));
        assert_eq!(snapshot.external_for("unknown"), ExternalProgress::default());
    }

    #[test]
    fn set_completion_replaces_previous_record() {
        let mut s = store();
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        s.set_completion("t1", true, at).unwrap();
        s.set_completion("t1", false, at).unwrap();
        let records = s.records().unwrap();
        assert_eq!(records, vec![CompletionRecord::cleared("t1")]);
    }

    #[test]
    fn log_activity_deduplicates() {
        let mut s = store();
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        s.log_activity(day);
        s.log_activity(day);
        assert_eq!(s.active_dates().unwrap(), vec![day]);
    }
}
