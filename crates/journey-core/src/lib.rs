//! # Journey Core Library
//!
//! This library derives the view-ready state of a cohort program's journey
//! (its multi-day curriculum) from a handful of slowly-changing facts: today's
//! date, the program window, the ordered curriculum units, and the user's
//! completion records. It performs no I/O; collaborators are read into a
//! [`JourneySnapshot`] and every derivation is recomputed from scratch.
//!
//! ## Architecture
//!
//! - **Temporal Classifier** ([`phase`]): BEFORE / DURING / AFTER
//! - **Status Resolver** ([`status`]): locked, upcoming, current, completed
//! - **Reveal Gate** ([`reveal`]): countdown-based content hiding
//! - **Task Completion Model** ([`completion`]): explicit + inferred completion
//! - **Urgency Classifier** ([`urgency`]): due-date tiers and labels
//! - **Progress Aggregator** ([`progress`]): completed/total rollups
//! - **Streak Counter** ([`streak`]): consecutive active days
//!
//! ## Key Components
//!
//! - [`JourneyEngine`]: assembles a [`JourneyView`] and issues completion toggles
//! - [`Config`]: engine configuration management
//! - [`providers`]: collaborator traits and an in-memory store

pub mod clock;
pub mod completion;
pub mod countdown;
pub mod engine;
pub mod error;
pub mod milestone;
pub mod model;
pub mod phase;
pub mod progress;
pub mod providers;
pub mod reveal;
pub mod schedule;
pub mod status;
pub mod storage;
pub mod streak;
pub mod urgency;
pub mod validate;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use completion::TaskCompletion;
pub use countdown::Countdown;
pub use engine::{JourneyEngine, ToggleOutcome};
pub use error::{ConfigError, CoreError};
pub use milestone::{MilestoneIcon, MilestoneKind};
pub use model::{
    CompletionRecord, CurriculumUnit, ExternalProgress, JourneySnapshot, ProgramWindow, Task,
};
pub use phase::Phase;
pub use progress::{Progress, TaskFilter};
pub use providers::{
    ActivityLogProvider, CompletionStore, ContentStore, ExternalProgressProvider, MemoryStore,
};
pub use schedule::UnitSchedule;
pub use status::{LockPolicy, UnitStatus};
pub use storage::{Config, JourneyDocument};
pub use streak::StreakSummary;
pub use urgency::{Urgency, UrgencyThresholds, UrgencyTier};
pub use validate::DataIssue;
pub use view::{JourneyView, NextAction, TaskView, UnitView};
