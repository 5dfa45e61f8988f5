//! Milestone kinds and their iconography.
//!
//! Unit icons are a closed enum with an exhaustive mapping; unknown legacy
//! keys resolve to [`MilestoneKind::Other`].

use serde::{Deserialize, Serialize};

/// Kind of milestone a unit represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    Kickoff,
    Workshop,
    Mentoring,
    Deliverable,
    Review,
    Celebration,
    #[serde(other)]
    Other,
}

/// Icon rendered next to a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneIcon {
    Rocket,
    Lightbulb,
    Users,
    FileCheck,
    Search,
    Trophy,
    Calendar,
}

impl MilestoneKind {
    pub const ALL: [MilestoneKind; 7] = [
        MilestoneKind::Kickoff,
        MilestoneKind::Workshop,
        MilestoneKind::Mentoring,
        MilestoneKind::Deliverable,
        MilestoneKind::Review,
        MilestoneKind::Celebration,
        MilestoneKind::Other,
    ];

    /// Map a free-form key (including legacy aliases) to a kind.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "kickoff" | "kick-off" | "kick_off" | "start" | "launch" => MilestoneKind::Kickoff,
            "workshop" | "session" | "class" => MilestoneKind::Workshop,
            "mentoring" | "mentor" | "coaching" => MilestoneKind::Mentoring,
            "deliverable" | "submission" | "assignment" => MilestoneKind::Deliverable,
            "review" | "feedback" | "retro" => MilestoneKind::Review,
            "celebration" | "demo_day" | "demo-day" | "graduation" => MilestoneKind::Celebration,
            _ => MilestoneKind::Other,
        }
    }

    pub fn icon(&self) -> MilestoneIcon {
        match self {
            MilestoneKind::Kickoff => MilestoneIcon::Rocket,
            MilestoneKind::Workshop => MilestoneIcon::Lightbulb,
            MilestoneKind::Mentoring => MilestoneIcon::Users,
            MilestoneKind::Deliverable => MilestoneIcon::FileCheck,
            MilestoneKind::Review => MilestoneIcon::Search,
            MilestoneKind::Celebration => MilestoneIcon::Trophy,
            MilestoneKind::Other => MilestoneIcon::Calendar,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MilestoneKind::Kickoff => "Kickoff",
            MilestoneKind::Workshop => "Workshop",
            MilestoneKind::Mentoring => "Mentoring",
            MilestoneKind::Deliverable => "Deliverable",
            MilestoneKind::Review => "Review",
            MilestoneKind::Celebration => "Celebration",
            MilestoneKind::Other => "Milestone",
        }
    }
}

impl MilestoneIcon {
    /// Icon-set identifier used by the presentation layer.
    pub fn name(&self) -> &'static str {
        match self {
            MilestoneIcon::Rocket => "rocket",
            MilestoneIcon::Lightbulb => "lightbulb",
            MilestoneIcon::Users => "users",
            MilestoneIcon::FileCheck => "file-check",
            MilestoneIcon::Search => "search",
            MilestoneIcon::Trophy => "trophy",
            MilestoneIcon::Calendar => "calendar",
        }
    }
}

/// Icon for an optional kind; units without a kind get the fallback icon.
pub fn icon_for(kind: Option<MilestoneKind>) -> MilestoneIcon {
    kind.unwrap_or(MilestoneKind::Other).icon()
}
