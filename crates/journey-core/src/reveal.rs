//! Reveal gate: hides unit content until the countdown gets close.
//!
//! The gate only decides; redaction happens at the presentation boundary
//! through [`teaser`].

use crate::phase::Phase;

/// Default number of days before start at which content is revealed.
pub const DEFAULT_REVEAL_DAYS_BEFORE: i64 = 7;

/// Placeholder rendered in place of hidden content.
pub const DEFAULT_PLACEHOLDER: &str = "???";

/// Whether a unit's content may be shown.
///
/// Without a known phase nothing is revealed.
pub fn is_revealed(phase: Option<Phase>, days_until_start: i64, reveal_days_before: i64) -> bool {
    match phase {
        None => false,
        Some(Phase::Before) => days_until_start <= reveal_days_before,
        Some(Phase::During) | Some(Phase::After) => true,
    }
}

/// Text to render: the content itself when revealed, else the placeholder.
pub fn teaser<'a>(text: &'a str, revealed: bool, placeholder: &'a str) -> &'a str {
    if revealed {
        text
    } else {
        placeholder
    }
}
