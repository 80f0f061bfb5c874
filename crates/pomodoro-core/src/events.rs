use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cue::Cue;
use crate::timer::Phase;

/// What caused a phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// A control was pressed.
    Manual,
    /// The countdown reached zero.
    Expired,
}

/// Every state change of the engine produces an Event.
/// The display renders them; the session plays the cue they carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PhaseChanged {
        from: Phase,
        to: Phase,
        trigger: Trigger,
        remaining_secs: u32,
        cue: Cue,
        at: DateTime<Utc>,
    },
    CountingToggled {
        counting: bool,
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The audio cue this event asks for, if any.
    pub fn cue(&self) -> Option<Cue> {
        match self {
            Event::PhaseChanged { cue, .. } => Some(*cue),
            _ => None,
        }
    }
}
