use serde::{Deserialize, Serialize};

/// Which rest duration a Resting phase uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestKind {
    Short,
    Long,
}

/// Current mode of the timer.
///
/// Working and Resting are distinct variants, so the timer can never be in
/// both at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", content = "rest", rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Working,
    Resting(RestKind),
}

impl Phase {
    pub fn is_idle(self) -> bool {
        matches!(self, Phase::Idle)
    }

    pub fn is_working(self) -> bool {
        matches!(self, Phase::Working)
    }

    pub fn is_resting(self) -> bool {
        matches!(self, Phase::Resting(_))
    }

    /// Presentation marker for this phase, `None` while idle.
    pub fn theme(self) -> Option<Theme> {
        match self {
            Phase::Idle => None,
            Phase::Working => Some(Theme::Working),
            Phase::Resting(_) => Some(Theme::Resting),
        }
    }

    /// Heading shown above the readout.
    pub fn status_line(self) -> &'static str {
        match self {
            Phase::Idle => "You are stopped!",
            Phase::Working => "You are working!",
            Phase::Resting(_) => "You are resting!",
        }
    }
}

/// Styling marker derived from the phase.
///
/// The display layer applies it; nothing in the core stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Working,
    Resting,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Working => "working",
            Theme::Resting => "resting",
        }
    }
}
