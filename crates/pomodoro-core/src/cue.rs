//! Audio cues played on phase entry.
//!
//! There are exactly two cues. Playback is fire-and-forget: a player either
//! starts the sound and returns, or returns a [`CueError`] that callers log and
//! otherwise ignore.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::CueError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    WorkStart,
    RestStart,
}

impl Cue {
    /// Number of terminal bells rung for this cue.
    fn bells(self) -> usize {
        match self {
            Cue::WorkStart => 1,
            Cue::RestStart => 2,
        }
    }
}

pub trait CuePlayer {
    fn play(&self, cue: Cue) -> Result<(), CueError>;
}

impl<P: CuePlayer + ?Sized> CuePlayer for Box<P> {
    fn play(&self, cue: Cue) -> Result<(), CueError> {
        (**self).play(cue)
    }
}

/// Rings the terminal bell on a writer (stderr by default).
pub struct TerminalBell<W: Write = std::io::Stderr> {
    out: Mutex<W>,
}

impl TerminalBell {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write> CuePlayer for TerminalBell<W> {
    fn play(&self, cue: Cue) -> Result<(), CueError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| CueError::Unavailable("bell writer poisoned".into()))?;
        let bells = "\x07".repeat(cue.bells());
        out.write_all(bells.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| CueError::PlaybackFailed(e.to_string()))
    }
}

/// Spawns an external audio player on one of two fixed sound files.
///
/// The child is reaped on a detached thread; overlapping cues simply start
/// another player.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: String,
    work_start: String,
    rest_start: String,
}

impl CommandPlayer {
    pub fn new(
        program: impl Into<String>,
        work_start: impl Into<String>,
        rest_start: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            work_start: work_start.into(),
            rest_start: rest_start.into(),
        }
    }

    /// Platform default player and the freedesktop sound theme on Linux.
    pub fn system_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new(
                "afplay",
                "/System/Library/Sounds/Glass.aiff",
                "/System/Library/Sounds/Hero.aiff",
            )
        } else {
            Self::new(
                "paplay",
                "/usr/share/sounds/freedesktop/stereo/bell.oga",
                "/usr/share/sounds/freedesktop/stereo/complete.oga",
            )
        }
    }

    fn sound_for(&self, cue: Cue) -> &str {
        match cue {
            Cue::WorkStart => &self.work_start,
            Cue::RestStart => &self.rest_start,
        }
    }
}

impl CuePlayer for CommandPlayer {
    fn play(&self, cue: Cue) -> Result<(), CueError> {
        Command::new(&self.program)
            .arg(self.sound_for(cue))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|mut child| {
                std::thread::spawn(move || child.wait());
            })
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    CueError::Unavailable(format!("{} not found", self.program))
                }
                _ => CueError::PlaybackFailed(e.to_string()),
            })
    }
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&self, _cue: Cue) -> Result<(), CueError> {
        Ok(())
    }
}

/// Remembers every cue it was asked to play.
#[derive(Debug, Default)]
pub struct RecordingPlayer {
    played: Mutex<Vec<Cue>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<Cue> {
        self.played
            .lock()
            .map(|cues| cues.clone())
            .unwrap_or_default()
    }
}

impl CuePlayer for RecordingPlayer {
    fn play(&self, cue: Cue) -> Result<(), CueError> {
        self.played
            .lock()
            .map_err(|_| CueError::Unavailable("recorder poisoned".into()))?
            .push(cue);
        Ok(())
    }
}
