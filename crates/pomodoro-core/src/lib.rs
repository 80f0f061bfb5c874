//! # Pomodoro Core Library
//!
//! Core logic for a Pomodoro timer: alternating work and rest intervals, a
//! long rest after a configurable number of work intervals, audible cues on
//! every phase change, and running statistics.
//!
//! ## Architecture
//!
//! - **Engine**: a pure state machine advanced by one `tick()` per second
//! - **Session**: drives an engine with a tokio ticker and a cue player
//! - **Cues**: fire-and-forget audio collaborators, never fatal
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`PomodoroEngine`]: phase state machine and statistics
//! - [`Session`]: ticker and cue wiring around one engine
//! - [`CuePlayer`]: trait for audio cue backends
//! - [`Config`]: application configuration management

pub mod cue;
pub mod error;
pub mod events;
pub mod format;
pub mod storage;
pub mod timer;

pub use cue::{Cue, CuePlayer};
pub use error::{ConfigError, CoreError, CueError};
pub use events::{Event, Trigger};
pub use format::{format_clock, format_duration};
pub use storage::Config;
pub use timer::{Phase, PomodoroEngine, RestKind, Session, Snapshot, Stats, Theme, TimerConfig};
