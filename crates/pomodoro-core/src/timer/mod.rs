mod config;
mod engine;
mod phase;
mod session;
mod ticker;

pub use config::TimerConfig;
pub use engine::{Controls, PomodoroEngine, Snapshot, Stats};
pub use phase::{Phase, RestKind, Theme};
pub use session::Session;
pub use ticker::Ticker;
