//! Pomodoro phase engine.
//!
//! The engine is a pure state machine. It has no clock and no thread: the
//! caller delivers one `tick()` per elapsed second while the countdown is
//! running (see [`super::Session`] for the tokio-driven driver).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Working <-> Resting(Short | Long)
//! ```
//!
//! Any phase can be entered from any other phase by a control; the countdown
//! reaching zero moves Working -> Resting and Resting -> Working.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PomodoroEngine::new(TimerConfig::default());
//! engine.start_work();
//! // Once per second:
//! if let Some(event) = engine.tick() { /* phase changed */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::config::TimerConfig;
use super::phase::{Phase, RestKind, Theme};
use crate::cue::Cue;
use crate::events::{Event, Trigger};
use crate::format::{format_clock, format_duration};

/// Running totals for the lifetime of one engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Long rests taken.
    pub completed_cycles: u32,
    /// Work intervals that ran down to zero.
    pub completed_pomodoros: u32,
    /// Seconds ticked while Working.
    pub total_work_secs: u64,
}

/// Presentation state of the three controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    /// The play/pause control is hidden while idle.
    pub play_pause_visible: bool,
    pub play_pause_label: &'static str,
}

/// Serializable view of everything a display needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub phase: Phase,
    pub status: &'static str,
    pub theme: Option<Theme>,
    pub counting: bool,
    pub remaining_secs: u32,
    pub readout: String,
    pub cycle_budget: u32,
    pub stats: Stats,
    pub work_time: String,
    pub controls: Controls,
}

/// Core Pomodoro state machine.
#[derive(Debug, Clone)]
pub struct PomodoroEngine {
    config: TimerConfig,
    phase: Phase,
    remaining_secs: u32,
    counting: bool,
    /// Short rests left before the next long rest.
    cycle_budget: u32,
    stats: Stats,
}

impl PomodoroEngine {
    /// Create an idle engine with the work duration loaded and the clock stopped.
    pub fn new(config: TimerConfig) -> Self {
        Self {
            remaining_secs: config.work_secs,
            cycle_budget: config.short_rests_per_cycle(),
            phase: Phase::Idle,
            counting: false,
            stats: Stats::default(),
            config,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_counting(&self) -> bool {
        self.counting
    }

    pub fn cycle_budget(&self) -> u32 {
        self.cycle_budget
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn theme(&self) -> Option<Theme> {
        self.phase.theme()
    }

    pub fn controls(&self) -> Controls {
        Controls {
            play_pause_visible: !self.phase.is_idle(),
            play_pause_label: if self.counting { "Pause" } else { "Play" },
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            status: self.phase.status_line(),
            theme: self.theme(),
            counting: self.counting,
            remaining_secs: self.remaining_secs,
            readout: format_clock(self.remaining_secs),
            cycle_budget: self.cycle_budget,
            stats: self.stats,
            work_time: format_duration(self.stats.total_work_secs),
            controls: self.controls(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Enter Working from any phase and start counting.
    pub fn start_work(&mut self) -> Event {
        self.enter(Phase::Working, Trigger::Manual)
    }

    /// Enter Resting with the given duration class and start counting.
    pub fn start_rest(&mut self, kind: RestKind) -> Event {
        self.enter(Phase::Resting(kind), Trigger::Manual)
    }

    /// Flip the counting flag. Phase and remaining time are untouched.
    pub fn toggle_play_pause(&mut self) -> Event {
        self.counting = !self.counting;
        Event::CountingToggled {
            counting: self.counting,
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `Some(Event::PhaseChanged)` when the countdown reached zero and
    /// the next interval was started.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.counting {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.phase.is_working() {
            self.stats.total_work_secs += 1;
        }

        if self.remaining_secs > 0 {
            return None;
        }
        self.on_expired()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn on_expired(&mut self) -> Option<Event> {
        match self.phase {
            Phase::Idle => None,
            Phase::Working => {
                let kind = if self.cycle_budget > 0 {
                    self.cycle_budget -= 1;
                    RestKind::Short
                } else {
                    self.cycle_budget = self.config.short_rests_per_cycle();
                    self.stats.completed_cycles += 1;
                    RestKind::Long
                };
                self.stats.completed_pomodoros += 1;
                Some(self.enter(Phase::Resting(kind), Trigger::Expired))
            }
            Phase::Resting(_) => Some(self.enter(Phase::Working, Trigger::Expired)),
        }
    }

    fn enter(&mut self, to: Phase, trigger: Trigger) -> Event {
        let from = self.phase;
        let (remaining, cue) = match to {
            Phase::Resting(kind) => (self.config.rest_secs(kind), Cue::RestStart),
            Phase::Working | Phase::Idle => (self.config.work_secs, Cue::WorkStart),
        };
        self.phase = to;
        self.remaining_secs = remaining;
        self.counting = true;
        Event::PhaseChanged {
            from,
            to,
            trigger,
            remaining_secs: remaining,
            cue,
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> PomodoroEngine {
        PomodoroEngine::new(TimerConfig::new(3, 2, 5, 2))
    }

    fn ticks(engine: &mut PomodoroEngine, n: u32) -> Vec<Event> {
        (0..n).filter_map(|_| engine.tick()).collect()
    }

    #[test]
    fn new_engine_is_idle_and_stopped() {
        let engine = small();
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.remaining_secs(), 3);
        assert!(!engine.is_counting());
        assert_eq!(engine.cycle_budget(), 1);
        assert_eq!(engine.stats(), Stats::default());
        assert!(!engine.controls().play_pause_visible);
    }

    #[test]
    fn tick_does_nothing_before_start() {
        let mut engine = small();
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 3);
    }

    #[test]
    fn start_work_resets_and_counts() {
        let mut engine = small();
        let event = engine.start_work();
        assert_eq!(event.cue(), Some(Cue::WorkStart));
        assert_eq!(engine.phase(), Phase::Working);
        assert_eq!(engine.remaining_secs(), 3);
        assert!(engine.is_counting());
        assert_eq!(engine.controls().play_pause_label, "Pause");
    }

    #[test]
    fn manual_rest_does_not_touch_budget_or_stats() {
        let mut engine = small();
        engine.start_work();
        engine.tick();
        let event = engine.start_rest(RestKind::Short);
        assert_eq!(event.cue(), Some(Cue::RestStart));
        assert_eq!(engine.phase(), Phase::Resting(RestKind::Short));
        assert_eq!(engine.remaining_secs(), 2);
        assert_eq!(engine.cycle_budget(), 1);
        assert_eq!(engine.stats().completed_pomodoros, 0);
        assert_eq!(engine.stats().total_work_secs, 1);
    }

    #[test]
    fn work_expiry_takes_short_then_long_rest() {
        let mut engine = small();
        engine.start_work();

        let events = ticks(&mut engine, 3);
        assert_eq!(events.len(), 1);
        assert_eq!(engine.phase(), Phase::Resting(RestKind::Short));
        assert_eq!(engine.cycle_budget(), 0);

        let events = ticks(&mut engine, 2);
        assert_eq!(events[0].cue(), Some(Cue::WorkStart));
        assert_eq!(engine.phase(), Phase::Working);
        assert_eq!(engine.remaining_secs(), 3);

        ticks(&mut engine, 3);
        assert_eq!(engine.phase(), Phase::Resting(RestKind::Long));
        assert_eq!(engine.remaining_secs(), 5);
        assert_eq!(engine.cycle_budget(), 1);
        assert_eq!(engine.stats().completed_cycles, 1);
        assert_eq!(engine.stats().completed_pomodoros, 2);
        assert_eq!(engine.stats().total_work_secs, 6);
    }

    #[test]
    fn pause_freezes_countdown() {
        let mut engine = small();
        engine.start_work();
        engine.tick();
        let event = engine.toggle_play_pause();
        assert!(matches!(event, Event::CountingToggled { counting: false, .. }));
        assert_eq!(engine.controls().play_pause_label, "Play");

        assert!(ticks(&mut engine, 10).is_empty());
        assert_eq!(engine.remaining_secs(), 2);
        assert_eq!(engine.phase(), Phase::Working);

        engine.toggle_play_pause();
        engine.tick();
        assert_eq!(engine.remaining_secs(), 1);
    }

    #[test]
    fn counting_while_idle_floors_at_zero() {
        let mut engine = small();
        engine.toggle_play_pause();
        assert!(ticks(&mut engine, 10).is_empty());
        assert_eq!(engine.remaining_secs(), 0);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.stats(), Stats::default());
    }

    #[test]
    fn single_cycle_config_always_long_rests() {
        let mut engine = PomodoroEngine::new(TimerConfig::new(1, 1, 4, 1));
        engine.start_work();
        engine.tick();
        assert_eq!(engine.phase(), Phase::Resting(RestKind::Long));
        assert_eq!(engine.cycle_budget(), 0);
        ticks(&mut engine, 4);
        engine.tick();
        assert_eq!(engine.phase(), Phase::Resting(RestKind::Long));
        assert_eq!(engine.stats().completed_cycles, 2);
    }

    #[test]
    fn snapshot_reports_readout_and_theme() {
        let mut engine = PomodoroEngine::new(TimerConfig::default());
        engine.start_work();
        engine.tick();
        let snap = engine.snapshot();
        assert_eq!(snap.readout, "24:59");
        assert_eq!(snap.theme, Some(Theme::Working));
        assert_eq!(snap.status, "You are working!");
        assert_eq!(snap.work_time, "00:01");

        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["phase"], "working");
        assert_eq!(json["stats"]["total_work_secs"], 1);
    }
}
