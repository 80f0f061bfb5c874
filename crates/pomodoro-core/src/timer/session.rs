use tracing::{debug, info, warn};

use super::config::TimerConfig;
use super::engine::PomodoroEngine;
use super::phase::RestKind;
use super::ticker::Ticker;
use crate::cue::CuePlayer;
use crate::events::Event;

/// Drives one engine with a real ticker and a cue player.
///
/// Every command is applied to the engine first; the session then plays the
/// cue the resulting event asks for and reconciles the ticker with the
/// engine's counting flag.
pub struct Session<P: CuePlayer> {
    engine: PomodoroEngine,
    ticker: Ticker,
    player: P,
}

impl<P: CuePlayer> Session<P> {
    pub fn new(config: TimerConfig, player: P) -> Self {
        Self::with_ticker(config, player, Ticker::every_second())
    }

    pub fn with_ticker(config: TimerConfig, player: P, ticker: Ticker) -> Self {
        Self {
            engine: PomodoroEngine::new(config),
            ticker,
            player,
        }
    }

    pub fn engine(&self) -> &PomodoroEngine {
        &self.engine
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn start_work(&mut self) -> Event {
        let event = self.engine.start_work();
        self.apply(&event);
        event
    }

    pub fn start_rest(&mut self, kind: RestKind) -> Event {
        let event = self.engine.start_rest(kind);
        self.apply(&event);
        event
    }

    pub fn toggle_play_pause(&mut self) -> Event {
        let event = self.engine.toggle_play_pause();
        self.apply(&event);
        event
    }

    /// Wait for the ticker. Pends forever while the timer is paused.
    pub async fn next_tick(&mut self) {
        self.ticker.tick().await;
    }

    pub fn on_tick(&mut self) -> Option<Event> {
        let event = self.engine.tick()?;
        self.apply(&event);
        Some(event)
    }

    fn apply(&mut self, event: &Event) {
        match event {
            Event::PhaseChanged { from, to, trigger, .. } => {
                info!(?from, ?to, ?trigger, "phase changed");
            }
            Event::CountingToggled { counting, .. } => {
                debug!(counting, "counting toggled");
            }
        }

        if let Some(cue) = event.cue() {
            if let Err(e) = self.player.play(cue) {
                warn!(?cue, error = %e, "cue playback failed");
            }
        }

        if self.engine.is_counting() {
            self.ticker.arm();
        } else {
            self.ticker.disarm();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::{Cue, RecordingPlayer};
    use crate::error::CueError;
    use crate::timer::Phase;
    use std::time::Duration;
    use tokio::time;

    struct Rejecting;

    impl CuePlayer for Rejecting {
        fn play(&self, _cue: Cue) -> Result<(), CueError> {
            Err(CueError::PlaybackFailed("autoplay blocked".into()))
        }
    }

    fn config() -> TimerConfig {
        TimerConfig::new(3, 2, 4, 2)
    }

    #[tokio::test(start_paused = true)]
    async fn start_work_arms_ticker_and_plays_cue() {
        let mut session = Session::new(config(), RecordingPlayer::new());
        assert!(!session.is_ticking());

        session.start_work();
        assert!(session.is_ticking());
        assert_eq!(session.player().played(), vec![Cue::WorkStart]);

        session.next_tick().await;
        assert!(session.on_tick().is_none());
        assert_eq!(session.engine().remaining_secs(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_disarms_ticker() {
        let mut session = Session::new(config(), RecordingPlayer::new());
        session.start_work();
        session.toggle_play_pause();
        assert!(!session.is_ticking());

        let waited = time::timeout(Duration::from_secs(10), session.next_tick()).await;
        assert!(waited.is_err());
        assert_eq!(session.engine().remaining_secs(), 3);

        session.toggle_play_pause();
        assert!(session.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_plays_rest_cue_and_keeps_ticking() {
        let mut session = Session::new(config(), RecordingPlayer::new());
        session.start_work();
        for _ in 0..3 {
            session.next_tick().await;
            session.on_tick();
        }
        assert_eq!(session.engine().phase(), Phase::Resting(RestKind::Short));
        assert!(session.is_ticking());
        assert_eq!(
            session.player().played(),
            vec![Cue::WorkStart, Cue::RestStart]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_cue_leaves_state_intact() {
        let mut session = Session::new(config(), Rejecting);
        session.start_work();
        assert_eq!(session.engine().phase(), Phase::Working);
        assert!(session.engine().is_counting());

        for _ in 0..3 {
            session.next_tick().await;
            session.on_tick();
        }
        assert_eq!(session.engine().phase(), Phase::Resting(RestKind::Short));
        assert_eq!(session.engine().stats().completed_pomodoros, 1);
    }
}
