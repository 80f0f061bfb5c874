//! Terminal readout for the interactive timer.

use std::io::{self, Write};

use pomodoro_core::{format_duration, Event, PomodoroEngine, Theme};

const RESET: &str = "\x1b[0m";

fn colour(theme: Option<Theme>) -> &'static str {
    match theme {
        Some(Theme::Working) => "\x1b[31m",
        Some(Theme::Resting) => "\x1b[32m",
        None => "",
    }
}

/// Renders the engine state as a single rewritable line.
pub struct Display<W: Write> {
    out: W,
    colour: bool,
}

impl<W: Write> Display<W> {
    pub fn new(out: W, colour: bool) -> Self {
        Self { out, colour }
    }

    /// Controls reference printed once at start-up.
    pub fn help(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "controls: [w]ork  [r]est  [l]ong rest  [p]lay/pause  [q]uit  (then Enter)"
        )
    }

    /// Redraw the status line in place.
    pub fn render(&mut self, engine: &PomodoroEngine) -> io::Result<()> {
        let line = status_line(engine);
        if self.colour && engine.theme().is_some() {
            write!(self.out, "\r\x1b[2K{}{line}{RESET}", colour(engine.theme()))?;
        } else {
            write!(self.out, "\r\x1b[2K{line}")?;
        }
        self.out.flush()
    }

    /// Keep phase changes in the scrollback.
    pub fn event(&mut self, event: &Event) -> io::Result<()> {
        if let Event::PhaseChanged { to, .. } = event {
            writeln!(self.out)?;
            writeln!(self.out, "{}", to.status_line())?;
        }
        Ok(())
    }

    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{message}")
    }

    /// Statistics block printed on exit.
    pub fn summary(&mut self, engine: &PomodoroEngine) -> io::Result<()> {
        let stats = engine.stats();
        writeln!(self.out)?;
        writeln!(self.out, "Completed cycles: {}", stats.completed_cycles)?;
        writeln!(self.out, "Work time: {}", format_duration(stats.total_work_secs))?;
        writeln!(self.out, "Completed pomodoros: {}", stats.completed_pomodoros)?;
        self.out.flush()
    }
}

fn status_line(engine: &PomodoroEngine) -> String {
    let snap = engine.snapshot();
    let label = match snap.theme {
        Some(theme) => theme.as_str(),
        None => "stopped",
    };
    let control = if snap.controls.play_pause_visible {
        format!("  [{}]", snap.controls.play_pause_label)
    } else {
        String::new()
    };
    format!(
        "{label:>8} {}{control}  pomodoros {}  cycles {}  work {}",
        snap.readout, snap.stats.completed_pomodoros, snap.stats.completed_cycles, snap.work_time
    )
}
