use std::io::IsTerminal;

use clap::Args;
use pomodoro_core::cue::Silent;
use pomodoro_core::{Config, CuePlayer, RestKind, Session};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::TimerArgs;
use crate::display::Display;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub timer: TimerArgs,
    /// Do not play any cues
    #[arg(long)]
    pub silent: bool,
    /// Start the first work interval immediately
    #[arg(long)]
    pub autostart: bool,
}

/// A line typed on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Work,
    Rest(RestKind),
    PlayPause,
    Quit,
}

impl Control {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "w" | "work" => Some(Control::Work),
            "r" | "rest" => Some(Control::Rest(RestKind::Short)),
            "l" | "long" => Some(Control::Rest(RestKind::Long)),
            "p" | "play" | "pause" => Some(Control::PlayPause),
            "q" | "quit" | "exit" => Some(Control::Quit),
            _ => None,
        }
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let timer = args.timer.resolve(&config)?;
    let player: Box<dyn CuePlayer> = if args.silent {
        Box::new(Silent)
    } else {
        config.cue_player()
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(event_loop(Session::new(timer, player), args.autostart))
}

async fn event_loop<P: CuePlayer>(
    mut session: Session<P>,
    autostart: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let colour = stdout.is_terminal();
    let mut display = Display::new(stdout.lock(), colour);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    display.help()?;
    if autostart {
        let event = session.start_work();
        display.event(&event)?;
    }
    display.render(session.engine())?;

    loop {
        tokio::select! {
            _ = session.next_tick() => {
                if let Some(event) = session.on_tick() {
                    display.event(&event)?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Control::parse(&line) {
                    Some(Control::Quit) => break,
                    Some(Control::Work) => {
                        let event = session.start_work();
                        display.event(&event)?;
                    }
                    Some(Control::Rest(kind)) => {
                        let event = session.start_rest(kind);
                        display.event(&event)?;
                    }
                    Some(Control::PlayPause) => {
                        if session.engine().controls().play_pause_visible {
                            session.toggle_play_pause();
                        } else {
                            display.notice("nothing to pause yet, start with [w]ork")?;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => display.notice(&format!("unknown control: {}", line.trim()))?,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
        display.render(session.engine())?;
    }

    display.summary(session.engine())?;
    Ok(())
}
