use clap::Args;
use pomodoro_core::{Config, Cue, Event, PomodoroEngine, RestKind};
use serde::Serialize;

use super::TimerArgs;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub timer: TimerArgs,
    /// Whitespace-separated steps: w, r, l, p, or tN to tick N seconds
    #[arg(long, default_value = "")]
    pub script: String,
    /// Also print every event as a JSON line before the final state
    #[arg(long)]
    pub events: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Work,
    Rest(RestKind),
    PlayPause,
    Tick(u32),
}

fn parse_script(script: &str) -> Result<Vec<Step>, String> {
    script
        .split_whitespace()
        .map(|token| match token {
            "w" => Ok(Step::Work),
            "r" => Ok(Step::Rest(RestKind::Short)),
            "l" => Ok(Step::Rest(RestKind::Long)),
            "p" => Ok(Step::PlayPause),
            t if t.starts_with('t') => t[1..]
                .parse::<u32>()
                .map(Step::Tick)
                .map_err(|_| format!("invalid tick count in '{t}'")),
            other => Err(format!("unknown script step '{other}'")),
        })
        .collect()
}

#[derive(Serialize)]
struct Outcome {
    cues: Vec<Cue>,
    #[serde(flatten)]
    snapshot: pomodoro_core::Snapshot,
}

fn replay(engine: &mut PomodoroEngine, steps: &[Step]) -> Vec<Event> {
    let mut events = Vec::new();
    for step in steps {
        match *step {
            Step::Work => events.push(engine.start_work()),
            Step::Rest(kind) => events.push(engine.start_rest(kind)),
            Step::PlayPause => events.push(engine.toggle_play_pause()),
            Step::Tick(n) => events.extend((0..n).filter_map(|_| engine.tick())),
        }
    }
    events
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let timer = args.timer.resolve(&config)?;
    let steps = parse_script(&args.script)?;

    let mut engine = PomodoroEngine::new(timer);
    let events = replay(&mut engine, &steps);
    tracing::debug!(steps = steps.len(), events = events.len(), "simulation finished");

    if args.events {
        for event in &events {
            println!("{}", serde_json::to_string(event)?);
        }
    }

    let outcome = Outcome {
        cues: events.iter().filter_map(Event::cue).collect(),
        snapshot: engine.snapshot(),
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
