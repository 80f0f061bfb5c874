pub mod config;
pub mod run;
pub mod simulate;

use clap::Args;
use pomodoro_core::{Config, TimerConfig};

/// Duration overrides shared by `run` and `simulate`. Unset flags fall back
/// to the config file.
#[derive(Args, Debug, Default)]
pub struct TimerArgs {
    /// Work interval in seconds
    #[arg(long)]
    pub work: Option<u32>,
    /// Short rest in seconds
    #[arg(long)]
    pub short_rest: Option<u32>,
    /// Long rest in seconds
    #[arg(long)]
    pub long_rest: Option<u32>,
    /// Work intervals per cycle
    #[arg(long)]
    pub cycles: Option<u32>,
}

impl TimerArgs {
    pub fn resolve(&self, config: &Config) -> Result<TimerConfig, Box<dyn std::error::Error>> {
        let base = config.timer_config();
        let timer = TimerConfig::new(
            self.work.unwrap_or(base.work_secs),
            self.short_rest.unwrap_or(base.short_rest_secs),
            self.long_rest.unwrap_or(base.long_rest_secs),
            self.cycles.unwrap_or(base.cycles),
        );
        timer.validate()?;
        Ok(timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = TimerArgs {
            work: Some(60),
            cycles: Some(2),
            ..Default::default()
        };
        let timer = args.resolve(&Config::default()).unwrap();
        assert_eq!(timer, TimerConfig::new(60, 300, 900, 2));
    }

    #[test]
    fn zero_override_is_rejected() {
        let args = TimerArgs {
            short_rest: Some(0),
            ..Default::default()
        };
        assert!(args.resolve(&Config::default()).is_err());
    }
}
