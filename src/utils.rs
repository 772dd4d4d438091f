use anyhow::{Error, Result};
use howlong::ProcessDuration;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

pub fn init_tracing_subscriber(directives: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(Error::msg)
}

/// Process time in microseconds.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time {
    real: u64,
    user: u64,
    sys: u64,
}

impl From<ProcessDuration> for Time {
    fn from(p_duration: ProcessDuration) -> Self {
        Self {
            real: p_duration.real.as_micros() as u64,
            user: p_duration.user.as_micros() as u64,
            sys: p_duration.system.as_micros() as u64,
        }
    }
}

/// Run `f` and report how long it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Time) {
    let timer = howlong::ProcessCPUTimer::new();
    let ret = f();
    (ret, Time::from(timer.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed() {
        let (v, time) = timed(|| (0..1000u64).sum::<u64>());
        assert_eq!(v, 499_500);

        let json = serde_json::to_value(&time).unwrap();
        assert!(json.get("real").is_some());
        assert!(json.get("sys").is_some());
    }
}
