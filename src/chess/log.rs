use std::env;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CHESS_LOG";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl Level {
    pub fn from_verbosity(verbose: u8) -> Self {
        match verbose {
            0 => Self::Warn,
            1 => Self::Info,
            _ => Self::Debug,
        }
    }

    fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

/// Builds the filter: `CHESS_LOG` wins when set and valid, otherwise the
/// level derived from `-v` flags.
fn build_filter(env_value: Option<&str>, fallback: Level) -> EnvFilter {
    env_value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback.as_directive()))
}

/// Install the global stderr subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(verbose: u8) {
    let env_value = env::var(LOG_ENV).ok();
    let filter = build_filter(env_value.as_deref(), Level::from_verbosity(verbose));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
