//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing`, so command output on stdout
//! stays machine-readable. At the default levels a line is just the level and
//! message; `-v` and above add timestamps and targets.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much diagnostic output to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and above; dropped analytics writes show up here.
    #[default]
    Normal,
    /// Store opens, visits and clears.
    Verbose,
    /// Everything, including individual store reads and writes.
    Trace,
}

impl Verbosity {
    /// Map the `--quiet` flag and `-v` count to a level. `--quiet` wins.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level let through.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn directive(self) -> String {
        format!("careapp={}", self.level())
    }

    fn is_detailed(self) -> bool {
        self >= Self::Verbose
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity` when set. Calling this more
/// than once is harmless; only the first call installs anything.
///
/// ```no_run
/// use careapp::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(false, 1));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let detailed = verbosity.is_detailed().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
    });
    let compact = (!verbosity.is_detailed()).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(detailed)
        .with(compact)
        .try_init();
}

/// Initialize logging for tests.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
