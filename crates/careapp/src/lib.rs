//! `careapp` - Post-operative recovery companion core
//!
//! This library provides the recovery milestone model, a best-effort local
//! analytics log, and the key-value storage it persists to.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod recovery;
pub mod session;
pub mod storage;

pub use analytics::{Event, EventStore, Stats};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use recovery::{status_of, Milestone, Procedure, ProcedureId, Status};
pub use session::{Session, Tab};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, UnavailableStore};
