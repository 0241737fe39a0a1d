//! `careapp` - CLI for the recovery companion
//!
//! Shows recovery milestones and drives the local analytics log kept on this
//! device.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;
use tracing::{debug, error, warn};

use careapp::cli::{render, Cli, Command, ConfigCommand, ProcedureArg};
use careapp::{
    init_logging, recovery, Config, EventStore, KeyValueStore, ProcedureId, Session, SqliteStore,
    Tab, UnavailableStore,
};

type AppSession = Session<Box<dyn KeyValueStore>>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Procedures(cmd) => {
            print!("{}", render::procedures(recovery::procedures(), cmd.json)?);
        }
        Command::Config(cmd) => handle_config(&config, cmd)?,
        Command::Timeline(cmd) => {
            let mut session = open_session(&config, cmd.procedure, cmd.day);
            session.start();
            session.go_to_tab(Tab::Timeline);
            let procedure = recovery::procedure(session.procedure());
            print!(
                "{}",
                render::timeline(
                    procedure,
                    session.days_post_op(),
                    &session.timeline(),
                    cmd.format
                )?
            );
        }
        Command::Focus(cmd) => {
            let mut session = open_session(&config, cmd.procedure, cmd.day);
            session.start();
            print!(
                "{}",
                render::focus(session.days_post_op(), &session.todays_focus(), cmd.json)?
            );
        }
        Command::Track(cmd) => {
            let mut session = open_session(&config, None, None);
            session.track(&cmd.name, cmd.payload.unwrap_or_default());
            println!("Recorded '{}'.", cmd.name);
        }
        Command::CallSurgeon => {
            let mut session = open_session(&config, None, None);
            session.open_symptom_checker();
            session.call_surgeon();
            session.close_symptom_checker();
            println!("Call your surgeon now if you notice any warning signs.");
        }
        Command::Stats(cmd) => {
            let session = open_session(&config, None, None);
            print!("{}", render::stats(&session.stats(), cmd.limit, cmd.json)?);
        }
        Command::Clear(cmd) => {
            if cmd.yes {
                let mut session = open_session(&config, None, None);
                session.clear_stats();
                println!("Local analytics cleared.");
            } else {
                println!("This will erase the visit count and event log.");
                println!("Use --yes to confirm.");
            }
        }
    }

    Ok(())
}

/// Open the on-disk store, falling back to one that fails every call so that
/// analytics degrade to defaults instead of aborting the command.
fn open_session(config: &Config, procedure: Option<ProcedureArg>, day: Option<u32>) -> AppSession {
    let path = config.database_path();
    let backend: Box<dyn KeyValueStore> = match SqliteStore::open(&path) {
        Ok(store) => {
            debug!("Analytics stored at {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            if e.is_unavailable() {
                warn!("Local analytics unavailable, continuing without them: {}", e);
            } else {
                error!("Local analytics store at {} is unusable: {}", path.display(), e);
            }
            Box::new(UnavailableStore::new(e.to_string()))
        }
    };

    let analytics = EventStore::with_capacity(backend, config.storage.max_events);
    let procedure = procedure.map_or(config.recovery.procedure, ProcedureId::from);
    let day = day.unwrap_or(config.recovery.days_post_op);
    Session::new(analytics).with_selection(procedure, day)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Max events:         {}", config.storage.max_events);
                println!();
                println!("[Recovery]");
                println!("  Procedure:          {}", config.recovery.procedure);
                println!("  Days post-op:       {}", config.recovery.days_post_op);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

