//! Training console entry point.
//!
//! A headless front end for the settings form.  Each invocation loads
//! `settings.json`, applies one action through the command bridge, and prints
//! the console entries that action produced.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ AppState::new()        -- loads settings.json, seeds the form
//!  └─ one command
//!       ├─ show              -- print the form
//!       ├─ set / browse      -- edit the form, then Save
//!       ├─ save              -- Save trigger
//!       ├─ start             -- Start trigger
//!       └─ clear             -- Clear trigger
//! ```
//!
//! Diagnostic output goes through `tracing` to stderr; the console log goes to
//! stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use trainer_console::infrastructure::console;
use trainer_console::infrastructure::storage::settings::{SettingsStore, DEFAULT_SETTINGS_FILE};
use trainer_console::infrastructure::ui_bridge::{self, AppState};

#[derive(Parser, Debug)]
#[command(name = "trainer-console", about = "Configure a model training job")]
struct Cli {
    /// Path of the persisted settings file.
    #[arg(long, global = true, env = "TRAINER_SETTINGS", default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every field of the saved form
    Show,
    /// Set one field and save, e.g. `set model_name gpt2`
    Set { field: String, value: String },
    /// Put a directory into a path field and save
    Browse { field: String, dir: PathBuf },
    /// Save the current form
    Save,
    /// Validate the saved settings and echo the configuration
    Start,
    /// Clear the console
    Clear,
}

fn main() -> anyhow::Result<ExitCode> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!(path = %cli.settings.display(), "training console starting");

    let mut state = AppState::new(SettingsStore::new(&cli.settings));
    print_new(&state, 0);
    let cursor = state.console().cursor();

    let success = match cli.command {
        Command::Show => {
            let fields = ui_bridge::get_form(&state).data.unwrap_or_default();
            for f in fields {
                let marker = if f.required { "*" } else { " " };
                println!("{marker} {:<20} {:<22} {}", f.label, f.key, f.display);
            }
            true
        }
        Command::Set { field, value } => {
            ui_bridge::update_field(&mut state, &field, &value).success
                && ui_bridge::save_settings(&mut state).success
        }
        Command::Browse { field, dir } => {
            ui_bridge::browse_path(&mut state, &field, &dir).success
                && ui_bridge::save_settings(&mut state).success
        }
        Command::Save => ui_bridge::save_settings(&mut state).success,
        Command::Start => ui_bridge::start_training(&mut state)
            .data
            .is_some_and(|dto| dto.started),
        Command::Clear => ui_bridge::clear_console(&mut state).success,
    };

    print_new(&state, cursor);
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Prints the console entries appended after `cursor`, coloured by level.
fn print_new(state: &AppState, cursor: usize) {
    for entry in state.console().since(cursor) {
        println!("{}", console::render(entry));
    }
}
