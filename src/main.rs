//! tagedit - a terminal text editor with incremental syntax tagging
//!
//! Python-style classification is kept current one line at a time as you
//! type, with find-all highlighting and a line-number gutter that scrolls
//! with the text.

mod buffer;
mod cli;
mod command;
mod config;
mod cursor;
mod display;
mod editor;
mod error;
mod input;
mod line;
mod logging;
mod mirror;
mod position;
mod search;
mod syntax;
mod terminal;
mod window;

use std::process;

use clap::Parser;
use tracing::{error, info};

use cli::CliArgs;
use config::Config;
use editor::Editor;
use error::Result;
use terminal::Terminal;

fn main() {
    let args = CliArgs::parse();
    let _log_guard = logging::init();

    if let Err(e) = run(args) {
        error!(error = %e, "fatal");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    args.apply_to(&mut config);
    info!(version = env!("CARGO_PKG_VERSION"), theme = %config.theme, "starting");

    // Initialize terminal
    let terminal = Terminal::new()?;

    // Create editor state
    let mut editor = Editor::new(terminal, config);

    // Open file if provided; a missing file becomes a new named buffer
    if let Some(path) = &args.file {
        if let Err(e) = editor.session.open_or_create(path) {
            editor.session.report_error(e);
        }
    }

    // Run the editor
    editor.run()
}
