//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// A small terminal editor with incremental highlighting
#[derive(Parser, Debug)]
#[command(name = "tagedit", version, about)]
pub struct CliArgs {
    /// File to open (created on first save if it does not exist)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Start with the line-number gutter hidden
    #[arg(long)]
    pub no_line_numbers: bool,

    /// Start with the cursor location hidden
    #[arg(long)]
    pub no_cursor_info: bool,

    /// Make find-all ignore case by default
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Fold command-line switches into a loaded config
    pub fn apply_to(&self, config: &mut crate::config::Config) {
        if self.no_line_numbers {
            config.show_line_numbers = false;
        }
        if self.no_cursor_info {
            config.show_cursor_info = false;
        }
        if self.ignore_case {
            config.ignore_case = true;
        }
    }
}
