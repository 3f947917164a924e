//! Command-line argument parsing for the grid tool
//!
//! Supports:
//! - Choosing the item store file
//! - Replaying a keystroke script
//! - Overriding the rendered column width

use clap::Parser;
use std::path::PathBuf;

use crate::config::GridConfig;

/// Narrowest column that still fits a caret and the `[..]*!` markers
pub const MIN_COLUMN_WIDTH: usize = 4;

/// Spreadsheet-style editor for menu items
#[derive(Parser, Debug)]
#[command(name = "itemgrid", version, about = "Spreadsheet-style menu item editor")]
pub struct CliArgs {
    /// JSON file holding the items (overrides the configured store)
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Keystroke script to replay before printing the grid
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Characters shown per cell before truncation
    #[arg(long, value_name = "N")]
    pub width: Option<usize>,
}

/// Configuration derived from CLI arguments layered over the config file
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub grid: GridConfig,
    pub script: Option<PathBuf>,
}

impl CliArgs {
    /// Apply argument overrides to the loaded config
    pub fn into_config(self, mut grid: GridConfig) -> Result<StartupConfig, String> {
        if let Some(store) = self.store {
            grid.store = store;
        }

        if let Some(width) = self.width {
            if width < MIN_COLUMN_WIDTH {
                return Err(format!(
                    "--width must be at least {}, got {}",
                    MIN_COLUMN_WIDTH, width
                ));
            }
            grid.column_width = width;
        }

        Ok(StartupConfig {
            grid,
            script: self.script,
        })
    }
}
