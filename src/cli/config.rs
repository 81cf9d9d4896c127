//! CLI commands for settings

use clap::Subcommand;

use crate::config::{DashboardPaths, Settings};
use crate::error::DashboardResult;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show paths and current settings
    Show,

    /// Change one setting
    Set {
        /// Setting name, e.g. owner, repo, branch, currency_symbol
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &DashboardPaths,
    settings: &Settings,
    cmd: ConfigCommands,
) -> DashboardResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("findash configuration");
            println!("=====================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Token file:     {}", paths.token_file().display());
            println!("Log file:       {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  owner:           {}", settings.owner);
            println!("  repo:            {}", settings.repo);
            println!("  branch:          {}", settings.branch);
            println!("  finances_path:   {}", settings.finances_path);
            println!("  raw_host:        {}", settings.raw_host);
            println!("  api_host:        {}", settings.api_host);
            println!("  bypass_cache:    {}", settings.bypass_cache);
            println!("  currency_symbol: {}", settings.currency_symbol);
            println!("  date_format:     {}", settings.date_format);
        }

        ConfigCommands::Set { key, value } => {
            let mut updated = settings.clone();
            updated.set(&key, &value)?;
            updated.save(paths)?;
            println!("Set {} = {}", key, value.trim());
        }
    }

    Ok(())
}
