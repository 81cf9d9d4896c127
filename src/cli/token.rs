//! CLI commands for the repository access token

use clap::Subcommand;

use crate::config::token::TOKEN_ENV;
use crate::config::{Token, TokenSource, TokenStore};
use crate::error::{DashboardError, DashboardResult};

/// Token subcommands
#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Store a personal access token (prompts when not given)
    Set {
        /// Token value; omit to type it without echo
        token: Option<String>,
    },

    /// Delete the stored token
    Clear,

    /// Show where the active token comes from
    Status,
}

/// Handle a token command
pub fn handle_token_command(tokens: &TokenStore, cmd: TokenCommands) -> DashboardResult<()> {
    match cmd {
        TokenCommands::Set { token } => {
            let raw = match token {
                Some(raw) => raw,
                None => rpassword::prompt_password("GitHub token: ")
                    .map_err(|e| DashboardError::Io(format!("Failed to read token: {}", e)))?,
            };
            let token = Token::new(raw)?;
            tokens.save(&token)?;
            println!(
                "Saved token {} to {}",
                token.masked(),
                tokens.path().display()
            );
        }

        TokenCommands::Clear => {
            if tokens.clear()? {
                println!("Removed {}", tokens.path().display());
            } else {
                println!("No stored token");
            }
            if std::env::var_os(TOKEN_ENV).is_some() {
                println!("Note: {} is still set in the environment", TOKEN_ENV);
            }
        }

        TokenCommands::Status => match tokens.load()? {
            Some((token, source)) => {
                println!("Token: {} (from {})", token.masked(), source);
                if source == TokenSource::File {
                    println!("File:  {}", tokens.path().display());
                }
            }
            None => {
                println!("No token configured; reads work, writes need one.");
                println!("Run 'findash token set' or set {}", TOKEN_ENV);
            }
        },
    }

    Ok(())
}
