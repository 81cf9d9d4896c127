use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use findash::cli::{
    handle_analytics_command, handle_config_command, handle_expense_command,
    handle_export_command, handle_income_command, handle_show_command, handle_token_command,
    ConfigCommands, ExpenseCommands, ExportArgs, IncomeCommands, TokenCommands,
};
use findash::config::token::TOKEN_ENV;
use findash::config::{DashboardPaths, Settings, TokenStore};
use findash::error::DashboardError;
use findash::models::MonthPeriod;
use findash::services::LedgerService;
use findash::store::open_store;

#[derive(Parser)]
#[command(
    name = "findash",
    author = "Kaylee Beyene",
    version,
    about = "Terminal dashboard for monthly budget plans kept in a GitHub repository",
    long_about = "findash reads monthly plan and fact files (markdown tables) from a \
                  GitHub repository, shows income, expenses and remaining payments, \
                  and writes new rows back with a commit per change."
)]
struct Cli {
    /// Work on a local checkout instead of GitHub
    #[arg(long, global = true, env = "FINDASH_LOCAL_REPO")]
    local: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Tui,

    /// Print one month's dashboard
    Show {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long, value_parser = MonthPeriod::parse)]
        period: Option<MonthPeriod>,
    },

    /// Print the plan vs. fact comparison of a year
    Analytics {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Income rows
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Expense rows
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Export a month as CSV or JSON
    Export(ExportArgs),

    /// Manage the GitHub access token
    #[command(subcommand)]
    Token(TokenCommands),

    /// Show or change settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = DashboardPaths::new()?;
    let is_tui = matches!(cli.command, Some(Commands::Tui));
    init_tracing(&paths, is_tui)?;

    let settings = Settings::load_or_create(&paths)?;
    let tokens = TokenStore::new(&paths);

    let result = run(cli, &paths, settings, tokens);
    if let Err(err) = &result {
        if err
            .downcast_ref::<DashboardError>()
            .is_some_and(DashboardError::is_missing_token)
        {
            eprintln!("Hint: the token can also be passed in {}", TOKEN_ENV);
        }
    }
    result
}

fn run(cli: Cli, paths: &DashboardPaths, settings: Settings, tokens: TokenStore) -> Result<()> {
    let ledger = || -> Result<LedgerService> {
        let token = tokens.token()?;
        let store = open_store(&settings, cli.local.as_deref(), token);
        Ok(LedgerService::new(store, settings.clone()))
    };

    match cli.command {
        Some(Commands::Tui) => {
            let host = findash::host::detect();
            findash::tui::run_tui(ledger()?, cli.local.clone(), tokens.clone(), host)?;
        }
        Some(Commands::Show { period }) => handle_show_command(&ledger()?, period)?,
        Some(Commands::Analytics { year }) => handle_analytics_command(&ledger()?, year)?,
        Some(Commands::Income(cmd)) => handle_income_command(&ledger()?, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&ledger()?, cmd)?,
        Some(Commands::Export(args)) => handle_export_command(&ledger()?, args)?,
        Some(Commands::Token(cmd)) => handle_token_command(&tokens, cmd)?,
        Some(Commands::Config(cmd)) => handle_config_command(paths, &settings, cmd)?,
        None => {
            println!("findash - monthly budget dashboard");
            println!();
            println!("Run 'findash --help' for usage information.");
            println!("Run 'findash tui' to launch the interactive interface.");
            println!("Run 'findash show' for this month's report.");
        }
    }

    Ok(())
}

/// Log to stderr, or to the log file while the dashboard owns the terminal
fn init_tracing(paths: &DashboardPaths, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if to_file {
        paths.ensure_directories()?;
        let file = open_log(&paths.log_file())?;
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to install the log subscriber")?;
    } else {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to install the log subscriber")?;
    }

    Ok(())
}

fn open_log(path: &Path) -> Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
