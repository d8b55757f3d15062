//! `moo`, the operator console for the MooCoin token.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use moo_config::{ConsoleConfig, DEFAULT_PROFILE};
use moo_console::{AccountRow, Console, ConsoleInfo, Session};
use moo_utils::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "moo", version, about = "Operator console for the MooCoin token")]
struct Cli {
    /// Settings profile to use.
    #[arg(long, global = true, default_value = DEFAULT_PROFILE, env = "MOO_PROFILE")]
    profile: String,

    /// Settings root to use instead of searching upward for `.aptos`.
    #[arg(long, global = true, env = "MOO_SETTINGS_DIR")]
    settings_dir: Option<PathBuf>,

    /// Path to a TOML console config. Defaults to the nearest `moo.toml`.
    /// CLI flags and env vars override values from the file.
    #[arg(long, global = true, env = "MOO_CONFIG")]
    config: Option<PathBuf>,

    /// Name of the token module published under the root account.
    #[arg(long, global = true, env = "MOO_COIN_MODULE")]
    coin_module: Option<String>,

    /// Seconds to wait for a transaction to be committed.
    #[arg(long, global = true, env = "MOO_CONFIRMATION_TIMEOUT")]
    confirmation_timeout: Option<u64>,

    /// Concurrent balance queries when listing accounts.
    #[arg(long, global = true, env = "MOO_BALANCE_WORKERS")]
    balance_workers: Option<usize>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, default_value = "info", env = "MOO_LOG_LEVEL")]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, global = true, default_value = "human", env = "MOO_LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create a named account on-chain and store its key.
    CreateAccount {
        name: String,
        /// Fund the new account with this amount through the faucet.
        #[arg(long, default_value_t = 0)]
        fund: u64,
    },
    /// Mint tokens to a named account.
    Mint {
        amount: u64,
        /// Name of the account to mint to.
        to: String,
    },
    /// Fund a named account through the faucet.
    FundAccount { name: String, amount: u64 },
    /// List accounts with their balances.
    ListAccounts,
    /// Register a named account for the token.
    #[command(alias = "approve-coin")]
    RegisterCoin { name: String },
    /// Show where the console is pointed.
    Info,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format, &cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let config = console_config(&cli, &cwd)?;
    let session = Session::discover(&cwd, &cli.profile, cli.settings_dir.as_deref())?;
    let console = Console::connect(session, config)?;

    match cli.command {
        Command::CreateAccount { name, fund } => {
            let account = console.create_account(&name, fund).await?;
            println!("Created account {name}: {}", account.address());
            if fund > 0 {
                println!("Funded {name} with {fund}");
            }
        }
        Command::Mint { amount, to } => {
            let hash = console.mint(amount, &to).await?;
            println!("Minted {amount} to {to} ({hash})");
        }
        Command::FundAccount { name, amount } => {
            console.fund_account(&name, amount).await?;
            println!("Funded {name} with {amount}");
        }
        Command::ListAccounts => {
            let rows = console.list_accounts().await?;
            print!("{}", render_accounts(&rows));
        }
        Command::RegisterCoin { name } => {
            let hash = console.register_coin(&name).await?;
            println!("Registered {name} for {} ({hash})", console.config().coin_module);
        }
        Command::Info => print!("{}", render_info(&console.info())),
    }
    Ok(())
}

/// File settings (explicit `--config`, else the nearest `moo.toml`), with
/// CLI flags and env vars layered on top.
fn console_config(cli: &Cli, cwd: &Path) -> anyhow::Result<ConsoleConfig> {
    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::from_toml_file(path)?,
        None => ConsoleConfig::discover(cwd)?,
    };
    if let Some(module) = &cli.coin_module {
        config.coin_module = module.clone();
    }
    if let Some(secs) = cli.confirmation_timeout {
        config.confirmation_timeout_secs = secs;
    }
    if let Some(workers) = cli.balance_workers {
        config.balance_workers = workers;
    }
    tracing::debug!(?config, "console config");
    Ok(config)
}

fn render_accounts(rows: &[AccountRow]) -> String {
    let name_width = rows
        .iter()
        .map(|row| row.name.len())
        .chain(std::iter::once("Name".len()))
        .max()
        .unwrap_or_default();

    let mut out = format!("{:<name_width$}  {:<66}  {}\n", "Name", "Address", "Balance");
    for row in rows {
        out.push_str(&format!(
            "{:<name_width$}  {}  {}\n",
            row.name, row.address, row.balance
        ));
    }
    out
}

fn render_info(info: &ConsoleInfo) -> String {
    let move_package = info
        .move_package
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "none".to_string());
    format!(
        "settings root: {}\nprofile:       {}\nrest url:      {}\nfaucet url:    {}\nroot address:  {}\ncoin module:   {}\nkeystore:      {}\nmove package:  {}\n",
        info.settings_root.display(),
        info.profile,
        info.rest_url,
        info.faucet_url,
        info.root_address,
        info.coin_module,
        info.keystore_dir.display(),
        move_package,
    )
}
