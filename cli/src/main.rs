//! OCEAN DeFi CLI - read-only dashboard and unsigned transaction builder
//!
//! Queries the OCEAN DeFi contracts on Ramestta for a wallet address and
//! prints wallet-ready transactions for the write operations. Keys never
//! touch this tool.

use clap::{Parser, Subcommand};
use colored::Colorize;
use ocean_client::services::{SpotIncomeOptions, TeamNetworkOptions};
use std::path::PathBuf;
use std::process::ExitCode;

mod account;
mod client;
mod config;
mod dashboard;
mod income;
mod portfolio;
mod team;
mod transactions;

use client::Session;
use config::NetworkConfig;
use income::PreviewAmount;

#[derive(Parser)]
#[command(name = "ocean")]
#[command(about = "OCEAN DeFi CLI - dashboards and unsigned transactions for Ramestta", long_about = None)]
#[command(version)]
struct Cli {
    /// Deployment to use (ramestta, mainnet, or one defined in the config file)
    #[arg(short, long, default_value = "ramestta", global = true)]
    network: String,

    /// RPC URL (overrides the deployment default)
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// Wallet address (defaults to the one stored by `ocean login`)
    #[arg(short, long, global = true)]
    address: Option<String>,

    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to state file
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard summary for a wallet
    Dashboard,

    /// Daily earnings for the last N days
    Trend {
        /// Number of days (1-365)
        #[arg(short, long, default_value = "7")]
        days: u32,
    },

    /// List every portfolio of the wallet
    Portfolios,

    /// Show one portfolio (defaults to the selected one)
    Portfolio {
        /// Portfolio id
        pid: Option<u64>,
    },

    /// Remember a portfolio as selected
    Select {
        /// Portfolio id
        pid: u64,
    },

    /// Slab income, override earnings and same-slab partners
    Slab,

    /// Royalty level, tiers and renewal status
    Royalty,

    /// One-time reward milestones
    Rewards,

    /// Referral network by level
    Team {
        /// Levels to walk (1-10)
        #[arg(long, default_value = "10")]
        max_depth: u8,

        /// Members fetched with stake and volume detail
        #[arg(long, default_value = "100")]
        detail_limit: usize,
    },

    /// Spot (direct referral) income summary
    Spot {
        /// Recent transactions to fetch
        #[arg(short, long, default_value = "25")]
        limit: u64,

        /// Portfolios shown in the per-portfolio breakdown
        #[arg(long, default_value = "4")]
        portfolios: usize,
    },

    /// Page through spot income entries
    SpotHistory {
        #[arg(long, default_value = "0")]
        offset: u64,

        #[arg(short, long, default_value = "25")]
        limit: u64,
    },

    /// Income totals per stream
    History {
        /// Recent transactions to count
        #[arg(short, long, default_value = "50")]
        limit: u64,
    },

    /// Safe Wallet balance and withdrawal fee
    SafeWallet {
        /// Preview withdrawing this amount (RAMA, or USD with --usd)
        #[arg(long)]
        preview: Option<f64>,

        /// Read the preview amount as USD
        #[arg(long, requires = "preview")]
        usd: bool,
    },

    /// Registration status and levels
    User,

    /// Store a wallet address for later commands
    Login {
        /// Wallet address
        wallet: String,
    },

    /// Contract addresses of the deployment
    Contracts,

    /// Build unsigned transactions
    Tx {
        #[command(subcommand)]
        command: TxCommands,
    },
}

#[derive(Subcommand)]
enum TxCommands {
    /// Register under a sponsor (address or numeric user id)
    Register {
        sponsor: String,
    },

    /// Open a portfolio worth USD
    Stake {
        /// Amount in USD
        usd: f64,

        /// Stake on behalf of another user (address or id)
        #[arg(long = "for")]
        beneficiary: Option<String>,

        /// Pay from the Safe Wallet instead of attaching RAMA
        #[arg(long)]
        from_safe: bool,
    },

    /// Request an exit from a portfolio
    Exit {
        pid: u64,
    },

    /// Cancel a pending exit request
    CancelExit {
        pid: u64,
    },

    /// Claim accrued growth of a portfolio
    ClaimGrowth {
        pid: u64,
    },

    /// Claim available slab income
    ClaimSlab,

    /// Claim this month's royalty
    ClaimRoyalty,

    /// Claim a one-time reward milestone
    ClaimReward {
        milestone: u32,
    },

    /// Withdraw RAMA from the Safe Wallet
    Withdraw {
        /// Amount in RAMA
        amount: f64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = NetworkConfig::new(&cli.network, cli.url.clone(), cli.config.clone(), cli.state.clone())?;

    if cli.verbose {
        println!("{} {}", "Network:".bright_cyan(), config.network);
        println!("{} {}", "RPC URL:".bright_cyan(), config.rpc_url);
        match &config.config_path {
            Some(path) => println!("{} {}", "Config:".bright_cyan(), path.display()),
            None => println!("{} {}", "Config:".bright_cyan(), "(built-in)".dimmed()),
        }
        println!("{} {}", "State:".bright_cyan(), config.state_path.display());
    }

    let session = Session::new(config, cli.json)?;
    let address = cli.address;

    match cli.command {
        Commands::Dashboard => dashboard::show_dashboard(&session, address).await?,
        Commands::Trend { days } => dashboard::show_trend(&session, address, days).await?,
        Commands::Portfolios => portfolio::list_portfolios(&session, address).await?,
        Commands::Portfolio { pid } => portfolio::show_portfolio(&session, address, pid).await?,
        Commands::Select { pid } => portfolio::select_portfolio(&session, pid)?,
        Commands::Slab => income::show_slab(&session, address).await?,
        Commands::Royalty => income::show_royalty(&session, address).await?,
        Commands::Rewards => income::show_rewards(&session, address).await?,
        Commands::Team { max_depth, detail_limit } => {
            team::show_team(&session, address, TeamNetworkOptions { max_depth, detail_limit }).await?;
        }
        Commands::Spot { limit, portfolios } => {
            let options = SpotIncomeOptions { limit, portfolio_limit: portfolios };
            income::show_spot_income(&session, address, options).await?;
        }
        Commands::SpotHistory { offset, limit } => {
            income::show_spot_history(&session, address, offset, limit).await?;
        }
        Commands::History { limit } => dashboard::show_history(&session, address, limit).await?,
        Commands::SafeWallet { preview, usd } => {
            let preview = preview.map(|amount| if usd { PreviewAmount::Usd(amount) } else { PreviewAmount::Rama(amount) });
            income::show_safe_wallet(&session, address, preview).await?;
        }
        Commands::User => account::show_user(&session, address).await?,
        Commands::Login { wallet } => account::login(&session, &wallet)?,
        Commands::Contracts => account::show_contracts(&session)?,
        Commands::Tx { command } => match command {
            TxCommands::Register { sponsor } => transactions::register(&session, address, &sponsor).await?,
            TxCommands::Stake { usd, beneficiary, from_safe } => {
                transactions::stake(&session, address, usd, beneficiary.as_deref(), from_safe).await?;
            }
            TxCommands::Exit { pid } => transactions::exit(&session, address, pid).await?,
            TxCommands::CancelExit { pid } => transactions::cancel_exit(&session, address, pid).await?,
            TxCommands::ClaimGrowth { pid } => transactions::claim_growth(&session, address, pid).await?,
            TxCommands::ClaimSlab => transactions::claim_slab(&session, address).await?,
            TxCommands::ClaimRoyalty => transactions::claim_royalty(&session, address).await?,
            TxCommands::ClaimReward { milestone } => {
                transactions::claim_reward(&session, address, milestone).await?;
            }
            TxCommands::Withdraw { amount } => transactions::withdraw(&session, address, amount).await?,
        },
    }

    Ok(())
}
