use std::{fmt::Display, num::NonZeroU64, path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use dutch_core::{Price, Timestamp};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dutch_cli::{
    commands::{
        CommandContext, bid as bid_cmd, price as price_cmd, schedule as schedule_cmd, unix_now,
        validate as validate_cmd, watch as watch_cmd,
    },
    config::{AuctionOverrides, default_config_path, load_config, resolve_auction},
};

#[derive(Debug, Parser)]
#[command(name = "dutch", about = "Dutch auction pricing CLI", version)]
struct Cli {
    /// Path to the auction configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    auction: AuctionArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Overrides for the `[auction]` table of the config file.
#[derive(Debug, Args)]
struct AuctionArgs {
    /// Opening price
    #[arg(long, global = true, value_name = "PRICE")]
    start_price: Option<Price>,
    /// Lowest price the curve may reach
    #[arg(long, global = true, value_name = "PRICE")]
    floor_price: Option<Price>,
    /// Price decrease per second
    #[arg(long, global = true, value_name = "PRICE")]
    decay_per_second: Option<Price>,
    /// Auction lifetime in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    duration_seconds: Option<u64>,
    #[arg(long, global = true, value_name = "TOKEN")]
    token0: Option<String>,
    #[arg(long, global = true, value_name = "TOKEN")]
    token1: Option<String>,
    /// Fee in hundredths of a basis point (100, 500, 1000, 3000, 10000)
    #[arg(long, global = true, value_name = "FEE")]
    fee: Option<u32>,
    /// Auction start (unix seconds); falls back to the config file, then
    /// $DUTCH_START_TIME, then now
    #[arg(long, global = true, value_name = "UNIX")]
    start_time: Option<u64>,
}

impl From<AuctionArgs> for AuctionOverrides {
    fn from(args: AuctionArgs) -> Self {
        Self {
            start_price: args.start_price,
            floor_price: args.floor_price,
            decay_per_second: args.decay_per_second,
            duration_seconds: args.duration_seconds,
            token0: args.token0,
            token1: args.token1,
            fee: args.fee,
            start_time: args.start_time,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate the auction parameters
    Validate,

    /// Show the current price and countdown
    Price(AtArgs),

    /// Check whether a bid would be accepted
    Bid(BidArgs),

    /// Print the price curve sampled at a fixed step
    Schedule(ScheduleArgs),

    /// Live terminal dashboard
    Watch(WatchArgs),
}

#[derive(Debug, Args)]
struct AtArgs {
    /// Evaluate at this instant (unix seconds) instead of now; needs a fixed
    /// start time (--start-time, config or $DUTCH_START_TIME)
    #[arg(long, value_name = "UNIX")]
    at: Option<u64>,
}

#[derive(Debug, Args)]
struct BidArgs {
    /// Bid amount (human units)
    #[arg(long, value_name = "AMOUNT", allow_negative_numbers = true)]
    amount: f64,

    /// Treat the auction as already settled
    #[arg(long)]
    inactive: bool,

    #[command(flatten)]
    at: AtArgs,
}

#[derive(Debug, Args)]
struct ScheduleArgs {
    /// Seconds between samples
    #[arg(long, default_value = "60", value_name = "SECONDS")]
    step: NonZeroU64,
}

#[derive(Debug, Args)]
struct WatchArgs {
    /// Refresh interval in milliseconds
    #[arg(long, default_value_t = 250, value_name = "MS")]
    tick_ms: u64,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let path = cli.config.unwrap_or_else(default_config_path);
    let config = match load_config(&path) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };
    info!(path = %path.display(), "loaded config");

    let resolved = resolve_auction(&config, cli.auction.into())?;
    let ctx = CommandContext::new(resolved, config.bounds, config.network);

    match cli.command {
        Some(Commands::Validate) => match validate_cmd::validate(&ctx) {
            Ok(output) => emit(&output, cli.json)?,
            Err(err) => {
                eprintln!("invalid auction: {err}");
                std::process::exit(1);
            }
        },
        Some(Commands::Price(args)) => {
            let now = ctx.evaluation_time(args.at.map(Timestamp::new), unix_now())?;
            let output = price_cmd::price(&ctx, now)?;
            emit(&output, cli.json)?;
        }
        Some(Commands::Bid(args)) => {
            let at = ctx.evaluation_time(args.at.at.map(Timestamp::new), unix_now())?;
            let output = bid_cmd::evaluate(
                &ctx,
                bid_cmd::BidArgs {
                    amount: args.amount,
                    at,
                    inactive: args.inactive,
                },
            )?;
            emit(&output, cli.json)?;
        }
        Some(Commands::Schedule(args)) => {
            let output = schedule_cmd::schedule(&ctx, args.step, unix_now())?;
            emit(&output, cli.json)?;
        }
        Some(Commands::Watch(args)) => {
            watch_cmd::watch(
                &ctx,
                watch_cmd::WatchArgs {
                    tick: Duration::from_millis(args.tick_ms.max(1)),
                },
            )
            .await?;
        }
        None => {
            println!("Loaded config from {}", path.display());
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn emit<T: Serialize + Display>(output: &T, json: bool) -> eyre::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(output)?);
    } else {
        println!("{output}");
    }
    Ok(())
}
