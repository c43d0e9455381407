use std::fmt;

use dutch_core::{BidOutcome, Timestamp, evaluate_bid};
use serde::Serialize;
use tracing::info;

use crate::commands::CommandContext;

pub struct BidArgs {
    pub amount: f64,
    pub at: Timestamp,
    /// Treat the auction as already settled.
    pub inactive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BidOutput {
    pub amount: f64,
    pub at: Timestamp,
    #[serde(flatten)]
    pub outcome: BidOutcome,
}

pub fn evaluate(ctx: &CommandContext, args: BidArgs) -> eyre::Result<BidOutput> {
    let mut auction = ctx.auction(args.at)?;
    if args.inactive {
        auction.deactivate();
    }

    let outcome = evaluate_bid(&auction, args.amount, args.at);
    info!(
        amount = args.amount,
        at = %args.at,
        accepted = outcome.is_accepted(),
        "bid evaluated"
    );

    Ok(BidOutput {
        amount: args.amount,
        at: args.at,
        outcome,
    })
}

impl fmt::Display for BidOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bid of {} at {}: {}",
            self.amount,
            self.at,
            self.outcome.message()
        )
    }
}
