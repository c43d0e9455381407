use std::fmt;

use dutch_core::{AuctionPhase, Price, Timestamp, current_price};
use serde::Serialize;

use crate::{commands::CommandContext, display::format_countdown};

#[derive(Debug, Clone, Serialize)]
pub struct PriceOutput {
    pub now: Timestamp,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub start_price: Price,
    pub floor_price: Price,
    pub current_price: Price,
    pub phase: AuctionPhase,
    pub time_remaining_seconds: u64,
    pub floor_reached_at: Option<Timestamp>,
}

pub fn price(ctx: &CommandContext, now: Timestamp) -> eyre::Result<PriceOutput> {
    let auction = ctx.auction(now)?;

    Ok(PriceOutput {
        now,
        start_time: auction.start_time(),
        end_time: auction.end_time(),
        start_price: auction.start_price(),
        floor_price: auction.floor_price(),
        current_price: current_price(&auction, now),
        phase: auction.phase(now),
        time_remaining_seconds: auction.time_remaining(now),
        floor_reached_at: auction.floor_reached_at(),
    })
}

impl fmt::Display for PriceOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "status:         {}", self.phase.label())?;
        writeln!(
            f,
            "current price:  {} (start {}, floor {})",
            self.current_price, self.start_price, self.floor_price
        )?;
        writeln!(
            f,
            "time remaining: {}",
            format_countdown(self.time_remaining_seconds)
        )?;
        write!(f, "window:         {} -> {}", self.start_time, self.end_time)?;
        if let Some(at) = self.floor_reached_at {
            write!(f, "\nfloor reached:  {at}")?;
        }
        Ok(())
    }
}
