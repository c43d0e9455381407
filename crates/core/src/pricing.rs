use std::num::NonZeroU64;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Serialize;

use crate::types::{
    auction::Auction,
    primitives::{Price, Timestamp},
    spec::ValidatedSpec,
};

/// Price of `auction` at `now`: the linear decay from `start_price`, clamped
/// to `[floor_price, start_price]`.
///
/// `now` before `start_time` prices at `start_price`. A decay product too
/// large for a decimal has necessarily crossed the floor.
pub fn current_price(auction: &Auction, now: Timestamp) -> Price {
    let start = auction.start_price().as_decimal();
    let floor = auction.floor_price().as_decimal();
    let elapsed = Decimal::from(now.seconds_since(auction.start_time()));

    let raw = auction
        .decay_per_second()
        .as_decimal()
        .checked_mul(elapsed)
        .and_then(|drop| start.checked_sub(drop));

    match raw {
        Some(raw) => Price::new(raw.max(floor).min(start)),
        None => Price::new(floor),
    }
}

/// Seconds after start at which a curve from `start` decaying by `decay`
/// per second first touches `floor`. `None` for a flat curve.
pub fn seconds_to_floor(start: Price, floor: Price, decay: Price) -> Option<u64> {
    let decay = decay.as_decimal();
    if decay <= Decimal::ZERO {
        return None;
    }

    let gap = start.as_decimal() - floor.as_decimal();
    gap.checked_div(decay)?.ceil().to_u64()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricePoint {
    pub at: Timestamp,
    pub offset_seconds: u64,
    pub price: Price,
}

/// Sample the curve every `step` seconds from `start_time` through
/// `end_time`; the final point always lands on `end_time`.
pub fn schedule(auction: &Auction, step: NonZeroU64) -> Vec<PricePoint> {
    let duration = auction.duration_seconds();
    let step = step.get();

    let step = usize::try_from(step).unwrap_or(usize::MAX);

    let mut offsets: Vec<u64> = (0..duration).step_by(step).collect();
    offsets.push(duration);

    offsets
        .into_iter()
        .map(|offset_seconds| {
            let at = auction.start_time().saturating_add_secs(offset_seconds);
            PricePoint {
                at,
                offset_seconds,
                price: current_price(auction, at),
            }
        })
        .collect()
}

impl Auction {
    pub fn current_price(&self, now: Timestamp) -> Price {
        current_price(self, now)
    }

    /// First instant at which the curve reaches the floor. `None` for a flat
    /// curve or when that instant does not fit a timestamp.
    pub fn floor_reached_at(&self) -> Option<Timestamp> {
        let seconds = seconds_to_floor(
            self.start_price(),
            self.floor_price(),
            self.decay_per_second(),
        )?;
        self.start_time().checked_add_secs(seconds)
    }
}

impl ValidatedSpec {
    pub fn seconds_to_floor(&self) -> Option<u64> {
        seconds_to_floor(self.start_price, self.floor_price, self.decay_per_second)
    }
}
