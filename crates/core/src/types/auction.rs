use serde::Serialize;

use crate::error::AuctionError;

use super::{
    fee::FeeTier,
    primitives::{Price, Timestamp},
    spec::{TokenPair, ValidatedSpec},
};

/// A created auction. Settlement (flipping `active` off) belongs to whoever
/// persists the record; pricing only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Auction {
    start_price: Price,
    floor_price: Price,
    decay_per_second: Price,
    pair: TokenPair,
    fee: FeeTier,
    start_time: Timestamp,
    end_time: Timestamp,
    active: bool,
}

/// Coarse-grained lifecycle of an auction at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum AuctionPhase {
    Active { remaining_seconds: u64 },
    /// Still flagged active but the clock has passed `end_time`.
    Expired,
    /// Settled or closed by the owner of the record.
    Ended,
}

impl AuctionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active { .. } => "Active",
            Self::Expired => "Time Expired",
            Self::Ended => "Auction Ended",
        }
    }
}

impl Auction {
    pub fn new(spec: &ValidatedSpec, start_time: Timestamp) -> Result<Self, AuctionError> {
        let duration_seconds = spec.duration_seconds();
        let end_time = start_time
            .checked_add_secs(duration_seconds)
            .filter(|end| *end > start_time)
            .ok_or(AuctionError::InvalidWindow {
                start_time,
                duration_seconds,
            })?;

        Ok(Self {
            start_price: spec.start_price(),
            floor_price: spec.floor_price(),
            decay_per_second: spec.decay_per_second(),
            pair: spec.pair().clone(),
            fee: spec.fee(),
            start_time,
            end_time,
            active: true,
        })
    }

    pub fn start_price(&self) -> Price {
        self.start_price
    }

    pub fn floor_price(&self) -> Price {
        self.floor_price
    }

    pub fn decay_per_second(&self) -> Price {
        self.decay_per_second
    }

    pub fn pair(&self) -> &TokenPair {
        &self.pair
    }

    pub fn fee(&self) -> FeeTier {
        self.fee
    }

    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    pub fn end_time(&self) -> Timestamp {
        self.end_time
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn duration_seconds(&self) -> u64 {
        self.end_time.seconds_since(self.start_time)
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Whether bids can still be taken at `now`.
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.active && now < self.end_time
    }

    pub fn phase(&self, now: Timestamp) -> AuctionPhase {
        if !self.active {
            AuctionPhase::Ended
        } else if now < self.end_time {
            AuctionPhase::Active {
                remaining_seconds: self.time_remaining(now),
            }
        } else {
            AuctionPhase::Expired
        }
    }

    pub fn time_remaining(&self, now: Timestamp) -> u64 {
        self.end_time.seconds_since(now)
    }

    /// Fraction of the auction window that has elapsed, in `[0, 1]`.
    pub fn progress(&self, now: Timestamp) -> f64 {
        let duration = self.duration_seconds();
        let elapsed = now.seconds_since(self.start_time).min(duration);
        elapsed as f64 / duration as f64
    }
}
