use serde::{Deserialize, Serialize};

use super::{fee::FeeTier, primitives::Price};

pub const MIN_START_PRICE: Price = Price::from_parts(1, 0);
pub const MAX_START_PRICE: Price = Price::from_parts(1_000_000, 0);
pub const MIN_FLOOR_PRICE: Price = Price::from_parts(1, 2);
pub const MAX_FLOOR_PRICE: Price = Price::from_parts(100_000, 0);
pub const MIN_DECAY_RATE: Price = Price::ZERO;
pub const MAX_DECAY_RATE: Price = Price::from_parts(1_000, 0);
/// 5 minutes.
pub const MIN_AUCTION_DURATION: u64 = 300;
/// 24 hours.
pub const MAX_AUCTION_DURATION: u64 = 86_400;

/// Inclusive limits an auction must satisfy before it can be created.
///
/// Every field defaults to the constants above, so a config file only needs
/// to name the bounds it wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuctionBounds {
    pub min_start_price: Price,
    pub max_start_price: Price,
    pub min_floor_price: Price,
    pub max_floor_price: Price,
    pub min_decay_rate: Price,
    pub max_decay_rate: Price,
    pub min_duration_seconds: u64,
    pub max_duration_seconds: u64,
    pub fee_tiers: Vec<FeeTier>,
}

impl Default for AuctionBounds {
    fn default() -> Self {
        Self {
            min_start_price: MIN_START_PRICE,
            max_start_price: MAX_START_PRICE,
            min_floor_price: MIN_FLOOR_PRICE,
            max_floor_price: MAX_FLOOR_PRICE,
            min_decay_rate: MIN_DECAY_RATE,
            max_decay_rate: MAX_DECAY_RATE,
            min_duration_seconds: MIN_AUCTION_DURATION,
            max_duration_seconds: MAX_AUCTION_DURATION,
            fee_tiers: FeeTier::STANDARD.to_vec(),
        }
    }
}

impl AuctionBounds {
    pub fn is_valid_start_price(&self, price: Price) -> bool {
        (self.min_start_price..=self.max_start_price).contains(&price)
    }

    pub fn is_valid_floor_price(&self, price: Price) -> bool {
        (self.min_floor_price..=self.max_floor_price).contains(&price)
    }

    pub fn is_valid_decay_rate(&self, rate: Price) -> bool {
        (self.min_decay_rate..=self.max_decay_rate).contains(&rate)
    }

    pub fn is_valid_duration(&self, seconds: u64) -> bool {
        (self.min_duration_seconds..=self.max_duration_seconds).contains(&seconds)
    }

    pub fn allowed_fee(&self, raw: u32) -> Option<FeeTier> {
        self.fee_tiers
            .iter()
            .copied()
            .find(|tier| tier.raw() == raw)
    }
}
