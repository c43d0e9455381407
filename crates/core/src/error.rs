use thiserror::Error;

use crate::types::{FeeTier, Price, Timestamp};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Auction(#[from] AuctionError),
}

/// First rule an `AuctionSpec` violated, with the offending value and the
/// bound it was checked against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start price {value} must be between {min} and {max}")]
    StartPriceOutOfRange { value: Price, min: Price, max: Price },

    #[error("floor price {value} must be between {min} and {max}")]
    FloorPriceOutOfRange { value: Price, min: Price, max: Price },

    #[error("start price {start_price} must be greater than floor price {floor_price}")]
    StartNotAboveFloor {
        start_price: Price,
        floor_price: Price,
    },

    #[error("decay rate {value} per second must be between {min} and {max}")]
    DecayRateOutOfRange { value: Price, min: Price, max: Price },

    #[error("duration {value}s must be between {min}s and {max}s")]
    DurationOutOfRange { value: u64, min: u64, max: u64 },

    #[error("invalid token pair: {0}")]
    InvalidTokenPair(#[from] TokenPairError),

    #[error("fee {value} is not an allowed tier (allowed: {})", join_tiers(.allowed))]
    InvalidFeeTier { value: u32, allowed: Vec<FeeTier> },
}

impl ValidationError {
    /// Name of the `AuctionSpec` field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            Self::StartPriceOutOfRange { .. } => "start_price",
            Self::FloorPriceOutOfRange { .. } => "floor_price",
            Self::StartNotAboveFloor { .. } => "start_price",
            Self::DecayRateOutOfRange { .. } => "decay_per_second",
            Self::DurationOutOfRange { .. } => "duration_seconds",
            Self::InvalidTokenPair(TokenPairError::EmptyToken1) => "token1",
            Self::InvalidTokenPair(_) => "token0",
            Self::InvalidFeeTier { .. } => "fee",
        }
    }
}

fn join_tiers(tiers: &[FeeTier]) -> String {
    tiers
        .iter()
        .map(|tier| tier.raw().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenPairError {
    #[error("token0 must not be empty")]
    EmptyToken0,

    #[error("token1 must not be empty")]
    EmptyToken1,

    #[error("token0 and token1 must differ (both are {0})")]
    Identical(String),
}

#[derive(Debug, Error)]
pub enum PriceError {
    #[error("failed to parse price: {0}")]
    Parse(#[from] rust_decimal::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    #[error("auction starting at {start_time} cannot run for {duration_seconds}s")]
    InvalidWindow {
        start_time: Timestamp,
        duration_seconds: u64,
    },
}
