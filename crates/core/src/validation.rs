use crate::{
    error::ValidationError,
    types::{
        config::AuctionBounds,
        spec::{AuctionSpec, TokenPair, ValidatedSpec},
    },
};

/// Check `spec` against `bounds`, stopping at the first violated rule.
///
/// Rules run in this order: start price range, floor price range, start
/// above floor, decay rate range, duration range, token pair, fee tier.
pub fn validate(
    spec: &AuctionSpec,
    bounds: &AuctionBounds,
) -> Result<ValidatedSpec, ValidationError> {
    if !bounds.is_valid_start_price(spec.start_price) {
        return Err(ValidationError::StartPriceOutOfRange {
            value: spec.start_price,
            min: bounds.min_start_price,
            max: bounds.max_start_price,
        });
    }

    if !bounds.is_valid_floor_price(spec.floor_price) {
        return Err(ValidationError::FloorPriceOutOfRange {
            value: spec.floor_price,
            min: bounds.min_floor_price,
            max: bounds.max_floor_price,
        });
    }

    if spec.start_price <= spec.floor_price {
        return Err(ValidationError::StartNotAboveFloor {
            start_price: spec.start_price,
            floor_price: spec.floor_price,
        });
    }

    if !bounds.is_valid_decay_rate(spec.decay_per_second) {
        return Err(ValidationError::DecayRateOutOfRange {
            value: spec.decay_per_second,
            min: bounds.min_decay_rate,
            max: bounds.max_decay_rate,
        });
    }

    if !bounds.is_valid_duration(spec.duration_seconds) {
        return Err(ValidationError::DurationOutOfRange {
            value: spec.duration_seconds,
            min: bounds.min_duration_seconds,
            max: bounds.max_duration_seconds,
        });
    }

    let pair = TokenPair::new(&spec.token0, &spec.token1)?;

    let fee = bounds
        .allowed_fee(spec.fee)
        .ok_or_else(|| ValidationError::InvalidFeeTier {
            value: spec.fee,
            allowed: bounds.fee_tiers.clone(),
        })?;

    Ok(ValidatedSpec {
        start_price: spec.start_price,
        floor_price: spec.floor_price,
        decay_per_second: spec.decay_per_second,
        duration_seconds: spec.duration_seconds,
        pair,
        fee,
    })
}

impl AuctionSpec {
    pub fn validate(&self, bounds: &AuctionBounds) -> Result<ValidatedSpec, ValidationError> {
        validate(self, bounds)
    }
}
