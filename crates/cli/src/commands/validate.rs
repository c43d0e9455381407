use std::fmt;

use dutch_core::{FeeTier, Price, ValidatedSpec};
use serde::Serialize;

use crate::{
    commands::CommandContext,
    display::{format_countdown, token_label},
};

#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    pub start_price: Price,
    pub floor_price: Price,
    pub decay_per_second: Price,
    pub duration_seconds: u64,
    pub token0: String,
    pub token1: String,
    pub fee: FeeTier,
    /// Seconds from start until the curve reaches the floor.
    pub seconds_to_floor: Option<u64>,
}

pub fn validate(ctx: &CommandContext) -> eyre::Result<ValidateOutput> {
    let spec = ctx.validated()?;
    Ok(ValidateOutput::from(&spec))
}

impl From<&ValidatedSpec> for ValidateOutput {
    fn from(spec: &ValidatedSpec) -> Self {
        Self {
            start_price: spec.start_price(),
            floor_price: spec.floor_price(),
            decay_per_second: spec.decay_per_second(),
            duration_seconds: spec.duration_seconds(),
            token0: token_label(spec.pair().token0()),
            token1: token_label(spec.pair().token1()),
            fee: spec.fee(),
            seconds_to_floor: spec.seconds_to_floor(),
        }
    }
}

impl fmt::Display for ValidateOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "auction spec is valid")?;
        writeln!(f, "  pair:     {} / {}", self.token0, self.token1)?;
        writeln!(f, "  fee:      {}", self.fee)?;
        writeln!(
            f,
            "  price:    {} -> {} at {}/s",
            self.start_price, self.floor_price, self.decay_per_second
        )?;
        write!(
            f,
            "  duration: {}",
            format_countdown(self.duration_seconds)
        )?;
        match self.seconds_to_floor {
            Some(seconds) if seconds < self.duration_seconds => {
                write!(f, "\n  floor:    reached after {}", format_countdown(seconds))
            }
            Some(_) => write!(f, "\n  floor:    not reached before the auction ends"),
            None => write!(f, "\n  floor:    never reached (flat curve)"),
        }
    }
}
