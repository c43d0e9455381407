use serde::{Deserialize, Serialize};

use crate::error::TokenPairError;

use super::{fee::FeeTier, primitives::Price};

/// Parameters of an auction as proposed by its creator, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionSpec {
    pub start_price: Price,
    pub floor_price: Price,
    pub decay_per_second: Price,
    pub duration_seconds: u64,
    pub token0: String,
    pub token1: String,
    /// Raw fee, in hundredths of a basis point.
    pub fee: u32,
}

/// Traded pair with non-empty, distinct identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TokenPair {
    token0: String,
    token1: String,
}

impl TokenPair {
    /// Identifiers are trimmed; distinctness ignores ASCII case so that
    /// differently-cased hex addresses count as the same token.
    pub fn new(token0: &str, token1: &str) -> Result<Self, TokenPairError> {
        let token0 = token0.trim();
        let token1 = token1.trim();

        if token0.is_empty() {
            return Err(TokenPairError::EmptyToken0);
        }

        if token1.is_empty() {
            return Err(TokenPairError::EmptyToken1);
        }

        if token0.eq_ignore_ascii_case(token1) {
            return Err(TokenPairError::Identical(token0.to_string()));
        }

        Ok(Self {
            token0: token0.to_string(),
            token1: token1.to_string(),
        })
    }

    pub fn token0(&self) -> &str {
        &self.token0
    }

    pub fn token1(&self) -> &str {
        &self.token1
    }
}

/// An `AuctionSpec` that passed every bound check. Only
/// [`validate`](crate::validation::validate) constructs one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedSpec {
    pub(crate) start_price: Price,
    pub(crate) floor_price: Price,
    pub(crate) decay_per_second: Price,
    pub(crate) duration_seconds: u64,
    pub(crate) pair: TokenPair,
    pub(crate) fee: FeeTier,
}

impl ValidatedSpec {
    pub fn start_price(&self) -> Price {
        self.start_price
    }

    pub fn floor_price(&self) -> Price {
        self.floor_price
    }

    pub fn decay_per_second(&self) -> Price {
        self.decay_per_second
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn pair(&self) -> &TokenPair {
        &self.pair
    }

    pub fn fee(&self) -> FeeTier {
        self.fee
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_pair_trims_and_rejects_blank() {
        let pair = TokenPair::new(" 0xaaa ", "0xbbb").expect("distinct tokens");
        assert_eq!(pair.token0(), "0xaaa");
        assert_eq!(TokenPair::new("  ", "0xbbb"), Err(TokenPairError::EmptyToken0));
        assert_eq!(TokenPair::new("0xaaa", ""), Err(TokenPairError::EmptyToken1));
    }

    #[test]
    fn token_pair_identity_ignores_case() {
        assert_eq!(
            TokenPair::new("0xAbC", "0xabc"),
            Err(TokenPairError::Identical("0xAbC".into()))
        );
    }
}
