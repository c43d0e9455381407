use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    pricing::current_price,
    types::{
        auction::Auction,
        primitives::{Price, Timestamp},
    },
};

/// Result of comparing a bid against the curve at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BidOutcome {
    /// Bid met or beat the current price.
    Accepted { price: Price },
    RejectedTooLow { price: Price },
    RejectedAuctionInactive,
    RejectedInvalidAmount,
}

impl BidOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Price the bid was compared against, when a comparison happened.
    pub fn price(&self) -> Option<Price> {
        match self {
            Self::Accepted { price } | Self::RejectedTooLow { price } => Some(*price),
            Self::RejectedAuctionInactive | Self::RejectedInvalidAmount => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Accepted { price } => format!("bid accepted at current price {price}"),
            Self::RejectedTooLow { price } => {
                format!("bid rejected: below current price {price}")
            }
            Self::RejectedAuctionInactive => "bid rejected: auction is not active".to_string(),
            Self::RejectedInvalidAmount => {
                "bid rejected: amount must be a finite positive number".to_string()
            }
        }
    }
}

/// Evaluate a human-entered bid amount.
///
/// An auction that is settled or past `end_time` rejects any amount; after
/// that, NaN, infinities, zero and negatives are invalid. Every other amount
/// is compared against the current price using its exact binary value.
pub fn evaluate_bid(auction: &Auction, bid_amount: f64, now: Timestamp) -> BidOutcome {
    if !auction.is_open(now) {
        return BidOutcome::RejectedAuctionInactive;
    }

    if !bid_amount.is_finite() || bid_amount <= 0.0 {
        return BidOutcome::RejectedInvalidAmount;
    }

    let price = current_price(auction, now);
    match Decimal::from_f64_retain(bid_amount) {
        // Above `Decimal::MAX`, so above any price.
        None => BidOutcome::Accepted { price },
        // Positive but below the smallest decimal step.
        Some(amount) if amount.is_zero() => {
            if price.is_positive() {
                BidOutcome::RejectedTooLow { price }
            } else {
                BidOutcome::Accepted { price }
            }
        }
        Some(amount) => compare(Price::new(amount), price),
    }
}

/// Same as [`evaluate_bid`] for an amount that is already an exact decimal.
pub fn evaluate_bid_price(auction: &Auction, amount: Price, now: Timestamp) -> BidOutcome {
    if !auction.is_open(now) {
        return BidOutcome::RejectedAuctionInactive;
    }

    if !amount.is_positive() {
        return BidOutcome::RejectedInvalidAmount;
    }

    compare(amount, current_price(auction, now))
}

fn compare(amount: Price, price: Price) -> BidOutcome {
    if amount >= price {
        BidOutcome::Accepted { price }
    } else {
        BidOutcome::RejectedTooLow { price }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        types::{AuctionBounds, AuctionSpec},
        validation::validate,
    };

    fn reference() -> Auction {
        let spec = AuctionSpec {
            start_price: Price::from(1000),
            floor_price: Price::from(100),
            decay_per_second: Price::from(10),
            duration_seconds: 3600,
            token0: "WETH".into(),
            token1: "USDC".into(),
            fee: 3000,
        };
        let validated = validate(&spec, &AuctionBounds::default()).expect("valid spec");
        Auction::new(&validated, Timestamp::EPOCH).expect("window fits")
    }

    #[test]
    fn accepts_bid_above_current_price() {
        let outcome = evaluate_bid(&reference(), 600.0, Timestamp::new(50));
        assert_eq!(
            outcome,
            BidOutcome::Accepted {
                price: Price::from(500)
            }
        );
        assert!(outcome.is_accepted());
    }

    #[test]
    fn accepts_bid_equal_to_current_price() {
        let outcome = evaluate_bid(&reference(), 500.0, Timestamp::new(50));
        assert!(outcome.is_accepted());
    }

    #[test]
    fn rejects_bid_below_current_price() {
        let outcome = evaluate_bid(&reference(), 400.0, Timestamp::new(50));
        assert_eq!(
            outcome,
            BidOutcome::RejectedTooLow {
                price: Price::from(500)
            }
        );
        assert_eq!(outcome.price(), Some(Price::from(500)));
    }

    #[test]
    fn floor_priced_bid_accepted_once_curve_bottoms_out() {
        let auction = reference();
        assert!(evaluate_bid(&auction, 100.0, Timestamp::new(200)).is_accepted());
        assert!(!evaluate_bid(&auction, 99.99, Timestamp::new(200)).is_accepted());
    }

    #[test]
    fn inactive_auction_rejects_any_amount() {
        let mut auction = reference();
        auction.deactivate();
        for amount in [600.0, 1e9, 0.0, -5.0, f64::NAN] {
            assert_eq!(
                evaluate_bid(&auction, amount, Timestamp::new(50)),
                BidOutcome::RejectedAuctionInactive
            );
        }
    }

    #[test]
    fn rejects_at_and_after_end_time() {
        let auction = reference();
        assert_eq!(
            evaluate_bid(&auction, 600.0, auction.end_time()),
            BidOutcome::RejectedAuctionInactive
        );
        assert!(evaluate_bid(&auction, 600.0, Timestamp::new(3_599)).is_accepted());
    }

    #[test]
    fn rejects_invalid_amounts() {
        let auction = reference();
        for amount in [0.0, -0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                evaluate_bid(&auction, amount, Timestamp::new(50)),
                BidOutcome::RejectedInvalidAmount,
                "amount {amount}"
            );
        }
        assert_eq!(
            evaluate_bid_price(&auction, Price::ZERO, Timestamp::new(50)),
            BidOutcome::RejectedInvalidAmount
        );
    }

    #[test]
    fn compares_float_bids_without_rounding() {
        let auction = reference();
        let now = Timestamp::new(50);

        assert_eq!(
            evaluate_bid(&auction, 499.999_999_999_999_94, now),
            BidOutcome::RejectedTooLow {
                price: Price::from(500)
            }
        );
        assert!(evaluate_bid(&auction, 500.000_000_000_000_1, now).is_accepted());
    }

    #[test]
    fn huge_bids_beat_any_price() {
        let auction = reference();
        for amount in [1e29, 1e300, f64::MAX] {
            assert_eq!(
                evaluate_bid(&auction, amount, Timestamp::new(50)),
                BidOutcome::Accepted {
                    price: Price::from(500)
                },
                "amount {amount}"
            );
        }
    }

    #[test]
    fn tiny_positive_bids_are_too_low() {
        let auction = reference();
        for amount in [1e-30, f64::MIN_POSITIVE, 5e-324] {
            assert_eq!(
                evaluate_bid(&auction, amount, Timestamp::new(50)),
                BidOutcome::RejectedTooLow {
                    price: Price::from(500)
                },
                "amount {amount}"
            );
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let auction = reference();
        let outcomes: Vec<BidOutcome> = (0..100)
            .map(|_| evaluate_bid(&auction, 600.0, Timestamp::new(50)))
            .collect();
        assert!(outcomes.iter().all(BidOutcome::is_accepted));
    }

    #[test]
    fn serializes_with_outcome_tag() {
        let json = serde_json::to_value(BidOutcome::RejectedTooLow {
            price: Price::from(500),
        })
        .expect("serializable");
        assert_eq!(json["outcome"], "rejected_too_low");
    }
}
