use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pool fee in hundredths of a basis point (`3000` = 30 bps = 0.3%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(u32);

impl FeeTier {
    pub const BPS_1: Self = Self(100);
    pub const BPS_5: Self = Self(500);
    pub const BPS_10: Self = Self(1_000);
    pub const BPS_30: Self = Self(3_000);
    pub const BPS_100: Self = Self(10_000);

    pub const STANDARD: [Self; 5] = [
        Self::BPS_1,
        Self::BPS_5,
        Self::BPS_10,
        Self::BPS_30,
        Self::BPS_100,
    ];

    /// Wraps a raw value without checking it against any allowed set; the
    /// validator decides which tiers are acceptable.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn bps(&self) -> Decimal {
        Decimal::new(self.0 as i64, 2)
    }

    pub fn percent(&self) -> Decimal {
        Decimal::new(self.0 as i64, 4)
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}% ({} bps)",
            self.percent().normalize(),
            self.bps().normalize()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tiers_map_to_bps() {
        let bps: Vec<String> = FeeTier::STANDARD
            .iter()
            .map(|tier| tier.bps().normalize().to_string())
            .collect();
        assert_eq!(bps, ["1", "5", "10", "30", "100"]);
    }

    #[test]
    fn displays_percentage_label() {
        assert_eq!(FeeTier::BPS_30.to_string(), "0.3% (30 bps)");
        assert_eq!(FeeTier::BPS_1.to_string(), "0.01% (1 bps)");
        assert_eq!(FeeTier::BPS_100.to_string(), "1% (100 bps)");
    }
}
