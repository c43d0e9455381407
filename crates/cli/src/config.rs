use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dutch_core::{AuctionBounds, AuctionSpec, Price, Timestamp};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "auction.toml";
pub const START_TIME_ENV: &str = "DUTCH_START_TIME";
const APP_DIR: &str = "dutch";

#[derive(Debug, Deserialize, PartialEq)]
pub struct AuctionFile {
    #[serde(default)]
    pub auction: AuctionSection,
    #[serde(default)]
    pub bounds: AuctionBounds,
    pub network: Option<NetworkSection>,
}

/// `[auction]` table. Every field may instead come from the command line.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AuctionSection {
    pub start_price: Option<Price>,
    pub floor_price: Option<Price>,
    pub decay_per_second: Option<Price>,
    pub duration_seconds: Option<u64>,
    pub token0: Option<String>,
    pub token1: Option<String>,
    pub fee: Option<u32>,
    pub start_time: Option<u64>,
}

/// Display-only description of where the auction lives.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NetworkSection {
    pub name: String,
    pub contract: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AuctionOverrides {
    pub start_price: Option<Price>,
    pub floor_price: Option<Price>,
    pub decay_per_second: Option<Price>,
    pub duration_seconds: Option<u64>,
    pub token0: Option<String>,
    pub token1: Option<String>,
    pub fee: Option<u32>,
    pub start_time: Option<u64>,
}

/// Auction description after merging file, overrides and environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAuction {
    pub spec: AuctionSpec,
    /// `None` means "start now".
    pub start_time: Option<Timestamp>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse toml at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("missing {0}: pass --{flag} or set it under [auction]", flag = .0.replace('_', "-"))]
    MissingField(&'static str),
    #[error("invalid {START_TIME_ENV}={0:?}: expected unix seconds")]
    InvalidStartTime(String),
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AuctionFile, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AuctionFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(config)
}

/// `auction.toml` in the working directory, else the per-user copy under the
/// platform config dir, else the working-directory path (so the read error
/// names the file people expect).
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_CONFIG_PATH);
    if local.exists() {
        return local;
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(DEFAULT_CONFIG_PATH))
        .filter(|path| path.exists())
        .unwrap_or(local)
}

pub fn resolve_auction(
    config: &AuctionFile,
    overrides: AuctionOverrides,
) -> Result<ResolvedAuction, ResolveError> {
    let file = &config.auction;

    let spec = AuctionSpec {
        start_price: required("start_price", overrides.start_price.or(file.start_price))?,
        floor_price: required("floor_price", overrides.floor_price.or(file.floor_price))?,
        decay_per_second: required(
            "decay_per_second",
            overrides.decay_per_second.or(file.decay_per_second),
        )?,
        duration_seconds: required(
            "duration_seconds",
            overrides.duration_seconds.or(file.duration_seconds),
        )?,
        token0: required("token0", overrides.token0.or_else(|| file.token0.clone()))?,
        token1: required("token1", overrides.token1.or_else(|| file.token1.clone()))?,
        fee: required("fee", overrides.fee.or(file.fee))?,
    };

    let start_time = match overrides.start_time.or(file.start_time) {
        Some(seconds) => Some(seconds),
        None => start_time_from_env()?,
    };

    Ok(ResolvedAuction {
        spec,
        start_time: start_time.map(Timestamp::new),
    })
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ResolveError> {
    value.ok_or(ResolveError::MissingField(field))
}

fn start_time_from_env() -> Result<Option<u64>, ResolveError> {
    match env::var(START_TIME_ENV) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ResolveError::InvalidStartTime(raw)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dutch_core::FeeTier;
    use std::path::Path;

    fn example() -> AuctionFile {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("auction.example.toml");
        load_config(path).expect("should parse example config")
    }

    #[test]
    fn parses_example_config() {
        let config = example();

        assert_eq!(config.auction.start_price, Some(Price::from(1000)));
        assert_eq!(config.auction.decay_per_second, Some(Price::from(10)));
        assert_eq!(config.auction.fee, Some(3000));
        assert_eq!(config.bounds.max_start_price, Price::from(500_000));
        assert_eq!(config.bounds.min_floor_price, Price::from_parts(1, 2));
        assert_eq!(
            config.network.as_ref().map(|n| n.name.as_str()),
            Some("sepolia")
        );
    }

    #[test]
    fn bounds_default_when_table_missing() {
        let config: AuctionFile = toml::from_str(
            r#"
            [auction]
            start_price = "2.5"
            floor_price = 0.5
            "#,
        )
        .expect("should parse partial config");

        assert_eq!(config.bounds, AuctionBounds::default());
        assert_eq!(config.bounds.fee_tiers, FeeTier::STANDARD.to_vec());
        assert_eq!(config.auction.start_price, Some(Price::from_parts(25, 1)));
        assert_eq!(config.auction.floor_price, Some(Price::from_parts(5, 1)));
        assert!(config.network.is_none());
    }

    #[test]
    fn rejects_unknown_auction_keys() {
        let result: Result<AuctionFile, _> = toml::from_str(
            r#"
            [auction]
            starting_price = 10
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn overrides_take_precedence_over_file() {
        let config = example();
        let resolved = resolve_auction(
            &config,
            AuctionOverrides {
                start_price: Some(Price::from(2000)),
                fee: Some(500),
                start_time: Some(42),
                ..Default::default()
            },
        )
        .expect("complete auction");

        assert_eq!(resolved.spec.start_price, Price::from(2000));
        assert_eq!(resolved.spec.floor_price, Price::from(100));
        assert_eq!(resolved.spec.fee, 500);
        assert_eq!(resolved.start_time, Some(Timestamp::new(42)));
    }

    #[test]
    fn reports_first_missing_field() {
        let config = AuctionFile {
            auction: AuctionSection {
                start_price: Some(Price::from(10)),
                ..Default::default()
            },
            bounds: AuctionBounds::default(),
            network: None,
        };
        let err = resolve_auction(&config, AuctionOverrides::default()).unwrap_err();
        assert_eq!(err, ResolveError::MissingField("floor_price"));
        assert_eq!(
            err.to_string(),
            "missing floor_price: pass --floor-price or set it under [auction]"
        );
    }

    #[test]
    fn start_time_falls_back_to_env() {
        let mut config = example();
        config.auction.start_time = None;

        // SAFETY: test process controls its own environment and uses a unique key.
        unsafe { env::set_var(START_TIME_ENV, "1700000000") };
        let resolved =
            resolve_auction(&config, AuctionOverrides::default()).expect("env start time");
        assert_eq!(resolved.start_time, Some(Timestamp::new(1_700_000_000)));

        // SAFETY: test process controls its own environment and uses a unique key.
        unsafe { env::set_var(START_TIME_ENV, "soon") };
        let err = resolve_auction(&config, AuctionOverrides::default()).unwrap_err();
        assert_eq!(err, ResolveError::InvalidStartTime("soon".into()));

        // SAFETY: test process controls its own environment and uses a unique key.
        unsafe { env::remove_var(START_TIME_ENV) };
        let resolved =
            resolve_auction(&config, AuctionOverrides::default()).expect("no start time");
        assert_eq!(resolved.start_time, None);
    }
}
