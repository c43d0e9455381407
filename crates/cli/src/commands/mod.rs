pub mod bid;
pub mod price;
pub mod schedule;
pub mod validate;
pub mod watch;

use std::time::{SystemTime, UNIX_EPOCH};

use dutch_core::{Auction, AuctionBounds, AuctionSpec, Timestamp, ValidatedSpec};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{NetworkSection, ResolvedAuction};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(
        "--at {0} needs a fixed start time: pass --start-time, set start_time under \
         [auction] or export DUTCH_START_TIME"
    )]
    AtWithoutStartTime(Timestamp),
}

/// Everything a subcommand needs, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub spec: AuctionSpec,
    pub bounds: AuctionBounds,
    pub start_time: Option<Timestamp>,
    pub network: Option<NetworkSection>,
}

impl CommandContext {
    pub fn new(
        resolved: ResolvedAuction,
        bounds: AuctionBounds,
        network: Option<NetworkSection>,
    ) -> Self {
        Self {
            spec: resolved.spec,
            bounds,
            start_time: resolved.start_time,
            network,
        }
    }

    pub fn validated(&self) -> eyre::Result<ValidatedSpec> {
        self.spec.validate(&self.bounds).map_err(|err| {
            warn!(field = err.field(), %err, "auction spec rejected");
            err.into()
        })
    }

    /// Create the auction, starting it at `now` when no start time was given.
    pub fn auction(&self, now: Timestamp) -> eyre::Result<Auction> {
        let spec = self.validated()?;
        let start_time = self.start_time.unwrap_or(now);
        debug!(%start_time, explicit = self.start_time.is_some(), "creating auction");
        Ok(Auction::new(&spec, start_time)?)
    }

    /// Instant a query is evaluated at: `at` when given, otherwise `now`.
    ///
    /// Without a fixed start time the auction starts at the evaluation
    /// instant, so an explicit `at` would always see the start price.
    pub fn evaluation_time(
        &self,
        at: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<Timestamp, CommandError> {
        match (at, self.start_time) {
            (Some(at), None) => Err(CommandError::AtWithoutStartTime(at)),
            (Some(at), Some(_)) => Ok(at),
            (None, _) => Ok(now),
        }
    }
}

pub fn unix_now() -> Timestamp {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    Timestamp::new(seconds)
}
