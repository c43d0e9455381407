use std::{fmt, num::NonZeroU64};

use dutch_core::{PricePoint, Timestamp, schedule as price_schedule};
use serde::Serialize;

use crate::{commands::CommandContext, display::format_countdown};

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleOutput {
    pub step_seconds: u64,
    pub points: Vec<PricePoint>,
}

pub fn schedule(
    ctx: &CommandContext,
    step: NonZeroU64,
    now: Timestamp,
) -> eyre::Result<ScheduleOutput> {
    let auction = ctx.auction(now)?;

    Ok(ScheduleOutput {
        step_seconds: step.get(),
        points: price_schedule(&auction, step),
    })
}

impl fmt::Display for ScheduleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12}  {:>12}  price", "timestamp", "elapsed")?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:>12}  {:>12}  {}",
                point.at.to_string(),
                format_countdown(point.offset_seconds),
                point.price
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use dutch_core::Price;

    #[test]
    fn samples_every_step_through_end() {
        let step = NonZeroU64::new(30).expect("non-zero");
        let output =
            schedule(&fixtures::context(Some(0)), step, Timestamp::new(0)).expect("valid");

        assert_eq!(output.points.len(), 121);
        assert_eq!(output.points[1].price, Price::from(700));
        assert_eq!(output.points[3].price, Price::from(100));
        assert_eq!(output.points[120].at, Timestamp::new(3600));

        let rendered = output.to_string();
        assert_eq!(rendered.lines().count(), 122);
        assert!(rendered.lines().nth(2).is_some_and(|line| line.ends_with("700")));
    }
}
