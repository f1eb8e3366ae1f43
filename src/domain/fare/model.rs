//! Fare table domain entity

use chrono::{DateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::shared::errors::{DomainError, DomainResult};

/// Toll amount in whole currency units
pub type Price = u32;

/// A time of day from which a new price applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareBreakpoint {
    pub hour: u32,
    pub minute: u32,
    pub price: Price,
}

impl FareBreakpoint {
    pub fn new(hour: u32, minute: u32, price: Price) -> Self {
        Self {
            hour,
            minute,
            price,
        }
    }

    /// `None` when hour or minute is out of range.
    pub fn starts_at(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
    }
}

/// Ordered fare breakpoints for one day.
///
/// Construction guarantees the breakpoints are strictly ascending by time of
/// day, which is what makes the binary search in [`FareTable::price_at`] valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareTable {
    breakpoints: Vec<FareBreakpoint>,
    starts: Vec<NaiveTime>,
}

impl FareTable {
    pub fn new(breakpoints: Vec<FareBreakpoint>) -> DomainResult<Self> {
        let mut starts: Vec<NaiveTime> = Vec::with_capacity(breakpoints.len());

        for bp in &breakpoints {
            let start = bp.starts_at().ok_or_else(|| {
                DomainError::InvalidFareTable(format!(
                    "breakpoint {:02}:{:02} is not a valid time of day",
                    bp.hour, bp.minute
                ))
            })?;

            if let Some(prev) = starts.last() {
                if start <= *prev {
                    return Err(DomainError::InvalidFareTable(format!(
                        "breakpoint {} does not come after {}",
                        start.format("%H:%M"),
                        prev.format("%H:%M")
                    )));
                }
            }
            starts.push(start);
        }

        Ok(Self {
            breakpoints,
            starts,
        })
    }

    pub fn breakpoints(&self) -> &[FareBreakpoint] {
        &self.breakpoints
    }

    /// Price of the latest breakpoint at or before the local time of day of `at`.
    pub fn price_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> Price {
        self.price_at_time(at.time())
    }

    /// 0 when `time` is earlier than every breakpoint.
    pub fn price_at_time(&self, time: NaiveTime) -> Price {
        match self.starts.partition_point(|start| *start <= time) {
            0 => 0,
            idx => self.breakpoints[idx - 1].price,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
