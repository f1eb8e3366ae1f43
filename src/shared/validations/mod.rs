//! Input validation for values arriving over the HTTP boundary.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::domain::PassageTime;
use crate::shared::errors::{DomainError, DomainResult};

pub const REGISTRATION_MIN_LEN: usize = 2;
/// Japanese plates can reach twelve characters, the longest in use.
pub const REGISTRATION_MAX_LEN: usize = 12;

pub const PASSAGE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn validate_registration(registration: &str) -> DomainResult<()> {
    let len = registration.chars().count();
    if (REGISTRATION_MIN_LEN..=REGISTRATION_MAX_LEN).contains(&len) {
        Ok(())
    } else {
        Err(DomainError::Validation(
            "Wrong registration number format".to_string(),
        ))
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp in the process's local zone.
pub fn parse_passage_time(raw: &str) -> DomainResult<PassageTime> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), PASSAGE_TIME_FORMAT)
        .map_err(|_| wrong_date_format())?;
    localize(&Local, naive).ok_or_else(wrong_date_format)
}

pub fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| wrong_date_format())
}

/// Ambiguous times (DST fall-back) resolve to the earlier instant; times
/// skipped by a DST jump do not exist and yield `None`.
fn localize<Tz: TimeZone>(zone: &Tz, naive: NaiveDateTime) -> Option<PassageTime> {
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.fixed_offset())
}

fn wrong_date_format() -> DomainError {
    DomainError::Validation("Wrong date format".to_string())
}
