//! Clock pinned to a configured timezone.

use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;

use medtrack_core::Clock;

use crate::errors::CliError;

/// Wall clock in a named IANA timezone rather than the host's local zone.
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock(pub Tz);

impl Clock for ZonedClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.0).naive_local()
    }
}

/// Validate an IANA timezone name (e.g., "Asia/Tokyo").
pub fn parse_timezone(value: &str) -> anyhow::Result<Tz> {
    value.trim().parse::<Tz>().map_err(|_| {
        CliError::invalid_input(format!(
            "Unknown timezone: {} (use an IANA name such as Asia/Tokyo)",
            value
        ))
        .into()
    })
}
