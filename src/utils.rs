use crate::entities::File;
use byte_unit::{Byte, UnitType};
use chrono::{FixedOffset, NaiveDateTime};

/// Converts a local date-time in the given fixed offset to Unix epoch
/// milliseconds
///
/// The upload endpoint takes timestamps at second granularity, multiplied
/// by 1000.
#[must_use]
pub fn to_epoch_millis(time: NaiveDateTime, zone_offset: FixedOffset) -> i64 {
    (time.and_utc().timestamp() - i64::from(zone_offset.local_minus_utc())) * 1000
}

impl File {
    /// Human-readable size of the file, or an empty string when the API did
    /// not report one
    #[must_use]
    pub fn calculate_size(&self) -> String {
        self.additional
            .as_ref()
            .and_then(|additional| additional.size)
            .map(|size| {
                format!(
                    "{:#.2}",
                    Byte::from(size).get_appropriate_unit(UnitType::Decimal)
                )
            })
            .unwrap_or_default()
    }
}
