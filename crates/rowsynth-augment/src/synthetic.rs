use rand::Rng;

use crate::errors::AugmentError;
use crate::model::TimeZoneSpec;

/// Anchor for generated timestamps, as Unix epoch seconds.
pub const BASE_INSTANT: i64 = 1_605_969_199;
/// Width of the timestamp window, in seconds.
pub const DAY_SECONDS: f64 = 86_400.0;

/// Fixed header suffix naming the four synthetic columns.
pub const HEADER_SUFFIX: &str = r#","布尔","浮点","整数","日期""#;

/// One row's worth of synthetic field values, in append order.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticFields {
    pub flag: bool,
    pub float: f64,
    pub integer: i64,
    pub timestamp: String,
}

impl SyntheticFields {
    /// Render the fields as the comma-separated suffix appended to a row.
    ///
    /// The boolean and timestamp are quoted, the numerics are not. None of
    /// the rendered values can contain a comma or a quote, so plain
    /// concatenation is safe.
    pub fn to_row_suffix(&self) -> String {
        format!(
            "\"{}\",{},{},\"{}\"",
            self.flag, self.float, self.integer, self.timestamp
        )
    }
}

/// Draw the four synthetic fields for one row.
///
/// The boolean comes from a draw in [1,10] with a threshold at 5, the float
/// is uniform in [0, 10000), the integer uniform in [0, 10000], and the
/// timestamp a whole-second offset in [0, 86400) added to [`BASE_INSTANT`]
/// and rendered in the given timezone.
pub fn draw_fields(
    rng: &mut impl Rng,
    timezone: &TimeZoneSpec,
) -> Result<SyntheticFields, AugmentError> {
    let flag = rng.random_range(1..=10) > 5;
    let float = rng.random_range(0.0..10_000.0);
    let integer = rng.random_range(0..=10_000);
    let offset = rng.random_range(0.0..DAY_SECONDS) as i64;
    let epoch = BASE_INSTANT + offset;
    let timestamp = timezone.format_instant(epoch).ok_or_else(|| {
        AugmentError::InvalidInput(format!("instant {epoch} is not representable"))
    })?;
    Ok(SyntheticFields {
        flag,
        float,
        integer,
        timestamp,
    })
}
