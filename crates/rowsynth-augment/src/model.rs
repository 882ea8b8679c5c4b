use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AugmentError;

/// Format used for generated timestamp fields.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timezone used when rendering timestamp fields.
///
/// `Local` matches the historical behavior of formatting in the executing
/// environment's timezone; `Utc` and `FixedOffset` make output reproducible
/// across environments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeZoneSpec {
    Local,
    Utc,
    /// Fixed offset east of UTC, in seconds.
    FixedOffset(i32),
}

impl TimeZoneSpec {
    pub fn validate(&self) -> Result<(), AugmentError> {
        if let TimeZoneSpec::FixedOffset(seconds) = self {
            if chrono::FixedOffset::east_opt(*seconds).is_none() {
                return Err(AugmentError::InvalidInput(format!(
                    "fixed offset {seconds}s is out of range"
                )));
            }
        }
        Ok(())
    }

    /// Render an epoch-seconds instant as a calendar timestamp in this zone.
    pub fn format_instant(&self, epoch_seconds: i64) -> Option<String> {
        let utc = DateTime::<Utc>::from_timestamp(epoch_seconds, 0)?;
        let formatted = match self {
            TimeZoneSpec::Local => utc
                .with_timezone(&Local)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            TimeZoneSpec::Utc => utc.format(TIMESTAMP_FORMAT).to_string(),
            TimeZoneSpec::FixedOffset(seconds) => {
                let offset = chrono::FixedOffset::east_opt(*seconds)?;
                utc.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string()
            }
        };
        Some(formatted)
    }

    /// Map a calendar timestamp in this zone back to epoch seconds.
    ///
    /// For `Local`, an ambiguous wall-clock time (DST fold) resolves to the
    /// earliest matching instant.
    pub fn epoch_of(&self, datetime: NaiveDateTime) -> Option<i64> {
        match self {
            TimeZoneSpec::Local => Local
                .from_local_datetime(&datetime)
                .earliest()
                .map(|dt| dt.timestamp()),
            TimeZoneSpec::Utc => Some(Utc.from_utc_datetime(&datetime).timestamp()),
            TimeZoneSpec::FixedOffset(seconds) => chrono::FixedOffset::east_opt(*seconds)?
                .from_local_datetime(&datetime)
                .single()
                .map(|dt| dt.timestamp()),
        }
    }
}

impl fmt::Display for TimeZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneSpec::Local => write!(f, "local"),
            TimeZoneSpec::Utc => write!(f, "utc"),
            TimeZoneSpec::FixedOffset(seconds) => {
                let sign = if *seconds < 0 { '-' } else { '+' };
                let abs = seconds.unsigned_abs();
                write!(f, "{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
            }
        }
    }
}

impl FromStr for TimeZoneSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "local" => Ok(TimeZoneSpec::Local),
            "utc" => Ok(TimeZoneSpec::Utc),
            other => parse_fixed_offset(other),
        }
    }
}

fn parse_fixed_offset(value: &str) -> Result<TimeZoneSpec, String> {
    let invalid = || format!("invalid timezone '{value}', expected local, utc, or +HH:MM");
    let (sign, rest) = if let Some(rest) = value.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = value.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(TimeZoneSpec::FixedOffset(sign * (hours * 3600 + minutes * 60)))
}

/// Options for the augmentation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentOptions {
    /// Source delimited file; the first line is the header.
    pub input: PathBuf,
    /// Destination file, created or overwritten.
    pub output: PathBuf,
    /// Seed for the synthetic field generator; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Timezone for timestamp fields.
    pub timezone: TimeZoneSpec,
    /// Verify the augmented lines against the originals before writing.
    pub verify: bool,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("shuihu.csv"),
            output: PathBuf::from("shuihu1.csv"),
            seed: None,
            timezone: TimeZoneSpec::Local,
            verify: true,
        }
    }
}

impl AugmentOptions {
    pub fn validate(&self) -> Result<(), AugmentError> {
        self.timezone.validate()
    }
}

/// Summary of an augmentation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentReport {
    pub run_id: String,
    /// Data rows that received synthetic fields (header excluded).
    pub rows_augmented: u64,
    /// Total lines written, header included.
    pub lines_total: u64,
    pub bytes_written: u64,
    /// Effective seed; re-running with it reproduces the output exactly.
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timezone_parses_named_zones() {
        assert_eq!("local".parse::<TimeZoneSpec>(), Ok(TimeZoneSpec::Local));
        assert_eq!("utc".parse::<TimeZoneSpec>(), Ok(TimeZoneSpec::Utc));
    }

    #[test]
    fn timezone_parses_fixed_offsets() {
        assert_eq!(
            "+08:00".parse::<TimeZoneSpec>(),
            Ok(TimeZoneSpec::FixedOffset(8 * 3600))
        );
        assert_eq!(
            "-05:30".parse::<TimeZoneSpec>(),
            Ok(TimeZoneSpec::FixedOffset(-(5 * 3600 + 30 * 60)))
        );
    }

    #[test]
    fn timezone_rejects_malformed_offsets() {
        assert!("08:00".parse::<TimeZoneSpec>().is_err());
        assert!("+8".parse::<TimeZoneSpec>().is_err());
        assert!("+24:00".parse::<TimeZoneSpec>().is_err());
        assert!("+00:60".parse::<TimeZoneSpec>().is_err());
    }

    #[test]
    fn timezone_display_round_trips() {
        for spec in [
            TimeZoneSpec::Local,
            TimeZoneSpec::Utc,
            TimeZoneSpec::FixedOffset(8 * 3600),
            TimeZoneSpec::FixedOffset(-(5 * 3600 + 30 * 60)),
        ] {
            let parsed: TimeZoneSpec = spec.to_string().parse().expect("parse displayed value");
            assert_eq!(parsed, spec);
        }
    }

    #[test]
    fn utc_formatting_is_stable() {
        let formatted = TimeZoneSpec::Utc
            .format_instant(1605969199)
            .expect("format instant");
        assert_eq!(formatted, "2020-11-21 14:33:19");
    }

    #[test]
    fn epoch_of_inverts_format_for_fixed_zones() {
        for spec in [TimeZoneSpec::Utc, TimeZoneSpec::FixedOffset(8 * 3600)] {
            let formatted = spec.format_instant(1605969199).expect("format instant");
            let parsed = NaiveDateTime::parse_from_str(&formatted, TIMESTAMP_FORMAT)
                .expect("parse formatted timestamp");
            assert_eq!(spec.epoch_of(parsed), Some(1605969199));
        }
    }

    #[test]
    fn out_of_range_offset_fails_validation() {
        assert!(TimeZoneSpec::FixedOffset(90_000).validate().is_err());
    }
}
