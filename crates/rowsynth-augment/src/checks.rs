use chrono::NaiveDateTime;

use crate::model::{TIMESTAMP_FORMAT, TimeZoneSpec};
use crate::synthetic::{BASE_INSTANT, HEADER_SUFFIX};

/// Result of verifying an augmented sequence against its source lines.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Passed,
    Failed(String),
}

/// Verify the augmented lines against the originals.
///
/// Checks line-count preservation, the verbatim header suffix, that every
/// row gained exactly four appended fields (split with quote-aware CSV
/// parsing), and that each field value is in range: boolean in
/// {true, false}, float in [0, 10000), integer in [0, 10000], timestamp
/// inside the one-day window anchored at [`BASE_INSTANT`].
pub fn verify_augmented(
    original: &[String],
    augmented: &[String],
    timezone: &TimeZoneSpec,
) -> CheckOutcome {
    if original.len() != augmented.len() {
        return CheckOutcome::Failed(format!(
            "line count changed: {} in, {} out",
            original.len(),
            augmented.len()
        ));
    }
    let Some(header) = augmented.first() else {
        return CheckOutcome::Failed("no header line".to_string());
    };
    let expected_header = format!("{}{}", original[0], HEADER_SUFFIX);
    if *header != expected_header {
        return CheckOutcome::Failed(format!(
            "header mismatch: expected '{expected_header}', got '{header}'"
        ));
    }

    for (index, (source, row)) in original.iter().zip(augmented).enumerate().skip(1) {
        let prefix = format!("{source},");
        let Some(appended) = row.strip_prefix(&prefix) else {
            return CheckOutcome::Failed(format!("row {index} does not extend its source line"));
        };
        let fields = match split_appended(appended) {
            Ok(fields) => fields,
            Err(reason) => {
                return CheckOutcome::Failed(format!("row {index}: {reason}"));
            }
        };
        if fields.len() != 4 {
            return CheckOutcome::Failed(format!(
                "row {index}: expected 4 appended fields, found {}",
                fields.len()
            ));
        }
        if let Err(reason) = check_fields(&fields, timezone) {
            return CheckOutcome::Failed(format!("row {index}: {reason}"));
        }
    }

    CheckOutcome::Passed
}

/// Split the appended portion of a row on commas, respecting quoting.
fn split_appended(appended: &str) -> Result<Vec<String>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(appended.as_bytes());
    let mut records = reader.records();
    let record = match records.next() {
        Some(Ok(record)) => record,
        Some(Err(err)) => return Err(format!("appended fields do not parse: {err}")),
        None => return Err("no appended fields".to_string()),
    };
    if records.next().is_some() {
        return Err("appended fields span more than one record".to_string());
    }
    Ok(record.iter().map(|field| field.to_string()).collect())
}

fn check_fields(fields: &[String], timezone: &TimeZoneSpec) -> Result<(), String> {
    if fields[0] != "true" && fields[0] != "false" {
        return Err(format!("boolean field is '{}'", fields[0]));
    }

    let float: f64 = fields[1]
        .parse()
        .map_err(|_| format!("float field '{}' does not parse", fields[1]))?;
    if !(0.0..10_000.0).contains(&float) {
        return Err(format!("float field {float} out of [0, 10000)"));
    }

    let integer: i64 = fields[2]
        .parse()
        .map_err(|_| format!("integer field '{}' does not parse", fields[2]))?;
    if !(0..=10_000).contains(&integer) {
        return Err(format!("integer field {integer} out of [0, 10000]"));
    }

    let timestamp = NaiveDateTime::parse_from_str(&fields[3], TIMESTAMP_FORMAT)
        .map_err(|_| format!("timestamp field '{}' does not match format", fields[3]))?;
    let epoch = timezone
        .epoch_of(timestamp)
        .ok_or_else(|| format!("timestamp field '{}' has no instant in zone", fields[3]))?;
    // Local wall-clock times around a DST fold can map an hour off.
    let slack = match timezone {
        TimeZoneSpec::Local => 3_600,
        _ => 0,
    };
    if epoch < BASE_INSTANT - slack || epoch >= BASE_INSTANT + 86_400 + slack {
        return Err(format!("timestamp field '{}' outside the day window", fields[3]));
    }

    Ok(())
}
