use std::io::{self, Write};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::checks::{CheckOutcome, verify_augmented};
use crate::errors::AugmentError;
use crate::loader::load_lines;
use crate::model::{AugmentOptions, AugmentReport};
use crate::output::write_lines;
use crate::synthetic::{HEADER_SUFFIX, draw_fields};

/// Entry point for augmenting a delimited file with synthetic columns.
#[derive(Debug, Clone)]
pub struct AugmentEngine {
    options: AugmentOptions,
}

impl AugmentEngine {
    pub fn new(options: AugmentOptions) -> Self {
        Self { options }
    }

    /// Run the augmentation, echoing each produced line to stdout.
    pub fn run(&self) -> Result<AugmentReport, AugmentError> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.run_with_echo(&mut lock)
    }

    /// Run the augmentation, echoing each produced line to `echo`.
    ///
    /// Single linear pass: load, append the header suffix, append four
    /// synthetic fields per data row, verify, write. Any failure aborts the
    /// run with no guarantee about partial output state.
    pub fn run_with_echo(&self, echo: &mut dyn Write) -> Result<AugmentReport, AugmentError> {
        self.options.validate()?;

        let run_id = uuid::Uuid::new_v4().to_string();
        let mut lines = load_lines(&self.options.input)?;
        if lines.is_empty() {
            return Err(AugmentError::InvalidInput(format!(
                "input '{}' has no header line",
                self.options.input.display()
            )));
        }
        let originals = if self.options.verify {
            Some(lines.clone())
        } else {
            None
        };

        let seed = self.options.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(hash_seed(seed, "rowsynth.rows"));

        info!(
            run_id = %run_id,
            input = %self.options.input.display(),
            lines = lines.len(),
            seed,
            timezone = %self.options.timezone,
            "augmentation started"
        );

        lines[0].push_str(HEADER_SUFFIX);
        writeln!(echo, "{}", lines[0])?;
        for line in lines.iter_mut().skip(1) {
            let fields = draw_fields(&mut rng, &self.options.timezone)?;
            line.push(',');
            line.push_str(&fields.to_row_suffix());
            writeln!(echo, "{line}")?;
        }

        if let Some(originals) = &originals {
            match verify_augmented(originals, &lines, &self.options.timezone) {
                CheckOutcome::Passed => {}
                CheckOutcome::Failed(reason) => {
                    return Err(AugmentError::Verification(reason));
                }
            }
        }

        let bytes_written = write_lines(&self.options.output, &lines)?;

        let report = AugmentReport {
            run_id,
            rows_augmented: lines.len() as u64 - 1,
            lines_total: lines.len() as u64,
            bytes_written,
            seed,
        };

        info!(
            run_id = %report.run_id,
            output = %self.options.output.display(),
            rows_augmented = report.rows_augmented,
            bytes_written = report.bytes_written,
            "augmentation finished"
        );

        Ok(report)
    }
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
