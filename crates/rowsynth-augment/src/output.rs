use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::AugmentError;

/// Write the augmented lines to the destination file.
///
/// Every line, the last included, is terminated with CRLF regardless of
/// platform. Returns the number of bytes written.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<u64, AugmentError> {
    let mut writer = CountingWriter::new(BufWriter::new(File::create(path)?));
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\r\n")?;
    }
    writer.flush()?;
    Ok(writer.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
