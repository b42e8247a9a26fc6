//! Buffered record output.
//!
//! Uses itoa for integer formatting to avoid allocation in the hot path.

use crate::interval::Interval;
use crate::records::{Record, RecordError};
use std::io::{BufWriter, Write};

/// Buffer size for RecordWriter (256KB default).
const DEFAULT_BUFFER_SIZE: usize = 256 * 1024;

/// Record writer producing the tab-separated text format.
pub struct RecordWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    /// Create a new RecordWriter with the default buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, output)
    }

    /// Create a new RecordWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            written: 0,
        }
    }

    /// Write one interval on a track, followed by newline.
    #[inline]
    pub fn write_interval(&mut self, track: &str, interval: &Interval<i64>) -> Result<(), RecordError> {
        self.writer.write_all(track.as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(interval.start).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(interval.end).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(interval.priority).as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Write a full record.
    #[inline]
    pub fn write_record(&mut self, record: &Record) -> Result<(), RecordError> {
        self.write_interval(&record.track, &record.interval)
    }

    /// Write every interval of one track.
    pub fn write_track(&mut self, track: &str, intervals: &[Interval<i64>]) -> Result<(), RecordError> {
        for interval in intervals {
            self.write_interval(track, interval)?;
        }
        Ok(())
    }

    /// Number of lines written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush the buffer to the underlying writer.
    pub fn flush(&mut self) -> Result<(), RecordError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_interval() {
        let mut out = Vec::new();
        {
            let mut writer = RecordWriter::new(&mut out);
            writer
                .write_interval("chrA", &Interval::new(-5, 23, 4))
                .unwrap();
            writer.write_record(&Record::new("b", Interval::new(1, 2, 0))).unwrap();
            assert_eq!(writer.written(), 2);
            writer.flush().unwrap();
        }

        assert_eq!(String::from_utf8(out).unwrap(), "chrA\t-5\t23\t4\nb\t1\t2\t0\n");
    }

    #[test]
    fn test_write_track() {
        let mut out = Vec::new();
        {
            let mut writer = RecordWriter::with_capacity(16, &mut out);
            writer
                .write_track("t", &[Interval::new(0, 3, 4), Interval::new(3, 6, 2)])
                .unwrap();
            writer.flush().unwrap();
        }

        assert_eq!(String::from_utf8(out).unwrap(), "t\t0\t3\t4\nt\t3\t6\t2\n");
    }
}
