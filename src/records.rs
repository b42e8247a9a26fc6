//! Streaming reader for tracked interval records.
//!
//! Text format, one record per line, tab-separated:
//!
//! ```text
//! track   start   end   priority
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Inverted
//! coordinates (`start > end`) are swapped, not rejected.

use crate::interval::{checked_priority, Interval, IntervalError};
use memchr::memchr_iter;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading or writing records.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid interval at line {line}: {source}")]
    Interval {
        line: usize,
        #[source]
        source: IntervalError,
    },

    #[error("Invalid input: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, RecordError>;

/// An interval on a named track. Records on different tracks never interact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub track: String,
    pub interval: Interval<i64>,
}

impl Record {
    pub fn new(track: impl Into<String>, interval: Interval<i64>) -> Self {
        Self {
            track: track.into(),
            interval,
        }
    }

    #[inline]
    pub fn track(&self) -> &str {
        &self.track
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.interval.start
    }

    #[inline]
    pub fn end(&self) -> i64 {
        self.interval.end
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.track, self.interval.start, self.interval.end, self.interval.priority
        )
    }
}

/// A streaming record reader.
pub struct RecordReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: Vec<u8>,
}

impl RecordReader<File> {
    /// Open a record file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> RecordReader<R> {
    /// Create a new reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, 256 * 1024)
    }

    /// Create a reader with custom buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buffer: Vec::with_capacity(256),
        }
    }

    /// Line number of the most recently read line (1-based).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next record.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim_ascii();
            if line.is_empty() || line[0] == b'#' {
                continue;
            }

            return parse_line(line, self.line_number).map(Some);
        }
    }

    /// Get an iterator over all records.
    pub fn records(self) -> RecordIter<R> {
        RecordIter { reader: self }
    }
}

/// Split a line into its first four tab-separated fields.
#[inline]
fn split_fields(line: &[u8]) -> ([&[u8]; 4], usize) {
    let mut fields: [&[u8]; 4] = [&[]; 4];
    let mut n = 0;
    let mut from = 0;

    for tab in memchr_iter(b'\t', line) {
        if n == 4 {
            break;
        }
        fields[n] = &line[from..tab];
        n += 1;
        from = tab + 1;
    }
    if n < 4 {
        fields[n] = &line[from..];
        n += 1;
    }

    (fields, n)
}

fn parse_number(field: &[u8], name: &str, line: usize) -> Result<i64> {
    std::str::from_utf8(field)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| RecordError::Parse {
            line,
            message: format!("Invalid {} value: '{}'", name, String::from_utf8_lossy(field)),
        })
}

/// Parse a single record line.
fn parse_line(line: &[u8], line_number: usize) -> Result<Record> {
    let (fields, n) = split_fields(line);

    if n < 4 {
        return Err(RecordError::Parse {
            line: line_number,
            message: format!("Expected at least 4 fields, got {}", n),
        });
    }

    let track = std::str::from_utf8(fields[0]).map_err(|_| RecordError::Parse {
        line: line_number,
        message: "Track name is not valid UTF-8".to_string(),
    })?;
    if track.is_empty() {
        return Err(RecordError::Parse {
            line: line_number,
            message: "Empty track name".to_string(),
        });
    }

    let start = parse_number(fields[1], "start", line_number)?;
    let end = parse_number(fields[2], "end", line_number)?;
    let priority = parse_number(fields[3], "priority", line_number)?;

    let interval =
        Interval::try_new(start, end, priority).map_err(|source| RecordError::Interval {
            line: line_number,
            source,
        })?;

    Ok(Record::new(track, interval.normalized()))
}

/// Iterator over records.
pub struct RecordIter<R: Read> {
    reader: RecordReader<R>,
}

impl<R: Read> Iterator for RecordIter<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

/// Read all records from a file.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let reader = RecordReader::from_path(path)?;
    reader.records().collect()
}

/// Parse records from a string (useful for testing).
pub fn parse_records(content: &str) -> Result<Vec<Record>> {
    let reader = RecordReader::new(content.as_bytes());
    reader.records().collect()
}

/// Write records to a writer.
pub fn write_records<W: io::Write>(writer: &mut W, records: &[Record]) -> io::Result<()> {
    for record in records {
        writeln!(writer, "{}", record)?;
    }
    Ok(())
}
