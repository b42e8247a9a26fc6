//! Generate synthetic prioritized interval datasets for benchmarking.
//!
//! Intervals are spread uniformly over a span on each track, with lengths
//! drawn from a configurable range and priorities from `0..=max_priority`.
//! A fraction of intervals can be written inverted (`start > end`) to
//! exercise normalization. Output is reproducible for a given seed.

use crate::interval::{Interval, Priority};
use crate::output::RecordWriter;
use crate::records::{Record, RecordError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Configuration for synthetic data generation.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Total number of intervals
    pub count: u64,
    /// Number of tracks intervals are spread over
    pub tracks: u32,
    /// Coordinates fall in `0..span`
    pub span: i64,
    /// Minimum interval length
    pub len_min: i64,
    /// Maximum interval length
    pub len_max: i64,
    /// Largest priority assigned
    pub max_priority: Priority,
    /// Fraction of intervals written with start and end swapped
    pub inverted_fraction: f64,
    /// Random seed
    pub seed: u64,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            tracks: 1,
            span: 1_000_000,
            len_min: 50,
            len_max: 1000,
            max_priority: 7,
            inverted_fraction: 0.0,
            seed: 42,
        }
    }
}

impl GenerateConfig {
    /// Check the configuration for impossible values.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.tracks == 0 {
            return Err(RecordError::InvalidFormat(
                "At least one track is required".to_string(),
            ));
        }
        if self.span <= 0 {
            return Err(RecordError::InvalidFormat(format!(
                "Span must be positive, got {}",
                self.span
            )));
        }
        if self.len_min < 0 || self.len_min > self.len_max {
            return Err(RecordError::InvalidFormat(format!(
                "Invalid length range {}..={}",
                self.len_min, self.len_max
            )));
        }
        if !(0.0..=1.0).contains(&self.inverted_fraction) {
            return Err(RecordError::InvalidFormat(format!(
                "Inverted fraction must be within 0..=1, got {}",
                self.inverted_fraction
            )));
        }
        Ok(())
    }
}

/// Synthetic data generator.
#[derive(Debug, Clone)]
pub struct GenerateCommand {
    config: GenerateConfig,
}

impl GenerateCommand {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    fn track_name(index: u32) -> String {
        format!("t{}", index + 1)
    }

    fn next_record(&self, rng: &mut SmallRng) -> Record {
        let cfg = &self.config;
        let track = rng.gen_range(0..cfg.tracks);
        let len = rng.gen_range(cfg.len_min..=cfg.len_max);
        let start = rng.gen_range(0..cfg.span);
        let end = start.saturating_add(len);
        let priority = rng.gen_range(0..=cfg.max_priority);

        let interval = if rng.gen_bool(cfg.inverted_fraction) {
            Interval::new(end, start, priority)
        } else {
            Interval::new(start, end, priority)
        };

        Record::new(Self::track_name(track), interval)
    }

    /// Generate all records in memory.
    pub fn generate(&self) -> Result<Vec<Record>, RecordError> {
        self.config.validate()?;
        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        Ok((0..self.config.count)
            .map(|_| self.next_record(&mut rng))
            .collect())
    }

    /// Write generated records to a file.
    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<GenerateStats, RecordError> {
        let file = File::create(path.as_ref())?;
        self.run_writer(file)
    }

    /// Stream generated records to a writer.
    pub fn run_writer<W: Write>(&self, output: W) -> Result<GenerateStats, RecordError> {
        self.config.validate()?;
        let started = Instant::now();
        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let mut writer = RecordWriter::new(output);
        let mut inverted = 0u64;

        for _ in 0..self.config.count {
            let record = self.next_record(&mut rng);
            if record.interval.is_inverted() {
                inverted += 1;
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;

        Ok(GenerateStats {
            written: self.config.count,
            inverted,
            seed: self.config.seed,
            elapsed_ms: started.elapsed().as_millis(),
        })
    }
}

/// Statistics from a generation run.
#[derive(Debug, Clone)]
pub struct GenerateStats {
    pub written: u64,
    pub inverted: u64,
    pub seed: u64,
    pub elapsed_ms: u128,
}

impl fmt::Display for GenerateStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Written: {}, Inverted: {}, Seed: {}, Time: {}ms",
            self.written, self.inverted, self.seed, self.elapsed_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::parse_records;

    fn small_config() -> GenerateConfig {
        GenerateConfig {
            count: 200,
            tracks: 3,
            span: 1000,
            len_min: 0,
            len_max: 40,
            max_priority: 5,
            inverted_fraction: 0.25,
            seed: 7,
        }
    }

    #[test]
    fn test_generate_deterministic() {
        let a = GenerateCommand::new(small_config()).generate().unwrap();
        let b = GenerateCommand::new(small_config()).generate().unwrap();
        let c = GenerateCommand::new(small_config())
            .with_seed(8)
            .generate()
            .unwrap();

        assert_eq!(a.len(), 200);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_bounds() {
        let records = GenerateCommand::new(small_config()).generate().unwrap();

        for r in &records {
            let iv = r.interval.normalized();
            assert!(iv.start >= 0 && iv.start < 1000);
            assert!(iv.end - iv.start <= 40);
            assert!(iv.priority <= 5);
            assert!(["t1", "t2", "t3"].contains(&r.track()));
        }
        assert!(records.iter().any(|r| r.interval.is_inverted()));
    }

    #[test]
    fn test_run_writer_matches_generate() {
        let cmd = GenerateCommand::new(small_config());
        let mut out = Vec::new();
        let stats = cmd.run_writer(&mut out).unwrap();

        let parsed = parse_records(&String::from_utf8(out).unwrap()).unwrap();
        let expected: Vec<Record> = cmd
            .generate()
            .unwrap()
            .into_iter()
            .map(|r| Record::new(r.track, r.interval.normalized()))
            .collect();

        assert_eq!(stats.written, 200);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_invalid_config() {
        let mut cfg = small_config();
        cfg.tracks = 0;
        assert!(GenerateCommand::new(cfg).generate().is_err());

        let mut cfg = small_config();
        cfg.len_min = 50;
        assert!(cfg.validate().is_err());

        let mut cfg = small_config();
        cfg.inverted_fraction = 1.5;
        assert!(cfg.validate().is_err());
    }
}
