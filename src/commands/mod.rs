//! Command implementations for prioseq.

pub mod generate;
pub mod merge;
pub mod verify;

pub use generate::{GenerateCommand, GenerateConfig, GenerateStats};
pub use merge::{MergeCommand, MergeStats};
pub use verify::{validate_sequence, SequenceValidator, SequenceViolation, VerifyCommand, VerifyReport};
