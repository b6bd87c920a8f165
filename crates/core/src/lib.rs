//! Validation and frame-wise scoring of temporal label annotations.
//!
//! A submission is a header-less table of `trial_id,start,end,label` rows.
//! Each trial is checked for a gapless, zero-based interval layout, expanded
//! into 1 ms frames and compared against a reference loaded once at startup.
//!
//! ## Key Concepts
//!
//! - **Reference**: immutable ground truth, vocabulary and precomputed frames
//! - **Validator**: ordered, short-circuiting checks over one trial
//! - **Frames**: truncating millisecond quantization of interval sequences
//! - **Evaluator**: single pass/fail/score outcome per submission

pub mod config;
pub mod evaluator;
pub mod frames;
pub mod reference;
pub mod scoring;
pub mod table;
pub mod trials;
pub mod validation;
pub mod vocabulary;

pub use config::{EvalConfig, Namespace};
pub use evaluator::{Evaluation, Evaluator, Outcome, SubmissionError};
pub use frames::{FrameSequence, quantize, to_millis};
pub use reference::Reference;
pub use scoring::{AggregateScore, FrameScore, ScoreError, TrialScore, score_all, score_framewise};
pub use table::{IntervalRecord, parse_table, read_table};
pub use trials::{LoadedTrials, RawInterval, TrialSequence, load_trials};
pub use validation::{Interval, ValidatedTrial, ValidationError, Validator, check_format, validate};
pub use vocabulary::{KnownLabels, LabelId, Vocabulary};

use thiserror::Error;

/// Errors raised while reading inputs or building the reference.
#[derive(Debug, Error)]
pub enum EvalError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Parse error: {0}")]
  Parse(String),

  #[error("TOML parse error: {0}")]
  Toml(#[from] toml::de::Error),

  #[error("Reference error: {0}")]
  Reference(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;
