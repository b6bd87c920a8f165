//! Millisecond frame quantization.
//!
//! Bounds are converted with a truncating cast, not rounding. The contiguity
//! check in validation compares bounds rounded to 3 decimals instead, so two
//! intervals that pass validation can still disagree by one frame at their
//! shared boundary. Both behaviors are kept as-is so that reference and
//! hypothesis frames stay comparable with previously published scores.

use crate::validation::Interval;
use crate::vocabulary::LabelId;

/// Frames per second of annotation time.
pub const FRAMES_PER_SECOND: f64 = 1000.0;

/// One label per millisecond.
pub type FrameSequence = Vec<LabelId>;

/// Convert seconds to whole milliseconds, truncating toward zero.
pub fn to_millis(seconds: f64) -> i64 {
  (seconds * FRAMES_PER_SECOND) as i64
}

/// Expand intervals into frames: each label fills `[to_millis(start), to_millis(end))`.
pub fn quantize(intervals: &[Interval]) -> FrameSequence {
  let capacity = intervals.last().map_or(0, |last| to_millis(last.end).max(0) as usize);
  let mut frames = Vec::with_capacity(capacity);
  for interval in intervals {
    let start = to_millis(interval.start);
    let end = to_millis(interval.end);
    if end > start {
      frames.extend(std::iter::repeat_n(interval.label, (end - start) as usize));
    }
  }
  frames
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::vocabulary::Vocabulary;

  fn interval(start: f64, end: f64, label: LabelId) -> Interval {
    Interval { start, end, label }
  }

  #[test]
  fn test_to_millis_truncates() {
    assert_eq!(to_millis(0.0), 0);
    assert_eq!(to_millis(1.0019), 1001);
    assert_eq!(to_millis(0.0009), 0);
    // 1.001 * 1000 = 1000.9999999999999
    assert_eq!(to_millis(1.001), 1000);
  }

  #[test]
  fn test_quantize_concatenates_in_order() {
    let mut vocabulary = Vocabulary::new();
    let x = vocabulary.intern("x");
    let y = vocabulary.intern("y");

    let frames = quantize(&[interval(0.0, 0.003, x), interval(0.003, 0.005, y)]);
    assert_eq!(frames, vec![x, x, x, y, y]);
  }

  #[test]
  fn test_frame_count_matches_last_end() {
    let mut vocabulary = Vocabulary::new();
    let x = vocabulary.intern("x");
    let y = vocabulary.intern("y");

    let intervals = [interval(0.0, 1.25, x), interval(1.25, 2.5, y), interval(2.5, 7.125, x)];
    let frames = quantize(&intervals);
    assert_eq!(frames.len() as i64, to_millis(7.125));
    assert_eq!(frames.len(), 7125);
  }

  #[test]
  fn test_boundary_truncation_can_drop_a_frame() {
    let mut vocabulary = Vocabulary::new();
    let x = vocabulary.intern("x");
    let y = vocabulary.intern("y");

    // Both bounds round to 1.001, but truncate to 1000 and 1001: frame 1000 is never emitted
    let frames = quantize(&[interval(0.0, 1.001, x), interval(1.0010001, 1.002, y)]);
    assert_eq!(frames.len(), 1001);
    assert_eq!(frames.iter().filter(|&&f| f == x).count(), 1000);
    assert_eq!(frames.iter().filter(|&&f| f == y).count(), 1);
  }

  #[test]
  fn test_empty_intervals() {
    assert!(quantize(&[]).is_empty());
  }
}
