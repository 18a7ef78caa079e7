//! Run observation: progress callbacks and per-step telemetry samples.
//!
//! Neither is consumed by the algorithms; they exist so callers can report
//! and chart a run.

use std::time::Duration;

/// Progress callback receiving `(current, total, message)`.
pub type Progress<'a> = &'a dyn Fn(usize, usize, &str);

/// One telemetry point, recorded after a generation or iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetrySample {
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
    /// Generation or iteration number, starting at 1.
    pub step: usize,
    /// Best score found so far.
    pub best: f64,
    /// Mean score over the population (or the swarm's personal bests).
    pub mean: f64,
}

/// Mean of a set of scores, 0 for an empty set.
pub(crate) fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean([2.0, 4.0, 9.0].into_iter()), 5.0);
        assert_eq!(mean(std::iter::empty::<f64>()), 0.0);
    }

    #[test]
    fn test_progress_callback_collects() {
        let seen = std::cell::RefCell::new(Vec::new());
        let record = |current: usize, total: usize, message: &str| {
            seen.borrow_mut().push((current, total, message.to_owned()));
        };
        let progress: Progress<'_> = &record;
        progress(1, 3, "step");
        assert_eq!(seen.borrow().as_slice(), &[(1, 3, "step".to_owned())]);
    }
}
