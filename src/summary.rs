//! Post-processing of finished sample sequences: burn-in trimming,
//! interval probabilities, and mean / credible-interval summaries.

use thiserror::Error;

/// Errors raised by the post-processing functions.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("sample sequence is empty")]
    EmptySample,
    #[error("invalid interval: low={low}, high={high}")]
    InvalidInterval { low: f64, high: f64 },
    #[error("burn-in {burn_in} must be smaller than the sample count {len}")]
    BurnInTooLarge { burn_in: usize, len: usize },
}

/// Drops the first `burn_in` samples and returns the remaining suffix,
/// in chain order.
pub fn trim(samples: &[f64], burn_in: usize) -> Result<&[f64], SummaryError> {
    if burn_in >= samples.len() {
        return Err(SummaryError::BurnInTooLarge {
            burn_in,
            len: samples.len(),
        });
    }
    Ok(&samples[burn_in..])
}

/// Fraction of samples falling inside `[low, high]` (both ends
/// inclusive). NaN bounds are rejected as invalid intervals.
pub fn interval_probability(samples: &[f64], low: f64, high: f64) -> Result<f64, SummaryError> {
    if samples.is_empty() {
        return Err(SummaryError::EmptySample);
    }
    if !(low <= high) {
        return Err(SummaryError::InvalidInterval { low, high });
    }
    let hits = samples.iter().filter(|&&x| low <= x && x <= high).count();
    Ok(hits as f64 / samples.len() as f64)
}

/// Posterior summary derived from a trimmed sample sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    /// Central 95% credible interval: the [2.5th, 97.5th] percentiles.
    pub credible_interval: (f64, f64),
}

/// Mean and central 95% credible interval of a sample sequence.
///
/// Percentiles interpolate linearly between order statistics of the
/// sorted samples (the R type-7 definition).
pub fn summary(samples: &[f64]) -> Result<Summary, SummaryError> {
    if samples.is_empty() {
        return Err(SummaryError::EmptySample);
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    Ok(Summary {
        mean,
        credible_interval: (percentile(&sorted, 0.025), percentile(&sorted, 0.975)),
    })
}

/// Type-7 percentile of a sorted slice: h = (n - 1)p, interpolated
/// between the straddling order statistics.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&p));
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
