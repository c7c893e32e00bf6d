//! The psychometric model relating a Weber fraction to trial outcomes.
//!
//! Provides the trial dataset type, the log-prior, log-likelihood and
//! log-posterior functions, and the `LogDensity` trait the sampler
//! consumes. The prior over the Weber fraction is exponential with
//! rate 1; the likelihood treats each trial as a Bernoulli outcome
//! whose success probability comes from a standard-normal CDF of the
//! scaled intensity difference.

use itertools::izip;
use thiserror::Error;

use crate::math::normal_cdf;

/// Errors raised while assembling a trial dataset.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DataError {
    #[error("trial columns have mismatched lengths: correct={correct}, n1={n1}, n2={n2}")]
    LengthMismatch {
        correct: usize,
        n1: usize,
        n2: usize,
    },
    #[error("trial dataset is empty")]
    Empty,
    #[error("trial {index} has invalid intensities n1={n1}, n2={n2} (must be finite and positive)")]
    NonPositiveIntensity { index: usize, n1: f64, n2: f64 },
}

/// A fixed dataset of binary-outcome discrimination trials.
///
/// Stored as three parallel columns: whether the response was correct
/// and the two stimulus intensities. Construction checks the
/// invariants the model relies on (equal column lengths, at least one
/// trial, finite positive intensities), so the density functions can
/// take the data as given. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct TrialData {
    correct: Vec<bool>,
    n1: Vec<f64>,
    n2: Vec<f64>,
}

impl TrialData {
    pub fn new(correct: Vec<bool>, n1: Vec<f64>, n2: Vec<f64>) -> Result<Self, DataError> {
        if correct.len() != n1.len() || n1.len() != n2.len() {
            return Err(DataError::LengthMismatch {
                correct: correct.len(),
                n1: n1.len(),
                n2: n2.len(),
            });
        }
        if correct.is_empty() {
            return Err(DataError::Empty);
        }
        for (index, (&a, &b)) in n1.iter().zip(n2.iter()).enumerate() {
            if !(a.is_finite() && b.is_finite() && a > 0.0 && b > 0.0) {
                return Err(DataError::NonPositiveIntensity { index, n1: a, n2: b });
            }
        }
        Ok(TrialData { correct, n1, n2 })
    }

    /// Builds a dataset from row-oriented records `(correct, n1, n2)`.
    pub fn from_records(records: &[(bool, f64, f64)]) -> Result<Self, DataError> {
        let correct = records.iter().map(|r| r.0).collect();
        let n1 = records.iter().map(|r| r.1).collect();
        let n2 = records.iter().map(|r| r.2).collect();
        Self::new(correct, n1, n2)
    }

    pub fn len(&self) -> usize {
        self.correct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.correct.is_empty()
    }
}

/// Log-density of the exponential(1) prior over the Weber fraction.
///
/// `-w` for `w > 0`, negative infinity otherwise (including NaN).
/// Total over all inputs; boundary handling is a returned value, not
/// a panic.
pub fn log_prior(w: f64) -> f64 {
    if w > 0.0 {
        -w
    } else {
        f64::NEG_INFINITY
    }
}

/// Log-likelihood of the trial outcomes at Weber fraction `w`.
///
/// Per trial the model-implied probability of a correct response is
/// `p = 1 - Φ(-|n1 - n2| / (w * sqrt(n1² + n2²)))`; correct trials
/// contribute `ln(p)` and incorrect trials `ln(1 - p)`. The sum can
/// underflow to negative infinity for extreme `w`; that is a
/// legitimate value meaning "this `w` is very improbable".
///
/// Requires `w > 0`. [`log_posterior`] short-circuits on the prior
/// before calling this, so the scale term is always well defined.
pub fn log_likelihood(trials: &TrialData, w: f64) -> f64 {
    debug_assert!(w > 0.0, "likelihood evaluated at non-positive w: {w}");
    let mut total = 0.0;
    for (&correct, &n1, &n2) in izip!(&trials.correct, &trials.n1, &trials.n2) {
        let scale = w * (n1 * n1 + n2 * n2).sqrt();
        // phi = Φ(-|d| / scale) is in [0, 0.5] and precise via erfc,
        // so ln_1p keeps the correct-trial term accurate as well.
        let phi = normal_cdf(-(n1 - n2).abs() / scale);
        total += if correct { (-phi).ln_1p() } else { phi.ln() };
    }
    total
}

/// Log-posterior at `w`: prior plus likelihood.
///
/// Returns negative infinity without evaluating the likelihood when
/// the prior already vanishes, both for correctness (the likelihood
/// scale term is undefined at `w <= 0`) and to skip the per-trial sum.
pub fn log_posterior(trials: &TrialData, w: f64) -> f64 {
    let prior = log_prior(w);
    if prior == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    prior + log_likelihood(trials, w)
}

/// A scalar unnormalized log-density the sampler can draw from.
///
/// Negative infinity marks states with zero probability mass; the
/// sampler handles those as values, never as errors.
pub trait LogDensity {
    fn logp(&self, w: f64) -> f64;
}

/// The exponential(1) prior as a standalone sampling target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prior;

impl LogDensity for Prior {
    fn logp(&self, w: f64) -> f64 {
        log_prior(w)
    }
}

/// The posterior over the Weber fraction given a trial dataset.
#[derive(Debug, Clone, Copy)]
pub struct Posterior<'a> {
    trials: &'a TrialData,
}

impl<'a> Posterior<'a> {
    pub fn new(trials: &'a TrialData) -> Self {
        Posterior { trials }
    }
}

impl LogDensity for Posterior<'_> {
    fn logp(&self, w: f64) -> f64 {
        log_posterior(self.trials, w)
    }
}
