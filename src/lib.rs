//! Bayesian estimation of a perceptual Weber fraction from binary
//! choice data.
//!
//! The model: each discrimination trial presents two intensities `n1`
//! and `n2`, and the probability of a correct response is
//! `1 - Φ(-|n1 - n2| / (w * sqrt(n1² + n2²)))`, where `w` is the Weber
//! fraction. The prior over `w` is exponential with rate 1. Posterior
//! draws come from a random-walk Metropolis chain that only needs
//! log-density evaluations, so the same chain also samples the prior
//! alone.
//!
//! ```
//! use weber_mh::{run_sampler, summary, MetropolisSettings, TargetDensity, TrialData};
//!
//! # fn main() -> anyhow::Result<()> {
//! let trials = TrialData::from_records(&[
//!     (true, 8.0, 16.0),
//!     (true, 12.0, 6.0),
//!     (false, 9.0, 10.0),
//! ])?;
//! let settings = MetropolisSettings {
//!     num_draws: 2_000,
//!     burn_in: 500,
//!     seed: 42,
//!     ..Default::default()
//! };
//! let draws = run_sampler(&trials, TargetDensity::Posterior, &settings)?;
//! assert_eq!(draws.len(), 1_500);
//! let stats = summary(&draws)?;
//! assert!(stats.mean > 0.0);
//! # Ok(())
//! # }
//! ```

pub(crate) mod math;
pub(crate) mod model;
pub(crate) mod sampler;
pub(crate) mod summary;

pub use model::{
    log_likelihood, log_posterior, log_prior, DataError, LogDensity, Posterior, Prior, TrialData,
};
pub use sampler::{
    run_sampler, sample_chains, MetropolisChain, MetropolisSettings, SamplerError, TargetDensity,
};
pub use summary::{interval_probability, summary, trim, Summary, SummaryError};
