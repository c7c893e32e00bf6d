//! Random-walk Metropolis sampling over a scalar parameter.
//!
//! The chain is generic over the target [`LogDensity`], so the same
//! engine draws from the posterior and, for prior-predictive checks,
//! from the prior alone. Each chain owns its RNG; runs are
//! deterministic for a fixed seed and chains get independent
//! `ChaCha8` streams, so parallel results do not depend on
//! scheduling.

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use thiserror::Error;

use crate::model::{LogDensity, Posterior, Prior, TrialData};
use crate::summary::trim;

/// Errors raised when configuring or starting a chain.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("proposal scale must be positive and finite, got {0}")]
    NonPositiveProposalScale(f64),
    #[error("a chain must record at least one draw")]
    ZeroDraws,
    #[error("burn-in {burn_in} must be smaller than the number of draws {num_draws}")]
    BurnInTooLarge { burn_in: u64, num_draws: u64 },
    #[error("initial state must not be NaN")]
    NanInitialState,
}

/// Settings for a random-walk Metropolis run.
#[derive(Debug, Clone, Copy)]
pub struct MetropolisSettings {
    /// The number of recorded draws per chain.
    pub num_draws: u64,
    /// How many leading draws [`run_sampler`] discards.
    pub burn_in: u64,
    /// Standard deviation of the Gaussian random-walk proposal.
    pub proposal_scale: f64,
    /// Starting position of the chain.
    pub initial_state: f64,
    pub seed: u64,
    /// Number of independent chains for [`sample_chains`].
    pub num_chains: usize,
}

impl Default for MetropolisSettings {
    fn default() -> Self {
        Self {
            num_draws: 10_000,
            burn_in: 1_000,
            proposal_scale: 0.1,
            initial_state: 0.6,
            seed: 0,
            num_chains: 4,
        }
    }
}

/// Which log-density a sampling run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetDensity {
    /// The posterior over the Weber fraction given the trial data.
    #[default]
    Posterior,
    /// The exponential(1) prior alone.
    Prior,
}

/// A single random-walk Metropolis chain over a scalar state.
///
/// The only state carried across draws is the current position and
/// its cached log-density; everything else is a pure function of the
/// inputs plus the RNG.
pub struct MetropolisChain<D, R>
where
    D: LogDensity,
    R: Rng,
{
    density: D,
    rng: R,
    proposal: Normal<f64>,
    state: f64,
    state_logp: f64,
    draw_count: u64,
    accept_count: u64,
}

impl<D, R> MetropolisChain<D, R>
where
    D: LogDensity,
    R: Rng,
{
    pub fn new(
        density: D,
        initial_state: f64,
        proposal_scale: f64,
        rng: R,
    ) -> Result<Self, SamplerError> {
        if !proposal_scale.is_finite() || proposal_scale <= 0.0 {
            return Err(SamplerError::NonPositiveProposalScale(proposal_scale));
        }
        if initial_state.is_nan() {
            return Err(SamplerError::NanInitialState);
        }
        let proposal = Normal::new(0.0, proposal_scale)
            .map_err(|_| SamplerError::NonPositiveProposalScale(proposal_scale))?;
        let state_logp = density.logp(initial_state);
        debug_assert!(
            !state_logp.is_nan(),
            "log-density is NaN at initial state {initial_state}"
        );
        Ok(MetropolisChain {
            density,
            rng,
            proposal,
            state: initial_state,
            state_logp,
            draw_count: 0,
            accept_count: 0,
        })
    }

    /// Advances the chain by one step and returns the recorded state.
    ///
    /// Every call records exactly one sample, whether the proposal was
    /// accepted or the current state retained.
    pub fn draw(&mut self) -> f64 {
        debug_assert!(
            !self.state_logp.is_nan(),
            "log-density is NaN at occupied state {}",
            self.state
        );
        let proposed = self.state + self.proposal.sample(&mut self.rng);
        let proposed_logp = self.density.logp(proposed);
        // -inf against -inf favors neither state; pin the ratio at 0
        // so no NaN leaks out of the subtraction.
        let delta = if proposed_logp == f64::NEG_INFINITY && self.state_logp == f64::NEG_INFINITY {
            0.0
        } else {
            proposed_logp - self.state_logp
        };
        if delta >= 0.0 || self.rng.random::<f64>() < delta.exp() {
            self.state = proposed;
            self.state_logp = proposed_logp;
            self.accept_count += 1;
        }
        self.draw_count += 1;
        self.state
    }

    /// Fraction of proposals accepted so far, NaN before the first draw.
    pub fn acceptance_rate(&self) -> f64 {
        if self.draw_count == 0 {
            return f64::NAN;
        }
        self.accept_count as f64 / self.draw_count as f64
    }

    /// Runs the chain for `num_draws` steps, recording one sample per
    /// step. The returned sequence has length exactly `num_draws`.
    pub fn run(&mut self, num_draws: u64) -> Result<Vec<f64>, SamplerError> {
        if num_draws == 0 {
            return Err(SamplerError::ZeroDraws);
        }
        let mut samples = Vec::with_capacity(num_draws as usize);
        for _ in 0..num_draws {
            samples.push(self.draw());
        }
        Ok(samples)
    }
}

fn chain_rng(seed: u64, chain_id: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(chain_id);
    rng
}

fn run_one(
    trials: &TrialData,
    target: TargetDensity,
    settings: &MetropolisSettings,
    chain_id: u64,
) -> Result<Vec<f64>> {
    if settings.burn_in >= settings.num_draws {
        return Err(SamplerError::BurnInTooLarge {
            burn_in: settings.burn_in,
            num_draws: settings.num_draws,
        }
        .into());
    }
    let rng = chain_rng(settings.seed, chain_id);
    let samples = match target {
        TargetDensity::Posterior => MetropolisChain::new(
            Posterior::new(trials),
            settings.initial_state,
            settings.proposal_scale,
            rng,
        )?
        .run(settings.num_draws)?,
        TargetDensity::Prior => MetropolisChain::new(
            Prior,
            settings.initial_state,
            settings.proposal_scale,
            rng,
        )?
        .run(settings.num_draws)?,
    };
    let trimmed = trim(&samples, settings.burn_in as usize)?;
    Ok(trimmed.to_vec())
}

/// Runs a single chain against `target` and returns the draws after
/// burn-in, `num_draws - burn_in` samples in chain order.
pub fn run_sampler(
    trials: &TrialData,
    target: TargetDensity,
    settings: &MetropolisSettings,
) -> Result<Vec<f64>> {
    run_one(trials, target, settings, 0).context("sampling failed")
}

/// Runs `settings.num_chains` independent chains in parallel and
/// returns each chain's post-burn-in draws.
///
/// Chains share only the immutable trial data; chain `i` uses RNG
/// stream `i` of `settings.seed`, so chain 0 reproduces
/// [`run_sampler`] exactly.
pub fn sample_chains(
    trials: &TrialData,
    target: TargetDensity,
    settings: &MetropolisSettings,
) -> Result<Vec<Vec<f64>>> {
    (0..settings.num_chains as u64)
        .into_par_iter()
        .map(|chain_id| {
            run_one(trials, target, settings, chain_id)
                .with_context(|| format!("chain {chain_id} failed"))
        })
        .collect()
}
