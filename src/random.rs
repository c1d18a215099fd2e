//! Random sources consumed by the policies.
//!
//! Policies never touch a global RNG. Each one owns a [`RandomSource`], so a seeded
//! source gives fully reproducible runs and a [`ScriptedSource`] can pin individual
//! draws in tests.
//!
//! Thompson sampling draws through the inverse CDF: a uniform `u` is mapped through
//! the Beta quantile function, so replaying the uniforms replays the samples.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::{Beta, ContinuousCDF};

use crate::error::{BanditError, Result};

/// Inverse CDF of `Beta(alpha, beta)` at `p`.
///
/// `p` is clamped into `[0, 1]`. Parameters must be finite and strictly positive.
pub fn beta_inverse_cdf(alpha: f64, beta: f64, p: f64) -> Result<f64> {
    let invalid = || BanditError::InvalidPosterior {
        arm: String::new(),
        alpha,
        beta,
    };
    if !(alpha.is_finite() && beta.is_finite()) || alpha <= 0.0 || beta <= 0.0 {
        return Err(invalid());
    }
    let dist = Beta::new(alpha, beta).map_err(|_| invalid())?;
    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    Ok(dist.inverse_cdf(p))
}

/// Source of randomness for selection.
pub trait RandomSource {
    /// A uniform draw in `[0, 1)`.
    fn uniform01(&mut self) -> f64;

    /// A uniform index in `[0, n)`. Returns `0` when `n == 0`.
    fn pick_index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let i = (self.uniform01() * n as f64) as usize;
        i.min(n - 1)
    }

    /// Quantile of `Beta(alpha, beta)` at `p`.
    ///
    /// On invalid parameters the returned `InvalidPosterior` carries an empty arm
    /// name; policies fill it in.
    fn beta_quantile(&mut self, alpha: f64, beta: f64, p: f64) -> Result<f64> {
        beta_inverse_cdf(alpha, beta, p)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform01(&mut self) -> f64 {
        (**self).uniform01()
    }
    fn pick_index(&mut self, n: usize) -> usize {
        (**self).pick_index(n)
    }
    fn beta_quantile(&mut self, alpha: f64, beta: f64, p: f64) -> Result<f64> {
        (**self).beta_quantile(alpha, beta, p)
    }
}

/// Seedable source backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededSource {
    /// Seed `0`: deterministic unless asked otherwise.
    fn default() -> Self {
        Self::new(0)
    }
}

impl RandomSource for SeededSource {
    fn uniform01(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn pick_index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.random_range(0..n)
    }
}

/// Replays scripted draws.
///
/// - Uniform draws cycle through the script (an empty script yields `0.0`).
/// - Index draws pop from their own queue; once empty they fall back to the
///   uniform script.
/// - With [`ScriptedSource::with_fixed_quantile`] every Beta quantile returns the same
///   value regardless of parameters.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    uniforms: Vec<f64>,
    cursor: usize,
    indices: VecDeque<usize>,
    fixed_quantile: Option<f64>,
    draws: u64,
}

impl ScriptedSource {
    pub fn new(uniforms: impl Into<Vec<f64>>) -> Self {
        Self {
            uniforms: uniforms.into(),
            ..Self::default()
        }
    }

    /// Queue explicit results for [`RandomSource::pick_index`] (reduced modulo `n`).
    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    pub fn with_fixed_quantile(mut self, q: f64) -> Self {
        self.fixed_quantile = Some(q);
        self
    }

    /// Number of uniform draws consumed so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for ScriptedSource {
    fn uniform01(&mut self) -> f64 {
        self.draws += 1;
        if self.uniforms.is_empty() {
            return 0.0;
        }
        let u = self.uniforms[self.cursor % self.uniforms.len()];
        self.cursor += 1;
        u
    }

    fn pick_index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        match self.indices.pop_front() {
            Some(i) => i % n,
            None => {
                let i = (self.uniform01() * n as f64) as usize;
                i.min(n - 1)
            }
        }
    }

    fn beta_quantile(&mut self, alpha: f64, beta: f64, p: f64) -> Result<f64> {
        match self.fixed_quantile {
            Some(q) => Ok(q),
            None => beta_inverse_cdf(alpha, beta, p),
        }
    }
}
