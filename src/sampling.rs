//! Sampling distributions used to draw secrets, error terms, and randomness.
//!
//! The discrete Gaussian sampler implements Karney's algorithm
//! (<https://arxiv.org/abs/1303.6257>), ported from `src/rand/sample.h`.

use crate::rng::{uniform32, uniform_bit, uniform_real};

const EXP_MINUS_HALF: f64 = 0.606_530_659_712_633;
const MU: f64 = 0.0;
const SIGMA: f64 = 3.19;

/// Which distribution `Poly::rand` should draw coefficients from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    /// Uniform over the full 32-bit range, reduced per residue.
    Uniform,
    /// Ternary `{-1, 0, 1}`, used for secret keys and encryption randomness.
    Ternary,
    /// Discrete Gaussian error, `sigma = 3.19`.
    Error,
}

fn bernoulli() -> bool {
    uniform_real() < EXP_MINUS_HALF
}

/// Geometric count: number of Bernoulli(e^-1/2) successes before a failure.
fn g() -> i64 {
    let mut n = 0i64;
    while bernoulli() {
        n += 1;
    }
    n
}

/// Karney's algorithm 2 (the `S` acceptance subroutine).
fn s_sample() -> i64 {
    loop {
        let k = g();
        if k < 2 {
            return k;
        }
        let mut z = k * (k - 1);
        let mut accepted = false;
        while z > 0 {
            z -= 1;
            if !bernoulli() {
                accepted = true;
                break;
            }
        }
        if !accepted {
            return k;
        }
    }
}

/// Draw a single sample from the discrete Gaussian with `sigma = 3.19`.
pub(crate) fn sample_err() -> i64 {
    loop {
        let k = s_sample();

        let s: i64 = if uniform_bit() { -1 } else { 1 };

        let xn0 = k as f64 * SIGMA + s as f64 * MU;
        let i0 = xn0.ceil();
        let xn0 = (i0 - xn0) / SIGMA;
        let j = (uniform32() % SIGMA.ceil() as u32) as i64;

        let x = xn0 + (j as f64) / SIGMA;
        if x >= 1.0 || (x == 0.0 && s < 0 && k == 0) {
            continue;
        }

        let weight = (-x * ((k << 1) as f64 + x) / 2.0).exp();
        if x == 0.0 || uniform_real() <= weight {
            return s * (i0 as i64 + j);
        }
    }
}

/// Draw a single coefficient from `d`.
pub(crate) fn sample(d: Distribution) -> i64 {
    match d {
        Distribution::Uniform => uniform32() as i64,
        Distribution::Ternary => (uniform32() % 3) as i64 - 1,
        Distribution::Error => sample_err(),
    }
}
