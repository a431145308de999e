//! The polynomial ring `R_q = Z_q[X]/(X^d+1)`, with `q` held in RNS form.
//!
//! Ported from `fhe_ring.h` / `src/ring.c`.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rayon::prelude::*;

use crate::error::Error;
use crate::numtheory::{find_proot, gen_primes, inv, modexp, modinv, modmul};

const M32: u64 = 1u64 << 32;

/// A cyclotomic ring and the per-residue Montgomery/NTT constants needed to
/// do arithmetic in it.
///
/// Polynomials over this ring are represented in RNS form: `n` residues
/// mod `m[0..n]`, each carrying `d` coefficients, for a total of `n*d`
/// limbs.
pub struct Ring {
    pub(crate) lgd: u32,
    pub(crate) d: usize,
    pub(crate) n: usize,
    pub(crate) m: Vec<u64>,
    pub(crate) minv: Vec<u64>,
    pub(crate) dinv: Vec<u64>,
    pub(crate) roots: Vec<u64>,
    pub(crate) iroots: Vec<u64>,
    pub(crate) big_m: BigUint,
    pub(crate) m_half: BigUint,
    pub(crate) ms: Vec<BigUint>,
    pub(crate) invms: Vec<u64>,
}

impl Ring {
    /// Construct a ring of degree `2^lgd` whose modulus `q` is the product
    /// of `(lgq/lgm)+1` primes each roughly `lgm` bits wide, each of the
    /// form `k*2^(lgd+1)+1` so that a `2^(lgd+1)`-th root of unity exists.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRingParams`] if `lgd` or `lgm` is zero, or if
    /// `lgm` leaves no room for a prime of the required form.
    pub fn new(lgd: u32, lgq: u32, lgm: u32) -> Result<Self, Error> {
        if lgd == 0 || lgm == 0 {
            return Err(Error::InvalidRingParams("lgd and lgm must be nonzero"));
        }
        if lgm as u64 >= 63 {
            return Err(Error::InvalidRingParams("lgm must leave room for k*2^(lgd+1)+1"));
        }

        let d = 1usize << lgd;
        let n = (lgq / lgm) as usize + 1;

        let m = gen_primes(lgm as u64, (lgd + 1) as u64, n);

        let mut minv = vec![0u64; n];
        let mut dinv = vec![0u64; n];
        let mut roots = vec![0u64; n * d];
        let mut iroots = vec![0u64; n * d];

        let per_residue: Vec<(u64, u64, Vec<u64>, Vec<u64>)> = m
            .par_iter()
            .map(|&mi| {
                let root = find_proot(mi, (lgd + 1) as u64);
                let iroot = modinv(root, mi);
                debug_assert_eq!(modexp(root, (d as u64) << 1, mi), 1);
                debug_assert_eq!(modexp(iroot, (d as u64) << 1, mi), 1);

                let minv_i = inv(mi);
                let mut dinv_i = modinv(d as u64, mi);
                dinv_i = modmul(dinv_i, M32, mi);
                dinv_i = modmul(dinv_i, M32, mi);

                let mut roots_i = vec![0u64; d];
                let mut iroots_i = vec![0u64; d];
                let mut power = 1u64;
                let mut ipower = 1u64;
                for j in 0..d {
                    let index = bitreverse(j as u32) >> (32 - lgd);
                    let mut r = modmul(power, M32, mi);
                    r = modmul(r, M32, mi);
                    let mut ir = modmul(ipower, M32, mi);
                    ir = modmul(ir, M32, mi);
                    roots_i[index as usize] = r;
                    iroots_i[index as usize] = ir;
                    power = modmul(power, root, mi);
                    ipower = modmul(ipower, iroot, mi);
                }

                (minv_i, dinv_i, roots_i, iroots_i)
            })
            .collect();

        for (i, (minv_i, dinv_i, roots_i, iroots_i)) in per_residue.into_iter().enumerate() {
            minv[i] = minv_i;
            dinv[i] = dinv_i;
            roots[i * d..(i + 1) * d].copy_from_slice(&roots_i);
            iroots[i * d..(i + 1) * d].copy_from_slice(&iroots_i);
        }

        let mut big_m = BigUint::from(m[0]);
        for &mi in &m[1..] {
            big_m *= mi;
        }

        let m_half = (&big_m + BigUint::one()) / BigUint::from(2u8);

        let mut ms = Vec::with_capacity(n);
        let mut invms = vec![0u64; n];
        for i in 0..n {
            let mi = m[i];
            let msi = &big_m / mi;
            let msi_mod = u64::try_from(&msi % mi).unwrap();
            invms[i] = modinv(msi_mod, mi);
            ms.push(msi);
        }

        Ok(Ring {
            lgd,
            d,
            n,
            m,
            minv,
            dinv,
            roots,
            iroots,
            big_m,
            m_half,
            ms,
            invms,
        })
    }

    /// Degree of the ring, `d = 2^lgd`.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.d
    }

    /// Number of RNS residues.
    #[must_use]
    pub fn residues(&self) -> usize {
        self.n
    }
}

fn bitreverse(mut x: u32) -> u32 {
    x = ((x & 0xaaaa_aaaa) >> 1) | ((x & 0x5555_5555) << 1);
    x = ((x & 0xcccc_cccc) >> 2) | ((x & 0x3333_3333) << 2);
    x = ((x & 0xf0f0_f0f0) >> 4) | ((x & 0x0f0f_0f0f) << 4);
    x = ((x & 0xff00_ff00) >> 8) | ((x & 0x00ff_00ff) << 8);
    (x >> 16) | (x << 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_construction_produces_n_primes_of_the_right_shape() {
        let r = Ring::new(4, 40, 20).unwrap();
        assert_eq!(r.d, 16);
        assert_eq!(r.n, 3);
        assert_eq!(r.m.len(), 3);
        for &mi in &r.m {
            assert!(mi >= 1u64 << 20);
        }
        assert!(!r.m_half.is_zero());
    }
}
