//! RNS polynomial arithmetic over a [`Ring`].
//!
//! Ported from `fhe_poly.h` / `src/poly.c`.

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;
use rayon::prelude::*;
use subtle::ConstantTimeEq;

use crate::error::Error;
use crate::ntt;
use crate::numtheory::{modadd, modmul, modsub};
use crate::ring::Ring;
use crate::sampling::{sample, Distribution};

/// A polynomial over `R_q`, stored as `n` RNS residues of `d` coefficients
/// each (`n*d` `u64` limbs total), tagged with whether it is currently held
/// in coefficient or NTT (evaluation) form.
#[derive(Clone)]
pub struct Poly {
    pub(crate) ring: Arc<Ring>,
    pub(crate) b: Vec<u64>,
    pub(crate) is_ntt: bool,
}

impl Poly {
    /// The zero polynomial.
    #[must_use]
    pub fn zero(ring: &Arc<Ring>) -> Poly {
        Poly {
            ring: ring.clone(),
            b: vec![0u64; ring.n * ring.d],
            is_ntt: false,
        }
    }

    /// Sample a random polynomial from `dist`. One small coefficient is
    /// drawn per column `j` and broadcast (reduced mod each `m_i`) across
    /// every residue row, not `n` independent samples per row.
    #[must_use]
    pub fn rand(ring: &Arc<Ring>, dist: Distribution) -> Poly {
        let d = ring.d;
        let n = ring.n;
        let mut p = Poly::zero(ring);

        let samples: Vec<i64> = (0..d).into_par_iter().map(|_| sample(dist)).collect();

        p.b.par_chunks_mut(d).enumerate().for_each(|(i, row)| {
            let mi = ring.m[i] as i64;
            for (j, slot) in row.iter_mut().enumerate() {
                let s = samples[j];
                let r = ((s % mi) + mi) % mi;
                *slot = r as u64;
            }
        });

        p
    }

    /// Encode plain coefficients `x` (length `d`) into RNS form and
    /// transform to NTT representation.
    #[must_use]
    pub fn encode(ring: &Arc<Ring>, x: &[u64]) -> Poly {
        debug_assert_eq!(x.len(), ring.d);
        let d = ring.d;
        let mut p = Poly::zero(ring);

        p.b.par_chunks_mut(d).enumerate().for_each(|(i, row)| {
            let mi = ring.m[i];
            for (j, slot) in row.iter_mut().enumerate() {
                *slot = x[j] % mi;
            }
        });

        p.ntt();
        p
    }

    /// Reconstruct plaintext coefficients mod `t` via CRT.
    ///
    /// Requires `self` already be in coefficient form (`is_ntt == false`);
    /// callers must call `intt()` first. Unlike `encode`, this does not
    /// auto-transform.
    #[must_use]
    pub fn decode(&self, t: u64) -> Vec<u64> {
        debug_assert!(!self.is_ntt, "decode requires coefficient form; call intt() first");
        let r = &self.ring;
        let d = r.d;

        (0..d)
            .into_par_iter()
            .map(|col| {
                let mut x = BigUint::zero();
                for j in 0..r.n {
                    let v = self.b[j * d + col];
                    let term = &r.ms[j] * r.invms[j] * v;
                    x += term;
                }
                x %= &r.big_m;
                if x > r.m_half {
                    // centered representative: x - M, computed in two's
                    // complement-free BigUint arithmetic by reducing
                    // (x - M) mod t instead of materializing a negative.
                    let diff = &r.big_m - &x;
                    let rem = &diff % t;
                    if rem.is_zero() {
                        0u64
                    } else {
                        t - u64::try_from(rem).unwrap()
                    }
                } else {
                    u64::try_from(&x % t).unwrap()
                }
            })
            .collect()
    }

    /// Transform to NTT (evaluation) form. No-op if already transformed.
    pub fn ntt(&mut self) {
        if self.is_ntt {
            return;
        }
        let r = &self.ring;
        let d = r.d;
        self.b.par_chunks_mut(d).enumerate().for_each(|(i, row)| {
            let offset = i * d;
            ntt::ntt(&r.roots[offset..offset + d], row, d, r.m[i], r.minv[i]);
        });
        self.is_ntt = true;
    }

    /// Transform back to coefficient form. No-op if already in coefficient
    /// form.
    pub fn intt(&mut self) {
        if !self.is_ntt {
            return;
        }
        let r = &self.ring;
        let d = r.d;
        self.b.par_chunks_mut(d).enumerate().for_each(|(i, row)| {
            let offset = i * d;
            ntt::intt(
                &r.iroots[offset..offset + d],
                row,
                d,
                r.m[i],
                r.minv[i],
                r.dinv[i],
            );
        });
        self.is_ntt = false;
    }

    /// Negate in place.
    pub fn neg(&mut self) {
        let r = &self.ring;
        let d = r.d;
        self.b.par_chunks_mut(d).enumerate().for_each(|(i, row)| {
            let mi = r.m[i];
            for v in row {
                *v = modsub(mi, *v, mi);
            }
        });
    }

    /// Multiply every coefficient by the scalar `c`, reduced mod each
    /// residue's prime via Euclidean remainder.
    #[must_use]
    pub fn cmul(&self, c: i64) -> Poly {
        let r = &self.ring;
        let d = r.d;
        let mut out = Poly::zero(&self.ring);
        out.b.par_chunks_mut(d).enumerate().for_each(|(i, row)| {
            let mi = r.m[i];
            let cm = c.rem_euclid(mi as i64) as u64;
            let src = &self.b[i * d..(i + 1) * d];
            for (o, &s) in row.iter_mut().zip(src.iter()) {
                *o = modmul(s, cm, mi);
            }
        });
        out.is_ntt = self.is_ntt;
        out
    }

    fn binop(a: &Poly, b: &Poly, f: impl Fn(u64, u64, u64) -> u64 + Sync) -> Poly {
        let r = &a.ring;
        let d = r.d;
        let mut out = Poly::zero(&a.ring);
        out.b.par_chunks_mut(d).enumerate().for_each(|(i, row)| {
            let mi = r.m[i];
            let ra = &a.b[i * d..(i + 1) * d];
            let rb = &b.b[i * d..(i + 1) * d];
            for j in 0..d {
                row[j] = f(ra[j], rb[j], mi);
            }
        });
        out.is_ntt = a.is_ntt | b.is_ntt;
        out
    }

    /// `a + b`.
    #[must_use]
    pub fn add(a: &Poly, b: &Poly) -> Poly {
        Poly::binop(a, b, modadd)
    }

    /// `a - b`.
    #[must_use]
    pub fn sub(a: &Poly, b: &Poly) -> Poly {
        Poly::binop(a, b, modsub)
    }

    /// `a * b`, coefficient-wise. Both operands should be in NTT form for
    /// this to represent ring multiplication. The product's `is_ntt` flag
    /// is simply the OR of the operands' flags; it is the caller's
    /// responsibility to NTT both sides first.
    #[must_use]
    pub fn mul(a: &Poly, b: &Poly) -> Poly {
        Poly::binop(a, b, modmul)
    }

    /// Serialize to a fixed-width little-endian byte buffer: `n*d` `u64`s,
    /// no length prefix (the ring must already be known to the reader).
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.b.len() * 8);
        for v in &self.b {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    /// Deserialize a polynomial for the given ring from a byte buffer
    /// produced by [`Poly::to_bytes`]. The resulting polynomial is marked
    /// as being in coefficient form; the wire format carries no `is_ntt`
    /// flag, so the caller must track and agree on that state separately.
    ///
    /// # Errors
    /// Returns [`Error::BufferLength`] if `buf` is not exactly `n*d*8` bytes
    /// for `ring`.
    pub fn from_bytes(ring: &Arc<Ring>, buf: &[u8]) -> Result<Poly, Error> {
        let expected = ring.n * ring.d * 8;
        if buf.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: buf.len(),
            });
        }
        let mut b = Vec::with_capacity(ring.n * ring.d);
        for chunk in buf.chunks_exact(8) {
            b.push(u64::from_le_bytes(chunk.try_into().unwrap()));
        }
        Ok(Poly {
            ring: ring.clone(),
            b,
            is_ntt: false,
        })
    }

    /// Constant-time equality over the coefficient buffer, replacing
    /// `poly_cmp`'s OR-of-XOR accumulator with `subtle`.
    #[must_use]
    pub fn ct_eq(&self, other: &Poly) -> bool {
        self.b.ct_eq(&other.b).into()
    }
}

impl PartialEq for Poly {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other)
    }
}
