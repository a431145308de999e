//! The Brakerski-Gentry-Vaikuntanathan scheme.
//!
//! Ported from `fhe_bgv.h` / `src/bgv.c`.

use std::sync::Arc;

use zeroize::Zeroize;

use crate::error::Error;
use crate::poly::Poly;
use crate::ring::Ring;
use crate::sampling::Distribution;

/// A public/evaluation key pair: `(a, b)` such that `b = e - a*s` (public
/// key) or `b = e - a*s + s^2` (evaluation key).
#[derive(Clone)]
pub struct KeyPair {
    /// The pseudorandom (or derived) half of the pair.
    pub a: Poly,
    /// `e - a*s` (plus `s^2` for an evaluation key).
    pub b: Poly,
}

/// A full BGV key: the secret key `s`, the public encryption key pair, and
/// the evaluation (key-switching) key pair used during relinearization.
pub struct Key {
    /// The secret key, ternary-sampled. Zeroized on drop.
    pub s: Poly,
    /// The public encryption key.
    pub pub_: KeyPair,
    /// The evaluation (key-switching) key used to relinearize after a
    /// homomorphic multiplication.
    pub eval: KeyPair,
}

impl Drop for Key {
    fn drop(&mut self) {
        self.s.b.zeroize();
    }
}

/// A BGV ciphertext: `n` polynomials over `R_q`. `n` is 2 for a fresh
/// ciphertext or a just-relinearized one, 3 mid-tensor (before
/// relinearization folds it back down).
pub type Ciphertext = Vec<Poly>;

/// A BGV scheme instance: a ring together with a plaintext modulus `t`.
pub struct Bgv {
    t: u64,
    ring: Arc<Ring>,
}

impl Bgv {
    /// Initialize BGV scheme parameters: a ring of degree `2^lgd`, a
    /// ciphertext modulus of `~lgq` bits built from `~lgm`-bit RNS primes,
    /// and plaintext modulus `t`.
    ///
    /// # Errors
    /// Propagates [`Ring::new`]'s errors for invalid `lgd`/`lgm`.
    pub fn new(lgd: u32, lgq: u32, lgm: u32, t: u64) -> Result<Self, Error> {
        let ring = Ring::new(lgd, lgq, lgm)?;
        Ok(Bgv { t, ring: Arc::new(ring) })
    }

    /// The underlying polynomial ring.
    #[must_use]
    pub fn ring(&self) -> &Arc<Ring> {
        &self.ring
    }

    /// The plaintext modulus.
    #[must_use]
    pub fn plaintext_modulus(&self) -> u64 {
        self.t
    }

    fn fresh_error_scaled(&self) -> Poly {
        let mut e = Poly::rand(&self.ring, Distribution::Error);
        e = e.cmul(self.t as i64);
        e.ntt();
        e
    }

    /// Generate the key-switching (evaluation) key from `s2 = s*s` (already
    /// in NTT form), given the secret key `s` it will key-switch onto.
    fn ksgen(&self, s: &Poly, s2: &Poly) -> KeyPair {
        let e = self.fresh_error_scaled();

        let mut a = Poly::rand(&self.ring, Distribution::Uniform);
        a.ntt();

        let mut b = Poly::mul(&a, s);
        b = Poly::sub(&e, &b);
        b = Poly::add(&b, s2);

        KeyPair { a, b }
    }

    /// Generate a fresh BGV key pair.
    ///
    /// 1. Sample a random secret key `s` from the ternary distribution.
    /// 2. Sample a random `a` uniformly over `R_q`.
    /// 3. Sample a random error `e`, scaled by `t`.
    /// 4. `pub_ = (a, e - a*s)`.
    /// 5. Derive the evaluation key from `s^2`.
    #[must_use]
    pub fn keygen(&self) -> Key {
        let mut s = Poly::rand(&self.ring, Distribution::Ternary);
        s.ntt();

        let mut a = Poly::rand(&self.ring, Distribution::Uniform);
        a.ntt();

        let e = self.fresh_error_scaled();

        let mut b = Poly::mul(&a, &s);
        b = Poly::sub(&e, &b);

        let s2 = Poly::mul(&s, &s);
        let eval = self.ksgen(&s, &s2);

        Key {
            s,
            pub_: KeyPair { a, b },
            eval,
        }
    }

    /// Encrypt a plaintext polynomial `m` (already encoded into `R_q`,
    /// i.e. in NTT form) under public key `k`.
    ///
    /// 1. Sample fresh ternary randomness `u`.
    /// 2. Sample two fresh `t`-scaled errors `e1`, `e2`.
    /// 3. `c1 = u*a + e1`, `c0 = u*b + e2 + m`.
    #[must_use]
    pub fn encrypt(&self, k: &KeyPair, m: &Poly) -> Ciphertext {
        let mut u = Poly::rand(&self.ring, Distribution::Ternary);
        u.ntt();

        let e1 = self.fresh_error_scaled();
        let e2 = self.fresh_error_scaled();

        let mut c1 = Poly::mul(&u, &k.a);
        c1 = Poly::add(&c1, &e1);

        let mut c0 = Poly::mul(&u, &k.b);
        c0 = Poly::add(&c0, &e2);
        c0 = Poly::add(&c0, m);

        vec![c0, c1]
    }

    /// Decrypt ciphertext `c` under secret key `s` via Horner evaluation of
    /// the ciphertext polynomials at `s`, then transform the result back to
    /// coefficient form.
    #[must_use]
    pub fn decrypt(&self, c: &Ciphertext, s: &Poly) -> Poly {
        if c.is_empty() {
            return Poly::zero(&self.ring);
        }
        let mut m = c[c.len() - 1].clone();
        for i in (1..c.len()).rev() {
            m = Poly::mul(&m, s);
            m = Poly::add(&m, &c[i - 1]);
        }
        m.intt();
        m
    }

    /// Key and ciphertext serialization/deserialization live here rather
    /// than `poly.rs` since they compose `Poly::to_bytes`/`from_bytes` with
    /// scheme-level layout (`bgv_key_serialize`/`bgv_ct_serialize`).
    #[must_use]
    pub fn serialize_key(k: &Key) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend(k.s.to_bytes());
        out.extend(k.pub_.a.to_bytes());
        out.extend(k.pub_.b.to_bytes());
        out.extend(k.eval.a.to_bytes());
        out.extend(k.eval.b.to_bytes());
        out
    }

    /// Deserialize a key from the fixed `[s, pub.a, pub.b, eval.a, eval.b]`
    /// layout produced by [`Bgv::serialize_key`].
    ///
    /// # Errors
    /// Returns [`Error::BufferLength`] if `buf` is not exactly five
    /// polynomials' worth of bytes for `ring`.
    pub fn deserialize_key(ring: &Arc<Ring>, buf: &[u8]) -> Result<Key, Error> {
        let len = ring.n * ring.d * 8;
        let expected = len * 5;
        if buf.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: buf.len(),
            });
        }
        let s = Poly::from_bytes(ring, &buf[0..len])?;
        let pa = Poly::from_bytes(ring, &buf[len..2 * len])?;
        let pb = Poly::from_bytes(ring, &buf[2 * len..3 * len])?;
        let ea = Poly::from_bytes(ring, &buf[3 * len..4 * len])?;
        let eb = Poly::from_bytes(ring, &buf[4 * len..5 * len])?;
        Ok(Key {
            s,
            pub_: KeyPair { a: pa, b: pb },
            eval: KeyPair { a: ea, b: eb },
        })
    }

    /// Serialize a ciphertext: a 4-byte little-endian length prefix (the
    /// number of polynomials) followed by each polynomial's fixed-width
    /// bytes.
    #[must_use]
    pub fn serialize_ct(c: &Ciphertext) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(c.len() as u32).to_le_bytes());
        for p in c {
            out.extend(p.to_bytes());
        }
        out
    }

    /// Deserialize a ciphertext produced by [`Bgv::serialize_ct`].
    ///
    /// # Errors
    /// Returns [`Error::BufferLength`] if `buf` is shorter than the 4-byte
    /// length prefix, or its declared length doesn't match the buffer size.
    pub fn deserialize_ct(ring: &Arc<Ring>, buf: &[u8]) -> Result<Ciphertext, Error> {
        if buf.len() < 4 {
            return Err(Error::BufferLength {
                expected: 4,
                actual: buf.len(),
            });
        }
        let n = u32::from_le_bytes(buf[0..4].try_into().unwrap()) as usize;
        let len = ring.n * ring.d * 8;
        let expected = 4 + n * len;
        if buf.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: buf.len(),
            });
        }
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let start = 4 + i * len;
            out.push(Poly::from_bytes(ring, &buf[start..start + len])?);
        }
        Ok(out)
    }
}

/// Homomorphic addition: the encryption of `a + b`, where `a` and `b` must
/// have the same number of component polynomials.
///
/// # Errors
/// Returns [`Error::CiphertextLengthMismatch`] if `a` and `b` have a
/// different number of component polynomials.
pub fn ct_add(a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, Error> {
    if a.len() != b.len() {
        return Err(Error::CiphertextLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| Poly::add(x, y)).collect())
}

/// Homomorphic multiplication of two fresh (length-2) ciphertexts,
/// producing a length-3 tensor product that is then immediately
/// relinearized back down to length 2 using the evaluation key `ek`.
///
/// # Errors
/// Returns [`Error::WrongCiphertextLength`] if either `a` or `b` is not a
/// fresh (length-2) ciphertext.
pub fn ct_mul(ek: &KeyPair, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext, Error> {
    if a.len() != 2 {
        return Err(Error::WrongCiphertextLength {
            expected: 2,
            actual: a.len(),
        });
    }
    if b.len() != 2 {
        return Err(Error::WrongCiphertextLength {
            expected: 2,
            actual: b.len(),
        });
    }

    let c0 = Poly::mul(&a[0], &b[0]);
    let c2 = Poly::mul(&a[1], &b[1]);
    let mut c1 = Poly::mul(&a[0], &b[1]);
    let tmp = Poly::mul(&a[1], &b[0]);
    c1 = Poly::add(&c1, &tmp);

    let mut c = vec![c0, c1, c2];
    ct_relin(ek, &mut c)?;
    Ok(c)
}

/// Relinearize a length-3 ciphertext back down to length 2 in place, using
/// key-switching key `k` to fold the `s^2` component back onto `s`.
///
/// # Errors
/// Returns [`Error::WrongCiphertextLength`] if `c` does not have exactly
/// three component polynomials.
pub fn ct_relin(k: &KeyPair, c: &mut Ciphertext) -> Result<(), Error> {
    if c.len() != 3 {
        return Err(Error::WrongCiphertextLength {
            expected: 3,
            actual: c.len(),
        });
    }

    let tmp = Poly::mul(&c[2], &k.b);
    c[2] = Poly::mul(&c[2], &k.a);

    c[0] = Poly::add(&c[0], &tmp);
    let c2 = c.pop().unwrap();
    c[1] = Poly::add(&c[1], &c2);

    Ok(())
}
