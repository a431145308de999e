//! Thread-local ChaCha20 PRNG.
//!
//! Ported from `src/rand/chacha.h` and `src/rand/random.h`: a 1024-byte
//! buffer refilled from the cipher's keystream, reseeded from OS entropy
//! every `2^18` bytes drawn, with large requests (over half the buffer)
//! bypassing the buffer and streaming directly.

use std::cell::RefCell;

use rand_core::{OsRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

const RNG_BUF_LEN: usize = 1 << 10;
const RNG_RESEED: u64 = 1 << 18;

struct RngState {
    chacha: ChaCha20Rng,
    buf: [u8; RNG_BUF_LEN],
    offset: usize,
    drawn_since_seed: u64,
}

impl RngState {
    fn fresh() -> Self {
        RngState {
            chacha: ChaCha20Rng::from_rng(OsRng).expect("OS entropy source failed"),
            buf: [0u8; RNG_BUF_LEN],
            offset: RNG_BUF_LEN,
            drawn_since_seed: 0,
        }
    }

    fn refill(&mut self) {
        if self.drawn_since_seed >= RNG_RESEED {
            *self = RngState::fresh();
        }
        self.chacha.fill_bytes(&mut self.buf);
        self.offset = 0;
        self.drawn_since_seed += RNG_BUF_LEN as u64;
    }

    fn fill(&mut self, mut out: &mut [u8]) {
        if out.len() > RNG_BUF_LEN / 2 {
            self.chacha.fill_bytes(out);
            self.drawn_since_seed += out.len() as u64;
            return;
        }
        while !out.is_empty() {
            if self.offset >= RNG_BUF_LEN {
                self.refill();
            }
            let remaining = RNG_BUF_LEN - self.offset;
            let n = out.len().min(remaining);
            out[..n].copy_from_slice(&self.buf[self.offset..self.offset + n]);
            self.offset += n;
            out = &mut out[n..];
        }
    }
}

thread_local! {
    static RNG: RefCell<RngState> = RefCell::new(RngState::fresh());
}

/// Fill `buf` with uniformly random bytes from the thread-local generator.
pub(crate) fn fill(buf: &mut [u8]) {
    RNG.with(|r| r.borrow_mut().fill(buf));
}

pub(crate) fn uniform32() -> u32 {
    let mut b = [0u8; 4];
    fill(&mut b);
    u32::from_le_bytes(b)
}

pub(crate) fn uniform64() -> u64 {
    let mut b = [0u8; 8];
    fill(&mut b);
    u64::from_le_bytes(b)
}

/// A uniform `f64` in `[0, 1)` built from the low 53 mantissa bits of a
/// random `u64`.
pub(crate) fn uniform_real() -> f64 {
    const MANTISSA_BITS: u32 = 53;
    let r = uniform64() & ((1u64 << MANTISSA_BITS) - 1);
    (r as f64) * 2f64.powi(-(MANTISSA_BITS as i32))
}

pub(crate) fn uniform_bit() -> bool {
    uniform32() & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_real_is_in_unit_interval() {
        for _ in 0..1000 {
            let x = uniform_real();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn large_request_bypasses_buffer() {
        let mut buf = vec![0u8; RNG_BUF_LEN + 1];
        fill(&mut buf);
        assert!(buf.iter().any(|&b| b != 0));
    }
}
