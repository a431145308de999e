use thiserror::Error;

/// Failure modes surfaced by this crate.
///
/// Precondition violations that a malformed or adversarial ciphertext could
/// trigger (mismatched ciphertext lengths, wrong buffer sizes) are
/// surfaced as recoverable errors rather than panics.
#[derive(Debug, Error)]
pub enum Error {
    /// `ring_init`'s size parameters could not produce a usable ring.
    #[error("ring parameters are invalid: {0}")]
    InvalidRingParams(&'static str),

    /// `bgv_ct_add` on ciphertexts of differing length.
    #[error("ciphertext length mismatch: {left} vs {right}")]
    CiphertextLengthMismatch { left: usize, right: usize },

    /// `bgv_ct_mul` requires both operands to be fresh (length-2)
    /// ciphertexts; `bgv_ct_relin` requires a length-3 ciphertext.
    #[error("expected ciphertext of length {expected}, got {actual}")]
    WrongCiphertextLength { expected: usize, actual: usize },

    /// A serialized buffer did not match the expected length for the ring.
    #[error("buffer of {actual} bytes cannot be deserialized, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
}
