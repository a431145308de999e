#![deny(clippy::pedantic, warnings, missing_docs, unsafe_code)]
// Most of the 'allow' category...
#![deny(absolute_paths_not_starting_with_crate, dead_code)]
#![deny(elided_lifetimes_in_paths, explicit_outlives_requirements, keyword_idents)]
#![deny(let_underscore_drop, macro_use_extern_crate, meta_variable_misuse, missing_abi)]
#![deny(non_ascii_idents, rust_2021_incompatible_closure_captures)]
#![deny(rust_2021_incompatible_or_patterns, rust_2021_prefixes_incompatible_syntax)]
#![deny(rust_2021_prelude_collisions, single_use_lifetimes, trivial_casts)]
#![deny(trivial_numeric_casts, unreachable_pub, unsafe_op_in_unsafe_fn, unstable_features)]
#![deny(unused_extern_crates, unused_import_braces, unused_lifetimes, unused_macro_rules)]
#![deny(unused_qualifications, variant_size_differences)]
//
#![doc = include_str!("../README.md")]

// Implements the Brakerski-Gentry-Vaikuntanathan fully homomorphic encryption scheme
// over the cyclotomic ring R_q = Z_q[X]/(X^d+1), with q held in RNS form.
//
// Functionality map:
//
// PRNG (thread-local, ChaCha20-backed)                --> rng.rs
// Sampling distributions (uniform/ternary/error)       --> sampling.rs
// Modular arithmetic, primality, root finding          --> numtheory.rs
// Ring construction (RNS primes, NTT root tables, CRT) --> ring.rs
// Polynomial arithmetic, encode/decode, serialization  --> poly.rs
// Negacyclic NTT/INTT butterflies                      --> ntt.rs
// BGV keygen/encrypt/decrypt/add/mul/relin             --> bgv.rs
// Error type                                           --> error.rs

mod error;
mod ntt;
mod numtheory;
mod rng;
mod sampling;

/// The polynomial ring and its RNS/NTT constants.
pub mod ring;

/// RNS polynomial arithmetic over a [`ring::Ring`].
pub mod poly;

/// The BGV scheme: key generation, encryption, decryption, and homomorphic
/// ciphertext operations.
pub mod bgv;

pub use bgv::{ct_add, ct_mul, ct_relin, Bgv, Ciphertext, Key, KeyPair};
pub use error::Error;
pub use poly::Poly;
pub use ring::Ring;
pub use sampling::Distribution;
