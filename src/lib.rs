//! A pairing-based cryptographic accumulator.
//!
//! See [`acc`] for the protocol, [`digest`] for the hash-to-scalar map shared
//! by all participants.

#![cfg_attr(not(test), warn(clippy::unwrap_used))]

#[macro_use]
extern crate tracing;

pub mod acc;
pub mod digest;
pub mod utils;
