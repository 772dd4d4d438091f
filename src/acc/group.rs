//! Substrate glue over [`PairingEngine`].
//!
//! The protocol only needs scalars, two source groups, the target group, the
//! pairing and a canonical encoding. ark-ec's `PairingEngine` exposes all of
//! them, so every protocol type is generic over `E: PairingEngine`.

use super::error::Result;
use ark_ec::{AffineCurve, PairingEngine};
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use rand::RngCore;

/// Bytes of entropy drawn per scalar, twice the order size to make the
/// modular bias negligible.
const SCALAR_ENTROPY_LEN: usize = 64;

#[inline]
pub fn g1<E: PairingEngine>() -> E::G1Affine {
    E::G1Affine::prime_subgroup_generator()
}

#[inline]
pub fn g2<E: PairingEngine>() -> E::G2Affine {
    E::G2Affine::prime_subgroup_generator()
}

/// Compressed canonical encoding. Equal values always yield equal bytes and
/// every value of a given type has the same length.
pub fn canonical_bytes<T: CanonicalSerialize>(t: &T) -> Vec<u8> {
    let mut buf = Vec::with_capacity(t.serialized_size());
    t.serialize(&mut buf)
        .expect("failed to write canonical bytes into a vec");
    buf
}

/// Equality of two pairing outputs, decided on their canonical encodings.
#[inline]
pub fn gt_eq<E: PairingEngine>(lhs: &E::Fqk, rhs: &E::Fqk) -> bool {
    canonical_bytes(lhs) == canonical_bytes(rhs)
}

/// Draw a uniform scalar, surfacing an exhausted source as `AccError::Entropy`.
pub fn rand_scalar<F: PrimeField>(rng: &mut impl RngCore) -> Result<F> {
    let mut buf = [0u8; SCALAR_ENTROPY_LEN];
    rng.try_fill_bytes(&mut buf)?;
    Ok(F::from_le_bytes_mod_order(&buf))
}

/// An entropy source that always fails.
#[cfg(test)]
pub(crate) struct ExhaustedRng;

#[cfg(test)]
impl RngCore for ExhaustedRng {
    fn next_u32(&mut self) -> u32 {
        panic!("entropy exhausted")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("entropy exhausted")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("entropy exhausted")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
        Err(rand::Error::new("entropy exhausted"))
    }
}

#[cfg(test)]
impl rand::CryptoRng for ExhaustedRng {}
