//! BLAKE2b digests and the hash-to-scalar map shared by every participant.

use ark_ff::PrimeField;
use core::fmt;

pub const DIGEST_LEN: usize = 32;

#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl Digest {
    /// Interpret the digest as a big-endian integer and reduce it modulo the field order.
    pub fn to_scalar<F: PrimeField>(&self) -> F {
        F::from_be_bytes_mod_order(&self.0)
    }

    /// First eight hex characters, used to fingerprint group elements in logs.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl From<blake2b_simd::Hash> for Digest {
    fn from(input: blake2b_simd::Hash) -> Self {
        let data = input.as_bytes();
        debug_assert_eq!(data.len(), DIGEST_LEN);
        let mut out = Self::default();
        out.0.copy_from_slice(&data[..DIGEST_LEN]);
        out
    }
}

pub fn blake2() -> blake2b_simd::Params {
    let mut params = blake2b_simd::Params::new();
    params.hash_length(DIGEST_LEN);
    params
}

pub trait Digestible {
    fn to_digest(&self) -> Digest;
}

impl Digestible for [u8] {
    fn to_digest(&self) -> Digest {
        Digest::from(blake2().hash(self))
    }
}

impl Digestible for Vec<u8> {
    fn to_digest(&self) -> Digest {
        self.as_slice().to_digest()
    }
}

impl Digestible for str {
    fn to_digest(&self) -> Digest {
        self.as_bytes().to_digest()
    }
}

impl Digestible for String {
    fn to_digest(&self) -> Digest {
        self.as_bytes().to_digest()
    }
}

/// Hash the concatenation of several byte strings with a single BLAKE2b state.
pub fn concat_digest<'a>(input: impl IntoIterator<Item = &'a [u8]>) -> Digest {
    let mut state = blake2().to_state();
    for part in input {
        state.update(part);
    }
    Digest::from(state.finalize())
}

/// `HashToScalar`: BLAKE2b-256 of `data`, big-endian, reduced modulo r.
#[inline]
pub fn hash_to_scalar<F: PrimeField>(data: &[u8]) -> F {
    data.to_digest().to_scalar()
}
