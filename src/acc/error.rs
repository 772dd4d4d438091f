use thiserror::Error;

/// Failures raised while constructing keys, witnesses, proofs or decoding elements.
///
/// Verification never produces one of these: a rejected witness or proof is
/// reported as `false`.
#[derive(Debug, Error)]
pub enum AccError {
    #[error("secure randomness unavailable: {0}")]
    Entropy(#[from] rand::Error),

    #[error("element scalar plus trapdoor is zero modulo the group order")]
    NonInvertible,

    #[error("non-membership witness failed its consistency check")]
    WitnessConstruction,

    #[error("element point is not g1^x")]
    MalformedElement,
}

pub type Result<T, E = AccError> = core::result::Result<T, E>;
