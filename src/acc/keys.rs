use super::{
    error::Result,
    group::{g1, g2, rand_scalar},
};
use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::PrimeField;
use core::fmt;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

/// The accumulator trapdoor \alpha.
///
/// Only the accumulator authority holds it. It is deliberately not
/// serializable and its `Debug` output is redacted.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct SecretKey<E: PairingEngine> {
    pub(crate) alpha: E::Fr,
}

impl<E: PairingEngine> fmt::Debug for SecretKey<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl<E: PairingEngine> SecretKey<E> {
    /// Draw \alpha uniformly from [0, r).
    pub fn rand(mut rng: impl RngCore + CryptoRng) -> Result<Self> {
        Ok(Self {
            alpha: rand_scalar(&mut rng)?,
        })
    }

    /// Use a caller supplied trapdoor.
    pub fn new(alpha: E::Fr) -> Self {
        Self { alpha }
    }
}

/// Public parameters shared with every verifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey<E: PairingEngine> {
    /// g1
    #[serde(with = "super::serde_impl")]
    pub(crate) g1: E::G1Affine,
    /// g2
    #[serde(with = "super::serde_impl")]
    pub(crate) g2: E::G2Affine,
    /// g2^\alpha
    #[serde(with = "super::serde_impl")]
    pub(crate) g2_alpha: E::G2Affine,
}

impl<E: PairingEngine> PublicKey<E> {
    pub fn gen_key(sk: &SecretKey<E>) -> Self {
        let g1 = g1::<E>();
        let g2 = g2::<E>();
        let g2_alpha = g2.mul(sk.alpha.into_repr()).into_affine();
        Self { g1, g2, g2_alpha }
    }

    pub fn g1(&self) -> E::G1Affine {
        self.g1
    }

    pub fn g2(&self) -> E::G2Affine {
        self.g2
    }

    /// g2^\alpha
    pub fn g2_alpha(&self) -> E::G2Affine {
        self.g2_alpha
    }

    /// g2^\alpha \cdot g2^y
    pub(crate) fn g2_alpha_y(&self, y: &E::Fr) -> E::G2Affine {
        self.g2.mul(y.into_repr()).add_mixed(&self.g2_alpha).into_affine()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair<E: PairingEngine> {
    sk: SecretKey<E>,
    pub pk: PublicKey<E>,
}

impl<E: PairingEngine> KeyPair<E> {
    pub fn gen(rng: impl RngCore + CryptoRng) -> Result<Self> {
        let sk = SecretKey::rand(rng)?;
        let pk = PublicKey::gen_key(&sk);
        Ok(Self { sk, pk })
    }

    pub fn from_parts(sk: SecretKey<E>, pk: PublicKey<E>) -> Self {
        Self { sk, pk }
    }

    pub fn sk(&self) -> &SecretKey<E> {
        &self.sk
    }

    pub fn into_parts(self) -> (SecretKey<E>, PublicKey<E>) {
        (self.sk, self.pk)
    }
}
