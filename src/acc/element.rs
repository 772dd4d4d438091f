use super::{error::AccError, group::g1};
use crate::digest::hash_to_scalar;
use core::convert::TryFrom;
use ark_ec::{msm::FixedBaseMSM, AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::{FpParameters, PrimeField, Zero};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// An accumulator element: the message digest x and X = g1^x.
///
/// Decoding rejects elements whose point is not g1^x.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawElement<E>", bound = "E: PairingEngine")]
pub struct Element<E: PairingEngine> {
    #[serde(with = "super::serde_impl::scalar")]
    pub(crate) x: E::Fr,
    #[serde(with = "super::serde_impl")]
    pub(crate) point: E::G1Affine,
}

#[derive(Deserialize)]
struct RawElement<E: PairingEngine> {
    #[serde(with = "super::serde_impl::scalar")]
    x: E::Fr,
    #[serde(with = "super::serde_impl")]
    point: E::G1Affine,
}

impl<E: PairingEngine> TryFrom<RawElement<E>> for Element<E> {
    type Error = AccError;

    fn try_from(raw: RawElement<E>) -> Result<Self, Self::Error> {
        let elem = Self::from_parts(raw.x, raw.point);
        if elem.is_well_formed() {
            Ok(elem)
        } else {
            Err(AccError::MalformedElement)
        }
    }
}

impl<E: PairingEngine> Element<E> {
    /// `EncodeElement`: x = HashToScalar(message), X = g1^x.
    pub fn from_message(message: impl AsRef<[u8]>) -> Self {
        Self::from_scalar(hash_to_scalar(message.as_ref()))
    }

    pub fn from_scalar(x: E::Fr) -> Self {
        let point = g1::<E>().mul(x.into_repr()).into_affine();
        Self { x, point }
    }

    /// Pair an arbitrary scalar with an arbitrary point. Nothing checks that
    /// `point == g1^x`; see [`Element::is_well_formed`].
    pub fn from_parts(x: E::Fr, point: E::G1Affine) -> Self {
        Self { x, point }
    }

    pub fn scalar(&self) -> E::Fr {
        self.x
    }

    pub fn point(&self) -> E::G1Affine {
        self.point
    }

    pub fn is_well_formed(&self) -> bool {
        g1::<E>().mul(self.x.into_repr()).into_affine() == self.point
    }
}

/// Encodes messages with a precomputed window table of g1.
pub struct ElementEncoder<E: PairingEngine> {
    window: usize,
    table: Vec<Vec<E::G1Affine>>,
}

impl<E: PairingEngine> ElementEncoder<E> {
    /// Build the table, sized for batches of roughly `batch_size` messages.
    pub fn new(batch_size: usize) -> Self {
        let window = FixedBaseMSM::get_mul_window_size(batch_size.max(1));
        let table = FixedBaseMSM::get_window_table(
            Self::scalar_bits(),
            window,
            E::G1Projective::prime_subgroup_generator(),
        );
        Self { window, table }
    }

    #[inline]
    fn scalar_bits() -> usize {
        <E::Fr as PrimeField>::Params::MODULUS_BITS as usize
    }

    pub fn encode(&self, message: impl AsRef<[u8]>) -> Element<E> {
        let x = hash_to_scalar(message.as_ref());
        let point = FixedBaseMSM::multi_scalar_mul::<E::G1Projective>(
            Self::scalar_bits(),
            self.window,
            &self.table,
            &[x],
        )
        .pop()
        .unwrap_or_else(E::G1Projective::zero)
        .into_affine();
        Element { x, point }
    }

    pub fn encode_batch<M: AsRef<[u8]> + Sync>(&self, messages: &[M]) -> Vec<Element<E>> {
        let xs: Vec<E::Fr> = messages
            .par_iter()
            .map(|m| hash_to_scalar(m.as_ref()))
            .collect();
        let points = FixedBaseMSM::multi_scalar_mul::<E::G1Projective>(
            Self::scalar_bits(),
            self.window,
            &self.table,
            &xs,
        );
        let points = E::G1Projective::batch_normalization_into_affine(&points);
        xs.into_iter()
            .zip(points)
            .map(|(x, point)| Element { x, point })
            .collect()
    }
}
