use super::{element::Element, group::canonical_bytes, group::g1, keys::SecretKey};
use crate::digest::{Digest, Digestible};
use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::PrimeField;
use serde::{Deserialize, Serialize};

/// The accumulator value V \in G1.
///
/// Starts at g1. Each add replaces V with X \cdot V^\alpha, so the state stays a
/// single group element however many elements are folded in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accumulator<E: PairingEngine> {
    #[serde(with = "super::serde_impl")]
    pub(crate) value: E::G1Affine,
}

impl<E: PairingEngine> Default for Accumulator<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PairingEngine> Digestible for Accumulator<E> {
    fn to_digest(&self) -> Digest {
        canonical_bytes(&self.value).to_digest()
    }
}

impl<E: PairingEngine> Accumulator<E> {
    /// The empty accumulator, V = g1.
    pub fn new() -> Self {
        Self { value: g1::<E>() }
    }

    pub fn value(&self) -> E::G1Affine {
        self.value
    }

    /// V := X \cdot V^\alpha
    pub fn add(&mut self, sk: &SecretKey<E>, elem: &Element<E>) {
        let value = self
            .value
            .mul(sk.alpha.into_repr())
            .add_mixed(&elem.point)
            .into_affine();
        self.value = value;
        trace!("acc add -> {}", self.to_digest().short());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Bls12_381;
    use ark_bn254::{Bn254, Fr};

    #[test]
    fn test_init() {
        let acc = Accumulator::<Bn254>::new();
        assert_eq!(acc.value(), g1::<Bn254>());
        assert_eq!(acc, Accumulator::default());
    }

    #[test]
    fn test_add_recurrence() {
        let alpha = Fr::from(11u64);
        let sk = SecretKey::<Bn254>::new(alpha);
        let x = Fr::from(3u64);
        let y = Fr::from(5u64);

        let mut acc = Accumulator::<Bn254>::new();
        acc.add(&sk, &Element::from_scalar(x));
        assert_eq!(acc.value(), Element::<Bn254>::from_scalar(x + alpha).point());

        acc.add(&sk, &Element::from_scalar(y));
        let expect = y + alpha * (x + alpha);
        assert_eq!(acc.value(), Element::<Bn254>::from_scalar(expect).point());
    }

    #[test]
    fn test_add_deterministic() {
        let mut rng = rand::thread_rng();
        let sk = SecretKey::<Bls12_381>::rand(&mut rng).unwrap();
        let elem = Element::from_message("a");

        let mut acc1 = Accumulator::<Bls12_381>::new();
        let mut acc2 = Accumulator::<Bls12_381>::new();
        acc1.add(&sk, &elem);
        acc2.add(&sk, &elem);
        assert_eq!(acc1, acc2);
        assert_eq!(acc1.to_digest(), acc2.to_digest());
        assert_ne!(acc1, Accumulator::new());
    }

    #[test]
    fn test_serde() {
        let mut rng = rand::thread_rng();
        let sk = SecretKey::<Bn254>::rand(&mut rng).unwrap();
        let mut acc = Accumulator::<Bn254>::new();
        acc.add(&sk, &Element::from_message("serde"));

        let json = serde_json::to_string_pretty(&acc).unwrap();
        let bin = bincode::serialize(&acc).unwrap();
        assert_eq!(serde_json::from_str::<Accumulator<_>>(&json).unwrap(), acc);
        assert_eq!(bincode::deserialize::<Accumulator<_>>(&bin[..]).unwrap(), acc);
    }
}
