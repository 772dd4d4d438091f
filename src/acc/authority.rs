use super::{
    acc_value::Accumulator,
    element::Element,
    error::Result,
    keys::{KeyPair, PublicKey, SecretKey},
    non_membership::NonMembershipWitness,
    witness::MembershipWitness,
};
use crate::digest::Digestible;
use ark_ec::PairingEngine;
use parking_lot::Mutex;
use rand::{CryptoRng, RngCore};

#[derive(Debug, Copy, Clone)]
struct State<E: PairingEngine> {
    acc: Accumulator<E>,
    len: u64,
}

/// Handle of the accumulator authority.
///
/// Owns the trapdoor and the live accumulator. Adds are serialized by the
/// inner lock; readers take point-in-time snapshots and must verify against
/// the same snapshot a witness was built from.
pub struct Authority<E: PairingEngine> {
    sk: SecretKey<E>,
    pk: PublicKey<E>,
    state: Mutex<State<E>>,
}

impl<E: PairingEngine> Authority<E> {
    pub fn new(rng: impl RngCore + CryptoRng) -> Result<Self> {
        Ok(Self::with_key(SecretKey::rand(rng)?))
    }

    pub fn from_key_pair(key_pair: KeyPair<E>) -> Self {
        let (sk, pk) = key_pair.into_parts();
        Self {
            sk,
            pk,
            state: Mutex::new(State {
                acc: Accumulator::new(),
                len: 0,
            }),
        }
    }

    pub fn with_key(sk: SecretKey<E>) -> Self {
        let pk = PublicKey::gen_key(&sk);
        Self::from_key_pair(KeyPair::from_parts(sk, pk))
    }

    pub fn public_key(&self) -> &PublicKey<E> {
        &self.pk
    }

    pub fn snapshot(&self) -> Accumulator<E> {
        self.state.lock().acc
    }

    /// Number of add operations applied so far.
    pub fn len(&self) -> u64 {
        self.state.lock().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fold `elem` in and return the resulting snapshot.
    pub fn add(&self, elem: &Element<E>) -> Accumulator<E> {
        let mut state = self.state.lock();
        state.acc.add(&self.sk, elem);
        state.len += 1;
        debug!(
            "accumulator now holds {} element(s), V = {}",
            state.len,
            state.acc.to_digest().short()
        );
        state.acc
    }

    /// Membership witness paired with the snapshot it was computed against.
    pub fn witness(&self, elem: &Element<E>) -> Result<(Accumulator<E>, MembershipWitness<E>)> {
        let acc = self.snapshot();
        let witness = MembershipWitness::generate(&acc, &self.sk, elem)?;
        Ok((acc, witness))
    }

    /// Non-membership witness paired with the snapshot it was computed against.
    pub fn non_membership_witness(
        &self,
        elem: &Element<E>,
        rng: impl RngCore + CryptoRng,
    ) -> Result<(Accumulator<E>, NonMembershipWitness<E>)> {
        let acc = self.snapshot();
        let witness = NonMembershipWitness::generate(&acc, &self.sk, elem, rng)?;
        Ok((acc, witness))
    }
}
