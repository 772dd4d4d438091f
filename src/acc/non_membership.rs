use super::{
    acc_value::Accumulator,
    element::Element,
    error::{AccError, Result},
    group::{gt_eq, rand_scalar},
    keys::{PublicKey, SecretKey},
    proof::NonMembershipProof,
};
use anyhow::ensure;
use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::{Field, PrimeField};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

/// Non-membership witness (D, v) with V = g1^v \cdot D^{y+\alpha}.
///
/// Since v is free and D is solved for, such a pair exists for every y with
/// y + \alpha invertible, members included. Verification therefore shows
/// knowledge of a (D, v) consistent with y and one accumulator snapshot, not
/// that y was never added.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonMembershipWitness<E: PairingEngine> {
    #[serde(with = "super::serde_impl")]
    pub(crate) d: E::G1Affine,
    #[serde(with = "super::serde_impl::scalar")]
    pub(crate) v: E::Fr,
}

impl<E: PairingEngine> NonMembershipWitness<E> {
    pub fn generate(
        acc: &Accumulator<E>,
        sk: &SecretKey<E>,
        elem: &Element<E>,
        mut rng: impl RngCore + CryptoRng,
    ) -> Result<Self> {
        let s = elem.x + sk.alpha;
        let s_inv = s.inverse().ok_or_else(|| {
            warn!("y + alpha is zero, cannot build non-membership witness");
            AccError::NonInvertible
        })?;
        let v: E::Fr = rand_scalar(&mut rng)?;

        let g1_v = E::G1Affine::prime_subgroup_generator().mul(v.into_repr());
        let d = (acc.value.into_projective() - g1_v)
            .into_affine()
            .mul(s_inv.into_repr())
            .into_affine();

        let recomputed = d.mul(s.into_repr()) + g1_v;
        if recomputed.into_affine() != acc.value {
            error!("non-membership witness does not reproduce the accumulator");
            return Err(AccError::WitnessConstruction);
        }
        Ok(Self { d, v })
    }

    pub fn d(&self) -> E::G1Affine {
        self.d
    }

    pub fn v(&self) -> E::Fr {
        self.v
    }

    fn check(&self, acc: &Accumulator<E>, elem: &Element<E>, pk: &PublicKey<E>) -> anyhow::Result<()> {
        let lhs = E::pairing(acc.value, pk.g2);
        let g1_v = pk.g1.mul(self.v.into_repr());
        let rhs = E::pairing(g1_v, pk.g2) * E::pairing(self.d, pk.g2_alpha_y(&elem.x));
        ensure!(
            gt_eq::<E>(&lhs, &rhs),
            "e(V, g2) != e(g1^v, g2) * e(D, g2^alpha * g2^y)"
        );
        Ok(())
    }

    /// Check the witness against the given accumulator snapshot.
    pub fn verify(&self, acc: &Accumulator<E>, elem: &Element<E>, pk: &PublicKey<E>) -> bool {
        match self.check(acc, elem, pk) {
            Ok(()) => true,
            Err(e) => {
                debug!("non-membership witness rejected: {}", e);
                false
            }
        }
    }

    /// Prove knowledge of v without revealing it.
    pub fn zk_proof(
        &self,
        acc: &Accumulator<E>,
        elem: &Element<E>,
        pk: &PublicKey<E>,
        rng: impl RngCore + CryptoRng,
    ) -> Result<NonMembershipProof<E>> {
        NonMembershipProof::new(self, acc, elem, pk, rng)
    }
}
