use super::{
    acc_value::Accumulator,
    element::Element,
    error::{AccError, Result},
    group::gt_eq,
    keys::{PublicKey, SecretKey},
    proof::MembershipProof,
};
use anyhow::ensure;
use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::{Field, PrimeField};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

/// Membership witness W = V^{1/(x+\alpha)}.
///
/// Verification checks e(W, g2^\alpha) \cdot e(X, g2) = e(V, g2). The identity
/// holds by construction only when V = g1^{x+\alpha}, i.e. right after the
/// element was added to an empty accumulator. Once another element is added the
/// witness is stale, and a witness regenerated against a multi-element
/// accumulator does not verify either.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipWitness<E: PairingEngine> {
    #[serde(with = "super::serde_impl")]
    pub(crate) w: E::G1Affine,
}

impl<E: PairingEngine> MembershipWitness<E> {
    pub fn generate(acc: &Accumulator<E>, sk: &SecretKey<E>, elem: &Element<E>) -> Result<Self> {
        let s = elem.x + sk.alpha;
        let s_inv = s.inverse().ok_or_else(|| {
            warn!("x + alpha is zero, cannot build membership witness");
            AccError::NonInvertible
        })?;
        let w = acc.value.mul(s_inv.into_repr()).into_affine();
        Ok(Self { w })
    }

    pub fn value(&self) -> E::G1Affine {
        self.w
    }

    fn check(&self, acc: &Accumulator<E>, elem: &Element<E>, pk: &PublicKey<E>) -> anyhow::Result<()> {
        let lhs = E::pairing(self.w, pk.g2_alpha) * E::pairing(elem.point, pk.g2);
        let rhs = E::pairing(acc.value, pk.g2);
        ensure!(
            gt_eq::<E>(&lhs, &rhs),
            "e(W, g2^alpha) * e(X, g2) != e(V, g2)"
        );
        Ok(())
    }

    /// Check the witness against the given accumulator snapshot.
    pub fn verify(&self, acc: &Accumulator<E>, elem: &Element<E>, pk: &PublicKey<E>) -> bool {
        match self.check(acc, elem, pk) {
            Ok(()) => true,
            Err(e) => {
                debug!("membership witness rejected: {}", e);
                false
            }
        }
    }

    /// Escalate the witness into a non-interactive zero-knowledge membership proof.
    pub fn zk_proof(
        &self,
        acc: &Accumulator<E>,
        elem: &Element<E>,
        pk: &PublicKey<E>,
        rng: impl RngCore + CryptoRng,
    ) -> Result<MembershipProof<E>> {
        MembershipProof::new(self, acc, elem, pk, rng)
    }
}
