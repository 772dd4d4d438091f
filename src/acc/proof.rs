//! Fiat–Shamir sigma proofs layered on the witnesses.

use super::{
    acc_value::Accumulator,
    element::Element,
    error::Result,
    group::{canonical_bytes, gt_eq, rand_scalar},
    keys::PublicKey,
    non_membership::NonMembershipWitness,
    witness::MembershipWitness,
};
use crate::digest::concat_digest;
use anyhow::{ensure, Context as _};
use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::{Field, PrimeField};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

/// c = H(V || X || T1 || T2) mod r
fn membership_challenge<E: PairingEngine>(
    acc: &Accumulator<E>,
    x_point: &E::G1Affine,
    t1: &E::G1Affine,
    t2: &E::G2Affine,
) -> E::Fr {
    let parts = [
        canonical_bytes(&acc.value),
        canonical_bytes(x_point),
        canonical_bytes(t1),
        canonical_bytes(t2),
    ];
    concat_digest(parts.iter().map(|p| p.as_slice())).to_scalar()
}

/// c = H(V || Y || T) mod r
fn non_membership_challenge<E: PairingEngine>(
    acc: &Accumulator<E>,
    y_point: &E::G1Affine,
    t: &E::Fqk,
) -> E::Fr {
    let parts = [
        canonical_bytes(&acc.value),
        canonical_bytes(y_point),
        canonical_bytes(t),
    ];
    concat_digest(parts.iter().map(|p| p.as_slice())).to_scalar()
}

/// First message of the membership sigma protocol.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofCommitment<E: PairingEngine> {
    /// W^r
    #[serde(with = "super::serde_impl")]
    pub(crate) t1: E::G1Affine,
    /// g2^r
    #[serde(with = "super::serde_impl")]
    pub(crate) t2: E::G2Affine,
    /// e(W, g2)
    #[serde(with = "super::serde_impl")]
    pub(crate) t3: E::Fqk,
}

impl<E: PairingEngine> ProofCommitment<E> {
    pub fn t1(&self) -> E::G1Affine {
        self.t1
    }

    pub fn t2(&self) -> E::G2Affine {
        self.t2
    }

    pub fn t3(&self) -> E::Fqk {
        self.t3
    }
}

/// Non-interactive proof of knowledge of a membership witness.
///
/// Verification checks e(g1^s, g2) = e(T1, g2) \cdot e(X, g2)^c, which only
/// holds when the underlying witness is W = g1, i.e. the single-element case.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "E: PairingEngine")]
pub struct MembershipProof<E: PairingEngine> {
    pub(crate) commitment: ProofCommitment<E>,
    #[serde(with = "super::serde_impl::scalar")]
    pub(crate) response: E::Fr,
}

impl<E: PairingEngine> MembershipProof<E> {
    pub(crate) fn new(
        witness: &MembershipWitness<E>,
        acc: &Accumulator<E>,
        elem: &Element<E>,
        pk: &PublicKey<E>,
        mut rng: impl RngCore + CryptoRng,
    ) -> Result<Self> {
        let r: E::Fr = rand_scalar(&mut rng)?;
        let t1 = witness.w.mul(r.into_repr()).into_affine();
        let t2 = pk.g2.mul(r.into_repr()).into_affine();
        let t3 = E::pairing(witness.w, pk.g2);

        let c = membership_challenge(acc, &elem.point, &t1, &t2);
        let response = r + c * elem.x;

        Ok(Self {
            commitment: ProofCommitment { t1, t2, t3 },
            response,
        })
    }

    pub fn from_parts(commitment: ProofCommitment<E>, response: E::Fr) -> Self {
        Self {
            commitment,
            response,
        }
    }

    pub fn commitment(&self) -> &ProofCommitment<E> {
        &self.commitment
    }

    pub fn response(&self) -> E::Fr {
        self.response
    }

    fn check(&self, acc: &Accumulator<E>, elem: &Element<E>, pk: &PublicKey<E>) -> anyhow::Result<()> {
        let c = membership_challenge(acc, &elem.point, &self.commitment.t1, &self.commitment.t2);
        let lhs = E::pairing(pk.g1.mul(self.response.into_repr()), pk.g2);
        let rhs = E::pairing(self.commitment.t1, pk.g2)
            * E::pairing(elem.point, pk.g2).pow(c.into_repr());
        ensure!(
            gt_eq::<E>(&lhs, &rhs),
            "e(g1^s, g2) != e(T1, g2) * e(X, g2)^c"
        );
        Ok(())
    }

    pub fn verify(&self, acc: &Accumulator<E>, elem: &Element<E>, pk: &PublicKey<E>) -> bool {
        match self.check(acc, elem, pk) {
            Ok(()) => true,
            Err(e) => {
                debug!("membership proof rejected: {}", e);
                false
            }
        }
    }
}

/// Non-interactive proof of knowledge of the v in a non-membership witness.
///
/// T = e(g1, g2)^\rho, s = \rho + c \cdot v, and the verifier checks
/// e(g1^s, g2) = T \cdot (e(V, g2) / e(D, g2^\alpha \cdot g2^y))^c. D is disclosed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonMembershipProof<E: PairingEngine> {
    #[serde(with = "super::serde_impl")]
    pub(crate) t: E::Fqk,
    #[serde(with = "super::serde_impl::scalar")]
    pub(crate) response: E::Fr,
    #[serde(with = "super::serde_impl")]
    pub(crate) d: E::G1Affine,
}

impl<E: PairingEngine> NonMembershipProof<E> {
    pub(crate) fn new(
        witness: &NonMembershipWitness<E>,
        acc: &Accumulator<E>,
        elem: &Element<E>,
        pk: &PublicKey<E>,
        mut rng: impl RngCore + CryptoRng,
    ) -> Result<Self> {
        let rho: E::Fr = rand_scalar(&mut rng)?;
        let t = E::pairing(pk.g1, pk.g2).pow(rho.into_repr());
        let c = non_membership_challenge(acc, &elem.point, &t);
        Ok(Self {
            t,
            response: rho + c * witness.v,
            d: witness.d,
        })
    }

    pub fn response(&self) -> E::Fr {
        self.response
    }

    pub fn d(&self) -> E::G1Affine {
        self.d
    }

    fn check(&self, acc: &Accumulator<E>, elem: &Element<E>, pk: &PublicKey<E>) -> anyhow::Result<()> {
        let c = non_membership_challenge(acc, &elem.point, &self.t);
        let lhs = E::pairing(pk.g1.mul(self.response.into_repr()), pk.g2);
        let d_pair = E::pairing(self.d, pk.g2_alpha_y(&elem.x))
            .inverse()
            .context("e(D, g2^alpha * g2^y) is not invertible")?;
        let ratio = E::pairing(acc.value, pk.g2) * d_pair;
        let rhs = self.t * ratio.pow(c.into_repr());
        ensure!(
            gt_eq::<E>(&lhs, &rhs),
            "e(g1^s, g2) != T * (e(V, g2) / e(D, g2^alpha * g2^y))^c"
        );
        Ok(())
    }

    pub fn verify(&self, acc: &Accumulator<E>, elem: &Element<E>, pk: &PublicKey<E>) -> bool {
        match self.check(acc, elem, pk) {
            Ok(()) => true,
            Err(e) => {
                debug!("non-membership proof rejected: {:#}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acc::{error::AccError, group::ExhaustedRng, keys::SecretKey};
    use ark_bls12_381::Bls12_381;
    use ark_bn254::{Bn254, Fr};
    use ark_ff::One;

    struct Fixture<E: PairingEngine> {
        sk: SecretKey<E>,
        pk: PublicKey<E>,
        acc: Accumulator<E>,
        elem: Element<E>,
        witness: MembershipWitness<E>,
    }

    impl<E: PairingEngine> Fixture<E> {
        fn new() -> Self {
            let mut rng = rand::thread_rng();
            let sk = SecretKey::<E>::rand(&mut rng).unwrap();
            let pk = PublicKey::gen_key(&sk);
            let elem = Element::from_message("test_element");
            let mut acc = Accumulator::new();
            acc.add(&sk, &elem);
            let witness = MembershipWitness::generate(&acc, &sk, &elem).unwrap();
            Self {
                sk,
                pk,
                acc,
                elem,
                witness,
            }
        }
    }

    fn check_membership_proof<E: PairingEngine>() {
        let mut rng = rand::thread_rng();
        let f = Fixture::<E>::new();
        let proof = f.witness.zk_proof(&f.acc, &f.elem, &f.pk, &mut rng).unwrap();
        assert!(proof.verify(&f.acc, &f.elem, &f.pk));
        assert_eq!(proof.commitment().t3(), E::pairing(f.witness.value(), f.pk.g2()));

        // same scalar, different point
        let other_point = Element::<E>::from_scalar(E::Fr::from(43u64)).point();
        let forged = Element::from_parts(f.elem.scalar(), other_point);
        assert!(!proof.verify(&f.acc, &forged, &f.pk));

        let tampered =
            MembershipProof::from_parts(*proof.commitment(), proof.response() + E::Fr::one());
        assert!(!tampered.verify(&f.acc, &f.elem, &f.pk));

        let wrong = Element::from_scalar(E::Fr::from(99u64));
        assert!(!proof.verify(&f.acc, &wrong, &f.pk));

        let mut other_acc = f.acc;
        other_acc.add(&f.sk, &wrong);
        let other = f.witness.zk_proof(&other_acc, &f.elem, &f.pk, &mut rng).unwrap();
        assert!(!other.verify(&f.acc, &f.elem, &f.pk));
    }

    #[test]
    fn test_membership_proof_bn254() {
        check_membership_proof::<Bn254>();
    }

    #[test]
    fn test_membership_proof_bls12_381() {
        check_membership_proof::<Bls12_381>();
    }

    #[test]
    fn test_membership_proof_fresh_randomness() {
        let mut rng = rand::thread_rng();
        let f = Fixture::<Bn254>::new();
        let p1 = f.witness.zk_proof(&f.acc, &f.elem, &f.pk, &mut rng).unwrap();
        let p2 = f.witness.zk_proof(&f.acc, &f.elem, &f.pk, &mut rng).unwrap();
        assert_ne!(p1.commitment().t1(), p2.commitment().t1());
        assert_ne!(p1.response(), p2.response());
        assert!(p1.verify(&f.acc, &f.elem, &f.pk));
        assert!(p2.verify(&f.acc, &f.elem, &f.pk));
    }

    #[test]
    fn test_membership_proof_entropy() {
        let f = Fixture::<Bn254>::new();
        let err = f.witness.zk_proof(&f.acc, &f.elem, &f.pk, ExhaustedRng).unwrap_err();
        assert!(matches!(err, AccError::Entropy(_)));
    }

    #[test]
    fn test_non_membership_proof() {
        let mut rng = rand::thread_rng();
        let f = Fixture::<Bn254>::new();
        let non_elem = Element::from_message("non_member_element");
        let wit = NonMembershipWitness::generate(&f.acc, &f.sk, &non_elem, &mut rng).unwrap();
        let proof = wit.zk_proof(&f.acc, &non_elem, &f.pk, &mut rng).unwrap();
        assert!(proof.verify(&f.acc, &non_elem, &f.pk));
        assert_eq!(proof.d(), wit.d());

        assert!(!proof.verify(&f.acc, &f.elem, &f.pk));

        let mut tampered = proof;
        tampered.response += Fr::one();
        assert!(!tampered.verify(&f.acc, &non_elem, &f.pk));

        let mut acc = f.acc;
        acc.add(&f.sk, &non_elem);
        assert!(!proof.verify(&acc, &non_elem, &f.pk));
    }

    #[test]
    fn test_serde() {
        let mut rng = rand::thread_rng();
        let f = Fixture::<Bls12_381>::new();
        let proof = f.witness.zk_proof(&f.acc, &f.elem, &f.pk, &mut rng).unwrap();

        let json = serde_json::to_string_pretty(&proof).unwrap();
        let bin = bincode::serialize(&proof).unwrap();
        let from_json = serde_json::from_str::<MembershipProof<Bls12_381>>(&json).unwrap();
        let from_bin = bincode::deserialize::<MembershipProof<Bls12_381>>(&bin[..]).unwrap();
        assert_eq!(from_json, proof);
        assert_eq!(from_bin, proof);
        assert!(from_bin.verify(&f.acc, &f.elem, &f.pk));

        let non_elem = Element::from_message("non_member_element");
        let wit = NonMembershipWitness::generate(&f.acc, &f.sk, &non_elem, &mut rng).unwrap();
        let nm_proof = wit.zk_proof(&f.acc, &non_elem, &f.pk, &mut rng).unwrap();
        let bin = bincode::serialize(&nm_proof).unwrap();
        let nm_from_bin = bincode::deserialize::<NonMembershipProof<Bls12_381>>(&bin[..]).unwrap();
        assert_eq!(nm_from_bin, nm_proof);
    }
}
