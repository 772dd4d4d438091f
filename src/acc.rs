//! Pairing-based accumulator with membership witnesses, non-membership
//! witnesses and Fiat–Shamir zero-knowledge proofs.
//!
//! Every type is generic over `ark_ec::PairingEngine`; [`bn254`] and
//! [`bls12_381`] fix the curve. The BN254 aliases are re-exported here.

pub mod acc_value;
pub mod authority;
pub mod element;
pub mod error;
pub mod group;
pub mod keys;
pub mod non_membership;
pub mod proof;
pub mod serde_impl;
pub mod witness;

pub use error::AccError;

macro_rules! define_backend {
    ($name: ident, $curve: ty) => {
        pub mod $name {
            pub type Curve = $curve;
            pub type SecretKey = super::keys::SecretKey<Curve>;
            pub type PublicKey = super::keys::PublicKey<Curve>;
            pub type KeyPair = super::keys::KeyPair<Curve>;
            pub type Accumulator = super::acc_value::Accumulator<Curve>;
            pub type Authority = super::authority::Authority<Curve>;
            pub type Element = super::element::Element<Curve>;
            pub type ElementEncoder = super::element::ElementEncoder<Curve>;
            pub type MembershipWitness = super::witness::MembershipWitness<Curve>;
            pub type NonMembershipWitness = super::non_membership::NonMembershipWitness<Curve>;
            pub type ProofCommitment = super::proof::ProofCommitment<Curve>;
            pub type MembershipProof = super::proof::MembershipProof<Curve>;
            pub type NonMembershipProof = super::proof::NonMembershipProof<Curve>;
        }
    };
}

define_backend!(bn254, ark_bn254::Bn254);
define_backend!(bls12_381, ark_bls12_381::Bls12_381);

pub use bn254::*;
