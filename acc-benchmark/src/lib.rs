use ark_ec::PairingEngine;
use criterion::{black_box, measurement::Measurement, BenchmarkGroup, BenchmarkId};
use pairing_acc::acc::{
    acc_value::Accumulator,
    element::{Element, ElementEncoder},
    keys::{PublicKey, SecretKey},
    non_membership::NonMembershipWitness,
    witness::MembershipWitness,
};
use rand::{prelude::*, rngs::StdRng};

pub fn generate_messages(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("element_{}", i)).collect()
}

pub struct Fixture<E: PairingEngine> {
    pub curve_name: &'static str,
    pub sk: SecretKey<E>,
    pub pk: PublicKey<E>,
    pub acc: Accumulator<E>,
    pub elem: Element<E>,
    pub non_elem: Element<E>,
    pub witness: MembershipWitness<E>,
    pub nm_witness: NonMembershipWitness<E>,
}

impl<E: PairingEngine> Fixture<E> {
    pub fn new(curve_name: &'static str) -> Self {
        let mut rng = StdRng::seed_from_u64(123_456_789u64);
        let sk = SecretKey::<E>::rand(&mut rng).unwrap();
        let pk = PublicKey::<E>::gen_key(&sk);
        let elem = Element::from_message("test_element");
        let non_elem = Element::from_message("non_member_element");
        let mut acc = Accumulator::new();
        acc.add(&sk, &elem);
        let witness = MembershipWitness::generate(&acc, &sk, &elem).unwrap();
        let nm_witness = NonMembershipWitness::generate(&acc, &sk, &non_elem, &mut rng).unwrap();
        Self {
            curve_name,
            sk,
            pk,
            acc,
            elem,
            non_elem,
            witness,
            nm_witness,
        }
    }

    pub fn bench_encode<'a, M: Measurement>(
        &self,
        group: &mut BenchmarkGroup<'a, M>,
        messages: &[String],
    ) {
        group.bench_with_input(
            BenchmarkId::new(self.curve_name, messages.len()),
            messages,
            |b, messages| {
                b.iter(|| {
                    black_box(
                        messages
                            .iter()
                            .map(|m| Element::<E>::from_message(m))
                            .collect::<Vec<_>>(),
                    )
                })
            },
        );
    }

    pub fn bench_encode_batch<'a, M: Measurement>(
        &self,
        group: &mut BenchmarkGroup<'a, M>,
        messages: &[String],
    ) {
        let encoder = ElementEncoder::<E>::new(messages.len());
        group.bench_with_input(
            BenchmarkId::new(self.curve_name, messages.len()),
            messages,
            |b, messages| b.iter(|| black_box(encoder.encode_batch(messages))),
        );
    }

    pub fn bench_add<'a, M: Measurement>(&self, group: &mut BenchmarkGroup<'a, M>) {
        group.bench_function(self.curve_name, |b| {
            b.iter(|| {
                let mut acc = self.acc;
                acc.add(&self.sk, &self.non_elem);
                black_box(acc)
            })
        });
    }

    pub fn bench_gen_witness<'a, M: Measurement>(&self, group: &mut BenchmarkGroup<'a, M>) {
        group.bench_function(self.curve_name, |b| {
            b.iter(|| black_box(MembershipWitness::generate(&self.acc, &self.sk, &self.elem)))
        });
    }

    pub fn bench_verify_witness<'a, M: Measurement>(&self, group: &mut BenchmarkGroup<'a, M>) {
        group.bench_function(self.curve_name, |b| {
            b.iter(|| black_box(self.witness.verify(&self.acc, &self.elem, &self.pk)))
        });
    }

    pub fn bench_gen_nm_witness<'a, M: Measurement>(&self, group: &mut BenchmarkGroup<'a, M>) {
        group.bench_function(self.curve_name, |b| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| {
                black_box(NonMembershipWitness::generate(
                    &self.acc,
                    &self.sk,
                    &self.non_elem,
                    &mut rng,
                ))
            })
        });
    }

    pub fn bench_verify_nm_witness<'a, M: Measurement>(&self, group: &mut BenchmarkGroup<'a, M>) {
        group.bench_function(self.curve_name, |b| {
            b.iter(|| black_box(self.nm_witness.verify(&self.acc, &self.non_elem, &self.pk)))
        });
    }

    pub fn bench_gen_proof<'a, M: Measurement>(&self, group: &mut BenchmarkGroup<'a, M>) {
        group.bench_function(self.curve_name, |b| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| {
                black_box(
                    self.witness
                        .zk_proof(&self.acc, &self.elem, &self.pk, &mut rng),
                )
            })
        });
    }

    pub fn bench_verify_proof<'a, M: Measurement>(&self, group: &mut BenchmarkGroup<'a, M>) {
        let mut rng = StdRng::seed_from_u64(42);
        let proof = self
            .witness
            .zk_proof(&self.acc, &self.elem, &self.pk, &mut rng)
            .unwrap();
        group.bench_function(self.curve_name, |b| {
            b.iter(|| black_box(proof.verify(&self.acc, &self.elem, &self.pk)))
        });
    }

    pub fn bench_verify_nm_proof<'a, M: Measurement>(&self, group: &mut BenchmarkGroup<'a, M>) {
        let mut rng = StdRng::seed_from_u64(42);
        let proof = self
            .nm_witness
            .zk_proof(&self.acc, &self.non_elem, &self.pk, &mut rng)
            .unwrap();
        group.bench_function(self.curve_name, |b| {
            b.iter(|| black_box(proof.verify(&self.acc, &self.non_elem, &self.pk)))
        });
    }
}

#[macro_export]
macro_rules! prepare_fixtures {
    () => {
        $crate::prepare_fixtures!(F_BLS12_381, ark_bls12_381::Bls12_381);
        $crate::prepare_fixtures!(F_BN254, ark_bn254::Bn254);
    };

    ($name: ident, $curve: ty) => {
        static $name: once_cell::sync::Lazy<$crate::Fixture<$curve>> =
            once_cell::sync::Lazy::new(|| {
                let curve_name = stringify!($curve)
                    .split(':')
                    .next()
                    .unwrap()
                    .strip_prefix("ark_")
                    .unwrap();
                println!("prepare fixture for {}...", curve_name);
                let ret = $crate::Fixture::new(curve_name);
                println!("prepare fixture for {} done", curve_name);
                ret
            });
    };
}

#[macro_export]
macro_rules! iterate_fixtures {
    ($x: expr) => {
        $crate::iterate_fixtures!(F_BLS12_381, $x);
        $crate::iterate_fixtures!(F_BN254, $x);
    };

    ($name: ident, $x: expr) => {
        ($x)(once_cell::sync::Lazy::force(&$name))
    };
}
