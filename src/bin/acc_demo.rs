#[macro_use]
extern crate tracing;

use anyhow::{bail, ensure, Context, Result};
use ark_ec::PairingEngine;
use ark_ff::One;
use derive_more::Display;
use pairing_acc::{
    acc::{authority::Authority, element::Element, proof::MembershipProof},
    utils::{init_tracing_subscriber, timed, Time},
};
use serde::Serialize;
use serde_json::json;
use std::{fs, path::PathBuf, str::FromStr};
use structopt::StructOpt;

#[derive(Debug, Copy, Clone, Display)]
enum CurveKind {
    #[display(fmt = "bn254")]
    Bn254,
    #[display(fmt = "bls12-381")]
    Bls12_381,
}

impl FromStr for CurveKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bn254" => Ok(Self::Bn254),
            "bls12-381" | "bls12_381" => Ok(Self::Bls12_381),
            _ => bail!("unknown curve {}, expected bn254 or bls12-381", s),
        }
    }
}

#[derive(StructOpt, Debug)]
struct Opt {
    /// pairing curve, bn254 or bls12-381
    #[structopt(short, long, default_value = "bn254")]
    curve: CurveKind,

    /// message added to the accumulator
    #[structopt(short, long, default_value = "test_element")]
    member: String,

    /// message kept out of the accumulator
    #[structopt(short, long, default_value = "non_member_element")]
    non_member: String,

    /// report path, should be a file; stdout if omitted
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Step {
    name: &'static str,
    expected: bool,
    outcome: bool,
    time: Time,
}

#[derive(Debug, Default, Serialize)]
struct Report {
    steps: Vec<Step>,
}

impl Report {
    fn check(&mut self, name: &'static str, expected: bool, f: impl FnOnce() -> bool) {
        let (outcome, time) = timed(f);
        if outcome == expected {
            info!("✓ {}", name);
        } else {
            error!("✗ {}: expected {}, got {}", name, expected, outcome);
        }
        self.steps.push(Step {
            name,
            expected,
            outcome,
            time,
        });
    }

    fn failures(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome != s.expected).count()
    }
}

fn run<E: PairingEngine>(opt: &Opt) -> Result<Report> {
    let mut rng = rand::thread_rng();
    let mut report = Report::default();

    let authority = Authority::<E>::new(&mut rng).context("failed to set up the authority")?;
    let pk = *authority.public_key();
    let elem = Element::<E>::from_message(&opt.member);
    let non_elem = Element::<E>::from_message(&opt.non_member);
    ensure!(
        elem != non_elem,
        "member and non-member messages encode to the same element"
    );

    authority.add(&elem);
    let (acc, wit) = authority.witness(&elem)?;
    report.check("membership witness verifies", true, || {
        wit.verify(&acc, &elem, &pk)
    });

    let (_, bogus) = authority.witness(&non_elem)?;
    report.check("membership witness for a non-member", false, || {
        bogus.verify(&acc, &non_elem, &pk)
    });

    let (_, nm_wit) = authority.non_membership_witness(&non_elem, &mut rng)?;
    report.check("non-membership witness verifies", true, || {
        nm_wit.verify(&acc, &non_elem, &pk)
    });
    report.check("non-membership witness against a member", false, || {
        nm_wit.verify(&acc, &elem, &pk)
    });

    let nm_proof = nm_wit.zk_proof(&acc, &non_elem, &pk, &mut rng)?;
    report.check("non-membership proof verifies", true, || {
        nm_proof.verify(&acc, &non_elem, &pk)
    });

    let grown = authority.add(&non_elem);
    report.check("non-membership witness after adding the element", false, || {
        nm_wit.verify(&grown, &non_elem, &pk)
    });

    // W = g1 here, so the proof equation holds on the grown accumulator too
    let proof = wit.zk_proof(&grown, &elem, &pk, &mut rng)?;
    report.check(
        "membership proof from the single-element witness on the grown accumulator",
        true,
        || proof.verify(&grown, &elem, &pk),
    );

    let other_point = Element::<E>::from_scalar(E::Fr::from(43u64)).point();
    let forged = Element::from_parts(elem.scalar(), other_point);
    report.check("membership proof for a forged element", false, || {
        proof.verify(&grown, &forged, &pk)
    });

    let tampered =
        MembershipProof::from_parts(*proof.commitment(), proof.response() + E::Fr::one());
    report.check("membership proof with a tampered response", false, || {
        tampered.verify(&grown, &elem, &pk)
    });

    let wrong = Element::<E>::from_scalar(E::Fr::from(99u64));
    report.check("membership proof for a wrong element", false, || {
        proof.verify(&grown, &wrong, &pk)
    });

    Ok(report)
}

fn main() -> Result<()> {
    init_tracing_subscriber("acc_demo=info,pairing_acc=warn")?;
    let opts = Opt::from_args();
    info!("running accumulator scenario on {}", opts.curve);

    let report = match opts.curve {
        CurveKind::Bn254 => run::<ark_bn254::Bn254>(&opts)?,
        CurveKind::Bls12_381 => run::<ark_bls12_381::Bls12_381>(&opts)?,
    };
    let failures = report.failures();

    let res = json!({
        "curve": opts.curve.to_string(),
        "report": report,
    });
    let s = serde_json::to_string_pretty(&res)?;
    match &opts.output {
        Some(path) => fs::write(path, &s)
            .with_context(|| format!("failed to write report to {}", path.display()))?,
        None => println!("{}", s),
    }

    ensure!(failures == 0, "{} step(s) did not behave as expected", failures);
    Ok(())
}
