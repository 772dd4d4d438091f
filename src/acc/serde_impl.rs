//! `#[serde(with = "...")]` adapters for ark types.
//!
//! Group and target-group values are written in their compressed canonical
//! encoding; scalars go through [`scalar`]. Both use hex strings for
//! human-readable formats and raw bytes otherwise. Decoding checks that points
//! lie in the prime-order subgroup.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use core::fmt;
use serde::{
    de::{Deserializer, Error as DeError, Visitor},
    ser::{Error as SerError, Serializer},
};

fn write_bytes<S: Serializer>(buf: &[u8], s: S) -> Result<S::Ok, S::Error> {
    if s.is_human_readable() {
        s.serialize_str(&hex::encode(buf))
    } else {
        s.serialize_bytes(buf)
    }
}

struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a hex string or a byte array")
    }

    fn visit_str<E: DeError>(self, value: &str) -> Result<Vec<u8>, E> {
        hex::decode(value).map_err(E::custom)
    }

    fn visit_bytes<E: DeError>(self, v: &[u8]) -> Result<Vec<u8>, E> {
        Ok(v.to_vec())
    }

    fn visit_byte_buf<E: DeError>(self, v: Vec<u8>) -> Result<Vec<u8>, E> {
        Ok(v)
    }
}

fn read_bytes<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
    if d.is_human_readable() {
        d.deserialize_str(BytesVisitor)
    } else {
        d.deserialize_byte_buf(BytesVisitor)
    }
}

pub fn serialize<S: Serializer, T: CanonicalSerialize>(t: &T, s: S) -> Result<S::Ok, S::Error> {
    let mut buf = Vec::<u8>::with_capacity(t.serialized_size());
    t.serialize(&mut buf).map_err(S::Error::custom)?;
    write_bytes(&buf, s)
}

pub fn deserialize<'de, D: Deserializer<'de>, T: CanonicalDeserialize>(
    d: D,
) -> Result<T, D::Error> {
    let buf = read_bytes(d)?;
    let mut reader = &buf[..];
    let t = T::deserialize(&mut reader).map_err(D::Error::custom)?;
    if !reader.is_empty() {
        return Err(D::Error::custom(format!(
            "{} trailing bytes",
            reader.len()
        )));
    }
    Ok(t)
}

/// Scalars as fixed-width big-endian integers, the byte order
/// [`hash_to_scalar`](crate::digest::hash_to_scalar) reads.
///
/// Decoding rejects anything but the canonical encoding of a value below r.
pub mod scalar {
    use super::{read_bytes, write_bytes};
    use ark_ff::{BigInteger, PrimeField};
    use serde::{
        de::{Deserializer, Error as DeError},
        ser::Serializer,
    };

    pub fn serialize<S: Serializer, F: PrimeField>(f: &F, s: S) -> Result<S::Ok, S::Error> {
        write_bytes(&f.into_repr().to_bytes_be(), s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>, F: PrimeField>(d: D) -> Result<F, D::Error> {
        let buf = read_bytes(d)?;
        let f = F::from_be_bytes_mod_order(&buf);
        if f.into_repr().to_bytes_be() != buf {
            return Err(D::Error::custom(
                "scalar is not a fixed-width big-endian integer below the group order",
            ));
        }
        Ok(f)
    }
}

#[cfg(test)]
mod tests {
    use ark_bn254::{Fq12, Fr, G1Affine, G2Affine};
    use ark_ec::AffineCurve;
    use ark_ff::{One, UniformRand};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "super")]
        p: G1Affine,
        #[serde(with = "super")]
        q: G2Affine,
        #[serde(with = "super::scalar")]
        s: Fr,
        #[serde(with = "super")]
        t: Fq12,
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Wrapped {
        #[serde(with = "super")]
        p: G1Affine,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Scalar {
        #[serde(with = "super::scalar")]
        s: Fr,
    }

    #[test]
    fn test_serde() {
        let mut rng = rand::thread_rng();
        let sample = Sample {
            p: G1Affine::prime_subgroup_generator(),
            q: G2Affine::prime_subgroup_generator(),
            s: Fr::rand(&mut rng),
            t: Fq12::one(),
        };

        let json = serde_json::to_string_pretty(&sample).unwrap();
        let bin = bincode::serialize(&sample).unwrap();

        assert_eq!(serde_json::from_str::<Sample>(&json).unwrap(), sample);
        assert_eq!(bincode::deserialize::<Sample>(&bin[..]).unwrap(), sample);
    }

    #[test]
    fn test_reject_garbage() {
        assert!(serde_json::from_str::<Wrapped>(r#"{"p": "zz"}"#).is_err());
        assert!(serde_json::from_str::<Wrapped>(r#"{"p": "0102"}"#).is_err());

        let json = serde_json::to_string(&Wrapped {
            p: G1Affine::prime_subgroup_generator(),
        })
        .unwrap();
        let padded = json.replace("\"}", "00\"}");
        assert!(serde_json::from_str::<Wrapped>(&padded).is_err());
    }

    #[test]
    fn test_scalar_big_endian() {
        let one = Scalar { s: Fr::one() };
        let json = serde_json::to_string(&one).unwrap();
        let expect = format!(r#"{{"s":"{}01"}}"#, "00".repeat(31));
        assert_eq!(json, expect);
        assert_eq!(serde_json::from_str::<Scalar>(&json).unwrap(), one);

        let s = Scalar {
            s: Fr::from(0x0102u64),
        };
        let bin = bincode::serialize(&s).unwrap();
        assert_eq!(&bin[bin.len() - 2..], &[0x01, 0x02]);
        assert_eq!(bincode::deserialize::<Scalar>(&bin[..]).unwrap(), s);
    }

    #[test]
    fn test_scalar_reject_non_canonical() {
        // at or above the modulus
        let json = format!(r#"{{"s":"{}"}}"#, "ff".repeat(32));
        assert!(serde_json::from_str::<Scalar>(&json).is_err());
        // wrong width
        assert!(serde_json::from_str::<Scalar>(r#"{"s":"01"}"#).is_err());
        let json = format!(r#"{{"s":"{}01"}}"#, "00".repeat(32));
        assert!(serde_json::from_str::<Scalar>(&json).is_err());
    }
}
