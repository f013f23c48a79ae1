//! Canonical fixed-width encodings.
//!
//! * Fr: 32 bytes, big-endian integer below `r`.
//! * Fq: 48 bytes, big-endian integer below `q`. Fq2 is `c0 || c1`.
//! * Points: one flag byte followed by the affine `x` and `y` coordinates.
//!   Flag `0x00` marks a finite point, `0x01` the point at infinity, whose
//!   coordinate bytes must all be zero. Any other flag is rejected, so every
//!   element has exactly one accepted encoding.
//! * Batches: a big-endian `u32` count followed by that many fixed-stride
//!   entries.
use crate::constants::{
    COUNT_LENGTH, FLAG_FINITE, FLAG_INFINITY, FLAG_LENGTH, FQ2_LENGTH, FQ_LENGTH, G1_LENGTH,
    G2_LENGTH, PAIRING_ENTRY_LENGTH, SCALAR_LENGTH,
};
use crate::curve::GroupConfig;
use crate::error::{EngineError, EngineResult};
use crate::fr::Scalar;
use crate::point::{Point, G1, G2};
use ark_bls12_377::{Fq, Fq2, Fr};
use ark_ec::short_weierstrass::Affine;
use ark_ff::{BigInt, BigInteger, Field, PrimeField};
use std::vec::Vec;

/// Kind of element a buffer is expected to hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Scalar field element.
    Fr,
    /// Point of G1.
    G1,
    /// Point of G2.
    G2,
}

impl Kind {
    /// Fixed width of the encoding.
    pub const fn length(self) -> usize {
        match self {
            Self::Fr => SCALAR_LENGTH,
            Self::G1 => G1_LENGTH,
            Self::G2 => G2_LENGTH,
        }
    }
}

/// A decoded element of any kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    /// Scalar field element.
    Fr(Scalar),
    /// Point of G1.
    G1(G1),
    /// Point of G2.
    G2(G2),
}

impl Element {
    /// Kind of this element.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Fr(_) => Kind::Fr,
            Self::G1(_) => Kind::G1,
            Self::G2(_) => Kind::G2,
        }
    }
}

/// Decodes `bytes` as an element of `kind`.
pub fn decode(bytes: &[u8], kind: Kind) -> EngineResult<Element> {
    match kind {
        Kind::Fr => decode_scalar(bytes).map(Element::Fr),
        Kind::G1 => decode_point(bytes).map(Element::G1),
        Kind::G2 => decode_point(bytes).map(Element::G2),
    }
}

/// Encodes an element. Inverse of [`decode`].
pub fn encode(element: &Element) -> Vec<u8> {
    match element {
        Element::Fr(s) => encode_scalar(s).to_vec(),
        Element::G1(p) => encode_point(p),
        Element::G2(p) => encode_point(p),
    }
}

#[inline]
fn check_length(bytes: &[u8], expected: usize) -> EngineResult<()> {
    if bytes.len() != expected {
        return Err(EngineError::invalid_length(expected, bytes.len()));
    }
    Ok(())
}

/// Reads `8 * N` big-endian bytes into little-endian limbs.
fn bigint_from_be<const N: usize>(bytes: &[u8]) -> BigInt<N> {
    let mut limbs = [0u64; N];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.rchunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_be_bytes(word);
    }
    BigInt(limbs)
}

/// Decodes a scalar, rejecting values `>= r`.
pub fn decode_scalar(bytes: &[u8]) -> EngineResult<Scalar> {
    check_length(bytes, SCALAR_LENGTH)?;
    Fr::from_bigint(bigint_from_be::<4>(bytes))
        .map(Scalar::from_fr)
        .ok_or(EngineError::OutOfRange)
}

/// Encodes a scalar as 32 big-endian bytes.
pub fn encode_scalar(scalar: &Scalar) -> [u8; SCALAR_LENGTH] {
    let mut out = [0u8; SCALAR_LENGTH];
    out.copy_from_slice(&scalar.into_fr().into_bigint().to_bytes_be());
    out
}

/// Decodes a base field element, rejecting values `>= q`.
pub fn read_fq(bytes: &[u8]) -> EngineResult<Fq> {
    check_length(bytes, FQ_LENGTH)?;
    Fq::from_bigint(bigint_from_be::<6>(bytes)).ok_or(EngineError::OutOfRange)
}

/// Encodes a base field element into a 48-byte slice.
pub fn write_fq(v: &Fq, out: &mut [u8]) {
    out.copy_from_slice(&v.into_bigint().to_bytes_be());
}

/// Decodes an Fq2 element laid out as `c0 || c1`.
pub fn read_fq2(bytes: &[u8]) -> EngineResult<Fq2> {
    check_length(bytes, FQ2_LENGTH)?;
    let c0 = read_fq(&bytes[..FQ_LENGTH])?;
    let c1 = read_fq(&bytes[FQ_LENGTH..])?;
    Ok(Fq2::new(c0, c1))
}

/// Encodes an Fq2 element into a 96-byte slice as `c0 || c1`.
pub fn write_fq2(v: &Fq2, out: &mut [u8]) {
    let (c0, c1) = out.split_at_mut(FQ_LENGTH);
    write_fq(&v.c0, c0);
    write_fq(&v.c1, c1);
}

/// Decodes a point and checks curve and subgroup membership.
pub fn decode_point<C: GroupConfig>(bytes: &[u8]) -> EngineResult<Point<C>> {
    check_length(bytes, C::ENCODED_LENGTH)?;
    let (flag, coordinates) = bytes.split_at(FLAG_LENGTH);
    match flag[0] {
        FLAG_INFINITY => {
            if coordinates.iter().any(|&b| b != 0) {
                return Err(EngineError::InvalidEncoding);
            }
            Ok(Point::identity())
        }
        FLAG_FINITE => {
            let (x, y) = coordinates.split_at(C::COORDINATE_LENGTH);
            let x = C::read_coordinate(x)?;
            let y = C::read_coordinate(y)?;

            if y.square() != x.square() * x + C::coeff_b() {
                return Err(EngineError::NotOnCurve);
            }

            // NB: every engine relies on this check. The complete addition
            // formulas are only complete on the odd-order subgroup.
            if !Affine::<C::Params>::new_unchecked(x, y).is_in_correct_subgroup_assuming_on_curve()
            {
                return Err(EngineError::NotInSubgroup);
            }

            Ok(Point::from_affine_unchecked(x, y))
        }
        _ => Err(EngineError::InvalidEncoding),
    }
}

/// Encodes a point into `out`, which must be exactly
/// [`GroupConfig::ENCODED_LENGTH`] bytes long.
pub fn encode_point_into<C: GroupConfig>(point: &Point<C>, out: &mut [u8]) {
    debug_assert_eq!(out.len(), C::ENCODED_LENGTH);
    out.fill(0);
    let (flag, coordinates) = out.split_at_mut(FLAG_LENGTH);
    match point.to_affine() {
        Some((x, y)) => {
            flag[0] = FLAG_FINITE;
            let (x_out, y_out) = coordinates.split_at_mut(C::COORDINATE_LENGTH);
            C::write_coordinate(&x, x_out);
            C::write_coordinate(&y, y_out);
        }
        None => flag[0] = FLAG_INFINITY,
    }
}

/// Encodes a point. Inverse of [`decode_point`].
pub fn encode_point<C: GroupConfig>(point: &Point<C>) -> Vec<u8> {
    let mut out = std::vec![0u8; C::ENCODED_LENGTH];
    encode_point_into(point, &mut out);
    out
}

/// Encodes a G1 point into its fixed-size array.
pub fn encode_g1(point: &G1) -> [u8; G1_LENGTH] {
    let mut out = [0u8; G1_LENGTH];
    encode_point_into(point, &mut out);
    out
}

/// Encodes a G2 point into its fixed-size array.
pub fn encode_g2(point: &G2) -> [u8; G2_LENGTH] {
    let mut out = [0u8; G2_LENGTH];
    encode_point_into(point, &mut out);
    out
}

/// Splits a count-prefixed batch into its entries.
fn batch_entries(bytes: &[u8], stride: usize) -> EngineResult<core::slice::ChunksExact<'_, u8>> {
    if bytes.len() < COUNT_LENGTH {
        return Err(EngineError::invalid_length(COUNT_LENGTH, bytes.len()));
    }
    let (count, entries) = bytes.split_at(COUNT_LENGTH);
    let count = u32::from_be_bytes([count[0], count[1], count[2], count[3]]) as usize;
    let expected = count
        .checked_mul(stride)
        .and_then(|len| len.checked_add(COUNT_LENGTH))
        .ok_or_else(|| EngineError::invalid_length(usize::MAX, bytes.len()))?;
    check_length(bytes, expected)?;
    Ok(entries.chunks_exact(stride))
}

/// Prefixes `count` to a batch.
fn batch_header(count: usize, stride: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(COUNT_LENGTH + count * stride);
    out.extend_from_slice(&(count as u32).to_be_bytes());
    out
}

/// Decodes a multi-scalar multiplication batch:
/// `count || count * (point || scalar)`.
///
/// Any invalid entry fails the whole batch.
pub fn decode_msm_input<C: GroupConfig>(bytes: &[u8]) -> EngineResult<Vec<(Point<C>, Scalar)>> {
    batch_entries(bytes, C::ENCODED_LENGTH + SCALAR_LENGTH)?
        .map(|entry| {
            let (point, scalar) = entry.split_at(C::ENCODED_LENGTH);
            Ok((decode_point(point)?, decode_scalar(scalar)?))
        })
        .collect()
}

/// Encodes a multi-scalar multiplication batch. Inverse of [`decode_msm_input`].
pub fn encode_msm_input<C: GroupConfig>(pairs: &[(Point<C>, Scalar)]) -> Vec<u8> {
    let stride = C::ENCODED_LENGTH + SCALAR_LENGTH;
    let mut out = batch_header(pairs.len(), stride);
    for (point, scalar) in pairs {
        out.extend_from_slice(&encode_point(point));
        out.extend_from_slice(&encode_scalar(scalar));
    }
    out
}

/// Decodes a list of pairing operands: `count || count * (G1 || G2)`.
pub fn decode_pairing_input(bytes: &[u8]) -> EngineResult<Vec<(G1, G2)>> {
    batch_entries(bytes, PAIRING_ENTRY_LENGTH)?
        .map(|entry| {
            let (p, q) = entry.split_at(G1_LENGTH);
            Ok((decode_point(p)?, decode_point(q)?))
        })
        .collect()
}

/// Encodes a list of pairing operands. Inverse of [`decode_pairing_input`].
pub fn encode_pairing_input(pairs: &[(G1, G2)]) -> Vec<u8> {
    let mut out = batch_header(pairs.len(), PAIRING_ENTRY_LENGTH);
    for (p, q) in pairs {
        out.extend_from_slice(&encode_g1(p));
        out.extend_from_slice(&encode_g2(q));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{G1Config, G2Config};
    use ark_bls12_377::{G1Projective, G2Projective};
    use ark_ec::CurveGroup;
    use ark_ff::{One, Zero};
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };
    use rstest::rstest;

    fn fr_modulus() -> [u8; 32] {
        hex::decode("12ab655e9a2ca55660b44d1e5c37b00159aa76fed00000010a11800000000001")
            .unwrap()
            .try_into()
            .unwrap()
    }

    #[test]
    fn scalar_round_trip() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..16 {
            let s = Scalar::from_fr(Fr::rand(&mut rng));
            assert_eq!(decode_scalar(&encode_scalar(&s)), Ok(s));
        }
        assert_eq!(encode_scalar(&Scalar::one())[31], 1);
        assert_eq!(encode_scalar(&Scalar::zero()), [0u8; 32]);
    }

    #[test]
    fn scalar_modulus_is_rejected() {
        assert_eq!(decode_scalar(&fr_modulus()), Err(EngineError::OutOfRange));
        assert_eq!(decode_scalar(&[0xff; 32]), Err(EngineError::OutOfRange));

        let mut r_minus_one = fr_modulus();
        r_minus_one[31] -= 1;
        let s = decode_scalar(&r_minus_one).unwrap();
        assert!(s.sum(&Scalar::one()).is_zero());
    }

    #[rstest]
    #[case::fr(Kind::Fr, 31)]
    #[case::fr_long(Kind::Fr, 33)]
    #[case::g1_short(Kind::G1, 96)]
    #[case::g1_long(Kind::G1, 98)]
    #[case::g2_short(Kind::G2, 192)]
    #[case::g2_empty(Kind::G2, 0)]
    fn wrong_length_is_rejected(#[case] kind: Kind, #[case] len: usize) {
        let bytes = std::vec![0u8; len];
        assert_eq!(
            decode(&bytes, kind),
            Err(EngineError::invalid_length(kind.length(), len))
        );
    }

    #[test]
    fn point_round_trip() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..4 {
            let p = G1::from_ark(&G1Projective::rand(&mut rng).into_affine());
            assert_eq!(decode_point::<G1Config>(&encode_g1(&p)), Ok(p));
            let q = G2::from_ark(&G2Projective::rand(&mut rng).into_affine());
            assert_eq!(decode_point::<G2Config>(&encode_g2(&q)), Ok(q));
        }
    }

    #[test]
    fn identity_has_single_encoding() {
        let encoded = encode_g1(&G1::identity());
        assert_eq!(encoded[0], FLAG_INFINITY);
        assert!(encoded[1..].iter().all(|&b| b == 0));
        assert_eq!(decode_point::<G1Config>(&encoded), Ok(G1::identity()));

        // Any projective representative encodes identically.
        let doubled = G1::identity().double();
        assert_eq!(encode_g1(&doubled), encoded);

        let mut dirty = encoded;
        dirty[G1_LENGTH - 1] = 1;
        assert_eq!(
            decode_point::<G1Config>(&dirty),
            Err(EngineError::InvalidEncoding)
        );

        let encoded = encode_g2(&G2::identity());
        assert_eq!(decode_point::<G2Config>(&encoded), Ok(G2::identity()));
    }

    #[test]
    fn generator_encoding_matches_arkworks() {
        let encoded = encode_g1(&G1::generator());
        let g = G1Config::generator();
        assert_eq!(encoded[0], FLAG_FINITE);
        assert_eq!(&encoded[1..49], g.x.into_bigint().to_bytes_be().as_slice());
        assert_eq!(&encoded[49..], g.y.into_bigint().to_bytes_be().as_slice());

        let encoded = encode_g2(&G2::generator());
        let g = G2Config::generator();
        assert_eq!(&encoded[1..49], g.x.c0.into_bigint().to_bytes_be().as_slice());
        assert_eq!(&encoded[49..97], g.x.c1.into_bigint().to_bytes_be().as_slice());
    }

    #[rstest]
    #[case(0x02)]
    #[case(0x80)]
    #[case(0xff)]
    fn unknown_flag_is_rejected(#[case] flag: u8) {
        let mut encoded = encode_g1(&G1::generator());
        encoded[0] = flag;
        assert_eq!(
            decode_point::<G1Config>(&encoded),
            Err(EngineError::InvalidEncoding)
        );
    }

    #[test]
    fn coordinate_above_modulus_is_rejected() {
        let mut encoded = encode_g1(&G1::generator());
        encoded[1..49].fill(0xff);
        assert_eq!(
            decode_point::<G1Config>(&encoded),
            Err(EngineError::OutOfRange)
        );

        let mut encoded = encode_g2(&G2::generator());
        encoded[145..193].fill(0xff);
        assert_eq!(
            decode_point::<G2Config>(&encoded),
            Err(EngineError::OutOfRange)
        );
    }

    #[test]
    fn off_curve_point_is_rejected() {
        let g = G1Config::generator();
        let mut encoded = [0u8; G1_LENGTH];
        write_fq(&g.x, &mut encoded[1..49]);
        write_fq(&(g.y + Fq::one()), &mut encoded[49..]);
        assert_eq!(
            decode_point::<G1Config>(&encoded),
            Err(EngineError::NotOnCurve)
        );

        let g = G2Config::generator();
        let mut encoded = [0u8; G2_LENGTH];
        write_fq2(&g.x, &mut encoded[1..97]);
        write_fq2(&(g.y + Fq2::one()), &mut encoded[97..]);
        assert_eq!(
            decode_point::<G2Config>(&encoded),
            Err(EngineError::NotOnCurve)
        );
    }

    #[test]
    fn g1_point_outside_subgroup_is_rejected() {
        // (0, 1) lies on y^2 = x^3 + 1 and has order 3.
        let mut encoded = [0u8; G1_LENGTH];
        write_fq(&Fq::zero(), &mut encoded[1..49]);
        write_fq(&Fq::one(), &mut encoded[49..]);
        assert_eq!(
            decode_point::<G1Config>(&encoded),
            Err(EngineError::NotInSubgroup)
        );
    }

    #[test]
    fn g1_point_of_order_two_is_rejected() {
        // (-1, 0) satisfies the curve equation and doubles to the identity.
        let mut encoded = [0u8; G1_LENGTH];
        write_fq(&-Fq::one(), &mut encoded[1..49]);
        assert_eq!(
            decode_point::<G1Config>(&encoded),
            Err(EngineError::NotInSubgroup)
        );
    }

    #[test]
    fn g2_point_outside_subgroup_is_rejected() {
        // The first x with a square right-hand side gives a point on the
        // twist; the cofactor makes it land outside the subgroup.
        let b = G2Config::coeff_b();
        let (x, y) = (1u64..)
            .map(Fq2::from)
            .find_map(|x| (x.square() * x + b).sqrt().map(|y| (x, y)))
            .unwrap();
        let mut encoded = [0u8; G2_LENGTH];
        write_fq2(&x, &mut encoded[1..97]);
        write_fq2(&y, &mut encoded[97..]);
        assert_eq!(
            decode_point::<G2Config>(&encoded),
            Err(EngineError::NotInSubgroup)
        );
    }

    #[test]
    fn msm_batch_round_trip() {
        let pairs = std::vec![
            (G1::generator(), Scalar::from_u64(3)),
            (G1::identity(), Scalar::zero()),
        ];
        let encoded = encode_msm_input(&pairs);
        assert_eq!(encoded.len(), 4 + 2 * (G1_LENGTH + SCALAR_LENGTH));
        assert_eq!(&encoded[..4], &[0, 0, 0, 2]);
        assert_eq!(decode_msm_input::<G1Config>(&encoded), Ok(pairs));
    }

    #[test]
    fn empty_batch_decodes() {
        assert_eq!(decode_msm_input::<G2Config>(&[0, 0, 0, 0]), Ok(Vec::new()));
        assert_eq!(decode_pairing_input(&[0, 0, 0, 0]), Ok(Vec::new()));
    }

    #[test]
    fn batch_with_wrong_count_is_rejected() {
        let mut encoded = encode_pairing_input(&[(G1::generator(), G2::generator())]);
        assert_eq!(encoded.len(), 4 + PAIRING_ENTRY_LENGTH);
        encoded[3] = 2;
        assert_eq!(
            decode_pairing_input(&encoded),
            Err(EngineError::invalid_length(
                4 + 2 * PAIRING_ENTRY_LENGTH,
                4 + PAIRING_ENTRY_LENGTH
            ))
        );
        assert_eq!(
            decode_pairing_input(&[0, 0]),
            Err(EngineError::invalid_length(4, 2))
        );
    }

    #[test]
    fn one_bad_entry_fails_the_batch() {
        let mut encoded = encode_msm_input(&[
            (G1::generator(), Scalar::one()),
            (G1::generator(), Scalar::one()),
        ]);
        let last = encoded.len() - SCALAR_LENGTH;
        encoded[last..].copy_from_slice(&fr_modulus());
        assert_eq!(
            decode_msm_input::<G1Config>(&encoded),
            Err(EngineError::OutOfRange)
        );
    }
}
