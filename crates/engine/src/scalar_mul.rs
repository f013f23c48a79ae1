//! Single-point scalar multiplication.
use crate::constants::SCALAR_BITS;
use crate::curve::GroupConfig;
use crate::fr::{bit, Scalar};
use crate::point::Point;

/// Computes `scalar * point` with a Montgomery ladder.
///
/// The ladder walks all [`SCALAR_BITS`] bits, performing one addition and one
/// doubling per bit and selecting operands with arithmetic swaps, so the
/// sequence of group operations is the same for every scalar.
///
/// The ladder keeps `r1 - r0 == point`, which lies in the prime-order
/// subgroup, so every addition stays inside the domain where the complete
/// formulas hold.
pub fn scalar_mul<C: GroupConfig>(point: &Point<C>, scalar: &Scalar) -> Point<C> {
    let limbs = scalar.limbs();
    let mut r0 = Point::identity();
    let mut r1 = *point;

    for i in (0..SCALAR_BITS).rev() {
        let b = bit(&limbs, i);
        Point::conditional_swap(&mut r0, &mut r1, b);
        r1 = r0.sum(&r1);
        r0 = r0.double();
        Point::conditional_swap(&mut r0, &mut r1, b);
    }

    r0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{G1, G2};
    use ark_bls12_377::{Fr, G1Projective, G2Projective};
    use ark_ec::{CurveGroup, PrimeGroup};
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };
    use rstest::rstest;

    #[test]
    fn zero_and_one() {
        let g = G1::generator();
        assert!(scalar_mul(&g, &Scalar::zero()).is_identity());
        assert_eq!(scalar_mul(&g, &Scalar::one()), g);
        assert!(scalar_mul(&G1::identity(), &Scalar::from_u64(12345)).is_identity());
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(7)]
    #[case(64)]
    #[case(255)]
    fn recurrence_holds(#[case] k: u64) {
        let g = G2::generator();
        let previous = scalar_mul(&g, &Scalar::from_u64(k - 1));
        assert_eq!(scalar_mul(&g, &Scalar::from_u64(k)), previous + g);
    }

    #[test]
    fn order_minus_one_is_negation() {
        let g = G1::generator();
        let minus_one = Scalar::one().negate();
        assert_eq!(scalar_mul(&g, &minus_one), g.negate());
    }

    #[test]
    fn matches_arkworks() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..4 {
            let s = Fr::rand(&mut rng);
            let expected = (G1Projective::generator() * s).into_affine();
            assert_eq!(
                scalar_mul(&G1::generator(), &Scalar::from_fr(s)).to_ark(),
                expected
            );
            let expected = (G2Projective::generator() * s).into_affine();
            assert_eq!(
                scalar_mul(&G2::generator(), &Scalar::from_fr(s)).to_ark(),
                expected
            );
        }
    }
}
