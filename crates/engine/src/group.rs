//! Group engine: the operations exposed for G1 and G2.
use crate::context::{Context, GroupTables};
use crate::curve::GroupConfig;
use crate::fr::Scalar;
use crate::msm;
use crate::point::Point;
use crate::scalar_mul;

/// Operations of one group, bound to a [`Context`].
#[derive(Clone, Copy, Debug)]
pub struct GroupEngine<'ctx, C: GroupConfig> {
    ctx: &'ctx Context,
    tables: &'ctx GroupTables<C>,
}

impl<'ctx, C: GroupConfig> GroupEngine<'ctx, C> {
    pub(crate) fn new(ctx: &'ctx Context) -> Self {
        Self {
            ctx,
            tables: C::tables(ctx),
        }
    }

    /// The generator.
    pub fn one(&self) -> Point<C> {
        *self.tables.generator()
    }

    /// Canonical encoding of the generator.
    pub fn encoded_one(&self) -> &'ctx [u8] {
        self.tables.encoded_generator()
    }

    /// The identity.
    pub fn zero(&self) -> Point<C> {
        Point::identity()
    }

    /// Complete addition.
    pub fn sum(&self, a: &Point<C>, b: &Point<C>) -> Point<C> {
        a.sum(b)
    }

    /// Additive inverse.
    pub fn neg(&self, a: &Point<C>) -> Point<C> {
        a.negate()
    }

    /// `scalar * point`, constant-time in the scalar.
    pub fn scalar_mul(&self, point: &Point<C>, scalar: &Scalar) -> Point<C> {
        scalar_mul::scalar_mul(point, scalar)
    }

    /// `sum(scalar_i * point_i)` with the context's window width for the
    /// batch size.
    pub fn multi_scalar_mul(&self, pairs: &[(Point<C>, Scalar)]) -> Point<C> {
        msm::multi_scalar_mul(pairs, self.ctx.msm_window(pairs.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_point;
    use crate::constants::FLAG_INFINITY;
    use crate::curve::{G1Config, G2Config};
    use rstest::rstest;
    use std::vec::Vec;

    #[test]
    fn generator_and_identity() {
        let ctx = Context::new().unwrap();
        let g1 = ctx.g1();
        assert_eq!(g1.one(), Point::generator());
        assert!(g1.zero().is_identity());
        assert_eq!(g1.sum(&g1.one(), &g1.zero()), g1.one());
        assert!(g1.sum(&g1.one(), &g1.neg(&g1.one())).is_identity());
        assert_eq!(g1.encoded_one().len(), G1Config::ENCODED_LENGTH);
        assert_eq!(ctx.g2().encoded_one().len(), G2Config::ENCODED_LENGTH);
    }

    #[test]
    fn identity_results_use_the_infinity_encoding() {
        let ctx = Context::new().unwrap();
        let g1 = ctx.g1();
        let mut expected = [0u8; G1Config::ENCODED_LENGTH];
        expected[0] = FLAG_INFINITY;

        let p = g1.scalar_mul(&g1.one(), &Scalar::from_u64(7));
        assert_eq!(encode_point(&g1.sum(&p, &g1.neg(&p))), expected);
        assert_eq!(encode_point(&g1.neg(&g1.zero())), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(40)]
    fn msm_agrees_with_scalar_mul(#[case] n: u64) {
        let ctx = Context::new().unwrap();
        let g2 = ctx.g2();
        let pairs: Vec<_> = (0..n)
            .map(|i| (g2.scalar_mul(&g2.one(), &Scalar::from_u64(i + 1)), Scalar::from_u64(3)))
            .collect();
        // 3 * (1 + 2 + ... + n) = 3n(n + 1)/2
        let expected = g2.scalar_mul(&g2.one(), &Scalar::from_u64(3 * n * (n + 1) / 2));
        assert_eq!(g2.multi_scalar_mul(&pairs), expected);
    }
}
