//! Curve constants for the two pairing groups.
//!
//! Both groups live on short Weierstrass curves `y^2 = x^3 + b` with `a = 0`:
//! G1 over the base field Fq with `b = 1`, G2 over the quadratic extension Fq2
//! with the twisted coefficient `b'`. Everything else in the group engine is
//! generic over [`GroupConfig`].
use crate::codec::{read_fq, read_fq2, write_fq, write_fq2};
use crate::constants::{FQ2_LENGTH, FQ_LENGTH, G1_LENGTH, G2_LENGTH};
use crate::context::{Context, GroupTables};
use crate::error::EngineResult;
use ark_bls12_377::{g1, g2, Fq, Fq2, Fr};
use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ff::Field;
use core::fmt::Debug;

/// Parameters of one pairing group.
pub trait GroupConfig: 'static + Copy + Debug + Default + Eq + Send + Sync {
    /// Field hosting the point coordinates.
    type Base: Field;
    /// Matching arkworks curve parameters.
    type Params: SWCurveConfig<BaseField = Self::Base, ScalarField = Fr>;

    /// Name used in logs.
    const NAME: &'static str;
    /// Width of one encoded coordinate.
    const COORDINATE_LENGTH: usize;
    /// Width of an encoded point, flag byte included.
    const ENCODED_LENGTH: usize;

    /// Curve coefficient `b`.
    #[inline]
    fn coeff_b() -> Self::Base {
        Self::Params::COEFF_B
    }

    /// Multiplies by `3b`, the constant the complete addition formulas use.
    #[inline]
    fn mul_by_3b(v: &Self::Base) -> Self::Base {
        let t = *v * Self::Params::COEFF_B;
        t + t + t
    }

    /// Fixed generator in affine form.
    fn generator() -> Affine<Self::Params> {
        Self::Params::GENERATOR
    }

    /// Decodes one coordinate, rejecting values that are not reduced.
    fn read_coordinate(bytes: &[u8]) -> EngineResult<Self::Base>;

    /// Encodes one coordinate into `out`, which is exactly
    /// [`GroupConfig::COORDINATE_LENGTH`] bytes long.
    fn write_coordinate(v: &Self::Base, out: &mut [u8]);

    /// Selects this group's tables from the context.
    fn tables(ctx: &Context) -> &GroupTables<Self>;
}

/// G1: the curve `y^2 = x^3 + 1` over Fq.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct G1Config;

impl GroupConfig for G1Config {
    type Base = Fq;
    type Params = g1::Config;

    const NAME: &'static str = "G1";
    const COORDINATE_LENGTH: usize = FQ_LENGTH;
    const ENCODED_LENGTH: usize = G1_LENGTH;

    #[inline]
    fn mul_by_3b(v: &Fq) -> Fq {
        // b = 1
        *v + v + v
    }

    fn read_coordinate(bytes: &[u8]) -> EngineResult<Fq> {
        read_fq(bytes)
    }

    fn write_coordinate(v: &Fq, out: &mut [u8]) {
        write_fq(v, out)
    }

    fn tables(ctx: &Context) -> &GroupTables<Self> {
        ctx.g1_tables()
    }
}

/// G2: the twist `y^2 = x^3 + b'` over Fq2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct G2Config;

impl GroupConfig for G2Config {
    type Base = Fq2;
    type Params = g2::Config;

    const NAME: &'static str = "G2";
    const COORDINATE_LENGTH: usize = FQ2_LENGTH;
    const ENCODED_LENGTH: usize = G2_LENGTH;

    fn read_coordinate(bytes: &[u8]) -> EngineResult<Fq2> {
        read_fq2(bytes)
    }

    fn write_coordinate(v: &Fq2, out: &mut [u8]) {
        write_fq2(v, out)
    }

    fn tables(ctx: &Context) -> &GroupTables<Self> {
        ctx.g2_tables()
    }
}
