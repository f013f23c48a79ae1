//! Optimal ate pairing and the multi-pairing product check.
use crate::error::{EngineError, EngineResult};
use crate::fr::Scalar;
use crate::point::{G1, G2};
use ark_bls12_377::{Bls12_377, Fq12, G1Affine, G2Affine};
use ark_ec::pairing::Pairing;
use ark_ff::{Field, One};
use std::vec::Vec;

/// Element of the target group GT, written multiplicatively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Gt(Fq12);

impl Gt {
    /// Identity of GT.
    pub fn identity() -> Self {
        Self(Fq12::one())
    }

    /// Returns `true` for the identity.
    pub fn is_identity(&self) -> bool {
        self.0.is_one()
    }

    /// Group operation of GT.
    pub fn product(&self, other: &Self) -> Self {
        Self(self.0 * other.0)
    }

    /// `self^scalar`.
    pub fn pow(&self, scalar: &Scalar) -> Self {
        Self(self.0.pow(scalar.limbs()))
    }
}

impl Default for Gt {
    fn default() -> Self {
        Self::identity()
    }
}

/// Computes `e(p, q)`.
pub fn pairing(p: &G1, q: &G2) -> Gt {
    Gt(Bls12_377::pairing(p.to_ark(), q.to_ark()).0)
}

/// Checks `prod e(l_i) == prod e(r_j)`.
///
/// The right-hand side is moved across by negating its G1 operands, so the
/// whole check is one multi-Miller loop and a single final exponentiation.
/// Empty products are the identity.
pub fn multi_pairing_product_equals(left: &[(G1, G2)], right: &[(G1, G2)]) -> EngineResult<bool> {
    let (g1, g2): (Vec<G1Affine>, Vec<G2Affine>) = left
        .iter()
        .map(|(p, q)| (p.to_ark(), q.to_ark()))
        .chain(right.iter().map(|(p, q)| (p.negate().to_ark(), q.to_ark())))
        .unzip();

    if g1.is_empty() {
        return Ok(true);
    }

    let miller = Bls12_377::multi_miller_loop(g1, g2);
    let result = Bls12_377::final_exponentiation(miller)
        .ok_or(EngineError::InternalFailure("final exponentiation"))?;
    Ok(result.0.is_one())
}
