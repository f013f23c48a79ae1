//! Scalar field (Fr) of BLS12-377.
use ark_bls12_377::Fr;
use ark_ff::{One, PrimeField, Zero};
use core::fmt;

/// An element of the scalar field, always held in reduced form.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Scalar(Fr);

impl Scalar {
    /// Additive identity.
    pub fn zero() -> Self {
        Self(Fr::zero())
    }

    /// Multiplicative identity.
    pub fn one() -> Self {
        Self(Fr::one())
    }

    /// Small integer `k` as a scalar.
    pub fn from_u64(k: u64) -> Self {
        Self(Fr::from(k))
    }

    /// Returns `true` for the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `self + other mod r`.
    pub fn sum(&self, other: &Self) -> Self {
        Self(self.0 + other.0)
    }

    /// `-self mod r`.
    pub fn negate(&self) -> Self {
        Self(-self.0)
    }

    /// `self * other mod r`.
    pub fn product(&self, other: &Self) -> Self {
        Self(self.0 * other.0)
    }

    /// Canonical integer value as little-endian 64-bit limbs.
    pub fn limbs(&self) -> [u64; 4] {
        self.0.into_bigint().0
    }

    /// Wraps an arkworks field element.
    pub fn from_fr(fr: Fr) -> Self {
        Self(fr)
    }

    /// Underlying arkworks field element.
    pub fn into_fr(self) -> Fr {
        self.0
    }
}

impl From<Fr> for Scalar {
    fn from(fr: Fr) -> Self {
        Self(fr)
    }
}

impl From<u64> for Scalar {
    fn from(k: u64) -> Self {
        Self::from_u64(k)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({})", self.0)
    }
}

/// Returns bit `i` of a little-endian limb array.
#[inline]
pub(crate) fn bit(limbs: &[u64; 4], i: usize) -> bool {
    (limbs[i / 64] >> (i % 64)) & 1 == 1
}
