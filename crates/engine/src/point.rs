//! Projective points and the complete group law.
//!
//! Points are kept in homogeneous projective coordinates `(X : Y : Z)` with the
//! identity at `(0 : 1 : 0)`. Addition and doubling use the complete formulas
//! for `a = 0` short Weierstrass curves from Renes, Costello and Batina,
//! "Complete addition formulas for prime order elliptic curves"
//! (<https://eprint.iacr.org/2015/1060>), algorithms 7 and 9. One formula
//! covers distinct points, identity operands and doubling, so no branch
//! reveals which case occurred.
//!
//! The curves have even order, so completeness only holds when `P - Q` is not
//! a point of order two. The codec admits only points of the odd prime-order
//! subgroup, and every point derived from them stays in it.
use crate::curve::{G1Config, G2Config, GroupConfig};
use ark_ec::short_weierstrass::Affine;
use ark_ff::{Field, One, Zero};
use core::{
    fmt,
    ops::{Add, AddAssign, Neg},
};

/// A point of the group described by `C`.
#[derive(Clone, Copy)]
pub struct Point<C: GroupConfig> {
    x: C::Base,
    y: C::Base,
    z: C::Base,
}

/// Point of G1.
pub type G1 = Point<G1Config>;
/// Point of G2.
pub type G2 = Point<G2Config>;

impl<C: GroupConfig> Point<C> {
    /// The point at infinity.
    #[inline]
    pub fn identity() -> Self {
        Self {
            x: C::Base::zero(),
            y: C::Base::one(),
            z: C::Base::zero(),
        }
    }

    /// The fixed generator of the group.
    pub fn generator() -> Self {
        Self::from_ark(&C::generator())
    }

    /// Lifts affine coordinates. The caller guarantees the point is in the
    /// prime-order subgroup.
    #[inline]
    pub(crate) fn from_affine_unchecked(x: C::Base, y: C::Base) -> Self {
        Self {
            x,
            y,
            z: C::Base::one(),
        }
    }

    /// Returns `true` for the point at infinity.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// `self + rhs`.
    pub fn sum(&self, rhs: &Self) -> Self {
        let t0 = self.x * rhs.x;
        let t1 = self.y * rhs.y;
        let t2 = self.z * rhs.z;
        let t3 = self.x + self.y;
        let t4 = rhs.x + rhs.y;
        let t3 = t3 * t4;
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = self.y + self.z;
        let x3 = rhs.y + rhs.z;
        let t4 = t4 * x3;
        let x3 = t1 + t2;
        let t4 = t4 - x3;
        let x3 = self.x + self.z;
        let y3 = rhs.x + rhs.z;
        let x3 = x3 * y3;
        let y3 = t0 + t2;
        let y3 = x3 - y3;
        let x3 = t0 + t0;
        let t0 = x3 + t0;
        let t2 = C::mul_by_3b(&t2);
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = C::mul_by_3b(&y3);
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// `2 * self`.
    pub fn double(&self) -> Self {
        let t0 = self.y.square();
        let z3 = t0 + t0;
        let z3 = z3 + z3;
        let z3 = z3 + z3;
        let t1 = self.y * self.z;
        let t2 = self.z.square();
        let t2 = C::mul_by_3b(&t2);
        let x3 = t2 * z3;
        let y3 = t0 + t2;
        let z3 = t1 * z3;
        let t1 = t2 + t2;
        let t2 = t1 + t2;
        let t0 = t0 - t2;
        let y3 = t0 * y3;
        let y3 = x3 + y3;
        let t1 = self.x * self.y;
        let x3 = t0 * t1;
        let x3 = x3 + x3;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// `-self`.
    #[inline]
    pub fn negate(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// Swaps `a` and `b` when `choice` is set.
    ///
    /// Both branches run the same field operations: the difference of the two
    /// points is scaled by `choice` (zero or one) and moved across.
    #[inline]
    pub(crate) fn conditional_swap(a: &mut Self, b: &mut Self, choice: bool) {
        let mask = C::Base::from(choice);
        let dx = (b.x - a.x) * mask;
        let dy = (b.y - a.y) * mask;
        let dz = (b.z - a.z) * mask;
        a.x += dx;
        a.y += dy;
        a.z += dz;
        b.x -= dx;
        b.y -= dy;
        b.z -= dz;
    }

    /// Affine coordinates, or `None` for the point at infinity.
    pub fn to_affine(&self) -> Option<(C::Base, C::Base)> {
        let z_inv = self.z.inverse()?;
        Some((self.x * z_inv, self.y * z_inv))
    }

    /// Converts to the arkworks affine representation.
    pub fn to_ark(&self) -> Affine<C::Params> {
        match self.to_affine() {
            Some((x, y)) => Affine::new_unchecked(x, y),
            None => Affine::identity(),
        }
    }

    /// Converts from the arkworks affine representation.
    pub fn from_ark(p: &Affine<C::Params>) -> Self {
        if p.infinity {
            Self::identity()
        } else {
            Self::from_affine_unchecked(p.x, p.y)
        }
    }
}

impl<C: GroupConfig> Default for Point<C> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<C: GroupConfig> PartialEq for Point<C> {
    fn eq(&self, other: &Self) -> bool {
        // (X1 : Y1 : Z1) == (X2 : Y2 : Z2) iff the cross products agree.
        self.x * other.z == other.x * self.z && self.y * other.z == other.y * self.z
    }
}

impl<C: GroupConfig> Eq for Point<C> {}

impl<C: GroupConfig> Add for Point<C> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.sum(&rhs)
    }
}

impl<'a, C: GroupConfig> Add<&'a Point<C>> for Point<C> {
    type Output = Self;

    fn add(self, rhs: &'a Self) -> Self {
        self.sum(rhs)
    }
}

impl<C: GroupConfig> AddAssign for Point<C> {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.sum(&rhs);
    }
}

impl<'a, C: GroupConfig> AddAssign<&'a Point<C>> for Point<C> {
    fn add_assign(&mut self, rhs: &'a Self) {
        *self = self.sum(rhs);
    }
}

impl<C: GroupConfig> Neg for Point<C> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl<C: GroupConfig> fmt::Debug for Point<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_affine() {
            Some((x, y)) => write!(f, "{}({}, {})", C::NAME, x, y),
            None => write!(f, "{}(infinity)", C::NAME),
        }
    }
}
