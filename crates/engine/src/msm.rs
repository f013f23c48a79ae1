//! Multi-scalar multiplication with Pippenger's bucket method.
//!
//! The scalar bits are cut into windows of `c` bits. Inside a window every
//! point is dropped into the bucket named by its `c`-bit digit, the buckets
//! are folded into a weighted sum with one running-sum pass, and the window
//! sums are joined from the most significant window down with `c` doublings
//! in between.
use crate::constants::SCALAR_BITS;
use crate::curve::GroupConfig;
use crate::fr::Scalar;
use crate::point::Point;
use std::{vec, vec::Vec};

/// Widest window the engine will use. Bounds bucket memory for huge batches.
pub const MAX_WINDOW: usize = 16;

/// Window width for a batch of `n` points: 3 for small batches, otherwise
/// roughly `ln n + 2`.
pub const fn window_size(n: usize) -> usize {
    if n < 32 {
        return 3;
    }
    let log2 = (usize::BITS - n.leading_zeros()) as usize - 1;
    let c = log2 * 69 / 100 + 2;
    if c > MAX_WINDOW {
        MAX_WINDOW
    } else {
        c
    }
}

/// Extracts the `width`-bit digit starting at bit `start` of a little-endian
/// limb array.
#[inline]
fn window_digit(limbs: &[u64; 4], start: usize, width: usize) -> usize {
    let limb = start / 64;
    let offset = start % 64;
    let mut v = limbs[limb] >> offset;
    if offset + width > 64 && limb + 1 < limbs.len() {
        v |= limbs[limb + 1] << (64 - offset);
    }
    (v & ((1u64 << width) - 1)) as usize
}

/// Weighted bucket sum of one window.
fn window_sum<C: GroupConfig>(
    points: &[Point<C>],
    scalars: &[[u64; 4]],
    start: usize,
    width: usize,
) -> Point<C> {
    let mut buckets = vec![Point::<C>::identity(); (1 << width) - 1];
    for (point, limbs) in points.iter().zip(scalars) {
        let digit = window_digit(limbs, start, width);
        if digit != 0 {
            buckets[digit - 1] += point;
        }
    }

    // sum_j j * bucket[j] via running sums from the top bucket down.
    let mut running = Point::identity();
    let mut sum = Point::identity();
    for bucket in buckets.iter().rev() {
        running += bucket;
        sum += &running;
    }
    sum
}

cfg_if::cfg_if! {
    if #[cfg(feature = "parallel")] {
        use rayon::prelude::*;

        fn window_sums<C: GroupConfig>(
            points: &[Point<C>],
            scalars: &[[u64; 4]],
            width: usize,
        ) -> Vec<Point<C>> {
            (0..SCALAR_BITS)
                .step_by(width)
                .collect::<Vec<_>>()
                .into_par_iter()
                .map(|start| window_sum(points, scalars, start, width))
                .collect()
        }
    } else {
        fn window_sums<C: GroupConfig>(
            points: &[Point<C>],
            scalars: &[[u64; 4]],
            width: usize,
        ) -> Vec<Point<C>> {
            (0..SCALAR_BITS)
                .step_by(width)
                .map(|start| window_sum(points, scalars, start, width))
                .collect()
        }
    }
}

/// Computes `sum(scalar_i * point_i)` using windows of `width` bits.
///
/// Returns the identity for an empty batch. Window sums are combined in a
/// fixed order, so the result does not depend on how windows were scheduled.
pub fn multi_scalar_mul<C: GroupConfig>(pairs: &[(Point<C>, Scalar)], width: usize) -> Point<C> {
    if pairs.is_empty() {
        return Point::identity();
    }
    let width = width.clamp(1, MAX_WINDOW);

    let (points, scalars): (Vec<Point<C>>, Vec<[u64; 4]>) =
        pairs.iter().map(|(p, s)| (*p, s.limbs())).unzip();

    let sums = window_sums(&points, &scalars, width);
    let Some((lowest, higher)) = sums.split_first() else {
        return Point::identity();
    };

    let mut total = Point::identity();
    for sum in higher.iter().rev() {
        total += sum;
        for _ in 0..width {
            total = total.double();
        }
    }
    total + lowest
}
