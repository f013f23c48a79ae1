//! # bls377-ffi
//!
//! C ABI over the BLS12-377 engine.
//!
//! Every export takes `(pointer, length)` pairs of canonical encodings, writes
//! its result into a caller-provided output buffer of the exact encoded width
//! and returns `true` on success. On failure it returns `false` and leaves the
//! output buffer untouched. [`initialize`] must succeed once before any other
//! call; until then every operation fails.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![allow(non_snake_case)]

mod buffer;

use engine::{
    codec::{
        decode_msm_input, decode_pairing_input, decode_point, decode_scalar, encode_point,
        encode_scalar,
    },
    constants::{PAIRING_VERDICT_LENGTH, SCALAR_LENGTH},
    multi_pairing_product_equals, Context, EngineError, EngineResult, G1Config, G2Config,
    GroupConfig, Scalar,
};
use buffer::Output;
use once_cell::race::OnceBox;
use std::panic::{self, AssertUnwindSafe};

static CONTEXT: OnceBox<Context> = OnceBox::new();

/// Returns the installed context.
fn context() -> EngineResult<&'static Context> {
    CONTEXT.get().ok_or(EngineError::Uninitialized)
}

/// Builds and installs the process-wide context.
///
/// Safe to call any number of times from any thread. The first successful
/// call installs the context; later calls return `true` without rebuilding.
#[no_mangle]
pub extern "C" fn initialize() -> bool {
    let result = panic::catch_unwind(|| {
        CONTEXT
            .get_or_try_init(|| {
                let ctx = Context::new()?;
                tracing::info!("bls12-377 context initialized");
                Ok::<_, EngineError>(Box::new(ctx))
            })
            .map(|_| ())
    });
    match result {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            tracing::debug!(op = "initialize", %err, "call failed");
            false
        }
        Err(_) => {
            tracing::debug!(op = "initialize", "call panicked");
            false
        }
    }
}

/// Runs `f` against the context and copies its result into the output buffer.
///
/// Errors and panics are reported as `false`; the output buffer is only
/// written once `f` has succeeded.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes, and `f` must uphold the
/// contracts of the input buffers it reads.
unsafe fn run<F>(op: &'static str, out: *mut u8, out_len: usize, width: usize, f: F) -> bool
where
    F: FnOnce(&Context) -> EngineResult<Vec<u8>>,
{
    // The context is read-only, so a panic cannot leave it half updated.
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let ctx = context()?;
        let out = Output::new(out, out_len, width)?;
        let bytes = f(ctx)?;
        unsafe { out.write(&bytes) }
    }))
    .unwrap_or(Err(EngineError::InternalFailure("panic")));

    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(op, %err, "call failed");
            false
        }
    }
}

fn group_sum<C: GroupConfig>(ctx: &Context, a: &[u8], b: &[u8]) -> EngineResult<Vec<u8>> {
    let group = ctx.group::<C>();
    let sum = group.sum(&decode_point(a)?, &decode_point(b)?);
    Ok(encode_point(&sum))
}

fn group_neg<C: GroupConfig>(ctx: &Context, a: &[u8]) -> EngineResult<Vec<u8>> {
    let group = ctx.group::<C>();
    Ok(encode_point(&group.neg(&decode_point(a)?)))
}

fn group_scalar_mul<C: GroupConfig>(
    ctx: &Context,
    point: &[u8],
    scalar: &[u8],
) -> EngineResult<Vec<u8>> {
    let group = ctx.group::<C>();
    let product = group.scalar_mul(&decode_point(point)?, &decode_scalar(scalar)?);
    Ok(encode_point(&product))
}

fn group_multi_scalar_mul<C: GroupConfig>(ctx: &Context, batch: &[u8]) -> EngineResult<Vec<u8>> {
    let pairs = decode_msm_input::<C>(batch)?;
    Ok(encode_point(&ctx.group::<C>().multi_scalar_mul(&pairs)))
}

fn fr_binary(a: &[u8], b: &[u8], op: fn(&Scalar, &Scalar) -> Scalar) -> EngineResult<Vec<u8>> {
    let a = decode_scalar(a)?;
    let b = decode_scalar(b)?;
    Ok(encode_scalar(&op(&a, &b)).to_vec())
}

/// Writes the multiplicative identity of Fr.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_Fr_one(out: *mut u8, out_len: usize) -> bool {
    unsafe {
        run("bls12_377_Fr_one", out, out_len, SCALAR_LENGTH, |_| {
            Ok(encode_scalar(&Scalar::one()).to_vec())
        })
    }
}

/// Writes `a + b mod r`.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes, and each input pointer
/// must be valid for reads of its length.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_Fr_sum(
    out: *mut u8,
    out_len: usize,
    a: *const u8,
    a_len: usize,
    b: *const u8,
    b_len: usize,
) -> bool {
    unsafe {
        run("bls12_377_Fr_sum", out, out_len, SCALAR_LENGTH, |_| {
            fr_binary(buffer::input(a, a_len)?, buffer::input(b, b_len)?, Scalar::sum)
        })
    }
}

/// Writes `-a mod r`.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes and `a` for reads of
/// `a_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_Fr_neg(
    out: *mut u8,
    out_len: usize,
    a: *const u8,
    a_len: usize,
) -> bool {
    unsafe {
        run("bls12_377_Fr_neg", out, out_len, SCALAR_LENGTH, |_| {
            let a = decode_scalar(buffer::input(a, a_len)?)?;
            Ok(encode_scalar(&a.negate()).to_vec())
        })
    }
}

/// Writes `a * b mod r`.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes, and each input pointer
/// must be valid for reads of its length.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_Fr_mul(
    out: *mut u8,
    out_len: usize,
    a: *const u8,
    a_len: usize,
    b: *const u8,
    b_len: usize,
) -> bool {
    unsafe {
        run("bls12_377_Fr_mul", out, out_len, SCALAR_LENGTH, |_| {
            fr_binary(buffer::input(a, a_len)?, buffer::input(b, b_len)?, Scalar::product)
        })
    }
}

/// Writes the generator of G1.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_G1_one(out: *mut u8, out_len: usize) -> bool {
    unsafe {
        run("bls12_377_G1_one", out, out_len, G1Config::ENCODED_LENGTH, |ctx| {
            Ok(ctx.g1().encoded_one().to_vec())
        })
    }
}

/// Writes `a + b` in G1.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes, and each input pointer
/// must be valid for reads of its length.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_G1_sum(
    out: *mut u8,
    out_len: usize,
    a: *const u8,
    a_len: usize,
    b: *const u8,
    b_len: usize,
) -> bool {
    unsafe {
        run("bls12_377_G1_sum", out, out_len, G1Config::ENCODED_LENGTH, |ctx| {
            group_sum::<G1Config>(ctx, buffer::input(a, a_len)?, buffer::input(b, b_len)?)
        })
    }
}

/// Writes `-a` in G1.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes and `a` for reads of
/// `a_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_G1_neg(
    out: *mut u8,
    out_len: usize,
    a: *const u8,
    a_len: usize,
) -> bool {
    unsafe {
        run("bls12_377_G1_neg", out, out_len, G1Config::ENCODED_LENGTH, |ctx| {
            group_neg::<G1Config>(ctx, buffer::input(a, a_len)?)
        })
    }
}

/// Writes `scalar * point` in G1.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes, and each input pointer
/// must be valid for reads of its length.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_G1_scalar_mul(
    out: *mut u8,
    out_len: usize,
    point: *const u8,
    point_len: usize,
    scalar: *const u8,
    scalar_len: usize,
) -> bool {
    unsafe {
        run("bls12_377_G1_scalar_mul", out, out_len, G1Config::ENCODED_LENGTH, |ctx| {
            group_scalar_mul::<G1Config>(
                ctx,
                buffer::input(point, point_len)?,
                buffer::input(scalar, scalar_len)?,
            )
        })
    }
}

/// Writes `sum(scalar_i * point_i)` over a count-prefixed G1 batch.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes and `batch` for reads of
/// `batch_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_G1_multi_scalar_mul(
    out: *mut u8,
    out_len: usize,
    batch: *const u8,
    batch_len: usize,
) -> bool {
    unsafe {
        run("bls12_377_G1_multi_scalar_mul", out, out_len, G1Config::ENCODED_LENGTH, |ctx| {
            group_multi_scalar_mul::<G1Config>(ctx, buffer::input(batch, batch_len)?)
        })
    }
}

/// Writes the generator of G2.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_G2_one(out: *mut u8, out_len: usize) -> bool {
    unsafe {
        run("bls12_377_G2_one", out, out_len, G2Config::ENCODED_LENGTH, |ctx| {
            Ok(ctx.g2().encoded_one().to_vec())
        })
    }
}

/// Writes `a + b` in G2.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes, and each input pointer
/// must be valid for reads of its length.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_G2_sum(
    out: *mut u8,
    out_len: usize,
    a: *const u8,
    a_len: usize,
    b: *const u8,
    b_len: usize,
) -> bool {
    unsafe {
        run("bls12_377_G2_sum", out, out_len, G2Config::ENCODED_LENGTH, |ctx| {
            group_sum::<G2Config>(ctx, buffer::input(a, a_len)?, buffer::input(b, b_len)?)
        })
    }
}

/// Writes `-a` in G2.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes and `a` for reads of
/// `a_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_G2_neg(
    out: *mut u8,
    out_len: usize,
    a: *const u8,
    a_len: usize,
) -> bool {
    unsafe {
        run("bls12_377_G2_neg", out, out_len, G2Config::ENCODED_LENGTH, |ctx| {
            group_neg::<G2Config>(ctx, buffer::input(a, a_len)?)
        })
    }
}

/// Writes `scalar * point` in G2.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes, and each input pointer
/// must be valid for reads of its length.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_G2_scalar_mul(
    out: *mut u8,
    out_len: usize,
    point: *const u8,
    point_len: usize,
    scalar: *const u8,
    scalar_len: usize,
) -> bool {
    unsafe {
        run("bls12_377_G2_scalar_mul", out, out_len, G2Config::ENCODED_LENGTH, |ctx| {
            group_scalar_mul::<G2Config>(
                ctx,
                buffer::input(point, point_len)?,
                buffer::input(scalar, scalar_len)?,
            )
        })
    }
}

/// Writes `sum(scalar_i * point_i)` over a count-prefixed G2 batch.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes and `batch` for reads of
/// `batch_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_G2_multi_scalar_mul(
    out: *mut u8,
    out_len: usize,
    batch: *const u8,
    batch_len: usize,
) -> bool {
    unsafe {
        run("bls12_377_G2_multi_scalar_mul", out, out_len, G2Config::ENCODED_LENGTH, |ctx| {
            group_multi_scalar_mul::<G2Config>(ctx, buffer::input(batch, batch_len)?)
        })
    }
}

/// Checks whether the pairing products of two count-prefixed lists are equal
/// and writes the verdict byte: `0x01` if they are, `0x00` if not.
///
/// # Safety
///
/// `out` must be valid for writes of `out_len` bytes, and each input pointer
/// must be valid for reads of its length.
#[no_mangle]
pub unsafe extern "C" fn bls12_377_multi_pairing_product_equals(
    out: *mut u8,
    out_len: usize,
    left: *const u8,
    left_len: usize,
    right: *const u8,
    right_len: usize,
) -> bool {
    unsafe {
        run(
            "bls12_377_multi_pairing_product_equals",
            out,
            out_len,
            PAIRING_VERDICT_LENGTH,
            |_| {
                let left = decode_pairing_input(buffer::input(left, left_len)?)?;
                let right = decode_pairing_input(buffer::input(right, right_len)?)?;
                let equal = multi_pairing_product_equals(&left, &right)?;
                Ok(vec![u8::from(equal)])
            },
        )
    }
}
