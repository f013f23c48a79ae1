//! # bls377-engine
//!
//! Arithmetic for the pairing-friendly curve BLS12-377: canonical encodings,
//! the scalar field, the G1 and G2 groups, scalar and multi-scalar
//! multiplication, and the multi-pairing product check.
//!
//! Every engine reads its parameters from an immutable [`Context`].
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

pub mod codec;
pub mod constants;
pub mod context;
pub mod curve;
pub mod error;
pub mod fr;
pub mod group;
pub mod msm;
pub mod pairing;
pub mod point;
pub mod scalar_mul;

pub use codec::{decode, encode, Element, Kind};
pub use context::Context;
pub use curve::{G1Config, G2Config, GroupConfig};
pub use error::{EngineError, EngineResult};
pub use fr::Scalar;
pub use group::GroupEngine;
pub use pairing::{multi_pairing_product_equals, pairing, Gt};
pub use point::{Point, G1, G2};
