//! Fixed widths of the canonical encodings.

/// Width of a base field (Fq) element.
pub const FQ_LENGTH: usize = 48;
/// Width of a quadratic extension (Fq2) element.
pub const FQ2_LENGTH: usize = 2 * FQ_LENGTH;
/// Width of a scalar field (Fr) element.
pub const SCALAR_LENGTH: usize = 32;
/// Width of the flag byte that prefixes every point.
pub const FLAG_LENGTH: usize = 1;
/// Width of an uncompressed G1 point.
pub const G1_LENGTH: usize = FLAG_LENGTH + 2 * FQ_LENGTH;
/// Width of an uncompressed G2 point.
pub const G2_LENGTH: usize = FLAG_LENGTH + 2 * FQ2_LENGTH;
/// Width of the count prefix of a batch encoding.
pub const COUNT_LENGTH: usize = 4;
/// Width of one G1 multi-scalar multiplication entry.
pub const G1_MSM_ENTRY_LENGTH: usize = G1_LENGTH + SCALAR_LENGTH;
/// Width of one G2 multi-scalar multiplication entry.
pub const G2_MSM_ENTRY_LENGTH: usize = G2_LENGTH + SCALAR_LENGTH;
/// Width of one pairing entry.
pub const PAIRING_ENTRY_LENGTH: usize = G1_LENGTH + G2_LENGTH;
/// Width of the pairing check verdict.
pub const PAIRING_VERDICT_LENGTH: usize = 1;

/// Flag byte of a finite point.
pub const FLAG_FINITE: u8 = 0x00;
/// Flag byte of the point at infinity.
pub const FLAG_INFINITY: u8 = 0x01;

/// Number of significant bits in a scalar.
pub const SCALAR_BITS: usize = 253;
