//! Precomputed parameters shared by every engine.
use crate::codec::{decode_point, encode_point};
use crate::curve::{G1Config, G2Config, GroupConfig};
use crate::error::{EngineError, EngineResult};
use crate::group::GroupEngine;
use crate::msm::window_size;
use crate::point::Point;
use std::vec::Vec;

/// Number of entries in the window-size table, one per value of `floor(log2 N)`.
const WINDOW_TABLE_LENGTH: usize = usize::BITS as usize;

/// Fixed data of one group.
#[derive(Clone, Debug)]
pub struct GroupTables<C: GroupConfig> {
    generator: Point<C>,
    encoded_generator: Vec<u8>,
}

impl<C: GroupConfig> GroupTables<C> {
    fn new() -> EngineResult<Self> {
        let generator = Point::<C>::generator();
        let encoded_generator = encode_point(&generator);
        // The generator must survive its own validation.
        if decode_point::<C>(&encoded_generator)? != generator {
            return Err(EngineError::InternalFailure("generator does not round-trip"));
        }
        Ok(Self {
            generator,
            encoded_generator,
        })
    }

    /// Generator in engine form.
    pub fn generator(&self) -> &Point<C> {
        &self.generator
    }

    /// Canonical encoding of the generator.
    pub fn encoded_generator(&self) -> &[u8] {
        &self.encoded_generator
    }
}

/// Immutable engine context.
///
/// Built once and only read afterwards, so a shared reference can be handed to
/// any number of threads.
#[derive(Clone, Debug)]
pub struct Context {
    g1: GroupTables<G1Config>,
    g2: GroupTables<G2Config>,
    msm_windows: [usize; WINDOW_TABLE_LENGTH],
}

impl Context {
    /// Builds the context, checking the generator tables on the way.
    pub fn new() -> EngineResult<Self> {
        let g1 = GroupTables::new()?;
        let g2 = GroupTables::new()?;

        let mut msm_windows = [0; WINDOW_TABLE_LENGTH];
        for (log2, w) in msm_windows.iter_mut().enumerate() {
            *w = window_size(1 << log2);
        }

        tracing::debug!(
            g1 = g1.encoded_generator.len(),
            g2 = g2.encoded_generator.len(),
            max_window = msm_windows[WINDOW_TABLE_LENGTH - 1],
            "built bls12-377 context"
        );

        Ok(Self {
            g1,
            g2,
            msm_windows,
        })
    }

    /// Engine for G1.
    pub fn g1(&self) -> GroupEngine<'_, G1Config> {
        self.group()
    }

    /// Engine for G2.
    pub fn g2(&self) -> GroupEngine<'_, G2Config> {
        self.group()
    }

    /// Engine for the group described by `C`.
    pub fn group<C: GroupConfig>(&self) -> GroupEngine<'_, C> {
        GroupEngine::new(self)
    }

    /// Tables of the group described by `C`.
    pub fn tables<C: GroupConfig>(&self) -> &GroupTables<C> {
        C::tables(self)
    }

    pub(crate) fn g1_tables(&self) -> &GroupTables<G1Config> {
        &self.g1
    }

    pub(crate) fn g2_tables(&self) -> &GroupTables<G2Config> {
        &self.g2
    }

    /// Pippenger window width for a batch of `n` pairs.
    pub fn msm_window(&self, n: usize) -> usize {
        match n.checked_ilog2() {
            Some(log2) => self.msm_windows[log2 as usize],
            None => self.msm_windows[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode_g1, encode_g2};
    use crate::point::{G1, G2};

    #[test]
    fn tables_hold_generators() {
        let ctx = Context::new().unwrap();
        assert_eq!(*ctx.tables::<G1Config>().generator(), G1::generator());
        assert_eq!(ctx.g1_tables().encoded_generator(), encode_g1(&G1::generator()));
        assert_eq!(ctx.g2_tables().encoded_generator(), encode_g2(&G2::generator()));
    }

    #[test]
    fn window_table_matches_formula() {
        let ctx = Context::new().unwrap();
        for n in [0, 1, 2, 31, 32, 33, 100, 1000, 1 << 16, (1 << 16) + 5, usize::MAX] {
            assert_eq!(ctx.msm_window(n), window_size(n), "n = {n}");
        }
    }
}
