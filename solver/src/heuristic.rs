//! Combines pattern-database lookups into admissible per-node heuristics.
//!
//! `h(node) = max` over the active PDBs' `get` results; each PDB is an
//! admissible distance to its own pattern, so the max remains admissible.

use cube_core::{successor, N_TURNS};

use crate::packed::{PackedArray, UNREACHED};

/// One coordinate family paired with its move-transition table and PDB.
/// `scale` is the multiplier this family's *transition table* output has
/// already been pre-multiplied by (24 for the cross family when combined
/// with one more size-24 family; 1 otherwise).
pub struct PdbView {
    pub transitions: Vec<i32>,
    pub pdb: PackedArray,
}

impl PdbView {
    pub fn new(transitions: Vec<i32>, pdb: PackedArray) -> Self {
        PdbView { transitions, pdb }
    }

    #[inline]
    pub fn successor(&self, state: u32, turn: cube_base::Turn) -> u32 {
        successor(&self.transitions, state, turn)
    }

    #[inline]
    pub fn lookup(&self, state: u64) -> u8 {
        self.pdb.get(state)
    }
}

/// `h(node) = max(get(H_1, coord_1), .., get(H_k, coord_k))`.
pub fn max_heuristic(lookups: &[u8]) -> u8 {
    lookups.iter().copied().max().unwrap_or(0)
}

/// A coordinate pre-multiplied by 18 is a ready row offset; this is the
/// "hot path" layout every search node carries for each active PDB.
pub type RowCoord = u32;

pub const ROW_SCALE: u32 = N_TURNS as u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_heuristic_picks_largest() {
        assert_eq!(max_heuristic(&[3, 7, 1]), 7);
    }

    #[test]
    fn max_heuristic_of_empty_is_zero() {
        assert_eq!(max_heuristic(&[]), 0);
    }

    #[test]
    fn unreached_dominates_the_max() {
        assert_eq!(max_heuristic(&[2, UNREACHED, 5]), UNREACHED);
    }
}
