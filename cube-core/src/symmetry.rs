//! Conjugation and whole-cube rotation tables, and the mirror coordinate
//! bijections used to halve storage for diff-1/diff-3 slot relationships.

use cube_base::{Turn, N_TURNS};

use crate::coord::{decode, encode, PieceSlot};
use crate::families::Family;
use crate::{CONJ, ROT_MAP};

/// Relabels `turn` as if the pattern anchored at slot 0 were instead
/// anchored at slot `k` (`k` in `0..4`).
pub fn conj(turn: Turn, k: usize) -> Turn {
    Turn::from_index(CONJ[k][turn.index() as usize])
}

/// Relabels `turn` under whole-cube rotation `r` in `{id, y, y^2, y'}`.
pub fn rot_map(turn: Turn, r: usize) -> Turn {
    Turn::from_index(ROT_MAP[r][turn.index() as usize])
}

/// Conjugates an entire move sequence by slot `k`.
pub fn conj_sequence(turns: &[Turn], k: usize) -> Vec<Turn> {
    turns.iter().map(|&t| conj(t, k)).collect()
}

const CORNER_MIRROR: [u8; 8] = [1, 0, 3, 2, 5, 4, 7, 6];
const EDGE_MIRROR: [u8; 12] = [2, 1, 0, 3, 6, 5, 4, 7, 9, 8, 11, 10];

/// Left-right mirror of a piece-coordinate index: relabels each piece's
/// position through the L<->R physical mirror, leaving orientation digits
/// untouched.
pub fn mirror_coord(state: u64, family: Family) -> u64 {
    let piece_mirror: &[u8] = if family.pn == 12 { &EDGE_MIRROR } else { &CORNER_MIRROR };
    let a = decode(state, family.n, family.c, family.pn);
    let mirrored: Vec<PieceSlot> = a
        .iter()
        .map(|&token| {
            let slot = crate::coord::PieceSlot::from_token(token, family.c);
            PieceSlot {
                pos: piece_mirror[slot.pos as usize],
                ori: slot.ori,
            }
        })
        .collect();
    encode(&mirrored, family.c, family.pn)
}

static_assertions::const_assert_eq!(N_TURNS, 18);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::families::CORNERS_2;

    #[test]
    fn conj_slot_zero_is_identity() {
        for m in 0..N_TURNS as u8 {
            assert_eq!(conj(Turn::from_index(m), 0), Turn::from_index(m));
        }
    }

    #[test]
    fn rot_map_y_four_times_is_identity() {
        for m in 0..N_TURNS as u8 {
            let turn = Turn::from_index(m);
            let mut t = turn;
            for _ in 0..4 {
                t = rot_map(t, 1);
            }
            assert_eq!(t, turn);
        }
    }

    #[test]
    fn mirror_is_an_involution() {
        for state in [0u64, 1, 17, 200, 500] {
            let once = mirror_coord(state, CORNERS_2);
            let twice = mirror_coord(once, CORNERS_2);
            assert_eq!(twice, state);
        }
    }

    #[test]
    fn mirror_preserves_domain_membership() {
        assert!(mirror_coord(0, CORNERS_2) < CORNERS_2.size);
    }
}
