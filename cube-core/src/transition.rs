//! Move-transition table construction: `table[s*18 + m] = s'`.

use cube_base::{Turn, N_TURNS};

use crate::coord::{decode, encode, PieceSlot};
use crate::families::Family;
use crate::TURN_INVERSE;

/// Builds the full `S*18` transition table for a coordinate family, given
/// its single-piece basic table.
///
/// Each cell is filled at most once directly; the mirror cell
/// `T[s'*18 + inv[m]] = s` is filled for free in the same pass.
pub fn build_transition_table(family: Family, basic: &[u32]) -> Vec<i32> {
    let s = family.size as usize;
    let mut table = vec![-1i32; s * N_TURNS];

    for state in 0..family.size {
        let a = decode(state, family.n, family.c, family.pn);
        for m in 0..N_TURNS as u8 {
            let cell = state as usize * N_TURNS + m as usize;
            if table[cell] != -1 {
                continue;
            }
            let moved: Vec<u32> = a.iter().map(|&token| basic[(token + m as u32) as usize]).collect();
            let moved_slots: Vec<PieceSlot> = moved
                .iter()
                .map(|&t| PieceSlot::from_token(t, family.c))
                .collect();
            let next = encode(&moved_slots, family.c, family.pn);

            table[cell] = next as i32;
            let inv_m = TURN_INVERSE[m as usize];
            let mirror_cell = next as usize * N_TURNS + inv_m as usize;
            table[mirror_cell] = state as i32;
        }
    }
    table
}

/// A "scale-24" table pre-multiplies every stored index by 24, so that
/// `cross_coord + corner_coord` is directly a row key into a combined
/// cross×corner PDB without a runtime multiply.
pub fn build_scaled_transition_table(family: Family, basic: &[u32], scale: u32) -> Vec<i32> {
    build_transition_table(family, basic)
        .into_iter()
        .map(|v| v * scale as i32)
        .collect()
}

/// Looks up the successor coordinate for `state` under `turn`.
pub fn successor(table: &[i32], state: u32, turn: Turn) -> u32 {
    table[state as usize * N_TURNS + turn.index() as usize] as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::build_basic_table;
    use crate::families::{CORNERS_2, EDGE_1};
    use cube_base::Power;
    use cube_base::Face;

    #[test]
    fn transition_table_is_total_and_self_consistent() {
        let basic = build_basic_table(EDGE_1);
        let table = build_transition_table(EDGE_1, &basic);
        assert!(table.iter().all(|&v| v >= 0));

        for s in 0..EDGE_1.size as u32 {
            for m in 0..N_TURNS as u8 {
                let turn = Turn::from_index(m);
                let s2 = successor(&table, s, turn);
                let back = successor(&table, s2, turn.inverse());
                assert_eq!(back, s, "turn {turn} did not invert at state {s}");
            }
        }
    }

    #[test]
    fn four_quarter_turns_of_a_face_cycle_back() {
        let basic = build_basic_table(CORNERS_2);
        let table = build_transition_table(CORNERS_2, &basic);
        let turn = Turn::new(Face::U, Power::Cw);
        for s in [0u32, 17, 200] {
            let mut cur = s;
            for _ in 0..4 {
                cur = successor(&table, cur, turn);
            }
            assert_eq!(cur, s);
        }
    }
}
