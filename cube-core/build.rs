use const_gen::*;
use cube_base::{Turn, N_TURNS};
use itertools::Itertools;

fn main() {
    let out_dir = std::env::var_os("OUT_DIR").unwrap();
    let dest_path = std::path::Path::new(&out_dir).join("const_gen.rs");

    let turn_inverse = gen_turn_inverse();
    let valid_moves = gen_valid_moves(&turn_inverse);
    let conj = gen_conj_table();
    let rot_map = gen_rot_map_table();

    let const_declarations = [
        const_array_declaration!(pub(crate) TURN_INVERSE = turn_inverse),
        const_array_declaration!(pub(crate) VALID_MOVES = valid_moves),
        const_array_declaration!(pub(crate) CONJ = conj),
        const_array_declaration!(pub(crate) ROT_MAP = rot_map),
    ]
    .join("\n");

    std::fs::write(dest_path, const_declarations).unwrap();
}

/// `inv[3f+p] = 3f+(2-p)`.
fn gen_turn_inverse() -> Vec<u8> {
    (0..N_TURNS as u8)
        .map(|i| Turn::from_index(i).inverse().index())
        .collect_vec()
}

/// `valid_moves[prev][m]`: true if turn `m` is not redundant immediately
/// after `prev` (`prev == 18` meaning "no previous turn").
///
/// Forbids repeating the same face, and forbids the lower-indexed face of
/// an opposite pair after the higher-indexed one, so `U D` survives but
/// `D U` is pruned.
fn gen_valid_moves(turn_inverse: &[u8]) -> Vec<Vec<bool>> {
    let _ = turn_inverse;
    let mut table = vec![vec![true; N_TURNS]; N_TURNS + 1];
    for prev in 0..N_TURNS as u8 {
        let prev_turn = Turn::from_index(prev);
        for m in 0..N_TURNS as u8 {
            let next_turn = Turn::from_index(m);
            let same_face = next_turn.face as u8 == prev_turn.face as u8;
            let redundant_opposite = next_turn.face == prev_turn.face.opposite()
                && (next_turn.face as u8) < (prev_turn.face as u8);
            table[prev as usize][m as usize] = !same_face && !redundant_opposite;
        }
    }
    // prev == 18: no previous turn, everything is allowed.
    table
}

/// `conj[m][k]`: turn `m` relabeled by the rotation that carries slot 0 to
/// slot `k`, for the four F2L slots (quarter rotations about U-D).
fn gen_conj_table() -> Vec<Vec<u8>> {
    rotation_table()
}

/// `rot_map[r][m]`: turn `m` relabeled by whole-cube rotation `r` in
/// `{id, y, y^2, y'}`. Structurally identical to `conj`; kept as a distinct
/// named table because the two are indexed by unrelated call sites.
fn gen_rot_map_table() -> Vec<Vec<u8>> {
    rotation_table()
}

fn rotation_table() -> Vec<Vec<u8>> {
    (0..4u8)
        .map(|k| {
            (0..N_TURNS as u8)
                .map(|m| {
                    let turn = Turn::from_index(m);
                    let rotated_face = turn.face.rotate_y_by(k);
                    Turn::new(rotated_face, turn.power).index()
                })
                .collect_vec()
        })
        .collect_vec()
}
