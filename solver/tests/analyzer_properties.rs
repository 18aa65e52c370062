use std::str::FromStr;

use cube_base::{Rotation, Turn};
use cube_core::successor;
use solver::analyzer::{Pdbs, Tables};
use solver::{parse_scrambles, run_ordered, Analyzer};

fn scramble(s: &str) -> Vec<Turn> {
    s.split_whitespace().map(|t| Turn::from_str(t).unwrap()).collect()
}

// Concrete scenarios.

#[test]
fn empty_scramble_is_identity_cross() {
    let analyzer = Analyzer::build(7);
    assert_eq!(analyzer.analyze(&scramble(""))[0], 0);
}

#[test]
fn single_u_does_not_disturb_the_cross() {
    let analyzer = Analyzer::build(7);
    assert_eq!(analyzer.analyze(&scramble("U"))[0], 0);
}

#[test]
fn r_breaks_the_cross_by_two_moves() {
    let analyzer = Analyzer::build(7);
    assert_eq!(analyzer.analyze(&scramble("R"))[0], 2);
}

#[test]
fn sune_is_corner_only_and_leaves_the_cross_solved() {
    let analyzer = Analyzer::build(7);
    assert_eq!(analyzer.analyze(&scramble("R U R' U R U2 R'"))[0], 0);
}

#[test]
fn f_r_u_rp_up_fp_breaks_the_cross() {
    let analyzer = Analyzer::build(7);
    assert!(analyzer.analyze(&scramble("F R U R' U' F'"))[0] >= 2);
}

#[test]
fn wca_regression_scramble_is_deterministic_across_runs() {
    let analyzer = Analyzer::build(8);
    let wca = scramble("D2 L2 D' L2 R2 B2 D2 B U R F D R U B' R2 F2 D F2 U'");
    let first = analyzer.analyze(&wca);
    let second = analyzer.analyze(&wca);
    assert_eq!(first, second);
}

// PDB admissibility, checked over the full cross domain.

#[test]
fn cross_pdb_is_admissible_over_its_full_domain() {
    let tables = Tables::build();
    let pdbs = Pdbs::build(&tables, 8);

    assert_eq!(pdbs.cross.get(cube_core::solved_index(&solver::analyzer::CROSS_EDGES, cube_core::CROSS_4)), 0);

    for s in 0..tables.cross.len() as u32 / cube_base::N_TURNS as u32 {
        let here = pdbs.cross.get(s as u64);
        if here == solver::UNREACHED {
            continue;
        }
        for m in 0..cube_base::N_TURNS as u8 {
            let next = successor(&tables.cross, s, Turn::from_index(m));
            let there = pdbs.cross.get(next as u64);
            if there == solver::UNREACHED {
                continue;
            }
            let diff = here.abs_diff(there);
            assert!(diff <= 1, "admissibility violated: P[{s}]={here}, P[{next}]={there}");
        }
    }
}

// Rotation equivalence.

#[test]
fn identity_rotation_leaves_a_scramble_unchanged() {
    let s = scramble("R U R' F2 D L'");
    assert_eq!(cube_base::rotate_scramble(Rotation::Id, &s), s);
}

// Output order preservation, at the analyzer level
// rather than the runner-unit level already covered in runner.rs.

#[test]
fn analyzer_batch_preserves_scramble_order() {
    let analyzer = Analyzer::build(6);
    let text = "R\nF R U R' U' F'\nU\n\nR U R' U R U2 R'\n";
    let scrambles = parse_scrambles(text);
    assert_eq!(scrambles.len(), 4);

    let mut rows: Vec<(u64, Vec<u8>)> = vec![(0, Vec::new()); scrambles.len()];
    run_ordered(
        &scrambles,
        4,
        |sc| analyzer.analyze(&sc.turns),
        |i, row| rows[i] = (scrambles[i].id, row),
    );

    let ids: Vec<u64> = rows.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}
