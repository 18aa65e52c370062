//! Pattern-database generation: a parallel breadth-first flood from one or
//! more solved indices over a coordinate graph, packed into 4-bit distances.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

use cube_base::N_TURNS;
use rayon::prelude::*;

use crate::packed::{PackedArray, UNREACHED};

const TMP_UNSEEN: u8 = 255;

/// Floods outward from `seeds` (all at distance 0) over a domain of size
/// `domain_size`, up to `max_depth`, and packs the result.
///
/// `successors(i)` must return the 18 states reachable from `i` in one
/// turn; composite PDBs build this closure by summing contributions from
/// more than one transition table, but this function only ever sees the
/// combined index.
pub fn generate<F>(domain_size: u64, max_depth: u8, seeds: &[u64], successors: F) -> PackedArray
where
    F: Fn(u64) -> [u64; N_TURNS] + Sync,
{
    tracing::info!(domain_size, max_depth, seeds = seeds.len(), "generating pattern database");

    let tmp: Vec<AtomicU8> = (0..domain_size).map(|_| AtomicU8::new(TMP_UNSEEN)).collect();
    for &s in seeds {
        tmp[s as usize].store(0, Ordering::Relaxed);
    }

    #[cfg(feature = "progress")]
    let pb = indicatif::ProgressBar::new_spinner()
        .with_style(
            indicatif::ProgressStyle::with_template("{msg}{spinner}")
                .unwrap()
                .tick_strings(&[".  ", ".. ", "...", "...", "..."]),
        )
        .with_message("generating pattern database");
    #[cfg(feature = "progress")]
    pb.enable_steady_tick(std::time::Duration::from_millis(200));

    let mut depth: u8 = 0;
    loop {
        let expand = depth < max_depth;
        let frontier = AtomicU64::new(0);
        tmp.par_iter().enumerate().for_each(|(i, cell)| {
            if cell.load(Ordering::Relaxed) != depth {
                return;
            }
            frontier.fetch_add(1, Ordering::Relaxed);
            if !expand {
                return;
            }
            for ni in successors(i as u64) {
                // Benign race: every writer that reaches `ni` at this level
                // writes the same value `depth + 1`.
                let _ = tmp[ni as usize].compare_exchange(
                    TMP_UNSEEN,
                    depth + 1,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                );
            }
        });
        #[cfg(feature = "progress")]
        pb.set_message(format!("generating pattern database (depth {depth}, frontier {})", frontier.load(Ordering::Relaxed)));
        if frontier.load(Ordering::Relaxed) == 0 || depth == max_depth {
            break;
        }
        depth += 1;
    }
    #[cfg(feature = "progress")]
    pb.finish_and_clear();

    let mut packed = PackedArray::new(domain_size as usize);
    for i in 0..domain_size {
        let v = tmp[i as usize].load(Ordering::Relaxed);
        packed.set(i, if v == TMP_UNSEEN { UNREACHED } else { v });
    }
    tracing::info!(max_depth_reached = depth, "pattern database generated");
    packed
}

/// Convenience wrapper for the common case of a single solved index.
pub fn generate_from_goal<F>(domain_size: u64, max_depth: u8, goal: u64, successors: F) -> PackedArray
where
    F: Fn(u64) -> [u64; N_TURNS] + Sync,
{
    generate(domain_size, max_depth, &[goal], successors)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A toy domain: states 0..N form a cycle under a single "turn" repeated
    /// 18 times (all turns identical), so distances are exactly the cycle
    /// distance to the goal.
    fn cycle_successors(n: u64) -> impl Fn(u64) -> [u64; N_TURNS] + Sync {
        move |i| [(i + 1) % n; N_TURNS]
    }

    #[test]
    fn distances_match_cycle_length() {
        let n = 10;
        let pdb = generate_from_goal(n, 15, 0, cycle_successors(n));
        for i in 0..n {
            // forward distance from goal 0 to i along the i -> i+1 edges
            assert_eq!(pdb.get(i) as u64, i);
        }
    }

    #[test]
    fn depth_cap_leaves_remainder_unreached() {
        let n = 10;
        let pdb = generate_from_goal(n, 3, 0, cycle_successors(n));
        assert_eq!(pdb.get(0), 0);
        assert_eq!(pdb.get(3), 3);
        assert_eq!(pdb.get(4), UNREACHED); // distance 4, beyond the cap
    }

    #[test]
    fn multi_seed_bfs_takes_nearest_seed() {
        let n = 10;
        let pdb = generate(n, 15, &[0, 5], cycle_successors(n));
        assert_eq!(pdb.get(5), 0);
        assert_eq!(pdb.get(6), 1);
        assert_eq!(pdb.get(0), 0);
        assert_eq!(pdb.get(4), 4); // nearer via forward wraparound from seed 0 than from seed 5
    }
}
