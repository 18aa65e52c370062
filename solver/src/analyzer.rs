//! Analyzer dispatch: for each of {cross, xcross family, pair family, eo
//! family, pseudo-cross family, pseudo-pair family}, builds the PDB set,
//! drives cascaded-pruning search over the six viewing rotations, and
//! assembles a CSV row.
//!
//! Physical layout: D-layer corners `DFR,DLF,DBL,DRB` (corner positions
//! 4..8) pair with equatorial edges `FR,FL,BL,BR` (edge positions 8..12),
//! one pair per first-layer slot 0..3. The D-layer cross edges
//! `DR,DF,DL,DB` (edge positions 4..8) are a separate tracked set.
//!
//! The std/pair/eo cascades additionally cross-check two Huge (Edges-6 x
//! Corners-2) composite PDBs, one per adjacent slot pair ("neighbor") and
//! one per diagonal slot pair ("diagonal"), each built once and reused
//! across its symmetric views via [`conj`]. They are not valid pruning for
//! the pseudo family, since a pseudo-tolerant goal can be reached in fewer
//! moves than true physical completion, and a Huge lookup built from the
//! true solved state would not be an admissible bound there.

use cube_base::{rotate_scramble, Turn, SIX_ROTATIONS};
use cube_core::{
    build_basic_table, build_scaled_transition_table, build_transition_table, conj, conj_sequence,
    encode, rot_map, solved_index, successor, PieceSlot, CORNERS_2, CORNERS_3, CORNER_1, CROSS_4,
    EDGES_6, EDGE_1, N_TURNS,
};

use std::path::Path;

use crate::error::TableError;
use crate::heuristic::PdbView;
use crate::packed::PackedArray;
use crate::pdb::generate;
use crate::search::{solve_subproblem, SearchNode, Task};
use crate::table_io::{read_i32_table, read_packed, write_i32_table, write_packed, MmappedPdb};

/// D-layer corners occupying first-layer slots 0..3.
pub const SLOT_CORNER: [u8; 4] = [4, 5, 6, 7];
/// Equatorial edges paired with the corner of the same slot.
pub const SLOT_EDGE: [u8; 4] = [8, 9, 10, 11];
/// The four D-layer cross edges, ascending position order.
pub const CROSS_EDGES: [u8; 4] = [4, 5, 6, 7];

/// Every transition table the analyzer needs, built once at startup.
pub struct Tables {
    pub cross: Vec<i32>,
    pub cross_x24: Vec<i32>,
    pub edge1_x24: Vec<i32>,
    pub corner1: Vec<i32>,
    pub edge1: Vec<i32>,
    pub corners2: Vec<i32>,
    /// Plain (unscaled) Edges-6 transitions: at `EDGES_6.size` states, a
    /// Corners-2-prescaled table (x504, as `cross_x24` does for x24) would
    /// overflow `i32` (`42_577_920 * 504 ~= 21.46e9`), so the Huge composite
    /// combines the two families with explicit `u64` arithmetic instead.
    pub edges6: Vec<i32>,
    pub corners3: Vec<i32>,
}

/// File stems for each table under a table directory.
const TABLE_NAMES: [&str; 8] =
    ["cross", "cross_x24", "edge1_x24", "corner1", "edge1", "corners2", "edges6", "corners3"];

impl Tables {
    pub fn build() -> Self {
        let corner_basic = build_basic_table(CORNER_1);
        let edge_basic = build_basic_table(EDGE_1);
        Tables {
            cross: build_transition_table(CROSS_4, &edge_basic),
            cross_x24: build_scaled_transition_table(CROSS_4, &edge_basic, 24),
            edge1_x24: build_scaled_transition_table(EDGE_1, &edge_basic, 24),
            corner1: build_transition_table(CORNER_1, &corner_basic),
            edge1: build_transition_table(EDGE_1, &edge_basic),
            corners2: build_transition_table(CORNERS_2, &corner_basic),
            edges6: build_transition_table(EDGES_6, &edge_basic),
            corners3: build_transition_table(CORNERS_3, &corner_basic),
        }
    }

    pub fn save(&self, dir: &Path) -> Result<(), TableError> {
        let tables = [
            &self.cross,
            &self.cross_x24,
            &self.edge1_x24,
            &self.corner1,
            &self.edge1,
            &self.corners2,
            &self.edges6,
            &self.corners3,
        ];
        for (name, table) in TABLE_NAMES.iter().zip(tables) {
            write_i32_table(&dir.join(format!("{name}.tbl")), table)?;
        }
        Ok(())
    }

    pub fn load(dir: &Path) -> Result<Self, TableError> {
        Ok(Tables {
            cross: read_i32_table(&dir.join("cross.tbl"))?,
            cross_x24: read_i32_table(&dir.join("cross_x24.tbl"))?,
            edge1_x24: read_i32_table(&dir.join("edge1_x24.tbl"))?,
            corner1: read_i32_table(&dir.join("corner1.tbl"))?,
            edge1: read_i32_table(&dir.join("edge1.tbl"))?,
            corners2: read_i32_table(&dir.join("corners2.tbl"))?,
            edges6: read_i32_table(&dir.join("edges6.tbl"))?,
            corners3: read_i32_table(&dir.join("corners3.tbl"))?,
        })
    }
}

fn cross_target() -> u32 {
    solved_index(&CROSS_EDGES, CROSS_4) as u32
}

fn corner_target(slot: usize) -> u32 {
    solved_index(&[SLOT_CORNER[slot]], CORNER_1) as u32
}

fn edge_target(slot: usize) -> u32 {
    solved_index(&[SLOT_EDGE[slot]], EDGE_1) as u32
}

/// Builds a PDB over the product domain `a_scaled(state)*scale + b(state)`,
/// flooding outward from `seeds` ("composite" / "seeded BFS" variants).
fn composite_pdb(a_scaled: &[i32], b: &[i32], scale: u32, seeds: &[u64], max_depth: u8) -> PackedArray {
    let b_size = (b.len() / N_TURNS) as u32;
    debug_assert_eq!(b_size, scale);
    let a_size = (a_scaled.len() / N_TURNS) as u64;
    let domain = a_size * scale as u64;
    generate(domain, max_depth, seeds, |i| {
        let a_part = (i / scale as u64) as u32;
        let b_part = (i % scale as u64) as u32;
        let mut out = [0u64; N_TURNS];
        for m in 0..N_TURNS as u8 {
            let turn = Turn::from_index(m);
            let na = successor(a_scaled, a_part, turn) as u64;
            let nb = successor(b, b_part, turn) as u64;
            out[m as usize] = na + nb;
        }
        out
    })
}

/// Builds a PDB over the Edges-6 x Corners-2 product domain, combining the
/// two plain (unscaled) transition tables with explicit `u64` arithmetic:
/// at this domain size a prescaled-by-504 table (the `composite_pdb` /
/// `cross_x24` convention) would overflow `i32`.
fn huge_composite_pdb(edges6: &[i32], corners2: &[i32], seeds: &[u64], max_depth: u8) -> PackedArray {
    let scale = CORNERS_2.size;
    let domain = EDGES_6.size * scale;
    generate(domain, max_depth, seeds, |i| {
        let a_part = (i / scale) as u32;
        let b_part = (i % scale) as u32;
        let mut out = [0u64; N_TURNS];
        for m in 0..N_TURNS as u8 {
            let turn = Turn::from_index(m);
            let na = successor(edges6, a_part, turn) as u64;
            let nb = successor(corners2, b_part, turn) as u64;
            out[m as usize] = na * scale + nb;
        }
        out
    })
}

/// A pattern database backed either by an owned packed array or by a
/// memory-mapped file, for the Huge (Edges-6 x Corners-2) composite whose
/// domain (~21 billion states) makes an owned in-RAM copy wasteful once a
/// generated copy already lives on disk.
pub enum HugePdb {
    InMemory(PackedArray),
    Mapped(MmappedPdb),
}

impl HugePdb {
    #[inline]
    pub fn get(&self, i: u64) -> u8 {
        match self {
            HugePdb::InMemory(p) => p.get(i),
            HugePdb::Mapped(m) => m.get(i),
        }
    }
}

/// The six edge positions tracked by a Huge composite anchored at slot 0:
/// the four cross edges plus slot 0's equatorial edge and `second`'s.
fn huge_edge_positions(second: u8) -> [u8; 6] {
    [CROSS_EDGES[0], CROSS_EDGES[1], CROSS_EDGES[2], CROSS_EDGES[3], SLOT_EDGE[0], second]
}

/// Solved-composite seed for the "neighbor" Huge PDB: slots 0 and 1 (an
/// adjacent pair) both fully home.
fn huge_neighbor_seed() -> u64 {
    let edges = huge_edge_positions(SLOT_EDGE[1]);
    let corners = [SLOT_CORNER[0], SLOT_CORNER[1]];
    solved_index(&edges, EDGES_6) * CORNERS_2.size + solved_index(&corners, CORNERS_2)
}

/// Solved-composite seed for the "diagonal" Huge PDB: slots 0 and 2 (a
/// diagonal pair) both fully home.
fn huge_diagonal_seed() -> u64 {
    let edges = huge_edge_positions(SLOT_EDGE[2]);
    let corners = [SLOT_CORNER[0], SLOT_CORNER[2]];
    solved_index(&edges, EDGES_6) * CORNERS_2.size + solved_index(&corners, CORNERS_2)
}

/// Extends [`pseudo_cross_seeds`] with slot 0's corner at home, giving seeds
/// for a composite (cross_x24+corner1) PDB admissible for the pseudo-cross
/// family's xcross-level sweep.
fn pseudo_xcross_seeds() -> Vec<u64> {
    pseudo_cross_seeds().iter().map(|&s| s * 24 + corner_target(0) as u64).collect()
}

/// Every PDB the analyzer queries, built once at startup from [`Tables`].
pub struct Pdbs {
    pub cross: PackedArray,
    pub xcross: PackedArray,
    pub pair: PackedArray,
    pub eo: PackedArray,
    pub pseudo_cross: PackedArray,
    pub pseudo_xcross: PackedArray,
    pub pseudo_pair_aux: PackedArray,
    pub pseudo_pair_aux3: PackedArray,
    /// The Huge (Edges-6 x Corners-2) pruning layer for adjacent slot
    /// pairs. `None` unless built via [`Pdbs::build_full`]; its domain
    /// (~21 billion states) makes it impractical to construct on every
    /// `Analyzer::build` call, so the cheap path that backs tests and
    /// interactive startup leaves it absent and falls back to weaker (but
    /// still correct) pruning.
    pub huge_neighbor: Option<HugePdb>,
    /// As [`Pdbs::huge_neighbor`], for diagonal slot pairs.
    pub huge_diagonal: Option<HugePdb>,
}

impl Pdbs {
    pub fn build(tables: &Tables, cap: u8) -> Self {
        let cross_seed = cross_target() as u64;
        let xcross_seed = cross_target() as u64 * 24 + corner_target(0) as u64;
        let pair_seed = edge_target(0) as u64 * 24 + corner_target(0) as u64;

        Pdbs {
            cross: generate(CROSS_4.size, cap, &[cross_seed], |i| {
                let mut out = [0u64; N_TURNS];
                for m in 0..N_TURNS as u8 {
                    out[m as usize] = successor(&tables.cross, i as u32, Turn::from_index(m)) as u64;
                }
                out
            }),
            xcross: composite_pdb(&tables.cross_x24, &tables.corner1, 24, &[xcross_seed], cap),
            pair: composite_pdb(&tables.edge1_x24, &tables.corner1, 24, &[pair_seed], cap),
            eo: generate(CROSS_4.size, cap, &eo_seeds(), |i| {
                let mut out = [0u64; N_TURNS];
                for m in 0..N_TURNS as u8 {
                    out[m as usize] = successor(&tables.cross, i as u32, Turn::from_index(m)) as u64;
                }
                out
            }),
            pseudo_cross: generate(CROSS_4.size, cap, &pseudo_cross_seeds(), |i| {
                let mut out = [0u64; N_TURNS];
                for m in 0..N_TURNS as u8 {
                    out[m as usize] = successor(&tables.cross, i as u32, Turn::from_index(m)) as u64;
                }
                out
            }),
            pseudo_xcross: composite_pdb(&tables.cross_x24, &tables.corner1, 24, &pseudo_xcross_seeds(), cap),
            pseudo_pair_aux: generate(CORNERS_2.size, cap, &[solved_index(&[SLOT_CORNER[0], SLOT_CORNER[1]], CORNERS_2)], |i| {
                let mut out = [0u64; N_TURNS];
                for m in 0..N_TURNS as u8 {
                    out[m as usize] = successor(&tables.corners2, i as u32, Turn::from_index(m)) as u64;
                }
                out
            }),
            pseudo_pair_aux3: generate(
                CORNERS_3.size,
                cap,
                &[solved_index(&[SLOT_CORNER[0], SLOT_CORNER[1], SLOT_CORNER[2]], CORNERS_3)],
                |i| {
                    let mut out = [0u64; N_TURNS];
                    for m in 0..N_TURNS as u8 {
                        out[m as usize] = successor(&tables.corners3, i as u32, Turn::from_index(m)) as u64;
                    }
                    out
                },
            ),
            huge_neighbor: None,
            huge_diagonal: None,
        }
    }

    /// As [`Pdbs::build`], plus the Huge neighbor/diagonal composites. This
    /// is the one-time table-generation path, not the fast in-memory path
    /// used by tests.
    pub fn build_full(tables: &Tables, cap: u8) -> Self {
        let mut pdbs = Self::build(tables, cap);
        let (neighbor, diagonal) = Self::build_huge(tables, cap);
        pdbs.huge_neighbor = Some(neighbor);
        pdbs.huge_diagonal = Some(diagonal);
        pdbs
    }

    fn build_huge(tables: &Tables, cap: u8) -> (HugePdb, HugePdb) {
        let neighbor = huge_composite_pdb(&tables.edges6, &tables.corners2, &[huge_neighbor_seed()], cap);
        let diagonal = huge_composite_pdb(&tables.edges6, &tables.corners2, &[huge_diagonal_seed()], cap);
        (HugePdb::InMemory(neighbor), HugePdb::InMemory(diagonal))
    }

    pub fn save(&self, dir: &Path) -> Result<(), TableError> {
        write_packed(&dir.join("cross.pdb"), &self.cross)?;
        write_packed(&dir.join("xcross.pdb"), &self.xcross)?;
        write_packed(&dir.join("pair.pdb"), &self.pair)?;
        write_packed(&dir.join("eo.pdb"), &self.eo)?;
        write_packed(&dir.join("pseudo_cross.pdb"), &self.pseudo_cross)?;
        write_packed(&dir.join("pseudo_xcross.pdb"), &self.pseudo_xcross)?;
        write_packed(&dir.join("pseudo_pair_aux.pdb"), &self.pseudo_pair_aux)?;
        write_packed(&dir.join("pseudo_pair_aux3.pdb"), &self.pseudo_pair_aux3)?;
        if let Some(HugePdb::InMemory(p)) = &self.huge_neighbor {
            write_packed(&dir.join("huge_neighbor.pdb"), p)?;
        }
        if let Some(HugePdb::InMemory(p)) = &self.huge_diagonal {
            write_packed(&dir.join("huge_diagonal.pdb"), p)?;
        }
        Ok(())
    }

    /// Loads the PDBs saved by [`Pdbs::save`]. The Huge neighbor/diagonal
    /// files are optional: if absent, the analyzer runs with weaker (but
    /// still correct) pruning rather than failing to start.
    pub fn load(dir: &Path) -> Result<Self, TableError> {
        let huge_neighbor = match MmappedPdb::open(&dir.join("huge_neighbor.pdb")) {
            Ok(m) => Some(HugePdb::Mapped(m)),
            Err(TableError::Missing { .. }) => {
                tracing::warn!("huge_neighbor.pdb not found, falling back to weaker pruning");
                None
            }
            Err(e) => return Err(e),
        };
        let huge_diagonal = match MmappedPdb::open(&dir.join("huge_diagonal.pdb")) {
            Ok(m) => Some(HugePdb::Mapped(m)),
            Err(TableError::Missing { .. }) => {
                tracing::warn!("huge_diagonal.pdb not found, falling back to weaker pruning");
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Pdbs {
            cross: read_packed(&dir.join("cross.pdb"))?,
            xcross: read_packed(&dir.join("xcross.pdb"))?,
            pair: read_packed(&dir.join("pair.pdb"))?,
            eo: read_packed(&dir.join("eo.pdb"))?,
            pseudo_cross: read_packed(&dir.join("pseudo_cross.pdb"))?,
            pseudo_xcross: read_packed(&dir.join("pseudo_xcross.pdb"))?,
            pseudo_pair_aux: read_packed(&dir.join("pseudo_pair_aux.pdb"))?,
            pseudo_pair_aux3: read_packed(&dir.join("pseudo_pair_aux3.pdb"))?,
            huge_neighbor,
            huge_diagonal,
        })
    }
}

/// Every orientation-only solved state of the four cross edges: the edge
/// orientation done-ness test shouldn't care which physical edge sits in
/// which slot, so every permutation of the four tracked positions at
/// orientation 0 is a seed.
fn eo_seeds() -> Vec<u64> {
    permutations_of(&CROSS_EDGES)
        .into_iter()
        .map(|perm| encode(&slots_at(&perm), CROSS_4.c, CROSS_4.pn))
        .collect()
}

/// The true cross target plus every state reachable by swapping exactly two
/// of the tracked edges' positions (a single slot-swap; GLOSSARY "Pseudo-X").
fn pseudo_cross_seeds() -> Vec<u64> {
    let mut seeds = vec![cross_target() as u64];
    for i in 0..4 {
        for j in (i + 1)..4 {
            let mut swapped = CROSS_EDGES;
            swapped.swap(i, j);
            seeds.push(encode(&slots_at(&swapped), CROSS_4.c, CROSS_4.pn));
        }
    }
    seeds
}

fn slots_at(positions: &[u8]) -> Vec<PieceSlot> {
    positions.iter().map(|&pos| PieceSlot { pos, ori: 0 }).collect()
}

fn permutations_of(items: &[u8; 4]) -> Vec<[u8; 4]> {
    let mut out = Vec::with_capacity(24);
    let mut a = *items;
    permute(&mut a, 0, &mut out);
    out
}

fn permute(a: &mut [u8; 4], k: usize, out: &mut Vec<[u8; 4]>) {
    if k == a.len() {
        out.push(*a);
        return;
    }
    for i in k..a.len() {
        a.swap(k, i);
        permute(a, k + 1, out);
        a.swap(k, i);
    }
}

/// Folds a scramble's turns onto `start`, remapping each through `remap`
/// before indexing `table` (identity remap for an unconjugated walk).
fn fold<F: Fn(Turn) -> Turn>(table: &[i32], start: u32, scramble: &[Turn], remap: F) -> u32 {
    let mut coord = start;
    for &t in scramble {
        coord = successor(table, coord, remap(t));
    }
    coord
}

/// A plain single-family node: tracks one coordinate against one PDB. Used
/// for both the Cross analyzer and the Pseudo-cross analyzer (same shape,
/// different PDB seeding).
#[derive(Clone, Copy)]
pub struct CrossNode<'a> {
    view: &'a PdbView,
    coord: u32,
}

impl<'a> CrossNode<'a> {
    pub fn seed(view: &'a PdbView, scramble: &[Turn]) -> Self {
        CrossNode { view, coord: fold(&view.transitions, cross_target(), scramble, |t| t) }
    }
}

impl<'a> SearchNode for CrossNode<'a> {
    fn h_init(&self) -> u8 {
        self.view.lookup(self.coord as u64)
    }
    fn prunes(&self, budget: u8) -> bool {
        self.view.lookup(self.coord as u64) > budget
    }
    fn apply(&self, turn: Turn) -> Self {
        CrossNode { view: self.view, coord: self.view.successor(self.coord, turn) }
    }
    fn is_goal(&self) -> bool {
        self.view.lookup(self.coord as u64) == 0
    }
}

/// Largest number of unordered pairs among up to 4 first-layer slots
/// (`C(4,2) = 6`).
const MAX_PAIRS: usize = 6;

/// One active Huge-PDB cross-check for a pair of first-layer slots tracked
/// by a [`FirstLayerNode`].
#[derive(Clone, Copy)]
struct PairConstraint {
    view: usize,
    diagonal: bool,
    /// `u64`: the Edges-6 x Corners-2 domain (~21.46 billion states)
    /// overflows `u32`.
    coord: u64,
}

/// Classifies an unordered pair of first-layer slots (each in `0..4`) as
/// either a "neighbor" (cyclically adjacent) or "diagonal" pair, and the
/// view offset (`0..4` for neighbor, `0..2` for diagonal, conjugated via
/// [`conj`]) that reuses the base Huge PDB for this specific pair.
fn classify_pair(p: usize, q: usize) -> (usize, bool) {
    let (lo, hi) = if p < q { (p, q) } else { (q, p) };
    match hi - lo {
        1 => (lo, false),
        3 => (hi, false),
        2 => (lo, true),
        _ => unreachable!("first-layer slots are distinct indices in 0..4"),
    }
}

fn huge_lookup(huge_neighbor: Option<&HugePdb>, huge_diagonal: Option<&HugePdb>, pc: &PairConstraint) -> u8 {
    let pdb = if pc.diagonal { huge_diagonal } else { huge_neighbor };
    pdb.map(|p| p.get(pc.coord)).unwrap_or(0)
}

/// `K` simultaneous first-layer slots, tracked as `K` independent
/// (cross x24 + corner) composites reusing one slot-0 PDB via [`conj`],
/// each slot's paired edge tracked as a plain equality constraint, plus a
/// Huge-PDB cross-check for every pair of tracked slots (`K>=2`) when one
/// is available.
#[derive(Clone, Copy)]
pub struct FirstLayerNode<'a, const K: usize> {
    cross_x24: &'a [i32],
    corner1: &'a [i32],
    edge1: &'a [i32],
    pdb: &'a PackedArray,
    slots: [usize; K],
    composites: [u32; K],
    edge_coords: [u32; K],
    edge_targets: [u32; K],
    edges6: &'a [i32],
    corners2: &'a [i32],
    huge_neighbor: Option<&'a HugePdb>,
    huge_diagonal: Option<&'a HugePdb>,
    pairs: [Option<PairConstraint>; MAX_PAIRS],
}

impl<'a, const K: usize> FirstLayerNode<'a, K> {
    pub fn seed(
        tables: &'a Tables,
        pdb: &'a PackedArray,
        huge_neighbor: Option<&'a HugePdb>,
        huge_diagonal: Option<&'a HugePdb>,
        slots: [usize; K],
        scramble: &[Turn],
    ) -> Self {
        let base = cross_target() * 24 + corner_target(0);
        let mut composites = [0u32; K];
        let mut edge_coords = [0u32; K];
        let mut edge_targets = [0u32; K];
        for (j, &slot) in slots.iter().enumerate() {
            let conjugated = conj_sequence(scramble, slot);
            let mut composite = base;
            for &t in &conjugated {
                let cross_part = composite / 24;
                let corner_part = composite % 24;
                let nc = successor(&tables.cross_x24, cross_part, t);
                let nk = successor(&tables.corner1, corner_part, t);
                composite = nc + nk;
            }
            composites[j] = composite;
            edge_targets[j] = edge_target(slot);
            edge_coords[j] = fold(&tables.edge1, edge_targets[j], scramble, |t| t);
        }

        let mut pairs = [None; MAX_PAIRS];
        let mut idx = 0;
        for i in 0..K {
            for j in (i + 1)..K {
                let (view, diagonal) = classify_pair(slots[i], slots[j]);
                let active = if diagonal { huge_diagonal } else { huge_neighbor };
                pairs[idx] = active.map(|_| {
                    let scale = CORNERS_2.size;
                    let base = if diagonal { huge_diagonal_seed() } else { huge_neighbor_seed() };
                    let conjugated = conj_sequence(scramble, view);
                    let mut coord = base;
                    for &t in &conjugated {
                        let a_part = (coord / scale) as u32;
                        let b_part = (coord % scale) as u32;
                        let na = successor(&tables.edges6, a_part, t) as u64;
                        let nb = successor(&tables.corners2, b_part, t) as u64;
                        coord = na * scale + nb;
                    }
                    PairConstraint { view, diagonal, coord }
                });
                idx += 1;
            }
        }

        FirstLayerNode {
            cross_x24: &tables.cross_x24,
            corner1: &tables.corner1,
            edge1: &tables.edge1,
            pdb,
            slots,
            composites,
            edge_coords,
            edge_targets,
            edges6: &tables.edges6,
            corners2: &tables.corners2,
            huge_neighbor,
            huge_diagonal,
            pairs,
        }
    }

    fn huge_max(&self) -> u8 {
        self.pairs
            .iter()
            .filter_map(|p| *p)
            .map(|pc| huge_lookup(self.huge_neighbor, self.huge_diagonal, &pc))
            .max()
            .unwrap_or(0)
    }

    fn huge_prunes(&self, budget: u8) -> bool {
        self.pairs
            .iter()
            .filter_map(|p| *p)
            .any(|pc| huge_lookup(self.huge_neighbor, self.huge_diagonal, &pc) > budget)
    }

    fn huge_is_goal(&self) -> bool {
        self.pairs
            .iter()
            .filter_map(|p| *p)
            .all(|pc| huge_lookup(self.huge_neighbor, self.huge_diagonal, &pc) == 0)
    }
}

impl<'a, const K: usize> SearchNode for FirstLayerNode<'a, K> {
    fn h_init(&self) -> u8 {
        let base = self.composites.iter().map(|&c| self.pdb.get(c as u64)).max().unwrap_or(0);
        base.max(self.huge_max())
    }
    fn prunes(&self, budget: u8) -> bool {
        self.composites.iter().any(|&c| self.pdb.get(c as u64) > budget) || self.huge_prunes(budget)
    }
    fn apply(&self, turn: Turn) -> Self {
        let mut next = *self;
        for j in 0..K {
            let conj_turn = conj(turn, self.slots[j]);
            let cross_part = self.composites[j] / 24;
            let corner_part = self.composites[j] % 24;
            let nc = successor(self.cross_x24, cross_part, conj_turn);
            let nk = successor(self.corner1, corner_part, conj_turn);
            next.composites[j] = nc + nk;
            next.edge_coords[j] = successor(self.edge1, self.edge_coords[j], turn);
        }
        for (j, pair) in self.pairs.iter().enumerate() {
            if let Some(pc) = pair {
                let scale = CORNERS_2.size;
                let conj_turn = conj(turn, pc.view);
                let a_part = (pc.coord / scale) as u32;
                let b_part = (pc.coord % scale) as u32;
                let na = successor(self.edges6, a_part, conj_turn) as u64;
                let nb = successor(self.corners2, b_part, conj_turn) as u64;
                next.pairs[j] = Some(PairConstraint { coord: na * scale + nb, ..*pc });
            }
        }
        next
    }
    fn is_goal(&self) -> bool {
        (0..K).all(|j| self.pdb.get(self.composites[j] as u64) == 0 && self.edge_coords[j] == self.edge_targets[j])
            && self.huge_is_goal()
    }
}

/// `pair` analyzer: `K` XCross composites plus, per tracked slot, an
/// independent edge+corner "paired" composite (edge1 x24 + corner1,
/// reused across slots via [`conj`] exactly like the XCross composite).
/// Approximated as "corner and edge both at their own home slot
/// simultaneously" per the note on [`Analyzer::pair_sweep`].
#[derive(Clone, Copy)]
pub struct PairNode<'a, const K: usize> {
    base: FirstLayerNode<'a, K>,
    edge1_x24: &'a [i32],
    corner1: &'a [i32],
    pair_pdb: &'a PackedArray,
    slots: [usize; K],
    pair_coords: [u32; K],
}

impl<'a, const K: usize> PairNode<'a, K> {
    pub fn seed(
        tables: &'a Tables,
        xcross_pdb: &'a PackedArray,
        pair_pdb: &'a PackedArray,
        huge_neighbor: Option<&'a HugePdb>,
        huge_diagonal: Option<&'a HugePdb>,
        slots: [usize; K],
        scramble: &[Turn],
    ) -> Self {
        let mut pair_coords = [0u32; K];
        for (j, &slot) in slots.iter().enumerate() {
            let seed = edge_target(slot) * 24 + corner_target(slot);
            let conjugated = conj_sequence(scramble, slot);
            let mut coord = seed;
            for &t in &conjugated {
                let edge_part = coord / 24;
                let corner_part = coord % 24;
                let ne = successor(&tables.edge1_x24, edge_part, t);
                let nk = successor(&tables.corner1, corner_part, t);
                coord = ne + nk;
            }
            pair_coords[j] = coord;
        }
        PairNode {
            base: FirstLayerNode::seed(tables, xcross_pdb, huge_neighbor, huge_diagonal, slots, scramble),
            edge1_x24: &tables.edge1_x24,
            corner1: &tables.corner1,
            pair_pdb,
            slots,
            pair_coords,
        }
    }
}

impl<'a, const K: usize> SearchNode for PairNode<'a, K> {
    fn h_init(&self) -> u8 {
        let pair_max = self.pair_coords.iter().map(|&c| self.pair_pdb.get(c as u64)).max().unwrap_or(0);
        self.base.h_init().max(pair_max)
    }
    fn prunes(&self, budget: u8) -> bool {
        self.base.prunes(budget) || self.pair_coords.iter().any(|&c| self.pair_pdb.get(c as u64) > budget)
    }
    fn apply(&self, turn: Turn) -> Self {
        let mut next = *self;
        next.base = self.base.apply(turn);
        for j in 0..K {
            let conj_turn = conj(turn, self.slots[j]);
            let edge_part = self.pair_coords[j] / 24;
            let corner_part = self.pair_coords[j] % 24;
            let ne = successor(self.edge1_x24, edge_part, conj_turn);
            let nk = successor(self.corner1, corner_part, conj_turn);
            next.pair_coords[j] = ne + nk;
        }
        next
    }
    fn is_goal(&self) -> bool {
        self.base.is_goal() && self.pair_coords.iter().all(|&c| self.pair_pdb.get(c as u64) == 0)
    }
}

/// `eo` analyzer: `K` XCross composites plus one independent
/// orientation-only PDB (`dep-eo`) over the whole cross family, unaffected
/// by which slots are tracked (EO doneness is position-invariant). Per the
/// open question these are two distinct PDBs queried for superficially
/// similar patterns; kept as separate fields with no shared lookup path.
#[derive(Clone, Copy)]
pub struct EoNode<'a, const K: usize> {
    base: FirstLayerNode<'a, K>,
    eo_transitions: &'a [i32],
    eo_pdb: &'a PackedArray,
    eo_coord: u32,
}

impl<'a, const K: usize> EoNode<'a, K> {
    pub fn seed(
        tables: &'a Tables,
        xcross_pdb: &'a PackedArray,
        eo_pdb: &'a PackedArray,
        huge_neighbor: Option<&'a HugePdb>,
        huge_diagonal: Option<&'a HugePdb>,
        slots: [usize; K],
        scramble: &[Turn],
    ) -> Self {
        EoNode {
            base: FirstLayerNode::seed(tables, xcross_pdb, huge_neighbor, huge_diagonal, slots, scramble),
            eo_transitions: &tables.cross,
            eo_pdb,
            eo_coord: fold(&tables.cross, cross_target(), scramble, |t| t),
        }
    }
}

impl<'a, const K: usize> SearchNode for EoNode<'a, K> {
    fn h_init(&self) -> u8 {
        self.base.h_init().max(self.eo_pdb.get(self.eo_coord as u64))
    }
    fn prunes(&self, budget: u8) -> bool {
        self.base.prunes(budget) || self.eo_pdb.get(self.eo_coord as u64) > budget
    }
    fn apply(&self, turn: Turn) -> Self {
        EoNode {
            base: self.base.apply(turn),
            eo_transitions: self.eo_transitions,
            eo_pdb: self.eo_pdb,
            eo_coord: successor(self.eo_transitions, self.eo_coord, turn),
        }
    }
    fn is_goal(&self) -> bool {
        self.base.is_goal() && self.eo_pdb.get(self.eo_coord as u64) == 0
    }
}

/// `pseudo-pair` analyzer: `K` pseudo-XCross composites (no Huge
/// cross-check; see module note) plus an auxiliary corner-only PDB over a
/// fixed set of home slots, reused across the four y-axis views of the
/// pseudo-assignment via [`rot_map`]. The aux family is 2-piece for
/// `K<=2` and 3-piece for `K==3` (the original's "Corner3" pruning layer),
/// chosen by the caller.
#[derive(Clone, Copy)]
pub struct PseudoPairNode<'a, const K: usize> {
    base: FirstLayerNode<'a, K>,
    aux_transitions: &'a [i32],
    aux_pdb: &'a PackedArray,
    view: usize,
    aux_coord: u32,
}

impl<'a, const K: usize> PseudoPairNode<'a, K> {
    #[allow(clippy::too_many_arguments)]
    pub fn seed(
        tables: &'a Tables,
        pseudo_xcross_pdb: &'a PackedArray,
        aux_transitions: &'a [i32],
        aux_pdb: &'a PackedArray,
        aux_seed: u32,
        view: usize,
        slots: [usize; K],
        scramble: &[Turn],
    ) -> Self {
        PseudoPairNode {
            base: FirstLayerNode::seed(tables, pseudo_xcross_pdb, None, None, slots, scramble),
            aux_transitions,
            aux_pdb,
            view,
            aux_coord: fold(aux_transitions, aux_seed, scramble, |t| rot_map(t, view)),
        }
    }
}

impl<'a, const K: usize> SearchNode for PseudoPairNode<'a, K> {
    fn h_init(&self) -> u8 {
        self.base.h_init().max(self.aux_pdb.get(self.aux_coord as u64))
    }
    fn prunes(&self, budget: u8) -> bool {
        self.base.prunes(budget) || self.aux_pdb.get(self.aux_coord as u64) > budget
    }
    fn apply(&self, turn: Turn) -> Self {
        PseudoPairNode {
            base: self.base.apply(turn),
            aux_transitions: self.aux_transitions,
            aux_pdb: self.aux_pdb,
            view: self.view,
            aux_coord: successor(self.aux_transitions, self.aux_coord, rot_map(turn, self.view)),
        }
    }
    fn is_goal(&self) -> bool {
        self.base.is_goal() && self.aux_pdb.get(self.aux_coord as u64) == 0
    }
}

fn slot_combos<const K: usize>() -> Vec<[usize; K]> {
    fn to_array<const K: usize>(v: &[usize]) -> [usize; K] {
        let mut out = [0usize; K];
        out.copy_from_slice(v);
        out
    }
    let raw: Vec<Vec<usize>> = match K {
        1 => vec![vec![0], vec![1], vec![2], vec![3]],
        2 => vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]],
        3 => vec![vec![0, 1, 2], vec![0, 1, 3], vec![0, 2, 3], vec![1, 2, 3]],
        4 => vec![vec![0, 1, 2, 3]],
        _ => panic!("no first-layer analyzer needs more than 4 slots"),
    };
    raw.iter().map(|v| to_array(v)).collect()
}

fn solve_first_layer<const K: usize>(
    tables: &Tables,
    pdb: &PackedArray,
    huge_neighbor: Option<&HugePdb>,
    huge_diagonal: Option<&HugePdb>,
    scramble: &[Turn],
    cap: u8,
) -> u8 {
    let mut tasks: Vec<Task<FirstLayerNode<K>>> = slot_combos::<K>()
        .into_iter()
        .map(|slots| {
            let node = FirstLayerNode::seed(tables, pdb, huge_neighbor, huge_diagonal, slots, scramble);
            Task { node, h_init: node.h_init() }
        })
        .collect();
    solve_subproblem(&mut tasks, cap)
}

/// Column-suffix convention for the six sweep rotations: the four
/// y-axis views are labelled `z0..z3`, the two x-axis views `x0,x1`.
pub const ROTATION_SUFFIX: [&str; 6] = ["z0", "z1", "z2", "z3", "x0", "x1"];

/// The complete PDB/table set plus the search-depth cap, ready to analyze
/// scrambles.
pub struct Analyzer {
    tables: Tables,
    pdbs: Pdbs,
    cross_view: PdbView,
    pseudo_cross_view: PdbView,
    cap: u8,
}

/// One column-group name per analyzer variant/level; each gets the six
/// [`ROTATION_SUFFIX`] columns. `pair`/`eo` sweep `K=1..=4` (xcross family
/// levels), `pseudo`/`pseudo-pair` sweep `K=1..=3` (the original never
/// reaches a four-slot pseudo level).
const VARIANT_GROUPS: [&str; 20] = [
    "cross",
    "xcross",
    "xxcross",
    "xxxcross",
    "xxxxcross",
    "xcross_pair",
    "xxcross_pair",
    "xxxcross_pair",
    "xxxxcross_pair",
    "eo_xcross",
    "eo_xxcross",
    "eo_xxxcross",
    "eo_xxxxcross",
    "pseudo_cross",
    "pseudo_xcross",
    "pseudo_xxcross",
    "pseudo_xxxcross",
    "pseudo_xcross_pseudo_pair",
    "pseudo_xxcross_pseudo_pair",
    "pseudo_xxxcross_pseudo_pair",
];

impl Analyzer {
    pub fn build(cap: u8) -> Self {
        let tables = Tables::build();
        let pdbs = Pdbs::build(&tables, cap);
        Self::from_parts(tables, pdbs, cap)
    }

    /// Builds fresh tables/PDBs, including the Huge neighbor/diagonal
    /// composites, and persists them to `dir`, for a one-time
    /// table-generation step run ahead of normal analyzer startup.
    pub fn generate_and_save(dir: &Path, cap: u8) -> Result<Self, TableError> {
        let tables = Tables::build();
        let pdbs = Pdbs::build_full(&tables, cap);
        std::fs::create_dir_all(dir).map_err(|source| TableError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        tables.save(dir)?;
        pdbs.save(dir)?;
        Ok(Self::from_parts(tables, pdbs, cap))
    }

    /// Loads previously generated tables/PDBs from `dir`. Fatal if any
    /// required file is missing or the wrong size; the Huge PDBs are the
    /// one exception (see [`Pdbs::load`]).
    pub fn load(dir: &Path, cap: u8) -> Result<Self, TableError> {
        let tables = Tables::load(dir)?;
        let pdbs = Pdbs::load(dir)?;
        Ok(Self::from_parts(tables, pdbs, cap))
    }

    fn from_parts(tables: Tables, pdbs: Pdbs, cap: u8) -> Self {
        let cross_view = PdbView::new(tables.cross.clone(), pdbs.cross.clone());
        let pseudo_cross_view = PdbView::new(tables.cross.clone(), pdbs.pseudo_cross.clone());
        Analyzer { tables, pdbs, cross_view, pseudo_cross_view, cap }
    }

    pub fn column_headers(&self) -> Vec<String> {
        let mut headers = Vec::with_capacity(VARIANT_GROUPS.len() * ROTATION_SUFFIX.len());
        for name in VARIANT_GROUPS {
            for suffix in ROTATION_SUFFIX {
                headers.push(format!("{name}_{suffix}"));
            }
        }
        headers
    }

    /// Runs every variant/level across all six rotations for one scramble,
    /// producing one cell per header from [`column_headers`].
    pub fn analyze(&self, scramble: &[Turn]) -> Vec<u8> {
        let mut row = Vec::with_capacity(VARIANT_GROUPS.len() * ROTATION_SUFFIX.len());
        for &rotation in &SIX_ROTATIONS {
            let rotated = rotate_scramble(rotation, scramble);
            row.push(self.cross(&rotated));
            row.push(self.first_layer::<1>(&rotated));
            row.push(self.first_layer::<2>(&rotated));
            row.push(self.first_layer::<3>(&rotated));
            row.push(self.first_layer::<4>(&rotated));
            row.push(self.pair_sweep::<1>(&rotated));
            row.push(self.pair_sweep::<2>(&rotated));
            row.push(self.pair_sweep::<3>(&rotated));
            row.push(self.pair_sweep::<4>(&rotated));
            row.push(self.eo_sweep::<1>(&rotated));
            row.push(self.eo_sweep::<2>(&rotated));
            row.push(self.eo_sweep::<3>(&rotated));
            row.push(self.eo_sweep::<4>(&rotated));
            row.push(self.pseudo_cross(&rotated));
            row.push(self.pseudo_xcross_sweep::<1>(&rotated));
            row.push(self.pseudo_xcross_sweep::<2>(&rotated));
            row.push(self.pseudo_xcross_sweep::<3>(&rotated));
            row.push(self.pseudo_pair_sweep::<1>(&rotated));
            row.push(self.pseudo_pair_sweep::<2>(&rotated));
            row.push(self.pseudo_pair_sweep::<3>(&rotated));
        }
        row
    }

    fn huge_refs(&self) -> (Option<&HugePdb>, Option<&HugePdb>) {
        (self.pdbs.huge_neighbor.as_ref(), self.pdbs.huge_diagonal.as_ref())
    }

    fn cross(&self, scramble: &[Turn]) -> u8 {
        let node = CrossNode::seed(&self.cross_view, scramble);
        let mut tasks = vec![Task { node, h_init: node.h_init() }];
        solve_subproblem(&mut tasks, self.cap)
    }

    fn first_layer<const K: usize>(&self, scramble: &[Turn]) -> u8 {
        let (huge_neighbor, huge_diagonal) = self.huge_refs();
        solve_first_layer::<K>(&self.tables, &self.pdbs.xcross, huge_neighbor, huge_diagonal, scramble, self.cap)
    }

    /// "Pair" is approximated as corner-and-edge both at their own home slot
    /// simultaneously, rather than mutually matched at an arbitrary
    /// location — this coordinate system tracks position, not relative
    /// corner/edge angle. Sweeps `K=1..=4` first-layer slots, ANDing the
    /// pair constraint at every slot in the combo.
    fn pair_sweep<const K: usize>(&self, scramble: &[Turn]) -> u8 {
        let (huge_neighbor, huge_diagonal) = self.huge_refs();
        let mut tasks: Vec<Task<PairNode<K>>> = slot_combos::<K>()
            .into_iter()
            .map(|slots| {
                let node = PairNode::seed(&self.tables, &self.pdbs.xcross, &self.pdbs.pair, huge_neighbor, huge_diagonal, slots, scramble);
                Task { node, h_init: node.h_init() }
            })
            .collect();
        solve_subproblem(&mut tasks, self.cap)
    }

    /// Sweeps `K=1..=4` first-layer slots, ANDing the position-invariant
    /// EO constraint at every level.
    fn eo_sweep<const K: usize>(&self, scramble: &[Turn]) -> u8 {
        let (huge_neighbor, huge_diagonal) = self.huge_refs();
        let mut tasks: Vec<Task<EoNode<K>>> = slot_combos::<K>()
            .into_iter()
            .map(|slots| {
                let node = EoNode::seed(&self.tables, &self.pdbs.xcross, &self.pdbs.eo, huge_neighbor, huge_diagonal, slots, scramble);
                Task { node, h_init: node.h_init() }
            })
            .collect();
        solve_subproblem(&mut tasks, self.cap)
    }

    fn pseudo_cross(&self, scramble: &[Turn]) -> u8 {
        let node = CrossNode::seed(&self.pseudo_cross_view, scramble);
        let mut tasks = vec![Task { node, h_init: node.h_init() }];
        solve_subproblem(&mut tasks, self.cap)
    }

    /// Sweeps `K=1..=3` first-layer slots against the pseudo-tolerant
    /// xcross PDB; no Huge cross-check (see module note).
    fn pseudo_xcross_sweep<const K: usize>(&self, scramble: &[Turn]) -> u8 {
        solve_first_layer::<K>(&self.tables, &self.pdbs.pseudo_xcross, None, None, scramble, self.cap)
    }

    /// Sweeps `K=1..=3` first-layer slots against the pseudo-tolerant
    /// xcross PDB, each level additionally checked against a fixed-slot
    /// corner-home aux PDB (2-piece for `K<=2`, 3-piece for `K==3`) across
    /// its four rotated views.
    fn pseudo_pair_sweep<const K: usize>(&self, scramble: &[Turn]) -> u8 {
        let (aux_transitions, aux_pdb, aux_seed): (&[i32], &PackedArray, u32) = if K <= 2 {
            (
                &self.tables.corners2,
                &self.pdbs.pseudo_pair_aux,
                solved_index(&[SLOT_CORNER[0], SLOT_CORNER[1]], CORNERS_2) as u32,
            )
        } else {
            (
                &self.tables.corners3,
                &self.pdbs.pseudo_pair_aux3,
                solved_index(&[SLOT_CORNER[0], SLOT_CORNER[1], SLOT_CORNER[2]], CORNERS_3) as u32,
            )
        };
        let mut tasks: Vec<Task<PseudoPairNode<K>>> = Vec::new();
        for slots in slot_combos::<K>() {
            for view in 0..4 {
                let node = PseudoPairNode::seed(
                    &self.tables,
                    &self.pdbs.pseudo_xcross,
                    aux_transitions,
                    aux_pdb,
                    aux_seed,
                    view,
                    slots,
                    scramble,
                );
                tasks.push(Task { node, h_init: node.h_init() });
            }
        }
        solve_subproblem(&mut tasks, self.cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn scramble(s: &str) -> Vec<Turn> {
        s.split_whitespace().map(|t| Turn::from_str(t).unwrap()).collect()
    }

    #[test]
    fn empty_scramble_solves_everything_at_zero_depth() {
        let analyzer = Analyzer::build(7);
        let row = analyzer.analyze(&scramble(""));
        assert!(row.iter().all(|&v| v == 0));
    }

    #[test]
    fn single_u_turn_does_not_disturb_the_identity_cross() {
        let analyzer = Analyzer::build(7);
        let row = analyzer.analyze(&scramble("U"));
        assert_eq!(row[0], 0); // cross_z0
    }

    #[test]
    fn r_move_breaks_the_identity_cross_by_two() {
        let analyzer = Analyzer::build(7);
        let row = analyzer.analyze(&scramble("R"));
        assert_eq!(row[0], 2); // cross_z0
    }

    #[test]
    fn sune_does_not_disturb_the_cross() {
        let analyzer = Analyzer::build(7);
        let row = analyzer.analyze(&scramble("R U R' U R U2 R'"));
        assert_eq!(row[0], 0);
    }

    #[test]
    fn column_headers_match_row_length() {
        let analyzer = Analyzer::build(5);
        assert_eq!(analyzer.column_headers().len(), analyzer.analyze(&scramble("R")).len());
    }

    #[test]
    fn pdbs_build_leaves_huge_pdbs_absent() {
        let tables = Tables::build();
        let pdbs = Pdbs::build(&tables, 5);
        assert!(pdbs.huge_neighbor.is_none());
        assert!(pdbs.huge_diagonal.is_none());
    }

    #[test]
    fn huge_pair_classification_matches_cyclic_adjacency() {
        assert_eq!(classify_pair(0, 1), (0, false));
        assert_eq!(classify_pair(1, 2), (1, false));
        assert_eq!(classify_pair(2, 3), (2, false));
        assert_eq!(classify_pair(3, 0), (3, false));
        assert_eq!(classify_pair(0, 2), (0, true));
        assert_eq!(classify_pair(1, 3), (1, true));
    }
}
