//! Bijection between ordered, oriented piece selections and small integers.
//!
//! For parameters `(n, c, pn)` a coordinate enumerates ordered selections of
//! `n` distinct pieces out of `pn`, each carrying an orientation in `0..c`.
//! The domain size is `P(pn, n) * c^n` where `P` is the falling factorial.

use cube_base::N_TURNS;

/// One decoded piece slot, already scaled by 18 so it can be used directly
/// as a row offset into a per-piece basic transition table: `basic[token + m]`.
pub type PieceToken = u32;

/// A single piece's (position, orientation), as produced by decoding a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSlot {
    pub pos: u8,
    pub ori: u8,
}

impl PieceSlot {
    pub fn token(self, c: u32) -> PieceToken {
        N_TURNS as u32 * (c * self.pos as u32 + self.ori as u32)
    }

    pub fn from_token(token: PieceToken, c: u32) -> Self {
        let val = token / N_TURNS as u32;
        PieceSlot {
            pos: (val / c) as u8,
            ori: (val % c) as u8,
        }
    }
}

/// Encodes `n` ordered, oriented piece slots into a single coordinate.
///
/// `a[i]` must hold distinct `pos` values in `0..pn`. The permutation part
/// uses the standard Horner mixed-radix reduction over shrinking digit
/// radixes `pn, pn-1, ..., pn-n+1`; the orientation part is plain base-`c`,
/// most significant first. Final index is `perm * c^n + orient`.
pub fn encode(a: &[PieceSlot], c: u32, pn: u32) -> u64 {
    let n = a.len();
    let mut used = vec![false; pn as usize];
    let mut perm: u64 = 0;
    let mut orient: u64 = 0;
    for (i, slot) in a.iter().enumerate() {
        let rank = used[..slot.pos as usize].iter().filter(|&&u| u).count() as u64;
        perm = perm * (pn as u64 - i as u64) + rank;
        orient = orient * c as u64 + slot.ori as u64;
        used[slot.pos as usize] = true;
    }
    let c_pow_n = (c as u64).pow(n as u32);
    perm * c_pow_n + orient
}

/// Inverse of [`encode`]; returns each slot pre-scaled as a [`PieceToken`].
pub fn decode(index: u64, n: usize, c: u32, pn: u32) -> Vec<PieceToken> {
    let c_pow_n = (c as u64).pow(n as u32);
    let mut perm = index / c_pow_n;
    let mut orient = index % c_pow_n;

    let mut oris = vec![0u8; n];
    for i in (0..n).rev() {
        oris[i] = (orient % c as u64) as u8;
        orient /= c as u64;
    }

    let mut ranks = vec![0u64; n];
    for i in (0..n).rev() {
        let radix = pn as u64 - i as u64;
        ranks[i] = perm % radix;
        perm /= radix;
    }

    let mut available: Vec<u8> = (0..pn as u8).collect();
    let mut tokens = Vec::with_capacity(n);
    for i in 0..n {
        let pos = available.remove(ranks[i] as usize);
        tokens.push(PieceSlot { pos, ori: oris[i] }.token(c));
    }
    tokens
}

/// `P(pn, n) * c^n`: the size of the coordinate domain for this family.
pub fn domain_size(n: usize, c: u32, pn: u32) -> u64 {
    let mut p: u64 = 1;
    for i in 0..n as u64 {
        p *= pn as u64 - i;
    }
    p * (c as u64).pow(n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(n: usize, c: u32, pn: u32, a: &[PieceSlot]) {
        let idx = encode(a, c, pn);
        let back = decode(idx, n, c, pn);
        let back_slots: Vec<PieceSlot> = back.iter().map(|&t| PieceSlot::from_token(t, c)).collect();
        assert_eq!(back_slots, a, "round trip failed for index {idx}");
    }

    #[test]
    fn edge_single_piece_round_trips() {
        for pos in 0..12u8 {
            for ori in 0..2u8 {
                round_trip(1, 2, 12, &[PieceSlot { pos, ori }]);
            }
        }
    }

    #[test]
    fn corner_pair_round_trips_every_index() {
        let n = 2;
        let (c, pn) = (3u32, 8u32);
        let size = domain_size(n, c, pn);
        for idx in 0..size {
            let tokens = decode(idx, n, c, pn);
            let slots: Vec<PieceSlot> = tokens.iter().map(|&t| PieceSlot::from_token(t, c)).collect();
            assert_eq!(encode(&slots, c, pn), idx);
        }
    }

    #[test]
    fn edges_3_round_trips_random_samples() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let (n, c, pn) = (3, 2u32, 12u32);
        let size = domain_size(n, c, pn);
        for _ in 0..2000 {
            let idx = rng.gen_range(0..size);
            let tokens = decode(idx, n, c, pn);
            let slots: Vec<PieceSlot> = tokens.iter().map(|&t| PieceSlot::from_token(t, c)).collect();
            assert_eq!(encode(&slots, c, pn), idx);
        }
    }

    #[test]
    fn domain_size_matches_family_table() {
        assert_eq!(domain_size(1, 2, 12), 24);
        assert_eq!(domain_size(1, 3, 8), 24);
        assert_eq!(domain_size(2, 2, 12), 528);
        assert_eq!(domain_size(3, 2, 12), 10_560);
        assert_eq!(domain_size(2, 3, 8), 504);
        assert_eq!(domain_size(3, 3, 8), 9_072);
        assert_eq!(domain_size(4, 2, 12), 190_080);
    }
}
