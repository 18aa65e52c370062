use crate::face::Face;
use crate::turn::{Power, Turn};

/// Cubie-level state of a 3x3x3 cube: for each corner and edge slot, which
/// piece currently occupies it (`cp`/`ep`) and that piece's orientation
/// (`co`/`eo`, mod 3 and mod 2 respectively).
///
/// `cp[i]` is the corner piece sitting in slot `i`; `co[i]` is how many
/// clockwise twists (0..3) that piece has relative to its solved
/// orientation. Edges work the same way mod 2.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CubieCube {
    pub cp: [u8; 8],
    pub co: [u8; 8],
    pub ep: [u8; 12],
    pub eo: [u8; 12],
}

impl CubieCube {
    pub const SOLVED: CubieCube = CubieCube {
        cp: [0, 1, 2, 3, 4, 5, 6, 7],
        co: [0; 8],
        ep: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        eo: [0; 12],
    };

    /// `self * b`: the state obtained by performing whatever `self`
    /// represents, then whatever `b` represents.
    pub fn compose(&self, b: &CubieCube) -> CubieCube {
        let mut cp = [0u8; 8];
        let mut co = [0u8; 8];
        for i in 0..8 {
            cp[i] = self.cp[b.cp[i] as usize];
            co[i] = (b.co[i] + self.co[b.cp[i] as usize]) % 3;
        }
        let mut ep = [0u8; 12];
        let mut eo = [0u8; 12];
        for i in 0..12 {
            ep[i] = self.ep[b.ep[i] as usize];
            eo[i] = (b.eo[i] + self.eo[b.ep[i] as usize]) % 2;
        }
        CubieCube { cp, co, ep, eo }
    }

    pub fn inverse(&self) -> CubieCube {
        let mut cp = [0u8; 8];
        let mut co = [0u8; 8];
        for i in 0..8 {
            cp[self.cp[i] as usize] = i as u8;
            co[self.cp[i] as usize] = (3 - self.co[i]) % 3;
        }
        let mut ep = [0u8; 12];
        let mut eo = [0u8; 12];
        for i in 0..12 {
            ep[self.ep[i] as usize] = i as u8;
            eo[self.ep[i] as usize] = (2 - self.eo[i]) % 2;
        }
        CubieCube { cp, co, ep, eo }
    }

    pub fn apply(&self, turn: Turn) -> CubieCube {
        self.compose(&turn_cubie(turn))
    }

    pub fn apply_scramble(turns: &[Turn]) -> CubieCube {
        turns
            .iter()
            .fold(CubieCube::SOLVED, |cube, &turn| cube.apply(turn))
    }
}

/// The pure quarter-turn clockwise state for each face, indexed by `Face`.
///
/// Corner slots are URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB; edge slots are
/// UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR.
const BASIC_TURNS: [CubieCube; 6] = [
    // U
    CubieCube {
        cp: [3, 0, 1, 2, 4, 5, 6, 7],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [3, 0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // R
    CubieCube {
        cp: [4, 1, 2, 0, 7, 5, 6, 3],
        co: [2, 0, 0, 1, 1, 0, 0, 2],
        ep: [8, 1, 2, 3, 11, 5, 6, 7, 4, 9, 10, 0],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // F
    CubieCube {
        cp: [1, 5, 2, 3, 0, 4, 6, 7],
        co: [1, 2, 0, 0, 2, 1, 0, 0],
        ep: [0, 9, 2, 3, 4, 8, 6, 7, 1, 5, 10, 11],
        eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
    },
    // D
    CubieCube {
        cp: [0, 1, 2, 3, 5, 6, 7, 4],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [0, 1, 2, 3, 5, 6, 7, 4, 8, 9, 10, 11],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // L
    CubieCube {
        cp: [0, 2, 6, 3, 4, 1, 5, 7],
        co: [0, 1, 2, 0, 0, 2, 1, 0],
        ep: [0, 1, 10, 3, 4, 5, 9, 7, 8, 2, 6, 11],
        eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    },
    // B
    CubieCube {
        cp: [0, 1, 3, 7, 4, 5, 2, 6],
        co: [0, 0, 1, 2, 0, 0, 2, 1],
        ep: [0, 1, 2, 11, 4, 5, 6, 10, 8, 9, 3, 7],
        eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
    },
];

/// The full cubie-level state produced by a single turn (any power).
pub fn turn_cubie(turn: Turn) -> CubieCube {
    let base = BASIC_TURNS[turn.face as usize];
    match turn.power {
        Power::Cw => base,
        Power::Half => base.compose(&base),
        Power::Ccw => base.compose(&base).compose(&base),
    }
}

static_assertions::const_assert_eq!(std::mem::size_of::<Face>(), 1);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::N_TURNS;

    #[test]
    fn solved_is_identity_under_compose() {
        let c = turn_cubie(Turn::new(Face::R, Power::Cw));
        assert_eq!(CubieCube::SOLVED.compose(&c), c);
        assert_eq!(c.compose(&CubieCube::SOLVED), c);
    }

    #[test]
    fn four_quarter_turns_restore_solved() {
        for face in [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B] {
            let turn = Turn::new(face, Power::Cw);
            let mut cube = CubieCube::SOLVED;
            for _ in 0..4 {
                cube = cube.apply(turn);
            }
            assert_eq!(cube, CubieCube::SOLVED, "{turn} did not cycle in 4 turns");
        }
    }

    #[test]
    fn half_turn_is_quarter_twice() {
        let q = turn_cubie(Turn::new(Face::F, Power::Cw));
        let h = turn_cubie(Turn::new(Face::F, Power::Half));
        assert_eq!(q.compose(&q), h);
    }

    #[test]
    fn inverse_undoes_every_turn() {
        for i in 0..N_TURNS as u8 {
            let turn = Turn::from_index(i);
            let c = turn_cubie(turn);
            assert_eq!(c.compose(&c.inverse()), CubieCube::SOLVED);
            assert_eq!(c.inverse(), turn_cubie(turn.inverse()));
        }
    }

    #[test]
    fn scramble_then_inverse_scramble_solves() {
        let scramble = [
            Turn::new(Face::R, Power::Cw),
            Turn::new(Face::U, Power::Ccw),
            Turn::new(Face::F, Power::Half),
        ];
        let scrambled = CubieCube::apply_scramble(&scramble);
        let undo: Vec<Turn> = scramble.iter().rev().map(|t| t.inverse()).collect();
        let restored = undo.iter().fold(scrambled, |cube, &turn| cube.apply(turn));
        assert_eq!(restored, CubieCube::SOLVED);
    }
}
