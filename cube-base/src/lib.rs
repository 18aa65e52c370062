//! 3x3x3 cube algebra: faces, turns, and the cubie-level permutation/orientation state.

mod cube;
mod face;
mod piece;
mod rotation;
mod turn;

pub use cube::{turn_cubie, CubieCube};
pub use face::Face;
pub use piece::{Corner, Edge, ALL_CORNERS, ALL_EDGES};
pub use rotation::{rotate_scramble, Rotation, SIX_ROTATIONS};
pub use turn::{ParseTurnError, Power, Turn, N_TURNS};
