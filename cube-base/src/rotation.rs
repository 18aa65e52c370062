use crate::face::Face;
use crate::turn::Turn;

/// A whole-cube reorientation. `Y`/`Y2`/`YP` turn about the U-D axis, `X`/`XP`
/// about the R-L axis. These relabel which physical face a turn token
/// refers to without changing the turn's power.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rotation {
    Id,
    Y2,
    Yp,
    Y,
    Xp,
    X,
}

/// The six rotations swept per scramble, in output-column order: identity,
/// y², y', y, x', x.
pub const SIX_ROTATIONS: [Rotation; 6] = [
    Rotation::Id,
    Rotation::Y2,
    Rotation::Yp,
    Rotation::Y,
    Rotation::Xp,
    Rotation::X,
];

impl Rotation {
    pub const fn relabel(self, face: Face) -> Face {
        match self {
            Rotation::Id => face,
            Rotation::Y => face.rotate_y_by(1),
            Rotation::Y2 => face.rotate_y_by(2),
            Rotation::Yp => face.rotate_y_by(3),
            Rotation::X => face.rotate_x_by(1),
            Rotation::Xp => face.rotate_x_by(3),
        }
    }

    pub const fn apply_to_turn(self, turn: Turn) -> Turn {
        Turn::new(self.relabel(turn.face), turn.power)
    }
}

/// Reinterprets every turn in a scramble as seen from a rotated viewing
/// orientation, without altering turn order or power.
pub fn rotate_scramble(rotation: Rotation, scramble: &[Turn]) -> Vec<Turn> {
    scramble
        .iter()
        .map(|&t| rotation.apply_to_turn(t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::Power;

    #[test]
    fn y_cycles_four_times_to_identity() {
        for face in [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B] {
            assert_eq!(face.rotate_y_by(4), face);
        }
    }

    #[test]
    fn identity_rotation_is_a_no_op() {
        let scramble = [Turn::new(Face::R, Power::Cw), Turn::new(Face::U, Power::Ccw)];
        assert_eq!(rotate_scramble(Rotation::Id, &scramble), scramble);
    }
}
