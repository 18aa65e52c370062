use std::fmt;

/// The six faces of a 3x3x3 cube, in the order basic turn tables and move
/// indices are laid out: U, R, F, D, L, B.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::VariantArray,
    strum::EnumCount,
)]
#[repr(u8)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    pub const COUNT: usize = 6;

    pub const fn from_index(i: u8) -> Self {
        use Face::*;
        match i {
            0 => U,
            1 => R,
            2 => F,
            3 => D,
            4 => L,
            5 => B,
            _ => panic!("face index out of range"),
        }
    }

    /// The face directly opposite this one.
    pub const fn opposite(self) -> Self {
        use Face::*;
        match self {
            U => D,
            D => U,
            R => L,
            L => R,
            F => B,
            B => F,
        }
    }

    /// Whether turning `self` and `other` ever affects a common piece in a
    /// way that matters for move ordering, i.e. they don't share or oppose
    /// an axis.
    pub const fn commutes_with(self, other: Self) -> bool {
        self as u8 / 2 != other as u8 / 2
    }

    /// Where this face's stickers end up after a single quarter whole-cube
    /// rotation about the U-D axis (as seen looking down from U).
    pub const fn rotate_y(self) -> Self {
        use Face::*;
        match self {
            U => U,
            D => D,
            F => R,
            R => B,
            B => L,
            L => F,
        }
    }

    /// This face after `k` quarter rotations about the U-D axis, `k` in `0..4`.
    pub const fn rotate_y_by(self, k: u8) -> Self {
        let mut f = self;
        let mut i = 0;
        while i < k % 4 {
            f = f.rotate_y();
            i += 1;
        }
        f
    }

    /// Where this face's stickers end up after a single quarter whole-cube
    /// rotation about the R-L axis (as seen looking at R from the right).
    pub const fn rotate_x(self) -> Self {
        use Face::*;
        match self {
            R => R,
            L => L,
            U => F,
            F => D,
            D => B,
            B => U,
        }
    }

    pub const fn rotate_x_by(self, k: u8) -> Self {
        let mut f = self;
        let mut i = 0;
        while i < k % 4 {
            f = f.rotate_x();
            i += 1;
        }
        f
    }

    /// Left-right mirror: swaps L and R, leaves the other four faces fixed.
    pub const fn mirror_lr(self) -> Self {
        match self {
            Face::L => Face::R,
            Face::R => Face::L,
            other => other,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        };
        write!(f, "{c}")
    }
}
