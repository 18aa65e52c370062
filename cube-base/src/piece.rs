/// The eight corner cubies, in the slot order used throughout the tables:
/// URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::EnumIter, strum::EnumCount)]
#[repr(u8)]
pub enum Corner {
    URF,
    UFL,
    ULB,
    UBR,
    DFR,
    DLF,
    DBL,
    DRB,
}

pub const ALL_CORNERS: [Corner; 8] = [
    Corner::URF,
    Corner::UFL,
    Corner::ULB,
    Corner::UBR,
    Corner::DFR,
    Corner::DLF,
    Corner::DBL,
    Corner::DRB,
];

/// The twelve edge cubies, in the slot order used throughout the tables:
/// UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::EnumIter, strum::EnumCount)]
#[repr(u8)]
pub enum Edge {
    UR,
    UF,
    UL,
    UB,
    DR,
    DF,
    DL,
    DB,
    FR,
    FL,
    BL,
    BR,
}

pub const ALL_EDGES: [Edge; 12] = [
    Edge::UR,
    Edge::UF,
    Edge::UL,
    Edge::UB,
    Edge::DR,
    Edge::DF,
    Edge::DL,
    Edge::DB,
    Edge::FR,
    Edge::FL,
    Edge::BL,
    Edge::BR,
];

impl Corner {
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl Edge {
    pub const fn index(self) -> usize {
        self as usize
    }
}
