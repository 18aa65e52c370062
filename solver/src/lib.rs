//! Table generation, pattern databases, and cascaded-pruning search for the
//! cross/F2L move-count analyzer.

pub mod analyzer;
pub mod error;
pub mod heuristic;
pub mod packed;
pub mod pdb;
pub mod runner;
pub mod scramble;
pub mod search;
pub mod table_io;

pub use analyzer::{Analyzer, ROTATION_SUFFIX};
pub use error::TableError;
pub use packed::{PackedArray, UNREACHED};
pub use runner::run_ordered;
pub use scramble::{parse_scrambles, Scramble};
