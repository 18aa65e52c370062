use std::path::PathBuf;

use clap::Parser;

/// Cross/F2L scramble analyzer. With no `file`, prompts interactively.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Scramble file to analyze; omit to be prompted interactively.
    pub file: Option<PathBuf>,

    /// Directory holding the persisted transition/PDB tables.
    #[arg(long)]
    pub tables_dir: Option<PathBuf>,

    /// Worker thread count; defaults to available parallelism.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Search depth cap (IDA* budget per sub-problem).
    #[arg(long)]
    pub depth_cap: Option<u8>,

    /// Show a progress bar while generating tables.
    #[arg(long)]
    pub progress: bool,

    /// Generate and persist the tables/PDBs to `tables_dir`, then exit.
    #[arg(long)]
    pub generate_tables: bool,
}
