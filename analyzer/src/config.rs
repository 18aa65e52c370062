//! `analyzer.toml` config, overridden by CLI flags.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub tables_dir: Option<PathBuf>,
    pub threads: Option<usize>,
    pub depth_cap: Option<u8>,
    pub progress: Option<bool>,
}

#[derive(Debug)]
pub struct AnalyzerConfig {
    pub tables_dir: PathBuf,
    pub threads: usize,
    pub depth_cap: u8,
    pub progress: bool,
}

impl AnalyzerConfig {
    /// Loads `analyzer.toml` from the current directory if present, then
    /// applies CLI overrides on top.
    pub fn load(cli: &crate::cli::Cli) -> Self {
        let file = std::fs::read_to_string("analyzer.toml")
            .ok()
            .and_then(|text| toml::from_str::<FileConfig>(&text).ok())
            .unwrap_or_default();

        AnalyzerConfig {
            tables_dir: cli.tables_dir.clone().or(file.tables_dir).unwrap_or_else(|| PathBuf::from("tables")),
            threads: cli.threads.or(file.threads).unwrap_or_else(num_cpus::get),
            depth_cap: cli.depth_cap.or(file.depth_cap).unwrap_or(20),
            progress: cli.progress || file.progress.unwrap_or(false),
        }
    }
}
