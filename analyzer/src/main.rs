//! Cross/F2L scramble analyzer CLI: thin glue around `solver`.

mod cli;
mod config;
mod error;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;

use cli::Cli;
use config::AnalyzerConfig;
use error::AnalyzerError;
use solver::{parse_scrambles, run_ordered, Analyzer, Scramble};

fn main() {
    human_panic::setup_panic!();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .init();

    let cli = Cli::parse();
    let config = AnalyzerConfig::load(&cli);

    if cli.generate_tables {
        match Analyzer::generate_and_save(&config.tables_dir, config.depth_cap) {
            Ok(_) => println!("{}", "tables generated".green()),
            Err(e) => fatal(&e),
        }
        return;
    }

    let analyzer = match Analyzer::load(&config.tables_dir, config.depth_cap) {
        Ok(a) => a,
        Err(e) => fatal(&e),
    };

    if let Some(file) = &cli.file {
        if let Err(e) = analyze_file(&analyzer, file, &config) {
            fatal(&e);
        }
        return;
    }

    loop {
        print!("scramble file (or 'exit'): ");
        io::stdout().flush().ok();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            break;
        }
        if let Err(e) = analyze_file(&analyzer, Path::new(line), &config) {
            eprintln!("{} {e}", "error:".red());
        }
    }
}

fn fatal(e: &dyn std::error::Error) -> ! {
    eprintln!("{} {e}", "fatal:".red().bold());
    std::process::exit(1);
}

/// Reads `path`, analyzes every scramble, and writes `<path>_report.csv`.
///
/// Startup failures (reading the file) abort this single batch but not the
/// interactive session; once running, every scramble produces a row.
fn analyze_file(analyzer: &Analyzer, path: &Path, config: &AnalyzerConfig) -> Result<(), AnalyzerError> {
    let text = std::fs::read_to_string(path).map_err(|source| AnalyzerError::ReadScrambles {
        path: path.display().to_string(),
        source,
    })?;
    let scrambles = parse_scrambles(&text);
    tracing::info!(file = %path.display(), count = scrambles.len(), "analyzing scrambles");

    let mut rows: Vec<(u64, Vec<u8>)> = vec![(0, Vec::new()); scrambles.len()];
    run_ordered(
        &scrambles,
        config.threads,
        |sc: &Scramble| analyzer.analyze(&sc.turns),
        |i, row| rows[i] = (scrambles[i].id, row),
    );

    let out_path = report_path(path);
    write_report(&out_path, analyzer, &rows)?;
    println!("{} {}", "wrote".green(), out_path.display());
    Ok(())
}

fn report_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("scrambles");
    input.with_file_name(format!("{stem}_report.csv"))
}

fn write_report(path: &Path, analyzer: &Analyzer, rows: &[(u64, Vec<u8>)]) -> Result<(), AnalyzerError> {
    let file = std::fs::File::create(path).map_err(|source| AnalyzerError::WriteReport {
        path: path.display().to_string(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);

    let mut header = vec!["id".to_string()];
    header.extend(analyzer.column_headers());
    writer.write_record(&header)?;

    for (id, row) in rows {
        let mut record = vec![id.to_string()];
        record.extend(row.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush().map_err(|source| AnalyzerError::WriteReport {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}
