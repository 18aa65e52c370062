use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("could not read scramble file {path}: {source}")]
    ReadScrambles {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write report {path}: {source}")]
    WriteReport {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write CSV row: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Table(#[from] solver::TableError),
}
