//! File formats: TOML mechanism descriptions in, CSV sample tables out.

pub mod mechanism_file;
pub mod samples;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}
