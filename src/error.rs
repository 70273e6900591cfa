use camino::Utf8PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DriamsError {
    #[error("invalid request: {0}")]
    CallerContract(String),

    #[error("column {column} not found in {path}")]
    UnknownColumn { column: String, path: Utf8PathBuf },

    #[error("failed to parse {path}: {message}")]
    Parse { path: Utf8PathBuf, message: String },

    #[error("spectrum file for code {code} not found at {path}")]
    FileAccess { code: String, path: Utf8PathBuf },

    #[error("dataset shape mismatch: {spectra} spectra for {rows} metadata rows")]
    ShapeMismatch { spectra: usize, rows: usize },

    #[error("no data root configured; pass --root, write driams.json or set DRIAMS_ROOT")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(Utf8PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}

impl DriamsError {
    pub(crate) fn parse(path: impl Into<Utf8PathBuf>, message: impl Into<String>) -> Self {
        DriamsError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
