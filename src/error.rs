use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Application-wide error type for the nancy CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Arguments(#[from] clap::Error),

    #[error("Failed to read exclusion file '{}': {source}", path.display())]
    ExclusionFile { path: PathBuf, source: io::Error },
}
