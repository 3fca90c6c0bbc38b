// src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to open source file {path}: {source}")]
    OpenSource { path: PathBuf, source: io::Error },

    #[error("failed to create segment file {path}: {source}")]
    CreateSegment { path: PathBuf, source: io::Error },

    #[error("source ended after {actual} of {expected} bytes")]
    SourceTruncated { expected: u64, actual: u64 },

    #[error("buffer capacity must be at least 1 byte")]
    ZeroCapacity,
}

pub type Result<T> = std::result::Result<T, SplitError>;
