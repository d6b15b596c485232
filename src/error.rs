//! Engine error taxonomy
//!
//! An empty result is never an error. Missing values travel as `None` at the
//! field level. The only failures are schema mismatches and I/O around the
//! flat files.

use crate::types::Column;
use std::path::PathBuf;
use thiserror::Error;

/// A column required by an operation is absent from the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required column '{column}' for {operation}")]
pub struct SchemaError {
    pub column: Column,
    pub operation: &'static str,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("failed to write export: {0}")]
    Export(#[source] std::io::Error),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
