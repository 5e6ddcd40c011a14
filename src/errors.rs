// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

use crate::verify::OrderViolation;

#[derive(Error, Debug)]
pub enum TopoError {
    #[error("Parameter error: {0}")]
    Parameter(String),

    #[error("File error on {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Could not allocate memory for {what}")]
    Allocation { what: &'static str },

    #[error("Cyclic input: only {sorted} of {total} nodes could be ordered")]
    CyclicInput { sorted: usize, total: usize },

    #[error("Invalid topological order: {0}")]
    InvalidOrder(#[from] OrderViolation),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TopoError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        TopoError::Parse {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TopoError::File {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TopoError>;
