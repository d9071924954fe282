//! Error types for kintree operations.
//!
//! This module provides the main error type [`KintreeError`], which wraps the
//! errors of every pipeline stage.

use std::io;

use thiserror::Error;

use kintree_core::family::{FamilyError, StyleError};

use crate::{export::ExportError, structure::StructureError};

/// The main error type for kintree operations.
#[derive(Debug, Error)]
pub enum KintreeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A family data or config document could not be parsed.
    #[error("Invalid {kind} `{path}`: {message}")]
    Document {
        kind: &'static str,
        path: String,
        message: String,
    },

    #[error("Data error: {0}")]
    Data(#[from] FamilyError),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl KintreeError {
    /// Creates a new `Document` error.
    pub fn new_document_error(
        kind: &'static str,
        path: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Self::Document {
            kind,
            path: path.into(),
            message: message.to_string(),
        }
    }
}
