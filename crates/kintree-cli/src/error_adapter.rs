//! Error adapter for converting KintreeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use kintree::{KintreeError, export::ExportError};

/// Adapter giving a [`KintreeError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a KintreeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            KintreeError::Io(_) => "kintree::io",
            KintreeError::Document { .. } => "kintree::document",
            KintreeError::Data(_) => "kintree::data",
            KintreeError::Style(_) => "kintree::style",
            KintreeError::Structure(_) => "kintree::structure",
            KintreeError::Export(_) => "kintree::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            KintreeError::Io(_) => "check that the input exists and the output location is writable",
            KintreeError::Document { .. } => {
                "family data is JSON with `title`, `members` and `styles`; configuration is TOML"
            }
            KintreeError::Style(_) => "colors accept hex (#rrggbb), rgb() and CSS color names",
            KintreeError::Structure(_) => {
                "every chain of `parentId` references must end at a member without a parent"
            }
            KintreeError::Export(ExportError::Decode(_)) => {
                "the generated SVG could not be read back; try exporting as svg"
            }
            KintreeError::Export(ExportError::Delivery { .. }) => {
                "check that the output directory exists and is writable"
            }
            KintreeError::Data(_) | KintreeError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
