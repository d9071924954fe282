//! Export of a rendered [`Scene`] to a downloadable file.
//!
//! # Pipeline Position
//!
//! ```text
//! Members
//!     ↓ structure
//! Forest
//!     ↓ layout
//! Positioned Nodes
//!     ↓ render
//! Scene
//!     ↓ export (this module)
//! Blob → DownloadSink
//! ```
//!
//! # Formats
//!
//! - `svg`: the scene serialized by [`svg::SvgWriter`], no rasterization.
//! - `png` / `jpeg`: the SVG document is decoded, drawn on a surface filled
//!   with the background color and encoded by [`raster`].
//!
//! Decoding is the only suspension point of [`Exporter::export`]. The scene
//! and style are borrowed for the whole call, so neither can change while an
//! export is pending.

pub mod raster;
pub mod sink;
pub mod svg;

use std::{fmt, io};

use log::{debug, info};
use thiserror::Error;

use kintree_core::{
    draw::Scene,
    family::{ExportFormat, StyleConfig, StyleError},
    geometry::Bounds,
};

use crate::config::ExportConfig;

pub use sink::{DownloadSink, FileSink};

/// Errors that end an export attempt. None of them is retried.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to decode the SVG document: {0}")]
    Decode(String),

    #[error("failed to encode {format}: {message}")]
    Encode {
        format: ExportFormat,
        message: String,
    },

    #[error("failed to allocate a {width}x{height} raster surface")]
    Surface { width: u32, height: u32 },

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("failed to deliver `{file_name}`")]
    Delivery {
        file_name: String,
        #[source]
        source: io::Error,
    },
}

/// Encoded export output.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    mime: &'static str,
    bytes: Vec<u8>,
}

impl Blob {
    pub fn new(mime: &'static str, bytes: Vec<u8>) -> Self {
        Self { mime, bytes }
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A blob with the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    file_name: String,
    blob: Blob,
}

impl ExportArtifact {
    pub fn new(file_name: impl Into<String>, blob: Blob) -> Self {
        Self {
            file_name: file_name.into(),
            blob,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn blob(&self) -> &Blob {
        &self.blob
    }
}

/// Serializes scenes into the format selected by the style.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Exports `scene`, whose content occupies `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Decode`] when the generated document cannot be
    /// decoded, [`ExportError::Encode`] when the target encoder fails and
    /// [`ExportError::Style`] for an invalid background color.
    pub async fn export(
        &self,
        scene: &Scene,
        style: &StyleConfig,
        bounds: Bounds,
    ) -> Result<Blob, ExportError> {
        let format = style.export_format();
        info!(format:% = format, primitives = scene.len(); "Exporting scene");

        let document = svg::SvgWriter::new(self.config.padding())
            .document(scene, bounds)
            .to_string();

        if !format.is_raster() {
            debug!(bytes = document.len(); "SVG document serialized");
            return Ok(Blob::new(format.mime_type(), document.into_bytes()));
        }

        let background = style.background_color()?;
        let tree = raster::decode_svg(&document, self.config.load_system_fonts()).await?;
        let bytes = raster::rasterize(&tree, background, format, self.config.jpeg_quality())?;

        debug!(format:% = format, bytes = bytes.len(); "Raster image encoded");
        Ok(Blob::new(format.mime_type(), bytes))
    }
}
