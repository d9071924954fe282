//! Kintree - layout, rendering and export of family tree diagrams.
//!
//! A flat list of members, each optionally naming a parent, is turned into a
//! forest, laid out level by level, drawn as a styled [`draw::Scene`] and
//! exported as SVG, PNG or JPEG.
//!
//! The pipeline never owns the family data: every call takes the latest
//! [`FamilyData`] snapshot and reads it without mutation.

pub mod config;
pub mod export;
pub mod layout;
pub mod render;
pub mod structure;
pub mod viewport;

mod error;

pub use kintree_core::{color, draw, family, geometry};

pub use error::KintreeError;

use log::{debug, info};

use config::AppConfig;
use draw::Scene;
use export::{DownloadSink, ExportArtifact, Exporter, svg::SvgWriter};
use family::FamilyData;
use viewport::Viewport;

/// Entry point for rendering and exporting family diagrams.
///
/// # Examples
///
/// ```rust
/// use kintree::{TreeDiagram, family::{FamilyData, Member}};
///
/// let data = FamilyData::new("Smiths")
///     .with_member_added(Member::new("a", "Alice").with_parent("root"))
///     .unwrap();
///
/// let diagram = TreeDiagram::default();
/// let scene = diagram.render(&data, None).unwrap();
/// assert_eq!(scene.nodes().count(), 2);
///
/// let svg = diagram.render_svg(&data, None).unwrap();
/// assert!(svg.contains("Alice"));
/// ```
#[derive(Debug, Default)]
pub struct TreeDiagram {
    config: AppConfig,
}

impl TreeDiagram {
    /// Create a new diagram renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Draws the primary tree of `data`, highlighting `selected_id`.
    ///
    /// # Errors
    ///
    /// Returns `KintreeError` for cyclic parent references or invalid style colors.
    pub fn render(&self, data: &FamilyData, selected_id: Option<&str>) -> Result<Scene, KintreeError> {
        render::render_family(data, selected_id)
    }

    /// Renders the on-screen SVG document.
    ///
    /// With a viewport, its pan and zoom are applied and its selection is
    /// highlighted.
    ///
    /// # Errors
    ///
    /// Returns `KintreeError` for cyclic parent references or invalid style colors.
    pub fn render_svg(
        &self,
        data: &FamilyData,
        viewport: Option<&Viewport>,
    ) -> Result<String, KintreeError> {
        let selected_id = viewport.and_then(Viewport::selected_id);
        let scene = self.render(data, selected_id)?;
        let writer = SvgWriter::new(self.config.export().padding());

        let document = match viewport {
            Some(viewport) => writer.live_document(&scene, scene.bounds(), &viewport.transform()),
            None => writer.document(&scene, scene.bounds()),
        };
        Ok(document.to_string())
    }

    /// Renders and encodes `data` in its configured export format.
    ///
    /// # Errors
    ///
    /// Returns `KintreeError` if rendering fails or the export cannot be
    /// decoded or encoded.
    pub async fn export(
        &self,
        data: &FamilyData,
        selected_id: Option<&str>,
    ) -> Result<ExportArtifact, KintreeError> {
        let scene = self.render(data, selected_id)?;
        let bounds = scene.bounds();
        debug!(width = bounds.width(), height = bounds.height(); "Scene bounds");

        let blob = Exporter::new(self.config.export().clone())
            .export(&scene, data.styles(), bounds)
            .await?;

        let artifact = ExportArtifact::new(data.export_file_name(), blob);
        info!(file_name = artifact.file_name(), mime = artifact.blob().mime(); "Export ready");
        Ok(artifact)
    }

    /// Exports `data` and hands the result to `sink`.
    ///
    /// Nothing is delivered when the export fails.
    ///
    /// # Errors
    ///
    /// Returns `KintreeError` if the export or its delivery fails.
    pub async fn export_to(
        &self,
        data: &FamilyData,
        selected_id: Option<&str>,
        sink: &mut dyn DownloadSink,
    ) -> Result<ExportArtifact, KintreeError> {
        let artifact = self.export(data, selected_id).await?;
        sink.deliver(&artifact)?;
        Ok(artifact)
    }
}
