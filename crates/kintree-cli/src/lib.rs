//! CLI logic for the kintree family tree tool.
//!
//! The CLI plays the surrounding application: it owns the single
//! [`FamilyData`](kintree::family::FamilyData) snapshot, loaded from a JSON
//! file, and hands it to the library for export.

pub mod error_adapter;

mod args;
mod config;
mod data;

pub use args::Args;
pub use data::load_family;

use std::path::PathBuf;

use futures::executor::block_on;
use log::{info, warn};

use kintree::{KintreeError, TreeDiagram, export::FileSink};

/// Run the kintree CLI application
///
/// Loads the configuration and the family data, renders the primary tree and
/// saves the export. Returns the path of the written file.
///
/// # Errors
///
/// Returns `KintreeError` for:
/// - File I/O errors
/// - Malformed configuration or family data
/// - Cyclic parent references
/// - Invalid style colors
/// - Export failures
pub fn run(args: &Args) -> Result<PathBuf, KintreeError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing family tree"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let mut data = load_family(&args.input, app_config.style())?;
    if let Some(format) = args.format {
        let styles = data.styles().clone().with_export_format(format);
        data = data.with_styles(styles);
    }

    let selected_id = args.select.as_deref();
    if let Some(id) = selected_id.filter(|id| data.member(id).is_none()) {
        warn!(member = id; "Selected member does not exist");
    }

    let mut sink = match &args.output {
        Some(path) => FileSink::to_path(path),
        None => FileSink::in_directory("."),
    };

    let diagram = TreeDiagram::new(app_config);
    let artifact = block_on(diagram.export_to(&data, selected_id, &mut sink))?;

    let path = sink
        .delivered()
        .last()
        .cloned()
        .unwrap_or_else(|| PathBuf::from(artifact.file_name()));
    info!(output_file:? = path, mime = artifact.blob().mime(); "Family tree exported successfully");

    Ok(path)
}
