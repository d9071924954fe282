//! SVG decoding and bitmap encoding.

use log::{debug, trace};

use kintree_core::{color::Color, family::ExportFormat};

use super::ExportError;

/// Decodes a serialized SVG document into a render tree.
///
/// The returned future resolves once the whole document, fonts included,
/// has been loaded.
///
/// # Errors
///
/// Returns [`ExportError::Decode`] for malformed documents or a zero size.
pub async fn decode_svg(document: &str, load_system_fonts: bool) -> Result<usvg::Tree, ExportError> {
    let mut options = usvg::Options::default();
    if load_system_fonts {
        options.fontdb_mut().load_system_fonts();
    }

    let tree = usvg::Tree::from_str(document, &options)
        .map_err(|err| ExportError::Decode(err.to_string()))?;

    let size = tree.size();
    if size.width() < 1.0 || size.height() < 1.0 {
        return Err(ExportError::Decode(format!(
            "image has no area ({}x{})",
            size.width(),
            size.height()
        )));
    }

    trace!(width = size.width(), height = size.height(); "SVG decoded");
    Ok(tree)
}

/// Draws `tree` at the origin of a surface of its intrinsic size, filled with
/// `background`, and encodes the surface as `format`.
///
/// # Errors
///
/// Returns [`ExportError::Surface`] if the surface cannot be allocated and
/// [`ExportError::Encode`] if encoding fails or `format` is not a raster format.
pub fn rasterize(
    tree: &usvg::Tree,
    background: Color,
    format: ExportFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Png => {
            let pixmap = render_pixmap(tree, background)?;
            pixmap.encode_png().map_err(|err| ExportError::Encode {
                format,
                message: err.to_string(),
            })
        }
        ExportFormat::Jpeg => {
            // JPEG has no alpha channel; composite on an opaque background.
            let pixmap = render_pixmap(tree, background.with_alpha(1.0))?;
            encode_jpeg(&pixmap, jpeg_quality)
        }
        ExportFormat::Svg => Err(ExportError::Encode {
            format,
            message: "not a raster format".to_string(),
        }),
    }
}

fn render_pixmap(tree: &usvg::Tree, background: Color) -> Result<tiny_skia::Pixmap, ExportError> {
    let size = tree.size();
    let width = size.width().ceil() as u32;
    let height = size.height().ceil() as u32;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(ExportError::Surface { width, height })?;

    let [r, g, b, a] = background.to_rgba8();
    pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

    resvg::render(tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    debug!(width = width, height = height; "Scene rasterized");
    Ok(pixmap)
}

fn encode_jpeg(pixmap: &tiny_skia::Pixmap, quality: u8) -> Result<Vec<u8>, ExportError> {
    let (width, height) = (pixmap.width(), pixmap.height());

    // The surface is opaque, so premultiplied and straight RGB agree.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
        .collect();

    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
        .encode(&rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|err| ExportError::Encode {
            format: ExportFormat::Jpeg,
            message: err.to_string(),
        })?;
    Ok(out)
}
