//! SVG scene to RGB raster via usvg/resvg.

use std::collections::HashSet;
use std::sync::Arc;

use image::{Rgb, RgbImage};
use lazy_static::lazy_static;
use tiny_skia::Pixmap;
use thiserror::Error;
use usvg::fontdb;

use crate::render::Color;

/// First installed family wins as the `sans-serif` fallback.
const SANS_SERIF_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Arial",
    "Helvetica",
    "Noto Sans",
];

lazy_static! {
    static ref FONT_DB: Arc<fontdb::Database> = Arc::new(system_font_db());
}

fn system_font_db() -> fontdb::Database {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let available: HashSet<String> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(family, _)| family.clone()))
        .collect();
    if let Some(family) = SANS_SERIF_FAMILIES.iter().find(|f| available.contains(**f)) {
        db.set_sans_serif_family(*family);
    }
    log::debug!("loaded {} font faces", db.len());
    db
}

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to parse SVG scene: {0}")]
    Svg(#[from] usvg::Error),
}

/// Renders `svg` onto a `width` x `height` canvas pre-filled with
/// `background`. The SVG is drawn at its own pixel size, unscaled.
pub fn rasterize(svg: &str, width: u32, height: u32, background: Color) -> Result<RgbImage, RasterError> {
    let mut options = usvg::Options::default();
    options.fontdb = Arc::clone(&FONT_DB);
    let tree = usvg::Tree::from_str(svg, &options)?;

    let mut pixmap =
        Pixmap::new(width, height).ok_or(RasterError::InvalidDimensions { width, height })?;
    pixmap.fill(tiny_skia::Color::from_rgba8(background.r, background.g, background.b, 255));
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let mut image = RgbImage::new(width, height);
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgb([c.red(), c.green(), c.blue()]);
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_matches_requested_size() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"></svg>"#;
        let image = rasterize(svg, 20, 10, Color::WHITE).unwrap();
        assert_eq!(image.dimensions(), (20, 10));
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn shapes_are_painted() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect x="0" y="0" width="5" height="10" fill="#ff0000"/></svg>"##;
        let image = rasterize(svg, 10, 10, Color::WHITE).unwrap();
        assert_eq!(image.get_pixel(1, 5).0, [255, 0, 0]);
        assert_eq!(image.get_pixel(8, 5).0, [255, 255, 255]);
    }

    #[test]
    fn zero_size_is_rejected() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
        assert!(matches!(
            rasterize(svg, 0, 5, Color::WHITE),
            Err(RasterError::InvalidDimensions { width: 0, height: 5 })
        ));
    }

    #[test]
    fn malformed_svg_is_an_error() {
        assert!(matches!(rasterize("<svg", 5, 5, Color::WHITE), Err(RasterError::Svg(_))));
    }
}
