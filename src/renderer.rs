//! The `ImageRenderer` facade: SMILES in, images out.

use std::collections::HashMap;

use image::RgbImage;
use log::{debug, error};

use crate::error::{DepictError, DepictResult, EngineError};
use crate::kekulize::kekulize;
use crate::layout::{generate_coordinates, LaidOutMol};
use crate::raster;
use crate::render::{MoleculeRenderer, RenderOptions};
use crate::smiles::parse_smiles;
use crate::valence::check_valence;

pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_HEIGHT: u32 = 300;

/// Per-item result of a batch render.
pub type RenderOutcome = DepictResult<RgbImage>;

/// One SMILES with explicit canvas dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub smiles: String,
    pub width: u32,
    pub height: u32,
}

impl RenderRequest {
    pub fn new(smiles: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            smiles: smiles.into(),
            width,
            height,
        }
    }
}

/// A rendered structure ready for display, described by its SMILES.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    image: RgbImage,
    description: String,
}

impl Icon {
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon_width(&self) -> u32 {
        self.image.width()
    }

    pub fn icon_height(&self) -> u32 {
        self.image.height()
    }
}

/// Batch result keyed by SMILES. Failed inputs are absent from `images`
/// and listed in `failures` in input order.
#[derive(Debug, Default)]
pub struct RenderMap {
    pub images: HashMap<String, RgbImage>,
    pub failures: Vec<DepictError>,
}

impl RenderMap {
    pub fn get(&self, smiles: &str) -> Option<&RgbImage> {
        self.images.get(smiles)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Renders SMILES strings to RGB images.
///
/// Holds a canvas size used by [`render_one`](Self::render_one). The icon
/// and batch operations overwrite it with their dimensions, so later calls
/// to `render_one` keep using the most recent size.
///
/// # Examples
///
/// ```no_run
/// use molpaint::ImageRenderer;
///
/// let mut renderer = ImageRenderer::new();
/// let image = renderer.render_one("CCO")?;
/// assert_eq!(image.dimensions(), (300, 300));
///
/// let images = renderer.render_array(&["CCO", "c1ccccc1"], 100, 100);
/// assert_eq!(images.len(), 2);
/// # Ok::<(), molpaint::DepictError>(())
/// ```
#[derive(Debug)]
pub struct ImageRenderer {
    width: u32,
    height: u32,
    renderer: MoleculeRenderer,
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageRenderer {
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            renderer: MoleculeRenderer::standard(options),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        self.renderer.options()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    /// Renders at the stored size.
    pub fn render_one(&self, smiles: &str) -> DepictResult<RgbImage> {
        self.render(&RenderRequest::new(smiles, self.width, self.height))
    }

    pub fn render(&self, request: &RenderRequest) -> DepictResult<RgbImage> {
        let RenderRequest { smiles, width, height } = request;
        let svg = self.scene(smiles, *width, *height)?;
        debug!("rasterizing {smiles} at {width}x{height}");
        raster::rasterize(&svg, *width, *height, self.options().background)
            .map_err(|e| engine_error(smiles, e.into()))
    }

    /// The SVG scene [`render_one`](Self::render_one) would rasterize.
    pub fn render_svg(&self, smiles: &str) -> DepictResult<String> {
        self.scene(smiles, self.width, self.height)
    }

    /// Stores `width` x `height`, then renders `smiles` as an icon.
    pub fn render_icon(&mut self, width: u32, height: u32, smiles: &str) -> DepictResult<Icon> {
        self.width = width;
        self.height = height;
        let image = self.render_one(smiles)?;
        Ok(Icon {
            image,
            description: smiles.to_string(),
        })
    }

    /// Stores `width` x `height` and renders every SMILES in order. A
    /// failure is logged and kept in its slot; the rest still render.
    pub fn render_array<S: AsRef<str>>(&mut self, smiles: &[S], width: u32, height: u32) -> Vec<RenderOutcome> {
        self.width = width;
        self.height = height;
        smiles
            .iter()
            .map(|s| {
                let outcome = self.render_one(s.as_ref());
                if let Err(err) = &outcome {
                    error!("failed to render {}: {err}", s.as_ref());
                }
                outcome
            })
            .collect()
    }

    /// Like [`render_array`](Self::render_array) but keyed by SMILES;
    /// duplicates collapse into one entry.
    pub fn render_map<S: AsRef<str>>(&mut self, smiles: &[S], width: u32, height: u32) -> RenderMap {
        self.width = width;
        self.height = height;
        let mut map = RenderMap::default();
        for s in smiles {
            let s = s.as_ref();
            match self.render_one(s) {
                Ok(image) => {
                    map.images.insert(s.to_string(), image);
                }
                Err(err) => {
                    error!("failed to render {s}: {err}");
                    map.failures.push(err);
                }
            }
        }
        map
    }

    fn scene(&self, smiles: &str, width: u32, height: u32) -> DepictResult<String> {
        if width == 0 || height == 0 {
            return Err(DepictError::InvalidDimensions { width, height });
        }
        let mol = depict(smiles)?;
        debug!("painting {smiles} ({} atoms)", mol.atom_count());
        Ok(self.renderer.to_svg(&mol, width, height))
    }
}

/// Parse, kekulize, check valences and lay out.
fn depict(smiles: &str) -> DepictResult<LaidOutMol> {
    debug!("parsing {smiles}");
    let parsed = parse_smiles(smiles).map_err(|source| DepictError::SmilesSyntax {
        smiles: smiles.to_string(),
        source,
    })?;
    let mol = kekulize(&parsed).map_err(|e| engine_error(smiles, e.into()))?;
    check_valence(&mol).map_err(|e| engine_error(smiles, e.into()))?;
    debug!("generating coordinates for {smiles}");
    generate_coordinates(&mol).map_err(|e| engine_error(smiles, e.into()))
}

fn engine_error(smiles: &str, source: EngineError) -> DepictError {
    DepictError::ChemistryEngine {
        smiles: smiles.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let r = ImageRenderer::default();
        assert_eq!((r.width(), r.height()), (300, 300));
        assert!(r.options().fit_to_screen);
        assert_eq!(r.options().zoom_factor, 2.0);
    }

    #[test]
    fn setters_do_not_validate() {
        let mut r = ImageRenderer::new();
        r.set_width(0);
        r.set_height(7);
        assert_eq!((r.width(), r.height()), (0, 7));
        assert!(matches!(
            r.render_one("C"),
            Err(DepictError::InvalidDimensions { width: 0, height: 7 })
        ));
    }

    #[test]
    fn syntax_errors_are_reported_as_such() {
        let err = ImageRenderer::new().render_one("not-a-smiles").unwrap_err();
        assert!(matches!(err, DepictError::SmilesSyntax { .. }));
        assert_eq!(err.smiles(), Some("not-a-smiles"));
    }

    #[test]
    fn chemistry_failures_are_engine_errors() {
        let r = ImageRenderer::new();
        for s in ["c1cccc1", "C(C)(C)(C)(C)C"] {
            let err = r.render_svg(s).unwrap_err();
            assert!(matches!(err, DepictError::ChemistryEngine { .. }), "{s}: {err}");
        }
        let err = r.render_svg("c1cccc1").unwrap_err();
        assert!(matches!(
            err,
            DepictError::ChemistryEngine {
                source: EngineError::Kekulize(_),
                ..
            }
        ));
    }

    #[test]
    fn svg_scene_uses_stored_size() {
        let mut r = ImageRenderer::new();
        r.set_width(120);
        r.set_height(90);
        let svg = r.render_svg("CCO").unwrap();
        assert!(svg.contains("width=\"120\" height=\"90\""));
        assert!(svg.contains(">O</text>"));
    }

    #[test]
    fn icon_updates_stored_size() {
        let mut r = ImageRenderer::new();
        let icon = r.render_icon(50, 80, "CCO").unwrap();
        assert_eq!((icon.icon_width(), icon.icon_height()), (50, 80));
        assert_eq!(icon.description(), "CCO");
        assert_eq!((r.width(), r.height()), (50, 80));
    }

    #[test]
    fn failed_icon_still_updates_size() {
        let mut r = ImageRenderer::new();
        assert!(r.render_icon(64, 32, "C1CC").is_err());
        assert_eq!((r.width(), r.height()), (64, 32));
    }

    #[test]
    fn renderer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ImageRenderer>();
    }
}
