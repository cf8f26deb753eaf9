//! Depiction of a laid-out molecule.
//!
//! A [`MoleculeRenderer`] runs a list of [`Generator`]s over the molecule.
//! Each produces screen-space [`RenderElement`]s which a [`DrawVisitor`]
//! turns into output; [`SvgDrawVisitor`] writes an SVG document that
//! [`crate::raster`] rasterizes.

mod generators;
mod primitives;
mod svg;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};
use crate::layout::{LaidOutMol, BOND_LENGTH};
use crate::rings::RingInfo;
use crate::traits::HasPosition2D;

pub use generators::{AtomLabelGenerator, BasicSceneGenerator, Generator, SmoothGenerator};
pub use primitives::{Anchor, Group, Line, Rect, RenderElement, Text};
pub use svg::{DrawVisitor, SvgDrawVisitor};

/// sRGB colour, written as `#rrggbb` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::rgb(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid colour {:?}, expected #rrggbb", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// Renderer model parameters.
///
/// Lengths are in pixels at zoom 1; a model-space bond is drawn
/// `bond_length * zoom_factor` pixels long unless fit-to-screen has to
/// shrink the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub fit_to_screen: bool,
    pub anti_aliasing: bool,
    pub zoom_factor: f64,
    pub bond_length: f64,
    pub margin: f64,
    pub bond_width: f64,
    /// Gap between the lines of a double bond, as a fraction of the bond.
    pub double_bond_spacing: f64,
    pub font_size: f64,
    pub background: Color,
    pub foreground: Color,
    /// Colour heteroatom labels by element.
    pub color_atoms: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fit_to_screen: true,
            anti_aliasing: true,
            zoom_factor: 2.0,
            bond_length: 40.0,
            margin: 10.0,
            bond_width: 1.0,
            double_bond_spacing: 0.18,
            font_size: 14.0,
            background: Color::WHITE,
            foreground: Color::BLACK,
            color_atoms: true,
        }
    }
}

/// Maps model coordinates (y up) onto the canvas (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    /// Pixels per model unit.
    pub scale: f64,
    model_center: Point,
    screen_center: Point,
}

impl ScreenTransform {
    /// Centres `bounds` on a `width` x `height` canvas. With fit-to-screen
    /// the zoomed scale is reduced until the diagram and its margins fit.
    pub fn fit(bounds: Option<Bounds>, width: u32, height: u32, options: &RenderOptions) -> Self {
        let mut scale = options.bond_length * options.zoom_factor / BOND_LENGTH;
        if options.fit_to_screen {
            if let Some(b) = bounds {
                let room_x = (width as f64 - 2.0 * options.margin).max(1.0);
                let room_y = (height as f64 - 2.0 * options.margin).max(1.0);
                if b.width() > 0.0 {
                    scale = scale.min(room_x / b.width());
                }
                if b.height() > 0.0 {
                    scale = scale.min(room_y / b.height());
                }
            }
        }
        Self {
            scale,
            model_center: bounds.map(|b| b.center()).unwrap_or(Point::ORIGIN),
            screen_center: Point::new(width as f64 / 2.0, height as f64 / 2.0),
        }
    }

    pub fn to_screen(&self, p: Point) -> Point {
        let d = (p - self.model_center) * self.scale;
        Point::new(self.screen_center.x + d.x, self.screen_center.y - d.y)
    }

    /// Ratio of the effective scale to the unzoomed one; label sizes and
    /// stroke widths follow it.
    pub fn zoom(&self, options: &RenderOptions) -> f64 {
        self.scale * BOND_LENGTH / options.bond_length
    }
}

/// What generators see: the molecule, its rings and the screen mapping.
pub struct RenderContext<'a> {
    pub mol: &'a LaidOutMol,
    pub rings: &'a RingInfo,
    pub options: &'a RenderOptions,
    pub transform: ScreenTransform,
    pub width: u32,
    pub height: u32,
}

impl RenderContext<'_> {
    pub fn screen_position(&self, atom: petgraph::graph::NodeIndex) -> Point {
        let model = self
            .mol
            .atom(atom)
            .position_2d()
            .map(Point::from)
            .unwrap_or(Point::ORIGIN);
        self.transform.to_screen(model)
    }

    pub fn bond_length_px(&self) -> f64 {
        BOND_LENGTH * self.transform.scale
    }

    pub fn font_size_px(&self) -> f64 {
        (self.options.font_size * self.transform.zoom(self.options)).max(1.0)
    }

    pub fn stroke_width_px(&self) -> f64 {
        (self.options.bond_width * self.transform.zoom(self.options)).max(0.5)
    }
}

/// Runs the scene generators in order and hands their output to a visitor.
pub struct MoleculeRenderer {
    generators: Vec<Box<dyn Generator>>,
    options: RenderOptions,
}

impl MoleculeRenderer {
    pub fn new(generators: Vec<Box<dyn Generator>>, options: RenderOptions) -> Self {
        Self { generators, options }
    }

    /// Background, smooth bonds, then atom labels.
    pub fn standard(options: RenderOptions) -> Self {
        Self::new(
            vec![
                Box::new(BasicSceneGenerator),
                Box::new(SmoothGenerator),
                Box::new(AtomLabelGenerator),
            ],
            options,
        )
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    pub fn scene(&self, mol: &LaidOutMol, width: u32, height: u32) -> Vec<RenderElement> {
        let rings = RingInfo::sssr(mol);
        let bounds = Bounds::of(
            mol.atoms()
                .filter_map(|a| mol.atom(a).position_2d())
                .map(Point::from),
        );
        let ctx = RenderContext {
            mol,
            rings: &rings,
            options: &self.options,
            transform: ScreenTransform::fit(bounds, width, height, &self.options),
            width,
            height,
        };
        self.generators.iter().map(|g| g.generate(&ctx)).collect()
    }

    pub fn paint(&self, mol: &LaidOutMol, visitor: &mut dyn DrawVisitor, width: u32, height: u32) {
        for element in self.scene(mol, width, height) {
            visitor.visit(&element);
        }
    }

    pub fn to_svg(&self, mol: &LaidOutMol, width: u32, height: u32) -> String {
        let mut visitor = SvgDrawVisitor::new(width, height, &self.options);
        self.paint(mol, &mut visitor, width, height);
        visitor.finish()
    }
}

impl fmt::Debug for MoleculeRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.generators.iter().map(|g| g.name()).collect();
        f.debug_struct("MoleculeRenderer")
            .field("generators", &names)
            .field("options", &self.options)
            .finish()
    }
}
