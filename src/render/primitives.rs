use crate::geometry::Point;
use crate::render::Color;

/// Screen-space drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderElement {
    Line(Line),
    Text(Text),
    Rect(Rect),
    Group(Group),
}

/// Round-capped stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub width: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Single-line text; `position.y` is the vertical centre of the glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub position: Point,
    pub text: String,
    pub size: f64,
    pub color: Color,
    pub anchor: Anchor,
}

impl Text {
    /// Rough advance width without font metrics.
    pub fn estimated_width(text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * size * 0.6
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub id: String,
    pub children: Vec<RenderElement>,
}

impl Group {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, element: impl Into<RenderElement>) {
        self.children.push(element.into());
    }

    /// All lines in this group and nested groups.
    pub fn lines(&self) -> Vec<&Line> {
        let mut out = Vec::new();
        for child in &self.children {
            match child {
                RenderElement::Line(l) => out.push(l),
                RenderElement::Group(g) => out.extend(g.lines()),
                _ => {}
            }
        }
        out
    }

    /// All texts in this group and nested groups.
    pub fn texts(&self) -> Vec<&Text> {
        let mut out = Vec::new();
        for child in &self.children {
            match child {
                RenderElement::Text(t) => out.push(t),
                RenderElement::Group(g) => out.extend(g.texts()),
                _ => {}
            }
        }
        out
    }
}

impl From<Line> for RenderElement {
    fn from(l: Line) -> Self {
        RenderElement::Line(l)
    }
}

impl From<Text> for RenderElement {
    fn from(t: Text) -> Self {
        RenderElement::Text(t)
    }
}

impl From<Rect> for RenderElement {
    fn from(r: Rect) -> Self {
        RenderElement::Rect(r)
    }
}

impl From<Group> for RenderElement {
    fn from(g: Group) -> Self {
        RenderElement::Group(g)
    }
}
