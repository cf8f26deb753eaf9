use std::fmt::Write;

use crate::render::primitives::{Anchor, Group, Line, Rect, RenderElement, Text};
use crate::render::RenderOptions;

/// Consumes drawing primitives.
pub trait DrawVisitor {
    fn visit(&mut self, element: &RenderElement);
}

/// Writes primitives as an SVG document.
pub struct SvgDrawVisitor {
    out: String,
}

impl SvgDrawVisitor {
    pub fn new(width: u32, height: u32, options: &RenderOptions) -> Self {
        let (shapes, text) = if options.anti_aliasing {
            ("geometricPrecision", "geometricPrecision")
        } else {
            ("crispEdges", "optimizeSpeed")
        };
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" shape-rendering="{shapes}" text-rendering="{text}">"#
        );
        Self { out }
    }

    pub fn finish(mut self) -> String {
        self.out.push_str("</svg>\n");
        self.out
    }

    fn line(&mut self, l: &Line) {
        let _ = write!(
            self.out,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}" stroke-linecap="round"/>"#,
            l.from.x, l.from.y, l.to.x, l.to.y, l.color, l.width
        );
    }

    fn rect(&mut self, r: &Rect) {
        let _ = write!(
            self.out,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            r.origin.x, r.origin.y, r.width, r.height, r.fill
        );
    }

    fn text(&mut self, t: &Text) {
        let anchor = match t.anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        // Baseline sits about a third of the em below the visual centre.
        let baseline = t.position.y + t.size * 0.35;
        let _ = write!(
            self.out,
            r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{:.2}" fill="{}" text-anchor="{}">{}</text>"#,
            t.position.x,
            baseline,
            t.size,
            t.color,
            anchor,
            escape(&t.text)
        );
    }

    fn group(&mut self, g: &Group) {
        let _ = write!(self.out, r#"<g id="{}">"#, escape(&g.id));
        for child in &g.children {
            self.visit(child);
        }
        self.out.push_str("</g>");
    }
}

impl DrawVisitor for SvgDrawVisitor {
    fn visit(&mut self, element: &RenderElement) {
        match element {
            RenderElement::Line(l) => self.line(l),
            RenderElement::Text(t) => self.text(t),
            RenderElement::Rect(r) => self.rect(r),
            RenderElement::Group(g) => self.group(g),
        }
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::render::Color;

    #[test]
    fn document_shape() {
        let mut v = SvgDrawVisitor::new(40, 30, &RenderOptions::default());
        let mut g = Group::new("bonds");
        g.push(Line {
            from: Point::new(1.0, 2.0),
            to: Point::new(3.0, 4.0),
            width: 1.5,
            color: Color::BLACK,
        });
        v.visit(&g.into());
        let svg = v.finish();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"40\" height=\"30\""));
        assert!(svg.contains(
            r##"<g id="bonds"><line x1="1.00" y1="2.00" x2="3.00" y2="4.00" stroke="#000000""##
        ));
        assert!(svg.contains("stroke-linecap=\"round\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn anti_aliasing_switch() {
        let aa = SvgDrawVisitor::new(1, 1, &RenderOptions::default()).finish();
        assert!(aa.contains("shape-rendering=\"geometricPrecision\""));
        let options = RenderOptions {
            anti_aliasing: false,
            ..RenderOptions::default()
        };
        let crisp = SvgDrawVisitor::new(1, 1, &options).finish();
        assert!(crisp.contains("shape-rendering=\"crispEdges\""));
    }

    #[test]
    fn text_is_escaped() {
        let mut v = SvgDrawVisitor::new(10, 10, &RenderOptions::default());
        v.visit(&RenderElement::Text(Text {
            position: Point::new(5.0, 5.0),
            text: "<&>".into(),
            size: 10.0,
            color: Color::rgb(255, 0, 0),
            anchor: Anchor::Middle,
        }));
        let svg = v.finish();
        assert!(svg.contains(">&lt;&amp;&gt;</text>"));
        assert!(svg.contains("fill=\"#ff0000\" text-anchor=\"middle\""));
    }
}
