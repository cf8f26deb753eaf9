use petgraph::graph::NodeIndex;

use crate::bond::BondOrder;
use crate::element::Element;
use crate::geometry::Point;
use crate::layout::LaidOutMol;
use crate::render::primitives::{Anchor, Group, Line, Rect, RenderElement, Text};
use crate::render::{Color, RenderContext};

/// One layer of the depiction.
pub trait Generator: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, ctx: &RenderContext<'_>) -> RenderElement;
}

/// Paints the canvas background.
pub struct BasicSceneGenerator;

impl Generator for BasicSceneGenerator {
    fn name(&self) -> &'static str {
        "BasicSceneGenerator"
    }

    fn generate(&self, ctx: &RenderContext<'_>) -> RenderElement {
        let mut group = Group::new("background");
        group.push(Rect {
            origin: Point::ORIGIN,
            width: ctx.width as f64,
            height: ctx.height as f64,
            fill: ctx.options.background,
        });
        group.into()
    }
}

/// Bonds as round-capped lines, with ring-aware double bond placement.
pub struct SmoothGenerator;

impl Generator for SmoothGenerator {
    fn name(&self) -> &'static str {
        "SmoothGenerator"
    }

    fn generate(&self, ctx: &RenderContext<'_>) -> RenderElement {
        let mut group = Group::new("bonds");
        let label_gap = ctx.font_size_px() * 0.6;
        let spacing = ctx.options.double_bond_spacing * ctx.bond_length_px();
        let line = |from: Point, to: Point| Line {
            from,
            to,
            width: ctx.stroke_width_px(),
            color: ctx.options.foreground,
        };

        for e in ctx.mol.bonds() {
            let Some((a, b)) = ctx.mol.bond_endpoints(e) else {
                continue;
            };
            let (pa, pb) = (ctx.screen_position(a), ctx.screen_position(b));
            let Some(dir) = (pb - pa).normalized() else {
                continue;
            };
            let trim_a = if shows_label(ctx.mol, a) { label_gap } else { 0.0 };
            let trim_b = if shows_label(ctx.mol, b) { label_gap } else { 0.0 };
            let length = pa.distance(pb);
            if trim_a + trim_b >= length {
                continue;
            }
            let start = pa + dir * trim_a;
            let end = pb - dir * trim_b;
            let normal = dir.perp();

            match ctx.mol.bond(e).order {
                BondOrder::Single => group.push(line(start, end)),
                BondOrder::Double => match double_bond_side(ctx, a, b, normal) {
                    Some(side) => {
                        group.push(line(start, end));
                        let inset = spacing.min((end - start).length() * 0.25);
                        let s = start + side * spacing + dir * if trim_a > 0.0 { 0.0 } else { inset };
                        let t = end + side * spacing - dir * if trim_b > 0.0 { 0.0 } else { inset };
                        group.push(line(s, t));
                    }
                    None => {
                        let half = normal * (spacing / 2.0);
                        group.push(line(start + half, end + half));
                        group.push(line(start - half, end - half));
                    }
                },
                BondOrder::Triple => {
                    let offset = normal * spacing;
                    group.push(line(start, end));
                    group.push(line(start + offset, end + offset));
                    group.push(line(start - offset, end - offset));
                }
            }
        }
        group.into()
    }
}

/// Unit normal pointing to where the second line of a double bond goes, or
/// `None` for a centred pair.
fn double_bond_side(ctx: &RenderContext<'_>, a: NodeIndex, b: NodeIndex, normal: Point) -> Option<Point> {
    let (pa, pb) = (ctx.screen_position(a), ctx.screen_position(b));
    let mid = pa.lerp(pb, 0.5);
    let side_of = |p: Point| {
        let d = (p - mid).x * normal.x + (p - mid).y * normal.y;
        if d.abs() < 1e-6 {
            0
        } else if d > 0.0 {
            1
        } else {
            -1
        }
    };

    if let Some(ring) = ctx.rings.smallest_ring_with_bond(a, b) {
        let center = Point::centroid(ring.iter().map(|&r| ctx.screen_position(r)))?;
        return match side_of(center) {
            0 => None,
            s => Some(normal * s as f64),
        };
    }

    let (deg_a, deg_b) = (ctx.mol.degree(a), ctx.mol.degree(b));
    if (deg_a == 1 && shows_label(ctx.mol, a))
        || (deg_b == 1 && shows_label(ctx.mol, b))
        || (deg_a == 1 && deg_b == 1)
    {
        return None;
    }
    let votes: i32 = ctx
        .mol
        .neighbors(a)
        .filter(|&n| n != b)
        .chain(ctx.mol.neighbors(b).filter(|&n| n != a))
        .map(|n| side_of(ctx.screen_position(n)))
        .sum();
    match votes.signum() {
        0 => None,
        s => Some(normal * s as f64),
    }
}

/// Element symbols with hydrogen count, charge and mass number.
pub struct AtomLabelGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HydrogenSide {
    Left,
    Right,
}

impl Generator for AtomLabelGenerator {
    fn name(&self) -> &'static str {
        "AtomLabelGenerator"
    }

    fn generate(&self, ctx: &RenderContext<'_>) -> RenderElement {
        let mut group = Group::new("atoms");
        let size = ctx.font_size_px();
        let small = size * 0.7;

        for atom in ctx.mol.atoms().filter(|&a| shows_label(ctx.mol, a)) {
            let inner = &ctx.mol.atom(atom).inner;
            let element = inner.element();
            let color = if ctx.options.color_atoms {
                Color::from(element.color())
            } else {
                ctx.options.foreground
            };
            let p = ctx.screen_position(atom);
            let symbol = element.symbol();
            let half = Text::estimated_width(symbol, size) / 2.0;
            let text = |position: Point, text: String, size: f64, anchor: Anchor| Text {
                position,
                text,
                size,
                color,
                anchor,
            };

            let mut label = Group::new(format!("atom-{}", atom.index()));
            label.push(text(p, symbol.to_string(), size, Anchor::Middle));

            let mut left = p.x - half;
            let mut right = p.x + half;
            let subscript_y = p.y + size * 0.3;
            let superscript_y = p.y - size * 0.4;

            if inner.hydrogen_count > 0 {
                let count = (inner.hydrogen_count > 1).then(|| inner.hydrogen_count.to_string());
                let h_width = Text::estimated_width("H", size);
                let count_width = count
                    .as_deref()
                    .map_or(0.0, |c| Text::estimated_width(c, small));
                match hydrogen_side(ctx, atom, element) {
                    HydrogenSide::Right => {
                        label.push(text(Point::new(right, p.y), "H".into(), size, Anchor::Start));
                        if let Some(c) = count {
                            label.push(text(Point::new(right + h_width, subscript_y), c, small, Anchor::Start));
                        }
                        right += h_width + count_width;
                    }
                    HydrogenSide::Left => {
                        if let Some(c) = count {
                            label.push(text(Point::new(left, subscript_y), c, small, Anchor::End));
                        }
                        label.push(text(Point::new(left - count_width, p.y), "H".into(), size, Anchor::End));
                        left -= h_width + count_width;
                    }
                }
            }

            if inner.formal_charge != 0 {
                let charge = charge_text(inner.formal_charge);
                label.push(text(Point::new(right, superscript_y), charge, small, Anchor::Start));
            }
            if inner.isotope != 0 {
                let mass = inner.isotope.to_string();
                label.push(text(Point::new(left, superscript_y), mass, small, Anchor::End));
            }
            group.push(label);
        }
        group.into()
    }
}

/// Whether an atom is drawn as text rather than as a bare bond junction.
pub(crate) fn shows_label(mol: &LaidOutMol, atom: NodeIndex) -> bool {
    let a = &mol.atom(atom).inner;
    a.atomic_num != Element::C.atomic_num()
        || a.formal_charge != 0
        || a.isotope != 0
        || mol.degree(atom) == 0
}

fn hydrogen_side(ctx: &RenderContext<'_>, atom: NodeIndex, element: Element) -> HydrogenSide {
    let p = ctx.screen_position(atom);
    let mut dx = 0.0;
    let mut neighbours = 0;
    for n in ctx.mol.neighbors(atom) {
        dx += ctx.screen_position(n).x - p.x;
        neighbours += 1;
    }
    if neighbours == 0 {
        // H2O, H2S, HCl read hydrogen first.
        return match element {
            Element::O | Element::S | Element::SE | Element::TE | Element::F | Element::CL
            | Element::BR | Element::I => HydrogenSide::Left,
            _ => HydrogenSide::Right,
        };
    }
    if dx > 1e-6 {
        HydrogenSide::Left
    } else {
        HydrogenSide::Right
    }
}

fn charge_text(charge: i8) -> String {
    let sign = if charge > 0 { '+' } else { '\u{2212}' };
    match charge.unsigned_abs() {
        1 => sign.to_string(),
        n => format!("{n}{sign}"),
    }
}
