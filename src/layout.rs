//! Structure diagram generation: 2D coordinates for a kekulized molecule.
//!
//! Ring systems are built first in a local frame from regular polygons and
//! then placed rigidly. Chains grow breadth-first from placed atoms, each
//! atom spreading its new neighbours over its widest free angle. Separate
//! fragments are laid out one by one and lined up left to right.

use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI, TAU};
use std::fmt;

use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::geometry::{Bounds, Point};
use crate::mol::Mol;
use crate::rings::RingInfo;
use crate::wrappers::WithPosition2D;

/// Model-space length of every bond the layout draws.
pub const BOND_LENGTH: f64 = 1.5;

pub type LaidOutMol = Mol<WithPosition2D<Atom>, Bond>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Layout produced a NaN or infinite coordinate.
    NonFinite { atom: NodeIndex },
    /// An atom was never reached.
    Unplaced { atom: NodeIndex },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { atom } => {
                write!(f, "non-finite coordinate generated for atom {}", atom.index())
            }
            Self::Unplaced { atom } => write!(f, "atom {} was not placed", atom.index()),
        }
    }
}

impl std::error::Error for LayoutError {}

pub fn generate_coordinates(mol: &Mol<Atom, Bond>) -> Result<LaidOutMol, LayoutError> {
    let mut layout = Layout::new(mol);
    let mut cursor = 0.0;
    for fragment in mol.fragments() {
        layout.place_fragment(&fragment);
        cursor = layout.shift_fragment(&fragment, cursor) + BOND_LENGTH;
    }

    let mut coords = Vec::with_capacity(mol.atom_count());
    for idx in mol.atoms() {
        let p = layout.pos[idx.index()].ok_or(LayoutError::Unplaced { atom: idx })?;
        if !p.is_finite() {
            return Err(LayoutError::NonFinite { atom: idx });
        }
        coords.push(p);
    }
    Ok(mol.map_atoms(|idx, atom| WithPosition2D::new(atom.clone(), coords[idx.index()].into())))
}

struct Layout<'a> {
    mol: &'a Mol<Atom, Bond>,
    rings: RingInfo,
    systems: Vec<Vec<usize>>,
    system_of: Vec<Option<usize>>,
    system_placed: Vec<bool>,
    pos: Vec<Option<Point>>,
}

impl<'a> Layout<'a> {
    fn new(mol: &'a Mol<Atom, Bond>) -> Self {
        let rings = RingInfo::sssr(mol);
        let systems = rings.ring_systems();
        let mut system_of = vec![None; mol.atom_count()];
        for (s, members) in systems.iter().enumerate() {
            for &r in members {
                for atom in &rings.rings()[r] {
                    system_of[atom.index()] = Some(s);
                }
            }
        }
        Self {
            mol,
            system_placed: vec![false; systems.len()],
            rings,
            systems,
            system_of,
            pos: vec![None; mol.atom_count()],
        }
    }

    fn place_fragment(&mut self, fragment: &[NodeIndex]) {
        let Some(&start) = fragment.first() else {
            return;
        };
        let mut queue = VecDeque::new();
        match self.system_of[start.index()] {
            Some(s) => {
                self.system_placed[s] = true;
                let local = self.layout_ring_system(s);
                let mut atoms: Vec<NodeIndex> = local.keys().copied().collect();
                atoms.sort();
                for atom in atoms {
                    self.pos[atom.index()] = local.get(&atom).copied();
                    queue.push_back(atom);
                }
            }
            None => {
                self.pos[start.index()] = Some(Point::ORIGIN);
                queue.push_back(start);
            }
        }
        while let Some(atom) = queue.pop_front() {
            self.expand(atom, &mut queue);
        }
    }

    /// Moves the fragment so its left edge sits at `left` and it is
    /// vertically centred on the x axis. Returns the new right edge.
    fn shift_fragment(&mut self, fragment: &[NodeIndex], left: f64) -> f64 {
        let Some(bounds) = Bounds::of(fragment.iter().filter_map(|a| self.pos[a.index()])) else {
            return left;
        };
        let offset = Point::new(left - bounds.min.x, -bounds.center().y);
        for a in fragment {
            if let Some(p) = self.pos[a.index()].as_mut() {
                *p = *p + offset;
            }
        }
        left + bounds.width()
    }

    fn expand(&mut self, atom: NodeIndex, queue: &mut VecDeque<NodeIndex>) {
        let Some(origin) = self.pos[atom.index()] else {
            return;
        };
        let mut kids: Vec<NodeIndex> = self
            .mol
            .neighbors(atom)
            .filter(|n| self.pos[n.index()].is_none())
            .collect();
        if kids.is_empty() {
            return;
        }
        kids.sort();
        let used: Vec<f64> = self
            .mol
            .neighbors(atom)
            .filter_map(|n| self.pos[n.index()])
            .map(|p| (p - origin).angle())
            .collect();
        let angles = self.child_angles(atom, origin, &used, kids.len());
        for (kid, angle) in kids.into_iter().zip(angles) {
            // An earlier sibling's ring system may already have claimed it.
            if self.pos[kid.index()].is_none() {
                self.place_child(kid, origin, angle, queue);
            }
        }
    }

    fn child_angles(&self, atom: NodeIndex, origin: Point, used: &[f64], count: usize) -> Vec<f64> {
        match used {
            [] => (0..count)
                .map(|i| -FRAC_PI_6 + TAU * i as f64 / count as f64)
                .collect(),
            [u] if count == 1 && self.is_linear(atom) => vec![u + PI],
            [u] if count == 1 => {
                let candidates = [u + TAU / 3.0, u - TAU / 3.0];
                let mut best = candidates[0];
                let mut best_clearance = f64::NEG_INFINITY;
                for angle in candidates {
                    let p = origin + Point::from_angle(angle) * BOND_LENGTH;
                    let clearance = self.clearance(p, atom);
                    if clearance > best_clearance + 1e-9 {
                        best = angle;
                        best_clearance = clearance;
                    }
                }
                vec![best]
            }
            _ => {
                let (start, width) = widest_gap(used);
                (0..count)
                    .map(|i| start + width * (i + 1) as f64 / (count + 1) as f64)
                    .collect()
            }
        }
    }

    /// Distance from `p` to the closest placed atom other than `skip`.
    fn clearance(&self, p: Point, skip: NodeIndex) -> f64 {
        self.pos
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != skip.index())
            .filter_map(|(_, q)| q.map(|q| q.distance(p)))
            .fold(f64::INFINITY, f64::min)
    }

    /// sp centres: a triple bond, or two cumulated double bonds.
    fn is_linear(&self, atom: NodeIndex) -> bool {
        if self.mol.degree(atom) != 2 {
            return false;
        }
        let orders: Vec<BondOrder> = self
            .mol
            .bonds_of(atom)
            .map(|e| self.mol.bond(e).order)
            .collect();
        orders.contains(&BondOrder::Triple)
            || orders.iter().filter(|&&o| o == BondOrder::Double).count() == 2
    }

    fn place_child(&mut self, kid: NodeIndex, origin: Point, angle: f64, queue: &mut VecDeque<NodeIndex>) {
        let dir = Point::from_angle(angle);
        let target = origin + dir * BOND_LENGTH;

        let system = self.system_of[kid.index()].filter(|&s| !self.system_placed[s]);
        let Some(s) = system else {
            self.pos[kid.index()] = Some(target);
            queue.push_back(kid);
            return;
        };

        self.system_placed[s] = true;
        let local = self.layout_ring_system(s);
        let entry = local.get(&kid).copied().unwrap_or(Point::ORIGIN);
        let inward = Point::centroid(
            self.mol
                .neighbors(kid)
                .filter_map(|n| local.get(&n).copied()),
        )
        .map(|c| c - entry);
        let rotation = match inward.and_then(Point::normalized) {
            Some(v) => angle - v.angle(),
            None => 0.0,
        };

        let mut atoms: Vec<NodeIndex> = local.keys().copied().collect();
        atoms.sort();
        for atom in atoms {
            if let Some(&p) = local.get(&atom) {
                self.pos[atom.index()] = Some(target + (p - entry).rotate(rotation));
                queue.push_back(atom);
            }
        }
    }

    /// Coordinates for one ring system in its own frame.
    fn layout_ring_system(&self, system: usize) -> HashMap<NodeIndex, Point> {
        let rings: Vec<&[NodeIndex]> = self.systems[system]
            .iter()
            .map(|&r| self.rings.rings()[r].as_slice())
            .collect();
        let mut local: HashMap<NodeIndex, Point> = HashMap::new();
        let mut done = vec![false; rings.len()];

        let shares = |i: usize, j: usize| rings[i].iter().any(|a| rings[j].contains(a));
        let first = (0..rings.len())
            .max_by_key(|&i| {
                let links = (0..rings.len()).filter(|&j| j != i && shares(i, j)).count();
                (links, Reverse(i))
            })
            .unwrap_or(0);
        if let Some(ring) = rings.get(first) {
            place_polygon(ring, 0, Point::ORIGIN, FRAC_PI_2, &mut local);
            done[first] = true;
        }

        loop {
            for (i, ring) in rings.iter().enumerate() {
                if !done[i] && ring.iter().all(|a| local.contains_key(a)) {
                    done[i] = true;
                }
            }
            let next = (0..rings.len())
                .filter(|&i| !done[i])
                .filter_map(|i| {
                    let placed = rings[i].iter().filter(|a| local.contains_key(a)).count();
                    if placed == 0 {
                        return None;
                    }
                    let priority = match placed {
                        1 => 0,
                        2 if shared_bond(rings[i], &local).is_some() => 2,
                        _ => 1,
                    };
                    Some((priority, placed, i))
                })
                .max_by_key(|&(priority, placed, i)| (priority, placed, Reverse(i)));
            let Some((priority, _, i)) = next else {
                break;
            };
            done[i] = true;
            match priority {
                0 => place_spiro(rings[i], &mut local),
                2 => self.place_fused(rings[i], &rings, &done, &mut local),
                _ => fill_gaps(rings[i], &mut local),
            }
        }

        // Rings the perception did not report still need their atoms.
        let mut stray = 0.0;
        for ring in &rings {
            for atom in ring.iter() {
                if !local.contains_key(atom) {
                    stray += 1.0;
                    local.insert(*atom, Point::new(stray * BOND_LENGTH, -BOND_LENGTH));
                }
            }
        }
        local
    }

    /// Regular polygon on the far side of an already placed shared bond.
    fn place_fused(
        &self,
        ring: &[NodeIndex],
        rings: &[&[NodeIndex]],
        done: &[bool],
        local: &mut HashMap<NodeIndex, Point>,
    ) {
        let Some(j) = shared_bond(ring, local) else {
            return;
        };
        let n = ring.len();
        let (a, b) = (ring[j], ring[(j + 1) % n]);
        let (pa, pb) = match (local.get(&a), local.get(&b)) {
            (Some(&pa), Some(&pb)) => (pa, pb),
            _ => return,
        };

        let neighbour_ring = rings
            .iter()
            .zip(done)
            .filter(|&(r, &d)| d && r.as_ptr() != ring.as_ptr())
            .map(|(r, _)| *r)
            .find(|r| r.contains(&a) && r.contains(&b));
        let reference = match neighbour_ring {
            Some(r) => Point::centroid(r.iter().filter_map(|x| local.get(x).copied())),
            None => Point::centroid(local.values().copied()),
        }
        .unwrap_or(Point::ORIGIN);

        let mid = pa.lerp(pb, 0.5);
        let Some(normal) = (pb - pa).perp().normalized() else {
            return fill_gaps(ring, local);
        };
        let apothem = pa.distance(pb) / (2.0 * (PI / n as f64).tan());
        let c1 = mid + normal * apothem;
        let c2 = mid - normal * apothem;
        let center = if c1.distance(reference) >= c2.distance(reference) { c1 } else { c2 };

        let ra = pa - center;
        let rb = pb - center;
        let sign = if ra.x * rb.y - ra.y * rb.x >= 0.0 { 1.0 } else { -1.0 };
        let step = sign * TAU / n as f64;
        for k in 1..=(n - 2) {
            let atom = ring[(j + 1 + k) % n];
            local
                .entry(atom)
                .or_insert_with(|| center + rb.rotate(step * k as f64));
        }
    }
}

fn place_polygon(
    ring: &[NodeIndex],
    anchor: usize,
    center: Point,
    start: f64,
    local: &mut HashMap<NodeIndex, Point>,
) {
    let n = ring.len();
    let radius = BOND_LENGTH / (2.0 * (PI / n as f64).sin());
    for k in 0..n {
        let angle = start + TAU * k as f64 / n as f64;
        local
            .entry(ring[(anchor + k) % n])
            .or_insert_with(|| center + Point::from_angle(angle) * radius);
    }
}

/// Index `j` such that `ring[j]` and `ring[j + 1]` are both placed.
fn shared_bond(ring: &[NodeIndex], local: &HashMap<NodeIndex, Point>) -> Option<usize> {
    let n = ring.len();
    (0..n).find(|&j| local.contains_key(&ring[j]) && local.contains_key(&ring[(j + 1) % n]))
}

/// Ring sharing a single atom with the placed part: polygon pointing away.
fn place_spiro(ring: &[NodeIndex], local: &mut HashMap<NodeIndex, Point>) {
    let Some(anchor) = ring.iter().position(|a| local.contains_key(a)) else {
        return;
    };
    let pivot = local[&ring[anchor]];
    let others = Point::centroid(
        local
            .iter()
            .filter(|(a, _)| **a != ring[anchor])
            .map(|(_, p)| *p),
    );
    let away = others
        .and_then(|c| (pivot - c).normalized())
        .unwrap_or(Point::new(1.0, 0.0));
    let radius = BOND_LENGTH / (2.0 * (PI / ring.len() as f64).sin());
    let center = pivot + away * radius;
    place_polygon(ring, anchor, center, (pivot - center).angle(), local);
}

/// Bridged rings: unplaced runs bulge out between their placed ends.
fn fill_gaps(ring: &[NodeIndex], local: &mut HashMap<NodeIndex, Point>) {
    let n = ring.len();
    let Some(first_placed) = (0..n).find(|&i| local.contains_key(&ring[i])) else {
        return;
    };
    let reference = Point::centroid(local.values().copied()).unwrap_or(Point::ORIGIN);

    let mut k = 1;
    while k <= n {
        let i = (first_placed + k) % n;
        if local.contains_key(&ring[i]) {
            k += 1;
            continue;
        }
        let before = local[&ring[(first_placed + k - 1) % n]];
        let mut run = Vec::new();
        while !local.contains_key(&ring[(first_placed + k) % n]) {
            run.push(ring[(first_placed + k) % n]);
            k += 1;
        }
        let after = local[&ring[(first_placed + k) % n]];

        let mid = before.lerp(after, 0.5);
        let normal = (after - before)
            .perp()
            .normalized()
            .or_else(|| (before - reference).normalized())
            .unwrap_or(Point::new(0.0, 1.0));
        let normal = if (mid + normal).distance(reference) >= (mid - normal).distance(reference) {
            normal
        } else {
            -normal
        };
        let m = run.len() as f64;
        let height = BOND_LENGTH * (m + 1.0) * 0.5;
        for (step, atom) in run.into_iter().enumerate() {
            let t = (step as f64 + 1.0) / (m + 1.0);
            local.insert(atom, before.lerp(after, t) + normal * (height * (PI * t).sin()));
        }
    }
}

/// Start angle and width of the largest empty sector between the given
/// directions.
fn widest_gap(used: &[f64]) -> (f64, f64) {
    let mut angles: Vec<f64> = used.iter().map(|a| a.rem_euclid(TAU)).collect();
    angles.sort_by(f64::total_cmp);
    let mut best = (angles[0], TAU);
    if angles.len() > 1 {
        best = (0.0, f64::NEG_INFINITY);
        for i in 0..angles.len() {
            let start = angles[i];
            let end = if i + 1 < angles.len() { angles[i + 1] } else { angles[0] + TAU };
            if end - start > best.1 {
                best = (start, end - start);
            }
        }
    }
    best
}
