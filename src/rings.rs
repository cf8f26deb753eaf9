use std::collections::VecDeque;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::mol::Mol;

/// Smallest set of smallest rings.
///
/// Each ring lists its atoms in bond order around the ring. Rings are sorted
/// smallest first.
#[derive(Debug, Clone, Default)]
pub struct RingInfo {
    rings: Vec<Vec<NodeIndex>>,
}

impl RingInfo {
    pub fn sssr<A, B>(mol: &Mol<A, B>) -> Self {
        let expected = Self::expected_ring_count(mol);
        if expected == 0 {
            return Self::default();
        }

        let mut candidates: Vec<Vec<NodeIndex>> = mol
            .bonds()
            .filter_map(|e| shortest_cycle_through(mol, e))
            .map(|ring| normalize_ring(&ring))
            .collect();
        candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        candidates.dedup();

        let words = mol.bond_count().div_ceil(64);
        let mut basis: Vec<(usize, Vec<u64>)> = Vec::with_capacity(expected);
        let mut rings = Vec::with_capacity(expected);
        for ring in candidates {
            if rings.len() == expected {
                break;
            }
            let bits = edge_bits(mol, &ring, words);
            if add_to_basis(&mut basis, bits) {
                rings.push(ring);
            }
        }

        Self { rings }
    }

    /// Cycle rank: bonds - atoms + fragments.
    pub fn expected_ring_count<A, B>(mol: &Mol<A, B>) -> usize {
        (mol.bond_count() + mol.fragments().len()).saturating_sub(mol.atom_count())
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn rings(&self) -> &[Vec<NodeIndex>] {
        &self.rings
    }

    pub fn is_ring_atom(&self, atom: NodeIndex) -> bool {
        self.rings.iter().any(|ring| ring.contains(&atom))
    }

    /// Smallest ring containing the bond `a`-`b`.
    pub fn smallest_ring_with_bond(&self, a: NodeIndex, b: NodeIndex) -> Option<&[NodeIndex]> {
        self.rings
            .iter()
            .find(|ring| {
                let len = ring.len();
                (0..len).any(|i| {
                    let (x, y) = (ring[i], ring[(i + 1) % len]);
                    (x == a && y == b) || (x == b && y == a)
                })
            })
            .map(|ring| ring.as_slice())
    }

    /// Groups of ring indices whose rings are connected by shared atoms
    /// (fused, spiro and bridged systems).
    pub fn ring_systems(&self) -> Vec<Vec<usize>> {
        let n = self.rings.len();
        let mut parent: Vec<usize> = (0..n).collect();
        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if self.rings[i].iter().any(|a| self.rings[j].contains(a)) {
                    let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
                    if ri != rj {
                        parent[rj] = ri;
                    }
                }
            }
        }
        let mut systems: Vec<Vec<usize>> = Vec::new();
        let mut slot: Vec<Option<usize>> = vec![None; n];
        for i in 0..n {
            let root = find(&mut parent, i);
            match slot[root] {
                Some(s) => systems[s].push(i),
                None => {
                    slot[root] = Some(systems.len());
                    systems.push(vec![i]);
                }
            }
        }
        systems
    }
}

/// Breadth-first shortest path between the bond's ends that avoids the bond
/// itself; together with the bond it closes the smallest ring through it.
fn shortest_cycle_through<A, B>(mol: &Mol<A, B>, edge: EdgeIndex) -> Option<Vec<NodeIndex>> {
    let (from, to) = mol.bond_endpoints(edge)?;
    let mut prev: Vec<Option<NodeIndex>> = vec![None; mol.atom_count()];
    let mut seen = vec![false; mol.atom_count()];
    let mut queue = VecDeque::from([from]);
    seen[from.index()] = true;

    while let Some(cur) = queue.pop_front() {
        if cur == to {
            let mut path = vec![to];
            let mut at = to;
            while let Some(p) = prev[at.index()] {
                path.push(p);
                at = p;
            }
            path.reverse();
            return Some(path);
        }
        for e in mol.bonds_of(cur) {
            if e == edge {
                continue;
            }
            let Some((a, b)) = mol.bond_endpoints(e) else {
                continue;
            };
            let next = if a == cur { b } else { a };
            if !seen[next.index()] {
                seen[next.index()] = true;
                prev[next.index()] = Some(cur);
                queue.push_back(next);
            }
        }
    }
    None
}

// Rotate to start at the lowest index, walking towards the lower neighbour.
fn normalize_ring(ring: &[NodeIndex]) -> Vec<NodeIndex> {
    let len = ring.len();
    let start = (0..len).min_by_key(|&i| ring[i]).unwrap_or(0);
    let forward = ring[(start + 1) % len];
    let backward = ring[(start + len - 1) % len];
    if forward <= backward {
        (0..len).map(|k| ring[(start + k) % len]).collect()
    } else {
        (0..len).map(|k| ring[(start + len - k) % len]).collect()
    }
}

fn edge_bits<A, B>(mol: &Mol<A, B>, ring: &[NodeIndex], words: usize) -> Vec<u64> {
    let mut bits = vec![0u64; words];
    let len = ring.len();
    for i in 0..len {
        if let Some(e) = mol.bond_between(ring[i], ring[(i + 1) % len]) {
            bits[e.index() / 64] |= 1 << (e.index() % 64);
        }
    }
    bits
}

/// Gaussian elimination over GF(2); keeps the vector if it is independent.
fn add_to_basis(basis: &mut Vec<(usize, Vec<u64>)>, mut bits: Vec<u64>) -> bool {
    for (pivot, row) in basis.iter() {
        if bits[pivot / 64] & (1 << (pivot % 64)) != 0 {
            for (w, r) in bits.iter_mut().zip(row) {
                *w ^= r;
            }
        }
    }
    let pivot = bits
        .iter()
        .enumerate()
        .find(|&(_, &w)| w != 0)
        .map(|(i, w)| i * 64 + w.trailing_zeros() as usize);
    match pivot {
        Some(p) => {
            basis.push((p, bits));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::from_smiles;

    fn ring_sizes(s: &str) -> Vec<usize> {
        let mol = from_smiles(s).unwrap();
        RingInfo::sssr(&mol).rings().iter().map(|r| r.len()).collect()
    }

    #[test]
    fn acyclic() {
        assert!(ring_sizes("CCCC").is_empty());
    }

    #[test]
    fn simple_rings() {
        assert_eq!(ring_sizes("C1CC1"), vec![3]);
        assert_eq!(ring_sizes("c1ccccc1"), vec![6]);
    }

    #[test]
    fn fused_and_spiro() {
        assert_eq!(ring_sizes("c1ccc2ccccc2c1"), vec![6, 6]);
        assert_eq!(ring_sizes("C1CCC2(C1)CCC2"), vec![4, 5]);
        assert_eq!(ring_sizes("c1ccc2[nH]ccc2c1"), vec![5, 6]);
    }

    #[test]
    fn bridged_bicycle() {
        // norbornane
        assert_eq!(ring_sizes("C1CC2CCC1C2"), vec![5, 5]);
    }

    #[test]
    fn cubane_rank() {
        let mol = from_smiles("C12C3C4C1C5C2C3C45").unwrap();
        assert_eq!(RingInfo::expected_ring_count(&mol), 5);
        assert_eq!(RingInfo::sssr(&mol).num_rings(), 5);
    }

    #[test]
    fn ring_order_follows_bonds() {
        let mol = from_smiles("C1CCC2CCCCC2C1").unwrap();
        for ring in RingInfo::sssr(&mol).rings() {
            for i in 0..ring.len() {
                let next = ring[(i + 1) % ring.len()];
                assert!(mol.bond_between(ring[i], next).is_some());
            }
        }
    }

    #[test]
    fn systems_group_connected_rings() {
        let mol = from_smiles("c1ccc2ccccc2c1CCC1CC1").unwrap();
        let info = RingInfo::sssr(&mol);
        let mut sizes: Vec<usize> = info.ring_systems().iter().map(|s| s.len()).collect();
        sizes.sort();
        assert_eq!(sizes, vec![1, 2]);
    }

    #[test]
    fn smallest_ring_with_bond() {
        let mol = from_smiles("C1CCC2CCCC2C1").unwrap();
        let info = RingInfo::sssr(&mol);
        let shared = info
            .smallest_ring_with_bond(NodeIndex::new(3), NodeIndex::new(7))
            .unwrap();
        assert_eq!(shared.len(), 5);
        assert!(info
            .smallest_ring_with_bond(NodeIndex::new(0), NodeIndex::new(5))
            .is_none());
    }
}
