use std::collections::VecDeque;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Molecular graph generic over its atom and bond payloads.
///
/// The parser yields `Mol<Atom, SmilesBond>`, kekulization turns it into
/// `Mol<Atom, Bond>`, and layout into `Mol<WithPosition2D<Atom>, Bond>`.
/// Node indices are stable across those conversions.
pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut B {
        &mut self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges(idx).count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// Connected components (the `.`-separated parts of a SMILES), each in
    /// breadth-first order from its lowest-numbered atom.
    pub fn fragments(&self) -> Vec<Vec<NodeIndex>> {
        let mut seen = vec![false; self.atom_count()];
        let mut fragments = Vec::new();
        for start in self.atoms() {
            if seen[start.index()] {
                continue;
            }
            seen[start.index()] = true;
            let mut fragment = Vec::new();
            let mut queue = VecDeque::from([start]);
            while let Some(current) = queue.pop_front() {
                fragment.push(current);
                for next in self.neighbors(current) {
                    if !seen[next.index()] {
                        seen[next.index()] = true;
                        queue.push_back(next);
                    }
                }
            }
            fragments.push(fragment);
        }
        fragments
    }

    /// Rebuilds the molecule with new atom payloads, keeping indices and
    /// bonds.
    pub fn map_atoms<A2>(&self, mut f: impl FnMut(NodeIndex, &A) -> A2) -> Mol<A2, B>
    where
        B: Clone,
    {
        Mol {
            graph: self.graph.map(|idx, atom| f(idx, atom), |_, bond| bond.clone()),
        }
    }

    /// Rebuilds the molecule with new bond payloads, keeping indices.
    pub fn map_bonds<B2>(&self, mut f: impl FnMut(EdgeIndex, &B) -> B2) -> Mol<A, B2>
    where
        A: Clone,
    {
        Mol {
            graph: self.graph.map(|_, atom| atom.clone(), |idx, bond| f(idx, bond)),
        }
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .finish()
    }
}
