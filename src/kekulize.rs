//! Kekulization: replace aromatic bonds with alternating single and double
//! bonds so the depiction can draw explicit double bonds.
//!
//! Every aromatic atom that is one bond order unit short of a normal valence
//! must end up with exactly one double bond. That is a perfect matching over
//! the aromatic bonds between such atoms, found greedily and then completed
//! with augmenting paths.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder, SmilesBond, SmilesBondOrder};
use crate::mol::Mol;

/// No Kekulé structure exists for the aromatic system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KekulizeError {
    /// These atoms could not be given a double bond.
    Unkekulizable(Vec<NodeIndex>),
}

impl fmt::Display for KekulizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unkekulizable(atoms) => {
                let list: Vec<String> = atoms.iter().map(|a| a.index().to_string()).collect();
                write!(
                    f,
                    "could not kekulize aromatic system, unmatched atoms [{}]",
                    list.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for KekulizeError {}

type Mate = Option<(NodeIndex, EdgeIndex)>;

pub fn kekulize(mol: &Mol<Atom, SmilesBond>) -> Result<Mol<Atom, Bond>, KekulizeError> {
    let n = mol.atom_count();
    let needs: Vec<bool> = mol.atoms().map(|a| needs_double_bond(mol, a)).collect();

    let mut adj: Vec<Vec<(NodeIndex, EdgeIndex)>> = vec![Vec::new(); n];
    for e in mol.bonds() {
        if mol.bond(e).order != SmilesBondOrder::Aromatic {
            continue;
        }
        if let Some((a, b)) = mol.bond_endpoints(e) {
            if needs[a.index()] && needs[b.index()] {
                adj[a.index()].push((b, e));
                adj[b.index()].push((a, e));
            }
        }
    }

    let mut candidates: Vec<NodeIndex> = mol.atoms().filter(|a| needs[a.index()]).collect();
    // Atoms with few options go first so the greedy pass rarely blocks them.
    candidates.sort_by_key(|a| adj[a.index()].len());

    let mut mate: Vec<Mate> = vec![None; n];
    for &v in &candidates {
        if mate[v.index()].is_some() {
            continue;
        }
        if let Some(&(w, e)) = adj[v.index()].iter().find(|(w, _)| mate[w.index()].is_none()) {
            mate[v.index()] = Some((w, e));
            mate[w.index()] = Some((v, e));
        }
    }
    for &v in &candidates {
        if mate[v.index()].is_none() {
            augment(&adj, &mut mate, v);
        }
    }

    let mut unmatched: Vec<NodeIndex> = candidates
        .iter()
        .copied()
        .filter(|v| mate[v.index()].is_none())
        .collect();
    if !unmatched.is_empty() {
        unmatched.sort();
        return Err(KekulizeError::Unkekulizable(unmatched));
    }

    let doubles: HashSet<EdgeIndex> = mate.iter().flatten().map(|&(_, e)| e).collect();
    Ok(mol.map_bonds(|e, bond| {
        let order = match bond.order {
            SmilesBondOrder::Single => BondOrder::Single,
            SmilesBondOrder::Double => BondOrder::Double,
            SmilesBondOrder::Triple => BondOrder::Triple,
            SmilesBondOrder::Aromatic if doubles.contains(&e) => BondOrder::Double,
            SmilesBondOrder::Aromatic => BondOrder::Single,
        };
        Bond { order }
    }))
}

fn needs_double_bond(mol: &Mol<Atom, SmilesBond>, idx: NodeIndex) -> bool {
    let atom = mol.atom(idx);
    let on_aromatic_bond = mol
        .bonds_of(idx)
        .any(|e| mol.bond(e).order == SmilesBondOrder::Aromatic);
    if !atom.is_aromatic && !on_aromatic_bond {
        return false;
    }
    let used: u8 = mol
        .bonds_of(idx)
        .map(|e| mol.bond(e).order.valence_contribution())
        .fold(atom.hydrogen_count, |acc, v| acc.saturating_add(v));
    atom.element()
        .charged_valences(atom.formal_charge)
        .iter()
        .find(|&&v| v >= used)
        .is_some_and(|&target| target > used)
}

/// Breadth-first search for an alternating path from an unmatched atom to
/// another unmatched atom; flips the path when found.
fn augment(adj: &[Vec<(NodeIndex, EdgeIndex)>], mate: &mut [Mate], start: NodeIndex) -> bool {
    let mut prev: Vec<Mate> = vec![None; adj.len()];
    let mut visited = vec![false; adj.len()];
    let mut queue = VecDeque::from([start]);
    visited[start.index()] = true;

    while let Some(u) = queue.pop_front() {
        for &(v, e) in &adj[u.index()] {
            if visited[v.index()] || mate[u.index()].map(|(_, m)| m) == Some(e) {
                continue;
            }
            visited[v.index()] = true;
            prev[v.index()] = Some((u, e));
            match mate[v.index()] {
                None => {
                    flip_path(mate, &prev, start, v);
                    return true;
                }
                Some((w, matched)) => {
                    if !visited[w.index()] {
                        visited[w.index()] = true;
                        prev[w.index()] = Some((v, matched));
                        queue.push_back(w);
                    }
                }
            }
        }
    }
    false
}

fn flip_path(mate: &mut [Mate], prev: &[Mate], start: NodeIndex, end: NodeIndex) {
    let mut cur = end;
    while let Some((p, e)) = prev[cur.index()] {
        mate[cur.index()] = Some((p, e));
        mate[p.index()] = Some((cur, e));
        if p == start {
            break;
        }
        match prev[p.index()] {
            Some((next, _)) => cur = next,
            None => break,
        }
    }
}
