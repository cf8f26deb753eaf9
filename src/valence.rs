use petgraph::graph::NodeIndex;

use crate::element::Element;
use crate::mol::Mol;
use crate::traits::{HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount};

/// An atom carries more bonds than any normal valence of its element allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValenceError {
    pub atom_idx: NodeIndex,
    pub atomic_num: u8,
    pub actual_valence: u8,
    pub allowed_valences: Vec<u8>,
}

impl std::fmt::Display for ValenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sym = Element::from_atomic_num(self.atomic_num)
            .map(|e| e.symbol())
            .unwrap_or("?");
        write!(
            f,
            "invalid valence on atom {} ({}): {} exceeds {:?}",
            self.atom_idx.index(),
            sym,
            self.actual_valence,
            self.allowed_valences,
        )
    }
}

impl std::error::Error for ValenceError {}

pub fn total_valence<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> u8
where
    A: HasHydrogenCount,
    B: HasBondOrder,
{
    mol.bonds_of(atom)
        .map(|e| mol.bond(e).bond_order().multiplicity())
        .fold(mol.atom(atom).hydrogen_count(), |acc, v| acc.saturating_add(v))
}

/// Rejects the first atom whose valence exceeds the largest normal valence
/// of its element, charge taken into account. Elements without defined
/// valences (metals, the wildcard) are never rejected.
pub fn check_valence<A, B>(mol: &Mol<A, B>) -> Result<(), ValenceError>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    for idx in mol.atoms() {
        let atom = mol.atom(idx);
        let Some(elem) = Element::from_atomic_num(atom.atomic_num()) else {
            continue;
        };
        let allowed = elem.charged_valences(atom.formal_charge());
        let Some(&max) = allowed.iter().max() else {
            continue;
        };
        let actual = total_valence(mol, idx);
        if actual > max {
            return Err(ValenceError {
                atom_idx: idx,
                atomic_num: atom.atomic_num(),
                actual_valence: actual,
                allowed_valences: allowed.to_vec(),
            });
        }
    }
    Ok(())
}
