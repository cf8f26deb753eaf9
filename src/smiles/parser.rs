use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{SmilesBond, SmilesBondOrder};
use crate::element::Element;
use crate::mol::Mol;
use crate::smiles::error::SmilesError;
use crate::smiles::tokenizer::{AtomToken, BondToken, Token};

struct RingOpening {
    atom: NodeIndex,
    bond: Option<BondToken>,
    pos: usize,
}

struct Branch {
    atom: NodeIndex,
    atoms_before: usize,
    pos: usize,
}

/// Walks the token stream, building the graph and then filling in implicit
/// hydrogens for organic-subset atoms.
pub fn build_mol(tokens: &[Token]) -> Result<Mol<Atom, SmilesBond>, SmilesError> {
    let mut mol: Mol<Atom, SmilesBond> = Mol::new();
    let mut written: Vec<&AtomToken> = Vec::new();
    let mut prev: Option<NodeIndex> = None;
    let mut pending: Option<(BondToken, usize)> = None;
    let mut branches: Vec<Branch> = Vec::new();
    let mut rings: HashMap<u16, RingOpening> = HashMap::new();

    for token in tokens {
        match token {
            Token::Atom(tok) => {
                let idx = mol.add_atom(Atom {
                    atomic_num: tok.element.atomic_num(),
                    formal_charge: tok.charge,
                    isotope: tok.isotope,
                    hydrogen_count: 0,
                    is_aromatic: tok.is_aromatic,
                });
                written.push(tok);
                match prev {
                    Some(p) => {
                        let bond = pending.take().map(|(b, _)| b);
                        let order = resolve_order(bond, mol.atom(p).is_aromatic, tok.is_aromatic);
                        mol.add_bond(p, idx, SmilesBond { order });
                    }
                    None => {
                        if let Some((_, pos)) = pending {
                            return Err(SmilesError::DanglingBond { pos });
                        }
                    }
                }
                prev = Some(idx);
            }
            Token::Bond { pos, bond } => {
                if prev.is_none() || pending.is_some() {
                    return Err(SmilesError::DanglingBond { pos: *pos });
                }
                pending = Some((*bond, *pos));
            }
            Token::RingClosure { digit, pos } => {
                let current = prev.ok_or(SmilesError::InvalidRingBond {
                    digit: *digit,
                    pos: *pos,
                })?;
                let bond = pending.take().map(|(b, _)| b);
                match rings.remove(digit) {
                    None => {
                        rings.insert(
                            *digit,
                            RingOpening {
                                atom: current,
                                bond,
                                pos: *pos,
                            },
                        );
                    }
                    Some(open) => {
                        if open.atom == current || mol.bond_between(open.atom, current).is_some() {
                            return Err(SmilesError::InvalidRingBond {
                                digit: *digit,
                                pos: open.pos,
                            });
                        }
                        let bond = match (open.bond, bond) {
                            (Some(a), Some(b)) if undirected(a) != undirected(b) => {
                                return Err(SmilesError::RingBondConflict { digit: *digit });
                            }
                            (a, b) => a.or(b),
                        };
                        let order = resolve_order(
                            bond,
                            mol.atom(open.atom).is_aromatic,
                            mol.atom(current).is_aromatic,
                        );
                        mol.add_bond(open.atom, current, SmilesBond { order });
                    }
                }
            }
            Token::OpenParen(pos) => {
                let atom = prev.ok_or(SmilesError::UnmatchedParen { pos: *pos })?;
                if let Some((_, bond_pos)) = pending {
                    return Err(SmilesError::DanglingBond { pos: bond_pos });
                }
                branches.push(Branch {
                    atom,
                    atoms_before: mol.atom_count(),
                    pos: *pos,
                });
            }
            Token::CloseParen(pos) => {
                let branch = branches
                    .pop()
                    .ok_or(SmilesError::UnmatchedParen { pos: *pos })?;
                if let Some((_, bond_pos)) = pending {
                    return Err(SmilesError::DanglingBond { pos: bond_pos });
                }
                if mol.atom_count() == branch.atoms_before {
                    return Err(SmilesError::UnmatchedParen { pos: branch.pos });
                }
                prev = Some(branch.atom);
            }
            Token::Dot(pos) => {
                if let Some((_, bond_pos)) = pending {
                    return Err(SmilesError::DanglingBond { pos: bond_pos });
                }
                if prev.is_none() {
                    return Err(SmilesError::UnexpectedChar { pos: *pos, ch: '.' });
                }
                prev = None;
            }
        }
    }

    if let Some((_, pos)) = pending {
        return Err(SmilesError::DanglingBond { pos });
    }
    if let Some(branch) = branches.first() {
        return Err(SmilesError::UnmatchedParen { pos: branch.pos });
    }
    if let Some(&digit) = rings.keys().min() {
        return Err(SmilesError::UnclosedRing { digit });
    }

    assign_hydrogens(&mut mol, &written);
    Ok(mol)
}

fn undirected(bond: BondToken) -> BondToken {
    match bond {
        BondToken::Up | BondToken::Down => BondToken::Single,
        other => other,
    }
}

fn resolve_order(bond: Option<BondToken>, from_aromatic: bool, to_aromatic: bool) -> SmilesBondOrder {
    match bond {
        Some(BondToken::Double) => SmilesBondOrder::Double,
        Some(BondToken::Triple) => SmilesBondOrder::Triple,
        Some(BondToken::Aromatic) => SmilesBondOrder::Aromatic,
        Some(BondToken::Single | BondToken::Up | BondToken::Down) => SmilesBondOrder::Single,
        None if from_aromatic && to_aromatic => SmilesBondOrder::Aromatic,
        None => SmilesBondOrder::Single,
    }
}

fn assign_hydrogens(mol: &mut Mol<Atom, SmilesBond>, written: &[&AtomToken]) {
    for (i, tok) in written.iter().enumerate() {
        let idx = NodeIndex::new(i);
        let count = match tok.hcount {
            Some(h) => h,
            None => {
                let bond_sum: u8 = mol
                    .bonds_of(idx)
                    .map(|e| mol.bond(e).order.valence_contribution())
                    .fold(0u8, |acc, v| acc.saturating_add(v));
                implicit_hydrogens(tok.element, tok.is_aromatic, bond_sum)
            }
        };
        mol.atom_mut(idx).hydrogen_count = count;
    }
}

/// Hydrogens needed to reach the smallest normal valence that accommodates
/// the explicit bonds. Aromatic atoms give one unit to the pi system.
fn implicit_hydrogens(element: Element, is_aromatic: bool, bond_sum: u8) -> u8 {
    let target = match element.default_valences().iter().find(|&&v| v >= bond_sum) {
        Some(&v) => v,
        None => return 0,
    };
    let h = target - bond_sum;
    if is_aromatic && h > 0 {
        h - 1
    } else {
        h
    }
}
