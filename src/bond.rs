/// Concrete bond order after kekulization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
}

impl BondOrder {
    /// Number of lines drawn for this bond, also its valence contribution.
    pub fn multiplicity(self) -> u8 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bond {
    pub order: BondOrder,
}

impl crate::traits::HasBondOrder for Bond {
    fn bond_order(&self) -> BondOrder {
        self.order
    }
}

/// Bond order as written in SMILES, before kekulization.
///
/// An unwritten bond between two aromatic atoms is `Aromatic`; any other
/// unwritten bond is `Single`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SmilesBondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl SmilesBondOrder {
    /// Bond order units counted against an atom's valence when deriving
    /// implicit hydrogens. Aromatic bonds count as one.
    pub fn valence_contribution(self) -> u8 {
        match self {
            SmilesBondOrder::Single | SmilesBondOrder::Aromatic => 1,
            SmilesBondOrder::Double => 2,
            SmilesBondOrder::Triple => 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmilesBond {
    pub order: SmilesBondOrder,
}
