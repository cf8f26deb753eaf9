use crate::element::Element;

/// Atom payload of a molecular graph node.
///
/// Holds what a SMILES string says about an atom. Derived data such as 2D
/// coordinates lives in wrappers (see [`WithPosition2D`](crate::WithPosition2D)).
///
/// # Examples
///
/// ```
/// use molpaint::Atom;
///
/// let oxygen = Atom {
///     atomic_num: 8,
///     hydrogen_count: 1,
///     ..Atom::default()
/// };
/// assert_eq!(oxygen.element().symbol(), "O");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number; `0` for the `*` wildcard.
    pub atomic_num: u8,
    pub formal_charge: i8,
    /// Mass number, `0` when unspecified.
    pub isotope: u16,
    /// Implicit (suppressed) hydrogens. Hydrogens are never graph nodes
    /// unless written as bracket atoms, e.g. `[H][H]`.
    pub hydrogen_count: u8,
    /// Written lowercase in the SMILES.
    pub is_aromatic: bool,
}

impl Atom {
    pub fn element(&self) -> Element {
        Element::from_atomic_num(self.atomic_num).unwrap_or(Element::WILDCARD)
    }
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasIsotope for Atom {
    fn isotope(&self) -> u16 {
        self.isotope
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasAromaticity for Atom {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}
