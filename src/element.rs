//! Periodic table lookups needed to read SMILES and to draw atom labels.

static SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", //
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", //
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", //
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", //
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", //
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", //
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", //
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", //
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", //
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", //
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", //
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// A chemical element identified by atomic number.
///
/// Atomic number `0` is the SMILES wildcard atom `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element(u8);

impl Element {
    pub const WILDCARD: Element = Element(0);
    pub const H: Element = Element(1);
    pub const B: Element = Element(5);
    pub const C: Element = Element(6);
    pub const N: Element = Element(7);
    pub const O: Element = Element(8);
    pub const F: Element = Element(9);
    pub const SI: Element = Element(14);
    pub const P: Element = Element(15);
    pub const S: Element = Element(16);
    pub const CL: Element = Element(17);
    pub const AS: Element = Element(33);
    pub const SE: Element = Element(34);
    pub const BR: Element = Element(35);
    pub const TE: Element = Element(52);
    pub const I: Element = Element(53);

    pub fn from_atomic_num(n: u8) -> Option<Element> {
        if (n as usize) <= SYMBOLS.len() {
            Some(Element(n))
        } else {
            None
        }
    }

    /// Looks up a case-sensitive element symbol (`"Cl"`, not `"CL"`).
    pub fn from_symbol(s: &str) -> Option<Element> {
        if s == "*" {
            return Some(Element::WILDCARD);
        }
        SYMBOLS
            .iter()
            .position(|&sym| sym == s)
            .map(|i| Element(i as u8 + 1))
    }

    pub fn atomic_num(self) -> u8 {
        self.0
    }

    pub fn symbol(self) -> &'static str {
        match self.0 {
            0 => "*",
            n => SYMBOLS[n as usize - 1],
        }
    }

    /// Normal valences, smallest first. Empty for elements whose valence
    /// SMILES does not define (metals, noble gases, the wildcard).
    pub fn default_valences(self) -> &'static [u8] {
        match self.0 {
            1 => &[1],
            5 => &[3],
            6 | 14 | 32 => &[4],
            7 | 15 | 33 => &[3, 5],
            8 => &[2],
            16 | 34 | 52 => &[2, 4, 6],
            9 => &[1],
            17 | 35 | 53 => &[1, 3, 5, 7],
            _ => &[],
        }
    }

    /// Valences of a charged atom, taken from its isoelectronic neighbour:
    /// `[N+]` behaves like carbon, `[O-]` like fluorine, `[C-]` like nitrogen.
    pub fn charged_valences(self, charge: i8) -> &'static [u8] {
        let shifted = self.0 as i16 - charge as i16;
        if charge == 0 || shifted < 1 {
            return self.default_valences();
        }
        // Boron and carbon cations lose a bond rather than gain one.
        if charge > 0 && matches!(self.0, 5 | 6) {
            return &[3];
        }
        Element(shifted as u8).default_valences()
    }

    /// Atoms that may appear outside brackets in SMILES.
    pub fn is_organic_subset(self) -> bool {
        matches!(self.0, 5..=9 | 15..=17 | 35 | 53)
    }

    /// Display colour used for atom labels, as `[r, g, b]`.
    pub fn color(self) -> [u8; 3] {
        match self.0 {
            7 => [48, 80, 248],
            8 => [255, 13, 13],
            9 => [144, 224, 80],
            15 => [255, 128, 0],
            16 => [198, 160, 0],
            17 => [31, 192, 31],
            35 => [166, 41, 41],
            53 => [148, 0, 148],
            5 => [255, 128, 128],
            14 => [120, 120, 120],
            0 | 1 | 6 => [0, 0, 0],
            _ => [96, 96, 96],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_roundtrip() {
        for n in 1..=118u8 {
            let e = Element::from_atomic_num(n).unwrap();
            assert_eq!(Element::from_symbol(e.symbol()), Some(e));
        }
    }

    #[test]
    fn known_symbols() {
        assert_eq!(Element::from_symbol("Cl"), Some(Element::CL));
        assert_eq!(Element::from_symbol("Og").unwrap().atomic_num(), 118);
        assert_eq!(Element::from_symbol("Xx"), None);
        assert_eq!(Element::from_symbol("*"), Some(Element::WILDCARD));
        assert_eq!(Element::from_atomic_num(119), None);
    }

    #[test]
    fn charged_valences_follow_isoelectronic_element() {
        assert_eq!(Element::N.charged_valences(1), &[4]);
        assert_eq!(Element::O.charged_valences(-1), &[1]);
        assert_eq!(Element::O.charged_valences(1), &[3, 5]);
        assert_eq!(Element::C.charged_valences(-1), &[3, 5]);
        assert_eq!(Element::C.charged_valences(1), &[3]);
        assert_eq!(Element::N.charged_valences(0), &[3, 5]);
    }

    #[test]
    fn organic_subset() {
        for sym in ["B", "C", "N", "O", "P", "S", "F", "Cl", "Br", "I"] {
            assert!(Element::from_symbol(sym).unwrap().is_organic_subset(), "{sym}");
        }
        assert!(!Element::from_symbol("Na").unwrap().is_organic_subset());
        assert!(!Element::SE.is_organic_subset());
    }
}
