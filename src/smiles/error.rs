use std::fmt;

use crate::kekulize::KekulizeError;

/// Errors produced when reading a SMILES string.
///
/// Positions are character offsets into the trimmed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmilesError {
    /// The input was empty or only whitespace.
    EmptyInput,
    /// A character that cannot start any SMILES token.
    UnexpectedChar { pos: usize, ch: char },
    /// A bracket atom names no known element.
    InvalidElement { pos: usize, text: String },
    /// `[` without a matching `]`.
    UnclosedBracket { pos: usize },
    /// A charge in a bracket atom is malformed or out of range.
    InvalidCharge { pos: usize },
    /// An isotope or atom class number does not fit.
    NumberOverflow { pos: usize },
    /// A ring-bond digit opened but never closed.
    UnclosedRing { digit: u16 },
    /// The two ends of a ring closure name different bond types.
    RingBondConflict { digit: u16 },
    /// A ring closure that would bond an atom to itself or duplicate a bond.
    InvalidRingBond { digit: u16, pos: usize },
    /// `(` or `)` without a partner, or an empty branch.
    UnmatchedParen { pos: usize },
    /// A bond symbol with no atom on one of its sides.
    DanglingBond { pos: usize },
    /// The aromatic system has no valid Kekulé structure.
    Kekulize(KekulizeError),
}

impl SmilesError {
    /// Whether this is a grammar error rather than a chemistry one.
    pub fn is_syntax(&self) -> bool {
        !matches!(self, Self::Kekulize(_))
    }
}

impl fmt::Display for SmilesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty SMILES string"),
            Self::UnexpectedChar { pos, ch } => {
                write!(f, "unexpected character '{}' at position {}", ch, pos)
            }
            Self::InvalidElement { pos, text } => {
                write!(f, "unknown element '{}' at position {}", text, pos)
            }
            Self::UnclosedBracket { pos } => {
                write!(f, "bracket atom at position {} is never closed", pos)
            }
            Self::InvalidCharge { pos } => write!(f, "invalid charge at position {}", pos),
            Self::NumberOverflow { pos } => write!(f, "number too large at position {}", pos),
            Self::UnclosedRing { digit } => write!(f, "ring bond {} is never closed", digit),
            Self::RingBondConflict { digit } => {
                write!(f, "ring bond {} has conflicting bond types", digit)
            }
            Self::InvalidRingBond { digit, pos } => {
                write!(f, "invalid ring bond {} at position {}", digit, pos)
            }
            Self::UnmatchedParen { pos } => {
                write!(f, "unmatched or empty branch at position {}", pos)
            }
            Self::DanglingBond { pos } => {
                write!(f, "bond at position {} is missing an atom", pos)
            }
            Self::Kekulize(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SmilesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Kekulize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<KekulizeError> for SmilesError {
    fn from(e: KekulizeError) -> Self {
        Self::Kekulize(e)
    }
}
