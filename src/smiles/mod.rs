//! Strict SMILES reader.
//!
//! [`parse_smiles`] keeps aromaticity as written; [`from_smiles`] also
//! kekulizes, which is what depiction needs.

pub mod error;
mod parser;
mod tokenizer;

use crate::atom::Atom;
use crate::bond::{Bond, SmilesBond};
use crate::kekulize;
use crate::mol::Mol;
pub use error::SmilesError;

pub fn parse_smiles(s: &str) -> Result<Mol<Atom, SmilesBond>, SmilesError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(SmilesError::EmptyInput);
    }
    let tokens = tokenizer::tokenize(trimmed)?;
    if tokens.is_empty() {
        return Err(SmilesError::EmptyInput);
    }
    parser::build_mol(&tokens)
}

pub fn from_smiles(s: &str) -> Result<Mol<Atom, Bond>, SmilesError> {
    let mol = parse_smiles(s)?;
    Ok(kekulize::kekulize(&mol)?)
}
