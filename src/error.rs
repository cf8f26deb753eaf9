use thiserror::Error;

use crate::kekulize::KekulizeError;
use crate::layout::LayoutError;
use crate::raster::RasterError;
use crate::smiles::SmilesError;
use crate::valence::ValenceError;

pub type DepictResult<T> = Result<T, DepictError>;

/// Why a rendering request failed.
#[derive(Debug, Error)]
pub enum DepictError {
    /// The string is not valid SMILES.
    #[error("invalid SMILES {smiles:?}: {source}")]
    SmilesSyntax { smiles: String, source: SmilesError },

    /// The SMILES parsed but the molecule could not be depicted.
    #[error("cannot depict {smiles:?}: {source}")]
    ChemistryEngine { smiles: String, source: EngineError },

    #[error("invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },
}

impl DepictError {
    /// The SMILES that failed, if the error concerns one.
    pub fn smiles(&self) -> Option<&str> {
        match self {
            Self::SmilesSyntax { smiles, .. } | Self::ChemistryEngine { smiles, .. } => Some(smiles),
            Self::InvalidDimensions { .. } => None,
        }
    }
}

/// Failures after parsing.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Kekulize(#[from] KekulizeError),

    #[error(transparent)]
    Valence(#[from] ValenceError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Raster(#[from] RasterError),
}
