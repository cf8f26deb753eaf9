pub mod atom;
pub mod bond;
pub mod element;
pub mod error;
pub mod geometry;
pub mod imaging;
pub mod kekulize;
pub mod layout;
pub mod mol;
pub mod raster;
pub mod render;
pub mod renderer;
pub mod rings;
pub mod smiles;
pub mod traits;
pub mod valence;
pub mod wrappers;

pub use atom::Atom;
pub use bond::{Bond, BondOrder, SmilesBond, SmilesBondOrder};
pub use element::Element;
pub use error::{DepictError, DepictResult, EngineError};
pub use kekulize::{kekulize, KekulizeError};
pub use layout::{generate_coordinates, LaidOutMol, LayoutError, BOND_LENGTH};
pub use mol::Mol;
pub use raster::RasterError;
pub use render::{Color, MoleculeRenderer, RenderOptions};
pub use renderer::{Icon, ImageRenderer, RenderMap, RenderOutcome, RenderRequest};
pub use rings::RingInfo;
pub use smiles::{from_smiles, parse_smiles, SmilesError};
pub use traits::{
    HasAromaticity, HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount, HasIsotope,
    HasPosition2D,
};
pub use valence::{check_valence, ValenceError};
pub use wrappers::WithPosition2D;

#[cfg(test)]
mod tests;
