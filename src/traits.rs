//! Accessor traits so algorithms work over any atom/bond payload, including
//! the wrapper types in [`wrappers`](crate::wrappers).

use crate::bond::BondOrder;

pub trait HasAtomicNum {
    fn atomic_num(&self) -> u8;
}

pub trait HasFormalCharge {
    fn formal_charge(&self) -> i8;
}

pub trait HasIsotope {
    fn isotope(&self) -> u16;
}

pub trait HasHydrogenCount {
    fn hydrogen_count(&self) -> u8;
}

pub trait HasAromaticity {
    fn is_aromatic(&self) -> bool;
}

/// Model-space 2D coordinates, y pointing up.
pub trait HasPosition2D {
    fn position_2d(&self) -> Option<[f64; 2]>;
    fn set_position_2d(&mut self, pos: Option<[f64; 2]>);
}

pub trait HasBondOrder {
    fn bond_order(&self) -> BondOrder;
}
