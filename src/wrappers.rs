use crate::traits::*;

/// Attaches 2D coordinates to an atom payload without changing its type's
/// other behaviour. Produced by [`generate_coordinates`](crate::layout::generate_coordinates).
#[derive(Debug, Clone, PartialEq)]
pub struct WithPosition2D<T> {
    pub inner: T,
    pub position_2d: Option<[f64; 2]>,
}

impl<T> WithPosition2D<T> {
    pub fn new(inner: T, position: [f64; 2]) -> Self {
        Self {
            inner,
            position_2d: Some(position),
        }
    }

    pub fn unplaced(inner: T) -> Self {
        Self {
            inner,
            position_2d: None,
        }
    }
}

impl<T> HasPosition2D for WithPosition2D<T> {
    fn position_2d(&self) -> Option<[f64; 2]> {
        self.position_2d
    }
    fn set_position_2d(&mut self, pos: Option<[f64; 2]>) {
        self.position_2d = pos;
    }
}

macro_rules! delegate_trait {
    ($wrapper:ident, $trait:ident, $method:ident, $ret:ty) => {
        impl<T: $trait> $trait for $wrapper<T> {
            fn $method(&self) -> $ret {
                self.inner.$method()
            }
        }
    };
}

delegate_trait!(WithPosition2D, HasAtomicNum, atomic_num, u8);
delegate_trait!(WithPosition2D, HasFormalCharge, formal_charge, i8);
delegate_trait!(WithPosition2D, HasIsotope, isotope, u16);
delegate_trait!(WithPosition2D, HasHydrogenCount, hydrogen_count, u8);
delegate_trait!(WithPosition2D, HasAromaticity, is_aromatic, bool);
