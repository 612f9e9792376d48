//! pic-fields: Yee-staggered electromagnetic field storage.
//!
//! Provides:
//! - `GridLayout`: per-axis sizes, cell lengths, timestep and ghost-cell count
//! - `Field<T>`: dense 3-index array with primal/dual staggering flags
//! - `YeeFields`: real cartesian E/B components (1D, 2D, 3D)
//! - `AmFields`: complex per-mode components for cylindrical geometry
//! - `EmFields`: closed variant over both, as handed to boundary conditions
//!
//! The field update kernels live elsewhere; this crate only stores values and
//! provides the data movement needed by boundary conditions and the moving
//! window.

pub mod am;
pub mod field;
pub mod layout;
pub mod yee;

pub use am::{AmFields, Complex64, ModeFields};
pub use field::{Field, FieldValue, face_indices, pair_mut};
pub use layout::GridLayout;
pub use yee::YeeFields;

use pic_core::{Geometry, PicResult};

/// Field state of one patch, in whichever representation the geometry uses.
#[derive(Clone, Debug, PartialEq)]
pub enum EmFields {
    Cartesian(YeeFields),
    Cylindrical(AmFields),
}

impl EmFields {
    /// Allocate zeroed fields for the layout's geometry.
    pub fn new(layout: &GridLayout) -> PicResult<Self> {
        match layout.geometry {
            Geometry::Cartesian1D | Geometry::Cartesian2D | Geometry::Cartesian3D => {
                Ok(EmFields::Cartesian(YeeFields::new(layout)?))
            }
            Geometry::Cylindrical => Ok(EmFields::Cylindrical(AmFields::new(layout)?)),
        }
    }

    pub fn layout(&self) -> &GridLayout {
        match self {
            EmFields::Cartesian(f) => f.layout(),
            EmFields::Cylindrical(f) => f.layout(),
        }
    }

    /// Global index of the first cell of this patch along the streaming axis.
    pub fn origin_index(&self) -> i64 {
        match self {
            EmFields::Cartesian(f) => f.origin_index(),
            EmFields::Cylindrical(f) => f.origin_index(),
        }
    }

    pub fn set_origin_index(&mut self, index: i64) {
        match self {
            EmFields::Cartesian(f) => f.set_origin_index(index),
            EmFields::Cylindrical(f) => f.set_origin_index(index),
        }
    }

    /// Shift every component toward the Min face of axis 0 by `cells`,
    /// zeroing the newly exposed cells at the Max end.
    pub fn shift_x(&mut self, cells: usize) {
        match self {
            EmFields::Cartesian(f) => f.shift_x(cells),
            EmFields::Cylindrical(f) => f.shift_x(cells),
        }
    }

    /// Sum of squared magnitudes over every component (and mode).
    pub fn energy(&self) -> f64 {
        match self {
            EmFields::Cartesian(f) => f.energy(),
            EmFields::Cylindrical(f) => f.energy(),
        }
    }

    pub fn as_cartesian(&self) -> Option<&YeeFields> {
        match self {
            EmFields::Cartesian(f) => Some(f),
            EmFields::Cylindrical(_) => None,
        }
    }

    pub fn as_cartesian_mut(&mut self) -> Option<&mut YeeFields> {
        match self {
            EmFields::Cartesian(f) => Some(f),
            EmFields::Cylindrical(_) => None,
        }
    }

    pub fn as_cylindrical(&self) -> Option<&AmFields> {
        match self {
            EmFields::Cartesian(_) => None,
            EmFields::Cylindrical(f) => Some(f),
        }
    }

    pub fn as_cylindrical_mut(&mut self) -> Option<&mut AmFields> {
        match self {
            EmFields::Cartesian(_) => None,
            EmFields::Cylindrical(f) => Some(f),
        }
    }
}
