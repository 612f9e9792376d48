//! Cylindrical fields decomposed in azimuthal modes.

use nalgebra::Complex;
use pic_core::{PicError, PicResult};

use crate::field::Field;
use crate::layout::GridLayout;
use crate::yee::{b_staggering, e_staggering};

pub type Complex64 = Complex<f64>;

/// E and B components of one azimuthal mode, ordered (l, r, θ).
#[derive(Clone, Debug, PartialEq)]
pub struct ModeFields {
    pub e: [Field<Complex64>; 3],
    pub b: [Field<Complex64>; 3],
}

impl ModeFields {
    fn new(layout: &GridLayout) -> Self {
        Self {
            e: [
                Field::new("El", layout, e_staggering(0)),
                Field::new("Er", layout, e_staggering(1)),
                Field::new("Et", layout, e_staggering(2)),
            ],
            b: [
                Field::new("Bl", layout, b_staggering(0)),
                Field::new("Br", layout, b_staggering(1)),
                Field::new("Bt", layout, b_staggering(2)),
            ],
        }
    }

    fn fields_mut(&mut self) -> impl Iterator<Item = &mut Field<Complex64>> {
        self.e.iter_mut().chain(self.b.iter_mut())
    }

    pub fn energy(&self) -> f64 {
        self.e.iter().chain(self.b.iter()).map(Field::energy).sum()
    }
}

/// Complex per-mode fields on an (l, r) grid.
#[derive(Clone, Debug, PartialEq)]
pub struct AmFields {
    layout: GridLayout,
    origin_index: i64,
    modes: Vec<ModeFields>,
}

impl AmFields {
    pub fn new(layout: &GridLayout) -> PicResult<Self> {
        if !layout.geometry.is_cylindrical() {
            return Err(PicError::InvalidArg {
                what: "azimuthal-mode fields need a cylindrical layout",
            });
        }
        Ok(Self {
            layout: layout.clone(),
            origin_index: 0,
            modes: (0..layout.n_modes).map(|_| ModeFields::new(layout)).collect(),
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn n_modes(&self) -> usize {
        self.modes.len()
    }

    pub fn mode(&self, m: usize) -> &ModeFields {
        &self.modes[m]
    }

    pub fn mode_mut(&mut self, m: usize) -> &mut ModeFields {
        &mut self.modes[m]
    }

    /// Modes paired with their azimuthal number.
    pub fn modes_mut(&mut self) -> impl Iterator<Item = (usize, &mut ModeFields)> {
        self.modes.iter_mut().enumerate()
    }

    pub fn origin_index(&self) -> i64 {
        self.origin_index
    }

    pub fn set_origin_index(&mut self, index: i64) {
        self.origin_index = index;
    }

    pub fn shift_x(&mut self, cells: usize) {
        for mode in &mut self.modes {
            for f in mode.fields_mut() {
                f.shift_along(0, cells);
            }
        }
    }

    pub fn energy(&self) -> f64 {
        self.modes.iter().map(ModeFields::energy).sum()
    }
}
