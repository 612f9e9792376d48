//! Cartesian Yee fields.

use pic_core::{PicError, PicResult};

use crate::field::Field;
use crate::layout::GridLayout;

/// Real E and B components on a cartesian Yee grid.
///
/// `E_c` is dual along axis `c` and primal elsewhere; `B_c` is primal along
/// axis `c` and dual elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub struct YeeFields {
    layout: GridLayout,
    origin_index: i64,
    pub e: [Field<f64>; 3],
    pub b: [Field<f64>; 3],
}

impl YeeFields {
    pub fn new(layout: &GridLayout) -> PicResult<Self> {
        if layout.geometry.is_cylindrical() {
            return Err(PicError::InvalidArg {
                what: "cartesian fields need a cartesian layout",
            });
        }
        Ok(Self {
            layout: layout.clone(),
            origin_index: 0,
            e: [
                Field::new("Ex", layout, e_staggering(0)),
                Field::new("Ey", layout, e_staggering(1)),
                Field::new("Ez", layout, e_staggering(2)),
            ],
            b: [
                Field::new("Bx", layout, b_staggering(0)),
                Field::new("By", layout, b_staggering(1)),
                Field::new("Bz", layout, b_staggering(2)),
            ],
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn origin_index(&self) -> i64 {
        self.origin_index
    }

    pub fn set_origin_index(&mut self, index: i64) {
        self.origin_index = index;
    }

    pub fn shift_x(&mut self, cells: usize) {
        for f in self.e.iter_mut().chain(self.b.iter_mut()) {
            f.shift_along(0, cells);
        }
    }

    pub fn energy(&self) -> f64 {
        self.e.iter().chain(self.b.iter()).map(Field::energy).sum()
    }
}

/// Staggering of the electric component along `component`.
pub(crate) fn e_staggering(component: usize) -> [bool; 3] {
    let mut dual = [false; 3];
    dual[component] = true;
    dual
}

/// Staggering of the magnetic component along `component`.
pub(crate) fn b_staggering(component: usize) -> [bool; 3] {
    let mut dual = [true; 3];
    dual[component] = false;
    dual
}
