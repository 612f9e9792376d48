//! Regularity condition on the cylindrical axis (r = 0).

use std::sync::Arc;

use pic_core::{Axis, BoundaryKind, Side, Slot};
use pic_fields::{Complex64, EmFields, GridLayout, ModeFields, face_indices};

use crate::error::{BcError, BcResult};
use crate::reflective::mirror_ghosts;

const R: usize = 1;

/// Fixed condition at the inner radial face of azimuthal-mode runs.
///
/// For mode `m`, longitudinal components have parity `(-1)^m` across the
/// axis and radial/azimuthal components `(-1)^(m+1)`. On-axis primal values
/// vanish except `El` for `m = 0`; for `m = 1` the transverse values on the
/// axis follow from the first off-axis dual row.
#[derive(Clone, Debug)]
pub struct AxisSymmetry {
    layout: Arc<GridLayout>,
}

impl AxisSymmetry {
    pub fn new(layout: Arc<GridLayout>) -> BcResult<Self> {
        if !layout.geometry.is_cylindrical() {
            return Err(BcError::InvalidArg {
                what: "axis symmetry needs a cylindrical layout",
            });
        }
        Ok(Self { layout })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn slot(&self) -> Slot {
        Slot::new(Axis::R, Side::Min)
    }

    pub fn apply(&self, fields: &mut EmFields) -> BcResult<()> {
        let Some(f) = fields.as_cylindrical_mut() else {
            return Err(BcError::FieldMismatch {
                kind: BoundaryKind::AxisSymmetry,
                expected: "cylindrical",
            });
        };
        let axis_row = self.layout.axis_row();
        let os = self.layout.oversize[R];
        for (m, mode) in f.modes_mut() {
            fix_on_axis(mode, m, axis_row);
            let longitudinal = if m % 2 == 0 { 1.0 } else { -1.0 };
            let transverse = -longitudinal;
            let parity = [longitudinal, transverse, transverse];
            for (c, field) in mode.e.iter_mut().enumerate() {
                mirror_ghosts(field, R, Side::Min, os, parity[c]);
            }
            for (c, field) in mode.b.iter_mut().enumerate() {
                mirror_ghosts(field, R, Side::Min, os, parity[c]);
            }
        }
        Ok(())
    }

    pub(crate) fn kind(&self) -> BoundaryKind {
        BoundaryKind::AxisSymmetry
    }
}

fn fix_on_axis(mode: &mut ModeFields, m: usize, axis_row: usize) {
    let zero = Complex64::new(0.0, 0.0);
    let minus_i = Complex64::new(0.0, -1.0);

    // primal-in-r components: El, Et, Br
    if m != 0 {
        zero_row(&mut mode.e[0], axis_row, zero);
    }
    if m == 1 {
        let (et, er) = pic_fields::pair_mut(&mut mode.e, 2, 1);
        for idx in face_indices(et.dims(), R, axis_row) {
            let mut above = idx;
            above[R] = axis_row + 1;
            et.set(idx, minus_i * er.get(above));
        }
        let (br, bt) = pic_fields::pair_mut(&mut mode.b, 1, 2);
        for idx in face_indices(br.dims(), R, axis_row) {
            let mut above = idx;
            above[R] = axis_row + 1;
            br.set(idx, minus_i * bt.get(above));
        }
    } else {
        zero_row(&mut mode.e[2], axis_row, zero);
        zero_row(&mut mode.b[1], axis_row, zero);
    }
}

fn zero_row(field: &mut pic_fields::Field<Complex64>, row: usize, zero: Complex64) {
    for idx in face_indices(field.dims(), R, row) {
        field.set(idx, zero);
    }
}
