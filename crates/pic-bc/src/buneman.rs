//! Absorbing condition on the outer radial face of azimuthal-mode runs.

use std::sync::Arc;

use pic_core::{Axis, BoundaryKind, Side, Slot};
use pic_fields::{Complex64, EmFields, GridLayout};

use crate::absorb::{AbsorbingCoefficients, FaceRows, absorb_face};
use crate::error::{BcError, BcResult};

/// Silver-Müller update along r, corrected for cylindrical spreading.
#[derive(Clone, Debug)]
pub struct Buneman {
    layout: Arc<GridLayout>,
    coeffs: AbsorbingCoefficients,
    /// Radius of the primal row holding the face values.
    r_face: f64,
}

impl Buneman {
    pub fn new(layout: Arc<GridLayout>) -> BcResult<Self> {
        if !layout.geometry.is_cylindrical() {
            return Err(BcError::InvalidArg {
                what: "Buneman boundary needs a cylindrical layout",
            });
        }
        let r = Axis::R.index();
        let rows = FaceRows::new(&layout, r, Side::Max);
        let r_inner = layout.radius_dual(rows.inner);
        let r_ghost = layout.radius_dual(rows.ghost);
        let mut coeffs = AbsorbingCoefficients::silver_muller(&layout, r);
        coeffs.beta *= (r_inner / r_ghost).sqrt();
        let r_face = layout.radius_primal(rows.face);
        Ok(Self {
            layout,
            coeffs,
            r_face,
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn slot(&self) -> Slot {
        Slot::new(Axis::R, Side::Max)
    }

    pub fn coefficients(&self) -> &AbsorbingCoefficients {
        &self.coeffs
    }

    pub fn apply(&self, fields: &mut EmFields) -> BcResult<()> {
        let Some(f) = fields.as_cylindrical_mut() else {
            return Err(BcError::FieldMismatch {
                kind: BoundaryKind::Buneman,
                expected: "cylindrical",
            });
        };
        let layout = &*self.layout;
        for (m, mode) in f.modes_mut() {
            let factor = Complex64::new(0.0, m as f64 / self.r_face);
            let azimuthal = |_: [usize; 3], br: Complex64| factor * br;
            absorb_face(
                layout,
                &mode.e,
                &mut mode.b,
                Axis::R.index(),
                Side::Max,
                &self.coeffs,
                &azimuthal,
            );
        }
        Ok(())
    }

    pub(crate) fn kind(&self) -> BoundaryKind {
        BoundaryKind::Buneman
    }
}
