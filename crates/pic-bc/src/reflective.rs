//! Perfect-conductor reflective boundary for 1D and 2D cartesian runs.

use std::sync::Arc;

use pic_core::{BoundaryKind, Geometry, Side, Slot};
use pic_fields::{EmFields, Field, FieldValue, GridLayout};

use crate::error::{BcError, BcResult};

/// Mirrors every component into the ghost layers behind the face with
/// conductor parity.
#[derive(Clone, Debug)]
pub struct Reflective {
    layout: Arc<GridLayout>,
    slot: Slot,
    /// Parity of (E, B) components, indexed by component.
    parity: [[f64; 3]; 2],
}

impl Reflective {
    pub fn new(layout: Arc<GridLayout>, slot: Slot) -> BcResult<Self> {
        match layout.geometry {
            Geometry::Cartesian1D | Geometry::Cartesian2D => {}
            Geometry::Cartesian3D | Geometry::Cylindrical => {
                return Err(BcError::InvalidArg {
                    what: "reflective boundaries exist only in 1D and 2D cartesian geometry",
                });
            }
        }
        let normal = slot.axis().index();
        if !layout.is_present(normal) {
            return Err(BcError::InvalidArg {
                what: "reflective slot on an axis the layout does not have",
            });
        }
        let mut parity = [[-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]];
        // normal E is even, normal B is odd
        parity[0][normal] = 1.0;
        parity[1][normal] = -1.0;
        Ok(Self {
            layout,
            slot,
            parity,
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn apply(&self, fields: &mut EmFields) -> BcResult<()> {
        let Some(f) = fields.as_cartesian_mut() else {
            return Err(BcError::FieldMismatch {
                kind: BoundaryKind::Reflective,
                expected: "cartesian",
            });
        };
        let axis = self.slot.axis().index();
        let side = self.slot.side();
        let os = self.layout.oversize[axis];
        for (c, field) in f.e.iter_mut().enumerate() {
            reflect(field, axis, side, os, self.parity[0][c]);
        }
        for (c, field) in f.b.iter_mut().enumerate() {
            reflect(field, axis, side, os, self.parity[1][c]);
        }
        Ok(())
    }

    pub(crate) fn kind(&self) -> BoundaryKind {
        BoundaryKind::Reflective
    }
}

fn reflect(field: &mut Field<f64>, axis: usize, side: Side, os: usize, sign: f64) {
    if sign < 0.0 && !field.is_dual(axis) {
        let n = field.dims()[axis];
        let face = match side {
            Side::Min => os,
            Side::Max => n - 1 - os,
        };
        for idx in pic_fields::face_indices(field.dims(), axis, face) {
            field.set(idx, 0.0);
        }
    }
    mirror_ghosts(field, axis, side, os, sign);
}

/// Copy interior layers into the ghost layers behind a face, scaled by
/// `sign`.
///
/// Primal fields mirror about the face point at index `os` (Min) or
/// `n - 1 - os` (Max) and leave it untouched; dual fields mirror about the
/// face, which sits between two dual points, and fill `os + 1` layers.
pub(crate) fn mirror_ghosts<T: FieldValue>(
    field: &mut Field<T>,
    axis: usize,
    side: Side,
    os: usize,
    sign: f64,
) {
    let dims = field.dims();
    let n = dims[axis];
    let dual = field.is_dual(axis);
    let layers = if dual { os + 1 } else { os };
    for g in 1..=layers {
        let (ghost, source) = match (side, dual) {
            (Side::Min, false) => (os - g, os + g),
            (Side::Min, true) => (os + 1 - g, os + g),
            (Side::Max, false) => (n - 1 - os + g, n - 1 - os - g),
            (Side::Max, true) => (n - 2 - os + g, n - 1 - os - g),
        };
        if source >= n {
            continue;
        }
        for idx in pic_fields::face_indices(dims, axis, ghost) {
            let mut from = idx;
            from[axis] = source;
            let value = field.get(from) * sign;
            field.set(idx, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pic_core::Axis;

    fn layout() -> Arc<GridLayout> {
        Arc::new(GridLayout::new(Geometry::Cartesian1D, &[10], &[0.1], 0.05, 2).unwrap())
    }

    #[test]
    fn rejected_outside_1d_2d() {
        let l3 = Arc::new(GridLayout::new(Geometry::Cartesian3D, &[4; 3], &[0.1; 3], 0.05, 1).unwrap());
        assert!(Reflective::new(l3, Slot::from_index(0)).is_err());
    }

    #[test]
    fn primal_mirror_min_side() {
        let mut f: Field<f64> = Field::zeros("Ey", [15, 1, 1], [false; 3]);
        f.fill_with(|idx| idx[0] as f64);
        mirror_ghosts(&mut f, 0, Side::Min, 2, -1.0);
        assert_eq!(f.get([1, 0, 0]), -3.0);
        assert_eq!(f.get([0, 0, 0]), -4.0);
        assert_eq!(f.get([2, 0, 0]), 2.0);
    }

    #[test]
    fn dual_mirror_max_side() {
        // n_space 10, oversize 2: 16 dual points, face between 12 and 13
        let mut f: Field<f64> = Field::zeros("Ex", [16, 1, 1], [true, false, false]);
        f.fill_with(|idx| idx[0] as f64);
        mirror_ghosts(&mut f, 0, Side::Max, 2, 1.0);
        assert_eq!(f.get([13, 0, 0]), 12.0);
        assert_eq!(f.get([14, 0, 0]), 11.0);
        assert_eq!(f.get([15, 0, 0]), 10.0);
        assert_eq!(f.get([12, 0, 0]), 12.0);
    }

    #[test]
    fn conductor_parity_on_min_face() {
        let layout = layout();
        let bc = Reflective::new(layout.clone(), Slot::new(Axis::X, Side::Min)).unwrap();
        let mut fields = EmFields::new(&layout).unwrap();
        {
            let f = fields.as_cartesian_mut().unwrap();
            for c in 0..3 {
                f.e[c].fill(1.0);
                f.b[c].fill(1.0);
            }
        }
        bc.apply(&mut fields).unwrap();
        let f = fields.as_cartesian().unwrap();
        // Ex even (dual), Ey odd (primal, face zeroed)
        assert_eq!(f.e[0].get([0, 0, 0]), 1.0);
        assert_eq!(f.e[1].get([2, 0, 0]), 0.0);
        assert_eq!(f.e[1].get([1, 0, 0]), -1.0);
        // Bx odd (primal), By even (dual)
        assert_eq!(f.b[0].get([2, 0, 0]), 0.0);
        assert_eq!(f.b[0].get([0, 0, 0]), -1.0);
        assert_eq!(f.b[1].get([0, 0, 0]), 1.0);
        // interior untouched
        assert_eq!(f.e[1].get([5, 0, 0]), 1.0);
    }

    #[test]
    fn cylindrical_fields_are_a_mismatch() {
        let layout = layout();
        let bc = Reflective::new(layout, Slot::new(Axis::X, Side::Max)).unwrap();
        let cyl = GridLayout::new(Geometry::Cylindrical, &[8, 8], &[0.1, 0.1], 0.05, 2).unwrap();
        let mut fields = EmFields::new(&cyl).unwrap();
        assert_eq!(
            bc.apply(&mut fields),
            Err(BcError::FieldMismatch {
                kind: BoundaryKind::Reflective,
                expected: "cartesian"
            })
        );
    }
}
