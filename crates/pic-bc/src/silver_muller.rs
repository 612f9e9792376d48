//! Silver-Müller absorbing boundary.

use std::sync::Arc;

use pic_core::{BoundaryKind, Slot};
use pic_fields::{Complex64, EmFields, GridLayout};

use crate::absorb::{AbsorbingCoefficients, absorb_face};
use crate::error::{BcError, BcResult};

/// One-way absorbing condition on a cartesian face or a cylindrical
/// longitudinal face.
#[derive(Clone, Debug)]
pub struct SilverMuller {
    layout: Arc<GridLayout>,
    slot: Slot,
    coeffs: AbsorbingCoefficients,
}

impl SilverMuller {
    pub fn new(layout: Arc<GridLayout>, slot: Slot) -> BcResult<Self> {
        let normal = slot.axis().index();
        if !layout.is_present(normal) {
            return Err(BcError::InvalidArg {
                what: "silver-muller slot on an axis the layout does not have",
            });
        }
        if layout.geometry.is_cylindrical() && normal != 0 {
            return Err(BcError::InvalidArg {
                what: "silver-muller only applies to longitudinal faces in cylindrical geometry",
            });
        }
        let coeffs = AbsorbingCoefficients::silver_muller(&layout, normal);
        Ok(Self {
            layout,
            slot,
            coeffs,
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn coefficients(&self) -> &AbsorbingCoefficients {
        &self.coeffs
    }

    pub fn apply(&self, fields: &mut EmFields) -> BcResult<()> {
        let normal = self.slot.axis().index();
        let side = self.slot.side();
        let layout = &*self.layout;
        match fields {
            EmFields::Cartesian(f) => {
                absorb_face(layout, &f.e, &mut f.b, normal, side, &self.coeffs, &|_, _| 0.0);
                Ok(())
            }
            EmFields::Cylindrical(f) => {
                let dr = layout.cell_length[1];
                for (m, mode) in f.modes_mut() {
                    let azimuthal = |idx: [usize; 3], bn: Complex64| {
                        let r = layout.radius_primal(idx[1]);
                        if r < 0.5 * dr {
                            Complex64::new(0.0, 0.0)
                        } else {
                            Complex64::new(0.0, m as f64 / r) * bn
                        }
                    };
                    absorb_face(
                        layout,
                        &mode.e,
                        &mut mode.b,
                        normal,
                        side,
                        &self.coeffs,
                        &azimuthal,
                    );
                }
                Ok(())
            }
        }
    }

    pub(crate) fn kind(&self) -> BoundaryKind {
        BoundaryKind::SilverMuller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pic_core::{Axis, Geometry, Side};
    use pic_fields::Field;

    fn layout_1d() -> Arc<GridLayout> {
        Arc::new(GridLayout::new(Geometry::Cartesian1D, &[16], &[0.1], 0.05, 2).unwrap())
    }

    #[test]
    fn min_face_1d_matches_closed_form() {
        let layout = layout_1d();
        let bc = SilverMuller::new(layout.clone(), Slot::new(Axis::X, Side::Min)).unwrap();
        let mut fields = EmFields::new(&layout).unwrap();
        {
            let f = fields.as_cartesian_mut().unwrap();
            f.e[1].set([0, 0, 0], 2.0);
            f.e[2].set([0, 0, 0], 3.0);
            f.b[1].set([1, 0, 0], 0.5);
            f.b[2].set([1, 0, 0], -0.5);
        }
        bc.apply(&mut fields).unwrap();

        let c = bc.coefficients();
        let f = fields.as_cartesian().unwrap();
        // By from Ez, Bz from -Ey
        assert!((f.b[1].get([0, 0, 0]) - (c.alpha * 3.0 + c.beta * 0.5)).abs() < 1e-14);
        assert!((f.b[2].get([0, 0, 0]) - (-c.alpha * 2.0 - c.beta * 0.5)).abs() < 1e-14);
    }

    #[test]
    fn max_face_uses_outermost_dual_layer() {
        let layout = layout_1d();
        let bc = SilverMuller::new(layout.clone(), Slot::new(Axis::X, Side::Max)).unwrap();
        let mut fields = EmFields::new(&layout).unwrap();
        let nd = layout.n_dual(0);
        let np = layout.n_primal(0);
        {
            let f = fields.as_cartesian_mut().unwrap();
            f.e[2].set([np - 1, 0, 0], 1.0);
        }
        bc.apply(&mut fields).unwrap();
        let f = fields.as_cartesian().unwrap();
        let alpha = bc.coefficients().alpha;
        assert!((f.b[1].get([nd - 1, 0, 0]) + alpha).abs() < 1e-14);
        assert_eq!(f.b[1].get([nd - 2, 0, 0]), 0.0);
    }

    #[test]
    fn quiet_fields_stay_quiet() {
        let layout =
            Arc::new(GridLayout::new(Geometry::Cartesian3D, &[4, 4, 4], &[0.1; 3], 0.05, 1).unwrap());
        let mut fields = EmFields::new(&layout).unwrap();
        for index in 0..6 {
            let bc = SilverMuller::new(layout.clone(), Slot::from_index(index)).unwrap();
            bc.apply(&mut fields).unwrap();
        }
        assert_eq!(fields.energy(), 0.0);
    }

    #[test]
    fn transverse_derivative_enters_2d_update() {
        let layout =
            Arc::new(GridLayout::new(Geometry::Cartesian2D, &[8, 8], &[0.1, 0.1], 0.05, 1).unwrap());
        let bc = SilverMuller::new(layout.clone(), Slot::new(Axis::X, Side::Min)).unwrap();
        let mut fields = EmFields::new(&layout).unwrap();
        {
            let f = fields.as_cartesian_mut().unwrap();
            let bx: &mut Field<f64> = &mut f.b[0];
            bx.set([0, 4, 0], 1.0);
        }
        bc.apply(&mut fields).unwrap();
        let f = fields.as_cartesian().unwrap();
        let delta = bc.coefficients().delta[1];
        // Bz picks up +s*delta_y*(Bx[4] - Bx[3]) at j = 4 and the opposite at j = 5
        assert!((f.b[2].get([0, 4, 0]) - delta).abs() < 1e-14);
        assert!((f.b[2].get([0, 5, 0]) + delta).abs() < 1e-14);
        // By has no derivative along the absent z axis
        assert_eq!(f.b[1].energy(), 0.0);
    }

    #[test]
    fn cylindrical_azimuthal_term_scales_with_mode() {
        let layout = Arc::new(
            GridLayout::new(Geometry::Cylindrical, &[8, 8], &[0.1, 0.2], 0.05, 2)
                .unwrap()
                .with_modes(2)
                .unwrap(),
        );
        let bc = SilverMuller::new(layout.clone(), Slot::new(Axis::L, Side::Min)).unwrap();
        let mut fields = EmFields::new(&layout).unwrap();
        let j = layout.axis_row() + 2;
        {
            let f = fields.as_cylindrical_mut().unwrap();
            for m in 0..2 {
                f.mode_mut(m).b[0].set([0, j, 0], Complex64::new(1.0, 0.0));
            }
        }
        bc.apply(&mut fields).unwrap();
        let f = fields.as_cylindrical().unwrap();
        // Br: no azimuthal contribution for m = 0
        assert_eq!(f.mode(0).b[1].get([0, j, 0]), Complex64::new(0.0, 0.0));
        let r = layout.radius_primal(j);
        let delta = bc.coefficients().delta[2];
        let expected = Complex64::new(0.0, -delta / r);
        let got = f.mode(1).b[1].get([0, j, 0]);
        assert!((got - expected).norm() < 1e-12);
    }

    #[test]
    fn rejects_radial_slot_in_cylindrical_geometry() {
        let layout =
            Arc::new(GridLayout::new(Geometry::Cylindrical, &[8, 8], &[0.1, 0.2], 0.05, 2).unwrap());
        assert!(SilverMuller::new(layout, Slot::new(Axis::R, Side::Max)).is_err());
    }
}
