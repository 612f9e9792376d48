//! Per-geometry selection and construction of boundary conditions.

use std::sync::Arc;

use pic_core::{Axis, BoundaryKind, Geometry, Side, Slot};
use pic_fields::GridLayout;
use tracing::debug;

use crate::axis::AxisSymmetry;
use crate::buneman::Buneman;
use crate::error::{BcError, BcResult};
use crate::reflective::Reflective;
use crate::set::BoundaryConditionSet;
use crate::silver_muller::SilverMuller;
use crate::variant::BoundaryCondition;

/// Builds a [`BoundaryConditionSet`] from per-axis `[min, max]` tokens.
///
/// | Geometry | Axis | Accepted tokens |
/// |---|---|---|
/// | 1D / 2D cartesian | every axis | `periodic`, `silver-muller`, `reflective` |
/// | 3D cartesian | every axis | `periodic`, `silver-muller` |
/// | cylindrical | l | `periodic`, `silver-muller` |
/// | cylindrical | r, inner | token ignored, always axis symmetry |
/// | cylindrical | r, outer | `Buneman` only |
///
/// Any other token fails the whole call; boundaries built for earlier slots
/// are dropped before the error is returned.
pub struct BoundaryFactory;

impl BoundaryFactory {
    pub fn create<S: AsRef<str>>(
        geometry: Geometry,
        tokens: &[[S; 2]],
        layout: &Arc<GridLayout>,
    ) -> BcResult<BoundaryConditionSet> {
        if layout.geometry != geometry {
            return Err(BcError::InvalidArg {
                what: "layout was built for a different geometry",
            });
        }
        let n_dim = geometry.n_dim_field();
        if tokens.len() < n_dim {
            return Err(BcError::MissingAxis {
                geometry,
                axis: Axis::new(tokens.len()),
            });
        }

        let mut slots = Vec::with_capacity(geometry.slot_count());
        match geometry {
            Geometry::Cartesian1D | Geometry::Cartesian2D | Geometry::Cartesian3D => {
                for (axis, pair) in tokens.iter().take(n_dim).enumerate() {
                    for side in Side::BOTH {
                        let token = pair[side.index()].as_ref();
                        slots.push(build_slot(geometry, Axis::new(axis), side, token, layout)?);
                    }
                }
            }
            Geometry::Cylindrical => {
                for side in Side::BOTH {
                    let token = tokens[0][side.index()].as_ref();
                    slots.push(build_slot(geometry, Axis::L, side, token, layout)?);
                }

                // the inner radial token is not consulted
                let axis = AxisSymmetry::new(Arc::clone(layout))?;
                debug!(%geometry, slot = 2, kind = %BoundaryKind::AxisSymmetry, "boundary slot built");
                slots.push(Some(BoundaryCondition::AxisSymmetry(axis)));

                let outer = tokens[1][Side::Max.index()].as_ref();
                if outer != BoundaryKind::Buneman.token() {
                    return Err(BcError::IllegalBoundary {
                        geometry,
                        axis: Axis::R,
                        side: Side::Max,
                        token: outer.to_string(),
                    });
                }
                let buneman = Buneman::new(Arc::clone(layout))?;
                debug!(%geometry, slot = 3, kind = %BoundaryKind::Buneman, "boundary slot built");
                slots.push(Some(BoundaryCondition::Buneman(buneman)));
            }
        }
        Ok(BoundaryConditionSet::new(geometry, slots))
    }

    /// Same as [`create`](Self::create) with the geometry given as its
    /// configuration token.
    pub fn create_from_token<S: AsRef<str>>(
        geometry: &str,
        tokens: &[[S; 2]],
        layout: &Arc<GridLayout>,
    ) -> BcResult<BoundaryConditionSet> {
        let geometry: Geometry = geometry.parse().map_err(|_| BcError::UnknownGeometry {
            token: geometry.to_string(),
        })?;
        Self::create(geometry, tokens, layout)
    }
}

/// Kind requested by `token` on a non-radial axis, if legal there.
pub fn legal_kind(geometry: Geometry, token: &str) -> Option<BoundaryKind> {
    // reflective stays unsupported in 3D; simulation results depend on it
    let reflective_allowed = match geometry {
        Geometry::Cartesian1D | Geometry::Cartesian2D => true,
        Geometry::Cartesian3D | Geometry::Cylindrical => false,
    };
    match token {
        "periodic" => Some(BoundaryKind::Periodic),
        "silver-muller" => Some(BoundaryKind::SilverMuller),
        "reflective" if reflective_allowed => Some(BoundaryKind::Reflective),
        _ => None,
    }
}

fn build_slot(
    geometry: Geometry,
    axis: Axis,
    side: Side,
    token: &str,
    layout: &Arc<GridLayout>,
) -> BcResult<Option<BoundaryCondition>> {
    let slot = Slot::new(axis, side);
    let Some(kind) = legal_kind(geometry, token) else {
        return Err(BcError::IllegalBoundary {
            geometry,
            axis,
            side,
            token: token.to_string(),
        });
    };
    let bc = match kind {
        BoundaryKind::Periodic => None,
        BoundaryKind::SilverMuller => Some(BoundaryCondition::SilverMuller(SilverMuller::new(
            Arc::clone(layout),
            slot,
        )?)),
        BoundaryKind::Reflective => Some(BoundaryCondition::Reflective(Reflective::new(
            Arc::clone(layout),
            slot,
        )?)),
        BoundaryKind::AxisSymmetry | BoundaryKind::Buneman => {
            return Err(BcError::IllegalBoundary {
                geometry,
                axis,
                side,
                token: token.to_string(),
            });
        }
    };
    debug!(%geometry, slot = slot.index(), %kind, "boundary slot built");
    Ok(bc)
}
