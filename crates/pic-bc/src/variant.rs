//! Closed family of boundary behaviours.

use pic_core::{BoundaryKind, Slot};
use pic_fields::EmFields;

use crate::axis::AxisSymmetry;
use crate::buneman::Buneman;
use crate::error::{BcError, BcResult};
use crate::reflective::Reflective;
use crate::silver_muller::SilverMuller;

/// One constructed boundary behaviour, bound to its slot and layout.
///
/// Coefficients are computed once at construction; `apply` carries no state
/// between calls.
#[derive(Clone, Debug)]
pub enum BoundaryCondition {
    SilverMuller(SilverMuller),
    Reflective(Reflective),
    AxisSymmetry(AxisSymmetry),
    Buneman(Buneman),
}

impl BoundaryCondition {
    pub fn kind(&self) -> BoundaryKind {
        match self {
            BoundaryCondition::SilverMuller(bc) => bc.kind(),
            BoundaryCondition::Reflective(bc) => bc.kind(),
            BoundaryCondition::AxisSymmetry(bc) => bc.kind(),
            BoundaryCondition::Buneman(bc) => bc.kind(),
        }
    }

    pub fn slot(&self) -> Slot {
        match self {
            BoundaryCondition::SilverMuller(bc) => bc.slot(),
            BoundaryCondition::Reflective(bc) => bc.slot(),
            BoundaryCondition::AxisSymmetry(bc) => bc.slot(),
            BoundaryCondition::Buneman(bc) => bc.slot(),
        }
    }

    fn layout(&self) -> &pic_fields::GridLayout {
        match self {
            BoundaryCondition::SilverMuller(bc) => bc.layout(),
            BoundaryCondition::Reflective(bc) => bc.layout(),
            BoundaryCondition::AxisSymmetry(bc) => bc.layout(),
            BoundaryCondition::Buneman(bc) => bc.layout(),
        }
    }

    /// Update the field values on this boundary's face.
    ///
    /// Fails only if `fields` was allocated for a different layout than the
    /// one this boundary was built with.
    pub fn apply(&self, fields: &mut EmFields) -> BcResult<()> {
        if fields.layout() != self.layout() {
            return Err(BcError::FieldMismatch {
                kind: self.kind(),
                expected: "the construction layout's",
            });
        }
        match self {
            BoundaryCondition::SilverMuller(bc) => bc.apply(fields),
            BoundaryCondition::Reflective(bc) => bc.apply(fields),
            BoundaryCondition::AxisSymmetry(bc) => bc.apply(fields),
            BoundaryCondition::Buneman(bc) => bc.apply(fields),
        }
    }
}
