//! Ordered per-slot collection returned by the factory.

use pic_core::{BoundaryKind, Geometry, Slot};
use pic_fields::EmFields;

use crate::error::BcResult;
use crate::variant::BoundaryCondition;

/// `2 * n_dim_field` slots, each empty (periodic) or owning one boundary.
#[derive(Clone, Debug)]
pub struct BoundaryConditionSet {
    geometry: Geometry,
    slots: Vec<Option<BoundaryCondition>>,
}

impl BoundaryConditionSet {
    pub(crate) fn new(geometry: Geometry, slots: Vec<Option<BoundaryCondition>>) -> Self {
        debug_assert_eq!(slots.len(), geometry.slot_count());
        Self { geometry, slots }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, slot: Slot) -> Option<&BoundaryCondition> {
        self.slots.get(slot.index()).and_then(Option::as_ref)
    }

    /// Kind at every slot, with empty slots reported as periodic.
    pub fn kinds(&self) -> Vec<BoundaryKind> {
        self.slots
            .iter()
            .map(|s| s.as_ref().map_or(BoundaryKind::Periodic, BoundaryCondition::kind))
            .collect()
    }

    /// Constructed boundaries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &BoundaryCondition> {
        self.slots.iter().flatten()
    }

    /// Apply the boundary at `slot`; an empty slot is a no-op.
    pub fn apply(&self, fields: &mut EmFields, slot: Slot) -> BcResult<()> {
        match self.get(slot) {
            Some(bc) => bc.apply(fields),
            None => Ok(()),
        }
    }

    /// Apply every constructed boundary in slot order.
    pub fn apply_all(&self, fields: &mut EmFields) -> BcResult<()> {
        for bc in self.iter() {
            bc.apply(fields)?;
        }
        Ok(())
    }
}
