//! Window shift of the electromagnetic field state.

use pic_fields::EmFields;

use crate::collab::{DomainBounds, WindowFields};

impl WindowFields for EmFields {
    fn shift_window<B: DomainBounds + ?Sized>(&mut self, clrw: usize, bounds: &B) {
        self.shift_x(clrw);
        self.set_origin_index(bounds.starting_global_index());
    }
}
