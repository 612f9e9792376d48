//! pic-window: the moving simulation window.
//!
//! `MovingWindow` decides when the domain has to follow its trajectory and,
//! on each move, shifts the patch bounds, particle species, interpolation and
//! projection offsets and the field state in a fixed order. `set_operators`
//! rebuilds the same collaborator state from the accumulated displacement
//! alone, for start-up and checkpoint restarts.

pub mod bounds;
pub mod collab;
pub mod error;
pub mod fields;
pub mod offsets;
pub mod window;

pub use bounds::PatchBounds;
pub use collab::{
    AgreedWidth, DomainBounds, LocalAgreement, OffsetCache, ShiftAgreement, WindowFields,
    WindowSpecies,
};
pub use error::{WindowError, WindowResult};
pub use offsets::DomainOffsets;
pub use window::{MovingWindow, WindowConfig, WindowShift, local_shift_width};
