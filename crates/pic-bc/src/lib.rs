//! pic-bc: electromagnetic boundary conditions.
//!
//! `BoundaryFactory` turns a geometry and per-axis configuration tokens into
//! a `BoundaryConditionSet`: one slot per face, empty for periodic faces,
//! otherwise owning a `BoundaryCondition`. Each boundary computes its
//! coefficients once and mutates only its own face of the field grid.

pub mod absorb;
pub mod axis;
pub mod buneman;
pub mod error;
pub mod factory;
pub mod reflective;
pub mod set;
pub mod silver_muller;
pub mod variant;

pub use absorb::AbsorbingCoefficients;
pub use axis::AxisSymmetry;
pub use buneman::Buneman;
pub use error::{BcError, BcResult};
pub use factory::{BoundaryFactory, legal_kind};
pub use reflective::Reflective;
pub use set::BoundaryConditionSet;
pub use silver_muller::SilverMuller;
pub use variant::BoundaryCondition;
