//! Closed vocabulary for simulation geometry, axes, faces and boundary kinds.
//!
//! Every enum here is exhaustive on purpose: downstream code matches on them
//! without wildcard arms, so adding a geometry or a boundary kind is a compile
//! error everywhere it has to be handled.

use core::fmt;
use core::str::FromStr;

use crate::PicError;

/// Simulation geometry, fixed at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Geometry {
    Cartesian1D,
    Cartesian2D,
    Cartesian3D,
    /// Cylindrical geometry with azimuthal mode decomposition.
    /// Axis 0 is longitudinal, axis 1 is radial.
    Cylindrical,
}

impl Geometry {
    /// All supported geometries, in declaration order.
    pub const ALL: [Geometry; 4] = [
        Geometry::Cartesian1D,
        Geometry::Cartesian2D,
        Geometry::Cartesian3D,
        Geometry::Cylindrical,
    ];

    /// Canonical configuration token.
    pub fn token(self) -> &'static str {
        match self {
            Geometry::Cartesian1D => "1Dcartesian",
            Geometry::Cartesian2D => "2Dcartesian",
            Geometry::Cartesian3D => "3Dcartesian",
            Geometry::Cylindrical => "AMcylindrical",
        }
    }

    /// Number of spatial axes carried by the field grid.
    pub fn n_dim_field(self) -> usize {
        match self {
            Geometry::Cartesian1D => 1,
            Geometry::Cartesian2D => 2,
            Geometry::Cartesian3D => 3,
            Geometry::Cylindrical => 2,
        }
    }

    /// Number of boundary slots (two faces per field axis).
    pub fn slot_count(self) -> usize {
        2 * self.n_dim_field()
    }

    pub fn is_cylindrical(self) -> bool {
        matches!(self, Geometry::Cylindrical)
    }

    /// Name of an axis in this geometry, for messages.
    pub fn axis_name(self, axis: Axis) -> &'static str {
        match (self, axis.index()) {
            (Geometry::Cylindrical, 0) => "l",
            (Geometry::Cylindrical, 1) => "r",
            (_, 0) => "x",
            (_, 1) => "y",
            (_, 2) => "z",
            _ => "?",
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Geometry {
    type Err = PicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1Dcartesian" => Ok(Geometry::Cartesian1D),
            "2Dcartesian" => Ok(Geometry::Cartesian2D),
            "3Dcartesian" => Ok(Geometry::Cartesian3D),
            // "3drz" is the historical name of the azimuthal-mode geometry
            "AMcylindrical" | "3drz" => Ok(Geometry::Cylindrical),
            other => Err(PicError::UnknownGeometry {
                token: other.to_string(),
            }),
        }
    }
}

/// Ordinal spatial axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Axis(usize);

impl Axis {
    pub const X: Axis = Axis(0);
    pub const Y: Axis = Axis(1);
    pub const Z: Axis = Axis(2);
    /// Cylindrical longitudinal axis.
    pub const L: Axis = Axis(0);
    /// Cylindrical radial axis.
    pub const R: Axis = Axis(1);

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two faces of an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Min,
    Max,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Min, Side::Max];

    pub fn index(self) -> usize {
        match self {
            Side::Min => 0,
            Side::Max => 1,
        }
    }

    /// Sign of the inward normal along the axis: +1 at Min, -1 at Max.
    pub fn inward_sign(self) -> f64 {
        match self {
            Side::Min => 1.0,
            Side::Max => -1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Min => f.write_str("min"),
            Side::Max => f.write_str("max"),
        }
    }
}

/// Boundary location, addressed as `axis * 2 + side`.
///
/// In cylindrical geometry slot 2 is the inner radial (axis) face and
/// slot 3 the outer radial face, which is the same formula with `axis = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(usize);

impl Slot {
    pub fn new(axis: Axis, side: Side) -> Self {
        Self(axis.index() * 2 + side.index())
    }

    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn axis(self) -> Axis {
        Axis(self.0 / 2)
    }

    /// Face orientation is the slot parity.
    pub fn side(self) -> Side {
        if self.0 % 2 == 0 { Side::Min } else { Side::Max }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Electromagnetic boundary behaviour at one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// Represented by an empty slot; wrap-around is handled elsewhere.
    Periodic,
    SilverMuller,
    Reflective,
    AxisSymmetry,
    Buneman,
}

impl BoundaryKind {
    pub fn token(self) -> &'static str {
        match self {
            BoundaryKind::Periodic => "periodic",
            BoundaryKind::SilverMuller => "silver-muller",
            BoundaryKind::Reflective => "reflective",
            BoundaryKind::AxisSymmetry => "axis",
            BoundaryKind::Buneman => "Buneman",
        }
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
