// Core types shared across the tree framework.
//
// Defines the 2D tile coordinate and the opaque identifier newtypes the
// host hands out at registration time. The framework stores and compares
// these identifiers; it never interprets their numeric value.
//
// **Critical constraint: determinism.** These are plain value types; all
// randomness stays in `timberline_prng`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position in the 2D tile grid. Each component is in tile units.
///
/// The coordinate system matches the grid's screen-space convention:
/// - X: east (positive) / west (negative)
/// - Y: **down** (positive) / up (negative)
///
/// A tree rooted at `(x, y)` stands on ground at `(x, y + 1)` and grows
/// toward decreasing `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell directly above (y decreases upward).
    pub const fn above(self) -> Self {
        Self::new(self.x, self.y - 1)
    }

    /// The cell directly below.
    pub const fn below(self) -> Self {
        Self::new(self.x, self.y + 1)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Host-allocated identifiers
// ---------------------------------------------------------------------------

macro_rules! host_id {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

host_id!(/// Identifier of a tile type (trunk, sapling, ground, ...).
TileTypeId(u16));
host_id!(/// Identifier of a background wall type.
WallTypeId(u16));
host_id!(/// Identifier of an item type (acorns, collected drops).
ItemTypeId(u32));
host_id!(/// Identifier of a falling-leaf effect type.
LeafTypeId(u32));
host_id!(/// Handle to a loaded texture asset.
TextureHandle(u32));

/// Dense per-species style index, assigned sequentially at registration.
/// Never reused, never reassigned; selects the species' texture set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TreeStyle(pub u32);

impl fmt::Display for TreeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "style {}", self.0)
    }
}
