// Trunk frame codes — the per-cell variant data of a standing tree.
//
// A tree has no entity of its own: it is a vertical run of trunk tiles,
// each carrying a small frame code in the tile's `frame_x`/`frame_y`
// shorts. `frame_x` holds the structural role (body, root, top, broken
// top); `frame_y` packs the cosmetic bits (bark variant, branch side and
// leafiness). The generator writes these once; the reconciler
// (`reconcile.rs`) only ever rewrites the role, never the cosmetic bits.
//
// The encoding is lossless and deliberately sparse: codes outside the
// defined ranges decode to `None`, which callers treat as a malformed
// tree cell to be tolerated, not corrected.
//
// See also: `generator.rs` which draws and writes frames, `reconcile.rs`
// which keeps roles consistent as neighbors change.

use serde::{Deserialize, Serialize};

/// Structural role of a trunk cell within its column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrunkRole {
    /// Interior trunk segment.
    Body,
    /// Bottom-most cell, resting on valid ground. `flared` selects the
    /// sprite with visible side roots (the 1-in-`no_root_chance` draw
    /// picks the bare variant).
    Root { flared: bool },
    /// Intact tree crown.
    Top,
    /// Snapped-off crown, chosen once at generation time.
    BrokenTop,
}

impl TrunkRole {
    /// Whether this role terminates the column upward.
    pub fn is_top(self) -> bool {
        matches!(self, TrunkRole::Top | TrunkRole::BrokenTop)
    }

    pub fn is_root(self) -> bool {
        matches!(self, TrunkRole::Root { .. })
    }
}

/// Bark density variant for a trunk segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarkVariant {
    #[default]
    Normal,
    LessBark,
    MoreBark,
}

/// Which side of the trunk a branch grows from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchSide {
    Left,
    Right,
}

/// A branch attached to a trunk segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchFrame {
    pub side: BranchSide,
    pub leafy: bool,
}

/// Complete frame of one trunk cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeFrame {
    pub role: TrunkRole,
    pub bark: BarkVariant,
    pub branch: Option<BranchFrame>,
}

// frame_x role codes.
const ROLE_BODY: i16 = 0;
const ROLE_ROOT_FLARED: i16 = 1;
const ROLE_ROOT_BARE: i16 = 2;
const ROLE_TOP: i16 = 3;
const ROLE_BROKEN_TOP: i16 = 4;

// frame_y bit layout: bark in bits 0–1, branch code in bits 2–4.
const BARK_MASK: i16 = 0b11;
const BRANCH_SHIFT: u32 = 2;
const BRANCH_MASK: i16 = 0b111;

impl TreeFrame {
    /// A plain interior segment with no decoration.
    pub const fn plain(role: TrunkRole) -> Self {
        Self {
            role,
            bark: BarkVariant::Normal,
            branch: None,
        }
    }

    /// Pack this frame into the tile's `(frame_x, frame_y)` shorts.
    pub fn encode(self) -> (i16, i16) {
        let fx = match self.role {
            TrunkRole::Body => ROLE_BODY,
            TrunkRole::Root { flared: true } => ROLE_ROOT_FLARED,
            TrunkRole::Root { flared: false } => ROLE_ROOT_BARE,
            TrunkRole::Top => ROLE_TOP,
            TrunkRole::BrokenTop => ROLE_BROKEN_TOP,
        };
        let bark = match self.bark {
            BarkVariant::Normal => 0,
            BarkVariant::LessBark => 1,
            BarkVariant::MoreBark => 2,
        };
        let branch = match self.branch {
            None => 0,
            Some(BranchFrame {
                side: BranchSide::Left,
                leafy: true,
            }) => 1,
            Some(BranchFrame {
                side: BranchSide::Left,
                leafy: false,
            }) => 2,
            Some(BranchFrame {
                side: BranchSide::Right,
                leafy: true,
            }) => 3,
            Some(BranchFrame {
                side: BranchSide::Right,
                leafy: false,
            }) => 4,
        };
        (fx, bark | (branch << BRANCH_SHIFT))
    }

    /// Decode a frame from the tile's shorts. Returns `None` for codes
    /// this framework never writes (a malformed or foreign tile).
    pub fn decode(frame_x: i16, frame_y: i16) -> Option<Self> {
        let role = match frame_x {
            ROLE_BODY => TrunkRole::Body,
            ROLE_ROOT_FLARED => TrunkRole::Root { flared: true },
            ROLE_ROOT_BARE => TrunkRole::Root { flared: false },
            ROLE_TOP => TrunkRole::Top,
            ROLE_BROKEN_TOP => TrunkRole::BrokenTop,
            _ => return None,
        };
        let bark = match frame_y & BARK_MASK {
            0 => BarkVariant::Normal,
            1 => BarkVariant::LessBark,
            2 => BarkVariant::MoreBark,
            _ => return None,
        };
        let branch = match (frame_y >> BRANCH_SHIFT) & BRANCH_MASK {
            0 => None,
            1 => Some(BranchFrame {
                side: BranchSide::Left,
                leafy: true,
            }),
            2 => Some(BranchFrame {
                side: BranchSide::Left,
                leafy: false,
            }),
            3 => Some(BranchFrame {
                side: BranchSide::Right,
                leafy: true,
            }),
            4 => Some(BranchFrame {
                side: BranchSide::Right,
                leafy: false,
            }),
            _ => return None,
        };
        // Bits above the defined layout mean a foreign frame.
        if frame_y & !(BARK_MASK | (BRANCH_MASK << BRANCH_SHIFT)) != 0 {
            return None;
        }
        Some(Self { role, bark, branch })
    }

    /// Same frame with a different structural role, cosmetic bits kept.
    pub fn with_role(self, role: TrunkRole) -> Self {
        Self { role, ..self }
    }
}
