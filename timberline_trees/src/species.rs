// Species definitions — data plus a small capability set.
//
// A tree species is a plain record: its tunable numbers (`TreeParams`),
// the tile/wall lists that define where it can stand, and a handful of
// optional function-pointer hooks for the few behaviors that genuinely
// differ per species (shake reaction, leaf-effect choice, foliage texture
// path). There is no species trait and no inheritance — the framework
// runs one code path and reads species differences from this record.
//
// See also: `config.rs` for `TreeParams`, `registry.rs` which pairs a
// species with its host-allocated identifiers, `generator.rs` which
// consumes the derived settings.

use crate::config::TreeParams;
use crate::types::{LeafTypeId, TileCoord, TileTypeId, TreeStyle, WallTypeId};
use smallvec::{SmallVec, smallvec};

/// A species' reaction to its tree being shaken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShakeOutcome {
    /// Continue the host's default shake behavior (item drops etc.).
    pub continue_default: bool,
    /// Spawn falling-leaf effects.
    pub spawn_leaves: bool,
}

impl Default for ShakeOutcome {
    fn default() -> Self {
        Self {
            continue_default: true,
            spawn_leaves: true,
        }
    }
}

/// One tree species: data fields plus pluggable per-species hooks.
#[derive(Clone, Debug)]
pub struct TreeSpecies {
    /// Species name; also the stem of the default texture paths.
    pub name: String,
    pub params: TreeParams,
    /// Number of sapling sprite styles in the sapling texture.
    pub sapling_styles: u8,

    /// Tile types this species can stand on.
    pub valid_ground: SmallVec<[TileTypeId; 4]>,
    /// Background wall types this species tolerates.
    pub valid_walls: SmallVec<[WallTypeId; 2]>,

    /// Reaction to being shaken; `None` means the default outcome.
    pub shake: Option<fn(TileCoord) -> ShakeOutcome>,
    /// Leaf-effect override; `None` falls back to the registered leaf id.
    pub leaf_effect: Option<fn() -> Option<LeafTypeId>>,
    /// Foliage texture path override, per `(style, is_branch)`.
    pub foliage_texture: Option<fn(&TreeSpecies, TreeStyle, bool) -> String>,
}

impl TreeSpecies {
    /// A species with the forest defaults: stands on tile type 2 (the
    /// host's common grass), tolerates the bare wall, no hooks.
    pub fn new(name: impl Into<String>, params: TreeParams) -> Self {
        Self {
            name: name.into(),
            params,
            sapling_styles: 1,
            valid_ground: smallvec![TileTypeId(2)],
            valid_walls: smallvec![WallTypeId(0)],
            shake: None,
            leaf_effect: None,
            foliage_texture: None,
        }
    }

    /// Whether a tile type is valid planting ground for this species.
    pub fn ground_ok(&self, tile: TileTypeId) -> bool {
        self.valid_ground.contains(&tile)
    }

    /// Whether a background wall type is valid for this species.
    pub fn wall_ok(&self, wall: WallTypeId) -> bool {
        self.valid_walls.contains(&wall)
    }

    /// The species' reaction to a shake at `coord`.
    pub fn on_shake(&self, coord: TileCoord) -> ShakeOutcome {
        match self.shake {
            Some(hook) => hook(coord),
            None => ShakeOutcome::default(),
        }
    }

    /// Texture path for a foliage sprite sheet.
    pub fn foliage_texture_path(&self, style: TreeStyle, is_branch: bool) -> String {
        match self.foliage_texture {
            Some(hook) => hook(self, style, is_branch),
            None if is_branch => format!("{}_Branch", self.name),
            None => format!("{}_Top", self.name),
        }
    }
}
