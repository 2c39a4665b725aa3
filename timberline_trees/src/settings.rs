// Per-pass generation settings.
//
// `TreeSettings` is the value record the generator and reconciler read:
// height bounds, the trunk tile type, the ground/wall validity
// predicates, and the six weighted chances. It is rebuilt from the owning
// species on **every** generation/validation call and stays immutable for
// the duration of that one pass — there is no caching, so edits to a
// species' params take effect on the next call.
//
// See also: `registry.rs` (`TreeDefinition::settings()` builds this),
// `generator.rs` and `reconcile.rs` (the consumers).

use crate::species::TreeSpecies;
use crate::types::{TileTypeId, WallTypeId};

/// Everything one generation or reconciliation pass needs to know.
pub struct TreeSettings<'a> {
    /// Inclusive trunk segment count bounds.
    pub min_height: u32,
    pub max_height: u32,
    /// Tile type of trunk, branch, and top segments.
    pub trunk_tile: TileTypeId,
    /// Empty cells required above the top for the tree to fit.
    pub top_padding: u32,

    /// Valid planting surface predicate.
    pub ground_ok: Box<dyn Fn(TileTypeId) -> bool + 'a>,
    /// Valid background wall predicate.
    pub wall_ok: Box<dyn Fn(WallTypeId) -> bool + 'a>,

    // Weighted 1-in-N chances, evaluated once per decision point.
    pub branch_chance: u32,
    pub broken_top_chance: u32,
    pub less_bark_chance: u32,
    pub more_bark_chance: u32,
    pub not_leafy_branch_chance: u32,
    pub no_root_chance: u32,
}

impl<'a> TreeSettings<'a> {
    /// Derive settings from a species and its registered trunk tile type.
    pub fn from_species(species: &'a TreeSpecies, trunk_tile: TileTypeId) -> Self {
        let params = &species.params;
        Self {
            min_height: params.min_height,
            max_height: params.max_height,
            trunk_tile,
            top_padding: params.top_padding,
            ground_ok: Box::new(move |tile| species.ground_ok(tile)),
            wall_ok: Box::new(move |wall| species.wall_ok(wall)),
            branch_chance: params.branch_chance,
            broken_top_chance: params.broken_top_chance,
            less_bark_chance: params.less_bark_chance,
            more_bark_chance: params.more_bark_chance,
            not_leafy_branch_chance: params.not_leafy_branch_chance,
            no_root_chance: params.no_root_chance,
        }
    }
}
