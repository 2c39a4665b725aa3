// Procedural tree generation.
//
// Synthesizes a tree's vertical structure — root framing, trunk segments
// with bark variation and branches, an intact or broken crown — into the
// tile grid, subject to the weighted rules in `TreeSettings`. Placement
// is all-or-nothing: every precondition is checked before the first tile
// is written, so a failed attempt leaves the grid untouched and returns
// `false`.
//
// Draw order is fixed and part of the behavior: one inclusive height
// draw, then per-cell draws bottom to top (root flare; interior bark then
// branch; crown break last). Callers that need reproducible trees seed
// the `GameRng` and get identical columns.
//
// See also: `reconcile.rs` which keeps generated frames consistent as
// neighbors change, `settings.rs` for the per-pass parameter record,
// `registry.rs` for the sapling-growth entry points built on top of this.
//
// **Critical constraint: determinism.** All randomness comes from the
// `GameRng` passed by the caller.

use crate::frame::{BarkVariant, BranchFrame, BranchSide, TreeFrame, TrunkRole};
use crate::grid::{Tile, TileGrid};
use crate::settings::TreeSettings;
use crate::types::{TileCoord, TileTypeId};
use timberline_prng::GameRng;

/// Attempt to place a brand-new tree rooted at `root`.
///
/// Preconditions, checked in order, each short-circuiting with no
/// mutation: valid ground below the root, valid wall at the root, and a
/// fully empty in-bounds column of `height` cells (height drawn uniformly
/// from the settings' inclusive bounds) plus `top_padding` empty cells
/// above. Returns `true` only if trunk tiles were actually written.
pub fn try_generate<G: TileGrid>(
    grid: &mut G,
    rng: &mut GameRng,
    settings: &TreeSettings<'_>,
    root: TileCoord,
) -> bool {
    place_tree(grid, rng, settings, root, None)
}

/// Attempt to grow a tree in place of a sapling at `root`.
///
/// Identical to `try_generate` except the root cell itself may hold a
/// tile of `sapling_tile`, which the trunk replaces on success. On
/// failure the sapling cell is left exactly as it was.
pub fn grow_from_sapling<G: TileGrid>(
    grid: &mut G,
    rng: &mut GameRng,
    settings: &TreeSettings<'_>,
    sapling_tile: TileTypeId,
    root: TileCoord,
) -> bool {
    place_tree(grid, rng, settings, root, Some(sapling_tile))
}

fn place_tree<G: TileGrid>(
    grid: &mut G,
    rng: &mut GameRng,
    settings: &TreeSettings<'_>,
    root: TileCoord,
    replaceable: Option<TileTypeId>,
) -> bool {
    // 1. Ground below the root, wall at the root.
    let ground = grid.get(root.below());
    if !ground.active || !(settings.ground_ok)(ground.tile_type) {
        return false;
    }
    if !(settings.wall_ok)(grid.get(root).wall) {
        return false;
    }

    if settings.min_height < 1 || settings.min_height > settings.max_height {
        return false;
    }
    let height = rng.range_inclusive(settings.min_height, settings.max_height);

    // 2. The column must be in-bounds and empty (the root cell alone may
    //    hold the replaceable sapling). Padding cells above only need to
    //    be empty; out-of-range reads are empty by the grid contract.
    for i in 0..height {
        let coord = TileCoord::new(root.x, root.y - i as i32);
        if !grid.contains(coord) {
            return false;
        }
        let tile = grid.get(coord);
        let replace_ok = i == 0 && replaceable.is_some_and(|s| tile.tile_type == s);
        if tile.active && !replace_ok {
            return false;
        }
    }
    for i in height..height + settings.top_padding {
        if grid.get(TileCoord::new(root.x, root.y - i as i32)).active {
            return false;
        }
    }

    // 3. Write trunk cells bottom to top.
    for i in 0..height {
        let coord = TileCoord::new(root.x, root.y - i as i32);
        let frame = draw_cell_frame(rng, settings, coord, i, height);
        let mut tile = Tile::trunk(settings.trunk_tile, frame);
        tile.wall = grid.get(coord).wall;
        grid.set(coord, tile);
    }
    true
}

/// Draw the frame for trunk cell `i` (0 = bottom) of a `height`-cell column.
///
/// A one-cell tree is all crown: the top framing wins over root framing.
fn draw_cell_frame(
    rng: &mut GameRng,
    settings: &TreeSettings<'_>,
    coord: TileCoord,
    i: u32,
    height: u32,
) -> TreeFrame {
    if i == height - 1 {
        let role = if rng.chance(settings.broken_top_chance) {
            TrunkRole::BrokenTop
        } else {
            TrunkRole::Top
        };
        return TreeFrame::plain(role);
    }
    if i == 0 {
        let flared = !rng.chance(settings.no_root_chance);
        return TreeFrame::plain(TrunkRole::Root { flared });
    }

    let bark = if rng.chance(settings.more_bark_chance) {
        BarkVariant::MoreBark
    } else if rng.chance(settings.less_bark_chance) {
        BarkVariant::LessBark
    } else {
        BarkVariant::Normal
    };
    let branch = if rng.chance(settings.branch_chance) {
        let side = if (coord.x + coord.y) & 1 == 0 {
            BranchSide::Left
        } else {
            BranchSide::Right
        };
        Some(BranchFrame {
            side,
            leafy: !rng.chance(settings.not_leafy_branch_chance),
        })
    } else {
        None
    };
    TreeFrame {
        role: TrunkRole::Body,
        bark,
        branch,
    }
}
