// Tile-frame reconciliation.
//
// When a tile changes (placed, neighbor removed), the host calls
// `check_tree` on each affected coordinate to keep the visual tree
// structurally consistent: a trunk cell under a removed crown is promoted
// to the new top, a stale root/top role inside the column is demoted to
// body, and a column whose ground vanished is cleared entirely.
//
// Reconciliation consumes **no randomness**. Crown break, bark, and
// branch bits are drawn once at generation time (`generator.rs`); this
// pass only rewrites the structural role and always preserves the
// cosmetic bits. That makes it a pure function of the current grid —
// calling it twice on an unchanged tile produces the same frame both
// times, so tops never flicker between intact and broken.
//
// Both neighbor walks are bounded by the configured `max_height`; a
// contiguous trunk run longer than that is a pre-existing malformed tree
// and is left untouched rather than "corrected".
//
// See also: `generator.rs` for the frames being maintained, `settings.rs`
// for the per-pass parameter record.

use crate::frame::{TreeFrame, TrunkRole};
use crate::grid::{Tile, TileGrid};
use crate::settings::TreeSettings;
use crate::types::TileCoord;

/// Recompute the structural frame of the trunk cell at `coord`.
///
/// No-op if the coordinate does not hold this tree's trunk tile (including
/// out-of-range coordinates, which read as empty). Clears the whole column
/// if its ground is gone.
pub fn check_tree<G: TileGrid>(grid: &mut G, settings: &TreeSettings<'_>, coord: TileCoord) {
    let is_trunk = |tile: Tile| tile.active && tile.tile_type == settings.trunk_tile;

    let tile = grid.get(coord);
    if !is_trunk(tile) {
        return;
    }

    // Walk down to the bottom-most contiguous trunk cell.
    let mut bottom = coord;
    let mut steps = 0;
    while is_trunk(grid.get(bottom.below())) {
        bottom = bottom.below();
        steps += 1;
        if steps >= settings.max_height {
            return; // malformed run, leave as-is
        }
    }

    // A root with no valid ground invalidates the whole column.
    let ground = grid.get(bottom.below());
    if !ground.active || !(settings.ground_ok)(ground.tile_type) {
        clear_column(grid, settings, bottom);
        return;
    }

    // Walk up to the current top.
    let mut top = coord;
    let mut steps = 0;
    while is_trunk(grid.get(top.above())) {
        top = top.above();
        steps += 1;
        if steps >= settings.max_height {
            return;
        }
    }

    // Undecodable frames are reframed to the plain default for the position.
    let frame = tile.tree_frame().unwrap_or(TreeFrame::plain(TrunkRole::Body));
    let role = if coord == top {
        // Keep an existing crown exactly as generated; promote anything
        // else to a plain top. A one-cell tree is all crown.
        if frame.role.is_top() {
            frame.role
        } else {
            TrunkRole::Top
        }
    } else if coord == bottom {
        // Preserve the generated flare; a cell newly demoted to the
        // bottom gets the bare variant (no fresh geometry without a draw).
        if let TrunkRole::Root { flared } = frame.role {
            TrunkRole::Root { flared }
        } else {
            TrunkRole::Root { flared: false }
        }
    } else {
        TrunkRole::Body
    };

    let reframed = frame.with_role(role);
    if reframed != frame || tile.tree_frame().is_none() {
        let (frame_x, frame_y) = reframed.encode();
        grid.set(
            coord,
            Tile {
                frame_x,
                frame_y,
                ..tile
            },
        );
    }
}

/// Remove every trunk cell of the column containing `bottom`, keeping the
/// walls behind them. Bounded by the configured maximum height.
fn clear_column<G: TileGrid>(grid: &mut G, settings: &TreeSettings<'_>, bottom: TileCoord) {
    let mut coord = bottom;
    for _ in 0..settings.max_height {
        let tile = grid.get(coord);
        if !tile.active || tile.tile_type != settings.trunk_tile {
            break;
        }
        grid.set(
            coord,
            Tile {
                wall: tile.wall,
                ..Tile::EMPTY
            },
        );
        coord = coord.above();
    }
}
