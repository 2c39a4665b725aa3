// Tile grid access — the seam between the framework and the host world.
//
// The host owns the real tile grid; the framework only reads and writes
// tiles through the `TileGrid` trait. Out-of-range reads return the empty
// tile and out-of-range writes are no-ops — never an error — so callers
// at world edges need no special cases.
//
// `MapGrid` is a dense in-memory implementation (flat `Vec<Tile>` indexed
// by `x + y * width`) with the same out-of-bounds contract. Tests and
// standalone worldgen use it; a host embeds the framework by implementing
// `TileGrid` over its own storage instead.
//
// See also: `generator.rs` and `reconcile.rs`, the two writers;
// `frame.rs` for the trunk frame codes carried in `frame_x`/`frame_y`.

use crate::frame::TreeFrame;
use crate::types::{TileCoord, TileTypeId, WallTypeId};
use serde::{Deserialize, Serialize};

/// One cell of the tile grid.
///
/// `tile_type` and the frame shorts are only meaningful while `active` is
/// set; an inactive tile still carries its `wall`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileTypeId,
    pub wall: WallTypeId,
    pub frame_x: i16,
    pub frame_y: i16,
    pub active: bool,
}

impl Tile {
    /// The empty tile: no block, no wall.
    pub const EMPTY: Tile = Tile {
        tile_type: TileTypeId(0),
        wall: WallTypeId(0),
        frame_x: 0,
        frame_y: 0,
        active: false,
    };

    /// An active block of the given type with zeroed frame.
    pub fn block(tile_type: TileTypeId) -> Self {
        Tile {
            tile_type,
            active: true,
            ..Tile::EMPTY
        }
    }

    /// An active trunk cell carrying an encoded tree frame.
    pub fn trunk(tile_type: TileTypeId, frame: TreeFrame) -> Self {
        let (frame_x, frame_y) = frame.encode();
        Tile {
            tile_type,
            frame_x,
            frame_y,
            active: true,
            ..Tile::EMPTY
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.active
    }

    /// Decode the tree frame, if this is an active cell with a frame code
    /// the framework understands.
    pub fn tree_frame(&self) -> Option<TreeFrame> {
        if self.active {
            TreeFrame::decode(self.frame_x, self.frame_y)
        } else {
            None
        }
    }
}

/// Read/write access to a tile grid.
///
/// Out-of-range coordinates are "empty/invalid": `get` returns
/// `Tile::EMPTY`, `set` does nothing, `contains` returns `false`.
pub trait TileGrid {
    fn get(&self, coord: TileCoord) -> Tile;
    fn set(&mut self, coord: TileCoord, tile: Tile);
    fn contains(&self, coord: TileCoord) -> bool;
}

/// Dense in-memory tile grid rooted at `(0, 0)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapGrid {
    /// Flat storage: index = x + y * width.
    tiles: Vec<Tile>,
    pub width: u32,
    pub height: u32,
}

impl MapGrid {
    /// Create a grid filled with empty tiles.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            tiles: vec![Tile::EMPTY; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.x as usize + coord.y as usize * self.width as usize)
        } else {
            None
        }
    }
}

impl TileGrid for MapGrid {
    fn get(&self, coord: TileCoord) -> Tile {
        self.index(coord).map(|i| self.tiles[i]).unwrap_or(Tile::EMPTY)
    }

    fn set(&mut self, coord: TileCoord, tile: Tile) {
        if let Some(i) = self.index(coord) {
            self.tiles[i] = tile;
        }
    }

    fn contains(&self, coord: TileCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
    }
}
