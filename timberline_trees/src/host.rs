// Host-provided services.
//
// The host engine owns rendering and effects; the framework drives them
// through these two traits. Both are side-effect seams only — nothing the
// host returns here may gate the correctness of generation or
// reconciliation (a grow effect that fails to play still leaves a fully
// grown tree).

use crate::types::{TextureHandle, TileCoord};

/// Texture acquisition by path. The host resolves the path against its
/// asset store and returns an opaque handle the framework only stores.
pub trait TextureLoader {
    fn request(&mut self, path: &str) -> TextureHandle;
}

/// Visual effects and player visibility queries.
pub trait TreeEffects {
    /// Whether any player currently has line of sight to the coordinate.
    fn player_has_line_of_sight(&self, coord: TileCoord) -> bool;
    /// Ask the host to play its tree-grow effect at the coordinate.
    fn request_grow_effect(&mut self, coord: TileCoord);
}
