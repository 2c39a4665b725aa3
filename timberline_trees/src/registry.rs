// Tree registry — the load-time table of every registered species.
//
// `TreeRegistry::register` pairs a `TreeSpecies` with the identifiers the
// host allocated for it (`TreeIds`), assigns the next sequential
// `TreeStyle`, and records the definition in four independent lookup
// tables (tile, sapling, acorn, leaf). Registration happens exactly once
// per species during mod load; duplicate identifiers are a fatal
// configuration error surfaced to the author. After load the registry is
// read-only, so simulation-time lookups are lock-free.
//
// A lookup miss is a normal outcome (most tiles are not tree tiles) and
// returns `None`, never an error.
//
// `TreeDefinition` also carries the per-definition foliage texture cache,
// keyed by `(style, is_branch)`, lazily filled on first access and then
// immutable — `RefCell` suffices under the single-threaded host model.
//
// See also: `species.rs` for the capability-set species record,
// `generator.rs` for the placement logic these entry points drive.

use crate::generator::grow_from_sapling;
use crate::grid::TileGrid;
use crate::host::{TextureLoader, TreeEffects};
use crate::settings::TreeSettings;
use crate::species::{ShakeOutcome, TreeSpecies};
use crate::types::{ItemTypeId, LeafTypeId, TextureHandle, TileCoord, TileTypeId, TreeStyle};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::error::Error;
use std::fmt;
use timberline_prng::GameRng;

/// Host-allocated identifiers for one registered species. Assigned
/// exactly once at registration and immutable thereafter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeIds {
    /// Trunk/branch/top tile type.
    pub tile: TileTypeId,
    /// Sapling tile type.
    pub sapling: TileTypeId,
    /// Acorn (placeable seed item) type.
    pub acorn: ItemTypeId,
    /// Falling-leaf effect type, if the species registered one.
    pub leaf: Option<LeafTypeId>,
}

/// A registered species: the species record, its identifiers, and its
/// style index.
#[derive(Debug)]
pub struct TreeDefinition {
    pub species: TreeSpecies,
    pub ids: TreeIds,
    pub style: TreeStyle,
    foliage_cache: RefCell<FxHashMap<(TreeStyle, bool), TextureHandle>>,
}

impl TreeDefinition {
    /// Derive the per-pass settings. Rebuilt on every call so edits to the
    /// species' params take effect immediately.
    pub fn settings(&self) -> TreeSettings<'_> {
        TreeSettings::from_species(&self.species, self.ids.tile)
    }

    /// Grow a tree in place of this species' sapling at `coord`.
    ///
    /// On success, plays the host grow effect if a player can see the
    /// spot; the effect is a side effect only and never gates the result.
    pub fn grow<G: TileGrid, E: TreeEffects>(
        &self,
        grid: &mut G,
        rng: &mut GameRng,
        effects: &mut E,
        coord: TileCoord,
    ) -> bool {
        if !grow_from_sapling(grid, rng, &self.settings(), self.ids.sapling, coord) {
            return false;
        }
        if effects.player_has_line_of_sight(coord) {
            effects.request_grow_effect(coord);
        }
        true
    }

    /// Host random-tick hook for this species' sapling: a 1-in-
    /// `grow_chance` roll, then a growth attempt. A failed attempt leaves
    /// the sapling in place to re-roll on a later tick.
    pub fn sapling_random_tick<G: TileGrid, E: TreeEffects>(
        &self,
        grid: &mut G,
        rng: &mut GameRng,
        effects: &mut E,
        coord: TileCoord,
    ) -> bool {
        if !rng.chance(self.species.params.grow_chance) {
            return false;
        }
        self.grow(grid, rng, effects, coord)
    }

    /// The species' reaction to its tree being shaken at `coord`.
    pub fn shake(&self, coord: TileCoord) -> ShakeOutcome {
        self.species.on_shake(coord)
    }

    /// The falling-leaf effect for this tree: the species hook if it
    /// yields one, else the registered leaf id, else the host fallback.
    pub fn leaf_effect(&self, fallback: LeafTypeId) -> LeafTypeId {
        if let Some(hook) = self.species.leaf_effect
            && let Some(id) = hook()
        {
            return id;
        }
        self.ids.leaf.unwrap_or(fallback)
    }

    /// Foliage texture for this definition's style, fetched from the host
    /// on first access and cached forever after.
    pub fn foliage_texture<L: TextureLoader>(
        &self,
        loader: &mut L,
        is_branch: bool,
    ) -> TextureHandle {
        *self
            .foliage_cache
            .borrow_mut()
            .entry((self.style, is_branch))
            .or_insert_with(|| {
                loader.request(&self.species.foliage_texture_path(self.style, is_branch))
            })
    }
}

/// Registration failure — fatal at load time, surfaced to the mod author.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateTile(TileTypeId),
    DuplicateSapling(TileTypeId),
    DuplicateAcorn(ItemTypeId),
    DuplicateLeaf(LeafTypeId),
    InvalidHeightBounds { min: u32, max: u32 },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateTile(id) => {
                write!(f, "tile type {id} is already registered to another tree")
            }
            RegistryError::DuplicateSapling(id) => {
                write!(f, "sapling type {id} is already registered to another tree")
            }
            RegistryError::DuplicateAcorn(id) => {
                write!(f, "acorn type {id} is already registered to another tree")
            }
            RegistryError::DuplicateLeaf(id) => {
                write!(f, "leaf type {id} is already registered to another tree")
            }
            RegistryError::InvalidHeightBounds { min, max } => {
                write!(f, "invalid height bounds: min {min} must be >= 1 and <= max {max}")
            }
        }
    }
}

impl Error for RegistryError {}

/// Process-wide table of registered trees. Constructed once at mod load,
/// then handed around by shared reference.
#[derive(Debug, Default)]
pub struct TreeRegistry {
    trees: Vec<TreeDefinition>,
    by_tile: FxHashMap<TileTypeId, usize>,
    by_sapling: FxHashMap<TileTypeId, usize>,
    by_acorn: FxHashMap<ItemTypeId, usize>,
    by_leaf: FxHashMap<LeafTypeId, usize>,
}

impl TreeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a species under its host-allocated identifiers and assign
    /// the next unused style. All identifier checks run before anything is
    /// recorded, so a failed registration leaves the registry untouched.
    pub fn register(
        &mut self,
        species: TreeSpecies,
        ids: TreeIds,
    ) -> Result<TreeStyle, RegistryError> {
        if !species.params.heights_valid() {
            return Err(RegistryError::InvalidHeightBounds {
                min: species.params.min_height,
                max: species.params.max_height,
            });
        }
        if self.by_tile.contains_key(&ids.tile) {
            return Err(RegistryError::DuplicateTile(ids.tile));
        }
        if self.by_sapling.contains_key(&ids.sapling) {
            return Err(RegistryError::DuplicateSapling(ids.sapling));
        }
        if self.by_acorn.contains_key(&ids.acorn) {
            return Err(RegistryError::DuplicateAcorn(ids.acorn));
        }
        if let Some(leaf) = ids.leaf
            && self.by_leaf.contains_key(&leaf)
        {
            return Err(RegistryError::DuplicateLeaf(leaf));
        }

        let index = self.trees.len();
        let style = TreeStyle(index as u32);
        self.by_tile.insert(ids.tile, index);
        self.by_sapling.insert(ids.sapling, index);
        self.by_acorn.insert(ids.acorn, index);
        if let Some(leaf) = ids.leaf {
            self.by_leaf.insert(leaf, index);
        }
        self.trees.push(TreeDefinition {
            species,
            ids,
            style,
            foliage_cache: RefCell::new(FxHashMap::default()),
        });
        Ok(style)
    }

    pub fn by_tile(&self, id: TileTypeId) -> Option<&TreeDefinition> {
        self.by_tile.get(&id).map(|&i| &self.trees[i])
    }

    pub fn by_sapling(&self, id: TileTypeId) -> Option<&TreeDefinition> {
        self.by_sapling.get(&id).map(|&i| &self.trees[i])
    }

    pub fn by_acorn(&self, id: ItemTypeId) -> Option<&TreeDefinition> {
        self.by_acorn.get(&id).map(|&i| &self.trees[i])
    }

    pub fn by_leaf(&self, id: LeafTypeId) -> Option<&TreeDefinition> {
        self.by_leaf.get(&id).map(|&i| &self.trees[i])
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeDefinition> {
        self.trees.iter()
    }

    /// World-gen species selection: pick by `generation_weight`, then gate
    /// the pick with its 1-in-`generation_chance` roll. `None` means "no
    /// custom tree this spot" and is a normal outcome.
    pub fn choose_for_generation(&self, rng: &mut GameRng) -> Option<&TreeDefinition> {
        let total: u32 = self
            .trees
            .iter()
            .map(|t| t.species.params.generation_weight)
            .sum();
        if total == 0 {
            return None;
        }
        let mut draw = rng.next_int(total);
        for tree in &self.trees {
            let weight = tree.species.params.generation_weight;
            if draw < weight {
                return rng.chance(tree.species.params.generation_chance).then_some(tree);
            }
            draw -= weight;
        }
        unreachable!("weighted draw exceeded total weight");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeParams;

    fn ids(base: u16) -> TreeIds {
        TreeIds {
            tile: TileTypeId(base),
            sapling: TileTypeId(base + 1),
            acorn: ItemTypeId(base as u32 + 2),
            leaf: Some(LeafTypeId(base as u32 + 3)),
        }
    }

    fn species(name: &str) -> TreeSpecies {
        TreeSpecies::new(name, TreeParams::forest())
    }

    #[test]
    fn styles_are_sequential_from_zero() {
        let mut registry = TreeRegistry::new();
        for (i, base) in [100u16, 200, 300].into_iter().enumerate() {
            let style = registry.register(species("Tree"), ids(base)).unwrap();
            assert_eq!(style, TreeStyle(i as u32));
        }
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn all_four_lookups_return_the_registrant() {
        let mut registry = TreeRegistry::new();
        let bases = [100u16, 200, 300];
        for base in bases {
            registry.register(species("Tree"), ids(base)).unwrap();
        }
        for (i, base) in bases.into_iter().enumerate() {
            let style = TreeStyle(i as u32);
            assert_eq!(registry.by_tile(TileTypeId(base)).unwrap().style, style);
            assert_eq!(registry.by_sapling(TileTypeId(base + 1)).unwrap().style, style);
            assert_eq!(registry.by_acorn(ItemTypeId(base as u32 + 2)).unwrap().style, style);
            assert_eq!(registry.by_leaf(LeafTypeId(base as u32 + 3)).unwrap().style, style);
        }
    }

    #[test]
    fn lookup_miss_is_none_not_error() {
        let registry = TreeRegistry::new();
        assert!(registry.by_tile(TileTypeId(1)).is_none());
        assert!(registry.by_sapling(TileTypeId(1)).is_none());
        assert!(registry.by_acorn(ItemTypeId(1)).is_none());
        assert!(registry.by_leaf(LeafTypeId(1)).is_none());
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let mut registry = TreeRegistry::new();
        registry.register(species("First"), ids(100)).unwrap();

        let mut clash = ids(200);
        clash.tile = TileTypeId(100);
        assert_eq!(
            registry.register(species("Second"), clash),
            Err(RegistryError::DuplicateTile(TileTypeId(100)))
        );

        let mut clash = ids(200);
        clash.leaf = Some(LeafTypeId(103));
        assert_eq!(
            registry.register(species("Second"), clash),
            Err(RegistryError::DuplicateLeaf(LeafTypeId(103)))
        );

        // Failed registrations recorded nothing.
        assert_eq!(registry.len(), 1);
        assert!(registry.by_sapling(TileTypeId(201)).is_none());
    }

    #[test]
    fn invalid_height_bounds_are_rejected() {
        let mut registry = TreeRegistry::new();
        let mut sp = species("Bonsai");
        sp.params.min_height = 8;
        sp.params.max_height = 3;
        assert_eq!(
            registry.register(sp, ids(100)),
            Err(RegistryError::InvalidHeightBounds { min: 8, max: 3 })
        );
    }

    #[test]
    fn leafless_species_registers_without_leaf_lookup() {
        let mut registry = TreeRegistry::new();
        let mut no_leaf = ids(100);
        no_leaf.leaf = None;
        registry.register(species("Dry"), no_leaf).unwrap();
        assert!(registry.by_leaf(LeafTypeId(103)).is_none());
    }

    #[test]
    fn leaf_effect_prefers_hook_then_registered_id_then_fallback() {
        let mut registry = TreeRegistry::new();
        registry.register(species("Leafy"), ids(100)).unwrap();
        let mut no_leaf = ids(200);
        no_leaf.leaf = None;
        registry.register(species("Bare"), no_leaf).unwrap();

        fn golden_leaves() -> Option<LeafTypeId> {
            Some(LeafTypeId(999))
        }
        let mut hooked = species("Golden");
        hooked.leaf_effect = Some(golden_leaves);
        registry.register(hooked, ids(300)).unwrap();

        let fallback = LeafTypeId(1);
        let leafy = registry.by_tile(TileTypeId(100)).unwrap();
        assert_eq!(leafy.leaf_effect(fallback), LeafTypeId(103));
        let bare = registry.by_tile(TileTypeId(200)).unwrap();
        assert_eq!(bare.leaf_effect(fallback), fallback);
        let golden = registry.by_tile(TileTypeId(300)).unwrap();
        assert_eq!(golden.leaf_effect(fallback), LeafTypeId(999));
    }

    #[test]
    fn weighted_generation_pick_respects_zero_weight() {
        let mut registry = TreeRegistry::new();
        let mut never = species("Never");
        never.params.generation_weight = 0;
        registry.register(never, ids(100)).unwrap();
        let mut always = species("Always");
        always.params.generation_weight = 10;
        always.params.generation_chance = 1;
        registry.register(always, ids(200)).unwrap();

        let mut rng = GameRng::new(5);
        for _ in 0..100 {
            let picked = registry.choose_for_generation(&mut rng).unwrap();
            assert_eq!(picked.ids.tile, TileTypeId(200));
        }
    }

    #[test]
    fn generation_chance_gates_the_pick() {
        let mut registry = TreeRegistry::new();
        let mut shy = species("Shy");
        shy.params.generation_chance = 0; // disabled: never generates
        registry.register(shy, ids(100)).unwrap();

        let mut rng = GameRng::new(5);
        for _ in 0..100 {
            assert!(registry.choose_for_generation(&mut rng).is_none());
        }
    }

    #[test]
    fn empty_registry_picks_nothing() {
        let registry = TreeRegistry::new();
        let mut rng = GameRng::new(5);
        assert!(registry.choose_for_generation(&mut rng).is_none());
    }

    struct CountingLoader {
        requests: Vec<String>,
    }

    impl TextureLoader for CountingLoader {
        fn request(&mut self, path: &str) -> TextureHandle {
            self.requests.push(path.to_string());
            TextureHandle(self.requests.len() as u32)
        }
    }

    #[test]
    fn foliage_texture_is_fetched_once_per_key() {
        let mut registry = TreeRegistry::new();
        registry.register(species("Ash"), ids(100)).unwrap();
        let tree = registry.by_tile(TileTypeId(100)).unwrap();
        let mut loader = CountingLoader { requests: vec![] };

        let top = tree.foliage_texture(&mut loader, false);
        let branch = tree.foliage_texture(&mut loader, true);
        // Repeated access hits the cache.
        assert_eq!(tree.foliage_texture(&mut loader, false), top);
        assert_eq!(tree.foliage_texture(&mut loader, true), branch);
        assert_eq!(loader.requests, vec!["Ash_Top".to_string(), "Ash_Branch".to_string()]);
    }

    struct RecordingEffects {
        visible: bool,
        played: Vec<TileCoord>,
    }

    impl TreeEffects for RecordingEffects {
        fn player_has_line_of_sight(&self, _coord: TileCoord) -> bool {
            self.visible
        }

        fn request_grow_effect(&mut self, coord: TileCoord) {
            self.played.push(coord);
        }
    }

    /// Ground row at y=10 and a sapling of the registered species at (1, 9).
    fn sapling_world(tree: &TreeDefinition) -> crate::grid::MapGrid {
        use crate::grid::{MapGrid, Tile};
        let mut grid = MapGrid::new(3, 16);
        for x in 0..3 {
            grid.set(TileCoord::new(x, 10), Tile::block(TileTypeId(2)));
        }
        grid.set(TileCoord::new(1, 9), Tile::block(tree.ids.sapling));
        grid
    }

    #[test]
    fn grow_plays_effect_only_when_visible() {
        let mut registry = TreeRegistry::new();
        registry.register(species("Ash"), ids(100)).unwrap();
        let tree = registry.by_tile(TileTypeId(100)).unwrap();

        let mut grid = sapling_world(tree);
        let mut rng = GameRng::new(42);
        let mut effects = RecordingEffects {
            visible: true,
            played: vec![],
        };
        assert!(tree.grow(&mut grid, &mut rng, &mut effects, TileCoord::new(1, 9)));
        assert_eq!(effects.played, vec![TileCoord::new(1, 9)]);
        assert_eq!(grid.get(TileCoord::new(1, 9)).tile_type, tree.ids.tile);

        // Out of sight: the tree still grows, no effect plays.
        let mut grid = sapling_world(tree);
        let mut rng = GameRng::new(42);
        let mut effects = RecordingEffects {
            visible: false,
            played: vec![],
        };
        assert!(tree.grow(&mut grid, &mut rng, &mut effects, TileCoord::new(1, 9)));
        assert!(effects.played.is_empty());
    }

    #[test]
    fn random_tick_with_guaranteed_roll_grows_the_sapling() {
        let mut registry = TreeRegistry::new();
        let mut eager = species("Eager");
        eager.params.grow_chance = 1;
        registry.register(eager, ids(100)).unwrap();
        let tree = registry.by_tile(TileTypeId(100)).unwrap();

        let mut grid = sapling_world(tree);
        let mut rng = GameRng::new(42);
        let mut effects = RecordingEffects {
            visible: false,
            played: vec![],
        };
        assert!(tree.sapling_random_tick(&mut grid, &mut rng, &mut effects, TileCoord::new(1, 9)));
        assert_eq!(grid.get(TileCoord::new(1, 9)).tile_type, tree.ids.tile);
    }

    #[test]
    fn failed_growth_keeps_the_sapling_for_a_later_tick() {
        use crate::grid::Tile;
        let mut registry = TreeRegistry::new();
        let mut eager = species("Eager");
        eager.params.grow_chance = 1;
        registry.register(eager, ids(100)).unwrap();
        let tree = registry.by_tile(TileTypeId(100)).unwrap();

        let mut grid = sapling_world(tree);
        // Blocker right above the sapling: no height fits.
        grid.set(TileCoord::new(1, 8), Tile::block(TileTypeId(30)));
        let mut rng = GameRng::new(42);
        let mut effects = RecordingEffects {
            visible: true,
            played: vec![],
        };
        assert!(!tree.sapling_random_tick(&mut grid, &mut rng, &mut effects, TileCoord::new(1, 9)));
        assert_eq!(grid.get(TileCoord::new(1, 9)).tile_type, tree.ids.sapling);
        assert!(effects.played.is_empty());
    }

    #[test]
    fn default_shake_outcome_via_definition() {
        let mut registry = TreeRegistry::new();
        registry.register(species("Ash"), ids(100)).unwrap();
        let tree = registry.by_tile(TileTypeId(100)).unwrap();
        let outcome = tree.shake(TileCoord::new(4, 4));
        assert!(outcome.continue_default);
        assert!(outcome.spawn_leaves);
    }
}
