// timberline_trees — pure Rust custom-tree content framework.
//
// This crate contains the engine-independent logic of Timberline: the
// procedural tree generator and validator, the species registry, the
// sapling growth and shake hooks, and the item-collector machine. It has
// zero host-engine dependencies and can be tested and benchmarked
// headless; a host embeds it by implementing the `TileGrid`,
// `TextureLoader`, and `TreeEffects` seams and driving the entry points
// from its own tick loop.
//
// Module overview:
// - `types.rs`:     TileCoord (y-down 2D grid), host-allocated id newtypes, TreeStyle.
// - `frame.rs`:     Per-cell trunk frame codes (role/bark/branch) and their (i16, i16) encoding.
// - `grid.rs`:      Tile value type, the TileGrid seam, dense MapGrid implementation.
// - `config.rs`:    TreeParams — all tunable species numbers, serde-loaded.
// - `species.rs`:   TreeSpecies — data plus per-species hook functions, ShakeOutcome.
// - `settings.rs`:  TreeSettings — per-pass parameter record, rebuilt every call.
// - `registry.rs`:  TreeRegistry/TreeDefinition — style allocation, four-way lookup, growth entry points.
// - `generator.rs`: try_generate / grow_from_sapling — all-or-nothing column placement.
// - `reconcile.rs`: check_tree — RNG-free tile-frame reconciliation.
// - `collector.rs`: ItemCollector/ItemBuffer — periodic item vacuum with bounded inventory.
// - `tag.rs`:       TagCompound — the host's tagged key/value save container.
// - `prng`:         Re-exported from `timberline_prng` — xoshiro256++ PRNG with SplitMix64 seeding.
//
// **Critical constraint: determinism.** Generation is a pure function of
// `(grid, settings, rng state)`; reconciliation of `(grid, settings)`
// alone. All randomness comes from the caller's seeded `GameRng`. No
// `HashMap` iteration feeds logic; lookup tables are keyed access only.

pub mod collector;
pub mod config;
pub mod frame;
pub mod generator;
pub mod grid;
pub mod host;
pub use timberline_prng as prng;
pub mod reconcile;
pub mod registry;
pub mod settings;
pub mod species;
pub mod tag;
pub mod types;
