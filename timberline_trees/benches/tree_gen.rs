// Criterion benchmark for the tree generator.
//
// Places trees across a wide ground row, alternating coordinates so every
// attempt starts from a clean column. Run with `cargo bench`.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use timberline_trees::config::TreeParams;
use timberline_trees::generator::try_generate;
use timberline_trees::grid::{MapGrid, Tile, TileGrid};
use timberline_trees::prng::GameRng;
use timberline_trees::settings::TreeSettings;
use timberline_trees::species::TreeSpecies;
use timberline_trees::types::{TileCoord, TileTypeId};

const GROUND: TileTypeId = TileTypeId(2);
const TRUNK: TileTypeId = TileTypeId(400);

fn ground_world(width: u32, height: u32, ground_y: i32) -> MapGrid {
    let mut grid = MapGrid::new(width, height);
    for x in 0..width as i32 {
        grid.set(TileCoord::new(x, ground_y), Tile::block(GROUND));
    }
    grid
}

fn bench_try_generate(c: &mut Criterion) {
    let species = TreeSpecies::new("Bench", TreeParams::forest());
    let settings = TreeSettings::from_species(&species, TRUNK);

    c.bench_function("try_generate_256_columns", |b| {
        b.iter(|| {
            let mut grid = ground_world(256, 32, 30);
            let mut rng = GameRng::new(42);
            let mut placed = 0u32;
            for x in 0..256 {
                if try_generate(&mut grid, &mut rng, &settings, TileCoord::new(x, 29)) {
                    placed += 1;
                }
            }
            black_box(placed)
        })
    });
}

criterion_group!(benches, bench_try_generate);
criterion_main!(benches);
