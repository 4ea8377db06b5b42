mod common;

use battallica::palette::{BLUE, DARK_GREEN, GREEN};
use battallica::terrain::*;
use battallica::GameError;
use common::{Op, RecordingSurface};
use rand::SeedableRng;
use rand::{Error, RngCore};
use rand_chacha::ChaCha8Rng;

/// Generator that always yields the same word.
struct Constant(u32);

impl RngCore for Constant {
    fn next_u32(&mut self) -> u32 {
        self.0
    }
    fn next_u64(&mut self) -> u64 {
        self.0 as u64
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

fn generate(seed: u64) -> TerrainGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    TerrainGrid::generate(TERRAIN_WIDTH, TERRAIN_HEIGHT, TILE_SIZE, STAMPS_PER_KIND, &mut rng)
}

// ── random_index ──────────────────────────────────────────────────────────────

#[test]
fn random_index_stays_in_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for n in [1usize, 2, 7, 64, 1000] {
        for _ in 0..500 {
            assert!(random_index(&mut rng, n) < n);
        }
    }
}

#[test]
fn random_index_scales_the_full_word() {
    assert_eq!(random_index(&mut Constant(0), 64), 0);
    assert_eq!(random_index(&mut Constant(u32::MAX), 64), 63);
    assert_eq!(random_index(&mut Constant(1 << 31), 64), 32);
}

#[test]
fn random_index_covers_every_value() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut seen = [false; 10];
    for _ in 0..1000 {
        seen[random_index(&mut rng, 10)] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

// ── generation ────────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_terrain() {
    assert_eq!(generate(42), generate(42));
}

#[test]
fn different_seeds_differ() {
    assert_ne!(generate(1), generate(2));
}

#[test]
fn generated_tiles_all_have_descriptors() {
    let grid = generate(3);
    let registry = TerrainRegistry::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            assert!(grid.descriptor_at(&registry, x, y).is_ok());
        }
    }
}

#[test]
fn every_terrain_kind_appears() {
    let grid = generate(5);
    for code in STAMP_ORDER {
        let n = grid.count(code);
        assert!(n > 0 && n <= STAMPS_PER_KIND, "code {code}: {n} tiles");
    }
    let stamped: usize = STAMP_ORDER.iter().map(|&c| grid.count(c)).sum();
    assert_eq!(grid.count(GRASS) + stamped, TERRAIN_WIDTH * TERRAIN_HEIGHT);
}

#[test]
fn later_passes_win_collisions() {
    // every stamp lands on (0, 0)
    let grid = TerrainGrid::generate(8, 8, TILE_SIZE, 3, &mut Constant(0));
    assert_eq!(grid.tile_at(0, 0), Some(FOREST));
    assert_eq!(grid.count(GRASS), 63);
}

#[test]
fn tile_at_out_of_bounds_is_none() {
    let grid = TerrainGrid::filled(4, 4, TILE_SIZE, GRASS);
    assert_eq!(grid.tile_at(4, 0), None);
    assert_eq!(grid.tile_at(0, 4), None);
    assert_eq!(grid.tile_at(3, 3), Some(GRASS));
}

#[test]
fn descriptor_outside_grid_is_an_error() {
    let grid = TerrainGrid::filled(4, 4, TILE_SIZE, GRASS);
    let registry = TerrainRegistry::new();
    assert!(grid.descriptor_at(&registry, 3, 3).is_ok());
    match grid.descriptor_at(&registry, 4, 1) {
        Err(GameError::TileOutOfRange { x, y }) => assert_eq!((x, y), (4, 1)),
        other => panic!("expected TileOutOfRange, got {other:?}"),
    }
}

// ── registry ──────────────────────────────────────────────────────────────────

#[test]
fn registry_describes_builtin_codes() {
    let registry = TerrainRegistry::new();
    let grass = registry.descriptor_for(GRASS).unwrap();
    assert_eq!(grass.name, "grass");
    assert_eq!(grass.color, GREEN);
    assert_eq!(registry.descriptor_for(WATER).unwrap().color, BLUE);
    assert_eq!(registry.descriptor_for(FOREST).unwrap().color, DARK_GREEN);
    assert!(registry.descriptor_for(200).is_none());
}

// ── draw ──────────────────────────────────────────────────────────────────────

#[test]
fn tile_draws_inset_box_with_diagonals() {
    let grid = TerrainGrid::filled(2, 2, 100, GRASS);
    let registry = TerrainRegistry::new();
    let mut surface = RecordingSurface::new();

    let drawn = grid.draw(&registry, &mut surface, 0, 0, 50, 50).unwrap();
    assert_eq!(drawn, 1);
    assert_eq!(
        surface.ops,
        vec![
            Op::Color(GREEN),
            Op::Rect { x: 1, y: 1, w: 98, h: 98, color: GREEN },
            Op::Line { from: (0, 0), to: (100, 100), color: GREEN },
            Op::Line { from: (100, 0), to: (0, 100), color: GREEN },
        ]
    );
}

#[test]
fn negative_tiles_are_skipped() {
    let grid = TerrainGrid::filled(64, 64, 100, GRASS);
    let registry = TerrainRegistry::new();
    let mut surface = RecordingSurface::new();

    let span = grid.span(-150, 0, 300, 100);
    assert_eq!(span.cols, (-2, 1));
    assert_eq!(span.rows, (0, 1));

    // only columns 0..=1 and rows 0..=1 exist
    let drawn = grid.draw(&registry, &mut surface, -150, 0, 300, 100).unwrap();
    assert_eq!(drawn, 4);
    assert_eq!(surface.rects().len(), 4);
    assert_eq!(surface.lines().len(), 8);
    assert_eq!(surface.rects()[0], &Op::Rect { x: 151, y: 1, w: 98, h: 98, color: GREEN });
}

#[test]
fn tiles_past_the_grid_are_skipped() {
    let grid = TerrainGrid::filled(2, 2, 100, GRASS);
    let registry = TerrainRegistry::new();
    let mut surface = RecordingSurface::new();
    let drawn = grid.draw(&registry, &mut surface, 150, 150, 800, 600).unwrap();
    assert_eq!(drawn, 1);
}

#[test]
fn unknown_code_fails_loudly() {
    let grid = TerrainGrid::filled(2, 2, 100, 42);
    let registry = TerrainRegistry::new();
    let mut surface = RecordingSurface::new();
    match grid.draw(&registry, &mut surface, 0, 0, 50, 50) {
        Err(GameError::UnknownTerrain { code, x, y }) => {
            assert_eq!((code, x, y), (42, 0, 0));
        }
        other => panic!("expected UnknownTerrain, got {other:?}"),
    }
}
