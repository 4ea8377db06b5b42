//! Tile-based terrain: a registry of terrain types and the grid generated
//! from it once at startup.

use rand::RngCore;

use crate::error::{GameError, Result};
use crate::palette::{ColorIndex, BLUE, CYAN, DARK_GREEN, GREEN, WHITE};
use crate::surface::Surface;

pub const TERRAIN_WIDTH: usize = 64;
pub const TERRAIN_HEIGHT: usize = 64;
/// Single-tile stamps placed per non-default terrain type.
pub const STAMPS_PER_KIND: usize = 500;
/// Edge length of a tile in world units.
pub const TILE_SIZE: i32 = 100;

pub const GRASS: u8 = 0;
pub const WATER: u8 = 1;
pub const MOUNTAIN: u8 = 2;
pub const SWAMP: u8 = 3;
pub const FOREST: u8 = 4;

/// Stamping order.  Later passes overwrite earlier ones on collision.
pub const STAMP_ORDER: [u8; 4] = [WATER, MOUNTAIN, SWAMP, FOREST];

/// Uniform value in `[0, n)` by scaling a 32-bit draw, no division.
pub fn random_index<R: RngCore + ?Sized>(rng: &mut R, n: usize) -> usize {
    ((rng.next_u32() as u64 * n as u64) >> 32) as usize
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainDescriptor {
    pub name: &'static str,
    pub color: ColorIndex,
}

#[derive(Clone, Debug, Default)]
pub struct TerrainRegistry {
    descriptors: Vec<Option<TerrainDescriptor>>,
}

impl TerrainRegistry {
    pub fn new() -> Self {
        let mut registry = TerrainRegistry::default();
        registry.register(GRASS, "grass", GREEN);
        registry.register(WATER, "water", BLUE);
        registry.register(MOUNTAIN, "mountain", WHITE);
        registry.register(SWAMP, "swamp", CYAN);
        registry.register(FOREST, "forest", DARK_GREEN);
        registry
    }

    pub fn register(&mut self, code: u8, name: &'static str, color: ColorIndex) {
        let i = code as usize;
        if self.descriptors.len() <= i {
            self.descriptors.resize(i + 1, None);
        }
        self.descriptors[i] = Some(TerrainDescriptor { name, color });
    }

    pub fn descriptor_for(&self, code: u8) -> Option<&TerrainDescriptor> {
        self.descriptors.get(code as usize).and_then(Option::as_ref)
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainGrid {
    width: usize,
    height: usize,
    tile_size: i32,
    tiles: Vec<u8>,
}

/// Tile coordinates overlapping a screen rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSpan {
    pub cols: (i32, i32),
    pub rows: (i32, i32),
}

impl TerrainGrid {
    pub fn filled(width: usize, height: usize, tile_size: i32, code: u8) -> Self {
        TerrainGrid {
            width,
            height,
            tile_size,
            tiles: vec![code; width * height],
        }
    }

    /// Grass everywhere, then `stamps` random tiles of each other type.
    pub fn generate<R: RngCore + ?Sized>(
        width: usize,
        height: usize,
        tile_size: i32,
        stamps: usize,
        rng: &mut R,
    ) -> Self {
        let mut grid = Self::filled(width, height, tile_size, GRASS);
        for code in STAMP_ORDER {
            for _ in 0..stamps {
                let x = random_index(rng, width);
                let y = random_index(rng, height);
                grid.tiles[y * width + x] = code;
            }
        }
        tracing::debug!(width, height, stamps, "generated terrain");
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// World extent in world units.
    pub fn world_size(&self) -> (i32, i32) {
        (
            self.width as i32 * self.tile_size,
            self.height as i32 * self.tile_size,
        )
    }

    pub fn tile_at(&self, x: usize, y: usize) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.tiles[y * self.width + x])
    }

    pub fn set(&mut self, x: usize, y: usize, code: u8) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = code;
        }
    }

    pub fn count(&self, code: u8) -> usize {
        self.tiles.iter().filter(|&&t| t == code).count()
    }

    pub fn descriptor_at<'r>(
        &self,
        registry: &'r TerrainRegistry,
        x: usize,
        y: usize,
    ) -> Result<&'r TerrainDescriptor> {
        let code = self
            .tile_at(x, y)
            .ok_or(GameError::TileOutOfRange { x, y })?;
        registry
            .descriptor_for(code)
            .ok_or(GameError::UnknownTerrain { code, x, y })
    }

    /// Inclusive tile range touching the world rectangle at `(left, top)`.
    /// Indices may be negative or past the grid; `draw` skips those.
    pub fn span(&self, left: i32, top: i32, width: i32, height: i32) -> TileSpan {
        let t = self.tile_size;
        TileSpan {
            cols: (left.div_euclid(t), (left + width).div_euclid(t)),
            rows: (top.div_euclid(t), (top + height).div_euclid(t)),
        }
    }

    /// Draw every tile overlapping the view whose top-left world corner is
    /// `(left, top)`.  Each tile is an inset filled square with an X across it.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        registry: &TerrainRegistry,
        surface: &mut S,
        left: i32,
        top: i32,
        width: i32,
        height: i32,
    ) -> Result<usize> {
        let span = self.span(left, top, width, height);
        let t = self.tile_size;
        let mut drawn = 0;

        for row in span.rows.0..=span.rows.1 {
            if row < 0 || row as usize >= self.height {
                continue;
            }
            for col in span.cols.0..=span.cols.1 {
                if col < 0 || col as usize >= self.width {
                    continue;
                }
                let desc = self.descriptor_at(registry, col as usize, row as usize)?;
                let sx = col * t - left;
                let sy = row * t - top;

                surface.set_color(desc.color);
                surface.fill_rect(sx + 1, sy + 1, t - 2, t - 2);
                surface.draw_line(sx, sy, sx + t, sy + t);
                surface.draw_line(sx + t, sy, sx, sy + t);
                drawn += 1;
            }
        }
        Ok(drawn)
    }
}
