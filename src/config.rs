//! Game configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes.  Command-line flags are applied on top by the binary.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GameError, Result};
use crate::pool::MAXOBJS;
use crate::terrain::{STAMPS_PER_KIND, TERRAIN_HEIGHT, TERRAIN_WIDTH, TILE_SIZE};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulation ticks per second.
    pub frame_rate_hz: u32,
    pub thick_lines: bool,
    /// Fixed seed for terrain and spawns; random when absent.
    pub seed: Option<u64>,
    pub terrain: TerrainConfig,
    pub world: WorldConfig,
    pub player: PlayerConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub width: usize,
    pub height: usize,
    pub stamps_per_kind: usize,
    pub tile_size: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub pool_capacity: usize,
    /// Roaming targets spawned at startup.
    pub wanderers: usize,
    /// Ticks a bullet lives.
    pub bullet_ttl: u32,
    pub bullet_speed: i32,
    /// Distance within which a bullet hits a target.
    pub hit_radius: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub thrust: i32,
    pub max_speed: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            frame_rate_hz: 30,
            thick_lines: false,
            seed: None,
            terrain: TerrainConfig::default(),
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            width: TERRAIN_WIDTH,
            height: TERRAIN_HEIGHT,
            stamps_per_kind: STAMPS_PER_KIND,
            tile_size: TILE_SIZE,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            pool_capacity: MAXOBJS,
            wanderers: 12,
            bullet_ttl: 40,
            bullet_speed: 20,
            hit_radius: 15,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            thrust: 1,
            max_speed: 12,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_rate_hz == 0 {
            return Err(GameError::Config("frame_rate_hz must be positive".into()));
        }
        if self.terrain.width == 0 || self.terrain.height == 0 {
            return Err(GameError::Config("terrain must be at least 1x1".into()));
        }
        if self.terrain.tile_size < 3 {
            return Err(GameError::Config("terrain.tile_size must be at least 3".into()));
        }
        let t = &self.terrain;
        for (axis, tiles) in [("width", t.width), ("height", t.height)] {
            if world_extent(tiles, t.tile_size).is_none() {
                return Err(GameError::Config(format!(
                    "terrain.{axis} * terrain.tile_size overflows world coordinates"
                )));
            }
        }
        if self.world.pool_capacity == 0 {
            return Err(GameError::Config("world.pool_capacity must be positive".into()));
        }
        if self.player.max_speed <= 0 || self.player.thrust <= 0 {
            return Err(GameError::Config(
                "player.thrust and player.max_speed must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Milliseconds between ticks.
    pub fn tick_interval_ms(&self) -> u64 {
        1000 / self.frame_rate_hz.max(1) as u64
    }
}

/// World units spanned by `tiles` tiles, if that fits in a coordinate.
fn world_extent(tiles: usize, tile_size: i32) -> Option<i32> {
    i32::try_from(tiles).ok()?.checked_mul(tile_size)
}
