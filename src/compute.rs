//! The game world and its per-tick simulation.
//!
//! `World` owns every piece of mutable game state: object pool, target
//! list, terrain, camera and input.  The host drives it through `tick`,
//! `render` and `handle_action`, all from one thread.

use rand::RngCore;

use crate::behavior::{behavior_for, MoveContext, MoveOutcome};
use crate::camera::Viewport;
use crate::config::GameConfig;
use crate::entities::{GameObject, ObjectId, ObjectKind, Spawn};
use crate::error::{GameError, Result};
use crate::input::{Action, Controls};
use crate::palette::{ColorIndex, MAGENTA, ORANGE, RED, WHITE, YELLOW};
use crate::pool::ObjectPool;
use crate::shapes::ShapeTable;
use crate::surface::{Surface, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::target_list::TargetList;
use crate::terrain::{random_index, TerrainGrid, TerrainRegistry};

/// Minimum ticks between shots while fire is held.
const FIRE_COOLDOWN: u32 = 5;

const WANDERER_COLORS: [ColorIndex; 3] = [RED, ORANGE, MAGENTA];

pub struct World {
    pub config: GameConfig,
    pub pool: ObjectPool,
    pub targets: TargetList,
    pub registry: TerrainRegistry,
    pub terrain: TerrainGrid,
    pub shapes: ShapeTable,
    pub viewport: Viewport,
    pub controls: Controls,
    pub player: Option<ObjectId>,
    /// Where the player (re)spawns.
    pub start: (i32, i32),
    pub frame: u64,
    pub paused: bool,
    pub quitting: bool,
    pub music: bool,
    pub sound: bool,
    pub fullscreen: bool,
    fire_cooldown: u32,
}

// ── Constructors ─────────────────────────────────────────────────────────────

impl World {
    /// A world over `terrain` with no objects and a camera at the origin.
    pub fn empty(config: GameConfig, terrain: TerrainGrid) -> Result<Self> {
        config.validate()?;
        if terrain.width() == 0 || terrain.height() == 0 || terrain.tile_size() < 3 {
            return Err(GameError::Config(format!(
                "terrain grid {}x{} with tile size {} is degenerate",
                terrain.width(),
                terrain.height(),
                terrain.tile_size()
            )));
        }
        let (w, h) = terrain.world_size();
        Ok(World {
            pool: ObjectPool::with_capacity(config.world.pool_capacity),
            targets: TargetList::new(),
            registry: TerrainRegistry::new(),
            terrain,
            shapes: ShapeTable::new()?,
            viewport: Viewport {
                x: 0,
                y: 0,
                vx: 0,
                vy: 0,
                width: SCREEN_WIDTH,
                height: SCREEN_HEIGHT,
                follow: None,
            },
            controls: Controls::default(),
            player: None,
            start: (w / 2, h / 2),
            frame: 0,
            paused: false,
            quitting: false,
            music: true,
            sound: true,
            fullscreen: false,
            fire_cooldown: 0,
            config,
        })
    }

    /// Full startup: terrain, shapes, player, camera, then the wanderers.
    pub fn new<R: RngCore + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let t = &config.terrain;
        let terrain = TerrainGrid::generate(t.width, t.height, t.tile_size, t.stamps_per_kind, rng);
        let mut world = World::empty(config, terrain)?;

        world.spawn_player()?;

        let (w, h) = world.terrain.world_size();
        for n in 0..world.config.world.wanderers {
            let x = random_index(rng, w as usize) as i32;
            let y = random_index(rng, h as usize) as i32;
            let vx = random_index(rng, 9) as i32 - 4;
            let vy = random_index(rng, 9) as i32 - 4;
            let spawn = Spawn::new(ObjectKind::Wanderer, x, y)
                .velocity(vx, vy)
                .color(WANDERER_COLORS[n % WANDERER_COLORS.len()])
                .targetable();
            if let Err(e) = world.spawn(spawn) {
                tracing::warn!("wanderer not spawned: {e}");
                break;
            }
        }

        tracing::info!(
            objects = world.pool.live_count(),
            targets = world.targets.len(),
            "world initialised"
        );
        Ok(world)
    }
}

// ── Object lifecycle ─────────────────────────────────────────────────────────

impl World {
    /// Claim a slot and initialise it from `spawn`.
    pub fn spawn(&mut self, spawn: Spawn) -> Result<ObjectId> {
        let index = self.pool.allocate().map_err(|e| {
            tracing::warn!(kind = ?spawn.kind, "spawn failed: {e}");
            e
        })?;

        let obj = self.pool.slot_mut(index);
        obj.x = spawn.x;
        obj.y = spawn.y;
        obj.vx = spawn.vx;
        obj.vy = spawn.vy;
        obj.bearing = 0;
        obj.color = spawn.color;
        obj.shape = spawn.kind.shape();
        obj.kind = spawn.kind;
        let id = obj.id();

        if spawn.targetable {
            self.targets.insert(&mut self.pool, index);
        }
        tracing::debug!(index, kind = ?spawn.kind, x = spawn.x, y = spawn.y, "spawned");
        Ok(id)
    }

    pub fn spawn_player(&mut self) -> Result<ObjectId> {
        let (x, y) = self.start;
        let id = self.spawn(Spawn::new(ObjectKind::Player, x, y).color(WHITE).targetable())?;
        self.player = Some(id);
        self.follow(id)?;
        Ok(id)
    }

    /// Point the camera at `id`, centred and at rest.
    pub fn follow(&mut self, id: ObjectId) -> Result<()> {
        let obj = self.pool.get(id).ok_or(GameError::StaleObject(id))?;
        self.viewport = Viewport::centered_on(obj, self.viewport.width, self.viewport.height);
        Ok(())
    }

    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.pool.get(id)
    }

    pub fn kill(&mut self, id: ObjectId) -> Result<()> {
        if self.pool.get(id).is_none() {
            return Err(GameError::StaleObject(id));
        }
        self.kill_index(id.index);
        Ok(())
    }

    /// Unlink, run the destroy hook, free the slot.
    fn kill_index(&mut self, index: usize) {
        if !self.pool.is_allocated(index) {
            return;
        }
        self.targets.remove(&mut self.pool, index);

        let obj = self.pool.slot(index);
        behavior_for(&obj.kind).destroy(obj);
        if self.player.map_or(false, |p| p.index == index) {
            self.player = None;
        }
        tracing::debug!(index, kind = ?obj.kind, "killed");

        self.pool.release(index);
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

impl World {
    pub fn handle_action(&mut self, action: Action, pressed: bool) {
        if self.controls.set(action, pressed) || !pressed {
            return;
        }
        match action {
            Action::Quit => self.quitting = true,
            Action::Pause => {
                self.paused = !self.paused;
                tracing::info!(paused = self.paused, "pause toggled");
            }
            Action::Multiplier(n) => self.controls.multiplier = n.clamp(2, 8) as i32,
            Action::ToggleMusic => {
                self.music = !self.music;
                tracing::info!(music = self.music, "music toggled");
            }
            Action::ToggleSound => {
                self.sound = !self.sound;
                tracing::info!(sound = self.sound, "sound toggled");
            }
            Action::Fullscreen => {
                self.fullscreen = !self.fullscreen;
                tracing::info!(fullscreen = self.fullscreen, "fullscreen toggled");
            }
            Action::Suicide => {
                if let Err(e) = self.suicide() {
                    tracing::warn!("respawn failed: {e}");
                }
            }
            Action::Left | Action::Right | Action::Up | Action::Down | Action::Fire => {}
        }
    }

    /// Kill the player and put a fresh one at the start position.
    pub fn suicide(&mut self) -> Result<ObjectId> {
        if let Some(id) = self.player {
            self.kill(id)?;
        }
        self.spawn_player()
    }

    fn fire(&mut self) {
        let Some(player) = self.player.and_then(|id| self.pool.get(id)) else {
            return;
        };
        let speed = self.config.world.bullet_speed as f32;
        let heading = (player.bearing as f32).to_radians();
        let vx = player.vx + (heading.cos() * speed).round() as i32;
        let vy = player.vy + (heading.sin() * speed).round() as i32;
        let spawn = Spawn::new(
            ObjectKind::Bullet {
                ttl: self.config.world.bullet_ttl,
            },
            player.x,
            player.y,
        )
        .velocity(vx, vy)
        .color(YELLOW);

        // Exhaustion just means no bullet this time.
        if self.spawn(spawn).is_ok() {
            self.fire_cooldown = FIRE_COOLDOWN;
        }
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

impl World {
    /// Advance the simulation one tick: every live object moves in slot
    /// order, then the camera follows.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }

        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        if self.controls.fire && self.fire_cooldown == 0 {
            self.fire();
        }

        let controls = self.controls.clone();
        let (world_width, world_height) = self.terrain.world_size();
        let ctx = MoveContext {
            controls: &controls,
            world_width,
            world_height,
            thrust: self.config.player.thrust,
            max_speed: self.config.player.max_speed,
        };

        for index in self.pool.scan_range() {
            let obj = self.pool.slot_mut(index);
            if !obj.alive {
                continue;
            }
            let is_bullet = matches!(obj.kind, ObjectKind::Bullet { .. });
            let outcome = behavior_for(&obj.kind).move_object(obj, &ctx);

            // A bullet on its last tick still gets to hit.
            if is_bullet && self.resolve_hits(index).is_some() {
                continue;
            }
            if outcome == MoveOutcome::Expired {
                self.kill_index(index);
            }
        }

        self.update_camera();
        self.frame += 1;
    }

    fn update_camera(&mut self) {
        match self.viewport.follow.and_then(|id| self.pool.get(id)) {
            Some(target) => self.viewport.update(target),
            None => self.viewport.hold(),
        }
    }

    /// Kill the first non-player target within the hit radius of the
    /// bullet at `bullet`, then the bullet itself.
    fn resolve_hits(&mut self, bullet: usize) -> Option<usize> {
        let (bx, by) = {
            let b = self.pool.slot(bullet);
            (b.x, b.y)
        };
        let r = self.config.world.hit_radius;
        let victim = self.targets.iter(&self.pool).find(|&i| {
            let t = self.pool.slot(i);
            t.kind != ObjectKind::Player && (t.x - bx).abs() <= r && (t.y - by).abs() <= r
        })?;

        tracing::debug!(bullet, victim, "bullet hit");
        self.kill_index(victim);
        self.kill_index(bullet);
        Some(victim)
    }
}

// ── Render pass ──────────────────────────────────────────────────────────────

impl World {
    /// Draw visible terrain, then every live object whose origin lies in
    /// the viewport.  Returns the number of objects drawn.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<usize> {
        let vp = &self.viewport;
        self.terrain
            .draw(&self.registry, surface, vp.x, vp.y, vp.width, vp.height)?;

        let mut drawn = 0;
        for obj in self.pool.iter_live() {
            if !vp.contains(obj.x, obj.y) {
                continue;
            }
            behavior_for(&obj.kind).draw(obj, self.shapes.get(obj.shape), vp, surface);
            drawn += 1;
        }
        Ok(drawn)
    }
}
