//! Game entity types: pure data, no logic.

use crate::palette::{ColorIndex, WHITE};
use crate::shapes::ShapeId;

// ── Identity ──────────────────────────────────────────────────────────────────

/// Stable handle to a pooled object.  The generation detects handles that
/// outlived their object after the slot was recycled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId {
    pub index: usize,
    pub generation: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Player,
    /// Roaming target that bounces off the edges of the world.
    Wanderer,
    /// Short-lived projectile; `ttl` counts remaining ticks.
    Bullet { ttl: u32 },
}

impl ObjectKind {
    pub fn shape(&self) -> ShapeId {
        match self {
            ObjectKind::Player => ShapeId::Player,
            ObjectKind::Wanderer => ShapeId::Wanderer,
            ObjectKind::Bullet { .. } => ShapeId::Bullet,
        }
    }
}

// ── Target list linkage ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Link {
    pub next: Option<usize>,
    pub prev: Option<usize>,
    pub on_list: bool,
}

impl Link {
    pub fn is_clear(&self) -> bool {
        self.next.is_none() && self.prev.is_none() && !self.on_list
    }
}

// ── Game object ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameObject {
    /// Slot in the object pool.
    pub index: usize,
    pub generation: u32,
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
    /// Heading in degrees; informational only.
    pub bearing: i32,
    pub color: ColorIndex,
    pub alive: bool,
    pub kind: ObjectKind,
    pub shape: ShapeId,
    pub link: Link,
}

impl GameObject {
    pub fn vacant(index: usize) -> Self {
        GameObject {
            index,
            generation: 0,
            x: 0,
            y: 0,
            vx: 0,
            vy: 0,
            bearing: 0,
            color: WHITE,
            alive: false,
            kind: ObjectKind::Wanderer,
            shape: ShapeId::Wanderer,
            link: Link::default(),
        }
    }

    pub fn id(&self) -> ObjectId {
        ObjectId {
            index: self.index,
            generation: self.generation,
        }
    }
}

/// Initial state for a new object.
#[derive(Clone, Debug)]
pub struct Spawn {
    pub kind: ObjectKind,
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
    pub color: ColorIndex,
    /// Whether the object joins the target list.
    pub targetable: bool,
}

impl Spawn {
    pub fn new(kind: ObjectKind, x: i32, y: i32) -> Self {
        Spawn {
            kind,
            x,
            y,
            vx: 0,
            vy: 0,
            color: WHITE,
            targetable: false,
        }
    }

    pub fn velocity(mut self, vx: i32, vy: i32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    pub fn color(mut self, color: ColorIndex) -> Self {
        self.color = color;
        self
    }

    pub fn targetable(mut self) -> Self {
        self.targetable = true;
        self
    }
}
