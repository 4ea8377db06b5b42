//! Vector shapes: immutable polyline descriptions shared by every object
//! of a kind.
//!
//! Shapes are authored as point lists in the classic sentinel encoding
//! and decoded once, at startup, into explicit drawing commands.

use crate::error::{GameError, Result};
use crate::palette::{ColorIndex, PALETTE_SIZE, WHITE, YELLOW};

/// Starts a new, disconnected polyline.
pub const LINE_BREAK: i32 = -9999;
/// `(COLOR_CHANGE, c)` switches the pen to colour index `c`.
/// Only valid straight after a `LINE_BREAK`.
pub const COLOR_CHANGE: i32 = -9998;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCmd {
    MoveTo(i32, i32),
    LineTo(i32, i32),
    SetColor(ColorIndex),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorShape {
    pub name: &'static str,
    pub cmds: Vec<DrawCmd>,
}

impl VectorShape {
    /// Decode a sentinel-encoded point list.
    pub fn from_points(name: &'static str, points: &[(i32, i32)]) -> Result<Self> {
        let mut cmds = Vec::with_capacity(points.len());
        let mut pen_up = true;
        let mut after_break = false;

        for (index, &(x, y)) in points.iter().enumerate() {
            match x {
                LINE_BREAK => {
                    pen_up = true;
                    after_break = true;
                }
                COLOR_CHANGE => {
                    if !after_break {
                        return Err(GameError::MalformedShape {
                            index,
                            reason: "colour change must follow a line break",
                        });
                    }
                    if y < 0 || y as usize >= PALETTE_SIZE {
                        return Err(GameError::MalformedShape {
                            index,
                            reason: "colour index out of palette range",
                        });
                    }
                    cmds.push(DrawCmd::SetColor(ColorIndex(y as u8)));
                    after_break = false;
                }
                _ => {
                    if y == LINE_BREAK || y == COLOR_CHANGE {
                        return Err(GameError::MalformedShape {
                            index,
                            reason: "coordinate collides with a sentinel",
                        });
                    }
                    cmds.push(if pen_up {
                        DrawCmd::MoveTo(x, y)
                    } else {
                        DrawCmd::LineTo(x, y)
                    });
                    pen_up = false;
                    after_break = false;
                }
            }
        }

        Ok(VectorShape { name, cmds })
    }

    /// Number of line segments the shape strokes.
    pub fn segment_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::LineTo(..)))
            .count()
    }
}

// ── Shape table ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Player,
    Wanderer,
    Bullet,
}

const PLAYER_POINTS: &[(i32, i32)] = &[(0, -20), (-10, 20), (10, 20), (0, -20)];

const WANDERER_POINTS: &[(i32, i32)] = &[
    (0, -15),
    (15, 0),
    (0, 15),
    (-15, 0),
    (0, -15),
    (LINE_BREAK, LINE_BREAK),
    (COLOR_CHANGE, WHITE.0 as i32),
    (-5, 0),
    (5, 0),
];

const BULLET_POINTS: &[(i32, i32)] = &[
    (LINE_BREAK, LINE_BREAK),
    (COLOR_CHANGE, YELLOW.0 as i32),
    (0, -3),
    (0, 3),
];

#[derive(Clone, Debug)]
pub struct ShapeTable {
    player: VectorShape,
    wanderer: VectorShape,
    bullet: VectorShape,
}

impl ShapeTable {
    pub fn new() -> Result<Self> {
        Ok(ShapeTable {
            player: VectorShape::from_points("player", PLAYER_POINTS)?,
            wanderer: VectorShape::from_points("wanderer", WANDERER_POINTS)?,
            bullet: VectorShape::from_points("bullet", BULLET_POINTS)?,
        })
    }

    pub fn get(&self, id: ShapeId) -> &VectorShape {
        match id {
            ShapeId::Player => &self.player,
            ShapeId::Wanderer => &self.wanderer,
            ShapeId::Bullet => &self.bullet,
        }
    }
}
