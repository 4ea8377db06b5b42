//! Per-kind behaviour: how each object moves, draws and dies.

use crate::camera::Viewport;
use crate::entities::{GameObject, ObjectKind};
use crate::input::Controls;
use crate::shapes::{DrawCmd, VectorShape};
use crate::surface::Surface;

/// Everything a move step may consult besides the object itself.
#[derive(Clone, Copy, Debug)]
pub struct MoveContext<'a> {
    pub controls: &'a Controls,
    pub world_width: i32,
    pub world_height: i32,
    pub thrust: i32,
    pub max_speed: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Alive,
    Expired,
}

pub trait Behavior: Sync {
    fn move_object(&self, obj: &mut GameObject, ctx: &MoveContext<'_>) -> MoveOutcome;

    fn draw(&self, obj: &GameObject, shape: &VectorShape, view: &Viewport, surface: &mut dyn Surface) {
        draw_shape(obj, shape, view, surface, |s, x1, y1, x2, y2| s.draw_line(x1, y1, x2, y2));
    }

    /// Called once when the object dies, before its slot is freed.
    fn destroy(&self, _obj: &GameObject) {}
}

pub fn behavior_for(kind: &ObjectKind) -> &'static dyn Behavior {
    match kind {
        ObjectKind::Player => &PlayerBehavior,
        ObjectKind::Wanderer => &WandererBehavior,
        ObjectKind::Bullet { .. } => &BulletBehavior,
    }
}

/// Walk a shape's commands relative to the object, stroking each segment
/// with `stroke`.  Segments lying wholly left of the view are skipped.
pub fn draw_shape<F>(
    obj: &GameObject,
    shape: &VectorShape,
    view: &Viewport,
    surface: &mut dyn Surface,
    mut stroke: F,
) where
    F: FnMut(&mut dyn Surface, i32, i32, i32, i32),
{
    let (ox, oy) = view.to_screen(obj.x, obj.y);
    let mut pen: Option<(i32, i32)> = None;

    surface.set_color(obj.color);
    for cmd in &shape.cmds {
        match *cmd {
            DrawCmd::MoveTo(x, y) => pen = Some((ox + x, oy + y)),
            DrawCmd::LineTo(x, y) => {
                let to = (ox + x, oy + y);
                if let Some(from) = pen {
                    if from.0 >= 0 || to.0 >= 0 {
                        stroke(surface, from.0, from.1, to.0, to.1);
                    }
                }
                pen = Some(to);
            }
            DrawCmd::SetColor(c) => surface.set_color(c),
        }
    }
}

fn integrate(obj: &mut GameObject) {
    obj.x += obj.vx;
    obj.y += obj.vy;
}

// ── Player ────────────────────────────────────────────────────────────────────

pub struct PlayerBehavior;

impl Behavior for PlayerBehavior {
    fn move_object(&self, obj: &mut GameObject, ctx: &MoveContext<'_>) -> MoveOutcome {
        let c = ctx.controls;
        let accel = ctx.thrust * c.multiplier;
        if c.left {
            obj.vx -= accel;
        }
        if c.right {
            obj.vx += accel;
        }
        if c.up {
            obj.vy -= accel;
        }
        if c.down {
            obj.vy += accel;
        }
        obj.vx = obj.vx.clamp(-ctx.max_speed, ctx.max_speed);
        obj.vy = obj.vy.clamp(-ctx.max_speed, ctx.max_speed);

        integrate(obj);

        // Stop dead at the edge of the map.
        if obj.x < 0 || obj.x > ctx.world_width {
            obj.x = obj.x.clamp(0, ctx.world_width);
            obj.vx = 0;
        }
        if obj.y < 0 || obj.y > ctx.world_height {
            obj.y = obj.y.clamp(0, ctx.world_height);
            obj.vy = 0;
        }

        if obj.vx != 0 || obj.vy != 0 {
            obj.bearing = (obj.vy as f32).atan2(obj.vx as f32).to_degrees().round() as i32;
        }
        MoveOutcome::Alive
    }

    fn destroy(&self, obj: &GameObject) {
        tracing::info!(x = obj.x, y = obj.y, "player destroyed");
    }
}

// ── Wanderer ──────────────────────────────────────────────────────────────────

pub struct WandererBehavior;

impl Behavior for WandererBehavior {
    fn move_object(&self, obj: &mut GameObject, ctx: &MoveContext<'_>) -> MoveOutcome {
        integrate(obj);
        if obj.x < 0 || obj.x > ctx.world_width {
            obj.x = obj.x.clamp(0, ctx.world_width);
            obj.vx = -obj.vx;
        }
        if obj.y < 0 || obj.y > ctx.world_height {
            obj.y = obj.y.clamp(0, ctx.world_height);
            obj.vy = -obj.vy;
        }
        MoveOutcome::Alive
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

pub struct BulletBehavior;

impl Behavior for BulletBehavior {
    fn move_object(&self, obj: &mut GameObject, _ctx: &MoveContext<'_>) -> MoveOutcome {
        integrate(obj);
        match &mut obj.kind {
            ObjectKind::Bullet { ttl } => {
                *ttl = ttl.saturating_sub(1);
                if *ttl == 0 {
                    MoveOutcome::Expired
                } else {
                    MoveOutcome::Alive
                }
            }
            _ => MoveOutcome::Alive,
        }
    }

    fn draw(&self, obj: &GameObject, shape: &VectorShape, view: &Viewport, surface: &mut dyn Surface) {
        let color = obj.color;
        draw_shape(obj, shape, view, surface, |s, x1, y1, x2, y2| {
            s.draw_bright_line(x1, y1, x2, y2, color)
        });
    }
}
