//! Look-ahead camera.
//!
//! Each tick the camera picks a desired top-left corner that leads the
//! followed object in its direction of travel, then nudges its own
//! velocity toward it.  Axes are handled independently.

use crate::entities::{GameObject, ObjectId};

/// Speeds above this lead by the widest margin.
pub const FAST_SPEED: i32 = 8;
/// Speeds above this (and up to `FAST_SPEED`) lead by a moderate margin.
pub const SLOW_SPEED: i32 = 3;
/// Distance beyond which the camera closes in hard.
pub const DEAD_ZONE: i32 = 10;
pub const HARD_CORRECTION: i32 = 3;
pub const SOFT_CORRECTION: i32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeadBand {
    FastPositive,
    SlowPositive,
    Neutral,
    SlowNegative,
    FastNegative,
}

impl LeadBand {
    pub fn classify(v: i32) -> LeadBand {
        if v > FAST_SPEED {
            LeadBand::FastPositive
        } else if v > SLOW_SPEED {
            LeadBand::SlowPositive
        } else if v < -FAST_SPEED {
            LeadBand::FastNegative
        } else if v < -SLOW_SPEED {
            LeadBand::SlowNegative
        } else {
            LeadBand::Neutral
        }
    }

    /// Distance from the camera's leading edge to the followed object,
    /// for a view `extent` units across.
    pub fn offset(self, extent: i32) -> i32 {
        match self {
            LeadBand::FastPositive => extent / 4,
            LeadBand::SlowPositive => extent / 3,
            LeadBand::Neutral => extent / 2,
            LeadBand::SlowNegative => 2 * extent / 3,
            LeadBand::FastNegative => 3 * extent / 4,
        }
    }
}

/// Desired camera coordinate on one axis.
pub fn desired_position(pos: i32, vel: i32, extent: i32) -> i32 {
    pos - LeadBand::classify(vel).offset(extent)
}

/// New camera velocity on one axis.
pub fn approach_velocity(current: i32, desired: i32, follower_vel: i32) -> i32 {
    let gap = desired - current;
    if gap > DEAD_ZONE {
        follower_vel + HARD_CORRECTION
    } else if gap < -DEAD_ZONE {
        follower_vel - HARD_CORRECTION
    } else if gap > 0 {
        follower_vel + SOFT_CORRECTION
    } else if gap < 0 {
        follower_vel - SOFT_CORRECTION
    } else {
        follower_vel
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// World coordinate of the top-left corner.
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
    pub width: i32,
    pub height: i32,
    pub follow: Option<ObjectId>,
}

impl Viewport {
    /// Centre a `width`×`height` view on `target`, at rest.
    pub fn centered_on(target: &GameObject, width: i32, height: i32) -> Self {
        Viewport {
            x: target.x - width / 2,
            y: target.y - height / 2,
            vx: 0,
            vy: 0,
            width,
            height,
            follow: Some(target.id()),
        }
    }

    pub fn desired(&self, target: &GameObject) -> (i32, i32) {
        (
            desired_position(target.x, target.vx, self.width),
            desired_position(target.y, target.vy, self.height),
        )
    }

    /// One camera step: steer toward the desired corner, then integrate.
    pub fn update(&mut self, target: &GameObject) {
        let (dx, dy) = self.desired(target);
        self.vx = approach_velocity(self.x, dx, target.vx);
        self.vy = approach_velocity(self.y, dy, target.vy);
        self.x += self.vx;
        self.y += self.vy;
    }

    /// Nothing to follow: stop where we are.
    pub fn hold(&mut self) {
        self.vx = 0;
        self.vy = 0;
    }

    /// Inclusive containment of a world point.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub fn to_screen(&self, x: i32, y: i32) -> (i32, i32) {
        (x - self.x, y - self.y)
    }
}
