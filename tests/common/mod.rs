#![allow(dead_code)]

use battallica::palette::{ColorIndex, WHITE};
use battallica::surface::Surface;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Color(ColorIndex),
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: ColorIndex,
    },
    Rect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: ColorIndex,
    },
}

/// Surface that remembers every call.
pub struct RecordingSurface {
    pub ops: Vec<Op>,
    pen: ColorIndex,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface {
            ops: Vec::new(),
            pen: WHITE,
        }
    }

    pub fn lines(&self) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Line { .. }))
            .collect()
    }

    pub fn rects(&self) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Rect { .. }))
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn set_color(&mut self, color: ColorIndex) {
        self.pen = color;
        self.ops.push(Op::Color(color));
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.ops.push(Op::Line {
            from: (x1, y1),
            to: (x2, y2),
            color: self.pen,
        });
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.ops.push(Op::Rect {
            x,
            y,
            w,
            h,
            color: self.pen,
        });
    }
}
