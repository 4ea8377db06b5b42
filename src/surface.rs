//! Drawing surface abstraction and the line strategies picked on resize.
//!
//! The game draws in design coordinates (800×600).  `ScreenGeometry`
//! tracks the real surface size, and `ScaledSurface` maps design
//! coordinates onto a host surface using the strategy chosen for that size.

use crate::palette::{ColorIndex, WHITE};

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;

/// Anything the game can draw vector graphics onto.
pub trait Surface {
    fn set_color(&mut self, color: ColorIndex);
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// A white core stroke flanked by two strokes in `color`.
    fn draw_bright_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: ColorIndex) {
        let (dx, dy) = flank_offset(x1, y1, x2, y2);
        self.set_color(WHITE);
        self.draw_line(x1, y1, x2, y2);
        self.set_color(color);
        self.draw_line(x1 - dx, y1 - dy, x2 - dx, y2 - dy);
        self.draw_line(x1 + dx, y1 + dy, x2 + dx, y2 + dy);
    }
}

/// Offset perpendicular to the dominant axis of a segment.
fn flank_offset(x1: i32, y1: i32, x2: i32, y2: i32) -> (i32, i32) {
    if (x1 - x2).abs() > (y1 - y2).abs() {
        (0, 1)
    } else {
        (1, 0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    /// Surface matches the design resolution; draw directly.
    Unscaled,
    Scaled,
    /// Scaled, with two extra parallel strokes.
    ThickScaled,
}

#[derive(Clone, Debug)]
pub struct ScreenGeometry {
    pub real_width: i32,
    pub real_height: i32,
    pub xscale: f32,
    pub yscale: f32,
    pub line_style: LineStyle,
    thick_lines: bool,
    ready: bool,
}

impl ScreenGeometry {
    pub fn new(thick_lines: bool) -> Self {
        ScreenGeometry {
            real_width: SCREEN_WIDTH,
            real_height: SCREEN_HEIGHT,
            xscale: 1.0,
            yscale: 1.0,
            line_style: LineStyle::Unscaled,
            thick_lines,
            ready: false,
        }
    }

    /// The host calls this once its drawing surface exists.
    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Resize notification.  Ignored until the surface is ready, since the
    /// first configure can arrive before the surface does.
    pub fn configure(&mut self, width: i32, height: i32) -> bool {
        if !self.ready {
            tracing::debug!(width, height, "configure before surface ready; ignored");
            return false;
        }
        self.real_width = width;
        self.real_height = height;
        self.xscale = width as f32 / SCREEN_WIDTH as f32;
        self.yscale = height as f32 / SCREEN_HEIGHT as f32;
        self.line_style = if width == SCREEN_WIDTH && height == SCREEN_HEIGHT {
            LineStyle::Unscaled
        } else if self.thick_lines {
            LineStyle::ThickScaled
        } else {
            LineStyle::Scaled
        };
        tracing::debug!(width, height, style = ?self.line_style, "configured screen");
        true
    }

    fn sx(&self, x: i32) -> i32 {
        (x as f32 * self.xscale) as i32
    }

    fn sy(&self, y: i32) -> i32 {
        (y as f32 * self.yscale) as i32
    }
}

/// Design-coordinate view of a host surface.
pub struct ScaledSurface<'a, S: Surface + ?Sized> {
    inner: &'a mut S,
    geometry: &'a ScreenGeometry,
    pen: ColorIndex,
}

impl<'a, S: Surface + ?Sized> ScaledSurface<'a, S> {
    pub fn new(inner: &'a mut S, geometry: &'a ScreenGeometry) -> Self {
        ScaledSurface {
            inner,
            geometry,
            pen: WHITE,
        }
    }
}

impl<S: Surface + ?Sized> Surface for ScaledSurface<'_, S> {
    fn set_color(&mut self, color: ColorIndex) {
        self.pen = color;
        self.inner.set_color(color);
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let g = self.geometry;
        match g.line_style {
            LineStyle::Unscaled => self.inner.draw_line(x1, y1, x2, y2),
            LineStyle::Scaled => self.inner.draw_line(g.sx(x1), g.sy(y1), g.sx(x2), g.sy(y2)),
            LineStyle::ThickScaled => {
                let (dx, dy) = flank_offset(x1, y1, x2, y2);
                let (sx1, sy1, sx2, sy2) = (g.sx(x1), g.sy(y1), g.sx(x2), g.sy(y2));
                self.inner.draw_line(sx1, sy1, sx2, sy2);
                self.inner.draw_line(sx1 - dx, sy1 - dy, sx2 - dx, sy2 - dy);
                self.inner.draw_line(sx1 + dx, sy1 + dy, sx2 + dx, sy2 + dy);
            }
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let g = self.geometry;
        match g.line_style {
            LineStyle::Unscaled => self.inner.fill_rect(x, y, width, height),
            _ => self
                .inner
                .fill_rect(g.sx(x), g.sy(y), g.sx(width), g.sy(height)),
        }
    }

    fn draw_bright_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: ColorIndex) {
        let g = self.geometry;
        let pen = self.pen;
        match g.line_style {
            LineStyle::Unscaled => self.inner.draw_bright_line(x1, y1, x2, y2, color),
            _ => self
                .inner
                .draw_bright_line(g.sx(x1), g.sy(y1), g.sx(x2), g.sy(y2), color),
        }
        self.inner.set_color(pen);
    }
}
