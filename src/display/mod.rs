//! Rendering layer. All terminal I/O lives here.
//!
//! The world draws vector lines onto a `Canvas` of terminal cells; the
//! canvas is then written out row by row.  No game logic is performed
//! here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use battallica::palette::{ColorIndex, Palette, BLACK, WHITE};
use battallica::surface::Surface;
use battallica::World;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::Yellow;
const C_HUD_PAUSED: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn term_color(palette: &Palette, color: ColorIndex) -> Color {
    let rgb = palette.rgb(color);
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

// ── Cell canvas ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: ColorIndex,
}

const BLANK: Cell = Cell { ch: ' ', fg: BLACK };

/// A grid of character cells that vector lines are rasterised onto.
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    pen: ColorIndex,
    palette: Palette,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Canvas {
            width,
            height,
            cells: vec![BLANK; width as usize * height as usize],
            pen: WHITE,
            palette: Palette::new(),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![BLANK; width as usize * height as usize];
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn put(&mut self, x: i32, y: i32, ch: char) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.cells[y as usize * self.width as usize + x as usize] = Cell { ch, fg: self.pen };
    }

    /// Queue every row, switching colour only where it changes.
    fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let w = self.width as usize;
        for (row, cells) in self.cells.chunks(w.max(1)).enumerate() {
            out.queue(cursor::MoveTo(0, row as u16))?;
            let mut current: Option<ColorIndex> = None;
            let mut run = String::with_capacity(w);
            for cell in cells {
                if current != Some(cell.fg) {
                    if !run.is_empty() {
                        out.queue(Print(&run))?;
                        run.clear();
                    }
                    out.queue(style::SetForegroundColor(term_color(&self.palette, cell.fg)))?;
                    current = Some(cell.fg);
                }
                run.push(cell.ch);
            }
            if !run.is_empty() {
                out.queue(Print(&run))?;
            }
        }
        Ok(())
    }
}

/// Pick a glyph that follows the slope of a segment.
fn line_glyph(dx: i32, dy: i32) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2 < ax {
        '-'
    } else if ax * 2 < ay {
        '|'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}

impl Surface for Canvas {
    fn set_color(&mut self, color: ColorIndex) {
        self.pen = color;
    }

    /// Bresenham.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let glyph = line_glyph(x2 - x1, y2 - y1);
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let (mut x, mut y) = (x1, y1);
        let mut err = dx + dy;
        loop {
            self.put(x, y, glyph);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(self.width as i32);
        let y1 = (y + height).min(self.height as i32);
        for cy in y0..y1 {
            for cx in x0..x1 {
                self.put(cx, cy, '.');
            }
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Write one complete frame: the canvas, then the status row beneath it.
pub fn present<W: Write>(out: &mut W, canvas: &Canvas, world: &World) -> std::io::Result<()> {
    canvas.present(out)?;
    draw_hud(out, world, canvas.width, canvas.height)?;

    if world.paused {
        draw_paused(out, canvas.width, canvas.height)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, canvas.height))?;
    out.flush()?;
    Ok(())
}

// ── HUD (bottom row) ──────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, width: u16, row: u16) -> std::io::Result<()> {
    let status = match world.player.and_then(|id| world.object(id)) {
        Some(p) => format!(
            "Frame:{:>7}  Pos:({:>5},{:>5})  Vel:({:>3},{:>3})  x{}",
            world.frame, p.x, p.y, p.vx, p.vy, world.controls.multiplier
        ),
        None => format!("Frame:{:>7}  -- no ship --", world.frame),
    };
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("{:<w$}", status, w = width as usize)))?;

    let hint = "Arrows/WASD:Move Space:Fire P:Pause Q:Quit";
    let hx = width.saturating_sub(hint.chars().count() as u16 + 1);
    if hx as usize > status.chars().count() {
        out.queue(cursor::MoveTo(hx, row))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(hint))?;
    }
    Ok(())
}

// ── Pause overlay ─────────────────────────────────────────────────────────────

fn draw_paused<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let lines = ["╔══════════╗", "║  PAUSED  ║", "╚══════════╝"];
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetForegroundColor(C_HUD_PAUSED))?;
    for (i, msg) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
