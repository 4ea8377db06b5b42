//! Colour palette: ten cardinal colours followed by the spark and rainbow
//! ramps reserved for explosion effects.
//!
//! Objects and terrain refer to colours by `ColorIndex`; only the host
//! turns an index into a real terminal colour.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorIndex(pub u8);

// ── Cardinal colours ──────────────────────────────────────────────────────────

pub const WHITE: ColorIndex = ColorIndex(0);
pub const BLUE: ColorIndex = ColorIndex(1);
pub const BLACK: ColorIndex = ColorIndex(2);
pub const GREEN: ColorIndex = ColorIndex(3);
pub const YELLOW: ColorIndex = ColorIndex(4);
pub const RED: ColorIndex = ColorIndex(5);
pub const ORANGE: ColorIndex = ColorIndex(6);
pub const CYAN: ColorIndex = ColorIndex(7);
pub const MAGENTA: ColorIndex = ColorIndex(8);
pub const DARK_GREEN: ColorIndex = ColorIndex(9);

pub const NCOLORS: usize = 10;
/// Shades from yellow to red for sparks.
pub const NSPARKCOLORS: usize = 25;
pub const NRAINBOWSTEPS: usize = 16;
pub const NRAINBOWCOLORS: usize = NRAINBOWSTEPS * 3;
pub const PALETTE_SIZE: usize = NCOLORS + NSPARKCOLORS + NRAINBOWCOLORS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

const CARDINAL: [(&str, Rgb); NCOLORS] = [
    ("white", Rgb::new(255, 255, 255)),
    ("blue", Rgb::new(0, 0, 255)),
    ("black", Rgb::new(0, 0, 0)),
    ("green", Rgb::new(0, 255, 0)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("red", Rgb::new(255, 0, 0)),
    ("orange", Rgb::new(255, 165, 0)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("darkgreen", Rgb::new(0, 100, 0)),
];

#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new() -> Self {
        let mut colors = Vec::with_capacity(PALETTE_SIZE);
        colors.extend(CARDINAL.iter().map(|(_, rgb)| *rgb));

        // yellow -> red: green channel fades out
        for i in 0..NSPARKCOLORS {
            let g = 255 - (i * 255 / (NSPARKCOLORS - 1)) as u8;
            colors.push(Rgb::new(255, g, 0));
        }

        // red -> green -> blue -> red, NRAINBOWSTEPS per leg
        for leg in 0..3 {
            for step in 0..NRAINBOWSTEPS {
                let up = (step * 255 / NRAINBOWSTEPS) as u8;
                let down = 255 - up;
                colors.push(match leg {
                    0 => Rgb::new(down, up, 0),
                    1 => Rgb::new(0, down, up),
                    _ => Rgb::new(up, 0, down),
                });
            }
        }

        Palette { colors }
    }

    pub fn rgb(&self, color: ColorIndex) -> Rgb {
        self.colors
            .get(color.0 as usize)
            .copied()
            .unwrap_or(CARDINAL[WHITE.0 as usize].1)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn name(color: ColorIndex) -> Option<&'static str> {
        CARDINAL.get(color.0 as usize).map(|(name, _)| *name)
    }

    /// Index of the `n`th spark shade, clamped to the ramp.
    pub fn spark(n: usize) -> ColorIndex {
        ColorIndex((NCOLORS + n.min(NSPARKCOLORS - 1)) as u8)
    }

    /// Index of the `n`th rainbow entry, wrapping around the ramp.
    pub fn rainbow(n: usize) -> ColorIndex {
        ColorIndex((NCOLORS + NSPARKCOLORS + n % NRAINBOWCOLORS) as u8)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
