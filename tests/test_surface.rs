mod common;

use battallica::palette::{GREEN, RED, WHITE};
use battallica::surface::*;
use common::{Op, RecordingSurface};

fn ready(thick: bool, width: i32, height: i32) -> ScreenGeometry {
    let mut geometry = ScreenGeometry::new(thick);
    geometry.mark_ready();
    assert!(geometry.configure(width, height));
    geometry
}

// ── geometry ──────────────────────────────────────────────────────────────────

#[test]
fn configure_before_ready_is_ignored() {
    let mut geometry = ScreenGeometry::new(false);
    assert!(!geometry.is_ready());
    assert!(!geometry.configure(400, 300));
    assert_eq!((geometry.real_width, geometry.real_height), (SCREEN_WIDTH, SCREEN_HEIGHT));
    assert_eq!(geometry.line_style, LineStyle::Unscaled);
}

#[test]
fn design_size_draws_unscaled() {
    let geometry = ready(true, SCREEN_WIDTH, SCREEN_HEIGHT);
    assert_eq!(geometry.line_style, LineStyle::Unscaled);
    assert_eq!((geometry.xscale, geometry.yscale), (1.0, 1.0));
}

#[test]
fn other_sizes_pick_a_scaled_style() {
    let geometry = ready(false, 400, 300);
    assert_eq!(geometry.line_style, LineStyle::Scaled);
    assert_eq!((geometry.xscale, geometry.yscale), (0.5, 0.5));

    let geometry = ready(true, 1600, 1200);
    assert_eq!(geometry.line_style, LineStyle::ThickScaled);
}

#[test]
fn resize_back_to_design_size_unscales() {
    let mut geometry = ready(false, 400, 300);
    geometry.configure(SCREEN_WIDTH, SCREEN_HEIGHT);
    assert_eq!(geometry.line_style, LineStyle::Unscaled);
}

// ── scaled surface ────────────────────────────────────────────────────────────

#[test]
fn unscaled_lines_pass_through() {
    let geometry = ready(false, SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut inner = RecordingSurface::new();
    ScaledSurface::new(&mut inner, &geometry).draw_line(10, 20, 30, 40);
    assert_eq!(inner.lines(), vec![&Op::Line { from: (10, 20), to: (30, 40), color: WHITE }]);
}

#[test]
fn scaled_lines_are_mapped_onto_the_real_surface() {
    let geometry = ready(false, 400, 300);
    let mut inner = RecordingSurface::new();
    {
        let mut surface = ScaledSurface::new(&mut inner, &geometry);
        surface.set_color(RED);
        surface.draw_line(100, 200, 300, 400);
        surface.fill_rect(10, 10, 100, 50);
    }
    assert_eq!(
        inner.ops,
        vec![
            Op::Color(RED),
            Op::Line { from: (50, 100), to: (150, 200), color: RED },
            Op::Rect { x: 5, y: 5, w: 50, h: 25, color: RED },
        ]
    );
}

#[test]
fn thick_lines_add_two_flanking_strokes() {
    let geometry = ready(true, 400, 300);
    let mut inner = RecordingSurface::new();
    // mostly horizontal: flanks are offset vertically
    ScaledSurface::new(&mut inner, &geometry).draw_line(0, 0, 200, 20);
    assert_eq!(
        inner.lines(),
        vec![
            &Op::Line { from: (0, 0), to: (100, 10), color: WHITE },
            &Op::Line { from: (0, -1), to: (100, 9), color: WHITE },
            &Op::Line { from: (0, 1), to: (100, 11), color: WHITE },
        ]
    );
}

// ── bright lines ──────────────────────────────────────────────────────────────

#[test]
fn bright_line_is_white_core_with_coloured_flanks() {
    let mut surface = RecordingSurface::new();
    surface.draw_bright_line(0, 0, 10, 0, GREEN);
    assert_eq!(
        surface.ops,
        vec![
            Op::Color(WHITE),
            Op::Line { from: (0, 0), to: (10, 0), color: WHITE },
            Op::Color(GREEN),
            Op::Line { from: (0, -1), to: (10, -1), color: GREEN },
            Op::Line { from: (0, 1), to: (10, 1), color: GREEN },
        ]
    );
}

#[test]
fn scaled_bright_line_restores_the_pen() {
    let geometry = ready(false, 400, 300);
    let mut inner = RecordingSurface::new();
    {
        let mut surface = ScaledSurface::new(&mut inner, &geometry);
        surface.set_color(RED);
        surface.draw_bright_line(0, 0, 0, 20, GREEN);
        surface.draw_line(0, 0, 20, 0);
    }
    assert_eq!(inner.ops.last(), Some(&Op::Line { from: (0, 0), to: (10, 0), color: RED }));
    assert_eq!(
        inner.lines()[..3],
        [
            &Op::Line { from: (0, 0), to: (0, 10), color: WHITE },
            &Op::Line { from: (-1, 0), to: (-1, 10), color: GREEN },
            &Op::Line { from: (1, 0), to: (1, 10), color: GREEN },
        ]
    );
}
