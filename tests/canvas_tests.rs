use fractal_raster::core::{Canvas, DrawList, DrawOp, DrawingSurface};
use fractal_raster::math::{Color, Rectangle};
use glam::DVec2;

const RED: Color = Color::rgb(255, 0, 0);
const GREEN: Color = Color::rgb(0, 255, 0);
const BLUE: Color = Color::rgb(0, 0, 255);

fn pt(x: f64, y: f64) -> DVec2 {
    DVec2::new(x, y)
}

// ============================================================================
// Canvas Core Functionality Tests
// ============================================================================

#[test]
fn test_canvas_new() {
    let canvas = Canvas::new(640, 480);
    assert_eq!(canvas.dimensions(), (640, 480));
    assert_eq!(canvas.size(), (640, 480));
    assert_eq!(canvas.pixels().len(), 640 * 480 * 4);
}

#[test]
fn test_canvas_background_fill() {
    let mut canvas = Canvas::new(100, 100);
    canvas.fill_rect(Rectangle::from_size(100, 100), Color::WHITE);

    let pixels = canvas.pixels();
    assert_eq!(&pixels[0..4], &[255, 255, 255, 255]);

    let mid_idx = (50 * 100 + 50) * 4;
    assert_eq!(&pixels[mid_idx..mid_idx + 4], &[255, 255, 255, 255]);

    let last_idx = (100 * 100 - 1) * 4;
    assert_eq!(&pixels[last_idx..last_idx + 4], &[255, 255, 255, 255]);
}

#[test]
fn test_canvas_fill_does_not_change_stroke_color() {
    let mut canvas = Canvas::new(10, 10);
    canvas.set_color(RED);
    canvas.fill_rect(Rectangle::from_size(10, 10), BLUE);
    canvas.draw_point(pt(3.0, 3.0));

    assert_eq!(canvas.pixel(3, 3), Some(RED));
    assert_eq!(canvas.pixel(4, 4), Some(BLUE));
}

#[test]
fn test_canvas_point_edge_cases() {
    let mut canvas = Canvas::new(100, 100);
    for (x, y, color) in [(0.0, 0.0, RED), (99.0, 99.0, GREEN), (0.0, 99.0, BLUE)] {
        canvas.set_color(color);
        canvas.draw_point(pt(x, y));
    }

    assert_eq!(canvas.pixel(0, 0), Some(RED));
    assert_eq!(canvas.pixel(99, 99), Some(GREEN));
    assert_eq!(canvas.pixel(0, 99), Some(BLUE));
}

#[test]
fn test_canvas_point_out_of_bounds() {
    let mut canvas = Canvas::new(10, 10);
    canvas.set_color(RED);
    canvas.draw_point(pt(100.0, 100.0));
    canvas.draw_point(pt(-1.0, 5.0));

    // Should not panic - bounds checked
    assert!(canvas.pixels().iter().all(|b| *b == 0));
}

#[test]
fn test_canvas_point_rounds_to_nearest() {
    let mut canvas = Canvas::new(10, 10);
    canvas.set_color(RED);
    canvas.draw_point(pt(2.6, 4.4));
    assert_eq!(canvas.pixel(3, 4), Some(RED));
}

// ============================================================================
// Line Drawing Tests
// ============================================================================

#[test]
fn test_canvas_line_horizontal() {
    let mut canvas = Canvas::new(100, 100);
    canvas.set_color(Color::GRAY);
    canvas.draw_line(pt(10.0, 50.0), pt(30.0, 50.0));

    for x in 10..=30 {
        assert_eq!(canvas.pixel(x, 50), Some(Color::GRAY), "Failed at x={}", x);
    }
    assert_ne!(canvas.pixel(31, 50), Some(Color::GRAY));
}

#[test]
fn test_canvas_line_vertical() {
    let mut canvas = Canvas::new(100, 100);
    canvas.set_color(GREEN);
    canvas.draw_line(pt(50.0, 10.0), pt(50.0, 30.0));

    for y in 10..=30 {
        assert_eq!(canvas.pixel(50, y), Some(GREEN), "Failed at y={}", y);
    }
}

#[test]
fn test_canvas_line_reversed_direction() {
    let mut forward = Canvas::new(40, 40);
    let mut backward = Canvas::new(40, 40);
    forward.draw_line(pt(5.0, 5.0), pt(30.0, 5.0));
    backward.draw_line(pt(30.0, 5.0), pt(5.0, 5.0));
    assert_eq!(forward.pixels(), backward.pixels());
}

#[test]
fn test_canvas_line_single_pixel() {
    let mut canvas = Canvas::new(10, 10);
    canvas.set_color(RED);
    canvas.draw_line(pt(4.0, 4.0), pt(4.0, 4.0));

    let painted = canvas.pixels().chunks_exact(4).filter(|p| p[3] != 0).count();
    assert_eq!(painted, 1);
}

#[test]
fn test_canvas_line_fully_offscreen() {
    let mut canvas = Canvas::new(10, 10);
    canvas.draw_line(pt(-50.0, -50.0), pt(-20.0, -40.0));
    assert!(canvas.pixels().iter().all(|b| *b == 0));
}

// ============================================================================
// Rectangle Tests
// ============================================================================

#[test]
fn test_canvas_fill_rect_exact_area() {
    let mut canvas = Canvas::new(20, 20);
    canvas.fill_rect(Rectangle::new(3, 4, 5, 6), RED);

    let painted = canvas.pixels().chunks_exact(4).filter(|p| p[3] != 0).count();
    assert_eq!(painted, 30);
    assert_eq!(canvas.pixel(3, 4), Some(RED));
    assert_eq!(canvas.pixel(7, 9), Some(RED));
}

#[test]
fn test_canvas_fill_rect_zero_size() {
    let mut canvas = Canvas::new(20, 20);
    canvas.fill_rect(Rectangle::new(3, 4, 0, 6), RED);
    canvas.fill_rect(Rectangle::new(3, 4, 6, 0), RED);
    assert!(canvas.pixels().iter().all(|b| *b == 0));
}

#[test]
fn test_canvas_stroke_rect_perimeter() {
    let mut canvas = Canvas::new(20, 20);
    canvas.set_color(BLUE);
    canvas.stroke_rect(Rectangle::new(2, 2, 6, 5));

    let painted = canvas.pixels().chunks_exact(4).filter(|p| p[3] != 0).count();
    // 2 * 6 + 2 * 5 - 4 shared corners
    assert_eq!(painted, 18);
}

// ============================================================================
// Draw List Tests
// ============================================================================

#[test]
fn test_draw_list_replay_onto_canvas() {
    let mut list = DrawList::new(30, 30);
    list.fill_rect(Rectangle::from_size(30, 30), Color::WHITE);
    list.set_color(Color::BLACK);
    list.draw_line(pt(0.0, 0.0), pt(29.0, 29.0));

    let mut canvas = Canvas::new(30, 30);
    list.replay(&mut canvas);

    assert_eq!(canvas.pixel(15, 15), Some(Color::BLACK));
    assert_eq!(canvas.pixel(0, 29), Some(Color::WHITE));
}

#[test]
fn test_draw_list_apply_each_op() {
    let mut list = DrawList::new(12, 12);
    list.set_color(RED);
    list.draw_point(pt(1.0, 1.0));

    let mut canvas = Canvas::new(12, 12);
    for op in list.ops() {
        canvas.apply(op);
    }
    assert_eq!(canvas.pixel(1, 1), Some(RED));
}

#[test]
fn test_draw_op_geometry_classification() {
    assert!(DrawOp::Point(pt(0.0, 0.0)).is_geometry());
    assert!(DrawOp::Line { from: pt(0.0, 0.0), to: pt(1.0, 1.0) }.is_geometry());
    assert!(!DrawOp::SetColor(RED).is_geometry());
    assert!(!DrawOp::StrokeRect(Rectangle::from_size(1, 1)).is_geometry());
    assert!(!DrawOp::FillRect { rect: Rectangle::from_size(1, 1), color: RED }.is_geometry());
}
