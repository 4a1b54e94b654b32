use glam::Vec2;
use motion_core::chart::{FlightState, Fruit, FruitKind};
use motion_core::config::Canvas;
use motion_core::gameplay::slice::{integrate, is_inside_canvas, is_off_canvas, segment_hits_circle, sliced_fruit};

fn fruit_at(x: f32, y: f32, state: FlightState) -> Fruit {
    let kind = FruitKind::Apple;
    Fruit {
        id: "fruit-0".to_string(),
        kind,
        spawn: Vec2::new(x, y),
        position: Vec2::new(x, y),
        velocity: Vec2::ZERO,
        radius: kind.radius(),
        points: kind.points(),
        spawned_at: 0.0,
        state,
    }
}

#[test]
fn test_segment_through_circle_hits() {
    let a = Vec2::new(0.0, 0.0);
    let b = Vec2::new(10.0, 0.0);
    assert!(segment_hits_circle(a, b, Vec2::new(5.0, 0.0), 2.0));
    assert!(!segment_hits_circle(a, b, Vec2::new(5.0, 10.0), 2.0));
}

#[test]
fn test_segment_ending_short_of_circle_misses() {
    let a = Vec2::new(0.0, 0.0);
    let b = Vec2::new(10.0, 0.0);
    assert!(!segment_hits_circle(a, b, Vec2::new(20.0, 0.0), 2.0));
    assert!(segment_hits_circle(a, b, Vec2::new(11.5, 0.0), 2.0));
}

#[test]
fn test_segment_inside_circle_hits() {
    assert!(segment_hits_circle(
        Vec2::new(-1.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::ZERO,
        5.0
    ));
}

#[test]
fn test_degenerate_segment_is_a_point_test() {
    let p = Vec2::new(3.0, 4.0);
    assert!(segment_hits_circle(p, p, Vec2::ZERO, 5.0));
    assert!(!segment_hits_circle(p, p, Vec2::ZERO, 4.9));
    assert!(!segment_hits_circle(p, p, p, 0.0));
}

#[test]
fn test_sliced_fruit_skips_resolved_fruit() {
    let fruits = vec![
        fruit_at(100.0, 100.0, FlightState::Flying),
        fruit_at(200.0, 100.0, FlightState::Hit),
        fruit_at(300.0, 100.0, FlightState::Flying),
        fruit_at(300.0, 500.0, FlightState::Flying),
    ];
    let hits = sliced_fruit(Vec2::new(0.0, 100.0), Vec2::new(400.0, 100.0), &fruits);
    assert_eq!(hits, vec![0, 2]);
}

#[test]
fn test_canvas_bounds() {
    let canvas = Canvas::new(1280.0, 720.0);
    assert!(is_inside_canvas(Vec2::new(640.0, 360.0), 30.0, canvas));
    assert!(!is_inside_canvas(Vec2::new(10.0, 360.0), 30.0, canvas));

    assert!(!is_off_canvas(Vec2::new(640.0, 750.0), 30.0, canvas));
    assert!(is_off_canvas(Vec2::new(640.0, 781.0), 30.0, canvas));
    assert!(is_off_canvas(Vec2::new(-61.0, 300.0), 30.0, canvas));
}

#[test]
fn test_integrate_applies_gravity() {
    let (pos, vel) = integrate(Vec2::ZERO, Vec2::new(100.0, -100.0), 1000.0, 100.0);
    assert!((vel.y - 0.0).abs() < 1e-4);
    assert!((pos.x - 10.0).abs() < 1e-4);
    assert!((pos.y - 0.0).abs() < 1e-4);
}

#[test]
fn test_canvas_validation() {
    assert!(Canvas::default().validate().is_ok());
    assert!(Canvas::new(0.0, 720.0).validate().is_err());
    assert!(Canvas::new(1280.0, f32::NAN).validate().is_err());
}
