use glam::Vec2;

use crate::chart::{FlightState, Fruit};
use crate::config::Canvas;

/// Whether segment `a -> b` touches the circle at `center`.
///
/// Solves `|a + t(b - a) - center|^2 = r^2` for `t` and accepts a root in
/// `[0, 1]`, or a segment lying wholly inside the circle. A zero-length
/// segment is a point test.
pub fn segment_hits_circle(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    if !(radius > 0.0) {
        return false;
    }
    let d = b - a;
    let f = a - center;
    let qa = d.dot(d);
    let r2 = radius * radius;
    if qa <= f32::EPSILON {
        return f.length_squared() <= r2;
    }

    let qb = 2.0 * f.dot(d);
    let qc = f.dot(f) - r2;
    let discriminant = qb * qb - 4.0 * qa * qc;
    if discriminant < 0.0 {
        return false;
    }

    let root = discriminant.sqrt();
    let t1 = (-qb - root) / (2.0 * qa);
    let t2 = (-qb + root) / (2.0 * qa);
    let within = |t: f32| (0.0..=1.0).contains(&t);
    within(t1) || within(t2) || (t1 < 0.0 && t2 > 1.0)
}

/// Indices of flying fruit the swipe `prev -> cur` passes through.
pub fn sliced_fruit(prev: Vec2, cur: Vec2, fruits: &[Fruit]) -> Vec<usize> {
    fruits
        .iter()
        .enumerate()
        .filter(|(_, f)| f.state == FlightState::Flying)
        .filter(|(_, f)| segment_hits_circle(prev, cur, f.position, f.radius))
        .map(|(i, _)| i)
        .collect()
}

/// Outside the canvas by more than one diameter on any side.
pub fn is_off_canvas(position: Vec2, radius: f32, canvas: Canvas) -> bool {
    let margin = radius * 2.0;
    position.x < -margin
        || position.x > canvas.width + margin
        || position.y < -margin
        || position.y > canvas.height + margin
}

/// Fully inside the canvas.
pub fn is_inside_canvas(position: Vec2, radius: f32, canvas: Canvas) -> bool {
    position.x >= radius
        && position.x <= canvas.width - radius
        && position.y >= radius
        && position.y <= canvas.height - radius
}

/// Semi-implicit Euler step; `dt_ms` in milliseconds, speeds per second.
pub fn integrate(position: Vec2, velocity: Vec2, gravity: f32, dt_ms: f64) -> (Vec2, Vec2) {
    let dt = (dt_ms / 1000.0) as f32;
    let velocity = velocity + Vec2::new(0.0, gravity * dt);
    (position + velocity * dt, velocity)
}
