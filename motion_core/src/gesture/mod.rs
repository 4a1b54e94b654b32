pub mod body;
pub mod hand;

use glam::Vec2;
use motion_schema::Landmark;

pub use body::{matches_pose, pose_by_id, PoseDefinition, POSES};
pub use hand::{is_fingers_spread, is_hand_closed, is_hand_open, thumb_to_finger_touching};

/// Angle at `b` between `b->a` and `b->c`, in degrees.
///
/// `None` when either arm has zero length.
pub fn joint_angle(a: &Landmark, b: &Landmark, c: &Landmark) -> Option<f32> {
    let ba = Vec2::new(a.x - b.x, a.y - b.y);
    let bc = Vec2::new(c.x - b.x, c.y - b.y);
    let denom = ba.length() * bc.length();
    if denom <= f32::EPSILON {
        return None;
    }
    let cos = (ba.dot(bc) / denom).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}
