//! Named body poses over the 33-point body layout.

use motion_schema::{Landmark, BODY_LANDMARK_COUNT};

use super::joint_angle;

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// Wrist-above-shoulder margin for raised arms.
pub const RAISE_MARGIN: f32 = 0.1;
/// Wrist-to-shoulder height tolerance for a level arm.
pub const LEVEL_TOLERANCE: f32 = 0.1;
/// Minimum elbow angle (degrees) for a straight arm.
pub const STRAIGHT_ARM_DEG: f32 = 150.0;
/// Maximum knee angle (degrees) for a bent knee.
pub const BENT_KNEE_DEG: f32 = 120.0;
pub const HEAD_REACH: f32 = 0.15;
pub const LEAN_OFFSET: f32 = 0.08;

pub type PoseCheck = fn(&[Landmark]) -> bool;

#[derive(Clone, Copy)]
pub struct PoseDefinition {
    pub id: &'static str,
    pub display_name: &'static str,
    pub hole_shape: &'static str,
    /// Allowed on easy.
    pub simple: bool,
    pub check: PoseCheck,
}

impl std::fmt::Debug for PoseDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoseDefinition")
            .field("id", &self.id)
            .field("simple", &self.simple)
            .finish()
    }
}

pub static POSES: [PoseDefinition; 8] = [
    PoseDefinition {
        id: "arms_up",
        display_name: "Arms Up",
        hole_shape: "y_shape",
        simple: true,
        check: arms_up,
    },
    PoseDefinition {
        id: "t_pose",
        display_name: "T-Pose",
        hole_shape: "t_shape",
        simple: true,
        check: t_pose,
    },
    PoseDefinition {
        id: "hands_on_head",
        display_name: "Hands on Head",
        hole_shape: "diamond",
        simple: true,
        check: hands_on_head,
    },
    PoseDefinition {
        id: "left_arm_up",
        display_name: "Left Arm Up",
        hole_shape: "left_flag",
        simple: false,
        check: left_arm_up,
    },
    PoseDefinition {
        id: "right_arm_up",
        display_name: "Right Arm Up",
        hole_shape: "right_flag",
        simple: false,
        check: right_arm_up,
    },
    PoseDefinition {
        id: "crouch",
        display_name: "Crouch",
        hole_shape: "low_box",
        simple: false,
        check: crouch,
    },
    PoseDefinition {
        id: "lean_left",
        display_name: "Lean Left",
        hole_shape: "left_slant",
        simple: false,
        check: lean_left,
    },
    PoseDefinition {
        id: "lean_right",
        display_name: "Lean Right",
        hole_shape: "right_slant",
        simple: false,
        check: lean_right,
    },
];

pub fn pose_by_id(id: &str) -> Option<&'static PoseDefinition> {
    POSES.iter().find(|p| p.id == id)
}

/// Unknown ids never match.
pub fn matches_pose(id: &str, landmarks: &[Landmark]) -> bool {
    pose_by_id(id).is_some_and(|p| (p.check)(landmarks))
}

fn has_body(landmarks: &[Landmark]) -> bool {
    landmarks.len() >= BODY_LANDMARK_COUNT
}

fn raised(landmarks: &[Landmark], wrist: usize, shoulder: usize) -> bool {
    landmarks[wrist].y < landmarks[shoulder].y - RAISE_MARGIN
}

fn lowered(landmarks: &[Landmark], wrist: usize, shoulder: usize) -> bool {
    landmarks[wrist].y > landmarks[shoulder].y
}

fn straight_arm(landmarks: &[Landmark], shoulder: usize, elbow: usize, wrist: usize) -> bool {
    joint_angle(&landmarks[shoulder], &landmarks[elbow], &landmarks[wrist])
        .is_some_and(|deg| deg >= STRAIGHT_ARM_DEG)
}

fn bent_knee(landmarks: &[Landmark], hip: usize, knee: usize, ankle: usize) -> bool {
    joint_angle(&landmarks[hip], &landmarks[knee], &landmarks[ankle])
        .is_some_and(|deg| deg <= BENT_KNEE_DEG)
}

fn midpoint_x(landmarks: &[Landmark], a: usize, b: usize) -> f32 {
    (landmarks[a].x + landmarks[b].x) / 2.0
}

pub fn arms_up(landmarks: &[Landmark]) -> bool {
    has_body(landmarks)
        && raised(landmarks, LEFT_WRIST, LEFT_SHOULDER)
        && raised(landmarks, RIGHT_WRIST, RIGHT_SHOULDER)
}

pub fn t_pose(landmarks: &[Landmark]) -> bool {
    if !has_body(landmarks) {
        return false;
    }
    let level = |wrist: usize, shoulder: usize| {
        (landmarks[wrist].y - landmarks[shoulder].y).abs() < LEVEL_TOLERANCE
    };
    let shoulder_span = (landmarks[LEFT_SHOULDER].x - landmarks[RIGHT_SHOULDER].x).abs();
    let wrist_span = (landmarks[LEFT_WRIST].x - landmarks[RIGHT_WRIST].x).abs();

    level(LEFT_WRIST, LEFT_SHOULDER)
        && level(RIGHT_WRIST, RIGHT_SHOULDER)
        && wrist_span > shoulder_span * 2.0
        && straight_arm(landmarks, LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST)
        && straight_arm(landmarks, RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST)
}

pub fn hands_on_head(landmarks: &[Landmark]) -> bool {
    if !has_body(landmarks) {
        return false;
    }
    let nose = &landmarks[NOSE];
    [(LEFT_WRIST, LEFT_SHOULDER), (RIGHT_WRIST, RIGHT_SHOULDER)]
        .iter()
        .all(|&(wrist, shoulder)| {
            landmarks[wrist].y < landmarks[shoulder].y
                && landmarks[wrist].distance(nose) < HEAD_REACH
        })
}

pub fn left_arm_up(landmarks: &[Landmark]) -> bool {
    has_body(landmarks)
        && raised(landmarks, LEFT_WRIST, LEFT_SHOULDER)
        && lowered(landmarks, RIGHT_WRIST, RIGHT_SHOULDER)
}

pub fn right_arm_up(landmarks: &[Landmark]) -> bool {
    has_body(landmarks)
        && raised(landmarks, RIGHT_WRIST, RIGHT_SHOULDER)
        && lowered(landmarks, LEFT_WRIST, LEFT_SHOULDER)
}

pub fn crouch(landmarks: &[Landmark]) -> bool {
    has_body(landmarks)
        && bent_knee(landmarks, LEFT_HIP, LEFT_KNEE, LEFT_ANKLE)
        && bent_knee(landmarks, RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE)
}

pub fn lean_left(landmarks: &[Landmark]) -> bool {
    has_body(landmarks)
        && midpoint_x(landmarks, LEFT_SHOULDER, RIGHT_SHOULDER)
            < midpoint_x(landmarks, LEFT_HIP, RIGHT_HIP) - LEAN_OFFSET
}

pub fn lean_right(landmarks: &[Landmark]) -> bool {
    has_body(landmarks)
        && midpoint_x(landmarks, LEFT_SHOULDER, RIGHT_SHOULDER)
            > midpoint_x(landmarks, LEFT_HIP, RIGHT_HIP) + LEAN_OFFSET
}
