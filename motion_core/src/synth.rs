//! Synthetic landmark arrays.
//!
//! Used by the headless simulator and by tests to produce frames that the
//! classifiers in [`crate::gesture`] recognise. Coordinates are normalized
//! with y growing downward.

use motion_schema::{
    Handedness, HandObservation, Landmark, BODY_LANDMARK_COUNT, HAND_LANDMARK_COUNT,
};

use crate::gesture::body::*;
use crate::gesture::hand::{INDEX_MCP, MIDDLE_MCP, PINKY_MCP, RING_MCP, THUMB_TIP, WRIST};

/// Finger column offsets from the hand centre: index, middle, ring, pinky.
const FINGER_X: [f32; 4] = [-0.03, -0.01, 0.01, 0.03];
const FANNED_TIP_X: [f32; 4] = [-0.13, -0.045, 0.045, 0.13];
const FINGER_BASES: [usize; 4] = [INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

fn set(points: &mut [Landmark], index: usize, x: f32, y: f32) {
    points[index] = Landmark::new(x, y);
}

/// Standing upright, arms hanging, facing the camera. Matches no pose.
pub fn neutral_body() -> Vec<Landmark> {
    let mut b = vec![Landmark::new(0.5, 0.5); BODY_LANDMARK_COUNT];
    set(&mut b, NOSE, 0.5, 0.2);
    for i in 1..=10 {
        set(&mut b, i, 0.5, 0.2);
    }
    set(&mut b, LEFT_SHOULDER, 0.6, 0.35);
    set(&mut b, RIGHT_SHOULDER, 0.4, 0.35);
    set(&mut b, LEFT_ELBOW, 0.62, 0.5);
    set(&mut b, RIGHT_ELBOW, 0.38, 0.5);
    set(&mut b, LEFT_WRIST, 0.63, 0.65);
    set(&mut b, RIGHT_WRIST, 0.37, 0.65);
    set(&mut b, LEFT_HIP, 0.56, 0.65);
    set(&mut b, RIGHT_HIP, 0.44, 0.65);
    set(&mut b, LEFT_KNEE, 0.56, 0.8);
    set(&mut b, RIGHT_KNEE, 0.44, 0.8);
    set(&mut b, LEFT_ANKLE, 0.56, 0.95);
    set(&mut b, RIGHT_ANKLE, 0.44, 0.95);
    b
}

fn raise_left(b: &mut [Landmark]) {
    set(b, LEFT_ELBOW, 0.63, 0.22);
    set(b, LEFT_WRIST, 0.65, 0.1);
}

fn raise_right(b: &mut [Landmark]) {
    set(b, RIGHT_ELBOW, 0.37, 0.22);
    set(b, RIGHT_WRIST, 0.35, 0.1);
}

fn shift_upper_body(b: &mut [Landmark], dx: f32) {
    let upper = (0..=10).chain([
        LEFT_SHOULDER,
        RIGHT_SHOULDER,
        LEFT_ELBOW,
        RIGHT_ELBOW,
        LEFT_WRIST,
        RIGHT_WRIST,
    ]);
    for i in upper {
        b[i].x += dx;
    }
}

/// A body striking the named pose, or `None` for an unknown id.
pub fn pose_body(id: &str) -> Option<Vec<Landmark>> {
    let mut b = neutral_body();
    match id {
        "arms_up" => {
            raise_left(&mut b);
            raise_right(&mut b);
        }
        "t_pose" => {
            set(&mut b, LEFT_ELBOW, 0.75, 0.35);
            set(&mut b, LEFT_WRIST, 0.9, 0.35);
            set(&mut b, RIGHT_ELBOW, 0.25, 0.35);
            set(&mut b, RIGHT_WRIST, 0.1, 0.35);
        }
        "hands_on_head" => {
            set(&mut b, LEFT_ELBOW, 0.7, 0.2);
            set(&mut b, LEFT_WRIST, 0.55, 0.15);
            set(&mut b, RIGHT_ELBOW, 0.3, 0.2);
            set(&mut b, RIGHT_WRIST, 0.45, 0.15);
        }
        "left_arm_up" => raise_left(&mut b),
        "right_arm_up" => raise_right(&mut b),
        "crouch" => {
            set(&mut b, LEFT_HIP, 0.56, 0.7);
            set(&mut b, LEFT_KNEE, 0.66, 0.8);
            set(&mut b, LEFT_ANKLE, 0.56, 0.9);
            set(&mut b, RIGHT_HIP, 0.44, 0.7);
            set(&mut b, RIGHT_KNEE, 0.34, 0.8);
            set(&mut b, RIGHT_ANKLE, 0.44, 0.9);
        }
        "lean_left" => shift_upper_body(&mut b, -0.12),
        "lean_right" => shift_upper_body(&mut b, 0.12),
        _ => return None,
    }
    Some(b)
}

fn hand_base(cx: f32, cy: f32) -> Vec<Landmark> {
    let mut h = vec![Landmark::new(cx, cy); HAND_LANDMARK_COUNT];
    set(&mut h, WRIST, cx, cy + 0.1);
    set(&mut h, 1, cx - 0.04, cy + 0.07);
    set(&mut h, 2, cx - 0.06, cy + 0.04);
    set(&mut h, 3, cx - 0.07, cy + 0.02);
    set(&mut h, THUMB_TIP, cx - 0.08, cy);
    for (base, dx) in FINGER_BASES.into_iter().zip(FINGER_X) {
        set(&mut h, base, cx + dx, cy);
    }
    h
}

/// Fingers extended straight up from knuckles at `(cx, cy)`.
pub fn open_hand(cx: f32, cy: f32) -> Vec<Landmark> {
    let mut h = hand_base(cx, cy);
    for (base, dx) in FINGER_BASES.into_iter().zip(FINGER_X) {
        set(&mut h, base + 1, cx + dx, cy - 0.04);
        set(&mut h, base + 2, cx + dx, cy - 0.06);
        set(&mut h, base + 3, cx + dx, cy - 0.08);
    }
    h
}

/// Open hand with the fingertips fanned apart.
pub fn spread_hand(cx: f32, cy: f32) -> Vec<Landmark> {
    let mut h = open_hand(cx, cy);
    for (base, dx) in FINGER_BASES.into_iter().zip(FANNED_TIP_X) {
        set(&mut h, base + 3, cx + dx, cy - 0.08);
    }
    h
}

/// A fist: every fingertip curled below its PIP joint.
pub fn closed_hand(cx: f32, cy: f32) -> Vec<Landmark> {
    let mut h = hand_base(cx, cy);
    for (base, dx) in FINGER_BASES.into_iter().zip(FINGER_X) {
        set(&mut h, base + 1, cx + dx, cy - 0.03);
        set(&mut h, base + 2, cx + dx, cy - 0.01);
        set(&mut h, base + 3, cx + dx, cy + 0.02);
    }
    set(&mut h, THUMB_TIP, cx - 0.09, cy + 0.05);
    h
}

/// Spread hand with the thumb tip on `finger` (1 = index .. 4 = pinky).
pub fn pinch_hand(cx: f32, cy: f32, finger: u8) -> Vec<Landmark> {
    let mut h = spread_hand(cx, cy);
    let idx = usize::from(finger.clamp(1, 4)) - 1;
    let tip = h[FINGER_BASES[idx] + 3];
    h[THUMB_TIP] = tip;
    h
}

/// Open hand whose index fingertip sits at `(x, y)`.
pub fn pointing_at(x: f32, y: f32) -> Vec<Landmark> {
    open_hand(x - FINGER_X[0], y + 0.08)
}

/// Hand whose palm centre sits at `(x, y)`, as a fist or open.
pub fn palm_at(x: f32, y: f32, closed: bool) -> Vec<Landmark> {
    // palm centre is 0.02 below the knuckle row
    if closed {
        closed_hand(x, y - 0.02)
    } else {
        open_hand(x, y - 0.02)
    }
}

pub fn observation(handedness: Handedness, landmarks: Vec<Landmark>) -> HandObservation {
    HandObservation {
        handedness,
        landmarks,
    }
}
